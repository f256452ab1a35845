//! Sub-pixel sampling

use crate::buffer::read_word;

/// Sample `(x, y)` by alpha-premultiplied bilinear interpolation.
///
/// Neighbours outside the grid count as fully transparent. Returns `None` when
/// no neighbour contributes any alpha, so the caller can substitute a
/// background.
pub(crate) fn bilinear(bytes: &[u8], width: u32, height: u32, x: f64, y: f64) -> Option<u32> {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1.0, y0, fx * (1.0 - fy)),
        (x0, y0 + 1.0, (1.0 - fx) * fy),
        (x0 + 1.0, y0 + 1.0, fx * fy),
    ];

    // premultiplied r, g, b followed by total alpha
    let mut acc = [0.0f64; 4];
    for (sx, sy, weight) in taps {
        if weight <= 0.0 || sx < 0.0 || sy < 0.0 || sx >= f64::from(width) || sy >= f64::from(height) {
            continue;
        }
        let index = sx as usize + sy as usize * width as usize;
        let [r, g, b, a] = read_word(bytes, index).to_be_bytes();
        let wa = weight * f64::from(a);
        acc[0] += f64::from(r) * wa;
        acc[1] += f64::from(g) * wa;
        acc[2] += f64::from(b) * wa;
        acc[3] += wa;
    }

    if acc[3] <= 0.0 {
        return None;
    }

    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    Some(u32::from_be_bytes([
        channel(acc[0] / acc[3]),
        channel(acc[1] / acc[3]),
        channel(acc[2] / acc[3]),
        channel(acc[3]),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(pixels: &[u32]) -> Vec<u8> {
        pixels.iter().flat_map(|p| p.to_be_bytes()).collect()
    }

    #[test]
    fn test_exact_grid_point() {
        let store = bytes(&[0xFF0000FF, 0x00FF00FF, 0x0000FFFF, 0xFFFFFFFF]);
        assert_eq!(bilinear(&store, 2, 2, 0.0, 0.0), Some(0xFF0000FF));
        assert_eq!(bilinear(&store, 2, 2, 1.0, 1.0), Some(0xFFFFFFFF));
    }

    #[test]
    fn test_midpoint_blend() {
        let store = bytes(&[0x000000FF, 0xFEFEFEFF]);
        assert_eq!(bilinear(&store, 2, 1, 0.5, 0.0), Some(0x7F7F7FFF));
    }

    #[test]
    fn test_transparent_neighbour_does_not_tint() {
        // the transparent pixel is white but carries no weight in the color
        let store = bytes(&[0xFF0000FF, 0xFFFFFF00]);
        assert_eq!(bilinear(&store, 2, 1, 0.5, 0.0), Some(0xFF000080));
    }

    #[test]
    fn test_edge_fades_alpha() {
        let store = bytes(&[0xFF0000FF]);
        assert_eq!(bilinear(&store, 1, 1, -0.5, 0.0), Some(0xFF000080));
    }

    #[test]
    fn test_outside_is_none() {
        let store = bytes(&[0xFF0000FF]);
        assert_eq!(bilinear(&store, 1, 1, -3.0, 7.5), None);
        assert_eq!(bilinear(&bytes(&[0]), 1, 1, 0.0, 0.0), None);
    }
}
