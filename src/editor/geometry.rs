//! Geometric transforms: flips, nearest-neighbour resizing and rotation

use super::interpolate::bilinear;
use super::PixelBuffer;
use crate::buffer::{self, read_word, reverse_pixels, write_word, BYTES_PER_PIXEL};
use crate::config::RotateConfig;

/// Slack subtracted before rounding a rotated extent up, so that extents
/// landing on an integer up to float noise do not grow by a pixel.
const EXTENT_EPSILON: f64 = 1e-9;

impl<S: AsRef<[u8]> + AsMut<[u8]>> PixelBuffer<S> {
    /// Mirror left to right by reversing each row.
    pub fn flip_horizontal(&mut self) -> &mut Self {
        let row_len = self.width as usize * BYTES_PER_PIXEL;
        if row_len == 0 {
            return self;
        }
        for row in self.store.as_mut().chunks_exact_mut(row_len) {
            reverse_pixels(row);
        }
        self
    }

    /// Mirror top to bottom. With an odd height the middle row stays put.
    pub fn flip_vertical(&mut self) -> &mut Self {
        let row_len = self.width as usize * BYTES_PER_PIXEL;
        let height = self.height as usize;
        let bytes = self.store.as_mut();
        for y in 0..height / 2 {
            let (top, bottom) = bytes.split_at_mut((height - 1 - y) * row_len);
            top[y * row_len..(y + 1) * row_len].swap_with_slice(&mut bottom[..row_len]);
        }
        self
    }
}

impl PixelBuffer {
    /// Resize to `width x height`, each destination pixel taking the source
    /// pixel at `(floor(x * old_w / width), floor(y * old_h / height))`.
    #[tracing::instrument(level = "debug", skip(self), fields(from_width = self.width, from_height = self.height))]
    pub fn resize_nearest(&mut self, width: u32, height: u32) -> &mut Self {
        let (old_w, old_h) = (self.width, self.height);
        let mut store = vec![0; buffer::required_len(width, height)];

        if old_w > 0 && old_h > 0 {
            let mut index = 0;
            for y in 0..height {
                let sy = (u64::from(y) * u64::from(old_h) / u64::from(height)).min(u64::from(old_h - 1));
                for x in 0..width {
                    let sx = (u64::from(x) * u64::from(old_w) / u64::from(width)).min(u64::from(old_w - 1));
                    let value = read_word(&self.store, sx as usize + sy as usize * old_w as usize);
                    write_word(&mut store, index, value);
                    index += 1;
                }
            }
        }

        self.replace_store(width, height, store);
        self
    }

    /// Resize by a uniform factor; fractional target sizes are truncated.
    /// NaN and negative factors collapse the buffer to `0 x 0`.
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        let width = (factor * f64::from(self.width)) as u32;
        let height = (factor * f64::from(self.height)) as u32;
        self.resize_nearest(width, height)
    }

    /// Rotate clockwise by `degrees`, using a transparent background.
    ///
    /// Multiples of 90 are exact pixel permutations. Any other angle is
    /// resampled bilinearly; with `resize` the canvas grows to the rotated
    /// bounding box, otherwise the corners are clipped.
    pub fn rotate(&mut self, degrees: f64, resize: bool) -> &mut Self {
        self.rotate_with(degrees, &RotateConfig { resize, ..RotateConfig::default() })
    }

    /// Rotate clockwise by `degrees` with explicit canvas and background settings.
    ///
    /// Non-finite angles leave the buffer unchanged.
    #[tracing::instrument(level = "debug", skip(self, config), fields(width = self.width, height = self.height))]
    pub fn rotate_with(&mut self, degrees: f64, config: &RotateConfig) -> &mut Self {
        if !degrees.is_finite() {
            tracing::debug!("ignoring non-finite angle");
            return self;
        }

        let degrees = degrees.rem_euclid(360.0);
        if degrees == 0.0 || degrees == 360.0 {
            return self;
        }
        if degrees == 90.0 {
            tracing::trace!("quarter turn fast path");
            return self.rotate_quarter();
        }
        if degrees == 180.0 {
            tracing::trace!("half turn fast path");
            reverse_pixels(&mut self.store);
            return self;
        }
        if degrees == 270.0 {
            tracing::trace!("three quarter turn fast path");
            reverse_pixels(&mut self.store);
            return self.rotate_quarter();
        }

        self.rotate_resampled(degrees, config)
    }

    /// Exact 90 degree clockwise rotation; swaps width and height.
    fn rotate_quarter(&mut self) -> &mut Self {
        let (width, height) = (self.width, self.height);
        let mut store = vec![0; self.store.len()];
        let mut index = 0;
        for y in 0..height as usize {
            for x in 0..width as usize {
                let dest = x * height as usize + (height as usize - 1 - y);
                write_word(&mut store, dest, read_word(&self.store, index));
                index += 1;
            }
        }
        self.replace_store(height, width, store);
        self
    }

    fn rotate_resampled(&mut self, degrees: f64, config: &RotateConfig) -> &mut Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (width, height) = (self.width, self.height);
        let (w, h) = (f64::from(width), f64::from(height));

        let (out_w, out_h) = if config.resize {
            (extent(w * cos.abs() + h * sin.abs()), extent(w * sin.abs() + h * cos.abs()))
        } else {
            (width, height)
        };
        tracing::trace!(out_w, out_h, "resampled rotation");

        let (src_cx, src_cy) = ((w - 1.0) / 2.0, (h - 1.0) / 2.0);
        let (dst_cx, dst_cy) = ((f64::from(out_w) - 1.0) / 2.0, (f64::from(out_h) - 1.0) / 2.0);
        let background = config.background.value();

        let mut store = vec![0; buffer::required_len(out_w, out_h)];
        let mut index = 0;
        for y in 0..out_h {
            let ry = f64::from(y) - dst_cy;
            for x in 0..out_w {
                let rx = f64::from(x) - dst_cx;
                // inverse of a clockwise turn in y-down coordinates
                let sx = src_cx + cos * rx + sin * ry;
                let sy = src_cy - sin * rx + cos * ry;
                let value = bilinear(&self.store, width, height, sx, sy).unwrap_or(background);
                write_word(&mut store, index, value);
                index += 1;
            }
        }

        self.replace_store(out_w, out_h, store);
        self
    }
}

fn extent(value: f64) -> u32 {
    (value - EXTENT_EPSILON).ceil().max(0.0) as u32
}
