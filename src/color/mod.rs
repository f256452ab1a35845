//! Packed RGBA colors
//!
//! A [`Color`] is a single `u32` laid out as `R<<24 | G<<16 | B<<8 | A`, the same
//! big-endian byte order a [`PixelBuffer`](crate::editor::PixelBuffer) stores.
//! Colors convert to and from integer RGB(A) channels and fractional HSL(A),
//! and can be parsed from:
//! - Named colors: `red`, `rebeccapurple`, `transparent`, ...
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (the `#` is optional)
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hsla()`

mod names;
mod parse;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use names::COLOR_NAMES;
pub use parse::{hue_from_type, AngleUnit};

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// No grammar accepted the input
    #[error("unable to parse '{0}' as a color")]
    Parse(String),
    /// Hue carried an angle unit other than deg, rad, grad or turn
    #[error("unknown angle type '{0}'")]
    UnknownAngleUnit(String),
}

/// Integer RGB channels, alpha implied opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Integer RGBA channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self { r: rgb.r, g: rgb.g, b: rgb.b, a: 0xFF }
    }
}

/// Fractional HSL, hue in turns. Alpha implied opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Fractional HSLA. Every component is nominally in `[0, 1]`; hue is a
/// fraction of a full turn rather than degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl From<Hsl> for Hsla {
    fn from(hsl: Hsl) -> Self {
        Self { h: hsl.h, s: hsl.s, l: hsl.l, a: 1.0 }
    }
}

impl From<Hsla> for Hsl {
    fn from(hsla: Hsla) -> Self {
        Self { h: hsla.h, s: hsla.s, l: hsla.l }
    }
}

/// Anything that can be resolved to a packed color.
///
/// Untagged deserialization accepts a number, a string, an `{r,g,b[,a]}` record
/// or an `{h,s,l[,a]}` record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    #[serde(skip)]
    Color(Color),
    Packed(u32),
    Text(String),
    Rgba(Rgba),
    Rgb(Rgb),
    Hsla(Hsla),
    Hsl(Hsl),
}

impl ColorSpec {
    /// Resolve to a packed color value.
    pub fn resolve(&self) -> Result<Color, ColorError> {
        match self {
            ColorSpec::Color(color) => Ok(*color),
            ColorSpec::Packed(value) => Ok(Color(*value)),
            ColorSpec::Text(text) => parse::parse_str(text).map(Color),
            ColorSpec::Rgba(rgba) => Ok(Color::from_rgba(*rgba)),
            ColorSpec::Rgb(rgb) => Ok(Color::from_rgba((*rgb).into())),
            ColorSpec::Hsla(hsla) => Ok(Color::from_hsla(*hsla)),
            ColorSpec::Hsl(hsl) => Ok(Color::from_hsla((*hsl).into())),
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Color(color)
    }
}

impl From<u32> for ColorSpec {
    fn from(value: u32) -> Self {
        ColorSpec::Packed(value)
    }
}

impl From<&str> for ColorSpec {
    fn from(text: &str) -> Self {
        ColorSpec::Text(text.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(text: String) -> Self {
        ColorSpec::Text(text)
    }
}

impl From<Rgb> for ColorSpec {
    fn from(rgb: Rgb) -> Self {
        ColorSpec::Rgb(rgb)
    }
}

impl From<Rgba> for ColorSpec {
    fn from(rgba: Rgba) -> Self {
        ColorSpec::Rgba(rgba)
    }
}

impl From<Hsl> for ColorSpec {
    fn from(hsl: Hsl) -> Self {
        ColorSpec::Hsl(hsl)
    }
}

impl From<Hsla> for ColorSpec {
    fn from(hsla: Hsla) -> Self {
        ColorSpec::Hsla(hsla)
    }
}

/// A packed `0xRRGGBBAA` color.
///
/// # Examples
///
/// ```
/// use pixelkit::color::Color;
///
/// let red = Color::parse("hsl(0, 100%, 50%)").unwrap();
/// assert_eq!(red.value(), 0xFF0000FF);
/// assert_eq!(red.name(), Some("red"));
/// assert_eq!(red.to_string(), "#ff0000ff");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color(0x0000_0000);

    /// Parse any color-like value.
    pub fn parse(spec: impl Into<ColorSpec>) -> Result<Color, ColorError> {
        spec.into().resolve()
    }

    /// The packed value.
    pub fn value(self) -> u32 {
        self.0
    }

    pub fn rgb(self) -> Rgb {
        let Rgba { r, g, b, .. } = self.rgba();
        Rgb { r, g, b }
    }

    pub fn rgba(self) -> Rgba {
        let [r, g, b, a] = self.0.to_be_bytes();
        Rgba { r, g, b, a }
    }

    pub fn hsl(self) -> Hsl {
        self.hsla().into()
    }

    pub fn hsla(self) -> Hsla {
        Self::rgb_to_hsl(self.rgba())
    }

    /// Name of this color, if it is in the named table.
    ///
    /// Any color with zero alpha is reported as `transparent`, regardless of its
    /// RGB channels.
    pub fn name(self) -> Option<&'static str> {
        if self.0 & 0xFF == 0 {
            return Some("transparent");
        }
        names::reverse_lookup(self.0)
    }

    /// `#rrggbbaa` lowercase hex form.
    pub fn hex(self) -> String {
        format!("#{:08x}", self.0)
    }

    /// Pack integer channels.
    pub fn from_rgba(rgba: Rgba) -> Color {
        Color(u32::from_be_bytes([rgba.r, rgba.g, rgba.b, rgba.a]))
    }

    /// Convert fractional HSLA into a packed color.
    ///
    /// Saturation, lightness and alpha are clamped to `[0, 1]`; hue wraps.
    pub fn from_hsla(hsla: Hsla) -> Color {
        let s = hsla.s.clamp(0.0, 1.0);
        let l = hsla.l.clamp(0.0, 1.0);
        let a = to_channel(hsla.a.clamp(0.0, 1.0));

        if s == 0.0 {
            let grey = to_channel(l);
            return Color::from_rgba(Rgba { r: grey, g: grey, b: grey, a });
        }

        let h = hsla.h.rem_euclid(1.0);
        let q = if l < 0.5 { l + s * l } else { l + s - l * s };
        let p = 2.0 * l - q;

        Color::from_rgba(Rgba {
            r: to_channel(Self::hue_to_rgb(p, q, h + 1.0 / 3.0)),
            g: to_channel(Self::hue_to_rgb(p, q, h)),
            b: to_channel(Self::hue_to_rgb(p, q, h - 1.0 / 3.0)),
            a,
        })
    }

    /// One channel of the HSL-to-RGB conversion. `t` may lie one turn outside
    /// `[0, 1]` and is wrapped first.
    pub fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
        let t = if t < 0.0 {
            t + 1.0
        } else if t > 1.0 {
            t - 1.0
        } else {
            t
        };

        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    /// Standard RGB to HSL conversion with alpha normalized to `[0, 1]`.
    pub fn rgb_to_hsl(rgba: Rgba) -> Hsla {
        let r = f64::from(rgba.r) / 255.0;
        let g = f64::from(rgba.g) / 255.0;
        let b = f64::from(rgba.b) / 255.0;
        let a = f64::from(rgba.a) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsla { h: 0.0, s: 0.0, l, a };
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsla { h: h / 6.0, s, l, a }
    }
}

/// Scale a `[0, 1]` fraction to a rounded byte.
fn to_channel(fraction: f64) -> u8 {
    (fraction * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_str(s).map(Color)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.hex()
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for Color {
    fn from(rgba: Rgba) -> Self {
        Color::from_rgba(rgba)
    }
}

impl From<Hsla> for Color {
    fn from(hsla: Hsla) -> Self {
        Color::from_hsla(hsla)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_layout() {
        let color = Color(0x1234_5678);
        assert_eq!(color.rgba(), Rgba { r: 0x12, g: 0x34, b: 0x56, a: 0x78 });
        assert_eq!(color.rgb(), Rgb { r: 0x12, g: 0x34, b: 0x56 });
    }

    #[test]
    fn test_red_extraction_uses_top_byte() {
        assert_eq!(Color(0xFF00_0000).rgba().r, 0xFF);
        assert_eq!(Color(0x8000_0000).rgba().r, 0x80);
    }

    #[test]
    fn test_from_rgba_packs_big_endian() {
        let packed = Color::from_rgba(Rgba { r: 1, g: 2, b: 3, a: 4 });
        assert_eq!(packed.value(), 0x0102_0304);
    }

    #[test]
    fn test_rgb_spec_defaults_to_opaque() {
        let color = Color::parse(Rgb { r: 10, g: 20, b: 30 }).unwrap();
        assert_eq!(color.value(), 0x0A14_1EFF);
    }

    #[test]
    fn test_hsl_spec_defaults_to_opaque() {
        let color = Color::parse(Hsl { h: 0.0, s: 1.0, l: 0.5 }).unwrap();
        assert_eq!(color.value(), 0xFF00_00FF);
    }

    #[test]
    fn test_rgb_to_hsl_primaries() {
        let red = Color::rgb_to_hsl(Rgba { r: 255, g: 0, b: 0, a: 255 });
        assert_eq!((red.h, red.s, red.l, red.a), (0.0, 1.0, 0.5, 1.0));

        let green = Color::rgb_to_hsl(Rgba { r: 0, g: 255, b: 0, a: 255 });
        assert!((green.h - 1.0 / 3.0).abs() < 1e-9);

        let blue = Color::rgb_to_hsl(Rgba { r: 0, g: 0, b: 255, a: 255 });
        assert!((blue.h - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rgb_to_hsl_achromatic() {
        let grey = Color::rgb_to_hsl(Rgba { r: 128, g: 128, b: 128, a: 0 });
        assert_eq!(grey.h, 0.0);
        assert_eq!(grey.s, 0.0);
        assert!((grey.l - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(grey.a, 0.0);
    }

    #[test]
    fn test_from_hsla_zero_saturation_keeps_lightness() {
        let dark = Color::from_hsla(Hsla { h: 0.3, s: 0.0, l: 0.25, a: 1.0 });
        assert_eq!(dark.rgba(), Rgba { r: 64, g: 64, b: 64, a: 255 });
    }

    #[test]
    fn test_from_hsla_clamps_without_rounding_saturation() {
        // 0.4 saturation must stay fractional, not snap to 0
        let color = Color::from_hsla(Hsla { h: 0.0, s: 0.4, l: 0.5, a: 1.0 });
        let rgba = color.rgba();
        assert!(rgba.r > rgba.g);
        assert_eq!(rgba.g, rgba.b);
    }

    #[test]
    fn test_from_hsla_wraps_hue() {
        let a = Color::from_hsla(Hsla { h: 1.25, s: 1.0, l: 0.5, a: 1.0 });
        let b = Color::from_hsla(Hsla { h: 0.25, s: 1.0, l: 0.5, a: 1.0 });
        let c = Color::from_hsla(Hsla { h: -0.75, s: 1.0, l: 0.5, a: 1.0 });
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_hue_to_rgb_segments() {
        let (p, q) = (0.0, 1.0);
        assert!((Color::hue_to_rgb(p, q, 1.0 / 12.0) - 0.5).abs() < 1e-9);
        assert_eq!(Color::hue_to_rgb(p, q, 0.3), q);
        assert!((Color::hue_to_rgb(p, q, 7.0 / 12.0) - 0.5).abs() < 1e-9);
        assert_eq!(Color::hue_to_rgb(p, q, 0.9), p);
        assert_eq!(Color::hue_to_rgb(p, q, -0.7), q);
    }

    #[test]
    fn test_hsl_round_trip_all_channels() {
        for r in (0..=255u8).step_by(5) {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(17) {
                    for a in [0u8, 1, 127, 128, 254, 255] {
                        let rgba = Rgba { r, g, b, a };
                        let back = Color::from_hsla(Color::rgb_to_hsl(rgba)).rgba();
                        assert!((i16::from(back.r) - i16::from(r)).abs() <= 1, "{rgba:?} -> {back:?}");
                        assert!((i16::from(back.g) - i16::from(g)).abs() <= 1, "{rgba:?} -> {back:?}");
                        assert!((i16::from(back.b) - i16::from(b)).abs() <= 1, "{rgba:?} -> {back:?}");
                        assert_eq!(back.a, a);
                    }
                }
            }
        }
    }

    #[test]
    fn test_name_transparent_ignores_rgb() {
        assert_eq!(Color(0xFF00_0000).name(), Some("transparent"));
        assert_eq!(Color(0x0000_0000).name(), Some("transparent"));
    }

    #[test]
    fn test_name_unknown() {
        assert_eq!(Color(0x1234_56FF).name(), None);
    }

    #[test]
    fn test_display_and_from_str() {
        let color: Color = "#0a0b0c0d".parse().unwrap();
        assert_eq!(color.to_string(), "#0a0b0c0d");
        assert_eq!(color.hex(), "#0a0b0c0d");
    }

    #[test]
    fn test_parse_passthrough() {
        let color = Color(0xDEAD_BEEF);
        assert_eq!(Color::parse(color).unwrap(), color);
        assert_eq!(Color::parse(0xDEAD_BEEFu32).unwrap(), color);
    }
}
