//! Color string grammars
//!
//! Grammars are tried in a fixed order: named colors, long hex, `hsl()`,
//! integer `rgb()`, short hex, then percentage `rgb()`. The first match wins.

use std::f64::consts::PI;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{names, Color, ColorError, Hsla, Rgba};

static LONG_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?((?:[[:xdigit:]]{2}){3,4})$").expect("valid long hex regex"));

static SHORT_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([[:xdigit:]]{3,4})$").expect("valid short hex regex"));

static HSL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?i:hsla?)\(({NUM})((?i:deg|rad|grad|turn))?{SEP}({NUM})%{SEP}({NUM})%(?:{SEP}({ALPHA}))?\)$"
    ))
    .expect("valid hsl regex")
});

static RGB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?i:rgba?)\(({NUM}){SEP}({NUM}){SEP}({NUM})(?:{SEP}({ALPHA}))?\)$"
    ))
    .expect("valid rgb regex")
});

static RGB_PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?i:rgba?)\(({NUM})%{SEP}({NUM})%{SEP}({NUM})%(?:{SEP}({ALPHA}))?\)$"
    ))
    .expect("valid rgb percentage regex")
});

const NUM: &str = r"(?:\d*\.)?\d+";
const SEP: &str = r"(?: +| *, *)";
const ALPHA: &str = r"\d+(?:\.\d+)?%|\d*\.\d+|\d+";

/// Unit attached to a hue in `hsl()` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    #[default]
    Deg,
    Rad,
    Grad,
    Turn,
}

impl AngleUnit {
    /// Convert an angle in this unit to turns.
    pub fn to_turns(self, value: f64) -> f64 {
        match self {
            AngleUnit::Deg => value / 360.0,
            AngleUnit::Rad => value / (2.0 * PI),
            AngleUnit::Grad => value / 400.0,
            AngleUnit::Turn => value,
        }
    }
}

impl FromStr for AngleUnit {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "deg" => Ok(AngleUnit::Deg),
            "rad" => Ok(AngleUnit::Rad),
            "grad" => Ok(AngleUnit::Grad),
            "turn" => Ok(AngleUnit::Turn),
            other => Err(ColorError::UnknownAngleUnit(other.to_string())),
        }
    }
}

/// Convert a hue expressed in `unit` to turns. An empty unit means degrees.
///
/// ```
/// use pixelkit::color::hue_from_type;
///
/// assert_eq!(hue_from_type(180.0, "").unwrap(), 0.5);
/// assert_eq!(hue_from_type(100.0, "grad").unwrap(), 0.25);
/// assert!(hue_from_type(1.0, "arcmin").is_err());
/// ```
pub fn hue_from_type(value: f64, unit: &str) -> Result<f64, ColorError> {
    Ok(unit.parse::<AngleUnit>()?.to_turns(value))
}

/// Parse a color string into its packed value.
pub(super) fn parse_str(input: &str) -> Result<u32, ColorError> {
    if let Some(value) = names::lookup(input) {
        return Ok(value);
    }

    if let Some(caps) = LONG_HEX.captures(input) {
        let digits = &caps[1];
        let value = u32::from_str_radix(digits, 16).map_err(|_| parse_error(input))?;
        return Ok(if digits.len() == 8 { value } else { (value << 8) | 0xFF });
    }

    if let Some(caps) = HSL.captures(input) {
        let unit = caps.get(2).map_or("", |m| m.as_str());
        let h = hue_from_type(number(&caps, 1, input)?, &unit.to_ascii_lowercase())?;
        let a = match caps.get(5) {
            Some(m) => parse_alpha(m.as_str(), input)? / 255.0,
            None => 1.0,
        };
        let hsla = Hsla {
            h,
            s: number(&caps, 3, input)? / 100.0,
            l: number(&caps, 4, input)? / 100.0,
            a,
        };
        return Ok(Color::from_hsla(hsla).value());
    }

    if let Some(caps) = RGB.captures(input) {
        return rgba_from_captures(&caps, false, input);
    }

    if let Some(caps) = SHORT_HEX.captures(input) {
        let digits = caps[1].as_bytes();
        let nibble = |i: usize| -> Result<u8, ColorError> {
            let digit = digits.get(i).copied().unwrap_or(b'f');
            (digit as char)
                .to_digit(16)
                .map(|d| d as u8 * 0x11)
                .ok_or_else(|| parse_error(input))
        };
        let rgba = Rgba { r: nibble(0)?, g: nibble(1)?, b: nibble(2)?, a: nibble(3)? };
        return Ok(Color::from_rgba(rgba).value());
    }

    if let Some(caps) = RGB_PERCENT.captures(input) {
        return rgba_from_captures(&caps, true, input);
    }

    tracing::debug!(input, "no color grammar matched");
    Err(parse_error(input))
}

fn rgba_from_captures(caps: &Captures<'_>, percent: bool, input: &str) -> Result<u32, ColorError> {
    let channel = |i: usize| {
        number(caps, i, input).map(|v| round_byte(if percent { v * 255.0 / 100.0 } else { v }))
    };
    let a = match caps.get(4) {
        Some(m) => round_byte(parse_alpha(m.as_str(), input)?),
        None => 0xFF,
    };
    let rgba = Rgba { r: channel(1)?, g: channel(2)?, b: channel(3)?, a };
    Ok(Color::from_rgba(rgba).value())
}

/// Alpha token to a `0..=255` value.
///
/// Percentages scale by 255/100. Tokens with a decimal point, and the bare
/// integers `0` and `1`, are fractions of one. Other integers are raw bytes.
fn parse_alpha(token: &str, input: &str) -> Result<f64, ColorError> {
    let value = if let Some(percent) = token.strip_suffix('%') {
        parse_number(percent, input)? * 255.0 / 100.0
    } else if token.contains('.') {
        parse_number(token, input)? * 255.0
    } else {
        let raw = parse_number(token, input)?;
        if raw <= 1.0 {
            raw * 255.0
        } else {
            raw
        }
    };
    Ok(value.clamp(0.0, 255.0))
}

fn number(caps: &Captures<'_>, index: usize, input: &str) -> Result<f64, ColorError> {
    let token = caps.get(index).map(|m| m.as_str()).ok_or_else(|| parse_error(input))?;
    parse_number(token, input)
}

fn parse_number(token: &str, input: &str) -> Result<f64, ColorError> {
    token.parse::<f64>().map_err(|_| parse_error(input))
}

fn round_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn parse_error(input: &str) -> ColorError {
    ColorError::Parse(input.to_string())
}
