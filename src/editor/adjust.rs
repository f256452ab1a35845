//! Colorimetric adjustments
//!
//! HSL modifiers operate on fractional `[0, 1]` components, RGBA modifiers on
//! byte channels. Each pass only clamps the component it changes.

use std::str::FromStr;

use super::PixelBuffer;
use crate::color::{Color, Hsla};
use crate::error::EditorError;

/// How an amount combines with the current component value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyMode {
    /// `current + amount`
    Add,
    /// `current * amount`
    Scale,
    /// `amount`
    Value,
}

impl ModifyMode {
    pub fn apply(self, current: f64, amount: f64) -> f64 {
        match self {
            ModifyMode::Add => current + amount,
            ModifyMode::Scale => current * amount,
            ModifyMode::Value => amount,
        }
    }
}

impl FromStr for ModifyMode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(ModifyMode::Add),
            "scale" => Ok(ModifyMode::Scale),
            "value" => Ok(ModifyMode::Value),
            other => Err(EditorError::unknown_mode("modify", other)),
        }
    }
}

/// Which component `invert` flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvertMode {
    /// Rotate hue by half a turn
    Hue,
    /// `s = 1 - s`
    Saturation,
    /// `l = 1 - l`
    Luminosity,
    /// Invert red, green and blue; alpha is kept
    All,
}

impl FromStr for InvertMode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hue" => Ok(InvertMode::Hue),
            "saturation" => Ok(InvertMode::Saturation),
            "luminosity" => Ok(InvertMode::Luminosity),
            "all" => Ok(InvertMode::All),
            other => Err(EditorError::unknown_mode("invert", other)),
        }
    }
}

#[derive(Clone, Copy)]
enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> PixelBuffer<S> {
    pub fn saturation(&mut self, mode: ModifyMode, amount: f64) -> &mut Self {
        self.map_hsla(|hsla| Hsla { s: mode.apply(hsla.s, amount).clamp(0.0, 1.0), ..hsla })
    }

    pub fn luminosity(&mut self, mode: ModifyMode, amount: f64) -> &mut Self {
        self.map_hsla(|hsla| Hsla { l: mode.apply(hsla.l, amount).clamp(0.0, 1.0), ..hsla })
    }

    /// Rotate every hue by `degrees`. Negative and out-of-range shifts wrap.
    pub fn hue_shift(&mut self, degrees: f64) -> &mut Self {
        let turns = degrees.rem_euclid(360.0) / 360.0;
        self.map_hsla(|hsla| Hsla { h: hsla.h + turns, ..hsla })
    }

    /// Drop all saturation.
    pub fn greyscale(&mut self) -> &mut Self {
        self.saturation(ModifyMode::Value, 0.0)
    }

    /// Alias of [`greyscale`](Self::greyscale).
    pub fn grayscale(&mut self) -> &mut Self {
        self.greyscale()
    }

    pub fn red(&mut self, mode: ModifyMode, amount: f64) -> &mut Self {
        self.map_channel(Channel::Red, mode, amount)
    }

    pub fn green(&mut self, mode: ModifyMode, amount: f64) -> &mut Self {
        self.map_channel(Channel::Green, mode, amount)
    }

    pub fn blue(&mut self, mode: ModifyMode, amount: f64) -> &mut Self {
        self.map_channel(Channel::Blue, mode, amount)
    }

    pub fn alpha(&mut self, mode: ModifyMode, amount: f64) -> &mut Self {
        self.map_channel(Channel::Alpha, mode, amount)
    }

    /// Alias of [`alpha`](Self::alpha).
    pub fn opacity(&mut self, mode: ModifyMode, amount: f64) -> &mut Self {
        self.alpha(mode, amount)
    }

    pub fn invert(&mut self, mode: InvertMode) -> &mut Self {
        match mode {
            InvertMode::All => self.map_packed(|value| (!value & 0xFFFF_FF00) | (value & 0xFF)),
            InvertMode::Hue => self.map_hsla(|hsla| Hsla { h: hsla.h + 0.5, ..hsla }),
            InvertMode::Saturation => self.map_hsla(|hsla| Hsla { s: 1.0 - hsla.s, ..hsla }),
            InvertMode::Luminosity => self.map_hsla(|hsla| Hsla { l: 1.0 - hsla.l, ..hsla }),
        }
    }

    fn map_hsla(&mut self, mut f: impl FnMut(Hsla) -> Hsla) -> &mut Self {
        self.map_packed(|value| Color::from_hsla(f(Color(value).hsla())).value())
    }

    fn map_channel(&mut self, channel: Channel, mode: ModifyMode, amount: f64) -> &mut Self {
        let modify = |current: u8| mode.apply(f64::from(current), amount).round().clamp(0.0, 255.0) as u8;
        self.map_packed(|value| {
            let mut rgba = Color(value).rgba();
            match channel {
                Channel::Red => rgba.r = modify(rgba.r),
                Channel::Green => rgba.g = modify(rgba.g),
                Channel::Blue => rgba.b = modify(rgba.b),
                Channel::Alpha => rgba.a = modify(rgba.a),
            }
            Color::from_rgba(rgba).value()
        })
    }
}
