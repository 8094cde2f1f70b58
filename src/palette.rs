// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colors and the continuous color map the colorings sample from.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use error::{FractalError, Result};

/// An 8-bit RGBA color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// An opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Opaque black.
    pub fn black() -> Self {
        Color::rgb(0, 0, 0)
    }

    /// Opaque white.
    pub fn white() -> Self {
        Color::rgb(255, 255, 255)
    }

    /// Parses `#rrggbb` or `#rrggbbaa`; the `#` is optional.
    pub fn from_hex(s: &str) -> Result<Color> {
        let digits = s.trim().trim_start_matches('#');
        if !(digits.len() == 6 || digits.len() == 8)
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(FractalError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| FractalError::InvalidColor(s.to_string()))
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: alpha,
        })
    }

    /// Linear interpolation towards `other`, `t` in `[0, 1]`.
    fn mix(self, other: Color, t: f64) -> Color {
        let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
            a: lerp(self.a, other.a),
        }
    }
}

impl FromStr for Color {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Color> {
        Color::from_hex(s)
    }
}

/// One anchor of a palette.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Where the stop sits, in `[0, 1]`.
    pub position: f64,
    /// The color at that position.
    pub color: Color,
}

/// A piecewise-linear color map over `[0, 1]`.
///
/// Out-of-range fractions clamp to the nearest end and NaN reads as
/// `0.0`, so the smooth and angle colorings may overshoot a little
/// without any care on their side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    stops: Vec<ColorStop>,
}

impl Palette {
    /// Builds a palette from explicit stops, which must be non-empty
    /// and sorted by position.
    pub fn new(stops: Vec<ColorStop>) -> Result<Palette> {
        if stops.is_empty() {
            return Err(FractalError::InvalidPalette("no color stops".to_string()));
        }
        if stops.windows(2).any(|w| !(w[0].position <= w[1].position)) {
            return Err(FractalError::InvalidPalette(
                "stops are not sorted by position".to_string(),
            ));
        }
        Ok(Palette { stops })
    }

    /// Spreads `colors` evenly over `[0, 1]`.
    pub fn evenly_spaced(colors: &[Color]) -> Result<Palette> {
        let last = colors.len().saturating_sub(1).max(1) as f64;
        Palette::new(
            colors
                .iter()
                .enumerate()
                .map(|(i, &color)| ColorStop {
                    position: i as f64 / last,
                    color,
                })
                .collect(),
        )
    }

    /// A black to white ramp.
    pub fn grayscale() -> Palette {
        Palette {
            stops: vec![
                ColorStop {
                    position: 0.0,
                    color: Color::black(),
                },
                ColorStop {
                    position: 1.0,
                    color: Color::white(),
                },
            ],
        }
    }

    /// The stops, in order.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Samples the palette.  A palette deserialized without stops
    /// samples as transparent black.
    pub fn color_at(&self, fraction: f64) -> Color {
        let t = if fraction.is_nan() {
            0.0
        } else {
            fraction.max(0.0).min(1.0)
        };
        let first = match self.stops.first() {
            Some(&stop) => stop,
            None => return Color::default(),
        };
        if t <= first.position {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.position {
                let span = hi.position - lo.position;
                if span <= 0.0 {
                    return hi.color;
                }
                return lo.color.mix(hi.color, (t - lo.position) / span);
            }
        }
        self.stops.last().map_or(first.color, |stop| stop.color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::grayscale()
    }
}
