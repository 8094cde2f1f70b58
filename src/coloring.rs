// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colorings turn the classification of a point into a color.
//!
//! Every coloring owns its algorithm and runs it exactly once per
//! point.  Points that used up the whole iteration budget are painted
//! with the main color; the variants differ only in how they paint the
//! others.
//!
//! A coloring serializes to a tagged JSON record
//! (`{"_type": "BailoutColoring", "algorithm": {...}, ...}`), which is
//! how the threaded renderer hands its configuration to the workers
//! and how a configuration is saved and restored.

use std::f64::consts::{LN_2, PI};

use serde::{Deserialize, Serialize};

use algorithm::{Algorithm, Iterate, IterationResult};
use complex::{Complex, ComplexOps};
use error::{from_record, to_record, FractalError, Result};
use palette::{Color, Palette};

/// The capability shared by every coloring.
pub trait Colorize {
    /// The color of one point of the complex plane.
    fn color(&self, z: Complex) -> Color;

    /// The algorithm classifying the points.
    fn algorithm(&self) -> &Algorithm;
}

/// Runs the algorithm; `None` when the point used the whole budget.
fn escaped(algorithm: &Algorithm, z: Complex) -> Option<IterationResult> {
    let result = algorithm.iterate(z);
    if result.count == algorithm.max_iter() {
        None
    } else {
        Some(result)
    }
}

/// Two colors: one for the set, one for everything else.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleColoring {
    /// The classifying algorithm.
    pub algorithm: Algorithm,
    /// Color of the points inside the set.
    pub main_color: Color,
    /// Color of every escaping point.
    pub bailout_color: Color,
}

impl Colorize for SimpleColoring {
    fn color(&self, z: Complex) -> Color {
        match escaped(&self.algorithm, z) {
            Some(_) => self.bailout_color,
            None => self.main_color,
        }
    }

    fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }
}

/// Banded escape-time coloring: `palette(count / max_iter)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BailoutColoring {
    /// The classifying algorithm.
    pub algorithm: Algorithm,
    /// Color of the points inside the set.
    pub main_color: Color,
    /// Colors of the escaping points.
    pub palette: Palette,
}

impl Colorize for BailoutColoring {
    fn color(&self, z: Complex) -> Color {
        match escaped(&self.algorithm, z) {
            Some(result) => self
                .palette
                .color_at(f64::from(result.count) / f64::from(self.algorithm.max_iter())),
            None => self.main_color,
        }
    }

    fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }
}

/// Continuous escape-time coloring, without the bands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmoothBailoutColoring {
    /// The classifying algorithm.
    pub algorithm: Algorithm,
    /// Color of the points inside the set.
    pub main_color: Color,
    /// Colors of the escaping points.
    pub palette: Palette,
}

impl SmoothBailoutColoring {
    /// `(count + 1 - log2(log2 |z|)) / max_iter`.
    ///
    /// The double logarithm only exists for `|z| > 1`.  Below that, or
    /// for a non-finite `|z|`, the banded `count / max_iter` is used.
    pub fn fraction(&self, result: &IterationResult) -> f64 {
        let count = f64::from(result.count);
        let max_iter = f64::from(self.algorithm.max_iter());
        let modulus = result.z.modulus();
        if modulus.is_finite() && modulus > 1.0 {
            (count + 1.0 - (modulus.ln() / LN_2).ln() / LN_2) / max_iter
        } else {
            count / max_iter
        }
    }
}

impl Colorize for SmoothBailoutColoring {
    fn color(&self, z: Complex) -> Color {
        match escaped(&self.algorithm, z) {
            Some(result) => self.palette.color_at(self.fraction(&result)),
            None => self.main_color,
        }
    }

    fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }
}

/// Splits the escaping points by the sign of the imaginary part of
/// their last value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryColoring {
    /// The classifying algorithm.
    pub algorithm: Algorithm,
    /// Color of the points inside the set.
    pub main_color: Color,
    /// Color when `im(z) > 0`.
    pub positive_color: Color,
    /// Color otherwise.
    pub negative_color: Color,
}

impl Colorize for BinaryColoring {
    fn color(&self, z: Complex) -> Color {
        match escaped(&self.algorithm, z) {
            Some(ref result) if result.z.im > 0.0 => self.positive_color,
            Some(_) => self.negative_color,
            None => self.main_color,
        }
    }

    fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }
}

/// Colors by the argument of the last value.  With the Newton
/// algorithm this tells the roots apart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleColoring {
    /// The classifying algorithm.
    pub algorithm: Algorithm,
    /// Color of the points inside the set.
    pub main_color: Color,
    /// Colors around the circle, starting at `-π`.
    pub palette: Palette,
}

impl Colorize for AngleColoring {
    fn color(&self, z: Complex) -> Color {
        match escaped(&self.algorithm, z) {
            Some(result) => self
                .palette
                .color_at((result.z.im.atan2(result.z.re) + PI) / (2.0 * PI)),
            None => self.main_color,
        }
    }

    fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }
}

/// The closed set of colorings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum Coloring {
    /// See [`SimpleColoring`].
    #[serde(rename = "SimpleColoring")]
    Simple(SimpleColoring),
    /// See [`BailoutColoring`].
    #[serde(rename = "BailoutColoring")]
    Bailout(BailoutColoring),
    /// See [`SmoothBailoutColoring`].
    #[serde(rename = "SmoothBailoutColoring")]
    SmoothBailout(SmoothBailoutColoring),
    /// See [`BinaryColoring`].
    #[serde(rename = "BinaryColoring")]
    Binary(BinaryColoring),
    /// See [`AngleColoring`].
    #[serde(rename = "AngleColoring")]
    Angle(AngleColoring),
}

impl Coloring {
    /// Names accepted by [`Coloring::build`].
    pub const NAMES: [&'static str; 5] = ["simple", "bailout", "smooth", "binary", "angle"];

    /// Builds a coloring by name.  `palette` feeds the palette based
    /// variants; the simple and binary ones take its two ends.
    pub fn build(
        name: &str,
        algorithm: Algorithm,
        main_color: Color,
        palette: Palette,
    ) -> Result<Coloring> {
        let low = palette.color_at(0.0);
        let high = palette.color_at(1.0);
        Ok(match name {
            "simple" => Coloring::Simple(SimpleColoring {
                algorithm,
                main_color,
                bailout_color: high,
            }),
            "bailout" => Coloring::Bailout(BailoutColoring {
                algorithm,
                main_color,
                palette,
            }),
            "smooth" => Coloring::SmoothBailout(SmoothBailoutColoring {
                algorithm,
                main_color,
                palette,
            }),
            "binary" => Coloring::Binary(BinaryColoring {
                algorithm,
                main_color,
                positive_color: high,
                negative_color: low,
            }),
            "angle" => Coloring::Angle(AngleColoring {
                algorithm,
                main_color,
                palette,
            }),
            other => return Err(FractalError::Config(format!("unknown coloring {:?}", other))),
        })
    }

    /// The algorithm, for reconfiguration between renders.
    pub fn algorithm_mut(&mut self) -> &mut Algorithm {
        match *self {
            Coloring::Simple(ref mut c) => &mut c.algorithm,
            Coloring::Bailout(ref mut c) => &mut c.algorithm,
            Coloring::SmoothBailout(ref mut c) => &mut c.algorithm,
            Coloring::Binary(ref mut c) => &mut c.algorithm,
            Coloring::Angle(ref mut c) => &mut c.algorithm,
        }
    }

    /// Changes the color of the points inside the set.
    pub fn set_main_color(&mut self, color: Color) {
        match *self {
            Coloring::Simple(ref mut c) => c.main_color = color,
            Coloring::Bailout(ref mut c) => c.main_color = color,
            Coloring::SmoothBailout(ref mut c) => c.main_color = color,
            Coloring::Binary(ref mut c) => c.main_color = color,
            Coloring::Angle(ref mut c) => c.main_color = color,
        }
    }

    /// The tagged JSON record of this coloring.
    /// Fails with [`FractalError::Config`] when a parameter of the
    /// algorithm is not finite, as the record has no spelling for it.
    pub fn to_json(&self) -> Result<String> {
        self.algorithm().validate()?;
        to_record("coloring", self)
    }

    /// Rebuilds a coloring from its tagged JSON record.
    pub fn from_json(json: &str) -> Result<Coloring> {
        from_record("coloring", json)
    }
}

impl Colorize for Coloring {
    fn color(&self, z: Complex) -> Color {
        match *self {
            Coloring::Simple(ref c) => c.color(z),
            Coloring::Bailout(ref c) => c.color(z),
            Coloring::SmoothBailout(ref c) => c.color(z),
            Coloring::Binary(ref c) => c.color(z),
            Coloring::Angle(ref c) => c.color(z),
        }
    }

    fn algorithm(&self) -> &Algorithm {
        match *self {
            Coloring::Simple(ref c) => &c.algorithm,
            Coloring::Bailout(ref c) => &c.algorithm,
            Coloring::SmoothBailout(ref c) => &c.algorithm,
            Coloring::Binary(ref c) => &c.algorithm,
            Coloring::Angle(ref c) => &c.algorithm,
        }
    }
}
