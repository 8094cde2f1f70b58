// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by the whole crate.  Per-pixel arithmetic
//! never fails; everything here is either a precondition the caller
//! broke (a flat transform, an unknown serialized variant) or a
//! failure of the machinery around the renderer.

use std::io;

use failure::Fail;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json;

/// Everything that can go wrong while configuring or rendering a
/// fractal.
#[derive(Debug, Fail)]
pub enum FractalError {
    /// The affine transform collapses the plane and has no inverse.
    #[fail(display = "transform is not invertible (determinant {})", determinant)]
    DegenerateTransform {
        /// The offending determinant, zero or non-finite.
        determinant: f64,
    },

    /// The requested window or canvas cannot be mapped.
    #[fail(display = "invalid complex plane: {}", _0)]
    InvalidPlane(String),

    /// A serialized strategy could not be rebuilt, usually because of
    /// an unknown `_type` tag.
    #[fail(display = "cannot reconstruct {}: {}", kind, message)]
    Reconstruction {
        /// The family being rebuilt ("coloring", "algorithm", ...).
        kind: &'static str,
        /// What the decoder objected to.
        message: String,
    },

    /// A color literal that is not `#rrggbb` or `#rrggbbaa`.
    #[fail(display = "invalid color {:?}", _0)]
    InvalidColor(String),

    /// A palette without any stops, or with unordered stops.
    #[fail(display = "invalid palette: {}", _0)]
    InvalidPalette(String),

    /// A render option outside of its accepted range.
    #[fail(display = "invalid configuration: {}", _0)]
    Config(String),

    /// A render worker died or hung up before finishing its rows.
    #[fail(display = "render worker failed: {}", _0)]
    Worker(String),

    /// Writing an image or a configuration file failed.
    #[fail(display = "i/o error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for FractalError {
    fn from(err: io::Error) -> Self {
        FractalError::Io(err)
    }
}

/// Shorthand used by every fallible function of the crate.
pub type Result<T> = ::std::result::Result<T, FractalError>;

/// Writes the tagged JSON record of one strategy family.
pub(crate) fn to_record<T: Serialize>(kind: &'static str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| FractalError::Reconstruction {
        kind,
        message: e.to_string(),
    })
}

/// Rebuilds one strategy family from its tagged JSON record.
pub(crate) fn from_record<T: DeserializeOwned>(kind: &'static str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| FractalError::Reconstruction {
        kind,
        message: e.to_string(),
    })
}
