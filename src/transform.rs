// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Two-dimensional affine transforms.
//!
//! A transform `[a, b, c, d, e, f]` maps `(x, y)` to
//! `(a·x + c·y + e, b·x + d·y + f)`.  The builder methods compose on
//! the right, so in `t.translate(..).scale(..)` the scale is applied to
//! a point first and `t` last.

use error::{FractalError, Result};

/// A 2×3 affine matrix.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    m: [f64; 6],
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

impl Transform {
    /// The transform that changes nothing.
    pub fn identity() -> Self {
        Transform {
            m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// A transform from its six coefficients `[a, b, c, d, e, f]`.
    pub fn from_matrix(m: [f64; 6]) -> Self {
        Transform { m }
    }

    /// The six coefficients.
    pub fn matrix(&self) -> [f64; 6] {
        self.m
    }

    /// `ad - bc`
    pub fn determinant(&self) -> f64 {
        self.m[0] * self.m[3] - self.m[1] * self.m[2]
    }

    /// `self · other`: `other` is applied first.
    pub fn multiply(self, other: &Transform) -> Self {
        let (m, o) = (self.m, other.m);
        Transform {
            m: [
                m[0] * o[0] + m[2] * o[1],
                m[1] * o[0] + m[3] * o[1],
                m[0] * o[2] + m[2] * o[3],
                m[1] * o[2] + m[3] * o[3],
                m[0] * o[4] + m[2] * o[5] + m[4],
                m[1] * o[4] + m[3] * o[5] + m[5],
            ],
        }
    }

    /// Composes a translation by `(x, y)`.
    pub fn translate(self, x: f64, y: f64) -> Self {
        let mut m = self.m;
        m[4] += m[0] * x + m[2] * y;
        m[5] += m[1] * x + m[3] * y;
        Transform { m }
    }

    /// Composes a scaling by `(sx, sy)`.
    pub fn scale(self, sx: f64, sy: f64) -> Self {
        let mut m = self.m;
        m[0] *= sx;
        m[1] *= sx;
        m[2] *= sy;
        m[3] *= sy;
        Transform { m }
    }

    /// Composes a rotation by `rad` radians.
    pub fn rotate(self, rad: f64) -> Self {
        let (s, c) = rad.sin_cos();
        let m = self.m;
        Transform {
            m: [
                m[0] * c + m[2] * s,
                m[1] * c + m[3] * s,
                m[0] * -s + m[2] * c,
                m[1] * -s + m[3] * c,
                m[4],
                m[5],
            ],
        }
    }

    /// The algebraic inverse.  Fails when the determinant is zero or
    /// not finite.
    pub fn inverse(&self) -> Result<Transform> {
        let determinant = self.determinant();
        let d = 1.0 / determinant;
        if determinant == 0.0 || !d.is_finite() {
            return Err(FractalError::DegenerateTransform { determinant });
        }
        let m = self.m;
        Ok(Transform {
            m: [
                m[3] * d,
                -m[1] * d,
                -m[2] * d,
                m[0] * d,
                d * (m[2] * m[5] - m[3] * m[4]),
                d * (m[1] * m[4] - m[0] * m[5]),
            ],
        })
    }

    /// Maps a point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.m[0] + y * self.m[2] + self.m[4],
            x * self.m[1] + y * self.m[3] + self.m[5],
        )
    }
}
