// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The complex maps iterated by the algorithms.
//!
//! An equation is stateless.  `evaluate` is the map itself; `step` is
//! what one iteration of an escape-time algorithm applies, which for
//! every variant but Newton is the same thing.

use serde::{Deserialize, Serialize};

use complex::{Complex, ComplexOps, ONE, ZERO};
use error::{from_record, to_record, Result};

/// Step used for the finite-difference derivative, on both axes.
pub const DERIVATIVE_STEP: f64 = 1e-6;

/// One member of the closed family of supported maps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum Equation {
    /// `z² + c`
    #[serde(rename = "MandelbrotEquation")]
    Mandelbrot,
    /// `z³ + c`
    #[serde(rename = "MandelCubicEquation")]
    MandelbrotCubic,
    /// `z⁴ + c`
    #[serde(rename = "MandelQuarticEquation")]
    MandelbrotQuartic,
    /// `conj(z)² + c`
    #[serde(rename = "TricornEquation")]
    Tricorn,
    /// `(|re z| + |im z| i)² - c`
    #[serde(rename = "BurningShipEquation")]
    BurningShip,
    /// `z³ - 1`, solved by Newton's method.  Ignores `c`.
    #[serde(rename = "NewtonEquation")]
    Newton,
}

impl Equation {
    /// Every variant, in the order they are offered to users.
    pub const ALL: [Equation; 6] = [
        Equation::Mandelbrot,
        Equation::MandelbrotCubic,
        Equation::MandelbrotQuartic,
        Equation::Tricorn,
        Equation::BurningShip,
        Equation::Newton,
    ];

    /// The short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Equation::Mandelbrot => "mandelbrot",
            Equation::MandelbrotCubic => "cubic",
            Equation::MandelbrotQuartic => "quartic",
            Equation::Tricorn => "tricorn",
            Equation::BurningShip => "burning-ship",
            Equation::Newton => "newton",
        }
    }

    /// Looks an equation up by its command-line name.
    pub fn from_name(name: &str) -> Option<Equation> {
        Equation::ALL.iter().cloned().find(|e| e.name() == name)
    }

    /// The raw map `f(z, c)`.
    pub fn evaluate(self, z: Complex, c: Complex) -> Complex {
        match self {
            Equation::Mandelbrot => z.times(z).plus(c),
            Equation::MandelbrotCubic => z.times(z).times(z).plus(c),
            Equation::MandelbrotQuartic => {
                let square = z.times(z);
                square.times(square).plus(c)
            }
            Equation::Tricorn => {
                let conj = z.conjugate();
                conj.times(conj).plus(c)
            }
            Equation::BurningShip => {
                let folded = z.elementwise_abs();
                folded.times(folded).minus(c)
            }
            Equation::Newton => z.times(z).times(z).minus(ONE),
        }
    }

    /// One iteration step `z ← f(z, c)`.  For `Newton` this is a
    /// Newton-Raphson step on `z³ - 1` and `c` is ignored.
    pub fn step(self, z: Complex, c: Complex) -> Complex {
        match self {
            Equation::Newton => self.newton_step(z),
            _ => self.evaluate(z, c),
        }
    }

    /// `f'(z)` estimated as `[f(z + dz) - f(z)] / dz`, with
    /// `dz = 1e-6 + 1e-6i` and `c = 0`.
    pub fn derivative(self, z: Complex) -> Complex {
        let dz = Complex::new(DERIVATIVE_STEP, DERIVATIVE_STEP);
        self.evaluate(z.plus(dz), ZERO)
            .minus(self.evaluate(z, ZERO))
            .div(dz)
    }

    /// `z - f(z) / f'(z)` for this equation taken with `c = 0`.
    pub fn newton_step(self, z: Complex) -> Complex {
        z.minus(self.evaluate(z, ZERO).div(self.derivative(z)))
    }

    /// The tagged JSON record, `{"_type": "MandelbrotEquation"}`.
    pub fn to_json(self) -> Result<String> {
        to_record("equation", &self)
    }

    /// Rebuilds an equation from its tagged record.
    pub fn from_json(json: &str) -> Result<Equation> {
        from_record("equation", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_time_maps() {
        let z = Complex::new(1.0, 1.0);
        let c = Complex::new(0.5, -0.5);
        // (1+i)² = 2i
        assert_eq!(Equation::Mandelbrot.step(z, c), Complex::new(0.5, 1.5));
        // (1+i)³ = -2+2i
        assert_eq!(Equation::MandelbrotCubic.step(z, c), Complex::new(-1.5, 1.5));
        // (1+i)⁴ = -4
        assert_eq!(Equation::MandelbrotQuartic.step(z, c), Complex::new(-3.5, -0.5));
        // (1-i)² = -2i
        assert_eq!(Equation::Tricorn.step(z, c), Complex::new(0.5, -2.5));
    }

    #[test]
    fn burning_ship_folds_before_squaring_and_subtracts_c() {
        let z = Complex::new(-1.0, -2.0);
        let c = Complex::new(1.0, 1.0);
        // (1+2i)² = -3+4i
        assert_eq!(Equation::BurningShip.step(z, c), Complex::new(-4.0, 3.0));
    }

    #[test]
    fn evaluation_is_repeatable() {
        let z = Complex::new(0.123, -0.456);
        let c = Complex::new(-0.7, 0.27);
        for equation in &Equation::ALL {
            let first = equation.step(z, c);
            let second = equation.step(z, c);
            assert!(first == second || (first.re.is_nan() && second.re.is_nan()));
        }
    }

    #[test]
    fn newton_ignores_the_constant() {
        let z = Complex::new(0.8, 0.3);
        assert_eq!(
            Equation::Newton.step(z, ZERO),
            Equation::Newton.step(z, Complex::new(5.0, -5.0))
        );
    }

    #[test]
    fn newton_step_moves_towards_a_cube_root_of_unity() {
        let mut z = Complex::new(1.3, 0.2);
        for _ in 0..20 {
            z = Equation::Newton.step(z, ZERO);
        }
        assert!((z - ONE).norm() < 1e-6);
    }

    #[test]
    fn derivative_of_the_cube_is_close_to_three_z_squared() {
        let z = Complex::new(0.5, 0.5);
        let exact = z * z * 3.0;
        assert!((Equation::Newton.derivative(z) - exact).norm() < 1e-4);
    }

    #[test]
    fn names_round_trip() {
        for equation in &Equation::ALL {
            assert_eq!(Equation::from_name(equation.name()), Some(*equation));
        }
        assert_eq!(Equation::from_name("julia"), None);
    }

    #[test]
    fn records_are_tagged_with_the_type_name() {
        assert_eq!(
            Equation::MandelbrotCubic.to_json().unwrap(),
            r#"{"_type":"MandelCubicEquation"}"#
        );
        for equation in &Equation::ALL {
            assert_eq!(Equation::from_json(&equation.to_json().unwrap()).unwrap(), *equation);
        }
        match Equation::from_json(r#"{"_type":"JuliaEquation"}"#) {
            Err(::error::FractalError::Reconstruction { kind, message }) => {
                assert_eq!(kind, "equation");
                assert!(message.contains("JuliaEquation"), "{}", message);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
