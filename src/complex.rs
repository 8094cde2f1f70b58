// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Complex arithmetic used by the equations.
//!
//! The number itself is `num::Complex<f64>`; it is `Copy`, so every
//! operation here takes its operands by value and hands back a new
//! number rather than mutating in place.  Chained expressions such as
//! `z.times(z).plus(c)` read the same way they do on paper.
//!
//! Nothing is special-cased: NaN and the infinities flow through
//! IEEE-754 arithmetic untouched, and the algorithms read them as an
//! orbit that has already escaped.

use num::Complex as NumComplex;

/// The complex number every part of the renderer works with.
pub type Complex = NumComplex<f64>;

/// `0 + 0i`
pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

/// `1 + 0i`
pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };

/// The arithmetic primitives the equations are written in.
pub trait ComplexOps: Copy {
    /// `self + z`
    fn plus(self, z: Self) -> Self;
    /// `self - z`
    fn minus(self, z: Self) -> Self;
    /// `self * z`
    fn times(self, z: Self) -> Self;
    /// `self / z`.  The divisor must not be zero; if it is, the
    /// result is whatever IEEE-754 makes of `x / 0.0`.
    fn div(self, z: Self) -> Self;
    /// The complex conjugate.
    fn conjugate(self) -> Self;
    /// Absolute value of each component taken separately.
    fn elementwise_abs(self) -> Self;
    /// `re² + im²`
    fn squared_modulus(self) -> f64;
    /// `sqrt(re² + im²)`
    fn modulus(self) -> f64;
    /// A fresh copy of this number.
    fn copy(&self) -> Self;
    /// `-self`
    fn symmetric(self) -> Self;
}

impl ComplexOps for Complex {
    #[inline]
    fn plus(self, z: Complex) -> Complex {
        self + z
    }

    #[inline]
    fn minus(self, z: Complex) -> Complex {
        self - z
    }

    #[inline]
    fn times(self, z: Complex) -> Complex {
        Complex::new(
            self.re * z.re - self.im * z.im,
            self.re * z.im + self.im * z.re,
        )
    }

    #[inline]
    fn div(self, z: Complex) -> Complex {
        let div = z.squared_modulus();
        Complex::new(
            (self.re * z.re + self.im * z.im) / div,
            (self.im * z.re - self.re * z.im) / div,
        )
    }

    #[inline]
    fn conjugate(self) -> Complex {
        Complex::new(self.re, -self.im)
    }

    #[inline]
    fn elementwise_abs(self) -> Complex {
        Complex::new(self.re.abs(), self.im.abs())
    }

    #[inline]
    fn squared_modulus(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn modulus(self) -> f64 {
        self.squared_modulus().sqrt()
    }

    #[inline]
    fn copy(&self) -> Complex {
        *self
    }

    #[inline]
    fn symmetric(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Complex, b: Complex) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn adding_zero_and_multiplying_by_one_change_nothing() {
        for z in &[
            Complex::new(0.0, 0.0),
            Complex::new(1.5, -2.25),
            Complex::new(-3.0, 7.0),
            Complex::new(1e-300, -1e300),
        ] {
            assert_eq!(z.copy().plus(ZERO), *z);
            assert_eq!(z.times(ONE), *z);
        }
    }

    #[test]
    fn dividing_by_itself_gives_one() {
        let z = Complex::new(0.3, -4.2);
        assert!(close(z.div(z), ONE));
    }

    #[test]
    fn times_matches_the_textbook_product() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(a.times(b), Complex::new(5.0, 5.0));
        assert_eq!(a.times(b), a * b);
    }

    #[test]
    fn conjugate_abs_and_symmetric() {
        let z = Complex::new(-2.0, -3.0);
        assert_eq!(z.conjugate(), Complex::new(-2.0, 3.0));
        assert_eq!(z.elementwise_abs(), Complex::new(2.0, 3.0));
        assert_eq!(z.symmetric(), Complex::new(2.0, 3.0));
        assert_eq!(z.symmetric().symmetric(), z);
    }

    #[test]
    fn modulus_of_a_pythagorean_triple() {
        let z = Complex::new(3.0, -4.0);
        assert_eq!(z.squared_modulus(), 25.0);
        assert_eq!(z.modulus(), 5.0);
    }

    #[test]
    fn division_by_zero_is_not_finite() {
        let q = ONE.div(ZERO);
        assert!(q.re.is_nan());
        assert!(q.im.is_nan());
    }
}
