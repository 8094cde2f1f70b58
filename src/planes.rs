// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport, which relates the pixel grid of a canvas,
//! with its origin at the top-left corner, to a window of the complex
//! plane.  The relation is an affine transform, so besides fitting a
//! window to the canvas it can zoom about any pixel.

use complex::Complex;
use error::{FractalError, Result};
use transform::Transform;

/// A window of the complex plane.  `left`/`right` bound the real
/// part, `bottom`/`top` the imaginary part.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane {
    /// Real part at the left edge.
    pub left: f64,
    /// Real part at the right edge.
    pub right: f64,
    /// Imaginary part at the bottom edge.
    pub bottom: f64,
    /// Imaginary part at the top edge.
    pub top: f64,
}

impl ComplexPlane {
    /// The window spanned by its left-lower and right-upper corners.
    pub fn from_corners(leftlower: Complex, rightupper: Complex) -> Self {
        ComplexPlane {
            left: leftlower.re,
            right: rightupper.re,
            bottom: leftlower.im,
            top: rightupper.im,
        }
    }

    /// Width of the window.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the window.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// The window grown along one axis so that `height / width`
    /// equals `aspect`.  Never shrinks either axis.
    pub fn expanded_to(&self, aspect: f64) -> ComplexPlane {
        let window_aspect = (self.height() / self.width()).abs();
        let mut plane = *self;
        if aspect > window_aspect {
            let excess = self.height() * (aspect / window_aspect - 1.0);
            plane.top += excess / 2.0;
            plane.bottom -= excess / 2.0;
        } else if aspect < window_aspect {
            let excess = self.width() * (window_aspect / aspect - 1.0);
            plane.right += excess / 2.0;
            plane.left -= excess / 2.0;
        }
        plane
    }

    fn validate(&self) -> Result<()> {
        let bounds = [self.left, self.right, self.bottom, self.top];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(FractalError::InvalidPlane(format!("non-finite bounds {:?}", self)));
        }
        if self.width() == 0.0 || self.height() == 0.0 {
            return Err(FractalError::InvalidPlane(format!("empty window {:?}", self)));
        }
        Ok(())
    }
}

/// The canvas, the window it shows, and the transforms between them.
///
/// The forward transform maps complex coordinates to pixels; its
/// inverse, which every render uses, is recomputed whenever the
/// forward one changes.
#[derive(Clone, Debug)]
pub struct Viewport {
    width: usize,
    height: usize,
    keep_ratio: bool,
    transform: Transform,
    inverse: Transform,
}

impl Viewport {
    /// Fits `plane` to a `width`×`height` canvas.  With `keep_ratio`,
    /// the window is first grown so that pixels are square.
    pub fn new(
        width: usize,
        height: usize,
        plane: ComplexPlane,
        keep_ratio: bool,
    ) -> Result<Viewport> {
        if width == 0 || height == 0 {
            return Err(FractalError::InvalidPlane(format!(
                "canvas of {}x{} pixels",
                width, height
            )));
        }
        let transform = Viewport::fit(width, height, &plane, keep_ratio)?;
        Ok(Viewport {
            width,
            height,
            keep_ratio,
            transform,
            inverse: transform.inverse()?,
        })
    }

    fn fit(
        width: usize,
        height: usize,
        plane: &ComplexPlane,
        keep_ratio: bool,
    ) -> Result<Transform> {
        plane.validate()?;
        let plane = if keep_ratio {
            plane.expanded_to((height as f64 / width as f64).abs())
        } else {
            *plane
        };
        Ok(Transform::identity()
            .scale(
                width as f64 / plane.width(),
                height as f64 / (plane.bottom - plane.top),
            )
            .translate(-plane.left, -plane.top))
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether windows are grown to keep pixels square.
    pub fn keep_ratio(&self) -> bool {
        self.keep_ratio
    }

    /// Complex plane to pixels.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Pixels to complex plane.
    pub fn inverse(&self) -> &Transform {
        &self.inverse
    }

    /// Shows a new window.
    pub fn set_plane(&mut self, plane: ComplexPlane, keep_ratio: bool) -> Result<()> {
        let transform = Viewport::fit(self.width, self.height, &plane, keep_ratio)?;
        self.install(transform)?;
        self.keep_ratio = keep_ratio;
        Ok(())
    }

    fn install(&mut self, transform: Transform) -> Result<()> {
        self.inverse = transform.inverse()?;
        self.transform = transform;
        debug!("viewport now shows {:?}", self.visible_plane());
        Ok(())
    }

    /// The complex number under a pixel.
    #[inline]
    pub fn complex_at(&self, px: usize, py: usize) -> Complex {
        pixel_to_point(&self.inverse, px, py)
    }

    /// The window currently shown, read back through the inverse
    /// transform.  Only meaningful while the transform has no rotation.
    pub fn visible_plane(&self) -> ComplexPlane {
        let (left, top) = self.inverse.apply(0.0, 0.0);
        let (right, bottom) = self.inverse.apply(self.width as f64, self.height as f64);
        ComplexPlane {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Zooms by `factor` about pixel `(px, py)`: the point under the
    /// cursor moves to the center of the canvas, and distances grow by
    /// `factor`.  A factor below one zooms out.
    pub fn zoom(&mut self, px: usize, py: usize, factor: f64) -> Result<()> {
        let cursor = self.complex_at(px, py);
        let center = self.complex_at(self.width / 2, self.height / 2);
        let transform = self
            .transform
            .translate(center.re, center.im)
            .scale(factor, factor)
            .translate(-cursor.re, -cursor.im);
        self.install(transform)
    }

    /// Moves the point under pixel `(px, py)` to the center.
    pub fn recenter(&mut self, px: usize, py: usize) -> Result<()> {
        self.zoom(px, py, 1.0)
    }
}

/// Maps a pixel through an inverse transform.  The renderers and the
/// workers go through this one function so their results agree to the
/// last bit.
#[inline]
pub fn pixel_to_point(inverse: &Transform, px: usize, py: usize) -> Complex {
    let (re, im) = inverse.apply(px as f64, py as f64);
    Complex::new(re, im)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> ComplexPlane {
        ComplexPlane {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
        }
    }

    #[test]
    fn viewport_fails_on_bad_shape() {
        assert!(Viewport::new(0, 10, square(), false).is_err());
        let flat = ComplexPlane { top: -1.0, ..square() };
        assert!(Viewport::new(10, 10, flat, false).is_err());
        let nan = ComplexPlane {
            left: ::std::f64::NAN,
            ..square()
        };
        assert!(Viewport::new(10, 10, nan, false).is_err());
    }

    #[test]
    fn corners_map_to_the_window() {
        let window = ComplexPlane::from_corners(Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0));
        let vp = Viewport::new(4, 4, window, false).unwrap();
        assert_eq!(vp.complex_at(0, 0), Complex::new(-2.0, 2.0));
        assert_eq!(vp.complex_at(2, 2), Complex::new(0.0, 0.0));
        assert_eq!(vp.complex_at(4, 4), Complex::new(2.0, -2.0));
        assert_eq!(vp.transform().apply(0.0, 0.0), (2.0, 2.0));
    }

    #[test]
    fn mandelbrot_window_on_a_hundred_pixels() {
        let plane = ComplexPlane {
            left: -2.5,
            right: 0.5,
            bottom: -1.5,
            top: 1.5,
        };
        let vp = Viewport::new(100, 100, plane, false).unwrap();
        let center = vp.complex_at(50, 50);
        assert!((center.re + 1.0).abs() < 1e-12 && center.im.abs() < 1e-12);
        let corner = vp.complex_at(0, 0);
        assert!((corner.re + 2.5).abs() < 1e-12 && (corner.im - 1.5).abs() < 1e-12);
    }

    #[test]
    fn keep_ratio_expands_the_short_axis() {
        let vp = Viewport::new(200, 100, square(), true).unwrap();
        let shown = vp.visible_plane();
        assert!((shown.height() / shown.width() - 100.0 / 200.0).abs() < 1e-12);
        assert!((shown.left + 2.0).abs() < 1e-12 && (shown.right - 2.0).abs() < 1e-12);
        assert!((shown.top - 1.0).abs() < 1e-12 && (shown.bottom + 1.0).abs() < 1e-12);

        let tall = Viewport::new(100, 200, square(), true).unwrap().visible_plane();
        assert!((tall.top - 2.0).abs() < 1e-12 && (tall.left + 1.0).abs() < 1e-12);
    }

    #[test]
    fn expansion_formula_is_exact() {
        let grown = square().expanded_to(0.5);
        assert_eq!(grown.height() / grown.width(), 0.5);
        assert_eq!(grown.height(), 2.0);
    }

    #[test]
    fn zoom_brings_the_cursor_to_the_center() {
        let mut vp = Viewport::new(100, 100, square(), false).unwrap();
        let cursor = vp.complex_at(75, 25);
        vp.zoom(75, 25, 2.0).unwrap();
        let center = vp.complex_at(50, 50);
        assert!((center - cursor).norm() < 1e-12);

        let shown = vp.visible_plane();
        assert!((shown.width() - 1.0).abs() < 1e-12);
        assert!((shown.height() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn recenter_keeps_the_scale() {
        let mut vp = Viewport::new(80, 60, square(), true).unwrap();
        let before = vp.visible_plane();
        let target = vp.complex_at(10, 10);
        vp.recenter(10, 10).unwrap();
        let after = vp.visible_plane();
        assert!((after.width() - before.width()).abs() < 1e-12);
        assert!((vp.complex_at(40, 30) - target).norm() < 1e-12);
    }

    #[test]
    fn zoom_by_zero_is_rejected_and_leaves_the_viewport_alone() {
        let mut vp = Viewport::new(10, 10, square(), false).unwrap();
        let before = *vp.inverse();
        assert!(vp.zoom(5, 5, 0.0).is_err());
        assert_eq!(*vp.inverse(), before);
    }

    #[test]
    fn set_plane_replaces_the_window() {
        let mut vp = Viewport::new(10, 10, square(), false).unwrap();
        let plane = ComplexPlane {
            left: 0.0,
            right: 10.0,
            bottom: 0.0,
            top: 10.0,
        };
        vp.set_plane(plane, false).unwrap();
        assert_eq!(vp.complex_at(3, 7), Complex::new(3.0, 3.0));
        assert!(vp.set_plane(ComplexPlane { right: 0.0, ..plane }, true).is_err());
    }
}
