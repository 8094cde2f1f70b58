// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render strategies decide in which order pixels are computed and
//! when they are flushed.  All of them paint the same picture; they
//! differ in how soon, and how, the picture shows up.

use std::str::FromStr;

use itertools::iproduct;

use buffer::PixelBuffer;
use coloring::{Colorize, Coloring};
use error::{FractalError, Result};
use planes::Viewport;
use progressive;
use threaded;

/// The closed set of render strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderStrategy {
    /// One row-major pass, one flush at the end.
    Standard,
    /// Seven interlaced passes from 8×8 blocks down to single pixels,
    /// flushing after each.
    Progressive,
    /// Rows handed out to a pool of `workers` threads, each row flushed
    /// as soon as it comes back.
    Threaded {
        /// Size of the worker pool.
        workers: usize,
    },
}

impl RenderStrategy {
    /// Paints the whole canvas.  Runs to completion.  An algorithm
    /// with a non-finite parameter is refused by every strategy alike.
    pub fn refresh<B: PixelBuffer>(
        &self,
        viewport: &Viewport,
        coloring: &Coloring,
        buffer: &mut B,
    ) -> Result<()> {
        coloring.algorithm().validate()?;
        info!(
            "{:?} refresh of {}x{}",
            self,
            viewport.width(),
            viewport.height()
        );
        match *self {
            RenderStrategy::Standard => standard(viewport, coloring, buffer),
            RenderStrategy::Progressive => progressive::refresh(viewport, coloring, buffer)?,
            RenderStrategy::Threaded { workers } => {
                threaded::refresh(viewport, coloring, buffer, workers)?
            }
        }
        info!("{:?} refresh done", self);
        Ok(())
    }
}

impl FromStr for RenderStrategy {
    type Err = FractalError;

    /// `standard`, `progressive`, or `threaded` (one worker per CPU).
    fn from_str(s: &str) -> Result<RenderStrategy> {
        match s {
            "standard" => Ok(RenderStrategy::Standard),
            "progressive" => Ok(RenderStrategy::Progressive),
            "threaded" => Ok(RenderStrategy::Threaded {
                workers: ::num_cpus::get(),
            }),
            other => Err(FractalError::Config(format!(
                "unknown strategy {:?}",
                other
            ))),
        }
    }
}

/// Every pixel, row by row, then a single flush.
fn standard<B: PixelBuffer>(viewport: &Viewport, coloring: &Coloring, buffer: &mut B) {
    buffer.allocate(viewport.width(), viewport.height());
    for (y, x) in iproduct!(0..viewport.height(), 0..viewport.width()) {
        buffer.set_pixel(x, y, coloring.color(viewport.complex_at(x, y)));
    }
    buffer.flush(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use algorithm::BailoutAlgorithm;
    use buffer::Canvas;
    use complex::Complex;
    use equation::Equation;
    use palette::{Color, Palette};
    use planes::ComplexPlane;

    #[test]
    fn standard_paints_every_pixel_and_flushes_once() {
        let viewport = Viewport::new(
            8,
            6,
            ComplexPlane::from_corners(Complex::new(-2.0, -1.5), Complex::new(1.0, 1.5)),
            false,
        )
        .unwrap();
        let coloring = Coloring::build(
            "simple",
            BailoutAlgorithm::new(Equation::Mandelbrot, 20, 4.0, None).into(),
            Color::black(),
            Palette::grayscale(),
        )
        .unwrap();
        let mut canvas = Canvas::new(8, 6);
        RenderStrategy::Standard
            .refresh(&viewport, &coloring, &mut canvas)
            .unwrap();
        assert_eq!(canvas.flushes(), &[0]);
        for (y, x) in iproduct!(0..6, 0..8) {
            assert_eq!(canvas.pixel(x, y).a, 255);
        }
    }

    #[test]
    fn strategies_parse_from_their_names() {
        assert_eq!("standard".parse::<RenderStrategy>().unwrap(), RenderStrategy::Standard);
        assert_eq!("progressive".parse::<RenderStrategy>().unwrap(), RenderStrategy::Progressive);
        match "threaded".parse::<RenderStrategy>().unwrap() {
            RenderStrategy::Threaded { workers } => assert!(workers >= 1),
            other => panic!("unexpected {:?}", other),
        }
        assert!("gpu".parse::<RenderStrategy>().is_err());
    }

    #[test]
    fn every_strategy_refuses_an_infinite_radius() {
        let viewport = Viewport::new(
            4,
            4,
            ComplexPlane::from_corners(Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)),
            false,
        )
        .unwrap();
        let wide = BailoutAlgorithm::new(Equation::Mandelbrot, 20, ::std::f64::INFINITY, None);
        let coloring =
            Coloring::build("smooth", wide.into(), Color::black(), Palette::grayscale()).unwrap();
        for strategy in &[
            RenderStrategy::Standard,
            RenderStrategy::Progressive,
            RenderStrategy::Threaded { workers: 2 },
        ] {
            let mut canvas = Canvas::new(4, 4);
            match strategy.refresh(&viewport, &coloring, &mut canvas) {
                Err(FractalError::Config(message)) => {
                    assert!(message.contains("radius"), "{}", message)
                }
                other => panic!("unexpected {:?}", other),
            }
            assert!(canvas.flushes().is_empty());
        }
    }
}
