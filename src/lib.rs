#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time and Newton fractal renderer
//!
//! A point of the complex plane is classified by iterating an equation
//! on it.  Escape-time fractals (the Mandelbrot set and its cubic and
//! quartic cousins, the Tricorn, the Burning Ship) count how long the
//! orbit of the point takes to leave a disc; the Newton fractal runs
//! Newton's method on `z³ - 1` and records which root it reaches.
//!
//! The pieces fit together like this: an [`Equation`] is driven by an
//! [`Algorithm`], whose verdict a [`Coloring`] turns into a [`Color`]
//! using a [`Palette`].  A [`Viewport`] maps the pixels of a canvas to
//! the complex plane, and a [`RenderStrategy`] walks the pixels and
//! writes them into a [`PixelBuffer`]: all at once, progressively in
//! seven interlaced passes, or a row at a time on a pool of threads.
//!
//! ```no_run
//! # extern crate fractal2d;
//! use fractal2d::*;
//!
//! # fn main() -> Result<()> {
//! let viewport = Viewport::new(
//!     800,
//!     600,
//!     ComplexPlane { left: -2.5, right: 1.0, bottom: -1.2, top: 1.2 },
//!     true,
//! )?;
//! let algorithm = BailoutAlgorithm::new(Equation::Mandelbrot, 200, 4.0, None);
//! let palette = Palette::grayscale();
//! let coloring = Coloring::build("smooth", algorithm.into(), Color::black(), palette)?;
//! let mut canvas = Canvas::new(800, 600);
//! RenderStrategy::Threaded { workers: 4 }.refresh(&viewport, &coloring, &mut canvas)?;
//! canvas.save("mandelbrot.png")?;
//! # Ok(())
//! # }
//! ```

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;
extern crate serde;
extern crate serde_json;

pub mod algorithm;
pub mod buffer;
pub mod coloring;
pub mod complex;
pub mod equation;
pub mod error;
pub mod palette;
pub mod planes;
pub mod progressive;
pub mod render;
pub mod threaded;
pub mod transform;

pub use algorithm::{Algorithm, BailoutAlgorithm, Iterate, IterationResult, NewtonAlgorithm};
pub use buffer::{Canvas, PixelBuffer};
pub use coloring::{
    AngleColoring, BailoutColoring, BinaryColoring, Coloring, Colorize, SimpleColoring,
    SmoothBailoutColoring,
};
pub use complex::{Complex, ComplexOps};
pub use equation::Equation;
pub use error::{FractalError, Result};
pub use palette::{Color, ColorStop, Palette};
pub use planes::{ComplexPlane, Viewport};
pub use progressive::ProgressiveRender;
pub use render::RenderStrategy;
pub use transform::Transform;
