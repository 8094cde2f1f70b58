// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Where rendered pixels go.
//!
//! A renderer first allocates a staging region as wide as the canvas
//! and some rows tall, fills it with `set_pixel`, then flushes it onto
//! the visible surface at a row offset.  The full-frame and progressive
//! renderers use one canvas-sized region; the threaded renderer uses a
//! single row and flushes it wherever the row belongs.

use std::path::Path;

use image::{Rgba, RgbaImage};

use error::Result;
use palette::Color;

/// The display surface the renderers draw on.
pub trait PixelBuffer {
    /// Prepares a `width`×`height` staging region.
    fn allocate(&mut self, width: usize, height: usize);

    /// Writes one pixel of the staging region.
    fn set_pixel(&mut self, x: usize, y: usize, color: Color);

    /// Copies the staging region to the surface, its first row landing
    /// on row `row_offset`.
    fn flush(&mut self, row_offset: usize);
}

/// An in-memory surface backed by an RGBA image.
pub struct Canvas {
    surface: RgbaImage,
    region: Vec<Color>,
    region_width: usize,
    region_height: usize,
    flushes: Vec<usize>,
}

impl Canvas {
    /// A transparent `width`×`height` canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            surface: RgbaImage::new(width as u32, height as u32),
            region: vec![],
            region_width: 0,
            region_height: 0,
            flushes: vec![],
        }
    }

    /// Surface width.
    pub fn width(&self) -> usize {
        self.surface.width() as usize
    }

    /// Surface height.
    pub fn height(&self) -> usize {
        self.surface.height() as usize
    }

    /// A pixel of the visible surface.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let Rgba(data) = *self.surface.get_pixel(x as u32, y as u32);
        Color {
            r: data[0],
            g: data[1],
            b: data[2],
            a: data[3],
        }
    }

    /// The row offsets flushed since the last `allocate`, in order.
    pub fn flushes(&self) -> &[usize] {
        &self.flushes
    }

    /// The visible surface.
    pub fn image(&self) -> &RgbaImage {
        &self.surface
    }

    /// Writes the surface to disk; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.surface.save(path)?;
        Ok(())
    }
}

impl PixelBuffer for Canvas {
    fn allocate(&mut self, width: usize, height: usize) {
        self.flushes.clear();
        self.region = vec![Color::default(); width * height];
        self.region_width = width;
        self.region_height = height;
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.region[y * self.region_width + x] = color;
    }

    fn flush(&mut self, row_offset: usize) {
        let width = self.region_width.min(self.width());
        let rows = self
            .region_height
            .min(self.height().saturating_sub(row_offset));
        for y in 0..rows {
            for x in 0..width {
                let c = self.region[y * self.region_width + x];
                let pixel = Rgba([c.r, c.g, c.b, c.a]);
                self.surface.put_pixel(x as u32, (y + row_offset) as u32, pixel);
            }
        }
        self.flushes.push(row_offset);
    }
}
