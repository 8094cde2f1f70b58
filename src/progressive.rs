// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Progressive, Adam7-style rendering.
//!
//! The first pass samples one pixel in every 8×8 block and paints the
//! whole block with it.  Each following pass halves the block size,
//! alternately along x and then y, so seven passes take the blocks
//! from 8×8 down to 1×1.  A pixel is computed once and remembered in
//! the cache; later passes only compute the samples they add.
//!
//! The canvas is flushed after each pass.  A host that wants to stay
//! responsive drives the passes itself through [`ProgressiveRender`],
//! one per frame callback, handling input in between.

use buffer::PixelBuffer;
use coloring::{Colorize, Coloring};
use error::Result;
use palette::Color;
use planes::Viewport;

/// Number of interlacing passes.
pub const PASSES: u32 = 7;

#[derive(Copy, Clone, Default)]
struct CacheEntry {
    computed: bool,
    color: Color,
}

/// Colors known so far, one entry per pixel.
struct PixelCache {
    width: usize,
    entries: Vec<CacheEntry>,
}

impl PixelCache {
    fn new(width: usize, height: usize) -> Self {
        PixelCache {
            width,
            entries: vec![CacheEntry::default(); width * height],
        }
    }

    fn entry(&mut self, x: usize, y: usize) -> &mut CacheEntry {
        &mut self.entries[y * self.width + x]
    }
}

/// A progressive refresh in flight.  Owns the pixel cache for the
/// duration of the refresh.
pub struct ProgressiveRender<'a> {
    viewport: &'a Viewport,
    coloring: &'a Coloring,
    cache: PixelCache,
    block: (usize, usize),
    pass: u32,
}

impl<'a> ProgressiveRender<'a> {
    /// Starts a refresh: resets the cache and allocates a canvas-sized
    /// staging region.
    pub fn start<B: PixelBuffer>(
        viewport: &'a Viewport,
        coloring: &'a Coloring,
        buffer: &mut B,
    ) -> Self {
        buffer.allocate(viewport.width(), viewport.height());
        ProgressiveRender {
            viewport,
            coloring,
            cache: PixelCache::new(viewport.width(), viewport.height()),
            block: (8, 8),
            pass: PASSES,
        }
    }

    /// Passes still to run.
    pub fn remaining_passes(&self) -> u32 {
        self.pass
    }

    /// Whether the picture is complete.
    pub fn is_finished(&self) -> bool {
        self.pass == 0
    }

    /// Runs one pass and flushes it.  Returns whether passes remain;
    /// once finished it does nothing.
    pub fn next_pass<B: PixelBuffer>(&mut self, buffer: &mut B) -> bool {
        if self.is_finished() {
            return false;
        }
        debug!(
            "progressive pass {} with {}x{} blocks",
            PASSES + 1 - self.pass,
            self.block.0,
            self.block.1
        );
        for y in 0..self.viewport.height() {
            for x in 0..self.viewport.width() {
                let color = self.sample(x, y);
                buffer.set_pixel(x, y, color);
            }
        }
        buffer.flush(0);

        let ran = self.pass;
        self.pass -= 1;
        if self.is_finished() {
            return false;
        }
        if ran % 2 != 0 {
            self.block.0 /= 2;
        } else {
            self.block.1 /= 2;
        }
        true
    }

    // Row-major order matters: a pixel off the sampling grid copies a
    // neighbour to its left or above that this pass has already set.
    fn sample(&mut self, x: usize, y: usize) -> Color {
        let (bx, by) = self.block;
        if y % by != 0 {
            return self.cache.entry(x, y - y % by).color;
        }
        if x % bx != 0 {
            let color = self.cache.entry(x - x % bx, y).color;
            self.cache.entry(x, y).color = color;
            return color;
        }
        let (viewport, coloring) = (self.viewport, self.coloring);
        let entry = self.cache.entry(x, y);
        if !entry.computed {
            entry.color = coloring.color(viewport.complex_at(x, y));
            entry.computed = true;
        }
        entry.color
    }
}

/// Runs every pass back to back.
pub fn refresh<B: PixelBuffer>(
    viewport: &Viewport,
    coloring: &Coloring,
    buffer: &mut B,
) -> Result<()> {
    let mut render = ProgressiveRender::start(viewport, coloring, buffer);
    while render.next_pass(buffer) {}
    Ok(())
}
