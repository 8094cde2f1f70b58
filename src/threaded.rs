// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Scanline rendering on a pool of worker threads.
//!
//! Each worker gets the coloring as its serialized JSON record and
//! rebuilds its own copy once, so the workers share nothing with the
//! caller or with each other.  Rows are dispatched in order, one per
//! idle worker; a finished row is flushed on the calling thread at its
//! own offset and the worker that produced it is handed the next row.
//! Rows therefore land in whatever order the workers finish them.

use std::panic;

use crossbeam;
use crossbeam::channel::{self, Receiver, Sender};

use buffer::PixelBuffer;
use coloring::{Colorize, Coloring};
use error::{FractalError, Result};
use palette::Color;
use planes::{pixel_to_point, Viewport};
use transform::Transform;

/// What a worker is asked to do.
struct RowJob {
    row: usize,
    width: usize,
    inverse: Transform,
}

/// What a worker sends back.
struct RowDone {
    worker: usize,
    row: usize,
    colors: Result<Vec<Color>>,
}

fn color_row(coloring: &Coloring, job: &RowJob) -> Vec<Color> {
    (0..job.width)
        .map(|x| coloring.color(pixel_to_point(&job.inverse, x, job.row)))
        .collect()
}

fn work(id: usize, snapshot: &str, jobs: &Receiver<RowJob>, done: &Sender<RowDone>) {
    let coloring = match Coloring::from_json(snapshot) {
        Ok(coloring) => coloring,
        Err(err) => {
            let _ = done.send(RowDone {
                worker: id,
                row: 0,
                colors: Err(err),
            });
            return;
        }
    };
    for job in jobs.iter() {
        let colors = panic::catch_unwind(|| color_row(&coloring, &job)).map_err(|_| {
            FractalError::Worker(format!("worker {} panicked on row {}", id, job.row))
        });
        if done
            .send(RowDone {
                worker: id,
                row: job.row,
                colors,
            })
            .is_err()
        {
            break;
        }
    }
}

// A worker only drops its queue after reporting why, so the reason is
// already waiting on the result channel.
fn hung_up(results: &Receiver<RowDone>, id: usize) -> FractalError {
    results
        .try_iter()
        .filter_map(|done| done.colors.err())
        .next()
        .unwrap_or_else(|| FractalError::Worker(format!("worker {} hung up", id)))
}

/// Renders the canvas with `workers` threads, capped at one per row.
pub fn refresh<B: PixelBuffer>(
    viewport: &Viewport,
    coloring: &Coloring,
    buffer: &mut B,
    workers: usize,
) -> Result<()> {
    if workers == 0 {
        return Err(FractalError::Config(
            "the worker pool needs at least one worker".to_string(),
        ));
    }
    let snapshot = coloring.to_json()?;
    dispatch(viewport, &snapshot, buffer, workers.min(viewport.height()))
}

// Runs the pool on a serialized coloring.  The first error any worker
// reports aborts the refresh; dropping the job queues on the way out
// lets the remaining workers finish.
fn dispatch<B: PixelBuffer>(
    viewport: &Viewport,
    snapshot: &str,
    buffer: &mut B,
    workers: usize,
) -> Result<()> {
    let (width, height) = (viewport.width(), viewport.height());
    let inverse = *viewport.inverse();
    debug!("dispatching {} rows to {} workers", height, workers);
    buffer.allocate(width, 1);

    let outcome = crossbeam::scope(|scope| -> Result<()> {
        let (done_tx, done_rx) = channel::unbounded();
        let mut queues: Vec<Sender<RowJob>> = Vec::with_capacity(workers);
        for id in 0..workers {
            let (job_tx, job_rx) = channel::bounded(1);
            let done_tx = done_tx.clone();
            scope.spawn(move |_| work(id, snapshot, &job_rx, &done_tx));
            queues.push(job_tx);
        }
        drop(done_tx);

        let job = |row| RowJob {
            row,
            width,
            inverse,
        };
        let mut next_row = 0;
        for (id, queue) in queues.iter().enumerate() {
            queue
                .send(job(next_row))
                .map_err(|_| hung_up(&done_rx, id))?;
            next_row += 1;
        }

        for _ in 0..height {
            let RowDone {
                worker,
                row,
                colors,
            } = done_rx
                .recv()
                .map_err(|_| FractalError::Worker("every worker hung up".to_string()))?;
            for (x, color) in colors?.into_iter().enumerate() {
                buffer.set_pixel(x, 0, color);
            }
            buffer.flush(row);
            trace!("row {} flushed from worker {}", row, worker);

            if next_row < height {
                queues[worker]
                    .send(job(next_row))
                    .map_err(|_| hung_up(&done_rx, worker))?;
                next_row += 1;
            }
        }
        Ok(())
    });
    outcome.map_err(|_| FractalError::Worker("a render worker panicked".to_string()))?
}
