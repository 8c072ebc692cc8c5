//! The tile renderer.  A tile is cut into rows, every row is handed to
//! its own thread, and each thread sends back the escape counts for
//! its row tagged with the row number.  The calling thread collects
//! the rows in whatever order they finish and paints them through the
//! gradient.

use crossbeam::channel;
use crate::escape::point_iterations;
use crate::gradient::Gradient;
use crate::planes::Tile;
use image::RgbaImage;
use num::Complex;
use std::panic;
use std::sync::{Arc, Mutex};

/// How row computations are distributed across threads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Schedule {
    /// One thread per row, all started at once.
    PerRow,
    /// A fixed number of worker threads pulling rows off a shared
    /// queue.  A count of zero is treated as one.
    Pool(usize),
}

impl Default for Schedule {
    fn default() -> Schedule {
        Schedule::PerRow
    }
}

/// The escape counts for one row of a tile.
#[derive(Clone, Debug, PartialEq)]
pub struct RowResult {
    /// The computation row, counted from the bottom of the image.
    pub row: usize,
    /// One escape count per column, left to right.
    pub counts: Vec<usize>,
}

/// Renders Mandelbrot tiles at a fixed iteration depth.  Once built
/// the renderer is immutable and may be shared freely; every call to
/// `render` owns its own channel and image.
#[derive(Clone, Debug)]
pub struct Renderer {
    max_iterations: usize,
    gradient: Gradient,
    schedule: Schedule,
}

impl Renderer {
    /// Build a renderer, and its colour table, for the given depth.
    pub fn new(max_iterations: usize) -> Renderer {
        Renderer {
            max_iterations,
            gradient: Gradient::new(max_iterations),
            schedule: Schedule::default(),
        }
    }

    /// Replace the thread schedule.  The output does not depend on it.
    pub fn with_schedule(mut self, schedule: Schedule) -> Renderer {
        self.schedule = schedule;
        self
    }

    /// The iteration depth, fixed at construction.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// The colour table used to paint escape counts.
    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    /// How rows are spread across threads.
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Compute the escape counts for a single row of a tile.
    pub fn row_counts(&self, tile: &Tile, row: usize) -> RowResult {
        let counts = (0..tile.resolution)
            .map(|column| point_iterations(tile.pixel_to_point(row, column), self.max_iterations))
            .collect();
        RowResult { row, counts }
    }

    /// Render a `resolution` x `resolution` tile whose lower left
    /// corner sits at `center` and whose edges are `size` long.
    pub fn render(&self, center: Complex<f64>, size: f64, resolution: usize) -> RgbaImage {
        self.render_tile(&Tile::new(center, size, resolution))
    }

    /// As `render`, for an already-built tile.  Blocks until every row
    /// has been received.  If a row thread panics, the panic is
    /// resumed on the calling thread.
    pub fn render_tile(&self, tile: &Tile) -> RgbaImage {
        let side = tile.resolution as u32;
        let mut image = RgbaImage::new(side, side);
        debug!(
            "rendering {}x{} tile at {} (size {}, depth {}, {:?})",
            side, side, tile.center, tile.size, self.max_iterations, self.schedule
        );

        let outcome = crossbeam::scope(|spawner| {
            let (sender, receiver) = channel::unbounded::<RowResult>();
            match self.schedule {
                Schedule::PerRow => {
                    for row in 0..tile.resolution {
                        let sender = sender.clone();
                        spawner.spawn(move |_| {
                            // The receiver only goes away if the render itself is unwinding.
                            let _ = sender.send(self.row_counts(tile, row));
                        });
                    }
                }
                Schedule::Pool(threads) => {
                    let rows = Arc::new(Mutex::new(0..tile.resolution));
                    for _ in 0..threads.max(1) {
                        let rows = rows.clone();
                        let sender = sender.clone();
                        spawner.spawn(move |_| loop {
                            let row = match rows.lock() {
                                Ok(mut rows) => rows.next(),
                                Err(_) => None,
                            };
                            match row {
                                Some(row) => {
                                    if sender.send(self.row_counts(tile, row)).is_err() {
                                        break;
                                    }
                                }
                                None => break,
                            }
                        });
                    }
                }
            }
            // Only the row threads hold senders now, so the loop below
            // ends early if any of them dies without reporting.
            drop(sender);

            let mut received = 0usize;
            for result in receiver.iter().take(tile.resolution) {
                trace!("row {} arrived, {} of {}", result.row, received + 1, tile.resolution);
                self.paint(&mut image, tile, &result);
                received += 1;
            }
            received
        });

        match outcome {
            Ok(received) => {
                debug!("tile complete, {} rows painted", received);
                image
            }
            Err(cause) => panic::resume_unwind(cause),
        }
    }

    /// Paint one row of escape counts into the image.  Placement is
    /// keyed on the row number, never on arrival order.
    fn paint(&self, image: &mut RgbaImage, tile: &Tile, result: &RowResult) {
        let y = tile.image_row(result.row);
        for (x, &count) in result.counts.iter().enumerate() {
            image.put_pixel(x as u32, y, self.gradient[count]);
        }
    }
}
