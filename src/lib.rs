#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot tile renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the orbit `x -> x * x + c` stays bounded forever.  We
//! can't iterate forever, so each point gets a fixed budget of
//! iterations, and the number of steps it took the orbit to leave the
//! disc of radius 2 (its "escape time") is used to pick a colour.
//! Points that use up their whole budget are drawn black.
//!
//! A tile is a square patch of the plane rendered to a square image.
//! Every row of the tile is computed on its own thread; rows come
//! back over a channel in whatever order they finish and are painted
//! into the image through a precomputed colour table.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate crossbeam;
extern crate image;
extern crate num;
extern crate url;

pub mod errors;
pub mod escape;
pub mod gradient;
pub mod output;
pub mod planes;
pub mod renderer;
pub mod request;

pub use crate::escape::point_iterations;
pub use crate::gradient::Gradient;
pub use crate::planes::Tile;
pub use crate::renderer::{Renderer, RowResult, Schedule};
pub use crate::request::TileRequest;
