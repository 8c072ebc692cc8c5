//! The escape-time evaluator.  Everything else in the crate is about
//! deciding *which* points to feed to this function and what to do
//! with the numbers it hands back.
use num::Complex;

/// The escape radius is 2, but we only ever compare against its
/// square so that no square root is taken inside the hot loop.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Iterate `x -> x * x + c`, starting from `x = c`, until either the
/// orbit leaves the disc of radius 2 or `max_iterations` steps have
/// been taken.  Returns the number of steps taken.  A return value
/// equal to `max_iterations` means the point never escaped and is
/// treated as being inside the set.
#[inline]
pub fn point_iterations(c: Complex<f64>, max_iterations: usize) -> usize {
    let mut x = c;
    let mut counter = 0;
    while counter < max_iterations && x.norm_sqr() < ESCAPE_RADIUS_SQUARED {
        x = x * x + c;
        counter += 1;
    }
    counter
}
