//! Contains the Tile struct, which describes a relationship between a
//! square grid of pixels and a square region of the complex plane
//! anchored at a single corner.
use num::Complex;

/// A square region of the complex plane and the square raster it is
/// rendered to.  `center` is the corner the tile grows from: row and
/// column offsets are added to it, so the tile covers
/// `[center.re, center.re + size)` by `[center.im, center.im + size)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    /// The anchor point of the tile on the complex plane.
    pub center: Complex<f64>,
    /// Edge length of the tile, in plane units.
    pub size: f64,
    /// Edge length of the raster, in pixels.
    pub resolution: usize,
}

impl Tile {
    /// Constructor.  Nothing is validated; a zero resolution gives an
    /// empty tile and a zero size gives a tile where every pixel maps
    /// to the same point.
    pub fn new(center: Complex<f64>, size: f64, resolution: usize) -> Tile {
        Tile {
            center,
            size,
            resolution,
        }
    }

    /// The total number of pixels in the raster.
    pub fn len(&self) -> usize {
        self.resolution * self.resolution
    }

    /// Describes that the raster has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.resolution == 0
    }

    /// The distance, in plane units, between neighbouring pixels.
    pub fn step(&self) -> f64 {
        self.size / (self.resolution as f64)
    }

    /// The point on the complex plane where computation row `row`
    /// starts.  Rows climb the imaginary axis.
    pub fn row_origin(&self, row: usize) -> Complex<f64> {
        self.center + Complex::new(0.0, (row as f64) * self.size / (self.resolution as f64))
    }

    /// Given the row and column of a pixel, return the point on the
    /// complex plane it samples.
    pub fn pixel_to_point(&self, row: usize, column: usize) -> Complex<f64> {
        self.row_origin(row)
            + Complex::new((column as f64) * self.size / (self.resolution as f64), 0.0)
    }

    /// Computation rows climb the imaginary axis but image rows run
    /// top to bottom, so row 0 lands on the last line of the image.
    pub fn image_row(&self, row: usize) -> u32 {
        (self.resolution - row - 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_knows_its_size() {
        let tile = Tile::new(Complex::new(-1.3, 0.0), 2.6, 800);
        assert_eq!(tile.len(), 640_000);
        assert!(!tile.is_empty());
        assert!(Tile::new(Complex::new(0.0, 0.0), 1.0, 0).is_empty());
    }

    #[test]
    fn rows_climb_the_imaginary_axis() {
        let tile = Tile::new(Complex::new(-2.0, -2.0), 4.0, 4);
        assert_eq!(tile.row_origin(0), Complex::new(-2.0, -2.0));
        assert_eq!(tile.row_origin(1), Complex::new(-2.0, -1.0));
        assert_eq!(tile.row_origin(3), Complex::new(-2.0, 1.0));
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let tile = Tile::new(Complex::new(0.0, 0.0), 5.0, 5);
        assert_eq!(tile.pixel_to_point(0, 0), Complex::new(0.0, 0.0));
        assert_eq!(tile.pixel_to_point(2, 2), Complex::new(2.0, 2.0));
        assert_eq!(tile.pixel_to_point(1, 4), Complex::new(4.0, 1.0));
    }

    #[test]
    fn pixel_to_point_on_mixed_planes() {
        let tile = Tile::new(Complex::new(-2.0, -2.0), 4.0, 4);
        assert_eq!(tile.pixel_to_point(2, 2), Complex::new(0.0, 0.0));
        assert_eq!(tile.pixel_to_point(0, 3), Complex::new(1.0, -2.0));
        assert_eq!(tile.step(), 1.0);
    }

    #[test]
    fn image_rows_are_flipped() {
        let tile = Tile::new(Complex::new(0.0, 0.0), 1.0, 10);
        assert_eq!(tile.image_row(0), 9);
        assert_eq!(tile.image_row(9), 0);
        assert_eq!(tile.image_row(4), 5);
    }
}
