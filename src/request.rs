//! Decodes tile requests from URL query strings of the form
//! `pr=-0.759081&pi=-0.071950&sz=0.001611&max=2048`.  Nothing here
//! ever fails: unparseable values fall back to defaults, and nonsense
//! values are passed through for the renderer to make what it can of.

use crate::planes::Tile;
use crate::renderer::Renderer;
use image::RgbaImage;
use num::Complex;
use std::num::IntErrorKind;
use url::form_urlencoded;

/// The real part used when either coordinate fails to parse.
pub const DEFAULT_REAL: f64 = -1.3;
/// The imaginary part used when either coordinate fails to parse.
pub const DEFAULT_IMAGINARY: f64 = 0.0;
/// Edge length, in pixels, of every requested tile.
pub const DEFAULT_RESOLUTION: usize = 800;

/// Everything needed to render one tile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileRequest {
    /// Anchor point of the tile (`pr`, `pi`).
    pub center: Complex<f64>,
    /// Edge length of the tile in plane units (`sz`).
    pub size: f64,
    /// Iteration depth (`max`).
    pub max_iterations: usize,
    /// Edge length of the output image in pixels.
    pub resolution: usize,
}

impl TileRequest {
    /// Decode a query string.  `pr` and `pi` stand or fall together:
    /// if either is missing or malformed, both take their defaults.
    /// A bad `sz` becomes `0.0` and a bad `max` becomes `0`, both of
    /// which render, if uselessly.  A negative `max` is treated as
    /// zero, and one too large for 32 bits saturates.
    pub fn from_query(query: &str) -> TileRequest {
        let pairs: Vec<(String, String)> =
            form_urlencoded::parse(query.as_bytes()).into_owned().collect();
        let value = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .unwrap_or("")
        };

        let center = match (value("pr").parse::<f64>(), value("pi").parse::<f64>()) {
            (Ok(re), Ok(im)) => Complex::new(re, im),
            _ => Complex::new(DEFAULT_REAL, DEFAULT_IMAGINARY),
        };
        let size = value("sz").parse::<f64>().unwrap_or(0.0);
        let max_iterations = parse_depth(value("max"));

        let request = TileRequest {
            center,
            size,
            max_iterations,
            resolution: DEFAULT_RESOLUTION,
        };
        debug!("decoded {:?} from {:?}", request, query);
        request
    }

    /// Replace the output resolution.
    pub fn with_resolution(mut self, resolution: usize) -> TileRequest {
        self.resolution = resolution;
        self
    }

    /// The region of the plane this request covers.
    pub fn tile(&self) -> Tile {
        Tile::new(self.center, self.size, self.resolution)
    }

    /// A renderer at the requested depth.
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.max_iterations)
    }

    /// Build a renderer and render the requested tile.
    pub fn render(&self) -> RgbaImage {
        self.renderer().render_tile(&self.tile())
    }
}

// The depth is a 32-bit signed integer on the wire.
fn parse_depth(value: &str) -> usize {
    match value.parse::<i32>() {
        Ok(depth) if depth > 0 => depth as usize,
        Ok(_) => 0,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i32::max_value() as usize,
            _ => 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_query() {
        let request = TileRequest::from_query("pr=-0.759081&pi=-0.071950&sz=0.001611&max=2048");
        assert_eq!(request.center, Complex::new(-0.759081, -0.071950));
        assert_eq!(request.size, 0.001611);
        assert_eq!(request.max_iterations, 2048);
        assert_eq!(request.resolution, DEFAULT_RESOLUTION);
    }

    #[test]
    fn empty_query_takes_every_default() {
        let request = TileRequest::from_query("");
        assert_eq!(request.center, Complex::new(DEFAULT_REAL, DEFAULT_IMAGINARY));
        assert_eq!(request.size, 0.0);
        assert_eq!(request.max_iterations, 0);
    }

    #[test]
    fn one_bad_coordinate_resets_both() {
        let request = TileRequest::from_query("pr=-0.5&pi=oops&sz=1&max=10");
        assert_eq!(request.center, Complex::new(-1.3, 0.0));
        let request = TileRequest::from_query("pi=0.25&sz=1&max=10");
        assert_eq!(request.center, Complex::new(-1.3, 0.0));
        assert_eq!(request.size, 1.0);
        assert_eq!(request.max_iterations, 10);
    }

    #[test]
    fn bad_size_and_depth_fall_to_zero() {
        let request = TileRequest::from_query("pr=0&pi=0&sz=big&max=1.5");
        assert_eq!(request.center, Complex::new(0.0, 0.0));
        assert_eq!(request.size, 0.0);
        assert_eq!(request.max_iterations, 0);
    }

    #[test]
    fn depth_is_clamped_to_the_wire_type() {
        assert_eq!(parse_depth("-40"), 0);
        assert_eq!(parse_depth("+40"), 40);
        assert_eq!(parse_depth("99999999999"), 2_147_483_647);
        assert_eq!(parse_depth("-99999999999"), 0);
    }

    #[test]
    fn values_are_percent_decoded_and_first_wins() {
        let request = TileRequest::from_query("pr=%2D1.5&pi=-1.&pr=7&sz=2.&max=16&max=32");
        assert_eq!(request.center, Complex::new(-1.5, -1.0));
        assert_eq!(request.size, 2.0);
        assert_eq!(request.max_iterations, 16);
    }

    #[test]
    fn request_renders_at_its_resolution() {
        let request = TileRequest::from_query("pr=-1.5&pi=-1.&sz=2.&max=32").with_resolution(12);
        assert_eq!(request.tile(), Tile::new(Complex::new(-1.5, -1.0), 2.0, 12));
        assert_eq!(request.renderer().max_iterations(), 32);
        let image = request.render();
        assert_eq!(image.dimensions(), (12, 12));
    }
}
