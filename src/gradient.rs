//! The colour table.  A gradient maps an iteration count straight to a
//! colour, so the renderer never does any colour arithmetic while it
//! paints.  The table is built once, when the renderer is built, and
//! is never touched again.

use image::Rgba;
use std::ops::Index;

/// The colour of points that never escaped.
pub const IN_SET: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// How many times the hue walks around the colour wheel between
/// iteration zero and the iteration limit.
const HUE_TURNS: f32 = 10.0;

/// A precomputed lookup table of `max_iterations + 1` colours.  The
/// last entry is always `IN_SET`.
#[derive(Clone, Debug)]
pub struct Gradient {
    colors: Vec<Rgba<u8>>,
}

impl Gradient {
    /// Build the table for a given iteration depth.  The hue cycles
    /// quickly (banding is the point), while saturation drops and
    /// brightness climbs slowly as the iteration count approaches the
    /// limit.  A depth of zero produces a table holding nothing but
    /// the in-set colour.
    pub fn new(max_iterations: usize) -> Gradient {
        let max = max_iterations as f32;
        let mut colors: Vec<Rgba<u8>> = (0..max_iterations)
            .map(|i| {
                let i = i as f32;
                hsv_to_rgba(
                    (i * HUE_TURNS * 360.0) / max + 0.4,
                    0.9 - (i / max) * 0.5,
                    0.75 + i / (4.3 * max),
                )
            })
            .collect();
        colors.push(IN_SET);
        Gradient { colors }
    }

    /// The iteration depth this table was built for.
    pub fn max_iterations(&self) -> usize {
        self.colors.len() - 1
    }

    /// Number of entries; always `max_iterations() + 1`.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true: the in-set colour is always present.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The whole table, escape colours first, in-set colour last.
    pub fn colors(&self) -> &[Rgba<u8>] {
        &self.colors
    }
}

impl Index<usize> for Gradient {
    type Output = Rgba<u8>;

    fn index(&self, iterations: usize) -> &Rgba<u8> {
        &self.colors[iterations]
    }
}

/// Standard six-sector HSV to RGB conversion.  Hue is in degrees and
/// is reduced mod 360; saturation and value are in `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h = h.rem_euclid(360.0) / 60.0;
    let sector = h as usize;
    let f = h - sector as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector {
        // rem_euclid can round up to exactly 360.
        0 | 6 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Scale a `[0, 1]` channel to a byte.  Note the scale is 256, not
/// 255, so anything at or above 255 after scaling clamps to 255.
pub fn quantize(channel: f32) -> u8 {
    let scaled = channel * 256.0;
    if scaled as i32 >= 255 {
        255
    } else {
        scaled as u8
    }
}

/// Convert an HSV triple to an opaque RGBA pixel.
pub fn hsv_to_rgba(h: f32, s: f32, v: f32) -> Rgba<u8> {
    let (r, g, b) = hsv_to_rgb(h, s, v);
    Rgba([quantize(r), quantize(g), quantize(b), 255])
}
