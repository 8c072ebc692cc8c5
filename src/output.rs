//! Serializes rendered tiles.  PNG is the only format: it is lossless
//! and keeps the alpha channel the renderer fills in.

use crate::errors::{Result, TileError};
use failure::ResultExt;
use image::png::PNGEncoder;
use image::{ColorType, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encode `image` as an 8-bit RGBA PNG into `writer`.
pub fn encode_png<W: Write>(image: &RgbaImage, writer: W) -> Result<()> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TileError::EmptyImage { width, height }.into());
    }
    PNGEncoder::new(writer)
        .encode(image, width, height, ColorType::RGBA(8))
        .context("could not encode PNG")?;
    Ok(())
}

/// Encode `image` as a PNG file at `path`, replacing anything there.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|_| format!("could not create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    encode_png(image, &mut writer)?;
    writer
        .flush()
        .with_context(|_| format!("could not write {}", path.display()))?;
    debug!("wrote {}x{} PNG to {}", image.width(), image.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    fn checkerboard() -> RgbaImage {
        RgbaImage::from_fn(4, 3, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([192, 20, 19, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn png_bytes_decode_to_the_same_pixels() {
        let original = checkerboard();
        let mut buffer: Vec<u8> = vec![];
        encode_png(&original, &mut buffer).unwrap();
        assert_eq!(&buffer[1..4], b"PNG");
        let decoded = image::load_from_memory(&buffer).unwrap().to_rgba();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.into_raw(), original.into_raw());
    }

    #[test]
    fn empty_images_are_refused() {
        let mut buffer: Vec<u8> = vec![];
        let err = encode_png(&RgbaImage::new(0, 0), &mut buffer).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TileError>(),
            Some(&TileError::EmptyImage { width: 0, height: 0 })
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn png_files_land_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tile.png");
        write_png(&checkerboard(), &path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba();
        assert_eq!(decoded.dimensions(), (4, 3));
    }

    #[test]
    fn missing_directories_are_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nowhere").join("tile.png");
        let err = write_png(&checkerboard(), &path).unwrap_err();
        assert!(format!("{}", err).starts_with("could not create"));
    }
}
