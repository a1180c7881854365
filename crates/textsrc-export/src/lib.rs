//! PNG export for textsrc
//!
//! Writes the rasterizer's straight-alpha RGBA buffer out as a PNG, so a
//! render can be inspected without a compositor.

use std::path::Path;

use image::{ImageBuffer, ImageEncoder, RgbaImage};
use textsrc_core::{
    error::{ExportError, Result},
    types::PixelBuffer,
};

/// Encode an RGBA buffer to PNG bytes
///
/// Returns a valid PNG with proper IHDR, IDAT, and IEND chunks.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let expected = buffer.width as usize * buffer.height as usize * 4;
    if buffer.data.len() < expected {
        return Err(ExportError::BufferTooSmall {
            width: buffer.width,
            height: buffer.height,
            expected,
            actual: buffer.data.len(),
        }
        .into());
    }

    let img: RgbaImage =
        ImageBuffer::from_raw(buffer.width, buffer.height, buffer.data[..expected].to_vec())
            .ok_or_else(|| {
                ExportError::EncodingFailed("Failed to create image buffer from RGBA data".into())
            })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(
            img.as_raw(),
            buffer.width,
            buffer.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// Encode `buffer` and write it to `path`
pub fn save_png(buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<()> {
    let png = encode_png(buffer)?;
    std::fs::write(path.as_ref(), &png)?;
    log::debug!(
        "Wrote {}x{} PNG ({} bytes) to {}",
        buffer.width,
        buffer.height,
        png.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsrc_core::{types::Canvas, TextSourceError};

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    fn two_by_two() -> PixelBuffer {
        PixelBuffer {
            width: 2,
            height: 2,
            data: vec![
                255, 0, 0, 255, // Red
                0, 255, 0, 255, // Green
                0, 0, 255, 128, // Half-transparent blue
                0, 0, 0, 0, // Clear
            ],
        }
    }

    #[test]
    fn test_encode_writes_png_magic() {
        let png = encode_png(&two_by_two()).unwrap();
        assert_eq!(&png[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_pixels_survive_a_round_trip() {
        let png = encode_png(&two_by_two()).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(0, 1).0, [0, 0, 255, 128]);
        assert_eq!(decoded.get_pixel(1, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let mut buffer = PixelBuffer::transparent(Canvas::new(32, 32));
        buffer.data.truncate(100);
        let err = encode_png(&buffer).err();
        assert!(matches!(
            err,
            Some(TextSourceError::Export(ExportError::BufferTooSmall { actual: 100, .. }))
        ));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        save_png(&PixelBuffer::transparent(Canvas::new(32, 32)), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let buffer = PixelBuffer::transparent(Canvas::new(32, 32));
        assert!(matches!(
            save_png(&buffer, "/no/such/dir/out.png"),
            Err(TextSourceError::Io(_))
        ));
    }
}
