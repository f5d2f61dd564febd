//! # Image Rasterization
//!
//! This module turns caller-supplied RGBA pixels into the packed monochrome
//! bitmaps thermal printers consume.
//!
//! ## Modules
//!
//! - [`dither`]: cyclic halftone thresholding (grayscale → binary)
//!
//! ## Pipeline
//!
//! ```text
//! PixelSource ──dither──► MonochromeRaster ──graphics::raster/column──► bytes
//! ```
//!
//! [`rasterize`] runs the whole pipeline for one image in the addressing
//! mode the target device supports.
//!
//! ## Usage Example
//!
//! ```
//! use candela::render::{self, PixelSource};
//! use candela::protocol::graphics::GraphicsMode;
//!
//! let img = image::RgbaImage::from_pixel(64, 48, image::Rgba([255, 255, 255, 255]));
//! let bytes = render::rasterize(&img, GraphicsMode::Raster)?;
//! assert_eq!(bytes.len(), 8 + 8 * 48); // header + packed rows
//! # Ok::<(), candela::error::EncodingError>(())
//! ```

pub mod dither;

use crate::error::EncodingError;
use crate::protocol::graphics::{self, GraphicsMode};

/// Read-only source of RGBA pixels, supplied by the caller.
///
/// The rasterizer only ever reads through this trait, so callers can feed it
/// decoded image files, composed UI surfaces, or procedural generators
/// without copying into an intermediate buffer.
pub trait PixelSource {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// RGBA channels at (x, y), each 0..=255. `x < width`, `y < height`.
    fn pixel(&self, x: u32, y: u32) -> [u8; 4];
}

impl PixelSource for image::RgbaImage {
    fn width(&self) -> u32 {
        image::RgbaImage::width(self)
    }

    fn height(&self) -> u32 {
        image::RgbaImage::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }
}

/// A packed 1-bit bitmap, ready for either graphics command.
///
/// Rows are packed MSB-first, 8 pixels per byte, 1 = printed (dark). Each
/// row occupies `bytes_per_line = ceil(width/8)` bytes; unused low-order
/// bits of a row's final byte are zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonochromeRaster {
    width: u32,
    height: u32,
    bytes_per_line: usize,
    rows: Vec<u8>,
}

impl MonochromeRaster {
    /// Create an all-white bitmap.
    pub fn blank(width: u32, height: u32) -> Self {
        let bytes_per_line = (width as usize).div_ceil(8);
        Self {
            width,
            height,
            bytes_per_line,
            rows: vec![0u8; bytes_per_line * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed bytes per row: `ceil(width / 8)`.
    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    /// The packed rows, row-major.
    pub fn rows(&self) -> &[u8] {
        &self.rows
    }

    /// Whether the pixel at (x, y) is printed.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        let idx = y as usize * self.bytes_per_line + x as usize / 8;
        self.rows[idx] >> (7 - (x % 8)) & 1 == 1
    }

    /// Mark the pixel at (x, y) as printed.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32) {
        let idx = y as usize * self.bytes_per_line + x as usize / 8;
        self.rows[idx] |= 1 << (7 - (x % 8));
    }
}

/// Rasterize a pixel source into printer command bytes.
///
/// Dithers the source to monochrome, then encodes it in the requested
/// addressing mode. Zero-sized sources, and sources too large for the
/// command's u16 dimension fields, are rejected before any byte is
/// produced.
pub fn rasterize(
    src: &impl PixelSource,
    mode: GraphicsMode,
) -> Result<Vec<u8>, EncodingError> {
    let bitmap = dither::dither(src)?;
    encode_bitmap(&bitmap, mode)
}

/// Encode an already-dithered bitmap in the requested addressing mode.
pub fn encode_bitmap(
    bitmap: &MonochromeRaster,
    mode: GraphicsMode,
) -> Result<Vec<u8>, EncodingError> {
    match mode {
        GraphicsMode::Raster => graphics::raster(bitmap),
        GraphicsMode::Column => graphics::column(bitmap),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Single-color pixel source used across the render tests.
    pub(crate) struct SolidSource {
        width: u32,
        height: u32,
        rgba: [u8; 4],
    }

    impl SolidSource {
        pub(crate) fn new(width: u32, height: u32, rgba: [u8; 4]) -> Self {
            Self { width, height, rgba }
        }
    }

    impl PixelSource for SolidSource {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn pixel(&self, _x: u32, _y: u32) -> [u8; 4] {
            self.rgba
        }
    }

    #[test]
    fn test_bytes_per_line() {
        for (width, expected) in [(1, 1), (8, 1), (9, 2), (16, 2), (17, 3), (384, 48), (576, 72)] {
            assert_eq!(
                MonochromeRaster::blank(width, 1).bytes_per_line(),
                expected,
                "width {width}"
            );
        }
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut bitmap = MonochromeRaster::blank(13, 5);
        assert!(!bitmap.get(12, 4));
        bitmap.set(12, 4);
        assert!(bitmap.get(12, 4));
        assert!(!bitmap.get(11, 4));
        assert!(!bitmap.get(12, 3));
    }

    #[test]
    fn test_msb_first_packing() {
        let mut bitmap = MonochromeRaster::blank(8, 1);
        bitmap.set(0, 0);
        assert_eq!(bitmap.rows(), &[0x80]);
        bitmap.set(7, 0);
        assert_eq!(bitmap.rows(), &[0x81]);
    }

    #[test]
    fn test_rasterize_raster_length() {
        let src = SolidSource::new(100, 30, [255, 255, 255, 255]);
        let bytes = rasterize(&src, GraphicsMode::Raster).unwrap();
        assert_eq!(bytes.len(), 8 + 13 * 30);
    }

    #[test]
    fn test_rasterize_column_length() {
        let src = SolidSource::new(100, 30, [255, 255, 255, 255]);
        let bytes = rasterize(&src, GraphicsMode::Column).unwrap();
        // 2 bands: spacing(3) + 2 * (5 header + 3*100 data + 1 LF)
        assert_eq!(bytes.len(), 3 + 2 * (5 + 300 + 1));
    }

    #[test]
    fn test_rasterize_rejects_empty() {
        let src = SolidSource::new(0, 0, [0, 0, 0, 255]);
        assert!(rasterize(&src, GraphicsMode::Raster).is_err());
    }

    #[test]
    fn test_rasterize_rejects_oversized() {
        // 65536 rows overflow the raster header's u16 height field
        let src = SolidSource::new(8, 65536, [255, 255, 255, 255]);
        assert_eq!(
            rasterize(&src, GraphicsMode::Raster),
            Err(EncodingError::OversizedImage { width: 8, height: 65536 })
        );
    }

    #[test]
    fn test_rgba_image_pixel_source() {
        let img = image::RgbaImage::from_pixel(5, 7, image::Rgba([1, 2, 3, 4]));
        assert_eq!(PixelSource::width(&img), 5);
        assert_eq!(PixelSource::height(&img), 7);
        assert_eq!(PixelSource::pixel(&img, 4, 6), [1, 2, 3, 4]);
    }
}
