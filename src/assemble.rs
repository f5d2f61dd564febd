//! # Buffer Assembly
//!
//! This module concatenates encoder and rasterizer output with control codes
//! into the single immutable buffer a transfer session sends.
//!
//! ## Block Order
//!
//! The concatenation order is fixed:
//!
//! ```text
//! ┌──────────────┬──────────────────┬──────────────┬─────────────────┐
//! │ reset, align │ image section    │ text section │ tear-off feeds  │
//! │ (ESC @, a 0) │ (rasterized)     │ (encoded)    │ (LF × n)        │
//! └──────────────┴──────────────────┴──────────────┴─────────────────┘
//! ```
//!
//! The leading alignment escape pins the printer to a known left-aligned
//! state even on firmware whose `ESC @` does not fully reset alignment;
//! the style tracker's starting assumption depends on it.
//!
//! Image blocks always precede the text section regardless of where they
//! were appended; within each section the caller's order is preserved.
//!
//! The output buffer is a **single allocation** sized to the sum of its
//! parts - assembly never grows a buffer incrementally.
//!
//! ## Preview
//!
//! When the job contains an image, the dithered bitmap is also re-encoded
//! as a PNG and returned alongside the printer bytes. The preview is for
//! on-screen display only; it is never transmitted.

use std::io::Cursor;

use crate::error::CandelaError;
use crate::instruction::{PrintInstruction, PrintJob, encode};
use crate::printer::PrinterConfig;
use crate::protocol::commands;
use crate::protocol::text::{self, Alignment};
use crate::render::{self, MonochromeRaster, dither};

/// The assembled artifact for one print job.
///
/// `data` is the exact byte sequence to write to the device. `preview` is a
/// PNG-encoded rendering of the job's first image block, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDataResult {
    pub data: Vec<u8>,
    pub preview: Option<Vec<u8>>,
}

/// Assemble a job into its final device buffer.
///
/// Rasterizes every image block in the device's addressing mode, encodes the
/// text-level instructions, and concatenates reset and leading alignment +
/// image + text + tear-off padding in one allocation.
///
/// ## Errors
///
/// Fails fast on unencodable input (bad size multiplier, zero-dimension
/// image) or on preview PNG encoding failure. Nothing touches the transport
/// on failure.
pub fn assemble(job: &PrintJob, config: &PrinterConfig) -> Result<PrintDataResult, CandelaError> {
    let mut image_section = Vec::new();
    let mut preview_bitmap: Option<MonochromeRaster> = None;

    for instruction in job.instructions() {
        if let PrintInstruction::ImageBlock(src) = instruction {
            let bitmap = dither::dither(src.as_ref())?;
            image_section.extend(render::encode_bitmap(&bitmap, config.graphics_mode())?);
            if preview_bitmap.is_none() {
                preview_bitmap = Some(bitmap);
            }
        }
    }

    let text_section = encode(job.instructions())?;
    let mut prefix = commands::init();
    prefix.extend(text::align(Alignment::Left));
    let suffix = commands::feed_lines(config.tear_feed_lines);

    let data = concat(&[&prefix, &image_section, &text_section, &suffix]);
    let preview = match preview_bitmap {
        Some(bitmap) => Some(preview_png(&bitmap)?),
        None => None,
    };

    Ok(PrintDataResult { data, preview })
}

/// Concatenate byte blocks into one buffer sized up front.
fn concat(parts: &[&[u8]]) -> Vec<u8> {
    let total: usize = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(part);
    }
    debug_assert_eq!(out.len(), total);
    out
}

/// Re-encode a dithered bitmap as a PNG for on-screen preview.
///
/// Printed bits become black pixels, unprinted bits paper-white.
fn preview_png(bitmap: &MonochromeRaster) -> Result<Vec<u8>, image::ImageError> {
    let img = image::GrayImage::from_fn(bitmap.width(), bitmap.height(), |x, y| {
        image::Luma([if bitmap.get(x, y) { 0u8 } else { 255u8 }])
    });

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    Ok(buf)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::StyleAttributes;
    use pretty_assertions::assert_eq;

    fn white_image(width: u32, height: u32) -> image::RgbaImage {
        image::RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_text_only_layout() {
        let mut job = PrintJob::new();
        job.text("hi", StyleAttributes::default());

        let config = PrinterConfig::GENERIC_58MM;
        let result = assemble(&job, &config).unwrap();

        let mut expected = vec![0x1B, 0x40]; // reset
        expected.extend([0x1B, 0x61, 0x00]); // align left
        expected.extend(b"hi");
        expected.extend(vec![0x0A; config.tear_feed_lines as usize]);
        assert_eq!(result.data, expected);
        assert_eq!(result.preview, None);
    }

    #[test]
    fn test_image_precedes_text_regardless_of_append_order() {
        let mut job = PrintJob::new();
        job.text("caption", StyleAttributes::default());
        job.image(white_image(16, 1));

        let result = assemble(&job, &PrinterConfig::GENERIC_58MM).unwrap();

        // reset + align, then the raster command, then the caption
        assert_eq!(&result.data[0..5], &[0x1B, 0x40, 0x1B, 0x61, 0x00]);
        assert_eq!(&result.data[5..8], &[0x1D, 0x76, 0x30]);
        let caption_pos = result
            .data
            .windows(7)
            .position(|w| w == b"caption")
            .unwrap();
        assert!(caption_pos > 8);
    }

    #[test]
    fn test_single_allocation_exact_size() {
        let mut job = PrintJob::new();
        job.text("abc", StyleAttributes::default());
        job.image(white_image(16, 2));

        let config = PrinterConfig::GENERIC_58MM;
        let result = assemble(&job, &config).unwrap();

        // reset+align(5) + raster(8 + 2*2) + text(3) + feeds(4)
        assert_eq!(result.data.len(), 5 + 12 + 3 + 4);
    }

    #[test]
    fn test_column_mode_selected_by_capability() {
        let mut job = PrintJob::new();
        job.image(white_image(8, 24));

        let result = assemble(&job, &PrinterConfig::GENERIC_58MM_LEGACY).unwrap();
        // Column output leads with SET_LINE_SPACING_24 after the prefix
        assert_eq!(&result.data[5..8], &[0x1B, 0x33, 24]);
    }

    #[test]
    fn test_preview_is_png() {
        let mut job = PrintJob::new();
        job.image(white_image(16, 8));

        let result = assemble(&job, &PrinterConfig::GENERIC_58MM).unwrap();
        let preview = result.preview.expect("image job must yield a preview");
        assert_eq!(&preview[1..4], b"PNG");
    }

    #[test]
    fn test_preview_never_in_device_data() {
        let mut job = PrintJob::new();
        job.image(white_image(16, 8));

        let result = assemble(&job, &PrinterConfig::GENERIC_58MM).unwrap();
        let preview = result.preview.unwrap();
        // The PNG signature must not appear in the device stream
        assert!(
            !result
                .data
                .windows(4)
                .any(|w| w == &preview[0..4])
        );
    }

    #[test]
    fn test_empty_job_still_resets_and_feeds() {
        let job = PrintJob::new();
        let config = PrinterConfig::GENERIC_58MM;
        let result = assemble(&job, &config).unwrap();

        let mut expected = vec![0x1B, 0x40, 0x1B, 0x61, 0x00];
        expected.extend(vec![0x0A; config.tear_feed_lines as usize]);
        assert_eq!(result.data, expected);
    }

    #[test]
    fn test_prefix_pins_left_alignment() {
        // Every assembled buffer opens with reset followed by an explicit
        // align-left, matching the encoder's starting assumption
        let mut job = PrintJob::new();
        job.text("x", StyleAttributes::default());

        let result = assemble(&job, &PrinterConfig::GENERIC_80MM).unwrap();
        assert_eq!(&result.data[0..5], &[0x1B, 0x40, 0x1B, 0x61, 0x00]);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let mut job = PrintJob::new();
        job.text("x", StyleAttributes::default());
        job.image(white_image(24, 6));

        let a = assemble(&job, &PrinterConfig::GENERIC_58MM).unwrap();
        let b = assemble(&job, &PrinterConfig::GENERIC_58MM).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_size_image_fails_before_assembly() {
        let mut job = PrintJob::new();
        job.image(image::RgbaImage::new(0, 5));

        assert!(matches!(
            assemble(&job, &PrinterConfig::GENERIC_58MM),
            Err(CandelaError::Encoding(_))
        ));
    }
}
