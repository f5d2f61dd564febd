//! # Instruction Encoding
//!
//! Lowers the text-level instructions of a job to ESC/POS bytes.
//!
//! ## Style Tracking
//!
//! The printer keeps style state between commands, so the encoder tracks the
//! last *emitted* style and writes an escape only when a run actually
//! changes something. A job printing ten centered bold lines pays for the
//! alignment and bold escapes once, not ten times.
//!
//! The tracked state starts at the printer's post-reset defaults (left, 1x1,
//! no emphasis); the assembler guarantees a reset precedes the encoded
//! bytes.
//!
//! Encoding is pure and order-preserving: the same instruction list always
//! produces byte-identical output, and it never inspects transport state.

use super::{PrintInstruction, StyleAttributes};
use crate::error::EncodingError;
use crate::protocol::{commands, text};

/// Style state as last emitted to the printer.
struct StyleTracker {
    current: StyleAttributes,
}

impl StyleTracker {
    fn new() -> Self {
        // Post-reset printer state
        Self {
            current: StyleAttributes::default(),
        }
    }

    /// Emit escapes for whatever differs between `style` and the tracked
    /// state, then adopt `style`.
    fn transition(&mut self, out: &mut Vec<u8>, style: StyleAttributes) -> Result<(), EncodingError> {
        if style.alignment != self.current.alignment {
            out.extend(text::align(style.alignment));
        }
        if style.size != self.current.size {
            out.extend(text::size(style.size)?);
        }
        if style.bold != self.current.bold {
            out.extend(text::bold(style.bold));
        }
        if style.underline != self.current.underline {
            out.extend(text::underline(style.underline));
        }
        self.current = style;
        Ok(())
    }
}

/// Encode the text-level instructions of a job to ESC/POS bytes.
///
/// - `TextRun`: style escapes (only for changed attributes), then the
///   text's raw bytes. No implicit restore; style persists.
/// - `RawCommand`: passed through unmodified.
/// - `LineFeed(n)`: n newline bytes.
/// - `ImageBlock`: skipped - images are rasterized separately and placed by
///   the assembler (see [`crate::assemble`]).
///
/// ## Errors
///
/// Fails synchronously on unencodable input (a size multiplier the printer
/// cannot represent). Nothing is sent anywhere on failure.
pub fn encode(instructions: &[PrintInstruction]) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::new();
    let mut tracker = StyleTracker::new();

    for instruction in instructions {
        match instruction {
            PrintInstruction::TextRun { text, style } => {
                tracker.transition(&mut out, *style)?;
                out.extend(text.as_bytes());
            }
            PrintInstruction::RawCommand(bytes) => {
                out.extend(bytes);
            }
            PrintInstruction::LineFeed(n) => {
                out.extend(commands::feed_lines(*n));
            }
            PrintInstruction::ImageBlock(_) => {}
        }
    }

    Ok(out)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::text::{Alignment, FontSize};
    use pretty_assertions::assert_eq;

    fn text_run(text: &str, style: StyleAttributes) -> PrintInstruction {
        PrintInstruction::TextRun {
            text: text.into(),
            style,
        }
    }

    #[test]
    fn test_plain_text_emits_no_escapes() {
        // Default style matches post-reset state: just the bytes
        let out = encode(&[text_run("hello", StyleAttributes::default())]).unwrap();
        assert_eq!(out, b"hello");
    }

    #[test]
    fn test_styled_run_emits_changed_escapes_only() {
        let style = StyleAttributes {
            alignment: Alignment::Center,
            bold: true,
            ..Default::default()
        };
        let out = encode(&[text_run("X", style)]).unwrap();

        let mut expected = vec![0x1B, 0x61, 0x01]; // center
        expected.extend([0x1B, 0x45, 0x01]); // bold on
        expected.push(b'X');
        assert_eq!(out, expected);
    }

    #[test]
    fn test_style_persists_across_runs() {
        let bold = StyleAttributes {
            bold: true,
            ..Default::default()
        };
        let out = encode(&[text_run("a", bold), text_run("b", bold)]).unwrap();

        // Bold escape once, not twice
        let mut expected = vec![0x1B, 0x45, 0x01];
        expected.extend(b"ab");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_style_restored_on_change_back() {
        let bold = StyleAttributes {
            bold: true,
            ..Default::default()
        };
        let out = encode(&[
            text_run("a", bold),
            text_run("b", StyleAttributes::default()),
        ])
        .unwrap();

        let mut expected = vec![0x1B, 0x45, 0x01];
        expected.push(b'a');
        expected.extend([0x1B, 0x45, 0x00]); // bold off for the second run
        expected.push(b'b');
        assert_eq!(out, expected);
    }

    #[test]
    fn test_size_change_emits_gs_bang() {
        let big = StyleAttributes {
            size: FontSize::Large2,
            ..Default::default()
        };
        let out = encode(&[text_run("T", big)]).unwrap();
        assert_eq!(out, vec![0x1D, 0x21, 0x22, b'T']);
    }

    #[test]
    fn test_raw_passthrough() {
        let out = encode(&[PrintInstruction::RawCommand(vec![0x1B, 0x40, 0x00])]).unwrap();
        assert_eq!(out, vec![0x1B, 0x40, 0x00]);
    }

    #[test]
    fn test_line_feed_count() {
        let out = encode(&[PrintInstruction::LineFeed(3)]).unwrap();
        assert_eq!(out, vec![0x0A, 0x0A, 0x0A]);
    }

    #[test]
    fn test_image_block_skipped() {
        let out = encode(&[PrintInstruction::ImageBlock(Box::new(
            image::RgbaImage::new(4, 4),
        ))])
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_unsupported_size_fails_fast() {
        let bad = StyleAttributes {
            size: FontSize::Custom { width: 12, height: 1 },
            ..Default::default()
        };
        let err = encode(&[text_run("x", bad)]).unwrap_err();
        assert_eq!(err, EncodingError::UnsupportedSize { width: 12, height: 1 });
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let style = StyleAttributes {
            alignment: Alignment::Right,
            size: FontSize::Large,
            underline: true,
            ..Default::default()
        };
        let instructions = [
            text_run("first", style),
            PrintInstruction::LineFeed(1),
            text_run("second", StyleAttributes::default()),
        ];

        let a = encode(&instructions).unwrap();
        let b = encode(&instructions).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_preserved() {
        let out = encode(&[
            text_run("1", StyleAttributes::default()),
            PrintInstruction::LineFeed(1),
            text_run("2", StyleAttributes::default()),
        ])
        .unwrap();
        assert_eq!(out, b"1\n2");
    }
}
