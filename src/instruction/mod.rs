//! # Print Instructions
//!
//! This module defines the structured instruction list a caller builds to
//! describe one print job, and the encoder that lowers the text-level
//! instructions to ESC/POS bytes.
//!
//! ## Design
//!
//! Instructions sit between the caller's intent and raw printer bytes:
//!
//! ```text
//! PrintJob (inspectable) ──encode──► bytes ──assemble──► PrintDataResult
//! ```
//!
//! Instructions are immutable once appended to a job and are consumed
//! exactly once by the assembler. Style is *stateful on the printer*: a
//! [`StyleAttributes`] change persists until the next instruction changes
//! it, and the encoder emits escapes only for what actually changed.
//!
//! ## Usage Example
//!
//! ```
//! use candela::instruction::{PrintJob, StyleAttributes};
//! use candela::protocol::text::{Alignment, FontSize};
//!
//! let mut job = PrintJob::new();
//! job.text(
//!     "CAFE CANDELA",
//!     StyleAttributes {
//!         alignment: Alignment::Center,
//!         size: FontSize::Large,
//!         bold: true,
//!         ..Default::default()
//!     },
//! );
//! job.feed(1);
//! job.text("thank you!", StyleAttributes::default());
//! ```

pub mod encode;

pub use encode::encode;

use std::fmt;

use crate::protocol::text::{Alignment, FontSize};
use crate::render::PixelSource;

/// Text styling for one [`PrintInstruction::TextRun`].
///
/// Flags are combinable; alignment and size are single-valued. The default
/// matches the printer's post-reset state (left, 1x1, no emphasis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleAttributes {
    pub alignment: Alignment,
    pub size: FontSize,
    pub bold: bool,
    pub underline: bool,
}

/// One directive in a print job.
pub enum PrintInstruction {
    /// Styled text. The text's raw bytes are emitted after any style
    /// escapes the run requires.
    TextRun {
        text: String,
        style: StyleAttributes,
    },

    /// An image to be dithered and sent in the device's addressing mode.
    /// The pixel source is read-only and sampled during assembly.
    ImageBlock(Box<dyn PixelSource + Send + Sync>),

    /// Raw control bytes, passed through unmodified. Escape hatch for
    /// commands the structured instructions do not cover.
    RawCommand(Vec<u8>),

    /// `n` newline bytes.
    LineFeed(u8),
}

impl fmt::Debug for PrintInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintInstruction::TextRun { text, style } => f
                .debug_struct("TextRun")
                .field("text", text)
                .field("style", style)
                .finish(),
            PrintInstruction::ImageBlock(src) => f
                .debug_struct("ImageBlock")
                .field("width", &src.width())
                .field("height", &src.height())
                .finish(),
            PrintInstruction::RawCommand(bytes) => {
                f.debug_tuple("RawCommand").field(&bytes.len()).finish()
            }
            PrintInstruction::LineFeed(n) => f.debug_tuple("LineFeed").field(n).finish(),
        }
    }
}

/// An ordered, append-only list of instructions for one print job.
///
/// Built once per job and consumed exactly once by
/// [`assemble`](crate::assemble::assemble).
#[derive(Debug, Default)]
pub struct PrintJob {
    instructions: Vec<PrintInstruction>,
}

impl PrintJob {
    /// Create an empty job.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a styled text run.
    pub fn text(&mut self, text: impl Into<String>, style: StyleAttributes) -> &mut Self {
        self.instructions.push(PrintInstruction::TextRun {
            text: text.into(),
            style,
        });
        self
    }

    /// Append an image block.
    pub fn image(&mut self, src: impl PixelSource + Send + Sync + 'static) -> &mut Self {
        self.instructions
            .push(PrintInstruction::ImageBlock(Box::new(src)));
        self
    }

    /// Append raw control bytes.
    pub fn raw(&mut self, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.instructions
            .push(PrintInstruction::RawCommand(bytes.into()));
        self
    }

    /// Append `n` line feeds.
    pub fn feed(&mut self, n: u8) -> &mut Self {
        self.instructions.push(PrintInstruction::LineFeed(n));
        self
    }

    /// The instructions appended so far, in order.
    pub fn instructions(&self) -> &[PrintInstruction] {
        &self.instructions
    }

    /// Whether the job contains no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
