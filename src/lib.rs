//! # Candela - ESC/POS Print Pipeline for BLE Thermal Printers
//!
//! Candela renders structured print instructions (styled text, raster
//! images, raw control codes) into a byte-exact ESC/POS command stream and
//! delivers it over a narrow, ordered, acknowledgment-gated transport whose
//! payload bound changes at runtime. It provides:
//!
//! - **Instruction encoding**: styled text to escape-coded bytes, with
//!   change-only style tracking
//! - **Rasterization**: RGBA pixels to halftoned monochrome bitmaps, in
//!   raster (`GS v 0`) or column (`ESC *`) addressing mode
//! - **Assembly**: one immutable output buffer plus an optional PNG preview
//! - **Flow control**: chunked, confirmation-gated delivery that follows
//!   MTU renegotiation mid-transfer
//!
//! ## Quick Start
//!
//! ```no_run
//! use candela::{
//!     assemble::assemble,
//!     instruction::{PrintJob, StyleAttributes},
//!     printer::PrinterConfig,
//!     protocol::text::{Alignment, FontSize},
//!     transport::{self, Transport, TransferSession},
//! };
//!
//! # async fn print(link: &mut dyn Transport) -> Result<(), candela::CandelaError> {
//! let config = PrinterConfig::GENERIC_58MM;
//!
//! // Describe the job
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
//!
//! // Render it to the final device buffer
//! let result = assemble(&job, &config)?;
//!
//! // Stream it out, one confirmed chunk at a time
//! let mut session = TransferSession::new(config.default_max_payload)?;
//! transport::send(&mut session, link, result.data).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`render`] | Halftone dithering and bitmap packing |
//! | [`instruction`] | Print job model and text encoder |
//! | [`assemble`] | Buffer assembly and PNG preview |
//! | [`transport`] | Chunked flow control over a confirmed write pipe |
//! | [`printer`] | Printer capability presets |
//! | [`error`] | Error types |
//!
//! ## Scope
//!
//! The Bluetooth adapter itself (scanning, pairing, GATT discovery, MTU
//! negotiation) is platform code behind the [`transport::Transport`] trait
//! and the [`transport::ConnectionWatch`] observable; everything in this
//! crate is hardware-free and unit-testable.

pub mod assemble;
pub mod error;
pub mod instruction;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use assemble::PrintDataResult;
pub use error::CandelaError;
pub use instruction::PrintJob;
pub use printer::PrinterConfig;
