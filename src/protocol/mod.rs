//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS command
//! subset spoken by generic Bluetooth thermal receipt printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, line feed, helpers)
//! - [`text`]: Text styling (alignment, size, bold, underline)
//! - [`graphics`]: Bitmap commands in raster and column addressing modes
//!
//! ## Usage Example
//!
//! ```
//! use candela::protocol::{commands, text};
//! use candela::protocol::text::Alignment;
//!
//! // Build a simple print sequence by hand
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(Alignment::Center));
//! data.extend(text::bold(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold(false));
//! assert_eq!(&data[0..2], &[0x1B, 0x40]);
//! ```
//!
//! Most callers should not build sequences by hand: the
//! [`instruction`](crate::instruction) encoder and the
//! [`assemble`](crate::assemble) module do the bookkeeping (style tracking,
//! fixed block order, single allocation).

pub mod commands;
pub mod graphics;
pub mod text;
