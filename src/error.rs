//! # Error Types
//!
//! This module defines error types used throughout the candela library.
//!
//! The taxonomy follows the pipeline stages:
//!
//! - [`EncodingError`]: bad input to the encoder/rasterizer. Fails fast and
//!   synchronously, before any transport activity.
//! - [`TransferError`]: a chunked transfer went wrong. Surfaced through the
//!   session's `Failed` state; never retried automatically.
//! - [`DeviceError`]: adapter/scan conditions owned by the platform layer,
//!   consumed here only to gate whether a transfer may start.

use thiserror::Error;

/// Invalid print input, detected before any byte is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Font size multiplier outside the printer's supported 1..=8 range.
    #[error("unsupported size multiplier: {width}x{height} (must be 1..=8)")]
    UnsupportedSize { width: u8, height: u8 },

    /// Image with zero width or height.
    #[error("image dimensions must be positive, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// Image too large for the command's u16 dimension fields.
    #[error("image exceeds addressable size: {width}x{height}")]
    OversizedImage { width: u32, height: u32 },
}

/// A chunked transfer failed or was driven incorrectly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    /// The underlying characteristic write reported failure.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// The connection dropped mid-transfer.
    #[error("disconnected during transfer")]
    Disconnected,

    /// `begin` was called while a session was already sending.
    #[error("transfer already in progress")]
    AlreadySending,

    /// `begin` was called on a failed session. Failed sessions are
    /// discarded, never restarted.
    #[error("session has failed and cannot be reused")]
    SessionFailed,

    /// A confirmation arrived with no chunk in flight (duplicate or
    /// out-of-order event). Treated as a programming error: the session fails.
    #[error("unexpected write confirmation: no chunk in flight")]
    UnexpectedConfirmation,

    /// Maximum payload size must be at least 1 byte.
    #[error("invalid max payload size: {0}")]
    InvalidPayloadSize(usize),
}

/// Conditions owned by the platform adapter (Bluetooth stack).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeviceError {
    /// No target printer discovered within the scan window.
    #[error("printer not found within scan window")]
    NotFound,

    /// The adapter is disabled or permission is missing.
    #[error("bluetooth adapter unavailable: {0}")]
    AdapterUnavailable(String),

    /// The connection is not in a state that accepts writes.
    #[error("device not ready: current state is {0}")]
    NotReady(String),
}

/// Main error type for candela operations.
#[derive(Debug, Error)]
pub enum CandelaError {
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Image decode/encode error (preview generation, CLI image loading).
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error wrapper.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
