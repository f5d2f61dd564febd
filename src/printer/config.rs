//! # Printer Configuration
//!
//! This module defines hardware capabilities for the supported thermal
//! printers.
//!
//! ## Supported Printers
//!
//! | Preset | Width (dots) | Paper | Graphics |
//! |--------|--------------|-------|----------|
//! | GENERIC_58MM | 384 | 58mm | Raster (GS v 0) |
//! | GENERIC_58MM_LEGACY | 384 | 58mm | Column (ESC *) |
//! | GENERIC_80MM | 576 | 80mm | Raster (GS v 0) |
//!
//! The legacy preset covers the older 58mm mechanisms that ignore `GS v 0`
//! entirely; the rasterizer falls back to 24-pin column bands for them.
//!
//! ## Usage
//!
//! ```
//! use candela::printer::PrinterConfig;
//!
//! let config = PrinterConfig::GENERIC_58MM;
//! assert_eq!(config.width_dots, 384);
//! assert_eq!(config.width_bytes(), 48);
//! ```

use crate::protocol::graphics::GraphicsMode;

/// Hardware characteristics of one thermal printer model.
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Whether the firmware understands raster mode (GS v 0). When false,
    /// graphics are sent as ESC * column bands.
    pub supports_raster: bool,

    /// Write payload size to assume before MTU negotiation completes.
    /// 20 bytes = default BLE ATT MTU (23) minus the 3-byte ATT header.
    pub default_max_payload: usize,

    /// Blank lines fed after the job so the print clears the tear bar.
    pub tear_feed_lines: u8,
}

impl PrinterConfig {
    /// Common 58mm (384-dot) Bluetooth receipt printer with raster support.
    pub const GENERIC_58MM: Self = Self {
        name: "Generic 58mm",
        width_dots: 384,
        supports_raster: true,
        default_max_payload: 20,
        tear_feed_lines: 4,
    };

    /// Older 58mm mechanism without raster support (column bands only).
    pub const GENERIC_58MM_LEGACY: Self = Self {
        name: "Generic 58mm (column mode)",
        width_dots: 384,
        supports_raster: false,
        default_max_payload: 20,
        tear_feed_lines: 4,
    };

    /// Common 80mm (576-dot) Bluetooth receipt printer.
    pub const GENERIC_80MM: Self = Self {
        name: "Generic 80mm",
        width_dots: 576,
        supports_raster: true,
        default_max_payload: 20,
        tear_feed_lines: 4,
    };

    /// Print width in bytes: `width_dots / 8`.
    #[inline]
    pub fn width_bytes(&self) -> u16 {
        self.width_dots.div_ceil(8)
    }

    /// Addressing mode to use for this device's graphics.
    #[inline]
    pub fn graphics_mode(&self) -> GraphicsMode {
        if self.supports_raster {
            GraphicsMode::Raster
        } else {
            GraphicsMode::Column
        }
    }
}
