//! # ESC/POS Text Styling Commands
//!
//! This module implements text formatting commands for ESC/POS printers.
//!
//! ## Text Styling Overview
//!
//! The styles supported by the target printers can be combined freely:
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | Underlined text |
//! | Size | GS ! n | Width/height multipliers |
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```
//!
//! Style state persists on the printer until explicitly changed or the
//! printer is re-initialized with ESC @. The instruction encoder relies on
//! this: it emits a style command only when the style actually changes.

use super::commands::{ESC, GS};
use crate::error::EncodingError;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Set Text Alignment (ESC a n)
///
/// Sets the alignment for subsequent text lines.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// ## Parameters
///
/// - `n = 0`: Left alignment (default)
/// - `n = 1`: Center alignment
/// - `n = 2`: Right alignment
///
/// ## Example
///
/// ```
/// use candela::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// FONT SIZE
// ============================================================================

/// Character size, an ordered enumeration from normal to largest.
///
/// Each step multiplies both character width and height. `Custom` exposes
/// the raw per-axis multipliers for callers that need asymmetric sizes;
/// the printer accepts multipliers 1 through 8 per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    /// 1x1 (default)
    #[default]
    Normal,
    /// 2x2
    Large,
    /// 3x3
    Large2,
    /// 4x4
    Large3,
    /// Arbitrary width/height multipliers, each 1..=8.
    Custom { width: u8, height: u8 },
}

impl FontSize {
    /// Width/height multipliers for this size.
    pub fn multipliers(self) -> (u8, u8) {
        match self {
            FontSize::Normal => (1, 1),
            FontSize::Large => (2, 2),
            FontSize::Large2 => (3, 3),
            FontSize::Large3 => (4, 4),
            FontSize::Custom { width, height } => (width, height),
        }
    }
}

/// # Select Character Size (GS ! n)
///
/// Sets width and height multipliers for subsequent text.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS ! n |
/// | Hex     | 1D 21 n |
/// | Decimal | 29 33 n |
///
/// ## Parameter Encoding
///
/// `n` packs both multipliers into one byte:
///
/// ```text
/// n = (width_mult - 1) << 4 | (height_mult - 1)
///
/// 1x1 -> 0x00    2x2 -> 0x11    3x3 -> 0x22    4x4 -> 0x33
/// ```
///
/// ## Errors
///
/// Returns [`EncodingError::UnsupportedSize`] for a `Custom` multiplier
/// outside 1..=8. This is the encoder's only unencodable-input case and is
/// reported synchronously, before any byte reaches the transport.
///
/// ## Example
///
/// ```
/// use candela::protocol::text::{size, FontSize};
///
/// assert_eq!(size(FontSize::Large).unwrap(), vec![0x1D, 0x21, 0x11]);
/// assert!(size(FontSize::Custom { width: 9, height: 1 }).is_err());
/// ```
pub fn size(font_size: FontSize) -> Result<Vec<u8>, EncodingError> {
    let (width, height) = font_size.multipliers();
    if !(1..=8).contains(&width) || !(1..=8).contains(&height) {
        return Err(EncodingError::UnsupportedSize { width, height });
    }
    let n = ((width - 1) << 4) | (height - 1);
    Ok(vec![GS, b'!', n])
}

// ============================================================================
// BOLD / UNDERLINE
// ============================================================================

/// # Emphasis On/Off (ESC E n)
///
/// `n = 1` enables bold, `n = 0` disables it.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1B 45 n |
pub fn bold(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', enabled as u8]
}

/// # Underline On/Off (ESC - n)
///
/// `n = 1` enables single-dot underline, `n = 0` disables it.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1B 2D n |
pub fn underline(enabled: bool) -> Vec<u8> {
    vec![ESC, b'-', enabled as u8]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_bytes() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_size_presets() {
        assert_eq!(size(FontSize::Normal).unwrap(), vec![0x1D, 0x21, 0x00]);
        assert_eq!(size(FontSize::Large).unwrap(), vec![0x1D, 0x21, 0x11]);
        assert_eq!(size(FontSize::Large2).unwrap(), vec![0x1D, 0x21, 0x22]);
        assert_eq!(size(FontSize::Large3).unwrap(), vec![0x1D, 0x21, 0x33]);
    }

    #[test]
    fn test_size_custom() {
        // 2x wide, 1x tall
        assert_eq!(
            size(FontSize::Custom { width: 2, height: 1 }).unwrap(),
            vec![0x1D, 0x21, 0x10]
        );
        // Max supported
        assert_eq!(
            size(FontSize::Custom { width: 8, height: 8 }).unwrap(),
            vec![0x1D, 0x21, 0x77]
        );
    }

    #[test]
    fn test_size_rejects_out_of_range() {
        assert_eq!(
            size(FontSize::Custom { width: 0, height: 1 }),
            Err(EncodingError::UnsupportedSize { width: 0, height: 1 })
        );
        assert_eq!(
            size(FontSize::Custom { width: 1, height: 9 }),
            Err(EncodingError::UnsupportedSize { width: 1, height: 9 })
        );
    }

    #[test]
    fn test_bold_underline() {
        assert_eq!(bold(true), vec![0x1B, 0x45, 0x01]);
        assert_eq!(bold(false), vec![0x1B, 0x45, 0x00]);
        assert_eq!(underline(true), vec![0x1B, 0x2D, 0x01]);
        assert_eq!(underline(false), vec![0x1B, 0x2D, 0x00]);
    }
}
