//! # ESC/POS Graphics Commands
//!
//! This module implements the two bitmap addressing modes supported by the
//! target printers. Which one a device understands is a hardware capability
//! (see [`crate::printer::PrinterConfig`]); the dithered bitmap fed into
//! either command is identical.
//!
//! ## Addressing Modes
//!
//! | Mode | Command | Description | Best For |
//! |------|---------|-------------|----------|
//! | Raster | GS v 0 | Row-major rows, arbitrary height | Printers with raster support |
//! | Column | ESC * 33 | 24-pin bands, column-major bytes | Older printers without GS v 0 |
//!
//! ## Bit Packing (raster rows)
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! Column mode instead sends one *vertical* byte per column per 8-pin group,
//! so the row-packed bitmap is transposed on the way out (see [`column`]).

use super::commands::{ESC, GS, LF, u16_le};
use crate::error::EncodingError;
use crate::render::MonochromeRaster;

/// Rows covered by one column-mode band (24-pin print head).
pub const BAND_HEIGHT: usize = 24;

/// Graphics addressing mode, selected by device capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphicsMode {
    /// Raster mode (GS v 0) - arbitrary height, single contiguous block.
    #[default]
    Raster,
    /// Column mode (ESC * 33) - 24-row bands for printers lacking raster
    /// support.
    Column,
}

// ============================================================================
// RASTER MODE (GS v 0)
// ============================================================================

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// Emits the whole bitmap as one contiguous command: an 8-byte header
/// followed by the packed rows in row-major order.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
/// | Decimal | 29 118 48 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: Mode (0 = normal scale)
/// - `xL, xH`: Width in **bytes**, little-endian
/// - `yL, yH`: Height in **dots**, little-endian
/// - `d1...dk`: Image data, k = width_bytes × height
///
/// ## Output Length
///
/// `8 + bytes_per_line × height` — header plus bitmap, nothing else.
///
/// ## Errors
///
/// The header's dimension fields are u16: a bitmap with more than 65535
/// rows, or wide enough that `bytes_per_line` exceeds 65535, is rejected
/// with [`EncodingError::OversizedImage`] rather than silently truncated.
///
/// ## Example
///
/// ```
/// use candela::protocol::graphics;
/// use candela::render::MonochromeRaster;
///
/// // 16x1 all-white bitmap
/// let raster = MonochromeRaster::blank(16, 1);
/// let cmd = graphics::raster(&raster).unwrap();
/// assert_eq!(cmd, vec![0x1D, 0x76, 0x30, 0x00, 2, 0, 1, 0, 0x00, 0x00]);
/// ```
pub fn raster(bitmap: &MonochromeRaster) -> Result<Vec<u8>, EncodingError> {
    if bitmap.bytes_per_line() > u16::MAX as usize || bitmap.height() > u16::MAX as u32 {
        return Err(EncodingError::OversizedImage {
            width: bitmap.width(),
            height: bitmap.height(),
        });
    }
    let [xl, xh] = u16_le(bitmap.bytes_per_line() as u16);
    let [yl, yh] = u16_le(bitmap.height() as u16);

    let mut cmd = Vec::with_capacity(8 + bitmap.rows().len());
    cmd.push(GS);
    cmd.push(b'v');
    cmd.push(b'0');
    cmd.push(0); // m = 0 (normal scale)
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd.extend_from_slice(bitmap.rows());
    Ok(cmd)
}

// ============================================================================
// COLUMN MODE (ESC *)
// ============================================================================

/// # Select 24-Dot Line Spacing (ESC 3 24)
///
/// Sets line spacing to exactly 24 dots so consecutive column-mode bands
/// butt against each other with no white gap. Emitted once before the first
/// band.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1B 33 18 |
#[inline]
pub fn set_line_spacing_24() -> Vec<u8> {
    vec![ESC, b'3', 24]
}

/// # Print Column Bit Image (ESC * 33 nL nH d1...dk)
///
/// Emits the bitmap as horizontal bands of 24 print-head pins, for printers
/// that lack `GS v 0`. The output begins with [`set_line_spacing_24`] and
/// contains `ceil(height / 24)` bands.
///
/// ## Band Layout
///
/// Each band is `ESC * 33 nL nH`, then **3 bytes per column** (24 vertical
/// dots), then a line feed that prints the band:
///
/// ```text
/// Column x, byte k (k = 0..3):
///
///   bit 7 = row band_top + 8k + 0   (topmost)
///   bit 6 = row band_top + 8k + 1
///   ...
///   bit 0 = row band_top + 8k + 7
/// ```
///
/// This is a row-to-column transpose of three 8-row groups of the packed
/// bitmap. Rows past the image height read as white, so the final band is
/// implicitly zero-padded.
///
/// ## Parameters
///
/// - `33`: mode byte (24-dot double density)
/// - `nL, nH`: width in **dots**, little-endian
///
/// ## Errors
///
/// The width field is u16: a bitmap wider than 65535 dots is rejected with
/// [`EncodingError::OversizedImage`]. Height has no field here (it is
/// carried by the band structure), so it is unbounded.
pub fn column(bitmap: &MonochromeRaster) -> Result<Vec<u8>, EncodingError> {
    if bitmap.width() > u16::MAX as u32 {
        return Err(EncodingError::OversizedImage {
            width: bitmap.width(),
            height: bitmap.height(),
        });
    }
    let width = bitmap.width() as usize;
    let height = bitmap.height() as usize;
    let bands = height.div_ceil(BAND_HEIGHT);
    let [nl, nh] = u16_le(bitmap.width() as u16);

    // 3 bytes spacing command, then per band: 5 header + 3*width data + LF
    let mut cmd = Vec::with_capacity(3 + bands * (5 + 3 * width + 1));
    cmd.extend(set_line_spacing_24());

    for band in 0..bands {
        let band_top = band * BAND_HEIGHT;

        cmd.push(ESC);
        cmd.push(b'*');
        cmd.push(33);
        cmd.push(nl);
        cmd.push(nh);

        for x in 0..width {
            for group in 0..3 {
                let mut byte = 0u8;
                for bit in 0..8 {
                    let y = band_top + group * 8 + bit;
                    if y < height && bitmap.get(x as u32, y as u32) {
                        byte |= 1 << (7 - bit);
                    }
                }
                cmd.push(byte);
            }
        }

        cmd.push(LF);
    }

    Ok(cmd)
}

// ============================================================================
// TESTS
// ============================================================================
