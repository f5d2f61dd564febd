//! # Cyclic Halftone Dithering
//!
//! This module converts continuous-tone RGBA pixels to the binary
//! (black/white) bitmap a thermal head can print, using a cheap ordered
//! halftone with a cycling threshold.
//!
//! ## What is Dithering?
//!
//! Dithering simulates grayscale on a device that can only print black or
//! white. By varying the density of black dots, we create the illusion of
//! different gray levels.
//!
//! ```text
//! Grayscale:    White    Light    Medium    Dark    Black
//!               ░░░░░░   ░░▒░░░   ░▒░▒░▒   ▒▓▒▓▒▓   ██████
//! ```
//!
//! ## The Cycling Threshold
//!
//! Instead of a stored matrix, the threshold is generated by two small
//! counters that walk through 16 dither levels:
//!
//! - A **per-pixel coefficient** advances by 5 for every pixel and wraps
//!   from above 15 back around (`>15 → -16`), so neighbouring pixels land on
//!   well-separated levels.
//! - A **line-start value** seeds the coefficient for each scanline and
//!   cycles `+2 mod 16` per row, shifting the phase so columns do not stripe.
//! - A **line offset** of `y mod 6` tilts the pattern diagonally.
//!
//! The level is scaled by a fixed gradient step of 6 per channel onto the
//! 0–765 sum-of-channels luminance scale.
//!
//! ## The Dark Floor
//!
//! A pixel whose *any single channel* falls below 160 is printed solid black
//! regardless of dither phase. Near-black input must come out solid - text
//! and line art in a photo must never be broken up by the halftone pattern.
//!
//! ## Usage Example
//!
//! ```
//! use candela::render::{dither, PixelSource};
//!
//! struct Gray50;
//! impl PixelSource for Gray50 {
//!     fn width(&self) -> u32 { 64 }
//!     fn height(&self) -> u32 { 64 }
//!     fn pixel(&self, _x: u32, _y: u32) -> [u8; 4] { [200, 200, 200, 255] }
//! }
//!
//! let bitmap = dither::dither(&Gray50)?;
//! assert_eq!(bitmap.bytes_per_line(), 8);
//! # Ok::<(), candela::error::EncodingError>(())
//! ```

use super::{MonochromeRaster, PixelSource};
use crate::error::EncodingError;

/// Number of dither levels the coefficient walks through.
pub const DITHER_LEVELS: u8 = 16;

/// Per-pixel coefficient advance. 5 is coprime with 16, so all 16 levels are
/// visited before the sequence repeats.
const COEFF_STEP: u8 = 5;

/// Line-start advance per row (mod 16).
const LINE_START_STEP: u8 = 2;

/// Threshold spacing per dither level, in luminance units per channel.
/// Applied to the 3-channel sum, one level spans 18 of the 765 total.
pub const GRADIENT_STEP: u16 = 6;

/// Any channel below this value prints solid black, bypassing the halftone.
pub const CHANNEL_FLOOR: u8 = 160;

/// Decide whether one pixel prints black.
///
/// `coeff` is the current dither coefficient (0..16), `line_offset` is
/// `y mod 6`. Black when the channel sum falls under the cycling threshold,
/// or unconditionally when any channel is under [`CHANNEL_FLOOR`].
#[inline]
fn is_black(r: u8, g: u8, b: u8, coeff: u8, line_offset: u16) -> bool {
    if r < CHANNEL_FLOOR || g < CHANNEL_FLOOR || b < CHANNEL_FLOOR {
        return true;
    }
    let luminance = r as u16 + g as u16 + b as u16;
    let threshold = (coeff as u16 + line_offset) * GRADIENT_STEP * 3;
    luminance < threshold
}

/// Composite an RGBA pixel over white paper.
///
/// Transparent regions must print as paper (white), so each channel is
/// alpha-blended against 255 before thresholding.
#[inline]
fn over_white(pixel: [u8; 4]) -> (u8, u8, u8) {
    let [r, g, b, a] = pixel;
    if a == 255 {
        return (r, g, b);
    }
    let blend = |c: u8| -> u8 {
        let c = c as u16 * a as u16 + 255 * (255 - a as u16);
        ((c + 127) / 255) as u8
    };
    (blend(r), blend(g), blend(b))
}

/// Dither a pixel source into a packed monochrome bitmap.
///
/// The output has `ceil(width/8)` bytes per line, MSB-first, 1 = printed.
/// The trailing bits of the last byte in each row stay zero when the width
/// is not a multiple of 8.
///
/// ## Errors
///
/// Rejects zero-sized sources with [`EncodingError::EmptyImage`] before any
/// byte is produced.
pub fn dither(src: &(impl PixelSource + ?Sized)) -> Result<MonochromeRaster, EncodingError> {
    let (width, height) = (src.width(), src.height());
    if width == 0 || height == 0 {
        return Err(EncodingError::EmptyImage { width, height });
    }

    let mut bitmap = MonochromeRaster::blank(width, height);
    let mut line_start: u8 = 0;

    for y in 0..height {
        let mut coeff = line_start;
        let line_offset = (y % 6) as u16;

        for x in 0..width {
            let (r, g, b) = over_white(src.pixel(x, y));
            if is_black(r, g, b, coeff, line_offset) {
                bitmap.set(x, y);
            }

            coeff += COEFF_STEP;
            if coeff > DITHER_LEVELS - 1 {
                coeff -= DITHER_LEVELS;
            }
        }

        line_start = (line_start + LINE_START_STEP) % DITHER_LEVELS;
    }

    Ok(bitmap)
}

// ============================================================================
// TESTS
// ============================================================================
