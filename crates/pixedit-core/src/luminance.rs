//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! The 8-bit path uses 14-bit fixed-point weights that sum to exactly
//! `1 << 14`, so a pixel whose channels are already equal maps to itself.

const FIXED_SHIFT: u32 = 14;
/// 0.299, 0.587 and 0.114 scaled by `1 << 14`.
const FIXED_R: u32 = 4899;
const FIXED_G: u32 = 9617;
const FIXED_B: u32 = 1868;

/// Calculate luma from u8 RGB values, rounded to nearest.
#[inline]
pub fn calculate_luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let weighted = FIXED_R * r as u32 + FIXED_G * g as u32 + FIXED_B * b as u32;
    ((weighted + (1 << (FIXED_SHIFT - 1))) >> FIXED_SHIFT) as u8
}
