//! Scalar fixed-point helpers shared by the lane primitive and the pixel conversions.

/// Rounding divide-by-255 of a 16-bit product, narrowed to 8 bits.
///
/// Exact for every `x <= 255 * 255`. Larger inputs saturate at 255.
#[inline(always)]
pub(crate) fn div255(x: u16) -> u8 {
    let y = u32::from(x) + 128;
    ((y + (y >> 8)) >> 8).min(255) as u8
}

/// `(x * y + x) >> 8`: cheap stand-in for `x * y / 255`.
///
/// Exact when either operand is 0 or 255, and never larger than either operand.
#[inline(always)]
pub(crate) fn approx_mul_div255(x: u8, y: u8) -> u8 {
    let x = u16::from(x);
    ((x * u16::from(y) + x) >> 8) as u8
}

/// Exact rounded `x * y / 255`.
#[inline(always)]
pub(crate) fn mul_div255(x: u8, y: u8) -> u8 {
    div255(u16::from(x) * u16::from(y))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
