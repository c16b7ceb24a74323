//! Four premultiplied pixels held side by side for lane-parallel fixed-point arithmetic.
//!
//! Every operation acts on the 16 channel lanes independently; nothing here looks across pixels
//! except [`Px4::alphas`], which only reads within a pixel.

use std::ops::{Add, Mul, Shl, Sub};

use crate::foundation::core::{ALPHA, PremulRgba8};
use crate::foundation::math;

/// Pixels per batch.
pub const PIXELS: usize = 4;
/// Channel lanes per batch.
pub const LANES: usize = PIXELS * 4;

const COLOR_MASK: [u8; LANES] = lane_mask(false);
const ALPHA_MASK: [u8; LANES] = lane_mask(true);

const fn lane_mask(alpha: bool) -> [u8; LANES] {
    let mut m = [0u8; LANES];
    let mut i = 0;
    while i < LANES {
        if (i % 4 == ALPHA) == alpha {
            m[i] = 0xff;
        }
        i += 1;
    }
    m
}

/// Four pixels, 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Px4([u8; LANES]);

/// Four pixels, 16 bits per channel. Holds products of two 8-bit lanes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Px4Wide([u16; LANES]);

/// Per-lane all-ones / all-zeros mask over a [`Px4`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Px4Mask([u8; LANES]);

/// [`Px4Mask`] widened to 16-bit lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Px4WideMask([u16; LANES]);

impl Px4 {
    /// Every lane set to `v`.
    pub fn splat(v: u8) -> Self {
        Self([v; LANES])
    }

    /// The same pixel repeated four times.
    pub fn dup_pm_color(px: PremulRgba8) -> Self {
        Self::from_pixels([px; PIXELS])
    }

    /// Pack four pixels.
    pub fn from_pixels(pixels: [PremulRgba8; PIXELS]) -> Self {
        Self(std::array::from_fn(|i| pixels[i / 4][i % 4]))
    }

    /// Load up to four pixels; missing pixels read as transparent black.
    pub fn load(pixels: &[PremulRgba8]) -> Self {
        debug_assert!(pixels.len() <= PIXELS);
        let mut out = [0u8; LANES];
        for (lanes, px) in out.chunks_exact_mut(4).zip(pixels) {
            lanes.copy_from_slice(px);
        }
        Self(out)
    }

    /// Load up to four coverage values, each broadcast over its pixel's four channels.
    ///
    /// Missing values read as zero coverage.
    pub fn load_coverage(aa: &[u8]) -> Self {
        debug_assert!(aa.len() <= PIXELS);
        let mut out = [0u8; LANES];
        for (lanes, &c) in out.chunks_exact_mut(4).zip(aa) {
            lanes.fill(c);
        }
        Self(out)
    }

    /// Write the first `min(pixels.len(), 4)` pixels.
    pub fn store(self, pixels: &mut [PremulRgba8]) {
        for (px, lanes) in pixels.iter_mut().zip(self.0.chunks_exact(4)) {
            px.copy_from_slice(lanes);
        }
    }

    /// Unpack into four pixels.
    pub fn to_pixels(self) -> [PremulRgba8; PIXELS] {
        std::array::from_fn(|p| std::array::from_fn(|c| self.0[p * 4 + c]))
    }

    /// Each pixel's alpha broadcast into all four of its channels.
    pub fn alphas(self) -> Self {
        Self(std::array::from_fn(|i| self.0[i - i % 4 + ALPHA]))
    }

    /// `255 - x` per lane.
    pub fn inv(self) -> Self {
        self.map(|x| 255 - x)
    }

    /// Alpha lanes cleared, color lanes kept.
    pub fn zero_alphas(self) -> Self {
        self.and(COLOR_MASK)
    }

    /// Color lanes cleared, alpha lanes kept.
    pub fn zero_colors(self) -> Self {
        self.and(ALPHA_MASK)
    }

    /// Clamping 8-bit addition.
    pub fn saturating_add(self, o: Self) -> Self {
        self.zip(o, u8::saturating_add)
    }

    /// `(x * y + x) >> 8` per lane; exact when either side is 0 or 255.
    pub fn approx_mul_div255(self, o: Self) -> Self {
        self.zip(o, math::approx_mul_div255)
    }

    /// Per-lane `self < o`.
    pub fn lt(self, o: Self) -> Px4Mask {
        Px4Mask(std::array::from_fn(|i| {
            0u8.wrapping_sub(u8::from(self.0[i] < o.0[i]))
        }))
    }

    fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Self(self.0.map(f))
    }

    fn zip(self, o: Self, f: impl Fn(u8, u8) -> u8) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], o.0[i])))
    }

    fn and(self, mask: [u8; LANES]) -> Self {
        Self(std::array::from_fn(|i| self.0[i] & mask[i]))
    }
}

impl Add for Px4 {
    type Output = Self;

    fn add(self, o: Self) -> Self {
        self.saturating_add(o)
    }
}

impl Sub for Px4 {
    type Output = Self;

    fn sub(self, o: Self) -> Self {
        self.zip(o, u8::saturating_sub)
    }
}

impl Mul for Px4 {
    type Output = Px4Wide;

    fn mul(self, o: Self) -> Px4Wide {
        Px4Wide(std::array::from_fn(|i| {
            u16::from(self.0[i]) * u16::from(o.0[i])
        }))
    }
}

impl Px4Wide {
    /// Per-lane minimum.
    pub fn min(self, o: Self) -> Self {
        self.zip(o, u16::min)
    }

    /// Exact rounding divide-by-255, narrowed back to 8 bits.
    pub fn div255(self) -> Px4 {
        Px4(self.0.map(math::div255))
    }

    fn zip(self, o: Self, f: impl Fn(u16, u16) -> u16) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], o.0[i])))
    }
}

// Wide lanes wrap. HardLight computes both branches for every lane, and the unselected one may underflow.
impl Add for Px4Wide {
    type Output = Self;

    fn add(self, o: Self) -> Self {
        self.zip(o, u16::wrapping_add)
    }
}

impl Sub for Px4Wide {
    type Output = Self;

    fn sub(self, o: Self) -> Self {
        self.zip(o, u16::wrapping_sub)
    }
}

impl Shl<u32> for Px4Wide {
    type Output = Self;

    fn shl(self, n: u32) -> Self {
        Self(self.0.map(|x| x.wrapping_shl(n)))
    }
}

impl Px4Mask {
    /// Lanes of `a` where the mask is set, lanes of `b` elsewhere.
    pub fn then_else(self, a: Px4, b: Px4) -> Px4 {
        Px4(std::array::from_fn(|i| {
            (a.0[i] & self.0[i]) | (b.0[i] & !self.0[i])
        }))
    }

    /// Stretch each lane to 16 bits.
    pub fn widen(self) -> Px4WideMask {
        Px4WideMask(self.0.map(|m| u16::from(m) * 0x0101))
    }
}

impl Px4WideMask {
    /// Lanes of `a` where the mask is set, lanes of `b` elsewhere.
    pub fn then_else(self, a: Px4Wide, b: Px4Wide) -> Px4Wide {
        Px4Wide(std::array::from_fn(|i| {
            (a.0[i] & self.0[i]) | (b.0[i] & !self.0[i])
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lanes/px4.rs"]
mod tests;
