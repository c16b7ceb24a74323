//! One transfer function per [`BlendMode`](crate::BlendMode).
//!
//! Each takes the source batch `s` and the destination batch `d` and returns the composited batch.
//! All of them are pure and operate on premultiplied channels.
//!
//! Modes whose alpha and color share one formula use the cheaper `approx_mul_div255` where it
//! fits; any rounding bias then lands on alpha and color alike. HardLight, Overlay, Darken and
//! Lighten compute alpha and color differently, so they use exact `div255` throughout to keep
//! color <= alpha.

use crate::lanes::Px4;

/// Signature shared by every transfer function.
pub type XferFn = fn(Px4, Px4) -> Px4;

/// `0`
pub fn clear(_s: Px4, _d: Px4) -> Px4 {
    Px4::dup_pm_color([0; 4])
}

/// `S`
pub fn src(s: Px4, _d: Px4) -> Px4 {
    s
}

/// `D`
pub fn dst(_s: Px4, d: Px4) -> Px4 {
    d
}

/// `S * Da`
pub fn src_in(s: Px4, d: Px4) -> Px4 {
    s.approx_mul_div255(d.alphas())
}

/// `S * (1 - Da)`
pub fn src_out(s: Px4, d: Px4) -> Px4 {
    s.approx_mul_div255(d.alphas().inv())
}

/// `S + D * (1 - Sa)`
pub fn src_over(s: Px4, d: Px4) -> Px4 {
    s + d.approx_mul_div255(s.alphas().inv())
}

/// `D * Sa`
pub fn dst_in(s: Px4, d: Px4) -> Px4 {
    src_in(d, s)
}

/// `D * (1 - Sa)`
pub fn dst_out(s: Px4, d: Px4) -> Px4 {
    src_out(d, s)
}

/// `D + S * (1 - Da)`
pub fn dst_over(s: Px4, d: Px4) -> Px4 {
    src_over(d, s)
}

/// `S * Da + D * (1 - Sa)`
pub fn src_atop(s: Px4, d: Px4) -> Px4 {
    (s * d.alphas() + d * s.alphas().inv()).div255()
}

/// `D * Sa + S * (1 - Da)`
pub fn dst_atop(s: Px4, d: Px4) -> Px4 {
    src_atop(d, s)
}

/// `S * (1 - Da) + D * (1 - Sa)`
pub fn xor(s: Px4, d: Px4) -> Px4 {
    (s * d.alphas().inv() + d * s.alphas().inv()).div255()
}

/// `S + D`, clamped.
pub fn plus(s: Px4, d: Px4) -> Px4 {
    s.saturating_add(d)
}

/// `S * D`
pub fn modulate(s: Px4, d: Px4) -> Px4 {
    s.approx_mul_div255(d)
}

/// `S + D - S * D`, evaluated as `S + (1 - S) * D` so nothing leaves 8 bits.
pub fn screen(s: Px4, d: Px4) -> Px4 {
    s + d.approx_mul_div255(s.inv())
}

/// `S * (1 - Da) + D * (1 - Sa) + S * D`
pub fn multiply(s: Px4, d: Px4) -> Px4 {
    (s * d.alphas().inv() + d * s.alphas().inv() + s * d).div255()
}

/// `Sa + Da - Sa * Da`, `Sc + Dc - 2 * min(Sc * Da, Dc * Sa)`.
pub fn difference(s: Px4, d: Px4) -> Px4 {
    let m = (s * d.alphas()).min(d * s.alphas()).div255();
    // m <= s and m <= d lane-wise; subtracting before adding keeps every step in range.
    (s - m) + (d - m.zero_alphas())
}

/// `Sa + Da - Sa * Da`, `Sc + Dc - 2 * Sc * Dc`.
pub fn exclusion(s: Px4, d: Px4) -> Px4 {
    let p = s.approx_mul_div255(d);
    (s - p) + (d - p.zero_alphas())
}

/// Alpha as SrcOver. Color is `S * (1 - Da) + D * (1 - Sa)` plus `2 * S * D` where `2 * S <= Sa`,
/// otherwise `Sa * Da - 2 * (Da - D) * (Sa - S)`.
pub fn hard_light(s: Px4, d: Px4) -> Px4 {
    let sa = s.alphas();
    let da = d.alphas();

    let srcover = s + (d * sa.inv()).div255();

    let is_lite = (sa - s).lt(s).widen();

    let lite = sa * da - (((da - d) * (sa - s)) << 1);
    let dark = (s * d) << 1;
    let both = s * da.inv() + d * sa.inv();

    let colors = (both + is_lite.then_else(lite, dark)).div255();
    srcover.zero_colors() + colors.zero_alphas()
}

/// HardLight with the operands swapped.
pub fn overlay(s: Px4, d: Px4) -> Px4 {
    hard_light(d, s)
}

/// Alpha as SrcOver. Color from SrcOver where `S * Da < D * Sa`, else from DstOver.
pub fn darken(s: Px4, d: Px4) -> Px4 {
    let (sda, dsa, srcover, dstover) = darken_lighten_terms(s, d);
    let colors = sda.lt(dsa).then_else(srcover, dstover);
    srcover.zero_colors() + colors.zero_alphas()
}

/// Alpha as SrcOver. Color from SrcOver where `D * Sa < S * Da`, else from DstOver.
pub fn lighten(s: Px4, d: Px4) -> Px4 {
    let (sda, dsa, srcover, dstover) = darken_lighten_terms(s, d);
    let colors = dsa.lt(sda).then_else(srcover, dstover);
    srcover.zero_colors() + colors.zero_alphas()
}

/// `(S * Da, D * Sa, SrcOver, DstOver)`, all with exact division.
fn darken_lighten_terms(s: Px4, d: Px4) -> (Px4, Px4, Px4, Px4) {
    let sa = s.alphas();
    let da = d.alphas();

    let sda = (s * da).div255();
    let dsa = (d * sa).div255();

    let srcover = s + (d * sa.inv()).div255();
    let dstover = d + (s * da.inv()).div255();
    (sda, dsa, srcover, dstover)
}

#[cfg(test)]
#[path = "../../tests/unit/xfer/formulas.rs"]
mod tests;
