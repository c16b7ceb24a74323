//! Anti-aliasing: blend a transfer result back against the destination by per-pixel coverage.

use crate::lanes::Px4;

/// Signature of a coverage-aware transfer: `(s, d, aa) -> out`.
pub type AaFn = fn(Px4, Px4, Px4) -> Px4;

/// Default rule: apply the mode, then lerp toward the untouched destination.
///
/// `blended * aa + d * (1 - aa)`. Coverage 0 returns `d` exactly and coverage 255 returns
/// `blended` exactly.
pub fn lerp_aa(blended: Px4, d: Px4, aa: Px4) -> Px4 {
    (blended * aa + d * aa.inv()).div255()
}

/// Plus clamps, so coverage has to scale the source before the add: `clamp(D + aa * S)`.
pub fn plus_aa(s: Px4, d: Px4, aa: Px4) -> Px4 {
    d.saturating_add(s.approx_mul_div255(aa))
}
