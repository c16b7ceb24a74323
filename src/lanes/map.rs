//! Walk pixel arrays in [`Px4`] batches.
//!
//! Callers validate slice lengths; these only `debug_assert!` them.

use crate::foundation::core::PremulRgba8;
use crate::lanes::px4::{PIXELS, Px4};

/// `dst[i] = f(dst[i], src[i])`, four pixels at a time.
///
/// A trailing partial batch is zero-padded and only the real pixels are written back.
pub fn map_dst_src<F>(dst: &mut [PremulRgba8], src: &[PremulRgba8], f: F)
where
    F: Fn(Px4, Px4) -> Px4,
{
    debug_assert_eq!(dst.len(), src.len());
    let body = dst.len() - dst.len() % PIXELS;
    let (dst_body, dst_tail) = dst.split_at_mut(body);
    let (src_body, src_tail) = src.split_at(body);

    for (d, s) in dst_body
        .chunks_exact_mut(PIXELS)
        .zip(src_body.chunks_exact(PIXELS))
    {
        f(Px4::load(d), Px4::load(s)).store(d);
    }
    if !dst_tail.is_empty() {
        f(Px4::load(dst_tail), Px4::load(src_tail)).store(dst_tail);
    }
}

/// `dst[i] = f(dst[i], src[i], aa[i])`, four pixels at a time, with coverage broadcast per pixel.
pub fn map_dst_src_aa<F>(dst: &mut [PremulRgba8], src: &[PremulRgba8], aa: &[u8], f: F)
where
    F: Fn(Px4, Px4, Px4) -> Px4,
{
    debug_assert_eq!(dst.len(), src.len());
    debug_assert_eq!(dst.len(), aa.len());
    let body = dst.len() - dst.len() % PIXELS;
    let (dst_body, dst_tail) = dst.split_at_mut(body);
    let (src_body, src_tail) = src.split_at(body);
    let (aa_body, aa_tail) = aa.split_at(body);

    for ((d, s), a) in dst_body
        .chunks_exact_mut(PIXELS)
        .zip(src_body.chunks_exact(PIXELS))
        .zip(aa_body.chunks_exact(PIXELS))
    {
        f(Px4::load(d), Px4::load(s), Px4::load_coverage(a)).store(d);
    }
    if !dst_tail.is_empty() {
        f(
            Px4::load(dst_tail),
            Px4::load(src_tail),
            Px4::load_coverage(aa_tail),
        )
        .store(dst_tail);
    }
}
