use crate::foundation::error::{XferError, XferResult};
use crate::foundation::math::mul_div255;

/// One premultiplied pixel, channel order R, G, B, A.
pub type PremulRgba8 = [u8; 4];

/// Index of the alpha channel inside a [`PremulRgba8`].
pub const ALPHA: usize = 3;

/// Convert a straight-alpha RGBA8 pixel to premultiplied form.
pub fn premultiply(straight: [u8; 4]) -> PremulRgba8 {
    let a = straight[ALPHA];
    [
        mul_div255(straight[0], a),
        mul_div255(straight[1], a),
        mul_div255(straight[2], a),
        a,
    ]
}

/// Convert a premultiplied pixel back to straight alpha.
///
/// Fully transparent pixels become all zeros. Color channels above alpha clamp to 255.
pub fn unpremultiply(p: PremulRgba8) -> [u8; 4] {
    let a = u32::from(p[ALPHA]);
    if a == 0 {
        return [0; 4];
    }
    let un = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
    [un(p[0]), un(p[1]), un(p[2]), p[ALPHA]]
}

/// `true` when no color channel exceeds alpha.
pub fn is_premultiplied(p: PremulRgba8) -> bool {
    p[..ALPHA].iter().all(|&c| c <= p[ALPHA])
}

/// Premultiply an RGBA8 byte buffer in place.
pub fn premultiply_in_place(rgba: &mut [u8]) -> XferResult<()> {
    check_rgba_len(rgba.len(), "premultiply_in_place")?;
    for px in rgba.chunks_exact_mut(4) {
        let out = premultiply([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
    Ok(())
}

/// Unpremultiply an RGBA8 byte buffer in place.
pub fn unpremultiply_in_place(rgba: &mut [u8]) -> XferResult<()> {
    check_rgba_len(rgba.len(), "unpremultiply_in_place")?;
    for px in rgba.chunks_exact_mut(4) {
        let out = unpremultiply([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
    Ok(())
}

/// Group an RGBA8 byte buffer into pixels.
pub fn pixels_from_bytes(rgba: &[u8]) -> XferResult<Vec<PremulRgba8>> {
    check_rgba_len(rgba.len(), "pixels_from_bytes")?;
    Ok(rgba
        .chunks_exact(4)
        .map(|px| [px[0], px[1], px[2], px[3]])
        .collect())
}

/// Flatten pixels back into an RGBA8 byte buffer.
pub fn pixels_to_bytes(pixels: &[PremulRgba8]) -> Vec<u8> {
    pixels.iter().flatten().copied().collect()
}

fn check_rgba_len(len: usize, what: &str) -> XferResult<()> {
    if !len.is_multiple_of(4) {
        return Err(XferError::validation(format!(
            "{what} expects an rgba8 buffer (length {len} is not a multiple of 4)"
        )));
    }
    Ok(())
}
