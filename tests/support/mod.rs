#![allow(dead_code)]

use quickcheck::{Arbitrary, Gen};
use xfermode::{BlendMode, DispatchOpts, PremulRgba8, Processor};

/// A valid premultiplied pixel: every color channel <= alpha.
#[derive(Clone, Copy, Debug)]
pub struct Premul(pub PremulRgba8);

impl Arbitrary for Premul {
    fn arbitrary(g: &mut Gen) -> Self {
        let a = u8::arbitrary(g);
        let mut channel = || (u16::from(u8::arbitrary(g)) % (u16::from(a) + 1)) as u8;
        Premul([channel(), channel(), channel(), a])
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let [r, g, b, a] = self.0;
        Box::new(
            (r, g, b, a)
                .shrink()
                .map(|(r, g, b, a)| Premul([r.min(a), g.min(a), b.min(a), a])),
        )
    }
}

pub fn opts() -> DispatchOpts {
    DispatchOpts::default().with_legacy_non_separable_modes(false)
}

/// Every mode that binds on this build.
pub fn processors() -> Vec<Processor> {
    BlendMode::ALL
        .into_iter()
        .filter_map(|m| xfermode::dispatch(m, &opts()))
        .collect()
}

pub fn processor(mode: BlendMode) -> Option<Processor> {
    xfermode::dispatch(mode, &opts())
}

pub fn split(pixels: &[(Premul, Premul, u8)]) -> (Vec<PremulRgba8>, Vec<PremulRgba8>, Vec<u8>) {
    let src = pixels.iter().map(|p| p.0.0).collect();
    let dst = pixels.iter().map(|p| p.1.0).collect();
    let aa = pixels.iter().map(|p| p.2).collect();
    (src, dst, aa)
}

/// Run `p` over copies of `dst` and return the result.
pub fn run(
    p: &Processor,
    dst: &[PremulRgba8],
    src: &[PremulRgba8],
    aa: Option<&[u8]>,
) -> Vec<PremulRgba8> {
    let mut out = dst.to_vec();
    p.process(&mut out, src, aa).unwrap();
    out
}
