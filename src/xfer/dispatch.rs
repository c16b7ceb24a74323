//! Bind a [`BlendMode`] to its batched [`Processor`] and run it over pixel slices.

use std::sync::OnceLock;

use rayon::prelude::*;

use crate::foundation::core::PremulRgba8;
use crate::foundation::error::{XferError, XferResult};
use crate::lanes::{PIXELS, Px4, map_dst_src, map_dst_src_aa};
use crate::xfer::coverage::{self, AaFn};
use crate::xfer::formulas::{self, XferFn};
use crate::xfer::mode::BlendMode;
use crate::xfer::opts::DispatchOpts;

/// One row of the dispatch table. `aa_override: None` means the generic [`coverage::lerp_aa`].
#[derive(Clone, Copy, Debug)]
struct XferEntry {
    mode: BlendMode,
    xfer: XferFn,
    aa_override: Option<AaFn>,
}

const fn entry(mode: BlendMode, xfer: XferFn) -> XferEntry {
    XferEntry {
        mode,
        xfer,
        aa_override: None,
    }
}

const fn entry_aa(mode: BlendMode, xfer: XferFn, aa: AaFn) -> XferEntry {
    XferEntry {
        mode,
        xfer,
        aa_override: Some(aa),
    }
}

// Indexed by `BlendMode::index()`.
static XFERMODES: [XferEntry; BlendMode::COUNT] = [
    entry(BlendMode::Clear, formulas::clear),
    entry(BlendMode::Src, formulas::src),
    entry(BlendMode::Dst, formulas::dst),
    entry(BlendMode::SrcOver, formulas::src_over),
    entry(BlendMode::DstOver, formulas::dst_over),
    entry(BlendMode::SrcIn, formulas::src_in),
    entry(BlendMode::DstIn, formulas::dst_in),
    entry(BlendMode::SrcOut, formulas::src_out),
    entry(BlendMode::DstOut, formulas::dst_out),
    entry(BlendMode::SrcATop, formulas::src_atop),
    entry(BlendMode::DstATop, formulas::dst_atop),
    entry(BlendMode::Xor, formulas::xor),
    entry_aa(BlendMode::Plus, formulas::plus, coverage::plus_aa),
    entry(BlendMode::Modulate, formulas::modulate),
    entry(BlendMode::Screen, formulas::screen),
    entry(BlendMode::Multiply, formulas::multiply),
    entry(BlendMode::Difference, formulas::difference),
    entry(BlendMode::Exclusion, formulas::exclusion),
    entry(BlendMode::HardLight, formulas::hard_light),
    entry(BlendMode::Overlay, formulas::overlay),
    entry(BlendMode::Darken, formulas::darken),
    entry(BlendMode::Lighten, formulas::lighten),
];

/// Whether this build can run the batched kernels at all.
///
/// Decided once per process. 32-bit ARM without NEON reports `false`.
pub fn platform_supports_batched() -> bool {
    static CAPABLE: OnceLock<bool> = OnceLock::new();
    *CAPABLE.get_or_init(|| {
        let capable = cfg!(any(not(target_arch = "arm"), target_feature = "neon"));
        tracing::debug!(
            capable,
            arch = std::env::consts::ARCH,
            "batched xfermode capability"
        );
        capable
    })
}

/// Bind `mode` to a batched [`Processor`].
///
/// `None` means unsupported: the caller should use its scalar implementation for this mode.
pub fn dispatch(mode: BlendMode, opts: &DispatchOpts) -> Option<Processor> {
    if !platform_supports_batched() {
        tracing::debug!(%mode, "no batched xfermodes on this platform");
        return None;
    }
    if opts.legacy_non_separable_modes && mode.is_non_separable() {
        tracing::debug!(%mode, "batched non-separable mode withheld by legacy option");
        return None;
    }
    let entry = XFERMODES[mode.index()];
    debug_assert_eq!(entry.mode, mode);
    Some(Processor { entry })
}

/// `true` when [`dispatch`] would return a processor.
pub fn is_supported(mode: BlendMode, opts: &DispatchOpts) -> bool {
    dispatch(mode, opts).is_some()
}

/// Every mode [`dispatch`] currently binds, in enumeration order.
pub fn supported_modes(opts: &DispatchOpts) -> Vec<BlendMode> {
    BlendMode::ALL
        .into_iter()
        .filter(|&m| is_supported(m, opts))
        .collect()
}

/// A blend mode bound to its transfer function and coverage rule.
///
/// Immutable and `Copy`; share freely across threads working on disjoint buffers.
#[derive(Clone, Copy, Debug)]
pub struct Processor {
    entry: XferEntry,
}

impl Processor {
    /// The bound mode.
    pub fn mode(&self) -> BlendMode {
        self.entry.mode
    }

    /// `true` when coverage uses a mode-specific rule instead of lerping the result.
    pub fn has_coverage_override(&self) -> bool {
        self.entry.aa_override.is_some()
    }

    /// Apply the transfer function to one batch.
    pub fn xfer_batch(&self, s: Px4, d: Px4) -> Px4 {
        (self.entry.xfer)(s, d)
    }

    /// Apply the transfer function to one batch, weighted by coverage `aa`.
    pub fn xfer_batch_aa(&self, s: Px4, d: Px4, aa: Px4) -> Px4 {
        match self.entry.aa_override {
            Some(f) => f(s, d, aa),
            None => coverage::lerp_aa((self.entry.xfer)(s, d), d, aa),
        }
    }

    /// Composite `src` onto `dst` in place, optionally weighted by per-pixel coverage.
    ///
    /// All slices must have the same length. Lengths are checked before anything is written.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(mode = %self.entry.mode, len = dst.len(), aa = aa.is_some())
    )]
    pub fn process(
        &self,
        dst: &mut [PremulRgba8],
        src: &[PremulRgba8],
        aa: Option<&[u8]>,
    ) -> XferResult<()> {
        check_lengths("process", dst.len(), src.len(), aa.map(<[u8]>::len))?;
        self.run(dst, src, aa);
        Ok(())
    }

    /// [`Processor::process`] split into chunks of about `chunk_pixels` pixels on the rayon pool.
    ///
    /// Chunk sizes are rounded up to a whole number of batches. The output is identical to
    /// [`Processor::process`].
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(mode = %self.entry.mode, len = dst.len(), aa = aa.is_some(), chunk_pixels = chunk_pixels)
    )]
    pub fn process_par(
        &self,
        dst: &mut [PremulRgba8],
        src: &[PremulRgba8],
        aa: Option<&[u8]>,
        chunk_pixels: usize,
    ) -> XferResult<()> {
        if chunk_pixels == 0 {
            return Err(XferError::validation(
                "process_par 'chunk_pixels' must be >= 1",
            ));
        }
        check_lengths("process_par", dst.len(), src.len(), aa.map(<[u8]>::len))?;

        // Clamped to the buffer so the round-up cannot overflow.
        let chunk = chunk_pixels.min(dst.len().max(1)).div_ceil(PIXELS) * PIXELS;
        match aa {
            None => dst
                .par_chunks_mut(chunk)
                .zip(src.par_chunks(chunk))
                .for_each(|(d, s)| self.run(d, s, None)),
            Some(aa) => dst
                .par_chunks_mut(chunk)
                .zip(src.par_chunks(chunk))
                .zip(aa.par_chunks(chunk))
                .for_each(|((d, s), a)| self.run(d, s, Some(a))),
        }
        Ok(())
    }

    fn run(&self, dst: &mut [PremulRgba8], src: &[PremulRgba8], aa: Option<&[u8]>) {
        let xfer = self.entry.xfer;
        match (aa, self.entry.aa_override) {
            (None, _) => map_dst_src(dst, src, |d, s| xfer(s, d)),
            (Some(aa), Some(xfer_aa)) => map_dst_src_aa(dst, src, aa, |d, s, c| xfer_aa(s, d, c)),
            (Some(aa), None) => {
                map_dst_src_aa(dst, src, aa, |d, s, c| coverage::lerp_aa(xfer(s, d), d, c))
            }
        }
    }
}

fn check_lengths(what: &str, dst: usize, src: usize, aa: Option<usize>) -> XferResult<()> {
    if dst != src {
        return Err(XferError::validation(format!(
            "{what} expects equal-length pixel buffers (dst {dst}, src {src})"
        )));
    }
    if let Some(aa) = aa
        && aa != dst
    {
        return Err(XferError::validation(format!(
            "{what} expects one coverage value per pixel (dst {dst}, aa {aa})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/xfer/dispatch.rs"]
mod tests;
