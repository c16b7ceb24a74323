//! Batched fixed-point compositing of premultiplied RGBA8 pixels.
//!
//! - Pick a [`BlendMode`] and bind it with [`dispatch`] to get a [`Processor`]
//! - Call [`Processor::process`] on destination/source pixel slices, optionally with coverage
//!
//! `dispatch` returns `None` when a mode has no batched kernel on this build; callers keep their
//! own scalar path for that case.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod lanes;
pub mod xfer;

pub use crate::foundation::core::{
    ALPHA, PremulRgba8, is_premultiplied, pixels_from_bytes, pixels_to_bytes, premultiply,
    premultiply_in_place, unpremultiply, unpremultiply_in_place,
};
pub use crate::foundation::error::{XferError, XferResult};

pub use crate::xfer::{
    BlendMode, DispatchOpts, LEGACY_NON_SEPARABLE_ENV, Processor, dispatch, is_supported,
    platform_supports_batched, supported_modes,
};
