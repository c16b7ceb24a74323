//! Blend modes, their transfer functions, and the dispatcher that binds one to a [`Processor`].

pub mod coverage;
pub mod dispatch;
pub mod formulas;
pub mod mode;
pub mod opts;

pub use dispatch::{Processor, dispatch, is_supported, platform_supports_batched, supported_modes};
pub use mode::BlendMode;
pub use opts::{DispatchOpts, LEGACY_NON_SEPARABLE_ENV};
