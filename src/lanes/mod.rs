//! Fixed-width pixel batches and the loops that feed them.

pub mod map;
pub mod px4;

pub use map::{map_dst_src, map_dst_src_aa};
pub use px4::{LANES, PIXELS, Px4, Px4Mask, Px4Wide, Px4WideMask};
