//! The closed set of blend modes.

use std::fmt;
use std::str::FromStr;

use crate::foundation::error::XferError;

/// Blend-mode identifier.
///
/// Discriminants are stable and new modes are only ever appended.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlendMode {
    /// `0`
    Clear,
    /// `S`
    Src,
    /// `D`
    Dst,
    /// `S + (1 - Sa) * D`
    SrcOver,
    /// `D + (1 - Da) * S`
    DstOver,
    /// `S * Da`
    SrcIn,
    /// `D * Sa`
    DstIn,
    /// `S * (1 - Da)`
    SrcOut,
    /// `D * (1 - Sa)`
    DstOut,
    /// `S * Da + D * (1 - Sa)`
    #[serde(rename = "src_atop")]
    SrcATop,
    /// `D * Sa + S * (1 - Da)`
    #[serde(rename = "dst_atop")]
    DstATop,
    /// `S * (1 - Da) + D * (1 - Sa)`
    Xor,
    /// `clamp(S + D)`
    Plus,
    /// `S * D`
    Modulate,
    /// `S + D - S * D`
    Screen,
    /// `S * (1 - Da) + D * (1 - Sa) + S * D`
    Multiply,
    /// `S + D - 2 * min(S * Da, D * Sa)`
    Difference,
    /// `S + D - 2 * S * D`
    Exclusion,
    /// Multiply or screen, depending on source.
    HardLight,
    /// Multiply or screen, depending on destination.
    Overlay,
    /// Darker of source and destination.
    Darken,
    /// Lighter of source and destination.
    Lighten,
}

impl BlendMode {
    /// Number of modes.
    pub const COUNT: usize = 22;

    /// Every mode, in discriminant order.
    pub const ALL: [BlendMode; Self::COUNT] = [
        Self::Clear,
        Self::Src,
        Self::Dst,
        Self::SrcOver,
        Self::DstOver,
        Self::SrcIn,
        Self::DstIn,
        Self::SrcOut,
        Self::DstOut,
        Self::SrcATop,
        Self::DstATop,
        Self::Xor,
        Self::Plus,
        Self::Modulate,
        Self::Screen,
        Self::Multiply,
        Self::Difference,
        Self::Exclusion,
        Self::HardLight,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
    ];

    /// Position in [`BlendMode::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name, matching the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Src => "src",
            Self::Dst => "dst",
            Self::SrcOver => "src_over",
            Self::DstOver => "dst_over",
            Self::SrcIn => "src_in",
            Self::DstIn => "dst_in",
            Self::SrcOut => "src_out",
            Self::DstOut => "dst_out",
            Self::SrcATop => "src_atop",
            Self::DstATop => "dst_atop",
            Self::Xor => "xor",
            Self::Plus => "plus",
            Self::Modulate => "modulate",
            Self::Screen => "screen",
            Self::Multiply => "multiply",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::HardLight => "hard_light",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
        }
    }

    /// Modes whose alpha and color channels follow different formulas.
    pub fn is_non_separable(self) -> bool {
        matches!(
            self,
            Self::HardLight | Self::Overlay | Self::Darken | Self::Lighten
        )
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = XferError;

    /// Accepts `src_over`, `SrcOver`, `src-over`, `SRCOVER`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = fold(s);
        Self::ALL
            .into_iter()
            .find(|m| fold(m.name()) == key)
            .ok_or_else(|| XferError::validation(format!("unknown blend mode '{s}'")))
    }
}

fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/xfer/mode.rs"]
mod tests;
