#![forbid(unsafe_code)]

//! Panel height values.

use std::fmt;

/// Height applied to a panel element.
///
/// `Auto` lets the content decide; `Px` pins an explicit pixel height, as
/// produced by height equalization.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PanelHeight {
    /// Content-driven height.
    #[default]
    Auto,
    /// Explicit height in pixels.
    Px(f64),
}

impl PanelHeight {
    /// Create an explicit pixel height. Negative and non-finite values clamp to 0.
    #[must_use]
    pub fn px(value: f64) -> Self {
        if value.is_finite() {
            Self::Px(value.max(0.0))
        } else {
            Self::Px(0.0)
        }
    }

    /// Whether this is the content-driven height.
    #[inline]
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolve to pixels, falling back to `natural` for `Auto`.
    #[inline]
    #[must_use]
    pub fn resolve(self, natural: f64) -> f64 {
        match self {
            Self::Auto => natural,
            Self::Px(px) => px,
        }
    }
}

impl fmt::Display for PanelHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Px(px) => write!(f, "{px}px"),
        }
    }
}
