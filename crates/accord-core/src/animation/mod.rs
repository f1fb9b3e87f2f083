#![forbid(unsafe_code)]

//! Height animation primitives.
//!
//! This module provides:
//! - [`Easing`]: named easing curves parsed from tween-library style names
//! - [`HeightTween`]: a single panel height interpolation
//! - [`TransitionEngine`] / [`TweenEngine`]: the engine seam and its
//!   deterministic, tick-driven implementation
//!
//! # Invariants
//!
//! - Easing input is clamped to [0.0, 1.0]; `apply(0) == 0` and `apply(1) == 1`
//!   for every curve.
//! - Tween progress is always in [0.0, 1.0].
//! - Zero-duration tweens complete on their first tick.

mod engine;
mod tween;

pub use engine::{HeightTransition, TransitionEngine, TransitionFrame, TransitionId, TweenEngine};
pub use tween::HeightTween;

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Easing Functions
// ============================================================================

/// Easing curve for height transitions.
///
/// Power curves follow the tween-library convention: `Power1` is quadratic,
/// `Power4` is quintic (exponent = power + 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Accelerating polynomial curve.
    PowerIn(u8),
    /// Decelerating polynomial curve.
    PowerOut(u8),
    /// Symmetric S-curve.
    PowerInOut(u8),
    /// Slight overshoot then settle.
    BackOut,
    /// Cosine S-curve used by the classic slide effects.
    Swing,
}

impl Default for Easing {
    fn default() -> Self {
        Self::PowerOut(4)
    }
}

/// Unrecognized easing name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown easing curve: {0:?}")]
pub struct UnknownEasing(pub String);

impl Easing {
    /// Decelerating curve of the given power, clamped to 1..=4.
    #[must_use]
    pub fn power_out(power: u8) -> Self {
        Self::PowerOut(power.clamp(1, 4))
    }

    /// Accelerating curve of the given power, clamped to 1..=4.
    #[must_use]
    pub fn power_in(power: u8) -> Self {
        Self::PowerIn(power.clamp(1, 4))
    }

    /// S-curve of the given power, clamped to 1..=4.
    #[must_use]
    pub fn power_in_out(power: u8) -> Self {
        Self::PowerInOut(power.clamp(1, 4))
    }

    /// Apply the easing function to a progress value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::PowerIn(p) => t.powi(exponent(p)),
            Self::PowerOut(p) => 1.0 - (1.0 - t).powi(exponent(p)),
            Self::PowerInOut(p) => {
                let e = exponent(p);
                if t < 0.5 {
                    2f64.powi(e - 1) * t.powi(e)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(e) / 2.0
                }
            }
            Self::BackOut => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                let t_minus_1 = t - 1.0;
                1.0 + c3 * t_minus_1 * t_minus_1 * t_minus_1 + c1 * t_minus_1 * t_minus_1
            }
            Self::Swing => 0.5 - (t * PI).cos() / 2.0,
        }
    }

    /// Check if this easing can produce values outside 0.0-1.0.
    #[must_use]
    pub fn can_overshoot(self) -> bool {
        matches!(self, Self::BackOut)
    }
}

fn exponent(power: u8) -> i32 {
    i32::from(power.clamp(1, 4)) + 1
}

fn power_from_family(family: &str) -> Option<u8> {
    match family {
        "power1" | "quad" => Some(1),
        "power2" | "cubic" => Some(2),
        "power3" | "quart" => Some(3),
        "power4" | "quint" | "strong" => Some(4),
        _ => None,
    }
}

impl FromStr for Easing {
    type Err = UnknownEasing;

    /// Parse tween-library names (`Power4.easeOut`, `Quad.easeIn`,
    /// `Back.easeOut`, `Linear.easeNone`), CSS-like names (`ease-in-out`),
    /// and `swing`. Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let easing = match name.as_str() {
            "linear" | "none" | "power0" | "linear.easenone" | "power0.easenone" => Self::Linear,
            "ease-in" | "ease_in" | "easein" => Self::PowerIn(2),
            "ease-out" | "ease_out" | "easeout" => Self::PowerOut(2),
            "ease-in-out" | "ease_in_out" | "easeinout" => Self::PowerInOut(2),
            "swing" => Self::Swing,
            "back.easeout" | "back-out" | "back" => Self::BackOut,
            other => {
                let (family, mode) = other
                    .split_once('.')
                    .ok_or_else(|| UnknownEasing(s.to_owned()))?;
                let power = power_from_family(family).ok_or_else(|| UnknownEasing(s.to_owned()))?;
                match mode {
                    "easein" => Self::PowerIn(power),
                    "easeout" => Self::PowerOut(power),
                    "easeinout" => Self::PowerInOut(power),
                    _ => return Err(UnknownEasing(s.to_owned())),
                }
            }
        };
        Ok(easing)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Linear => f.write_str("Linear.easeNone"),
            Self::PowerIn(p) => write!(f, "Power{}.easeIn", p.clamp(1, 4)),
            Self::PowerOut(p) => write!(f, "Power{}.easeOut", p.clamp(1, 4)),
            Self::PowerInOut(p) => write!(f, "Power{}.easeInOut", p.clamp(1, 4)),
            Self::BackOut => f.write_str("Back.easeOut"),
            Self::Swing => f.write_str("swing"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Easing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Easing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
