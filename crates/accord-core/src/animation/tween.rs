#![forbid(unsafe_code)]

//! Single height interpolation.
//!
//! # Failure Modes
//!
//! - Zero duration: the tween completes on its first tick.
//! - Non-finite endpoints are clamped to 0.

use std::time::Duration;

use super::Easing;

/// Interpolates a panel height from `from` to `to` over `duration`.
#[derive(Debug, Clone)]
pub struct HeightTween {
    from: f64,
    to: f64,
    duration: Duration,
    easing: Easing,
    elapsed: Duration,
    ticked: bool,
}

impl HeightTween {
    /// Create a new tween.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from: sanitize(from),
            to: sanitize(to),
            duration,
            easing,
            elapsed: Duration::ZERO,
            ticked: false,
        }
    }

    /// Advance the tween by `delta`. Returns `true` once complete.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.ticked = true;
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
        self.is_complete()
    }

    /// Jump straight to the end.
    pub fn finish(&mut self) {
        self.ticked = true;
        self.elapsed = self.duration;
    }

    /// Raw progress in [0.0, 1.0].
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return if self.ticked { 1.0 } else { 0.0 };
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Current eased height.
    #[must_use]
    pub fn value(&self) -> f64 {
        let progress = self.progress();
        if progress >= 1.0 {
            return self.to;
        }
        let eased = self.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }

    /// Whether the tween reached its target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Starting height.
    #[must_use]
    pub fn start_height(&self) -> f64 {
        self.from
    }

    /// Target height.
    #[must_use]
    pub fn target_height(&self) -> f64 {
        self.to
    }

    /// Total duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_400: Duration = Duration::from_millis(400);

    #[test]
    fn starts_at_from() {
        let tween = HeightTween::new(0.0, 200.0, MS_400, Easing::Linear);
        assert_eq!(tween.value(), 0.0);
        assert!(!tween.is_complete());
    }

    #[test]
    fn linear_midpoint() {
        let mut tween = HeightTween::new(0.0, 200.0, MS_400, Easing::Linear);
        assert!(!tween.tick(Duration::from_millis(200)));
        assert!((tween.value() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn overshooting_tick_lands_on_target() {
        let mut tween = HeightTween::new(150.0, 0.0, MS_400, Easing::PowerOut(4));
        assert!(tween.tick(Duration::from_secs(2)));
        assert_eq!(tween.value(), 0.0);
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut tween = HeightTween::new(0.0, 90.0, Duration::ZERO, Easing::Linear);
        assert!(!tween.is_complete());
        assert!(tween.tick(Duration::ZERO));
        assert_eq!(tween.value(), 90.0);
    }

    #[test]
    fn finish_jumps_to_target() {
        let mut tween = HeightTween::new(10.0, 300.0, MS_400, Easing::Swing);
        tween.finish();
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 300.0);
    }

    #[test]
    fn non_finite_endpoints_clamp() {
        let tween = HeightTween::new(f64::INFINITY, -5.0, MS_400, Easing::Linear);
        assert_eq!(tween.start_height(), 0.0);
        assert_eq!(tween.target_height(), 0.0);
    }
}
