#![forbid(unsafe_code)]

//! Transition engine seam and the tick-driven tween engine.
//!
//! A [`TransitionEngine`] accepts height transitions and reports their
//! progress as [`TransitionFrame`]s each time the host advances time. The
//! controller depends only on this trait; [`TweenEngine`] is the
//! deterministic implementation used by hosts that drive their own frame
//! clock (and by tests).
//!
//! # Invariants
//!
//! 1. Transition ids are unique for the lifetime of an engine.
//! 2. Every started transition yields exactly one frame with
//!    `finished == true`, unless cancelled first.
//! 3. A finished or cancelled transition never produces further frames.

use std::time::Duration;

use super::{Easing, HeightTween};

/// Opaque handle to an in-flight transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(u64);

impl TransitionId {
    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A request to animate one panel's height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightTransition {
    /// Panel being animated.
    pub panel: usize,
    /// Height at the start of the transition.
    pub from: f64,
    /// Height at the end of the transition.
    pub to: f64,
    /// Transition length.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

/// Progress report for one transition after an [`TransitionEngine::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    /// Which transition this frame belongs to.
    pub id: TransitionId,
    /// Panel being animated.
    pub panel: usize,
    /// Height to apply this frame.
    pub height: f64,
    /// Whether the transition completed with this frame.
    pub finished: bool,
}

/// Performs height animations and reports completion.
pub trait TransitionEngine {
    /// Begin a transition.
    fn start(&mut self, transition: HeightTransition) -> TransitionId;

    /// Advance all transitions by `delta` and report their frames.
    fn advance(&mut self, delta: Duration) -> Vec<TransitionFrame>;

    /// Abort a transition without a final frame. Returns `false` if unknown.
    fn cancel(&mut self, id: TransitionId) -> bool;

    /// Number of transitions still running.
    fn in_flight(&self) -> usize;
}

#[derive(Debug)]
struct ActiveTween {
    id: TransitionId,
    panel: usize,
    tween: HeightTween,
}

/// Deterministic engine that interpolates heights as the host ticks it.
#[derive(Debug, Default)]
pub struct TweenEngine {
    active: Vec<ActiveTween>,
    next_id: u64,
}

impl TweenEngine {
    /// Create an idle engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current interpolated height of a running transition.
    #[must_use]
    pub fn height_of(&self, id: TransitionId) -> Option<f64> {
        self.active
            .iter()
            .find(|active| active.id == id)
            .map(|active| active.tween.value())
    }
}

impl TransitionEngine for TweenEngine {
    fn start(&mut self, transition: HeightTransition) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        tracing::trace!(
            message = "tween.start",
            id = id.get(),
            panel = transition.panel,
            from = transition.from,
            to = transition.to,
            duration_ms = transition.duration.as_millis() as u64,
        );
        self.active.push(ActiveTween {
            id,
            panel: transition.panel,
            tween: HeightTween::new(
                transition.from,
                transition.to,
                transition.duration,
                transition.easing,
            ),
        });
        id
    }

    fn advance(&mut self, delta: Duration) -> Vec<TransitionFrame> {
        let frames: Vec<TransitionFrame> = self
            .active
            .iter_mut()
            .map(|active| {
                let finished = active.tween.tick(delta);
                TransitionFrame {
                    id: active.id,
                    panel: active.panel,
                    height: active.tween.value(),
                    finished,
                }
            })
            .collect();
        self.active.retain(|active| !active.tween.is_complete());
        frames
    }

    fn cancel(&mut self, id: TransitionId) -> bool {
        let before = self.active.len();
        self.active.retain(|active| active.id != id);
        before != self.active.len()
    }

    fn in_flight(&self) -> usize {
        self.active.len()
    }
}
