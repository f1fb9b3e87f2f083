//! Headless accordion replay.
//!
//! A script is a comma-separated list of steps:
//!
//! | Step | Meaning |
//! |------|---------|
//! | `2` | click tab 2 |
//! | `tick:250` | advance 250ms in frame-sized slices |
//! | `settle` | tick until no transition is in flight |
//! | `resize:720` | viewport resize to 720px |
//! | `load` | page load event |
//!
//! Each step yields a [`StepReport`] snapshot of the accordion.

use std::str::FromStr;
use std::time::Duration;

use accord_widgets::accordion::{Accordion, AccordionHost, ClickOutcome};
use accord_widgets::memory::MemoryHost;
use accord_widgets::{AccordionError, TweenEngine};
use serde::Serialize;

/// Upper bound on frames spent in one `settle` step.
pub const MAX_SETTLE_FRAMES: usize = 10_000;

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Click a tab.
    Click(usize),
    /// Advance time.
    Tick(Duration),
    /// Run until idle.
    Settle,
    /// Resize the viewport.
    Resize(f64),
    /// Fire the page-load event.
    Load,
}

/// Malformed script step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid step {step:?}: {reason}")]
pub struct StepParseError {
    step: String,
    reason: &'static str,
}

impl StepParseError {
    fn new(step: &str, reason: &'static str) -> Self {
        Self {
            step: step.to_owned(),
            reason,
        }
    }
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let step = s.trim();
        match step.split_once(':') {
            Some(("tick", ms)) => ms
                .trim()
                .parse::<u64>()
                .map(|ms| Self::Tick(Duration::from_millis(ms)))
                .map_err(|_| StepParseError::new(step, "tick expects milliseconds")),
            Some(("resize", px)) => match px.trim().parse::<f64>() {
                Ok(px) if px.is_finite() && px >= 0.0 => Ok(Self::Resize(px)),
                _ => Err(StepParseError::new(step, "resize expects a pixel height")),
            },
            Some(_) => Err(StepParseError::new(step, "unknown step kind")),
            None if step == "settle" => Ok(Self::Settle),
            None if step == "load" => Ok(Self::Load),
            None => step
                .parse::<usize>()
                .map(Self::Click)
                .map_err(|_| StepParseError::new(step, "expected a tab index")),
        }
    }
}

/// Parse a comma-separated script. Empty entries are skipped.
pub fn parse_script(script: &str) -> Result<Vec<Step>, StepParseError> {
    script
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Snapshot after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Step as written.
    pub step: String,
    /// Click result, for click steps.
    pub outcome: Option<String>,
    /// Open panel.
    pub current: Option<usize>,
    /// Panel closed by the last switch.
    pub previous: Option<usize>,
    /// Whether a transition is in flight.
    pub animating: bool,
    /// Rendered height of each panel.
    pub heights: Vec<f64>,
    /// Settled panel height (`auto` or pixels).
    pub max_height: String,
}

/// Drives an in-memory accordion through a script.
#[derive(Debug)]
pub struct Replay {
    accordion: Accordion<MemoryHost, TweenEngine>,
    frame: Duration,
}

impl Replay {
    /// Wrap a mounted accordion; `frame` is the tick granularity.
    #[must_use]
    pub fn new(accordion: Accordion<MemoryHost, TweenEngine>, frame: Duration) -> Self {
        let frame = if frame.is_zero() {
            Duration::from_millis(16)
        } else {
            frame
        };
        Self { accordion, frame }
    }

    /// The accordion being driven.
    #[must_use]
    pub fn accordion(&self) -> &Accordion<MemoryHost, TweenEngine> {
        &self.accordion
    }

    /// Snapshot without running a step.
    #[must_use]
    pub fn snapshot(&self, step: &str, outcome: Option<ClickOutcome>) -> StepReport {
        let acc = &self.accordion;
        StepReport {
            step: step.to_owned(),
            outcome: outcome.map(|o| format!("{o:?}")),
            current: acc.current(),
            previous: acc.previous(),
            animating: acc.is_animating(),
            heights: (0..acc.panel_count())
                .map(|i| acc.host().current_height(i))
                .collect(),
            max_height: acc.max_height().to_string(),
        }
    }

    /// Run one step.
    pub fn run(&mut self, step: Step) -> Result<StepReport, AccordionError> {
        let mut outcome = None;
        let label = match step {
            Step::Click(i) => {
                outcome = Some(self.accordion.click_tab(i)?);
                i.to_string()
            }
            Step::Tick(total) => {
                let mut remaining = total;
                while !remaining.is_zero() {
                    let slice = remaining.min(self.frame);
                    self.accordion.tick(slice);
                    remaining -= slice;
                }
                format!("tick:{}", total.as_millis())
            }
            Step::Settle => {
                let mut frames = 0;
                while self.accordion.is_animating() && frames < MAX_SETTLE_FRAMES {
                    self.accordion.tick(self.frame);
                    frames += 1;
                }
                if self.accordion.is_animating() {
                    tracing::warn!(message = "demo.settle.gave_up", frames);
                }
                "settle".to_owned()
            }
            Step::Resize(px) => {
                self.accordion.resize(px);
                format!("resize:{px}")
            }
            Step::Load => {
                self.accordion.page_loaded();
                "load".to_owned()
            }
        };
        Ok(self.snapshot(&label, outcome))
    }

    /// Run a whole script.
    pub fn run_all(&mut self, steps: &[Step]) -> Result<Vec<StepReport>, AccordionError> {
        steps.iter().map(|&step| self.run(step)).collect()
    }
}
