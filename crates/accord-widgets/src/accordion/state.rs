#![forbid(unsafe_code)]

//! Index bookkeeping for the accordion.
//!
//! [`AccordionState::plan_click`] is the whole open/close decision table. It
//! updates `current`/`previous` and returns what must be animated; it does
//! not know about the animation lock, which the controller checks first.
//!
//! # Invariants
//!
//! 1. `current` is `None` or `< panel_count`.
//! 2. `previous` is `Some` only for a switch, and never equals `current`.
//! 3. A plan never closes and opens the same panel.

use accord_core::geometry::PanelHeight;

/// Transitions a click requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPlan {
    /// The open tab was clicked without self-closing; only focus moves.
    FocusOnly { panel: usize },
    /// Close the open panel, leaving nothing open.
    Collapse { close: usize },
    /// Nothing was open; open one panel.
    Open { open: usize },
    /// Close one panel and open another.
    Switch { close: usize, open: usize },
}

/// Open-panel bookkeeping for one mounted accordion.
#[derive(Debug, Clone, PartialEq)]
pub struct AccordionState {
    panel_count: usize,
    current: Option<usize>,
    previous: Option<usize>,
    max_height: PanelHeight,
}

impl AccordionState {
    /// Create state with `initial` open. Out-of-range indexes fall back to 0.
    #[must_use]
    pub fn new(panel_count: usize, initial: usize) -> Self {
        let current = if panel_count == 0 {
            None
        } else if initial >= panel_count {
            Some(0)
        } else {
            Some(initial)
        };
        Self {
            panel_count,
            current,
            previous: None,
            max_height: PanelHeight::Auto,
        }
    }

    /// Number of tab/panel pairs.
    #[inline]
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panel_count
    }

    /// Open panel, if any.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Panel closed by the last switch, if any.
    #[inline]
    #[must_use]
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Height applied to settled panels.
    #[inline]
    #[must_use]
    pub fn max_height(&self) -> PanelHeight {
        self.max_height
    }

    pub(crate) fn set_max_height(&mut self, height: PanelHeight) {
        self.max_height = height;
    }

    /// Point `current` at `index` without a transition (mount-time override).
    pub(crate) fn override_current(&mut self, index: usize) {
        if index < self.panel_count {
            self.current = Some(index);
            self.previous = None;
        }
    }

    /// Decide the transitions for a click on tab `index` and update indexes.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn plan_click(&mut self, index: usize, self_closing: bool) -> Option<ClickPlan> {
        if index >= self.panel_count {
            return None;
        }
        let plan = match (self.current, self_closing) {
            (Some(open), true) if open == index => {
                self.previous = None;
                self.current = None;
                ClickPlan::Collapse { close: index }
            }
            (Some(open), false) if open == index => ClickPlan::FocusOnly { panel: index },
            (None, _) => {
                self.previous = None;
                self.current = Some(index);
                ClickPlan::Open { open: index }
            }
            (Some(open), _) => {
                self.previous = Some(open);
                self.current = Some(index);
                ClickPlan::Switch {
                    close: open,
                    open: index,
                }
            }
        };
        Some(plan)
    }
}
