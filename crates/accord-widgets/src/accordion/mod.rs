#![forbid(unsafe_code)]

//! Accordion controller.
//!
//! Toggles panels in response to tab clicks, animating height through a
//! [`TransitionEngine`] and keeping classes, ARIA attributes, and focus in
//! sync through an [`AccordionHost`].
//!
//! # Example
//!
//! ```ignore
//! let mut accordion = AccordionBuilder::new(AccordionConfig::new().initial_index(1))
//!     .environment(Environment::with_viewport(900.0))
//!     .listener(|event| println!("{event:?}"))
//!     .mount(host, TweenEngine::new())?;
//!
//! accordion.click_tab(2)?;
//! // Each frame:
//! accordion.tick(frame_delta);
//! ```
//!
//! # Invariants
//!
//! 1. At most one tab/panel pair carries the active class at any time.
//! 2. `is_animating()` is true from the start of a transition until it
//!    completes. A switch holds the lock until both its close and open
//!    transitions finish.
//! 3. Clicks while animating are dropped and leave `current`/`previous`
//!    untouched.
//! 4. Resize never starts or restarts a transition.
//!
//! # Failure Modes
//!
//! - Empty tab or panel selection, or unequal counts, fail at mount.
//! - A stalled engine wedges the lock unless `transition_timeout` is set, in
//!   which case the stalled transition is cancelled and finished in place.

mod config;
mod equalizer;
mod events;
mod host;
mod state;

pub use config::{
    AccordionConfig, DEFAULT_SELECTOR_FOCUS_ELS, DEFAULT_SELECTOR_PANELS, DEFAULT_SELECTOR_TABS,
};
#[cfg(feature = "config-file")]
pub use config::ConfigError;
pub use equalizer::{HeightEqualizer, TallestPanel};
pub use events::{AccordionEvent, Listeners};
pub use host::{AccordionHost, Environment, Resolved, Target};
pub use state::{AccordionState, ClickPlan};

use std::fmt;
use std::time::Duration;

use accord_core::animation::{HeightTransition, TransitionEngine, TransitionId};
use accord_core::geometry::PanelHeight;

use crate::error::AccordionError;

/// Result of a tab click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A transition was in flight; the click was dropped.
    Busy,
    /// The open tab was clicked without self-closing; focus moved to its panel.
    Focused(usize),
    /// A panel opened from the all-closed state.
    Opened(usize),
    /// The open panel collapsed.
    Collapsed(usize),
    /// One panel closed and another opened.
    Switched { from: usize, to: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionKind {
    Open,
    Close { restore_focus: bool },
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    id: TransitionId,
    panel: usize,
    kind: TransitionKind,
    elapsed: Duration,
}

/// Collects options, collaborators, and observers before mounting.
pub struct AccordionBuilder {
    config: AccordionConfig,
    environment: Environment,
    equalizer: Option<Box<dyn HeightEqualizer>>,
    listeners: Listeners,
}

impl fmt::Debug for AccordionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccordionBuilder")
            .field("config", &self.config)
            .field("environment", &self.environment)
            .field("custom_equalizer", &self.equalizer.is_some())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl AccordionBuilder {
    /// Start from a configuration.
    #[must_use]
    pub fn new(config: AccordionConfig) -> Self {
        Self {
            config,
            environment: Environment::default(),
            equalizer: None,
            listeners: Listeners::default(),
        }
    }

    /// Page state read at mount.
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Replace the default [`TallestPanel`] equalizer.
    ///
    /// Only consulted when `equalize_height` is enabled.
    #[must_use]
    pub fn equalizer(mut self, equalizer: impl HeightEqualizer + 'static) -> Self {
        self.equalizer = Some(Box::new(equalizer));
        self
    }

    /// Register an observer before mount so it also sees `Initialized`.
    #[must_use]
    pub fn listener(mut self, listener: impl FnMut(&AccordionEvent) + 'static) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Validate, resolve, and initialize the accordion on `host`.
    pub fn mount<H, E>(self, host: H, engine: E) -> Result<Accordion<H, E>, AccordionError>
    where
        H: AccordionHost,
        E: TransitionEngine,
    {
        Accordion::mount_with(self, host, engine)
    }
}

/// A mounted accordion.
pub struct Accordion<H, E> {
    host: H,
    engine: E,
    config: AccordionConfig,
    state: AccordionState,
    equalizer: Option<Box<dyn HeightEqualizer>>,
    listeners: Listeners,
    in_flight: Vec<InFlight>,
    viewport_height: f64,
    focus_on_init: bool,
}

impl<H: fmt::Debug, E: fmt::Debug> fmt::Debug for Accordion<H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accordion")
            .field("host", &self.host)
            .field("engine", &self.engine)
            .field("state", &self.state)
            .field("in_flight", &self.in_flight)
            .field("viewport_height", &self.viewport_height)
            .field("focus_on_init", &self.focus_on_init)
            .finish_non_exhaustive()
    }
}

impl<H: AccordionHost, E: TransitionEngine> Accordion<H, E> {
    /// Mount with default environment, equalizer, and no observers.
    pub fn new(host: H, engine: E, config: AccordionConfig) -> Result<Self, AccordionError> {
        AccordionBuilder::new(config).mount(host, engine)
    }

    fn mount_with(builder: AccordionBuilder, mut host: H, engine: E) -> Result<Self, AccordionError> {
        let AccordionBuilder {
            config,
            environment,
            equalizer,
            listeners,
        } = builder;

        let errors = config.validate();
        if !errors.is_empty() {
            return Err(AccordionError::InvalidConfig(errors));
        }

        let resolved = host.resolve(&config.selector_tabs, &config.selector_panels);
        if resolved.tabs == 0 {
            return Err(AccordionError::NoTabs {
                selector: config.selector_tabs.clone(),
            });
        }
        if resolved.panels == 0 {
            return Err(AccordionError::NoPanels {
                selector: config.selector_panels.clone(),
            });
        }
        if resolved.tabs != resolved.panels {
            return Err(AccordionError::CountMismatch {
                tabs: resolved.tabs,
                panels: resolved.panels,
            });
        }
        let panel_count = resolved.panels;

        if config.initial_index >= panel_count {
            tracing::debug!(
                message = "accordion.initial_index.clamped",
                initial_index = config.initial_index,
                panel_count,
            );
        }
        let mut state = AccordionState::new(panel_count, config.initial_index);

        let mut focus_on_init = false;
        if let Some(fragment) = environment.fragment_id()
            && let Some(index) = (0..panel_count).find(|&i| host.panel_id(i) == Some(fragment))
        {
            state.override_current(index);
            focus_on_init = true;
        }

        let equalizer = if config.equalize_height {
            let mut equalizer: Box<dyn HeightEqualizer> =
                equalizer.unwrap_or_else(|| Box::new(TallestPanel::default()));
            equalizer.reset_height(&host, panel_count);
            state.set_max_height(PanelHeight::px(equalizer.max_height()));
            Some(equalizer)
        } else {
            None
        };

        let mut accordion = Self {
            host,
            engine,
            config,
            state,
            equalizer,
            listeners,
            in_flight: Vec::new(),
            viewport_height: usable_viewport(environment.viewport_height)
                .unwrap_or(f64::INFINITY),
            focus_on_init,
        };
        accordion.init_dom();

        tracing::debug!(
            message = "accordion.mount",
            panel_count,
            current = ?accordion.state.current(),
            max_height = %accordion.state.max_height(),
            focus_on_init,
        );
        accordion.emit(AccordionEvent::Initialized);
        Ok(accordion)
    }

    fn init_dom(&mut self) {
        let count = self.state.panel_count();
        let current = self.state.current();
        let max_height = self.state.max_height();

        self.host.set_attribute(Target::Root, "role", "tablist");
        for i in 0..count {
            self.host.set_attribute(Target::Tab(i), "role", "tab");
            if let Some(id) = self.host.panel_id(i).map(str::to_owned) {
                self.host.set_attribute(Target::Tab(i), "aria-controls", &id);
            }
            self.host.set_attribute(Target::Panel(i), "role", "tabpanel");
            self.host.set_attribute(Target::Panel(i), "tabindex", "-1");
            self.sync_accessibility(i, current == Some(i));
        }

        for i in 0..count {
            self.host.set_visible(i, false);
            self.host.set_height(i, max_height);
        }
        if let Some(i) = current {
            self.host.add_class(Target::Tab(i), &self.config.active_class);
            self.host.add_class(Target::Panel(i), &self.config.active_class);
            self.host.set_visible(i, true);
        }
    }

    /// Handle the host's page-load event.
    ///
    /// When the URL fragment selected a panel at mount, scrolls to the top and
    /// moves focus into the open panel. Returns `true` if focus moved. When
    /// every panel was collapsed before the load event, nothing scrolls. Later
    /// calls are no-ops.
    pub fn page_loaded(&mut self) -> bool {
        if !std::mem::take(&mut self.focus_on_init) {
            return false;
        }
        let Some(index) = self.state.current() else {
            tracing::debug!(message = "accordion.load.nothing_open");
            return false;
        };
        self.host.scroll_to_top();
        self.focus_panel(index);
        true
    }

    /// Handle a click on tab `index`.
    pub fn click_tab(&mut self, index: usize) -> Result<ClickOutcome, AccordionError> {
        let count = self.state.panel_count();
        if index >= count {
            return Err(AccordionError::TabOutOfRange { index, count });
        }
        let _span = tracing::debug_span!(
            "accordion.click",
            index,
            current = ?self.state.current(),
        )
        .entered();

        if self.is_animating() {
            tracing::trace!(message = "accordion.click.dropped", in_flight = self.in_flight.len());
            return Ok(ClickOutcome::Busy);
        }

        let Some(plan) = self.state.plan_click(index, self.config.self_closing) else {
            return Err(AccordionError::TabOutOfRange { index, count });
        };
        let outcome = match plan {
            ClickPlan::FocusOnly { panel } => {
                self.host.focus(Target::Panel(panel));
                ClickOutcome::Focused(panel)
            }
            ClickPlan::Collapse { close } => {
                self.close_panel(close, true);
                ClickOutcome::Collapsed(close)
            }
            ClickPlan::Open { open } => {
                self.open_panel(open);
                ClickOutcome::Opened(open)
            }
            ClickPlan::Switch { close, open } => {
                self.close_panel(close, false);
                self.open_panel(open);
                ClickOutcome::Switched {
                    from: close,
                    to: open,
                }
            }
        };
        tracing::debug!(message = "accordion.click.handled", outcome = ?outcome);
        Ok(outcome)
    }

    /// Programmatic alias of [`Accordion::click_tab`].
    pub fn activate(&mut self, index: usize) -> Result<ClickOutcome, AccordionError> {
        self.click_tab(index)
    }

    /// Click the tab after the open one, wrapping around.
    ///
    /// With nothing open, clicks the first tab.
    pub fn select_next(&mut self) -> Result<ClickOutcome, AccordionError> {
        let count = self.state.panel_count();
        let next = self.state.current().map_or(0, |i| (i + 1) % count);
        self.click_tab(next)
    }

    /// Click the tab before the open one, wrapping around.
    ///
    /// With nothing open, clicks the last tab.
    pub fn select_previous(&mut self) -> Result<ClickOutcome, AccordionError> {
        let count = self.state.panel_count();
        let prev = self
            .state
            .current()
            .map_or(count - 1, |i| (i + count - 1) % count);
        self.click_tab(prev)
    }

    /// Start closing panel `index`.
    fn close_panel(&mut self, index: usize, restore_focus: bool) {
        self.host.remove_class(Target::Tab(index), &self.config.active_class);
        self.host.remove_class(Target::Panel(index), &self.config.active_class);
        self.sync_accessibility(index, false);

        let from = self.host.current_height(index);
        self.start_transition(index, from, 0.0, TransitionKind::Close { restore_focus });
        self.emit(AccordionEvent::PanelClosed { index });
    }

    /// Start opening panel `index`.
    fn open_panel(&mut self, index: usize) {
        self.host.add_class(Target::Tab(index), &self.config.active_class);
        self.host.add_class(Target::Panel(index), &self.config.active_class);
        self.sync_accessibility(index, true);

        // Measured on every open; content may have changed since the last one.
        let natural = self.host.natural_height(index);
        let target = if self.config.equalize_height {
            self.state.max_height().resolve(natural)
        } else {
            natural
        };
        self.host.set_height(index, PanelHeight::Px(0.0));
        self.host.set_visible(index, true);
        self.start_transition(index, 0.0, target, TransitionKind::Open);
        self.emit(AccordionEvent::PanelOpened { index });
    }

    fn start_transition(&mut self, panel: usize, from: f64, to: f64, kind: TransitionKind) {
        let id = self.engine.start(HeightTransition {
            panel,
            from,
            to,
            duration: self.config.anim_duration,
            easing: self.config.anim_easing,
        });
        tracing::debug!(
            message = "accordion.transition.start",
            id = id.get(),
            panel,
            kind = ?kind,
            from,
            to,
        );
        self.in_flight.push(InFlight {
            id,
            panel,
            kind,
            elapsed: Duration::ZERO,
        });
    }

    /// Advance in-flight transitions by `delta`.
    ///
    /// Applies intermediate heights through the host and finalizes every
    /// transition that completed (or exceeded `transition_timeout`). Returns
    /// `true` if any transition finished.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let mut finished = Vec::new();
        for frame in self.engine.advance(delta) {
            if !self.in_flight.iter().any(|f| f.id == frame.id) {
                continue;
            }
            self.host.set_height(frame.panel, PanelHeight::px(frame.height));
            if frame.finished {
                finished.push(frame.id);
            }
        }

        for flight in &mut self.in_flight {
            if !finished.contains(&flight.id) {
                flight.elapsed = flight.elapsed.saturating_add(delta);
            }
        }
        if let Some(timeout) = self.config.transition_timeout {
            let stalled: Vec<TransitionId> = self
                .in_flight
                .iter()
                .filter(|f| !finished.contains(&f.id) && f.elapsed >= timeout)
                .map(|f| f.id)
                .collect();
            for id in stalled {
                tracing::warn!(
                    message = "accordion.watchdog",
                    id = id.get(),
                    timeout_ms = timeout.as_millis() as u64,
                );
                self.engine.cancel(id);
                finished.push(id);
            }
        }

        let any = !finished.is_empty();
        for id in finished {
            self.complete(id);
        }
        any
    }

    fn complete(&mut self, id: TransitionId) {
        let Some(pos) = self.in_flight.iter().position(|f| f.id == id) else {
            return;
        };
        let flight = self.in_flight.remove(pos);
        let max_height = self.state.max_height();
        match flight.kind {
            TransitionKind::Close { restore_focus } => {
                self.host.set_visible(flight.panel, false);
                self.host.set_height(flight.panel, max_height);
                if restore_focus {
                    self.host.focus(Target::Tab(flight.panel));
                }
            }
            TransitionKind::Open => {
                self.host.set_height(flight.panel, max_height);
                self.focus_panel(flight.panel);
            }
        }
        tracing::debug!(
            message = "accordion.transition.complete",
            id = id.get(),
            panel = flight.panel,
            kind = ?flight.kind,
            elapsed_ms = flight.elapsed.as_millis() as u64,
            locked = !self.in_flight.is_empty(),
        );
    }

    /// Handle a viewport resize.
    ///
    /// Re-measures the equalized height when enabled. In-flight transitions
    /// keep their targets; the new height applies from the next transition
    /// and completion on.
    ///
    /// A NaN or negative viewport height is ignored (the previous height is
    /// kept) and logged at warn level.
    pub fn resize(&mut self, viewport_height: f64) {
        if let Some(height) = usable_viewport(viewport_height) {
            self.viewport_height = height;
        }
        let count = self.state.panel_count();
        if let Some(equalizer) = self.equalizer.as_mut() {
            equalizer.reset_height(&self.host, count);
            self.state.set_max_height(PanelHeight::px(equalizer.max_height()));
        }
        tracing::debug!(
            message = "accordion.resize",
            viewport_height,
            max_height = %self.state.max_height(),
        );
    }

    fn focus_panel(&mut self, index: usize) {
        if self.host.current_height(index) > self.viewport_height {
            self.host.scroll_into_view(Target::Panel(index));
        }
        self.host.focus(Target::Panel(index));
    }

    fn sync_accessibility(&mut self, index: usize, open: bool) {
        let panel = Target::Panel(index);
        self.host
            .set_attribute(panel, "tabindex", if open { "0" } else { "-1" });
        self.host
            .set_attribute(panel, "aria-hidden", if open { "false" } else { "true" });
        self.host.set_attribute(
            Target::Tab(index),
            "aria-selected",
            if open { "true" } else { "false" },
        );
        self.host
            .set_descendants_focusable(index, &self.config.selector_focus_els, open);
    }

    fn emit(&mut self, event: AccordionEvent) {
        tracing::trace!(
            message = "accordion.event",
            name = %event.name(&self.config.event_prefix),
        );
        self.listeners.emit(&event);
    }

    /// Register an observer for every notification.
    pub fn on_event(&mut self, listener: impl FnMut(&AccordionEvent) + 'static) {
        self.listeners.push(listener);
    }

    /// Register an observer for `PanelOpened`.
    pub fn on_panel_opened(&mut self, mut listener: impl FnMut(usize) + 'static) {
        self.listeners.push(move |event: &AccordionEvent| {
            if let AccordionEvent::PanelOpened { index } = *event {
                listener(index);
            }
        });
    }

    /// Register an observer for `PanelClosed`.
    pub fn on_panel_closed(&mut self, mut listener: impl FnMut(usize) + 'static) {
        self.listeners.push(move |event: &AccordionEvent| {
            if let AccordionEvent::PanelClosed { index } = *event {
                listener(index);
            }
        });
    }

    /// Whether a transition is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Open panel, if any.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.state.current()
    }

    /// Panel closed by the last switch, if any.
    #[inline]
    #[must_use]
    pub fn previous(&self) -> Option<usize> {
        self.state.previous()
    }

    /// Height applied to settled panels.
    #[inline]
    #[must_use]
    pub fn max_height(&self) -> PanelHeight {
        self.state.max_height()
    }

    /// Number of tab/panel pairs.
    #[inline]
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.state.panel_count()
    }

    /// Whether page-load focus is still pending.
    #[inline]
    #[must_use]
    pub fn focus_on_init(&self) -> bool {
        self.focus_on_init
    }

    /// Index bookkeeping.
    #[must_use]
    pub fn state(&self) -> &AccordionState {
        &self.state
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &AccordionConfig {
        &self.config
    }

    /// The host surface.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. to change content before a resize.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The transition engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Tear down, returning the collaborators.
    pub fn into_parts(self) -> (H, E) {
        (self.host, self.engine)
    }
}

/// `None` for viewport heights that cannot be compared against panel heights.
fn usable_viewport(height: f64) -> Option<f64> {
    if height.is_nan() || height < 0.0 {
        tracing::warn!(message = "accordion.viewport.invalid", height);
        None
    } else {
        Some(height)
    }
}
