#![forbid(unsafe_code)]

//! End-to-end accordion scenarios over the in-memory host.
//!
//! # Invariants tested
//!
//! 1. Exactly the clicked panel becomes active; never two at once.
//! 2. Self-closing collapses to "none open"; without it, only focus moves.
//! 3. Settled heights equal `max_height` when equalized, natural otherwise.
//! 4. Resize only changes the height used by later transitions.
//! 5. The watchdog releases the lock when the engine stalls.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use accord_core::animation::{HeightTransition, TransitionEngine, TransitionFrame, TransitionId};
use accord_widgets::accordion::{
    Accordion, AccordionBuilder, AccordionConfig, AccordionEvent, AccordionHost, ClickOutcome, Environment,
    Target,
};
use accord_widgets::memory::{MemoryHost, Scroll};
use accord_widgets::{PanelHeight, TweenEngine};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const SETTLE: Duration = Duration::from_secs(1);

type MemoryAccordion = Accordion<MemoryHost, TweenEngine>;

fn three_panels(config: AccordionConfig) -> MemoryAccordion {
    Accordion::new(
        MemoryHost::new([120.0, 260.0, 180.0]),
        TweenEngine::new(),
        config,
    )
    .expect("mount")
}

fn active_panels(acc: &MemoryAccordion) -> Vec<usize> {
    acc.host().panels_with_class("active")
}

/// Engine that accepts transitions and never finishes them.
#[derive(Debug, Default)]
struct StalledEngine {
    started: Vec<TransitionId>,
    cancelled: Vec<TransitionId>,
    inner: TweenEngine,
}

impl TransitionEngine for StalledEngine {
    fn start(&mut self, transition: HeightTransition) -> TransitionId {
        let id = self.inner.start(transition);
        self.started.push(id);
        id
    }

    fn advance(&mut self, _delta: Duration) -> Vec<TransitionFrame> {
        Vec::new()
    }

    fn cancel(&mut self, id: TransitionId) -> bool {
        self.cancelled.push(id);
        self.inner.cancel(id)
    }

    fn in_flight(&self) -> usize {
        self.inner.in_flight()
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn self_closing_walkthrough() {
    let mut acc = three_panels(AccordionConfig::new().initial_index(1));
    assert_eq!(acc.current(), Some(1));
    assert!(acc.host().is_visible(1));
    assert!(!acc.host().is_visible(0));
    assert!(!acc.host().is_visible(2));

    assert_eq!(acc.click_tab(1).unwrap(), ClickOutcome::Collapsed(1));
    acc.tick(SETTLE);
    assert_eq!(acc.current(), None);
    assert_eq!(acc.previous(), None);
    assert!(active_panels(&acc).is_empty());
    assert!((0..3).all(|i| !acc.host().is_visible(i)));

    assert_eq!(acc.click_tab(1).unwrap(), ClickOutcome::Opened(1));
    acc.tick(SETTLE);
    assert_eq!(acc.current(), Some(1));
    assert_eq!(acc.previous(), None);
    assert_eq!(active_panels(&acc), vec![1]);

    assert_eq!(
        acc.click_tab(2).unwrap(),
        ClickOutcome::Switched { from: 1, to: 2 }
    );
    assert_eq!(acc.previous(), Some(1));
    assert_eq!(acc.current(), Some(2));
    assert_eq!(active_panels(&acc), vec![2]);
    acc.tick(SETTLE);
    assert!(!acc.host().is_visible(1));
    assert!(acc.host().is_visible(2));
}

#[test]
fn every_tab_opens_from_all_closed() {
    for index in 0..3 {
        let mut acc = three_panels(AccordionConfig::new());
        acc.click_tab(0).unwrap();
        acc.tick(SETTLE);
        assert_eq!(acc.current(), None);

        assert_eq!(acc.click_tab(index).unwrap(), ClickOutcome::Opened(index));
        assert_eq!(acc.current(), Some(index));
        assert_eq!(active_panels(&acc), vec![index]);
        assert!(acc.host().has_class(Target::Tab(index), "active"));
    }
}

#[test]
fn without_self_closing_open_tab_keeps_state() {
    let mut acc = three_panels(AccordionConfig::new().self_closing(false).initial_index(2));
    assert_eq!(acc.click_tab(2).unwrap(), ClickOutcome::Focused(2));
    assert!(!acc.is_animating());
    assert_eq!(acc.current(), Some(2));
    assert_eq!(acc.host().focused(), Some(Target::Panel(2)));
    assert_eq!(active_panels(&acc), vec![2]);
}

#[test]
fn switch_never_marks_two_panels_active() {
    let mut acc = three_panels(AccordionConfig::new());
    acc.click_tab(2).unwrap();
    for _ in 0..30 {
        assert!(active_panels(&acc).len() <= 1);
        acc.tick(Duration::from_millis(16));
    }
    assert_eq!(active_panels(&acc), vec![2]);
}

#[test]
fn accessibility_attributes_follow_panel_state() {
    let mut acc = three_panels(AccordionConfig::new().selector_focus_els("a, button"));
    acc.click_tab(1).unwrap();
    let host = acc.host();
    assert_eq!(host.attribute(Target::Panel(0), "tabindex"), Some("-1"));
    assert_eq!(host.attribute(Target::Panel(0), "aria-hidden"), Some("true"));
    assert!(!host.descendants_focusable(0));
    assert_eq!(host.attribute(Target::Panel(1), "tabindex"), Some("0"));
    assert_eq!(host.attribute(Target::Panel(1), "aria-hidden"), Some("false"));
    assert!(host.descendants_focusable(1));
    assert_eq!(host.attribute(Target::Tab(1), "aria-selected"), Some("true"));
    assert_eq!(host.attribute(Target::Tab(0), "aria-selected"), Some("false"));
    assert_eq!(host.focus_selector(), Some("a, button"));
}

#[test]
fn tab_controls_reference_panel_ids() {
    let host = MemoryHost::new([10.0, 10.0]).with_panel_ids(["intro", "details"]);
    let acc = Accordion::new(host, TweenEngine::new(), AccordionConfig::new()).unwrap();
    assert_eq!(
        acc.host().attribute(Target::Tab(1), "aria-controls"),
        Some("details")
    );
    assert_eq!(acc.host().resolved_selectors(), Some((".tab a", ".panel")));
}

#[test]
fn natural_height_is_remeasured_on_every_open() {
    let mut acc = three_panels(AccordionConfig::new());
    acc.click_tab(1).unwrap();
    acc.tick(SETTLE);
    acc.click_tab(0).unwrap();
    acc.tick(SETTLE);

    acc.host_mut().set_content_height(1, 500.0);
    acc.click_tab(1).unwrap();
    acc.tick(Duration::from_millis(399));
    let almost = acc.host().current_height(1);
    assert!(almost > 260.0, "tween should target the new height, got {almost}");
    acc.tick(SETTLE);
    assert_eq!(acc.host().current_height(1), 500.0);
}

#[test]
fn resize_updates_equalized_height_for_next_transition() {
    let mut acc = three_panels(AccordionConfig::new().equalize_height(true));
    assert_eq!(acc.max_height(), PanelHeight::Px(260.0));

    acc.host_mut().set_content_height(2, 400.0);
    acc.resize(900.0);
    assert_eq!(acc.max_height(), PanelHeight::Px(400.0));
    // The settled open panel is untouched until the next transition.
    assert_eq!(acc.host().height(0), PanelHeight::Px(260.0));

    acc.click_tab(1).unwrap();
    acc.tick(SETTLE);
    assert_eq!(acc.host().height(1), PanelHeight::Px(400.0));
    assert_eq!(acc.host().height(0), PanelHeight::Px(400.0));
}

#[test]
fn resize_without_equalization_keeps_auto() {
    let mut acc = three_panels(AccordionConfig::new());
    acc.resize(300.0);
    assert_eq!(acc.max_height(), PanelHeight::Auto);
}

#[test]
fn resize_during_transition_does_not_restart_it() {
    let mut acc = three_panels(AccordionConfig::new().equalize_height(true));
    acc.click_tab(1).unwrap();
    acc.tick(Duration::from_millis(100));
    acc.host_mut().set_content_height(0, 600.0);
    acc.resize(800.0);
    assert!(acc.is_animating());
    assert_eq!(acc.engine().in_flight(), 2);
    acc.tick(SETTLE);
    // Completion snaps to the refreshed height.
    assert_eq!(acc.host().height(1), PanelHeight::Px(600.0));
}

#[test]
fn tall_panel_scrolls_into_view_before_focus() {
    let host = MemoryHost::new([100.0, 2000.0]);
    let mut acc = AccordionBuilder::new(AccordionConfig::new())
        .environment(Environment::with_viewport(768.0))
        .mount(host, TweenEngine::new())
        .unwrap();
    acc.click_tab(1).unwrap();
    acc.tick(SETTLE);
    assert_eq!(acc.host().scrolls(), &[Scroll::IntoView(Target::Panel(1))]);
    assert_eq!(acc.host().focused(), Some(Target::Panel(1)));
}

#[test]
fn fragment_selection_focuses_after_load() {
    let host = MemoryHost::new([100.0, 100.0, 100.0]).with_panel_ids(["one", "two", "three"]);
    let mut acc = AccordionBuilder::new(AccordionConfig::new().initial_index(0))
        .environment(Environment::with_viewport(900.0).url_fragment("#three"))
        .mount(host, TweenEngine::new())
        .unwrap();
    assert_eq!(acc.current(), Some(2));
    assert_eq!(active_panels(&acc), vec![2]);
    assert!(acc.host().focused().is_none());

    assert!(acc.page_loaded());
    assert_eq!(acc.host().scrolls(), &[Scroll::Top]);
    assert_eq!(acc.host().focused(), Some(Target::Panel(2)));
}

#[test]
fn watchdog_releases_stalled_lock() {
    let mut acc = Accordion::new(
        MemoryHost::new([100.0, 100.0]),
        StalledEngine::default(),
        AccordionConfig::new().transition_timeout(Some(Duration::from_secs(2))),
    )
    .unwrap();
    acc.click_tab(1).unwrap();
    assert!(!acc.tick(SETTLE));
    assert!(acc.is_animating());
    assert!(acc.tick(SETTLE));
    assert!(!acc.is_animating());
    assert_eq!(acc.engine().cancelled.len(), 2);
    assert_eq!(acc.engine().started, acc.engine().cancelled);
    assert!(!acc.host().is_visible(0));
    assert_eq!(acc.host().focused(), Some(Target::Panel(1)));
}

#[test]
fn without_watchdog_stalled_engine_keeps_lock() {
    let mut acc = Accordion::new(
        MemoryHost::new([100.0, 100.0]),
        StalledEngine::default(),
        AccordionConfig::new(),
    )
    .unwrap();
    acc.click_tab(1).unwrap();
    for _ in 0..10 {
        acc.tick(SETTLE);
    }
    assert!(acc.is_animating());
    assert_eq!(acc.click_tab(0).unwrap(), ClickOutcome::Busy);
}

#[test]
fn closed_listener_sees_collapse_and_switch() {
    let closed = Rc::new(RefCell::new(Vec::new()));
    let names = Rc::new(RefCell::new(Vec::new()));
    let mut acc = three_panels(AccordionConfig::new().event_prefix("CNJS:Accordion"));

    let sink = Rc::clone(&closed);
    acc.on_panel_closed(move |i| sink.borrow_mut().push(i));
    let name_sink = Rc::clone(&names);
    acc.on_event(move |e: &AccordionEvent| {
        name_sink.borrow_mut().push(e.name("CNJS:Accordion"));
    });

    acc.click_tab(0).unwrap();
    acc.tick(SETTLE);
    acc.click_tab(2).unwrap();
    acc.tick(SETTLE);
    acc.click_tab(1).unwrap();

    assert_eq!(*closed.borrow(), vec![0, 2]);
    assert_eq!(
        *names.borrow(),
        vec![
            "CNJS:Accordion:panelClosed",
            "CNJS:Accordion:panelOpened",
            "CNJS:Accordion:panelClosed",
            "CNJS:Accordion:panelOpened",
        ]
    );
}
