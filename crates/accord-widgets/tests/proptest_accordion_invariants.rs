#![forbid(unsafe_code)]

//! Property tests for the accordion state machine.
//!
//! Random interleavings of clicks, frame ticks, and resizes must preserve:
//!
//! 1. At most one panel carries the active class.
//! 2. A click while animating returns `Busy` and changes nothing.
//! 3. Once settled, the open panel (and only it) is visible.
//! 4. `current` stays in range.

use std::time::Duration;

use accord_widgets::TweenEngine;
use accord_widgets::accordion::{Accordion, AccordionConfig, ClickOutcome};
use accord_widgets::memory::MemoryHost;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Click(usize),
    Tick(u64),
    Resize(f64),
}

fn op(panels: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..panels).prop_map(Op::Click),
        (0u64..600).prop_map(Op::Tick),
        (200.0f64..1500.0).prop_map(Op::Resize),
    ]
}

fn scenario() -> impl Strategy<Value = (Vec<f64>, usize, bool, bool, Vec<Op>)> {
    (1usize..6).prop_flat_map(|panels| {
        (
            prop::collection::vec(0.0f64..900.0, panels),
            0usize..8,
            any::<bool>(),
            any::<bool>(),
            prop::collection::vec(op(panels), 0..60),
        )
    })
}

proptest! {
    #[test]
    fn random_interaction_preserves_invariants(
        (heights, initial, self_closing, equalize, ops) in scenario()
    ) {
        let panels = heights.len();
        let config = AccordionConfig::new()
            .initial_index(initial)
            .self_closing(self_closing)
            .equalize_height(equalize);
        let mut acc = Accordion::new(MemoryHost::new(heights), TweenEngine::new(), config)
            .expect("mount");
        prop_assert_eq!(acc.current(), Some(if initial < panels { initial } else { 0 }));

        for op in ops {
            match op {
                Op::Click(i) => {
                    let busy = acc.is_animating();
                    let before = (acc.current(), acc.previous());
                    let outcome = acc.click_tab(i).expect("index in range");
                    if busy {
                        prop_assert_eq!(outcome, ClickOutcome::Busy);
                        prop_assert_eq!((acc.current(), acc.previous()), before);
                    } else {
                        prop_assert_ne!(outcome, ClickOutcome::Busy);
                    }
                    if !self_closing {
                        prop_assert!(acc.current().is_some());
                    }
                }
                Op::Tick(ms) => {
                    acc.tick(Duration::from_millis(ms));
                }
                Op::Resize(h) => acc.resize(h),
            }

            let active = acc.host().panels_with_class("active");
            prop_assert!(active.len() <= 1, "active panels: {:?}", active);
            prop_assert_eq!(active.first().copied(), acc.current());
            prop_assert!(acc.current().is_none_or(|c| c < panels));

            if !acc.is_animating() {
                for i in 0..panels {
                    prop_assert_eq!(acc.host().is_visible(i), acc.current() == Some(i));
                }
            }
        }
    }
}
