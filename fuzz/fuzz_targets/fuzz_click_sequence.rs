#![no_main]

use std::time::Duration;

use accord_widgets::TweenEngine;
use accord_widgets::accordion::{Accordion, AccordionConfig, ClickOutcome};
use accord_widgets::memory::MemoryHost;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header: panel count (1..=8), flag bits, initial index. Ops are byte pairs.
    if data.len() < 3 {
        return;
    }
    let panels = usize::from(data[0] % 8) + 1;
    let self_closing = data[1] & 1 != 0;
    let equalize = data[1] & 2 != 0;
    let initial = usize::from(data[2]);
    let heights: Vec<f64> = (0..panels)
        .map(|i| f64::from(data.get(3 + i).copied().unwrap_or(0)) * 4.0)
        .collect();

    let config = AccordionConfig::new()
        .initial_index(initial)
        .self_closing(self_closing)
        .equalize_height(equalize)
        .transition_timeout((data[1] & 4 != 0).then(|| Duration::from_millis(600)));
    let Ok(mut acc) = Accordion::new(MemoryHost::new(heights), TweenEngine::new(), config) else {
        return;
    };

    for op in data[3..].chunks_exact(2) {
        match op[0] % 3 {
            0 => {
                let busy = acc.is_animating();
                let before = acc.current();
                let outcome = acc
                    .click_tab(usize::from(op[1]) % panels)
                    .expect("in-range click");
                if busy {
                    assert_eq!(outcome, ClickOutcome::Busy);
                    assert_eq!(acc.current(), before);
                }
            }
            1 => {
                acc.tick(Duration::from_millis(u64::from(op[1]) * 4));
            }
            _ => acc.resize(f64::from(op[1]) * 8.0),
        }

        let active = acc.host().panels_with_class("active");
        assert!(active.len() <= 1, "two active panels: {active:?}");
        assert_eq!(active.first().copied(), acc.current());
        if !self_closing {
            assert!(acc.current().is_some(), "accordion emptied without self-closing");
        }
    }

    for _ in 0..1000 {
        if !acc.is_animating() {
            break;
        }
        acc.tick(Duration::from_millis(16));
    }
    assert!(!acc.is_animating(), "transition never finished");
    for i in 0..panels {
        assert_eq!(acc.host().is_visible(i), acc.current() == Some(i));
    }
});
