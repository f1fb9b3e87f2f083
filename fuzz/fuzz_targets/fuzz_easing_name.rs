#![no_main]

use accord_core::animation::Easing;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(name) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(easing) = name.parse::<Easing>() else {
        return;
    };
    // Canonical names parse back to the same curve.
    assert_eq!(easing.to_string().parse::<Easing>().ok(), Some(easing));
    for step in 0..=16 {
        assert!(easing.apply(f64::from(step) / 16.0).is_finite());
    }
    assert!(easing.apply(0.0).abs() < 1e-9);
    assert!((easing.apply(1.0) - 1.0).abs() < 1e-9);
});
