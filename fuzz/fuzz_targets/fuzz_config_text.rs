#![no_main]

use accord_widgets::accordion::AccordionConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Loaders never panic and never hand back a config that fails validation.
    if let Ok(config) = AccordionConfig::from_toml_str(text) {
        assert!(config.validate().is_empty());
    }
    if let Ok(config) = AccordionConfig::from_json_str(text) {
        assert!(config.validate().is_empty());
    }
});
