#![forbid(unsafe_code)]

//! Accordion configuration.
//!
//! Every option has a default, so `AccordionConfig::default()` mounts a
//! self-closing accordion with a 400ms `Power4.easeOut` slide. With the
//! `config-file` feature the same struct loads from TOML or JSON:
//!
//! ```toml
//! initial_index = 1
//! equalize_height = true
//! anim_duration_ms = 250
//! anim_easing = "Power2.easeInOut"
//! ```
//!
//! Camel-case keys (`initialIndex`, `selfClosing`, ...) are accepted as
//! aliases so existing widget option objects load unchanged.

#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

use accord_core::animation::Easing;
#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

/// Default tab selector.
pub const DEFAULT_SELECTOR_TABS: &str = ".tab a";
/// Default panel selector.
pub const DEFAULT_SELECTOR_PANELS: &str = ".panel";
/// Default interactive-descendant selector.
pub const DEFAULT_SELECTOR_FOCUS_ELS: &str = "a, button, input, select, textarea";

/// Immutable accordion options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct AccordionConfig {
    /// Panel open at mount. Out-of-range values fall back to 0.
    #[cfg_attr(feature = "config-file", serde(alias = "initialIndex"))]
    pub initial_index: usize,
    /// Selector the host resolves to tab elements.
    #[cfg_attr(feature = "config-file", serde(alias = "selectorTabs"))]
    pub selector_tabs: String,
    /// Selector the host resolves to panel elements.
    #[cfg_attr(feature = "config-file", serde(alias = "selectorPanels"))]
    pub selector_panels: String,
    /// Marker class for the open tab and panel.
    #[cfg_attr(feature = "config-file", serde(alias = "activeClass"))]
    pub active_class: String,
    /// Force every panel to the tallest panel's height.
    #[cfg_attr(feature = "config-file", serde(alias = "equalizeHeight"))]
    pub equalize_height: bool,
    /// Clicking the open tab collapses it.
    #[cfg_attr(feature = "config-file", serde(alias = "selfClosing"))]
    pub self_closing: bool,
    /// Length of every open/close transition.
    #[cfg_attr(
        feature = "config-file",
        serde(rename = "anim_duration_ms", with = "duration_ms")
    )]
    pub anim_duration: Duration,
    /// Easing shared by every transition.
    #[cfg_attr(feature = "config-file", serde(alias = "animEasing"))]
    pub anim_easing: Easing,
    /// Interactive descendants whose tabindex follows the panel state.
    #[cfg_attr(feature = "config-file", serde(alias = "selectorFocusEls"))]
    pub selector_focus_els: String,
    /// Namespace for notification names.
    #[cfg_attr(
        feature = "config-file",
        serde(alias = "customEventPrefix", alias = "customEventPrfx")
    )]
    pub event_prefix: String,
    /// Force-complete transitions that run longer than this.
    #[cfg_attr(
        feature = "config-file",
        serde(rename = "transition_timeout_ms", with = "option_duration_ms")
    )]
    pub transition_timeout: Option<Duration>,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            selector_tabs: DEFAULT_SELECTOR_TABS.to_owned(),
            selector_panels: DEFAULT_SELECTOR_PANELS.to_owned(),
            active_class: "active".to_owned(),
            equalize_height: false,
            self_closing: true,
            anim_duration: Duration::from_millis(400),
            anim_easing: Easing::default(),
            selector_focus_els: DEFAULT_SELECTOR_FOCUS_ELS.to_owned(),
            event_prefix: "Accordion".to_owned(),
            transition_timeout: None,
        }
    }
}

impl AccordionConfig {
    /// Create a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the panel open at mount.
    #[must_use]
    pub fn initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    /// Set the tab and panel selectors.
    #[must_use]
    pub fn selectors(mut self, tabs: impl Into<String>, panels: impl Into<String>) -> Self {
        self.selector_tabs = tabs.into();
        self.selector_panels = panels.into();
        self
    }

    /// Set the active marker class.
    #[must_use]
    pub fn active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    /// Enable or disable height equalization.
    #[must_use]
    pub fn equalize_height(mut self, enabled: bool) -> Self {
        self.equalize_height = enabled;
        self
    }

    /// Enable or disable self-closing.
    #[must_use]
    pub fn self_closing(mut self, enabled: bool) -> Self {
        self.self_closing = enabled;
        self
    }

    /// Set the transition duration.
    #[must_use]
    pub fn anim_duration(mut self, duration: Duration) -> Self {
        self.anim_duration = duration;
        self
    }

    /// Set the transition easing.
    #[must_use]
    pub fn anim_easing(mut self, easing: Easing) -> Self {
        self.anim_easing = easing;
        self
    }

    /// Set the interactive-descendant selector.
    #[must_use]
    pub fn selector_focus_els(mut self, selector: impl Into<String>) -> Self {
        self.selector_focus_els = selector.into();
        self
    }

    /// Set the notification namespace.
    #[must_use]
    pub fn event_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.event_prefix = prefix.into();
        self
    }

    /// Set the transition watchdog.
    #[must_use]
    pub fn transition_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.transition_timeout = timeout;
        self
    }

    /// Validate all options.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.selector_tabs.trim().is_empty() {
            errors.push("selector_tabs must not be empty".into());
        }
        if self.selector_panels.trim().is_empty() {
            errors.push("selector_panels must not be empty".into());
        }
        if self.active_class.trim().is_empty() {
            errors.push("active_class must not be empty".into());
        } else if self.active_class.contains(char::is_whitespace) {
            errors.push(format!(
                "active_class must be a single class name, got {:?}",
                self.active_class
            ));
        }
        if self.event_prefix.trim().is_empty() {
            errors.push("event_prefix must not be empty".into());
        }
        match self.transition_timeout {
            Some(Duration::ZERO) => {
                errors.push("transition_timeout must be > 0 when set".into());
            }
            Some(timeout) if timeout <= self.anim_duration => {
                errors.push(format!(
                    "transition_timeout must exceed anim_duration ({}ms <= {}ms)",
                    timeout.as_millis(),
                    self.anim_duration.as_millis()
                ));
            }
            _ => {}
        }

        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "config-file")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a configuration file.
#[cfg(feature = "config-file")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ---------------------------------------------------------------------------
// Serde helpers for durations
// ---------------------------------------------------------------------------

#[cfg(feature = "config-file")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(feature = "config-file")]
mod option_duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_some(&u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<u64>::deserialize(deserializer).map(|ms| ms.map(Duration::from_millis))
    }
}
