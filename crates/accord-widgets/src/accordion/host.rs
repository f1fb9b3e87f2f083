#![forbid(unsafe_code)]

//! The host surface an accordion mounts on.
//!
//! [`AccordionHost`] is the only way the controller touches the page: it
//! resolves selectors, mutates classes and attributes, writes display and
//! height, measures panels, and moves focus or scroll position. A browser
//! binding implements it over real elements; [`crate::memory::MemoryHost`]
//! implements it in memory.

use accord_core::geometry::PanelHeight;

/// An element the controller addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The accordion's root container.
    Root,
    /// The tab at an index.
    Tab(usize),
    /// The panel at an index.
    Panel(usize),
}

/// Element counts produced by selector resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolved {
    /// Number of elements matching the tab selector.
    pub tabs: usize,
    /// Number of elements matching the panel selector.
    pub panels: usize,
}

/// Page state read once at mount.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    /// Location fragment, with or without the leading `#`.
    pub url_fragment: Option<String>,
    /// Viewport height in pixels.
    pub viewport_height: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            url_fragment: None,
            viewport_height: f64::INFINITY,
        }
    }
}

impl Environment {
    /// Create an environment with the given viewport height and no fragment.
    #[must_use]
    pub fn with_viewport(viewport_height: f64) -> Self {
        Self {
            url_fragment: None,
            viewport_height,
        }
    }

    /// Set the location fragment.
    #[must_use]
    pub fn url_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.url_fragment = Some(fragment.into());
        self
    }

    /// The fragment without `#`, or `None` when absent or empty.
    #[must_use]
    pub fn fragment_id(&self) -> Option<&str> {
        self.url_fragment
            .as_deref()
            .map(|f| f.strip_prefix('#').unwrap_or(f))
            .filter(|f| !f.is_empty())
    }
}

/// DOM abstraction consumed by the accordion controller.
///
/// Indexes passed to tab and panel methods are always below the counts
/// returned by [`AccordionHost::resolve`].
pub trait AccordionHost {
    /// Resolve tab and panel selectors under the root.
    fn resolve(&mut self, selector_tabs: &str, selector_panels: &str) -> Resolved;

    /// Element id of a panel, if it has one.
    fn panel_id(&self, index: usize) -> Option<&str>;

    /// Set an attribute.
    fn set_attribute(&mut self, target: Target, name: &str, value: &str);

    /// Add a class.
    fn add_class(&mut self, target: Target, class: &str);

    /// Remove a class.
    fn remove_class(&mut self, target: Target, class: &str);

    /// Show or hide a panel (`display: block` / `display: none`).
    fn set_visible(&mut self, panel: usize, visible: bool);

    /// Write a panel's height style.
    fn set_height(&mut self, panel: usize, height: PanelHeight);

    /// Rendered height of a panel right now (0 when hidden).
    fn current_height(&self, panel: usize) -> f64;

    /// Height the panel's content needs, independent of its height style.
    fn natural_height(&self, panel: usize) -> f64;

    /// Toggle focusability of a panel's descendants matching `selector`.
    fn set_descendants_focusable(&mut self, panel: usize, selector: &str, focusable: bool);

    /// Move keyboard focus.
    fn focus(&mut self, target: Target);

    /// Scroll so the element is in view.
    fn scroll_into_view(&mut self, target: Target);

    /// Scroll the page to the top.
    fn scroll_to_top(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_strips_hash_and_ignores_empty() {
        let env = Environment::default().url_fragment("#faq-2");
        assert_eq!(env.fragment_id(), Some("faq-2"));
        let env = Environment::default().url_fragment("faq-2");
        assert_eq!(env.fragment_id(), Some("faq-2"));
        assert_eq!(Environment::default().url_fragment("#").fragment_id(), None);
        assert_eq!(Environment::default().fragment_id(), None);
    }
}
