#![forbid(unsafe_code)]

//! In-memory accordion host.
//!
//! [`MemoryHost`] records every mutation the controller makes so tests and
//! headless tools can inspect classes, attributes, visibility, heights,
//! focus, and scrolling without a browser.

use std::collections::{BTreeMap, BTreeSet};

use accord_core::geometry::PanelHeight;

use crate::accordion::{AccordionHost, Resolved, Target};

/// A scroll request observed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    /// Page scrolled to the top.
    Top,
    /// Element scrolled into view.
    IntoView(Target),
}

#[derive(Debug, Clone, Default)]
struct Element {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct Panel {
    element: Element,
    id: Option<String>,
    content_height: f64,
    height: PanelHeight,
    visible: bool,
    descendants_focusable: bool,
}

/// Host backed by plain data.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    root: Element,
    tabs: Vec<Element>,
    panels: Vec<Panel>,
    focused: Option<Target>,
    scrolls: Vec<Scroll>,
    selectors: Option<(String, String)>,
    focus_selector: Option<String>,
}

impl MemoryHost {
    /// One tab per panel, with the given content heights.
    #[must_use]
    pub fn new(content_heights: impl IntoIterator<Item = f64>) -> Self {
        let panels: Vec<Panel> = content_heights
            .into_iter()
            .map(|content_height| Panel {
                element: Element::default(),
                id: None,
                content_height,
                height: PanelHeight::Auto,
                visible: true,
                descendants_focusable: true,
            })
            .collect();
        Self {
            root: Element::default(),
            tabs: vec![Element::default(); panels.len()],
            panels,
            focused: None,
            scrolls: Vec::new(),
            selectors: None,
            focus_selector: None,
        }
    }

    /// Assign element ids to panels in order.
    #[must_use]
    pub fn with_panel_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (panel, id) in self.panels.iter_mut().zip(ids) {
            panel.id = Some(id.into());
        }
        self
    }

    /// Override the number of tabs the selector resolves to.
    #[must_use]
    pub fn with_tab_count(mut self, count: usize) -> Self {
        self.tabs = vec![Element::default(); count];
        self
    }

    /// Change a panel's content height (simulates content or layout change).
    pub fn set_content_height(&mut self, panel: usize, height: f64) {
        if let Some(p) = self.panels.get_mut(panel) {
            p.content_height = height;
        }
    }

    /// Whether an element carries a class.
    #[must_use]
    pub fn has_class(&self, target: Target, class: &str) -> bool {
        self.element(target)
            .is_some_and(|e| e.classes.contains(class))
    }

    /// Attribute value on an element.
    #[must_use]
    pub fn attribute(&self, target: Target, name: &str) -> Option<&str> {
        self.element(target)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    /// Whether a panel is displayed.
    #[must_use]
    pub fn is_visible(&self, panel: usize) -> bool {
        self.panels.get(panel).is_some_and(|p| p.visible)
    }

    /// A panel's height style.
    #[must_use]
    pub fn height(&self, panel: usize) -> PanelHeight {
        self.panels
            .get(panel)
            .map_or(PanelHeight::Auto, |p| p.height)
    }

    /// Whether a panel's interactive descendants are focusable.
    #[must_use]
    pub fn descendants_focusable(&self, panel: usize) -> bool {
        self.panels
            .get(panel)
            .is_some_and(|p| p.descendants_focusable)
    }

    /// Element holding focus.
    #[must_use]
    pub fn focused(&self) -> Option<Target> {
        self.focused
    }

    /// Scroll requests, oldest first.
    #[must_use]
    pub fn scrolls(&self) -> &[Scroll] {
        &self.scrolls
    }

    /// Selectors passed to the last `resolve`.
    #[must_use]
    pub fn resolved_selectors(&self) -> Option<(&str, &str)> {
        self.selectors
            .as_ref()
            .map(|(tabs, panels)| (tabs.as_str(), panels.as_str()))
    }

    /// Selector passed to the last descendant-focusability update.
    #[must_use]
    pub fn focus_selector(&self) -> Option<&str> {
        self.focus_selector.as_deref()
    }

    /// Panels currently carrying `class`.
    #[must_use]
    pub fn panels_with_class(&self, class: &str) -> Vec<usize> {
        self.panels
            .iter()
            .enumerate()
            .filter(|(_, p)| p.element.classes.contains(class))
            .map(|(i, _)| i)
            .collect()
    }

    fn element(&self, target: Target) -> Option<&Element> {
        match target {
            Target::Root => Some(&self.root),
            Target::Tab(i) => self.tabs.get(i),
            Target::Panel(i) => self.panels.get(i).map(|p| &p.element),
        }
    }

    fn element_mut(&mut self, target: Target) -> Option<&mut Element> {
        match target {
            Target::Root => Some(&mut self.root),
            Target::Tab(i) => self.tabs.get_mut(i),
            Target::Panel(i) => self.panels.get_mut(i).map(|p| &mut p.element),
        }
    }
}

impl AccordionHost for MemoryHost {
    fn resolve(&mut self, selector_tabs: &str, selector_panels: &str) -> Resolved {
        self.selectors = Some((selector_tabs.to_owned(), selector_panels.to_owned()));
        Resolved {
            tabs: self.tabs.len(),
            panels: self.panels.len(),
        }
    }

    fn panel_id(&self, index: usize) -> Option<&str> {
        self.panels.get(index).and_then(|p| p.id.as_deref())
    }

    fn set_attribute(&mut self, target: Target, name: &str, value: &str) {
        if let Some(e) = self.element_mut(target) {
            e.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn add_class(&mut self, target: Target, class: &str) {
        if let Some(e) = self.element_mut(target) {
            e.classes.insert(class.to_owned());
        }
    }

    fn remove_class(&mut self, target: Target, class: &str) {
        if let Some(e) = self.element_mut(target) {
            e.classes.remove(class);
        }
    }

    fn set_visible(&mut self, panel: usize, visible: bool) {
        if let Some(p) = self.panels.get_mut(panel) {
            p.visible = visible;
        }
    }

    fn set_height(&mut self, panel: usize, height: PanelHeight) {
        if let Some(p) = self.panels.get_mut(panel) {
            p.height = height;
        }
    }

    fn current_height(&self, panel: usize) -> f64 {
        self.panels
            .get(panel)
            .filter(|p| p.visible)
            .map_or(0.0, |p| p.height.resolve(p.content_height))
    }

    fn natural_height(&self, panel: usize) -> f64 {
        self.panels.get(panel).map_or(0.0, |p| p.content_height)
    }

    fn set_descendants_focusable(&mut self, panel: usize, selector: &str, focusable: bool) {
        self.focus_selector = Some(selector.to_owned());
        if let Some(p) = self.panels.get_mut(panel) {
            p.descendants_focusable = focusable;
        }
    }

    fn focus(&mut self, target: Target) {
        self.focused = Some(target);
    }

    fn scroll_into_view(&mut self, target: Target) {
        self.scrolls.push(Scroll::IntoView(target));
    }

    fn scroll_to_top(&mut self) {
        self.scrolls.push(Scroll::Top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_panels_measure_zero() {
        let mut host = MemoryHost::new([120.0]);
        assert_eq!(host.current_height(0), 120.0);
        host.set_visible(0, false);
        assert_eq!(host.current_height(0), 0.0);
        assert_eq!(host.natural_height(0), 120.0);
    }

    #[test]
    fn explicit_height_overrides_content() {
        let mut host = MemoryHost::new([120.0]);
        host.set_height(0, PanelHeight::Px(40.0));
        assert_eq!(host.current_height(0), 40.0);
    }

    #[test]
    fn out_of_range_targets_are_ignored() {
        let mut host = MemoryHost::new([1.0]);
        host.add_class(Target::Panel(7), "active");
        host.set_attribute(Target::Tab(7), "role", "tab");
        assert!(!host.has_class(Target::Panel(7), "active"));
        assert_eq!(host.attribute(Target::Tab(7), "role"), None);
    }

    #[test]
    fn resolve_records_selectors() {
        let mut host = MemoryHost::new([1.0, 2.0]).with_tab_count(3);
        let resolved = host.resolve(".t", ".p");
        assert_eq!(resolved, Resolved { tabs: 3, panels: 2 });
        assert_eq!(host.resolved_selectors(), Some((".t", ".p")));
    }
}
