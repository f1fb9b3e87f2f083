#![forbid(unsafe_code)]

//! Accordion notifications and listener registry.

use std::fmt;

/// Something observable that happened to an accordion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccordionEvent {
    /// Mount finished.
    Initialized,
    /// An open transition started for `index`.
    PanelOpened { index: usize },
    /// A close transition started for `index`.
    PanelClosed { index: usize },
}

impl AccordionEvent {
    /// Unprefixed event name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Initialized => "isInitialized",
            Self::PanelOpened { .. } => "panelOpened",
            Self::PanelClosed { .. } => "panelClosed",
        }
    }

    /// Namespaced event name, e.g. `Accordion:panelOpened`.
    #[must_use]
    pub fn name(&self, prefix: &str) -> String {
        format!("{prefix}:{}", self.kind())
    }
}

type Listener = Box<dyn FnMut(&AccordionEvent)>;

/// Registered observers, called in registration order.
#[derive(Default)]
pub struct Listeners {
    listeners: Vec<Listener>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}

impl Listeners {
    /// Register an observer for every event.
    pub fn push(&mut self, listener: impl FnMut(&AccordionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver an event to every observer.
    pub fn emit(&mut self, event: &AccordionEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
