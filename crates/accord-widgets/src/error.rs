#![forbid(unsafe_code)]

//! Errors raised by the accordion controller.

use thiserror::Error;

/// Failure mounting or driving an accordion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccordionError {
    /// The tab selector matched nothing under the root.
    #[error("tab selector {selector:?} matched no elements")]
    NoTabs { selector: String },
    /// The panel selector matched nothing under the root.
    #[error("panel selector {selector:?} matched no elements")]
    NoPanels { selector: String },
    /// Tabs and panels must pair up one to one.
    #[error("found {tabs} tabs but {panels} panels")]
    CountMismatch { tabs: usize, panels: usize },
    /// Configuration failed validation.
    #[error("invalid accordion configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),
    /// A click referenced a tab that does not exist.
    #[error("tab index {index} out of range for {count} tabs")]
    TabOutOfRange { index: usize, count: usize },
}
