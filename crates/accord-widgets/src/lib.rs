#![forbid(unsafe_code)]

//! Accordion widget for Accord.
//!
//! The [`accordion::Accordion`] controller owns the open/close state machine
//! and drives three injected collaborators:
//!
//! - an [`accordion::AccordionHost`] that stands in for the DOM,
//! - a [`TransitionEngine`] that animates panel heights,
//! - an optional [`accordion::HeightEqualizer`].
//!
//! [`memory::MemoryHost`] is an in-memory host for tests and headless use.

pub mod accordion;
pub mod error;
pub mod memory;

pub use accord_core::animation::{Easing, TransitionEngine, TweenEngine};
pub use accord_core::geometry::PanelHeight;
pub use error::AccordionError;
