// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: easing curves, panel heights, and height transitions.
//!
//! # Role in Accord
//! `accord-core` is the animation layer. It owns the easing vocabulary, the
//! [`geometry::PanelHeight`] value type, single height tweens, and the
//! tick-driven [`animation::TweenEngine`] that the accordion controller in
//! `accord-widgets` drives.
//!
//! # Primary responsibilities
//! - **Easing**: named curves (`Power4.easeOut`, `swing`, `ease-in-out`, ...).
//! - **HeightTween**: interpolates a panel height over a fixed duration.
//! - **TransitionEngine**: the seam between a controller and whatever
//!   actually animates; `TweenEngine` is the deterministic implementation.
//!
//! # How it fits in the system
//! The controller never touches time directly. A host calls `tick(delta)`,
//! the engine advances its tweens and reports frames, and the controller
//! applies them. Everything here is host-driven and deterministic.

pub mod animation;
pub mod geometry;
pub mod logging;
