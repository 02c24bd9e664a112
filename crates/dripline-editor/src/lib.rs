//! Dripline editor - interactive canvas session for the automation builder
//!
//! This crate owns the live, mutable graph during an editing session. The
//! UI layer translates pointer events into calls on [`CanvasSession`]; every
//! mutation is a named, unit-testable operation on an owned graph value, so
//! the editing logic runs without any rendering environment.

pub mod canvas;
pub mod viewport;

pub use canvas::CanvasSession;
pub use viewport::{Viewport, MAX_ZOOM, MIN_ZOOM};
