//! Platform-independent logic for the cockpit page widgets.
//!
//! The episode dial turns click, wheel and touch input into steps on a
//! circular counter and binds the selected episode to its HTML fragment. The
//! overlay editor captures a four-point region plus a button anchor over a
//! background image and keeps it in a key-value store. Everything that touches
//! the browser lives behind the traits exposed here.

pub mod app;
pub mod calibration;
pub mod content;
pub mod counter;
pub mod input;
pub mod render;
