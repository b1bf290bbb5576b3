//! Browser binding for the cockpit widgets.
//!
//! Implements the core's render and storage traits over the DOM and
//! `localStorage`, and forwards page events into the core state machines.

pub mod dial;
pub mod dom;
pub mod editor;
pub mod fetch;
pub mod logger;
pub mod storage;

/// Milliseconds since the epoch, as used for the core's `now_ms` clock.
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}
