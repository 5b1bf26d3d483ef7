//! Zero-cost logging helpers.
//!
//! With the `tracing` feature enabled these macros forward to the `tracing`
//! crate. Without it (the default) they expand to nothing, so structural
//! operations on the tree pay no logging cost.
//!
//! ```bash
//! # Watch every attach/detach while running the scenario tests
//! RUST_LOG=heap_ordered_tree=trace cargo test --features tracing --test tree_scenarios
//! ```

#![allow(unused_macros, unused_imports)]

/// Trace-level event, emitted per structural change. No-op without `tracing`.
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level event, emitted for batch operations. No-op without `tracing`.
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;
