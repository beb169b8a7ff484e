//! CortenBrowser runtime diagnostics engine
//!
//! Detects resource leaks (uncleared timers, unremoved event listeners,
//! node-tree growth, heap growth) and profiles frame performance of a
//! long-running interactive application. See `diagnostics_api` for the
//! public surface.

pub use diagnostics_api::*;
