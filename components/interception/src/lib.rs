//! Interception layer
//!
//! Transparently wraps the host runtime's timer registration/cancellation
//! and listener add/remove primitives with recording wrappers, maintaining
//! a live resource registry without altering observable behavior.
//!
//! The wrappers call through to the originals unconditionally; bookkeeping
//! failures are caught and logged, never propagated, and never suppress the
//! underlying effect.

mod registry;
mod session;

pub use registry::ResourceRegistry;
pub use session::InstrumentationSession;
