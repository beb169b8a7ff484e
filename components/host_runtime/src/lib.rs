//! Host runtime capabilities consumed by the diagnostics engine
//!
//! Ambient global patching is not a thing in Rust, so the interceptable
//! timer/listener primitives are an explicit facade: scenario fixtures call
//! through [`HostRuntime`] instead of ambient globals, and the interception
//! layer swaps recording wrappers into the runtime's primitive tables.
//!
//! The other host capabilities — monotonic clock, optional heap
//! introspection, node/style probes, display-refresh scheduling — are
//! resolved once at construction; absence degrades the affected report
//! fields to zero and never fails a run.

mod capabilities;
mod clock;
mod events;
mod frame;
mod runtime;
mod timers;

pub use capabilities::{
    HeapStats, HostCapabilities, MemoryIntrospection, NodeCountProbe, StyleProbe,
};
pub use clock::Clock;
pub use events::{AddListenerFn, EventTarget, Listener, ListenerPrimitives, RemoveListenerFn};
pub use frame::{FrameScheduler, IntervalFrameScheduler, ManualFrameScheduler};
pub use runtime::HostRuntime;
pub use timers::{ClearTimerFn, SetTimerFn, TimerCallback, TimerPrimitives};
