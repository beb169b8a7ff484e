//! Analyzers reducing collected series into classified findings
//!
//! The leak analyzer consumes the ordered snapshot series and the final
//! registry state; the performance analyzer consumes the frame sample
//! series. Both are pure reductions — all thresholds come from the named
//! config values in `diag_types`.

mod compositor;
mod leak;
mod performance;

pub use compositor::scan_compositor_hints;
pub use leak::{analyze_leaks, LeakAnalysis};
pub use performance::{analyze_performance, PerformanceAnalysis};
