//! framepress Task Tracker
//!
//! In-memory registry of asynchronous video acquisitions plus the worker
//! loop that drives each one. One worker per download; the registry keeps
//! terminal results around until a sweep evicts them.

pub mod registry;
pub mod worker;

pub use registry::{SweepPolicy, SweepReport, TaskRegistry, TaskResult, TaskSnapshot, TaskStatus};
pub use worker::run_acquisition;
