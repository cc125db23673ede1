//! GPU engine acquisition
//!
//! The wgpu instance/adapter/device stack is expensive to create and is
//! needed by both scene variants, so it is acquired exactly once per process
//! and shared. Both windows observe readiness through the same loader; the
//! secondary (realistic) window never triggers the load itself.

pub mod loader;

pub use loader::{loader, EngineError, EngineLoader, GpuEngine, ReadyPoll, POLL_TIMEOUT};
