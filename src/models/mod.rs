//! Data models module
//!
//! Contains the engine descriptor, per-attempt sample, and verified
//! result structures passed through one validation call.

pub mod result;

// Re-export commonly used types
pub use result::{BenchReport, BenchSample, EngineDescriptor, VerifiedResult};
