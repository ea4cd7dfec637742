//! BENCHGATE - Benchmark validation gate for chess engines
//!
//! Certifies a compiled engine binary before it is admitted to a test run:
//! runs the binary's built-in `bench` mode across several concurrent
//! processes, parses the free-form output into (node count, speed) samples,
//! requires every sample to agree on the node count, and reports the
//! aggregate speed.

use std::fmt;
use std::time::Duration;

// Public re-exports
pub mod bench;
pub mod config;
pub mod models;
pub mod parse;
pub mod process;

// Common error types
#[derive(Debug)]
pub enum BenchGateError {
    /// Samples disagreed on the reported node count
    NonDeterministic(String),
    /// At least one attempt never produced a complete sample
    FailedToExecute(String),
    /// The agreed node count did not match the expected value
    WrongBench {
        /// Engine base name
        engine: String,
        /// Node count the samples actually agreed on
        observed: u64,
    },
    /// A batch did not complete within the deadline
    ExceededMaxDuration(String),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// I/O operation failed
    IoError(std::io::Error),
}

impl fmt::Display for BenchGateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchGateError::NonDeterministic(engine) => {
                write!(f, "[{}] Non-Deterministic Benches", engine)
            }
            BenchGateError::FailedToExecute(engine) => {
                write!(f, "[{}] Failed to Execute Benchmark", engine)
            }
            BenchGateError::WrongBench { engine, observed } => {
                write!(f, "[{}] Wrong Bench: {}", engine, observed)
            }
            BenchGateError::ExceededMaxDuration(engine) => {
                write!(f, "[{}] Bench Exceeded Max Duration", engine)
            }
            BenchGateError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            BenchGateError::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for BenchGateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchGateError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BenchGateError {
    fn from(err: std::io::Error) -> Self {
        BenchGateError::IoError(err)
    }
}

/// Result type alias for benchgate operations
pub type Result<T> = std::result::Result<T, BenchGateError>;

// Common types and constants
pub const APP_NAME: &str = "benchgate";
pub const CONFIG_FILE: &str = "benchgate.toml";

/// Absolute deadline for one batch of concurrent bench attempts
pub const MAX_BENCH_TIME: Duration = Duration::from_secs(60);
