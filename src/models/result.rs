//! Benchmark sample and result data models
//!
//! Contains structures for describing the binary under test, the raw
//! per-attempt samples, and the final verified result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Immutable description of the engine binary under test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineDescriptor {
    /// Path to the executable, relative to the working directory
    pub binary: PathBuf,
    /// Path to an external evaluation-network file, if any
    pub network: Option<PathBuf>,
    /// Private engines load the network via a runtime option instead of a
    /// file-system convention
    pub private: bool,
}

impl EngineDescriptor {
    /// Create a descriptor for a public engine with no external network
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            network: None,
            private: false,
        }
    }

    /// Set the evaluation-network file path
    pub fn with_network(mut self, network: impl Into<PathBuf>) -> Self {
        self.network = Some(network.into());
        self
    }

    /// Mark the engine as private
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Base name of the binary, used in every error message and as the
    /// target of the kill-by-name sweep
    pub fn name(&self) -> String {
        self.binary
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.binary.to_string_lossy().into_owned())
    }
}

/// Raw outcome of one bench attempt
///
/// An attempt that failed to launch, execute, or parse carries no values at
/// all. A sample missing either field fails the completeness check during
/// verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchSample {
    /// Number of search nodes the engine reported visiting
    pub nodes: Option<u64>,
    /// Search speed in nodes per second
    pub nps: Option<u64>,
}

impl BenchSample {
    /// Create a sample from parsed values
    pub fn new(nodes: Option<u64>, nps: Option<u64>) -> Self {
        Self { nodes, nps }
    }

    /// Sample representing an attempt that produced no usable output
    pub fn failed() -> Self {
        Self {
            nodes: None,
            nps: None,
        }
    }

    /// Check whether both values are present
    pub fn is_complete(&self) -> bool {
        self.nodes.is_some() && self.nps.is_some()
    }
}

/// The verified outcome of a full validation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedResult {
    /// Integer-truncated mean speed over all samples, in nodes per second
    pub average_nps: u64,
    /// The single node count every sample agreed on
    pub nodes: u64,
}

/// Serializable report wrapping a verified result with run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    /// Timestamp when the validation finished
    pub timestamp: DateTime<Utc>,
    /// Engine base name
    pub engine: String,
    /// Concurrent attempts per set
    pub threads: usize,
    /// Number of sets run
    pub sets: usize,
    /// The verified result
    pub result: VerifiedResult,
}

impl BenchReport {
    /// Create a report for a completed validation call
    pub fn new(engine: String, threads: usize, sets: usize, result: VerifiedResult) -> Self {
        Self {
            timestamp: Utc::now(),
            engine,
            threads,
            sets,
            result,
        }
    }

    /// Get a human-readable one-line summary of the report
    pub fn summary(&self) -> String {
        format!(
            "{} - bench {} - {} nps avg ({} threads x {} sets)",
            self.engine, self.result.nodes, self.result.average_nps, self.threads, self.sets
        )
    }
}
