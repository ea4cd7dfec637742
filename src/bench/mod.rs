//! Benchmark orchestration module
//!
//! Contains the attempt launcher, the concurrent batch coordinator, and the
//! top-level orchestration that pools samples across sets and verifies them.

use crate::config::RunConfig;
use crate::models::{BenchSample, EngineDescriptor, VerifiedResult};
use crate::{BenchGateError, Result};
use tracing::{debug, info};

pub mod launcher;
pub mod worker;

// Re-export commonly used entry points
pub use launcher::run_attempt;
pub use worker::run_parallel;

/// Run the full validation call: `sets` batches of `threads` attempts each,
/// then verify the pooled samples
///
/// Succeeds only if every sample is complete, every sample agrees on a
/// single node count, and that count matches the expected value when one is
/// supplied. The engine's base name appears in every failure message.
pub async fn run_benchmark(
    engine: &EngineDescriptor,
    config: &RunConfig,
) -> Result<VerifiedResult> {
    config.validate()?;

    let mut samples = Vec::with_capacity(config.threads * config.sets);
    for set in 0..config.sets {
        debug!(engine = %engine.name(), set, threads = config.threads, "running bench set");
        samples.extend(worker::run_parallel(engine, config.threads).await?);
    }

    let result = verify(&engine.name(), &samples, config.expected_nodes)?;
    info!(
        engine = %engine.name(),
        nodes = result.nodes,
        average_nps = result.average_nps,
        samples = samples.len(),
        "benchmark verified"
    );
    Ok(result)
}

/// Verify a pool of samples and aggregate them into a single result
///
/// Check order is significant: determinism is evaluated before completeness,
/// so a pool with mixed absent and disagreeing values is reported as
/// non-deterministic rather than as a plain execution failure.
pub fn verify(
    engine: &str,
    samples: &[BenchSample],
    expected_nodes: Option<u64>,
) -> Result<VerifiedResult> {
    let mut distinct: Vec<u64> = samples.iter().filter_map(|s| s.nodes).collect();
    distinct.sort_unstable();
    distinct.dedup();

    if distinct.len() > 1 {
        return Err(BenchGateError::NonDeterministic(engine.to_string()));
    }

    if samples.is_empty() || samples.iter().any(|s| !s.is_complete()) {
        return Err(BenchGateError::FailedToExecute(engine.to_string()));
    }

    // Every sample is complete and they all agree
    let nodes = distinct[0];

    if let Some(expected) = expected_nodes {
        if expected != nodes {
            return Err(BenchGateError::WrongBench {
                engine: engine.to_string(),
                observed: nodes,
            });
        }
    }

    let total_nps: u64 = samples.iter().filter_map(|s| s.nps).sum();
    let average_nps = total_nps / samples.len() as u64;

    Ok(VerifiedResult { average_nps, nodes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(nodes: u64, nps: u64) -> BenchSample {
        BenchSample::new(Some(nodes), Some(nps))
    }

    #[test]
    fn test_verify_uniform_samples() {
        let samples = vec![sample(500, 1000), sample(500, 2000), sample(500, 3000)];
        let result = verify("engine", &samples, None).expect("verify");
        assert_eq!(result.nodes, 500);
        assert_eq!(result.average_nps, 2000);
    }

    #[test]
    fn test_average_is_truncated() {
        let samples = vec![sample(500, 1000), sample(500, 1000), sample(500, 1001)];
        let result = verify("engine", &samples, None).expect("verify");
        assert_eq!(result.average_nps, 1000);
    }

    #[test]
    fn test_disagreeing_node_counts() {
        let samples = vec![sample(500, 1000), sample(501, 1000)];
        let err = verify("engine", &samples, None).expect_err("must fail");
        assert!(matches!(err, BenchGateError::NonDeterministic(_)));
        assert_eq!(err.to_string(), "[engine] Non-Deterministic Benches");
    }

    #[test]
    fn test_partial_sample_is_incomplete() {
        let samples = vec![sample(500, 1000), BenchSample::new(Some(500), None)];
        let err = verify("engine", &samples, None).expect_err("must fail");
        assert!(matches!(err, BenchGateError::FailedToExecute(_)));
    }

    #[test]
    fn test_determinism_checked_before_completeness() {
        // Mixed absent and disagreeing values: the disagreement wins
        let samples = vec![sample(500, 1000), sample(501, 1000), BenchSample::failed()];
        let err = verify("engine", &samples, None).expect_err("must fail");
        assert!(matches!(err, BenchGateError::NonDeterministic(_)));
    }

    #[test]
    fn test_absent_values_alone_are_execution_failure() {
        // Agreement among the present values: absence is the only problem
        let samples = vec![sample(500, 1000), BenchSample::failed()];
        let err = verify("engine", &samples, None).expect_err("must fail");
        assert!(matches!(err, BenchGateError::FailedToExecute(_)));
    }

    #[test]
    fn test_all_samples_absent() {
        let samples = vec![BenchSample::failed(), BenchSample::failed()];
        let err = verify("engine", &samples, None).expect_err("must fail");
        assert!(matches!(err, BenchGateError::FailedToExecute(_)));
    }

    #[test]
    fn test_empty_pool() {
        let err = verify("engine", &[], None).expect_err("must fail");
        assert!(matches!(err, BenchGateError::FailedToExecute(_)));
    }

    #[test]
    fn test_expected_nodes_match() {
        let samples = vec![sample(500, 1000)];
        assert!(verify("engine", &samples, Some(500)).is_ok());
    }

    #[test]
    fn test_expected_nodes_mismatch() {
        let samples = vec![sample(500, 1000), sample(500, 1000)];
        let err = verify("engine", &samples, Some(400)).expect_err("must fail");
        match &err {
            BenchGateError::WrongBench { engine, observed } => {
                assert_eq!(engine, "engine");
                assert_eq!(*observed, 500);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "[engine] Wrong Bench: 500");
    }
}
