//! Concurrent batch coordination
//!
//! Runs a fixed number of bench attempts in parallel, collects their samples
//! through a bounded channel, and force-terminates the engine when the batch
//! deadline expires. Every spawned handle is joined on every exit path so no
//! zombie processes or dangling tasks remain.

use crate::models::{BenchSample, EngineDescriptor};
use crate::process;
use crate::{bench::launcher, BenchGateError, Result, MAX_BENCH_TIME};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

/// Run one batch of `threads` concurrent bench attempts
///
/// Returns exactly `threads` samples, or `ExceededMaxDuration` if the whole
/// batch does not finish within [`MAX_BENCH_TIME`].
pub async fn run_parallel(engine: &EngineDescriptor, threads: usize) -> Result<Vec<BenchSample>> {
    run_parallel_with_deadline(engine, threads, MAX_BENCH_TIME).await
}

/// Batch execution with an explicit deadline
///
/// The deadline is absolute for the whole batch, measured from batch start:
/// a slow first attempt eats into the budget available for the rest.
async fn run_parallel_with_deadline(
    engine: &EngineDescriptor,
    threads: usize,
    max_wait: Duration,
) -> Result<Vec<BenchSample>> {
    let (tx, mut rx) = mpsc::channel(threads.max(1));
    let mut handles = Vec::with_capacity(threads);

    for _ in 0..threads {
        let engine = engine.clone();
        let tx = tx.clone();
        handles.push(tokio::spawn(async move {
            let sample = launcher::run_attempt(&engine).await;
            // The receiver only disappears after a timeout; the sample is
            // discarded then anyway
            let _ = tx.send(sample).await;
        }));
    }
    drop(tx);

    let deadline = Instant::now() + max_wait;
    let mut samples = Vec::with_capacity(threads);
    let mut timed_out = false;

    while samples.len() < threads {
        match timeout_at(deadline, rx.recv()).await {
            Ok(Some(sample)) => samples.push(sample),
            Ok(None) => {
                // A worker died without depositing a sample; keep the batch
                // length contract intact
                warn!("result channel closed early, padding batch with failed samples");
                samples.resize(threads, BenchSample::failed());
            }
            Err(_) => {
                timed_out = true;
                break;
            }
        }
    }

    if timed_out {
        // Kill by name so the engine's own forked children die with it, then
        // the blocked attempts can be reaped below
        let killed = process::kill_by_name(&engine.name());
        warn!(
            engine = %engine.name(),
            killed,
            "batch exceeded max duration, engine processes killed"
        );
    }

    // Join everything on every exit path to avoid zombie processes
    for handle in handles {
        let _ = handle.await;
    }

    if timed_out {
        return Err(BenchGateError::ExceededMaxDuration(engine.name()));
    }

    debug!(engine = %engine.name(), threads, "batch complete");
    Ok(samples)
}
