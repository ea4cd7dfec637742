//! Single bench attempt execution
//!
//! Spawns the engine binary in its built-in bench mode as one child OS
//! process, captures the combined output, and parses it into a sample.
//! Failures inside an attempt never propagate: a spawn, execute, or decode
//! error is recovered locally as an absent-valued sample.

use crate::models::{BenchSample, EngineDescriptor};
use crate::parse;
use std::path::{Component, Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Run one bench attempt of the engine and return its sample
///
/// The child process is always fully waited on before this returns.
pub async fn run_attempt(engine: &EngineDescriptor) -> BenchSample {
    match capture_combined_output(engine).await {
        Ok(combined) => parse::parse_output(&combined),
        Err(err) => {
            warn!(binary = %engine.binary.display(), %err, "bench attempt failed");
            BenchSample::failed()
        }
    }
}

/// Spawn the engine and capture stdout and stderr through one shared pipe
///
/// Both streams write to the same pipe, so lines arrive in emission order
/// and the earliest-line-wins parsing rule sees what the engine actually
/// printed first, regardless of which stream carried it.
async fn capture_combined_output(engine: &EngineDescriptor) -> std::io::Result<Vec<u8>> {
    let program = command_path(&engine.binary);
    let args = bench_args(engine);

    debug!(binary = %program.display(), ?args, "launching bench attempt");

    let (reader, stdout_writer) = std::io::pipe()?;
    let stderr_writer = stdout_writer.try_clone()?;

    // The Command temporary drops here, closing the parent-side write ends,
    // so the reader sees EOF once the child's side of the pipe is gone
    let mut child = Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_writer))
        .stderr(Stdio::from(stderr_writer))
        .spawn()?;

    let read_task = tokio::task::spawn_blocking(move || {
        let mut reader = reader;
        let mut combined = Vec::new();
        std::io::Read::read_to_end(&mut reader, &mut combined).map(|_| combined)
    });

    let _ = child.wait().await?;

    match read_task.await {
        Ok(combined) => combined,
        Err(_) => Err(std::io::Error::other("output reader task failed")),
    }
}

/// Build the argument list for one bench attempt
///
/// Private engines with an external network cannot rely on a file-system
/// convention, so the network is set through the engine's own command
/// vocabulary, passed as successive argv entries.
pub fn bench_args(engine: &EngineDescriptor) -> Vec<String> {
    match (&engine.network, engine.private) {
        (Some(network), true) => vec![
            format!("setoption name EvalFile value {}", network.display()),
            "bench".to_string(),
            "quit".to_string(),
        ],
        _ => vec!["bench".to_string()],
    }
}

/// Qualify a bare binary name so the working directory is searched, not PATH
fn command_path(binary: &Path) -> PathBuf {
    let is_bare = binary.components().count() == 1
        && matches!(binary.components().next(), Some(Component::Normal(_)));
    if is_bare {
        Path::new(".").join(binary)
    } else {
        binary.to_path_buf()
    }
}
