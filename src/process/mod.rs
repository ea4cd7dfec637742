//! Host process management module
//!
//! Name-based process termination, used as the cancellation primitive when a
//! batch blows its deadline. Killing by name rather than by handle also
//! reaps any grandchildren the engine forked internally; the cost is that
//! unrelated processes sharing the binary's name on this host are killed
//! too.

use sysinfo::System;
use tracing::{debug, warn};

// Linux truncates /proc comm names to 15 bytes
const MAX_COMM_LEN: usize = 15;

/// Kill every running process whose name matches `name`
///
/// Returns the number of processes that were sent a kill signal.
pub fn kill_by_name(name: &str) -> usize {
    let mut sys = System::new();
    sys.refresh_processes();

    let mut killed = 0;
    for (pid, process) in sys.processes() {
        if !name_matches(process.name(), name) {
            continue;
        }
        if process.kill() {
            debug!(pid = pid.as_u32(), name, "killed engine process");
            killed += 1;
        } else {
            warn!(pid = pid.as_u32(), name, "failed to kill engine process");
        }
    }
    killed
}

/// Check whether any running process matches `name`
pub fn any_running(name: &str) -> bool {
    let mut sys = System::new();
    sys.refresh_processes();
    sys.processes()
        .values()
        .any(|process| name_matches(process.name(), name))
}

fn name_matches(process_name: &str, target: &str) -> bool {
    if process_name == target {
        return true;
    }
    // A truncated comm entry still identifies the engine
    process_name.len() == MAX_COMM_LEN && target.starts_with(process_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_exact() {
        assert!(name_matches("stockfish", "stockfish"));
        assert!(!name_matches("stockfish", "ethereal"));
    }

    #[test]
    fn test_name_matches_truncated_comm() {
        // 15-byte comm entry for a longer binary name
        assert!(name_matches("berserk-dev-net", "berserk-dev-networks"));
        assert!(!name_matches("berserk-dev", "berserk-dev-networks"));
    }

    #[test]
    fn test_kill_by_name_no_match() {
        assert_eq!(kill_by_name("benchgate-no-such-process-name"), 0);
    }

    #[test]
    fn test_any_running_no_match() {
        assert!(!any_running("benchgate-no-such-process-name"));
    }
}
