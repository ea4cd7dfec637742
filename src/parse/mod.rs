//! Engine output parsing module
//!
//! Extracts a node count and a search speed from the combined output of one
//! bench attempt. The text format is not controlled by this crate: every
//! engine emits its own phrasing, so matching is tolerant of banners,
//! search-info lines, and other noise.

use crate::models::BenchSample;
use regex::Regex;
use std::sync::OnceLock;

static NORMALIZE_RE: OnceLock<Regex> = OnceLock::new();
static NPS_AFTER_RE: OnceLock<Regex> = OnceLock::new();
static NPS_BEFORE_RE: OnceLock<Regex> = OnceLock::new();
static NODES_AFTER_RE: OnceLock<Regex> = OnceLock::new();
static NODES_BEFORE_RE: OnceLock<Regex> = OnceLock::new();
static BENCH_AFTER_RE: OnceLock<Regex> = OnceLock::new();

fn normalize_re() -> &'static Regex {
    NORMALIZE_RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9 ]+").expect("valid regex"))
}

fn nps_after_re() -> &'static Regex {
    NPS_AFTER_RE.get_or_init(|| Regex::new(r"(?i)\bnps\s+(\d+)").expect("valid regex"))
}

fn nps_before_re() -> &'static Regex {
    NPS_BEFORE_RE.get_or_init(|| Regex::new(r"(?i)(\d+)\s+nps\b").expect("valid regex"))
}

fn nodes_after_re() -> &'static Regex {
    NODES_AFTER_RE.get_or_init(|| Regex::new(r"(?i)\bnodes\s+(\d+)").expect("valid regex"))
}

fn nodes_before_re() -> &'static Regex {
    NODES_BEFORE_RE.get_or_init(|| Regex::new(r"(?i)(\d+)\s+nodes\b").expect("valid regex"))
}

fn bench_after_re() -> &'static Regex {
    BENCH_AFTER_RE.get_or_init(|| Regex::new(r"(?i)\bbench\s+(\d+)").expect("valid regex"))
}

/// Parse the combined output buffer of one bench attempt
///
/// Lines are scanned top to bottom and, for each field independently, the
/// first line that yields a value wins. A buffer that is not valid UTF-8
/// yields an absent-valued sample.
pub fn parse_output(raw: &[u8]) -> BenchSample {
    let text = match std::str::from_utf8(raw) {
        Ok(text) => text,
        Err(_) => return BenchSample::failed(),
    };

    let mut nodes = None;
    let mut nps = None;

    for line in text.lines() {
        let line = normalize(line);
        let (line_nodes, line_nps) = scan_line(&line);
        if nodes.is_none() {
            nodes = line_nodes;
        }
        if nps.is_none() {
            nps = line_nps;
        }
        // Earlier lines win, so once both are set nothing can change
        if nodes.is_some() && nps.is_some() {
            break;
        }
    }

    BenchSample::new(nodes, nps)
}

/// Collapse runs of non-alphanumeric characters to single spaces
fn normalize(line: &str) -> String {
    normalize_re().replace_all(line, " ").into_owned()
}

/// Extract (nodes, nps) candidates from one normalized line
fn scan_line(line: &str) -> (Option<u64>, Option<u64>) {
    // Keyword-first forms are preferred: on a line like
    // "bench 123456 nps 789000" the digits before "nps" belong to the
    // node count, not the speed.
    let mut nodes = capture_u64(nodes_after_re(), line)
        .or_else(|| capture_u64(nodes_before_re(), line))
        .or_else(|| capture_u64(bench_after_re(), line));
    let mut nps =
        capture_u64(nps_after_re(), line).or_else(|| capture_u64(nps_before_re(), line));

    // Combined-summary fast path: "<nodes> nodes <nps> nps". Opportunistic,
    // never fatal: if either token is missing or non-numeric, the generic
    // matches above stand.
    if line.contains("nodes") && line.contains("nps") {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 3 {
            if let (Ok(n), Ok(p)) = (parts[0].parse::<u64>(), parts[2].parse::<u64>()) {
                nodes = Some(n);
                nps = Some(p);
            }
        }
    }

    (nodes, nps)
}

fn capture_u64(re: &Regex, line: &str) -> Option<u64> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
