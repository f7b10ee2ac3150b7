//! Payload directory resolution
//!
//! Upload scenarios read their payloads from a `data/payloads` directory
//! that ships alongside the program.

use std::path::{Path, PathBuf};

/// Directory holding payload files, relative to an install root
const PAYLOAD_SUBDIR: &str = "data/payloads";

/// Get the default payload directory
///
/// Search order:
/// 1. `data/payloads` next to the executable
/// 2. the nearest ancestor of the executable directory that has `data/payloads`
///    (covers `target/debug/seccheck` inside a checkout)
/// 3. the crate's own `data/payloads`
pub fn default_payload_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    exe_dir
        .as_deref()
        .and_then(find_payload_dir)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join(PAYLOAD_SUBDIR))
}

/// Walk up from `start` looking for a `data/payloads` directory
pub fn find_payload_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PAYLOAD_SUBDIR))
        .find(|candidate| candidate.is_dir())
}
