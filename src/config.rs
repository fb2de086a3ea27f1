//! Run configuration.
//!
//! All parameters for a sync pass live in one immutable value that is passed
//! explicitly into the walker — nothing is read from process-wide state.

use std::path::{Path, PathBuf};

/// Name of the default ledger file inside the output directory.
pub const LEDGER_FILENAME: &str = "processed.json";

/// Parameters for one sync pass, fixed for the duration of the run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Root of the input tree, scanned recursively.
    pub input_dir: PathBuf,
    /// Flat directory receiving numbered `{n}.jpg` outputs; created if absent.
    pub output_dir: PathBuf,
    /// Where the processing ledger is read from and written back to.
    pub ledger_path: PathBuf,
    /// Letterbox with a blurred copy of the source instead of solid black.
    pub blurred_background: bool,
    /// Exact output width in pixels.
    pub target_width: u32,
    /// Exact output height in pixels.
    pub target_height: u32,
}

/// Resolve the default ledger path for an output directory.
pub fn default_ledger_path(output_dir: &Path) -> PathBuf {
    output_dir.join(LEDGER_FILENAME)
}
