//! Ledger-synced directory walk.
//!
//! Single pass per invocation, fully synchronous:
//!
//! ```text
//! Load      the ledger          (missing/corrupt → empty, never fatal)
//! Discover  input tree          (recursive, jpg/jpeg/png, sorted)
//! Process   unseen inputs       (decode → composite → {n}.jpg → record)
//! Prune     vanished inputs     (delete output, drop ledger entry)
//! Persist   the ledger          (pretty JSON, full overwrite)
//! ```
//!
//! Already-recorded inputs are skipped on presence alone — no change
//! detection. Output numbering starts at the ledger's entry count at load
//! time and increments once per successful conversion, so numbers are never
//! reused across runs; pruning leaves permanent gaps.
//!
//! A file that fails to decode or convert is reported and skipped — an
//! unattended batch run must not die on the first corrupt image. Only an
//! uncreatable output directory or an unwritable ledger aborts the run.

use crate::compositor;
use crate::config::SyncConfig;
use crate::ledger::{Ledger, LedgerEntry};
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Input extensions picked up by discovery (matched case-insensitively).
pub const INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Fatal run errors. Per-file failures are not here — they are collected in
/// the [`SyncReport`] instead.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("failed to create output directory {}", .0.display())]
    OutputDir(PathBuf, #[source] io::Error),
    #[error("failed to write ledger {}", .0.display())]
    LedgerWrite(PathBuf, #[source] io::Error),
}

/// A single input that failed to convert. Isolated per file; never aborts
/// the walk.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Counters for one sync pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    pub converted: u32,
    pub skipped: u32,
    pub pruned: u32,
    pub failed: u32,
}

impl fmt::Display for SyncStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} converted", self.converted)?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        if self.pruned > 0 {
            write!(f, ", {} pruned", self.pruned)?;
        }
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        Ok(())
    }
}

/// Outcome of a sync pass. The pass completed even when `failures` is
/// non-empty; callers decide whether that warrants a non-zero exit.
#[derive(Debug)]
pub struct SyncReport {
    pub stats: SyncStats,
    pub failures: Vec<(PathBuf, ProcessError)>,
}

/// Run one full sync pass over the configured input tree.
pub fn sync(config: &SyncConfig) -> Result<SyncReport, SyncError> {
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| SyncError::OutputDir(config.output_dir.clone(), e))?;

    let mut ledger = Ledger::load(&config.ledger_path);
    let mut next_index = ledger.len();

    let discovered = discover_inputs(&config.input_dir);

    let mut stats = SyncStats::default();
    let mut failures = Vec::new();

    for input_path in &discovered {
        if ledger.contains(input_path) {
            println!("Skipping {} (already processed)", input_path.display());
            stats.skipped += 1;
            continue;
        }

        let output_path = config.output_dir.join(format!("{next_index}.jpg"));
        match convert(input_path, &output_path, config) {
            Ok(()) => {
                println!(
                    "Converted {} -> {}",
                    input_path.display(),
                    output_path.display()
                );
                ledger.insert(LedgerEntry {
                    input_path: input_path.clone(),
                    output_path,
                });
                next_index += 1;
                stats.converted += 1;
            }
            Err(err) => {
                eprintln!("Warning: skipping {}: {err}", input_path.display());
                stats.failed += 1;
                failures.push((input_path.clone(), err));
            }
        }
    }

    let live: HashSet<PathBuf> = discovered.into_iter().collect();
    for stale in ledger.retain_inputs(&live) {
        match std::fs::remove_file(&stale.output_path) {
            Ok(()) => println!(
                "Deleted {} (input {} removed)",
                stale.output_path.display(),
                stale.input_path.display()
            ),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => eprintln!(
                "Warning: could not delete {}: {err}",
                stale.output_path.display()
            ),
        }
        stats.pruned += 1;
    }

    ledger
        .save(&config.ledger_path)
        .map_err(|e| SyncError::LedgerWrite(config.ledger_path.clone(), e))?;

    Ok(SyncReport { stats, failures })
}

/// Recursively enumerate input files under `root`, sorted by file name so
/// output numbering is deterministic. Unreadable entries are reported and
/// skipped.
pub fn discover_inputs(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                eprintln!("Warning: skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_input_extension(p))
        .collect()
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            INPUT_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Decode, composite, and save one input. Any error here is isolated to
/// this file.
fn convert(input: &Path, output: &Path, config: &SyncConfig) -> Result<(), ProcessError> {
    let img = decode_oriented(input)?;
    let framed = compositor::composite(
        &img,
        config.blurred_background,
        config.target_width,
        config.target_height,
    );
    framed.save(output)?;
    Ok(())
}

/// Decode an image and normalize its EXIF orientation, so camera photos come
/// out upright before any geometry runs.
fn decode_oriented(path: &Path) -> Result<DynamicImage, ProcessError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    Ok(img)
}
