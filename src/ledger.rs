//! Persisted processing ledger for incremental sync.
//!
//! The ledger records every successfully completed conversion as an
//! `{ input_path, output_path }` pair. Presence alone means "done": the
//! walker skips any input already recorded, with no mtime or content-hash
//! comparison. (Known limitation: edits to an already-processed input are
//! silently ignored.)
//!
//! # Storage
//!
//! A single pretty-printed JSON array, by default living inside the output
//! directory. It is read once at the start of a run and written back once at
//! the end — a crash mid-run persists nothing beyond the previous run's
//! state.
//!
//! A missing or unparsable ledger file is never an error: the run proceeds
//! from an empty ledger (with a stderr warning when the file existed but
//! couldn't be parsed), re-processing everything.
//!
//! # Ordering and numbering
//!
//! Entries keep their append order. The entry count at load time seeds the
//! numeric output filename for the next new conversion, so numbering is
//! monotonic across runs; pruned entries leave permanent gaps.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// One completed conversion: which input produced which output file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// Ordered sequence of completed conversions with an O(1) membership index.
///
/// The index is runtime-only; on disk the ledger is just the entry array.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    index: HashSet<PathBuf>,
}

impl Ledger {
    /// Create an empty ledger (first run, or fallback after a load failure).
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_entries(entries: Vec<LedgerEntry>) -> Self {
        let index = entries.iter().map(|e| e.input_path.clone()).collect();
        Self { entries, index }
    }

    /// Load from `path`. A missing file yields an empty ledger; a file that
    /// exists but fails to parse yields an empty ledger and a warning.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        match serde_json::from_str::<Vec<LedgerEntry>>(&content) {
            Ok(entries) => Self::from_entries(entries),
            Err(err) => {
                eprintln!(
                    "Warning: {} is empty or invalid ({err}); starting from an empty ledger",
                    path.display()
                );
                Self::empty()
            }
        }
    }

    /// Write the entry sequence to `path` as pretty JSON, fully overwriting.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)
    }

    /// Whether an input path has already been processed.
    pub fn contains(&self, input_path: &Path) -> bool {
        self.index.contains(input_path)
    }

    /// Record a completed conversion. Re-inserting an already-recorded input
    /// is a no-op, preserving the uniqueness invariant on `input_path`.
    pub fn insert(&mut self, entry: LedgerEntry) {
        if self.index.insert(entry.input_path.clone()) {
            self.entries.push(entry);
        }
    }

    /// Drop every entry whose input is not in `live`, returning the dropped
    /// entries in their original order so the caller can delete their
    /// output files.
    pub fn retain_inputs(&mut self, live: &HashSet<PathBuf>) -> Vec<LedgerEntry> {
        let (kept, pruned): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| live.contains(&e.input_path));
        for entry in &pruned {
            self.index.remove(&entry.input_path);
        }
        self.entries = kept;
        pruned
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entry(input: &str, output: &str) -> LedgerEntry {
        LedgerEntry {
            input_path: PathBuf::from(input),
            output_path: PathBuf::from(output),
        }
    }

    // =========================================================================
    // Membership and insertion
    // =========================================================================

    #[test]
    fn empty_ledger_has_no_entries() {
        let ledger = Ledger::empty();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert!(!ledger.contains(Path::new("/photos/a.jpg")));
    }

    #[test]
    fn insert_records_and_indexes() {
        let mut ledger = Ledger::empty();
        ledger.insert(entry("/photos/a.jpg", "/out/0.jpg"));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.contains(Path::new("/photos/a.jpg")));
        assert!(!ledger.contains(Path::new("/photos/b.jpg")));
    }

    #[test]
    fn insert_duplicate_input_is_noop() {
        let mut ledger = Ledger::empty();
        ledger.insert(entry("/photos/a.jpg", "/out/0.jpg"));
        ledger.insert(entry("/photos/a.jpg", "/out/9.jpg"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0].output_path, PathBuf::from("/out/0.jpg"));
    }

    #[test]
    fn entries_preserve_insertion_order() {
        let mut ledger = Ledger::empty();
        ledger.insert(entry("/p/c.jpg", "/out/0.jpg"));
        ledger.insert(entry("/p/a.jpg", "/out/1.jpg"));
        ledger.insert(entry("/p/b.jpg", "/out/2.jpg"));
        let inputs: Vec<_> = ledger.entries().iter().map(|e| &e.input_path).collect();
        assert_eq!(
            inputs,
            vec![
                &PathBuf::from("/p/c.jpg"),
                &PathBuf::from("/p/a.jpg"),
                &PathBuf::from("/p/b.jpg")
            ]
        );
    }

    // =========================================================================
    // Prune
    // =========================================================================

    #[test]
    fn retain_inputs_drops_dead_entries_in_order() {
        let mut ledger = Ledger::empty();
        ledger.insert(entry("/p/a.jpg", "/out/0.jpg"));
        ledger.insert(entry("/p/b.jpg", "/out/1.jpg"));
        ledger.insert(entry("/p/c.jpg", "/out/2.jpg"));

        let live: HashSet<PathBuf> = [PathBuf::from("/p/b.jpg")].into();
        let pruned = ledger.retain_inputs(&live);

        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned[0].output_path, PathBuf::from("/out/0.jpg"));
        assert_eq!(pruned[1].output_path, PathBuf::from("/out/2.jpg"));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.contains(Path::new("/p/b.jpg")));
        assert!(!ledger.contains(Path::new("/p/a.jpg")));
    }

    #[test]
    fn retain_inputs_with_all_live_is_noop() {
        let mut ledger = Ledger::empty();
        ledger.insert(entry("/p/a.jpg", "/out/0.jpg"));
        let live: HashSet<PathBuf> = [PathBuf::from("/p/a.jpg")].into();
        assert!(ledger.retain_inputs(&live).is_empty());
        assert_eq!(ledger.len(), 1);
    }

    // =========================================================================
    // Save / load
    // =========================================================================

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ledger.json");

        let mut ledger = Ledger::empty();
        ledger.insert(entry("/p/a.jpg", "/out/0.jpg"));
        ledger.insert(entry("/p/b.jpg", "/out/1.jpg"));
        ledger.save(&path).unwrap();

        let loaded = Ledger::load(&path);
        assert_eq!(loaded.entries(), ledger.entries());
        assert!(loaded.contains(Path::new("/p/a.jpg")));
    }

    #[test]
    fn serialized_form_is_an_array_of_two_string_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ledger.json");

        let mut ledger = Ledger::empty();
        ledger.insert(entry("/p/a.jpg", "/out/0.jpg"));
        ledger.save(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 1);
        let obj = array[0].as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["input_path"], "/p/a.jpg");
        assert_eq!(obj["output_path"], "/out/0.jpg");
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let ledger = Ledger::load(&tmp.path().join("absent.json"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn load_truncated_json_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ledger.json");
        fs::write(&path, r#"[{"input_path": "/p/a.jpg", "outp"#).unwrap();
        assert!(Ledger::load(&path).is_empty());
    }

    #[test]
    fn load_empty_file_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ledger.json");
        fs::write(&path, "").unwrap();
        assert!(Ledger::load(&path).is_empty());
    }

    #[test]
    fn load_wrong_shape_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ledger.json");
        fs::write(&path, r#"{"not": "an array"}"#).unwrap();
        assert!(Ledger::load(&path).is_empty());
    }
}
