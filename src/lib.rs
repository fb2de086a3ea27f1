//! # framefit
//!
//! Batch-fit a folder of photos onto a fixed-aspect letterbox canvas. Point
//! it at an input tree and an output directory: every photo is centered on a
//! 5:3 canvas (backed by a blurred copy of itself or solid black), stretched
//! to the exact requested dimensions, and written as a numbered `{n}.jpg`.
//! A persisted ledger makes repeat runs incremental — already-converted
//! photos are skipped, and outputs whose inputs disappeared are cleaned up.
//!
//! # Pipeline
//!
//! One synchronous pass per invocation:
//!
//! ```text
//! Load      read the ledger        (missing/corrupt → start empty)
//! Discover  walk the input tree    (jpg/jpeg/png, case-insensitive, sorted)
//! Process   new inputs only        (decode → composite → {n}.jpg → record)
//! Prune     vanished inputs        (delete the output, drop the entry)
//! Persist   write the ledger back  (pretty JSON, single final write)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`compositor`] | Pure pixel work: center-crop, blur/black backgrounds, two-stage canvas fit |
//! | [`sync`] | The ledger-synced directory walk: discover, diff, convert, prune, persist |
//! | [`ledger`] | Persisted `input → output` record with O(1) membership lookups |
//! | [`config`] | The immutable per-run parameter set passed into the walker |
//!
//! # Design Decisions
//!
//! ## Presence-Based Incremental Sync
//!
//! An input is skipped if its path appears in the ledger — no mtime or
//! content-hash comparison. That keeps the ledger two string fields per
//! entry and makes repeat runs trivially cheap, at the documented cost that
//! edits to an already-converted photo are ignored until its ledger entry is
//! removed.
//!
//! ## Two-Stage Canvas Fit
//!
//! Photos are first padded onto a fixed 5:3 canvas, then stretched to the
//! caller's exact pixel dimensions. Splitting "give every photo the same
//! shape" from "hit the requested size" means target dimensions don't have
//! to be exactly 5:3 themselves.
//!
//! ## One Ledger Write Per Run
//!
//! The ledger is read once at start and written once at the very end. A
//! crash mid-run loses that run's bookkeeping but never corrupts the file;
//! the next run simply re-converts whatever wasn't recorded.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, Gaussian blur, Lanczos3 resampling, and JPEG encoding all come
//! from the `image` crate — no ImageMagick, no system dependencies. The
//! binary is fully self-contained.
//!
//! ## Per-File Failure Isolation
//!
//! This tool runs unattended over whatever a camera or messaging app dumped
//! into a folder. One corrupt file must not kill the batch: decode and
//! encode failures are reported, counted, and skipped, and the process exits
//! non-zero after completing the full pass.

pub mod compositor;
pub mod config;
pub mod ledger;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_helpers;
