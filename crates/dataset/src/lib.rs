//! # Crosshair Dataset Crate
//!
//! This crate is the system's data boundary. It turns an external match table
//! (an uploaded CSV or the built-in demonstration sample) into a sequence of
//! typed `MatchRecord`s, and serializes a record sequence back out to the same
//! column schema for export.
//!
//! ## Architectural Principles
//!
//! - **Strict at the edge:** every cell is validated while it crosses the
//!   boundary. A row that fails to parse aborts the whole load with an error
//!   naming the offending row and column; nothing downstream ever sees a
//!   partially-parsed sequence.
//! - **Derived fields at load time:** the `won` flag is computed from the
//!   `Result` column here, not deferred, so every consumer can rely on the
//!   two being consistent.
//!
//! ## Public API
//!
//! - `read_matches` / `read_matches_from_path`: parse a CSV source.
//! - `sample_matches`: the fixed fallback dataset used when no file is given.
//! - `write_matches` / `write_matches_to_path`: export a record sequence,
//!   including the derived `Win` and `One_Tap_Opportunity` columns.
//! - `DatasetError`: the specific error types that can be returned from this
//!   crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod reader;
pub mod sample;
pub mod writer;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use reader::{read_matches, read_matches_from_path, COLUMNS};
pub use sample::sample_matches;
pub use writer::{write_matches, write_matches_to_path};
