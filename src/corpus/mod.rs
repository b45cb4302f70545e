//! Verse Corpus Module
//!
//! The static, in-memory table of verses the service recommends from.
//!
//! ## Lifecycle
//! The corpus is loaded once at process start from a JSON export of the verse
//! spreadsheet, validated row by row, and then shared read-only (`Arc`) by every
//! request for the lifetime of the process. Nothing mutates it after load.
//!
//! ## Submodules
//! - **`types`**: `VerseRecord`, its identifiers, and the corpus error type.
//! - **`loader`**: Reading and normalizing the dataset file.

pub mod loader;
pub mod types;
