//! Bhagavad Gita Life Advisor Library
//!
//! This library crate defines the modules behind the recommendation service.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of loosely coupled subsystems:
//!
//! - **`config`**: Command line and environment configuration for the service binary.
//! - **`corpus`**: The verse dataset. Defines `VerseRecord` and loads the static corpus
//!   from a JSON export of the original spreadsheet.
//! - **`text`**: Tokenization and stop-word handling shared by the local oracles.
//! - **`oracles`**: The three signal providers (emotion, keywords, semantic similarity)
//!   behind one-method traits, with in-process and remote HTTP implementations.
//! - **`recommend`**: The scoring engine. Fuses the three signals into a weighted
//!   relevance score and returns the top ranked verses.
//! - **`api`**: The axum HTTP layer exposing the engine.

pub mod api;
pub mod config;
pub mod corpus;
pub mod oracles;
pub mod recommend;
pub mod text;
