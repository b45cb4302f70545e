//! Text Processing Module
//!
//! Normalization utilities shared by the in-process oracles.
//!
//! ## Submodules
//! - **`tokenizer`**: Splits raw text into lower-cased word tokens.
//! - **`stopwords`**: The English stop-word list removed before keyword ranking.

pub mod stopwords;
pub mod tokenizer;

#[cfg(test)]
mod tests;
