//! Recommendation Module
//!
//! The core of the service: fuses three independently computed signals into one
//! relevance score per verse and returns the best matches.
//!
//! ## Scoring
//! For a query with emotion label `E`, keyword set `K` and similarity vector `S`,
//! the verse at corpus position `i` scores
//!
//! ```text
//! 0.3 * [E within themes] + 0.3 * |K ∩ tags| / max(|K|, 1) + 0.4 * S[i]
//! ```
//!
//! Verses are ranked by descending score; equal scores keep corpus order. The
//! top three records are returned.
//!
//! ## Submodules
//! - **`engine`**: Oracle orchestration and ranking.
//! - **`types`**: Query context, scored candidates, weights and errors.

pub mod engine;
pub mod types;

#[cfg(test)]
mod tests;
