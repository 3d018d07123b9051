//! Boolean-lattice meet embedding search
//!
//! Given a lattice parameter n and a prime p > n, this library searches for
//! tables f: [0, 2^n) -> [0, p) and g: [0, p) -> [0, 2^n) such that
//! g[(f[i] * f[j]) mod p] equals the bitwise AND of i and j for every
//! 0 <= i <= j < 2^n. The constraint system is handed to an SMT solver over
//! integers and one array term; every candidate is independently re-checked
//! before it is reported as an embedding.

pub mod config;
pub mod lattice;
pub mod search;
pub mod smt;
pub mod utils;

pub use config::Settings;
pub use lattice::ProblemInstance;
pub use search::{EmbeddingProblem, SearchOutcome, Solution};

use anyhow::Result;

/// Main entry point for running one embedding search
pub fn find_embedding(settings: Settings) -> Result<SearchOutcome> {
    let problem = EmbeddingProblem::new(settings)?;
    problem.solve()
}
