//! Search orchestration: driver, candidate solutions, verification

pub mod problem;
pub mod solution;
pub mod verifier;

pub use problem::{EmbeddingProblem, NotFoundReason, SearchOutcome};
pub use solution::{Solution, SolutionSummary};
pub use verifier::{PairViolation, SolutionVerifier, VerificationReport};
