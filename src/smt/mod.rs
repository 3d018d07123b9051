//! SMT encoding and solving for the embedding search

pub mod encoder;
pub mod extractor;
pub mod session;

pub use encoder::{ComplexityEstimate, ComplexityLevel, ConstraintEncoder, EncodedEmbedding, EncodingStatistics};
pub use extractor::{ModelExtractor, ModelTables};
pub use session::{SmtSession, SolveOutcome};

use thiserror::Error;

/// Failures on the solver path that must stay distinguishable from an
/// ordinary "no embedding found" outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmtError {
    /// The encoder produced a term of an unexpected sort. Unreachable for a
    /// validated instance; kept as a guard rather than a panic.
    #[error("encoding produced a non-integer term for {term}")]
    MalformedTerm { term: String },
    /// The solver reported sat but handed back no model to evaluate.
    #[error("solver reported sat but produced no model")]
    ModelUnavailable,
    /// A model evaluation did not reduce to a concrete integer. A sat answer
    /// with an inextractable model is a defect, never a NotFound.
    #[error("model evaluation of {term} did not reduce to a concrete integer")]
    ExtractionFault { term: String },
}
