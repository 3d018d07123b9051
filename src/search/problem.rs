//! Search driver: encode, solve, extract, verify, report

use super::verifier::{SolutionVerifier, VerificationReport};
use super::Solution;
use crate::config::Settings;
use crate::lattice::ProblemInstance;
use crate::smt::{ConstraintEncoder, SmtSession, SolveOutcome};
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// Why the search ended without a candidate.
///
/// The two reasons report identically to the caller but stay
/// distinguishable: an unsat proof rules an embedding out, a resource-bound
/// give-up does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The solver proved no embedding exists for this instance
    Unsatisfiable,
    /// The solver gave up, typically on timeout
    Unknown,
}

/// Terminal outcome of one embedding search.
#[derive(Debug)]
pub enum SearchOutcome {
    /// A candidate was produced and independently verified
    Verified {
        solution: Solution,
        report: VerificationReport,
    },
    /// A candidate was produced but failed independent verification.
    /// This signals an encoding or extraction defect and is never success.
    FoundUnverified {
        solution: Solution,
        report: VerificationReport,
    },
    /// No candidate was produced
    NotFound(NotFoundReason),
}

impl SearchOutcome {
    /// Whether a candidate was produced, verified or not
    pub fn found_candidate(&self) -> bool {
        !matches!(self, SearchOutcome::NotFound(_))
    }
}

/// One embedding search over one validated instance.
pub struct EmbeddingProblem {
    settings: Settings,
    instance: ProblemInstance,
}

impl EmbeddingProblem {
    /// Create a problem from settings, validating the instance they name.
    pub fn new(settings: Settings) -> Result<Self> {
        let instance = ProblemInstance::new(settings.instance.n, settings.instance.p)
            .context("Invalid problem instance")?;
        Ok(Self { settings, instance })
    }

    /// Create a problem for an already-validated instance (useful for tests).
    pub fn with_instance(settings: Settings, instance: ProblemInstance) -> Self {
        Self { settings, instance }
    }

    /// Run the search to a terminal outcome.
    ///
    /// Encoding, solving, and extraction all happen inside one scoped solver
    /// session; verification runs afterwards on plain integers.
    pub fn solve(&self) -> Result<SearchOutcome> {
        let start_time = Instant::now();

        println!("Searching for a {}-embedding...", self.instance);
        println!("{}", self.estimate_complexity());

        let timeout = self.settings.solver.timeout_seconds.map(Duration::from_secs);
        let session = SmtSession::with_timeout(timeout);

        let outcome = session
            .run(&self.instance)
            .context("Solver session failed")?;
        let solve_time = start_time.elapsed();

        match outcome {
            SolveOutcome::Unsat => {
                println!(
                    "No embedding exists for {} ({:.3}s)",
                    self.instance,
                    solve_time.as_secs_f64()
                );
                Ok(SearchOutcome::NotFound(NotFoundReason::Unsatisfiable))
            }
            SolveOutcome::Unknown => {
                println!(
                    "Solver gave up on {} ({:.3}s)",
                    self.instance,
                    solve_time.as_secs_f64()
                );
                Ok(SearchOutcome::NotFound(NotFoundReason::Unknown))
            }
            SolveOutcome::Sat(tables) => {
                println!(
                    "Found a candidate in {:.3}s, verifying...",
                    solve_time.as_secs_f64()
                );
                let solution = Solution::new(self.instance, tables.f, tables.g, solve_time);
                let report = SolutionVerifier::verify(&solution, &self.instance);
                if report.is_valid {
                    Ok(SearchOutcome::Verified { solution, report })
                } else {
                    eprintln!(
                        "Candidate failed independent verification: {}",
                        report
                            .error_message
                            .as_deref()
                            .unwrap_or("no detail available")
                    );
                    Ok(SearchOutcome::FoundUnverified { solution, report })
                }
            }
        }
    }

    /// The validated instance this problem searches over
    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    /// The problem settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get encoding statistics without solving
    pub fn encoding_statistics(&self) -> crate::smt::EncodingStatistics {
        ConstraintEncoder::new(self.instance).statistics()
    }

    /// Get an a-priori difficulty estimate without solving
    pub fn estimate_complexity(&self) -> crate::smt::ComplexityEstimate {
        ConstraintEncoder::new(self.instance).estimate_complexity()
    }
}
