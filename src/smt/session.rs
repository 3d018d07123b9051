//! Scoped solver sessions
//!
//! One session drives exactly one satisfiability check. The underlying
//! solver context lives only inside [`SmtSession::run`], so nothing leaks
//! between independent instances: encode, check, and model extraction all
//! happen within the same scope, and the raw model never escapes it.

use super::encoder::ConstraintEncoder;
use super::extractor::{ModelExtractor, ModelTables};
use super::SmtError;
use crate::lattice::ProblemInstance;
use std::time::Duration;
use z3::{with_z3_config, Config, SatResult, Solver};

/// Outcome of one satisfiability check.
///
/// `Unknown` is a first-class outcome: a resource-bounded backend giving up
/// is not the same answer as a proof that no embedding exists, even though
/// the driver reports both as "not found".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Sat(ModelTables),
    Unsat,
    Unknown,
}

/// A single-use solver session for one problem instance.
pub struct SmtSession {
    timeout: Option<Duration>,
}

impl SmtSession {
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Attach an opaque solver-level time budget. On expiry the backend
    /// answers unknown rather than unsat.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Encode the instance, run the satisfiability check, and extract
    /// concrete tables from a sat model.
    ///
    /// The solver context is acquired on entry and released on every exit
    /// path, including unsat, unknown, and extraction faults.
    pub fn run(&self, instance: &ProblemInstance) -> Result<SolveOutcome, SmtError> {
        let mut cfg = Config::new();
        if let Some(timeout) = self.timeout {
            cfg.set_timeout_msec(timeout.as_millis() as u64);
        }

        with_z3_config(&cfg, || {
            let solver = Solver::new();
            let encoded = ConstraintEncoder::new(*instance).encode(&solver)?;

            match solver.check() {
                SatResult::Sat => {
                    let model = solver.get_model().ok_or(SmtError::ModelUnavailable)?;
                    let tables = ModelExtractor::extract(&model, &encoded, instance)?;
                    Ok(SolveOutcome::Sat(tables))
                }
                SatResult::Unsat => Ok(SolveOutcome::Unsat),
                SatResult::Unknown => Ok(SolveOutcome::Unknown),
            }
        })
    }
}

impl Default for SmtSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfiable_instance_yields_tables() {
        let instance = ProblemInstance::new(1, 3).unwrap();
        let outcome = SmtSession::new().run(&instance).unwrap();

        match outcome {
            SolveOutcome::Sat(tables) => {
                assert_eq!(tables.f.len(), 2);
                assert_eq!(tables.g.len(), 3);
            }
            other => panic!("expected sat, got {:?}", other),
        }
    }

    #[test]
    fn test_unsatisfiable_instance_reports_unsat() {
        // For n = 2, p = 5 the diagonal alone needs four distinct values
        // g[f_i^2 mod 5], but only three quadratic residues exist mod 5.
        let instance = ProblemInstance::new(2, 5).unwrap();
        let outcome = SmtSession::new().run(&instance).unwrap();
        assert_eq!(outcome, SolveOutcome::Unsat);
    }

    #[test]
    fn test_timeout_expiry_reports_unknown() {
        // 2080 nonlinear array constraints cannot be decided in a
        // millisecond; the expired budget must surface as unknown, which is
        // a different answer than unsat.
        let instance = ProblemInstance::new(6, 67).unwrap();
        let session = SmtSession::with_timeout(Some(Duration::from_millis(1)));
        let outcome = session.run(&instance).unwrap();
        assert_eq!(outcome, SolveOutcome::Unknown);
    }

    #[test]
    fn test_sessions_are_independent() {
        // Back-to-back runs over different instances must not contaminate
        // each other; a fresh session answers the same as a first run.
        let sat_instance = ProblemInstance::new(1, 3).unwrap();
        let unsat_instance = ProblemInstance::new(2, 5).unwrap();

        assert!(matches!(
            SmtSession::new().run(&sat_instance).unwrap(),
            SolveOutcome::Sat(_)
        ));
        assert_eq!(
            SmtSession::new().run(&unsat_instance).unwrap(),
            SolveOutcome::Unsat
        );
        assert!(matches!(
            SmtSession::new().run(&sat_instance).unwrap(),
            SolveOutcome::Sat(_)
        ));
    }
}
