//! Independent verification of candidate embeddings
//!
//! The verifier never trusts the solver path: it re-checks the defining
//! property in plain integer arithmetic, so an encoding or extraction bug
//! cannot masquerade as a found embedding.

use super::Solution;
use crate::lattice::ProblemInstance;

/// Re-checks candidate tables against the defining property.
pub struct SolutionVerifier;

/// Result of verifying one candidate.
///
/// A failed report on a solver-produced candidate signals a defect in the
/// encoding or extraction, not the non-existence of an embedding.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub is_valid: bool,
    /// Whether both tables had the right length and in-range entries.
    /// The pairwise sweep only runs when this holds.
    pub shape_ok: bool,
    pub pairs_checked: i64,
    pub first_violation: Option<PairViolation>,
    pub error_message: Option<String>,
}

/// One index pair at which the defining property failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairViolation {
    pub i: i64,
    pub j: i64,
    /// (f[i] * f[j]) mod p, the g index that was consulted
    pub lookup_index: i64,
    pub expected: i64,
    pub actual: i64,
}

impl SolutionVerifier {
    /// Verify a candidate against its instance.
    ///
    /// Shape first: f must have exactly 2^n entries in [0, p), g exactly p
    /// entries in [0, 2^n). Then the full sweep over every 0 <= i <= j < 2^n
    /// checks g[(f[i] * f[j]) mod p] == (i & j). The sweep is never
    /// truncated; it stops early only to remember the first violation, after
    /// having examined every pair.
    pub fn verify(solution: &Solution, instance: &ProblemInstance) -> VerificationReport {
        let size = instance.size();
        let p = instance.p();

        if let Some(message) = Self::check_shape(solution, instance) {
            return VerificationReport {
                is_valid: false,
                shape_ok: false,
                pairs_checked: 0,
                first_violation: None,
                error_message: Some(message),
            };
        }

        let mut pairs_checked = 0;
        let mut first_violation = None;
        for i in 0..size {
            for j in i..size {
                pairs_checked += 1;
                let product = solution.f[i as usize] as i128 * solution.f[j as usize] as i128;
                let lookup_index = (product % p as i128) as i64;
                let expected = i & j;
                let actual = solution.g[lookup_index as usize];
                if actual != expected && first_violation.is_none() {
                    first_violation = Some(PairViolation {
                        i,
                        j,
                        lookup_index,
                        expected,
                        actual,
                    });
                }
            }
        }

        let error_message = first_violation.as_ref().map(|v| {
            format!(
                "pair ({}, {}): g[{}] = {} but i AND j = {}",
                v.i, v.j, v.lookup_index, v.actual, v.expected
            )
        });

        VerificationReport {
            is_valid: first_violation.is_none(),
            shape_ok: true,
            pairs_checked,
            first_violation,
            error_message,
        }
    }

    /// Check table lengths and entry ranges; returns a description of the
    /// first problem found, or None when the shape is sound.
    fn check_shape(solution: &Solution, instance: &ProblemInstance) -> Option<String> {
        let size = instance.size();
        let p = instance.p();

        if solution.f.len() as i64 != size {
            return Some(format!(
                "f has {} entries, expected {}",
                solution.f.len(),
                size
            ));
        }
        if solution.g.len() as i64 != p {
            return Some(format!(
                "g has {} entries, expected {}",
                solution.g.len(),
                p
            ));
        }
        for (i, &x) in solution.f.iter().enumerate() {
            if x < 0 || x >= p {
                return Some(format!("f[{}] = {} is outside [0, {})", i, x, p));
            }
        }
        for (k, &x) in solution.g.iter().enumerate() {
            if x < 0 || x >= size {
                return Some(format!("g[{}] = {} is outside [0, {})", k, x, size));
            }
        }
        None
    }
}

impl std::fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Verification Report:")?;
        writeln!(f, "  Valid: {}", self.is_valid)?;
        writeln!(f, "  Shape checks passed: {}", self.shape_ok)?;
        writeln!(f, "  Pairs checked: {}", self.pairs_checked)?;
        if let Some(message) = &self.error_message {
            writeln!(f, "  Error: {}", message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn solution(n: u32, p: i64, f: Vec<i64>, g: Vec<i64>) -> (Solution, ProblemInstance) {
        let instance = ProblemInstance::new(n, p).unwrap();
        (
            Solution::new(instance, f, g, Duration::ZERO),
            instance,
        )
    }

    #[test]
    fn test_trivial_instance_verifies() {
        // n = 0: a single element, 0 AND 0 = 0; g[0] must be 0, g[1] is free
        let (sol, instance) = solution(0, 2, vec![0], vec![0, 0]);
        let report = SolutionVerifier::verify(&sol, &instance);
        assert!(report.is_valid);
        assert_eq!(report.pairs_checked, 1);

        let (sol, instance) = solution(0, 2, vec![0], vec![0, 1]);
        assert!(!SolutionVerifier::verify(&sol, &instance).is_valid); // g[1] = 1 out of range for size 1
    }

    #[test]
    fn test_known_embedding_verifies() {
        // n = 1, p = 3: pairs (0,0) and (0,1) hit g[0], pair (1,1) hits
        // g[1^2 mod 3] = g[1]. So f = [0, 1] needs g[0] = 0 and g[1] = 1,
        // with g[2] free.
        let (sol, instance) = solution(1, 3, vec![0, 1], vec![0, 1, 0]);
        let report = SolutionVerifier::verify(&sol, &instance);
        assert!(report.is_valid);
        assert!(report.shape_ok);
        assert_eq!(report.pairs_checked, 3);
        assert!(report.first_violation.is_none());
    }

    #[test]
    fn test_single_corrupted_entry_fails() {
        // Same tables with g[0] corrupted: the very first pair (0, 0) now
        // reads 1 where 0 AND 0 = 0
        let (sol, instance) = solution(1, 3, vec![0, 1], vec![1, 1, 0]);
        let report = SolutionVerifier::verify(&sol, &instance);
        assert!(!report.is_valid);
        assert!(report.shape_ok);

        let violation = report.first_violation.unwrap();
        assert_eq!((violation.i, violation.j), (0, 0));
        assert_eq!(violation.expected, 0);
        assert_eq!(violation.actual, 1);
    }

    #[test]
    fn test_full_sweep_reaches_every_pair() {
        // A violation only at the very last pair (i = j = size - 1) must be
        // caught; a truncated sweep would miss it.
        let (sol, instance) = solution(1, 3, vec![0, 2], vec![0, 0, 0]);
        // pair (1,1): f[1]^2 mod 3 = 1, g[1] = 0 but 1 AND 1 = 1
        let report = SolutionVerifier::verify(&sol, &instance);
        assert!(!report.is_valid);
        assert_eq!(report.pairs_checked, 3);
        assert_eq!(
            report.first_violation.unwrap(),
            PairViolation {
                i: 1,
                j: 1,
                lookup_index: 1,
                expected: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn test_wrong_f_length_rejected() {
        let (sol, instance) = solution(1, 3, vec![0], vec![0, 0, 1]);
        let report = SolutionVerifier::verify(&sol, &instance);
        assert!(!report.is_valid);
        assert!(!report.shape_ok);
        assert_eq!(report.pairs_checked, 0); // sweep never ran
    }

    #[test]
    fn test_wrong_g_length_rejected() {
        let (sol, instance) = solution(1, 3, vec![0, 1], vec![0, 0]);
        let report = SolutionVerifier::verify(&sol, &instance);
        assert!(!report.shape_ok);
    }

    #[test]
    fn test_out_of_range_entries_rejected() {
        // f entry >= p
        let (sol, instance) = solution(1, 3, vec![0, 3], vec![0, 0, 1]);
        assert!(!SolutionVerifier::verify(&sol, &instance).shape_ok);

        // negative f entry
        let (sol, instance) = solution(1, 3, vec![0, -1], vec![0, 0, 1]);
        assert!(!SolutionVerifier::verify(&sol, &instance).shape_ok);

        // g entry >= size
        let (sol, instance) = solution(1, 3, vec![0, 1], vec![0, 0, 2]);
        assert!(!SolutionVerifier::verify(&sol, &instance).shape_ok);
    }
}
