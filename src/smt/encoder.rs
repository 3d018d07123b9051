//! Constraint encoder for the embedding search
//!
//! Turns a validated instance into the finite-domain constraint system
//!
//! ```text
//!   0 <= f_i < p                          for all i < 2^n
//!   g[(f_i * f_j) mod p] == (i & j)       for all 0 <= i <= j < 2^n
//! ```
//!
//! where g is a free Int -> Int array term. The reduction mod p before the
//! lookup is essential: f_i * f_j can exceed p - 1, and g is only pinned
//! down on [0, p).

use super::SmtError;
use crate::lattice::ProblemInstance;
use z3::ast::{Array, Dynamic, Int};
use z3::{Solver, Sort};

/// Symbolic handles produced by encoding: one bounded integer constant per
/// f(i), plus the array constant standing in for g.
pub struct EncodedEmbedding {
    pub f_vars: Vec<Int>,
    pub g: Array,
    pub constraint_count: usize,
}

/// Encodes one problem instance. Construction is cheap; all solver
/// interaction happens in [`ConstraintEncoder::encode`].
pub struct ConstraintEncoder {
    instance: ProblemInstance,
}

impl ConstraintEncoder {
    pub fn new(instance: ProblemInstance) -> Self {
        Self { instance }
    }

    /// Assert the full constraint system into `solver` and return the
    /// symbolic handles needed to read a model back.
    ///
    /// Deterministic: the same instance always yields the same assertion
    /// set, in the same order, with the same constant names.
    pub fn encode(&self, solver: &Solver) -> Result<EncodedEmbedding, SmtError> {
        let size = self.instance.size();
        let p = Int::from_i64(self.instance.p());

        let mut f_vars = Vec::with_capacity(size as usize);
        for i in 0..size {
            let fi = Int::new_const(format!("f_{}", i));
            solver.assert(fi.ge(0));
            solver.assert(fi.lt(&p));
            f_vars.push(fi);
        }

        let g = Array::new_const("g", &Sort::int(), &Sort::int());

        let mut constraint_count = 0;
        for (i, j) in self.instance.index_pairs() {
            let product = (&f_vars[i as usize] * &f_vars[j as usize]).modulo(&p);
            let lookup = g
                .select(&Dynamic::from_ast(&product))
                .as_int()
                .ok_or_else(|| SmtError::MalformedTerm {
                    term: format!("g[(f_{} * f_{}) mod p]", i, j),
                })?;
            solver.assert(lookup.eq(Int::from_i64(i & j)));
            constraint_count += 1;
        }

        Ok(EncodedEmbedding {
            f_vars,
            g,
            constraint_count,
        })
    }

    /// Get encoding statistics without touching a solver.
    pub fn statistics(&self) -> EncodingStatistics {
        EncodingStatistics {
            n: self.instance.n(),
            p: self.instance.p(),
            // one bounded Int per f(i), plus the array constant
            variable_count: self.instance.size() as usize + 1,
            constraint_count: self.instance.pair_count() as usize,
        }
    }

    /// Rough a-priori difficulty estimate, driven by the constraint count.
    pub fn estimate_complexity(&self) -> ComplexityEstimate {
        let constraint_count = self.instance.pair_count() as usize;
        let level = if constraint_count < 100 {
            ComplexityLevel::Low
        } else if constraint_count < 10_000 {
            ComplexityLevel::Medium
        } else if constraint_count < 1_000_000 {
            ComplexityLevel::High
        } else {
            ComplexityLevel::VeryHigh
        };

        ComplexityEstimate {
            level,
            variable_count: self.instance.size() as usize + 1,
            constraint_count,
        }
    }
}

/// Statistics about the generated constraint system
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub n: u32,
    pub p: i64,
    pub variable_count: usize,
    pub constraint_count: usize,
}

/// Difficulty estimate for an instance
#[derive(Debug, Clone)]
pub struct ComplexityEstimate {
    pub level: ComplexityLevel,
    pub variable_count: usize,
    pub constraint_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Instance: (n = {}, p = {})", self.n, self.p)?;
        writeln!(f, "  Symbolic constants: {}", self.variable_count)?;
        writeln!(f, "  Equality constraints: {}", self.constraint_count)?;
        Ok(())
    }
}

impl std::fmt::Display for ComplexityEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Complexity Estimate:")?;
        writeln!(f, "  Level: {:?}", self.level)?;
        writeln!(f, "  Symbolic constants: {}", self.variable_count)?;
        writeln!(f, "  Equality constraints: {}", self.constraint_count)?;

        let recommendation = match self.level {
            ComplexityLevel::Low => "Should solve quickly",
            ComplexityLevel::Medium => "May take some time to solve",
            ComplexityLevel::High => "Likely to be slow, consider a timeout",
            ComplexityLevel::VeryHigh => "The 4^n constraint growth makes this impractical",
        };
        writeln!(f, "  Recommendation: {}", recommendation)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use z3::{with_z3_config, Config};

    #[test]
    fn test_statistics_match_instance() {
        let instance = ProblemInstance::new(2, 7).unwrap();
        let encoder = ConstraintEncoder::new(instance);
        let stats = encoder.statistics();

        assert_eq!(stats.variable_count, 5); // four f_i plus g
        assert_eq!(stats.constraint_count, 10); // 4 * 5 / 2
    }

    #[test]
    fn test_encode_asserts_every_pair() {
        let instance = ProblemInstance::new(2, 7).unwrap();
        let cfg = Config::new();
        with_z3_config(&cfg, || {
            let solver = Solver::new();
            let encoder = ConstraintEncoder::new(instance);
            let encoded = encoder.encode(&solver).unwrap();

            assert_eq!(encoded.f_vars.len(), 4);
            assert_eq!(encoded.constraint_count, 10);
        });
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let instance = ProblemInstance::new(2, 11).unwrap();
        let cfg = Config::new();
        with_z3_config(&cfg, || {
            let encoder = ConstraintEncoder::new(instance);

            let first = Solver::new();
            encoder.encode(&first).unwrap();
            let second = Solver::new();
            encoder.encode(&second).unwrap();

            let render = |solver: &Solver| {
                solver
                    .get_assertions()
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
            };
            assert_eq!(render(&first), render(&second));
        });
    }

    #[test]
    fn test_complexity_levels_grow_with_n() {
        let small = ConstraintEncoder::new(ProblemInstance::new(1, 3).unwrap());
        let medium = ConstraintEncoder::new(ProblemInstance::new(5, 37).unwrap());
        let large = ConstraintEncoder::new(ProblemInstance::new(8, 257).unwrap());

        assert_eq!(small.estimate_complexity().level, ComplexityLevel::Low);
        assert_eq!(medium.estimate_complexity().level, ComplexityLevel::Medium);
        assert_eq!(large.estimate_complexity().level, ComplexityLevel::High);
    }
}
