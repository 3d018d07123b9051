//! Validated problem instances

use super::primes::is_prime;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Largest supported lattice parameter.
///
/// The encoding grows as 4^n constraints, so anything near this bound is
/// already far beyond what a solver will finish. The cap keeps the index
/// arithmetic comfortably inside i64.
pub const MAX_LATTICE_PARAMETER: u32 = 16;

/// Reasons an (n, p) pair is rejected before the search runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    #[error("modulus p = {0} is not prime")]
    NotPrime(i64),
    #[error("modulus p = {p} must exceed the lattice parameter n = {n}")]
    ModulusTooSmall { p: i64, n: u32 },
    #[error("lattice parameter n = {n} exceeds the supported maximum {max}")]
    LatticeTooLarge { n: u32, max: u32 },
}

/// A validated search instance: the Boolean lattice on n bits together with
/// a prime modulus p > n.
///
/// Instances are immutable once constructed; every component downstream of
/// validation may assume `p` prime and `p > n` without rechecking.
/// Deserialization goes through [`ProblemInstance::new`], so a tampered
/// solution file cannot smuggle an unvalidated pair past the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProblemInstance {
    n: u32,
    p: i64,
}

impl<'de> Deserialize<'de> for ProblemInstance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            n: u32,
            p: i64,
        }

        let raw = Raw::deserialize(deserializer)?;
        ProblemInstance::new(raw.n, raw.p).map_err(serde::de::Error::custom)
    }
}

impl ProblemInstance {
    /// Validate and construct an instance.
    pub fn new(n: u32, p: i64) -> Result<Self, InstanceError> {
        if n > MAX_LATTICE_PARAMETER {
            return Err(InstanceError::LatticeTooLarge {
                n,
                max: MAX_LATTICE_PARAMETER,
            });
        }
        if !is_prime(p) {
            return Err(InstanceError::NotPrime(p));
        }
        if p <= n as i64 {
            return Err(InstanceError::ModulusTooSmall { p, n });
        }
        Ok(Self { n, p })
    }

    /// The lattice parameter n.
    pub fn n(&self) -> u32 {
        self.n
    }

    /// The prime modulus p.
    pub fn p(&self) -> i64 {
        self.p
    }

    /// Number of lattice elements, 2^n. This is the domain size of f.
    pub fn size(&self) -> i64 {
        1i64 << self.n
    }

    /// Number of unordered index pairs (i, j) with i <= j, and therefore the
    /// number of equality constraints the encoder will assert.
    pub fn pair_count(&self) -> i64 {
        let size = self.size();
        size * (size + 1) / 2
    }

    /// Iterate over every index pair (i, j) with 0 <= i <= j < size.
    pub fn index_pairs(&self) -> impl Iterator<Item = (i64, i64)> {
        let size = self.size();
        (0..size).flat_map(move |i| (i..size).map(move |j| (i, j)))
    }
}

impl std::fmt::Display for ProblemInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(n = {}, p = {})", self.n, self.p)
    }
}
