//! Candidate embeddings produced by the search

use crate::lattice::ProblemInstance;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A candidate embedding: the two concrete tables read out of a sat model.
///
/// Immutable once built. Whether the tables actually satisfy the defining
/// property is the verifier's call, not recorded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The instance this candidate was produced for
    pub instance: ProblemInstance,
    /// f: one entry per lattice element, each in [0, p)
    pub f: Vec<i64>,
    /// g: one entry per residue mod p, each in [0, 2^n)
    pub g: Vec<i64>,
    /// Time taken by the solver session that produced this candidate
    #[serde(skip)]
    pub solve_time: Duration,
}

impl Solution {
    pub fn new(instance: ProblemInstance, f: Vec<i64>, g: Vec<i64>, solve_time: Duration) -> Self {
        Self {
            instance,
            f,
            g,
            solve_time,
        }
    }

    /// Get a compact summary of the candidate
    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            n: self.instance.n(),
            p: self.instance.p(),
            f_entries: self.f.len(),
            g_entries: self.g.len(),
            solve_time_ms: self.solve_time.as_millis() as u64,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

/// Compact summary of a candidate embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionSummary {
    pub n: u32,
    pub p: i64,
    pub f_entries: usize,
    pub g_entries: usize,
    pub solve_time_ms: u64,
}
