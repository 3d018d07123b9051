//! Configuration settings for the embedding search

use crate::lattice::ProblemInstance;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub instance: InstanceConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

/// The (n, p) pair to search over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Lattice parameter: f's domain has 2^n elements
    pub n: u32,
    /// Prime modulus, must exceed n
    pub p: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Optional solver-level time budget; expiry surfaces as an unknown
    /// answer, never as unsat
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_solution: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instance: InstanceConfig { n: 1, p: 3 },
            solver: SolverConfig {
                timeout_seconds: None,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_solution: false,
                output_directory: PathBuf::from("output/solutions"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings. This is the boundary that keeps invalid
    /// instances (composite p, p <= n) out of the search core.
    pub fn validate(&self) -> Result<()> {
        ProblemInstance::new(self.instance.n, self.instance.p)
            .context("Invalid problem instance")?;

        if let Some(0) = self.solver.timeout_seconds {
            anyhow::bail!("Timeout must be positive when set");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(n) = cli_overrides.n {
            self.instance.n = n;
        }
        if let Some(p) = cli_overrides.p {
            self.instance.p = p;
        }
        if let Some(timeout) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = Some(timeout);
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
            self.output.save_solution = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub n: Option<u32>,
    pub p: Option<i64>,
    pub timeout_seconds: Option<u64>,
    pub output_dir: Option<PathBuf>,
}
