//! Configuration module

pub mod settings;

pub use settings::{
    CliOverrides, InstanceConfig, OutputConfig, OutputFormat, Settings, SolverConfig,
};
