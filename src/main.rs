//! Main CLI application for the meet embedding search

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meet_embedding::{
    config::{CliOverrides, Settings},
    lattice::ProblemInstance,
    search::{EmbeddingProblem, NotFoundReason, SearchOutcome, Solution, SolutionVerifier},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "meet_embedding")]
#[command(about = "Searches for Boolean-lattice meet embeddings into modular multiplication")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for an embedding for a given (n, p) pair
    Solve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Lattice parameter n (overrides config)
        #[arg(short)]
        n: Option<u32>,

        /// Prime modulus p (overrides config)
        #[arg(short)]
        p: Option<i64>,

        /// Solver timeout in seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Directory to save the solution to (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Re-verify a previously saved solution file
    Verify {
        /// Solution file (JSON) to check
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Show encoding statistics for an instance without solving it
    Analyze {
        /// Lattice parameter n
        #[arg(short)]
        n: u32,

        /// Prime modulus p
        #[arg(short)]
        p: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            n,
            p,
            timeout,
            output,
            verbose,
        } => solve_command(config, n, p, timeout, output, verbose),
        Commands::Verify { solution } => verify_command(solution),
        Commands::Analyze { n, p } => analyze_command(n, p),
    }
}

fn solve_command(
    config_path: Option<PathBuf>,
    n: Option<u32>,
    p: Option<i64>,
    timeout: Option<u64>,
    output_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    // Load configuration
    let mut settings = match &config_path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Settings::default(),
    };

    // Apply CLI overrides
    let cli_overrides = CliOverrides {
        n,
        p,
        timeout_seconds: timeout,
        output_dir: output_dir.clone(),
    };
    settings.merge_with_cli(&cli_overrides);

    // Validate before the core runs
    settings
        .validate()
        .context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  n: {}", settings.instance.n);
        println!("  p: {}", settings.instance.p);
        match settings.solver.timeout_seconds {
            Some(secs) => println!("  Timeout: {}s", secs),
            None => println!("  Timeout: none"),
        }
        println!();
    }

    let start_time = Instant::now();
    let problem =
        EmbeddingProblem::new(settings.clone()).context("Failed to create embedding problem")?;

    if verbose {
        println!("{}", problem.encoding_statistics());
    }

    let outcome = problem.solve().context("Embedding search failed")?;
    let total_time = start_time.elapsed();

    match outcome {
        SearchOutcome::NotFound(NotFoundReason::Unsatisfiable) => {
            println!(
                "{}",
                ColorOutput::warning(&format!(
                    "No embedding exists for (n = {}, p = {})",
                    settings.instance.n, settings.instance.p
                ))
            );
        }
        SearchOutcome::NotFound(NotFoundReason::Unknown) => {
            println!(
                "{}",
                ColorOutput::warning(
                    "No embedding found: the solver gave up before reaching an answer"
                )
            );
        }
        SearchOutcome::Verified { solution, report } => {
            println!(
                "{}",
                ColorOutput::success(&format!(
                    "An embedding was found and verified ({:.3}s)",
                    total_time.as_secs_f64()
                ))
            );
            println!("\n{}", SolutionFormatter::format_solution(&solution, &report));

            if settings.output.save_solution {
                SolutionFormatter::save_solution(
                    &solution,
                    &report,
                    &settings.output.output_directory,
                    &settings.output.format,
                )
                .context("Failed to save solution")?;
                println!(
                    "Solution saved to {}",
                    settings.output.output_directory.display()
                );
            }
        }
        SearchOutcome::FoundUnverified { solution, report } => {
            // A candidate that fails its own re-check points at a bug in the
            // encoding or extraction; surface it loudly, never as success.
            println!(
                "{}",
                ColorOutput::error("An embedding was found but could NOT be verified")
            );
            println!("\n{}", report);
            println!("{}", SolutionFormatter::format_solution(&solution, &report));
            anyhow::bail!("candidate failed independent verification");
        }
    }

    Ok(())
}

fn verify_command(solution_path: PathBuf) -> Result<()> {
    let solution = Solution::load_from_file(&solution_path)
        .with_context(|| format!("Failed to load solution from {}", solution_path.display()))?;

    // the instance was validated during deserialization
    let instance = solution.instance;
    let report = SolutionVerifier::verify(&solution, &instance);
    println!("{}", report);

    if report.is_valid {
        println!("{}", ColorOutput::success("Solution is valid"));
        Ok(())
    } else {
        println!("{}", ColorOutput::error("Solution is invalid"));
        anyhow::bail!("solution failed verification");
    }
}

fn analyze_command(n: u32, p: i64) -> Result<()> {
    let instance = ProblemInstance::new(n, p).context("Invalid problem instance")?;

    let mut settings = Settings::default();
    settings.instance.n = n;
    settings.instance.p = p;
    let problem = EmbeddingProblem::with_instance(settings, instance);

    println!("Instance: {}", instance);
    println!("{}", problem.encoding_statistics());
    println!("{}", problem.estimate_complexity());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["meet_embedding", "solve", "-n", "2", "-p", "7"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_analyze_parsing() {
        let cli = Cli::try_parse_from(["meet_embedding", "analyze", "-n", "1", "-p", "3"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_verify_command_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solution.json");

        let instance = ProblemInstance::new(1, 3).unwrap();
        let solution = Solution::new(
            instance,
            vec![0, 1],
            vec![0, 1, 0],
            std::time::Duration::ZERO,
        );
        solution.save_to_file(&path).unwrap();

        assert!(verify_command(path).is_ok());
    }

    #[test]
    fn test_verify_command_rejects_tampered_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solution.json");
        std::fs::write(
            &path,
            r#"{"instance":{"n":1,"p":9},"f":[0,1],"g":[0,1,0,0,0,0,0,0,0]}"#,
        )
        .unwrap();

        assert!(verify_command(path).is_err());
    }

    #[test]
    fn test_verify_command_rejects_bad_solution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solution.json");

        let instance = ProblemInstance::new(1, 3).unwrap();
        let solution = Solution::new(
            instance,
            vec![0, 1],
            vec![1, 1, 0],
            std::time::Duration::ZERO,
        );
        solution.save_to_file(&path).unwrap();

        assert!(verify_command(path).is_err());
    }
}
