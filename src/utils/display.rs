//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::search::{Solution, VerificationReport};
use anyhow::Result;
use itertools::Itertools;
use std::path::Path;

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a candidate and its verification report for console output
    pub fn format_solution(solution: &Solution, report: &VerificationReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Embedding for {} ===\n", solution.instance));
        if report.is_valid {
            output.push_str("Status: found and verified\n");
        } else {
            output.push_str("Status: found but NOT verified\n");
            if let Some(message) = &report.error_message {
                output.push_str(&format!("Reason: {}\n", message));
            }
        }
        output.push_str(&format!(
            "Solve time: {:.3}s\n",
            solution.solve_time.as_secs_f64()
        ));
        output.push_str(&format!("Pairs checked: {}\n", report.pairs_checked));
        output.push('\n');

        output.push_str(&Self::format_table("f", &solution.f));
        output.push('\n');
        output.push_str(&Self::format_table("g", &solution.g));

        output
    }

    /// Format one table, one entry per line
    pub fn format_table(name: &str, table: &[i64]) -> String {
        let mut output = String::new();
        output.push_str(&format!("Map `{}`:\n", name));
        for (i, value) in table.iter().enumerate() {
            output.push_str(&format!("\t{}[{}] = {}\n", name, i, value));
        }
        output
    }

    /// Format one table on a single line, for compact summaries
    pub fn format_table_inline(table: &[i64]) -> String {
        format!("[{}]", table.iter().join(", "))
    }

    /// Save a solution to the output directory in the requested format
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        report: &VerificationReport,
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        let stem = format!(
            "embedding_n{}_p{}",
            solution.instance.n(),
            solution.instance.p()
        );

        match format {
            OutputFormat::Text => {
                let filepath = output_dir.join(format!("{}.txt", stem));
                std::fs::write(filepath, Self::format_solution(solution, report))?;
            }
            OutputFormat::Json => {
                let filepath = output_dir.join(format!("{}.json", stem));
                solution.save_to_file(filepath)?;
            }
        }

        Ok(())
    }
}

/// Colored console output
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(&self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::ProblemInstance;
    use crate::search::SolutionVerifier;
    use std::time::Duration;

    fn sample() -> (Solution, VerificationReport) {
        let instance = ProblemInstance::new(1, 3).unwrap();
        let solution = Solution::new(instance, vec![0, 1], vec![0, 1, 0], Duration::ZERO);
        let report = SolutionVerifier::verify(&solution, &instance);
        (solution, report)
    }

    #[test]
    fn test_format_solution_mentions_both_tables() {
        let (solution, report) = sample();
        let text = SolutionFormatter::format_solution(&solution, &report);

        assert!(text.contains("found and verified"));
        assert!(text.contains("f[0] = 0"));
        assert!(text.contains("f[1] = 1"));
        assert!(text.contains("g[2] = 0"));
    }

    #[test]
    fn test_format_table_inline() {
        assert_eq!(
            SolutionFormatter::format_table_inline(&[0, 1, 2]),
            "[0, 1, 2]"
        );
    }

    #[test]
    fn test_save_solution_text_and_json() {
        let (solution, report) = sample();
        let dir = tempfile::tempdir().unwrap();

        SolutionFormatter::save_solution(&solution, &report, dir.path(), &OutputFormat::Text)
            .unwrap();
        assert!(dir.path().join("embedding_n1_p3.txt").exists());

        SolutionFormatter::save_solution(&solution, &report, dir.path(), &OutputFormat::Json)
            .unwrap();
        let restored =
            Solution::load_from_file(dir.path().join("embedding_n1_p3.json")).unwrap();
        assert_eq!(restored.f, solution.f);
    }
}
