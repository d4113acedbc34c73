//! Validation command for block files.

use crate::cli::common::{load_block, print_json, registry, CliError, CliResult};
use crate::config::Config;
use crate::validation::{BlockValidator, ValidationError, ValidationWarning};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

/// Validate a block file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to block JSON file
    #[arg(short, long, value_name = "FILE")]
    pub block: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// JSON response for `validate`
#[derive(Debug, Serialize)]
struct ValidationResponse<'a> {
    valid: bool,
    strict: bool,
    errors: &'a [ValidationError],
    warnings: &'a [ValidationWarning],
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let registry = registry()?;
        let block = load_block(registry, &self.block)?;

        let strict = self.strict || strict_from_config();
        let report = BlockValidator::new(registry, &block).validate();
        let passed = report.passes(strict);

        if self.json {
            print_json(&ValidationResponse {
                valid: passed,
                strict,
                errors: &report.errors,
                warnings: &report.warnings,
            })?;
        } else {
            if passed {
                println!("✓ Validation passed ({} units)", block.units.len());
            } else {
                println!("✗ Validation failed");
            }
            let details = report.format_message();
            if !details.is_empty() {
                println!("\n{details}");
            }
        }

        if !report.is_valid() {
            return Err(CliError::validation("Validation failed"));
        }
        if !passed {
            return Err(CliError::validation("Warnings found in strict mode"));
        }
        Ok(())
    }
}

fn strict_from_config() -> bool {
    match Config::load() {
        Ok(config) => config.validation.strict,
        Err(e) => {
            warn!("ignoring unreadable config: {e:#}");
            false
        }
    }
}
