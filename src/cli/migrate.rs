//! Rewrites block documents in the current format.

use crate::cli::common::{registry, CliError, CliResult};
use crate::services::{BlockService, DocumentFormat};
use clap::Args;
use std::path::PathBuf;

/// Rewrite a block file, converting legacy `shapes` documents to `units`
#[derive(Debug, Clone, Args)]
pub struct MigrateArgs {
    /// Path to block JSON file
    #[arg(short, long, value_name = "FILE")]
    pub block: PathBuf,

    /// Write the result here instead of overwriting the input
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl MigrateArgs {
    /// Execute the migrate command
    pub fn execute(&self) -> CliResult<()> {
        let registry = registry()?;
        let (block, format) = BlockService::load_with_format(registry, &self.block)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        let output = self.output.as_ref().unwrap_or(&self.block);
        BlockService::save(&block, output).map_err(|e| CliError::io(format!("{e:#}")))?;

        match format {
            DocumentFormat::Legacy => println!(
                "✓ Migrated legacy block ({} units) to {}",
                block.units.len(),
                output.display()
            ),
            DocumentFormat::Current => println!(
                "✓ Block already current, rewrote {} ({} units)",
                output.display(),
                block.units.len()
            ),
        }
        Ok(())
    }
}
