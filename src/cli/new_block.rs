//! Creates an empty block document.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::models::Block;
use crate::placement::check_grid_size;
use crate::services::BlockService;
use clap::Args;
use std::path::PathBuf;
use tracing::warn;

/// Create an empty block file
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Where to write the block JSON
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Grid size N of the N×N block (defaults to the configured grid size)
    #[arg(short, long, value_name = "N")]
    pub grid_size: Option<u8>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self) -> CliResult<()> {
        let grid_size = match self.grid_size {
            Some(size) => size,
            None => configured_grid_size(),
        };
        check_grid_size(grid_size).map_err(|e| CliError::invalid_input(e.to_string()))?;

        if self.output.exists() && !self.force {
            return Err(CliError::invalid_input(format!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            )));
        }

        let block = Block::new(grid_size);
        BlockService::save(&block, &self.output).map_err(|e| CliError::io(format!("{e:#}")))?;

        println!(
            "✓ Created {grid_size}×{grid_size} block at {}",
            self.output.display()
        );
        Ok(())
    }
}

fn configured_grid_size() -> u8 {
    match Config::load() {
        Ok(config) => config.editor.default_grid_size,
        Err(e) => {
            warn!("ignoring unreadable config: {e:#}");
            Block::default().grid_size
        }
    }
}
