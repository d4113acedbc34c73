//! Geometry command: prints the colored triangles of a block.

use crate::cli::common::{load_block, print_json, registry, CliError, CliResult};
use crate::config::Config;
use crate::services::render_block;
use clap::Args;
use std::path::PathBuf;

/// Print the drawable triangles of a block
#[derive(Debug, Clone, Args)]
pub struct GeometryArgs {
    /// Path to block JSON file
    #[arg(short, long, value_name = "FILE")]
    pub block: PathBuf,

    /// Pixel size of one grid cell (defaults to the configured cell size)
    #[arg(long, value_name = "PX")]
    pub cell_size: Option<f64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl GeometryArgs {
    /// Execute the geometry command
    pub fn execute(&self) -> CliResult<()> {
        let cell_size = match self.cell_size {
            Some(size) if size.is_finite() && size > 0.0 => size,
            Some(size) => {
                return Err(CliError::invalid_input(format!(
                    "Cell size must be a positive number, got {size}"
                )))
            }
            None => Config::load().unwrap_or_default().editor.cell_size,
        };

        let registry = registry()?;
        let block = load_block(registry, &self.block)?;
        let patches = render_block(registry, &block, cell_size, None);

        if self.json {
            return print_json(&patches);
        }

        println!(
            "{} patches ({}×{} grid, {cell_size} px cells)",
            patches.len(),
            block.grid_size,
            block.grid_size
        );
        for patch in &patches {
            let points = patch
                .points
                .iter()
                .map(|p| format!("({}, {})", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            println!(
                "  {:<36} {:<10} {}  {}",
                patch.unit_id, patch.patch_id, patch.color, points
            );
        }
        Ok(())
    }
}
