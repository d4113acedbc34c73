//! Dry-run placement check against an existing block.

use crate::cli::common::{load_block, print_json, registry, CliError, CliResult};
use crate::models::{GridPosition, Unit, UnitConfig, UnitType};
use crate::placement::{check_first_tap, validate_unit_placement, PlacementCheck};
use crate::units::PlacementMode;
use clap::Args;
use std::path::PathBuf;

/// Check whether a unit could be placed on a block (the file is not modified)
#[derive(Debug, Clone, Args)]
pub struct PlaceArgs {
    /// Path to block JSON file
    #[arg(short, long, value_name = "FILE")]
    pub block: PathBuf,

    /// Unit type (square, hst, qst, flying_geese)
    #[arg(short, long, value_name = "TYPE")]
    pub unit: String,

    /// Row of the top-left cell (0-based)
    #[arg(long, value_name = "R")]
    pub row: u8,

    /// Column of the top-left cell (0-based)
    #[arg(long, value_name = "C")]
    pub col: u8,

    /// Variant id (e.g. ne, up)
    #[arg(long, value_name = "V")]
    pub variant: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl PlaceArgs {
    /// Execute the place command
    pub fn execute(&self) -> CliResult<()> {
        let unit_type: UnitType = self.unit.parse().map_err(CliError::invalid_input)?;
        let registry = registry()?;
        let definition = registry.get(unit_type).ok_or_else(|| {
            CliError::invalid_input(format!("Unit type '{unit_type}' is not registered"))
        })?;
        let block = load_block(registry, &self.block)?;
        let position = GridPosition::new(self.row, self.col);

        // Without a variant a two-tap unit is only anchored; report where the
        // second tap may go.
        let check = if definition.placement_mode == PlacementMode::TwoTap && self.variant.is_none()
        {
            check_first_tap(definition, position, block.grid_size, &block.occupancy())
        } else {
            let config = UnitConfig {
                variant: self.variant.clone(),
                ..UnitConfig::default()
            };
            let unit = Unit::new(registry, unit_type, position, &config)
                .map_err(|e| CliError::invalid_input(e.to_string()))?;
            validate_unit_placement(registry, &block.units, block.grid_size, &unit, None)
        };

        if self.json {
            print_json(&check)?;
        } else {
            print_human(unit_type, position, &check);
        }

        if check.valid {
            Ok(())
        } else {
            Err(CliError::validation("Placement rejected"))
        }
    }
}

fn print_human(unit_type: UnitType, position: GridPosition, check: &PlacementCheck) {
    if check.valid {
        println!("✓ {unit_type} can be placed at {position}");
    } else if let Some(reason) = &check.reason {
        println!("✗ {unit_type} cannot be placed at {position}: {reason}");
    } else {
        println!("✗ {unit_type} cannot be placed at {position}");
    }

    if let Some(cells) = &check.valid_adjacent_cells {
        let cells = cells
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("  second tap: {cells}");
    }
}
