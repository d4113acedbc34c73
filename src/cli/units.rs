//! Lists the registered unit definitions.

use crate::cli::common::{print_json, registry, CliResult};
use crate::models::{Span, UnitType};
use crate::units::{PlacementMode, UnitCategory, UnitDefinition};
use clap::Args;
use serde::Serialize;

/// List the unit types available for placement
#[derive(Debug, Clone, Args)]
pub struct UnitsArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PatchInfo {
    id: &'static str,
    name: &'static str,
    default_fabric_role: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UnitInfo {
    #[serde(rename = "type")]
    unit_type: UnitType,
    display_name: &'static str,
    category: UnitCategory,
    glyph: &'static str,
    default_span: Span,
    variants: Vec<&'static str>,
    default_variant: Option<&'static str>,
    patches: Vec<PatchInfo>,
    placement_mode: PlacementMode,
    supports_batch_placement: bool,
}

impl From<&UnitDefinition> for UnitInfo {
    fn from(definition: &UnitDefinition) -> Self {
        Self {
            unit_type: definition.unit_type,
            display_name: definition.display_name,
            category: definition.category,
            glyph: definition.thumbnail.glyph,
            default_span: definition.default_span,
            variants: definition.variant_ids(),
            default_variant: definition.default_variant(),
            patches: definition
                .patches
                .iter()
                .map(|p| PatchInfo {
                    id: p.id,
                    name: p.name,
                    default_fabric_role: p.default_fabric_role,
                })
                .collect(),
            placement_mode: definition.placement_mode,
            supports_batch_placement: definition.supports_batch_placement,
        }
    }
}

impl UnitsArgs {
    /// Execute the units command
    pub fn execute(&self) -> CliResult<()> {
        let registry = registry()?;
        let units: Vec<UnitInfo> = registry.iter().map(UnitInfo::from).collect();

        if self.json {
            return print_json(&units);
        }

        println!("{} unit types", units.len());
        for unit in &units {
            let variants = if unit.variants.is_empty() {
                "-".to_string()
            } else {
                unit.variants.join(", ")
            };
            let patches = unit
                .patches
                .iter()
                .map(|p| p.id)
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "  {} {:<14} {:<24} {}×{}  variants: {variants}  patches: {patches}",
                unit.glyph,
                unit.unit_type.as_str(),
                unit.display_name,
                unit.default_span.rows,
                unit.default_span.cols
            );
        }
        Ok(())
    }
}
