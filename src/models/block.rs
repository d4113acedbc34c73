//! A block: one N×N design grid with its units and preview palette.
//!
//! The edit actions here are what an editor store calls on user input. Every
//! action that changes a footprint revalidates it against the board and
//! leaves the block untouched when the result would be invalid.

use crate::constants::{BLOCK_FORMAT_VERSION, DEFAULT_GRID_SIZE};
use crate::models::{FlipAxis, Palette, PaletteOverrides, Unit, UnitType};
use crate::placement::{validate_unit_placement, Occupancy, PlacementCheck};
use crate::units::{UnitConfigError, UnitDefinition, UnitRegistry};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// An edit action that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// No unit with this id
    #[error("no unit with id '{0}'")]
    UnitNotFound(String),
    /// The unit's type has no registered definition
    #[error("unit type '{0}' is not registered")]
    UnknownUnitType(UnitType),
    /// The change violates the unit's configuration schema
    #[error(transparent)]
    Config(#[from] UnitConfigError),
}

/// One quilt block.
///
/// Loading goes through `BlockService`, which normalizes legacy documents;
/// the block itself only serializes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Document format version
    pub version: u32,
    /// Grid size N (the block is N×N cells)
    pub grid_size: u8,
    /// Placed units
    pub units: Vec<Unit>,
    /// Palette the block is previewed with
    pub preview_palette: Palette,
    /// Per-block color overrides by role id
    #[serde(skip_serializing_if = "PaletteOverrides::is_empty")]
    pub palette_overrides: PaletteOverrides,
}

impl Default for Block {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

impl Block {
    /// Creates an empty block previewed with the starter palette.
    #[must_use]
    pub fn new(grid_size: u8) -> Self {
        Self {
            version: BLOCK_FORMAT_VERSION,
            grid_size,
            units: Vec::new(),
            preview_palette: Palette::default_quilt(),
            palette_overrides: PaletteOverrides::new(),
        }
    }

    /// Looks up a unit by id.
    #[must_use]
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Which unit covers each cell.
    #[must_use]
    pub fn occupancy(&self) -> Occupancy {
        Occupancy::from_units(&self.units, None)
    }

    /// Whether no units are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Adds `unit` if it fits; the returned check says why not otherwise.
    ///
    /// The unit's configuration is checked against its definition first, so
    /// undeclared patches or missing roles are an error rather than a
    /// placement outcome.
    pub fn place_unit(
        &mut self,
        registry: &UnitRegistry,
        unit: Unit,
    ) -> Result<PlacementCheck, EditError> {
        if let Some(definition) = registry.get(unit.unit_type()) {
            definition.check_unit(&unit)?;
        }

        let check = validate_unit_placement(registry, &self.units, self.grid_size, &unit, None);
        if check.valid {
            debug!(
                unit = %unit.id,
                unit_type = %unit.unit_type(),
                position = %unit.position,
                "placed unit"
            );
            self.units.push(unit);
        }
        Ok(check)
    }

    /// Rotates a unit a quarter turn in place.
    pub fn rotate_unit(
        &mut self,
        registry: &UnitRegistry,
        id: &str,
    ) -> Result<PlacementCheck, EditError> {
        self.transform_unit(registry, id, UnitDefinition::rotate)
    }

    /// Mirrors a unit across `axis` in place.
    pub fn flip_unit(
        &mut self,
        registry: &UnitRegistry,
        id: &str,
        axis: FlipAxis,
    ) -> Result<PlacementCheck, EditError> {
        self.transform_unit(registry, id, |def, unit| def.flip(unit, axis))
    }

    fn transform_unit(
        &mut self,
        registry: &UnitRegistry,
        id: &str,
        transform: impl Fn(&UnitDefinition, &Unit) -> Unit,
    ) -> Result<PlacementCheck, EditError> {
        let index = self.index_of(id)?;
        let definition = definition_for(registry, &self.units[index])?;
        let transformed = transform(definition, &self.units[index]);

        let check = validate_unit_placement(
            registry,
            &self.units,
            self.grid_size,
            &transformed,
            Some(id),
        );
        if check.valid {
            self.units[index] = transformed;
        }
        Ok(check)
    }

    /// Assigns a fabric role to one patch of a unit.
    pub fn recolor_patch(
        &mut self,
        registry: &UnitRegistry,
        id: &str,
        patch_id: &str,
        role_id: &str,
    ) -> Result<(), EditError> {
        let index = self.index_of(id)?;
        let definition = definition_for(registry, &self.units[index])?;

        if definition.patch(patch_id).is_none() {
            return Err(UnitConfigError::UnknownPatch {
                unit_type: definition.unit_type,
                patch: patch_id.to_string(),
            }
            .into());
        }
        if role_id.trim().is_empty() {
            return Err(UnitConfigError::EmptyRole {
                unit_type: definition.unit_type,
                patch: patch_id.to_string(),
            }
            .into());
        }

        debug!(unit = %id, patch = %patch_id, role = %role_id, "recolored patch");
        self.units[index]
            .patch_roles
            .insert(patch_id.to_string(), role_id.to_string());
        Ok(())
    }

    /// Removes and returns a unit.
    pub fn remove_unit(&mut self, id: &str) -> Option<Unit> {
        let index = self.units.iter().position(|u| u.id == id)?;
        debug!(unit = %id, "removed unit");
        Some(self.units.remove(index))
    }

    fn index_of(&self, id: &str) -> Result<usize, EditError> {
        self.units
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| EditError::UnitNotFound(id.to_string()))
    }
}

fn definition_for<'r>(
    registry: &'r UnitRegistry,
    unit: &Unit,
) -> Result<&'r UnitDefinition, EditError> {
    registry
        .get(unit.unit_type())
        .ok_or(EditError::UnknownUnitType(unit.unit_type()))
}
