//! Board-state-aware placement rules.
//!
//! Placement failures are an everyday user-facing outcome, so every check
//! here reports through a [`PlacementCheck`] value instead of an error or a
//! panic. The checks are independent of any single unit type; type-specific
//! knowledge comes from the registry.

use crate::constants::is_supported_grid_size;
use crate::models::{GeeseDirection, GridPosition, Span, Unit, UnitKind, UnitType};
use crate::units::{flying_geese, UnitDefinition, UnitRegistry};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Why a placement was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementRejection {
    /// Grid size outside the supported range
    #[error("grid size {grid_size} is not supported (expected 2 to 8)")]
    UnsupportedGridSize {
        /// Requested size
        grid_size: u8,
    },
    /// Footprint extends past the grid edge
    #[error("{span} unit at {position} does not fit on a {grid_size}×{grid_size} grid")]
    OutOfBounds {
        /// Anchor
        position: GridPosition,
        /// Footprint
        span: Span,
        /// Grid size
        grid_size: u8,
    },
    /// A covered cell is already taken
    #[error("{}", overlap_message(.cell, .unit_id))]
    Overlap {
        /// First conflicting cell
        cell: GridPosition,
        /// Unit occupying it, when known
        unit_id: Option<String>,
    },
    /// Span does not match what the unit's orientation requires
    #[error("{unit_type} unit has span {actual}, expected {expected}")]
    SpanMismatch {
        /// Unit type
        unit_type: UnitType,
        /// Span derived from the variant
        expected: Span,
        /// Span carried by the unit
        actual: Span,
    },
    /// Another unit already uses this id
    #[error("unit id '{id}' is already in use")]
    DuplicateId {
        /// Repeated id
        id: String,
    },
    /// Two-tap anchor has no free neighbor to complete the footprint
    #[error("no free cell next to {anchor} to complete the unit")]
    NoAdjacentCell {
        /// First tap
        anchor: GridPosition,
    },
    /// Second tap does not share an edge with the anchor
    #[error("cell {second} is not next to {anchor}")]
    NotAdjacent {
        /// First tap
        anchor: GridPosition,
        /// Second tap
        second: GridPosition,
    },
    /// No definition registered for the type
    #[error("unit type '{unit_type}' is not registered")]
    UnknownUnitType {
        /// Unit type
        unit_type: UnitType,
    },
}

fn overlap_message(cell: &GridPosition, unit_id: &Option<String>) -> String {
    match unit_id {
        Some(id) => format!("cell {cell} is already occupied by unit '{id}'"),
        None => format!("cell {cell} is already occupied"),
    }
}

/// Outcome of a placement check, as reported to the editor.
///
/// Serialized as `{valid, reason?, validAdjacentCells?}` with `reason` as a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementCheck {
    /// Whether the placement may proceed
    pub valid: bool,
    /// Why not, when invalid
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_reason"
    )]
    pub reason: Option<PlacementRejection>,
    /// Cells that complete a two-tap placement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_adjacent_cells: Option<Vec<GridPosition>>,
}

fn serialize_reason<S: Serializer>(
    reason: &Option<PlacementRejection>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match reason {
        Some(reason) => serializer.collect_str(reason),
        None => serializer.serialize_none(),
    }
}

impl PlacementCheck {
    /// A successful check.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
            valid_adjacent_cells: None,
        }
    }

    /// A failed check.
    #[must_use]
    pub const fn rejected(reason: PlacementRejection) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
            valid_adjacent_cells: None,
        }
    }

    /// A successful first tap with the cells that may complete it.
    #[must_use]
    pub const fn with_adjacent(cells: Vec<GridPosition>) -> Self {
        Self {
            valid: true,
            reason: None,
            valid_adjacent_cells: Some(cells),
        }
    }

    /// Converts into a `Result`, for callers that want `?`.
    pub fn into_result(self) -> Result<Option<Vec<GridPosition>>, PlacementRejection> {
        match self.reason {
            Some(reason) if !self.valid => Err(reason),
            _ => Ok(self.valid_adjacent_cells),
        }
    }
}

impl From<Result<(), PlacementRejection>> for PlacementCheck {
    fn from(result: Result<(), PlacementRejection>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(reason) => Self::rejected(reason),
        }
    }
}

/// Rejects grid sizes outside the supported range.
pub fn check_grid_size(grid_size: u8) -> Result<(), PlacementRejection> {
    if is_supported_grid_size(grid_size) {
        Ok(())
    } else {
        Err(PlacementRejection::UnsupportedGridSize { grid_size })
    }
}

/// Footprint must satisfy `row + rows ≤ grid_size` and `col + cols ≤ grid_size`.
pub fn check_bounds(
    position: GridPosition,
    span: Span,
    grid_size: u8,
) -> Result<(), PlacementRejection> {
    let limit = u16::from(grid_size);
    let fits_rows = u16::from(position.row) + u16::from(span.rows) <= limit;
    let fits_cols = u16::from(position.col) + u16::from(span.cols) <= limit;
    if fits_rows && fits_cols {
        Ok(())
    } else {
        Err(PlacementRejection::OutOfBounds {
            position,
            span,
            grid_size,
        })
    }
}

/// The unit's span must be the one its definition derives from its kind.
///
/// For flying geese this is the direction/span pairing; for fixed-span
/// units it catches corrupted documents.
pub fn check_span_consistency(
    definition: &UnitDefinition,
    kind: &UnitKind,
    span: Span,
) -> Result<(), PlacementRejection> {
    let expected = definition.span_for(kind);
    if expected == span {
        Ok(())
    } else {
        Err(PlacementRejection::SpanMismatch {
            unit_type: kind.unit_type(),
            expected,
            actual: span,
        })
    }
}

/// Which unit covers each cell of the board.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: HashMap<GridPosition, String>,
}

impl Occupancy {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decomposes every unit's span into cells, skipping `ignore_id`.
    ///
    /// The ignored unit is the one being edited in place, so it does not
    /// collide with its own previous footprint.
    #[must_use]
    pub fn from_units(units: &[Unit], ignore_id: Option<&str>) -> Self {
        let mut occupancy = Self::new();
        for unit in units {
            if ignore_id != Some(unit.id.as_str()) {
                occupancy.occupy(unit);
            }
        }
        occupancy
    }

    /// Marks the unit's cells as taken. Cells already taken keep their first
    /// occupant.
    pub fn occupy(&mut self, unit: &Unit) {
        for cell in unit.cells() {
            self.cells.entry(cell).or_insert_with(|| unit.id.clone());
        }
    }

    /// Whether `cell` is taken.
    #[must_use]
    pub fn is_occupied(&self, cell: GridPosition) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Id of the unit covering `cell`.
    #[must_use]
    pub fn occupant(&self, cell: GridPosition) -> Option<&str> {
        self.cells.get(&cell).map(String::as_str)
    }

    /// First cell (row-major) of the footprint that is already taken, with
    /// its occupant.
    #[must_use]
    pub fn conflicts_with(
        &self,
        position: GridPosition,
        span: Span,
    ) -> Option<(GridPosition, &str)> {
        span.cells(position)
            .into_iter()
            .find_map(|cell| self.occupant(cell).map(|id| (cell, id)))
    }

    /// Number of taken cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Checks whether `candidate` may be placed among `units`.
///
/// Runs, in order: grid size, registered type, span consistency, bounds,
/// id uniqueness and overlap. `ignore_id` excludes one existing unit from
/// the id and overlap checks, for rotate/flip edits of that unit.
#[must_use]
pub fn validate_unit_placement(
    registry: &UnitRegistry,
    units: &[Unit],
    grid_size: u8,
    candidate: &Unit,
    ignore_id: Option<&str>,
) -> PlacementCheck {
    let check = placement_result(registry, units, grid_size, candidate, ignore_id);
    if let Err(reason) = &check {
        debug!(unit = %candidate.id, %reason, "placement rejected");
    }
    check.into()
}

fn placement_result(
    registry: &UnitRegistry,
    units: &[Unit],
    grid_size: u8,
    candidate: &Unit,
    ignore_id: Option<&str>,
) -> Result<(), PlacementRejection> {
    check_grid_size(grid_size)?;

    let unit_type = candidate.unit_type();
    let definition = registry
        .get(unit_type)
        .ok_or(PlacementRejection::UnknownUnitType { unit_type })?;

    check_span_consistency(definition, &candidate.kind, candidate.span)?;
    check_bounds(candidate.position, candidate.span, grid_size)?;

    let others = || units.iter().filter(|u| ignore_id != Some(u.id.as_str()));
    if others().any(|u| u.id == candidate.id) {
        return Err(PlacementRejection::DuplicateId {
            id: candidate.id.clone(),
        });
    }

    let occupancy = Occupancy::from_units(units, ignore_id);
    if let Some((cell, id)) = occupancy.conflicts_with(candidate.position, candidate.span) {
        return Err(PlacementRejection::Overlap {
            cell,
            unit_id: Some(id.to_string()),
        });
    }

    Ok(())
}

/// First-tap check for a unit of `definition`'s type at `anchor`.
///
/// Two-tap units run their own placement hook and report the cells that may
/// complete the footprint; single-tap units check their default footprint.
#[must_use]
pub fn check_first_tap(
    definition: &UnitDefinition,
    anchor: GridPosition,
    grid_size: u8,
    occupancy: &Occupancy,
) -> PlacementCheck {
    if let Some(validate) = definition.validate_placement {
        return validate(anchor, grid_size, &|cell| occupancy.is_occupied(cell));
    }

    let result = check_grid_size(grid_size)
        .and_then(|()| check_bounds(anchor, definition.default_span, grid_size))
        .and_then(|()| {
            match occupancy.conflicts_with(anchor, definition.default_span) {
                Some((cell, id)) => Err(PlacementRejection::Overlap {
                    cell,
                    unit_id: Some(id.to_string()),
                }),
                None => Ok(()),
            }
        });
    result.into()
}

/// A completed flying-geese placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TwoTapPlacement {
    /// Top-left cell of the pair
    pub position: GridPosition,
    /// Direction from the anchor toward the second tap
    pub direction: GeeseDirection,
    /// Footprint matching the direction
    pub span: Span,
}

impl TwoTapPlacement {
    /// The kind to instantiate.
    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        UnitKind::FlyingGeese {
            direction: self.direction,
        }
    }
}

/// Turns an anchor tap and a second tap into a flying-geese footprint.
///
/// The second tap must be one of the anchor's valid adjacent cells.
pub fn complete_two_tap(
    anchor: GridPosition,
    second: GridPosition,
    grid_size: u8,
    occupancy: &Occupancy,
) -> Result<TwoTapPlacement, PlacementRejection> {
    let adjacent = flying_geese::validate_anchor(anchor, grid_size, &|cell| {
        occupancy.is_occupied(cell)
    })
    .into_result()?
    .unwrap_or_default();

    let Some(direction) = flying_geese::direction_between(anchor, second) else {
        return Err(PlacementRejection::NotAdjacent { anchor, second });
    };

    if !adjacent.contains(&second) {
        return Err(if second.in_grid(grid_size) {
            PlacementRejection::Overlap {
                cell: second,
                unit_id: occupancy.occupant(second).map(str::to_string),
            }
        } else {
            PlacementRejection::OutOfBounds {
                position: second,
                span: Span::SINGLE,
                grid_size,
            }
        });
    }

    Ok(TwoTapPlacement {
        position: GridPosition::new(anchor.row.min(second.row), anchor.col.min(second.col)),
        direction,
        span: flying_geese::span_for_direction(direction),
    })
}
