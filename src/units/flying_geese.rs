//! Flying geese: a two-cell pointer unit.
//!
//! The footprint follows the direction (one row by two columns for
//! left/right, two rows by one column for up/down), so rotating a goose
//! swaps its span. It is placed with two taps: the anchor cell and an
//! edge-adjacent free cell.

use super::{
    PatchDefinition, PlacementMode, SpanBehavior, Thumbnail, TransformStrategy, UnitCategory,
    UnitDefinition, VariantTransforms,
};
use crate::constants::is_supported_grid_size;
use crate::geometry::{flying_geese_triangles, PatchTriangle, TriangleGroup};
use crate::models::{GeeseDirection, GridPosition, Span, UnitKind, UnitType};
use crate::placement::{PlacementCheck, PlacementRejection};

const PATCHES: &[PatchDefinition] = &[
    PatchDefinition::new("goose", "Goose", "feature"),
    PatchDefinition::new("sky1", "Sky 1", "background"),
    PatchDefinition::new("sky2", "Sky 2", "background"),
];

const VARIANTS: &[UnitKind] = &[
    UnitKind::FlyingGeese {
        direction: GeeseDirection::Up,
    },
    UnitKind::FlyingGeese {
        direction: GeeseDirection::Down,
    },
    UnitKind::FlyingGeese {
        direction: GeeseDirection::Left,
    },
    UnitKind::FlyingGeese {
        direction: GeeseDirection::Right,
    },
];

/// Footprint for a direction.
#[must_use]
pub const fn span_for_direction(direction: GeeseDirection) -> Span {
    if direction.is_horizontal() {
        Span::new(1, 2)
    } else {
        Span::new(2, 1)
    }
}

/// up → right → down → left → up
#[must_use]
pub const fn rotate_direction(direction: GeeseDirection) -> GeeseDirection {
    match direction {
        GeeseDirection::Up => GeeseDirection::Right,
        GeeseDirection::Right => GeeseDirection::Down,
        GeeseDirection::Down => GeeseDirection::Left,
        GeeseDirection::Left => GeeseDirection::Up,
    }
}

/// left ↔ right; up and down are unchanged
#[must_use]
pub const fn flip_direction_horizontal(direction: GeeseDirection) -> GeeseDirection {
    match direction {
        GeeseDirection::Left => GeeseDirection::Right,
        GeeseDirection::Right => GeeseDirection::Left,
        other => other,
    }
}

/// up ↔ down; left and right are unchanged
#[must_use]
pub const fn flip_direction_vertical(direction: GeeseDirection) -> GeeseDirection {
    match direction {
        GeeseDirection::Up => GeeseDirection::Down,
        GeeseDirection::Down => GeeseDirection::Up,
        other => other,
    }
}

/// Direction of a goose whose footprint covers `anchor` and `second`,
/// pointing from the anchor toward the second cell.
///
/// Returns `None` when the cells are not edge-adjacent.
#[must_use]
pub fn direction_between(anchor: GridPosition, second: GridPosition) -> Option<GeeseDirection> {
    if !anchor.is_edge_adjacent(second) {
        return None;
    }
    Some(if second.row < anchor.row {
        GeeseDirection::Up
    } else if second.row > anchor.row {
        GeeseDirection::Down
    } else if second.col < anchor.col {
        GeeseDirection::Left
    } else {
        GeeseDirection::Right
    })
}

fn span_of(kind: &UnitKind) -> Span {
    match kind {
        UnitKind::FlyingGeese { direction } => span_for_direction(*direction),
        _ => Span::SINGLE,
    }
}

fn map_direction(kind: UnitKind, f: fn(GeeseDirection) -> GeeseDirection) -> UnitKind {
    match kind {
        UnitKind::FlyingGeese { direction } => UnitKind::FlyingGeese {
            direction: f(direction),
        },
        other => other,
    }
}

fn rotate(kind: UnitKind) -> UnitKind {
    map_direction(kind, rotate_direction)
}

fn flip_horizontal(kind: UnitKind) -> UnitKind {
    map_direction(kind, flip_direction_horizontal)
}

fn flip_vertical(kind: UnitKind) -> UnitKind {
    map_direction(kind, flip_direction_vertical)
}

fn triangles(kind: &UnitKind, width: f64, height: f64) -> TriangleGroup {
    let direction = match kind {
        UnitKind::FlyingGeese { direction } => *direction,
        _ => GeeseDirection::default(),
    };
    let parts = flying_geese_triangles(direction, width, height);
    vec![
        PatchTriangle::new("goose", parts.goose),
        PatchTriangle::new("sky1", parts.sky1),
        PatchTriangle::new("sky2", parts.sky2),
    ]
}

/// First-tap check: the anchor must be a free cell with at least one free
/// edge-adjacent cell to complete the goose.
///
/// Adjacent cells are reported in up, down, left, right order.
pub fn validate_anchor(
    anchor: GridPosition,
    grid_size: u8,
    is_occupied: &dyn Fn(GridPosition) -> bool,
) -> PlacementCheck {
    if !is_supported_grid_size(grid_size) {
        return PlacementCheck::rejected(PlacementRejection::UnsupportedGridSize { grid_size });
    }
    if !anchor.in_grid(grid_size) {
        return PlacementCheck::rejected(PlacementRejection::OutOfBounds {
            position: anchor,
            span: Span::SINGLE,
            grid_size,
        });
    }
    if is_occupied(anchor) {
        return PlacementCheck::rejected(PlacementRejection::Overlap {
            cell: anchor,
            unit_id: None,
        });
    }

    let adjacent: Vec<GridPosition> = anchor
        .edge_neighbors()
        .into_iter()
        .filter(|cell| cell.in_grid(grid_size) && !is_occupied(*cell))
        .collect();

    if adjacent.is_empty() {
        return PlacementCheck::rejected(PlacementRejection::NoAdjacentCell { anchor });
    }
    PlacementCheck::with_adjacent(adjacent)
}

/// Registry entry for [`UnitType::FlyingGeese`].
#[must_use]
pub fn definition() -> UnitDefinition {
    UnitDefinition {
        unit_type: UnitType::FlyingGeese,
        display_name: "Flying Geese",
        category: UnitCategory::Compound,
        default_span: span_for_direction(GeeseDirection::Right),
        span_behavior: SpanBehavior::VariantDependent(span_of),
        patches: PATCHES,
        variants: VARIANTS,
        default_kind: UnitKind::FlyingGeese {
            direction: GeeseDirection::Right,
        },
        triangles,
        transforms: TransformStrategy::Variant(VariantTransforms {
            rotate,
            flip_horizontal,
            flip_vertical,
        }),
        validate_placement: Some(validate_anchor),
        thumbnail: Thumbnail { glyph: "▶" },
        placement_mode: PlacementMode::TwoTap,
        supports_batch_placement: false,
    }
}
