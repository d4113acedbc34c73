//! Rendering preparation: turns a block into colored polygons.
//!
//! This is the lenient side of fabric-role handling. A role missing from the
//! palette renders in the fallback color and an unregistered unit type is
//! skipped, so a damaged document still draws.

use serde::Serialize;
use tracing::warn;

use crate::geometry::{triangle_to_flat_points, Point, Triangle};
use crate::models::{resolve_color, Block, PaletteOverrides, RgbColor};
use crate::units::UnitRegistry;

/// One filled triangle in block pixel space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawablePatch {
    /// Unit the triangle belongs to
    pub unit_id: String,
    /// Patch it colors
    pub patch_id: String,
    /// Vertices, offset to the unit's position on the block
    pub points: [Point; 3],
    /// Resolved fill color
    pub color: RgbColor,
}

impl DrawablePatch {
    /// Vertices as `[x1, y1, x2, y2, x3, y3]`.
    #[must_use]
    pub fn flat_points(&self) -> [f64; 6] {
        triangle_to_flat_points(&Triangle {
            points: self.points,
        })
    }
}

/// Builds the drawable patches of every unit, in unit then patch order.
///
/// `overrides` take priority over the block's own palette overrides, which
/// take priority over the preview palette.
#[must_use]
pub fn render_block(
    registry: &UnitRegistry,
    block: &Block,
    cell_size: f64,
    overrides: Option<&PaletteOverrides>,
) -> Vec<DrawablePatch> {
    let mut effective = block.palette_overrides.clone();
    if let Some(extra) = overrides {
        effective.extend(extra.iter().map(|(k, v)| (k.clone(), *v)));
    }

    let mut patches = Vec::new();
    for unit in &block.units {
        let Some(definition) = registry.get(unit.unit_type()) else {
            warn!(
                unit = %unit.id,
                unit_type = %unit.unit_type(),
                "skipping unit with unregistered type"
            );
            continue;
        };

        let width = f64::from(unit.span.cols) * cell_size;
        let height = f64::from(unit.span.rows) * cell_size;
        let dx = f64::from(unit.position.col) * cell_size;
        let dy = f64::from(unit.position.row) * cell_size;

        for part in definition.triangles_for(&unit.kind, width, height) {
            let role = unit
                .role_for(&part.patch_id)
                .or_else(|| definition.patch(&part.patch_id).map(|p| p.default_fabric_role))
                .unwrap_or_default();

            patches.push(DrawablePatch {
                unit_id: unit.id.clone(),
                color: resolve_color(&block.preview_palette, role, Some(&effective)),
                points: part.triangle.translate(dx, dy).points,
                patch_id: part.patch_id,
            });
        }
    }
    patches
}
