//! Plain square: one patch, no orientation.

use super::{
    PatchDefinition, PlacementMode, SpanBehavior, Thumbnail, TransformStrategy, UnitCategory,
    UnitDefinition,
};
use crate::geometry::{hst_triangles, PatchTriangle, TriangleGroup};
use crate::models::{HstVariant, Span, UnitKind, UnitType};

const PATCHES: &[PatchDefinition] = &[PatchDefinition::new("fill", "Fill", "background")];

/// Two triangles split along the nw diagonal, both colored by `fill`.
///
/// Drawing the square as triangles keeps every unit renderable by the same
/// polygon path.
fn triangles(_kind: &UnitKind, width: f64, height: f64) -> TriangleGroup {
    let halves = hst_triangles(HstVariant::Nw, width, height);
    vec![
        PatchTriangle::new("fill", halves.primary),
        PatchTriangle::new("fill", halves.secondary),
    ]
}

/// Registry entry for [`UnitType::Square`].
#[must_use]
pub fn definition() -> UnitDefinition {
    UnitDefinition {
        unit_type: UnitType::Square,
        display_name: "Square",
        category: UnitCategory::Basic,
        default_span: Span::SINGLE,
        span_behavior: SpanBehavior::Fixed(Span::SINGLE),
        patches: PATCHES,
        variants: &[],
        default_kind: UnitKind::Square,
        triangles,
        transforms: TransformStrategy::Symmetric,
        validate_placement: None,
        thumbnail: Thumbnail { glyph: "■" },
        placement_mode: PlacementMode::SingleTap,
        supports_batch_placement: true,
    }
}
