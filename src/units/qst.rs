//! Quarter-square triangle.
//!
//! The QST is 4-fold symmetric, so it has no variants. Rotating or flipping
//! one moves the fabric roles between its four quarters instead.

use super::transform::permute_roles;
use super::{
    PatchDefinition, PlacementMode, RoleTransforms, SpanBehavior, Thumbnail, TransformStrategy,
    UnitCategory, UnitDefinition,
};
use crate::geometry::{qst_triangles, PatchTriangle, TriangleGroup};
use crate::models::{PatchRoles, Span, UnitKind, UnitType};

const PATCHES: &[PatchDefinition] = &[
    PatchDefinition::new("top", "Top", "feature"),
    PatchDefinition::new("right", "Right", "background"),
    PatchDefinition::new("bottom", "Bottom", "feature"),
    PatchDefinition::new("left", "Left", "background"),
];

/// `(destination, source)` pairs: top takes left's role, right takes top's,
/// and so on around the square.
const ROTATE: &[(&str, &str)] = &[
    ("top", "left"),
    ("right", "top"),
    ("bottom", "right"),
    ("left", "bottom"),
];

const FLIP_HORIZONTAL: &[(&str, &str)] = &[("left", "right"), ("right", "left")];

const FLIP_VERTICAL: &[(&str, &str)] = &[("top", "bottom"), ("bottom", "top")];

/// Cycles the quarter roles one step.
#[must_use]
pub fn rotate_roles(roles: &PatchRoles) -> PatchRoles {
    permute_roles(roles, ROTATE)
}

/// Swaps the left and right quarters.
#[must_use]
pub fn flip_roles_horizontal(roles: &PatchRoles) -> PatchRoles {
    permute_roles(roles, FLIP_HORIZONTAL)
}

/// Swaps the top and bottom quarters.
#[must_use]
pub fn flip_roles_vertical(roles: &PatchRoles) -> PatchRoles {
    permute_roles(roles, FLIP_VERTICAL)
}

fn triangles(_kind: &UnitKind, width: f64, height: f64) -> TriangleGroup {
    let quarters = qst_triangles(width, height);
    vec![
        PatchTriangle::new("top", quarters.top),
        PatchTriangle::new("right", quarters.right),
        PatchTriangle::new("bottom", quarters.bottom),
        PatchTriangle::new("left", quarters.left),
    ]
}

/// Registry entry for [`UnitType::Qst`].
#[must_use]
pub fn definition() -> UnitDefinition {
    UnitDefinition {
        unit_type: UnitType::Qst,
        display_name: "Quarter-Square Triangle",
        category: UnitCategory::Triangles,
        default_span: Span::SINGLE,
        span_behavior: SpanBehavior::Fixed(Span::SINGLE),
        patches: PATCHES,
        variants: &[],
        default_kind: UnitKind::Qst,
        triangles,
        transforms: TransformStrategy::PatchRoles(RoleTransforms {
            rotate: rotate_roles,
            flip_horizontal: flip_roles_horizontal,
            flip_vertical: flip_roles_vertical,
        }),
        validate_placement: None,
        thumbnail: Thumbnail { glyph: "⊠" },
        placement_mode: PlacementMode::SingleTap,
        supports_batch_placement: true,
    }
}
