//! Half-square triangle: a cell split along one diagonal.

use super::{
    PatchDefinition, PlacementMode, SpanBehavior, Thumbnail, TransformStrategy, UnitCategory,
    UnitDefinition, VariantTransforms,
};
use crate::geometry::{hst_triangles, PatchTriangle, TriangleGroup};
use crate::models::{HstVariant, Span, UnitKind, UnitType};

const PATCHES: &[PatchDefinition] = &[
    PatchDefinition::new("primary", "Primary", "feature"),
    PatchDefinition::new("secondary", "Secondary", "background"),
];

const VARIANTS: &[UnitKind] = &[
    UnitKind::Hst {
        variant: HstVariant::Nw,
    },
    UnitKind::Hst {
        variant: HstVariant::Ne,
    },
    UnitKind::Hst {
        variant: HstVariant::Sw,
    },
    UnitKind::Hst {
        variant: HstVariant::Se,
    },
];

/// nw → ne → se → sw → nw
#[must_use]
pub const fn rotate_variant(variant: HstVariant) -> HstVariant {
    match variant {
        HstVariant::Nw => HstVariant::Ne,
        HstVariant::Ne => HstVariant::Se,
        HstVariant::Se => HstVariant::Sw,
        HstVariant::Sw => HstVariant::Nw,
    }
}

/// nw ↔ ne, sw ↔ se
#[must_use]
pub const fn flip_variant_horizontal(variant: HstVariant) -> HstVariant {
    match variant {
        HstVariant::Nw => HstVariant::Ne,
        HstVariant::Ne => HstVariant::Nw,
        HstVariant::Sw => HstVariant::Se,
        HstVariant::Se => HstVariant::Sw,
    }
}

/// nw ↔ sw, ne ↔ se
#[must_use]
pub const fn flip_variant_vertical(variant: HstVariant) -> HstVariant {
    match variant {
        HstVariant::Nw => HstVariant::Sw,
        HstVariant::Sw => HstVariant::Nw,
        HstVariant::Ne => HstVariant::Se,
        HstVariant::Se => HstVariant::Ne,
    }
}

fn map_variant(kind: UnitKind, f: fn(HstVariant) -> HstVariant) -> UnitKind {
    match kind {
        UnitKind::Hst { variant } => UnitKind::Hst {
            variant: f(variant),
        },
        other => other,
    }
}

fn rotate(kind: UnitKind) -> UnitKind {
    map_variant(kind, rotate_variant)
}

fn flip_horizontal(kind: UnitKind) -> UnitKind {
    map_variant(kind, flip_variant_horizontal)
}

fn flip_vertical(kind: UnitKind) -> UnitKind {
    map_variant(kind, flip_variant_vertical)
}

fn triangles(kind: &UnitKind, width: f64, height: f64) -> TriangleGroup {
    let variant = match kind {
        UnitKind::Hst { variant } => *variant,
        _ => HstVariant::default(),
    };
    let halves = hst_triangles(variant, width, height);
    vec![
        PatchTriangle::new("primary", halves.primary),
        PatchTriangle::new("secondary", halves.secondary),
    ]
}

/// Registry entry for [`UnitType::Hst`].
#[must_use]
pub fn definition() -> UnitDefinition {
    UnitDefinition {
        unit_type: UnitType::Hst,
        display_name: "Half-Square Triangle",
        category: UnitCategory::Triangles,
        default_span: Span::SINGLE,
        span_behavior: SpanBehavior::Fixed(Span::SINGLE),
        patches: PATCHES,
        variants: VARIANTS,
        default_kind: UnitKind::Hst {
            variant: HstVariant::Nw,
        },
        triangles,
        transforms: TransformStrategy::Variant(VariantTransforms {
            rotate,
            flip_horizontal,
            flip_vertical,
        }),
        validate_placement: None,
        thumbnail: Thumbnail { glyph: "◩" },
        placement_mode: PlacementMode::SingleTap,
        supports_batch_placement: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_cycle() {
        assert_eq!(rotate_variant(HstVariant::Nw), HstVariant::Ne);
        assert_eq!(rotate_variant(HstVariant::Ne), HstVariant::Se);
        assert_eq!(rotate_variant(HstVariant::Se), HstVariant::Sw);
        assert_eq!(rotate_variant(HstVariant::Sw), HstVariant::Nw);
    }

    #[test]
    fn test_rotation_has_order_four() {
        for v in HstVariant::ALL {
            let r = rotate_variant(rotate_variant(rotate_variant(rotate_variant(v))));
            assert_eq!(r, v);
        }
    }

    #[test]
    fn test_flips_are_involutions() {
        for v in HstVariant::ALL {
            assert_eq!(flip_variant_horizontal(flip_variant_horizontal(v)), v);
            assert_eq!(flip_variant_vertical(flip_variant_vertical(v)), v);
        }
        assert_eq!(flip_variant_horizontal(HstVariant::Sw), HstVariant::Se);
        assert_eq!(flip_variant_vertical(HstVariant::Ne), HstVariant::Se);
    }

    #[test]
    fn test_triangles_tagged_by_patch() {
        let group = triangles(
            &UnitKind::Hst {
                variant: HstVariant::Se,
            },
            10.0,
            10.0,
        );
        let ids: Vec<_> = group.iter().map(|t| t.patch_id.as_str()).collect();
        assert_eq!(ids, ["primary", "secondary"]);
    }
}
