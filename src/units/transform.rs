//! Rotate/flip algebra for units.
//!
//! Two unrelated strategies exist: units with orientation variants swap the
//! variant id (and may change span), while units with 4-fold symmetry keep
//! their geometry and cycle the fabric roles between patches instead. The
//! strategy is declared on the definition rather than inferred.

use super::UnitDefinition;
use crate::models::{FlipAxis, PatchRoles, Unit, UnitKind};
use std::fmt;
use tracing::debug;

/// Variant tables: every variant-bearing unit supplies all three.
#[derive(Clone, Copy)]
pub struct VariantTransforms {
    /// Quarter turn clockwise
    pub rotate: fn(UnitKind) -> UnitKind,
    /// Mirror left↔right
    pub flip_horizontal: fn(UnitKind) -> UnitKind,
    /// Mirror top↔bottom
    pub flip_vertical: fn(UnitKind) -> UnitKind,
}

/// Patch-role tables for units rotated by recoloring.
#[derive(Clone, Copy)]
pub struct RoleTransforms {
    /// Quarter turn of the colors
    pub rotate: fn(&PatchRoles) -> PatchRoles,
    /// Mirror left↔right
    pub flip_horizontal: fn(&PatchRoles) -> PatchRoles,
    /// Mirror top↔bottom
    pub flip_vertical: fn(&PatchRoles) -> PatchRoles,
}

/// Declared rotate/flip capability of a unit type.
#[derive(Clone, Copy)]
pub enum TransformStrategy {
    /// Visually symmetric: rotate and flip leave the unit unchanged
    Symmetric,
    /// Orientation is a variant id
    Variant(VariantTransforms),
    /// Orientation is carried by patch-role assignments
    PatchRoles(RoleTransforms),
}

impl fmt::Debug for TransformStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Symmetric => "Symmetric",
            Self::Variant(_) => "Variant",
            Self::PatchRoles(_) => "PatchRoles",
        })
    }
}

/// Reassigns roles so that `dst` receives the role previously on `src`.
///
/// Patches not named as a destination keep their role. A destination whose
/// source had no role ends up without one.
#[must_use]
pub fn permute_roles(roles: &PatchRoles, moves: &[(&str, &str)]) -> PatchRoles {
    let mut out = roles.clone();
    for (dst, _) in moves {
        out.remove(*dst);
    }
    for (dst, src) in moves {
        if let Some(role) = roles.get(*src) {
            out.insert((*dst).to_string(), role.clone());
        }
    }
    out
}

impl UnitDefinition {
    /// Returns `unit` turned a quarter clockwise.
    ///
    /// The anchor (top-left cell) is kept; the span is recomputed from the
    /// new variant, so the caller must revalidate placement.
    #[must_use]
    pub fn rotate(&self, unit: &Unit) -> Unit {
        let rotated = match self.transforms {
            TransformStrategy::Symmetric => unit.clone(),
            TransformStrategy::Variant(tables) => self.with_kind(unit, (tables.rotate)(unit.kind)),
            TransformStrategy::PatchRoles(tables) => Unit {
                patch_roles: (tables.rotate)(&unit.patch_roles),
                ..unit.clone()
            },
        };
        debug!(
            unit = %unit.id,
            unit_type = %self.unit_type,
            from = ?unit.kind.variant_id(),
            to = ?rotated.kind.variant_id(),
            "rotated unit"
        );
        rotated
    }

    /// Returns `unit` mirrored across `axis`.
    #[must_use]
    pub fn flip(&self, unit: &Unit, axis: FlipAxis) -> Unit {
        let flipped = match self.transforms {
            TransformStrategy::Symmetric => unit.clone(),
            TransformStrategy::Variant(tables) => {
                let table = match axis {
                    FlipAxis::Horizontal => tables.flip_horizontal,
                    FlipAxis::Vertical => tables.flip_vertical,
                };
                self.with_kind(unit, table(unit.kind))
            }
            TransformStrategy::PatchRoles(tables) => {
                let table = match axis {
                    FlipAxis::Horizontal => tables.flip_horizontal,
                    FlipAxis::Vertical => tables.flip_vertical,
                };
                Unit {
                    patch_roles: table(&unit.patch_roles),
                    ..unit.clone()
                }
            }
        };
        debug!(unit = %unit.id, unit_type = %self.unit_type, ?axis, "flipped unit");
        flipped
    }

    fn with_kind(&self, unit: &Unit, kind: UnitKind) -> Unit {
        Unit {
            kind,
            span: self.span_for(&kind),
            ..unit.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeeseDirection, GridPosition, HstVariant, Span, UnitConfig};
    use crate::units::{flying_geese, hst, qst, square};

    fn roles(pairs: &[(&str, &str)]) -> PatchRoles {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_permute_roles() {
        let before = roles(&[("a", "red"), ("b", "blue"), ("c", "green")]);
        let after = permute_roles(&before, &[("a", "b"), ("b", "a")]);
        assert_eq!(after, roles(&[("a", "blue"), ("b", "red"), ("c", "green")]));
    }

    #[test]
    fn test_permute_roles_missing_source() {
        let before = roles(&[("a", "red")]);
        let after = permute_roles(&before, &[("a", "b"), ("b", "a")]);
        assert_eq!(after, roles(&[("b", "red")]));
    }

    #[test]
    fn test_rotate_hst_keeps_span_and_roles() {
        let def = hst::definition();
        let unit = def
            .instantiate_with_id("h", GridPosition::new(1, 1), &UnitConfig::new())
            .unwrap();
        let rotated = def.rotate(&unit);
        assert_eq!(
            rotated.kind,
            UnitKind::Hst {
                variant: HstVariant::Ne
            }
        );
        assert_eq!(rotated.span, Span::SINGLE);
        assert_eq!(rotated.patch_roles, unit.patch_roles);
        assert_eq!(rotated.position, unit.position);
    }

    #[test]
    fn test_rotate_geese_swaps_span() {
        let def = flying_geese::definition();
        let unit = def
            .instantiate_with_id("g", GridPosition::new(0, 0), &UnitConfig::new())
            .unwrap();
        assert_eq!(unit.span, Span::new(1, 2));

        let rotated = def.rotate(&unit);
        assert_eq!(
            rotated.kind,
            UnitKind::FlyingGeese {
                direction: GeeseDirection::Down
            }
        );
        assert_eq!(rotated.span, Span::new(2, 1));
        assert_eq!(rotated.position, GridPosition::new(0, 0));
    }

    #[test]
    fn test_flip_geese_vertical_keeps_horizontal_direction() {
        let def = flying_geese::definition();
        let config = UnitConfig::new().with_variant("left");
        let unit = def
            .instantiate_with_id("g", GridPosition::new(0, 0), &config)
            .unwrap();
        let flipped = def.flip(&unit, FlipAxis::Vertical);
        assert_eq!(flipped, unit);

        let flipped = def.flip(&unit, FlipAxis::Horizontal);
        assert_eq!(
            flipped.kind,
            UnitKind::FlyingGeese {
                direction: GeeseDirection::Right
            }
        );
        assert_eq!(flipped.span, Span::new(1, 2));
    }

    #[test]
    fn test_rotate_qst_cycles_roles() {
        let def = qst::definition();
        let config = UnitConfig::new()
            .with_role("top", "a")
            .with_role("right", "b")
            .with_role("bottom", "c")
            .with_role("left", "d");
        let unit = def
            .instantiate_with_id("q", GridPosition::new(0, 0), &config)
            .unwrap();
        let rotated = def.rotate(&unit);
        assert_eq!(rotated.kind, UnitKind::Qst);
        assert_eq!(
            rotated.patch_roles,
            roles(&[("top", "d"), ("right", "a"), ("bottom", "b"), ("left", "c")])
        );
    }

    #[test]
    fn test_square_is_unchanged() {
        let def = square::definition();
        let unit = def
            .instantiate_with_id("s", GridPosition::new(2, 2), &UnitConfig::new())
            .unwrap();
        assert_eq!(def.rotate(&unit), unit);
        assert_eq!(def.flip(&unit, FlipAxis::Horizontal), unit);
        assert_eq!(def.flip(&unit, FlipAxis::Vertical), unit);
    }
}
