//! Unit definitions and the registry that looks them up.
//!
//! Every unit type is described by one immutable [`UnitDefinition`]: its
//! patches, variants, span behavior, geometry generator, transform tables
//! and placement hooks. Editors and renderers never match on unit types
//! themselves; they ask the registry for the definition and call through it.

pub mod flying_geese;
pub mod hst;
pub mod qst;
pub mod registry;
pub mod square;
pub mod transform;

pub use registry::{global_registry, init_registry, RegistryError, UnitRegistry};
pub use transform::{RoleTransforms, TransformStrategy, VariantTransforms};

use crate::geometry::TriangleGroup;
use crate::models::{GridPosition, PatchRoles, Span, Unit, UnitConfig, UnitKind, UnitType};
use crate::placement::PlacementCheck;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Grouping used by the unit library panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCategory {
    /// Single-fabric units
    Basic,
    /// Units cut from triangles within one cell
    Triangles,
    /// Units spanning more than one cell
    Compound,
}

/// How an editor places a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// One tap places the unit at the tapped cell
    SingleTap,
    /// First tap anchors, second tap on an adjacent cell completes the footprint
    TwoTap,
}

/// How a unit's footprint is derived.
#[derive(Clone, Copy)]
pub enum SpanBehavior {
    /// Same span for every variant
    Fixed(Span),
    /// Span computed from the variant
    VariantDependent(fn(&UnitKind) -> Span),
}

impl SpanBehavior {
    /// Span for the given kind.
    #[must_use]
    pub fn span_for(&self, kind: &UnitKind) -> Span {
        match self {
            Self::Fixed(span) => *span,
            Self::VariantDependent(span_of) => span_of(kind),
        }
    }
}

impl fmt::Debug for SpanBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(span) => f.debug_tuple("Fixed").field(span).finish(),
            Self::VariantDependent(_) => f.write_str("VariantDependent"),
        }
    }
}

/// An independently colorable region of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchDefinition {
    /// Patch id referenced by geometry and `patch_roles`
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Fabric role assigned when the user has not picked one
    pub default_fabric_role: &'static str,
}

impl PatchDefinition {
    /// Creates a patch definition.
    #[must_use]
    pub const fn new(
        id: &'static str,
        name: &'static str,
        default_fabric_role: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            default_fabric_role,
        }
    }
}

/// Library panel presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    /// Single-character glyph for text listings
    pub glyph: &'static str,
}

/// Two-tap placement hook: `(anchor, grid_size, is_cell_occupied)`.
pub type PlacementValidator =
    fn(GridPosition, u8, &dyn Fn(GridPosition) -> bool) -> PlacementCheck;

/// Geometry generator: `(kind, width_px, height_px)`.
pub type TriangleGenerator = fn(&UnitKind, f64, f64) -> TriangleGroup;

/// A unit configuration rejected by its definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitConfigError {
    /// No definition is registered for the type
    #[error("unit type '{0}' is not registered")]
    UnregisteredType(UnitType),
    /// Variant id is not one of the definition's variants
    #[error("'{variant}' is not a {unit_type} variant (expected one of: {expected})")]
    UnknownVariant {
        /// Unit type
        unit_type: UnitType,
        /// Offending id
        variant: String,
        /// Comma-separated accepted ids
        expected: String,
    },
    /// A variant was given for a type without variants
    #[error("{unit_type} units have no variants (got '{variant}')")]
    UnexpectedVariant {
        /// Unit type
        unit_type: UnitType,
        /// Offending id
        variant: String,
    },
    /// Kind payload belongs to a different unit type
    #[error("{actual} configuration given to a {expected} definition")]
    TypeMismatch {
        /// Definition's type
        expected: UnitType,
        /// Kind's type
        actual: UnitType,
    },
    /// `patch_roles` names a patch the unit does not have
    #[error("{unit_type} has no patch '{patch}'")]
    UnknownPatch {
        /// Unit type
        unit_type: UnitType,
        /// Offending patch id
        patch: String,
    },
    /// A declared patch has no fabric role
    #[error("{unit_type} patch '{patch}' has no fabric role")]
    MissingPatchRole {
        /// Unit type
        unit_type: UnitType,
        /// Patch id
        patch: String,
    },
    /// A patch is assigned an empty role id
    #[error("{unit_type} patch '{patch}' has an empty fabric role id")]
    EmptyRole {
        /// Unit type
        unit_type: UnitType,
        /// Patch id
        patch: String,
    },
}

/// Registry entry describing one unit type.
#[derive(Clone)]
pub struct UnitDefinition {
    /// Type this definition describes
    pub unit_type: UnitType,
    /// Name shown in the library panel
    pub display_name: &'static str,
    /// Library grouping
    pub category: UnitCategory,
    /// Span of the default variant
    pub default_span: Span,
    /// How the span follows the variant
    pub span_behavior: SpanBehavior,
    /// Colorable regions in drawing order
    pub patches: &'static [PatchDefinition],
    /// Accepted variants; empty for types without variants
    pub variants: &'static [UnitKind],
    /// Kind used when no variant is given
    pub default_kind: UnitKind,
    /// Geometry generator
    pub triangles: TriangleGenerator,
    /// Rotate/flip behavior
    pub transforms: TransformStrategy,
    /// Extra placement rule for multi-tap units
    pub validate_placement: Option<PlacementValidator>,
    /// Library panel presentation
    pub thumbnail: Thumbnail,
    /// Tap interaction
    pub placement_mode: PlacementMode,
    /// Whether drag/batch placement is allowed
    pub supports_batch_placement: bool,
}

impl fmt::Debug for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitDefinition")
            .field("unit_type", &self.unit_type)
            .field("display_name", &self.display_name)
            .field("category", &self.category)
            .field("default_span", &self.default_span)
            .field("span_behavior", &self.span_behavior)
            .field("patches", &self.patches)
            .field("variants", &self.variant_ids())
            .field("transforms", &self.transforms)
            .field("placement_mode", &self.placement_mode)
            .field("supports_batch_placement", &self.supports_batch_placement)
            .finish_non_exhaustive()
    }
}

impl UnitDefinition {
    /// Variant ids in declaration order.
    #[must_use]
    pub fn variant_ids(&self) -> Vec<&'static str> {
        self.variants.iter().filter_map(UnitKind::variant_id).collect()
    }

    /// Default variant id, for types with variants.
    #[must_use]
    pub const fn default_variant(&self) -> Option<&'static str> {
        self.default_kind.variant_id()
    }

    /// Looks up a declared patch.
    #[must_use]
    pub fn patch(&self, id: &str) -> Option<&PatchDefinition> {
        self.patches.iter().find(|p| p.id == id)
    }

    /// Footprint of a unit of this type in the given orientation.
    #[must_use]
    pub fn span_for(&self, kind: &UnitKind) -> Span {
        self.span_behavior.span_for(kind)
    }

    /// Triangles for one instance at the given pixel size.
    #[must_use]
    pub fn triangles_for(&self, kind: &UnitKind, width: f64, height: f64) -> TriangleGroup {
        (self.triangles)(kind, width, height)
    }

    /// Whether rotation swaps the variant id.
    #[must_use]
    pub const fn supports_variant_rotation(&self) -> bool {
        matches!(self.transforms, TransformStrategy::Variant(_))
    }

    /// Whether rotation cycles patch roles.
    #[must_use]
    pub const fn supports_role_rotation(&self) -> bool {
        matches!(self.transforms, TransformStrategy::PatchRoles(_))
    }

    /// Resolves a variant id against this definition.
    pub fn parse_variant(&self, variant: Option<&str>) -> Result<UnitKind, UnitConfigError> {
        let Some(id) = variant else {
            return Ok(self.default_kind);
        };

        if self.variants.is_empty() {
            return Err(UnitConfigError::UnexpectedVariant {
                unit_type: self.unit_type,
                variant: id.to_string(),
            });
        }

        self.variants
            .iter()
            .find(|kind| kind.variant_id() == Some(id))
            .copied()
            .ok_or_else(|| UnitConfigError::UnknownVariant {
                unit_type: self.unit_type,
                variant: id.to_string(),
                expected: self.variant_ids().join(", "),
            })
    }

    /// Checks patch role assignments against the declared patches.
    ///
    /// Every declared patch must be assigned a non-empty role and no
    /// undeclared patch may appear.
    pub fn check_patch_roles(&self, roles: &PatchRoles) -> Result<(), UnitConfigError> {
        if let Some(unknown) = roles.keys().find(|patch| self.patch(patch).is_none()) {
            return Err(UnitConfigError::UnknownPatch {
                unit_type: self.unit_type,
                patch: unknown.clone(),
            });
        }

        for patch in self.patches {
            match roles.get(patch.id) {
                None => {
                    return Err(UnitConfigError::MissingPatchRole {
                        unit_type: self.unit_type,
                        patch: patch.id.to_string(),
                    })
                }
                Some(role) if role.trim().is_empty() => {
                    return Err(UnitConfigError::EmptyRole {
                        unit_type: self.unit_type,
                        patch: patch.id.to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Validates a configuration and returns the typed kind it describes.
    pub fn parse_config(&self, config: &UnitConfig) -> Result<UnitKind, UnitConfigError> {
        let kind = self.parse_variant(config.variant.as_deref())?;
        self.check_patch_roles(&config.patch_roles)?;
        Ok(kind)
    }

    /// Validates an already-typed unit against this definition.
    pub fn check_unit(&self, unit: &Unit) -> Result<(), UnitConfigError> {
        if unit.unit_type() != self.unit_type {
            return Err(UnitConfigError::TypeMismatch {
                expected: self.unit_type,
                actual: unit.unit_type(),
            });
        }
        self.check_patch_roles(&unit.patch_roles)
    }

    /// Role assignments with every declared patch set to its default role.
    #[must_use]
    pub fn default_patch_roles(&self) -> PatchRoles {
        self.patches
            .iter()
            .map(|p| (p.id.to_string(), p.default_fabric_role.to_string()))
            .collect()
    }

    /// Builds a new unit with a fresh id.
    ///
    /// Patches missing from `config.patch_roles` get their default fabric
    /// role; everything else must pass [`Self::parse_config`].
    pub fn instantiate(
        &self,
        position: GridPosition,
        config: &UnitConfig,
    ) -> Result<Unit, UnitConfigError> {
        self.instantiate_with_id(Uuid::new_v4().to_string(), position, config)
    }

    /// Builds a new unit with the given id.
    pub fn instantiate_with_id(
        &self,
        id: impl Into<String>,
        position: GridPosition,
        config: &UnitConfig,
    ) -> Result<Unit, UnitConfigError> {
        let mut patch_roles = self.default_patch_roles();
        patch_roles.extend(config.patch_roles.clone());

        let completed = UnitConfig {
            variant: config.variant.clone(),
            patch_roles,
        };
        let kind = self.parse_config(&completed)?;

        Ok(Unit {
            id: id.into(),
            kind,
            position,
            span: self.span_for(&kind),
            patch_roles: completed.patch_roles,
        })
    }
}

impl Unit {
    /// Builds a unit of `unit_type` through its registered definition.
    ///
    /// Span comes from the variant and missing patch roles are filled with
    /// the definition's defaults.
    pub fn new(
        registry: &UnitRegistry,
        unit_type: UnitType,
        position: GridPosition,
        config: &UnitConfig,
    ) -> Result<Self, UnitConfigError> {
        registry
            .get(unit_type)
            .ok_or(UnitConfigError::UnregisteredType(unit_type))?
            .instantiate(position, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeeseDirection, HstVariant};

    #[test]
    fn test_unit_new_through_registry() {
        let registry = UnitRegistry::with_builtins().unwrap();
        let unit = Unit::new(
            &registry,
            UnitType::FlyingGeese,
            GridPosition::new(1, 0),
            &UnitConfig::new().with_variant("down"),
        )
        .unwrap();
        assert_eq!(unit.span, Span::new(2, 1));
        assert_eq!(unit.patch_roles.len(), 3);

        let empty = UnitRegistry::new();
        let origin = GridPosition::new(0, 0);
        assert_eq!(
            Unit::new(&empty, UnitType::Square, origin, &UnitConfig::new()),
            Err(UnitConfigError::UnregisteredType(UnitType::Square))
        );
    }

    #[test]
    fn test_parse_variant() {
        let def = hst::definition();
        assert_eq!(
            def.parse_variant(None).unwrap(),
            UnitKind::Hst {
                variant: HstVariant::Nw
            }
        );
        assert_eq!(
            def.parse_variant(Some("se")).unwrap(),
            UnitKind::Hst {
                variant: HstVariant::Se
            }
        );
        assert!(matches!(
            def.parse_variant(Some("up")),
            Err(UnitConfigError::UnknownVariant { .. })
        ));

        let square = square::definition();
        assert!(matches!(
            square.parse_variant(Some("nw")),
            Err(UnitConfigError::UnexpectedVariant { .. })
        ));
    }

    #[test]
    fn test_parse_config_rejects_bad_roles() {
        let def = hst::definition();

        let missing = UnitConfig::new().with_role("primary", "feature");
        assert_eq!(
            def.parse_config(&missing),
            Err(UnitConfigError::MissingPatchRole {
                unit_type: UnitType::Hst,
                patch: "secondary".to_string()
            })
        );

        let unknown = UnitConfig::new()
            .with_role("primary", "feature")
            .with_role("secondary", "background")
            .with_role("goose", "feature");
        assert!(matches!(
            def.parse_config(&unknown),
            Err(UnitConfigError::UnknownPatch { .. })
        ));

        let empty = UnitConfig::new()
            .with_role("primary", " ")
            .with_role("secondary", "background");
        assert!(matches!(
            def.parse_config(&empty),
            Err(UnitConfigError::EmptyRole { .. })
        ));
    }

    #[test]
    fn test_instantiate_fills_default_roles() {
        let def = flying_geese::definition();
        let config = UnitConfig::new().with_variant("up").with_role("goose", "accent1");
        let unit = def
            .instantiate_with_id("g1", GridPosition::new(0, 0), &config)
            .unwrap();

        assert_eq!(unit.id, "g1");
        assert_eq!(
            unit.kind,
            UnitKind::FlyingGeese {
                direction: GeeseDirection::Up
            }
        );
        assert_eq!(unit.span, Span::new(2, 1));
        assert_eq!(unit.role_for("goose"), Some("accent1"));
        assert_eq!(unit.role_for("sky1"), Some("background"));
        assert_eq!(unit.role_for("sky2"), Some("background"));
    }

    #[test]
    fn test_instantiate_generates_unique_ids() {
        let def = square::definition();
        let a = def
            .instantiate(GridPosition::new(0, 0), &UnitConfig::new())
            .unwrap();
        let b = def
            .instantiate(GridPosition::new(0, 0), &UnitConfig::new())
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_check_unit_type_mismatch() {
        let hst = hst::definition();
        let square = square::definition()
            .instantiate_with_id("s", GridPosition::new(0, 0), &UnitConfig::new())
            .unwrap();
        assert!(matches!(
            hst.check_unit(&square),
            Err(UnitConfigError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_capability_flags() {
        assert!(hst::definition().supports_variant_rotation());
        assert!(!hst::definition().supports_role_rotation());
        assert!(qst::definition().supports_role_rotation());
        assert!(!qst::definition().supports_variant_rotation());
        let square = square::definition();
        assert!(!square.supports_variant_rotation() && !square.supports_role_rotation());
    }

    #[test]
    fn test_config_error_messages() {
        let def = hst::definition();
        let err = def.parse_variant(Some("x")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'x' is not a hst variant (expected one of: nw, ne, sw, se)"
        );
    }
}
