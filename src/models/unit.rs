//! Placed quilt units and their type-specific orientation payloads.

use crate::models::{GridPosition, Span};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Patch id → fabric role id assignments for one unit.
pub type PatchRoles = BTreeMap<String, String>;

/// Discriminant of the built-in unit types.
///
/// Declaration order is the order units are listed in the library panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    /// Plain square, one patch
    Square,
    /// Half-square triangle
    Hst,
    /// Quarter-square triangle
    Qst,
    /// Flying geese, a 2-cell compound unit
    FlyingGeese,
}

impl UnitType {
    /// All unit types in declaration order.
    pub const ALL: [Self; 4] = [Self::Square, Self::Hst, Self::Qst, Self::FlyingGeese];

    /// Stable identifier used in documents and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Hst => "hst",
            Self::Qst => "qst",
            Self::FlyingGeese => "flying_geese",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "square" => Ok(Self::Square),
            "hst" => Ok(Self::Hst),
            "qst" => Ok(Self::Qst),
            "flying_geese" => Ok(Self::FlyingGeese),
            other => Err(format!("Unknown unit type '{other}'")),
        }
    }
}

/// Corner filled by the primary patch of a half-square triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HstVariant {
    /// Top-left corner
    #[default]
    Nw,
    /// Top-right corner
    Ne,
    /// Bottom-left corner
    Sw,
    /// Bottom-right corner
    Se,
}

impl HstVariant {
    /// All variants in registry order.
    pub const ALL: [Self; 4] = [Self::Nw, Self::Ne, Self::Sw, Self::Se];

    /// Variant id as stored in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::Ne => "ne",
            Self::Sw => "sw",
            Self::Se => "se",
        }
    }

    /// Parses a variant id.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == id)
    }
}

/// Edge the goose triangle points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeeseDirection {
    /// Apex on the top edge
    Up,
    /// Apex on the bottom edge
    Down,
    /// Apex on the left edge
    Left,
    /// Apex on the right edge
    #[default]
    Right,
}

impl GeeseDirection {
    /// All directions in registry order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Variant id as stored in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parses a direction id.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == id)
    }

    /// True for `left`/`right`, whose footprint is one row by two columns.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Unit type together with its type-specific orientation.
///
/// Serialized flattened into the unit as `{"type": ..., "variant": ...}`.
/// A missing variant reads as the type's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnitKind {
    /// Plain square
    Square,
    /// Half-square triangle with its primary corner
    Hst {
        /// Corner filled by the primary patch
        #[serde(default)]
        variant: HstVariant,
    },
    /// Quarter-square triangle; orientation lives in its patch roles
    Qst,
    /// Flying geese with its pointing direction
    FlyingGeese {
        /// Edge the goose apex touches
        #[serde(rename = "variant", default)]
        direction: GeeseDirection,
    },
}

impl UnitKind {
    /// The discriminant without payload.
    #[must_use]
    pub const fn unit_type(&self) -> UnitType {
        match self {
            Self::Square => UnitType::Square,
            Self::Hst { .. } => UnitType::Hst,
            Self::Qst => UnitType::Qst,
            Self::FlyingGeese { .. } => UnitType::FlyingGeese,
        }
    }

    /// Variant id, for types that carry one.
    #[must_use]
    pub const fn variant_id(&self) -> Option<&'static str> {
        match self {
            Self::Hst { variant } => Some(variant.as_str()),
            Self::FlyingGeese { direction } => Some(direction.as_str()),
            Self::Square | Self::Qst => None,
        }
    }
}

/// Mirror axis for flip actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left↔right
    Horizontal,
    /// Mirror top↔bottom
    Vertical,
}

/// Untyped unit configuration as it arrives from an editor or a document.
///
/// A unit definition's config parser turns this into a typed [`UnitKind`]
/// or rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitConfig {
    /// Type-specific variant id (e.g. "ne", "up")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Patch id → fabric role id
    #[serde(default)]
    pub patch_roles: PatchRoles,
}

impl UnitConfig {
    /// Creates an empty configuration (default variant, default roles).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the variant id.
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Assigns a fabric role to a patch.
    #[must_use]
    pub fn with_role(mut self, patch: impl Into<String>, role: impl Into<String>) -> Self {
        self.patch_roles.insert(patch.into(), role.into());
        self
    }
}

/// One placed unit inside a block.
///
/// # Validation
///
/// - `position + span` must stay within the grid
/// - Cells covered by the span must not be shared with another unit
/// - `id` must be unique within the block
/// - Every `patch_roles` value must name a role of the palette in effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Unique identifier within the block
    pub id: String,
    /// Type and orientation
    #[serde(flatten)]
    pub kind: UnitKind,
    /// Top-left cell of the footprint
    pub position: GridPosition,
    /// Footprint in cells
    pub span: Span,
    /// Patch id → fabric role id
    #[serde(default)]
    pub patch_roles: PatchRoles,
}

impl Unit {
    /// The discriminant of this unit.
    #[must_use]
    pub const fn unit_type(&self) -> UnitType {
        self.kind.unit_type()
    }

    /// Every cell covered by this unit, row-major.
    #[must_use]
    pub fn cells(&self) -> Vec<GridPosition> {
        self.span.cells(self.position)
    }

    /// Fabric role assigned to a patch, if any.
    #[must_use]
    pub fn role_for(&self, patch_id: &str) -> Option<&str> {
        self.patch_roles.get(patch_id).map(String::as_str)
    }
}
