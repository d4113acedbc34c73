//! Fabric roles, palettes and per-instance color overrides.

use crate::constants::FALLBACK_COLOR;
use crate::models::RgbColor;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Per-instance color overrides, keyed by fabric role id.
///
/// Overrides take priority over the base palette when resolving colors.
pub type PaletteOverrides = BTreeMap<String, RgbColor>;

/// A named color slot referenced by unit patches.
///
/// # Validation
///
/// - ID must be unique within a Palette
/// - ID format: kebab-case (lowercase, digits, hyphens)
/// - Name must be non-empty, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricRole {
    /// Unique identifier in kebab-case (e.g., "background", "feature")
    pub id: String,
    /// Display name (e.g., "Background", "Feature Fabric")
    pub name: String,
    /// Fabric color
    pub color: RgbColor,
}

impl FabricRole {
    /// Creates a new fabric role with validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use quiltkit::models::{FabricRole, RgbColor};
    ///
    /// let color = RgbColor::from_hex("#2E5A88").unwrap();
    /// let role = FabricRole::new("feature", "Feature", color).unwrap();
    /// assert_eq!(role.id, "feature");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - ID is empty or not in kebab-case format
    /// - Name is empty or exceeds 50 characters
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: RgbColor) -> Result<Self> {
        let id = id.into();
        let name = name.into();

        Self::validate_id(&id)?;
        Self::validate_name(&name)?;

        Ok(Self { id, name, color })
    }

    /// Validates role ID format (kebab-case).
    fn validate_id(id: &str) -> Result<()> {
        if id.is_empty() {
            anyhow::bail!("Fabric role ID cannot be empty");
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            anyhow::bail!(
                "Fabric role ID '{id}' must be kebab-case (lowercase, hyphens, and digits only)"
            );
        }

        if id.starts_with('-') || id.ends_with('-') {
            anyhow::bail!("Fabric role ID '{id}' cannot start or end with a hyphen");
        }

        Ok(())
    }

    /// Validates role name.
    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            anyhow::bail!("Fabric role name cannot be empty");
        }

        if name.len() > 50 {
            anyhow::bail!(
                "Fabric role name '{}' exceeds maximum length of 50 characters (got {})",
                name,
                name.len()
            );
        }

        Ok(())
    }

    /// Re-runs the id and name checks of [`Self::new`].
    ///
    /// Roles read from a document skip the constructor, so the block
    /// validator calls this for every palette role.
    pub fn check(&self) -> Result<()> {
        Self::validate_id(&self.id)?;
        Self::validate_name(&self.name)
    }
}

/// Ordered set of fabric roles with concrete colors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Palette {
    /// Roles in display order; ids are unique
    pub roles: Vec<FabricRole>,
}

impl Palette {
    /// Creates an empty palette.
    #[must_use]
    pub const fn new() -> Self {
        Self { roles: Vec::new() }
    }

    /// The starter palette offered for new blocks.
    ///
    /// Its role ids match the default fabric roles of the built-in units.
    #[must_use]
    pub fn default_quilt() -> Self {
        let role = |id: &str, name: &str, color: RgbColor| FabricRole {
            id: id.to_string(),
            name: name.to_string(),
            color,
        };
        Self {
            roles: vec![
                role("background", "Background", RgbColor::new(0xF5, 0xF0, 0xE6)),
                role("feature", "Feature", RgbColor::new(0x2E, 0x5A, 0x88)),
                role("accent1", "Accent 1", RgbColor::new(0xC8, 0x55, 0x3D)),
                role("accent2", "Accent 2", RgbColor::new(0xF2, 0xA5, 0x41)),
            ],
        }
    }

    /// Adds a role to this palette.
    pub fn add_role(&mut self, role: FabricRole) -> Result<()> {
        if self.has_role(&role.id) {
            anyhow::bail!("Fabric role with ID '{}' already exists", role.id);
        }

        self.roles.push(role);
        Ok(())
    }

    /// Gets a role by ID.
    #[must_use]
    pub fn get_role(&self, id: &str) -> Option<&FabricRole> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// Returns true if a role with this ID exists.
    #[must_use]
    pub fn has_role(&self, id: &str) -> bool {
        self.get_role(id).is_some()
    }

    /// Removes a role by ID.
    pub fn remove_role(&mut self, id: &str) -> Option<FabricRole> {
        let index = self.roles.iter().position(|r| r.id == id)?;
        Some(self.roles.remove(index))
    }

    /// Role ids that appear more than once, in first-seen order.
    #[must_use]
    pub fn duplicate_role_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for role in &self.roles {
            if !seen.insert(role.id.as_str()) && !duplicates.contains(&role.id.as_str()) {
                duplicates.push(role.id.as_str());
            }
        }
        duplicates
    }
}

/// Resolves the displayed color of a fabric role.
///
/// Priority (highest to lowest):
/// 1. `overrides[role_id]`
/// 2. the palette role's color
/// 3. [`FALLBACK_COLOR`]
///
/// Unknown roles degrade to the fallback instead of failing, so a renderer
/// can always draw something.
///
/// # Examples
///
/// ```
/// use quiltkit::models::{resolve_color, Palette, PaletteOverrides, RgbColor};
///
/// let palette = Palette::default_quilt();
/// let mut overrides = PaletteOverrides::new();
/// overrides.insert("feature".to_string(), RgbColor::new(255, 0, 0));
///
/// assert_eq!(resolve_color(&palette, "feature", Some(&overrides)).to_hex(), "#FF0000");
/// assert_eq!(resolve_color(&palette, "unknown-role", None).to_hex(), "#808080");
/// ```
#[must_use]
pub fn resolve_color(
    palette: &Palette,
    role_id: &str,
    overrides: Option<&PaletteOverrides>,
) -> RgbColor {
    // 1. Instance override (highest priority)
    if let Some(color) = overrides.and_then(|o| o.get(role_id)) {
        return *color;
    }

    // 2. Base palette
    if let Some(role) = palette.get_role(role_id) {
        return role.color;
    }

    // 3. Fallback
    FALLBACK_COLOR
}
