//! Strict block validation before saving or publishing.
//!
//! Rendering tolerates dangling fabric roles and falls back to a neutral
//! color; this validator does not. It collects every problem in the block
//! instead of stopping at the first.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::models::{Block, GridPosition};
use crate::placement::{check_bounds, check_grid_size, check_span_consistency, Occupancy};
use crate::units::UnitRegistry;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Problems that make the block invalid
    pub errors: Vec<ValidationError>,
    /// Non-blocking findings
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Like [`Self::is_valid`], but in strict mode warnings fail too.
    #[must_use]
    pub const fn passes(&self, strict: bool) -> bool {
        self.is_valid() && (!strict || self.warnings.is_empty())
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            if !message.is_empty() {
                message.push('\n');
            }
            message.push_str(&format!("⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

/// Validation error with context.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Unit the error concerns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    /// Cell the error concerns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<GridPosition>,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            unit_id: None,
            position: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets the unit context.
    #[must_use]
    pub fn with_unit(mut self, id: impl Into<String>) -> Self {
        self.unit_id = Some(id.into());
        self
    }

    /// Sets the position context.
    #[must_use]
    pub const fn with_position(mut self, position: GridPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets a suggestion for fixing the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.unit_id, self.position) {
            (Some(id), Some(pos)) => write!(f, "[{id} {pos}] {}: {}", self.kind, self.message)?,
            (Some(id), None) => write!(f, "[{id}] {}: {}", self.kind, self.message)?,
            (None, Some(pos)) => write!(f, "[{pos}] {}: {}", self.kind, self.message)?,
            (None, None) => write!(f, "{}: {}", self.kind, self.message)?,
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Grid size outside the supported range
    UnsupportedGridSize,
    /// Unit type without a registered definition
    UnknownUnitType,
    /// Variant or patch roles rejected by the unit definition
    InvalidConfiguration,
    /// Two units share an id
    DuplicateId,
    /// Footprint extends past the grid edge
    OutOfBounds,
    /// Two units cover the same cell
    Overlap,
    /// Span does not match the unit's orientation
    SpanMismatch,
    /// Patch role that is not in the preview palette
    DanglingFabricRole,
    /// Palette lists a role id more than once
    DuplicatePaletteRole,
    /// Palette role with a malformed id or name
    InvalidPaletteRole,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedGridSize => write!(f, "Unsupported Grid Size"),
            Self::UnknownUnitType => write!(f, "Unknown Unit Type"),
            Self::InvalidConfiguration => write!(f, "Invalid Configuration"),
            Self::DuplicateId => write!(f, "Duplicate Id"),
            Self::OutOfBounds => write!(f, "Out of Bounds"),
            Self::Overlap => write!(f, "Overlap"),
            Self::SpanMismatch => write!(f, "Span Mismatch"),
            Self::DanglingFabricRole => write!(f, "Dangling Fabric Role"),
            Self::DuplicatePaletteRole => write!(f, "Duplicate Palette Role"),
            Self::InvalidPaletteRole => write!(f, "Invalid Palette Role"),
        }
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone, Serialize)]
pub struct ValidationWarning {
    /// Warning message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Block validator.
pub struct BlockValidator<'a> {
    registry: &'a UnitRegistry,
    block: &'a Block,
}

impl<'a> BlockValidator<'a> {
    /// Creates a new block validator.
    #[must_use]
    pub const fn new(registry: &'a UnitRegistry, block: &'a Block) -> Self {
        Self { registry, block }
    }

    /// Validates the whole block.
    ///
    /// Checks:
    /// - Grid size is supported
    /// - Every unit type is registered and its configuration is accepted
    /// - Unit ids are unique
    /// - Every footprint is in bounds, matches its orientation and does not
    ///   overlap another unit
    /// - Every patch role names a role of the preview palette
    /// - Palette role ids are unique and kebab-case, names are non-empty
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        if let Err(e) = check_grid_size(self.block.grid_size) {
            report.add_error(
                ValidationError::new(ValidationErrorKind::UnsupportedGridSize, e.to_string())
                    .with_suggestion("Use a grid size between 2 and 8"),
            );
        }

        self.validate_palette(&mut report);
        self.validate_ids(&mut report);
        self.validate_units(&mut report);

        if self.block.is_empty() {
            report.add_warning(ValidationWarning::new("Block has no units"));
        }

        report
    }

    fn validate_palette(&self, report: &mut ValidationReport) {
        let palette = &self.block.preview_palette;

        for role in &palette.roles {
            if let Err(e) = role.check() {
                report.add_error(
                    ValidationError::new(ValidationErrorKind::InvalidPaletteRole, e.to_string())
                        .with_suggestion("Use a lowercase id such as 'accent-2'"),
                );
            }
        }

        for id in palette.duplicate_role_ids() {
            report.add_error(
                ValidationError::new(
                    ValidationErrorKind::DuplicatePaletteRole,
                    format!("Fabric role '{id}' appears more than once in the palette"),
                )
                .with_suggestion("Rename or remove the duplicate role"),
            );
        }

        for role_id in self.block.palette_overrides.keys() {
            if !palette.has_role(role_id) {
                report.add_warning(ValidationWarning::new(format!(
                    "Override for '{role_id}' has no matching palette role"
                )));
            }
        }
    }

    fn validate_ids(&self, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for unit in &self.block.units {
            if !seen.insert(unit.id.as_str()) && reported.insert(unit.id.as_str()) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::DuplicateId,
                        format!("Unit id '{}' is used more than once", unit.id),
                    )
                    .with_unit(&unit.id)
                    .with_suggestion("Give each unit a unique id"),
                );
            }
        }
    }

    fn validate_units(&self, report: &mut ValidationReport) {
        let grid_size = self.block.grid_size;
        let palette = &self.block.preview_palette;
        let mut occupancy = Occupancy::new();

        for unit in &self.block.units {
            let Some(definition) = self.registry.get(unit.unit_type()) else {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::UnknownUnitType,
                        format!("Unit type '{}' is not registered", unit.unit_type()),
                    )
                    .with_unit(&unit.id)
                    .with_position(unit.position),
                );
                continue;
            };

            if let Err(e) = definition.check_unit(unit) {
                report.add_error(
                    ValidationError::new(ValidationErrorKind::InvalidConfiguration, e.to_string())
                        .with_unit(&unit.id),
                );
            }

            if let Err(e) = check_span_consistency(definition, &unit.kind, unit.span) {
                report.add_error(
                    ValidationError::new(ValidationErrorKind::SpanMismatch, e.to_string())
                        .with_unit(&unit.id)
                        .with_position(unit.position),
                );
            }

            if let Err(e) = check_bounds(unit.position, unit.span, grid_size) {
                report.add_error(
                    ValidationError::new(ValidationErrorKind::OutOfBounds, e.to_string())
                        .with_unit(&unit.id)
                        .with_position(unit.position)
                        .with_suggestion("Move the unit inside the grid"),
                );
            }

            if let Some((cell, other)) = occupancy.conflicts_with(unit.position, unit.span) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::Overlap,
                        format!("Cell {cell} is covered by both '{other}' and '{}'", unit.id),
                    )
                    .with_unit(&unit.id)
                    .with_position(cell),
                );
            }
            occupancy.occupy(unit);

            for (patch, role) in &unit.patch_roles {
                if !palette.has_role(role) {
                    report.add_error(
                        ValidationError::new(
                            ValidationErrorKind::DanglingFabricRole,
                            format!(
                                "Patch '{patch}' uses fabric role '{role}', which is not in the \
                                 palette"
                            ),
                        )
                        .with_unit(&unit.id)
                        .with_suggestion("Add the role to the palette or recolor the patch"),
                    );
                }
            }
        }
    }
}
