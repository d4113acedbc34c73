//! Unit registry: the lookup table from unit type to definition.
//!
//! The process-wide registry is built once by an explicit [`init_registry`]
//! call and is read-only afterwards. Tests and embedders that want their own
//! set of definitions build a [`UnitRegistry`] directly.

use super::{flying_geese, hst, qst, square, TransformStrategy, UnitDefinition};
use crate::models::UnitType;
use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing::debug;

/// A definition refused by [`UnitRegistry::register`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// `display_name` is blank
    #[error("{0} definition has an empty display name")]
    EmptyName(UnitType),
    /// No patches declared
    #[error("{0} definition declares no patches")]
    NoPatches(UnitType),
    /// Two patches share an id
    #[error("{unit_type} definition declares patch '{patch}' twice")]
    DuplicatePatch {
        /// Unit type
        unit_type: UnitType,
        /// Repeated patch id
        patch: String,
    },
    /// A variant or the default kind belongs to another unit type
    #[error("{unit_type} definition lists a {found} kind")]
    ForeignKind {
        /// Unit type
        unit_type: UnitType,
        /// Type of the offending kind
        found: UnitType,
    },
    /// The default variant is not among the declared variants
    #[error("{unit_type} default variant '{variant}' is not declared")]
    DefaultVariantNotListed {
        /// Unit type
        unit_type: UnitType,
        /// Default variant id
        variant: String,
    },
    /// Variant-based transforms without variants, or variants without them
    #[error("{0} definition mixes variants and transform tables inconsistently")]
    TransformMismatch(UnitType),
    /// Generated geometry references a patch that is not declared
    #[error("{unit_type} geometry references undeclared patch '{patch}'")]
    UndeclaredPatch {
        /// Unit type
        unit_type: UnitType,
        /// Patch id found in the geometry
        patch: String,
    },
}

/// Definitions indexed by unit type, iterated in declaration order.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    definitions: BTreeMap<UnitType, UnitDefinition>,
}

impl UnitRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in square, HST, QST and flying
    /// geese definitions.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(square::definition())?;
        registry.register(hst::definition())?;
        registry.register(qst::definition())?;
        registry.register(flying_geese::definition())?;
        Ok(registry)
    }

    /// Adds a definition, replacing any previous definition of the same type.
    pub fn register(&mut self, definition: UnitDefinition) -> Result<(), RegistryError> {
        check_definition(&definition)?;
        debug!(
            unit_type = %definition.unit_type,
            patches = definition.patches.len(),
            variants = definition.variants.len(),
            "registered unit definition"
        );
        self.definitions.insert(definition.unit_type, definition);
        Ok(())
    }

    /// Looks up a definition.
    #[must_use]
    pub fn get(&self, unit_type: UnitType) -> Option<&UnitDefinition> {
        self.definitions.get(&unit_type)
    }

    /// Whether a definition for `unit_type` is registered.
    #[must_use]
    pub fn has(&self, unit_type: UnitType) -> bool {
        self.definitions.contains_key(&unit_type)
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether no definitions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.definitions.values()
    }

    /// Registered unit types in declaration order.
    #[must_use]
    pub fn unit_types(&self) -> Vec<UnitType> {
        self.definitions.keys().copied().collect()
    }
}

fn check_definition(def: &UnitDefinition) -> Result<(), RegistryError> {
    let unit_type = def.unit_type;

    if def.display_name.trim().is_empty() {
        return Err(RegistryError::EmptyName(unit_type));
    }
    if def.patches.is_empty() {
        return Err(RegistryError::NoPatches(unit_type));
    }

    let mut seen = HashSet::new();
    for patch in def.patches {
        if !seen.insert(patch.id) {
            return Err(RegistryError::DuplicatePatch {
                unit_type,
                patch: patch.id.to_string(),
            });
        }
    }

    for kind in def.variants.iter().chain(std::iter::once(&def.default_kind)) {
        if kind.unit_type() != unit_type {
            return Err(RegistryError::ForeignKind {
                unit_type,
                found: kind.unit_type(),
            });
        }
    }

    if let Some(variant) = def.default_variant() {
        if !def.variants.contains(&def.default_kind) {
            return Err(RegistryError::DefaultVariantNotListed {
                unit_type,
                variant: variant.to_string(),
            });
        }
    }

    let has_variants = !def.variants.is_empty();
    let variant_transforms = matches!(def.transforms, TransformStrategy::Variant(_));
    if has_variants != variant_transforms {
        return Err(RegistryError::TransformMismatch(unit_type));
    }

    for kind in def.variants.iter().chain(std::iter::once(&def.default_kind)) {
        if let Some(stray) = def
            .triangles_for(kind, 1.0, 1.0)
            .into_iter()
            .find(|t| def.patch(&t.patch_id).is_none())
        {
            return Err(RegistryError::UndeclaredPatch {
                unit_type,
                patch: stray.patch_id,
            });
        }
    }

    Ok(())
}

static REGISTRY: OnceCell<UnitRegistry> = OnceCell::new();

/// Builds the process-wide registry on first call and returns it.
///
/// Later calls return the same instance.
pub fn init_registry() -> Result<&'static UnitRegistry, RegistryError> {
    REGISTRY.get_or_try_init(|| {
        let registry = UnitRegistry::with_builtins()?;
        debug!(count = registry.len(), "unit registry initialized");
        Ok(registry)
    })
}

/// The process-wide registry, if [`init_registry`] has run.
#[must_use]
pub fn global_registry() -> Option<&'static UnitRegistry> {
    REGISTRY.get()
}
