//! Block file I/O service.
//!
//! Block documents are JSON. Older documents call the unit list `shapes`;
//! they are normalized here, at the loading boundary, so nothing past this
//! module ever sees the legacy key. Saving always writes `units`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::constants::{BLOCK_FORMAT_VERSION, DEFAULT_GRID_SIZE};
use crate::models::{
    Block, GridPosition, Palette, PaletteOverrides, PatchRoles, Span, Unit, UnitKind, UnitType,
};
use crate::units::UnitRegistry;

/// A unit as stored on disk.
///
/// `id` and `span` may be missing from hand-written or legacy documents;
/// the loader fills them in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnitRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    kind: UnitKind,
    position: GridPosition,
    #[serde(default)]
    span: Option<Span>,
    #[serde(default)]
    patch_roles: PatchRoles,
}

/// The document exactly as persisted, before normalization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockDocument {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default = "default_grid_size")]
    grid_size: u8,
    #[serde(default)]
    units: Option<Vec<UnitRecord>>,
    #[serde(default)]
    shapes: Option<Vec<UnitRecord>>,
    #[serde(default)]
    preview_palette: Option<Palette>,
    #[serde(default)]
    palette_overrides: PaletteOverrides,
}

const fn default_version() -> u32 {
    BLOCK_FORMAT_VERSION
}

const fn default_grid_size() -> u8 {
    DEFAULT_GRID_SIZE
}

/// Whether a document still uses the legacy `shapes` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Units stored under `units`
    Current,
    /// Units stored under `shapes`
    Legacy,
}

/// Service for loading and saving block documents.
pub struct BlockService;

impl BlockService {
    /// Loads a block from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `registry` - Definitions used to fill in missing spans
    /// * `path` - Path to the block file
    ///
    /// # Returns
    ///
    /// * `Ok(Block)` - Normalized block
    /// * `Err(...)` - File not found, I/O error or malformed JSON
    pub fn load(registry: &UnitRegistry, path: &Path) -> Result<Block> {
        Self::load_with_format(registry, path).map(|(block, _)| block)
    }

    /// Loads a block and reports which document format it was stored in.
    pub fn load_with_format(
        registry: &UnitRegistry,
        path: &Path,
    ) -> Result<(Block, DocumentFormat)> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read block file: {}", path.display()))?;
        let (block, format) = Self::parse(registry, &content)
            .with_context(|| format!("Failed to load block from {}", path.display()))?;
        info!(
            path = %path.display(),
            units = block.units.len(),
            grid_size = block.grid_size,
            "loaded block"
        );
        Ok((block, format))
    }

    /// Parses a block from JSON text.
    pub fn from_json_str(registry: &UnitRegistry, json: &str) -> Result<Block> {
        Self::parse(registry, json).map(|(block, _)| block)
    }

    fn parse(registry: &UnitRegistry, json: &str) -> Result<(Block, DocumentFormat)> {
        let document: BlockDocument =
            serde_json::from_str(json).context("Failed to parse block JSON")?;
        Ok(normalize(registry, document))
    }

    /// Serializes a block to pretty-printed JSON.
    pub fn to_json_string(block: &Block) -> Result<String> {
        serde_json::to_string_pretty(block).context("Failed to serialize block")
    }

    /// Saves a block to a JSON file.
    ///
    /// This performs an atomic write using a temp file + rename pattern so
    /// the file is never left half-written.
    pub fn save(block: &Block, path: &Path) -> Result<()> {
        let content = Self::to_json_string(block)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp block file: {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp block file to: {}", path.display()))?;

        info!(path = %path.display(), units = block.units.len(), "saved block");
        Ok(())
    }
}

fn normalize(registry: &UnitRegistry, document: BlockDocument) -> (Block, DocumentFormat) {
    let (records, format) = match (document.units, document.shapes) {
        (Some(units), Some(_)) => {
            warn!("block has both 'units' and legacy 'shapes'; using 'units'");
            (units, DocumentFormat::Current)
        }
        (Some(units), None) => (units, DocumentFormat::Current),
        (None, Some(shapes)) => {
            warn!(count = shapes.len(), "normalizing legacy 'shapes' to 'units'");
            (shapes, DocumentFormat::Legacy)
        }
        (None, None) => (Vec::new(), DocumentFormat::Current),
    };

    let mut taken: HashSet<String> = records.iter().filter_map(|r| r.id.clone()).collect();
    let units = records
        .into_iter()
        .map(|record| into_unit(registry, record, &mut taken))
        .collect();

    let block = Block {
        version: document.version,
        grid_size: document.grid_size,
        units,
        preview_palette: document.preview_palette.unwrap_or_else(Palette::default_quilt),
        palette_overrides: document.palette_overrides,
    };
    (block, format)
}

fn into_unit(registry: &UnitRegistry, record: UnitRecord, taken: &mut HashSet<String>) -> Unit {
    // A stored span is kept as-is so validation can report mismatches.
    let span = record.span.unwrap_or_else(|| {
        registry
            .get(record.kind.unit_type())
            .map_or(Span::SINGLE, |def| def.span_for(&record.kind))
    });
    let id = match record.id {
        Some(id) => id,
        None => {
            let id = fallback_id(record.kind.unit_type(), taken);
            warn!(unit = %id, position = %record.position, "unit has no id; assigned one");
            id
        }
    };
    Unit {
        id,
        kind: record.kind,
        position: record.position,
        span,
        patch_roles: record.patch_roles,
    }
}

/// First `<type>-<n>` id not already used in the document.
///
/// Depends only on document order, so loading the same file twice yields
/// the same ids.
fn fallback_id(unit_type: UnitType, taken: &mut HashSet<String>) -> String {
    let mut n = 1_usize;
    loop {
        let id = format!("{unit_type}-{n}");
        if taken.insert(id.clone()) {
            return id;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeeseDirection, HstVariant};
    use tempfile::TempDir;

    fn registry() -> UnitRegistry {
        UnitRegistry::with_builtins().unwrap()
    }

    const CURRENT: &str = r##"{
        "version": 1,
        "gridSize": 3,
        "units": [
            {"id": "a", "type": "hst", "variant": "se", "position": {"row": 0, "col": 0},
             "span": {"rows": 1, "cols": 1},
             "patchRoles": {"primary": "feature", "secondary": "background"}},
            {"id": "b", "type": "flying_geese", "variant": "up", "position": {"row": 1, "col": 2},
             "span": {"rows": 2, "cols": 1},
             "patchRoles": {"goose": "feature", "sky1": "background", "sky2": "background"}}
        ],
        "previewPalette": {"roles": [
            {"id": "background", "name": "Background", "color": "#FFFFFF"},
            {"id": "feature", "name": "Feature", "color": "#2E5A88"}
        ]}
    }"##;

    #[test]
    fn test_legacy_shapes_match_units() {
        let reg = registry();
        let legacy = CURRENT.replace("\"units\"", "\"shapes\"");

        let current = BlockService::from_json_str(&reg, CURRENT).unwrap();
        let (migrated, format) = BlockService::parse(&reg, &legacy).unwrap();
        assert_eq!(format, DocumentFormat::Legacy);
        assert_eq!(migrated, current);
        assert_eq!(current.units.len(), 2);
        assert_eq!(
            current.units[0].kind,
            UnitKind::Hst {
                variant: HstVariant::Se
            }
        );
    }

    #[test]
    fn test_units_win_over_shapes() {
        let reg = registry();
        let json = r#"{
            "version": 1,
            "units": [{"id": "u", "type": "square", "position": {"row": 0, "col": 0}}],
            "shapes": [{"id": "s", "type": "square", "position": {"row": 1, "col": 1}}]
        }"#;
        let (block, format) = BlockService::parse(&reg, json).unwrap();
        assert_eq!(format, DocumentFormat::Current);
        assert_eq!(block.units.len(), 1);
        assert_eq!(block.units[0].id, "u");
    }

    #[test]
    fn test_missing_fields_are_filled() {
        let reg = registry();
        let json = r#"{
            "version": 1,
            "shapes": [
                {"type": "flying_geese", "variant": "down", "position": {"row": 0, "col": 0}}
            ]
        }"#;
        let block = BlockService::from_json_str(&reg, json).unwrap();
        assert_eq!(block.grid_size, DEFAULT_GRID_SIZE);
        assert_eq!(block.preview_palette, Palette::default_quilt());

        let unit = &block.units[0];
        assert_eq!(unit.id, "flying_geese-1");
        assert_eq!(
            unit.kind,
            UnitKind::FlyingGeese {
                direction: GeeseDirection::Down
            }
        );
        assert_eq!(unit.span, Span::new(2, 1));
    }

    #[test]
    fn test_missing_ids_are_stable_across_loads() {
        let reg = registry();
        let json = r#"{
            "units": [
                {"type": "square", "position": {"row": 0, "col": 0}},
                {"id": "square-1", "type": "square", "position": {"row": 0, "col": 1}},
                {"type": "square", "position": {"row": 0, "col": 2}}
            ]
        }"#;

        let first = BlockService::from_json_str(&reg, json).unwrap();
        let second = BlockService::from_json_str(&reg, json).unwrap();
        assert_eq!(first, second);

        let ids: Vec<&str> = first.units.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["square-2", "square-1", "square-3"]);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let reg = registry();
        assert!(BlockService::from_json_str(&reg, "{").is_err());
        assert!(BlockService::from_json_str(
            &reg,
            r#"{"units": [{"type": "hexagon", "position": {"row": 0, "col": 0}}]}"#
        )
        .is_err());
    }

    #[test]
    fn test_save_writes_units_key() -> Result<()> {
        let reg = registry();
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("block.json");

        let legacy = CURRENT.replace("\"units\"", "\"shapes\"");
        let block = BlockService::from_json_str(&reg, &legacy)?;
        BlockService::save(&block, &path)?;

        let written = fs::read_to_string(&path)?;
        assert!(written.contains("\"units\""));
        assert!(!written.contains("\"shapes\""));
        assert!(!path.with_extension("json.tmp").exists());

        let (reloaded, format) = BlockService::load_with_format(&reg, &path)?;
        assert_eq!(format, DocumentFormat::Current);
        assert_eq!(reloaded, block);
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let reg = registry();
        let err = BlockService::load(&reg, Path::new("/nonexistent/block.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read block file"));
    }
}
