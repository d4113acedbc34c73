//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use quiltkit::models::{Block, GridPosition, Unit, UnitConfig, UnitType};
use quiltkit::services::BlockService;
use quiltkit::units::UnitRegistry;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Registry holding the built-in unit types.
pub fn registry() -> UnitRegistry {
    UnitRegistry::with_builtins().expect("built-in definitions should register")
}

/// Builds a unit with a fixed id and default patch roles.
pub fn unit(
    registry: &UnitRegistry,
    id: &str,
    unit_type: UnitType,
    row: u8,
    col: u8,
    variant: Option<&str>,
) -> Unit {
    let config = match variant {
        Some(v) => UnitConfig::new().with_variant(v),
        None => UnitConfig::new(),
    };
    registry
        .get(unit_type)
        .expect("unit type should be registered")
        .instantiate_with_id(id, GridPosition::new(row, col), &config)
        .expect("fixture unit should be valid")
}

/// A block with a square, an HST and a downward flying geese.
///
/// ```text
///   0 1 2 3
/// 0 S . G .
/// 1 . H G .
/// 2 . . . .
/// 3 . . . .
/// ```
pub fn sample_block(reg: &UnitRegistry) -> Block {
    let mut block = Block::new(4);
    for unit in [
        unit(reg, "square-1", UnitType::Square, 0, 0, None),
        unit(reg, "hst-1", UnitType::Hst, 1, 1, Some("se")),
        unit(reg, "geese-1", UnitType::FlyingGeese, 0, 2, Some("down")),
    ] {
        place_valid(reg, &mut block, unit);
    }
    block
}

/// Places `unit`, failing the test if it is rejected.
pub fn place_valid(registry: &UnitRegistry, block: &mut Block, unit: Unit) {
    let check = block
        .place_unit(registry, unit)
        .expect("fixture unit should match its definition");
    assert!(check.valid, "placement rejected: {:?}", check.reason);
}

/// Same layout as [`sample_block`], stored under the legacy `shapes` key.
pub const LEGACY_BLOCK_JSON: &str = r##"{
  "version": 1,
  "gridSize": 4,
  "shapes": [
    {"id": "square-1", "type": "square", "position": {"row": 0, "col": 0},
     "patchRoles": {"fill": "background"}},
    {"id": "hst-1", "type": "hst", "variant": "se", "position": {"row": 1, "col": 1},
     "patchRoles": {"primary": "feature", "secondary": "background"}},
    {"id": "geese-1", "type": "flying_geese", "variant": "down", "position": {"row": 0, "col": 2},
     "patchRoles": {"goose": "feature", "sky1": "background", "sky2": "background"}}
  ],
  "previewPalette": {"roles": [
    {"id": "background", "name": "Background", "color": "#F5F0E6"},
    {"id": "feature", "name": "Feature", "color": "#2E5A88"},
    {"id": "accent1", "name": "Accent 1", "color": "#C8553D"},
    {"id": "accent2", "name": "Accent 2", "color": "#F2A541"}
  ]}
}"##;

/// A block whose second unit overlaps the first and whose HST names a role
/// missing from the palette.
pub const INVALID_BLOCK_JSON: &str = r##"{
  "version": 1,
  "gridSize": 3,
  "units": [
    {"id": "a", "type": "flying_geese", "variant": "right", "position": {"row": 0, "col": 0},
     "span": {"rows": 1, "cols": 2},
     "patchRoles": {"goose": "feature", "sky1": "background", "sky2": "background"}},
    {"id": "b", "type": "hst", "variant": "nw", "position": {"row": 0, "col": 1},
     "span": {"rows": 1, "cols": 1},
     "patchRoles": {"primary": "sashing", "secondary": "background"}}
  ],
  "previewPalette": {"roles": [
    {"id": "background", "name": "Background", "color": "#FFFFFF"},
    {"id": "feature", "name": "Feature", "color": "#2E5A88"}
  ]}
}"##;

/// Saves a block into a fresh temp directory.
///
/// # Returns
/// The file path and the `TempDir` guard that keeps it alive.
pub fn create_temp_block_file(block: &Block) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("block.json");
    BlockService::save(block, &path).expect("Failed to save block");
    (path, temp_dir)
}

/// Writes raw JSON into a fresh temp directory.
pub fn create_temp_json_file(json: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("block.json");
    fs::write(&path, json).expect("Failed to write block JSON");
    (path, temp_dir)
}

/// An empty config home so CLI runs never read the user's settings.
pub fn isolated_config_home() -> TempDir {
    TempDir::new().expect("Failed to create temp config dir")
}

/// Writes `config.toml` under an isolated config home.
pub fn write_config(config_home: &TempDir, toml: &str) {
    let dir = config_home.path().join("QuiltKit");
    fs::create_dir_all(&dir).expect("Failed to create config dir");
    fs::write(dir.join("config.toml"), toml).expect("Failed to write config");
}

/// A `quiltkit` invocation whose config directory is `config_home`.
pub fn quiltkit(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_quiltkit"));
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}
