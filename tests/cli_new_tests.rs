//! End-to-end tests for `quiltkit new` command.

mod fixtures;
use fixtures::*;

use quiltkit::models::Palette;
use quiltkit::services::BlockService;
use tempfile::TempDir;

#[test]
fn test_new_uses_configured_grid_size() {
    let config_home = isolated_config_home();
    write_config(&config_home, "[editor]\ndefault_grid_size = 6\n");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blocks").join("star.json");

    let output = quiltkit(&config_home)
        .args(["new", "--output", path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let block = BlockService::load(&registry(), &path).unwrap();
    assert_eq!(block.grid_size, 6);
    assert!(block.is_empty());
    assert_eq!(block.preview_palette, Palette::default_quilt());
}

#[test]
fn test_new_grid_size_flag_wins() {
    let config_home = isolated_config_home();
    write_config(&config_home, "[editor]\ndefault_grid_size = 6\n");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("block.json");

    let output = quiltkit(&config_home)
        .args([
            "new",
            "--output",
            path.to_str().unwrap(),
            "--grid-size",
            "3",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(BlockService::load(&registry(), &path).unwrap().grid_size, 3);
}

#[test]
fn test_new_rejects_unsupported_grid_size() {
    let config_home = isolated_config_home();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("block.json");

    let output = quiltkit(&config_home)
        .args([
            "new",
            "--output",
            path.to_str().unwrap(),
            "--grid-size",
            "12",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(3));
    assert!(!path.exists());
}

#[test]
fn test_new_refuses_to_overwrite() {
    let config_home = isolated_config_home();
    let (block_path, _temp_dir) = create_temp_block_file(&sample_block(&registry()));
    let before = std::fs::read_to_string(&block_path).unwrap();

    let output = quiltkit(&config_home)
        .args(["new", "--output", block_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(std::fs::read_to_string(&block_path).unwrap(), before);

    let output = quiltkit(&config_home)
        .args(["new", "--output", block_path.to_str().unwrap(), "--force"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));
    let block = BlockService::load(&registry(), &block_path).unwrap();
    assert!(block.is_empty());
    assert_eq!(block.grid_size, 4);
}
