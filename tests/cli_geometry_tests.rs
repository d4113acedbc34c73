//! End-to-end tests for `quiltkit geometry` and `quiltkit units` commands.

mod fixtures;
use fixtures::*;

#[test]
fn test_geometry_json_lists_every_patch() {
    let config_home = isolated_config_home();
    let (block_path, _temp_dir) = create_temp_block_file(&sample_block(&registry()));

    let output = quiltkit(&config_home)
        .args([
            "geometry",
            "--block",
            block_path.to_str().unwrap(),
            "--cell-size",
            "10",
            "--json",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let patches: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    let patches = patches.as_array().unwrap();
    // square 2 + hst 2 + geese 3
    assert_eq!(patches.len(), 7);

    let square = &patches[0];
    assert_eq!(square["unitId"], "square-1");
    assert_eq!(square["patchId"], "fill");
    assert_eq!(square["color"], "#F5F0E6");

    for patch in patches {
        for point in patch["points"].as_array().unwrap() {
            let x = point["x"].as_f64().unwrap();
            let y = point["y"].as_f64().unwrap();
            assert!((0.0..=40.0).contains(&x) && (0.0..=40.0).contains(&y));
        }
    }
}

#[test]
fn test_geometry_uses_configured_cell_size() {
    let config_home = isolated_config_home();
    write_config(&config_home, "[editor]\ncell_size = 5.0\n");
    let (block_path, _temp_dir) = create_temp_block_file(&sample_block(&registry()));

    let output = quiltkit(&config_home)
        .args([
            "geometry",
            "--block",
            block_path.to_str().unwrap(),
            "--json",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let patches: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    let max = patches
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|p| p["points"].as_array().unwrap().clone())
        .map(|pt| pt["x"].as_f64().unwrap().max(pt["y"].as_f64().unwrap()))
        .fold(0.0_f64, f64::max);
    assert!(max <= 20.0, "max coordinate {max}");
}

#[test]
fn test_geometry_rejects_bad_cell_size() {
    let config_home = isolated_config_home();
    let (block_path, _temp_dir) = create_temp_block_file(&sample_block(&registry()));

    let output = quiltkit(&config_home)
        .args([
            "geometry",
            "--block",
            block_path.to_str().unwrap(),
            "--cell-size",
            "0",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_units_json_lists_builtins() {
    let config_home = isolated_config_home();
    let output = quiltkit(&config_home)
        .args(["units", "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let units: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    let types: Vec<&str> = units
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["square", "hst", "qst", "flying_geese"]);

    let geese = &units[3];
    assert_eq!(geese["placementMode"], "two_tap");
    assert_eq!(geese["supportsBatchPlacement"], false);
    assert_eq!(
        geese["defaultSpan"],
        serde_json::json!({"rows": 1, "cols": 2})
    );
}

#[test]
fn test_units_text_output() {
    let config_home = isolated_config_home();
    let output = quiltkit(&config_home)
        .arg("units")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Half-Square Triangle"));
    assert!(stdout.contains("Flying Geese"));
}
