//! Integration tests for the rasters binary
//!
//! These tests verify JSON output shape, file export, and configuration layering.

use std::process::{Command, Output};
use tempfile::TempDir;

fn rasters(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rasters"))
        .args(args)
        .env_remove("RASTERS_CRS")
        .env_remove("RASTERS_GEOJSON_PRETTY")
        .env_remove("RASTERS_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn json_data(output: &Output) -> serde_json::Value {
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(parsed["status"], "success");
    parsed["data"].clone()
}

#[test]
fn test_info_json() {
    let output = rasters(&["--json", "--crs", "EPSG:32631", "info", "MULTIPOINT((0 0),(10 20))"]);
    let data = json_data(&output);

    assert_eq!(data["kind"], "Multi");
    assert_eq!(data["crs"], "EPSG:32631");
    assert_eq!(data["geographic"], false);
    assert_eq!(data["bbox"]["xmax"], 10.0);
    assert_eq!(data["bbox"]["ymax"], 20.0);
}

#[test]
fn test_info_human_reports_extent() {
    let output = rasters(&["--crs", "EPSG:32631", "info", "MULTIPOINT((0 0),(10 20))"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("10 x 20"), "stdout: {}", stdout);
}

#[test]
fn test_distances_json() {
    let output = rasters(&[
        "--json",
        "--crs",
        "EPSG:32631",
        "distances",
        "POINT(0 0)",
        "--point",
        "POINT(0 30)",
        "--point",
        "POINT(40 0)",
    ]);
    let data = json_data(&output);

    let rows = data["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["distance"], 30.0);
    assert_eq!(rows[1]["distance"], 40.0);
    assert!(rows[0]["geometry"].as_str().unwrap().starts_with("LINESTRING"));
}

#[test]
fn test_export_writes_geojson() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("out.geojson");
    let path = file_path.to_str().unwrap();

    let output = rasters(&["export", "POINT(1 2)", "--output", path]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let content = std::fs::read_to_string(&file_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["features"][0]["geometry"]["coordinates"], serde_json::json!([1.0, 2.0]));
}

#[test]
fn test_config_reports_sources() {
    let output = Command::new(env!("CARGO_BIN_EXE_rasters"))
        .args(["--json", "config"])
        .env("RASTERS_CRS", "EPSG:3857")
        .env_remove("RASTERS_GEOJSON_PRETTY")
        .env_remove("RASTERS_LOG")
        .output()
        .expect("Failed to execute command");
    let data = json_data(&output);

    let values = data["values"].as_array().unwrap();
    let crs = values.iter().find(|v| v["key"] == "default_crs").unwrap();
    assert_eq!(crs["value"], "EPSG:3857");
    assert_eq!(crs["source"], "Environment");
}

#[test]
fn test_invalid_env_crs_is_reported() {
    let output = Command::new(env!("CARGO_BIN_EXE_rasters"))
        .args(["--json", "config"])
        .env("RASTERS_CRS", "bogus")
        .env_remove("RASTERS_GEOJSON_PRETTY")
        .env_remove("RASTERS_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");
    let data = json_data(&output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARN"), "stderr: {}", stderr);
    assert!(stderr.contains("Invalid RASTERS_CRS value 'bogus'"), "stderr: {}", stderr);

    let values = data["values"].as_array().unwrap();
    let crs = values.iter().find(|v| v["key"] == "default_crs").unwrap();
    assert_eq!(crs["value"], "EPSG:4326");
    assert_eq!(crs["source"], "Default");
}

#[test]
fn test_invalid_wkt_fails() {
    let output = rasters(&["info", "POINT(1"]);
    assert!(!output.status.success());
}

#[test]
fn test_invalid_crs_flag_fails() {
    let output = rasters(&["--crs", "nowhere", "info", "POINT(1 2)"]);
    assert!(!output.status.success());
}
