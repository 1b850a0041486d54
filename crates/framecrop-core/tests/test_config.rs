use std::io::Write;

use framecrop_core::config::{EditorConfig, OutputSpec};
use framecrop_core::error::CropError;
use framecrop_core::upload::UploadFolder;
use framecrop_core::viewport::FrameSize;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_config_values() {
    let c = EditorConfig::default();
    assert_eq!(c.output, OutputSpec::new(800, 450));
    assert_eq!(c.frame, FrameSize::new(640.0, 360.0));
    assert!((c.quality - 0.82).abs() < 1e-6);
    assert_eq!(c.max_scale, 3.0);
    assert_eq!(c.wheel_step, 0.05);
    assert_eq!(c.resize_max_width, 800);
    assert_eq!(c.folder, UploadFolder::Discounts);
    assert!(c.validate().is_ok());
}

#[test]
fn test_empty_toml_is_default() {
    let c = EditorConfig::from_toml_str("").unwrap();
    assert_eq!(c, EditorConfig::default());
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_partial_toml_overrides() {
    let c = EditorConfig::from_toml_str(
        r#"
quality = 0.9
folder = "logos"

[output]
width = 400
height = 400

[frame]
width = 320.0
height = 320.0
"#,
    )
    .unwrap();
    assert_eq!(c.output, OutputSpec::new(400, 400));
    assert_eq!(c.frame, FrameSize::new(320.0, 320.0));
    assert_eq!(c.folder, UploadFolder::Logos);
    assert!((c.quality - 0.9).abs() < 1e-6);
    assert_eq!(c.max_scale, 3.0);
}

#[test]
fn test_toml_round_trip_via_pretty_string() {
    let mut c = EditorConfig::default();
    c.folder = UploadFolder::Logos;
    c.max_scale = 4.5;
    let text = c.to_toml_string().unwrap();
    assert!(text.contains("folder = \"logos\""));
    assert_eq!(EditorConfig::from_toml_str(&text).unwrap(), c);
}

#[test]
fn test_malformed_toml_is_toml_error() {
    let err = EditorConfig::from_toml_str("quality = [").unwrap_err();
    assert!(matches!(err, CropError::Toml(_)));
}

#[test]
fn test_unknown_folder_rejected() {
    let err = EditorConfig::from_toml_str("folder = \"banners\"").unwrap_err();
    assert!(matches!(err, CropError::Toml(_)));
}

#[test]
fn test_load_from_file() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    writeln!(tmp, "wheel_step = 0.1").unwrap();
    let c = EditorConfig::load(tmp.path()).unwrap();
    assert_eq!(c.wheel_step, 0.1);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn assert_config_error(toml: &str) {
    match EditorConfig::from_toml_str(toml) {
        Err(CropError::Config(_)) => {}
        other => panic!("expected Config error for {toml:?}, got {other:?}"),
    }
}

#[test]
fn test_zero_output_rejected() {
    assert_config_error("[output]\nwidth = 0\nheight = 450");
}

#[test]
fn test_zero_frame_rejected() {
    assert_config_error("[frame]\nwidth = 0.0\nheight = 360.0");
}

#[test]
fn test_aspect_mismatch_rejected() {
    assert_config_error("[output]\nwidth = 800\nheight = 800");
}

#[test]
fn test_quality_out_of_range_rejected() {
    assert_config_error("quality = 0.0");
    assert_config_error("quality = 1.5");
}

#[test]
fn test_non_positive_scales_rejected() {
    assert_config_error("max_scale = 0.0");
    assert_config_error("wheel_step = -0.05");
    assert_config_error("resize_max_width = 0");
}
