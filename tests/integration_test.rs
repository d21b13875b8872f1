//! Integration tests for the transformation facade

extern crate std;

use std::fs;
use std::path::PathBuf;

use microtransform::{transform, Frame, MicroTransform, TransformError};

const CALIBRATION: &str = r#"
design_constant = 0.505

[[reference]]
xy = [100.0, 200.0]
uv = [1.0, 1.0]

[[reference]]
xy = [100.0, 210.0]
uv = [6.0, 1.0]
"#;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_calibration_file_workflow() {
    let calibration_path = temp_file("microtransform_it_calibration.toml", CALIBRATION);
    let report_path = std::env::temp_dir().join("microtransform_it_report.log");

    let api = MicroTransform::from_calibration_file(
        calibration_path.to_str().unwrap(),
        Some(report_path.to_str().unwrap()),
    ).unwrap();

    // UV x-axis maps onto XY y-axis, scale 2
    let output = api.transform(2.0, 1.0).unwrap();
    std::assert!((output.target.x - 100.0).abs() < 1e-9);
    std::assert!((output.target.y - 202.0).abs() < 1e-9);
    std::assert!((output.scale_factor - 2.0 / 0.505).abs() < 1e-9);

    let report = fs::read_to_string(&report_path).unwrap();
    std::assert!(report.contains("Transform Report:"));
    std::assert!(report.contains("UV target: (2, 1)"));

    let summary = api.inspect().unwrap();
    std::assert!(summary.contains("Scale ratio (XY/UV): 2.000000"));
    std::assert!(summary.contains("90.000 deg"));

    let _ = fs::remove_file(&calibration_path);
    let _ = fs::remove_file(&report_path);
}

#[test]
fn test_facade_matches_free_function() {
    let calibration_path = temp_file("microtransform_it_free_fn.toml", CALIBRATION);
    let api = MicroTransform::from_calibration_file(calibration_path.to_str().unwrap(), None).unwrap();

    let output = api.transform(-3.5, 4.25).unwrap();
    let (x, y, scale_factor) = transform(100.0, 200.0, 100.0, 210.0, 1.0, 1.0, 6.0, 1.0, -3.5, 4.25);

    std::assert_eq!((output.target.x, output.target.y, output.scale_factor), (x, y, scale_factor));
    let _ = fs::remove_file(&calibration_path);
}

#[test]
fn test_degenerate_policies() {
    let degenerate = CALIBRATION.replace("uv = [6.0, 1.0]", "uv = [1.0, 1.0]");
    let calibration_path = temp_file("microtransform_it_degenerate.toml", &degenerate);
    let path = calibration_path.to_str().unwrap();

    let checked = MicroTransform::from_calibration_file(path, None).unwrap();
    std::assert!(matches!(checked.transform(2.0, 2.0), Err(TransformError::DegenerateReference(Frame::UV))));
    std::assert!(checked.inspect().is_err());

    let unchecked = MicroTransform::from_calibration_file(path, None).unwrap().unchecked();
    let output = unchecked.transform(2.0, 2.0).unwrap();
    std::assert!(output.scale_factor.is_infinite());
    std::assert!(!output.target.is_finite());

    let _ = fs::remove_file(&calibration_path);
}

#[test]
fn test_missing_calibration_file() {
    let result = MicroTransform::from_calibration_file("no/such/calibration.toml", None);
    std::assert!(matches!(result, Err(TransformError::IoError(_))));
}
