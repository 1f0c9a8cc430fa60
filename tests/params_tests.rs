#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::fs;

use shorelark::simulation::error::ParamsError;
use shorelark::simulation::params::Params;

fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("shorelark_{}_{name}", std::process::id()));
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

#[test]
fn test_load_partial_file() {
    let path = temp_file(
        "partial.json",
        r#"{ "width": 400.0, "seed": 9, "evolution": { "hidden_size": 4 } }"#,
    );

    let params = Params::load(&path).expect("Failed to load params");
    fs::remove_file(&path).ok();

    assert_eq!(params.width, 400.0);
    assert_eq!(params.height, 500.0);
    assert_eq!(params.seed, Some(9));
    assert_eq!(params.evolution.hidden_size, 4);
    assert_eq!(params.n_animals, 10);
}

#[test]
fn test_load_missing_file() {
    let path = std::env::temp_dir().join("shorelark_does_not_exist.json");
    assert!(matches!(Params::load(&path), Err(ParamsError::Io(_))));
}

#[test]
fn test_load_malformed_file() {
    let path = temp_file("malformed.json", "{ width: ");
    let result = Params::load(&path);
    fs::remove_file(&path).ok();

    assert!(matches!(result, Err(ParamsError::Json(_))));
}

#[test]
fn test_load_rejects_invalid_values() {
    let path = temp_file("invalid.json", r#"{ "n_food": 50, "food_capacity": 30 }"#);
    let result = Params::load(&path);
    fs::remove_file(&path).ok();

    assert!(matches!(
        result,
        Err(ParamsError::CapacityBelowDefault {
            capacity: 30,
            food: 50
        })
    ));
}
