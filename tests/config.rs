use std::collections::HashMap;

use cube_wasm::config::{Config, ConfigError, MeshKind};
use cube_wasm::mesh::{Colors, Topology};
use cube_wasm::shader::{ProgramBindings, ShaderSources};
use cube_wasm::transform::{Angles, RotationSource};

fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn parse(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let map = attrs(pairs);
    Config::from_attributes(|name| map.get(name).cloned())
}

#[test]
fn no_attributes_keep_defaults() {
    assert_eq!(parse(&[]).unwrap(), Config::default());
    let config = Config::default();
    assert_eq!(config.mesh, MeshKind::Cube);
    assert!((config.transform.fov_y_radians - 45f32.to_radians()).abs() < 1e-6);
    assert_eq!(config.transform.z_near, 0.1);
    assert_eq!(config.transform.z_far, 100.0);
    assert_eq!(config.transform.camera_distance, 6.0);
    assert!(!config.uses_external_angles());
}

#[test]
fn gui_rotation_selects_external_angles() {
    let config = parse(&[("rotation", "gui")]).unwrap();
    assert_eq!(config.rotation, RotationSource::ExternalAngles(Angles::default()));
    assert!(config.uses_external_angles());
}

#[test]
fn clock_period_and_camera_are_configurable() {
    let config = parse(&[
        ("rotation", "clock"),
        ("period", "10"),
        ("fov", "90"),
        ("distance", "8"),
    ])
    .unwrap();

    match config.rotation {
        RotationSource::Clock { period_seconds, .. } => assert_eq!(period_seconds, 10.0),
        other => panic!("unexpected rotation {other:?}"),
    }
    assert!((config.transform.fov_y_radians - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert_eq!(config.transform.camera_distance, 8.0);
}

#[test]
fn mesh_kind_selects_geometry_and_shaders() {
    let config = parse(&[("mesh", "square")]).unwrap();
    assert_eq!(config.mesh, MeshKind::Square);
    assert_eq!(config.mesh.mesh().topology(), Topology::TriangleStrip);
    assert_eq!(config.mesh.sources(), ShaderSources::FLAT);

    let config = parse(&[("mesh", "cube-bytes")]).unwrap();
    assert_eq!(config.mesh.sources(), ShaderSources::CUBE);
}

#[test]
fn unknown_values_are_rejected() {
    assert_eq!(
        parse(&[("rotation", "mouse")]),
        Err(ConfigError::UnknownRotation("mouse".into()))
    );
    assert_eq!(
        parse(&[("mesh", "teapot")]),
        Err(ConfigError::UnknownMesh("teapot".into()))
    );
    assert_eq!(
        parse(&[("fov", "wide")]),
        Err(ConfigError::InvalidNumber {
            name: "fov",
            value: "wide".into()
        })
    );
    assert!(parse(&[("distance", "-3")]).is_err());
}

#[test]
fn field_of_view_must_stay_below_half_turn() {
    assert_eq!(
        parse(&[("fov", "180")]),
        Err(ConfigError::OutOfRange {
            name: "fov",
            value: 180.0,
            min: 0.0,
            max: 180.0
        })
    );
    assert!(matches!(
        parse(&[("fov", "270")]),
        Err(ConfigError::OutOfRange { name: "fov", .. })
    ));
    assert!(parse(&[("fov", "179")]).is_ok());
}

#[test]
fn camera_distance_must_fall_between_clip_planes() {
    assert_eq!(
        parse(&[("distance", "150")]),
        Err(ConfigError::OutOfRange {
            name: "distance",
            value: 150.0,
            min: 0.1,
            max: 100.0
        })
    );
    assert!(matches!(
        parse(&[("distance", "0.05")]),
        Err(ConfigError::OutOfRange { name: "distance", .. })
    ));
    assert!(parse(&[("distance", "99")]).is_ok());
}

#[test]
fn combined_cube_uses_single_matrix_bindings() {
    let config = parse(&[("mesh", "cube-combined")]).unwrap();
    assert_eq!(config.mesh, MeshKind::CubeCombined);
    assert_eq!(config.mesh.sources(), ShaderSources::COMBINED);
    assert_eq!(config.bindings, ProgramBindings::combined());
    assert!(matches!(config.mesh.mesh().colors(), Colors::Bytes(_)));

    assert_eq!(parse(&[]).unwrap().bindings, ProgramBindings::default());
}
