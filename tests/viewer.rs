use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use meshforge::import::{ImportError, ModelSource};
use meshforge::simulation::{OrbitalSimulation, OrbitalSystem};
use meshforge::{SampleModel, Viewer};

const TETRAHEDRON_OBJ: &str = "\
o tetra
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
f 1 3 2
f 1 2 4
f 1 4 3
f 2 3 4
";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn root_name(viewer: &Viewer) -> String {
    viewer.scene().root().map(|r| r.name.clone()).unwrap_or_default()
}

#[test]
fn load_replaces_displayed_model() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "tetra.obj", TETRAHEDRON_OBJ);

    let mut viewer = Viewer::new();
    viewer.show_sample(SampleModel::Cube);

    let info = viewer.load_model(&path).unwrap();
    assert_eq!(info.name, "tetra.obj");
    assert_eq!(info.vertex_count, 4);
    assert_eq!(info.face_count, 4);
    assert_eq!(
        info.source,
        ModelSource::File {
            path: path.clone(),
            size: TETRAHEDRON_OBJ.len() as u64,
        }
    );
    assert_relative_eq!(info.dimensions().x, 1.0);

    assert_eq!(root_name(&viewer), "tetra");
    assert_eq!(viewer.scene().get_statistics().mesh_count, 1);
}

#[test]
fn failed_load_keeps_previous_model() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let empty = write(dir.path(), "empty.obj", "# no geometry\n");
    let unsupported = write(dir.path(), "model.fbx", "binary");

    let mut viewer = Viewer::new();
    viewer.show_sample(SampleModel::SolarSystem);
    viewer.update(0.1);
    let before = viewer.planet_positions().unwrap();

    assert!(matches!(
        viewer.load_model(&dir.path().join("missing.obj")),
        Err(ImportError::NotFound(_))
    ));
    assert!(matches!(
        viewer.load_model(&unsupported),
        Err(ImportError::UnsupportedFormat { .. })
    ));
    assert!(matches!(viewer.load_model(&empty), Err(ImportError::Empty)));

    // Model, info and animation are untouched
    assert_eq!(root_name(&viewer), "Solar System");
    assert_eq!(viewer.model_info().map(|i| i.name.as_str()), Some("Solar System"));
    assert_eq!(viewer.planet_positions(), Some(before.clone()));

    // and the animation still runs
    viewer.update(0.1);
    assert_ne!(viewer.planet_positions(), Some(before));
}

#[test]
fn orbital_regeneration_does_not_leak_bodies() {
    init_logging();
    let mut viewer = Viewer::new();
    for _ in 0..5 {
        viewer.show_sample(SampleModel::SolarSystem);
        viewer.update(1.0 / 60.0);
    }

    let orbital = viewer
        .simulation_manager()
        .simulation()
        .and_then(|s| s.as_any().downcast_ref::<OrbitalSimulation>())
        .unwrap();
    assert_eq!(orbital.system().registry().len(), 9);

    // Every registered body lives in the displayed graph
    let scene = viewer.scene();
    for id in orbital.system().registry().ids() {
        assert!(scene.find_node(id).is_some());
    }

    let mut system = OrbitalSystem::default();
    system.generate();
    system.generate();
    assert_eq!(system.registry().len(), 9);
    system.teardown();
    assert!(system.registry().is_empty());
}

#[test]
fn planets_follow_their_orbits() {
    init_logging();
    let mut viewer = Viewer::new();
    viewer.show_sample(SampleModel::SolarSystem);

    // Earth has period 1 and K = 0.5, so 30 ticks of 1/60 is a quarter orbit
    for _ in 0..30 {
        viewer.update(1.0 / 60.0);
    }

    let positions = viewer.planet_positions().unwrap();
    assert_eq!(positions[0].0, "Sun");
    let earth = positions.iter().find(|(name, _)| name == "Earth").unwrap().1;
    assert_relative_eq!(earth.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(earth.z, 3.5, epsilon = 1e-9);

    // Positions read from the graph agree with the simulator
    let world = viewer.scene().world_positions();
    let earth_node = world.iter().find(|(name, _)| name == "Earth").unwrap().1;
    assert_relative_eq!(earth_node.x, earth.x, epsilon = 1e-9);
    assert_relative_eq!(earth_node.z, earth.z, epsilon = 1e-9);
}

#[test]
fn huge_frame_delta_returns_with_fixed_timestep() {
    init_logging();
    let mut viewer = Viewer::new();
    viewer.show_sample(SampleModel::SolarSystem);
    viewer
        .simulation_manager_mut()
        .set_fixed_timestep(Some(1.0 / 60.0));

    viewer.update(1e20);

    let orbital = viewer
        .simulation_manager()
        .simulation()
        .and_then(|s| s.as_any().downcast_ref::<OrbitalSimulation>())
        .unwrap();
    assert_eq!(
        orbital.steps(),
        meshforge::simulation::manager::MAX_SUBSTEPS as u64
    );
    for (_, body) in orbital.system().registry().iter() {
        assert!((0.0..360.0).contains(&body.orbital_angle()));
        assert!((0.0..360.0).contains(&body.rotation_angle()));
    }
}
