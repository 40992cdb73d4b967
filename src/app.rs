//! Viewer core
//!
//! Holds the displayed model, its animation and the importer. A GUI shell
//! owns one [`Viewer`], calls [`Viewer::update`] once per frame and reads the
//! scene back for drawing.

use std::fs;
use std::path::Path;

use cgmath::Point3;
use log::{info, warn};

use crate::gfx::scene::Scene;
use crate::import::{ImportError, ImportedScene, ModelImporter, ModelInfo, ModelSource, ObjImporter};
use crate::presets::SampleModel;
use crate::simulation::{OrbitalSimulation, SimulationManager};

pub struct Viewer {
    scene: Scene,
    simulation_manager: SimulationManager,
    importer: Box<dyn ModelImporter>,
    model_info: Option<ModelInfo>,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewer {
    /// Empty viewer loading files through [`ObjImporter`]
    pub fn new() -> Self {
        Self::with_importer(Box::new(ObjImporter::new()))
    }

    pub fn with_importer(importer: Box<dyn ModelImporter>) -> Self {
        Self {
            scene: Scene::new(),
            simulation_manager: SimulationManager::new(),
            importer,
            model_info: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn importer(&self) -> &dyn ModelImporter {
        self.importer.as_ref()
    }

    pub fn model_info(&self) -> Option<&ModelInfo> {
        self.model_info.as_ref()
    }

    pub fn simulation_manager(&self) -> &SimulationManager {
        &self.simulation_manager
    }

    pub fn simulation_manager_mut(&mut self) -> &mut SimulationManager {
        &mut self.simulation_manager
    }

    /// Generate and display a sample, replacing the current model
    pub fn show_sample(&mut self, sample: SampleModel) -> &ModelInfo {
        let built = sample.build();
        let info = ModelInfo::from_node(sample.name(), ModelSource::Sample, &built.root);

        self.simulation_manager.detach_simulation(&mut self.scene);
        self.scene.replace_root(built.root);
        if let Some(animation) = built.animation {
            self.simulation_manager
                .attach_simulation(animation, &mut self.scene);
        }

        info!("Showing sample '{}'", sample.name());
        self.model_info.insert(info)
    }

    /// Load a model file and display it
    ///
    /// The file is imported and converted before anything is replaced. On
    /// failure the previous model, its info and its animation stay as they
    /// were.
    pub fn load_model(&mut self, path: &Path) -> Result<&ModelInfo, ImportError> {
        let imported = match self.importer.import(path) {
            Ok(imported) => imported,
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                return Err(e);
            }
        };
        let size = fs::metadata(path)?.len();
        let source = ModelSource::File {
            path: path.to_path_buf(),
            size,
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| imported.name.clone());

        self.display_imported(&name, source, imported)
    }

    /// Display an import that has already completed, possibly on another
    /// thread
    pub fn display_imported(
        &mut self,
        name: &str,
        source: ModelSource,
        imported: ImportedScene,
    ) -> Result<&ModelInfo, ImportError> {
        let root = imported.into_scene_node()?;
        let info = ModelInfo::from_node(name, source, &root);

        self.simulation_manager.detach_simulation(&mut self.scene);
        self.scene.replace_root(root);

        info!(
            "Displaying '{}': {} meshes, {} vertices",
            info.name, info.mesh_count, info.vertex_count
        );
        Ok(self.model_info.insert(info))
    }

    /// Remove the displayed model and its animation
    pub fn clear(&mut self) {
        self.simulation_manager.detach_simulation(&mut self.scene);
        self.scene.clear();
        self.model_info = None;
    }

    /// Advance the attached animation by one frame
    pub fn update(&mut self, delta_time: f64) {
        self.simulation_manager.update(delta_time, &mut self.scene);
    }

    /// Sun and planet positions while the solar system is displayed
    pub fn planet_positions(&self) -> Option<Vec<(String, Point3<f64>)>> {
        self.simulation_manager
            .simulation()
            .and_then(|s| s.as_any().downcast_ref::<OrbitalSimulation>())
            .map(|orbital| orbital.snapshot_positions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_swap_replaces_animation() {
        let mut viewer = Viewer::new();
        viewer.show_sample(SampleModel::SolarSystem);
        assert!(viewer.simulation_manager().has_simulation());
        assert_eq!(viewer.planet_positions().map(|p| p.len()), Some(10));

        viewer.show_sample(SampleModel::Cube);
        assert!(!viewer.simulation_manager().has_simulation());
        assert!(viewer.planet_positions().is_none());

        let info = viewer.model_info().unwrap();
        assert_eq!(info.name, "Cube");
        assert_eq!(info.vertex_count, 36);
        assert_eq!(info.face_count, 12);
    }

    #[test]
    fn test_dna_sample_spins() {
        let mut viewer = Viewer::new();
        viewer.show_sample(SampleModel::DnaHelix);
        assert_eq!(
            viewer.simulation_manager().current_simulation_name(),
            Some("Helix Spin")
        );

        viewer.update(2.5);
        let root = viewer.scene().root().unwrap();
        assert!(root.transform.is_some());
    }

    #[test]
    fn test_clear() {
        let mut viewer = Viewer::new();
        viewer.show_sample(SampleModel::SolarSystem);
        viewer.clear();
        assert!(viewer.scene().is_empty());
        assert!(viewer.model_info().is_none());
        assert!(!viewer.simulation_manager().has_simulation());
    }
}
