//! # Model Import
//!
//! Boundary between the viewer and third-party mesh loaders.
//!
//! An importer turns a file into an [`ImportedScene`]: raw, fully populated
//! buffers per sub-mesh plus the materials they reference. Conversion into the
//! scene graph happens afterwards in [`ImportedScene::into_scene_node`], which
//! validates every buffer and fills in missing normals. Nothing is handed to
//! the displayed scene until conversion has succeeded.
//!
//! ## Supported formats
//!
//! - Wavefront OBJ with optional MTL materials, via [`obj::ObjImporter`]

pub mod obj;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use cgmath::{Point3, Vector3};
use log::{debug, warn};
use thiserror::Error;

use crate::gfx::geometry::{Mesh, MeshError, NormalStrategy};
use crate::gfx::material::Material;
use crate::gfx::scene::{Bounds, SceneNode};

pub use obj::ObjImporter;

/// Failures surfaced by a model load
///
/// Every variant is recoverable: the caller keeps displaying whatever it had.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("unsupported format '{extension}' for {}", .path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("file does not contain any mesh data")]
    Empty,
    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("mesh {mesh_index} is malformed")]
    InvalidMesh {
        mesh_index: usize,
        #[source]
        source: MeshError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Loader for one family of mesh file formats
pub trait ModelImporter {
    /// Load `path` into raw buffers
    ///
    /// Faces must come back triangulated.
    fn import(&self, path: &Path) -> Result<ImportedScene, ImportError>;

    /// Lower-case extensions without the leading dot
    fn supported_extensions(&self) -> &[&str];

    /// Whether `path` has one of the supported extensions
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.supported_extensions().iter().any(|s| *s == ext)
            })
            .unwrap_or(false)
    }
}

/// Material as described by the source file
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMaterial {
    pub name: String,
    pub diffuse: Option<[f32; 3]>,
    pub specular: Option<[f32; 3]>,
    pub shininess: Option<f32>,
    /// Opacity, 1.0 when absent
    pub dissolve: Option<f32>,
}

impl ImportedMaterial {
    /// Viewer material; absent diffuse falls back to the default gray
    pub fn to_material(&self) -> Material {
        let fallback = Material::default();
        let diffuse = match self.diffuse {
            Some([r, g, b]) => [r, g, b, self.dissolve.unwrap_or(1.0)],
            None => fallback.diffuse,
        };

        let material = Material::new(&self.name, diffuse);
        match self.specular {
            Some([r, g, b]) => material.with_specular([r, g, b, 1.0], self.shininess.unwrap_or(0.0)),
            None => material,
        }
    }
}

/// One sub-mesh as delivered by an importer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedMesh {
    pub name: String,
    pub positions: Vec<Point3<f64>>,
    pub normals: Option<Vec<Vector3<f64>>>,
    pub tex_coords: Option<Vec<[f64; 2]>>,
    /// Flat triangle list
    pub indices: Vec<u32>,
    pub material_index: Option<usize>,
}

impl ImportedMesh {
    /// Validate the buffers and build a mesh, estimating normals when absent
    pub fn to_mesh(&self) -> Result<Mesh, MeshError> {
        let mut mesh = Mesh {
            positions: self.positions.clone(),
            normals: self.normals.clone().unwrap_or_default(),
            tex_coords: self.tex_coords.clone().unwrap_or_default(),
            indices: self.indices.clone(),
        };
        mesh.check_invariants()?;

        if !mesh.has_normals() {
            mesh.compute_normals(&NormalStrategy::Accumulated);
        }
        Ok(mesh)
    }
}

/// Fully populated result of an import
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedScene {
    pub name: String,
    pub meshes: Vec<ImportedMesh>,
    pub materials: Vec<ImportedMaterial>,
}

impl ImportedScene {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.positions.len()).sum()
    }

    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }

    /// Convert into a group node with one leaf per sub-mesh
    ///
    /// A missing or dangling material reference gets the default material.
    pub fn into_scene_node(self) -> Result<SceneNode, ImportError> {
        if self.meshes.is_empty() {
            return Err(ImportError::Empty);
        }

        let mut children = Vec::with_capacity(self.meshes.len());
        for (mesh_index, imported) in self.meshes.iter().enumerate() {
            let mesh = imported
                .to_mesh()
                .map_err(|source| ImportError::InvalidMesh { mesh_index, source })?;

            let material = match imported.material_index {
                Some(i) => match self.materials.get(i) {
                    Some(m) => m.to_material(),
                    None => {
                        warn!(
                            "Mesh '{}' references missing material {}, using default",
                            imported.name, i
                        );
                        Material::default()
                    }
                },
                None => Material::default(),
            };

            let name = if imported.name.is_empty() {
                format!("mesh_{}", mesh_index)
            } else {
                imported.name.clone()
            };
            children.push(SceneNode::leaf(name, mesh, material));
        }

        debug!("Converted '{}' into {} leaves", self.name, children.len());
        Ok(SceneNode::group(self.name, children))
    }
}

/// Where the displayed model came from
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    File { path: PathBuf, size: u64 },
    Sample,
}

/// Summary of the displayed model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    pub source: ModelSource,
    pub vertex_count: usize,
    pub face_count: usize,
    pub mesh_count: usize,
    /// `None` for a model without vertices
    pub bounds: Option<Bounds>,
}

impl ModelInfo {
    /// Summarize a model subtree
    pub fn from_node(name: &str, source: ModelSource, root: &SceneNode) -> Self {
        let stats = root.statistics();
        Self {
            name: name.to_string(),
            source,
            vertex_count: stats.total_vertices,
            face_count: stats.total_triangles,
            mesh_count: stats.mesh_count,
            bounds: root.bounds(),
        }
    }

    pub fn is_sample(&self) -> bool {
        matches!(self.source, ModelSource::Sample)
    }

    pub fn center(&self) -> Point3<f64> {
        self.bounds
            .map(|b| b.center())
            .unwrap_or_else(|| Point3::new(0.0, 0.0, 0.0))
    }

    pub fn dimensions(&self) -> Vector3<f64> {
        self.bounds
            .map(|b| b.dimensions())
            .unwrap_or_else(|| Vector3::new(0.0, 0.0, 0.0))
    }

    pub fn bounding_radius(&self) -> f64 {
        self.bounds.map(|b| b.bounding_radius()).unwrap_or(0.0)
    }

    /// "Sample" for generated models, otherwise the formatted file size
    pub fn size_string(&self) -> String {
        match &self.source {
            ModelSource::File { size, .. } => format_file_size(*size),
            ModelSource::Sample => "Sample".to_string(),
        }
    }
}

impl fmt::Display for ModelInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} vertices",
            self.name,
            self.size_string(),
            self.vertex_count
        )
    }
}

/// A loadable file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

/// Human-readable byte count with at most two decimals, e.g. `1.5 KB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut len = bytes as f64;
    let mut order = 0;
    while len >= 1024.0 && order < UNITS.len() - 1 {
        order += 1;
        len /= 1024.0;
    }

    let number = format!("{:.2}", len);
    let number = number.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", number, UNITS[order])
}

/// List every file under `dir` the importer can load, sorted by file name
///
/// Subdirectories are searched recursively. Entries that cannot be read are
/// skipped with a warning; only a failure to read `dir` itself is an error.
pub fn scan_directory(dir: &Path, importer: &dyn ModelImporter) -> Result<Vec<ModelFile>, ImportError> {
    if !dir.is_dir() {
        return Err(ImportError::NotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    let mut is_root = true;

    while let Some(current) = pending.pop() {
        let entries = match fs::read_dir(&current) {
            Ok(entries) => entries,
            Err(e) if is_root => return Err(e.into()),
            Err(e) => {
                warn!("Skipping directory {}: {}", current.display(), e);
                continue;
            }
        };
        is_root = false;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping entry in {}: {}", current.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            if metadata.is_dir() {
                pending.push(path);
            } else if importer.supports(&path) {
                let file_name = entry.file_name().to_string_lossy().into_owned();
                files.push(ModelFile {
                    path,
                    file_name,
                    size: metadata.len(),
                });
            }
        }
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name).then_with(|| a.path.cmp(&b.path)));
    debug!("Found {} model files under {}", files.len(), dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle(material_index: Option<usize>) -> ImportedMesh {
        ImportedMesh {
            name: "tri".to_string(),
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            indices: vec![0, 1, 2],
            material_index,
            ..Default::default()
        }
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn test_missing_normals_are_estimated() {
        let mesh = triangle(None).to_mesh().unwrap();
        assert_eq!(mesh.normals.len(), 3);
        for n in &mesh.normals {
            assert_relative_eq!(n.z, 1.0);
        }
    }

    #[test]
    fn test_invalid_meshes_are_rejected() {
        let mut quad = triangle(None);
        quad.indices.push(0);
        let scene = ImportedScene {
            name: "bad".to_string(),
            meshes: vec![triangle(None), quad],
            materials: Vec::new(),
        };
        match scene.into_scene_node() {
            Err(ImportError::InvalidMesh { mesh_index, source }) => {
                assert_eq!(mesh_index, 1);
                assert_eq!(source, MeshError::IncompleteTriangle(4));
            }
            other => panic!("expected InvalidMesh, got {:?}", other),
        }

        let mut dangling = triangle(None);
        dangling.indices[2] = 7;
        assert!(matches!(
            dangling.to_mesh(),
            Err(MeshError::IndexOutOfRange { index: 7, .. })
        ));

        assert!(matches!(
            ImportedScene::default().into_scene_node(),
            Err(ImportError::Empty)
        ));
    }

    #[test]
    fn test_material_mapping() {
        let scene = ImportedScene {
            name: "model".to_string(),
            meshes: vec![triangle(Some(0)), triangle(Some(3)), triangle(None)],
            materials: vec![ImportedMaterial {
                name: "red".to_string(),
                diffuse: Some([1.0, 0.0, 0.0]),
                specular: Some([0.5, 0.5, 0.5]),
                shininess: Some(10.0),
                dissolve: Some(0.5),
            }],
        };
        let root = scene.into_scene_node().unwrap();
        let children = root.children();

        let red = children[0].material().unwrap();
        assert_eq!(red.diffuse, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(red.specular, Some([0.5, 0.5, 0.5, 1.0]));
        assert_eq!(red.shininess, 10.0);

        assert_eq!(children[1].material(), Some(&Material::default()));
        assert_eq!(children[2].material(), Some(&Material::default()));
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("b.obj"), "v 0 0 0\n").unwrap();
        fs::write(nested.join("a.OBJ"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = scan_directory(dir.path(), &ObjImporter::new()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.OBJ", "b.obj"]);
        assert_eq!(files[1].size, 8);

        assert!(matches!(
            scan_directory(&dir.path().join("gone"), &ObjImporter::new()),
            Err(ImportError::NotFound(_))
        ));
    }

    #[test]
    fn test_model_info() {
        let root = ImportedScene {
            name: "model".to_string(),
            meshes: vec![triangle(None)],
            materials: Vec::new(),
        }
        .into_scene_node()
        .unwrap();

        let info = ModelInfo::from_node(
            "model.obj",
            ModelSource::File {
                path: PathBuf::from("model.obj"),
                size: 2048,
            },
            &root,
        );
        assert_eq!(info.vertex_count, 3);
        assert_eq!(info.face_count, 1);
        assert_eq!(info.mesh_count, 1);
        assert_relative_eq!(info.center().x, 0.5);
        assert_relative_eq!(info.bounding_radius(), 2f64.sqrt() / 2.0);
        assert_eq!(info.to_string(), "model.obj (2 KB) - 3 vertices");

        let sample = ModelInfo::from_node("Cube", ModelSource::Sample, &root);
        assert!(sample.is_sample());
        assert_eq!(sample.size_string(), "Sample");
    }
}
