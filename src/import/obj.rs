//! Wavefront OBJ import through `tobj`

use std::path::Path;

use cgmath::{Point3, Vector3};
use log::{info, warn};

use super::{ImportError, ImportedMaterial, ImportedMesh, ImportedScene, ModelImporter};

/// Loads `.obj` files and their `.mtl` libraries
///
/// Polygons are triangulated and positions, normals and texture coordinates
/// are merged into a single index stream. A missing or broken material
/// library is not fatal: the meshes load with default materials.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjImporter;

impl ObjImporter {
    pub fn new() -> Self {
        Self
    }

    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        }
    }
}

impl ModelImporter for ObjImporter {
    fn import(&self, path: &Path) -> Result<ImportedScene, ImportError> {
        if !path.is_file() {
            return Err(ImportError::NotFound(path.to_path_buf()));
        }
        if !self.supports(path) {
            let extension = path
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Err(ImportError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            });
        }

        let (models, materials) =
            tobj::load_obj(path, &Self::load_options()).map_err(|source| ImportError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let materials = materials.unwrap_or_else(|e| {
            warn!("No usable MTL for {}: {}, using default materials", path.display(), e);
            Vec::new()
        });

        let meshes: Vec<ImportedMesh> = models
            .into_iter()
            .filter(|model| !model.mesh.positions.is_empty())
            .map(convert_model)
            .collect();

        if meshes.is_empty() {
            return Err(ImportError::Empty);
        }

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let scene = ImportedScene {
            name,
            meshes,
            materials: materials.into_iter().map(convert_material).collect(),
        };

        info!(
            "Imported {}: {} meshes, {} vertices, {} faces",
            path.display(),
            scene.meshes.len(),
            scene.vertex_count(),
            scene.face_count()
        );
        Ok(scene)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["obj"]
    }
}

fn convert_model(model: tobj::Model) -> ImportedMesh {
    let mesh = model.mesh;
    let vertex_count = mesh.positions.len() / 3;

    let positions = mesh
        .positions
        .chunks_exact(3)
        .map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64))
        .collect();

    // With a single index stream, attributes are either complete or absent
    let normals = (mesh.normals.len() == vertex_count * 3 && vertex_count > 0).then(|| {
        mesh.normals
            .chunks_exact(3)
            .map(|n| Vector3::new(n[0] as f64, n[1] as f64, n[2] as f64))
            .collect()
    });

    let tex_coords = (mesh.texcoords.len() == vertex_count * 2 && vertex_count > 0).then(|| {
        mesh.texcoords
            .chunks_exact(2)
            .map(|t| [t[0] as f64, t[1] as f64])
            .collect()
    });

    ImportedMesh {
        name: model.name,
        positions,
        normals,
        tex_coords,
        indices: mesh.indices,
        material_index: mesh.material_id,
    }
}

fn convert_material(material: tobj::Material) -> ImportedMaterial {
    ImportedMaterial {
        name: material.name,
        diffuse: material.diffuse,
        specular: material.specular,
        shininess: material.shininess,
        dissolve: material.dissolve,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    const CUBE_OBJ: &str = "\
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_quads_are_triangulated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "cube.obj", CUBE_OBJ);

        let scene = ObjImporter::new().import(&path).unwrap();
        assert_eq!(scene.name, "cube");
        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.vertex_count(), 8);
        assert_eq!(scene.face_count(), 12);
        assert!(scene.meshes[0].normals.is_none());

        let root = scene.into_scene_node().unwrap();
        let mesh = root.children()[0].mesh().unwrap();
        assert_eq!(mesh.normals.len(), 8);
        assert!(mesh.check_invariants().is_ok());
    }

    #[test]
    fn test_materials_from_library() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "red.mtl",
            "newmtl red\nKd 1.0 0.0 0.0\nKs 0.5 0.5 0.5\nNs 10\n",
        );
        let path = write(
            dir.path(),
            "cube.obj",
            &format!("mtllib red.mtl\nusemtl red\n{}", CUBE_OBJ),
        );

        let scene = ObjImporter::new().import(&path).unwrap();
        assert_eq!(scene.materials.len(), 1);
        assert_eq!(scene.meshes[0].material_index, Some(0));

        let root = scene.into_scene_node().unwrap();
        let material = root.children()[0].material().unwrap();
        assert_eq!(material.name, "red");
        assert_eq!(material.diffuse, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_library_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "cube.obj",
            &format!("mtllib missing.mtl\n{}", CUBE_OBJ),
        );

        let scene = ObjImporter::new().import(&path).unwrap();
        assert!(scene.materials.is_empty());
        assert_eq!(scene.face_count(), 12);
    }

    #[test]
    fn test_distinct_failures() {
        let dir = tempfile::tempdir().unwrap();
        let importer = ObjImporter::new();

        let missing = dir.path().join("missing.obj");
        assert!(matches!(importer.import(&missing), Err(ImportError::NotFound(_))));

        let stl = write(dir.path(), "model.stl", "solid nothing\n");
        match importer.import(&stl) {
            Err(ImportError::UnsupportedFormat { extension, .. }) => assert_eq!(extension, "stl"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }

        let empty = write(dir.path(), "empty.obj", "# nothing here\n");
        assert!(matches!(importer.import(&empty), Err(ImportError::Empty)));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let importer = ObjImporter::new();
        assert!(importer.supports(Path::new("Model.OBJ")));
        assert!(!importer.supports(Path::new("model.fbx")));
        assert!(!importer.supports(Path::new("obj")));
    }
}
