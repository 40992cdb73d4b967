//! Catalog of demonstration models
//!
//! Every sample the viewer offers, with the fixed parameters it is built with.
//! Building a sample yields the root node to display and, for animated
//! samples, the simulation that drives it.

use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::composite::{generate_diamond_lattice, generate_dna_helix, generate_water_molecule};
use crate::gfx::geometry::{self, Mesh};
use crate::gfx::material::{palette, Material};
use crate::gfx::scene::SceneNode;
use crate::simulation::{HelixSpin, OrbitalSimulation, Simulation};

/// Shininess of the material given to single-mesh samples
pub const SAMPLE_SHININESS: f32 = 30.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sample model '{0}'")]
pub struct UnknownSampleError(pub String);

/// A built sample, ready to be displayed
pub struct SampleScene {
    pub root: SceneNode,
    /// Animation to attach once `root` is displayed
    pub animation: Option<Box<dyn Simulation>>,
}

impl fmt::Debug for SampleScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleScene")
            .field("root", &self.root.name)
            .field("animation", &self.animation.as_ref().map(|a| a.name().to_string()))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleModel {
    Cube,
    Sphere,
    Cylinder,
    Cone,
    Pyramid,
    Cuboid,
    Torus,
    Ellipsoid,
    Gear,
    Spring,
    MobiusStrip,
    TriangularPrism,
    SineWave,
    Tetrahedron,
    Octahedron,
    Icosahedron,
    FibonacciSpiral,
    DiamondLattice,
    WaterMolecule,
    DnaHelix,
    SolarSystem,
}

impl SampleModel {
    pub const ALL: [SampleModel; 21] = [
        SampleModel::Cube,
        SampleModel::Sphere,
        SampleModel::Cylinder,
        SampleModel::Cone,
        SampleModel::Pyramid,
        SampleModel::Cuboid,
        SampleModel::Torus,
        SampleModel::Ellipsoid,
        SampleModel::Gear,
        SampleModel::Spring,
        SampleModel::MobiusStrip,
        SampleModel::TriangularPrism,
        SampleModel::SineWave,
        SampleModel::Tetrahedron,
        SampleModel::Octahedron,
        SampleModel::Icosahedron,
        SampleModel::FibonacciSpiral,
        SampleModel::DiamondLattice,
        SampleModel::WaterMolecule,
        SampleModel::DnaHelix,
        SampleModel::SolarSystem,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SampleModel::Cube => "Cube",
            SampleModel::Sphere => "Sphere",
            SampleModel::Cylinder => "Cylinder",
            SampleModel::Cone => "Cone",
            SampleModel::Pyramid => "Pyramid",
            SampleModel::Cuboid => "Cuboid",
            SampleModel::Torus => "Torus",
            SampleModel::Ellipsoid => "Ellipsoid",
            SampleModel::Gear => "Gear",
            SampleModel::Spring => "Spring",
            SampleModel::MobiusStrip => "Möbius Strip",
            SampleModel::TriangularPrism => "Triangular Prism",
            SampleModel::SineWave => "Sine Wave",
            SampleModel::Tetrahedron => "Tetrahedron",
            SampleModel::Octahedron => "Octahedron",
            SampleModel::Icosahedron => "Icosahedron",
            SampleModel::FibonacciSpiral => "Fibonacci Spiral",
            SampleModel::DiamondLattice => "Diamond Lattice",
            SampleModel::WaterMolecule => "Water Molecule",
            SampleModel::DnaHelix => "DNA Helix",
            SampleModel::SolarSystem => "Solar System",
        }
    }

    /// Whether the sample comes with an animation
    pub fn is_animated(self) -> bool {
        matches!(self, SampleModel::DnaHelix | SampleModel::SolarSystem)
    }

    /// Mesh of a single-surface sample, `None` for composite samples
    pub fn mesh(self) -> Option<Mesh> {
        let mesh = match self {
            SampleModel::Cube => geometry::generate_cube(2.0),
            SampleModel::Sphere => geometry::generate_sphere(1.5, 32),
            SampleModel::Cylinder => geometry::generate_cylinder(1.0, 2.0, 32),
            SampleModel::Cone => geometry::generate_cone(1.0, 2.0, 32),
            SampleModel::Pyramid => geometry::generate_pyramid(2.0),
            SampleModel::Cuboid => geometry::generate_cuboid(2.0, 1.5, 1.0),
            SampleModel::Torus => geometry::generate_torus(1.0, 0.3, 32, 16),
            SampleModel::Ellipsoid => geometry::generate_ellipsoid(1.5, 1.0, 0.8, 32),
            SampleModel::Gear => geometry::generate_gear(0.5, 1.0, 0.3, 12),
            SampleModel::Spring => geometry::generate_spring(0.5, 0.1, 3.0, 10, 16),
            SampleModel::MobiusStrip => geometry::generate_mobius_strip(1.0, 0.4, 64),
            SampleModel::TriangularPrism => geometry::generate_triangular_prism(1.5, 2.5),
            SampleModel::SineWave => geometry::generate_sine_wave(0.5, 2.0, 3, 64),
            SampleModel::Tetrahedron => geometry::generate_tetrahedron(1.5),
            SampleModel::Octahedron => geometry::generate_octahedron(1.5),
            SampleModel::Icosahedron => geometry::generate_icosahedron(1.5),
            SampleModel::FibonacciSpiral => geometry::generate_spiral_lattice(500, 2.0),
            SampleModel::DiamondLattice
            | SampleModel::WaterMolecule
            | SampleModel::DnaHelix
            | SampleModel::SolarSystem => return None,
        };
        Some(mesh)
    }

    /// Generate the sample
    pub fn build(self) -> SampleScene {
        let (root, animation): (SceneNode, Option<Box<dyn Simulation>>) = match self {
            SampleModel::DiamondLattice => (generate_diamond_lattice(2.0), None),
            SampleModel::WaterMolecule => (generate_water_molecule(), None),
            SampleModel::DnaHelix => {
                let spin: Box<dyn Simulation> = Box::new(HelixSpin::new());
                (generate_dna_helix(20, 10.0), Some(spin))
            }
            SampleModel::SolarSystem => {
                let (simulation, root) = OrbitalSimulation::generate();
                let simulation: Box<dyn Simulation> = Box::new(simulation);
                (root, Some(simulation))
            }
            single => {
                let mesh = single.mesh().unwrap_or_default();
                let material = Material::new(single.name(), palette::LIGHT_BLUE)
                    .with_specular(palette::WHITE, SAMPLE_SHININESS);
                (SceneNode::leaf(single.name(), mesh, material), None)
            }
        };

        debug!("Built sample '{}'", self.name());
        SampleScene { root, animation }
    }
}

impl fmt::Display for SampleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower-case letters and digits only, with `ö` folded to `o`
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ö' { 'o' } else { c })
        .collect()
}

impl FromStr for SampleModel {
    type Err = UnknownSampleError;

    /// Case-insensitive; spaces, dashes and underscores are ignored, so
    /// `"solar-system"` and `"Solar System"` both parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        SampleModel::ALL
            .iter()
            .copied()
            .find(|model| normalize(model.name()) == wanted)
            .ok_or_else(|| UnknownSampleError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for model in SampleModel::ALL {
            assert_eq!(model.name().parse::<SampleModel>(), Ok(model));
        }
        assert_eq!("mobius-strip".parse::<SampleModel>(), Ok(SampleModel::MobiusStrip));
        assert_eq!("DNA_HELIX".parse::<SampleModel>(), Ok(SampleModel::DnaHelix));
        assert_eq!(
            "teapot".parse::<SampleModel>(),
            Err(UnknownSampleError("teapot".to_string()))
        );
    }

    #[test]
    fn test_every_sample_builds_valid_meshes() {
        for model in SampleModel::ALL {
            let sample = model.build();
            assert_eq!(sample.animation.is_some(), model.is_animated(), "{}", model);

            let mut meshes = 0;
            sample.root.visit(&mut |node, _| {
                if let Some(mesh) = node.mesh() {
                    meshes += 1;
                    assert!(mesh.check_invariants().is_ok(), "{}: {}", model, node.name);
                    assert!(mesh.triangle_count() > 0, "{}: {}", model, node.name);
                }
            });
            assert!(meshes > 0, "{}", model);
        }
    }

    #[test]
    fn test_single_mesh_material() {
        let sample = SampleModel::Torus.build();
        let material = sample.root.material().unwrap();
        assert_eq!(material.diffuse, palette::LIGHT_BLUE);
        assert_eq!(material.specular, Some(palette::WHITE));
        assert_eq!(material.shininess, SAMPLE_SHININESS);
        assert!(SampleModel::SolarSystem.mesh().is_none());
    }
}
