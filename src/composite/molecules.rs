//! Small molecules and crystal cells built from atoms and bonds

use cgmath::{InnerSpace, Point3, Vector3};
use log::debug;

use super::bond::{atom, bond};
use crate::gfx::material::{palette, Material};
use crate::gfx::scene::SceneNode;

/// Sphere resolution used for molecule atoms
pub const ATOM_SEGMENTS: u32 = 20;
/// Cylinder resolution used for molecule bonds
pub const BOND_SEGMENTS: u32 = 8;

/// Description of one atom species
#[derive(Debug, Clone, PartialEq)]
pub struct AtomKind {
    pub element: String,
    pub radius: f64,
    pub color: [f32; 4],
}

impl AtomKind {
    pub fn new(element: &str, radius: f64, color: [f32; 4]) -> Self {
        Self {
            element: element.to_string(),
            radius,
            color,
        }
    }

    fn node(&self, center: Point3<f64>) -> SceneNode {
        let material = Material::glossy(&self.element, self.color, 50.0);
        let mut node = atom(center, self.radius, ATOM_SEGMENTS, ATOM_SEGMENTS, material);
        node.name = self.element.clone();
        node
    }
}

/// Positions of the two peripheral atoms of a bent triatomic molecule
///
/// The central atom sits at the origin and the molecule lies in the XY plane,
/// symmetric about +Y, so the angle between the two bonds is exactly
/// `bond_angle_deg`.
pub fn triatomic_positions(bond_length: f64, bond_angle_deg: f64) -> [Point3<f64>; 2] {
    let half = bond_angle_deg.to_radians() / 2.0;
    let (x, y) = (bond_length * half.sin(), bond_length * half.cos());
    [Point3::new(-x, y, 0.0), Point3::new(x, y, 0.0)]
}

/// Generate a bent triatomic molecule such as H₂O
///
/// # Arguments
/// * `central` - Species at the origin
/// * `peripheral` - Species of the two outer atoms
/// * `bond_length` - Distance from the central atom to each outer atom
/// * `bond_angle_deg` - Angle between the two bonds, in degrees
pub fn generate_triatomic(
    name: &str,
    central: &AtomKind,
    peripheral: &AtomKind,
    bond_length: f64,
    bond_angle_deg: f64,
) -> SceneNode {
    let origin = Point3::new(0.0, 0.0, 0.0);
    let outer = triatomic_positions(bond_length, bond_angle_deg);
    let bond_material = Material::new("Bond", palette::LIGHT_GRAY);

    let mut children = vec![central.node(origin)];
    children.extend(outer.iter().map(|&p| peripheral.node(p)));
    children.extend(
        outer
            .iter()
            .map(|&p| bond(origin, p, 0.05, BOND_SEGMENTS, bond_material.clone())),
    );

    SceneNode::group(name, children)
}

/// Generate a water molecule: red oxygen, white hydrogens, 0.96 bonds at 104.5°
pub fn generate_water_molecule() -> SceneNode {
    generate_triatomic(
        "Water (H₂O)",
        &AtomKind::new("Oxygen", 0.4, palette::RED),
        &AtomKind::new("Hydrogen", 0.2, palette::WHITE),
        0.96,
        104.5,
    )
}

/// Carbon sites of one diamond-cubic cell of edge `size`, centered on the origin
///
/// Eight corners, six face centers and the four occupied tetrahedral sites.
pub fn diamond_sites(size: f64) -> Vec<Point3<f64>> {
    const FRACTIONS: [[f64; 3]; 18] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [0.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.5, 0.5, 0.0],
        [0.5, 0.0, 0.5],
        [0.0, 0.5, 0.5],
        [1.0, 0.5, 0.5],
        [0.5, 1.0, 0.5],
        [0.5, 0.5, 1.0],
        [0.25, 0.25, 0.25],
        [0.75, 0.75, 0.25],
        [0.75, 0.25, 0.75],
        [0.25, 0.75, 0.75],
    ];

    FRACTIONS
        .iter()
        .map(|&[x, y, z]| Point3::new((x - 0.5) * size, (y - 0.5) * size, (z - 0.5) * size))
        .collect()
}

/// Generate a diamond-cubic unit cell with nearest-neighbour bonds
///
/// Pairs of sites closer than `0.6 · size` are bonded.
pub fn generate_diamond_lattice(size: f64) -> SceneNode {
    let carbon = AtomKind::new("Carbon", 0.15, palette::DARK_GRAY);
    let bond_material = Material::new("Bond", palette::LIGHT_GRAY);
    let threshold = size * 0.6;
    let sites = diamond_sites(size);

    let mut children: Vec<SceneNode> = sites.iter().map(|&p| carbon.node(p)).collect();
    for (i, &a) in sites.iter().enumerate() {
        for &b in &sites[i + 1..] {
            let distance: Vector3<f64> = b - a;
            if distance.magnitude() < threshold {
                children.push(bond(a, b, 0.04, BOND_SEGMENTS, bond_material.clone()));
            }
        }
    }

    debug!(
        "Generated diamond lattice: {} atoms, {} bonds",
        sites.len(),
        children.len() - sites.len()
    );
    SceneNode::group("Diamond Lattice", children)
}
