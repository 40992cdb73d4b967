//! # Composite Structures
//!
//! Multi-node models assembled from instanced spheres and oriented cylinders:
//! molecules, a crystal cell and the DNA double helix. Each generator returns
//! a group node ready to be installed as the displayed model.
//!
//! All structures place bonds the same way: a cylinder centered on the origin
//! along +Y, rotated onto the bond direction and moved to the bond midpoint
//! (see [`bond::bond_transform`]).

pub mod bond;
pub mod dna;
pub mod molecules;

pub use bond::{atom, bond, bond_transform};
pub use dna::{
    generate_dna_helix, generate_dna_sequence, parse_sequence, Nucleotide, ParseNucleotideError,
};
pub use molecules::{generate_diamond_lattice, generate_triatomic, generate_water_molecule, AtomKind};
