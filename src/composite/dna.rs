//! # DNA Double Helix
//!
//! Ball-and-stick model of a double helix: two strands of nucleotide spheres
//! wound twice around the Y axis, joined by a base-pair bond at every step and
//! by backbone bonds between consecutive steps along each strand.
//!
//! [`generate_dna_helix`] colors base pairs by step parity (A–T on even steps,
//! G–C on odd ones). [`generate_dna_sequence`] takes an actual sequence for the
//! first strand and pairs every base with its complement.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use cgmath::Point3;
use log::debug;
use thiserror::Error;

use super::bond::{atom, bond};
use crate::gfx::material::{palette, Material};
use crate::gfx::scene::SceneNode;

/// Radius of the helix the strands wind around
pub const HELIX_RADIUS: f64 = 0.8;
pub const NUCLEOTIDE_RADIUS: f64 = 0.15;
pub const NUCLEOTIDE_SEGMENTS: u32 = 16;
pub const BASE_PAIR_BOND_RADIUS: f64 = 0.08;
pub const BACKBONE_RADIUS: f64 = BASE_PAIR_BOND_RADIUS * 1.5;
pub const BOND_SEGMENTS: u32 = 12;
/// Full turns over the height of the helix
pub const TURNS: f64 = 2.0;

/// One of the four DNA bases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nucleotide {
    Adenine,
    Thymine,
    Guanine,
    Cytosine,
}

impl Nucleotide {
    /// Watson–Crick partner
    pub fn complement(self) -> Self {
        match self {
            Nucleotide::Adenine => Nucleotide::Thymine,
            Nucleotide::Thymine => Nucleotide::Adenine,
            Nucleotide::Guanine => Nucleotide::Cytosine,
            Nucleotide::Cytosine => Nucleotide::Guanine,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Nucleotide::Adenine => 'A',
            Nucleotide::Thymine => 'T',
            Nucleotide::Guanine => 'G',
            Nucleotide::Cytosine => 'C',
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            Nucleotide::Adenine => palette::RED,
            Nucleotide::Thymine => palette::BLUE,
            Nucleotide::Guanine => palette::YELLOW,
            Nucleotide::Cytosine => palette::GREEN,
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Nucleotide::Adenine),
            'T' => Some(Nucleotide::Thymine),
            'G' => Some(Nucleotide::Guanine),
            'C' => Some(Nucleotide::Cytosine),
            _ => None,
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Nucleotide::Adenine => "Adenine",
            Nucleotide::Thymine => "Thymine",
            Nucleotide::Guanine => "Guanine",
            Nucleotide::Cytosine => "Cytosine",
        };
        f.write_str(name)
    }
}

/// A character in a sequence string that is not a base letter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid nucleotide '{found}' at position {position}, expected one of A, T, G, C")]
pub struct ParseNucleotideError {
    pub position: usize,
    pub found: char,
}

impl FromStr for Nucleotide {
    type Err = ParseNucleotideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Nucleotide::from_letter(c).ok_or(ParseNucleotideError { position: 0, found: c })
            }
            (Some(_), Some(extra)) => Err(ParseNucleotideError {
                position: 1,
                found: extra,
            }),
            (None, _) => Err(ParseNucleotideError {
                position: 0,
                found: ' ',
            }),
        }
    }
}

/// Parse a sequence such as `"ATGC"`; letters are case-insensitive and
/// whitespace is skipped.
pub fn parse_sequence(sequence: &str) -> Result<Vec<Nucleotide>, ParseNucleotideError> {
    sequence
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, found)| {
            Nucleotide::from_letter(found).ok_or(ParseNucleotideError { position, found })
        })
        .collect()
}

/// Generate the demonstration helix with parity-based base pairs
///
/// # Arguments
/// * `base_pairs` - Number of steps along the helix
/// * `height` - Total height, centered on the origin
pub fn generate_dna_helix(base_pairs: u32, height: f64) -> SceneNode {
    let strand: Vec<Nucleotide> = (0..base_pairs)
        .map(|i| {
            if i % 2 == 0 {
                Nucleotide::Adenine
            } else {
                Nucleotide::Guanine
            }
        })
        .collect();
    build_helix(&strand, height)
}

/// Generate a helix whose first strand follows `sequence`
pub fn generate_dna_sequence(sequence: &[Nucleotide], height: f64) -> SceneNode {
    build_helix(sequence, height)
}

/// Positions of the two strands at step `i` of `count`
pub fn strand_positions(i: u32, count: u32, height: f64) -> (Point3<f64>, Point3<f64>) {
    let t = i as f64 / count.max(1) as f64;
    let angle = t * TURNS * 2.0 * PI;
    let y = t * height - height / 2.0;

    let first = Point3::new(HELIX_RADIUS * angle.cos(), y, HELIX_RADIUS * angle.sin());
    let second = Point3::new(
        HELIX_RADIUS * (angle + PI).cos(),
        y,
        HELIX_RADIUS * (angle + PI).sin(),
    );
    (first, second)
}

fn nucleotide_node(base: Nucleotide, center: Point3<f64>, step: usize) -> SceneNode {
    let material = Material::glossy(&base.to_string(), base.color(), 50.0);
    let mut node = atom(
        center,
        NUCLEOTIDE_RADIUS,
        NUCLEOTIDE_SEGMENTS,
        NUCLEOTIDE_SEGMENTS,
        material,
    );
    node.name = format!("{} {}", base, step);
    node
}

fn build_helix(strand: &[Nucleotide], height: f64) -> SceneNode {
    let count = strand.len() as u32;
    let pair_material = Material::new("Base pair", palette::WHITE);
    let backbone_material = Material::new("Backbone", palette::GRAY);

    let mut children = Vec::with_capacity(strand.len() * 5);
    for (i, &base) in strand.iter().enumerate() {
        let (first, second) = strand_positions(i as u32, count, height);

        children.push(nucleotide_node(base, first, i));
        children.push(nucleotide_node(base.complement(), second, i));

        let mut pair = bond(
            first,
            second,
            BASE_PAIR_BOND_RADIUS,
            BOND_SEGMENTS,
            pair_material.clone(),
        );
        pair.name = format!("Base pair {}", i);
        children.push(pair);

        if i > 0 {
            let (previous_first, previous_second) = strand_positions(i as u32 - 1, count, height);
            for (strand_index, (from, to)) in [(previous_first, first), (previous_second, second)]
                .into_iter()
                .enumerate()
            {
                let mut backbone = bond(
                    from,
                    to,
                    BACKBONE_RADIUS,
                    BOND_SEGMENTS,
                    backbone_material.clone(),
                );
                backbone.name = format!("Backbone {}.{}", strand_index + 1, i);
                children.push(backbone);
            }
        }
    }

    debug!(
        "Generated DNA helix with {} base pairs ({} nodes)",
        strand.len(),
        children.len()
    );
    SceneNode::group("DNA Double Helix", children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_helix_child_layout() {
        let helix = generate_dna_helix(20, 10.0);
        let children = helix.children();
        assert_eq!(children.len(), 5 * 20 - 2);

        // First step: two nucleotides and the pair bond
        assert_eq!(children[0].name, "Adenine 0");
        assert_eq!(children[1].name, "Thymine 0");
        assert_eq!(children[2].name, "Base pair 0");
        // Second step adds two backbone bonds after its pair
        assert_eq!(children[3].name, "Guanine 1");
        assert_eq!(children[4].name, "Cytosine 1");
        assert_eq!(children[6].name, "Backbone 1.1");
        assert_eq!(children[7].name, "Backbone 2.1");

        assert_eq!(children[0].material().map(|m| m.diffuse), Some(palette::RED));
        assert_eq!(children[4].material().map(|m| m.diffuse), Some(palette::GREEN));
    }

    #[test]
    fn test_strands_are_opposite() {
        for i in 0..20 {
            let (a, b) = strand_positions(i, 20, 10.0);
            assert_relative_eq!(a.x, -b.x, epsilon = 1e-12);
            assert_relative_eq!(a.z, -b.z, epsilon = 1e-12);
            assert_relative_eq!(a.y, b.y);
        }
        let (first, _) = strand_positions(0, 20, 10.0);
        assert_relative_eq!(first.y, -5.0);
        assert_relative_eq!(first.x, HELIX_RADIUS);
    }

    #[test]
    fn test_sequence_uses_complements() {
        let sequence = parse_sequence("gat c").unwrap();
        assert_eq!(
            sequence,
            vec![
                Nucleotide::Guanine,
                Nucleotide::Adenine,
                Nucleotide::Thymine,
                Nucleotide::Cytosine
            ]
        );

        let helix = generate_dna_sequence(&sequence, 4.0);
        let names: Vec<&str> = helix
            .children()
            .iter()
            .filter(|c| !c.name.starts_with("B"))
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Guanine 0",
                "Cytosine 0",
                "Adenine 1",
                "Thymine 1",
                "Thymine 2",
                "Adenine 2",
                "Cytosine 3",
                "Guanine 3"
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_sequence("ATXG"),
            Err(ParseNucleotideError {
                position: 2,
                found: 'X'
            })
        );
        assert_eq!("c".parse::<Nucleotide>(), Ok(Nucleotide::Cytosine));
        assert!("AT".parse::<Nucleotide>().is_err());
    }

    #[test]
    fn test_empty_sequence() {
        let helix = generate_dna_sequence(&[], 10.0);
        assert!(helix.children().is_empty());
        assert_eq!(helix.statistics().mesh_count, 0);
    }
}
