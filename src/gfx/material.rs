//! Surface appearance for scene leaves
//!
//! Materials are plain values owned by the node that uses them. Every material
//! renders both faces so open sheets and the Möbius strip stay visible from
//! either side.

/// Material definition: diffuse color plus optional specular highlight
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// RGBA diffuse color, components in [0, 1]
    pub diffuse: [f32; 4],
    /// RGBA specular color, `None` for matte surfaces
    pub specular: Option<[f32; 4]>,
    /// Specular exponent, only meaningful with `specular`
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::new("Default", palette::GRAY)
    }
}

impl Material {
    /// Creates a matte material
    ///
    /// # Arguments
    /// * `name` - Display name for this material
    /// * `diffuse` - RGBA diffuse color
    pub fn new(name: &str, diffuse: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            diffuse,
            specular: None,
            shininess: 0.0,
        }
    }

    /// Builder pattern: Set diffuse color from RGB values, keeping alpha
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse = [r, g, b, self.diffuse[3]];
        self
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.diffuse[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Add a specular highlight
    pub fn with_specular(mut self, color: [f32; 4], shininess: f32) -> Self {
        self.specular = Some(color);
        self.shininess = shininess.max(0.0);
        self
    }

    /// Materials always render front and back faces
    pub fn two_sided(&self) -> bool {
        true
    }

    /// Shiny solid: `diffuse` with a white highlight of the given exponent
    pub fn glossy(name: &str, diffuse: [f32; 4], shininess: f32) -> Self {
        Self::new(name, diffuse).with_specular(palette::WHITE, shininess)
    }
}

/// Named colors used by the generators
pub mod palette {
    /// Convert 8-bit RGB components to an opaque RGBA color
    pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    /// Convert 8-bit RGBA components to a color
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    pub const WHITE: [f32; 4] = rgb(255, 255, 255);
    pub const RED: [f32; 4] = rgb(255, 0, 0);
    pub const GREEN: [f32; 4] = rgb(0, 128, 0);
    pub const BLUE: [f32; 4] = rgb(0, 0, 255);
    pub const YELLOW: [f32; 4] = rgb(255, 255, 0);
    pub const ORANGE: [f32; 4] = rgb(255, 165, 0);
    pub const GRAY: [f32; 4] = rgb(128, 128, 128);
    pub const DARK_GRAY: [f32; 4] = rgb(169, 169, 169);
    pub const LIGHT_GRAY: [f32; 4] = rgb(211, 211, 211);
    pub const LIGHT_BLUE: [f32; 4] = rgb(173, 216, 230);
    pub const CORNFLOWER_BLUE: [f32; 4] = rgb(100, 149, 237);
    pub const ROYAL_BLUE: [f32; 4] = rgb(65, 105, 225);
    pub const BURLY_WOOD: [f32; 4] = rgb(222, 184, 135);
    pub const PALE_GOLDENROD: [f32; 4] = rgb(238, 232, 170);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let material = Material::new("Planet", palette::ORANGE)
            .with_alpha(2.0)
            .with_specular(palette::WHITE, 50.0);
        assert_eq!(material.diffuse[3], 1.0);
        assert_eq!(material.specular, Some(palette::WHITE));
        assert_eq!(material.shininess, 50.0);
        assert!(material.two_sided());

        let path = Material::new("Path", palette::WHITE).with_alpha(100.0 / 255.0);
        assert!((path.diffuse[3] - 0.392).abs() < 1e-3);
    }

    #[test]
    fn test_palette_conversion() {
        assert_eq!(palette::rgb(255, 0, 0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(palette::rgba(0, 0, 0, 0)[3], 0.0);
        assert_eq!(Material::default().diffuse, palette::GRAY);
    }
}
