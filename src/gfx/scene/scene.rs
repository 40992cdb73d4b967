use cgmath::Point3;
use log::info;

use super::node::{Bounds, NodeId, SceneNode, SceneStatistics};

/// The currently displayed model
///
/// Holds at most one root node. Replacing the root is a single move, so a
/// reader never observes a half-built model and the previous tree is handed
/// back intact.
#[derive(Debug, Default)]
pub struct Scene {
    root: Option<SceneNode>,
}

impl Scene {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `root` and returns the model it replaced
    pub fn replace_root(&mut self, root: SceneNode) -> Option<SceneNode> {
        info!("Displaying '{}' ({})", root.name, root.id());
        std::mem::replace(&mut self.root, Some(root))
    }

    /// Removes the displayed model
    pub fn clear(&mut self) -> Option<SceneNode> {
        self.root.take()
    }

    pub fn root(&self) -> Option<&SceneNode> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut SceneNode> {
        self.root.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Finds a node anywhere in the displayed tree
    pub fn find_node(&self, id: NodeId) -> Option<&SceneNode> {
        self.root.as_ref().and_then(|root| root.find(id))
    }

    /// Finds a node anywhere in the displayed tree, mutable
    pub fn find_node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.root.as_mut().and_then(|root| root.find_mut(id))
    }

    /// World-space origins of all geometry leaves
    pub fn world_positions(&self) -> Vec<(String, Point3<f64>)> {
        self.root
            .as_ref()
            .map(SceneNode::world_positions)
            .unwrap_or_default()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.root.as_ref().and_then(SceneNode::bounds)
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        self.root
            .as_ref()
            .map(SceneNode::statistics)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_sphere;
    use crate::gfx::material::Material;

    #[test]
    fn test_replace_root_returns_previous_model() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());

        let first = SceneNode::leaf("first", generate_sphere(1.0, 8), Material::default());
        let first_id = first.id();
        assert!(scene.replace_root(first).is_none());

        let second = SceneNode::empty("second");
        let previous = scene.replace_root(second).unwrap();
        assert_eq!(previous.id(), first_id);
        assert_eq!(scene.root().unwrap().name, "second");
        assert!(scene.find_node(first_id).is_none());
    }

    #[test]
    fn test_empty_scene_queries() {
        let mut scene = Scene::new();
        assert!(scene.world_positions().is_empty());
        assert!(scene.bounds().is_none());
        assert_eq!(scene.get_statistics(), SceneStatistics::default());
        assert!(scene.clear().is_none());
    }
}
