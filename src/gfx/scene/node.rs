//! # Scene Nodes
//!
//! A scene is a tree of [`SceneNode`]s. Each node has a stable [`NodeId`], an
//! optional local [`Transform`], and either nothing, a mesh with its material,
//! or an ordered list of children. Parents own their children outright.
//!
//! World transforms are never stored. They are accumulated on the fly by
//! [`SceneNode::visit`] as the tree is walked from the root.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3, Vector4};

use crate::gfx::geometry::Mesh;
use crate::gfx::material::Material;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle of a scene node, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of this handle
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Affine placement of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f64>> for Transform {
    fn from(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn translation(offset: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::from_translation(offset),
        }
    }

    /// Rotation about the X axis, in degrees
    pub fn rotation_x(degrees: f64) -> Self {
        Self {
            matrix: Matrix4::from_angle_x(Deg(degrees)),
        }
    }

    /// Rotation about the Y axis, in degrees
    pub fn rotation_y(degrees: f64) -> Self {
        Self {
            matrix: Matrix4::from_angle_y(Deg(degrees)),
        }
    }

    /// Rotation about the Z axis, in degrees
    pub fn rotation_z(degrees: f64) -> Self {
        Self {
            matrix: Matrix4::from_angle_z(Deg(degrees)),
        }
    }

    /// Rotation by `radians` about `axis`; a zero axis gives the identity
    pub fn axis_angle(axis: Vector3<f64>, radians: f64) -> Self {
        let length = axis.magnitude();
        if length == 0.0 || !length.is_finite() {
            return Self::identity();
        }
        Self {
            matrix: Matrix4::from_axis_angle(axis / length, Rad(radians)),
        }
    }

    pub fn uniform_scale(factor: f64) -> Self {
        Self {
            matrix: Matrix4::from_scale(factor),
        }
    }

    pub fn scale(x: f64, y: f64, z: f64) -> Self {
        Self {
            matrix: Matrix4::from_nonuniform_scale(x, y, z),
        }
    }

    /// Rotate about X, then Y, then Z (degrees), then scale, then translate
    pub fn compose(
        rotation_degrees: Vector3<f64>,
        scale: Vector3<f64>,
        translation: Vector3<f64>,
    ) -> Self {
        Self::rotation_x(rotation_degrees.x)
            .then(Self::rotation_y(rotation_degrees.y))
            .then(Self::rotation_z(rotation_degrees.z))
            .then(Self::scale(scale.x, scale.y, scale.z))
            .then(Self::translation(translation))
    }

    /// Apply `self` first, then `next`
    pub fn then(self, next: Transform) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    pub fn transform_point(&self, point: Point3<f64>) -> Point3<f64> {
        let p = self.matrix * point.to_homogeneous();
        if p.w == 0.0 || p.w == 1.0 {
            Point3::new(p.x, p.y, p.z)
        } else {
            Point3::from_homogeneous(p)
        }
    }

    pub fn transform_vector(&self, vector: Vector3<f64>) -> Vector3<f64> {
        (self.matrix * Vector4::new(vector.x, vector.y, vector.z, 0.0)).truncate()
    }

    /// Offset applied to the origin
    pub fn translation_part(&self) -> Vector3<f64> {
        self.matrix.w.truncate()
    }
}

/// What a node holds
#[derive(Debug)]
pub enum NodeContent {
    Empty,
    Geometry { mesh: Mesh, material: Material },
    Group(Vec<SceneNode>),
}

/// Axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Bounds {
    pub fn from_point(point: Point3<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn include(&mut self, point: Point3<f64>) {
        self.min = Point3::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Point3::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }

    pub fn center(&self) -> Point3<f64> {
        self.min.midpoint(self.max)
    }

    pub fn dimensions(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Radius of the sphere around [`Bounds::center`] enclosing the box
    pub fn bounding_radius(&self) -> f64 {
        self.dimensions().magnitude() * 0.5
    }
}

/// Aggregated counts over a subtree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub mesh_count: usize,
    pub total_vertices: usize,
    pub total_triangles: usize,
}

/// One node of the scene tree
#[derive(Debug)]
pub struct SceneNode {
    id: NodeId,
    pub name: String,
    /// Local transform; `None` means identity
    pub transform: Option<Transform>,
    pub content: NodeContent,
}

impl SceneNode {
    fn with_content(name: impl Into<String>, content: NodeContent) -> Self {
        Self {
            id: NodeId::next(),
            name: name.into(),
            transform: None,
            content,
        }
    }

    /// Node without geometry or children
    pub fn empty(name: impl Into<String>) -> Self {
        Self::with_content(name, NodeContent::Empty)
    }

    /// Geometry leaf
    pub fn leaf(name: impl Into<String>, mesh: Mesh, material: Material) -> Self {
        Self::with_content(name, NodeContent::Geometry { mesh, material })
    }

    /// Group node owning `children` in order
    pub fn group(name: impl Into<String>, children: Vec<SceneNode>) -> Self {
        Self::with_content(name, NodeContent::Group(children))
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Local transform, identity when unset
    pub fn local_transform(&self) -> Transform {
        self.transform.unwrap_or_default()
    }

    /// Append a child. An empty node becomes a group; a geometry leaf refuses
    /// and hands the child back.
    pub fn add_child(&mut self, child: SceneNode) -> Result<NodeId, SceneNode> {
        let id = child.id;
        match &mut self.content {
            NodeContent::Group(children) => {
                children.push(child);
                Ok(id)
            }
            NodeContent::Empty => {
                self.content = NodeContent::Group(vec![child]);
                Ok(id)
            }
            NodeContent::Geometry { .. } => Err(child),
        }
    }

    pub fn children(&self) -> &[SceneNode] {
        match &self.content {
            NodeContent::Group(children) => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [SceneNode] {
        match &mut self.content {
            NodeContent::Group(children) => children,
            _ => &mut [],
        }
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        match &self.content {
            NodeContent::Geometry { mesh, .. } => Some(mesh),
            _ => None,
        }
    }

    pub fn material(&self) -> Option<&Material> {
        match &self.content {
            NodeContent::Geometry { material, .. } => Some(material),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.content, NodeContent::Group(_))
    }

    /// Depth-first search by handle
    pub fn find(&self, id: NodeId) -> Option<&SceneNode> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    /// Depth-first search by handle, mutable
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        if self.id == id {
            return Some(self);
        }
        self.children_mut()
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// First node with the given name in depth-first order
    pub fn find_by_name(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_by_name(name))
    }

    /// Walk the subtree depth-first, parents before children, passing each
    /// node with its accumulated world transform.
    pub fn visit<F>(&self, f: &mut F)
    where
        F: FnMut(&SceneNode, &Transform),
    {
        self.visit_with_parent(&Transform::identity(), f);
    }

    fn visit_with_parent<F>(&self, parent: &Transform, f: &mut F)
    where
        F: FnMut(&SceneNode, &Transform),
    {
        let world = self.local_transform().then(*parent);
        f(self, &world);
        for child in self.children() {
            child.visit_with_parent(&world, f);
        }
    }

    /// World-space origin of every geometry leaf, in depth-first order
    pub fn world_positions(&self) -> Vec<(String, Point3<f64>)> {
        let mut positions = Vec::new();
        self.visit(&mut |node, world| {
            if node.mesh().is_some() {
                positions.push((node.name.clone(), world.transform_point(Point3::origin())));
            }
        });
        positions
    }

    /// World-space bounds over all mesh vertices, `None` without geometry
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        self.visit(&mut |node, world| {
            if let Some(mesh) = node.mesh() {
                for &p in &mesh.positions {
                    let p = world.transform_point(p);
                    bounds = Some(match bounds {
                        Some(mut b) => {
                            b.include(p);
                            b
                        }
                        None => Bounds::from_point(p),
                    });
                }
            }
        });
        bounds
    }

    pub fn statistics(&self) -> SceneStatistics {
        let mut stats = SceneStatistics::default();
        self.visit(&mut |node, _| {
            stats.node_count += 1;
            if let Some(mesh) = node.mesh() {
                stats.mesh_count += 1;
                stats.total_vertices += mesh.vertex_count();
                stats.total_triangles += mesh.triangle_count();
            }
        });
        stats
    }
}
