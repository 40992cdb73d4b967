//! # Orbital System Simulation
//!
//! A sun at the origin with planets circling it on flat orbits in the XZ plane.
//!
//! Each body carries two angles in degrees, both starting at zero and wrapped
//! into `[0, 360)`:
//!
//! - the **orbital angle** advances by `360 / period · dt · speed · K` per tick
//! - the **rotation angle** advances by `rotation_speed · dt · speed · K`
//!
//! where `K` is [`SPEED_FACTOR`]. After every tick a body's node transform is
//! replaced by a spin about Y followed by a translation onto its orbit.
//!
//! The [`AnimationRegistry`] maps the node handle of every planet to its state.
//! It belongs to one [`OrbitalSystem`], is rebuilt by every
//! [`OrbitalSystem::generate`] and emptied by [`OrbitalSystem::teardown`].

use std::any::Any;

use cgmath::{Point3, Vector3};
use log::{debug, info, trace};

use super::cpu::CpuSimulationBase;
use super::traits::Simulation;
use crate::gfx::geometry::{generate_orbit_ring, generate_sphere};
use crate::gfx::material::{palette, Material};
use crate::gfx::scene::{NodeId, Scene, SceneNode, Transform};

/// Damping applied to every advance so the default speed is watchable
pub const SPEED_FACTOR: f64 = 0.5;

/// Name reported for the central body
pub const SUN_NAME: &str = "Sun";

/// Immutable description of one orbiting body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyParameters {
    pub name: String,
    /// Sphere radius
    pub radius: f64,
    /// Distance from the sun
    pub orbital_radius: f64,
    /// Time units per full orbit
    pub orbital_period: f64,
    /// Degrees of spin per time unit
    pub rotation_speed: f64,
    pub color: [f32; 4],
}

impl BodyParameters {
    pub fn new(
        name: &str,
        radius: f64,
        orbital_radius: f64,
        orbital_period: f64,
        rotation_speed: f64,
        color: [f32; 4],
    ) -> Self {
        Self {
            name: name.to_string(),
            radius,
            orbital_radius,
            orbital_period,
            rotation_speed,
            color,
        }
    }
}

/// The nine classical planets
pub fn default_bodies() -> Vec<BodyParameters> {
    vec![
        BodyParameters::new("Mercury", 0.08, 1.5, 0.24, 0.04, palette::GRAY),
        BodyParameters::new("Venus", 0.14, 2.5, 0.62, 0.015, palette::ORANGE),
        BodyParameters::new("Earth", 0.15, 3.5, 1.0, 1.0, palette::CORNFLOWER_BLUE),
        BodyParameters::new("Mars", 0.12, 4.5, 1.88, 0.97, palette::RED),
        BodyParameters::new("Jupiter", 0.35, 6.0, 11.86, 2.44, palette::BURLY_WOOD),
        BodyParameters::new("Saturn", 0.30, 7.5, 29.46, 2.27, palette::PALE_GOLDENROD),
        BodyParameters::new("Uranus", 0.20, 8.8, 84.01, 1.40, palette::CORNFLOWER_BLUE),
        BodyParameters::new("Neptune", 0.19, 9.8, 164.79, 1.49, palette::ROYAL_BLUE),
        BodyParameters::new("Pluto", 0.06, 10.8, 248.0, 6.39, palette::DARK_GRAY),
    ]
}

/// Wrap an angle in degrees into `[0, 360)`
///
/// `rem_euclid` can round up to exactly 360 for tiny negative inputs, which
/// maps to 0. Non-finite input resets to 0.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if !wrapped.is_finite() || wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// A body together with its animated angles
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetaryBody {
    params: BodyParameters,
    orbital_angle: f64,
    rotation_angle: f64,
}

impl PlanetaryBody {
    /// New body at its initial state, both angles zero
    pub fn new(params: BodyParameters) -> Self {
        Self {
            params,
            orbital_angle: 0.0,
            rotation_angle: 0.0,
        }
    }

    pub fn params(&self) -> &BodyParameters {
        &self.params
    }

    pub fn orbital_angle(&self) -> f64 {
        self.orbital_angle
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    /// Advance both angles
    ///
    /// # Arguments
    /// * `delta_time` - Elapsed time units
    /// * `speed_multiplier` - User speed control
    /// * `speed_factor` - Global damping constant
    pub fn advance(&mut self, delta_time: f64, speed_multiplier: f64, speed_factor: f64) {
        let step = delta_time * speed_multiplier * speed_factor;
        let orbital_rate = if self.params.orbital_period == 0.0 {
            0.0
        } else {
            360.0 / self.params.orbital_period
        };

        self.orbital_angle = wrap_degrees(self.orbital_angle + orbital_rate * step);
        self.rotation_angle = wrap_degrees(self.rotation_angle + self.params.rotation_speed * step);
    }

    /// Back to the initial state
    pub fn reset(&mut self) {
        self.orbital_angle = 0.0;
        self.rotation_angle = 0.0;
    }

    /// Current center, derived from the orbital angle
    pub fn position(&self) -> Point3<f64> {
        let theta = self.orbital_angle.to_radians();
        let r = self.params.orbital_radius;
        Point3::new(r * theta.cos(), 0.0, r * theta.sin())
    }

    /// Spin about Y by the rotation angle, then move onto the orbit
    pub fn transform(&self) -> Transform {
        let p = self.position();
        Transform::rotation_y(self.rotation_angle)
            .then(Transform::translation(Vector3::new(p.x, p.y, p.z)))
    }
}

/// Ordered map from planet node handles to body state
#[derive(Debug, Clone, Default)]
pub struct AnimationRegistry {
    entries: Vec<(NodeId, PlanetaryBody)>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body under `id`, replacing any previous entry for it
    pub fn register(&mut self, id: NodeId, body: PlanetaryBody) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = body,
            None => self.entries.push((id, body)),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&PlanetaryBody> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, body)| body)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NodeId, PlanetaryBody)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (NodeId, PlanetaryBody)> {
        self.entries.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Visual and timing constants of the orbital scene
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalSettings {
    pub speed_factor: f64,
    pub sun_radius: f64,
    pub sun_segments: u32,
    pub sun_color: [f32; 4],
    pub planet_segments: u32,
    pub path_width: f64,
    pub path_segments: u32,
    pub path_color: [f32; 4],
    pub bodies: Vec<BodyParameters>,
}

impl Default for OrbitalSettings {
    fn default() -> Self {
        Self {
            speed_factor: SPEED_FACTOR,
            sun_radius: 0.5,
            sun_segments: 32,
            sun_color: palette::YELLOW,
            planet_segments: 16,
            path_width: 0.02,
            path_segments: 100,
            path_color: palette::rgba(255, 255, 255, 100),
            bodies: default_bodies(),
        }
    }
}

/// Owner of the live orbital scene's animation state
#[derive(Debug, Clone, Default)]
pub struct OrbitalSystem {
    settings: OrbitalSettings,
    registry: AnimationRegistry,
}

impl OrbitalSystem {
    pub fn new(settings: OrbitalSettings) -> Self {
        Self {
            settings,
            registry: AnimationRegistry::new(),
        }
    }

    pub fn settings(&self) -> &OrbitalSettings {
        &self.settings
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    /// Build the orbital scene and register every planet
    ///
    /// The returned root group "Solar System" holds one leaf per planet, in
    /// body order, followed by a "Sun" group with the sun sphere and the orbit
    /// rings. Any previously registered bodies are dropped first.
    pub fn generate(&mut self) -> SceneNode {
        self.registry.clear();
        let settings = &self.settings;

        let mut children = Vec::with_capacity(settings.bodies.len() + 1);
        let mut sun_children = Vec::with_capacity(settings.bodies.len() + 1);

        sun_children.push(SceneNode::leaf(
            SUN_NAME,
            generate_sphere(settings.sun_radius, settings.sun_segments),
            Material::new(SUN_NAME, settings.sun_color),
        ));

        for params in &settings.bodies {
            let body = PlanetaryBody::new(params.clone());
            let planet = SceneNode::leaf(
                params.name.as_str(),
                generate_sphere(params.radius, settings.planet_segments),
                Material::new(&params.name, params.color),
            )
            .with_transform(body.transform());

            self.registry.register(planet.id(), body);
            children.push(planet);

            sun_children.push(SceneNode::leaf(
                format!("Orbit: {}", params.name),
                generate_orbit_ring(
                    params.orbital_radius,
                    settings.path_width,
                    settings.path_segments,
                ),
                Material::new("Orbital path", settings.path_color),
            ));
        }

        children.push(SceneNode::group("Sun", sun_children));
        info!(
            "Generated orbital system with {} bodies",
            self.registry.len()
        );
        SceneNode::group("Solar System", children)
    }

    /// Advance every registered body and rewrite its node transform
    ///
    /// # Arguments
    /// * `delta_time` - Elapsed time units since the last tick
    /// * `speed_multiplier` - User speed control, 1.0 for normal speed
    /// * `root` - Root of the scene that holds the registered nodes
    pub fn advance(&mut self, delta_time: f64, speed_multiplier: f64, root: &mut SceneNode) {
        let speed_factor = self.settings.speed_factor;
        for (id, body) in self.registry.iter_mut() {
            body.advance(delta_time, speed_multiplier, speed_factor);
            match root.find_mut(*id) {
                Some(node) => node.transform = Some(body.transform()),
                None => trace!("Body '{}' has no node {} in this scene", body.params().name, id),
            }
        }
    }

    /// Put every body back at its initial angles and rewrite the transforms
    pub fn reset(&mut self, root: &mut SceneNode) {
        for (id, body) in self.registry.iter_mut() {
            body.reset();
            if let Some(node) = root.find_mut(*id) {
                node.transform = Some(body.transform());
            }
        }
    }

    /// Current positions: the sun at the origin first, then every body in
    /// registration order
    pub fn snapshot_positions(&self) -> Vec<(String, Point3<f64>)> {
        std::iter::once((SUN_NAME.to_string(), Point3::new(0.0, 0.0, 0.0)))
            .chain(
                self.registry
                    .iter()
                    .map(|(_, body)| (body.params().name.clone(), body.position())),
            )
            .collect()
    }

    /// Forget every registered body
    pub fn teardown(&mut self) {
        debug!("Clearing {} orbital bodies", self.registry.len());
        self.registry.clear();
    }
}

/// The orbital system driven by the simulation manager
pub struct OrbitalSimulation {
    base: CpuSimulationBase,
    system: OrbitalSystem,
    speed: f64,
}

impl OrbitalSimulation {
    /// Build the orbital scene with default settings
    ///
    /// Returns the simulation and the root node to install in the scene.
    pub fn generate() -> (Self, SceneNode) {
        Self::with_settings(OrbitalSettings::default())
    }

    pub fn with_settings(settings: OrbitalSettings) -> (Self, SceneNode) {
        let mut system = OrbitalSystem::new(settings);
        let root = system.generate();
        let simulation = Self {
            base: CpuSimulationBase::new("Solar System"),
            system,
            speed: 1.0,
        };
        (simulation, root)
    }

    pub fn system(&self) -> &OrbitalSystem {
        &self.system
    }

    /// User speed multiplier applied on top of the manager's time scale
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn snapshot_positions(&self) -> Vec<(String, Point3<f64>)> {
        self.system.snapshot_positions()
    }

    pub fn steps(&self) -> u64 {
        self.base.step_count
    }
}

impl Simulation for OrbitalSimulation {
    fn initialize(&mut self, _scene: &mut Scene) {
        self.base.running = true;
        self.base.reset_stats();
    }

    fn update(&mut self, delta_time: f64, scene: &mut Scene) {
        if !self.base.running {
            return;
        }
        if let Some(root) = scene.root_mut() {
            self.system.advance(delta_time, self.speed, root);
            self.base.record_step(delta_time);
        }
    }

    fn name(&self) -> &str {
        &self.base.name
    }

    fn is_running(&self) -> bool {
        self.base.running
    }

    fn set_running(&mut self, running: bool) {
        self.base.running = running;
    }

    fn reset(&mut self, scene: &mut Scene) {
        if let Some(root) = scene.root_mut() {
            self.system.reset(root);
        }
        self.base.reset_stats();
    }

    fn cleanup(&mut self, _scene: &mut Scene) {
        self.system.teardown();
        self.base.running = false;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
