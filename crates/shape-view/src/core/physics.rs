use glam::Vec2;
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;

use crate::api::types::BodyId;
use crate::core::body::{Body, Simulation};
use crate::core::events::{BodyEvents, Subscription};
use crate::core::shape::Shape;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub ccd: bool,
    pub linear_damping: f32,
}

impl BodyDesc {
    pub fn dynamic() -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
            ccd: false,
            linear_damping: 0.0,
        }
    }

    pub fn fixed() -> Self {
        Self {
            body_type: BodyType::Fixed,
            gravity_scale: 0.0,
            ..Self::dynamic()
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }
}

/// Rapier handles backing one body. Empty polygons have no collider.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: Option<ColliderHandle>,
}

fn build_collider(shape: &Shape) -> Option<ColliderBuilder> {
    match shape {
        Shape::Circle { radius } => Some(ColliderBuilder::ball(*radius)),
        Shape::Polygon { vertices } => {
            let points: Vec<Point<Real>> = vertices.iter().map(|v| point![v.x, v.y]).collect();
            match points.as_slice() {
                [] => None,
                [p] => Some(ColliderBuilder::ball(0.0).translation(vector![p.x, p.y])),
                [a, b] => Some(ColliderBuilder::segment(*a, *b)),
                // The hull of collinear points has no area.
                _ => ColliderBuilder::convex_hull(&points).or_else(|| {
                    log::debug!("collinear polygon ({} points): polyline collider", points.len());
                    Some(ColliderBuilder::polyline(points.clone(), None))
                }),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Rapier2D-backed [`Simulation`].
///
/// Keeps a mirror of every body (`Body`) next to its Rapier handles so the
/// viewer can borrow the body list as a slice. Mirrors are refreshed after
/// each step; drags write straight through to Rapier.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    /// Parallel to `handles`.
    mirrors: Vec<Body>,
    handles: Vec<PhysicsBody>,
    next_id: u32,
    events: BodyEvents,
}

impl PhysicsWorld {
    /// For Y-down coordinate systems, use positive Y for downward gravity.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            mirrors: Vec::new(),
            handles: Vec::new(),
            next_id: 1,
            events: BodyEvents::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body with a collider matching `shape`.
    /// Rotation is locked: visuals only follow translation.
    pub fn add_body(&mut self, shape: Shape, desc: &BodyDesc, material: ColliderMaterial) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;

        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vector![desc.position.x, desc.position.y])
            .linvel(vector![desc.velocity.x, desc.velocity.y])
            .gravity_scale(desc.gravity_scale)
            .locked_axes(LockedAxes::ROTATION_LOCKED)
            .ccd_enabled(desc.ccd)
            .linear_damping(desc.linear_damping)
            .user_data(id.0 as u128)
            .build();
        let body_handle = self.rigid_bodies.insert(rb);

        let collider_handle = build_collider(&shape).map(|builder| {
            let collider = builder
                .restitution(material.restitution)
                .friction(material.friction)
                .density(material.density)
                .build();
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.rigid_bodies)
        });
        if collider_handle.is_none() {
            log::debug!("body {:?}: no collider for a polygon without vertices", id);
        }

        self.handles.push(PhysicsBody {
            body_handle,
            collider_handle,
        });
        self.mirrors.push(Body::new(id, shape).with_pos(desc.position));
        if let Some(body) = self.mirrors.last() {
            self.events.emit_added(body);
        }
        id
    }

    /// Remove a body and its collider from the simulation.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.index_of(id)?;
        let handle = self.handles.remove(idx);
        let body = self.mirrors.remove(idx);
        self.rigid_bodies.remove(
            handle.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        self.events.emit_removed(&body);
        Some(body)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.mirrors.iter().find(|b| b.id == id)
    }

    /// Rapier handles for a body, for callers that need engine-level access.
    pub fn physics_body(&self, id: BodyId) -> Option<PhysicsBody> {
        self.index_of(id).map(|i| self.handles[i])
    }

    pub fn set_velocity(&mut self, id: BodyId, vel: Vec2) -> bool {
        let Some(handle) = self.physics_body(id) else {
            return false;
        };
        match self.rigid_bodies.get_mut(handle.body_handle) {
            Some(rb) => {
                rb.set_linvel(vector![vel.x, vel.y], true);
                true
            }
            None => false,
        }
    }

    pub fn velocity(&self, id: BodyId) -> Vec2 {
        self.physics_body(id)
            .and_then(|h| self.rigid_bodies.get(h.body_handle))
            .map(|rb| Vec2::new(rb.linvel().x, rb.linvel().y))
            .unwrap_or(Vec2::ZERO)
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.rigid_bodies.len()
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.mirrors.iter().position(|b| b.id == id)
    }
}

impl Simulation for PhysicsWorld {
    fn simulate(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        for (mirror, handle) in self.mirrors.iter_mut().zip(&self.handles) {
            if let Some(rb) = self.rigid_bodies.get(handle.body_handle) {
                let t = rb.translation();
                mirror.pos = Vec2::new(t.x, t.y);
            }
        }
    }

    fn bodies(&self) -> &[Body] {
        &self.mirrors
    }

    fn translate_body(&mut self, id: BodyId, delta: Vec2) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let mirror = &mut self.mirrors[idx];
        mirror.pos += delta;
        if let Some(rb) = self.rigid_bodies.get_mut(self.handles[idx].body_handle) {
            rb.set_translation(vector![mirror.pos.x, mirror.pos.y], true);
        }
        true
    }

    fn point_in(&self, body: &Body, point: Vec2) -> bool {
        if let Shape::Polygon { vertices } = &body.shape {
            if vertices.len() < 3 {
                return false;
            }
        }

        let rapier_hit = self.physics_body(body.id).and_then(|handle| {
            let rb = self.rigid_bodies.get(handle.body_handle)?;
            let collider = self.colliders.get(handle.collider_handle?)?;
            // Colliders sit at the body origin; the rigid body pose is current
            // even before the next step syncs collider poses.
            Some(collider.shape().contains_point(rb.position(), &point![point.x, point.y]))
        });
        rapier_hit.unwrap_or_else(|| body.contains_point(point))
    }

    fn subscribe_body_added(&mut self, listener: impl FnMut(&Body) + 'static) -> Subscription {
        self.events.subscribe_added(listener)
    }

    fn subscribe_body_removed(&mut self, listener: impl FnMut(&Body) + 'static) -> Subscription {
        self.events.subscribe_removed(listener)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
