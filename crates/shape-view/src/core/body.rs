use glam::Vec2;

use crate::api::types::BodyId;
use crate::core::events::Subscription;
use crate::core::shape::Shape;

/// A simulated body as seen by the viewer: immutable geometry plus a position.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub shape: Shape,
    pub pos: Vec2,
}

impl Body {
    pub fn new(id: BodyId, shape: Shape) -> Self {
        Self {
            id,
            shape,
            pos: Vec2::ZERO,
        }
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.shape.contains_point(self.pos, point)
    }
}

/// The contract the viewer needs from a physics engine.
///
/// Everything runs on one thread: listeners fire synchronously from inside the
/// call that added or removed the body.
pub trait Simulation {
    /// Advance the simulation by one step.
    fn simulate(&mut self);

    /// All live bodies, in a stable order.
    fn bodies(&self) -> &[Body];

    /// Move a body by `delta`. Returns `false` if the body no longer exists.
    fn translate_body(&mut self, id: BodyId, delta: Vec2) -> bool;

    /// Point-in-shape predicate used for picking.
    fn point_in(&self, body: &Body, point: Vec2) -> bool {
        body.contains_point(point)
    }

    fn subscribe_body_added(&mut self, listener: impl FnMut(&Body) + 'static) -> Subscription;

    fn subscribe_body_removed(&mut self, listener: impl FnMut(&Body) + 'static) -> Subscription;
}
