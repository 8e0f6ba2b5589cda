use glam::Vec2;

use crate::api::types::BodyId;
use crate::core::body::{Body, Simulation};
use crate::core::events::{BodyEvents, Subscription};
use crate::core::shape::Shape;

/// Minimal simulation without collisions: bodies drift with their velocity,
/// optionally under gravity, one fixed `dt` per step.
///
/// Useful headless and in tests; swap in [`PhysicsWorld`](crate::core::physics::PhysicsWorld)
/// for real dynamics.
pub struct KinematicWorld {
    bodies: Vec<Body>,
    /// Parallel to `bodies`.
    velocities: Vec<Vec2>,
    gravity: Vec2,
    dt: f32,
    steps: u64,
    next_id: u32,
    events: BodyEvents,
}

impl KinematicWorld {
    pub fn new() -> Self {
        Self::with_gravity(Vec2::ZERO)
    }

    /// For Y-down coordinates, positive Y gravity pulls bodies down the screen.
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            bodies: Vec::new(),
            velocities: Vec::new(),
            gravity,
            dt: 1.0 / 60.0,
            steps: 0,
            next_id: 1,
            events: BodyEvents::new(),
        }
    }

    pub fn set_dt(&mut self, dt: f32) {
        self.dt = dt;
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add a resting body. Fires the body-added listeners.
    pub fn add_body(&mut self, shape: Shape, pos: Vec2) -> BodyId {
        self.add_body_with_velocity(shape, pos, Vec2::ZERO)
    }

    pub fn add_body_with_velocity(&mut self, shape: Shape, pos: Vec2, velocity: Vec2) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;

        self.bodies.push(Body::new(id, shape).with_pos(pos));
        self.velocities.push(velocity);
        if let Some(body) = self.bodies.last() {
            self.events.emit_added(body);
        }
        id
    }

    /// Remove a body. Fires the body-removed listeners with the removed body.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.index_of(id)?;
        // `remove` (not `swap_remove`) keeps pick order stable.
        let body = self.bodies.remove(idx);
        self.velocities.remove(idx);
        self.events.emit_removed(&body);
        Some(body)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.index_of(id).map(|i| self.velocities[i])
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) -> bool {
        match self.index_of(id) {
            Some(i) => {
                self.velocities[i] = velocity;
                true
            }
            None => false,
        }
    }

    /// Number of completed `simulate` calls.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Registered add + remove listeners.
    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }
}

impl Default for KinematicWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for KinematicWorld {
    fn simulate(&mut self) {
        let dt = self.dt;
        for (body, vel) in self.bodies.iter_mut().zip(self.velocities.iter_mut()) {
            *vel += self.gravity * dt;
            body.pos += *vel * dt;
        }
        self.steps += 1;
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn translate_body(&mut self, id: BodyId, delta: Vec2) -> bool {
        match self.bodies.iter_mut().find(|b| b.id == id) {
            Some(body) => {
                body.pos += delta;
                true
            }
            None => false,
        }
    }

    fn subscribe_body_added(&mut self, listener: impl FnMut(&Body) + 'static) -> Subscription {
        self.events.subscribe_added(listener)
    }

    fn subscribe_body_removed(&mut self, listener: impl FnMut(&Body) + 'static) -> Subscription {
        self.events.subscribe_removed(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn add_and_remove_body() {
        let mut world = KinematicWorld::new();
        let a = world.add_body(Shape::circle(5.0), Vec2::new(1.0, 2.0));
        let b = world.add_body(Shape::circle(5.0), Vec2::ZERO);
        assert_ne!(a, b);
        assert_eq!(world.len(), 2);

        let removed = world.remove_body(a).unwrap();
        assert_eq!(removed.pos, Vec2::new(1.0, 2.0));
        assert_eq!(world.len(), 1);
        assert!(world.remove_body(a).is_none());
    }

    #[test]
    fn removal_keeps_order() {
        let mut world = KinematicWorld::new();
        let ids: Vec<_> = (0..4)
            .map(|i| world.add_body(Shape::circle(1.0), Vec2::splat(i as f32)))
            .collect();
        world.remove_body(ids[1]);
        let order: Vec<_> = world.bodies().iter().map(|b| b.id).collect();
        assert_eq!(order, vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn simulate_integrates_velocity() {
        let mut world = KinematicWorld::new();
        world.set_dt(0.5);
        let id = world.add_body_with_velocity(Shape::circle(1.0), Vec2::ZERO, Vec2::new(4.0, -2.0));
        world.simulate();
        world.simulate();
        assert_eq!(world.body(id).unwrap().pos, Vec2::new(4.0, -2.0));
        assert_eq!(world.steps(), 2);
    }

    #[test]
    fn gravity_accelerates_bodies() {
        let mut world = KinematicWorld::with_gravity(Vec2::new(0.0, 100.0));
        let id = world.add_body(Shape::circle(1.0), Vec2::ZERO);
        for _ in 0..10 {
            world.simulate();
        }
        assert!(world.body(id).unwrap().pos.y > 0.0);
        assert!(world.velocity(id).unwrap().y > 0.0);
    }

    #[test]
    fn translate_missing_body_reports_false() {
        let mut world = KinematicWorld::new();
        let id = world.add_body(Shape::circle(1.0), Vec2::ZERO);
        assert!(world.translate_body(id, Vec2::new(3.0, 4.0)));
        assert_eq!(world.body(id).unwrap().pos, Vec2::new(3.0, 4.0));
        world.remove_body(id);
        assert!(!world.translate_body(id, Vec2::ONE));
    }

    #[test]
    fn listeners_fire_on_add_and_remove() {
        let mut world = KinematicWorld::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = Rc::clone(&log);
        let _added = world.subscribe_body_added(move |b| l.borrow_mut().push(("add", b.id)));
        let l = Rc::clone(&log);
        let _removed = world.subscribe_body_removed(move |b| l.borrow_mut().push(("remove", b.id)));

        let id = world.add_body(Shape::circle(1.0), Vec2::ZERO);
        world.remove_body(id);

        assert_eq!(*log.borrow(), vec![("add", id), ("remove", id)]);
    }
}
