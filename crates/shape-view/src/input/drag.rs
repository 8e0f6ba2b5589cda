//! Pointer-driven body dragging.
//!
//! A press picks the first body (in simulation order) whose shape contains
//! the pointer. While the pointer stays down, each move translates that body
//! by the pointer delta, `current - last`. Release ends the drag. The target
//! is held by [`BodyId`]; if the body disappears mid-drag, moves are ignored
//! until release.

use glam::Vec2;

use crate::api::types::BodyId;
use crate::core::body::Simulation;
use crate::input::queue::InputEvent;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer is down over empty space.
    Missed { last: Vec2 },
    Dragging { body: BodyId, last: Vec2 },
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Body currently being dragged, if any.
    pub fn target(&self) -> Option<BodyId> {
        match self.state {
            DragState::Dragging { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Pick the body under `point`. A press during a drag re-picks.
    pub fn pointer_down<S: Simulation>(&mut self, simulation: &S, point: Vec2) -> Option<BodyId> {
        let hit = simulation
            .bodies()
            .iter()
            .find(|body| simulation.point_in(body, point))
            .map(|body| body.id);

        self.state = match hit {
            Some(body) => DragState::Dragging { body, last: point },
            None => {
                log::debug!("pointer down at {:?}: no body", point);
                DragState::Missed { last: point }
            }
        };
        hit
    }

    /// Move the dragged body by `point - last`. Returns the applied delta.
    pub fn pointer_move<S: Simulation>(&mut self, simulation: &mut S, point: Vec2) -> Option<Vec2> {
        match self.state {
            DragState::Idle => None,
            DragState::Missed { .. } => {
                self.state = DragState::Missed { last: point };
                None
            }
            DragState::Dragging { body, last } => {
                self.state = DragState::Dragging { body, last: point };
                let delta = point - last;
                if simulation.translate_body(body, delta) {
                    Some(delta)
                } else {
                    log::trace!("drag target {:?} is gone; ignoring move", body);
                    None
                }
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    /// Dispatch one pointer event.
    pub fn handle<S: Simulation>(&mut self, simulation: &mut S, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer_down(&*simulation, Vec2::new(x, y));
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer_move(simulation, Vec2::new(x, y));
            }
            InputEvent::PointerUp { .. } => self.pointer_up(),
        }
    }
}
