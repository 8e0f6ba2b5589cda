use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::api::options::DrawOptions;
use crate::api::types::{BodyId, NodeId};
use crate::core::body::Simulation;
use crate::core::events::Subscription;
use crate::input::drag::{DragController, DragState};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::RenderBuffer;
use crate::renderer::traits::SceneGraph;
use crate::systems::binding::VisualBinding;
use crate::systems::render::build_render_buffer;
use crate::systems::sync::sync_visuals;

/// Wires a simulation to a scene graph.
///
/// On construction every existing body is bound to a node, and add/remove
/// listeners are registered so later bodies are bound (and unbound) as soon as
/// the simulation reports them. The host then calls [`push_input`] as pointer
/// events arrive and [`tick`] once per frame.
///
/// Dropping the viewer unregisters its listeners; nodes it created stay in
/// the scene.
///
/// [`push_input`]: Viewer::push_input
/// [`tick`]: Viewer::tick
pub struct Viewer<S: Simulation, G: SceneGraph + 'static> {
    simulation: S,
    scene: Rc<RefCell<G>>,
    binding: Rc<RefCell<VisualBinding>>,
    drag: DragController,
    input: InputQueue,
    _subscriptions: [Subscription; 2],
}

impl<S: Simulation, G: SceneGraph + 'static> Viewer<S, G> {
    pub fn new(mut simulation: S, scene: G, options: DrawOptions) -> Self {
        let scene = Rc::new(RefCell::new(scene));
        let binding = Rc::new(RefCell::new(VisualBinding::new(options)));

        {
            let mut b = binding.borrow_mut();
            let mut s = scene.borrow_mut();
            for body in simulation.bodies() {
                b.on_body_added(body, &mut *s);
            }
        }

        let added = {
            let (binding, scene) = (Rc::clone(&binding), Rc::clone(&scene));
            simulation.subscribe_body_added(move |body| {
                binding.borrow_mut().on_body_added(body, &mut *scene.borrow_mut());
            })
        };
        let removed = {
            let (binding, scene) = (Rc::clone(&binding), Rc::clone(&scene));
            simulation.subscribe_body_removed(move |body| {
                binding.borrow_mut().on_body_removed(body, &mut *scene.borrow_mut());
            })
        };

        log::info!("viewer: bound {} bodies", binding.borrow().len());

        Self {
            simulation,
            scene,
            binding,
            drag: DragController::new(),
            input: InputQueue::new(),
            _subscriptions: [added, removed],
        }
    }

    /// Queue a pointer event; it is handled at the start of the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply queued pointer events, advance the simulation one
    /// step, then move every node to its body's position. Returns the number
    /// of nodes updated.
    pub fn tick(&mut self, _elapsed: f32) -> usize {
        for event in self.input.drain() {
            self.drag.handle(&mut self.simulation, event);
        }

        // Listeners borrow the binding and scene, so the step runs unborrowed.
        self.simulation.simulate();

        let binding = self.binding.borrow();
        let mut scene = self.scene.borrow_mut();
        sync_visuals(&self.simulation, &binding, &mut *scene)
    }

    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    /// Mutable access to the simulation. Adding or removing bodies through it
    /// updates the scene immediately.
    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.simulation
    }

    pub fn scene(&self) -> Ref<'_, G> {
        self.scene.borrow()
    }

    /// The node bound to a body.
    pub fn visual(&self, id: BodyId) -> Option<NodeId> {
        self.binding.borrow().visual(id)
    }

    pub fn bound_count(&self) -> usize {
        self.binding.borrow().len()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Detach from the simulation and hand it back.
    pub fn into_simulation(self) -> S {
        let Self { simulation, _subscriptions, .. } = self;
        drop(_subscriptions);
        simulation
    }
}

impl<S: Simulation> Viewer<S, crate::core::scene::Scene> {
    /// Collect sprite instances for the current frame.
    pub fn build_render_buffer(&self, buffer: &mut RenderBuffer) {
        build_render_buffer(self.scene.borrow().iter(), buffer);
    }
}
