use crate::core::body::Simulation;
use crate::renderer::traits::SceneGraph;
use crate::systems::binding::VisualBinding;

/// Push every bound body's position into its node. Bodies without a node and
/// nodes that have left the scene are skipped. Returns the number of nodes
/// updated.
pub fn sync_visuals<S, G>(simulation: &S, binding: &VisualBinding, scene: &mut G) -> usize
where
    S: Simulation,
    G: SceneGraph + ?Sized,
{
    let mut updated = 0;
    for body in simulation.bodies() {
        let Some(node) = binding.visual(body.id) else {
            continue;
        };
        if scene.set_offset(node, body.pos) {
            updated += 1;
        }
    }
    updated
}
