use std::collections::HashMap;

use crate::api::options::DrawOptions;
use crate::api::types::{BodyId, NodeId};
use crate::core::body::Body;
use crate::renderer::traits::SceneGraph;
use crate::systems::raster::ShapeRasterizer;

/// Owns the body -> scene node association.
///
/// Every bound body has exactly one node. Nodes are created when a body is
/// added and removed when it is removed; nothing else touches them except the
/// sync pass writing their offsets.
pub struct VisualBinding {
    visuals: HashMap<BodyId, NodeId>,
    options: DrawOptions,
    rasterizer: ShapeRasterizer,
}

impl VisualBinding {
    pub fn new(options: DrawOptions) -> Self {
        Self {
            visuals: HashMap::new(),
            options,
            rasterizer: ShapeRasterizer::new(),
        }
    }

    /// Create the body's node and give it a rasterized sprite.
    ///
    /// A shape that cannot be rasterized (empty polygon) still gets a node so
    /// the body stays tracked. Re-adding a bound body replaces its node.
    pub fn on_body_added<G: SceneGraph + ?Sized>(&mut self, body: &Body, scene: &mut G) -> NodeId {
        if let Some(old) = self.visuals.remove(&body.id) {
            scene.remove_node(old);
        }

        let node = scene.create_node();
        let style = self.options.style_for(body);
        match self.rasterizer.rasterize(&body.shape, &style, self.options.ratio) {
            Some(sprite) => {
                scene.attach_sprite(node, sprite);
            }
            None => log::debug!("body {:?}: nothing to rasterize, node {:?} has no sprite", body.id, node),
        }
        scene.set_offset(node, body.pos);

        self.visuals.insert(body.id, node);
        node
    }

    /// Remove the body's node. Returns `false` (and does nothing) when the
    /// body has no node, e.g. on a second call.
    pub fn on_body_removed<G: SceneGraph + ?Sized>(&mut self, body: &Body, scene: &mut G) -> bool {
        match self.visuals.remove(&body.id) {
            Some(node) => {
                scene.remove_node(node);
                true
            }
            None => false,
        }
    }

    pub fn visual(&self, id: BodyId) -> Option<NodeId> {
        self.visuals.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::options::{Computed, Constant};
    use crate::components::color::Color;
    use crate::core::scene::Scene;
    use crate::core::shape::Shape;
    use glam::Vec2;

    fn circle_body(id: u32, pos: Vec2) -> Body {
        Body::new(BodyId(id), Shape::circle(10.0)).with_pos(pos)
    }

    #[test]
    fn added_body_gets_centered_sprite() {
        let mut scene = Scene::new();
        let mut binding = VisualBinding::new(DrawOptions::default());
        let body = circle_body(1, Vec2::new(40.0, 30.0));

        let node = binding.on_body_added(&body, &mut scene);
        let visual = scene.get(node).unwrap();
        let sprite = visual.sprite.as_ref().expect("circle has a sprite");
        assert_eq!(sprite.bitmap.size(), Vec2::splat(24.0));
        assert_eq!(sprite.bitmap.ratio(), 2.0);
        assert_eq!(sprite.anchor, Vec2::splat(0.5));
        assert_eq!(visual.offset, body.pos);
        assert_eq!(binding.visual(body.id), Some(node));
    }

    #[test]
    fn empty_polygon_gets_node_without_sprite() {
        let mut scene = Scene::new();
        let mut binding = VisualBinding::new(DrawOptions::default());
        let body = Body::new(BodyId(1), Shape::polygon(vec![]));

        let node = binding.on_body_added(&body, &mut scene);
        assert!(scene.get(node).unwrap().sprite.is_none());
        assert_eq!(binding.visual(body.id), Some(node));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut scene = Scene::new();
        let mut binding = VisualBinding::new(DrawOptions::default());
        let body = circle_body(1, Vec2::ZERO);
        let node = binding.on_body_added(&body, &mut scene);

        assert!(binding.on_body_removed(&body, &mut scene));
        assert!(!scene.contains(node));
        assert!(!binding.on_body_removed(&body, &mut scene));
        assert!(binding.is_empty());
        assert!(scene.is_empty());
    }

    #[test]
    fn re_adding_replaces_node() {
        let mut scene = Scene::new();
        let mut binding = VisualBinding::new(DrawOptions::default());
        let body = circle_body(1, Vec2::ZERO);

        let first = binding.on_body_added(&body, &mut scene);
        let second = binding.on_body_added(&body, &mut scene);
        assert_ne!(first, second);
        assert!(!scene.contains(first));
        assert_eq!(scene.len(), 1);
        assert_eq!(binding.len(), 1);
    }

    #[test]
    fn options_resolved_per_body() {
        let mut scene = Scene::new();
        let options = DrawOptions::default()
            .with_ratio(1.0)
            .with_line_width(Computed(|b: &Body| if b.id.0 == 1 { 1.0 } else { 4.0 }))
            .with_fill_color(Constant(Some(Color::WHITE)));
        let mut binding = VisualBinding::new(options);

        let a = binding.on_body_added(&circle_body(1, Vec2::ZERO), &mut scene);
        let b = binding.on_body_added(&circle_body(2, Vec2::ZERO), &mut scene);

        let size = |n| scene.get(n).unwrap().sprite.as_ref().unwrap().bitmap.size();
        assert_eq!(size(a), Vec2::splat(22.0));
        assert_eq!(size(b), Vec2::splat(28.0));
    }
}
