use glam::Vec2;

use crate::api::types::NodeId;
use crate::components::sprite::Sprite;
use crate::components::visual::Visual;
use crate::renderer::traits::SceneGraph;

/// Retained scene graph using a flat Vec.
/// Designed for small-to-medium node counts (hundreds, not millions).
pub struct Scene {
    nodes: Vec<Visual>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            next_id: 1,
        }
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Visual> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Visual> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Iterate over nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Visual> {
        self.nodes.iter()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for Scene {
    fn create_node(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(Visual::new(id));
        id
    }

    fn attach_sprite(&mut self, node: NodeId, sprite: Sprite) -> bool {
        match self.get_mut(node) {
            Some(visual) => {
                visual.sprite = Some(sprite);
                true
            }
            None => false,
        }
    }

    fn remove_node(&mut self, node: NodeId) -> bool {
        match self.nodes.iter().position(|n| n.id == node) {
            // Keep draw order stable.
            Some(idx) => {
                self.nodes.remove(idx);
                true
            }
            None => false,
        }
    }

    fn set_offset(&mut self, node: NodeId, offset: Vec2) -> bool {
        match self.get_mut(node) {
            Some(visual) => {
                visual.offset = offset;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::Bitmap;

    #[test]
    fn create_and_get() {
        let mut scene = Scene::new();
        let a = scene.create_node();
        let b = scene.create_node();
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(a).unwrap().offset, Vec2::ZERO);
        assert!(scene.get(a).unwrap().sprite.is_none());
    }

    #[test]
    fn remove_node_is_idempotent() {
        let mut scene = Scene::new();
        let id = scene.create_node();
        assert!(scene.remove_node(id));
        assert!(!scene.remove_node(id));
        assert!(scene.is_empty());
    }

    #[test]
    fn set_offset_on_removed_node_fails() {
        let mut scene = Scene::new();
        let id = scene.create_node();
        assert!(scene.set_offset(id, Vec2::new(3.0, 4.0)));
        assert_eq!(scene.get(id).unwrap().offset, Vec2::new(3.0, 4.0));
        scene.remove_node(id);
        assert!(!scene.set_offset(id, Vec2::ONE));
    }

    #[test]
    fn attach_sprite_and_origin() {
        let mut scene = Scene::new();
        let id = scene.create_node();
        assert!(scene.attach_sprite(id, Sprite::centered(Bitmap::new(20.0, 10.0, 1.0))));
        scene.set_offset(id, Vec2::new(100.0, 100.0));
        let node = scene.get(id).unwrap();
        assert_eq!(node.sprite_origin(), Some(Vec2::new(90.0, 95.0)));
    }

    #[test]
    fn ids_are_not_reused() {
        let mut scene = Scene::new();
        let a = scene.create_node();
        scene.remove_node(a);
        let b = scene.create_node();
        assert_ne!(a, b);
    }
}
