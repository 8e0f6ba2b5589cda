//! Contract between the viewer and a retained-mode renderer.
//!
//! The viewer never composites anything itself: it creates nodes, hands them
//! sprites and moves them. [`Scene`](crate::core::scene::Scene) is the
//! in-crate implementation; hosts with their own scene graph implement
//! [`SceneGraph`] directly.

use glam::Vec2;

use crate::api::types::NodeId;
use crate::components::sprite::Sprite;

pub trait SceneGraph {
    /// Create an empty node at the origin.
    fn create_node(&mut self) -> NodeId;

    /// Attach (or replace) the node's sprite. Returns `false` for unknown nodes.
    fn attach_sprite(&mut self, node: NodeId, sprite: Sprite) -> bool;

    /// Remove a node. Returns `false` if it did not exist.
    fn remove_node(&mut self, node: NodeId) -> bool;

    /// Set the node's offset. Returns `false` for unknown nodes.
    fn set_offset(&mut self, node: NodeId, offset: Vec2) -> bool;
}
