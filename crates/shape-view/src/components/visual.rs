use glam::Vec2;

use crate::api::types::NodeId;
use crate::components::sprite::Sprite;

/// A scene node bound to one body.
#[derive(Debug, Clone)]
pub struct Visual {
    pub id: NodeId,
    /// World-space offset; the sprite's anchor is drawn here.
    pub offset: Vec2,
    /// Nodes without a sprite are invisible but still positioned.
    pub sprite: Option<Sprite>,
}

impl Visual {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            offset: Vec2::ZERO,
            sprite: None,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_sprite(mut self, sprite: Sprite) -> Self {
        self.sprite = Some(sprite);
        self
    }

    /// World-space top-left corner of the sprite, if any.
    pub fn sprite_origin(&self) -> Option<Vec2> {
        self.sprite.as_ref().map(|s| self.offset - s.anchor_point())
    }
}
