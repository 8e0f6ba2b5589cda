use crate::components::visual::Visual;
use crate::renderer::instance::{RenderBuffer, SpriteInstance};

/// Build the render buffer from scene nodes. Nodes without a sprite are skipped.
/// Each instance is positioned so the sprite's anchor sits on the node offset.
pub fn build_render_buffer<'a>(nodes: impl Iterator<Item = &'a Visual>, buffer: &mut RenderBuffer) {
    buffer.clear();

    for node in nodes {
        let (Some(sprite), Some(origin)) = (node.sprite.as_ref(), node.sprite_origin()) else {
            continue;
        };
        buffer.push(SpriteInstance {
            x: origin.x,
            y: origin.y,
            width: sprite.bitmap.width(),
            height: sprite.bitmap.height(),
            ratio: sprite.bitmap.ratio(),
            node: node.id.0 as f32,
            anchor_x: sprite.anchor.x,
            anchor_y: sprite.anchor.y,
        });
    }
}
