use bytemuck::{Pod, Zeroable};

/// Per-sprite draw record handed to a renderer backend.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// World-space top-left corner of the sprite.
    pub x: f32,
    pub y: f32,
    /// Logical sprite size in world units.
    pub width: f32,
    pub height: f32,
    /// Pixel density of the sprite's bitmap.
    pub ratio: f32,
    /// Scene node id (as f32 for the flat buffer).
    pub node: f32,
    pub anchor_x: f32,
    pub anchor_y: f32,
}

impl SpriteInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Sprite instances for one frame, in scene order.
pub struct RenderBuffer {
    pub instances: Vec<SpriteInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: SpriteInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Flat float view of the instances.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
