use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One RGBA8 pixel, straight (non-premultiplied) alpha.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Source-over composite of `src` on top of `self`.
    pub fn blend(self, src: Rgba8) -> Rgba8 {
        match src.a {
            255 => return src,
            0 => return self,
            _ => {}
        }
        let sa = src.a as f32 / 255.0;
        let da = self.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| {
            let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        Rgba8 {
            r: mix(src.r, self.r),
            g: mix(src.g, self.g),
            b: mix(src.b, self.b),
            a: (out_a * 255.0).round() as u8,
        }
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// A pixel buffer with a logical size.
///
/// `width`/`height` are in world units; the backing store holds
/// `ceil(size * ratio)` pixels per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: f32,
    height: f32,
    ratio: f32,
    pixel_width: u32,
    pixel_height: u32,
    pixels: Vec<Rgba8>,
}

impl Bitmap {
    /// Transparent bitmap of the given logical size.
    pub fn new(width: f32, height: f32, ratio: f32) -> Self {
        let pixel_width = (width * ratio).ceil().max(0.0) as u32;
        let pixel_height = (height * ratio).ceil().max(0.0) as u32;
        Self {
            width,
            height,
            ratio,
            pixel_width,
            pixel_height,
            pixels: vec![Rgba8::TRANSPARENT; pixel_width as usize * pixel_height as usize],
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Logical size in world units.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.pixel_width || y >= self.pixel_height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Pixel under a logical-space coordinate.
    pub fn pixel_at(&self, p: Vec2) -> Option<Rgba8> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let scaled = p * self.ratio;
        self.pixel(scaled.x as u32, scaled.y as u32)
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Raw RGBA bytes, row-major, for upload to a texture.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.pixel_width as usize + x as usize
    }
}

/// A bitmap plus the fractional point that aligns with the owner's position.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub bitmap: Bitmap,
    /// (0, 0) = top-left corner, (1, 1) = bottom-right.
    pub anchor: Vec2,
}

impl Sprite {
    /// Sprite anchored at its center.
    pub fn centered(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            anchor: Vec2::splat(0.5),
        }
    }

    /// Logical position of the anchor inside the bitmap.
    pub fn anchor_point(&self) -> Vec2 {
        self.bitmap.size() * self.anchor
    }
}
