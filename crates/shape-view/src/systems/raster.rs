//! Shape-to-bitmap rasterization.
//!
//! Shapes are turned into lyon paths in pixel space, tessellated into
//! triangles (fill and stroke separately) and scan-converted into an RGBA8
//! [`Bitmap`]. Each layer is collected into a coverage mask first and
//! composited once, so overlapping stroke triangles never double-blend.
//!
//! The bitmap is laid out so the shape's local origin lands on the bitmap
//! center; the returned [`Sprite`] is anchored there.

use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, LineCap,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::api::options::DrawStyle;
use crate::components::color::Color;
use crate::components::sprite::{Bitmap, Rgba8, Sprite};
use crate::core::shape::Shape;

/// Flattening tolerance in device pixels.
const TOLERANCE: f32 = 0.5;

struct FillCtor;

impl FillVertexConstructor<Vec2> for FillCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> Vec2 {
        Vec2::new(vertex.position().x, vertex.position().y)
    }
}

struct StrokeCtor;

impl StrokeVertexConstructor<Vec2> for StrokeCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> Vec2 {
        Vec2::new(vertex.position().x, vertex.position().y)
    }
}

/// Bitmap size and vertex translation for a polygon.
///
/// The canvas is symmetric about the local origin: its half size is the
/// largest absolute vertex coordinate per axis plus the line width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonLayout {
    /// Logical bitmap size.
    pub size: Vec2,
    /// Added to every vertex before drawing.
    pub offset: Vec2,
}

impl PolygonLayout {
    /// `None` for a polygon without vertices.
    pub fn new(vertices: &[Vec2], line_width: f32) -> Option<Self> {
        if vertices.is_empty() {
            return None;
        }
        let half = Shape::Polygon {
            vertices: vertices.to_vec(),
        }
        .half_extents();
        Some(Self {
            size: half * 2.0 + Vec2::splat(2.0 * line_width),
            offset: half + Vec2::splat(line_width),
        })
    }

    pub fn place(&self, vertices: &[Vec2]) -> Vec<Vec2> {
        vertices.iter().map(|v| *v + self.offset).collect()
    }
}

/// Converts shapes into center-anchored sprites.
///
/// Holds the lyon tessellators and a scratch geometry buffer so repeated
/// rasterization does not reallocate them.
pub struct ShapeRasterizer {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<Vec2, u32>,
}

impl ShapeRasterizer {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
        }
    }

    /// Rasterize `shape` at `ratio` pixels per world unit.
    ///
    /// Returns `None` for a polygon with no vertices.
    pub fn rasterize(&mut self, shape: &Shape, style: &DrawStyle, ratio: f32) -> Option<Sprite> {
        let bitmap = match shape {
            Shape::Circle { radius } => self.rasterize_circle(*radius, style, ratio),
            Shape::Polygon { vertices } => self.rasterize_polygon(vertices, style, ratio)?,
        };
        Some(Sprite::centered(bitmap))
    }

    /// Bitmap of `(2r + 2w)` square with the circle centered in it.
    pub fn rasterize_circle(&mut self, radius: f32, style: &DrawStyle, ratio: f32) -> Bitmap {
        let side = 2.0 * radius + 2.0 * style.line_width;
        let mut bitmap = Bitmap::new(side, side, ratio);

        let center = Vec2::splat(side / 2.0) * ratio;
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius * ratio, Winding::Positive);
        let path = builder.build();

        if let Some(fill) = style.fill_color {
            self.fill_layer(&mut bitmap, &path, fill);
        }
        self.stroke_layer(&mut bitmap, &path, style, ratio);
        bitmap
    }

    /// Polygon bitmap per [`PolygonLayout`]. Two vertices draw an open
    /// segment; three or more a closed, optionally filled, outline.
    pub fn rasterize_polygon(&mut self, vertices: &[Vec2], style: &DrawStyle, ratio: f32) -> Option<Bitmap> {
        let layout = PolygonLayout::new(vertices, style.line_width)?;
        let mut bitmap = Bitmap::new(layout.size.x, layout.size.y, ratio);

        let placed = layout.place(vertices);
        let closed = placed.len() > 2;

        let mut builder = Path::builder();
        let first = placed[0] * ratio;
        builder.begin(point(first.x, first.y));
        for v in &placed[1..] {
            let p = *v * ratio;
            builder.line_to(point(p.x, p.y));
        }
        builder.end(closed);
        let path = builder.build();

        // An open path encloses no area, so only closed outlines are filled.
        if let (true, Some(fill)) = (closed, style.fill_color) {
            self.fill_layer(&mut bitmap, &path, fill);
        }
        self.stroke_layer(&mut bitmap, &path, style, ratio);
        Some(bitmap)
    }

    fn fill_layer(&mut self, bitmap: &mut Bitmap, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(TOLERANCE),
            &mut BuffersBuilder::new(&mut self.geometry, FillCtor),
        );
        match result {
            Ok(()) => self.flush_geometry(bitmap, color),
            Err(e) => {
                log::warn!("fill tessellation failed: {:?}", e);
                self.clear_geometry();
            }
        }
    }

    fn stroke_layer(&mut self, bitmap: &mut Bitmap, path: &Path, style: &DrawStyle, ratio: f32) {
        if style.line_width <= 0.0 {
            return;
        }
        let options = StrokeOptions::tolerance(TOLERANCE)
            .with_line_width(style.line_width * ratio)
            .with_line_cap(LineCap::Round);
        let result = self.stroke_tess.tessellate_path(
            path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, StrokeCtor),
        );
        match result {
            Ok(()) => self.flush_geometry(bitmap, style.line_color),
            Err(e) => {
                log::warn!("stroke tessellation failed: {:?}", e);
                self.clear_geometry();
            }
        }
    }

    /// Scan-convert the pending triangles into `bitmap` and reset the buffer.
    fn flush_geometry(&mut self, bitmap: &mut Bitmap, color: Color) {
        let mut coverage = Coverage::new(bitmap.pixel_width(), bitmap.pixel_height());
        for tri in self.geometry.indices.chunks_exact(3) {
            let v = &self.geometry.vertices;
            coverage.cover_triangle(v[tri[0] as usize], v[tri[1] as usize], v[tri[2] as usize]);
        }
        coverage.composite(bitmap, Rgba8::from(color.to_rgba8()));
        self.clear_geometry();
    }

    fn clear_geometry(&mut self) {
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }
}

impl Default for ShapeRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-pixel coverage for one layer. A pixel is covered when its center lies
/// inside or on the edge of any triangle.
struct Coverage {
    width: u32,
    height: u32,
    mask: Vec<bool>,
}

impl Coverage {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mask: vec![false; width as usize * height as usize],
        }
    }

    fn cover_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let area = edge(a, b, c);
        if area.abs() <= f32::EPSILON {
            return;
        }

        let min = a.min(b).min(c);
        let max = a.max(b).max(c);
        // Pixel i has its center at i + 0.5.
        let x0 = (min.x - 0.5).ceil().max(0.0);
        let y0 = (min.y - 0.5).ceil().max(0.0);
        let x1 = (max.x - 0.5).floor().min((self.width - 1) as f32);
        let y1 = (max.y - 0.5).floor().min((self.height - 1) as f32);
        if x0 > x1 || y0 > y1 {
            return;
        }

        for y in y0 as u32..=y1 as u32 {
            for x in x0 as u32..=x1 as u32 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, p);
                let w1 = edge(c, a, p);
                let w2 = edge(a, b, p);
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.mask[y as usize * self.width as usize + x as usize] = true;
                }
            }
        }
    }

    fn composite(&self, bitmap: &mut Bitmap, color: Rgba8) {
        for (px, covered) in bitmap.pixels_mut().iter_mut().zip(&self.mask) {
            if *covered {
                *px = px.blend(color);
            }
        }
    }
}

/// Twice the signed area of (a, b, p).
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
