use glam::Vec2;

/// Geometry of a body, expressed in the body's local space.
///
/// The local origin is the body position. Polygon vertices are listed in
/// drawing order and are expected to surround (or sit near) the origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Polygon { vertices: Vec<Vec2> },
}

impl Shape {
    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius }
    }

    pub fn polygon(vertices: impl Into<Vec<Vec2>>) -> Self {
        Shape::Polygon {
            vertices: vertices.into(),
        }
    }

    /// Axis-aligned box centered on the origin.
    pub fn rect(half_width: f32, half_height: f32) -> Self {
        Shape::polygon(vec![
            Vec2::new(-half_width, -half_height),
            Vec2::new(half_width, -half_height),
            Vec2::new(half_width, half_height),
            Vec2::new(-half_width, half_height),
        ])
    }

    /// Half extents about the local origin (not a tight bounding box).
    /// For polygons this is `max |x|`, `max |y|` over the vertices.
    pub fn half_extents(&self) -> Vec2 {
        match self {
            Shape::Circle { radius } => Vec2::splat(*radius),
            Shape::Polygon { vertices } => vertices
                .iter()
                .fold(Vec2::ZERO, |acc, v| acc.max(v.abs())),
        }
    }

    /// Exact point-in-shape test for a shape placed at `origin`.
    pub fn contains_point(&self, origin: Vec2, point: Vec2) -> bool {
        let local = point - origin;
        match self {
            Shape::Circle { radius } => local.length_squared() <= radius * radius,
            Shape::Polygon { vertices } => point_in_polygon(vertices, local),
        }
    }
}

/// Even-odd ray cast. Polygons with fewer than three vertices enclose nothing.
pub fn point_in_polygon(vertices: &[Vec2], p: Vec2) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for (i, vi) in vertices.iter().enumerate() {
        let vj = vertices[j];
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Shape {
        Shape::polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 10.0),
        ])
    }

    #[test]
    fn circle_contains_boundary_point() {
        let c = Shape::circle(10.0);
        let origin = Vec2::new(50.0, 50.0);
        assert!(c.contains_point(origin, Vec2::new(52.0, 50.0)));
        assert!(c.contains_point(origin, Vec2::new(60.0, 50.0)));
        assert!(!c.contains_point(origin, Vec2::new(60.1, 50.0)));
    }

    #[test]
    fn circle_rejects_bounding_box_corner() {
        let c = Shape::circle(10.0);
        // Inside the bounding square but outside the disc.
        assert!(!c.contains_point(Vec2::ZERO, Vec2::new(9.0, 9.0)));
    }

    #[test]
    fn polygon_contains_interior_point() {
        let t = triangle();
        let origin = Vec2::new(100.0, 100.0);
        assert!(t.contains_point(origin, Vec2::new(105.0, 103.0)));
        assert!(!t.contains_point(origin, Vec2::new(101.0, 109.0)));
        assert!(!t.contains_point(origin, Vec2::new(95.0, 103.0)));
    }

    #[test]
    fn degenerate_polygons_contain_nothing() {
        assert!(!Shape::polygon(vec![]).contains_point(Vec2::ZERO, Vec2::ZERO));
        let segment = Shape::polygon(vec![Vec2::ZERO, Vec2::new(10.0, 0.0)]);
        assert!(!segment.contains_point(Vec2::ZERO, Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn half_extents_use_absolute_coordinates() {
        let s = Shape::polygon(vec![Vec2::new(-12.0, 3.0), Vec2::new(4.0, -7.0)]);
        assert_eq!(s.half_extents(), Vec2::new(12.0, 7.0));
        assert_eq!(triangle().half_extents(), Vec2::new(10.0, 10.0));
        assert_eq!(Shape::circle(6.0).half_extents(), Vec2::splat(6.0));
    }

    #[test]
    fn rect_is_centered() {
        let r = Shape::rect(20.0, 5.0);
        assert_eq!(r.half_extents(), Vec2::new(20.0, 5.0));
        assert!(r.contains_point(Vec2::ZERO, Vec2::new(19.0, -4.0)));
        assert!(!r.contains_point(Vec2::ZERO, Vec2::new(21.0, 0.0)));
    }
}
