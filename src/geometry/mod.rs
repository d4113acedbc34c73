//! Triangle geometry for quilt units.
//!
//! All coordinates are in unit-local pixel space: origin at the top-left
//! corner, x grows right, y grows down. Nothing in here knows about grids,
//! placement or palettes.

pub mod primitives;

pub use primitives::{
    flying_geese_triangles, hst_triangles, qst_triangles, GeeseTriangles, HstTriangles,
    QstTriangles,
};

use serde::{Deserialize, Serialize};

/// A 2D point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (down is positive)
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Exactly three points, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// Vertices
    pub points: [Point; 3],
}

impl Triangle {
    /// Creates a triangle from three `(x, y)` pairs.
    #[must_use]
    pub const fn new(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
        Self {
            points: [
                Point::new(a.0, a.1),
                Point::new(b.0, b.1),
                Point::new(c.0, c.1),
            ],
        }
    }

    /// Returns this triangle shifted by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            points: self.points.map(|p| p.offset(dx, dy)),
        }
    }

    /// Unsigned area.
    #[must_use]
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.points;
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
    }

    /// Whether `point` is one of the vertices (exact comparison).
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn has_vertex(&self, point: Point) -> bool {
        self.points.iter().any(|p| p.x == point.x && p.y == point.y)
    }
}

/// A triangle tagged with the patch it colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchTriangle {
    /// Patch id declared by the unit definition
    pub patch_id: String,
    /// Geometry
    #[serde(flatten)]
    pub triangle: Triangle,
}

impl PatchTriangle {
    /// Creates a tagged triangle.
    #[must_use]
    pub fn new(patch_id: impl Into<String>, triangle: Triangle) -> Self {
        Self {
            patch_id: patch_id.into(),
            triangle,
        }
    }
}

/// Ordered triangles making up one unit instance.
pub type TriangleGroup = Vec<PatchTriangle>;

/// Flattens a triangle into `[x1, y1, x2, y2, x3, y3]`, preserving point order.
///
/// This is the layout canvas polygon APIs expect.
#[must_use]
pub const fn triangle_to_flat_points(triangle: &Triangle) -> [f64; 6] {
    let [a, b, c] = triangle.points;
    [a.x, a.y, b.x, b.y, c.x, c.y]
}
