//! Triangle decompositions for each unit shape.
//!
//! Negative, zero or NaN sizes are clamped to zero so every vertex collapses
//! onto the origin instead of producing inverted shapes.

use super::{Point, Triangle};
use crate::models::{GeeseDirection, HstVariant};

/// The two halves of a half-square triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HstTriangles {
    /// Triangle filling the named corner
    pub primary: Triangle,
    /// The opposite triangle
    pub secondary: Triangle,
}

/// The four quarters of a quarter-square triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QstTriangles {
    /// Quarter touching the top edge
    pub top: Triangle,
    /// Quarter touching the right edge
    pub right: Triangle,
    /// Quarter touching the bottom edge
    pub bottom: Triangle,
    /// Quarter touching the left edge
    pub left: Triangle,
}

/// The goose and its two sky triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeeseTriangles {
    /// Center triangle whose apex touches the edge named by the direction
    pub goose: Triangle,
    /// Sky corner on the top (horizontal geese) or left (vertical geese)
    pub sky1: Triangle,
    /// Sky corner on the bottom (horizontal geese) or right (vertical geese)
    pub sky2: Triangle,
}

fn clamp_size(value: f64) -> f64 {
    // f64::max returns the non-NaN operand
    value.max(0.0)
}

/// Splits a `width`×`height` rectangle along one diagonal.
///
/// | variant | primary | secondary |
/// |---|---|---|
/// | `nw` | (0,0),(w,0),(0,h) | (w,0),(w,h),(0,h) |
/// | `ne` | (0,0),(w,0),(w,h) | (0,0),(w,h),(0,h) |
/// | `sw` | (0,0),(0,h),(w,h) | (0,0),(w,0),(w,h) |
/// | `se` | (w,0),(w,h),(0,h) | (0,0),(w,0),(0,h) |
#[must_use]
pub fn hst_triangles(variant: HstVariant, width: f64, height: f64) -> HstTriangles {
    let w = clamp_size(width);
    let h = clamp_size(height);

    let (primary, secondary) = match variant {
        HstVariant::Nw => (
            Triangle::new((0.0, 0.0), (w, 0.0), (0.0, h)),
            Triangle::new((w, 0.0), (w, h), (0.0, h)),
        ),
        HstVariant::Ne => (
            Triangle::new((0.0, 0.0), (w, 0.0), (w, h)),
            Triangle::new((0.0, 0.0), (w, h), (0.0, h)),
        ),
        HstVariant::Sw => (
            Triangle::new((0.0, 0.0), (0.0, h), (w, h)),
            Triangle::new((0.0, 0.0), (w, 0.0), (w, h)),
        ),
        HstVariant::Se => (
            Triangle::new((w, 0.0), (w, h), (0.0, h)),
            Triangle::new((0.0, 0.0), (w, 0.0), (0.0, h)),
        ),
    };

    HstTriangles { primary, secondary }
}

/// Splits a rectangle into four triangles meeting at its exact center.
#[must_use]
pub fn qst_triangles(width: f64, height: f64) -> QstTriangles {
    let w = clamp_size(width);
    let h = clamp_size(height);
    let c = (w / 2.0, h / 2.0);

    QstTriangles {
        top: Triangle::new((0.0, 0.0), (w, 0.0), c),
        right: Triangle::new((w, 0.0), (w, h), c),
        bottom: Triangle::new((w, h), (0.0, h), c),
        left: Triangle::new((0.0, h), (0.0, 0.0), c),
    }
}

/// Builds a flying-geese pointer over the unit's full footprint.
///
/// `width`/`height` are the pixel size of the whole unit, i.e. twice the
/// cell size along the long axis. The goose apex sits at the midpoint of the
/// edge named by `direction`; its base spans the opposite edge.
#[must_use]
pub fn flying_geese_triangles(
    direction: GeeseDirection,
    width: f64,
    height: f64,
) -> GeeseTriangles {
    let w = clamp_size(width);
    let h = clamp_size(height);
    let mid_x = w / 2.0;
    let mid_y = h / 2.0;

    match direction {
        GeeseDirection::Right => GeeseTriangles {
            goose: Triangle::new((0.0, 0.0), (w, mid_y), (0.0, h)),
            sky1: Triangle::new((0.0, 0.0), (w, 0.0), (w, mid_y)),
            sky2: Triangle::new((0.0, h), (w, mid_y), (w, h)),
        },
        GeeseDirection::Left => GeeseTriangles {
            goose: Triangle::new((w, 0.0), (0.0, mid_y), (w, h)),
            sky1: Triangle::new((0.0, 0.0), (w, 0.0), (0.0, mid_y)),
            sky2: Triangle::new((0.0, mid_y), (w, h), (0.0, h)),
        },
        GeeseDirection::Up => GeeseTriangles {
            goose: Triangle::new((0.0, h), (mid_x, 0.0), (w, h)),
            sky1: Triangle::new((0.0, 0.0), (mid_x, 0.0), (0.0, h)),
            sky2: Triangle::new((mid_x, 0.0), (w, 0.0), (w, h)),
        },
        GeeseDirection::Down => GeeseTriangles {
            goose: Triangle::new((0.0, 0.0), (w, 0.0), (mid_x, h)),
            sky1: Triangle::new((0.0, 0.0), (mid_x, h), (0.0, h)),
            sky2: Triangle::new((w, 0.0), (w, h), (mid_x, h)),
        },
    }
}

/// Apex of the goose triangle, the point the unit visually points at.
#[must_use]
pub fn geese_apex(direction: GeeseDirection, width: f64, height: f64) -> Point {
    let w = clamp_size(width);
    let h = clamp_size(height);
    match direction {
        GeeseDirection::Right => Point::new(w, h / 2.0),
        GeeseDirection::Left => Point::new(0.0, h / 2.0),
        GeeseDirection::Up => Point::new(w / 2.0, 0.0),
        GeeseDirection::Down => Point::new(w / 2.0, h),
    }
}
