//! 2D geometry primitives and the predicates the spatial index consumes.
//!
//! All shapes share one coordinate system: `x` grows to the right, `y` grows
//! downward, and a rectangle is anchored at its top-left corner.
//!
//! Two predicates matter to the index:
//! - `intersects` is true when the interiors of two shapes with area overlap.
//!   Such shapes that only touch along an edge or at a corner do not
//!   intersect. When either shape has no area (a segment, a point, a
//!   flattened rectangle) any shared point counts.
//! - `contains` is true when the other shape lies entirely inside this one,
//!   boundary included. Shapes without area contain nothing.
//!
//! Rectangles, triangles and segments are treated as convex hulls and tested
//! with the separating axis theorem; circles are tested by distance.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the left edge.
    pub x: f32,
    /// Y coordinate of the top edge.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from center point and size.
    #[must_use]
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    /// Returns the right edge x coordinate.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge y coordinate.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns the area of the rectangle.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Checks if the rectangle contains a point, edges included.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Checks if the interiors of the two rectangles overlap.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Checks if the closed rectangles share at least one point.
    #[must_use]
    pub fn touches(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Checks if this rectangle fully contains another.
    #[must_use]
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// Corners in hull order: top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.right(), self.y),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.x, self.bottom()),
        ]
    }
}

/// Circle given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Vec2,
    /// Radius.
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle.
    #[must_use]
    pub const fn new(cx: f32, cy: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(cx, cy),
            radius,
        }
    }
}

/// Triangle given by its three corners, in any winding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// First corner.
    pub a: Vec2,
    /// Second corner.
    pub b: Vec2,
    /// Third corner.
    pub c: Vec2,
}

impl Triangle {
    /// Creates a new triangle.
    #[must_use]
    pub const fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Twice the signed area; positive for the hull winding used internally.
    fn doubled_signed_area(&self) -> f32 {
        (self.b - self.a).perp_dot(self.c - self.a)
    }
}

/// Line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    /// Start point.
    pub start: Vec2,
    /// End point.
    pub end: Vec2,
}

impl LineSegment {
    /// Creates a new line segment.
    #[must_use]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            start: Vec2::new(x1, y1),
            end: Vec2::new(x2, y2),
        }
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Any shape an element or a query can take.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned rectangle
    Rect(Rect),
    /// Circle
    Circle(Circle),
    /// Triangle
    Triangle(Triangle),
    /// Line segment
    Segment(LineSegment),
}

impl From<Rect> for Shape {
    fn from(rect: Rect) -> Self {
        Self::Rect(rect)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Self::Triangle(triangle)
    }
}

impl From<LineSegment> for Shape {
    fn from(segment: LineSegment) -> Self {
        Self::Segment(segment)
    }
}

impl Shape {
    /// Axis-aligned bounding box of the shape.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect(rect) => *rect,
            Self::Circle(circle) => Rect::from_center(
                circle.center.x,
                circle.center.y,
                circle.radius * 2.0,
                circle.radius * 2.0,
            ),
            Self::Triangle(tri) => bounds_of(&[tri.a, tri.b, tri.c]),
            Self::Segment(seg) => bounds_of(&[seg.start, seg.end]),
        }
    }

    /// Left edge of the bounding box.
    #[must_use]
    pub fn x(&self) -> f32 {
        self.bounds().x
    }

    /// Top edge of the bounding box.
    #[must_use]
    pub fn y(&self) -> f32 {
        self.bounds().y
    }

    /// Width of the bounding box.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.bounds().width
    }

    /// Height of the bounding box.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bounds().height
    }

    /// Returns the shape moved by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        match *self {
            Self::Rect(rect) => {
                Self::Rect(Rect::new(rect.x + delta.x, rect.y + delta.y, rect.width, rect.height))
            },
            Self::Circle(circle) => Self::Circle(Circle {
                center: circle.center + delta,
                radius: circle.radius,
            }),
            Self::Triangle(tri) => {
                Self::Triangle(Triangle::new(tri.a + delta, tri.b + delta, tri.c + delta))
            },
            Self::Segment(seg) => Self::Segment(LineSegment {
                start: seg.start + delta,
                end: seg.end + delta,
            }),
        }
    }

    /// Checks that every coordinate is finite and no extent is negative.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let finite = match self {
            Self::Rect(r) => [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite()),
            Self::Circle(c) => c.center.is_finite() && c.radius.is_finite(),
            Self::Triangle(t) => t.a.is_finite() && t.b.is_finite() && t.c.is_finite(),
            Self::Segment(s) => s.start.is_finite() && s.end.is_finite(),
        };
        if !finite {
            return Err(GeometryError::NonFinite);
        }
        match self {
            Self::Rect(r) if r.width < 0.0 => Err(GeometryError::NegativeExtent(r.width)),
            Self::Rect(r) if r.height < 0.0 => Err(GeometryError::NegativeExtent(r.height)),
            Self::Circle(c) if c.radius < 0.0 => Err(GeometryError::NegativeExtent(c.radius)),
            _ => Ok(()),
        }
    }

    /// Returns true if the shape encloses a non-empty interior.
    ///
    /// Segments never do; rectangles and circles need positive extents and
    /// triangles non-collinear corners.
    #[must_use]
    pub fn has_area(&self) -> bool {
        match self {
            Self::Rect(r) => r.width > 0.0 && r.height > 0.0,
            Self::Circle(c) => c.radius > 0.0,
            Self::Triangle(t) => t.doubled_signed_area() != 0.0,
            Self::Segment(_) => false,
        }
    }

    /// Checks if a point lies inside the shape, boundary included.
    #[must_use]
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Self::Rect(rect) => rect.contains_point(point.x, point.y),
            Self::Circle(circle) => {
                circle.center.distance_squared(point) <= circle.radius * circle.radius
            },
            Self::Triangle(_) | Self::Segment(_) => match self.primitive() {
                Primitive::Hull(hull) => hull.covers_point(point),
                Primitive::Disc(_) => false,
            },
        }
    }

    /// Checks if the two shapes overlap.
    ///
    /// Interiors must overlap when both shapes have area; otherwise touching
    /// is enough.
    #[must_use]
    pub fn intersects(&self, other: &Shape) -> bool {
        let closed = !(self.has_area() && other.has_area());
        if let (Self::Rect(a), Self::Rect(b)) = (self, other) {
            return if closed { a.touches(b) } else { a.intersects(b) };
        }
        match (self.primitive(), other.primitive()) {
            (Primitive::Hull(a), Primitive::Hull(b)) => a.overlaps(&b, closed),
            (Primitive::Disc(a), Primitive::Disc(b)) => {
                let reach = a.radius + b.radius;
                let dist_sq = a.center.distance_squared(b.center);
                if closed {
                    dist_sq <= reach * reach
                } else {
                    dist_sq < reach * reach
                }
            },
            (Primitive::Disc(disc), Primitive::Hull(hull))
            | (Primitive::Hull(hull), Primitive::Disc(disc)) => hull.overlaps_disc(&disc, closed),
        }
    }

    /// Checks if `other` lies entirely inside this shape, boundary included.
    #[must_use]
    pub fn contains(&self, other: &Shape) -> bool {
        if !self.has_area() {
            return false;
        }
        if let (Self::Rect(a), Self::Rect(b)) = (self, other) {
            return a.contains(b);
        }
        match (self.primitive(), other.primitive()) {
            (Primitive::Hull(outer), Primitive::Hull(inner)) => {
                inner.points().iter().all(|p| outer.encloses_point(*p))
            },
            (Primitive::Hull(outer), Primitive::Disc(inner)) => outer.encloses_disc(&inner),
            (Primitive::Disc(outer), Primitive::Hull(inner)) => {
                let r_sq = outer.radius * outer.radius;
                inner.points().iter().all(|p| outer.center.distance_squared(*p) <= r_sq)
            },
            (Primitive::Disc(outer), Primitive::Disc(inner)) => {
                outer.center.distance(inner.center) + inner.radius <= outer.radius
            },
        }
    }

    fn primitive(&self) -> Primitive {
        match *self {
            Self::Rect(rect) => Primitive::Hull(Hull::from_points(&rect.corners())),
            Self::Circle(circle) => Primitive::Disc(circle),
            Self::Triangle(tri) => {
                if tri.doubled_signed_area() < 0.0 {
                    Primitive::Hull(Hull::from_points(&[tri.a, tri.c, tri.b]))
                } else {
                    Primitive::Hull(Hull::from_points(&[tri.a, tri.b, tri.c]))
                }
            },
            Self::Segment(seg) => Primitive::Hull(Hull::from_points(&[seg.start, seg.end])),
        }
    }
}

fn bounds_of(points: &[Vec2]) -> Rect {
    let min = points.iter().copied().fold(Vec2::splat(f32::INFINITY), Vec2::min);
    let max = points.iter().copied().fold(Vec2::splat(f32::NEG_INFINITY), Vec2::max);
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}

enum Primitive {
    Hull(Hull),
    Disc(Circle),
}

/// Convex point set with at most four corners, wound so that the interior is
/// on the positive side of every edge.
#[derive(Clone, Copy)]
struct Hull {
    points: [Vec2; 4],
    len: usize,
}

impl Hull {
    fn from_points(points: &[Vec2]) -> Self {
        let mut hull = Self {
            points: [Vec2::ZERO; 4],
            len: points.len(),
        };
        hull.points[..points.len()].copy_from_slice(points);
        hull
    }

    fn points(&self) -> &[Vec2] {
        &self.points[..self.len]
    }

    fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        (0..self.len).map(move |i| (self.points[i], self.points[(i + 1) % self.len]))
    }

    fn has_area(&self) -> bool {
        self.len >= 3
            && self
                .edges()
                .map(|(a, b)| a.perp_dot(b))
                .sum::<f32>()
                > 0.0
    }

    fn encloses_point(&self, p: Vec2) -> bool {
        self.has_area() && self.edges().all(|(a, b)| (b - a).perp_dot(p - a) >= 0.0)
    }

    /// Like `encloses_point`, but a hull without area still covers the points
    /// on its edges.
    fn covers_point(&self, p: Vec2) -> bool {
        self.encloses_point(p) || self.edges().any(|(a, b)| distance_sq_to_segment(p, a, b) == 0.0)
    }

    /// Candidate separating axes: edge normals, edge directions and the two
    /// coordinate axes. Directions and coordinate axes are only needed to
    /// separate hulls without area (parallel segments, points).
    fn axes(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.edges()
            .flat_map(|(a, b)| {
                let edge = b - a;
                [edge.perp(), edge]
            })
            .chain([Vec2::X, Vec2::Y])
            .filter(|axis| *axis != Vec2::ZERO)
    }

    fn encloses_disc(&self, disc: &Circle) -> bool {
        self.has_area()
            && self.edges().all(|(a, b)| {
                let edge = b - a;
                edge.perp_dot(disc.center - a) >= disc.radius * edge.length()
            })
    }

    /// Separating axis test. With `closed` set, touching hulls overlap.
    fn overlaps(&self, other: &Hull, closed: bool) -> bool {
        !self.axes().chain(other.axes()).any(|axis| {
            let (a_min, a_max) = project(axis, self.points());
            let (b_min, b_max) = project(axis, other.points());
            if closed {
                a_max < b_min || b_max < a_min
            } else {
                a_max <= b_min || b_max <= a_min
            }
        })
    }

    fn overlaps_disc(&self, disc: &Circle, closed: bool) -> bool {
        if self.encloses_point(disc.center) {
            return true;
        }
        let r_sq = disc.radius * disc.radius;
        self.edges().any(|(a, b)| {
            let dist_sq = distance_sq_to_segment(disc.center, a, b);
            if closed {
                dist_sq <= r_sq
            } else {
                dist_sq < r_sq
            }
        })
    }
}

fn project(axis: Vec2, points: &[Vec2]) -> (f32, f32) {
    points
        .iter()
        .map(|p| axis.dot(*p))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| (lo.min(d), hi.max(d)))
}

fn distance_sq_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Shape {
        Shape::Rect(Rect::new(x, y, w, h))
    }

    #[test]
    fn test_rect_contains_point() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains_point(50.0, 50.0));
        assert!(rect.contains_point(0.0, 0.0));
        assert!(rect.contains_point(100.0, 100.0));
        assert!(!rect.contains_point(-1.0, 50.0));
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let c = Rect::new(200.0, 200.0, 50.0, 50.0);
        let touching = Rect::new(100.0, 0.0, 10.0, 10.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&touching));
    }

    #[test]
    fn test_rect_contains() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(25.0, 25.0, 50.0, 50.0);
        let partial = Rect::new(50.0, 50.0, 100.0, 100.0);

        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&partial));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_rect_from_center() {
        let rect = Rect::from_center(50.0, 50.0, 20.0, 20.0);
        assert!((rect.x - 40.0).abs() < f32::EPSILON);
        assert!((rect.y - 40.0).abs() < f32::EPSILON);
        assert!((rect.width - 20.0).abs() < f32::EPSILON);
        assert!((rect.height - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_circle_bounds() {
        let bounds = Shape::from(Circle::new(10.0, 20.0, 5.0)).bounds();
        assert_eq!(bounds, Rect::new(5.0, 15.0, 10.0, 10.0));
    }

    #[test]
    fn test_circle_rect_intersection() {
        let circle = Shape::from(Circle::new(0.0, 0.0, 10.0));

        assert!(circle.intersects(&rect(5.0, 5.0, 10.0, 10.0)));
        assert!(rect(5.0, 5.0, 10.0, 10.0).intersects(&circle));
        // Bounding boxes overlap, the disc does not reach the corner.
        assert!(!circle.intersects(&rect(8.0, 8.0, 10.0, 10.0)));
        // Circle entirely inside the rectangle.
        assert!(circle.intersects(&rect(-50.0, -50.0, 100.0, 100.0)));
    }

    #[test]
    fn test_circle_containment() {
        let big = Shape::from(Circle::new(0.0, 0.0, 10.0));
        let small = Shape::from(Circle::new(2.0, 0.0, 3.0));
        let square = rect(-20.0, -20.0, 40.0, 40.0);

        assert!(big.contains(&small));
        assert!(!small.contains(&big));
        assert!(square.contains(&big));
        assert!(!rect(-5.0, -5.0, 10.0, 10.0).contains(&big));
        assert!(big.contains(&rect(-1.0, -1.0, 2.0, 2.0)));
    }

    #[test]
    fn test_triangle_winding_is_irrelevant() {
        let cw = Shape::from(Triangle::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        ));
        let ccw = Shape::from(Triangle::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
        ));
        let probe = rect(1.0, 1.0, 2.0, 2.0);

        assert!(cw.contains(&probe));
        assert!(ccw.contains(&probe));
        assert!(cw.intersects(&probe));
        // Lies beyond the hypotenuse.
        assert!(!cw.intersects(&rect(8.0, 8.0, 2.0, 2.0)));
    }

    #[test]
    fn test_segment_crosses_rect() {
        let square = rect(10.0, 10.0, 10.0, 10.0);

        assert!(Shape::from(LineSegment::new(0.0, 0.0, 30.0, 30.0)).intersects(&square));
        assert!(Shape::from(LineSegment::new(12.0, 12.0, 14.0, 14.0)).intersects(&square));
        assert!(!Shape::from(LineSegment::new(0.0, 30.0, 30.0, 25.0)).intersects(&square));
        // Segments contain nothing, rectangles contain segments.
        assert!(!Shape::from(LineSegment::new(0.0, 0.0, 30.0, 30.0)).contains(&square));
        assert!(square.contains(&Shape::from(LineSegment::new(12.0, 12.0, 14.0, 14.0))));
    }

    #[test]
    fn test_segment_circle_and_segment_segment() {
        let circle = Shape::from(Circle::new(50.0, 50.0, 5.0));
        let through = Shape::from(LineSegment::new(0.0, 50.0, 100.0, 50.0));
        let miss = Shape::from(LineSegment::new(0.0, 60.0, 100.0, 60.0));

        assert!(through.intersects(&circle));
        assert!(!miss.intersects(&circle));

        let cross = Shape::from(LineSegment::new(50.0, 0.0, 50.0, 100.0));
        assert!(through.intersects(&cross));
        assert!(!miss.intersects(&Shape::from(LineSegment::new(0.0, 0.0, 10.0, 0.0))));
    }

    #[test]
    fn test_has_area() {
        assert!(!rect(0.0, 0.0, 0.0, 10.0).has_area());
        assert!(!Shape::from(Circle::new(0.0, 0.0, 0.0)).has_area());
        assert!(!Shape::from(LineSegment::new(0.0, 0.0, 5.0, 5.0)).has_area());
        assert!(!Shape::from(Triangle::new(Vec2::ZERO, Vec2::ONE, Vec2::splat(2.0))).has_area());
        assert!(rect(0.0, 0.0, 1.0, 1.0).has_area());
        assert!(Shape::from(Circle::new(0.0, 0.0, 1.0)).has_area());
    }

    #[test]
    fn test_area_less_shapes_touch() {
        let horizontal = Shape::from(LineSegment::new(10.0, 20.0, 30.0, 20.0));
        let flat_bounds = horizontal.bounds();
        assert_eq!(flat_bounds, Rect::new(10.0, 20.0, 20.0, 0.0));

        // A segment meets itself, its own bounds and an overlapping collinear segment.
        assert!(horizontal.intersects(&horizontal));
        assert!(horizontal.intersects(&Shape::Rect(flat_bounds)));
        assert!(Shape::Rect(flat_bounds).intersects(&horizontal));
        assert!(horizontal.intersects(&Shape::from(LineSegment::new(25.0, 20.0, 40.0, 20.0))));
        assert!(horizontal.intersects(&Shape::from(LineSegment::new(30.0, 20.0, 30.0, 40.0))));
        assert!(!horizontal.intersects(&Shape::from(LineSegment::new(31.0, 20.0, 40.0, 20.0))));
        assert!(!horizontal.intersects(&Shape::from(LineSegment::new(10.0, 21.0, 30.0, 21.0))));

        // Points are zero-size rectangles or zero-radius circles.
        let point = rect(10.0, 10.0, 0.0, 0.0);
        assert!(point.intersects(&point));
        assert!(!point.intersects(&rect(11.0, 10.0, 0.0, 0.0)));
        assert!(point.intersects(&Shape::from(Circle::new(10.0, 10.0, 0.0))));
        assert!(horizontal.intersects(&Shape::from(Circle::new(20.0, 20.0, 0.0))));
        assert!(horizontal.intersects(&rect(20.0, 20.0, 0.0, 0.0)));
        assert!(!horizontal.intersects(&rect(5.0, 20.0, 0.0, 0.0)));

        // Touching an area shape from outside counts only without area.
        let square = rect(0.0, 0.0, 10.0, 10.0);
        assert!(square.intersects(&Shape::from(LineSegment::new(10.0, 0.0, 10.0, 10.0))));
        assert!(square.intersects(&rect(10.0, 5.0, 0.0, 0.0)));
        assert!(!square.intersects(&rect(10.0, 0.0, 5.0, 5.0)));
        assert!(Shape::from(Circle::new(0.0, 0.0, 5.0))
            .intersects(&Shape::from(LineSegment::new(5.0, -5.0, 5.0, 5.0))));
        assert!(!Shape::from(Circle::new(0.0, 0.0, 5.0))
            .intersects(&Shape::from(Circle::new(10.0, 0.0, 5.0))));

        // Shapes without area contain nothing, not even themselves.
        assert!(!horizontal.contains(&horizontal));
        assert!(!point.contains(&point));
    }

    #[test]
    fn test_validate() {
        assert_eq!(rect(0.0, f32::INFINITY, 1.0, 1.0).validate(), Err(GeometryError::NonFinite));
        assert_eq!(
            rect(0.0, 0.0, -1.0, 1.0).validate(),
            Err(GeometryError::NegativeExtent(-1.0))
        );
        assert!(Shape::from(Circle::new(0.0, 0.0, 1.0)).validate().is_ok());
    }

    #[test]
    fn test_translated() {
        let moved = rect(0.0, 0.0, 5.0, 5.0).translated(Vec2::new(10.0, -2.0));
        assert_eq!(moved, rect(10.0, -2.0, 5.0, 5.0));
        let seg = Shape::from(LineSegment::new(0.0, 0.0, 1.0, 1.0)).translated(Vec2::ONE);
        assert_eq!(seg, Shape::from(LineSegment::new(1.0, 1.0, 2.0, 2.0)));
    }

    #[test]
    fn test_contains_point() {
        let tri = Shape::from(Triangle::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
        ));
        assert!(tri.contains_point(Vec2::new(2.0, 2.0)));
        assert!(!tri.contains_point(Vec2::new(8.0, 8.0)));
        assert!(Shape::from(Circle::new(0.0, 0.0, 1.0)).contains_point(Vec2::new(1.0, 0.0)));
        let seg = Shape::from(LineSegment::new(0.0, 0.0, 1.0, 0.0));
        assert!(seg.contains_point(Vec2::ZERO));
        assert!(seg.contains_point(Vec2::new(0.5, 0.0)));
        assert!(!seg.contains_point(Vec2::new(0.5, 0.5)));
    }
}
