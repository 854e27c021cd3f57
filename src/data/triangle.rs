use array_init::array_init;
use claims::debug_assert_ok;
use std::cmp::Ordering;

use super::{LineSegmentView, Point, PointLocation};
use crate::{GeometryError, Orientation, PolygonScalar};

/// Three vertices plus, per edge (`a→b`, `b→c`, `c→a`), whether the edge lies
/// on the boundary of the shape it was cut from.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle<T> {
  pub vertices: [Point<T>; 3],
  pub boundary: [bool; 3],
}

impl<T> Triangle<T> {
  pub fn new(vertices: [Point<T>; 3], boundary: [bool; 3]) -> Triangle<T> {
    Triangle { vertices, boundary }
  }

  /// A stand-alone triangle: every edge is boundary.
  pub fn from_points(vertices: [Point<T>; 3]) -> Triangle<T> {
    Triangle::new(vertices, [true; 3])
  }

  /// Edges in order `a→b`, `b→c`, `c→a` with their boundary flags.
  pub fn edges(&self) -> [(&Point<T>, &Point<T>, bool); 3] {
    array_init(|i| (&self.vertices[i], &self.vertices[(i + 1) % 3], self.boundary[i]))
  }

  pub fn map<U, F>(&self, f: F) -> Triangle<U>
  where
    T: Clone,
    F: Fn(&Point<T>) -> Point<U>,
  {
    Triangle {
      vertices: array_init(|i| f(&self.vertices[i])),
      boundary: self.boundary,
    }
  }
}

impl<T: PolygonScalar> Triangle<T> {
  /// Counter-clockwise triangle, checked in debug builds.
  pub fn new_ccw(vertices: [Point<T>; 3], boundary: [bool; 3]) -> Triangle<T> {
    let triangle = Triangle::new(vertices, boundary);
    debug_assert_ok!(triangle.validate());
    triangle
  }

  pub fn validate(&self) -> Result<(), GeometryError> {
    if self.orientation() == Orientation::CounterClockWise {
      Ok(())
    } else {
      Err(GeometryError::ZeroArea)
    }
  }

  pub fn orientation(&self) -> Orientation {
    self.view().orientation()
  }

  pub fn is_degenerate(&self) -> bool {
    self.orientation().is_colinear()
  }

  pub fn hull(&self) -> (&Point<T>, &Point<T>) {
    self.view().hull()
  }

  pub fn locate(&self, pt: &Point<T>) -> PointLocation {
    self.view().locate(pt)
  }

  pub fn view(&self) -> TriangleView<'_, T> {
    TriangleView([&self.vertices[0], &self.vertices[1], &self.vertices[2]])
  }
}

/// Borrowed corners of a triangle.
#[derive(Debug)]
pub struct TriangleView<'a, T>(pub [&'a Point<T>; 3]);

impl<'a, T: PolygonScalar> TriangleView<'a, T> {
  pub fn new(pts: [&'a Point<T>; 3]) -> TriangleView<'a, T> {
    TriangleView(pts)
  }

  pub fn orientation(&self) -> Orientation {
    let [a, b, c] = self.0;
    a.orientation(b, c)
  }

  /// Lexicographically smallest and largest vertex. For a degenerate
  /// triangle this is the segment covering all three vertices.
  pub fn hull(&self) -> (&'a Point<T>, &'a Point<T>) {
    let [mut min, _, _] = self.0;
    let mut max = min;
    for &v in &self.0[1..] {
      if v.cmp_lex(min) == Ordering::Less {
        min = v;
      }
      if v.cmp_lex(max) == Ordering::Greater {
        max = v;
      }
    }
    (min, max)
  }

  /// Locate `pt` in the closed triangle, whatever its winding.
  pub fn locate(&self, pt: &Point<T>) -> PointLocation {
    let winding = self.orientation();
    if winding.is_colinear() {
      let (min, max) = self.hull();
      return if LineSegmentView::closed(min, max).contains(pt) {
        PointLocation::OnBoundary
      } else {
        PointLocation::Outside
      };
    }
    let [a, b, c] = self.0;
    let ab = a.orientation(b, pt);
    let bc = b.orientation(c, pt);
    let ca = c.orientation(a, pt);
    let outward = winding.reverse();
    if ab == outward || bc == outward || ca == outward {
      PointLocation::Outside
    } else if ab.is_colinear() || bc.is_colinear() || ca.is_colinear() {
      PointLocation::OnBoundary
    } else {
      PointLocation::Inside
    }
  }
}

impl Triangle<f32> {
  pub fn signed_area_2x(&self) -> f64 {
    let [a, b, c] = &self.vertices;
    let (ax, ay) = (f64::from(a.array[0]), f64::from(a.array[1]));
    let (bx, by) = (f64::from(b.array[0]), f64::from(b.array[1]));
    let (cx, cy) = (f64::from(c.array[0]), f64::from(c.array[1]));
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
  }
}
