//! The indexed shape seen as the union of its decoded primitives.
use num_rational::BigRational;
use std::cmp::Ordering;

use super::QueryPart;
use crate::component::sampling::{centroid, cmp_segment_distance, edge_samples, split_parameters, to_rational};
use crate::data::{LineSegmentView, Point, PointLocation, Primitive, Triangle, TriangleView};
use crate::Orientation;

/// Union of points, segments and counter-clockwise triangles.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveUnion {
  points: Vec<Point<i32>>,
  segments: Vec<(Point<i32>, Point<i32>)>,
  triangles: Vec<Triangle<i32>>,
}

impl PrimitiveUnion {
  pub fn new<'a, I>(primitives: I) -> PrimitiveUnion
  where
    I: IntoIterator<Item = &'a Primitive<i32>>,
  {
    let mut union = PrimitiveUnion::default();
    for primitive in primitives {
      match primitive {
        Primitive::Point(pt) => union.points.push(*pt),
        Primitive::Line(a, b) if a == b => union.points.push(*a),
        Primitive::Line(a, b) => union.segments.push((*a, *b)),
        Primitive::Triangle(t) => union.push_triangle(t),
      }
    }
    union
  }

  fn push_triangle(&mut self, t: &Triangle<i32>) {
    match t.orientation() {
      Orientation::CounterClockWise => self.triangles.push(t.clone()),
      Orientation::ClockWise => {
        let [a, b, c] = t.vertices;
        let [ab, bc, ca] = t.boundary;
        self.triangles.push(Triangle::new([a, c, b], [ca, bc, ab]));
      }
      Orientation::CoLinear => {
        let (min, max) = t.hull();
        if min == max {
          self.points.push(*min);
        } else {
          self.segments.push((*min, *max));
        }
      }
    }
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty() && self.segments.is_empty() && self.triangles.is_empty()
  }

  // Every edge that may cut a query segment into pieces of constant coverage.
  fn all_edges(&self) -> impl Iterator<Item = (&Point<i32>, &Point<i32>)> + '_ {
    self.segments.iter().map(|(a, b)| (a, b)).chain(
      self
        .triangles
        .iter()
        .flat_map(|t| t.edges().map(|(a, b, _)| (a, b))),
    )
  }

  // Edges on the boundary of the union: flagged triangle edges and all
  // segments.
  fn blocking_edges(&self) -> impl Iterator<Item = (&Point<i32>, &Point<i32>)> + '_ {
    self.segments.iter().map(|(a, b)| (a, b)).chain(
      self.triangles.iter().flat_map(|t| {
        t.edges()
          .into_iter()
          .filter(|(_, _, flag)| *flag)
          .map(|(a, b, _)| (a, b))
      }),
    )
  }

  pub fn covers_point(&self, pt: &Point<i32>) -> bool {
    self.points.iter().any(|p| p == pt)
      || self
        .segments
        .iter()
        .any(|(a, b)| LineSegmentView::closed(a, b).contains(pt))
      || self.triangles.iter().any(|t| t.locate(pt).is_covered())
  }

  fn covers_rational(&self, pt: &Point<BigRational>) -> bool {
    let rational = |p: &Point<i32>| to_rational(p);
    self.points.iter().any(|p| &rational(p) == pt)
      || self.segments.iter().any(|(a, b)| {
        let (a, b) = (rational(a), rational(b));
        LineSegmentView::closed(&a, &b).contains(pt)
      })
      || self.in_area(pt)
  }

  fn in_area(&self, pt: &Point<BigRational>) -> bool {
    self.triangles.iter().any(|t| {
      let [a, b, c] = &t.vertices;
      let (a, b, c) = (to_rational(a), to_rational(b), to_rational(c));
      TriangleView::new([&a, &b, &c]).locate(pt) != PointLocation::Outside
    })
  }

  pub fn covers_segment(&self, a: &Point<i32>, b: &Point<i32>) -> bool {
    if a == b {
      return self.covers_point(a);
    }
    let params = split_parameters(a, b, self.all_edges());
    edge_samples(a, b, &params)
      .iter()
      .all(|sample| self.covers_rational(sample))
  }

  pub fn covers_triangle(&self, tri: &Triangle<i32>) -> bool {
    let view = tri.view();
    match view.orientation() {
      Orientation::CoLinear => {
        let (min, max) = view.hull();
        return self.covers_segment(min, max);
      }
      Orientation::ClockWise | Orientation::CounterClockWise => {}
    }
    let [a, b, c] = &tri.vertices;
    let edges_covered = [(a, b), (b, c), (c, a)]
      .iter()
      .all(|(p, q)| self.covers_segment(p, q));
    edges_covered
      && !self
        .blocking_edges()
        .any(|(p, q)| meets_open_triangle(p, q, [a, b, c]))
      && self.in_area(&centroid([a, b, c]))
  }

  pub fn covers_disk(&self, center: &Point<i32>, radius: i64) -> bool {
    if radius == 0 {
      return self.covers_point(center);
    }
    self.in_area(&to_rational(center))
      && self
        .blocking_edges()
        .all(|(a, b)| cmp_segment_distance(a, b, center, radius) != Ordering::Less)
  }

  pub fn covers(&self, part: &QueryPart) -> bool {
    match part {
      QueryPart::Point(pt) => self.covers_point(pt),
      QueryPart::Segment(a, b) => self.covers_segment(a, b),
      QueryPart::Triangle(t) => self.covers_triangle(t),
      QueryPart::Disk { center, radius } => self.covers_disk(center, *radius),
    }
  }
}

// Does the closed segment `p-q` meet the interior of the triangle? The two are
// apart exactly when a triangle edge or the segment's own line separates them.
fn meets_open_triangle(p: &Point<i32>, q: &Point<i32>, tri: [&Point<i32>; 3]) -> bool {
  let view = TriangleView::new(tri);
  let winding = view.orientation();
  if p == q {
    return view.locate(p) == PointLocation::Inside;
  }
  let separated_by_edge = (0..3).any(|i| {
    let (u, v) = (tri[i], tri[(i + 1) % 3]);
    let outward = |pt: &Point<i32>| u.orientation(v, pt) != winding;
    outward(p) && outward(q)
  });
  if separated_by_edge {
    return false;
  }
  let sides: Vec<Orientation> = tri.iter().map(|v| p.orientation(q, v)).collect();
  let all_left = sides.iter().all(|o| !o.is_cw());
  let all_right = sides.iter().all(|o| !o.is_ccw());
  !(all_left || all_right)
}
