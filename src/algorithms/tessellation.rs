//! Polygon tessellation: hole bridging followed by ear clipping.
use std::cmp::Ordering;

use tracing::debug;

use crate::algorithms::intersection::{ring_self_intersects, rings_cross};
use crate::algorithms::point_location::locate_in_rings;
use crate::data::{Line, Point, PointLocation, Polygon, Primitive, Shape, Triangle};
use crate::{GeometryError, PolygonScalar, Result};

pub mod bridge;
pub mod earclip;

/// Cuts shapes into triangles, edges and points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tessellator {
  check_self_intersections: bool,
}

impl Default for Tessellator {
  fn default() -> Self {
    Tessellator {
      check_self_intersections: true,
    }
  }
}

impl Tessellator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_self_intersection_check(mut self, check: bool) -> Self {
    self.check_self_intersections = check;
    self
  }

  /// Counter-clockwise triangles covering the polygon. Edges of the
  /// polygon's rings are flagged as boundary, edges created by the
  /// tessellation are not.
  ///
  /// # Errors
  /// `InvalidGeometry` when a ring is degenerate or, with the simplicity
  /// check enabled, when rings intersect or holes are misplaced.
  ///
  /// # Time complexity
  /// $O(n^2)$ for the ear clipping, $O(n^2)$ for the simplicity check.
  pub fn tessellate_polygon(&self, polygon: &Polygon) -> Result<Vec<Triangle<f32>>> {
    match tessellate_rings(polygon.open_rings(), self.check_self_intersections) {
      Ok(triangles) => {
        debug!(
          holes = polygon.holes().len(),
          triangles = triangles.len(),
          "tessellated polygon"
        );
        Ok(triangles)
      }
      Err(err) => {
        debug!(holes = polygon.holes().len(), %err, "rejected polygon");
        Err(err.into())
      }
    }
  }

  /// One edge primitive per pair of consecutive vertices. Zero-length edges
  /// are kept.
  pub fn tessellate_line(&self, line: &Line) -> Vec<Primitive<f32>> {
    line
      .edges()
      .map(|(a, b)| Primitive::Line(*a, *b))
      .collect()
  }

  pub fn tessellate(&self, shape: &Shape) -> Result<Vec<Primitive<f32>>> {
    match shape {
      Shape::Point(pt) => Ok(vec![Primitive::Point(*pt)]),
      Shape::Line(line) => Ok(self.tessellate_line(line)),
      Shape::Polygon(poly) => Ok(
        self
          .tessellate_polygon(poly)?
          .into_iter()
          .map(Primitive::Triangle)
          .collect(),
      ),
    }
  }
}

/// Tessellate an outer ring followed by its holes, each given without the
/// closing vertex. Works for any coordinate type with exact predicates.
pub fn tessellate_rings<T>(
  rings: Vec<Vec<Point<T>>>,
  check_self_intersections: bool,
) -> Result<Vec<Triangle<T>>, GeometryError>
where
  T: PolygonScalar,
{
  let mut rings: Vec<Vec<Point<T>>> = rings.into_iter().map(dedup_points).collect();
  validate_weakly(&rings)?;
  if check_self_intersections {
    validate_strongly(&rings)?;
  }
  let mut holes = rings.split_off(1);
  let mut outer = rings.pop().ok_or(GeometryError::InsufficientVertices)?;
  if T::cmp_ring_area(&outer) == Ordering::Less {
    outer.reverse();
  }
  for hole in holes.iter_mut() {
    if T::cmp_ring_area(hole) == Ordering::Greater {
      hole.reverse();
    }
  }
  let (merged, flags) = bridge::eliminate_holes(outer, holes)?;
  let mut triangles = Vec::new();
  for (ring, flags) in bridge::split_twin_edges(merged, flags) {
    triangles.extend(earclip::earclip(&ring, &flags)?);
  }
  Ok(triangles)
}

fn dedup_points<T: PartialEq>(mut ring: Vec<Point<T>>) -> Vec<Point<T>> {
  ring.dedup();
  while ring.len() > 1 && ring.first() == ring.last() {
    ring.pop();
  }
  ring
}

fn validate_weakly<T: PolygonScalar>(rings: &[Vec<Point<T>>]) -> Result<(), GeometryError> {
  if rings.is_empty() {
    return Err(GeometryError::InsufficientVertices);
  }
  for ring in rings {
    if ring.len() < 3 {
      return Err(GeometryError::InsufficientVertices);
    }
    if T::cmp_ring_area(ring) == Ordering::Equal {
      return Err(GeometryError::ZeroArea);
    }
  }
  Ok(())
}

fn validate_strongly<T: PolygonScalar>(rings: &[Vec<Point<T>>]) -> Result<(), GeometryError> {
  if rings.iter().any(|ring| ring_self_intersects(ring)) {
    return Err(GeometryError::SelfIntersections);
  }
  let (outer, holes) = rings.split_at(1);
  for hole in holes {
    if hole
      .iter()
      .any(|pt| locate_in_rings(outer, pt) == PointLocation::Outside)
    {
      return Err(GeometryError::HoleOutsideBoundary);
    }
    if rings_cross(&outer[0], hole) {
      return Err(GeometryError::SelfIntersections);
    }
  }
  for (i, a) in holes.iter().enumerate() {
    for b in &holes[i + 1..] {
      if rings_cross(a, b) || nested(a, b) || nested(b, a) {
        return Err(GeometryError::OverlappingHoles);
      }
    }
  }
  Ok(())
}

// Some vertex of `inner` lies strictly inside `outer`.
fn nested<T: PolygonScalar>(inner: &[Point<T>], outer: &[Point<T>]) -> bool {
  inner
    .iter()
    .any(|pt| locate_in_rings(std::slice::from_ref(&outer), pt) == PointLocation::Inside)
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;
  use crate::Error;

  use proptest::prelude::*;

  fn ring(coords: &[(f32, f32)]) -> Vec<Point<f32>> {
    let mut pts: Vec<Point<f32>> = coords.iter().map(|&(x, y)| Point::new([x, y])).collect();
    pts.push(pts[0]);
    pts
  }

  fn polygon(outer: &[(f32, f32)], holes: &[&[(f32, f32)]]) -> Polygon {
    Polygon::new(ring(outer), holes.iter().map(|h| ring(h)).collect()).unwrap()
  }

  fn area(triangles: &[Triangle<f32>]) -> f64 {
    triangles.iter().map(|t| t.signed_area_2x() / 2.0).sum()
  }

  const SQUARE: &[(f32, f32)] = &[(0., 0.), (10., 0.), (10., 10.), (0., 10.)];

  #[test]
  fn triangle_polygon() {
    let poly = polygon(&[(0., 0.), (1., 0.), (0., 1.)], &[]);
    let triangles = Tessellator::new().tessellate_polygon(&poly).unwrap();
    assert_eq!(triangles.len(), 1);
    assert_eq!(triangles[0].boundary, [true; 3]);
  }

  #[test]
  fn clockwise_input() {
    let poly = polygon(&[(0., 0.), (0., 10.), (10., 10.), (10., 0.)], &[]);
    let triangles = Tessellator::new().tessellate_polygon(&poly).unwrap();
    assert_eq!(area(&triangles), 100.0);
    assert!(triangles.iter().all(|t| t.signed_area_2x() > 0.0));
  }

  #[test]
  fn square_with_hole() {
    let poly = polygon(SQUARE, &[&[(2., 2.), (4., 2.), (4., 4.), (2., 4.)]]);
    let triangles = Tessellator::new().tessellate_polygon(&poly).unwrap();
    assert_eq!(area(&triangles), poly.area());
    let flagged: usize = triangles
      .iter()
      .map(|t| t.boundary.iter().filter(|f| **f).count())
      .sum();
    assert_eq!(flagged, 8);
  }

  #[test]
  fn hole_touching_outer_ring() {
    let poly = polygon(SQUARE, &[&[(0., 5.), (5., 8.), (5., 2.)]]);
    let triangles = Tessellator::new().tessellate_polygon(&poly).unwrap();
    assert_eq!(area(&triangles), poly.area());
  }

  fn boundary_length(triangles: &[Triangle<f32>]) -> f64 {
    triangles
      .iter()
      .flat_map(|t| t.edges())
      .filter(|(_, _, boundary)| *boundary)
      .map(|(a, b, _)| {
        let dx = f64::from(b.array[0] - a.array[0]);
        let dy = f64::from(b.array[1] - a.array[1]);
        dx.hypot(dy)
      })
      .sum()
  }

  #[test]
  fn holes_sharing_an_edge() {
    let poly = polygon(
      &[(0., 0.), (20., 0.), (20., 10.), (0., 10.)],
      &[
        &[(2., 2.), (10., 2.), (10., 8.), (2., 8.)],
        &[(10., 2.), (18., 2.), (18., 8.), (10., 8.)],
      ],
    );
    let triangles = Tessellator::new().tessellate_polygon(&poly).unwrap();
    assert_eq!(area(&triangles), 104.0);
    // The edge between the holes bounds no area.
    assert_eq!(boundary_length(&triangles), 60.0 + 22.0 + 22.0);
  }

  #[test]
  fn hole_sharing_edges_with_outer_ring() {
    let poly = polygon(SQUARE, &[&[(0., 0.), (5., 0.), (5., 5.), (0., 5.)]]);
    let triangles = Tessellator::new().tessellate_polygon(&poly).unwrap();
    assert_eq!(area(&triangles), 75.0);
    assert_eq!(boundary_length(&triangles), 40.0);
  }

  #[test]
  fn reflex_vertex_on_hole_edge() {
    let poly = polygon(
      &[(3., 0.), (-2., 3.), (-1., 0.), (-2., -3.)],
      &[&[(-1., -1.), (1., -1.), (1., 1.), (-1., 1.)]],
    );
    let triangles = Tessellator::new().tessellate_polygon(&poly).unwrap();
    assert!((area(&triangles) - 8.0).abs() < 1e-9);
    let perimeter = 2.0 * (34f64.sqrt() + 10f64.sqrt()) + 8.0;
    assert!((boundary_length(&triangles) - perimeter).abs() < 1e-6);
  }

  #[test]
  fn bow_tie_is_rejected() {
    let poly = polygon(&[(0., 0.), (10., 10.), (10., 0.), (0., 4.)], &[]);
    assert_eq!(
      Tessellator::new().tessellate_polygon(&poly),
      Err(Error::InvalidGeometry(GeometryError::SelfIntersections))
    );
  }

  #[test]
  fn hole_outside() {
    let poly = polygon(SQUARE, &[&[(20., 20.), (22., 20.), (22., 22.)]]);
    assert_eq!(
      Tessellator::new().tessellate_polygon(&poly),
      Err(Error::InvalidGeometry(GeometryError::HoleOutsideBoundary))
    );
  }

  #[test]
  fn overlapping_holes() {
    let poly = polygon(
      SQUARE,
      &[
        &[(2., 2.), (6., 2.), (6., 6.), (2., 6.)],
        &[(4., 4.), (8., 4.), (8., 8.), (4., 8.)],
      ],
    );
    assert_eq!(
      Tessellator::new().tessellate_polygon(&poly),
      Err(Error::InvalidGeometry(GeometryError::OverlappingHoles))
    );
  }

  #[test]
  fn zero_area() {
    let poly = polygon(&[(0., 0.), (5., 0.), (10., 0.)], &[]);
    assert_eq!(
      Tessellator::new().tessellate_polygon(&poly),
      Err(Error::InvalidGeometry(GeometryError::ZeroArea))
    );
  }

  #[test]
  fn repeated_vertices() {
    let poly = polygon(&[(0., 0.), (0., 0.), (10., 0.), (10., 10.), (10., 10.)], &[]);
    let triangles = Tessellator::new().tessellate_polygon(&poly).unwrap();
    assert_eq!(triangles.len(), 1);
    let poly = polygon(&[(0., 0.), (0., 0.), (10., 0.)], &[]);
    assert_eq!(
      Tessellator::new().tessellate_polygon(&poly),
      Err(Error::InvalidGeometry(GeometryError::InsufficientVertices))
    );
  }

  #[test]
  fn line_edges() {
    let line = Line::new(vec![
      Point::new([0., 0.]),
      Point::new([1., 0.]),
      Point::new([1., 0.]),
    ])
    .unwrap();
    let edges = Tessellator::new().tessellate_line(&line);
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[1], Primitive::Line(Point::new([1., 0.]), Point::new([1., 0.])));
  }

  #[test]
  fn encoded_space() {
    let rings = vec![vec![
      Point::new([0i32, 0]),
      Point::new([8, 0]),
      Point::new([8, 8]),
      Point::new([4, 2]),
      Point::new([0, 8]),
    ]];
    let triangles = tessellate_rings(rings, true).unwrap();
    assert_eq!(triangles.len(), 3);
  }

  proptest! {
    #[test]
    fn deterministic(n in 3usize..12, seed in any::<u64>()) {
      use rand::rngs::SmallRng;
      use rand::{Rng, SeedableRng};
      // A star-shaped ring: one vertex per angular sector.
      let mut rng = SmallRng::seed_from_u64(seed);
      let coords: Vec<(f32, f32)> = (0..n)
        .map(|i| {
          let angle = (i as f32 + 0.5) / n as f32 * std::f32::consts::TAU;
          let radius: f32 = rng.gen_range(1.0..100.0);
          ((angle.cos() * radius).round(), (angle.sin() * radius).round())
        })
        .collect();
      if let Ok(poly) = Polygon::new(ring(&coords), vec![]) {
        let first = Tessellator::new().tessellate_polygon(&poly);
        let second = Tessellator::new().tessellate_polygon(&poly);
        prop_assert_eq!(first, second);
      }
    }
  }
}
