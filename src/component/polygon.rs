use num_rational::BigRational;
use std::cmp::Ordering;

use super::sampling::{centroid, cmp_segment_distance, edge_samples, split_parameters, to_rational};
use super::{Relate, Relation};
use crate::algorithms::intersection::ring_edges;
use crate::algorithms::tessellation::bridge::split_at_touching_vertices;
use crate::algorithms::{locate_in_rings, tessellate_rings};
use crate::data::{LineSegmentView, Point, PointLocation, Polygon, TriangleView};
use crate::encoding::{EncodedBox, Encoder};
use crate::{Error, PolygonScalar, Result};

/// A query polygon with holes, located with the even-odd rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonComponent {
  rings: Vec<Vec<Point<i32>>>,
  rational_rings: Vec<Vec<Point<BigRational>>>,
  // One point strictly inside each hole.
  hole_samples: Vec<Point<BigRational>>,
  // Ring edges that bound area, kept only when some edges do not.
  region_edges: Option<Vec<[Point<BigRational>; 2]>>,
  bbox: EncodedBox,
}

impl PolygonComponent {
  pub fn new(polygon: &Polygon, encoder: &Encoder) -> Result<PolygonComponent> {
    let rings = encode_rings(polygon, encoder)?;
    let hole_samples = rings[1..]
      .iter()
      .map(|hole| interior_sample(hole))
      .collect::<Result<Vec<_>>>()?;
    let rational_rings = rings
      .iter()
      .map(|ring| ring.iter().map(to_rational).collect())
      .collect();
    let region_edges = region_edges(&rings);
    let bbox = EncodedBox::bounding(&rings[0]).ok_or(Error::DegenerateComponent("polygon has no area"))?;
    Ok(PolygonComponent {
      rings,
      rational_rings,
      hole_samples,
      region_edges,
      bbox,
    })
  }

  fn edges(&self) -> impl Iterator<Item = (&Point<i32>, &Point<i32>)> + '_ {
    self.rings.iter().flat_map(|ring| ring_edges(ring))
  }

  // A boundary point is covered when it touches an edge with area next to
  // it. Edges shared by two rings separate two holes, or a hole from the
  // outside, and cover nothing beyond their ends.
  fn covers_rational(&self, pt: &Point<BigRational>) -> bool {
    match locate_in_rings(&self.rational_rings, pt) {
      PointLocation::Inside => true,
      PointLocation::Outside => false,
      PointLocation::OnBoundary => self.region_edges.as_ref().map_or(true, |edges| {
        edges
          .iter()
          .any(|[a, b]| LineSegmentView::closed(a, b).contains(pt))
      }),
    }
  }
}

// The ring edges that bound area, or `None` when all of them do. Rings are
// first split where they touch so shared stretches become whole edges.
fn region_edges(rings: &[Vec<Point<i32>>]) -> Option<Vec<[Point<BigRational>; 2]>> {
  let mut split = rings.to_vec();
  if let Some((outer, holes)) = split.split_first_mut() {
    split_at_touching_vertices(outer, holes);
  }
  let edges: Vec<(usize, &Point<i32>, &Point<i32>)> = split
    .iter()
    .enumerate()
    .flat_map(|(k, ring)| ring_edges(ring).map(move |(a, b)| (k, a, b)))
    .collect();
  let shared = |&(k, a, b): &(usize, &Point<i32>, &Point<i32>)| {
    edges
      .iter()
      .any(|&(other, c, d)| other != k && ((c == a && d == b) || (c == b && d == a)))
  };
  if !edges.iter().any(|edge| shared(edge)) {
    return None;
  }
  Some(
    edges
      .iter()
      .filter(|&edge| !shared(edge))
      .map(|&(_, a, b)| [to_rational(a), to_rational(b)])
      .collect(),
  )
}

/// Quantize the rings of `polygon`, outer ring first.
///
/// Repeated vertices collapse, and holes left without area remove nothing so
/// they are dropped.
///
/// # Errors
/// `DegenerateComponent` when the outer ring has no area once quantized.
pub(crate) fn encode_rings(polygon: &Polygon, encoder: &Encoder) -> Result<Vec<Vec<Point<i32>>>> {
  let mut rings = Vec::with_capacity(polygon.holes().len() + 1);
  for ring in polygon.open_rings() {
    let mut encoded = ring
      .iter()
      .map(|pt| encoder.encode_point(pt))
      .collect::<Result<Vec<_>>>()?;
    encoded.dedup();
    while encoded.len() > 1 && encoded.first() == encoded.last() {
      encoded.pop();
    }
    rings.push(encoded);
  }
  match rings.first() {
    Some(outer) if outer.len() >= 3 && i32::cmp_ring_area(outer) != Ordering::Equal => {}
    _ => return Err(Error::DegenerateComponent("polygon has no area")),
  }
  rings.retain(|ring| ring.len() >= 3 && i32::cmp_ring_area(ring) != Ordering::Equal);
  Ok(rings)
}

fn interior_sample(hole: &[Point<i32>]) -> Result<Point<BigRational>> {
  let triangles = tessellate_rings(vec![hole.to_vec()], false)?;
  triangles
    .iter()
    .find(|t| !t.is_degenerate())
    .map(|t| {
      let [a, b, c] = &t.vertices;
      centroid([a, b, c])
    })
    .ok_or(Error::DegenerateComponent("polygon hole has no area"))
}

impl Relate for PolygonComponent {
  fn bbox(&self) -> EncodedBox {
    self.bbox
  }

  fn contains_point(&self, pt: &Point<i32>) -> bool {
    match self.region_edges {
      None => locate_in_rings(&self.rings, pt).is_covered(),
      Some(_) => self.covers_rational(&to_rational(pt)),
    }
  }

  // The edge is cut wherever it meets a ring edge. Every piece lies either
  // inside or outside, so one sample per piece decides it.
  fn relate_segment(&self, a: &Point<i32>, b: &Point<i32>) -> Relation {
    let params = split_parameters(a, b, self.edges());
    let mut inside = false;
    let mut outside = false;
    for sample in edge_samples(a, b, &params) {
      if self.covers_rational(&sample) {
        inside = true;
      } else {
        outside = true;
      }
      if inside && outside {
        return Relation::Crosses;
      }
    }
    if outside {
      Relation::Outside
    } else {
      Relation::Inside
    }
  }

  fn relate_ccw_triangle(&self, tri: [&Point<i32>; 3]) -> Relation {
    let relations: Vec<Relation> = (0..3)
      .map(|i| self.relate_segment(tri[i], tri[(i + 1) % 3]))
      .collect();
    if relations.iter().all(|r| *r == Relation::Inside) {
      // A hole may still sit inside the triangle.
      let corners: Vec<Point<BigRational>> = tri.iter().map(|pt| to_rational(pt)).collect();
      let view = TriangleView::new([&corners[0], &corners[1], &corners[2]]);
      if self
        .hole_samples
        .iter()
        .any(|s| view.locate(s) != PointLocation::Outside)
      {
        Relation::Crosses
      } else {
        Relation::Inside
      }
    } else if relations.iter().any(|r| *r != Relation::Outside) {
      Relation::Crosses
    } else if TriangleView::new(tri).locate(&self.rings[0][0]).is_covered() {
      // The whole polygon lies inside the triangle.
      Relation::Crosses
    } else {
      Relation::Outside
    }
  }

  fn contains_disk(&self, center: &Point<i32>, radius: i64) -> bool {
    self.contains_point(center)
      && self
        .edges()
        .all(|(a, b)| cmp_segment_distance(a, b, center, radius) != Ordering::Less)
  }
}
