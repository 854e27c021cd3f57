// Strategies for shapes and query geometries, and a brute-force validator.
//
// Most coordinates are small integers so every vertex lands exactly on the
// encoding grid. The fractional strategies land between grid steps, which
// both sides of a comparison quantize the same way.
use proptest::arbitrary::*;
use proptest::collection::*;
use proptest::prelude::*;
use proptest::strategy::*;
use std::cmp::Ordering;

use crate::algorithms::{locate_in_rings, Tessellator};
use crate::component::{Component2D, Relation};
use crate::data::{
  Circle, Line, Point, PointLocation, Polygon, Primitive, QueryGeometry, Rectangle, Shape,
};
use crate::encoding::Encoder;
use crate::relation::QueryRelation;
use crate::ShapeConfig;

///////////////////////////////////////////////////////////////////////////////
// Arbitrary Point

impl<T: Arbitrary> Arbitrary for Point<T>
where
  T::Parameters: Clone,
{
  type Strategy = Map<(T::Strategy, T::Strategy), fn((T, T)) -> Point<T>>;
  type Parameters = T::Parameters;
  fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
    (any_with::<T>(params.clone()), any_with::<T>(params)).prop_map(|(x, y)| Point::new([x, y]))
  }
}

///////////////////////////////////////////////////////////////////////////////
// Shapes

pub fn grid_point(range: std::ops::RangeInclusive<i32>) -> impl Strategy<Value = Point<f32>> {
  (range.clone(), range).prop_map(|(x, y)| Point::new([x as f32, y as f32]))
}

/// A point whose coordinates fall between encoding steps.
pub fn fractional_point(range: std::ops::Range<f32>) -> impl Strategy<Value = Point<f32>> {
  (range.clone(), range).prop_map(|(x, y)| Point::new([x, y]))
}

pub fn line() -> impl Strategy<Value = Line> {
  vec(grid_point(-20..=20), 2..6).prop_map(|points| Line::new(points).unwrap())
}

pub fn fractional_line() -> impl Strategy<Value = Line> {
  vec(fractional_point(-20.0..20.0), 2..6).prop_map(|points| Line::new(points).unwrap())
}

/// An indexed line and a query line starting at one of its vertices.
pub fn line_sharing_vertex() -> impl Strategy<Value = (Line, Line)> {
  (line(), any::<prop::sample::Index>(), grid_point(-20..=20)).prop_map(|(indexed, at, end)| {
    let start = *at.get(indexed.points());
    let query = Line::new(vec![start, end]).unwrap();
    (indexed, query)
  })
}

fn cross(a: (i32, i32), b: (i32, i32)) -> i64 {
  i64::from(a.0) * i64::from(b.1) - i64::from(a.1) * i64::from(b.0)
}

// Angular order of offsets around the origin, starting at the positive x axis.
fn cmp_angle(a: (i32, i32), b: (i32, i32)) -> Ordering {
  let lower = |d: (i32, i32)| d.1 < 0 || (d.1 == 0 && d.0 < 0);
  lower(a)
    .cmp(&lower(b))
    .then_with(|| 0.cmp(&cross(a, b)))
}

fn closed(mut ring: Vec<Point<f32>>) -> Vec<Point<f32>> {
  ring.push(ring[0]);
  ring
}

fn cell_ring(min: (i32, i32), side: i32) -> Vec<Point<f32>> {
  let (x, y) = min;
  [(x, y), (x + side, y), (x + side, y + side), (x, y + side)]
    .iter()
    .map(|&(x, y)| Point::new([x as f32, y as f32]))
    .collect()
}

// Vertices sorted by angle around `center`. The hole is a small square around
// the center, kept only when it sits strictly inside the outer ring.
fn star_polygon(center: (i32, i32), mut offsets: Vec<(i32, i32)>, with_hole: bool) -> Option<Polygon> {
  offsets.retain(|&d| d != (0, 0));
  offsets.sort_by(|&a, &b| cmp_angle(a, b));
  offsets.dedup_by(|a, b| cmp_angle(*a, *b) == Ordering::Equal);
  if offsets.len() < 3 {
    return None;
  }
  let outer: Vec<Point<f32>> = offsets
    .iter()
    .map(|&(dx, dy)| Point::new([(center.0 + dx) as f32, (center.1 + dy) as f32]))
    .collect();
  let tessellator = Tessellator::new();
  let plain = Polygon::new(closed(outer.clone()), vec![]).ok()?;
  tessellator.tessellate_polygon(&plain).ok()?;
  if with_hole {
    let hole = cell_ring((center.0 - 1, center.1 - 1), 2);
    let strictly_inside = hole
      .iter()
      .all(|pt| locate_in_rings(std::slice::from_ref(&outer), pt) == PointLocation::Inside);
    if strictly_inside {
      let holed = Polygon::new(closed(outer), vec![closed(hole)]).ok()?;
      if tessellator.tessellate_polygon(&holed).is_ok() {
        return Some(holed);
      }
    }
  }
  Some(plain)
}

pub fn polygon() -> impl Strategy<Value = Polygon> {
  (
    (-10i32..=10, -10i32..=10),
    vec((-15i32..=15, -15i32..=15), 3..10),
    any::<bool>(),
  )
    .prop_filter_map("not a simple star polygon", |(center, offsets, with_hole)| {
      star_polygon(center, offsets, with_hole)
    })
}

/// A rectangle of square cells where the picked cells are holes. Picked
/// neighbours share edges or corners with each other, and picked border cells
/// share edges with the outer ring.
pub fn polygon_with_touching_holes() -> impl Strategy<Value = Polygon> {
  (
    (-12i32..=4, -12i32..=4),
    2i32..=3,
    2i32..=3,
    1i32..=3,
    vec(any::<bool>(), 9),
  )
    .prop_filter_map("no hole or nothing left", |(corner, cols, rows, side, picks)| {
      let cells: Vec<(i32, i32)> = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (c, r)))
        .collect();
      let picked: Vec<(i32, i32)> = cells
        .iter()
        .zip(&picks)
        .filter(|&(_, &hole)| hole)
        .map(|(&cell, _)| cell)
        .collect();
      if picked.is_empty() || picked.len() == cells.len() {
        return None;
      }
      let at = |(c, r): (i32, i32)| (corner.0 + c * side, corner.1 + r * side);
      let outer: Vec<Point<f32>> = [(0, 0), (cols, 0), (cols, rows), (0, rows)]
        .iter()
        .map(|&cell| {
          let (x, y) = at(cell);
          Point::new([x as f32, y as f32])
        })
        .collect();
      let holes = picked
        .into_iter()
        .map(|cell| closed(cell_ring(at(cell), side)))
        .collect();
      Polygon::new(closed(outer), holes).ok()
    })
}

pub fn shape() -> impl Strategy<Value = Shape> {
  prop_oneof![
    grid_point(-20..=20).prop_map(Shape::Point),
    fractional_point(-20.0..20.0).prop_map(Shape::Point),
    line().prop_map(Shape::Line),
    fractional_line().prop_map(Shape::Line),
    polygon().prop_map(Shape::Polygon),
    polygon_with_touching_holes().prop_map(Shape::Polygon),
  ]
}

///////////////////////////////////////////////////////////////////////////////
// Query geometries

pub fn rectangle() -> impl Strategy<Value = Rectangle> {
  (-25i32..=20, -25i32..=20, 1i32..=20, 1i32..=20).prop_map(|(x, y, w, h)| {
    Rectangle::new(x as f32, (x + w) as f32, y as f32, (y + h) as f32).unwrap()
  })
}

pub fn fractional_rectangle() -> impl Strategy<Value = Rectangle> {
  (-25.0f32..20.0, -25.0f32..20.0, 0.5f32..20.0, 0.5f32..20.0)
    .prop_map(|(x, y, w, h)| Rectangle::new(x, x + w, y, y + h).unwrap())
}

pub fn circle() -> impl Strategy<Value = Circle> {
  (grid_point(-20..=20), 1i32..=15).prop_map(|(center, r)| Circle::new(center, r as f32).unwrap())
}

pub fn fractional_circle() -> impl Strategy<Value = Circle> {
  (fractional_point(-20.0..20.0), 0.5f32..15.0)
    .prop_map(|(center, r)| Circle::new(center, r).unwrap())
}

pub fn query_geometry() -> impl Strategy<Value = QueryGeometry> {
  prop_oneof![
    grid_point(-20..=20).prop_map(QueryGeometry::Point),
    fractional_point(-20.0..20.0).prop_map(QueryGeometry::Point),
    line().prop_map(QueryGeometry::Line),
    fractional_line().prop_map(QueryGeometry::Line),
    polygon().prop_map(QueryGeometry::Polygon),
    polygon_with_touching_holes().prop_map(QueryGeometry::Polygon),
    rectangle().prop_map(QueryGeometry::Rectangle),
    fractional_rectangle().prop_map(QueryGeometry::Rectangle),
    circle().prop_map(QueryGeometry::Circle),
    fractional_circle().prop_map(QueryGeometry::Circle),
  ]
}

///////////////////////////////////////////////////////////////////////////////
// Validator

/// Decides a query relation the slow way: the shape is tessellated and
/// quantized directly, without going through records, and CONTAINS turns the
/// question around by viewing the shape as the component and re-tessellating
/// the query.
pub struct Validator {
  encoder: Encoder,
  tessellator: Tessellator,
  relation: QueryRelation,
}

impl Validator {
  pub fn new(config: &ShapeConfig, relation: QueryRelation) -> Validator {
    Validator {
      encoder: config.encoder().unwrap(),
      tessellator: config.tessellator(),
      relation,
    }
  }

  pub fn test_component_query(&self, query: &QueryGeometry, shape: &Shape) -> bool {
    match self.relation {
      QueryRelation::Contains => self.shape_contains(query, shape),
      relation => {
        let component = Component2D::from_query(query, &self.encoder).unwrap();
        let relations: Vec<Relation> = self
          .tessellator
          .tessellate(shape)
          .unwrap()
          .iter()
          .map(|p| component.relate(&self.encoder.encode_primitive(p).unwrap()))
          .collect();
        let mut touched = false;
        let mut escaped = false;
        for r in &relations {
          match r {
            Relation::Inside => touched = true,
            Relation::Crosses => {
              touched = true;
              escaped = true;
            }
            Relation::Outside => escaped = true,
          }
        }
        match relation {
          QueryRelation::Intersects => touched,
          QueryRelation::Disjoint => !touched,
          _ => !relations.is_empty() && !escaped,
        }
      }
    }
  }

  fn shape_contains(&self, query: &QueryGeometry, shape: &Shape) -> bool {
    let enc = &self.encoder;
    let component = Component2D::from_shape(shape, enc).unwrap();
    match query {
      QueryGeometry::Point(pt) => {
        component.relate_point(&enc.encode_point(pt).unwrap()) == Relation::Inside
      }
      QueryGeometry::Line(line) => line.edges().all(|(a, b)| {
        component.relate_edge(&enc.encode_point(a).unwrap(), &enc.encode_point(b).unwrap())
          == Relation::Inside
      }),
      QueryGeometry::Rectangle(rect) => {
        component.relate_box(
          enc.encode(rect.min_x).unwrap(),
          enc.encode(rect.max_x).unwrap(),
          enc.encode(rect.min_y).unwrap(),
          enc.encode(rect.max_y).unwrap(),
        ) == Relation::Inside
      }
      QueryGeometry::Polygon(poly) => self
        .tessellator
        .tessellate_polygon(poly)
        .unwrap()
        .iter()
        .all(|t| {
          let t = enc.encode_triangle(t).unwrap();
          component.relate(&Primitive::Triangle(t)) == Relation::Inside
        }),
      QueryGeometry::Circle(circle) => component.contains_disk(
        &enc.encode_point(&circle.center).unwrap(),
        enc.encode_distance(circle.radius).unwrap(),
      ),
    }
  }
}
