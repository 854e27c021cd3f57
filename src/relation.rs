//! Folding per-primitive relations into a query verdict.
use std::fmt;
use std::str::FromStr;

use crate::algorithms::tessellate_rings;
use crate::component::{encode_rings, Component2D, Relation};
use crate::data::{Point, Primitive, QueryGeometry, Triangle};
use crate::encoding::{EncodedBox, Encoder};
use crate::{Error, Result};

mod coverage;

pub use coverage::PrimitiveUnion;

/// The spatial relation a query asks for, read as "indexed shape `R` query".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryRelation {
  /// The shape and the query share at least one point.
  Intersects,
  /// The shape lies in the query.
  Within,
  /// The shape holds the whole query.
  Contains,
  /// The shape and the query share no point.
  Disjoint,
}

impl QueryRelation {
  /// Fold the relations of the shape's primitives to the query component.
  ///
  /// `Contains` cannot be decided this way and always yields false here; use
  /// [`evaluate`].
  pub fn fold<I>(self, relations: I) -> bool
  where
    I: IntoIterator<Item = Relation>,
  {
    let mut relations = relations.into_iter();
    match self {
      QueryRelation::Intersects => relations.any(|r| r != Relation::Outside),
      QueryRelation::Disjoint => relations.all(|r| r == Relation::Outside),
      QueryRelation::Within => {
        let mut seen = false;
        for r in relations {
          if r != Relation::Inside {
            return false;
          }
          seen = true;
        }
        seen
      }
      QueryRelation::Contains => false,
    }
  }
}

/// A piece of the query geometry in the encoded space.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryPart {
  Point(Point<i32>),
  Segment(Point<i32>, Point<i32>),
  Triangle(Triangle<i32>),
  Disk { center: Point<i32>, radius: i64 },
}

/// Cut a query geometry into parts whose union is the geometry.
///
/// Rectangles become two triangles, polygons are tessellated, lines become
/// their edges and circles stay whole.
pub fn query_parts(geometry: &QueryGeometry, encoder: &Encoder) -> Result<Vec<QueryPart>> {
  Ok(match geometry {
    QueryGeometry::Point(pt) => vec![QueryPart::Point(encoder.encode_point(pt)?)],
    QueryGeometry::Line(line) => {
      let points = line
        .points()
        .iter()
        .map(|pt| encoder.encode_point(pt))
        .collect::<Result<Vec<_>>>()?;
      points
        .windows(2)
        .map(|w| QueryPart::Segment(w[0], w[1]))
        .collect()
    }
    QueryGeometry::Rectangle(rect) => {
      let [ll, lr, ur, ul] = EncodedBox {
        min_x: encoder.encode(rect.min_x)?,
        max_x: encoder.encode(rect.max_x)?,
        min_y: encoder.encode(rect.min_y)?,
        max_y: encoder.encode(rect.max_y)?,
      }
      .corners();
      vec![
        QueryPart::Triangle(Triangle::from_points([ll, lr, ur])),
        QueryPart::Triangle(Triangle::from_points([ll, ur, ul])),
      ]
    }
    QueryGeometry::Polygon(poly) => {
      let rings = encode_rings(poly, encoder)?;
      tessellate_rings(rings, false)?
        .into_iter()
        .map(QueryPart::Triangle)
        .collect()
    }
    QueryGeometry::Circle(circle) => vec![QueryPart::Disk {
      center: encoder.encode_point(&circle.center)?,
      radius: encoder.encode_distance(circle.radius)?,
    }],
  })
}

/// Decide `relation` between the indexed shape made of `primitives` and the
/// query.
///
/// Intersects, Within and Disjoint fold `component.relate` over the
/// primitives. Contains asks the reverse question: every query part must be
/// covered by the union of the primitives.
pub fn evaluate(
  relation: QueryRelation,
  component: &Component2D,
  parts: &[QueryPart],
  primitives: &[Primitive<i32>],
) -> bool {
  match relation {
    QueryRelation::Contains => {
      let union = PrimitiveUnion::new(primitives);
      !union.is_empty() && !parts.is_empty() && parts.iter().all(|part| union.covers(part))
    }
    _ => relation.fold(primitives.iter().map(|p| component.relate(p))),
  }
}

impl fmt::Display for QueryRelation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      QueryRelation::Intersects => "intersects",
      QueryRelation::Within => "within",
      QueryRelation::Contains => "contains",
      QueryRelation::Disjoint => "disjoint",
    };
    f.write_str(name)
  }
}

impl FromStr for QueryRelation {
  type Err = Error;

  fn from_str(s: &str) -> Result<QueryRelation> {
    match s.to_ascii_lowercase().as_str() {
      "intersects" => Ok(QueryRelation::Intersects),
      "within" => Ok(QueryRelation::Within),
      "contains" => Ok(QueryRelation::Contains),
      "disjoint" => Ok(QueryRelation::Disjoint),
      _ => Err(Error::UnknownRelation(s.to_string())),
    }
  }
}
