//! Query-side geometries in the encoded integer space.
//!
//! A [`Component2D`] answers how a single indexed primitive relates to the
//! query geometry. All sets are closed: a primitive touching the query
//! intersects it, and a primitive lying on the query's boundary is inside it.
use crate::data::{LineSegmentView, Point, PointLocation, Primitive, QueryGeometry, Shape, Triangle, TriangleView};
use crate::encoding::{EncodedBox, Encoder};
use crate::{Orientation, Result};

mod circle;
mod line;
mod point;
mod polygon;
mod rectangle;
pub(crate) mod sampling;

pub use circle::CircleComponent;
pub use line::LineComponent;
pub use point::PointComponent;
pub use polygon::PolygonComponent;
pub(crate) use polygon::encode_rings;
pub use rectangle::RectangleComponent;

/// How an indexed primitive relates to a query geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
  /// The primitive lies in the closed query geometry.
  Inside,
  /// The primitive does not touch the query geometry.
  Outside,
  /// Anything else.
  Crosses,
}

// Shared by all components. Callers have already filtered by bounding box,
// segments have distinct endpoints and triangles are counter-clockwise.
trait Relate {
  fn bbox(&self) -> EncodedBox;
  fn contains_point(&self, pt: &Point<i32>) -> bool;
  fn relate_segment(&self, a: &Point<i32>, b: &Point<i32>) -> Relation;
  fn relate_ccw_triangle(&self, tri: [&Point<i32>; 3]) -> Relation;
  fn contains_disk(&self, center: &Point<i32>, radius: i64) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component2D {
  Point(PointComponent),
  Rectangle(RectangleComponent),
  Line(LineComponent),
  Polygon(PolygonComponent),
  Circle(CircleComponent),
}

impl Component2D {
  /// Quantize a query geometry.
  ///
  /// # Errors
  /// `DegenerateComponent` when a rectangle or circle collapses to a single
  /// point, or a polygon's outer ring has no area once quantized.
  /// `EncodingOverflow` when a coordinate is out of range.
  pub fn from_query(geometry: &QueryGeometry, encoder: &Encoder) -> Result<Component2D> {
    Ok(match geometry {
      QueryGeometry::Point(pt) => Component2D::Point(PointComponent::new(pt, encoder)?),
      QueryGeometry::Line(line) => Component2D::Line(LineComponent::new(line, encoder)?),
      QueryGeometry::Polygon(poly) => Component2D::Polygon(PolygonComponent::new(poly, encoder)?),
      QueryGeometry::Rectangle(rect) => {
        Component2D::Rectangle(RectangleComponent::new(rect, encoder)?)
      }
      QueryGeometry::Circle(circle) => Component2D::Circle(CircleComponent::new(circle, encoder)?),
    })
  }

  /// View an indexed shape as a component.
  pub fn from_shape(shape: &Shape, encoder: &Encoder) -> Result<Component2D> {
    Component2D::from_query(&QueryGeometry::from(shape.clone()), encoder)
  }

  fn inner(&self) -> &dyn Relate {
    match self {
      Component2D::Point(c) => c,
      Component2D::Rectangle(c) => c,
      Component2D::Line(c) => c,
      Component2D::Polygon(c) => c,
      Component2D::Circle(c) => c,
    }
  }

  pub fn bbox(&self) -> EncodedBox {
    self.inner().bbox()
  }

  /// Bounding box pre-filter: true when the box cannot touch this component.
  pub fn disjoint_from_bbox(&self, min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> bool {
    let other = EncodedBox {
      min_x,
      max_x,
      min_y,
      max_y,
    };
    !self.bbox().intersects(&other)
  }

  pub fn contains_point(&self, x: i32, y: i32) -> bool {
    let pt = Point::new([x, y]);
    self.bbox().contains(&pt) && self.inner().contains_point(&pt)
  }

  pub fn relate(&self, primitive: &Primitive<i32>) -> Relation {
    match primitive {
      Primitive::Point(pt) => self.relate_point(pt),
      Primitive::Line(a, b) => self.relate_edge(a, b),
      Primitive::Triangle(t) => self.relate_triangle(t),
    }
  }

  pub fn relate_point(&self, pt: &Point<i32>) -> Relation {
    if self.contains_point(pt.array[0], pt.array[1]) {
      Relation::Inside
    } else {
      Relation::Outside
    }
  }

  /// Relation of the closed segment `a-b`. A zero-length edge is a point.
  pub fn relate_edge(&self, a: &Point<i32>, b: &Point<i32>) -> Relation {
    if a == b {
      return self.relate_point(a);
    }
    match EncodedBox::bounding([a, b]) {
      Some(bbox) if bbox.intersects(&self.bbox()) => self.inner().relate_segment(a, b),
      _ => Relation::Outside,
    }
  }

  /// Relation of the closed triangle, in either winding. A triangle without
  /// area is related as the segment spanning its vertices.
  pub fn relate_triangle(&self, triangle: &Triangle<i32>) -> Relation {
    let [a, b, c] = &triangle.vertices;
    self.relate_corners([a, b, c])
  }

  fn relate_corners(&self, [a, b, c]: [&Point<i32>; 3]) -> Relation {
    let view = TriangleView::new([a, b, c]);
    match view.orientation() {
      Orientation::CoLinear => {
        let (min, max) = view.hull();
        self.relate_edge(min, max)
      }
      winding => match EncodedBox::bounding([a, b, c]) {
        Some(bbox) if bbox.intersects(&self.bbox()) => {
          if winding.is_ccw() {
            self.inner().relate_ccw_triangle([a, b, c])
          } else {
            self.inner().relate_ccw_triangle([a, c, b])
          }
        }
        _ => Relation::Outside,
      },
    }
  }

  /// Relation of an index cell. Used to prune whole subtrees of the index.
  pub fn relate_box(&self, min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Relation {
    if self.disjoint_from_bbox(min_x, max_x, min_y, max_y) {
      return Relation::Outside;
    }
    let [ll, lr, ur, ul] = EncodedBox {
      min_x,
      max_x,
      min_y,
      max_y,
    }
    .corners();
    let lower = self.relate_corners([&ll, &lr, &ur]);
    let upper = self.relate_corners([&ll, &ur, &ul]);
    match (lower, upper) {
      (Relation::Inside, Relation::Inside) => Relation::Inside,
      (Relation::Outside, Relation::Outside) => Relation::Outside,
      _ => Relation::Crosses,
    }
  }

  /// Does the component contain the closed disk?
  pub fn contains_disk(&self, center: &Point<i32>, radius: i64) -> bool {
    if radius == 0 {
      return self.contains_point(center.array[0], center.array[1]);
    }
    self.inner().contains_disk(center, radius)
  }
}

// Does the closed segment touch the closed counter-clockwise triangle?
pub(crate) fn segment_meets_triangle(a: &Point<i32>, b: &Point<i32>, tri: [&Point<i32>; 3]) -> bool {
  let view = TriangleView::new(tri);
  if view.locate(a).is_covered() || view.locate(b).is_covered() {
    return true;
  }
  let segment = LineSegmentView::closed(a, b);
  (0..3).any(|i| segment.intersects(&LineSegmentView::closed(tri[i], tri[(i + 1) % 3])))
}

// Is `pt` inside or on the counter-clockwise triangle?
pub(crate) fn triangle_covers(tri: [&Point<i32>; 3], pt: &Point<i32>) -> bool {
  TriangleView::new(tri).locate(pt) != PointLocation::Outside
}
