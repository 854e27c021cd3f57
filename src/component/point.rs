use super::{triangle_covers, Relate, Relation};
use crate::data::{LineSegmentView, Point};
use crate::encoding::{EncodedBox, Encoder};
use crate::Result;

/// A single query point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointComponent {
  point: Point<i32>,
}

impl PointComponent {
  pub fn new(pt: &Point<f32>, encoder: &Encoder) -> Result<PointComponent> {
    Ok(PointComponent {
      point: encoder.encode_point(pt)?,
    })
  }
}

impl Relate for PointComponent {
  fn bbox(&self) -> EncodedBox {
    let [x, y] = self.point.array;
    EncodedBox {
      min_x: x,
      max_x: x,
      min_y: y,
      max_y: y,
    }
  }

  fn contains_point(&self, pt: &Point<i32>) -> bool {
    pt == &self.point
  }

  fn relate_segment(&self, a: &Point<i32>, b: &Point<i32>) -> Relation {
    if LineSegmentView::closed(a, b).contains(&self.point) {
      Relation::Crosses
    } else {
      Relation::Outside
    }
  }

  fn relate_ccw_triangle(&self, tri: [&Point<i32>; 3]) -> Relation {
    if triangle_covers(tri, &self.point) {
      Relation::Crosses
    } else {
      Relation::Outside
    }
  }

  fn contains_disk(&self, _center: &Point<i32>, _radius: i64) -> bool {
    false
  }
}
