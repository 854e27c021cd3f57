use super::{triangle_covers, Relate, Relation};
use crate::data::{LineSegmentView, Point, Rectangle};
use crate::encoding::{EncodedBox, Encoder};
use crate::{Error, Result};

/// Axis-aligned query box.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleComponent {
  bbox: EncodedBox,
}

impl RectangleComponent {
  pub fn new(rect: &Rectangle, encoder: &Encoder) -> Result<RectangleComponent> {
    let bbox = EncodedBox {
      min_x: encoder.encode(rect.min_x)?,
      max_x: encoder.encode(rect.max_x)?,
      min_y: encoder.encode(rect.min_y)?,
      max_y: encoder.encode(rect.max_y)?,
    };
    if bbox.min_x == bbox.max_x && bbox.min_y == bbox.max_y {
      return Err(Error::DegenerateComponent("rectangle collapses to a point"));
    }
    Ok(RectangleComponent { bbox })
  }

  fn edges_meet(&self, a: &Point<i32>, b: &Point<i32>) -> bool {
    let corners = self.bbox.corners();
    let segment = LineSegmentView::closed(a, b);
    (0..4).any(|i| segment.intersects(&LineSegmentView::closed(&corners[i], &corners[(i + 1) % 4])))
  }
}

impl Relate for RectangleComponent {
  fn bbox(&self) -> EncodedBox {
    self.bbox
  }

  fn contains_point(&self, pt: &Point<i32>) -> bool {
    self.bbox.contains(pt)
  }

  fn relate_segment(&self, a: &Point<i32>, b: &Point<i32>) -> Relation {
    match (self.bbox.contains(a), self.bbox.contains(b)) {
      (true, true) => Relation::Inside,
      (false, false) if !self.edges_meet(a, b) => Relation::Outside,
      _ => Relation::Crosses,
    }
  }

  fn relate_ccw_triangle(&self, tri: [&Point<i32>; 3]) -> Relation {
    let inside = tri.iter().filter(|pt| self.bbox.contains(pt)).count();
    if inside == 3 {
      return Relation::Inside;
    }
    if inside > 0 {
      return Relation::Crosses;
    }
    let corners = self.bbox.corners();
    let touches = corners.iter().any(|corner| triangle_covers(tri, corner))
      || (0..3).any(|i| self.edges_meet(tri[i], tri[(i + 1) % 3]));
    if touches {
      Relation::Crosses
    } else {
      Relation::Outside
    }
  }

  fn contains_disk(&self, center: &Point<i32>, radius: i64) -> bool {
    let [x, y] = center.array;
    let (x, y) = (i64::from(x), i64::from(y));
    x - radius >= i64::from(self.bbox.min_x)
      && x + radius <= i64::from(self.bbox.max_x)
      && y - radius >= i64::from(self.bbox.min_y)
      && y + radius <= i64::from(self.bbox.max_y)
  }
}
