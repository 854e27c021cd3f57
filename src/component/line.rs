use super::{segment_meets_triangle, Relate, Relation};
use crate::data::{Line, LineSegmentView, Point};
use crate::encoding::{EncodedBox, Encoder};
use crate::{GeometryError, Orientation, Result};

/// A query polyline. It has no interior: only points and collinear edges can
/// be inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct LineComponent {
  points: Vec<Point<i32>>,
  bbox: EncodedBox,
}

impl LineComponent {
  pub fn new(line: &Line, encoder: &Encoder) -> Result<LineComponent> {
    let points = line
      .points()
      .iter()
      .map(|pt| encoder.encode_point(pt))
      .collect::<Result<Vec<_>>>()?;
    let bbox = EncodedBox::bounding(&points).ok_or(GeometryError::InsufficientVertices)?;
    Ok(LineComponent { points, bbox })
  }

  fn segments(&self) -> impl Iterator<Item = LineSegmentView<'_, i32>> + '_ {
    self
      .points
      .windows(2)
      .map(|w| LineSegmentView::closed(&w[0], &w[1]))
  }

  // Is the whole of `a-b` covered by collinear pieces of the polyline?
  fn covers_segment(&self, a: &Point<i32>, b: &Point<i32>) -> bool {
    let (dx, dy) = (
      i64::from(b.array[0]) - i64::from(a.array[0]),
      i64::from(b.array[1]) - i64::from(a.array[1]),
    );
    // Collinear points are ordered along the dominant axis.
    let axis = if dx.abs() >= dy.abs() { 0 } else { 1 };
    let key = |p: &Point<i32>| i64::from(p.array[axis]);
    let (lo, hi) = if key(a) <= key(b) {
      (key(a), key(b))
    } else {
      (key(b), key(a))
    };
    let mut pieces: Vec<(i64, i64)> = self
      .points
      .windows(2)
      .filter(|w| {
        Orientation::new(a, b, &w[0]).is_colinear() && Orientation::new(a, b, &w[1]).is_colinear()
      })
      .map(|w| (key(&w[0]).min(key(&w[1])), key(&w[0]).max(key(&w[1]))))
      .collect();
    pieces.sort_unstable();
    let mut reached = lo;
    for (start, end) in pieces {
      if start > reached {
        break;
      }
      reached = reached.max(end);
      if reached >= hi {
        return true;
      }
    }
    false
  }
}

impl Relate for LineComponent {
  fn bbox(&self) -> EncodedBox {
    self.bbox
  }

  fn contains_point(&self, pt: &Point<i32>) -> bool {
    self.segments().any(|s| s.contains(pt))
  }

  fn relate_segment(&self, a: &Point<i32>, b: &Point<i32>) -> Relation {
    let segment = LineSegmentView::closed(a, b);
    if !self.segments().any(|s| s.intersects(&segment)) {
      Relation::Outside
    } else if self.covers_segment(a, b) {
      Relation::Inside
    } else {
      Relation::Crosses
    }
  }

  fn relate_ccw_triangle(&self, tri: [&Point<i32>; 3]) -> Relation {
    let touches = self
      .points
      .windows(2)
      .any(|w| segment_meets_triangle(&w[0], &w[1], tri));
    if touches {
      Relation::Crosses
    } else {
      Relation::Outside
    }
  }

  fn contains_disk(&self, _center: &Point<i32>, _radius: i64) -> bool {
    false
  }
}
