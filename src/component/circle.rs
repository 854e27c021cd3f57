use std::cmp::Ordering;

use super::sampling::cmp_segment_distance;
use super::{triangle_covers, Relate, Relation};
use crate::data::{Circle, Point};
use crate::encoding::{EncodedBox, Encoder};
use crate::{Error, Result};

/// A closed disk. The radius is quantized with the coordinate scale.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleComponent {
  center: Point<i32>,
  radius: i64,
}

impl CircleComponent {
  pub fn new(circle: &Circle, encoder: &Encoder) -> Result<CircleComponent> {
    let center = encoder.encode_point(&circle.center)?;
    let radius = encoder.encode_distance(circle.radius)?;
    if radius == 0 {
      return Err(Error::DegenerateComponent("circle has no radius"));
    }
    Ok(CircleComponent { center, radius })
  }

  fn covers(&self, pt: &Point<i32>) -> bool {
    cmp_segment_distance(pt, pt, &self.center, self.radius) != Ordering::Greater
  }
}

impl Relate for CircleComponent {
  fn bbox(&self) -> EncodedBox {
    let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    let [x, y] = self.center.array;
    let (x, y) = (i64::from(x), i64::from(y));
    EncodedBox {
      min_x: clamp(x - self.radius),
      max_x: clamp(x + self.radius),
      min_y: clamp(y - self.radius),
      max_y: clamp(y + self.radius),
    }
  }

  fn contains_point(&self, pt: &Point<i32>) -> bool {
    self.covers(pt)
  }

  fn relate_segment(&self, a: &Point<i32>, b: &Point<i32>) -> Relation {
    if self.covers(a) && self.covers(b) {
      Relation::Inside
    } else if cmp_segment_distance(a, b, &self.center, self.radius) == Ordering::Greater {
      Relation::Outside
    } else {
      Relation::Crosses
    }
  }

  fn relate_ccw_triangle(&self, tri: [&Point<i32>; 3]) -> Relation {
    if tri.iter().all(|pt| self.covers(pt)) {
      return Relation::Inside;
    }
    let near_edge = (0..3).any(|i| {
      cmp_segment_distance(tri[i], tri[(i + 1) % 3], &self.center, self.radius) != Ordering::Greater
    });
    if near_edge || triangle_covers(tri, &self.center) {
      Relation::Crosses
    } else {
      Relation::Outside
    }
  }

  fn contains_disk(&self, center: &Point<i32>, radius: i64) -> bool {
    radius <= self.radius
      && cmp_segment_distance(center, center, &self.center, self.radius - radius) != Ordering::Greater
  }
}
