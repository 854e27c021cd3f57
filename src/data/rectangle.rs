use super::Point;
use crate::{GeometryError, Result};

/// Axis-aligned box with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
  pub min_x: f32,
  pub max_x: f32,
  pub min_y: f32,
  pub max_y: f32,
}

impl Rectangle {
  pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Result<Rectangle> {
    let rect = Rectangle {
      min_x,
      max_x,
      min_y,
      max_y,
    };
    if [min_x, max_x, min_y, max_y].iter().any(|v| !v.is_finite()) {
      return Err(GeometryError::NonFiniteCoordinate.into());
    }
    if min_x > max_x || min_y > max_y {
      return Err(GeometryError::InvalidBounds.into());
    }
    Ok(rect)
  }

  /// Smallest box around a non-empty point set.
  pub(crate) fn bounding(points: &[Point<f32>]) -> Rectangle {
    let mut rect = Rectangle {
      min_x: f32::INFINITY,
      max_x: f32::NEG_INFINITY,
      min_y: f32::INFINITY,
      max_y: f32::NEG_INFINITY,
    };
    for pt in points {
      rect.min_x = rect.min_x.min(pt.array[0]);
      rect.max_x = rect.max_x.max(pt.array[0]);
      rect.min_y = rect.min_y.min(pt.array[1]);
      rect.max_y = rect.max_y.max(pt.array[1]);
    }
    rect
  }

  pub fn contains(&self, pt: &Point<f32>) -> bool {
    let [x, y] = pt.array;
    self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
  }

  /// Corners in counter-clockwise order starting at the lower left.
  pub fn corners(&self) -> [Point<f32>; 4] {
    [
      Point::new([self.min_x, self.min_y]),
      Point::new([self.max_x, self.min_y]),
      Point::new([self.max_x, self.max_y]),
      Point::new([self.min_x, self.max_y]),
    ]
  }
}
