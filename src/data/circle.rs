use super::{Point, Rectangle};
use crate::{GeometryError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
  pub center: Point<f32>,
  pub radius: f32,
}

impl Circle {
  pub fn new(center: Point<f32>, radius: f32) -> Result<Circle> {
    center.check_finite()?;
    if !radius.is_finite() {
      return Err(GeometryError::NonFiniteCoordinate.into());
    }
    if radius < 0.0 {
      return Err(GeometryError::InvalidBounds.into());
    }
    Ok(Circle { center, radius })
  }

  pub fn bbox(&self) -> Rectangle {
    let [x, y] = self.center.array;
    Rectangle {
      min_x: x - self.radius,
      max_x: x + self.radius,
      min_y: y - self.radius,
      max_y: y + self.radius,
    }
  }
}
