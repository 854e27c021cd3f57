use super::{Point, Rectangle};
use crate::{GeometryError, Result};

/// An ordered polyline. Consecutive duplicate vertices are kept; they
/// produce zero-length edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
  points: Vec<Point<f32>>,
}

impl Line {
  pub fn new(points: Vec<Point<f32>>) -> Result<Line> {
    if points.len() < 2 {
      return Err(GeometryError::InsufficientVertices.into());
    }
    for pt in &points {
      pt.check_finite()?;
    }
    Ok(Line { points })
  }

  pub fn points(&self) -> &[Point<f32>] {
    &self.points
  }

  pub fn num_points(&self) -> usize {
    self.points.len()
  }

  pub fn edges(&self) -> impl Iterator<Item = (&Point<f32>, &Point<f32>)> + '_ {
    self.points.windows(2).map(|w| (&w[0], &w[1]))
  }

  pub fn bbox(&self) -> Rectangle {
    Rectangle::bounding(&self.points)
  }
}
