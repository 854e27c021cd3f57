mod circle;
mod line;
mod line_segment;
pub(crate) mod point;
pub mod polygon;
mod rectangle;
mod shape;
mod triangle;

pub use circle::Circle;
pub use line::Line;
pub use line_segment::*;
pub use point::Point;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use shape::{Primitive, QueryGeometry, Shape};
pub use triangle::{Triangle, TriangleView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PointLocation {
  Inside,
  OnBoundary,
  Outside,
}

impl PointLocation {
  /// Closed-set membership.
  pub fn is_covered(self) -> bool {
    self != PointLocation::Outside
  }
}
