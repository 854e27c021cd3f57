use super::{Circle, Line, Point, Polygon, Rectangle, Triangle};

/// A shape that can be indexed.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
  Point(Point<f32>),
  Line(Line),
  Polygon(Polygon),
}

impl Shape {
  pub fn bbox(&self) -> Rectangle {
    match self {
      Shape::Point(pt) => Rectangle::bounding(std::slice::from_ref(pt)),
      Shape::Line(line) => line.bbox(),
      Shape::Polygon(poly) => poly.bbox(),
    }
  }
}

impl From<Point<f32>> for Shape {
  fn from(pt: Point<f32>) -> Shape {
    Shape::Point(pt)
  }
}

impl From<Line> for Shape {
  fn from(line: Line) -> Shape {
    Shape::Line(line)
  }
}

impl From<Polygon> for Shape {
  fn from(poly: Polygon) -> Shape {
    Shape::Polygon(poly)
  }
}

/// A geometry a query can be built from.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryGeometry {
  Point(Point<f32>),
  Line(Line),
  Polygon(Polygon),
  Rectangle(Rectangle),
  Circle(Circle),
}

impl From<Shape> for QueryGeometry {
  fn from(shape: Shape) -> QueryGeometry {
    match shape {
      Shape::Point(pt) => QueryGeometry::Point(pt),
      Shape::Line(line) => QueryGeometry::Line(line),
      Shape::Polygon(poly) => QueryGeometry::Polygon(poly),
    }
  }
}

impl From<Rectangle> for QueryGeometry {
  fn from(rect: Rectangle) -> QueryGeometry {
    QueryGeometry::Rectangle(rect)
  }
}

impl From<Circle> for QueryGeometry {
  fn from(circle: Circle) -> QueryGeometry {
    QueryGeometry::Circle(circle)
  }
}

/// The smallest indexable unit cut from a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive<T> {
  Point(Point<T>),
  Line(Point<T>, Point<T>),
  Triangle(Triangle<T>),
}

impl<T> Primitive<T> {
  pub fn vertices(&self) -> Vec<&Point<T>> {
    match self {
      Primitive::Point(pt) => vec![pt],
      Primitive::Line(a, b) => vec![a, b],
      Primitive::Triangle(t) => t.vertices.iter().collect(),
    }
  }
}
