//! Order-preserving quantization of coordinates.
//!
//! Every conversion between the `f32` shape model and the `i32` index space
//! goes through [`Encoder`]; records and query components never quantize on
//! their own.

use array_init::try_array_init;

use crate::data::{Point, Primitive, Triangle};
use crate::{Error, GeometryError, Result};

mod record;

pub use record::{ShapeRecord, RECORD_BYTES, RECORD_WORDS};

/// Inclusive axis-aligned box in the encoded space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedBox {
  pub min_x: i32,
  pub max_x: i32,
  pub min_y: i32,
  pub max_y: i32,
}

impl EncodedBox {
  pub fn bounding<'a>(points: impl IntoIterator<Item = &'a Point<i32>>) -> Option<EncodedBox> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let [x, y] = first.array;
    let mut bbox = EncodedBox {
      min_x: x,
      max_x: x,
      min_y: y,
      max_y: y,
    };
    for pt in points {
      let [x, y] = pt.array;
      bbox.min_x = bbox.min_x.min(x);
      bbox.max_x = bbox.max_x.max(x);
      bbox.min_y = bbox.min_y.min(y);
      bbox.max_y = bbox.max_y.max(y);
    }
    Some(bbox)
  }

  pub fn contains(&self, pt: &Point<i32>) -> bool {
    let [x, y] = pt.array;
    self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
  }

  pub fn intersects(&self, other: &EncodedBox) -> bool {
    self.min_x <= other.max_x
      && other.min_x <= self.max_x
      && self.min_y <= other.max_y
      && other.min_y <= self.max_y
  }

  /// Corners in counter-clockwise order starting at the lower left.
  pub fn corners(&self) -> [Point<i32>; 4] {
    [
      Point::new([self.min_x, self.min_y]),
      Point::new([self.max_x, self.min_y]),
      Point::new([self.max_x, self.max_y]),
      Point::new([self.min_x, self.max_y]),
    ]
  }
}

/// Maps `[-extent, extent]` onto the `i32` range with `round(v * 2^31 / extent)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoder {
  extent: f64,
  scale: f64,
}

const I32_SPAN: f64 = 2_147_483_648.0;

impl Encoder {
  pub fn new(extent: f64) -> Result<Encoder> {
    if !extent.is_finite() || extent <= 0.0 {
      return Err(GeometryError::InvalidBounds.into());
    }
    Ok(Encoder {
      extent,
      scale: I32_SPAN / extent,
    })
  }

  pub fn extent(&self) -> f64 {
    self.extent
  }

  /// Distance between two neighbouring encoded values.
  pub fn resolution(&self) -> f64 {
    1.0 / self.scale
  }

  pub fn encode(&self, value: f32) -> Result<i32> {
    self.encode_f64(f64::from(value))
  }

  pub fn encode_f64(&self, value: f64) -> Result<i32> {
    if !value.is_finite() {
      return Err(GeometryError::NonFiniteCoordinate.into());
    }
    if value.abs() > self.extent {
      return Err(Error::EncodingOverflow {
        value,
        extent: self.extent,
      });
    }
    let scaled = (value * self.scale).round();
    // Only `value == extent` lands on 2^31.
    Ok(scaled.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
  }

  pub fn decode(&self, encoded: i32) -> f64 {
    f64::from(encoded) / self.scale
  }

  /// Quantize a non-negative distance with the coordinate scale. Distances
  /// may span the whole range, so up to twice the extent is accepted.
  pub fn encode_distance(&self, distance: f32) -> Result<i64> {
    let distance = f64::from(distance);
    if !distance.is_finite() || distance < 0.0 {
      return Err(GeometryError::InvalidBounds.into());
    }
    if distance > 2.0 * self.extent {
      return Err(Error::EncodingOverflow {
        value: distance,
        extent: self.extent,
      });
    }
    Ok((distance * self.scale).round() as i64)
  }

  pub fn encode_point(&self, pt: &Point<f32>) -> Result<Point<i32>> {
    Ok(Point::new(try_array_init(|i| self.encode(pt.array[i]))?))
  }

  pub fn decode_point(&self, pt: &Point<i32>) -> Point<f64> {
    pt.map(|v| self.decode(v))
  }

  pub fn encode_triangle(&self, triangle: &Triangle<f32>) -> Result<Triangle<i32>> {
    Ok(Triangle::new(
      try_array_init(|i| self.encode_point(&triangle.vertices[i]))?,
      triangle.boundary,
    ))
  }

  pub fn encode_primitive(&self, primitive: &Primitive<f32>) -> Result<Primitive<i32>> {
    Ok(match primitive {
      Primitive::Point(pt) => Primitive::Point(self.encode_point(pt)?),
      Primitive::Line(a, b) => Primitive::Line(self.encode_point(a)?, self.encode_point(b)?),
      Primitive::Triangle(t) => Primitive::Triangle(self.encode_triangle(t)?),
    })
  }

  /// Quantize and pack a primitive into an index record.
  pub fn encode_record(&self, primitive: &Primitive<f32>) -> Result<ShapeRecord> {
    Ok(ShapeRecord::from_primitive(&self.encode_primitive(primitive)?))
  }
}
