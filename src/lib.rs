#![deny(clippy::cast_lossless)]
//! Cartesian shape indexing and spatial relation queries.
//!
//! Shapes ([`Point`](data::Point), [`Line`](data::Line), [`Polygon`](data::Polygon))
//! are tessellated into primitives, quantized by an [`Encoder`](encoding::Encoder)
//! into fixed-width [`ShapeRecord`](encoding::ShapeRecord)s and matched against
//! query geometries through [`Component2D`](component::Component2D).
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::*;
use std::cmp::Ordering;

pub mod algorithms;
pub mod component;
pub mod config;
pub mod data;
pub mod encoding;
pub mod field;
mod orientation;
pub mod relation;

pub use config::ShapeConfig;
pub use orientation::Orientation;

/// Reasons a shape is rejected during construction or tessellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
  #[error("insufficient vertices")]
  InsufficientVertices,
  #[error("self intersections")]
  SelfIntersections,
  #[error("ring is not closed")]
  UnclosedRing,
  #[error("non-finite coordinate")]
  NonFiniteCoordinate,
  #[error("hole lies outside the outer ring")]
  HoleOutsideBoundary,
  #[error("holes overlap")]
  OverlappingHoles,
  #[error("ring has zero area")]
  ZeroArea,
  #[error("invalid bounds")]
  InvalidBounds,
  #[error("polygon could not be tessellated")]
  Untessellatable,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
  #[error("invalid geometry: {0}")]
  InvalidGeometry(#[from] GeometryError),
  /// The query geometry has no extent where one is required.
  #[error("degenerate query component: {0}")]
  DegenerateComponent(&'static str),
  #[error("coordinate {value} exceeds the encoding extent {extent}")]
  EncodingOverflow { value: f64, extent: f64 },
  #[error("unknown query relation {0:?}")]
  UnknownRelation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub trait TotalOrd {
  fn total_cmp(&self, other: &Self) -> Ordering;

  fn total_min(self, other: Self) -> Self
  where
    Self: Sized,
  {
    std::cmp::min_by(self, other, TotalOrd::total_cmp)
  }

  fn total_max(self, other: Self) -> Self
  where
    Self: Sized,
  {
    std::cmp::max_by(self, other, TotalOrd::total_cmp)
  }
}

impl<A: TotalOrd> TotalOrd for &A {
  fn total_cmp(&self, other: &Self) -> Ordering {
    (*self).total_cmp(*other)
  }
}

impl<A: TotalOrd, B: TotalOrd> TotalOrd for (A, B) {
  fn total_cmp(&self, other: &Self) -> Ordering {
    self
      .0
      .total_cmp(&other.0)
      .then_with(|| self.1.total_cmp(&other.1))
  }
}

/// Coordinate types with exact orientation predicates.
///
/// Implemented for the encoded space (`i32`), the shape model (`f32`, `f64`)
/// and exact sample points (`BigRational`).
pub trait PolygonScalar: std::fmt::Debug + TotalOrd + PartialOrd + Clone {
  /// Sign of the turn `p -> q -> r`. `Greater` is counter-clockwise.
  fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering;

  fn to_rational(&self) -> BigRational;

  /// Sign of twice the signed area of a ring given without its closing vertex.
  fn cmp_ring_area(ring: &[data::Point<Self>]) -> Ordering {
    let n = ring.len();
    let mut area = BigRational::zero();
    for i in 0..n {
      let a = &ring[i];
      let b = &ring[(i + 1) % n];
      area += a.x_coord().to_rational() * b.y_coord().to_rational()
        - b.x_coord().to_rational() * a.y_coord().to_rational();
    }
    area.cmp(&BigRational::zero())
  }
}

impl TotalOrd for i32 {
  fn total_cmp(&self, other: &Self) -> Ordering {
    self.cmp(other)
  }
}

impl PolygonScalar for i32 {
  // Differences fit in 33 bits, so products never overflow an i128.
  fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
    let ux = <i128 as From<i32>>::from(q[0]) - <i128 as From<i32>>::from(p[0]);
    let uy = <i128 as From<i32>>::from(q[1]) - <i128 as From<i32>>::from(p[1]);
    let vx = <i128 as From<i32>>::from(r[0]) - <i128 as From<i32>>::from(p[0]);
    let vy = <i128 as From<i32>>::from(r[1]) - <i128 as From<i32>>::from(p[1]);
    (ux * vy).cmp(&(uy * vx))
  }

  fn to_rational(&self) -> BigRational {
    BigRational::from_integer(BigInt::from(*self))
  }

  fn cmp_ring_area(ring: &[data::Point<Self>]) -> Ordering {
    let n = ring.len();
    let mut area: i128 = 0;
    for i in 0..n {
      let [ax, ay] = ring[i].array;
      let [bx, by] = ring[(i + 1) % n].array;
      area += <i128 as From<i32>>::from(ax) * <i128 as From<i32>>::from(by) - <i128 as From<i32>>::from(bx) * <i128 as From<i32>>::from(ay);
    }
    area.cmp(&0)
  }
}

impl TotalOrd for BigRational {
  fn total_cmp(&self, other: &Self) -> Ordering {
    self.cmp(other)
  }
}

impl PolygonScalar for BigRational {
  fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
    let slope1 = (&r[1] - &q[1]) * (&q[0] - &p[0]);
    let slope2 = (&q[1] - &p[1]) * (&r[0] - &q[0]);
    slope1.cmp(&slope2)
  }

  fn to_rational(&self) -> BigRational {
    self.clone()
  }
}

macro_rules! floating_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl TotalOrd for $ty {
        fn total_cmp(&self, other: &Self) -> Ordering {
          <$ty>::total_cmp(self, other)
        }
      }

      impl PolygonScalar for $ty {
        // Adaptive exact arithmetic from `geometry_predicates`.
        fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering {
          let orient = geometry_predicates::predicates::orient2d(
            [<f64 as From<$ty>>::from(p[0]), <f64 as From<$ty>>::from(p[1])],
            [<f64 as From<$ty>>::from(q[0]), <f64 as From<$ty>>::from(q[1])],
            [<f64 as From<$ty>>::from(r[0]), <f64 as From<$ty>>::from(r[1])],
          );
          if orient > 0.0 {
            Ordering::Greater
          } else if orient < 0.0 {
            Ordering::Less
          } else {
            Ordering::Equal
          }
        }

        // Non-finite values never reach the predicates; shapes reject them up front.
        fn to_rational(&self) -> BigRational {
          BigRational::from_float(*self).unwrap_or_else(BigRational::zero)
        }
      }
    )*
  };
}

floating_precision!(f32, f64);

#[cfg(test)]
pub mod testing;

#[cfg(test)]
mod tests;
