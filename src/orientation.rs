use std::cmp::Ordering;

use crate::PolygonScalar;

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone)]
pub enum Orientation {
  CounterClockWise,
  ClockWise,
  CoLinear,
}

impl Orientation {
  /// Determine the direction you have to turn if you walk from `p1`
  /// to `p2` to `p3`.
  ///
  /// The result is exact for every [`PolygonScalar`]: `i32` coordinates are
  /// widened before multiplying and floats go through adaptive predicates.
  ///
  /// # Examples
  ///
  /// ```rust
  /// # use xyshape::data::Point;
  /// # use xyshape::Orientation;
  /// let p1 = Point::new([0, 0]);
  /// let p2 = Point::new([0, 1]);
  /// assert!(Orientation::new(&p1, &p2, &Point::new([0, 2])).is_colinear());
  /// assert!(Orientation::new(&p1, &p2, &Point::new([-1, 2])).is_ccw());
  /// assert!(Orientation::new(&p1, &p2, &Point::new([1, 2])).is_cw());
  /// ```
  pub fn new<T>(p1: &[T; 2], p2: &[T; 2], p3: &[T; 2]) -> Orientation
  where
    T: PolygonScalar,
  {
    match T::cmp_slope(p1, p2, p3) {
      Ordering::Less => Orientation::ClockWise,
      Ordering::Equal => Orientation::CoLinear,
      Ordering::Greater => Orientation::CounterClockWise,
    }
  }

  pub fn is_colinear(self) -> bool {
    matches!(self, Orientation::CoLinear)
  }

  pub fn is_ccw(self) -> bool {
    matches!(self, Orientation::CounterClockWise)
  }

  pub fn is_cw(self) -> bool {
    matches!(self, Orientation::ClockWise)
  }

  #[must_use]
  pub fn reverse(self) -> Orientation {
    match self {
      Orientation::CounterClockWise => Orientation::ClockWise,
      Orientation::ClockWise => Orientation::CounterClockWise,
      Orientation::CoLinear => Orientation::CoLinear,
    }
  }
}
