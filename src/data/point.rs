use array_init::array_init;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::cmp::Ordering;
use std::ops::Deref;

use crate::{GeometryError, Orientation, PolygonScalar, TotalOrd};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Point<T> {
  pub array: [T; 2],
}

// Random sampling.
impl<T> Distribution<Point<T>> for Standard
where
  Standard: Distribution<T>,
{
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<T> {
    Point {
      array: array_init(|_| rng.gen()),
    }
  }
}

impl<T> Point<T> {
  pub const fn new(array: [T; 2]) -> Point<T> {
    Point { array }
  }

  pub fn x_coord(&self) -> &T {
    &self.array[0]
  }

  pub fn y_coord(&self) -> &T {
    &self.array[1]
  }

  pub fn map<U, F>(&self, f: F) -> Point<U>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Point {
      array: array_init(|i| f(self.array[i].clone())),
    }
  }

  /// Determine the direction you have to turn if you walk from `self`
  /// to `q` to `r`.
  pub fn orientation(&self, q: &Point<T>, r: &Point<T>) -> Orientation
  where
    T: PolygonScalar,
  {
    Orientation::new(&self.array, &q.array, &r.array)
  }

  /// Lexicographic order on `(x, y)`.
  pub fn cmp_lex(&self, other: &Point<T>) -> Ordering
  where
    T: TotalOrd,
  {
    (self.x_coord(), self.y_coord()).total_cmp(&(other.x_coord(), other.y_coord()))
  }
}

impl Point<f32> {
  pub fn is_finite(&self) -> bool {
    self.array.iter().all(|v| v.is_finite())
  }

  pub(crate) fn check_finite(&self) -> Result<(), GeometryError> {
    if self.is_finite() {
      Ok(())
    } else {
      Err(GeometryError::NonFiniteCoordinate)
    }
  }
}

impl<T> Deref for Point<T> {
  type Target = [T; 2];
  fn deref(&self) -> &[T; 2] {
    &self.array
  }
}

impl<T> From<(T, T)> for Point<T> {
  fn from(point: (T, T)) -> Point<T> {
    Point {
      array: [point.0, point.1],
    }
  }
}
