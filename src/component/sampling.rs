//! Exact sample points for deciding set membership along an edge.
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::cmp::Ordering;

use crate::data::Point;
use crate::PolygonScalar;

pub(crate) fn to_rational(pt: &Point<i32>) -> Point<BigRational> {
  pt.map(|v| v.to_rational())
}

fn diff(p: &Point<i32>, q: &Point<i32>) -> (i128, i128) {
  (
    i128::from(p.array[0]) - i128::from(q.array[0]),
    i128::from(p.array[1]) - i128::from(q.array[1]),
  )
}

fn ratio(num: i128, den: i128) -> BigRational {
  BigRational::new(BigInt::from(num), BigInt::from(den))
}

/// Parameters strictly between 0 and 1 at which `a -> b` meets the supporting
/// lines of `edges`, plus the projections of collinear edge endpoints.
/// Sorted and without repeats.
///
/// Between two consecutive parameters no edge is crossed, so membership in a
/// region bounded by `edges` is constant there.
pub(crate) fn split_parameters<'a, I>(a: &Point<i32>, b: &Point<i32>, edges: I) -> Vec<BigRational>
where
  I: IntoIterator<Item = (&'a Point<i32>, &'a Point<i32>)>,
{
  let (dx, dy) = diff(b, a);
  let len2 = dx * dx + dy * dy;
  let mut params = Vec::new();
  if len2 == 0 {
    return params;
  }
  for (c, d) in edges {
    let (ex, ey) = diff(d, c);
    let (wx, wy) = diff(c, a);
    let den = dx * ey - dy * ex;
    if den != 0 {
      params.push(ratio(wx * ey - wy * ex, den));
    } else if wx * dy - wy * dx == 0 {
      let (vx, vy) = diff(d, a);
      params.push(ratio(wx * dx + wy * dy, len2));
      params.push(ratio(vx * dx + vy * dy, len2));
    }
  }
  let zero = BigRational::zero();
  let one = BigRational::one();
  params.retain(|t| t > &zero && t < &one);
  params.sort();
  params.dedup();
  params
}

/// Endpoints, split points and the midpoint of every piece in between.
pub(crate) fn edge_samples(
  a: &Point<i32>,
  b: &Point<i32>,
  params: &[BigRational],
) -> Vec<Point<BigRational>> {
  let a = to_rational(a);
  let b = to_rational(b);
  let lerp = |t: &BigRational| {
    Point::new([
      &a.array[0] + (&b.array[0] - &a.array[0]) * t,
      &a.array[1] + (&b.array[1] - &a.array[1]) * t,
    ])
  };
  let two = BigRational::from_integer(BigInt::from(2));
  let mut bounds = Vec::with_capacity(params.len() + 2);
  bounds.push(BigRational::zero());
  bounds.extend(params.iter().cloned());
  bounds.push(BigRational::one());
  let mut samples = Vec::with_capacity(bounds.len() * 2);
  for (i, t) in bounds.iter().enumerate() {
    samples.push(lerp(t));
    if let Some(next) = bounds.get(i + 1) {
      samples.push(lerp(&((t + next) / &two)));
    }
  }
  samples
}

/// Centroid of three points, strictly inside the triangle when it has area.
pub(crate) fn centroid(pts: [&Point<i32>; 3]) -> Point<BigRational> {
  let three = BigRational::from_integer(BigInt::from(3));
  let sum = |axis: usize| {
    pts
      .iter()
      .map(|p| p.array[axis].to_rational())
      .fold(BigRational::zero(), |acc, v| acc + v)
  };
  Point::new([sum(0) / &three, sum(1) / three])
}

/// Compare the distance from `center` to the closed segment `a-b` with
/// `radius`.
pub(crate) fn cmp_segment_distance(
  a: &Point<i32>,
  b: &Point<i32>,
  center: &Point<i32>,
  radius: i64,
) -> Ordering {
  let big = |v: i128| BigInt::from(v);
  let (dx, dy) = diff(b, a);
  let (wx, wy) = diff(center, a);
  let r2 = BigInt::from(radius) * BigInt::from(radius);
  let len2 = dx * dx + dy * dy;
  let dot = wx * dx + wy * dy;
  if len2 == 0 || dot <= 0 {
    return (big(wx * wx) + big(wy * wy)).cmp(&r2);
  }
  if dot >= len2 {
    let (ux, uy) = diff(center, b);
    return (big(ux * ux) + big(uy * uy)).cmp(&r2);
  }
  let cross = big(dx * wy - dy * wx);
  (&cross * &cross).cmp(&(r2 * big(len2)))
}
