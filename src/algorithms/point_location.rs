use crate::data::{LineSegmentView, Point, PointLocation};
use crate::PolygonScalar;

/// Locate a point in the region bounded by a set of rings (even-odd rule).
/// Rings are given without their closing vertex. Points on any ring edge are
/// `OnBoundary`.
///
/// Edges are treated as half-open in y so a ray through a vertex is counted
/// once.
///
/// # Time complexity
/// $O(n)$
pub fn locate_in_rings<T, R>(rings: &[R], pt: &Point<T>) -> PointLocation
where
  T: PolygonScalar,
  R: AsRef<[Point<T>]>,
{
  let mut inside = false;
  for ring in rings {
    let ring = ring.as_ref();
    let n = ring.len();
    for i in 0..n {
      let a = &ring[i];
      let b = &ring[(i + 1) % n];
      if LineSegmentView::closed(a, b).contains(pt) {
        return PointLocation::OnBoundary;
      }
      let a_above = a.y_coord() > pt.y_coord();
      let b_above = b.y_coord() > pt.y_coord();
      if a_above != b_above {
        let (lo, hi) = if b_above { (a, b) } else { (b, a) };
        if lo.orientation(hi, pt).is_ccw() {
          inside = !inside;
        }
      }
    }
  }
  if inside {
    PointLocation::Inside
  } else {
    PointLocation::Outside
  }
}
