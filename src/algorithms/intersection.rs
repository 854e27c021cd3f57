//! Brute-force edge intersection checks used to validate rings.
use crate::data::{EndPoint, LineSegmentView, Point};
use crate::PolygonScalar;

/// Edges of a ring given without its closing vertex.
pub fn ring_edges<T>(ring: &[Point<T>]) -> impl Iterator<Item = (&Point<T>, &Point<T>)> + '_ {
  let n = ring.len();
  (0..n).map(move |i| (&ring[i], &ring[(i + 1) % n]))
}

fn pairs<E>(slice: &[E]) -> impl Iterator<Item = (usize, usize)> + '_ {
  let n = slice.len();
  (0..n).flat_map(move |a| (0..a).map(move |b| (b, a)))
}

/// Do two edges of the ring touch anywhere other than at the vertex shared
/// by consecutive edges?
///
/// # Time complexity
/// $O(n^2)$
pub fn ring_self_intersects<T: PolygonScalar>(ring: &[Point<T>]) -> bool {
  let n = ring.len();
  let edges: Vec<_> = ring_edges(ring).collect();
  let found = pairs(&edges).any(|(i, j)| {
    let (a, b) = edges[i];
    let (c, d) = edges[j];
    if j == i + 1 {
      // b == c
      folds_back(a, b, d)
    } else if i == 0 && j == n - 1 {
      // d == a
      folds_back(b, a, c)
    } else {
      LineSegmentView::closed(a, b).intersects(&LineSegmentView::closed(c, d))
    }
  });
  found
}

// Consecutive edges `u-v` and `v-w` overlap beyond `v`.
fn folds_back<T: PolygonScalar>(u: &Point<T>, v: &Point<T>, w: &Point<T>) -> bool {
  LineSegmentView::new(EndPoint::Exclusive(v), EndPoint::Inclusive(u)).contains(w)
    || LineSegmentView::new(EndPoint::Exclusive(v), EndPoint::Inclusive(w)).contains(u)
}

/// Does an edge of one ring cross an edge of the other at a point interior
/// to both? Shared vertices and overlapping edges are not crossings.
pub fn rings_cross<T: PolygonScalar>(lhs: &[Point<T>], rhs: &[Point<T>]) -> bool {
  ring_edges(lhs).any(|(a, b)| {
    ring_edges(rhs).any(|(c, d)| {
      let o1 = a.orientation(b, c);
      let o2 = a.orientation(b, d);
      let o3 = c.orientation(d, a);
      let o4 = c.orientation(d, b);
      !o1.is_colinear() && o1 == o2.reverse() && !o3.is_colinear() && o3 == o4.reverse()
    })
  })
}
