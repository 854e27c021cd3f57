//! Merge holes into the outer ring with zero-width bridges so the result can
//! be ear clipped as a single ring, or as a few rings where holes run along
//! each other or along the outer ring.
use std::cmp::Ordering;

use tracing::trace;

use crate::algorithms::intersection::ring_edges;
use crate::data::{LineSegmentView, Point};
use crate::{GeometryError, PolygonScalar};

/// Splice `holes` (clockwise) into `outer` (counter-clockwise).
///
/// Returns the merged ring together with one flag per vertex: `flags[i]` is
/// true when the edge from vertex `i` to its successor is an edge of the
/// original polygon and false when it is a bridge.
pub fn eliminate_holes<T>(
  outer: Vec<Point<T>>,
  holes: Vec<Vec<Point<T>>>,
) -> Result<(Vec<Point<T>>, Vec<bool>), GeometryError>
where
  T: PolygonScalar,
{
  let mut merged = outer;
  let mut holes = holes;
  split_at_touching_vertices(&mut merged, &mut holes);
  let mut flags = vec![true; merged.len()];
  let mut holes: Vec<Vec<Point<T>>> = holes.into_iter().map(rotate_to_min).collect();
  holes.sort_by(|a, b| a[0].cmp_lex(&b[0]));
  for k in 0..holes.len() {
    let mut hole = holes[k].clone();
    let at = match find_shared(&merged, &hole) {
      Some((at, entry)) => {
        hole.rotate_left(entry);
        at
      }
      None => find_bridge(&merged, &holes[k..]).ok_or(GeometryError::Untessellatable)?,
    };
    trace!(hole = k, vertex = at, "bridging hole");
    splice(&mut merged, &mut flags, at, &hole);
  }
  dedup_ring(&mut merged, &mut flags);
  Ok((merged, flags))
}

fn rotate_to_min<T: PolygonScalar>(mut hole: Vec<Point<T>>) -> Vec<Point<T>> {
  let min = (0..hole.len())
    .min_by(|&a, &b| hole[a].cmp_lex(&hole[b]))
    .unwrap_or(0);
  hole.rotate_left(min);
  hole
}

/// Every vertex of one ring lying inside an edge of another ring becomes a
/// vertex of that ring too, so rings that touch share vertices and rings that
/// run along each other share whole edges.
pub fn split_at_touching_vertices<T: PolygonScalar>(outer: &mut Vec<Point<T>>, holes: &mut [Vec<Point<T>>]) {
  let hole_vertices: Vec<Point<T>> = holes.iter().flatten().cloned().collect();
  for pt in &hole_vertices {
    split_edge_at(outer, pt);
  }
  for k in 0..holes.len() {
    let others: Vec<Point<T>> = outer
      .iter()
      .chain(
        holes
          .iter()
          .enumerate()
          .filter(|&(other, _)| other != k)
          .flat_map(|(_, hole)| hole.iter()),
      )
      .cloned()
      .collect();
    for pt in &others {
      split_edge_at(&mut holes[k], pt);
    }
  }
}

fn split_edge_at<T: PolygonScalar>(ring: &mut Vec<Point<T>>, pt: &Point<T>) {
  let n = ring.len();
  let edge = (0..n).find(|&i| LineSegmentView::open(&ring[i], &ring[(i + 1) % n]).contains(pt));
  if let Some(i) = edge {
    ring.insert(i + 1, pt.clone());
  }
}

// A vertex shared by the hole and the merged ring needs no bridge. Returns
// the merged index and the hole index of the shared vertex. A vertex can
// appear several times in the merged ring, so copies are ranked by how well
// their wedge holds the hole's edges.
fn find_shared<T: PolygonScalar>(merged: &[Point<T>], hole: &[Point<T>]) -> Option<(usize, usize)> {
  let (n, h) = (merged.len(), hole.len());
  let shared: Vec<(usize, usize)> = (0..h)
    .flat_map(|j| (0..n).filter(move |&i| merged[i] == hole[j]).map(move |i| (i, j)))
    .collect();
  let rank = |&(i, j): &(usize, usize)| {
    let (prev, v, next) = (&merged[(i + n - 1) % n], &merged[i], &merged[(i + 1) % n]);
    let edges = [&hole[(j + 1) % h], &hole[(j + h - 1) % h]];
    if edges.iter().any(|&pt| in_cone(prev, v, next, pt)) {
      0
    } else if edges.iter().all(|&pt| in_closed_cone(prev, v, next, pt)) {
      if prev.orientation(v, next).is_cw() {
        2
      } else {
        1
      }
    } else {
      3
    }
  };
  shared.iter().copied().min_by_key(|pair| rank(pair))
}

// Index of a vertex of `merged` that can be joined to the leftmost vertex of
// `pending[0]` without the bridge touching any edge.
fn find_bridge<T: PolygonScalar>(merged: &[Point<T>], pending: &[Vec<Point<T>>]) -> Option<usize> {
  let hole = &pending[0];
  let target = &hole[0];
  let n = merged.len();
  let cone = |i: usize, pt: &Point<T>| {
    in_cone(&merged[(i + n - 1) % n], &merged[i], &merged[(i + 1) % n], pt)
  };

  let tx = target.x_coord();
  let (mut left, mut right): (Vec<usize>, Vec<usize>) =
    (0..n).partition(|&i| merged[i].x_coord().total_cmp(tx) != Ordering::Greater);
  // Nearest columns first.
  left.sort_by(|&a, &b| {
    merged[b]
      .x_coord()
      .total_cmp(merged[a].x_coord())
      .then(a.cmp(&b))
  });
  right.sort_by(|&a, &b| {
    merged[a]
      .x_coord()
      .total_cmp(merged[b].x_coord())
      .then(a.cmp(&b))
  });
  let h = hole.len();
  left.into_iter().chain(right).find(|&i| {
    let v = &merged[i];
    cone(i, target)
      && in_cone(&hole[h - 1], target, &hole[1 % h], v)
      && !is_blocked(merged, pending, v, target)
  })
}

// Is `pt` strictly inside the interior wedge at `v`? The interior lies to the
// left of `prev -> v -> next`.
fn in_cone<T: PolygonScalar>(prev: &Point<T>, v: &Point<T>, next: &Point<T>, pt: &Point<T>) -> bool {
  let after_prev = prev.orientation(v, pt).is_ccw();
  let before_next = v.orientation(next, pt).is_ccw();
  if prev.orientation(v, next).is_cw() {
    after_prev || before_next
  } else {
    after_prev && before_next
  }
}

// Like `in_cone` but the wedge includes its bounding rays.
fn in_closed_cone<T: PolygonScalar>(prev: &Point<T>, v: &Point<T>, next: &Point<T>, pt: &Point<T>) -> bool {
  let after_prev = !prev.orientation(v, pt).is_cw();
  let before_next = !v.orientation(next, pt).is_cw();
  if prev.orientation(v, next).is_cw() {
    after_prev || before_next
  } else {
    after_prev && before_next
  }
}

fn is_blocked<T: PolygonScalar>(
  merged: &[Point<T>],
  pending: &[Vec<Point<T>>],
  v: &Point<T>,
  target: &Point<T>,
) -> bool {
  let bridge = LineSegmentView::open(v, target);
  let blocks = |ring: &[Point<T>]| {
    ring_edges(ring).any(|(a, b)| bridge.intersects(&LineSegmentView::closed(a, b)))
  };
  blocks(merged) || pending.iter().any(|hole| blocks(hole))
}

fn splice<T: PolygonScalar>(
  merged: &mut Vec<Point<T>>,
  flags: &mut Vec<bool>,
  at: usize,
  hole: &[Point<T>],
) {
  let anchor = merged[at].clone();
  let entry = hole[0].clone();
  let tail = merged.split_off(at + 1);
  let tail_flags = flags.split_off(at);
  let exit_flag = tail_flags[0];
  merged.extend(hole.iter().cloned());
  merged.push(entry);
  merged.push(anchor);
  merged.extend(tail);
  flags.push(false);
  flags.extend(std::iter::repeat(true).take(hole.len()));
  flags.push(false);
  flags.push(exit_flag);
  flags.extend_from_slice(&tail_flags[1..]);
}

/// Remove repeated consecutive vertices, including a repeat across the
/// closing edge. The flag kept is the one of the edge reaching the repeat.
pub fn dedup_ring<T: PartialEq>(ring: &mut Vec<Point<T>>, flags: &mut Vec<bool>) {
  let mut i = 0;
  while i + 1 < ring.len() {
    if ring[i] == ring[i + 1] {
      ring.remove(i);
      flags.remove(i);
    } else {
      i += 1;
    }
  }
  while ring.len() > 1 && ring.first() == ring.last() {
    ring.pop();
    flags.pop();
  }
}

/// Cut a merged ring apart where two boundary edges run over each other in
/// opposite directions. Such a pair separates two holes, or a hole from the
/// outside, and bounds no area. Pieces left with fewer than three vertices
/// are dropped.
pub fn split_twin_edges<T: PartialEq + Clone>(
  ring: Vec<Point<T>>,
  flags: Vec<bool>,
) -> Vec<(Vec<Point<T>>, Vec<bool>)> {
  let mut pending = vec![(ring, flags)];
  let mut pieces = Vec::new();
  while let Some((ring, flags)) = pending.pop() {
    match find_twins(&ring, &flags) {
      None => pieces.push((ring, flags)),
      Some((i, j)) => {
        // ring[i] -> ring[i+1] and ring[j] -> ring[j+1] are twins, i < j.
        let n = ring.len();
        let inner = i + 1..j;
        let outer: Vec<usize> = (j + 1..n).chain(0..i).collect();
        trace!(first = i, second = j, "cutting ring at twin edges");
        for piece in [inner.collect::<Vec<usize>>(), outer] {
          if piece.len() >= 3 {
            pending.push((
              piece.iter().map(|&v| ring[v].clone()).collect(),
              piece.iter().map(|&v| flags[v]).collect(),
            ));
          }
        }
      }
    }
  }
  pieces
}

fn find_twins<T: PartialEq>(ring: &[Point<T>], flags: &[bool]) -> Option<(usize, usize)> {
  let n = ring.len();
  (0..n).filter(|&i| flags[i]).find_map(|i| {
    let (a, b) = (&ring[i], &ring[(i + 1) % n]);
    (i + 1..n)
      .find(|&j| flags[j] && &ring[j] == b && &ring[(j + 1) % n] == a)
      .map(|j| (i, j))
  })
}
