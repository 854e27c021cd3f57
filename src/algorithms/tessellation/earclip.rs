use tracing::trace;

use crate::data::{Point, PointLocation, Triangle, TriangleView};
use crate::{GeometryError, Orientation, PolygonScalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EarTest {
  // No other vertex inside or on the candidate triangle.
  Strict,
  // Other vertices may touch the candidate triangle.
  Relaxed,
}

// Ear clipping over a counter-clockwise ring. `flags[i]` marks whether the
// edge from vertex `i` to its successor lies on the shape boundary.
//
// Create a linked list of points. O(n)
// Clone it as a list of possible ears. O(n)
// For each vertex in the list of possible ears:
//   Check if the vertex is an ear. O(n)
//   If it is:
//     Delete it from the vertex list.
//     Insert vertex->prev and vertex->next into possible-ears.
//     Emit a triangle (prev, ear, next). The new diagonal is a seam.
// When the possible ears run out, retry while letting vertices touch the
// ear, then drop a vertex that spans no area.
pub fn earclip<T>(points: &[Point<T>], flags: &[bool]) -> Result<Vec<Triangle<T>>, GeometryError>
where
  T: PolygonScalar,
{
  debug_assert_eq!(points.len(), flags.len());
  let n = points.len();
  let mut triangles = Vec::with_capacity(n.saturating_sub(2));
  if n < 3 {
    return Ok(triangles);
  }
  let mut flags = flags.to_vec();
  let mut vertices = List::new(n);
  let mut possible_ears = EarStore::new(n);
  let mut mode = EarTest::Strict;
  while vertices.len() > 3 {
    match possible_ears.pop() {
      Some(focus) => {
        if vertices.is_deleted(focus) {
          continue;
        }
        let prev = vertices.prev(focus);
        let next = vertices.next(focus);
        if is_ear(points, &vertices, prev, focus, next, mode) {
          triangles.push(Triangle::new_ccw(
            [
              points[prev].clone(),
              points[focus].clone(),
              points[next].clone(),
            ],
            [flags[prev], flags[focus], false],
          ));
          flags[prev] = false;
          possible_ears.new_possible_ear(prev);
          possible_ears.new_possible_ear(next);
          vertices.delete(focus);
          mode = EarTest::Strict;
        }
      }
      None if mode == EarTest::Strict => {
        trace!(remaining = vertices.len(), "no strict ear, relaxing");
        mode = EarTest::Relaxed;
        possible_ears.refill(&vertices);
      }
      None => {
        let flat = vertices
          .iter()
          .find(|&v| {
            Orientation::new(
              &points[vertices.prev(v)],
              &points[v],
              &points[vertices.next(v)],
            )
            .is_colinear()
          })
          .ok_or(GeometryError::Untessellatable)?;
        trace!(vertex = flat, "dropping flat vertex");
        let prev = vertices.prev(flat);
        flags[prev] = flags[prev] && flags[flat];
        vertices.delete(flat);
        mode = EarTest::Strict;
        possible_ears.refill(&vertices);
      }
    }
  }
  let a = vertices.head();
  let b = vertices.next(a);
  let c = vertices.next(b);
  match Orientation::new(&points[a], &points[b], &points[c]) {
    Orientation::CounterClockWise => triangles.push(Triangle::new_ccw(
      [points[a].clone(), points[b].clone(), points[c].clone()],
      [flags[a], flags[b], flags[c]],
    )),
    Orientation::CoLinear => {}
    Orientation::ClockWise => return Err(GeometryError::Untessellatable),
  }
  Ok(triangles)
}

fn is_ear<T>(
  points: &[Point<T>],
  vertices: &List,
  a: usize,
  b: usize,
  c: usize,
  mode: EarTest,
) -> bool
where
  T: PolygonScalar,
{
  let corners = [&points[a], &points[b], &points[c]];
  let trig = TriangleView::new(corners);
  if trig.orientation() != Orientation::CounterClockWise {
    return false;
  }
  let mut focus = vertices.next(c);
  while focus != a {
    let pt = &points[focus];
    // Copies of the corners come from hole bridges.
    if !corners.contains(&pt) {
      match (trig.locate(pt), mode) {
        (PointLocation::Inside, _) => return false,
        (PointLocation::OnBoundary, EarTest::Strict) => return false,
        _ => {}
      }
    }
    focus = vertices.next(focus);
  }
  true
}


///////////////////////////////////////////////////////////////////////////////
// Linked List that supports deletions

struct List {
  prev: Vec<usize>,
  next: Vec<usize>,
  deleted: IntSet,
  head: usize,
  len: usize,
}

impl List {
  fn new(size: usize) -> List {
    let mut prev = Vec::with_capacity(size);
    let mut next = Vec::with_capacity(size);
    prev.resize(size, 0);
    next.resize(size, 0);
    for i in 0..size {
      prev[(i + 1) % size] = i;
      next[i] = (i + 1) % size;
    }
    List {
      prev,
      next,
      deleted: IntSet::with_capacity(size, false),
      head: 0,
      len: size,
    }
  }

  fn len(&self) -> usize {
    self.len
  }

  fn head(&self) -> usize {
    self.head
  }

  fn prev(&self, vertex: usize) -> usize {
    self.prev[vertex]
  }

  fn next(&self, vertex: usize) -> usize {
    self.next[vertex]
  }

  fn is_deleted(&self, vertex: usize) -> bool {
    self.deleted.contains(vertex)
  }

  fn delete(&mut self, vertex: usize) {
    let prev = self.prev[vertex];
    let next = self.next[vertex];
    self.next[prev] = next;
    self.prev[next] = prev;
    self.deleted.insert(vertex);
    if self.head == vertex {
      self.head = next;
    }
    self.len -= 1;
  }

  fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    let mut focus = self.head;
    (0..self.len).map(move |_| {
      let out = focus;
      focus = self.next[focus];
      out
    })
  }
}

///////////////////////////////////////////////////////////////////////////////
// Collection of possible ears.

struct EarStore {
  possible_ears_vec: Vec<usize>,
  possible_ears_set: IntSet,
}

impl EarStore {
  fn new(size: usize) -> EarStore {
    // Popped from the back, so vertex 0 is tried first.
    EarStore {
      possible_ears_vec: (0..size).rev().collect(),
      possible_ears_set: IntSet::with_capacity(size, true),
    }
  }

  fn new_possible_ear(&mut self, possible_ear: usize) {
    if !self.possible_ears_set.contains(possible_ear) {
      self.possible_ears_set.insert(possible_ear);
      self.possible_ears_vec.push(possible_ear);
    }
  }

  fn refill(&mut self, vertices: &List) {
    for vertex in vertices.iter() {
      self.new_possible_ear(vertex);
    }
  }

  fn pop(&mut self) -> Option<usize> {
    let next = self.possible_ears_vec.pop()?;
    self.possible_ears_set.delete(next);
    Some(next)
  }
}

///////////////////////////////////////////////////////////////////////////////
// IntSet

struct IntSet {
  set: Vec<bool>,
}

impl IntSet {
  fn with_capacity(capacity: usize, initial: bool) -> IntSet {
    let mut set = Vec::with_capacity(capacity);
    set.resize(capacity, initial);
    IntSet { set }
  }

  fn contains(&self, value: usize) -> bool {
    self.set[value]
  }

  fn insert(&mut self, value: usize) {
    self.set[value] = true
  }

  fn delete(&mut self, value: usize) {
    self.set[value] = false
  }
}
