use std::cmp::Ordering;

use super::Point;
use crate::{Orientation, PolygonScalar};

///////////////////////////////////////////////////////////////////////////////
// EndPoint

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndPoint<T> {
  Exclusive(T),
  Inclusive(T),
}

use EndPoint::*;

impl<T> EndPoint<T> {
  pub fn inner(&self) -> &T {
    match self {
      Exclusive(t) => t,
      Inclusive(t) => t,
    }
  }

  pub fn is_exclusive(&self) -> bool {
    match self {
      Exclusive(_) => true,
      Inclusive(_) => false,
    }
  }

  pub fn is_inclusive(&self) -> bool {
    !self.is_exclusive()
  }
}

///////////////////////////////////////////////////////////////////////////////
// LineSegmentView

/// A segment between two borrowed points. `min` is lexicographically no
/// greater than `max`; either end may be open.
#[derive(Debug, PartialEq, Eq)]
pub struct LineSegmentView<'a, T> {
  pub min: EndPoint<&'a Point<T>>,
  pub max: EndPoint<&'a Point<T>>,
}

impl<'a, T> Clone for LineSegmentView<'a, T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<'a, T> Copy for LineSegmentView<'a, T> {}

impl<'a, T: PolygonScalar> LineSegmentView<'a, T> {
  pub fn new(a: EndPoint<&'a Point<T>>, b: EndPoint<&'a Point<T>>) -> LineSegmentView<'a, T> {
    if a.inner().cmp_lex(b.inner()) == Ordering::Greater {
      LineSegmentView { min: b, max: a }
    } else {
      LineSegmentView { min: a, max: b }
    }
  }

  pub fn closed(a: &'a Point<T>, b: &'a Point<T>) -> LineSegmentView<'a, T> {
    LineSegmentView::new(Inclusive(a), Inclusive(b))
  }

  pub fn open(a: &'a Point<T>, b: &'a Point<T>) -> LineSegmentView<'a, T> {
    LineSegmentView::new(Exclusive(a), Exclusive(b))
  }

  pub fn is_degenerate(&self) -> bool {
    self.min.inner() == self.max.inner()
  }

  fn is_empty(&self) -> bool {
    self.is_degenerate() && (self.min.is_exclusive() || self.max.is_exclusive())
  }

  /// Is `pt` on the segment, respecting open ends?
  pub fn contains(&self, pt: &Point<T>) -> bool {
    if self.is_empty() {
      return false;
    }
    let (a, b) = (*self.min.inner(), *self.max.inner());
    if !a.orientation(b, pt).is_colinear() {
      return false;
    }
    let after_min = match (self.min, pt.cmp_lex(a)) {
      (_, Ordering::Greater) => true,
      (Inclusive(_), Ordering::Equal) => true,
      _ => false,
    };
    let before_max = match (self.max, pt.cmp_lex(b)) {
      (_, Ordering::Less) => true,
      (Inclusive(_), Ordering::Equal) => true,
      _ => false,
    };
    after_min && before_max
  }

  /// Do the two segments share at least one point?
  pub fn intersects(&self, other: &LineSegmentView<'_, T>) -> bool {
    if self.is_empty() || other.is_empty() {
      return false;
    }
    if self.is_degenerate() {
      return other.contains(self.min.inner());
    }
    if other.is_degenerate() {
      return self.contains(other.min.inner());
    }
    let (a, b) = (*self.min.inner(), *self.max.inner());
    let (c, d) = (*other.min.inner(), *other.max.inner());
    let o1 = a.orientation(b, c);
    let o2 = a.orientation(b, d);
    let o3 = c.orientation(d, a);
    let o4 = c.orientation(d, b);
    if o1.is_colinear() && o2.is_colinear() {
      return self.overlaps_colinear(other);
    }
    let crossing = |u: Orientation, v: Orientation| !u.is_colinear() && !v.is_colinear() && u != v;
    if crossing(o1, o2) && crossing(o3, o4) {
      return true;
    }
    (o1.is_colinear() && self.contains(c) && other.contains(c))
      || (o2.is_colinear() && self.contains(d) && other.contains(d))
      || (o3.is_colinear() && other.contains(a) && self.contains(a))
      || (o4.is_colinear() && other.contains(b) && self.contains(b))
  }

  fn overlaps_colinear(&self, other: &LineSegmentView<'_, T>) -> bool {
    // The later of the two starts and the earlier of the two ends.
    let lo = match self.min.inner().cmp_lex(other.min.inner()) {
      Ordering::Greater => self.min,
      Ordering::Less => other.min,
      Ordering::Equal => exclusive_wins(self.min, other.min),
    };
    let hi = match self.max.inner().cmp_lex(other.max.inner()) {
      Ordering::Less => self.max,
      Ordering::Greater => other.max,
      Ordering::Equal => exclusive_wins(self.max, other.max),
    };
    match lo.inner().cmp_lex(hi.inner()) {
      Ordering::Less => true,
      Ordering::Equal => lo.is_inclusive() && hi.is_inclusive(),
      Ordering::Greater => false,
    }
  }
}

fn exclusive_wins<P>(a: EndPoint<P>, b: EndPoint<P>) -> EndPoint<P> {
  if a.is_exclusive() {
    a
  } else {
    b
  }
}
