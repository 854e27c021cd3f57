use super::{Point, Rectangle};
use crate::{GeometryError, Result};

/// Outer ring plus holes. Every ring is closed: its last vertex repeats the
/// first one.
///
/// Construction only checks the ring structure. Simplicity, hole placement and
/// area are checked when the polygon is tessellated.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
  outer: Vec<Point<f32>>,
  holes: Vec<Vec<Point<f32>>>,
}

impl Polygon {
  pub fn new(outer: Vec<Point<f32>>, holes: Vec<Vec<Point<f32>>>) -> Result<Polygon> {
    check_ring(&outer)?;
    for hole in &holes {
      check_ring(hole)?;
    }
    Ok(Polygon { outer, holes })
  }

  pub fn outer(&self) -> &[Point<f32>] {
    &self.outer
  }

  pub fn holes(&self) -> &[Vec<Point<f32>>] {
    &self.holes
  }

  /// Outer ring first, then the holes.
  pub fn rings(&self) -> impl Iterator<Item = &[Point<f32>]> + '_ {
    std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
  }

  /// Rings without their closing vertex.
  pub fn open_rings(&self) -> Vec<Vec<Point<f32>>> {
    self
      .rings()
      .map(|ring| ring[..ring.len() - 1].to_vec())
      .collect()
  }

  /// Area of the outer ring minus the area of the holes.
  pub fn area(&self) -> f64 {
    let outer = ring_signed_area_2x(&self.outer).abs();
    let holes: f64 = self
      .holes
      .iter()
      .map(|hole| ring_signed_area_2x(hole).abs())
      .sum();
    (outer - holes) / 2.0
  }

  pub fn bbox(&self) -> Rectangle {
    Rectangle::bounding(&self.outer)
  }
}

fn check_ring(ring: &[Point<f32>]) -> Result<()> {
  for pt in ring {
    pt.check_finite()?;
  }
  if ring.len() < 4 {
    return Err(GeometryError::InsufficientVertices.into());
  }
  if ring.first() != ring.last() {
    return Err(GeometryError::UnclosedRing.into());
  }
  Ok(())
}

// Shoelace over a closed ring.
fn ring_signed_area_2x(ring: &[Point<f32>]) -> f64 {
  ring
    .windows(2)
    .map(|w| {
      let [ax, ay] = w[0].array;
      let [bx, by] = w[1].array;
      f64::from(ax) * f64::from(by) - f64::from(bx) * f64::from(ay)
    })
    .sum()
}
