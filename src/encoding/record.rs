use crate::data::{Point, Primitive, Triangle};
use crate::Orientation;

use super::EncodedBox;

pub const RECORD_WORDS: usize = 7;
pub const RECORD_BYTES: usize = RECORD_WORDS * 4;

// Layout codes. The name lists which coordinate each of the first six words
// stores for vertices a, b and c once a is the leftmost vertex and the
// triangle is counter-clockwise. `Y`/`X` are the two free coordinates.
const MINY_MINX_MAXY_MAXX_Y_X: i32 = 0;
const MINY_MINX_Y_X_MAXY_MAXX: i32 = 1;
const MAXY_MINX_Y_X_MINY_MAXX: i32 = 2;
const MAXY_MINX_MINY_MAXX_Y_X: i32 = 3;
const Y_MINX_MINY_X_MAXY_MAXX: i32 = 4;
const Y_MINX_MINY_MAXX_MAXY_X: i32 = 5;
const MAXY_MINX_MINY_X_Y_MAXX: i32 = 6;
const MINY_MINX_Y_MAXX_MAXY_X: i32 = 7;

const CODE_MASK: i32 = 0b111;
const AB_FLAG: i32 = 1 << 3;
const BC_FLAG: i32 = 1 << 4;
const CA_FLAG: i32 = 1 << 5;

/// A primitive packed into seven words:
/// `[min_y, min_x, max_y, max_x, y, x, bits]`.
///
/// The first four words are the bounding box, so a range index can search
/// records by box. `bits` holds the layout code and the three boundary flags.
/// Points are stored as `(p, p, p)` and edges as `(a, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeRecord {
  words: [i32; RECORD_WORDS],
}

#[derive(Clone, Copy)]
struct Corner {
  x: i32,
  y: i32,
}

impl ShapeRecord {
  pub fn from_primitive(primitive: &Primitive<i32>) -> ShapeRecord {
    match primitive {
      Primitive::Point(pt) => ShapeRecord::encode_point(pt),
      Primitive::Line(a, b) => ShapeRecord::encode_line(a, b),
      Primitive::Triangle(t) => ShapeRecord::encode_triangle(t),
    }
  }

  pub fn encode_point(pt: &Point<i32>) -> ShapeRecord {
    ShapeRecord::encode_triangle(&Triangle::from_points([*pt, *pt, *pt]))
  }

  pub fn encode_line(a: &Point<i32>, b: &Point<i32>) -> ShapeRecord {
    ShapeRecord::encode_triangle(&Triangle::from_points([*a, *b, *a]))
  }

  pub fn encode_triangle(triangle: &Triangle<i32>) -> ShapeRecord {
    let corner = |i: usize| Corner {
      x: triangle.vertices[i].array[0],
      y: triangle.vertices[i].array[1],
    };
    let (mut a, mut b, mut c) = (corner(0), corner(1), corner(2));
    let [mut ab, mut bc, mut ca] = triangle.boundary;

    // Rotate so that `a` has the smallest x, breaking full ties on y.
    let rotate_left = |a: &mut Corner, b: &mut Corner, c: &mut Corner, flags: [&mut bool; 3]| {
      let [ab, bc, ca] = flags;
      std::mem::swap(a, b);
      std::mem::swap(b, c);
      let old_ab = *ab;
      *ab = *bc;
      *bc = *ca;
      *ca = old_ab;
    };
    let rotate_right = |a: &mut Corner, b: &mut Corner, c: &mut Corner, flags: [&mut bool; 3]| {
      let [ab, bc, ca] = flags;
      std::mem::swap(a, c);
      std::mem::swap(b, c);
      let old_ab = *ab;
      *ab = *ca;
      *ca = *bc;
      *bc = old_ab;
    };
    if b.x < a.x || c.x < a.x {
      if b.x < c.x {
        rotate_left(&mut a, &mut b, &mut c, [&mut ab, &mut bc, &mut ca]);
      } else {
        rotate_right(&mut a, &mut b, &mut c, [&mut ab, &mut bc, &mut ca]);
      }
    } else if a.x == b.x && a.x == c.x && (b.y < a.y || c.y < a.y) {
      if b.y < c.y {
        rotate_left(&mut a, &mut b, &mut c, [&mut ab, &mut bc, &mut ca]);
      } else {
        rotate_right(&mut a, &mut b, &mut c, [&mut ab, &mut bc, &mut ca]);
      }
    }

    if Orientation::new(&[a.x, a.y], &[b.x, b.y], &[c.x, c.y]).is_cw() {
      std::mem::swap(&mut b, &mut c);
      let old_ab = ab;
      ab = ca;
      ca = old_ab;
    }

    let min_x = a.x;
    let min_y = a.y.min(b.y).min(c.y);
    let max_x = a.x.max(b.x).max(c.x);
    let max_y = a.y.max(b.y).max(c.y);

    let (code, x, y) = if min_y == a.y {
      if max_y == b.y && max_x == b.x {
        (MINY_MINX_MAXY_MAXX_Y_X, c.x, c.y)
      } else if max_y == c.y && max_x == c.x {
        (MINY_MINX_Y_X_MAXY_MAXX, b.x, b.y)
      } else {
        (MINY_MINX_Y_MAXX_MAXY_X, c.x, b.y)
      }
    } else if max_y == a.y {
      if min_y == b.y && max_x == b.x {
        (MAXY_MINX_MINY_MAXX_Y_X, c.x, c.y)
      } else if min_y == c.y && max_x == c.x {
        (MAXY_MINX_Y_X_MINY_MAXX, b.x, b.y)
      } else {
        (MAXY_MINX_MINY_X_Y_MAXX, b.x, c.y)
      }
    } else if max_x == b.x && min_y == b.y {
      (Y_MINX_MINY_MAXX_MAXY_X, c.x, a.y)
    } else {
      // A leftmost counter-clockwise vertex strictly between the y extremes
      // leaves `c` holding both maxima.
      debug_assert!(max_x == c.x && max_y == c.y);
      (Y_MINX_MINY_X_MAXY_MAXX, b.x, a.y)
    };

    let mut bits = code;
    if ab {
      bits |= AB_FLAG;
    }
    if bc {
      bits |= BC_FLAG;
    }
    if ca {
      bits |= CA_FLAG;
    }
    ShapeRecord {
      words: [min_y, min_x, max_y, max_x, y, x, bits],
    }
  }

  pub fn words(&self) -> &[i32; RECORD_WORDS] {
    &self.words
  }

  pub fn bbox(&self) -> EncodedBox {
    let [min_y, min_x, max_y, max_x, ..] = self.words;
    EncodedBox {
      min_x,
      max_x,
      min_y,
      max_y,
    }
  }

  /// Rebuild the stored triangle: counter-clockwise (or degenerate) with the
  /// leftmost vertex first.
  pub fn triangle(&self) -> Triangle<i32> {
    let [min_y, min_x, max_y, max_x, y, x, bits] = self.words;
    let (a, b, c) = match bits & CODE_MASK {
      MINY_MINX_MAXY_MAXX_Y_X => ((min_x, min_y), (max_x, max_y), (x, y)),
      MINY_MINX_Y_X_MAXY_MAXX => ((min_x, min_y), (x, y), (max_x, max_y)),
      MAXY_MINX_Y_X_MINY_MAXX => ((min_x, max_y), (x, y), (max_x, min_y)),
      MAXY_MINX_MINY_MAXX_Y_X => ((min_x, max_y), (max_x, min_y), (x, y)),
      Y_MINX_MINY_X_MAXY_MAXX => ((min_x, y), (x, min_y), (max_x, max_y)),
      Y_MINX_MINY_MAXX_MAXY_X => ((min_x, y), (max_x, min_y), (x, max_y)),
      MAXY_MINX_MINY_X_Y_MAXX => ((min_x, max_y), (x, min_y), (max_x, y)),
      _ => ((min_x, min_y), (max_x, y), (x, max_y)),
    };
    Triangle::new(
      [a.into(), b.into(), c.into()],
      [
        bits & AB_FLAG != 0,
        bits & BC_FLAG != 0,
        bits & CA_FLAG != 0,
      ],
    )
  }

  /// Decode to the primitive kind the record was written from.
  pub fn decode(&self) -> Primitive<i32> {
    let triangle = self.triangle();
    let [a, b, c] = triangle.vertices;
    if a == b {
      if a == c {
        Primitive::Point(a)
      } else {
        Primitive::Line(a, c)
      }
    } else if a == c || b == c {
      Primitive::Line(a, b)
    } else {
      Primitive::Triangle(triangle)
    }
  }

  /// Big-endian bytes with the sign bit flipped, so that byte order matches
  /// numeric order word by word.
  pub fn to_bytes(&self) -> [u8; RECORD_BYTES] {
    let mut bytes = [0u8; RECORD_BYTES];
    for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.words.iter()) {
      chunk.copy_from_slice(&((*word as u32) ^ 0x8000_0000).to_be_bytes());
    }
    bytes
  }

  pub fn from_bytes(bytes: &[u8; RECORD_BYTES]) -> ShapeRecord {
    let mut words = [0i32; RECORD_WORDS];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
      let mut array = [0u8; 4];
      array.copy_from_slice(chunk);
      *word = (u32::from_be_bytes(array) ^ 0x8000_0000) as i32;
    }
    ShapeRecord { words }
  }
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;
  use crate::data::PointLocation;
  use proptest::prelude::*;
  use test_strategy::proptest;

  fn p(x: i32, y: i32) -> Point<i32> {
    Point::new([x, y])
  }

  fn same_triangle(lhs: &Triangle<i32>, rhs: &Triangle<i32>) -> bool {
    // Equal up to rotation and reversal, with flags following their edges.
    let edges = |t: &Triangle<i32>| {
      let mut edges: Vec<_> = t
        .edges()
        .iter()
        .map(|(a, b, flag)| {
          if a.cmp_lex(b).is_le() {
            (**a, **b, *flag)
          } else {
            (**b, **a, *flag)
          }
        })
        .collect();
      edges.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)).then(x.2.cmp(&y.2)));
      edges
    };
    edges(lhs) == edges(rhs)
  }

  #[test]
  fn point_record() {
    let record = ShapeRecord::encode_point(&p(3, -4));
    assert_eq!(record.decode(), Primitive::Point(p(3, -4)));
    assert_eq!(record.words()[..4], [-4, 3, -4, 3]);
  }

  #[test]
  fn line_record() {
    for (a, b) in [
      (p(0, 0), p(10, 10)),
      (p(10, 10), p(0, 0)),
      (p(0, 10), p(10, 0)),
      (p(5, 0), p(5, 9)),
      (p(5, 9), p(5, 0)),
    ] {
      match ShapeRecord::encode_line(&a, &b).decode() {
        Primitive::Line(u, v) => assert!((u, v) == (a, b) || (u, v) == (b, a)),
        other => panic!("expected a line, got {:?}", other),
      }
    }
  }

  #[test]
  fn clockwise_input_keeps_flags_on_their_edges() {
    let input = Triangle::new([p(0, 0), p(0, 10), p(10, 0)], [true, false, false]);
    let decoded = ShapeRecord::encode_triangle(&input).triangle();
    assert!(decoded.orientation().is_ccw());
    assert!(same_triangle(&input, &decoded));
  }

  #[test]
  fn sortable_bytes() {
    let lo = ShapeRecord::encode_point(&p(-1, 0)).to_bytes();
    let hi = ShapeRecord::encode_point(&p(0, 0)).to_bytes();
    // Word 1 (min_x) decides.
    assert!(lo[4..8] < hi[4..8]);
    let record = ShapeRecord::encode_line(&p(i32::MIN, 7), &p(i32::MAX, -7));
    assert_eq!(ShapeRecord::from_bytes(&record.to_bytes()), record);
  }

  #[proptest]
  fn triangles_survive_encoding(a: Point<i32>, b: Point<i32>, c: Point<i32>, flags: [bool; 3]) {
    let input = Triangle::new([a, b, c], flags);
    let record = ShapeRecord::encode_triangle(&input);
    let decoded = record.triangle();
    prop_assert!(same_triangle(&input, &decoded));
    prop_assert!(!decoded.orientation().is_cw());
    let bbox = record.bbox();
    for v in &input.vertices {
      prop_assert!(bbox.contains(v));
    }
    for v in &decoded.vertices {
      prop_assert_ne!(input.locate(v), PointLocation::Outside);
    }
  }
}
