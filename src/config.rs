//! Engine configuration.

use crate::algorithms::tessellation::Tessellator;
use crate::encoding::Encoder;
use crate::Result;

/// Default half-width of the encodable coordinate range. Coordinates are
/// quantized to steps of `extent / 2^31`, i.e. `1/2048` by default.
pub const DEFAULT_EXTENT: f64 = 1_048_576.0;

/// Settings shared by indexing and querying.
///
/// Both sides must use the same extent, otherwise encoded records and query
/// components live in different integer spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeConfig {
  /// Largest absolute coordinate that can be encoded.
  /// Default: 2^20
  pub extent: f64,

  /// Reject polygons whose rings self-intersect or cross each other before
  /// tessellating them.
  /// Default: true
  pub check_self_intersections: bool,
}

impl Default for ShapeConfig {
  fn default() -> Self {
    Self {
      extent: DEFAULT_EXTENT,
      check_self_intersections: true,
    }
  }
}

impl ShapeConfig {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the encodable coordinate range.
  pub fn with_extent(mut self, extent: f64) -> Self {
    self.extent = extent;
    self
  }

  /// Enable or disable the polygon simplicity check.
  pub fn with_self_intersection_check(mut self, check: bool) -> Self {
    self.check_self_intersections = check;
    self
  }

  pub fn encoder(&self) -> Result<Encoder> {
    Encoder::new(self.extent)
  }

  pub fn tessellator(&self) -> Tessellator {
    Tessellator::new().with_self_intersection_check(self.check_self_intersections)
  }
}
