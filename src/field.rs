//! Indexing shapes into records and matching records against queries.
use std::sync::Arc;

use tracing::{debug, trace};

use crate::algorithms::Tessellator;
use crate::component::{Component2D, Relation};
use crate::data::{QueryGeometry, Shape};
use crate::encoding::{EncodedBox, Encoder, ShapeRecord};
use crate::relation::{evaluate, query_parts, QueryPart, QueryRelation};
use crate::{Result, ShapeConfig};

/// One indexed primitive of a shape, tagged with the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeField {
  pub field: Arc<str>,
  pub record: ShapeRecord,
}

/// Turns shapes into [`ShapeField`]s.
#[derive(Debug, Clone)]
pub struct ShapeIndexer {
  encoder: Encoder,
  tessellator: Tessellator,
}

impl ShapeIndexer {
  pub fn new(config: &ShapeConfig) -> Result<ShapeIndexer> {
    Ok(ShapeIndexer {
      encoder: config.encoder()?,
      tessellator: config.tessellator(),
    })
  }

  pub fn encoder(&self) -> &Encoder {
    &self.encoder
  }

  /// Tessellate and encode `shape`, one record per primitive.
  ///
  /// Nothing is returned for a shape that fails: either every primitive is
  /// encoded or the error is reported.
  pub fn create_indexable_fields(&self, field: &str, shape: &Shape) -> Result<Vec<ShapeField>> {
    let primitives = self.tessellator.tessellate(shape)?;
    let field: Arc<str> = Arc::from(field);
    let fields = primitives
      .iter()
      .map(|primitive| {
        Ok(ShapeField {
          field: Arc::clone(&field),
          record: self.encoder.encode_record(primitive)?,
        })
      })
      .collect::<Result<Vec<_>>>()?;
    trace!(field = %field, records = fields.len(), "indexed shape");
    Ok(fields)
  }
}

/// A relation query against one field.
#[derive(Debug, Clone)]
pub struct ShapeQuery {
  field: String,
  relation: QueryRelation,
  component: Component2D,
  parts: Vec<QueryPart>,
}

impl ShapeQuery {
  /// Quantize the query geometry with the same encoder used for indexing.
  ///
  /// # Errors
  /// Fails when the geometry is out of range or degenerate once quantized.
  pub fn new(
    field: &str,
    relation: QueryRelation,
    geometry: &QueryGeometry,
    config: &ShapeConfig,
  ) -> Result<ShapeQuery> {
    let encoder = config.encoder()?;
    let component = Component2D::from_query(geometry, &encoder)?;
    // Only CONTAINS looks at the parts.
    let parts = match relation {
      QueryRelation::Contains => query_parts(geometry, &encoder)?,
      _ => Vec::new(),
    };
    debug!(field, %relation, parts = parts.len(), "built shape query");
    Ok(ShapeQuery {
      field: field.to_string(),
      relation,
      component,
      parts,
    })
  }

  pub fn field(&self) -> &str {
    &self.field
  }

  pub fn relation(&self) -> QueryRelation {
    self.relation
  }

  pub fn component(&self) -> &Component2D {
    &self.component
  }

  pub fn bbox(&self) -> EncodedBox {
    self.component.bbox()
  }

  /// Relation of a single record to the query geometry.
  pub fn relate(&self, record: &ShapeRecord) -> Relation {
    self.component.relate(&record.decode())
  }

  /// Relation of an index cell to the query geometry, for pruning.
  pub fn relate_box(&self, bbox: &EncodedBox) -> Relation {
    self
      .component
      .relate_box(bbox.min_x, bbox.max_x, bbox.min_y, bbox.max_y)
  }

  /// Does the shape made of `records` satisfy the query?
  pub fn matches(&self, records: &[ShapeRecord]) -> bool {
    let primitives: Vec<_> = records.iter().map(ShapeRecord::decode).collect();
    evaluate(self.relation, &self.component, &self.parts, &primitives)
  }

  /// Like [`matches`](Self::matches) but only looks at records of this
  /// query's field.
  pub fn matches_fields(&self, fields: &[ShapeField]) -> bool {
    let records: Vec<ShapeRecord> = fields
      .iter()
      .filter(|f| &*f.field == self.field.as_str())
      .map(|f| f.record)
      .collect();
    self.matches(&records)
  }
}
