#[cfg(test)]
mod properties {
  use crate::algorithms::Tessellator;
  use crate::component::{Component2D, Relation};
  use crate::data::*;
  use crate::encoding::ShapeRecord;
  use crate::field::{ShapeIndexer, ShapeQuery};
  use crate::relation::QueryRelation;
  use crate::testing::*;
  use crate::{Error, Orientation::*, ShapeConfig};

  use proptest::prelude::*;
  use test_strategy::proptest;

  const RELATIONS: [QueryRelation; 4] = [
    QueryRelation::Intersects,
    QueryRelation::Within,
    QueryRelation::Contains,
    QueryRelation::Disjoint,
  ];

  fn records(shape: &Shape) -> Vec<ShapeRecord> {
    ShapeIndexer::new(&ShapeConfig::default())
      .unwrap()
      .create_indexable_fields("geo", shape)
      .unwrap()
      .into_iter()
      .map(|f| f.record)
      .collect()
  }

  fn decide(relation: QueryRelation, query: &QueryGeometry, records: &[ShapeRecord]) -> bool {
    ShapeQuery::new("geo", relation, query, &ShapeConfig::default())
      .unwrap()
      .matches(records)
  }

  fn length(a: &Point<f32>, b: &Point<f32>) -> f64 {
    let dx = f64::from(b.array[0]) - f64::from(a.array[0]);
    let dy = f64::from(b.array[1]) - f64::from(a.array[1]);
    dx.hypot(dy)
  }

  #[proptest]
  fn oracle_equivalence(
    #[strategy(shape())] shape: Shape,
    #[strategy(query_geometry())] query: QueryGeometry,
  ) {
    let records = records(&shape);
    for relation in RELATIONS {
      let validator = Validator::new(&ShapeConfig::default(), relation);
      prop_assert_eq!(
        decide(relation, &query, &records),
        validator.test_component_query(&query, &shape),
        "{}",
        relation
      );
    }
  }

  #[proptest]
  fn disjoint_is_not_intersects(
    #[strategy(shape())] shape: Shape,
    #[strategy(query_geometry())] query: QueryGeometry,
  ) {
    let records = records(&shape);
    prop_assert_eq!(
      decide(QueryRelation::Disjoint, &query, &records),
      !decide(QueryRelation::Intersects, &query, &records)
    );
  }

  #[proptest]
  fn within_and_contains_imply_intersects(
    #[strategy(shape())] shape: Shape,
    #[strategy(query_geometry())] query: QueryGeometry,
  ) {
    let records = records(&shape);
    let intersects = decide(QueryRelation::Intersects, &query, &records);
    prop_assert!(!decide(QueryRelation::Within, &query, &records) || intersects);
    prop_assert!(!decide(QueryRelation::Contains, &query, &records) || intersects);
  }

  #[proptest]
  fn shared_vertex_intersects(#[strategy(line_sharing_vertex())] lines: (Line, Line)) {
    let (indexed, query) = lines;
    let indexed = Shape::from(indexed);
    let query = QueryGeometry::from(Shape::from(query));
    let records = records(&indexed);
    prop_assert!(decide(QueryRelation::Intersects, &query, &records));
    prop_assert!(!decide(QueryRelation::Disjoint, &query, &records));
    for relation in RELATIONS {
      let validator = Validator::new(&ShapeConfig::default(), relation);
      prop_assert_eq!(
        decide(relation, &query, &records),
        validator.test_component_query(&query, &indexed)
      );
    }
  }

  #[proptest]
  fn area_conservation(
    #[strategy(prop_oneof![polygon(), polygon_with_touching_holes()])] poly: Polygon,
  ) {
    let triangles = Tessellator::new().tessellate_polygon(&poly).unwrap();
    prop_assert!(triangles.iter().all(|t| t.signed_area_2x() >= 0.0));
    let area: f64 = triangles.iter().map(|t| t.signed_area_2x() / 2.0).sum();
    prop_assert!((area - poly.area()).abs() < 1e-6);
  }

  // Flagged edges lie on the rings and add up to the perimeter, so every
  // ring edge is covered by boundary edges exactly once.
  #[proptest]
  fn boundary_coverage(#[strategy(polygon())] poly: Polygon) {
    let triangles = Tessellator::new().tessellate_polygon(&poly).unwrap();
    let ring_edges: Vec<(&Point<f32>, &Point<f32>)> = poly
      .rings()
      .flat_map(|ring| ring.iter().zip(ring.iter().skip(1)))
      .collect();
    let perimeter: f64 = ring_edges.iter().map(|(a, b)| length(a, b)).sum();
    let mut flagged = 0.0;
    for t in &triangles {
      for (a, b, boundary) in t.edges() {
        if boundary {
          let on_ring = ring_edges.iter().any(|(p, q)| {
            let edge = LineSegmentView::closed(p, q);
            edge.contains(a) && edge.contains(b)
          });
          prop_assert!(on_ring);
          flagged += length(a, b);
        }
      }
    }
    prop_assert!((flagged - perimeter).abs() < 1e-6);
  }

  // Edges shared by two rings separate holes from each other or from the
  // outside. They bound no area, so no triangle flags them.
  #[proptest]
  fn touching_holes_bound_only_area(#[strategy(polygon_with_touching_holes())] poly: Polygon) {
    let triangles = Tessellator::new().tessellate_polygon(&poly).unwrap();
    let outer: Vec<(Point<f32>, Point<f32>)> = poly.outer().windows(2).map(|w| (w[0], w[1])).collect();
    let on_outer = |a: &Point<f32>, b: &Point<f32>| {
      outer.iter().any(|(p, q)| {
        let edge = LineSegmentView::closed(p, q);
        edge.contains(a) && edge.contains(b)
      })
    };
    let mut expected: f64 = outer.iter().map(|(a, b)| length(a, b)).sum();
    for (k, hole) in poly.holes().iter().enumerate() {
      for w in hole.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        let twin = poly.holes().iter().enumerate().any(|(other, h)| {
          other != k
            && h
              .windows(2)
              .any(|v| (&v[0] == a && &v[1] == b) || (&v[0] == b && &v[1] == a))
        });
        if on_outer(a, b) {
          expected -= length(a, b);
        } else if !twin {
          expected += length(a, b);
        }
      }
    }
    let mut flagged = 0.0;
    for t in &triangles {
      for (a, b, boundary) in t.edges() {
        if boundary {
          flagged += length(a, b);
        }
      }
    }
    prop_assert!((flagged - expected).abs() < 1e-6);
  }

  #[proptest]
  fn queries_near_the_extent(
    #[strategy(prop::collection::vec(fractional_point(-30.0..30.0), 2..5))] points: Vec<Point<f32>>,
    #[strategy(line())] indexed: Line,
  ) {
    let extent = 24.0;
    let config = ShapeConfig::default().with_extent(extent);
    let query = QueryGeometry::Line(Line::new(points.clone()).unwrap());
    let beyond = points
      .iter()
      .any(|pt| pt.array.iter().any(|v| f64::from(v.abs()) > extent));
    let indexed = Shape::from(indexed);
    match ShapeQuery::new("geo", QueryRelation::Intersects, &query, &config) {
      Err(Error::EncodingOverflow { .. }) => prop_assert!(beyond),
      Err(other) => prop_assert!(false, "unexpected error {:?}", other),
      Ok(shape_query) => {
        prop_assert!(!beyond);
        let records: Vec<ShapeRecord> = ShapeIndexer::new(&config)
          .unwrap()
          .create_indexable_fields("geo", &indexed)
          .unwrap()
          .into_iter()
          .map(|f| f.record)
          .collect();
        let validator = Validator::new(&config, QueryRelation::Intersects);
        prop_assert_eq!(
          shape_query.matches(&records),
          validator.test_component_query(&query, &indexed)
        );
      }
    }
  }

  #[proptest]
  fn lines_keep_every_edge(#[strategy(line())] line: Line) {
    let records = records(&line.clone().into());
    prop_assert_eq!(records.len(), line.num_points() - 1);
  }

  #[proptest]
  fn bbox_filter_agrees_with_points(pt: Point<i32>, #[strategy(rectangle())] rect: Rectangle) {
    let encoder = ShapeConfig::default().encoder().unwrap();
    let component = Component2D::from_query(&rect.into(), &encoder).unwrap();
    let [x, y] = pt.array;
    let relation = component.relate_point(&pt);
    prop_assert_eq!(component.contains_point(x, y), relation == Relation::Inside);
    if component.disjoint_from_bbox(x, x, y, y) {
      prop_assert_eq!(relation, Relation::Outside);
    }
  }

  #[test]
  fn degenerate_line_tolerance() {
    let line = Line::new(vec![
      Point::new([1., 1.]),
      Point::new([1., 1.]),
      Point::new([3., 3.]),
    ])
    .unwrap();
    let records = records(&line.into());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].decode(), Primitive::Point(Point::new([2048, 2048])));
    let around = Rectangle::new(0., 2., 0., 2.).unwrap().into();
    assert!(decide(QueryRelation::Intersects, &around, &records));
    assert!(!decide(QueryRelation::Within, &around, &records));

    let stuck = Line::new(vec![Point::new([1., 1.]), Point::new([1., 1.])]).unwrap();
    let records = self::records(&stuck.into());
    assert!(decide(QueryRelation::Intersects, &around, &records));
    assert!(decide(QueryRelation::Within, &around, &records));
  }

  #[test]
  fn test_turns() {
    assert_eq!(
      Point::new([0, 0]).orientation(&Point::new([1, 1]), &Point::new([2, 2])),
      CoLinear
    );
    assert_eq!(
      Point::new([0., 0.]).orientation(&Point::new([0., 1.]), &Point::new([2., 2.])),
      ClockWise
    );
    assert_eq!(
      Point::new([0f32, 0.]).orientation(&Point::new([0., 1.]), &Point::new([-2., 2.])),
      CounterClockWise
    );
  }
}
