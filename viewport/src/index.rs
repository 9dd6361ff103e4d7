//! Spatial index over marker records.
//!
//! DESIGN
//! ======
//! Records are bulk-loaded once into an R-tree and never inserted or removed
//! afterwards. The tree stores lightweight slots (record position plus its
//! bounding box); the records themselves live in a `Vec` with an id lookup
//! map beside it.
//!
//! Two queries are served:
//! - visibility: every record whose bounding box intersects a rectangle;
//! - nearest hit: the record whose centre is closest to a point and strictly
//!   inside a radius. The query box is the point expanded by the radius, so
//!   hits never depend on how large the stored boxes happen to be.

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;

use std::collections::HashMap;

use rstar::{AABB, RTree, RTreeObject};
use serde::{Deserialize, Serialize};

use crate::camera::{Bounds, Point};

/// One marker as indexed. Immutable after content build.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Semantic size carried through to tooltips, not the render size.
    pub width: f64,
    pub height: f64,
    pub bounds: Bounds,
}

impl MarkerRecord {
    /// Build a record whose bounding box is the point ± `brush`.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, brush: f64) -> Self {
        Self {
            id: marker_id(x, y),
            x,
            y,
            width,
            height,
            bounds: Bounds::around(Point::new(x, y), brush),
        }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn visible_point(&self) -> VisiblePoint {
        VisiblePoint { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

/// Deterministic id derived from world coordinates.
#[must_use]
pub fn marker_id(x: f64, y: f64) -> String {
    format!("{x}-{y}")
}

/// Read-only projection of a marker returned by visibility queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisiblePoint {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
struct Slot {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for Slot {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn to_aabb(b: &Bounds) -> AABB<[f64; 2]> {
    AABB::from_corners([b.min_x, b.min_y], [b.max_x, b.max_y])
}

/// R-tree of markers plus an id lookup.
#[derive(Debug, Default)]
pub struct MarkerIndex {
    records: Vec<MarkerRecord>,
    by_id: HashMap<String, usize>,
    tree: RTree<Slot>,
}

impl MarkerIndex {
    /// Bulk-load `records`. Later duplicates of an id win the id lookup but
    /// all records stay queryable spatially.
    #[must_use]
    pub fn bulk_load(records: Vec<MarkerRecord>) -> Self {
        let slots = records.iter().enumerate().map(|(index, r)| Slot { index, envelope: to_aabb(&r.bounds) }).collect();
        let by_id = records.iter().enumerate().map(|(i, r)| (r.id.clone(), i)).collect();
        Self { records, by_id, tree: RTree::bulk_load(slots) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MarkerRecord> {
        self.by_id.get(id).and_then(|&i| self.records.get(i))
    }

    /// Every record whose bounding box intersects `area` (touching counts),
    /// in load order.
    #[must_use]
    pub fn visible(&self, area: &Bounds) -> Vec<VisiblePoint> {
        let mut hits: Vec<usize> = self.tree.locate_in_envelope_intersecting(&to_aabb(area)).map(|s| s.index).collect();
        hits.sort_unstable();
        hits.into_iter().filter_map(|i| self.records.get(i)).map(MarkerRecord::visible_point).collect()
    }

    /// The record whose centre is nearest `point` and strictly closer than
    /// `radius`. Ties go to the earliest loaded record.
    #[must_use]
    pub fn nearest_within(&self, point: Point, radius: f64) -> Option<&MarkerRecord> {
        if !point.is_finite() || radius.is_nan() || radius <= 0.0 {
            return None;
        }
        let query = to_aabb(&Bounds::around(point, radius));
        self.tree
            .locate_in_envelope_intersecting(&query)
            .filter_map(|slot| self.records.get(slot.index).map(|r| (slot.index, r.center().distance(point), r)))
            .filter(|(_, d, _)| *d < radius)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .map(|(_, _, r)| r)
    }
}
