//! Point registry - tolerance-based deduplication of 3D coordinates

use std::collections::HashMap;

use super::Point3;

type CellKey = (i64, i64, i64);

/// Assigns stable indices to points, treating two points as the same entity
/// when they are closer than `tolerance`.
///
/// Points are hashed into cubic cells of edge `tolerance`, so a lookup only
/// inspects the 27 cells around the query instead of every registered point.
#[derive(Debug, Clone)]
pub struct PointRegistry {
    tolerance: f64,
    points: Vec<Point3>,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl PointRegistry {
    /// Create an empty registry. Non-positive tolerances collapse to machine epsilon.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(f64::EPSILON),
            points: Vec::new(),
            cells: HashMap::new(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Number of distinct points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Registered points in index order
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Register a point, returning the index of an existing match if one is in tolerance
    pub fn register(&mut self, point: &Point3) -> usize {
        if let Some(index) = self.find(point) {
            return index;
        }
        let index = self.points.len();
        self.points.push(*point);
        self.cells.entry(self.cell_of(point)).or_default().push(index);
        index
    }

    /// Look up the index of a point within tolerance
    pub fn find(&self, point: &Point3) -> Option<usize> {
        let (cx, cy, cz) = self.cell_of(point);
        let mut best: Option<(usize, f64)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    // Keys saturate far from the origin
                    let key = (cx.saturating_add(dx), cy.saturating_add(dy), cz.saturating_add(dz));
                    let Some(bucket) = self.cells.get(&key) else {
                        continue;
                    };
                    for &index in bucket {
                        let distance = (self.points[index] - point).norm();
                        if distance <= self.tolerance
                            && best.map_or(true, |(_, d)| distance < d)
                        {
                            best = Some((index, distance));
                        }
                    }
                }
            }
        }
        best.map(|(index, _)| index)
    }

    fn cell_of(&self, point: &Point3) -> CellKey {
        let key = |c: f64| (c / self.tolerance).floor() as i64;
        (key(point.x), key(point.y), key(point.z))
    }
}

impl Default for PointRegistry {
    fn default() -> Self {
        Self::new(1e-9)
    }
}
