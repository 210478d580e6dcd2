//! The fixed point cloud.

use super::util;
use crate::error::{Error, Result};

/// Immutable 2D coordinates plus optional per-point hover text.
///
/// Point identity is the index into the coordinate list; nothing here changes after
/// construction.
#[derive(Debug, Clone)]
pub struct PointStore {
    coords: Vec<(f32, f32)>,
    metadata: Option<Vec<String>>,
}

impl PointStore {
    /// Create a store from `N` coordinates and an optional parallel list of `N` hover strings.
    pub fn new(coords: Vec<(f32, f32)>, metadata: Option<Vec<String>>) -> Result<Self> {
        if let Some(meta) = &metadata {
            if meta.len() != coords.len() {
                return Err(Error::LengthMismatch {
                    what: "metadata",
                    expected: coords.len(),
                    found: meta.len(),
                });
            }
        }
        Ok(Self { coords, metadata })
    }

    /// Number of points `N`.
    pub fn count(&self) -> usize {
        self.coords.len()
    }

    /// All coordinates in index order.
    pub fn coordinates(&self) -> &[(f32, f32)] {
        &self.coords
    }

    /// Coordinates of point `index`.
    pub fn coordinates_of(&self, index: usize) -> Result<(f32, f32)> {
        self.coords.get(index).copied().ok_or(Error::OutOfRange {
            index,
            len: self.coords.len(),
        })
    }

    /// Hover text for a point, or `None` when the session was built without metadata.
    pub fn metadata_of(&self, index: usize) -> Result<Option<&str>> {
        self.check(index)?;
        Ok(self.metadata.as_ref().map(|m| m[index].as_str()))
    }

    /// Fail with [`Error::OutOfRange`] unless `index < N`.
    pub fn check(&self, index: usize) -> Result<()> {
        if index < self.coords.len() {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                index,
                len: self.coords.len(),
            })
        }
    }

    /// The point closest to `(x, y)`, if it lies within `radius`.
    ///
    /// Ties go to the lowest index.
    pub fn nearest_within(&self, x: f32, y: f32, radius: f32) -> Option<usize> {
        let limit = radius * radius;
        let mut best: Option<(usize, f32)> = None;
        for (i, &p) in self.coords.iter().enumerate() {
            let d = util::squared_euclidean(p, (x, y));
            if d > limit {
                continue;
            }
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Indices of all points inside a closed lasso polygon, ascending.
    pub fn inside_polygon(&self, polygon: &[(f32, f32)]) -> Vec<usize> {
        let Some((min_x, min_y, max_x, max_y)) = util::bounds(polygon) else {
            return Vec::new();
        };
        self.coords
            .iter()
            .enumerate()
            .filter(|&(_, &(x, y))| x >= min_x && x <= max_x && y >= min_y && y <= max_y)
            .filter(|&(_, &p)| util::point_in_polygon(p, polygon))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> PointStore {
        // 3x3 grid at integer coordinates.
        let coords = (0..9).map(|i| ((i % 3) as f32, (i / 3) as f32)).collect();
        PointStore::new(coords, None).unwrap()
    }

    #[test]
    fn metadata_length_must_match() {
        let err = PointStore::new(vec![(0.0, 0.0), (1.0, 1.0)], Some(vec!["a".into()]))
            .unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                what: "metadata",
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn lookups_are_bounds_checked() {
        let store =
            PointStore::new(vec![(1.0, 2.0)], Some(vec!["hover".to_string()])).unwrap();
        assert_eq!(store.count(), 1);
        assert_eq!(store.coordinates_of(0).unwrap(), (1.0, 2.0));
        assert_eq!(store.metadata_of(0).unwrap(), Some("hover"));
        assert_eq!(
            store.coordinates_of(1),
            Err(Error::OutOfRange { index: 1, len: 1 })
        );
        assert!(store.metadata_of(5).is_err());
    }

    #[test]
    fn missing_metadata_is_none() {
        let store = grid();
        assert_eq!(store.metadata_of(4).unwrap(), None);
    }

    #[test]
    fn nearest_within_radius() {
        let store = grid();
        assert_eq!(store.nearest_within(1.1, 0.9, 0.5), Some(4));
        assert_eq!(store.nearest_within(0.5, 0.5, 0.1), None);
        // Equidistant from 0 and 1: lowest index wins.
        assert_eq!(store.nearest_within(0.5, 0.0, 0.5), Some(0));
    }

    #[test]
    fn lasso_selects_interior_points() {
        let store = grid();
        let triangle = [(-0.5, -0.5), (2.5, -0.5), (-0.5, 2.5)];
        assert_eq!(store.inside_polygon(&triangle), vec![0, 1, 3]);
        assert!(store.inside_polygon(&[(0.0, 0.0), (2.0, 2.0)]).is_empty());
    }
}
