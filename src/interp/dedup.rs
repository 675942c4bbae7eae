//! Removal of repeated source coordinates.
//!
//! Mesh dumps list every node once per element that uses it, so shared nodes
//! show up several times. The triangulation needs each coordinate once.

use std::collections::HashMap;

use crate::error::{InterpError, InterpResult};
use crate::geom::point::Point2;
use crate::interp::PointSet;

/// Exact coordinate key. `0.0` and `-0.0` map to the same key.
#[derive(Hash, Eq, PartialEq)]
struct CoordKey(u64, u64);

impl CoordKey {
    fn new(p: Point2) -> Self {
        CoordKey((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
    }
}

/// Collapses points with identical `(x, y)` into one.
///
/// The first occurrence of each coordinate wins: its position in the output
/// follows the order of first appearance and its value is kept, later
/// duplicates are dropped. Equality is exact, no tolerance is applied.
pub fn deduplicate(points: &[Point2], values: &[f64]) -> InterpResult<PointSet> {
    if points.len() != values.len() {
        return Err(InterpError::dimension_mismatch(
            points.len(),
            values.len(),
            "deduplicate: points vs values",
        ));
    }

    let mut seen: HashMap<CoordKey, usize> = HashMap::with_capacity(points.len());
    let mut unique_points = Vec::new();
    let mut unique_values = Vec::new();

    for (p, v) in points.iter().zip(values) {
        seen.entry(CoordKey::new(*p)).or_insert_with(|| {
            unique_points.push(*p);
            unique_values.push(*v);
            unique_points.len() - 1
        });
    }

    tracing::debug!(
        input = points.len(),
        unique = unique_points.len(),
        "deduplicated source points"
    );

    Ok(PointSet {
        points: unique_points,
        values: unique_values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_wins() -> InterpResult<()> {
        let points = vec![
            Point2::new(0., 0.),
            Point2::new(1., 0.),
            Point2::new(0., 0.),
            Point2::new(0., 1.),
            Point2::new(1., 0.),
        ];
        let values = vec![1.0, 2.0, 10.0, 3.0, 20.0];
        let set = deduplicate(&points, &values)?;
        assert_eq!(
            set.points,
            vec![Point2::new(0., 0.), Point2::new(1., 0.), Point2::new(0., 1.)]
        );
        assert_eq!(set.values, vec![1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_idempotent() -> InterpResult<()> {
        let points: Vec<Point2> = (0..40)
            .map(|i| Point2::new((i % 7) as f64, (i % 5) as f64))
            .collect();
        let values: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let once = deduplicate(&points, &values)?;
        let twice = deduplicate(&once.points, &once.values)?;
        assert_eq!(once, twice);
        Ok(())
    }

    #[test]
    fn test_exact_equality_only() -> InterpResult<()> {
        let points = vec![Point2::new(0., 0.), Point2::new(1e-300, 0.)];
        let set = deduplicate(&points, &[1.0, 2.0])?;
        assert_eq!(set.len(), 2);
        Ok(())
    }

    #[test]
    fn test_signed_zero_is_one_coordinate() -> InterpResult<()> {
        let points = vec![Point2::new(0., 1.), Point2::new(-0., 1.)];
        let set = deduplicate(&points, &[5.0, 6.0])?;
        assert_eq!(set.values, vec![5.0]);
        Ok(())
    }

    #[test]
    fn test_length_mismatch() {
        let err = deduplicate(&[Point2::new(0., 0.)], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, InterpError::DimensionMismatch { .. }));
    }
}
