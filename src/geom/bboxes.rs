use crate::geom::point::Point2;

/// Returns the (min, max) corners of the box holding all points `pts`.
///
/// Returns `None` for an empty slice. NaN coordinates are ignored.
pub fn bounding_box(pts: &[Point2]) -> Option<(Point2, Point2)> {
    if pts.is_empty() {
        return None;
    }
    let mut pmin = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut pmax = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in pts {
        pmin.x = pmin.x.min(p.x);
        pmin.y = pmin.y.min(p.y);
        pmax.x = pmax.x.max(p.x);
        pmax.y = pmax.y.max(p.y);
    }
    Some((pmin, pmax))
}

/// Checks whether a point lies within the box `[pmin, pmax]` (boundary included).
///
/// Each axis is tested on its own: a point is rejected as soon as its x or its
/// y falls outside the data range on that axis.
pub fn is_point_inside_bbox(ptest: Point2, pmin: Point2, pmax: Point2) -> bool {
    ptest.x >= pmin.x && ptest.x <= pmax.x && ptest.y >= pmin.y && ptest.y <= pmax.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let pts = vec![
            Point2::new(0.5, -1.0),
            Point2::new(2.0, 3.0),
            Point2::new(-1.0, 0.0),
        ];
        let (pmin, pmax) = bounding_box(&pts).unwrap();
        assert_eq!(pmin, Point2::new(-1.0, -1.0));
        assert_eq!(pmax, Point2::new(2.0, 3.0));
    }

    #[test]
    fn test_bounding_box_empty() {
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn test_is_point_inside_bbox() {
        let pmin = Point2::new(0., 0.);
        let pmax = Point2::new(1., 2.);
        assert!(is_point_inside_bbox(Point2::new(0.5, 1.5), pmin, pmax));
        assert!(is_point_inside_bbox(Point2::new(1.0, 0.0), pmin, pmax)); // corner
        assert!(!is_point_inside_bbox(Point2::new(1.5, 1.0), pmin, pmax)); // x out
        assert!(!is_point_inside_bbox(Point2::new(0.5, -0.1), pmin, pmax)); // y out
        assert!(!is_point_inside_bbox(Point2::new(f64::NAN, 0.5), pmin, pmax));
    }
}
