//! Bounding rectangle and bounding circle computation.

use geo::{BoundingRect, CoordsIter, Geometry, Rect};

use super::line::planar_distance;
use super::MapCoord;

/// Axis-aligned bounding rectangle of a geometry, `None` when empty.
pub fn geometry_bounds(geometry: &Geometry<f64>) -> Option<Rect<f64>> {
    geometry.bounding_rect()
}

/// Combined bounding rectangle over a set of geometries.
pub fn features_bounds<'a>(geometries: impl Iterator<Item = &'a Geometry<f64>>) -> Option<Rect<f64>> {
    let mut combined: Option<Rect<f64>> = None;

    for rect in geometries.filter_map(|g| g.bounding_rect()) {
        combined = Some(match combined {
            None => rect,
            Some(acc) => Rect::new(
                MapCoord {
                    x: acc.min().x.min(rect.min().x),
                    y: acc.min().y.min(rect.min().y),
                },
                MapCoord {
                    x: acc.max().x.max(rect.max().x),
                    y: acc.max().y.max(rect.max().y),
                },
            ),
        });
    }

    combined
}

/// Smallest circle centered on the bounding-rect center that encloses every
/// coordinate of the geometry.
pub fn bounding_circle(geometry: &Geometry<f64>) -> Option<(MapCoord, f64)> {
    let center = geometry_bounds(geometry)?.center();
    let radius = geometry
        .coords_iter()
        .map(|c| planar_distance(center, c))
        .fold(0.0_f64, f64::max);
    Some((center, radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, LineString, Point, Polygon};

    #[test]
    fn test_features_bounds_combines() {
        let a = Geometry::Point(Point::new(0.0, 0.0));
        let b = Geometry::Point(Point::new(4.0, -2.0));
        let rect = features_bounds([&a, &b].into_iter()).unwrap();
        assert_eq!(rect.min(), coord! { x: 0.0, y: -2.0 });
        assert_eq!(rect.max(), coord! { x: 4.0, y: 0.0 });
    }

    #[test]
    fn test_features_bounds_empty() {
        assert!(features_bounds([].into_iter()).is_none());
    }

    #[test]
    fn test_bounding_circle_of_square() {
        let square = Geometry::Polygon(Polygon::new(
            LineString::new(vec![
                coord! { x: -1.0, y: -1.0 },
                coord! { x: 1.0, y: -1.0 },
                coord! { x: 1.0, y: 1.0 },
                coord! { x: -1.0, y: 1.0 },
            ]),
            vec![],
        ));
        let (center, radius) = bounding_circle(&square).unwrap();
        assert_eq!(center, coord! { x: 0.0, y: 0.0 });
        assert!((radius - 2f64.sqrt()).abs() < 1e-12);
    }
}
