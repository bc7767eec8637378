//! Feature hit testing for selection clicks.

use geo::{Contains, Point};

use crate::features::{FeatureCollection, Geometry};
use crate::geometry::{planar_distance, point_near_segment, MapCoord};

/// True when `position` hits the geometry within `radius` map units.
///
/// Points and lines are picked by distance; polygons by containment or by
/// proximity to a ring.
pub fn geometry_hit(geometry: &Geometry, position: MapCoord, radius: f64) -> bool {
    let near_line = |ls: &geo::LineString<f64>| {
        ls.lines()
            .any(|seg| point_near_segment(position, seg.start, seg.end, radius))
    };
    let polygon_hit = |poly: &geo::Polygon<f64>| {
        poly.contains(&Point::from(position))
            || std::iter::once(poly.exterior())
                .chain(poly.interiors())
                .any(near_line)
    };

    match geometry {
        Geometry::Point(p) => planar_distance(p.0, position) <= radius,
        Geometry::MultiPoint(mp) => mp.0.iter().any(|p| planar_distance(p.0, position) <= radius),
        Geometry::LineString(ls) => near_line(ls),
        Geometry::MultiLineString(mls) => mls.0.iter().any(near_line),
        Geometry::Polygon(poly) => polygon_hit(poly),
        Geometry::MultiPolygon(mp) => mp.0.iter().any(polygon_hit),
    }
}

/// Index of the topmost feature under `position`, scanning from the end of
/// the collection so later features win.
pub fn pick_feature(data: &FeatureCollection, position: MapCoord, radius: f64) -> Option<usize> {
    data.features()
        .iter()
        .enumerate()
        .rev()
        .find(|(_, feature)| geometry_hit(&feature.geometry, position, radius))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Feature;
    use geo::{coord, LineString, Polygon};

    fn square(offset: f64) -> Feature {
        Feature::new(Geometry::Polygon(Polygon::new(
            LineString::new(vec![
                coord! { x: offset, y: 0.0 },
                coord! { x: offset + 10.0, y: 0.0 },
                coord! { x: offset + 10.0, y: 10.0 },
                coord! { x: offset, y: 10.0 },
            ]),
            vec![],
        )))
    }

    #[test]
    fn test_pick_point_by_radius() {
        let data = FeatureCollection::from_features(vec![Feature::new(Geometry::Point(
            Point::new(5.0, 5.0),
        ))]);
        assert_eq!(pick_feature(&data, coord! { x: 5.3, y: 5.0 }, 0.5), Some(0));
        assert_eq!(pick_feature(&data, coord! { x: 7.0, y: 5.0 }, 0.5), None);
    }

    #[test]
    fn test_pick_line_by_projection() {
        let data = FeatureCollection::from_features(vec![Feature::new(Geometry::LineString(
            LineString::new(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }]),
        ))]);
        assert_eq!(pick_feature(&data, coord! { x: 5.0, y: 0.4 }, 0.5), Some(0));
        assert_eq!(pick_feature(&data, coord! { x: 5.0, y: 2.0 }, 0.5), None);
    }

    #[test]
    fn test_pick_polygon_interior() {
        let data = FeatureCollection::from_features(vec![square(0.0)]);
        assert_eq!(pick_feature(&data, coord! { x: 5.0, y: 5.0 }, 0.5), Some(0));
    }

    #[test]
    fn test_overlapping_features_pick_topmost() {
        let data = FeatureCollection::from_features(vec![square(0.0), square(5.0)]);
        // Overlap region belongs to the later feature
        assert_eq!(pick_feature(&data, coord! { x: 7.0, y: 5.0 }, 0.5), Some(1));
        // Left-only region still picks the first
        assert_eq!(pick_feature(&data, coord! { x: 2.0, y: 5.0 }, 0.5), Some(0));
    }
}
