//! Geometry variants and position-path coordinate editing.
//!
//! A position path addresses one coordinate inside a geometry by nested
//! index: `[]` for a Point, `[i]` for LineString/MultiPoint, `[ring, i]` for
//! Polygon, `[part, i]` for MultiLineString, and `[part, ring, i]` for
//! MultiPolygon. Polygon rings are addressed without the closing duplicate
//! coordinate; rebuilding through `Polygon::new` re-closes them.

use geo::{
    AffineOps, AffineTransform, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

use crate::geometry::MapCoord;

/// A GeoJSON geometry, backed by geo-types.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point<f64>),
    MultiPoint(MultiPoint<f64>),
    LineString(LineString<f64>),
    MultiLineString(MultiLineString<f64>),
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

/// Ring coordinates without the closing duplicate.
fn open_ring(ring: &LineString<f64>) -> Vec<MapCoord> {
    let mut coords = ring.0.clone();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    coords
}

/// Insert into an open coordinate list; `index` may equal `len` (append).
fn insert_coord(coords: &mut Vec<MapCoord>, index: usize, position: MapCoord) -> Option<()> {
    if index > coords.len() {
        return None;
    }
    coords.insert(index, position);
    Some(())
}

fn rebuild_polygon(rings: Vec<Vec<MapCoord>>) -> Polygon<f64> {
    let mut iter = rings.into_iter().map(|r| LineString::new(r));
    let exterior = iter.next().unwrap_or_else(|| LineString::new(vec![]));
    Polygon::new(exterior, iter.collect())
}

/// Edit one ring of a polygon through `op`, returning the rebuilt polygon.
fn edit_polygon_ring(
    polygon: &Polygon<f64>,
    ring_index: usize,
    op: impl FnOnce(&mut Vec<MapCoord>) -> Option<()>,
) -> Option<Polygon<f64>> {
    let mut rings: Vec<Vec<MapCoord>> = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(open_ring)
        .collect();
    op(rings.get_mut(ring_index)?)?;
    Some(rebuild_polygon(rings))
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// The coordinate at a position path, if the path is valid.
    pub fn position_at(&self, path: &[usize]) -> Option<MapCoord> {
        match (self, path) {
            (Geometry::Point(p), []) => Some(p.0),
            (Geometry::MultiPoint(mp), [i]) => mp.0.get(*i).map(|p| p.0),
            (Geometry::LineString(ls), [i]) => ls.0.get(*i).copied(),
            (Geometry::MultiLineString(mls), [part, i]) => {
                mls.0.get(*part).and_then(|ls| ls.0.get(*i)).copied()
            }
            (Geometry::Polygon(poly), [ring, i]) => std::iter::once(poly.exterior())
                .chain(poly.interiors())
                .nth(*ring)
                .and_then(|r| open_ring(r).get(*i).copied()),
            (Geometry::MultiPolygon(mp), [part, ring, i]) => mp
                .0
                .get(*part)
                .and_then(|poly| Geometry::Polygon(poly.clone()).position_at(&[*ring, *i])),
            _ => None,
        }
    }

    /// Insert a coordinate at the position path. The final path index may
    /// equal the part length (append). Returns `None` for invalid paths or
    /// geometries that cannot grow (Point).
    pub fn insert_position(&self, path: &[usize], position: MapCoord) -> Option<Geometry> {
        match (self, path) {
            (Geometry::MultiPoint(mp), [i]) => {
                if *i > mp.0.len() {
                    return None;
                }
                let mut points = mp.0.clone();
                points.insert(*i, Point::from(position));
                Some(Geometry::MultiPoint(MultiPoint::new(points)))
            }
            (Geometry::LineString(ls), [i]) => {
                let mut coords = ls.0.clone();
                insert_coord(&mut coords, *i, position)?;
                Some(Geometry::LineString(LineString::new(coords)))
            }
            (Geometry::MultiLineString(mls), [part, i]) => {
                let mut parts: Vec<Vec<MapCoord>> = mls.0.iter().map(|ls| ls.0.clone()).collect();
                insert_coord(parts.get_mut(*part)?, *i, position)?;
                Some(Geometry::MultiLineString(MultiLineString::new(
                    parts.into_iter().map(LineString::new).collect(),
                )))
            }
            (Geometry::Polygon(poly), [ring, i]) => {
                edit_polygon_ring(poly, *ring, |coords| insert_coord(coords, *i, position))
                    .map(Geometry::Polygon)
            }
            (Geometry::MultiPolygon(mp), [part, ring, i]) => {
                let mut polygons = mp.0.clone();
                let target = polygons.get_mut(*part)?;
                *target =
                    edit_polygon_ring(target, *ring, |coords| insert_coord(coords, *i, position))?;
                Some(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
            }
            _ => None,
        }
    }

    /// Replace the coordinate at the position path.
    pub fn move_position(&self, path: &[usize], position: MapCoord) -> Option<Geometry> {
        match (self, path) {
            (Geometry::Point(_), []) => Some(Geometry::Point(Point::from(position))),
            (Geometry::MultiPoint(mp), [i]) => {
                let mut points = mp.0.clone();
                *points.get_mut(*i)? = Point::from(position);
                Some(Geometry::MultiPoint(MultiPoint::new(points)))
            }
            (Geometry::LineString(ls), [i]) => {
                let mut coords = ls.0.clone();
                *coords.get_mut(*i)? = position;
                Some(Geometry::LineString(LineString::new(coords)))
            }
            (Geometry::MultiLineString(mls), [part, i]) => {
                let mut parts: Vec<Vec<MapCoord>> = mls.0.iter().map(|ls| ls.0.clone()).collect();
                *parts.get_mut(*part)?.get_mut(*i)? = position;
                Some(Geometry::MultiLineString(MultiLineString::new(
                    parts.into_iter().map(LineString::new).collect(),
                )))
            }
            (Geometry::Polygon(poly), [ring, i]) => edit_polygon_ring(poly, *ring, |coords| {
                *coords.get_mut(*i)? = position;
                Some(())
            })
            .map(Geometry::Polygon),
            (Geometry::MultiPolygon(mp), [part, ring, i]) => {
                let mut polygons = mp.0.clone();
                let target = polygons.get_mut(*part)?;
                *target = edit_polygon_ring(target, *ring, |coords| {
                    *coords.get_mut(*i)? = position;
                    Some(())
                })?;
                Some(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
            }
            _ => None,
        }
    }

    /// Remove the coordinate at the position path.
    ///
    /// Refuses removals that would make the geometry degenerate: a
    /// LineString keeps at least 2 coordinates, a polygon ring at least 3
    /// distinct ones, a MultiPoint at least one point.
    pub fn remove_position(&self, path: &[usize]) -> Option<Geometry> {
        let remove_guarded = |coords: &mut Vec<MapCoord>, index: usize, min_len: usize| {
            if coords.len() <= min_len || index >= coords.len() {
                return None;
            }
            coords.remove(index);
            Some(())
        };

        match (self, path) {
            (Geometry::MultiPoint(mp), [i]) => {
                if mp.0.len() <= 1 || *i >= mp.0.len() {
                    return None;
                }
                let mut points = mp.0.clone();
                points.remove(*i);
                Some(Geometry::MultiPoint(MultiPoint::new(points)))
            }
            (Geometry::LineString(ls), [i]) => {
                let mut coords = ls.0.clone();
                remove_guarded(&mut coords, *i, 2)?;
                Some(Geometry::LineString(LineString::new(coords)))
            }
            (Geometry::MultiLineString(mls), [part, i]) => {
                let mut parts: Vec<Vec<MapCoord>> = mls.0.iter().map(|ls| ls.0.clone()).collect();
                remove_guarded(parts.get_mut(*part)?, *i, 2)?;
                Some(Geometry::MultiLineString(MultiLineString::new(
                    parts.into_iter().map(LineString::new).collect(),
                )))
            }
            (Geometry::Polygon(poly), [ring, i]) => {
                edit_polygon_ring(poly, *ring, |coords| remove_guarded(coords, *i, 3))
                    .map(Geometry::Polygon)
            }
            (Geometry::MultiPolygon(mp), [part, ring, i]) => {
                let mut polygons = mp.0.clone();
                let target = polygons.get_mut(*part)?;
                *target = edit_polygon_ring(target, *ring, |coords| {
                    remove_guarded(coords, *i, 3)
                })?;
                Some(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
            }
            _ => None,
        }
    }

    /// Apply an affine transform, returning the transformed geometry.
    pub fn affine(&self, transform: &AffineTransform<f64>) -> Geometry {
        match self {
            Geometry::Point(g) => Geometry::Point(g.affine_transform(transform)),
            Geometry::MultiPoint(g) => Geometry::MultiPoint(g.affine_transform(transform)),
            Geometry::LineString(g) => Geometry::LineString(g.affine_transform(transform)),
            Geometry::MultiLineString(g) => {
                Geometry::MultiLineString(g.affine_transform(transform))
            }
            Geometry::Polygon(g) => Geometry::Polygon(g.affine_transform(transform)),
            Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.affine_transform(transform)),
        }
    }

    /// Clone into the geo crate's general geometry for use with its
    /// algorithm traits.
    pub fn to_geo(&self) -> geo::Geometry<f64> {
        match self {
            Geometry::Point(g) => geo::Geometry::Point(*g),
            Geometry::MultiPoint(g) => geo::Geometry::MultiPoint(g.clone()),
            Geometry::LineString(g) => geo::Geometry::LineString(g.clone()),
            Geometry::MultiLineString(g) => geo::Geometry::MultiLineString(g.clone()),
            Geometry::Polygon(g) => geo::Geometry::Polygon(g.clone()),
            Geometry::MultiPolygon(g) => geo::Geometry::MultiPolygon(g.clone()),
        }
    }

    /// Convert to the geojson crate's geometry value.
    pub fn to_geojson_value(&self) -> geojson::Value {
        let pos = |c: &MapCoord| vec![c.x, c.y];
        let line = |ls: &LineString<f64>| ls.0.iter().map(pos).collect::<Vec<_>>();
        let rings = |poly: &Polygon<f64>| {
            std::iter::once(poly.exterior())
                .chain(poly.interiors())
                .map(line)
                .collect::<Vec<_>>()
        };

        match self {
            Geometry::Point(p) => geojson::Value::Point(vec![p.x(), p.y()]),
            Geometry::MultiPoint(mp) => {
                geojson::Value::MultiPoint(mp.0.iter().map(|p| vec![p.x(), p.y()]).collect())
            }
            Geometry::LineString(ls) => geojson::Value::LineString(line(ls)),
            Geometry::MultiLineString(mls) => {
                geojson::Value::MultiLineString(mls.0.iter().map(line).collect())
            }
            Geometry::Polygon(poly) => geojson::Value::Polygon(rings(poly)),
            Geometry::MultiPolygon(mp) => {
                geojson::Value::MultiPolygon(mp.0.iter().map(rings).collect())
            }
        }
    }

    /// Parse from a geojson geometry value.
    ///
    /// Returns `None` for positions with fewer than two ordinates and for
    /// geometry types the editor does not handle (GeometryCollection).
    pub fn from_geojson_value(value: &geojson::Value) -> Option<Geometry> {
        let coord = |p: &Vec<f64>| {
            if p.len() < 2 {
                None
            } else {
                Some(MapCoord { x: p[0], y: p[1] })
            }
        };
        let line = |positions: &Vec<Vec<f64>>| {
            positions
                .iter()
                .map(coord)
                .collect::<Option<Vec<_>>>()
                .map(LineString::new)
        };
        let polygon = |rings: &Vec<Vec<Vec<f64>>>| {
            let mut parsed = rings.iter().map(line).collect::<Option<Vec<_>>>()?;
            if parsed.is_empty() {
                return None;
            }
            let exterior = parsed.remove(0);
            Some(Polygon::new(exterior, parsed))
        };

        match value {
            geojson::Value::Point(p) => Some(Geometry::Point(Point::from(coord(p)?))),
            geojson::Value::MultiPoint(ps) => {
                let points = ps
                    .iter()
                    .map(|p| coord(p).map(Point::from))
                    .collect::<Option<Vec<_>>>()?;
                Some(Geometry::MultiPoint(MultiPoint::new(points)))
            }
            geojson::Value::LineString(ls) => Some(Geometry::LineString(line(ls)?)),
            geojson::Value::MultiLineString(mls) => {
                let lines = mls.iter().map(line).collect::<Option<Vec<_>>>()?;
                Some(Geometry::MultiLineString(MultiLineString::new(lines)))
            }
            geojson::Value::Polygon(rings) => Some(Geometry::Polygon(polygon(rings)?)),
            geojson::Value::MultiPolygon(parts) => {
                let polygons = parts.iter().map(polygon).collect::<Option<Vec<_>>>()?;
                Some(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
            }
            geojson::Value::GeometryCollection(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn square() -> Geometry {
        Geometry::Polygon(Polygon::new(
            LineString::new(vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 10.0, y: 0.0 },
                coord! { x: 10.0, y: 10.0 },
                coord! { x: 0.0, y: 10.0 },
            ]),
            vec![],
        ))
    }

    #[test]
    fn test_position_at_polygon_skips_closing_coord() {
        let g = square();
        assert_eq!(g.position_at(&[0, 3]), Some(coord! { x: 0.0, y: 10.0 }));
        // Index 4 would be the closing duplicate; it is not addressable
        assert_eq!(g.position_at(&[0, 4]), None);
    }

    #[test]
    fn test_insert_position_linestring_append() {
        let g = Geometry::LineString(LineString::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
        ]));
        let extended = g.insert_position(&[2], coord! { x: 2.0, y: 2.0 }).unwrap();
        match extended {
            Geometry::LineString(ls) => {
                assert_eq!(ls.0.len(), 3);
                assert_eq!(ls.0[2], coord! { x: 2.0, y: 2.0 });
            }
            other => panic!("expected LineString, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_insert_position_out_of_bounds() {
        let g = Geometry::LineString(LineString::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
        ]));
        assert!(g.insert_position(&[5], coord! { x: 2.0, y: 2.0 }).is_none());
    }

    #[test]
    fn test_insert_position_into_point_fails() {
        let g = Geometry::Point(Point::new(0.0, 0.0));
        assert!(g.insert_position(&[0], coord! { x: 1.0, y: 1.0 }).is_none());
    }

    #[test]
    fn test_move_position_polygon_ring_stays_closed() {
        let moved = square()
            .move_position(&[0, 1], coord! { x: 12.0, y: -1.0 })
            .unwrap();
        match moved {
            Geometry::Polygon(poly) => {
                assert_eq!(poly.exterior().0[1], coord! { x: 12.0, y: -1.0 });
                assert_eq!(poly.exterior().0.first(), poly.exterior().0.last());
            }
            other => panic!("expected Polygon, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_remove_position_guards_minimum_ring() {
        let triangle = Geometry::Polygon(Polygon::new(
            LineString::new(vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 1.0, y: 0.0 },
                coord! { x: 0.0, y: 1.0 },
            ]),
            vec![],
        ));
        assert!(triangle.remove_position(&[0, 0]).is_none());
        // A square can lose one vertex
        assert!(square().remove_position(&[0, 0]).is_some());
    }

    #[test]
    fn test_remove_position_guards_two_point_line() {
        let g = Geometry::LineString(LineString::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
        ]));
        assert!(g.remove_position(&[0]).is_none());
    }

    #[test]
    fn test_geojson_round_trip_polygon() {
        let g = square();
        let value = g.to_geojson_value();
        let parsed = Geometry::from_geojson_value(&value).unwrap();
        assert_eq!(g, parsed);
    }

    #[test]
    fn test_from_geojson_rejects_short_positions() {
        let value = geojson::Value::Point(vec![1.0]);
        assert!(Geometry::from_geojson_value(&value).is_none());
    }

    #[test]
    fn test_affine_translate() {
        let g = Geometry::Point(Point::new(1.0, 2.0));
        let moved = g.affine(&AffineTransform::translate(3.0, -1.0));
        assert_eq!(moved, Geometry::Point(Point::new(4.0, 1.0)));
    }
}
