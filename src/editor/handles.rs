//! Edit handles: pickable vertex markers over selected geometry.

use geo::{LineString, Polygon};

use crate::features::Geometry;
use crate::geometry::{planar_distance, MapCoord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// An existing coordinate of the geometry.
    Existing,
    /// A segment midpoint; clicking it inserts a new coordinate.
    Intermediate,
    /// The pivot marker shown above a selection being rotated.
    Rotate,
}

/// One pickable handle. `position_indexes` is the coordinate path for
/// `Existing` handles and the insertion path for `Intermediate` ones.
#[derive(Debug, Clone, PartialEq)]
pub struct EditHandle {
    pub position: MapCoord,
    pub position_indexes: Vec<usize>,
    pub feature_index: usize,
    pub kind: HandleKind,
}

fn midpoint(a: MapCoord, b: MapCoord) -> MapCoord {
    MapCoord {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}

/// Handles for one open coordinate run (a LineString part). Pushes an
/// existing handle per coordinate and an intermediate handle per segment.
fn line_handles(
    out: &mut Vec<EditHandle>,
    feature_index: usize,
    prefix: &[usize],
    coords: &[MapCoord],
    closed: bool,
) {
    let path = |i: usize| {
        let mut p = prefix.to_vec();
        p.push(i);
        p
    };
    for (i, &coord) in coords.iter().enumerate() {
        out.push(EditHandle {
            position: coord,
            position_indexes: path(i),
            feature_index,
            kind: HandleKind::Existing,
        });
    }
    let segments = if closed { coords.len() } else { coords.len().saturating_sub(1) };
    for i in 0..segments {
        let next = coords[(i + 1) % coords.len()];
        out.push(EditHandle {
            position: midpoint(coords[i], next),
            position_indexes: path(i + 1),
            feature_index,
            kind: HandleKind::Intermediate,
        });
    }
}

fn open_coords(ring: &LineString<f64>) -> Vec<MapCoord> {
    let mut coords = ring.0.clone();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    coords
}

fn polygon_handles(
    out: &mut Vec<EditHandle>,
    feature_index: usize,
    prefix: &[usize],
    polygon: &Polygon<f64>,
) {
    for (ring_index, ring) in std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .enumerate()
    {
        let mut ring_prefix = prefix.to_vec();
        ring_prefix.push(ring_index);
        line_handles(out, feature_index, &ring_prefix, &open_coords(ring), true);
    }
}

/// All handles for one feature's geometry.
pub fn feature_edit_handles(feature_index: usize, geometry: &Geometry) -> Vec<EditHandle> {
    let mut out = Vec::new();
    match geometry {
        Geometry::Point(p) => out.push(EditHandle {
            position: p.0,
            position_indexes: vec![],
            feature_index,
            kind: HandleKind::Existing,
        }),
        Geometry::MultiPoint(mp) => {
            for (i, p) in mp.0.iter().enumerate() {
                out.push(EditHandle {
                    position: p.0,
                    position_indexes: vec![i],
                    feature_index,
                    kind: HandleKind::Existing,
                });
            }
        }
        Geometry::LineString(ls) => line_handles(&mut out, feature_index, &[], &ls.0, false),
        Geometry::MultiLineString(mls) => {
            for (part, ls) in mls.0.iter().enumerate() {
                line_handles(&mut out, feature_index, &[part], &ls.0, false);
            }
        }
        Geometry::Polygon(poly) => polygon_handles(&mut out, feature_index, &[], poly),
        Geometry::MultiPolygon(mp) => {
            for (part, poly) in mp.0.iter().enumerate() {
                polygon_handles(&mut out, feature_index, &[part], poly);
            }
        }
    }
    out
}

/// The handle closest to `position` within `radius`, preferring existing
/// handles over intermediate ones at equal distance.
pub fn nearest_handle<'a>(
    handles: &'a [EditHandle],
    position: MapCoord,
    radius: f64,
) -> Option<&'a EditHandle> {
    let mut best: Option<(&EditHandle, f64)> = None;
    for handle in handles {
        let distance = planar_distance(handle.position, position);
        if distance > radius {
            continue;
        }
        let better = match best {
            None => true,
            Some((current, best_distance)) => {
                distance < best_distance
                    || (distance == best_distance
                        && current.kind == HandleKind::Intermediate
                        && handle.kind == HandleKind::Existing)
            }
        };
        if better {
            best = Some((handle, distance));
        }
    }
    best.map(|(handle, _)| handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, LineString, Point, Polygon};

    #[test]
    fn test_point_has_single_existing_handle() {
        let handles = feature_edit_handles(3, &Geometry::Point(Point::new(1.0, 2.0)));
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].feature_index, 3);
        assert_eq!(handles[0].kind, HandleKind::Existing);
        assert!(handles[0].position_indexes.is_empty());
    }

    #[test]
    fn test_linestring_handles() {
        let g = Geometry::LineString(LineString::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 2.0, y: 0.0 },
            coord! { x: 4.0, y: 0.0 },
        ]));
        let handles = feature_edit_handles(0, &g);
        // 3 vertices, 2 midpoints
        assert_eq!(handles.len(), 5);
        let mids: Vec<_> = handles
            .iter()
            .filter(|h| h.kind == HandleKind::Intermediate)
            .collect();
        assert_eq!(mids.len(), 2);
        assert_eq!(mids[0].position, coord! { x: 1.0, y: 0.0 });
        assert_eq!(mids[0].position_indexes, vec![1]);
    }

    #[test]
    fn test_polygon_closing_segment_gets_midpoint() {
        let g = Geometry::Polygon(Polygon::new(
            LineString::new(vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 4.0, y: 0.0 },
                coord! { x: 4.0, y: 4.0 },
                coord! { x: 0.0, y: 4.0 },
            ]),
            vec![],
        ));
        let handles = feature_edit_handles(0, &g);
        // 4 vertices, 4 midpoints (closing segment included)
        assert_eq!(handles.len(), 8);
        let closing = handles
            .iter()
            .find(|h| {
                h.kind == HandleKind::Intermediate && h.position == coord! { x: 0.0, y: 2.0 }
            })
            .unwrap();
        // Inserting at the ring length appends before the implicit close
        assert_eq!(closing.position_indexes, vec![0, 4]);
    }

    #[test]
    fn test_nearest_handle_respects_radius_and_prefers_existing() {
        let g = Geometry::LineString(LineString::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 2.0, y: 0.0 },
        ]));
        let handles = feature_edit_handles(0, &g);

        assert!(nearest_handle(&handles, coord! { x: 10.0, y: 10.0 }, 1.0).is_none());

        let near_vertex = nearest_handle(&handles, coord! { x: 0.1, y: 0.0 }, 0.5).unwrap();
        assert_eq!(near_vertex.kind, HandleKind::Existing);

        let near_mid = nearest_handle(&handles, coord! { x: 1.0, y: 0.1 }, 0.5).unwrap();
        assert_eq!(near_mid.kind, HandleKind::Intermediate);
    }
}
