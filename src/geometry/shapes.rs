//! Shape generation: circles, rectangles, and corridor buffers.

use geo::{BooleanOps, LineString, MultiPolygon, Polygon};

use crate::constants::{MIN_CIRCLE_RADIUS, MIN_CIRCLE_STEPS};

use super::line::planar_distance;
use super::MapCoord;

/// Positions along a circular arc around `center`, inclusive of both ends.
///
/// `steps` is the number of segments, clamped to at least 1.
pub fn arc_positions(
    center: MapCoord,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    steps: u32,
) -> Vec<MapCoord> {
    let steps = steps.max(1);
    let sweep = end_angle - start_angle;

    (0..=steps)
        .map(|i| {
            let angle = start_angle + sweep * f64::from(i) / f64::from(steps);
            MapCoord {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
        })
        .collect()
}

/// Tessellate a circle into a polygon.
///
/// `steps` below [`MIN_CIRCLE_STEPS`] is clamped up; the radius is clamped to
/// [`MIN_CIRCLE_RADIUS`] so a zero-length drag still yields a valid ring.
pub fn circle_polygon(center: MapCoord, radius: f64, steps: u32) -> Polygon<f64> {
    let steps = steps.max(MIN_CIRCLE_STEPS);
    let radius = radius.max(MIN_CIRCLE_RADIUS);

    // Drop the duplicated end position; Polygon::new closes the ring.
    let mut ring = arc_positions(center, radius, 0.0, std::f64::consts::TAU, steps);
    ring.pop();

    Polygon::new(LineString::new(ring), vec![])
}

/// Axis-aligned rectangle polygon spanning two opposite corners.
pub fn rectangle_polygon(a: MapCoord, b: MapCoord) -> Polygon<f64> {
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));

    Polygon::new(
        LineString::new(vec![
            MapCoord { x: min_x, y: min_y },
            MapCoord { x: max_x, y: min_y },
            MapCoord { x: max_x, y: max_y },
            MapCoord { x: min_x, y: max_y },
        ]),
        vec![],
    )
}

/// Buffer a polyline into a corridor of the given total width.
///
/// Each segment becomes a square-capped quad; quads are unioned so corners
/// and self-overlaps dissolve into one area. Returns an empty MultiPolygon
/// for degenerate input (fewer than two coordinates or non-positive width).
pub fn corridor(line: &LineString<f64>, width: f64) -> MultiPolygon<f64> {
    if line.0.len() < 2 || width <= 0.0 {
        return MultiPolygon::new(vec![]);
    }

    let half = width / 2.0;
    let mut result = MultiPolygon::new(vec![]);

    for pair in line.0.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = planar_distance(a, b);
        if length < f64::EPSILON {
            continue;
        }

        let dir = MapCoord {
            x: (b.x - a.x) / length,
            y: (b.y - a.y) / length,
        };
        let normal = MapCoord {
            x: -dir.y,
            y: dir.x,
        };

        // Square caps: extend both ends by the half width
        let start = MapCoord {
            x: a.x - dir.x * half,
            y: a.y - dir.y * half,
        };
        let end = MapCoord {
            x: b.x + dir.x * half,
            y: b.y + dir.y * half,
        };

        let quad = Polygon::new(
            LineString::new(vec![
                MapCoord {
                    x: start.x + normal.x * half,
                    y: start.y + normal.y * half,
                },
                MapCoord {
                    x: end.x + normal.x * half,
                    y: end.y + normal.y * half,
                },
                MapCoord {
                    x: end.x - normal.x * half,
                    y: end.y - normal.y * half,
                },
                MapCoord {
                    x: start.x - normal.x * half,
                    y: start.y - normal.y * half,
                },
            ]),
            vec![],
        );

        if result.0.is_empty() {
            result = MultiPolygon::new(vec![quad]);
        } else {
            result = result.union(&quad);
        }
    }

    result
}
