//! Polyline and segment math: projection, intersection, bearings, snapping.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Line, LineString};

use super::MapCoord;

/// Result of projecting a point onto a polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestPoint {
    /// The closest position on the polyline
    pub position: MapCoord,
    /// Index of the segment the position lies on (0-based)
    pub segment_index: usize,
    /// Distance from the query point to `position`
    pub distance: f64,
}

/// Planar distance between two map coordinates.
pub fn planar_distance(a: MapCoord, b: MapCoord) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Planar bearing from `from` to `to` in radians, measured counterclockwise
/// from the positive x axis.
pub fn planar_bearing(from: MapCoord, to: MapCoord) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Project `point` onto the segment `a`-`b`, clamped to the segment.
fn project_onto_segment(point: MapCoord, a: MapCoord, b: MapCoord) -> MapCoord {
    let seg = MapCoord {
        x: b.x - a.x,
        y: b.y - a.y,
    };
    let len_sq = seg.x * seg.x + seg.y * seg.y;

    if len_sq < f64::EPSILON {
        // Segment is essentially a point
        return a;
    }

    let t = (((point.x - a.x) * seg.x + (point.y - a.y) * seg.y) / len_sq).clamp(0.0, 1.0);
    MapCoord {
        x: a.x + seg.x * t,
        y: a.y + seg.y * t,
    }
}

/// Check if a point is within a given distance of a line segment.
pub fn point_near_segment(point: MapCoord, a: MapCoord, b: MapCoord, threshold: f64) -> bool {
    planar_distance(point, project_onto_segment(point, a, b)) <= threshold
}

/// Find the nearest point on a polyline to `target`.
///
/// Returns `None` for polylines with fewer than two coordinates.
pub fn nearest_point_on_line(line: &LineString<f64>, target: MapCoord) -> Option<NearestPoint> {
    let coords = &line.0;
    if coords.len() < 2 {
        return None;
    }

    let mut best: Option<NearestPoint> = None;
    for (i, pair) in coords.windows(2).enumerate() {
        let projected = project_onto_segment(target, pair[0], pair[1]);
        let distance = planar_distance(target, projected);
        if best.as_ref().is_none_or(|b| distance < b.distance) {
            best = Some(NearestPoint {
                position: projected,
                segment_index: i,
                distance,
            });
        }
    }
    best
}

/// Intersection point of two segments, if they cross.
///
/// Collinear overlaps report the start of the shared stretch.
pub fn segment_intersection(a: Line<f64>, b: Line<f64>) -> Option<MapCoord> {
    match line_intersection(a, b)? {
        LineIntersection::SinglePoint { intersection, .. } => Some(intersection),
        LineIntersection::Collinear { intersection } => Some(intersection.start),
    }
}

/// Snap `candidate` so the segment `origin`-`candidate` forms a multiple of
/// 90 degrees relative to `reference_bearing` (radians), preserving its
/// length.
pub fn snap_to_right_angle(
    origin: MapCoord,
    candidate: MapCoord,
    reference_bearing: f64,
) -> MapCoord {
    let distance = planar_distance(origin, candidate);
    if distance < f64::EPSILON {
        return candidate;
    }

    let relative = planar_bearing(origin, candidate) - reference_bearing;
    let snapped = (relative / std::f64::consts::FRAC_PI_2).round() * std::f64::consts::FRAC_PI_2;
    let bearing = reference_bearing + snapped;

    MapCoord {
        x: origin.x + distance * bearing.cos(),
        y: origin.y + distance * bearing.sin(),
    }
}
