//! Pure planar geometry utilities used by the edit modes.
//!
//! Everything in here is a plain function of f64 map coordinates; no bevy
//! types and no editor state. The heavier computational-geometry work
//! (boolean ops, intersection predicates, affine transforms) is delegated to
//! the `geo` crate; these modules cover the gaps: polyline projection,
//! snapping, tessellation, and corridor buffering.
//!
//! ## Sub-modules
//!
//! - `line`: nearest-point-on-line, segment intersection, bearings, snapping
//! - `shapes`: circle/arc tessellation, rectangles, corridor buffers
//! - `bounds`: bounding rectangles and bounding circles

mod bounds;
mod line;
mod shapes;

pub use bounds::{bounding_circle, features_bounds, geometry_bounds};
pub use line::{
    nearest_point_on_line, planar_bearing, planar_distance, point_near_segment,
    segment_intersection, snap_to_right_angle, NearestPoint,
};
pub use shapes::{arc_positions, circle_polygon, corridor, rectangle_polygon};

/// A position in map coordinates.
pub type MapCoord = geo::Coord<f64>;
