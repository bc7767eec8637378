//! Gizmo rendering of the collection, the tentative feature, and handles.

use bevy::prelude::*;

use crate::constants::HANDLE_PICK_RADIUS_PX;
use crate::features::Geometry;
use crate::geometry::MapCoord;
use crate::theme::{
    FEATURE_COLOR, HANDLE_COLOR, INTERMEDIATE_HANDLE_COLOR, ROTATE_HANDLE_COLOR, SELECTION_COLOR,
    TENTATIVE_COLOR, TENTATIVE_GUIDE_COLOR,
};

use super::dispatcher::ActiveHandler;
use super::handles::HandleKind;
use super::params::CameraParams;
use super::state::EditState;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct EditorGizmos;

fn to_vec2(coord: MapCoord) -> Vec2 {
    Vec2::new(coord.x as f32, coord.y as f32)
}

fn draw_ring(gizmos: &mut Gizmos<EditorGizmos>, ring: &geo::LineString<f64>, color: Color) {
    for pair in ring.0.windows(2) {
        gizmos.line_2d(to_vec2(pair[0]), to_vec2(pair[1]), color);
    }
}

fn draw_polygon(gizmos: &mut Gizmos<EditorGizmos>, polygon: &geo::Polygon<f64>, color: Color) {
    draw_ring(gizmos, polygon.exterior(), color);
    for interior in polygon.interiors() {
        draw_ring(gizmos, interior, color);
    }
}

fn draw_geometry(
    gizmos: &mut Gizmos<EditorGizmos>,
    geometry: &Geometry,
    color: Color,
    point_radius: f32,
) {
    match geometry {
        Geometry::Point(p) => {
            gizmos.circle_2d(Isometry2d::from_translation(to_vec2(p.0)), point_radius, color);
        }
        Geometry::MultiPoint(mp) => {
            for p in &mp.0 {
                gizmos.circle_2d(Isometry2d::from_translation(to_vec2(p.0)), point_radius, color);
            }
        }
        Geometry::LineString(ls) => draw_ring(gizmos, ls, color),
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                draw_ring(gizmos, ls, color);
            }
        }
        Geometry::Polygon(poly) => draw_polygon(gizmos, poly, color),
        Geometry::MultiPolygon(mp) => {
            for poly in &mp.0 {
                draw_polygon(gizmos, poly, color);
            }
        }
    }
}

pub fn render_features(
    mut gizmos: Gizmos<EditorGizmos>,
    state: Res<EditState>,
    handler: Res<ActiveHandler>,
    params: CameraParams,
) {
    let zoom = params.zoom_scale();
    let point_radius = 4.0 * zoom;
    let handle_radius = 0.5 * HANDLE_PICK_RADIUS_PX * zoom;

    for (index, feature) in state.data().features().iter().enumerate() {
        let color = if state.selected_indexes().contains(&index) {
            SELECTION_COLOR
        } else {
            FEATURE_COLOR
        };
        draw_geometry(&mut gizmos, &feature.geometry, color, point_radius);
    }

    if let Some(tentative) = state.tentative_feature() {
        draw_geometry(&mut gizmos, &tentative.geometry, TENTATIVE_COLOR, point_radius);
    }

    // Committed clicks of an in-progress gesture
    for &click in state.click_sequence() {
        gizmos.circle_2d(
            Isometry2d::from_translation(to_vec2(click)),
            handle_radius * 0.5,
            TENTATIVE_GUIDE_COLOR,
        );
    }

    for handle in handler.0.edit_handles(&state) {
        let (color, radius) = match handle.kind {
            HandleKind::Existing => (HANDLE_COLOR, handle_radius),
            HandleKind::Intermediate => (INTERMEDIATE_HANDLE_COLOR, handle_radius * 0.7),
            HandleKind::Rotate => (ROTATE_HANDLE_COLOR, handle_radius),
        };
        gizmos.circle_2d(
            Isometry2d::from_translation(to_vec2(handle.position)),
            radius,
            color,
        );
    }
}

pub fn configure_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<EditorGizmos>();
    config.line.width = 2.0;
}
