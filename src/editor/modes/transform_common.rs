//! Shared drag-transform machinery for translate, rotate, and scale.

use geo::AffineTransform;

use crate::editor::action::{EditAction, EditType};
use crate::editor::state::EditState;
use crate::features::Geometry;
use crate::geometry::{features_bounds, MapCoord};

/// Selected geometries frozen at drag start. Every intermediate transform is
/// applied to this snapshot, not to the live collection, so repeated events
/// never compound.
pub struct TransformSnapshot {
    features: Vec<(usize, Geometry)>,
    /// Center of the selection's bounding rectangle
    pub center: MapCoord,
}

impl TransformSnapshot {
    /// Capture the current selection. Returns `None` when nothing is
    /// selected or the selection has no extent to anchor on.
    pub fn capture(state: &EditState) -> Option<Self> {
        let features: Vec<(usize, Geometry)> = state
            .selected_features()
            .map(|(index, feature)| (index, feature.geometry.clone()))
            .collect();
        if features.is_empty() {
            return None;
        }

        let geo_geometries: Vec<geo::Geometry<f64>> =
            features.iter().map(|(_, g)| g.to_geo()).collect();
        let bounds = features_bounds(geo_geometries.iter())?;

        Some(Self {
            features,
            center: bounds.center(),
        })
    }

    pub fn feature_indexes(&self) -> Vec<usize> {
        self.features.iter().map(|(index, _)| *index).collect()
    }

    /// Transform every snapshotted geometry and produce the resulting edit.
    pub fn apply(
        &self,
        state: &EditState,
        transform: &AffineTransform<f64>,
        edit_type: EditType,
    ) -> EditAction {
        let mut updated = state.data().clone();
        for (index, geometry) in &self.features {
            updated = updated.replace_geometry(*index, geometry.affine(transform));
        }

        EditAction {
            updated_data: updated,
            edit_type,
            feature_indexes: self.feature_indexes(),
            context: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Feature, FeatureCollection};
    use geo::{coord, LineString, Point};

    #[test]
    fn test_capture_requires_selection() {
        let state = EditState::new(FeatureCollection::from_features(vec![Feature::new(
            Geometry::Point(Point::new(0.0, 0.0)),
        )]));
        assert!(TransformSnapshot::capture(&state).is_none());
    }

    #[test]
    fn test_capture_centers_on_selection_bounds() {
        let mut state = EditState::new(FeatureCollection::from_features(vec![
            Feature::new(Geometry::Point(Point::new(0.0, 0.0))),
            Feature::new(Geometry::Point(Point::new(10.0, 4.0))),
            // Unselected outlier must not influence the center
            Feature::new(Geometry::Point(Point::new(100.0, 100.0))),
        ]));
        state.set_selection([0, 1]);

        let snapshot = TransformSnapshot::capture(&state).unwrap();
        assert_eq!(snapshot.center, coord! { x: 5.0, y: 2.0 });
        assert_eq!(snapshot.feature_indexes(), vec![0, 1]);
    }

    #[test]
    fn test_apply_transforms_only_snapshotted_features() {
        let mut state = EditState::new(FeatureCollection::from_features(vec![
            Feature::new(Geometry::LineString(LineString::new(vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 1.0, y: 0.0 },
            ]))),
            Feature::new(Geometry::Point(Point::new(50.0, 50.0))),
        ]));
        state.set_selection([0]);

        let snapshot = TransformSnapshot::capture(&state).unwrap();
        let action = snapshot.apply(
            &state,
            &AffineTransform::translate(2.0, 3.0),
            EditType::Translated,
        );

        match &action.updated_data.feature(0).unwrap().geometry {
            Geometry::LineString(ls) => {
                assert_eq!(ls.0[0], coord! { x: 2.0, y: 3.0 });
            }
            other => panic!("expected LineString, got {}", other.type_name()),
        }
        assert_eq!(
            action.updated_data.feature(1).unwrap().geometry,
            Geometry::Point(Point::new(50.0, 50.0))
        );
    }
}
