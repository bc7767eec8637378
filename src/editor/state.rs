//! Shared editing state: working data, selection, and in-progress gesture.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CIRCLE_STEPS, DEFAULT_SPLIT_GAP};
use crate::features::{Feature, FeatureCollection};
use crate::geometry::MapCoord;

/// Mode-specific configuration, read-only from a handler's perspective.
/// Serialized into the app config so settings survive restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeSettings {
    /// Segments used to tessellate drawn circles (clamped to >= 4 at use)
    pub circle_steps: u32,
    /// Snap split cut lines to right angles against the nearest polygon edge
    pub lock_90_degree: bool,
    /// Corridor gap for polygon splitting, in map units; values <= 0 fall
    /// back to the default at use
    pub split_gap: f64,
    /// Extend selected LineStrings at their start instead of their end
    pub draw_at_front: bool,
}

impl Default for ModeSettings {
    fn default() -> Self {
        Self {
            circle_steps: DEFAULT_CIRCLE_STEPS,
            lock_90_degree: false,
            split_gap: DEFAULT_SPLIT_GAP,
            draw_at_front: false,
        }
    }
}

/// State shared by every mode handler: the authoritative collection, the
/// selection, and the transient gesture state (click sequence + tentative
/// feature). Handlers only reach it through these accessors; the gesture
/// fields are owned by whichever handler is active and are wiped on mode
/// switches and cancellation.
#[derive(Resource, Debug, Default)]
pub struct EditState {
    data: FeatureCollection,
    selected_indexes: Vec<usize>,
    click_sequence: Vec<MapCoord>,
    tentative_feature: Option<Feature>,
    settings: ModeSettings,
}

impl EditState {
    pub fn new(data: FeatureCollection) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn data(&self) -> &FeatureCollection {
        &self.data
    }

    /// Replace the working collection (after a committed edit, load, or
    /// undo). Selection indexes that no longer exist are dropped.
    pub fn set_data(&mut self, data: FeatureCollection) {
        self.selected_indexes.retain(|&i| i < data.len());
        self.data = data;
    }

    pub fn selected_indexes(&self) -> &[usize] {
        &self.selected_indexes
    }

    /// Selected features that actually exist, with their indexes.
    pub fn selected_features(&self) -> impl Iterator<Item = (usize, &Feature)> {
        self.selected_indexes
            .iter()
            .filter_map(|&i| self.data.feature(i).map(|f| (i, f)))
    }

    /// The selected index, when exactly one feature is selected.
    pub fn single_selected_index(&self) -> Option<usize> {
        match self.selected_indexes.as_slice() {
            [index] => Some(*index),
            _ => None,
        }
    }

    /// Replace the selection, de-duplicating while preserving order.
    pub fn set_selection(&mut self, indexes: impl IntoIterator<Item = usize>) {
        self.selected_indexes.clear();
        for index in indexes {
            if index < self.data.len() && !self.selected_indexes.contains(&index) {
                self.selected_indexes.push(index);
            }
        }
    }

    /// Add or remove one index from the selection.
    pub fn toggle_selected(&mut self, index: usize) {
        if index >= self.data.len() {
            return;
        }
        if let Some(pos) = self.selected_indexes.iter().position(|&i| i == index) {
            self.selected_indexes.remove(pos);
        } else {
            self.selected_indexes.push(index);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_indexes.clear();
    }

    pub fn click_sequence(&self) -> &[MapCoord] {
        &self.click_sequence
    }

    pub fn push_click(&mut self, position: MapCoord) {
        self.click_sequence.push(position);
    }

    pub fn reset_click_sequence(&mut self) {
        self.click_sequence.clear();
    }

    pub fn tentative_feature(&self) -> Option<&Feature> {
        self.tentative_feature.as_ref()
    }

    pub fn set_tentative_feature(&mut self, feature: Feature) {
        self.tentative_feature = Some(feature);
    }

    pub fn clear_tentative_feature(&mut self) {
        self.tentative_feature = None;
    }

    /// Drop all transient gesture state. Idempotent; called on mode switch
    /// and explicit cancellation.
    pub fn reset_gesture(&mut self) {
        self.reset_click_sequence();
        self.clear_tentative_feature();
    }

    pub fn settings(&self) -> &ModeSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ModeSettings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Geometry;
    use geo::Point;

    fn state_with_features(count: usize) -> EditState {
        let features = (0..count)
            .map(|i| Feature::new(Geometry::Point(Point::new(i as f64, 0.0))))
            .collect();
        EditState::new(FeatureCollection::from_features(features))
    }

    #[test]
    fn test_set_selection_dedupes_and_bounds_checks() {
        let mut state = state_with_features(3);
        state.set_selection([2, 0, 2, 7]);
        assert_eq!(state.selected_indexes(), &[2, 0]);
    }

    #[test]
    fn test_toggle_selected() {
        let mut state = state_with_features(2);
        state.toggle_selected(1);
        assert_eq!(state.selected_indexes(), &[1]);
        state.toggle_selected(1);
        assert!(state.selected_indexes().is_empty());
        // Out of bounds is ignored
        state.toggle_selected(9);
        assert!(state.selected_indexes().is_empty());
    }

    #[test]
    fn test_single_selected_index() {
        let mut state = state_with_features(3);
        assert_eq!(state.single_selected_index(), None);
        state.set_selection([1]);
        assert_eq!(state.single_selected_index(), Some(1));
        state.set_selection([1, 2]);
        assert_eq!(state.single_selected_index(), None);
    }

    #[test]
    fn test_set_data_drops_stale_selection() {
        let mut state = state_with_features(3);
        state.set_selection([0, 2]);
        state.set_data(FeatureCollection::from_features(vec![Feature::new(
            Geometry::Point(Point::new(0.0, 0.0)),
        )]));
        assert_eq!(state.selected_indexes(), &[0]);
    }

    #[test]
    fn test_reset_gesture_is_idempotent() {
        let mut state = state_with_features(1);
        state.push_click(geo::coord! { x: 1.0, y: 2.0 });
        state.set_tentative_feature(Feature::new(Geometry::Point(Point::new(1.0, 2.0))));

        state.reset_gesture();
        assert!(state.click_sequence().is_empty());
        assert!(state.tentative_feature().is_none());

        // Second reset must not error or change anything
        state.reset_gesture();
        assert!(state.click_sequence().is_empty());
        assert!(state.tentative_feature().is_none());
    }
}
