//! Undo/redo history of committed collection snapshots.

use bevy::prelude::*;

use crate::constants::MAX_HISTORY_SIZE;
use crate::features::FeatureCollection;

/// Resource tracking collection snapshots for undo/redo. Only final edits
/// are recorded; intermediate drag updates never enter the history.
#[derive(Resource, Default)]
pub struct EditHistory {
    /// Snapshots that can be restored by undo (most recent last)
    undo_stack: Vec<FeatureCollection>,
    /// Snapshots that can be restored by redo (most recent last)
    redo_stack: Vec<FeatureCollection>,
}

impl EditHistory {
    /// Record the collection as it was before a final edit.
    pub fn push(&mut self, previous: FeatureCollection) {
        // A new edit invalidates the redo chain
        self.redo_stack.clear();

        self.undo_stack.push(previous);

        while self.undo_stack.len() > MAX_HISTORY_SIZE {
            self.undo_stack.remove(0);
        }
    }

    /// Undo: store the current collection for redo and return the snapshot
    /// to restore.
    pub fn undo(&mut self, current: FeatureCollection) -> Option<FeatureCollection> {
        let restored = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(restored)
    }

    /// Redo: store the current collection for undo and return the snapshot
    /// to restore.
    pub fn redo(&mut self, current: FeatureCollection) -> Option<FeatureCollection> {
        let restored = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history (after loading a new file).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Feature, Geometry};
    use geo::Point;

    fn collection(len: usize) -> FeatureCollection {
        FeatureCollection::from_features(
            (0..len)
                .map(|i| Feature::new(Geometry::Point(Point::new(i as f64, 0.0))))
                .collect(),
        )
    }

    #[test]
    fn test_undo_restores_previous_snapshot() {
        let mut history = EditHistory::default();
        let before = collection(1);
        let after = collection(2);

        history.push(before.clone());
        assert!(history.can_undo());
        assert!(!history.can_redo());

        let restored = history.undo(after.clone()).unwrap();
        assert_eq!(restored.len(), 1);
        assert!(history.can_redo());

        let redone = history.redo(restored).unwrap();
        assert_eq!(redone.len(), 2);
        assert!(history.can_undo());
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut history = EditHistory::default();
        assert!(history.undo(collection(0)).is_none());
        assert!(history.redo(collection(0)).is_none());
    }

    #[test]
    fn test_new_edit_clears_redo_stack() {
        let mut history = EditHistory::default();
        history.push(collection(1));
        let restored = history.undo(collection(2)).unwrap();
        assert!(history.can_redo());

        history.push(restored);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = EditHistory::default();
        for i in 0..(MAX_HISTORY_SIZE + 10) {
            history.push(collection(i % 3));
        }
        let mut depth = 0;
        let mut current = collection(0);
        while let Some(restored) = history.undo(current) {
            current = restored;
            depth += 1;
        }
        assert_eq!(depth, MAX_HISTORY_SIZE);
    }
}
