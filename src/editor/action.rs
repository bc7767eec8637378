//! Edit actions and diagnostics: the output contract of every mode handler.

use std::fmt;

use crate::features::FeatureCollection;
use crate::geometry::MapCoord;

/// What kind of edit an action describes.
///
/// Intermediate variants (`Translating`, `Rotating`, `Scaling`,
/// `MovePosition`) fire repeatedly during a drag for live feedback and are
/// excluded from undo history; the matching final variant fires once on
/// release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditType {
    AddFeature,
    RemoveFeature,
    AddPosition,
    RemovePosition,
    MovePosition,
    FinishMovePosition,
    Split,
    Translating,
    Translated,
    Rotating,
    Rotated,
    Scaling,
    Scaled,
}

impl EditType {
    /// Final edits are the ones worth recording in undo history.
    pub fn is_final(&self) -> bool {
        !matches!(
            self,
            EditType::MovePosition | EditType::Translating | EditType::Rotating | EditType::Scaling
        )
    }
}

/// Edit-type-specific payload. The [`EditType`] fully determines which
/// variant (if any) an action carries: position edits carry their position
/// path, everything else carries nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum EditContext {
    AddPosition {
        position_indexes: Vec<usize>,
        position: MapCoord,
    },
    MovePosition {
        position_indexes: Vec<usize>,
        position: MapCoord,
    },
    RemovePosition {
        position_indexes: Vec<usize>,
    },
}

/// A committed edit: the new collection plus a description of what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct EditAction {
    pub updated_data: FeatureCollection,
    pub edit_type: EditType,
    pub feature_indexes: Vec<usize>,
    pub context: Option<EditContext>,
}

/// Why an edit could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Wrong selection count or geometry type for the active mode
    InvalidSelection,
    /// The requested edit would produce (or was given) degenerate geometry
    DegenerateGeometry,
}

/// A recoverable editing problem, surfaced to the host instead of logged
/// from inside a handler. Never fatal; the mode always returns to idle.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn invalid_selection(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::InvalidSelection,
            message: message.into(),
        }
    }

    pub fn degenerate_geometry(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::DegenerateGeometry,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DiagnosticKind::InvalidSelection => "invalid selection",
            DiagnosticKind::DegenerateGeometry => "degenerate geometry",
        };
        write!(f, "{kind}: {}", self.message)
    }
}

/// Outcome of a click-like handler call.
#[derive(Debug, Default)]
pub struct ClickOutcome {
    pub action: Option<EditAction>,
    pub diagnostic: Option<Diagnostic>,
}

impl ClickOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn action(action: EditAction) -> Self {
        Self {
            action: Some(action),
            diagnostic: None,
        }
    }

    pub fn warn(diagnostic: Diagnostic) -> Self {
        Self {
            action: None,
            diagnostic: Some(diagnostic),
        }
    }
}

/// Outcome of a pointer-move or drag handler call. `cancel_map_pan` asks the
/// dispatcher to suppress the camera pan while the gesture owns the pointer.
#[derive(Debug, Default)]
pub struct MoveOutcome {
    pub action: Option<EditAction>,
    pub diagnostic: Option<Diagnostic>,
    pub cancel_map_pan: bool,
}

impl MoveOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn pan_cancelled() -> Self {
        Self {
            cancel_map_pan: true,
            ..Self::default()
        }
    }

    pub fn action(action: EditAction) -> Self {
        Self {
            action: Some(action),
            diagnostic: None,
            cancel_map_pan: true,
        }
    }
}
