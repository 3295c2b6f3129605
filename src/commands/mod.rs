//! Composer commands
//!
//! Commands represent one user gesture against the combo being composed. They
//! are applied by [`crate::handlers::ComposerSession`], which runs the matching
//! sequence editor operation and records the resulting event.

use crate::editor::DropResolution;
use crate::value_objects::{ItemId, MovementNode, SequenceItem};
use serde::{Deserialize, Serialize};

/// Edits a composer session accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComposerCommand {
    /// Add a movement at the end of the combo
    AppendMovement {
        /// The movement performed
        node: MovementNode,
    },

    /// Add a movement at a trick position
    InsertMovement {
        /// Trick position the new movement takes (clamped to the trick count)
        position: usize,
        /// The movement performed
        node: MovementNode,
    },

    /// Attach or clear the transition on an arrow
    SetTransition {
        /// The arrow chip
        arrow_id: ItemId,
        /// New transition, `None` for a plain juxtaposition
        transition_id: Option<String>,
    },

    /// Attach or clear the landing stance of a trick
    SetLandingStance {
        /// The trick chip
        trick_id: ItemId,
        /// New landing stance
        landing_stance: Option<String>,
    },

    /// Delete a trick and one neighbouring arrow
    RemoveTrick {
        /// The trick chip
        trick_id: ItemId,
    },

    /// Reorder a trick
    MoveTrick {
        /// The trick chip
        trick_id: ItemId,
        /// Trick position it moves to
        to_position: usize,
    },

    /// Apply a resolved drag gesture
    Drop(DropResolution),

    /// Replace the sequence with the order a drag left on screen
    Reorder {
        /// Items in their final order; alternation is rebuilt
        items: Vec<SequenceItem>,
    },
}

impl ComposerCommand {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::AppendMovement { .. } => "append_movement",
            Self::InsertMovement { .. } => "insert_movement",
            Self::SetTransition { .. } => "set_transition",
            Self::SetLandingStance { .. } => "set_landing_stance",
            Self::RemoveTrick { .. } => "remove_trick",
            Self::MoveTrick { .. } => "move_trick",
            Self::Drop(_) => "drop",
            Self::Reorder { .. } => "reorder",
        }
    }
}
