//! Combo events
//!
//! Record of what a composer session or the combo service did. Sessions return
//! them to the UI; nothing in this crate replays them.

use crate::value_objects::{ComboId, ItemId, MovementNode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events emitted by composer sessions and the combo service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComboEvent {
    /// A movement was added at the end of the sequence
    MovementAppended {
        /// Chip created for the movement
        trick_id: ItemId,
        /// The movement performed
        node: MovementNode,
    },
    /// A movement was added at a trick position
    MovementInserted {
        trick_id: ItemId,
        position: usize,
        node: MovementNode,
    },
    /// An arrow's transition changed
    TransitionSet {
        arrow_id: ItemId,
        transition_id: Option<String>,
    },
    /// A trick's landing stance changed
    LandingStanceSet {
        trick_id: ItemId,
        landing_stance: Option<String>,
    },
    /// A trick and one neighbouring arrow were removed
    TrickRemoved { trick_id: ItemId },
    /// A trick changed position
    TrickMoved { trick_id: ItemId, to_position: usize },
    /// A drag ended away from the delete target
    DropIgnored { item_id: ItemId },
    /// A reordered item list was accepted
    SequenceNormalized {
        /// Items after alternation was rebuilt
        items: usize,
    },
    /// The previous sequence was restored
    EditUndone {
        /// Items in the restored sequence
        items: usize,
    },
    /// A combo was read from storage into a session
    ComboLoaded { combo_id: ComboId, trick_count: usize },
    /// A session's combo was written to storage
    ComboSaved {
        combo_id: ComboId,
        trick_count: usize,
        saved_at: DateTime<Utc>,
    },
}

impl ComboEvent {
    /// Event name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MovementAppended { .. } => "MovementAppended",
            Self::MovementInserted { .. } => "MovementInserted",
            Self::TransitionSet { .. } => "TransitionSet",
            Self::LandingStanceSet { .. } => "LandingStanceSet",
            Self::TrickRemoved { .. } => "TrickRemoved",
            Self::TrickMoved { .. } => "TrickMoved",
            Self::DropIgnored { .. } => "DropIgnored",
            Self::SequenceNormalized { .. } => "SequenceNormalized",
            Self::EditUndone { .. } => "EditUndone",
            Self::ComboLoaded { .. } => "ComboLoaded",
            Self::ComboSaved { .. } => "ComboSaved",
        }
    }

    /// Routing subject
    pub fn subject(&self) -> String {
        match self {
            Self::ComboLoaded { .. } => "combos.combo.loaded.v1".to_string(),
            Self::ComboSaved { .. } => "combos.combo.saved.v1".to_string(),
            _ => "combos.sequence.edited.v1".to_string(),
        }
    }
}
