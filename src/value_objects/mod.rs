//! Combo value objects
//!
//! Value objects are immutable types that represent concepts in the combo domain.
//! They are compared by value rather than identity; validation of loosely typed
//! input happens at the marshalling boundary, not here.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

mod sequence;

pub use sequence::{Sequence, SequenceItem};

/// Ephemeral identifier of a sequence item
///
/// Generated fresh for every projection. It identifies a chip for list rendering
/// and drag tracking within one editing session and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Create a new random item id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque key under which the persistence collaborator stores a combo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComboId(Uuid);

impl ComboId {
    /// Create a new random combo id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an id assigned by the storage layer
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ComboId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ComboId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One performed movement within a combo
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementNode {
    /// Identifier of the movement performed (non-empty)
    pub movement_id: String,
    /// How the movement was landed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing_stance: Option<String>,
}

impl MovementNode {
    /// Create a node without a landing stance
    pub fn new(movement_id: impl Into<String>) -> Self {
        Self {
            movement_id: movement_id.into(),
            landing_stance: None,
        }
    }

    /// Set the landing stance
    pub fn with_landing_stance(mut self, stance: impl Into<String>) -> Self {
        self.landing_stance = Some(stance.into());
        self
    }
}

impl fmt::Display for MovementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.landing_stance {
            Some(stance) => write!(f, "{} ({})", self.movement_id, stance),
            None => write!(f, "{}", self.movement_id),
        }
    }
}

/// Connector between two consecutive movements in performance order
///
/// `transition_id == None` is a plain juxtaposition: no explicit transition was
/// performed, but the edge is still present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionEdge {
    pub from_index: usize,
    pub to_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_id: Option<String>,
}

impl TransitionEdge {
    /// Edge from node `from_index` to the node right after it
    pub fn consecutive(from_index: usize, transition_id: Option<String>) -> Self {
        Self {
            from_index,
            to_index: from_index + 1,
            transition_id,
        }
    }

    /// Whether the edge joins neighbouring nodes
    pub fn is_consecutive(&self) -> bool {
        self.from_index.checked_add(1) == Some(self.to_index)
    }
}
