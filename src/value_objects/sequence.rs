//! Editable sequence items
//!
//! A sequence is the flat, chip-ready form of a combo: tricks interleaved with
//! arrows, `Trick, Arrow, Trick, ...`, starting and ending with a trick.

use super::{ItemId, MovementNode};
use serde::{Deserialize, Serialize};

/// One chip of the composer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SequenceItem {
    /// A performed movement
    Trick { id: ItemId, data: MovementNode },
    /// The connector between two tricks
    Arrow {
        id: ItemId,
        #[serde(
            rename = "transitionId",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        transition_id: Option<String>,
    },
}

impl SequenceItem {
    /// Wrap a movement in a trick item with a fresh id
    pub fn trick(data: MovementNode) -> Self {
        Self::Trick {
            id: ItemId::new(),
            data,
        }
    }

    /// Create an arrow item with a fresh id
    pub fn arrow(transition_id: Option<String>) -> Self {
        Self::Arrow {
            id: ItemId::new(),
            transition_id,
        }
    }

    pub fn id(&self) -> ItemId {
        match self {
            Self::Trick { id, .. } | Self::Arrow { id, .. } => *id,
        }
    }

    pub fn is_trick(&self) -> bool {
        matches!(self, Self::Trick { .. })
    }

    pub fn is_arrow(&self) -> bool {
        matches!(self, Self::Arrow { .. })
    }

    /// The movement carried by a trick item
    pub fn movement(&self) -> Option<&MovementNode> {
        match self {
            Self::Trick { data, .. } => Some(data),
            Self::Arrow { .. } => None,
        }
    }
}

/// Ordered list of sequence items owned by one editing session
///
/// Constructing a `Sequence` from arbitrary items is allowed (a drag can hand
/// back any order); use [`Sequence::is_well_formed`] or
/// [`crate::editor::normalize`] before relying on alternation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence {
    items: Vec<SequenceItem>,
}

impl Sequence {
    /// The empty sequence
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn from_items(items: Vec<SequenceItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[SequenceItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<SequenceItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SequenceItem> {
        self.items.iter()
    }

    /// Number of trick items
    pub fn trick_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_trick()).count()
    }

    /// Position of the item with the given id
    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn get(&self, id: ItemId) -> Option<&SequenceItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether items alternate trick/arrow, starting and ending with a trick
    ///
    /// The empty sequence and a single trick are both well formed.
    pub fn is_well_formed(&self) -> bool {
        if self.items.is_empty() {
            return true;
        }
        self.items.len() % 2 == 1
            && self
                .items
                .iter()
                .enumerate()
                .all(|(position, item)| item.is_trick() == (position % 2 == 0))
    }
}

impl From<Vec<SequenceItem>> for Sequence {
    fn from(items: Vec<SequenceItem>) -> Self {
        Self::from_items(items)
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a SequenceItem;
    type IntoIter = std::slice::Iter<'a, SequenceItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
