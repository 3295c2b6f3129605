//! Chip labels for the composer
//!
//! Turns sequence items into display text. Movement and transition names come
//! from an external catalog; unknown ids are shown verbatim.

use crate::value_objects::{ItemId, Sequence, SequenceItem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label shown on an arrow without a transition
pub const PLAIN_ARROW_LABEL: &str = "→";

/// Kind of chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipKind {
    Trick,
    Arrow,
}

/// Display data for one sequence item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipLabel {
    pub item_id: ItemId,
    pub kind: ChipKind,
    pub text: String,
}

/// Name lookup for movements and transitions
pub trait MovementCatalog {
    fn movement_name(&self, movement_id: &str) -> Option<String>;
    fn transition_name(&self, transition_id: &str) -> Option<String>;
}

/// Catalog backed by in-memory maps
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    movements: HashMap<String, String>,
    transitions: HashMap<String, String>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movement(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.movements.insert(id.into(), name.into());
        self
    }

    pub fn with_transition(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.transitions.insert(id.into(), name.into());
        self
    }
}

impl MovementCatalog for StaticCatalog {
    fn movement_name(&self, movement_id: &str) -> Option<String> {
        self.movements.get(movement_id).cloned()
    }

    fn transition_name(&self, transition_id: &str) -> Option<String> {
        self.transitions.get(transition_id).cloned()
    }
}

/// Label a single item
pub fn chip_label<C: MovementCatalog + ?Sized>(item: &SequenceItem, catalog: &C) -> ChipLabel {
    match item {
        SequenceItem::Trick { id, data } => {
            let name = catalog
                .movement_name(&data.movement_id)
                .unwrap_or_else(|| data.movement_id.clone());
            let text = match &data.landing_stance {
                Some(stance) => format!("{name} ({stance})"),
                None => name,
            };
            ChipLabel {
                item_id: *id,
                kind: ChipKind::Trick,
                text,
            }
        }
        SequenceItem::Arrow { id, transition_id } => {
            let text = match transition_id {
                Some(transition_id) => catalog
                    .transition_name(transition_id)
                    .unwrap_or_else(|| transition_id.clone()),
                None => PLAIN_ARROW_LABEL.to_string(),
            };
            ChipLabel {
                item_id: *id,
                kind: ChipKind::Arrow,
                text,
            }
        }
    }
}

/// Label every item of a sequence in order
pub fn chip_labels<C: MovementCatalog + ?Sized>(sequence: &Sequence, catalog: &C) -> Vec<ChipLabel> {
    sequence.iter().map(|item| chip_label(item, catalog)).collect()
}
