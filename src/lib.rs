//! Combo graph engine
//!
//! Models a trick combo as a path of movement nodes joined by optional
//! transition edges, and converts it losslessly to and from the flat
//! trick/arrow sequence a composer edits. Persistence, rendering and gesture
//! recognition belong to the caller; this crate offers the checked
//! marshalling boundary, the projection in both directions and pure edit
//! operations over the sequence.

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod events;
pub mod handlers;
pub mod marshalling;
pub mod projections;
pub mod validation;
pub mod value_objects;

// Re-export main types
pub use aggregate::ComboGraph;
pub use error::{ComboError, ComboResult};
pub use events::ComboEvent;

// Re-export value objects
pub use value_objects::{ComboId, ItemId, MovementNode, Sequence, SequenceItem, TransitionEdge};

// Re-export the boundary and projection functions
pub use marshalling::{marshal, unmarshal, PersistedCombo};
pub use projections::{to_graph, to_sequence};
pub use validation::{validate_nodes, Emptiness};

// Re-export the editor
pub use editor::{
    append_movement, apply_drop, insert_movement, move_trick, normalize, remove_trick, reorder,
    set_landing_stance, set_transition, DropResolution,
};

// Re-export commands and handlers
pub use commands::ComposerCommand;
pub use config::ComposerConfig;
pub use handlers::{ComboRepository, ComboService, ComposerSession, InMemoryComboRepository};
