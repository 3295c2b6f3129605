//! Combo engine errors
//!
//! Validation and marshalling failures must reach the caller untouched; a bad
//! combo is never persisted or truncated silently. Editor failures
//! (`ItemNotFound`) usually mean a stale UI reference and are safe to recover
//! from locally.

use crate::value_objects::{ComboId, ItemId};
use thiserror::Error;

/// Errors raised by the combo graph engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComboError {
    /// A non-empty node list was required
    #[error("Combo has no tricks")]
    EmptySequence,

    /// A node's movement identifier is missing, not a string, or empty
    #[error("Invalid movement id at trick {index}")]
    InvalidMovementId { index: usize },

    /// A node's landing stance is present but not a string
    #[error("Invalid landing stance at trick {index}")]
    InvalidLandingStance { index: usize },

    /// Raw persisted data was absent or could not be read as a combo
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The edge list does not describe a consecutive path over the nodes
    #[error("Malformed graph: {0}")]
    MalformedGraph(String),

    /// An edit referenced an item id that is not in the sequence (or is of
    /// the wrong kind)
    #[error("Sequence item not found: {0}")]
    ItemNotFound(ItemId),

    /// The persistence collaborator has no combo under this id
    #[error("Combo not found: {0}")]
    ComboNotFound(ComboId),

    /// The persistence collaborator failed
    #[error("Repository error: {0}")]
    Repository(String),
}

impl ComboError {
    /// Whether the error belongs to the node validation rule set
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptySequence | Self::InvalidMovementId { .. } | Self::InvalidLandingStance { .. }
        )
    }
}

/// Result type for combo engine operations
pub type ComboResult<T> = Result<T, ComboError>;
