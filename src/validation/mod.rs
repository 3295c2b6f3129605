//! Validation rules for combo nodes
//!
//! One rule set serves typed [`MovementNode`]s and untyped JSON nodes read from
//! storage. Both go through [`NodeFields`], so marshal-time and unmarshal-time
//! checks cannot drift apart.

use crate::error::{ComboError, ComboResult};
use crate::value_objects::MovementNode;
use serde_json::Value;

/// Whether an empty node list is acceptable at the call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emptiness {
    /// Zero nodes fail with `EmptySequence` (persistence boundary)
    #[default]
    Reject,
    /// Zero nodes are a legitimate transient editing state
    Allow,
}

/// Observed value of a node attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Not present, or explicitly null
    Missing,
    /// A string value
    Text(&'a str),
    /// Present with a non-string type
    Other,
}

impl<'a> FieldValue<'a> {
    fn from_json(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Missing,
            Some(Value::String(s)) => FieldValue::Text(s),
            Some(_) => FieldValue::Other,
        }
    }
}

/// Read access to the attributes the rule set inspects
pub trait NodeFields {
    fn movement_id(&self) -> FieldValue<'_>;
    fn landing_stance(&self) -> FieldValue<'_>;
}

impl NodeFields for MovementNode {
    fn movement_id(&self) -> FieldValue<'_> {
        FieldValue::Text(&self.movement_id)
    }

    fn landing_stance(&self) -> FieldValue<'_> {
        match &self.landing_stance {
            Some(stance) => FieldValue::Text(stance),
            None => FieldValue::Missing,
        }
    }
}

impl NodeFields for Value {
    fn movement_id(&self) -> FieldValue<'_> {
        FieldValue::from_json(self.get("movementId"))
    }

    fn landing_stance(&self) -> FieldValue<'_> {
        FieldValue::from_json(self.get("landingStance"))
    }
}

/// Check a single node at position `index`
pub fn validate_node<N: NodeFields + ?Sized>(node: &N, index: usize) -> ComboResult<()> {
    match node.movement_id() {
        FieldValue::Text(id) if !id.is_empty() => {}
        _ => return Err(ComboError::InvalidMovementId { index }),
    }

    if let FieldValue::Other = node.landing_stance() {
        return Err(ComboError::InvalidLandingStance { index });
    }

    Ok(())
}

/// Check a node list, failing at the first offending node
pub fn validate<N: NodeFields>(nodes: &[N], emptiness: Emptiness) -> ComboResult<()> {
    if nodes.is_empty() && emptiness == Emptiness::Reject {
        return Err(ComboError::EmptySequence);
    }

    for (index, node) in nodes.iter().enumerate() {
        validate_node(node, index)?;
    }

    Ok(())
}

/// Check typed movement nodes
pub fn validate_nodes(nodes: &[MovementNode], emptiness: Emptiness) -> ComboResult<()> {
    validate(nodes, emptiness)
}

/// Check untyped nodes as read from storage
pub fn validate_raw_nodes(nodes: &[Value], emptiness: Emptiness) -> ComboResult<()> {
    validate(nodes, emptiness)
}
