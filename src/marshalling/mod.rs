//! Persistence boundary for combo graphs
//!
//! The stored document has the same shape as [`ComboGraph`]
//! (`{"tricks": [...], "transitions": [...]}` with camelCase keys). Marshalling
//! is a checked gate, not a format change: both directions run the same node
//! rules and the same edge invariant check, in the same order.

use crate::aggregate::ComboGraph;
use crate::error::{ComboError, ComboResult};
use crate::validation::{validate_raw_nodes, Emptiness};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Storage-ready form of a combo graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedCombo(Value);

impl PersistedCombo {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Encode as a JSON string for a document store
    pub fn to_json_string(&self) -> ComboResult<String> {
        serde_json::to_string(&self.0).map_err(|e| ComboError::MalformedInput(e.to_string()))
    }
}

/// Validate a graph and produce its persisted form
///
/// Fails with the first validation error; the graph must have at least one
/// trick.
pub fn marshal(graph: &ComboGraph) -> ComboResult<PersistedCombo> {
    let value =
        serde_json::to_value(graph).map_err(|e| ComboError::MalformedInput(e.to_string()))?;
    check_document(&value)?;

    debug!(
        tricks = graph.node_count(),
        transitions = graph.edge_count(),
        "Marshalled combo graph"
    );
    Ok(PersistedCombo(value))
}

/// Read a persisted document back into a validated graph
///
/// `None` and JSON `null` fail with `MalformedInput`.
pub fn unmarshal(raw: Option<&Value>) -> ComboResult<ComboGraph> {
    let value = match raw {
        None | Some(Value::Null) => {
            return Err(ComboError::MalformedInput(
                "combo graph is absent".to_string(),
            ))
        }
        Some(value) => value,
    };

    check_document(value)?;

    let graph: ComboGraph = serde_json::from_value(value.clone())
        .map_err(|e| ComboError::MalformedInput(e.to_string()))?;

    debug!(
        tricks = graph.node_count(),
        transitions = graph.edge_count(),
        "Unmarshalled combo graph"
    );
    Ok(graph)
}

/// Unmarshal from a persisted value
pub fn unmarshal_persisted(persisted: &PersistedCombo) -> ComboResult<ComboGraph> {
    unmarshal(Some(persisted.as_value()))
}

/// Parse and unmarshal a JSON string
pub fn unmarshal_str(json: &str) -> ComboResult<ComboGraph> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ComboError::MalformedInput(e.to_string()))?;
    unmarshal(Some(&value))
}

/// Checks shared by both directions
fn check_document(value: &Value) -> ComboResult<()> {
    let object = value
        .as_object()
        .ok_or_else(|| ComboError::MalformedInput("combo graph is not an object".to_string()))?;

    let tricks = match object.get("tricks") {
        Some(Value::Array(tricks)) => tricks,
        Some(_) => {
            return Err(ComboError::MalformedInput(
                "tricks is not a list".to_string(),
            ))
        }
        None => return Err(ComboError::MalformedInput("tricks is missing".to_string())),
    };
    validate_raw_nodes(tricks, Emptiness::Reject)?;

    let transitions = match object.get("transitions") {
        None | Some(Value::Null) => Vec::new(),
        Some(transitions) => serde_json::from_value(transitions.clone())
            .map_err(|e| ComboError::MalformedInput(format!("transitions: {e}")))?,
    };

    let tricks = serde_json::from_value(Value::Array(tricks.clone()))
        .map_err(|e| ComboError::MalformedInput(format!("tricks: {e}")))?;
    ComboGraph::from_parts(tricks, transitions).check_structure()
}
