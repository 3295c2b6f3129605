//! Combo Graph Aggregate
//!
//! The durable form of a combo: an ordered list of movement nodes and one
//! index-addressed edge per consecutive pair. Despite the name the structure is
//! always a path. Values are handed to and from the persistence layer by value,
//! so a graph read back from storage may break the edge invariant; call
//! [`ComboGraph::check_structure`] before trusting it.

use crate::error::{ComboError, ComboResult};
use crate::value_objects::{MovementNode, TransitionEdge};
use petgraph::graph::{Graph, NodeIndex};
use serde::{Deserialize, Serialize};

/// A trick combo as nodes plus consecutive-only edges
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboGraph {
    /// Movements in performance order
    pub tricks: Vec<MovementNode>,
    /// Connectors; `transitions[i]` joins `tricks[i]` and `tricks[i + 1]`
    #[serde(default)]
    pub transitions: Vec<TransitionEdge>,
}

impl ComboGraph {
    /// The empty combo
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from raw parts without checking them
    pub fn from_parts(tricks: Vec<MovementNode>, transitions: Vec<TransitionEdge>) -> Self {
        Self {
            tricks,
            transitions,
        }
    }

    /// Chain movements with plain (transition-less) edges
    pub fn from_movements(tricks: Vec<MovementNode>) -> Self {
        let transitions = (0..tricks.len().saturating_sub(1))
            .map(|index| TransitionEdge::consecutive(index, None))
            .collect();
        Self {
            tricks,
            transitions,
        }
    }

    /// Label the edge leaving node `from_index`
    ///
    /// Out-of-range indices leave the graph unchanged.
    pub fn with_transition(mut self, from_index: usize, transition_id: impl Into<String>) -> Self {
        if let Some(edge) = self
            .transitions
            .iter_mut()
            .find(|edge| edge.from_index == from_index)
        {
            edge.transition_id = Some(transition_id.into());
        }
        self
    }

    pub fn node_count(&self) -> usize {
        self.tricks.len()
    }

    pub fn edge_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tricks.is_empty()
    }

    /// Number of edges a well-formed graph with this many nodes carries
    pub fn expected_edge_count(&self) -> usize {
        self.tricks.len().saturating_sub(1)
    }

    /// Verify the path invariant
    ///
    /// There must be exactly `max(0, n - 1)` edges and edge `i` must join node
    /// `i` to node `i + 1`. No repair is attempted.
    pub fn check_structure(&self) -> ComboResult<()> {
        let expected = self.expected_edge_count();
        if self.transitions.len() != expected {
            return Err(ComboError::MalformedGraph(format!(
                "expected {expected} transitions for {} tricks, found {}",
                self.tricks.len(),
                self.transitions.len()
            )));
        }

        for (position, edge) in self.transitions.iter().enumerate() {
            if edge.from_index != position || !edge.is_consecutive() {
                return Err(ComboError::MalformedGraph(format!(
                    "transition {position} connects {} -> {}, expected {position} -> {}",
                    edge.from_index,
                    edge.to_index,
                    position + 1
                )));
            }
        }

        Ok(())
    }

    /// Transition label of the edge leaving node `from_index`
    pub fn transition_after(&self, from_index: usize) -> Option<&str> {
        self.transitions
            .get(from_index)
            .filter(|edge| edge.from_index == from_index)
            .and_then(|edge| edge.transition_id.as_deref())
    }

    /// Export the combo as a directed petgraph graph
    ///
    /// Node weights are the movements, edge weights the optional transition ids.
    /// Fails with `MalformedGraph` if the edge invariant does not hold.
    pub fn to_petgraph(&self) -> ComboResult<Graph<MovementNode, Option<String>>> {
        self.check_structure()?;

        let mut graph = Graph::with_capacity(self.tricks.len(), self.transitions.len());
        let indices: Vec<NodeIndex> = self
            .tricks
            .iter()
            .cloned()
            .map(|node| graph.add_node(node))
            .collect();
        for edge in &self.transitions {
            graph.add_edge(
                indices[edge.from_index],
                indices[edge.to_index],
                edge.transition_id.clone(),
            );
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComboGraph {
        ComboGraph::from_movements(vec![
            MovementNode::new("gainer"),
            MovementNode::new("cork").with_landing_stance("complete"),
            MovementNode::new("double cork"),
        ])
        .with_transition(1, "punch")
    }

    #[test]
    fn test_empty_graph() {
        let graph = ComboGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.expected_edge_count(), 0);
        assert!(graph.check_structure().is_ok());
    }

    #[test]
    fn test_from_movements_builds_path() {
        let graph = sample();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.check_structure().is_ok());
        assert_eq!(graph.transition_after(0), None);
        assert_eq!(graph.transition_after(1), Some("punch"));
        assert_eq!(graph.transition_after(2), None);
    }

    #[test]
    fn test_wrong_edge_count_is_malformed() {
        let mut graph = sample();
        graph.transitions.pop();
        assert!(matches!(
            graph.check_structure(),
            Err(ComboError::MalformedGraph(_))
        ));

        let single = ComboGraph::from_parts(
            vec![MovementNode::new("gainer")],
            vec![TransitionEdge::consecutive(0, None)],
        );
        assert!(matches!(
            single.check_structure(),
            Err(ComboError::MalformedGraph(_))
        ));
    }

    #[test]
    fn test_non_consecutive_edge_is_malformed() {
        let mut graph = sample();
        graph.transitions[1] = TransitionEdge {
            from_index: 0,
            to_index: 2,
            transition_id: None,
        };
        let error = graph.check_structure().unwrap_err();
        assert!(error.to_string().contains("transition 1"));
    }

    #[test]
    fn test_swapped_edges_are_malformed() {
        let mut graph = sample();
        graph.transitions.swap(0, 1);
        assert!(graph.check_structure().is_err());
    }

    #[test]
    fn test_petgraph_export() {
        let graph = sample().to_petgraph().unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(!petgraph::algo::is_cyclic_directed(&graph));

        let labels: Vec<Option<String>> = graph.edge_weights().cloned().collect();
        assert_eq!(labels, vec![None, Some("punch".to_string())]);
    }
}
