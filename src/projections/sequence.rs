//! Graph <-> sequence projection
//!
//! `to_sequence` flattens a graph into chips for the composer; `to_graph`
//! rebuilds the graph from whatever list the composer hands back. Edges are
//! derived from adjacent trick pairs, never copied from arrows one to one, so
//! the reverse direction always satisfies the edge invariant.

use crate::aggregate::ComboGraph;
use crate::error::ComboResult;
use crate::value_objects::{Sequence, SequenceItem, TransitionEdge};
use tracing::{debug, warn};

/// Project a graph into an editable sequence
///
/// Item ids are generated fresh on every call. Fails with `MalformedGraph` when
/// the edge list is not one consecutive edge per neighbouring pair.
pub fn to_sequence(graph: &ComboGraph) -> ComboResult<Sequence> {
    graph.check_structure()?;

    let mut items = Vec::with_capacity(graph.tricks.len() * 2);
    for (index, node) in graph.tricks.iter().enumerate() {
        items.push(SequenceItem::trick(node.clone()));
        if let Some(edge) = graph.transitions.get(index) {
            items.push(SequenceItem::arrow(edge.transition_id.clone()));
        }
    }

    debug!(
        tricks = graph.node_count(),
        items = items.len(),
        "Projected combo graph to sequence"
    );
    Ok(Sequence::from_items(items))
}

/// Rebuild a graph from a sequence
///
/// Tricks keep their order. The transition of each edge comes from the arrow
/// between the two tricks when there is exactly one; a gap with no arrow or
/// with several arrows yields a plain edge. Arrows before the first or after
/// the last trick are ignored. Never fails.
pub fn to_graph(sequence: &Sequence) -> ComboGraph {
    let mut tricks = Vec::new();
    let mut transitions = Vec::new();
    let mut gap: Vec<&Option<String>> = Vec::new();

    for item in sequence {
        match item {
            SequenceItem::Trick { data, .. } => {
                if !tricks.is_empty() {
                    let from_index = tricks.len() - 1;
                    let transition_id = match gap.as_slice() {
                        [only] => (*only).clone(),
                        arrows => {
                            warn!(
                                from_index,
                                arrows = arrows.len(),
                                "Expected one arrow between tricks, using a plain transition"
                            );
                            None
                        }
                    };
                    transitions.push(TransitionEdge::consecutive(from_index, transition_id));
                } else if !gap.is_empty() {
                    warn!(arrows = gap.len(), "Ignoring arrows before the first trick");
                }
                gap.clear();
                tricks.push(data.clone());
            }
            SequenceItem::Arrow { transition_id, .. } => gap.push(transition_id),
        }
    }

    if !gap.is_empty() {
        warn!(arrows = gap.len(), "Ignoring arrows after the last trick");
    }

    debug!(
        items = sequence.len(),
        tricks = tricks.len(),
        "Rebuilt combo graph from sequence"
    );
    ComboGraph::from_parts(tricks, transitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComboError;
    use crate::value_objects::MovementNode;

    fn sample() -> ComboGraph {
        ComboGraph::from_movements(vec![
            MovementNode::new("gainer"),
            MovementNode::new("cork").with_landing_stance("complete"),
            MovementNode::new("btwist"),
        ])
        .with_transition(0, "skip")
    }

    fn trick(movement_id: &str) -> SequenceItem {
        SequenceItem::trick(MovementNode::new(movement_id))
    }

    fn arrow(transition_id: Option<&str>) -> SequenceItem {
        SequenceItem::arrow(transition_id.map(str::to_string))
    }

    #[test]
    fn test_to_sequence_alternates() {
        let sequence = to_sequence(&sample()).unwrap();
        assert_eq!(sequence.len(), 5);
        assert!(sequence.is_well_formed());

        match &sequence.items()[1] {
            SequenceItem::Arrow { transition_id, .. } => {
                assert_eq!(transition_id.as_deref(), Some("skip"))
            }
            other => panic!("Expected arrow, got {other:?}"),
        }
        match &sequence.items()[3] {
            SequenceItem::Arrow { transition_id, .. } => assert!(transition_id.is_none()),
            other => panic!("Expected arrow, got {other:?}"),
        }
    }

    #[test]
    fn test_to_sequence_small_graphs() {
        assert!(to_sequence(&ComboGraph::new()).unwrap().is_empty());

        let single = ComboGraph::from_movements(vec![MovementNode::new("gainer")]);
        let sequence = to_sequence(&single).unwrap();
        assert_eq!(sequence.len(), 1);
        assert!(sequence.items()[0].is_trick());
    }

    #[test]
    fn test_to_sequence_rejects_malformed_graph() {
        let mut graph = sample();
        graph.transitions.push(TransitionEdge::consecutive(2, None));
        assert!(matches!(
            to_sequence(&graph),
            Err(ComboError::MalformedGraph(_))
        ));
    }

    #[test]
    fn test_ids_are_fresh_per_projection() {
        let first = to_sequence(&sample()).unwrap();
        let second = to_sequence(&sample()).unwrap();
        assert_ne!(first.items()[0].id(), second.items()[0].id());
    }

    #[test]
    fn test_round_trip() {
        let graph = sample();
        assert_eq!(to_graph(&to_sequence(&graph).unwrap()), graph);
        assert_eq!(
            to_graph(&to_sequence(&ComboGraph::new()).unwrap()),
            ComboGraph::new()
        );
    }

    #[test]
    fn test_to_graph_missing_arrow_is_plain_edge() {
        let sequence = Sequence::from(vec![trick("gainer"), trick("cork")]);
        let graph = to_graph(&sequence);
        assert_eq!(graph.transitions, vec![TransitionEdge::consecutive(0, None)]);
    }

    #[test]
    fn test_to_graph_double_arrow_is_plain_edge() {
        let sequence = Sequence::from(vec![
            trick("gainer"),
            arrow(Some("skip")),
            arrow(Some("pop")),
            trick("cork"),
            arrow(Some("punch")),
            trick("btwist"),
        ]);
        let graph = to_graph(&sequence);
        assert_eq!(
            graph.transitions,
            vec![
                TransitionEdge::consecutive(0, None),
                TransitionEdge::consecutive(1, Some("punch".to_string())),
            ]
        );
        assert!(graph.check_structure().is_ok());
    }

    #[test]
    fn test_to_graph_ignores_dangling_arrows() {
        let sequence = Sequence::from(vec![
            arrow(Some("skip")),
            trick("gainer"),
            arrow(Some("pop")),
        ]);
        let graph = to_graph(&sequence);
        assert_eq!(graph.tricks, vec![MovementNode::new("gainer")]);
        assert!(graph.transitions.is_empty());

        let only_arrows = Sequence::from(vec![arrow(None), arrow(None)]);
        assert_eq!(to_graph(&only_arrows), ComboGraph::new());
    }
}
