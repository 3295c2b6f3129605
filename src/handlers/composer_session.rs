//! Composer session
//!
//! Owns the one sequence being edited and the snapshots needed to undo. All
//! edits run through the pure sequence editor; a failed command leaves the
//! session exactly as it was.

use crate::aggregate::ComboGraph;
use crate::commands::ComposerCommand;
use crate::config::ComposerConfig;
use crate::editor::{self, DropResolution};
use crate::error::{ComboError, ComboResult};
use crate::events::ComboEvent;
use crate::marshalling::marshal;
use crate::projections::{to_graph, to_sequence};
use crate::validation::{validate_nodes, Emptiness};
use crate::value_objects::{ItemId, Sequence, SequenceItem};
use std::collections::VecDeque;
use tracing::debug;

/// One combo being composed or edited
#[derive(Debug, Clone)]
pub struct ComposerSession {
    sequence: Sequence,
    history: VecDeque<Sequence>,
    config: ComposerConfig,
}

impl ComposerSession {
    /// Start composing a new, empty combo
    pub fn new(config: ComposerConfig) -> Self {
        Self {
            sequence: Sequence::new(),
            history: VecDeque::new(),
            config,
        }
    }

    /// Start editing an existing combo
    pub fn from_graph(graph: &ComboGraph, config: ComposerConfig) -> ComboResult<Self> {
        validate_nodes(&graph.tricks, Emptiness::Allow)?;
        let sequence = to_sequence(graph)?;
        Ok(Self {
            sequence,
            history: VecDeque::new(),
            config,
        })
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Apply one command, returning what happened
    pub fn apply(&mut self, command: ComposerCommand) -> ComboResult<ComboEvent> {
        let name = command.name();
        let (next, event) = self.edit(command)?;

        if self.config.undo_depth > 0 {
            if self.history.len() == self.config.undo_depth {
                self.history.pop_front();
            }
            self.history
                .push_back(std::mem::replace(&mut self.sequence, next));
        } else {
            self.sequence = next;
        }

        debug!(command = name, items = self.sequence.len(), "Applied composer command");
        Ok(event)
    }

    /// Restore the sequence as it was before the last applied command
    pub fn undo(&mut self) -> Option<ComboEvent> {
        let previous = self.history.pop_back()?;
        self.sequence = previous;
        debug!(items = self.sequence.len(), "Undid composer command");
        Some(ComboEvent::EditUndone {
            items: self.sequence.len(),
        })
    }

    /// Current graph without boundary validation
    pub fn to_graph(&self) -> ComboGraph {
        to_graph(&self.sequence)
    }

    /// Current graph, checked against the persistence rules
    pub fn finish(&self) -> ComboResult<ComboGraph> {
        let graph = self.to_graph();
        marshal(&graph)?;
        Ok(graph)
    }

    fn edit(&self, command: ComposerCommand) -> ComboResult<(Sequence, ComboEvent)> {
        let current = &self.sequence;
        match command {
            ComposerCommand::AppendMovement { node } => {
                let next = editor::append_movement(current, node.clone());
                let trick_id = next
                    .items()
                    .last()
                    .map(SequenceItem::id)
                    .ok_or(ComboError::EmptySequence)?;
                Ok((next, ComboEvent::MovementAppended { trick_id, node }))
            }
            ComposerCommand::InsertMovement { position, node } => {
                let position = position.min(current.trick_count());
                let next = editor::insert_movement(current, position, node.clone());
                let trick_id = nth_trick_id(&next, position).ok_or(ComboError::EmptySequence)?;
                Ok((
                    next,
                    ComboEvent::MovementInserted {
                        trick_id,
                        position,
                        node,
                    },
                ))
            }
            ComposerCommand::SetTransition {
                arrow_id,
                transition_id,
            } => {
                let next = editor::set_transition(current, arrow_id, transition_id.clone())?;
                Ok((
                    next,
                    ComboEvent::TransitionSet {
                        arrow_id,
                        transition_id,
                    },
                ))
            }
            ComposerCommand::SetLandingStance {
                trick_id,
                landing_stance,
            } => {
                let next = editor::set_landing_stance(current, trick_id, landing_stance.clone())?;
                Ok((
                    next,
                    ComboEvent::LandingStanceSet {
                        trick_id,
                        landing_stance,
                    },
                ))
            }
            ComposerCommand::RemoveTrick { trick_id } => {
                let next = editor::remove_trick(current, trick_id)?;
                Ok((next, ComboEvent::TrickRemoved { trick_id }))
            }
            ComposerCommand::MoveTrick {
                trick_id,
                to_position,
            } => {
                let next = editor::move_trick(current, trick_id, to_position)?;
                Ok((
                    next,
                    ComboEvent::TrickMoved {
                        trick_id,
                        to_position,
                    },
                ))
            }
            ComposerCommand::Drop(drop) => self.resolve_drop(drop),
            ComposerCommand::Reorder { items } => {
                let next = editor::reorder(current, &items)?;
                let items = next.len();
                Ok((next, ComboEvent::SequenceNormalized { items }))
            }
        }
    }

    fn resolve_drop(&self, drop: DropResolution) -> ComboResult<(Sequence, ComboEvent)> {
        let is_trick = self
            .sequence
            .get(drop.item_id)
            .map(SequenceItem::is_trick)
            .ok_or(ComboError::ItemNotFound(drop.item_id))?;
        let next = editor::apply_drop(&self.sequence, drop)?;

        let event = match (drop.on_delete_target, is_trick) {
            (false, _) => ComboEvent::DropIgnored {
                item_id: drop.item_id,
            },
            (true, true) => ComboEvent::TrickRemoved {
                trick_id: drop.item_id,
            },
            (true, false) => ComboEvent::TransitionSet {
                arrow_id: drop.item_id,
                transition_id: None,
            },
        };
        Ok((next, event))
    }
}

impl Default for ComposerSession {
    fn default() -> Self {
        Self::new(ComposerConfig::default())
    }
}

fn nth_trick_id(sequence: &Sequence, position: usize) -> Option<ItemId> {
    sequence
        .iter()
        .filter(|item| item.is_trick())
        .nth(position)
        .map(SequenceItem::id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::MovementNode;

    fn append(session: &mut ComposerSession, movement_id: &str) -> ItemId {
        match session
            .apply(ComposerCommand::AppendMovement {
                node: MovementNode::new(movement_id),
            })
            .unwrap()
        {
            ComboEvent::MovementAppended { trick_id, .. } => trick_id,
            other => panic!("Expected MovementAppended event, got {other:?}"),
        }
    }

    #[test]
    fn test_compose_and_finish() {
        let mut session = ComposerSession::default();
        assert!(session.finish().is_err(), "an empty combo cannot be saved");

        append(&mut session, "gainer");
        append(&mut session, "cork");
        let arrow_id = session.sequence().items()[1].id();
        session
            .apply(ComposerCommand::SetTransition {
                arrow_id,
                transition_id: Some("skip".to_string()),
            })
            .unwrap();

        let graph = session.finish().unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.transition_after(0), Some("skip"));
    }

    #[test]
    fn test_appended_event_names_new_chip() {
        let mut session = ComposerSession::default();
        let first = append(&mut session, "gainer");
        let second = append(&mut session, "cork");
        assert_eq!(session.sequence().items()[0].id(), first);
        assert_eq!(session.sequence().items()[2].id(), second);
    }

    #[test]
    fn test_insert_event_names_new_chip() {
        let mut session = ComposerSession::default();
        append(&mut session, "gainer");

        let event = session
            .apply(ComposerCommand::InsertMovement {
                position: 10,
                node: MovementNode::new("cork"),
            })
            .unwrap();
        match event {
            ComboEvent::MovementInserted {
                trick_id, position, ..
            } => {
                assert_eq!(position, 1);
                assert_eq!(session.sequence().items()[2].id(), trick_id);
            }
            other => panic!("Expected MovementInserted event, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_command_leaves_session_untouched() {
        let mut session = ComposerSession::default();
        let trick_id = append(&mut session, "gainer");
        let before = session.sequence().clone();

        let result = session.apply(ComposerCommand::SetTransition {
            arrow_id: trick_id,
            transition_id: Some("skip".to_string()),
        });
        assert_eq!(result, Err(ComboError::ItemNotFound(trick_id)));
        assert_eq!(session.sequence(), &before);
    }

    #[test]
    fn test_undo() {
        let mut session = ComposerSession::default();
        assert!(session.undo().is_none());

        let trick_id = append(&mut session, "gainer");
        append(&mut session, "cork");
        session
            .apply(ComposerCommand::RemoveTrick { trick_id })
            .unwrap();
        assert_eq!(session.sequence().len(), 1);

        assert_eq!(session.undo(), Some(ComboEvent::EditUndone { items: 3 }));
        assert_eq!(session.undo(), Some(ComboEvent::EditUndone { items: 1 }));
        assert_eq!(session.undo(), Some(ComboEvent::EditUndone { items: 0 }));
        assert!(!session.can_undo());
    }

    #[test]
    fn test_undo_depth_is_bounded() {
        let mut session = ComposerSession::new(ComposerConfig { undo_depth: 2 });
        for movement in ["gainer", "cork", "btwist", "raiz"] {
            append(&mut session, movement);
        }

        assert!(session.undo().is_some());
        assert!(session.undo().is_some());
        assert!(session.undo().is_none());
        assert_eq!(session.sequence().trick_count(), 2);

        let mut no_undo = ComposerSession::new(ComposerConfig { undo_depth: 0 });
        append(&mut no_undo, "gainer");
        assert!(!no_undo.can_undo());
    }

    #[test]
    fn test_drop_events() {
        let mut session = ComposerSession::default();
        let trick_id = append(&mut session, "gainer");
        append(&mut session, "cork");
        let arrow_id = session.sequence().items()[1].id();

        let event = session
            .apply(ComposerCommand::Drop(DropResolution {
                item_id: arrow_id,
                on_delete_target: false,
            }))
            .unwrap();
        assert_eq!(event, ComboEvent::DropIgnored { item_id: arrow_id });

        let event = session
            .apply(ComposerCommand::Drop(DropResolution {
                item_id: arrow_id,
                on_delete_target: true,
            }))
            .unwrap();
        assert_eq!(
            event,
            ComboEvent::TransitionSet {
                arrow_id,
                transition_id: None
            }
        );

        let event = session
            .apply(ComposerCommand::Drop(DropResolution {
                item_id: trick_id,
                on_delete_target: true,
            }))
            .unwrap();
        assert_eq!(event, ComboEvent::TrickRemoved { trick_id });
        assert_eq!(session.sequence().len(), 1);
    }

    #[test]
    fn test_reorder() {
        let mut session = ComposerSession::default();
        append(&mut session, "gainer");
        append(&mut session, "cork");

        let mut items = session.sequence().items().to_vec();
        items.swap(0, 2);
        let event = session.apply(ComposerCommand::Reorder { items }).unwrap();
        assert_eq!(event, ComboEvent::SequenceNormalized { items: 3 });

        let graph = session.to_graph();
        assert_eq!(graph.tricks[0].movement_id, "cork");
        assert_eq!(graph.tricks[1].movement_id, "gainer");
    }

    #[test]
    fn test_from_graph_rejects_bad_graphs() {
        let invalid = ComboGraph::from_movements(vec![MovementNode::new("")]);
        assert_eq!(
            ComposerSession::from_graph(&invalid, ComposerConfig::default()).unwrap_err(),
            ComboError::InvalidMovementId { index: 0 }
        );

        let malformed = ComboGraph::from_parts(vec![MovementNode::new("gainer"), MovementNode::new("cork")], vec![]);
        assert!(matches!(
            ComposerSession::from_graph(&malformed, ComposerConfig::default()),
            Err(ComboError::MalformedGraph(_))
        ));

        let empty = ComposerSession::from_graph(&ComboGraph::new(), ComposerConfig::default()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_reorder_rejects_duplicate_and_foreign_chips() {
        let mut session = ComposerSession::default();
        append(&mut session, "gainer");
        append(&mut session, "cork");
        let before = session.sequence().clone();
        let items = before.items().to_vec();

        let duplicated = vec![
            items[0].clone(),
            items[1].clone(),
            items[2].clone(),
            items[1].clone(),
            items[0].clone(),
        ];
        assert!(matches!(
            session.apply(ComposerCommand::Reorder { items: duplicated }),
            Err(ComboError::MalformedInput(_))
        ));

        let foreign = SequenceItem::trick(MovementNode::new(""));
        let foreign_id = foreign.id();
        let with_foreign = vec![items[0].clone(), items[1].clone(), foreign];
        assert_eq!(
            session.apply(ComposerCommand::Reorder { items: with_foreign }),
            Err(ComboError::ItemNotFound(foreign_id))
        );

        assert_eq!(session.sequence(), &before);
        assert_eq!(session.undo(), Some(ComboEvent::EditUndone { items: 1 }));
    }
}
