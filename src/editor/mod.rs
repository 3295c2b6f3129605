//! Sequence editor
//!
//! Atomic edits applied to a composer sequence. Every operation reads the old
//! sequence and returns a new one, so a caller can keep prior snapshots for
//! undo. Given a well-formed input each operation returns a well-formed output.
//!
//! Referencing an id that is absent, or that names the wrong kind of item,
//! fails with `ItemNotFound` and leaves the input untouched.

use crate::error::{ComboError, ComboResult};
use crate::value_objects::{ItemId, MovementNode, Sequence, SequenceItem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Outcome of a drag gesture, as resolved by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropResolution {
    /// The dragged chip
    pub item_id: ItemId,
    /// Whether it was released over the delete target
    pub on_delete_target: bool,
}

/// Append a movement, adding an empty arrow first when the sequence has tricks
pub fn append_movement(sequence: &Sequence, node: MovementNode) -> Sequence {
    let mut items = sequence.items().to_vec();
    if !items.is_empty() {
        items.push(SequenceItem::arrow(None));
    }
    items.push(SequenceItem::trick(node));

    debug!(items = items.len(), "Appended movement");
    Sequence::from_items(items)
}

/// Insert a movement so it becomes the trick at `position`
///
/// `position` counts tricks, not items, and is clamped to the trick count.
pub fn insert_movement(sequence: &Sequence, position: usize, node: MovementNode) -> Sequence {
    let items = insert_trick_item(sequence.items(), position, SequenceItem::trick(node));
    debug!(position, items = items.len(), "Inserted movement");
    Sequence::from_items(items)
}

/// Replace the transition carried by an arrow
pub fn set_transition(
    sequence: &Sequence,
    arrow_id: ItemId,
    transition_id: Option<String>,
) -> ComboResult<Sequence> {
    let mut items = sequence.items().to_vec();
    match items.iter_mut().find(|item| item.id() == arrow_id) {
        Some(SequenceItem::Arrow {
            transition_id: current,
            ..
        }) => *current = transition_id,
        _ => return Err(ComboError::ItemNotFound(arrow_id)),
    }

    debug!(%arrow_id, "Set transition");
    Ok(Sequence::from_items(items))
}

/// Replace the landing stance of a trick
pub fn set_landing_stance(
    sequence: &Sequence,
    trick_id: ItemId,
    landing_stance: Option<String>,
) -> ComboResult<Sequence> {
    let mut items = sequence.items().to_vec();
    match items.iter_mut().find(|item| item.id() == trick_id) {
        Some(SequenceItem::Trick { data, .. }) => data.landing_stance = landing_stance,
        _ => return Err(ComboError::ItemNotFound(trick_id)),
    }

    debug!(%trick_id, "Set landing stance");
    Ok(Sequence::from_items(items))
}

/// Remove a trick together with one neighbouring arrow
///
/// The arrow after the trick goes with it; for the last trick the arrow before
/// it does. Removing the only trick yields the empty sequence.
pub fn remove_trick(sequence: &Sequence, trick_id: ItemId) -> ComboResult<Sequence> {
    let (items, _) = take_trick(sequence.items(), trick_id)?;
    debug!(%trick_id, items = items.len(), "Removed trick");
    Ok(Sequence::from_items(items))
}

/// Move a trick to trick position `to_position` (reorder by drag)
///
/// The moved chip keeps its id. Arrows are handled as if the trick were
/// removed and then inserted, so the transitions around its old slot stay with
/// the tricks that remain.
pub fn move_trick(sequence: &Sequence, trick_id: ItemId, to_position: usize) -> ComboResult<Sequence> {
    let (remaining, trick) = take_trick(sequence.items(), trick_id)?;
    let items = insert_trick_item(&remaining, to_position, trick);

    debug!(%trick_id, to_position, "Moved trick");
    Ok(Sequence::from_items(items))
}

/// Apply the outcome of a drag gesture
///
/// A trick dropped on the delete target is removed; an arrow dropped there
/// loses its transition, since arrows themselves cannot be removed. A drop
/// anywhere else changes nothing.
pub fn apply_drop(sequence: &Sequence, drop: DropResolution) -> ComboResult<Sequence> {
    let item = sequence
        .get(drop.item_id)
        .ok_or(ComboError::ItemNotFound(drop.item_id))?;

    if !drop.on_delete_target {
        return Ok(sequence.clone());
    }

    match item {
        SequenceItem::Trick { .. } => remove_trick(sequence, drop.item_id),
        SequenceItem::Arrow { .. } => set_transition(sequence, drop.item_id, None),
    }
}

/// Rebuild alternation over an arbitrary item list
///
/// Used after the UI hands back a reordered list. Tricks keep their order and
/// ids. A gap holding exactly one arrow keeps that arrow; any other gap gets a
/// fresh empty arrow. Arrows before the first or after the last trick are
/// dropped. Agrees with [`crate::projections::to_graph`] on every input.
pub fn normalize(sequence: &Sequence) -> Sequence {
    let mut items: Vec<SequenceItem> = Vec::with_capacity(sequence.len());
    let mut gap: Vec<&SequenceItem> = Vec::new();

    for item in sequence {
        if item.is_arrow() {
            gap.push(item);
            continue;
        }

        if !items.is_empty() {
            match gap.as_slice() {
                [arrow] => items.push((*arrow).clone()),
                _ => items.push(SequenceItem::arrow(None)),
            }
        }
        gap.clear();
        items.push(item.clone());
    }

    debug!(before = sequence.len(), after = items.len(), "Normalized sequence");
    Sequence::from_items(items)
}

/// Put the items of `sequence` in the order `order` names, then normalize
///
/// `order` must hold every id of `sequence` exactly once. Items are taken from
/// `sequence`, so only their position can change; the submitted contents are
/// ignored.
pub fn reorder(sequence: &Sequence, order: &[SequenceItem]) -> ComboResult<Sequence> {
    let mut seen = HashSet::with_capacity(order.len());
    let mut items = Vec::with_capacity(order.len());

    for submitted in order {
        let id = submitted.id();
        let item = sequence.get(id).ok_or(ComboError::ItemNotFound(id))?;
        if !seen.insert(id) {
            return Err(ComboError::MalformedInput(format!(
                "item {id} appears more than once in the reordered list"
            )));
        }
        items.push(item.clone());
    }

    if items.len() != sequence.len() {
        return Err(ComboError::MalformedInput(format!(
            "reordered list has {} items, sequence has {}",
            items.len(),
            sequence.len()
        )));
    }

    Ok(normalize(&Sequence::from_items(items)))
}

/// Split a trick and one neighbouring arrow out of `items`
fn take_trick(items: &[SequenceItem], trick_id: ItemId) -> ComboResult<(Vec<SequenceItem>, SequenceItem)> {
    let position = items
        .iter()
        .position(|item| item.id() == trick_id && item.is_trick())
        .ok_or(ComboError::ItemNotFound(trick_id))?;

    let mut remaining = items.to_vec();
    let trick = remaining.remove(position);

    if remaining.get(position).is_some_and(SequenceItem::is_arrow) {
        remaining.remove(position);
    } else if position > 0 && remaining[position - 1].is_arrow() {
        remaining.remove(position - 1);
    }

    Ok((remaining, trick))
}

/// Insert an existing trick item at trick position `position`
fn insert_trick_item(items: &[SequenceItem], position: usize, trick: SequenceItem) -> Vec<SequenceItem> {
    let mut result = Vec::with_capacity(items.len() + 2);
    let target = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_trick())
        .nth(position)
        .map(|(index, _)| index);

    match target {
        Some(index) => {
            result.extend_from_slice(&items[..index]);
            result.push(trick);
            result.push(SequenceItem::arrow(None));
            result.extend_from_slice(&items[index..]);
        }
        None => {
            result.extend_from_slice(items);
            if !result.is_empty() {
                result.push(SequenceItem::arrow(None));
            }
            result.push(trick);
        }
    }

    result
}
