//! Combo projections
//!
//! Views of a combo derived from its graph: the editable sequence and the chip
//! labels rendered from it.

pub mod chips;
pub mod sequence;

pub use chips::{chip_label, chip_labels, ChipKind, ChipLabel, MovementCatalog, StaticCatalog};
pub use sequence::{to_graph, to_sequence};
