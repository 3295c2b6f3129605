//! Combo aggregates

pub mod combo_graph;

pub use combo_graph::*;
