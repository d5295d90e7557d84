//! Reusable view components.

pub mod force_graph;
pub mod metric_bars;
