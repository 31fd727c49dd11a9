//! Leptos components: the graph canvas and its context menu.

pub mod context_menu;
pub mod force_graph;
