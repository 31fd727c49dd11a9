//! Force-directed canvas for a projected knowledge graph.

mod component;
mod config;
mod render;
mod sink;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use config::ViewConfig;
pub use sink::SnapshotSink;
pub use types::NodeContext;
