//! The graph snapshot and the subtree engine that edits it.
//!
//! Nothing in here touches the DOM; the canvas consumes
//! [`projection::render_projection`] and menu clicks come back through
//! [`action::dispatch`].

pub mod action;
pub mod chart;
pub mod error;
pub mod focus;
pub mod index;
pub mod model;
pub mod palette;
pub mod projection;
pub mod sink;
pub mod traversal;

pub use action::{InteractionContext, MenuAction, MenuSelection, SelectedNode, dispatch};
pub use chart::{ChartLink, ChartNode, ChartOptions};
pub use error::GraphError;
pub use focus::focus_subgraph;
pub use index::GraphIndex;
pub use model::{Category, Edge, GraphSnapshot, LineStyle, Node, NodeKind};
pub use palette::MarkColor;
pub use projection::render_projection;
pub use sink::{MenuDismiss, RenderSink};
pub use traversal::{Operation, SubtreeEngine, TraversalMode, TraversalReport};
