//! Drawable form of a snapshot, as handed to the canvas.

use super::model::LineStyle;

/// A node as the canvas draws it.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartNode {
	/// Id of the snapshot node this was projected from.
	pub id: String,
	/// Text drawn beside the node, if any.
	pub label: Option<String>,
	/// CSS fill color.
	pub color: String,
	/// Symbol diameter in the payload's units; the canvas scales it.
	pub size: f64,
	/// Hidden nodes stay in the simulation but are neither drawn nor hit.
	pub visible: bool,
}

/// A directed link between two chart nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLink {
	/// Upstream end.
	pub source: String,
	/// Downstream end.
	pub target: String,
	/// Stroke pattern.
	pub style: LineStyle,
	/// True while both ends are visible.
	pub visible: bool,
}

/// Everything the canvas needs to draw one frame of the graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartOptions {
	/// In snapshot order.
	pub nodes: Vec<ChartNode>,
	/// In snapshot order, dangling links included.
	pub links: Vec<ChartLink>,
}
