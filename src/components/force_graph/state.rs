use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::debug;

use super::config::ViewConfig;
use crate::graph::{ChartOptions, LineStyle};

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: Option<String>,
	pub color: String,
	pub radius: f64,
	pub visible: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub config: ViewConfig,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	edge_styles: HashMap<(DefaultNodeIdx, DefaultNodeIdx), LineStyle>,
}

impl ForceGraphState {
	pub fn new(options: &ChartOptions, config: ViewConfig, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(config.simulation());
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();
		let mut edge_styles = HashMap::new();

		for (i, node) in options.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / options.nodes.len() as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: node.color.clone(),
					radius: node.size * config.radius_scale,
					visible: node.visible,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		// Dangling links have nothing to attach to in the simulation.
		for link in &options.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
				edge_styles.insert((src, tgt), link.style);
			}
		}

		Self {
			graph,
			edges,
			edge_styles,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			config,
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	/// Applies a fresh projection in place, keeping node positions.
	///
	/// Only color, label and visibility are synced; the node and link sets
	/// never change after load.
	pub fn apply_options(&mut self, options: &ChartOptions) {
		let by_id: HashMap<&str, _> = options.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
		let scale = self.config.radius_scale;
		let mut changed = 0;

		self.graph.visit_nodes_mut(|node| {
			let info = &mut node.data.user_data;
			if let Some(chart) = by_id.get(info.id.as_str()) {
				if info.visible != chart.visible || info.color != chart.color {
					changed += 1;
				}
				info.visible = chart.visible;
				info.color.clone_from(&chart.color);
				info.label.clone_from(&chart.label);
				info.radius = chart.size * scale;
			}
		});
		debug!("applied chart options, {changed} nodes changed");

		if let Some(idx) = self.hover.node {
			if !self.is_visible(idx) {
				self.set_hover(None);
			}
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost visible node under the cursor.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let hit_radius = self.config.hit_radius;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if !node.data.user_data.visible {
				return;
			}
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < hit_radius.max(node.data.user_data.radius) {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn is_visible(&self, idx: DefaultNodeIdx) -> bool {
		let mut visible = false;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				visible = node.data.user_data.visible;
			}
		});
		visible
	}

	pub fn edge_style(&self, src: DefaultNodeIdx, tgt: DefaultNodeIdx) -> LineStyle {
		self.edge_styles
			.get(&(src, tgt))
			.copied()
			.unwrap_or_default()
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			let neighbors: Vec<_> = self
				.edges
				.iter()
				.filter_map(|&(src, tgt)| {
					if src == idx {
						Some(tgt)
					} else if tgt == idx {
						Some(src)
					} else {
						None
					}
				})
				.collect();
			for other in neighbors {
				if self.is_visible(other) {
					self.hover.neighbors.insert(other);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use rstest::{fixture, rstest};

	use super::*;
	use crate::graph::{ChartLink, ChartNode};

	fn chart_node(id: &str, visible: bool, color: &str) -> ChartNode {
		ChartNode {
			id: id.into(),
			label: Some(id.into()),
			color: color.into(),
			size: 30.0,
			visible,
		}
	}

	fn options(a_visible: bool, a_color: &str) -> ChartOptions {
		ChartOptions {
			nodes: vec![chart_node("a", a_visible, a_color), chart_node("b", true, "#fff")],
			links: vec![ChartLink {
				source: "a".into(),
				target: "b".into(),
				style: LineStyle::Dashed,
				visible: a_visible,
			}],
		}
	}

	#[fixture]
	fn state() -> ForceGraphState {
		ForceGraphState::new(&options(true, "#fff"), ViewConfig::default(), 800.0, 600.0)
	}

	fn positions(state: &ForceGraphState) -> Vec<(String, f32, f32)> {
		let mut out = Vec::new();
		state
			.graph
			.visit_nodes(|node| out.push((node.data.user_data.id.clone(), node.x(), node.y())));
		out
	}

	/// Where node `id` currently sits on screen.
	fn screen_position(state: &ForceGraphState, id: &str) -> (f64, f64) {
		let (_, x, y) = positions(state)
			.into_iter()
			.find(|(node, _, _)| node == id)
			.unwrap();
		(
			x as f64 * state.transform.k + state.transform.x,
			y as f64 * state.transform.k + state.transform.y,
		)
	}

	#[rstest]
	fn visible_node_is_hit(state: ForceGraphState) {
		let (x, y) = screen_position(&state, "a");
		let idx = state.node_at_position(x, y).unwrap();
		assert_eq!(state.node_id(idx).as_deref(), Some("a"));
		assert_eq!(state.node_at_position(x + 50.0, y + 50.0), None);
	}

	#[rstest]
	fn hidden_node_is_not_hit(mut state: ForceGraphState) {
		let (x, y) = screen_position(&state, "a");
		state.apply_options(&options(false, "#fff"));
		assert_eq!(state.node_at_position(x, y), None);

		let (bx, by) = screen_position(&state, "b");
		assert!(state.node_at_position(bx, by).is_some());
	}

	#[rstest]
	fn restyle_keeps_positions(mut state: ForceGraphState) {
		let before = positions(&state);
		state.apply_options(&options(true, "#FF6B6B"));

		assert_eq!(positions(&state), before);
		let mut color = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == "a" {
				color = Some(node.data.user_data.color.clone());
			}
		});
		assert_eq!(color.as_deref(), Some("#FF6B6B"));
	}

	#[rstest]
	fn hiding_the_hovered_node_clears_hover(mut state: ForceGraphState) {
		let (x, y) = screen_position(&state, "a");
		let hovered = state.node_at_position(x, y);
		state.set_hover(hovered);
		assert!(state.has_active_highlight());

		state.apply_options(&options(false, "#fff"));
		assert_eq!(state.hover.node, None);
	}

	#[rstest]
	fn links_keep_their_style(state: ForceGraphState) {
		let (a, b) = state.edges[0];
		assert_eq!(state.edge_style(a, b), LineStyle::Dashed);
		assert_eq!(state.edge_style(b, a), LineStyle::Solid);
	}
}
