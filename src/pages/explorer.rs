use leptos::prelude::*;
use log::debug;

use super::focus::focus_path;
use crate::components::context_menu::{ContextMenu, MenuHandle, MenuState};
use crate::components::force_graph::{ForceGraphCanvas, NodeContext, SnapshotSink};
use crate::graph::{
	GraphError, GraphSnapshot, InteractionContext, MenuAction, MenuDismiss, SelectedNode,
	dispatch, render_projection,
};

const SAMPLE_GRAPH: &str = include_str!("sample_graph.json");

/// The bundled knowledge graph: two contexts with their concepts,
/// instances and (initially hidden) attributes.
pub fn sample_graph() -> Result<GraphSnapshot, GraphError> {
	GraphSnapshot::from_json(SAMPLE_GRAPH)
}

/// Canvas plus context menu over one snapshot.
///
/// Owns the snapshot signal: menu actions commit into it and the canvas
/// re-projects from it.
#[component]
pub fn GraphExplorer(
	graph: GraphSnapshot,
	#[prop(into)] title: String,
	#[prop(into)] subtitle: String,
) -> impl IntoView {
	let snapshot = RwSignal::new(graph);
	let options = Memo::new(move |_| snapshot.with(render_projection));
	let menu = RwSignal::new(MenuState::hidden());
	let interaction = RwSignal::new(InteractionContext::default());

	let on_node_context = move |target: NodeContext| {
		interaction.update(|ctx| ctx.remember(SelectedNode::new(target.id)));
		menu.set(MenuState::at(target.x, target.y));
	};

	let on_select = move |action: MenuAction| {
		let ctx = interaction.get_untracked();
		let (mut sink, mut handle) = (SnapshotSink(snapshot), MenuHandle(menu));
		// Failures are logged by dispatch; the menu is already gone.
		if let Ok(report) = dispatch(ctx.selection(action.id()), &mut sink, &mut handle) {
			debug!("{action}: {} of {} visited nodes changed", report.changed, report.visited);
		}
	};

	let on_background_click = move |_: ()| MenuHandle(menu).dismiss();

	let focus_href = Signal::derive(move || {
		interaction.with(|ctx| ctx.selected().map(|node| focus_path(&node.id)))
	});

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas
				options=options
				on_node_context=on_node_context
				on_background_click=on_background_click
				fullscreen=true
			/>
			<ContextMenu state=menu on_select=on_select focus_href=focus_href />
			<div class="graph-overlay">
				<h1>{title}</h1>
				<p class="subtitle">{subtitle}</p>
			</div>
		</div>
	}
}
