use std::borrow::Cow;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use super::explorer::{GraphExplorer, sample_graph};
use crate::graph::focus_subgraph;

/// Route to the subtree view of `id`, which becomes a single path segment.
pub fn focus_path(id: &str) -> String {
	format!("/focus/{}", urlencoding::encode(id))
}

/// Node id carried by a `/focus/:id` segment.
///
/// Falls back to the raw segment when it does not decode to UTF-8.
fn node_id(segment: String) -> String {
	let decoded = urlencoding::decode(&segment).map(Cow::into_owned);
	decoded.unwrap_or(segment)
}

/// A single node's subtree on its own canvas.
#[component]
pub fn Focus() -> impl IntoView {
	let params = use_params_map();

	let graph = move || {
		let root = node_id(params.with(|p| p.get("id")).unwrap_or_default());
		sample_graph()
			.and_then(|graph| focus_subgraph(&graph, &root))
			.map(|graph| {
				view! {
					<GraphExplorer
						graph=graph
						title=format!("Subtree of {root}")
						subtitle="Everything downstream of the selected node."
					/>
				}
			})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"No such subtree"</h1>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
				<a href="/">"Back to the full graph"</a>
			}
		}>
			{graph}
		</ErrorBoundary>
	}
}
