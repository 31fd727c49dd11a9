use leptos::prelude::*;

use super::explorer::{GraphExplorer, sample_graph};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph = move || {
		sample_graph().map(|graph| {
			view! {
				<GraphExplorer
					graph=graph
					title="Knowledge Graph"
					subtitle="Right-click a node to hide, expand, collapse or mark its subtree."
				/>
			}
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{graph}
		</ErrorBoundary>
	}
}
