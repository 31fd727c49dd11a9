//! The node context menu.

use leptos::prelude::*;

use crate::graph::{MenuAction, MenuDismiss};

/// Where the menu sits; off-screen while closed.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuState {
	/// Whether the menu is shown.
	pub open: bool,
	/// Client x of the top-left corner.
	pub x: f64,
	/// Client y of the top-left corner.
	pub y: f64,
}

impl MenuState {
	/// Closed and parked at -9999px.
	pub fn hidden() -> Self {
		Self {
			open: false,
			x: -9999.0,
			y: -9999.0,
		}
	}

	/// Open at a client position.
	pub fn at(x: f64, y: f64) -> Self {
		Self { open: true, x, y }
	}

	fn style(&self) -> String {
		format!(
			"position: fixed; display: {}; left: {}px; top: {}px;",
			if self.open { "block" } else { "none" },
			self.x,
			self.y
		)
	}
}

impl Default for MenuState {
	fn default() -> Self {
		Self::hidden()
	}
}

/// Dismisses the menu by resetting its signal.
#[derive(Clone, Copy)]
pub struct MenuHandle(pub RwSignal<MenuState>);

impl MenuDismiss for MenuHandle {
	fn dismiss(&mut self) {
		self.0.set(MenuState::hidden());
	}
}

/// Right-click menu listing every [`MenuAction`].
#[component]
pub fn ContextMenu(
	/// Position and visibility, shared with whoever opens the menu.
	state: RwSignal<MenuState>,
	/// Fired with the clicked entry.
	#[prop(into)]
	on_select: Callback<MenuAction>,
	/// Link to a focused view of the selected node, if there is one.
	#[prop(into)]
	focus_href: Signal<Option<String>>,
) -> impl IntoView {
	let entries = MenuAction::ALL
		.into_iter()
		.map(|action| {
			view! {
				<li>
					<button id=action.id() on:click=move |_| on_select.run(action)>
						{action.label()}
					</button>
				</li>
			}
		})
		.collect_view();

	view! {
		<ul class="context-menu" style=move || state.with(MenuState::style)>
			{entries}
			{move || {
				focus_href
					.get()
					.map(|href| {
						view! {
							<li>
								<a href=href>"Open subtree"</a>
							</li>
						}
					})
			}}
		</ul>
	}
}
