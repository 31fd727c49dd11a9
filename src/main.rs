//! Browser entry point: mounts [`App`] on the document body.

use subtree_graph_canvas::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
