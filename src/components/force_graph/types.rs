/// Where a node was right-clicked, in client coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeContext {
	/// Id of the node under the cursor.
	pub id: String,
	/// Client x of the click.
	pub x: f64,
	/// Client y of the click.
	pub y: f64,
}
