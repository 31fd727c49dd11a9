//! Fills for marked nodes.

use std::fmt;

use super::model::DEFAULT_NODE_COLOR;

/// Colors offered by the "mark" menu entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkColor {
	/// Clears a mark back to the default fill.
	None,
	/// `#FF6B6B`
	Red,
	/// `#FFD93D`
	Yellow,
	/// `#6BCB77`
	Green,
}

impl MarkColor {
	/// Every color, in menu order.
	pub const ALL: [MarkColor; 4] = [
		MarkColor::None,
		MarkColor::Red,
		MarkColor::Yellow,
		MarkColor::Green,
	];

	/// CSS fill for this mark.
	pub fn hex(self) -> &'static str {
		match self {
			MarkColor::None => DEFAULT_NODE_COLOR,
			MarkColor::Red => "#FF6B6B",
			MarkColor::Yellow => "#FFD93D",
			MarkColor::Green => "#6BCB77",
		}
	}

	/// Lowercase name used in action ids.
	pub fn name(self) -> &'static str {
		match self {
			MarkColor::None => "none",
			MarkColor::Red => "red",
			MarkColor::Yellow => "yellow",
			MarkColor::Green => "green",
		}
	}

	/// Inverse of [`MarkColor::name`].
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|c| c.name() == name)
	}
}

impl fmt::Display for MarkColor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
