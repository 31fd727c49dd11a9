use force_graph::SimulationParameters;

/// Tunables for the canvas: physics, sizing and colors.
#[derive(Clone, Debug)]
pub struct ViewConfig {
	/// Repulsion between nodes.
	pub force_charge: f32,
	/// Pull along links.
	pub force_spring: f32,
	/// Cap on the force applied to one node per tick.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Fraction of velocity kept each tick.
	pub damping_factor: f32,
	/// Canvas radius per unit of payload symbol size.
	pub radius_scale: f64,
	/// Hit-test radius in world space; scales with zoom like the nodes.
	pub hit_radius: f64,
	/// Canvas fill behind the graph.
	pub background: &'static str,
	/// Link color; alpha varies with hover.
	pub link_rgb: (u8, u8, u8),
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			radius_scale: 1.0 / 6.0,
			hit_radius: 12.0,
			background: "#1a1a2e",
			link_rgb: (100, 180, 255),
		}
	}
}

impl ViewConfig {
	/// Physics settings for the simulation.
	pub fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}

	/// CSS `rgba()` of the link color at `alpha`.
	pub fn link_color(&self, alpha: f64) -> String {
		let (r, g, b) = self.link_rgb;
		format!("rgba({r}, {g}, {b}, {alpha})")
	}
}
