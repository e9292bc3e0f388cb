use serde::{Deserialize, Serialize};

use super::config::BoardConfig;
use super::types::Point;

/// Zoom of the board. The canvas is scaled from its top-left corner, so
/// node positions stay in unscaled canvas units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
	zoom: f64,
	/// Zoom values are whole steps away from this one.
	anchor: f64,
	min: f64,
	max: f64,
	step: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(&BoardConfig::default())
	}
}

impl Viewport {
	pub fn new(config: &BoardConfig) -> Self {
		let zoom = config.initial_zoom.clamp(config.min_zoom, config.max_zoom);
		Self {
			zoom,
			anchor: zoom,
			min: config.min_zoom,
			max: config.max_zoom,
			step: config.zoom_step,
		}
	}

	pub fn zoom(&self) -> f64 {
		self.zoom
	}

	pub fn zoom_in(&mut self) {
		self.set_zoom(self.zoom + self.step);
	}

	pub fn zoom_out(&mut self) {
		self.set_zoom(self.zoom - self.step);
	}

	fn set_zoom(&mut self, zoom: f64) {
		// Snap to the step grid so repeated steps don't drift (0.1 * 3 != 0.3),
		// then shave float noise below 1e-9.
		let steps = ((zoom - self.anchor) / self.step).round();
		let on_grid = self.anchor + steps * self.step;
		let snapped = ((on_grid * 1e9).round() / 1e9).clamp(self.min, self.max);
		if snapped != self.zoom {
			log::debug!("zoom {:.1} -> {:.1}", self.zoom, snapped);
			self.zoom = snapped;
		}
	}

	/// Maps a pointer position to canvas units given where the canvas's
	/// top-left corner currently sits on screen.
	pub fn screen_to_canvas(&self, screen: Point, canvas_origin: Point) -> Point {
		let offset = screen - canvas_origin;
		Point::new(offset.x / self.zoom, offset.y / self.zoom)
	}

	pub fn zoom_percent(&self) -> u32 {
		(self.zoom * 100.0).round() as u32
	}
}
