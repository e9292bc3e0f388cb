use super::types::EntityKind;

/// Horizontal pitch between grid cells, in canvas units.
pub const CELL_WIDTH: f64 = 300.0;
/// Vertical pitch between grid cells, in canvas units.
pub const CELL_HEIGHT: f64 = 250.0;
/// Space between neighbouring regions and around the board edge.
pub const GUTTER: f64 = 100.0;

/// One kind's slot in the board's grid of regions. A region grows past
/// `min_rows` when its kind has more nodes; regions sharing a band row or
/// column are pushed apart accordingly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionLayout {
	pub kind: EntityKind,
	pub band_column: usize,
	pub band_row: usize,
	pub columns: usize,
	pub min_rows: usize,
}

impl RegionLayout {
	pub fn width(&self) -> f64 {
		self.columns as f64 * CELL_WIDTH
	}

	/// Rows needed to hold `count` nodes.
	pub fn rows_for(&self, count: usize) -> usize {
		count.div_ceil(self.columns).max(self.min_rows)
	}
}

const fn region(kind: EntityKind, band_column: usize, band_row: usize) -> RegionLayout {
	RegionLayout {
		kind,
		band_column,
		band_row,
		columns: 3,
		min_rows: 4,
	}
}

// 3x3 bands; persons top-left.
pub static LAYOUT: [RegionLayout; 8] = [
	region(EntityKind::Cpf, 0, 0),
	region(EntityKind::Cnpj, 1, 0),
	region(EntityKind::Vehicle, 2, 0),
	region(EntityKind::Property, 0, 1),
	region(EntityKind::Phone, 1, 1),
	region(EntityKind::SocialMedia, 2, 1),
	region(EntityKind::Financial, 0, 2),
	region(EntityKind::Business, 1, 2),
];

pub fn region_for(kind: EntityKind) -> &'static RegionLayout {
	LAYOUT
		.iter()
		.find(|r| r.kind == kind)
		.unwrap_or(&LAYOUT[0])
}

/// Tunables for the board, passed in as a component prop.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardConfig {
	/// Minimum canvas size; the canvas grows to fit the nodes.
	pub canvas_width: f64,
	pub canvas_height: f64,
	pub node_diameter: f64,
	pub initial_zoom: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub zoom_step: f64,
}

impl Default for BoardConfig {
	fn default() -> Self {
		Self {
			canvas_width: 3100.0,
			canvas_height: 3400.0,
			node_diameter: 100.0,
			initial_zoom: 1.0,
			min_zoom: 0.5,
			max_zoom: 2.0,
			zoom_step: 0.1,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const KINDS: [EntityKind; 8] = [
		EntityKind::Cpf,
		EntityKind::Cnpj,
		EntityKind::Vehicle,
		EntityKind::Property,
		EntityKind::Phone,
		EntityKind::SocialMedia,
		EntityKind::Financial,
		EntityKind::Business,
	];

	#[test]
	fn every_kind_has_exactly_one_region() {
		for kind in KINDS {
			assert_eq!(LAYOUT.iter().filter(|r| r.kind == kind).count(), 1, "{kind}");
			assert_eq!(region_for(kind).kind, kind);
		}
	}

	#[test]
	fn band_slots_are_unique() {
		for (i, a) in LAYOUT.iter().enumerate() {
			for b in &LAYOUT[i + 1..] {
				assert_ne!((a.band_column, a.band_row), (b.band_column, b.band_row));
			}
		}
	}

	#[test]
	fn rows_grow_with_count() {
		let cpf = region_for(EntityKind::Cpf);
		assert_eq!(cpf.rows_for(0), 4);
		assert_eq!(cpf.rows_for(12), 4);
		assert_eq!(cpf.rows_for(13), 5);
		assert_eq!(cpf.rows_for(16), 6);
	}
}
