//! Grid placement of nodes inside their kind's region.
//!
//! Regions are sized from how many nodes of each kind the current graph
//! holds, so a crowded kind pushes its neighbours away instead of spilling
//! into them. Placement depends only on kinds and order, which keeps
//! `reset` equal to a fresh build.

use std::collections::BTreeMap;

use super::config::{CELL_HEIGHT, CELL_WIDTH, GUTTER, LAYOUT, region_for};
use super::types::{EntityKind, Node, Point};

/// Region origins and heights for one set of per-kind node counts.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionPlan {
	origins: BTreeMap<EntityKind, Point>,
	rows: BTreeMap<EntityKind, usize>,
}

/// Start of each band given the band sizes, with a gutter before each.
fn band_offsets(sizes: &[f64]) -> Vec<f64> {
	sizes
		.iter()
		.scan(GUTTER, |next, size| {
			let at = *next;
			*next += size + GUTTER;
			Some(at)
		})
		.collect()
}

impl RegionPlan {
	pub fn for_counts(counts: &BTreeMap<EntityKind, usize>) -> Self {
		let band_columns = LAYOUT.iter().map(|r| r.band_column + 1).max().unwrap_or(1);
		let band_rows = LAYOUT.iter().map(|r| r.band_row + 1).max().unwrap_or(1);
		let mut widths = vec![0.0_f64; band_columns];
		let mut heights = vec![0.0_f64; band_rows];
		let mut rows = BTreeMap::new();

		for region in &LAYOUT {
			let count = counts.get(&region.kind).copied().unwrap_or(0);
			let needed = region.rows_for(count);
			rows.insert(region.kind, needed);
			widths[region.band_column] = widths[region.band_column].max(region.width());
			heights[region.band_row] = heights[region.band_row].max(needed as f64 * CELL_HEIGHT);
		}

		let (xs, ys) = (band_offsets(&widths), band_offsets(&heights));
		let origins = LAYOUT
			.iter()
			.map(|r| (r.kind, Point::new(xs[r.band_column], ys[r.band_row])))
			.collect();
		Self { origins, rows }
	}

	pub fn for_nodes(nodes: &[Node]) -> Self {
		let mut counts = BTreeMap::new();
		for node in nodes {
			*counts.entry(node.kind).or_insert(0) += 1;
		}
		Self::for_counts(&counts)
	}

	/// Canvas position of the `index`-th node of `kind`.
	pub fn position_for(&self, kind: EntityKind, index: usize) -> Point {
		let region = region_for(kind);
		let origin = self.origins.get(&kind).copied().unwrap_or_default();
		let (col, row) = (index % region.columns, index / region.columns);
		Point::new(
			origin.x + col as f64 * CELL_WIDTH,
			origin.y + row as f64 * CELL_HEIGHT,
		)
	}

	/// Top-left and bottom-right corners of `kind`'s region.
	pub fn bounds(&self, kind: EntityKind) -> (Point, Point) {
		let region = region_for(kind);
		let origin = self.origins.get(&kind).copied().unwrap_or_default();
		let rows = self.rows.get(&kind).copied().unwrap_or(region.min_rows);
		let corner = Point::new(
			origin.x + region.width(),
			origin.y + rows as f64 * CELL_HEIGHT,
		);
		(origin, corner)
	}

	/// Bottom-right corner of the whole board, gutter included.
	pub fn extent(&self) -> Point {
		LAYOUT
			.iter()
			.map(|r| self.bounds(r.kind).1)
			.fold(Point::default(), |acc, p| {
				Point::new(acc.x.max(p.x + GUTTER), acc.y.max(p.y + GUTTER))
			})
	}
}

/// Assigns grid positions in place. Ordinals follow slice order per kind.
pub fn place(nodes: &mut [Node]) {
	let plan = RegionPlan::for_nodes(nodes);
	let mut next: BTreeMap<EntityKind, usize> = BTreeMap::new();
	for node in nodes.iter_mut() {
		let index = next.entry(node.kind).or_insert(0);
		node.position = plan.position_for(node.kind, *index);
		*index += 1;
	}
}

/// Grid positions for `nodes`, discarding drag offsets.
pub fn reset(nodes: &[Node]) -> Vec<Node> {
	let mut placed = nodes.to_vec();
	place(&mut placed);
	placed
}
