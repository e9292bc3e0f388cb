use serde::{Deserialize, Serialize};

use super::builder;
use super::config::BoardConfig;
use super::drag::DragState;
use super::config::GUTTER;
use super::layout::{self, RegionPlan};
use super::records::RecordStore;
use super::search::{SearchFilter, SearchMode};
use super::types::{EntityKind, GraphData, Node, Point, SourceRef};
use super::viewport::Viewport;

pub const EXPORT_UNAVAILABLE: &str = "Board export is not available yet.";

/// Snapshot handed to the renderer each frame: nodes, edges, zoom and the
/// dragged node, plus the canvas size needed to hold them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
	#[serde(flatten)]
	pub graph: GraphData,
	pub zoom: f64,
	pub dragged_node_id: Option<String>,
	/// Bottom-right corner of the canvas, in canvas units.
	pub extent: Point,
}

impl ViewState {
	pub fn draw_order(&self) -> impl DoubleEndedIterator<Item = &Node> {
		draw_order(&self.graph.nodes, self.dragged_node_id.as_deref())
	}
}

/// Nodes back to front; the dragged node comes last.
fn draw_order<'a>(
	nodes: &'a [Node],
	dragged: Option<&'a str>,
) -> impl DoubleEndedIterator<Item = &'a Node> {
	let rest = nodes.iter().filter(move |n| Some(n.id.as_str()) != dragged);
	let top = nodes.iter().filter(move |n| Some(n.id.as_str()) == dragged);
	rest.chain(top)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoardStats {
	pub persons: usize,
	pub links: usize,
	pub zoom_percent: u32,
}

/// A message for the user that is not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice(pub String);

/// Owns all view state of the board. Every user action goes through a
/// method here; a rebuild always replaces the node set wholesale.
pub struct BoardState {
	pub config: BoardConfig,
	filter: SearchFilter,
	active: bool,
	graph: GraphData,
	viewport: Viewport,
	drag: DragState,
	/// Set whenever something visible changed since the last frame.
	pub dirty: bool,
}

impl BoardState {
	pub fn new(config: BoardConfig) -> Self {
		Self {
			viewport: Viewport::new(&config),
			config,
			filter: SearchFilter::default(),
			active: false,
			graph: GraphData::default(),
			drag: DragState::default(),
			dirty: true,
		}
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	fn rebuild(&mut self, store: &RecordStore) {
		self.graph = builder::build(store, &self.filter, self.active);
		// the node being dragged may no longer exist
		self.drag = DragState::Idle;
		self.dirty = true;
	}

	/// Typing only updates the term; the graph follows once a search was submitted.
	pub fn set_term(&mut self, store: &RecordStore, term: &str) {
		if self.filter.term == term {
			return;
		}
		self.filter = SearchFilter::new(term, self.filter.mode);
		if self.active {
			self.rebuild(store);
		}
	}

	/// Free-text search over identifier and name.
	pub fn submit_search(&mut self, store: &RecordStore) {
		log::info!("board search {:?} by identifier or name", self.filter.term);
		self.filter.mode = SearchMode::IdentifierOrName;
		self.active = true;
		self.rebuild(store);
	}

	pub fn search_identifier(&mut self, store: &RecordStore) {
		log::info!("board search {:?} by identifier", self.filter.term);
		self.filter.mode = SearchMode::IdentifierOnly;
		self.active = true;
		self.rebuild(store);
	}

	pub fn records_changed(&mut self, store: &RecordStore) {
		if self.active {
			self.rebuild(store);
		}
	}

	pub fn zoom_in(&mut self) {
		self.viewport.zoom_in();
		self.dirty = true;
	}

	pub fn zoom_out(&mut self) {
		self.viewport.zoom_out();
		self.dirty = true;
	}

	pub fn reset_layout(&mut self) {
		log::info!("resetting board layout ({} nodes)", self.graph.nodes.len());
		self.graph.nodes = layout::reset(&self.graph.nodes);
		self.dirty = true;
	}

	/// Top-most node whose circle contains `point` (canvas units).
	pub fn node_at(&self, point: Point) -> Option<&Node> {
		let radius = self.config.node_diameter / 2.0;
		draw_order(&self.graph.nodes, self.drag.dragged_node_id()).rev().find(|node| {
			let c = node.center(self.config.node_diameter);
			let (dx, dy) = (c.x - point.x, c.y - point.y);
			(dx * dx + dy * dy).sqrt() <= radius
		})
	}

	/// Returns whether a drag started.
	pub fn pointer_down(&mut self, screen: Point, canvas_origin: Point) -> bool {
		let pointer = self.viewport.screen_to_canvas(screen, canvas_origin);
		let Some(node) = self.node_at(pointer).cloned() else {
			return false;
		};
		self.drag.pointer_down(&node, pointer);
		self.dirty = true;
		true
	}

	pub fn pointer_move(&mut self, screen: Point, canvas_origin: Point) {
		let pointer = self.viewport.screen_to_canvas(screen, canvas_origin);
		if self.drag.pointer_move(&mut self.graph.nodes, pointer) {
			self.dirty = true;
		}
	}

	pub fn pointer_up(&mut self) {
		if self.drag.is_dragging() {
			self.drag.pointer_up();
			self.dirty = true;
		}
	}

	pub fn pointer_leave(&mut self) {
		if self.drag.is_dragging() {
			self.drag.pointer_leave();
			self.dirty = true;
		}
	}

	/// Source record behind a node, for the edit form.
	pub fn request_edit(&self, node_id: &str) -> Option<SourceRef> {
		let source = self.graph.node(node_id).map(|n| n.source);
		match source {
			Some(source) => log::info!("edit requested for {} #{}", source.kind, source.record_id),
			None => log::warn!("edit requested for unknown node {node_id}"),
		}
		source
	}

	/// Exporting the board is not implemented.
	pub fn request_export(&self) -> Notice {
		log::info!("board export requested");
		Notice(EXPORT_UNAVAILABLE.to_string())
	}

	pub fn stats(&self) -> BoardStats {
		BoardStats {
			persons: self.graph.count_of(EntityKind::Cpf),
			links: self.graph.edges.len(),
			zoom_percent: self.viewport.zoom_percent(),
		}
	}

	/// Canvas size holding every region and every dragged node.
	fn extent(&self) -> Point {
		let regions = RegionPlan::for_nodes(&self.graph.nodes).extent();
		let reach = self.config.node_diameter + GUTTER;
		self.graph.nodes.iter().fold(
			Point::new(
				regions.x.max(self.config.canvas_width),
				regions.y.max(self.config.canvas_height),
			),
			|acc, n| Point::new(acc.x.max(n.position.x + reach), acc.y.max(n.position.y + reach)),
		)
	}

	pub fn view_state(&self) -> ViewState {
		ViewState {
			graph: self.graph.clone(),
			zoom: self.viewport.zoom(),
			dragged_node_id: self.drag.dragged_node_id().map(str::to_string),
			extent: self.extent(),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::quadro::records::{CpfRecord, VehicleRecord};

	fn store() -> RecordStore {
		RecordStore {
			cpfs: vec![
				CpfRecord {
					id: 1,
					cpf: "111.111.111-11".into(),
					nome: "Jane Doe".into(),
					foto: None,
				},
				CpfRecord {
					id: 2,
					cpf: "222.222.222-22".into(),
					nome: "John Roe".into(),
					foto: None,
				},
			],
			veiculos: vec![VehicleRecord {
				id: 1,
				placa: "ABC-1234".into(),
				marca: "Fiat".into(),
				modelo: "Uno".into(),
				cpf_vinculo_primario: Some("111.111.111-11".into()),
			}],
			..Default::default()
		}
	}

	fn searched(term: &str) -> (RecordStore, BoardState) {
		let store = store();
		let mut board = BoardState::new(BoardConfig::default());
		board.set_term(&store, term);
		board.submit_search(&store);
		(store, board)
	}

	fn center_of(board: &BoardState, id: &str) -> Point {
		let node = board.graph.node(id).expect("node present");
		node.center(board.config.node_diameter)
	}

	#[test]
	fn hidden_until_search_is_submitted() {
		let store = store();
		let mut board = BoardState::new(BoardConfig::default());
		board.set_term(&store, "Jane");
		assert!(board.graph.nodes.is_empty());
		board.submit_search(&store);
		assert_eq!(board.stats().persons, 1);
		assert_eq!(board.stats().links, 1);
	}

	#[test]
	fn typing_after_submit_rebuilds() {
		let (store, mut board) = searched("Jane");
		board.set_term(&store, "John");
		let ids: Vec<_> = board.graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["cpf-2"]);
	}

	#[test]
	fn identifier_search_switches_mode() {
		let (store, mut board) = searched("Jane");
		board.search_identifier(&store);
		assert_eq!(board.filter.mode, SearchMode::IdentifierOnly);
		assert!(board.graph.nodes.is_empty());
		board.set_term(&store, "222");
		assert_eq!(board.stats().persons, 1);
	}

	#[test]
	fn drag_at_double_zoom_moves_half_the_screen_delta() {
		let (_, mut board) = searched("Jane");
		for _ in 0..10 {
			board.zoom_in();
		}
		assert_eq!(board.viewport().zoom(), 2.0);

		let origin = Point::new(10.0, 20.0);
		let start = board.graph.node("cpf-1").expect("cpf node").position;
		let grab = center_of(&board, "cpf-1");
		let screen = Point::new(origin.x + grab.x * 2.0, origin.y + grab.y * 2.0);

		assert!(board.pointer_down(screen, origin));
		assert_eq!(board.drag.dragged_node_id(), Some("cpf-1"));
		board.pointer_move(Point::new(screen.x + 50.0, screen.y), origin);
		board.pointer_up();

		let moved = board.graph.node("cpf-1").expect("cpf node").position;
		assert_eq!(moved, Point::new(start.x + 25.0, start.y));
		assert_eq!(board.drag.dragged_node_id(), None);
	}

	#[test]
	fn pointer_down_on_empty_canvas_does_not_drag() {
		let (_, mut board) = searched("Jane");
		assert!(!board.pointer_down(Point::new(3000.0, 3000.0), Point::default()));
		assert_eq!(board.drag.dragged_node_id(), None);
	}

	#[test]
	fn reset_after_drags_matches_fresh_build() {
		let (store, mut board) = searched("");
		let fresh = board.graph.clone();
		for id in ["cpf-1", "vehicle-1", "cpf-2"] {
			let grab = center_of(&board, id);
			board.pointer_down(grab, Point::default());
			board.pointer_move(Point::new(grab.x + 77.0, grab.y - 13.0), Point::default());
			board.pointer_leave();
		}
		assert_ne!(board.graph.nodes, fresh.nodes);
		board.reset_layout();
		assert_eq!(&board.graph, &fresh);

		board.records_changed(&store);
		assert_eq!(&board.graph, &fresh);
	}

	#[test]
	fn dragged_node_is_hit_first_and_drawn_last() {
		let (_, mut board) = searched("");
		let vehicle = center_of(&board, "vehicle-1");
		let cpf = center_of(&board, "cpf-1");
		board.pointer_down(cpf, Point::default());
		board.pointer_move(vehicle, Point::default());
		assert_eq!(board.node_at(vehicle).map(|n| n.id.as_str()), Some("cpf-1"));
		let view = board.view_state();
		assert_eq!(view.draw_order().last().map(|n| n.id.as_str()), Some("cpf-1"));
		assert_eq!(view.dragged_node_id.as_deref(), Some("cpf-1"));
	}

	#[test]
	fn edges_follow_moved_node() {
		let (_, mut board) = searched("Jane");
		let grab = center_of(&board, "vehicle-1");
		board.pointer_down(grab, Point::default());
		board.pointer_move(Point::new(grab.x + 40.0, grab.y + 40.0), Point::default());
		let (_, _, to) = board.graph.resolved_edges().next().expect("edge");
		assert_eq!(to.center(board.config.node_diameter), Point::new(grab.x + 40.0, grab.y + 40.0));
	}

	#[test]
	fn export_and_edit_hooks() {
		let (_, board) = searched("Jane");
		assert_eq!(board.request_export(), Notice(EXPORT_UNAVAILABLE.into()));
		let source = board.request_edit("vehicle-1").expect("known node");
		assert_eq!(source.kind, EntityKind::Vehicle);
		assert_eq!(source.record_id, 1);
		assert_eq!(board.request_edit("phone-9"), None);
	}

	#[test]
	fn view_state_serializes() {
		let (_, board) = searched("Jane");
		let json = serde_json::to_string(&board.view_state()).expect("serializable");
		assert!(json.contains("\"cpf-1\""));
		assert!(json.contains("\"zoom\":1.0"));
		assert!(json.contains("\"nodes\":["));
		assert!(json.contains("\"edges\":["));
	}

	#[test]
	fn view_extent_grows_with_dragged_nodes() {
		let (_, mut board) = searched("Jane");
		let initial = board.view_state().extent;
		assert_eq!(initial, Point::new(3100.0, 3400.0));

		let grab = center_of(&board, "vehicle-1");
		board.pointer_down(grab, Point::default());
		board.pointer_move(Point::new(grab.x + 2000.0, grab.y), Point::default());
		let moved = board.graph.node("vehicle-1").expect("vehicle").position;
		let extent = board.view_state().extent;
		assert_eq!(extent.x, moved.x + board.config.node_diameter + GUTTER);
		assert_eq!(extent.y, initial.y);
	}
}
