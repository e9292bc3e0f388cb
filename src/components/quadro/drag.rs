//! Single-pointer drag of one node at a time.
//!
//! `Idle --down on node--> Dragging --move--> Dragging --up/leave--> Idle`.
//! There is no cancel gesture; releasing keeps wherever the node ended up.

use serde::{Deserialize, Serialize};

use super::types::{Node, Point};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum DragState {
	#[default]
	Idle,
	Dragging {
		node_id: String,
		/// Pointer position minus node position, in canvas units.
		offset: Point,
	},
}

impl DragState {
	pub fn dragged_node_id(&self) -> Option<&str> {
		match self {
			DragState::Idle => None,
			DragState::Dragging { node_id, .. } => Some(node_id.as_str()),
		}
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self, DragState::Dragging { .. })
	}

	/// Starts dragging `node` grabbed at `pointer` (canvas units).
	pub fn pointer_down(&mut self, node: &Node, pointer: Point) {
		log::debug!("drag start {}", node.id);
		*self = DragState::Dragging {
			node_id: node.id.clone(),
			offset: pointer - node.position,
		};
	}

	/// Moves the dragged node so it stays under `pointer`. Other nodes are
	/// left alone. Returns whether a node moved.
	pub fn pointer_move(&self, nodes: &mut [Node], pointer: Point) -> bool {
		let DragState::Dragging { node_id, offset } = self else {
			return false;
		};
		let Some(node) = nodes.iter_mut().find(|n| &n.id == node_id) else {
			return false;
		};
		let target = pointer - *offset;
		node.position = Point::new(target.x.max(0.0), target.y.max(0.0));
		true
	}

	pub fn pointer_up(&mut self) {
		if let DragState::Dragging { node_id, .. } = self {
			log::debug!("drag end {node_id}");
		}
		*self = DragState::Idle;
	}

	/// Leaving the canvas ends the drag the same way releasing does.
	pub fn pointer_leave(&mut self) {
		self.pointer_up();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::quadro::types::{EntityKind, SourceRef, node_id};

	fn nodes() -> Vec<Node> {
		[(EntityKind::Cpf, Point::new(100.0, 100.0)), (EntityKind::Phone, Point::new(400.0, 100.0))]
			.into_iter()
			.map(|(kind, position)| Node {
				id: node_id(kind, 1),
				kind,
				display_name: String::new(),
				identifier_value: String::new(),
				photo_ref: None,
				position,
				source: SourceRef { kind, record_id: 1 },
			})
			.collect()
	}

	#[test]
	fn move_keeps_grab_offset_and_touches_one_node() {
		let mut nodes = nodes();
		let mut drag = DragState::default();
		drag.pointer_down(&nodes[0], Point::new(130.0, 120.0));
		assert_eq!(drag.dragged_node_id(), Some("cpf-1"));

		assert!(drag.pointer_move(&mut nodes, Point::new(180.0, 170.0)));
		assert_eq!(nodes[0].position, Point::new(150.0, 150.0));
		assert_eq!(nodes[1].position, Point::new(400.0, 100.0));
	}

	#[test]
	fn negative_targets_clamp_to_zero() {
		let mut nodes = nodes();
		let mut drag = DragState::default();
		drag.pointer_down(&nodes[0], Point::new(110.0, 110.0));
		drag.pointer_move(&mut nodes, Point::new(-50.0, 40.0));
		assert_eq!(nodes[0].position, Point::new(0.0, 30.0));
	}

	#[test]
	fn idle_moves_nothing() {
		let mut nodes = nodes();
		let drag = DragState::default();
		assert!(!drag.pointer_move(&mut nodes, Point::new(0.0, 0.0)));
		assert_eq!(nodes[0].position, Point::new(100.0, 100.0));
	}

	#[test]
	fn up_and_leave_return_to_idle_without_snapping() {
		let mut nodes = nodes();
		let mut drag = DragState::default();
		drag.pointer_down(&nodes[1], Point::new(400.0, 100.0));
		drag.pointer_move(&mut nodes, Point::new(433.0, 117.0));
		drag.pointer_up();
		assert_eq!(drag, DragState::Idle);
		assert_eq!(nodes[1].position, Point::new(433.0, 117.0));

		drag.pointer_down(&nodes[1], Point::new(433.0, 117.0));
		drag.pointer_leave();
		assert!(!drag.is_dragging());
	}

	#[test]
	fn vanished_node_is_ignored() {
		let mut nodes = nodes();
		let mut drag = DragState::default();
		drag.pointer_down(&nodes[0], Point::new(100.0, 100.0));
		nodes.remove(0);
		assert!(!drag.pointer_move(&mut nodes, Point::new(300.0, 300.0)));
	}
}
