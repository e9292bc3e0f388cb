use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight entity kinds that can appear on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
	Cpf,
	Cnpj,
	Vehicle,
	Property,
	Phone,
	SocialMedia,
	Financial,
	Business,
}

impl EntityKind {
	/// Prefix used in node ids.
	pub fn prefix(self) -> &'static str {
		match self {
			EntityKind::Cpf => "cpf",
			EntityKind::Cnpj => "cnpj",
			EntityKind::Vehicle => "vehicle",
			EntityKind::Property => "property",
			EntityKind::Phone => "phone",
			EntityKind::SocialMedia => "socialMedia",
			EntityKind::Financial => "financial",
			EntityKind::Business => "business",
		}
	}

	/// Text drawn on edges pointing at this kind.
	pub fn relation_label(self) -> &'static str {
		match self {
			EntityKind::Cpf => "CPF",
			EntityKind::Cnpj => "CNPJ",
			EntityKind::Vehicle => "Vehicle",
			EntityKind::Property => "Property",
			EntityKind::Phone => "Phone",
			EntityKind::SocialMedia => "Social Media",
			EntityKind::Financial => "Financial",
			EntityKind::Business => "Business",
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			EntityKind::Cpf => "#3b82f6",
			EntityKind::Cnpj => "#22c55e",
			EntityKind::Vehicle => "#a855f7",
			EntityKind::Property => "#f97316",
			EntityKind::Phone => "#ec4899",
			EntityKind::SocialMedia => "#6366f1",
			EntityKind::Financial => "#eab308",
			EntityKind::Business => "#ef4444",
		}
	}

	/// Upper-case badge shown under a node.
	pub fn badge(self) -> String {
		self.prefix().to_uppercase()
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.prefix())
	}
}

/// Node ids carry the kind so records of different kinds never collide.
pub fn node_id(kind: EntityKind, record_id: u64) -> String {
	format!("{}-{}", kind.prefix(), record_id)
}

/// A point in canvas or screen space, depending on context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl std::ops::Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl std::ops::Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

/// Back-reference to the record a node was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
	pub kind: EntityKind,
	pub record_id: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: String,
	pub kind: EntityKind,
	pub display_name: String,
	pub identifier_value: String,
	pub photo_ref: Option<String>,
	pub position: Point,
	pub source: SourceRef,
}

impl Node {
	/// Geometric centre of a node drawn with the given diameter.
	pub fn center(&self, diameter: f64) -> Point {
		Point::new(
			self.position.x + diameter / 2.0,
			self.position.y + diameter / 2.0,
		)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	pub from: String,
	pub to: String,
	pub label: String,
	pub relation: EntityKind,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

impl GraphData {
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Edges whose endpoints both exist, paired with those endpoints.
	/// Anything else is stale and skipped.
	pub fn resolved_edges(&self) -> impl Iterator<Item = (&Edge, &Node, &Node)> {
		self.edges.iter().filter_map(|edge| {
			match (self.node(&edge.from), self.node(&edge.to)) {
				(Some(from), Some(to)) => Some((edge, from, to)),
				_ => {
					log::debug!("dropping stale edge {} -> {}", edge.from, edge.to);
					None
				}
			}
		})
	}

	pub fn count_of(&self, kind: EntityKind) -> usize {
		self.nodes.iter().filter(|n| n.kind == kind).count()
	}
}
