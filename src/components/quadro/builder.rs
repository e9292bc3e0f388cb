//! Derives the ego network shown on the board from a record snapshot.
//!
//! Filtered CPF records become anchor nodes. Each linked record whose person
//! field equals the identifier of an anchor becomes one neighbour node with one
//! edge from that anchor. Links between neighbours are never followed.

use std::collections::{HashMap, HashSet};

use super::layout;
use super::records::{LinkedRecord, RecordStore};
use super::search::SearchFilter;
use super::types::{Edge, EntityKind, GraphData, Node, Point, SourceRef, node_id};

/// Rebuilds the whole graph. Returns an empty graph until a search is active.
pub fn build(store: &RecordStore, filter: &SearchFilter, active: bool) -> GraphData {
	if !active {
		return GraphData::default();
	}

	let mut graph = GraphData::default();
	let mut seen: HashSet<String> = HashSet::new();
	// identifier -> anchor node id; first anchor in record order wins
	let mut anchors: HashMap<&str, String> = HashMap::new();

	for record in filter.apply(&store.cpfs) {
		let id = node_id(EntityKind::Cpf, record.id);
		if !seen.insert(id.clone()) {
			continue;
		}
		anchors
			.entry(record.cpf.as_str())
			.or_insert_with(|| id.clone());
		graph.nodes.push(Node {
			id,
			kind: EntityKind::Cpf,
			display_name: record.nome.clone(),
			identifier_value: record.cpf.clone(),
			photo_ref: record.foto.clone().filter(|p| !p.is_empty()),
			position: Point::default(),
			source: SourceRef {
				kind: EntityKind::Cpf,
				record_id: record.id,
			},
		});
	}

	for record in store.linked_records() {
		let Some(anchor) = record.link_cpf().and_then(|cpf| anchors.get(cpf)) else {
			continue;
		};
		let id = node_id(record.kind(), record.id());
		if !seen.insert(id.clone()) {
			continue;
		}
		graph.edges.push(link_edge(anchor, &id, record.kind()));
		graph.nodes.push(linked_node(id, &record));
	}

	layout::place(&mut graph.nodes);
	log::debug!(
		"built board graph: {} nodes, {} edges",
		graph.nodes.len(),
		graph.edges.len()
	);
	graph
}

fn linked_node(id: String, record: &LinkedRecord<'_>) -> Node {
	let kind = record.kind();
	Node {
		id,
		kind,
		display_name: record.display_name(),
		identifier_value: record.identifier_value(),
		photo_ref: None,
		position: Point::default(),
		source: SourceRef {
			kind,
			record_id: record.id(),
		},
	}
}

fn link_edge(from: &str, to: &str, kind: EntityKind) -> Edge {
	Edge {
		from: from.to_string(),
		to: to.to_string(),
		label: kind.relation_label().to_string(),
		relation: kind,
	}
}
