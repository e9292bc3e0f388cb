use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::config::BoardConfig;
use super::state::ViewState;
use super::types::{EntityKind, Node, Point};

const NAME_CHARS: usize = 15;
const DRAG_SCALE: f64 = 1.05;

/// Portraits keyed by photo reference, loaded lazily by the browser.
#[derive(Default)]
pub struct PortraitCache {
	images: HashMap<String, HtmlImageElement>,
}

impl PortraitCache {
	fn get(&mut self, src: &str) -> Option<&HtmlImageElement> {
		if !self.images.contains_key(src) {
			match HtmlImageElement::new() {
				Ok(img) => {
					img.set_src(src);
					self.images.insert(src.to_string(), img);
				}
				Err(err) => {
					log::warn!("cannot create portrait image: {err:?}");
					return None;
				}
			}
		}
		self.images.get(src).filter(|img| img.complete() && img.natural_width() > 0)
	}

	/// Whether any portrait is still in flight and needs another frame.
	pub fn loading(&self) -> bool {
		self.images.values().any(|img| !img.complete())
	}
}

/// Name as drawn under a node.
pub fn short_label(name: &str) -> String {
	if name.chars().count() > NAME_CHARS {
		let head: String = name.chars().take(NAME_CHARS).collect();
		format!("{head}...")
	} else {
		name.to_string()
	}
}

/// Where a node's circle is drawn: centred on its anchor, with the radius
/// grown by `scale`. Edges meet this centre at any scale.
pub fn node_circle(node: &Node, diameter: f64, scale: f64) -> (Point, f64) {
	(node.center(diameter), diameter * scale / 2.0)
}

pub fn render(
	view: &ViewState,
	config: &BoardConfig,
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	portraits: &mut PortraitCache,
) {
	let zoom = view.zoom;
	let (w, h) = (
		(view.extent.x * zoom).ceil() as u32,
		(view.extent.y * zoom).ceil() as u32,
	);
	if canvas.width() != w || canvas.height() != h {
		canvas.set_width(w);
		canvas.set_height(h);
	}

	ctx.set_fill_style_str("#f9fafb");
	ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
	ctx.save();
	let _ = ctx.scale(zoom, zoom);
	draw_edges(view, config.node_diameter, ctx);
	draw_nodes(view, config.node_diameter, ctx, portraits);
	ctx.restore();
}

fn draw_edges(view: &ViewState, diameter: f64, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("#374151");
	ctx.set_line_width(2.0);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(5.0),
		&JsValue::from_f64(5.0),
	));
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("center");

	for (edge, from, to) in view.graph.resolved_edges() {
		let (a, b) = (from.center(diameter), to.center(diameter));
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();

		ctx.set_fill_style_str("#4b5563");
		let _ = ctx.fill_text(&edge.label, (a.x + b.x) / 2.0, (a.y + b.y) / 2.0 - 5.0);
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(
	view: &ViewState,
	diameter: f64,
	ctx: &CanvasRenderingContext2d,
	portraits: &mut PortraitCache,
) {
	let dragged = view.dragged_node_id.as_deref();
	for node in view.draw_order() {
		let scale = if Some(node.id.as_str()) == dragged {
			DRAG_SCALE
		} else {
			1.0
		};
		draw_node(node, node_circle(node, diameter, scale), ctx, portraits);
	}
}

fn draw_node(
	node: &Node,
	(c, radius): (Point, f64),
	ctx: &CanvasRenderingContext2d,
	portraits: &mut PortraitCache,
) {
	ctx.begin_path();
	let _ = ctx.arc(c.x, c.y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str("#e5e7eb");
	ctx.fill();

	let portrait = node.photo_ref.as_deref().and_then(|src| portraits.get(src));
	match portrait {
		Some(img) => {
			ctx.save();
			ctx.begin_path();
			let _ = ctx.arc(c.x, c.y, radius, 0.0, 2.0 * PI);
			ctx.clip();
			let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
				img,
				c.x - radius,
				c.y - radius,
				radius * 2.0,
				radius * 2.0,
			);
			ctx.restore();
		}
		None => {
			ctx.set_fill_style_str("#6b7280");
			ctx.set_font(&format!("bold {}px sans-serif", radius * 0.6));
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(&initial(node), c.x, c.y);
			ctx.set_text_baseline("alphabetic");
		}
	}

	ctx.begin_path();
	let _ = ctx.arc(c.x, c.y, radius, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(node.kind.color());
	ctx.set_line_width(3.0);
	ctx.stroke();

	let top = c.y + radius + 16.0;
	ctx.set_text_align("center");
	ctx.set_fill_style_str("#111827");
	ctx.set_font("bold 12px sans-serif");
	let _ = ctx.fill_text(&short_label(&node.display_name), c.x, top);
	ctx.set_fill_style_str("#4b5563");
	ctx.set_font("12px sans-serif");
	let _ = ctx.fill_text(&node.identifier_value, c.x, top + 15.0);
	ctx.set_fill_style_str(node.kind.color());
	ctx.set_font("bold 11px sans-serif");
	let _ = ctx.fill_text(&node.kind.badge(), c.x, top + 30.0);
}

fn initial(node: &Node) -> String {
	match node.kind {
		EntityKind::Cpf => node
			.display_name
			.chars()
			.next()
			.map(|c| c.to_uppercase().collect())
			.unwrap_or_else(|| "?".into()),
		kind => kind.relation_label().chars().take(1).collect(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn long_names_are_shortened() {
		assert_eq!(short_label("Jane Doe"), "Jane Doe");
		assert_eq!(short_label("Maria Aparecida da Silva"), "Maria Aparecida...");
	}

	#[test]
	fn dragged_node_grows_around_its_edge_anchor() {
		let node = Node {
			id: "cpf-1".into(),
			kind: EntityKind::Cpf,
			display_name: "Jane Doe".into(),
			identifier_value: "111.111.111-11".into(),
			photo_ref: None,
			position: Point::new(100.0, 100.0),
			source: crate::components::quadro::types::SourceRef {
				kind: EntityKind::Cpf,
				record_id: 1,
			},
		};
		let (rest_center, rest_radius) = node_circle(&node, 100.0, 1.0);
		let (drag_center, drag_radius) = node_circle(&node, 100.0, DRAG_SCALE);
		assert_eq!(rest_center, node.center(100.0));
		assert_eq!(drag_center, rest_center);
		assert_eq!(rest_radius, 50.0);
		assert!(drag_radius > rest_radius);
	}
}
