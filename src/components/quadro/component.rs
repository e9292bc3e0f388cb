use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::BoardConfig;
use super::records::RecordStore;
use super::render::{self, PortraitCache};
use super::state::{BoardState, BoardStats};
use super::types::{Point, SourceRef};
use crate::error::BoardError;

type Shared<T> = Rc<RefCell<T>>;

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, BoardError> {
	canvas
		.get_context("2d")
		.map_err(|e| BoardError::NoContext(format!("{e:?}")))?
		.ok_or_else(|| BoardError::NoContext("getContext returned null".into()))?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| BoardError::NoContext("unexpected context type".into()))
}

fn canvas_element(canvas_ref: NodeRef<leptos::html::Canvas>) -> Result<HtmlCanvasElement, BoardError> {
	canvas_ref.get().map(Into::into).ok_or(BoardError::NoCanvas)
}

/// Pointer position and canvas top-left, both in screen pixels.
fn pointer(ev: &MouseEvent, canvas: &HtmlCanvasElement) -> (Point, Point) {
	let rect = canvas.get_bounding_client_rect();
	(
		Point::new(ev.client_x() as f64, ev.client_y() as f64),
		Point::new(rect.left(), rect.top()),
	)
}

fn start_render_loop(
	state: Shared<BoardState>,
	canvas: HtmlCanvasElement,
	animate: Shared<Option<Closure<dyn FnMut()>>>,
) -> Result<(), BoardError> {
	let window: Window = web_sys::window().ok_or(BoardError::NoWindow)?;
	let ctx = context_2d(&canvas)?;
	let mut portraits = PortraitCache::default();

	let animate_inner = animate.clone();
	*animate.borrow_mut() = Some(Closure::new(move || {
		{
			let mut s = state.borrow_mut();
			if s.dirty || portraits.loading() {
				let view = s.view_state();
				render::render(&view, &s.config, &canvas, &ctx, &mut portraits);
				s.dirty = false;
			}
		}
		if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));
	if let Some(ref cb) = *animate.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
	Ok(())
}

/// The relationship board: search bar, toolbar, zoomable canvas and a footer
/// with counts. Rebuilds whenever `records` changes after a search.
#[component]
pub fn QuadroBoard(
	#[prop(into)] records: Signal<RecordStore>,
	#[prop(optional)] config: Option<BoardConfig>,
	#[prop(default = 600.0)] height: f64,
	#[prop(optional)] on_edit: Option<Callback<SourceRef>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<BoardState> = Rc::new(RefCell::new(BoardState::new(
		config.unwrap_or_default(),
	)));
	let animate: Shared<Option<Closure<dyn FnMut()>>> = Rc::new(RefCell::new(None));
	let (term, set_term) = signal(String::new());
	let (stats, set_stats) = signal(BoardStats::default());

	let sync = move |s: &BoardState| set_stats.set(s.stats());

	let (state_init, animate_init) = (state.clone(), animate.clone());
	Effect::new(move |_| {
		let started = canvas_element(canvas_ref)
			.and_then(|canvas| start_render_loop(state_init.clone(), canvas, animate_init.clone()));
		if let Err(err) = started {
			log::error!("board canvas setup failed: {err}");
		}
	});

	let state_records = state.clone();
	Effect::new(move |_| {
		let mut s = state_records.borrow_mut();
		records.with(|store| s.records_changed(store));
		sync(&s);
	});

	let state_input = state.clone();
	let on_input = move |ev| {
		let value = event_target_value(&ev);
		set_term.set(value.clone());
		let mut s = state_input.borrow_mut();
		records.with_untracked(|store| s.set_term(store, &value));
		sync(&s);
	};

	let state_submit = state.clone();
	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let mut s = state_submit.borrow_mut();
		records.with_untracked(|store| s.submit_search(store));
		sync(&s);
	};

	let state_cpf = state.clone();
	let on_cpf_search = move |_| {
		let mut s = state_cpf.borrow_mut();
		records.with_untracked(|store| s.search_identifier(store));
		sync(&s);
	};

	let state_zi = state.clone();
	let on_zoom_in = move |_| {
		let mut s = state_zi.borrow_mut();
		s.zoom_in();
		sync(&s);
	};

	let state_zo = state.clone();
	let on_zoom_out = move |_| {
		let mut s = state_zo.borrow_mut();
		s.zoom_out();
		sync(&s);
	};

	let state_reset = state.clone();
	let on_reset = move |_| state_reset.borrow_mut().reset_layout();

	let state_export = state.clone();
	let on_export = move |_| {
		let notice = state_export.borrow().request_export();
		if let Some(win) = web_sys::window() {
			let _ = win.alert_with_message(&notice.0);
		}
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Ok(canvas) = canvas_element(canvas_ref) else {
			return;
		};
		let (screen, origin) = pointer(&ev, &canvas);
		if state_md.borrow_mut().pointer_down(screen, origin) {
			ev.prevent_default();
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Ok(canvas) = canvas_element(canvas_ref) else {
			return;
		};
		let (screen, origin) = pointer(&ev, &canvas);
		state_mm.borrow_mut().pointer_move(screen, origin);
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| state_mu.borrow_mut().pointer_up();

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| state_ml.borrow_mut().pointer_leave();

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Ok(canvas) = canvas_element(canvas_ref) else {
			return;
		};
		let (screen, origin) = pointer(&ev, &canvas);
		let s = state_dc.borrow();
		let at = s.viewport().screen_to_canvas(screen, origin);
		let Some(node_id) = s.node_at(at).map(|n| n.id.clone()) else {
			return;
		};
		if let (Some(source), Some(cb)) = (s.request_edit(&node_id), on_edit) {
			cb.run(source);
		}
	};

	view! {
		<div class="quadro-board">
			<form class="quadro-search" on:submit=on_submit>
				<input
					type="text"
					placeholder="Search by CPF or name..."
					prop:value=move || term.get()
					on:input=on_input
				/>
				<button type="submit">"Search"</button>
				<button type="button" on:click=on_cpf_search>"Search CPF"</button>
			</form>
			<div class="quadro-toolbar">
				<button on:click=on_zoom_in>"Zoom +"</button>
				<button on:click=on_zoom_out>"Zoom -"</button>
				<button on:click=on_reset>"Reset"</button>
				<button class="export" on:click=on_export>"Export PDF"</button>
			</div>
			<div
				class="quadro-viewport"
				style=format!("height: {height}px; overflow: auto; position: relative;")
			>
				<canvas
					node_ref=canvas_ref
					class="quadro-canvas"
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseleave
					on:dblclick=on_dblclick
					style="display: block; cursor: move;"
				/>
			</div>
			<div class="quadro-footer">
				<span>"Persons: " {move || stats.get().persons}</span>
				<span>"Links: " {move || stats.get().links}</span>
				<span>"Zoom: " {move || stats.get().zoom_percent} "%"</span>
			</div>
		</div>
	}
}
