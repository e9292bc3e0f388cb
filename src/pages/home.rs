use leptos::prelude::*;

use crate::components::quadro::{QuadroBoard, RecordStore};

const SAMPLE_RECORDS: &str = include_str!("../../assets/sample_records.json");

/// Sample snapshot bundled with the app. Falls back to an empty store.
fn sample_records() -> RecordStore {
	RecordStore::from_json(SAMPLE_RECORDS).unwrap_or_else(|err| {
		log::error!("{err}");
		RecordStore::default()
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let records = RwSignal::new(sample_records());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="board-page">
				<h1>"Relationship Board"</h1>
				<p class="subtitle">"Search a person, then drag nodes to rearrange. Double-click a node to edit its record."</p>
				<QuadroBoard records=records />
			</div>
		</ErrorBoundary>
	}
}
