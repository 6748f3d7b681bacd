#![allow(dead_code)]

use screen_swap_dom::{CellHandler, DisposalStrategy, NavigatorConfig};
use std::{cell::RefCell, rc::Rc, sync::Once};
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlElement, Window};

pub const MARKUP: &str = r##"
<ul class="picker">
	<li><a href="#home">Home</a></li>
	<li><a href="#settings">Settings</a></li>
	<li><a href="#profile">Profile</a></li>
	<li><a href="nowhere">Broken</a></li>
</ul>
<div class="container" id="home">
	<h1 class="name">Home</h1>
	<table>
		<tr><td>1</td><td>2</td></tr>
		<tr><td>3</td><td>4</td></tr>
	</table>
</div>
"##;

static LOG_INIT: Once = Once::new();

/// Resets the document body to [`MARKUP`] and clears session storage.
pub fn page() -> (Window, Document) {
	LOG_INIT.call_once(tracing_wasm::set_as_global_default);

	let window = window().unwrap();
	let document = window.document().unwrap();
	document.body().unwrap().set_inner_html(MARKUP);
	window.session_storage().unwrap().unwrap().clear().unwrap();
	(window, document)
}

/// Records the text of every clicked cell.
#[derive(Clone, Default)]
pub struct ClickLog(Rc<RefCell<Vec<String>>>);

impl ClickLog {
	pub fn handler(&self) -> CellHandler {
		let log = Rc::clone(&self.0);
		Rc::new(move |cell: &web_sys::Element| log.borrow_mut().push(cell.text_content().unwrap_or_default()))
	}

	pub fn take(&self) -> Vec<String> {
		self.0.borrow_mut().drain(..).collect()
	}
}

pub fn config(strategy: DisposalStrategy, log: &ClickLog) -> NavigatorConfig {
	NavigatorConfig::new(strategy).with_cell_handler(log.handler())
}

/// Cells of the screen with `id` that is currently part of the document.
pub fn cells(document: &Document, id: &str) -> Vec<HtmlElement> {
	let cells = document.query_selector_all(&format!("#{} td", id)).unwrap();
	(0..cells.length()).map(|i| cells.get(i).unwrap().dyn_into().unwrap()).collect()
}

/// Ids of all screens in the document that are not hidden.
pub fn displayed(document: &Document) -> Vec<String> {
	let containers = document.query_selector_all(".container").unwrap();
	(0..containers.length())
		.map(|i| containers.get(i).unwrap().dyn_into::<HtmlElement>().unwrap())
		.filter(|container| container.style().get_property_value("display").unwrap() != "none")
		.map(|container| container.id())
		.collect()
}

/// Ids of all screens in the document, hidden or not.
pub fn in_document(document: &Document) -> Vec<String> {
	let containers = document.query_selector_all(".container").unwrap();
	(0..containers.length()).map(|i| containers.get(i).unwrap().dyn_into::<HtmlElement>().unwrap().id()).collect()
}

/// Clicks each cell of the visible screen `id` once and checks that each click was logged exactly once.
pub fn assert_clicks_logged_once(document: &Document, id: &str, log: &ClickLog) {
	let cells = cells(document, id);
	assert!(!cells.is_empty(), "screen {:?} has no cells in the document", id);
	for cell in &cells {
		cell.click();
		assert_eq!(log.take(), [cell.text_content().unwrap()], "click on a cell of {:?}", id);
	}
}
