use screen_swap_dom::{
	binder::{DelegatedBinder, DirectBinder},
	AttachListeners, BindingDiscipline, DetachListeners, DisposalStrategy, ListenerBinder, NavTarget, Navigator, Screen,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

mod web_page_;
use web_page_::{assert_clicks_logged_once, cells, config, page, ClickLog};

fn home(document: &Document) -> Screen {
	Screen::from_element(document.get_element_by_id("home").unwrap().dyn_into().unwrap()).unwrap()
}

fn add_cell(document: &Document, text: &str) -> HtmlElement {
	let row = document.query_selector("#home tr").unwrap().unwrap();
	let cell: HtmlElement = document.create_element("td").unwrap().dyn_into().unwrap();
	cell.set_text_content(Some(text));
	row.append_child(&cell).unwrap();
	cell
}

#[wasm_bindgen_test]
fn direct_binding_misses_cells_added_later() {
	let (_, document) = page();
	let log = ClickLog::default();
	let mut binder = DirectBinder::new("td", log.handler());
	binder.attach(&home(&document));
	assert_eq!(binder.bound_target_count(), 4);

	let bound_cells = cells(&document, "home");
	add_cell(&document, "late").click();
	assert!(log.take().is_empty());

	for cell in &bound_cells {
		cell.click();
	}
	assert_eq!(log.take(), ["1", "2", "3", "4"]);
}

#[wasm_bindgen_test]
fn delegated_binding_covers_cells_added_later() {
	let (_, document) = page();
	let log = ClickLog::default();
	let mut binder = DelegatedBinder::new("td", log.handler());
	binder.attach(&home(&document));
	assert_eq!(binder.bound_target_count(), 1);

	add_cell(&document, "late").click();
	assert_eq!(log.take(), ["late"]);
}

#[wasm_bindgen_test]
fn delegated_binding_ignores_clicks_outside_cells() {
	let (_, document) = page();
	let log = ClickLog::default();
	let mut binder = DelegatedBinder::new("td", log.handler());
	binder.attach(&home(&document));

	let label: HtmlElement = document.query_selector("#home .name").unwrap().unwrap().dyn_into().unwrap();
	label.click();
	assert!(log.take().is_empty());
}

#[wasm_bindgen_test]
fn attaching_twice_still_logs_once() {
	let (_, document) = page();
	for discipline in [BindingDiscipline::Direct, BindingDiscipline::Delegated] {
		let log = ClickLog::default();
		let mut binder = screen_swap_dom::binder::binder_for(discipline, "td", log.handler());
		let screen = home(&document);
		binder.attach(&screen);
		binder.attach(&screen);
		assert!(binder.is_bound("home"));
		assert_clicks_logged_once(&document, "home", &log);

		binder.detach(&screen);
		assert!(!binder.is_bound("home"));
		assert_eq!(binder.bound_target_count(), 0);
		for cell in cells(&document, "home") {
			cell.click();
		}
		assert!(log.take().is_empty(), "{:?}", discipline);
	}
}

#[wasm_bindgen_test]
fn dropping_a_binder_unbinds() {
	let (_, document) = page();
	let log = ClickLog::default();
	{
		let mut binder = DirectBinder::new("td", log.handler());
		binder.attach(&home(&document));
	}
	for cell in cells(&document, "home") {
		cell.click();
	}
	assert!(log.take().is_empty());
}

/// Clicks on cells of a screen that was navigated away from only register if the strategy keeps listeners.
#[wasm_bindgen_test]
fn left_screens_keep_listeners_only_when_hidden_with_listeners() {
	for strategy in DisposalStrategy::ALL {
		let (_, document) = page();
		let log = ClickLog::default();
		let mut navigator = Navigator::new(config(strategy, &log)).unwrap();
		let old_cells = cells(&document, "home");

		navigator.navigate(&NavTarget::new("settings", "Settings")).unwrap();
		for cell in &old_cells {
			cell.click();
		}
		let expected = if strategy.drops_listeners() { 0 } else { old_cells.len() };
		assert_eq!(log.take().len(), expected, "{}", strategy);
	}
}

#[wasm_bindgen_test]
fn clicks_log_once_across_many_navigations() {
	for strategy in DisposalStrategy::ALL {
		for binding in [BindingDiscipline::Direct, BindingDiscipline::Delegated] {
			let (_, document) = page();
			let log = ClickLog::default();
			let mut navigator = Navigator::new(config(strategy, &log).with_binding(binding)).unwrap();
			assert_eq!(navigator.binder().discipline(), binding);

			for round in 0..3 {
				for id in ["settings", "profile", "home"] {
					navigator.navigate(&NavTarget::new(id, id)).unwrap();
					assert_clicks_logged_once(&document, id, &log);
				}
				assert!(log.take().is_empty(), "{} {:?} round {}", strategy, binding, round);
			}
		}
	}
}
