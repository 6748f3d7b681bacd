//! Entry point for the demo pages, one per [`DisposalStrategy`].

use crate::{install, DisposalStrategy, NavigatorConfig, Picker};
use std::cell::RefCell;
use tracing::info;
use wasm_bindgen::{prelude::wasm_bindgen, JsValue};

thread_local! {
	static PICKER: RefCell<Option<Picker>> = RefCell::new(None);
}

/// Installs the navigator for the page named by `strategy`, e.g. `"remove-dom-serialize"`.
///
/// Calling this again replaces (and unbinds) the previous installation.
#[wasm_bindgen(js_name = startDemo)]
pub fn start_demo(strategy: &str) -> Result<(), JsValue> {
	console_error_panic_hook::set_once();
	// Already set on repeated calls.
	let _ = tracing_wasm::try_set_as_global_default();

	let strategy: DisposalStrategy = strategy.parse().map_err(|error: crate::config::UnknownStrategy| JsValue::from_str(&error.to_string()))?;
	let picker = install(NavigatorConfig::new(strategy)).map_err(|error| JsValue::from_str(&error.to_string()))?;
	info!(%strategy, "Demo started.");

	PICKER.with(|slot| {
		// Drops the previous picker outside of the borrow.
		let previous = slot.borrow_mut().replace(picker);
		drop(previous);
	});
	Ok(())
}
