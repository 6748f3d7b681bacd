use crate::{
	error::{describe, InstallError, NavigationError},
	navigator::Navigator,
	screen::NavTarget,
};
use js_sys::Function;
use std::{cell::RefCell, rc::Rc};
use tracing::{error, info, instrument, trace_span};
use wasm_bindgen::{closure::Closure, JsCast};

/// Click listeners on the navigation links, forwarding to a shared [`Navigator`].
///
/// Listeners are removed when the [`Picker`] is dropped.
#[derive(Debug)]
pub struct Picker {
	links: Vec<web_sys::Element>,
	listener: Closure<dyn Fn(web_sys::Event)>,
	navigator: Rc<RefCell<Navigator>>,
}

impl Picker {
	#[instrument(skip(document, navigator))]
	pub fn bind(document: &web_sys::Document, link_selector: &str, navigator: Rc<RefCell<Navigator>>) -> Result<Self, InstallError> {
		let nodes = document.query_selector_all(link_selector).map_err(|error| InstallError::Selector {
			selector: link_selector.to_owned(),
			message: describe(&error),
		})?;

		let listener = {
			let navigator = Rc::clone(&navigator);
			Closure::wrap(Box::new(move |event: web_sys::Event| {
				let span = trace_span!("navigation link listener", event = ?&event);
				let _enter = span.enter();
				event.prevent_default();

				let link = match event.current_target().and_then(|target| target.dyn_into::<web_sys::Element>().ok()) {
					Some(link) => link,
					None => return error!("Navigation listener invoked without an element as current target."),
				};
				let target = match NavTarget::from_link(&link) {
					Ok(target) => target,
					Err(error) => return error!("Ignoring navigation: {}", error),
				};
				let mut navigator = match navigator.try_borrow_mut() {
					Ok(navigator) => navigator,
					Err(_) => return error!("Ignoring navigation to {:?}: {}", target.id, NavigationError::Busy),
				};
				if let Err(error) = navigator.navigate(&target) {
					error!("Navigation to {:?} failed: {}", target.id, error)
				}
			}) as Box<dyn Fn(web_sys::Event)>)
		};

		let mut links = Vec::with_capacity(nodes.length() as usize);
		for link in (0..nodes.length()).filter_map(|i| nodes.get(i)).filter_map(|node| node.dyn_into::<web_sys::Element>().ok()) {
			match link.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref::<Function>()) {
				Ok(()) => links.push(link),
				Err(error) => error!("Failed to bind navigation link: {}", describe(&error)),
			}
		}
		info!("Bound {} navigation link(s).", links.len());

		Ok(Self { links, listener, navigator })
	}

	#[must_use]
	pub fn navigator(&self) -> &Rc<RefCell<Navigator>> {
		&self.navigator
	}

	#[must_use]
	pub fn links(&self) -> &[web_sys::Element] {
		&self.links
	}
}

impl Drop for Picker {
	fn drop(&mut self) {
		for link in &self.links {
			if let Err(error) = link.remove_event_listener_with_callback("click", self.listener.as_ref().unchecked_ref::<Function>()) {
				error!("Failed to unbind navigation link: {}", describe(&error))
			}
		}
	}
}
