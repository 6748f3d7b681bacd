//! Cell click listeners, bound either per cell ([`DirectBinder`]) or once per screen container ([`DelegatedBinder`]).
//!
//! Both binders share a single [`Closure`] across all targets they bind, so the same [***Function***](https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Function)
//! identity is used for `addEventListener` and `removeEventListener`.
//!
//! Binders remember what they bound per screen id. Attaching to a screen id that is already bound first detaches
//! the previous binding, so each cell of the visible screen reports a click exactly once.

use crate::{config::BindingDiscipline, error::describe, screen::Screen};
use core::fmt::Debug;
use hashbrown::HashMap;
use js_sys::Function;
use std::rc::Rc;
use tracing::{error, info, instrument, trace, trace_span};
use wasm_bindgen::{closure::Closure, JsCast};

/// Called with the clicked cell element.
pub type CellHandler = Rc<dyn Fn(&web_sys::Element)>;

/// The default [`CellHandler`]: logs the cell's text content.
pub fn log_cell_text(cell: &web_sys::Element) {
	info!(text = %cell.text_content().unwrap_or_default(), "Cell clicked");
}

pub trait AttachListeners {
	fn attach(&mut self, screen: &Screen);
}

pub trait DetachListeners {
	fn detach(&mut self, screen: &Screen);
}

pub trait ListenerBinder: AttachListeners + DetachListeners + Debug {
	fn discipline(&self) -> BindingDiscipline;

	/// Number of event targets (cells or containers) currently carrying the listener.
	fn bound_target_count(&self) -> usize;

	fn is_bound(&self, screen_id: &str) -> bool;
}

/// Creates the binder for `discipline`.
#[must_use]
pub fn binder_for(discipline: BindingDiscipline, cell_selector: &str, handler: CellHandler) -> Box<dyn ListenerBinder> {
	match discipline {
		BindingDiscipline::Direct => Box::new(DirectBinder::new(cell_selector, handler)),
		BindingDiscipline::Delegated => Box::new(DelegatedBinder::new(cell_selector, handler)),
	}
}

#[derive(Debug)]
struct SharedListener(Closure<dyn Fn(web_sys::Event)>);

impl SharedListener {
	fn new(listener: impl 'static + Fn(web_sys::Event)) -> Self {
		Self(Closure::wrap(Box::new(listener) as Box<dyn Fn(web_sys::Event)>))
	}

	fn function(&self) -> &Function {
		self.0.as_ref().unchecked_ref::<Function>()
	}

	fn add(&self, target: &web_sys::EventTarget) -> bool {
		match target.add_event_listener_with_callback("click", self.function()) {
			Ok(()) => true,
			Err(error) => {
				error!("Failed to add click listener: {}", describe(&error));
				false
			}
		}
	}

	fn remove(&self, target: &web_sys::EventTarget) {
		if let Err(error) = target.remove_event_listener_with_callback("click", self.function()) {
			error!("Failed to remove click listener: {}", describe(&error))
		}
	}
}

/// Binds the listener to each cell present at bind time.
#[derive(Debug)]
pub struct DirectBinder {
	cell_selector: String,
	listener: SharedListener,
	bound: HashMap<String, Vec<web_sys::Element>>,
}

impl DirectBinder {
	#[must_use]
	pub fn new(cell_selector: &str, handler: CellHandler) -> Self {
		Self {
			cell_selector: cell_selector.to_owned(),
			listener: SharedListener::new(move |event: web_sys::Event| {
				let span = trace_span!("direct cell listener", event = ?&event);
				let _enter = span.enter();
				match event.current_target().and_then(|target| target.dyn_into::<web_sys::Element>().ok()) {
					Some(cell) => handler(&cell),
					None => error!("Cell listener invoked without an element as current target."),
				}
			}),
			bound: HashMap::new(),
		}
	}
}

impl AttachListeners for DirectBinder {
	#[instrument(skip(self, screen), fields(screen = screen.id()))]
	fn attach(&mut self, screen: &Screen) {
		self.detach(screen);

		let cells = match screen.element().query_selector_all(&self.cell_selector) {
			Ok(cells) => cells,
			Err(error) => return error!("Invalid cell selector {:?}: {}", self.cell_selector, describe(&error)),
		};

		let mut bound = Vec::with_capacity(cells.length() as usize);
		for i in 0..cells.length() {
			if let Some(cell) = cells.get(i).and_then(|node| node.dyn_into::<web_sys::Element>().ok()) {
				if self.listener.add(&cell) {
					bound.push(cell);
				}
			}
		}
		trace!("Bound {} cell(s).", bound.len());
		self.bound.insert(screen.id().to_owned(), bound);
	}
}

impl DetachListeners for DirectBinder {
	#[instrument(skip(self, screen), fields(screen = screen.id()))]
	fn detach(&mut self, screen: &Screen) {
		if let Some(cells) = self.bound.remove(screen.id()) {
			for cell in &cells {
				self.listener.remove(cell);
			}
			trace!("Unbound {} cell(s).", cells.len());
		}
	}
}

impl ListenerBinder for DirectBinder {
	fn discipline(&self) -> BindingDiscipline {
		BindingDiscipline::Direct
	}

	fn bound_target_count(&self) -> usize {
		self.bound.values().map(Vec::len).sum()
	}

	fn is_bound(&self, screen_id: &str) -> bool {
		self.bound.contains_key(screen_id)
	}
}

impl Drop for DirectBinder {
	fn drop(&mut self) {
		for cell in self.bound.values().flatten() {
			self.listener.remove(cell);
		}
	}
}

/// Binds the listener once to each screen container and matches cells on dispatch,
/// so cells added to a bound container later are covered as well.
#[derive(Debug)]
pub struct DelegatedBinder {
	listener: SharedListener,
	bound: HashMap<String, web_sys::HtmlElement>,
}

impl DelegatedBinder {
	#[must_use]
	pub fn new(cell_selector: &str, handler: CellHandler) -> Self {
		let cell_selector = cell_selector.to_owned();
		Self {
			listener: SharedListener::new(move |event: web_sys::Event| {
				let span = trace_span!("delegated cell listener", event = ?&event);
				let _enter = span.enter();

				let container = event.current_target().and_then(|target| target.dyn_into::<web_sys::Element>().ok());
				let target = event.target().and_then(|target| target.dyn_into::<web_sys::Element>().ok());
				let (container, target) = match (container, target) {
					(Some(container), Some(target)) => (container, target),
					_ => return trace!("Ignoring click without element target."),
				};

				match target.closest(&cell_selector) {
					Ok(Some(cell)) if container.contains(Some(&*cell)) => handler(&cell),
					Ok(_) => trace!("Ignoring click outside of cells."),
					Err(error) => error!("Invalid cell selector {:?}: {}", cell_selector, describe(&error)),
				}
			}),
			bound: HashMap::new(),
		}
	}
}

impl AttachListeners for DelegatedBinder {
	#[instrument(skip(self, screen), fields(screen = screen.id()))]
	fn attach(&mut self, screen: &Screen) {
		self.detach(screen);
		if self.listener.add(screen.element()) {
			trace!("Bound container.");
			self.bound.insert(screen.id().to_owned(), screen.element().clone());
		}
	}
}

impl DetachListeners for DelegatedBinder {
	#[instrument(skip(self, screen), fields(screen = screen.id()))]
	fn detach(&mut self, screen: &Screen) {
		if let Some(container) = self.bound.remove(screen.id()) {
			self.listener.remove(&container);
			trace!("Unbound container.");
		}
	}
}

impl ListenerBinder for DelegatedBinder {
	fn discipline(&self) -> BindingDiscipline {
		BindingDiscipline::Delegated
	}

	fn bound_target_count(&self) -> usize {
		self.bound.len()
	}

	fn is_bound(&self, screen_id: &str) -> bool {
		self.bound.contains_key(screen_id)
	}
}

impl Drop for DelegatedBinder {
	fn drop(&mut self) {
		for container in self.bound.values() {
			self.listener.remove(container);
		}
	}
}
