use crate::{
	config::{DisposalStrategy, NavigatorConfig},
	error::{describe, StoreError},
	screen::Screen,
};
use core::fmt::Debug;
use hashbrown::{HashMap, HashSet};
use tracing::{error, instrument, trace};
use wasm_bindgen::JsCast;

/// Holds screens that were navigated away from, keyed by screen id.
///
/// Entries are never evicted. Disposing of a screen id again replaces its entry.
pub trait ScreenStore: Debug {
	/// Takes `screen` out of view. On error, `screen` is left as it was.
	fn dispose(&mut self, screen: &Screen) -> Result<(), StoreError>;

	/// Brings back the screen stored under `id`, displayed and part of the document (appended to `mount` if necessary).
	fn restore(&mut self, id: &str, mount: &web_sys::Element) -> Result<Option<Screen>, StoreError>;

	/// Number of screens disposed of into this store.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn contains(&self, id: &str) -> bool;
}

pub(crate) fn store_for(config: &NavigatorConfig, window: &web_sys::Window, document: &web_sys::Document) -> Result<Box<dyn ScreenStore>, StoreError> {
	Ok(match config.strategy {
		DisposalStrategy::DetachAndCache | DisposalStrategy::RemoveAndCache => Box::new(NodeCache::default()),
		DisposalStrategy::HideDropListeners | DisposalStrategy::HideKeepListeners => Box::new(HiddenScreens::new(document.clone(), &config.container_selector)),
		DisposalStrategy::RemoveAndSerialize => Box::new(SessionStore::new(window, document.clone(), &config.storage_key_prefix)?),
	})
}

/// Takes screens out of the document and keeps their nodes in memory.
/// A restored screen is the identical node.
#[derive(Debug, Default)]
pub struct NodeCache {
	nodes: HashMap<String, Screen>,
}

impl ScreenStore for NodeCache {
	#[instrument(skip(self, screen), fields(screen = screen.id()))]
	fn dispose(&mut self, screen: &Screen) -> Result<(), StoreError> {
		screen.element().remove();
		self.nodes.insert(screen.id().to_owned(), screen.clone());
		trace!("Cached detached node.");
		Ok(())
	}

	#[instrument(skip(self, mount))]
	fn restore(&mut self, id: &str, mount: &web_sys::Element) -> Result<Option<Screen>, StoreError> {
		let screen = match self.nodes.get(id) {
			Some(screen) => screen.clone(),
			None => return Ok(None),
		};
		mount.append_child(screen.element()).map_err(|error| StoreError::Dom(describe(&error)))?;
		screen.show().map_err(StoreError::Dom)?;
		trace!("Reinserted cached node.");
		Ok(Some(screen))
	}

	fn len(&self) -> usize {
		self.nodes.len()
	}

	fn contains(&self, id: &str) -> bool {
		self.nodes.contains_key(id)
	}
}

/// Hides screens in place with `display: none`.
///
/// Screens this store did not hide itself are still found in the document,
/// as long as they match the container selector.
#[derive(Debug)]
pub struct HiddenScreens {
	document: web_sys::Document,
	container_selector: String,
	hidden: HashMap<String, Screen>,
}

impl HiddenScreens {
	#[must_use]
	pub fn new(document: web_sys::Document, container_selector: &str) -> Self {
		Self {
			document,
			container_selector: container_selector.to_owned(),
			hidden: HashMap::new(),
		}
	}

	fn find_in_document(&self, id: &str) -> Option<Screen> {
		let element = self.document.get_element_by_id(id)?;
		match element.matches(&self.container_selector) {
			Ok(true) => (),
			Ok(false) => {
				trace!("#{} is not a screen container.", id);
				return None;
			}
			Err(error) => {
				error!("Invalid container selector {:?}: {}", self.container_selector, describe(&error));
				return None;
			}
		}
		Screen::from_element(element.dyn_into::<web_sys::HtmlElement>().ok()?)
	}
}

impl ScreenStore for HiddenScreens {
	#[instrument(skip(self, screen), fields(screen = screen.id()))]
	fn dispose(&mut self, screen: &Screen) -> Result<(), StoreError> {
		screen.hide().map_err(StoreError::Dom)?;
		self.hidden.insert(screen.id().to_owned(), screen.clone());
		Ok(())
	}

	#[instrument(skip(self, _mount))]
	fn restore(&mut self, id: &str, _mount: &web_sys::Element) -> Result<Option<Screen>, StoreError> {
		let screen = match self.hidden.get(id).cloned().or_else(|| self.find_in_document(id)) {
			Some(screen) => screen,
			None => return Ok(None),
		};
		screen.show().map_err(StoreError::Dom)?;
		Ok(Some(screen))
	}

	fn len(&self) -> usize {
		self.hidden.len()
	}

	fn contains(&self, id: &str) -> bool {
		self.hidden.contains_key(id) || self.find_in_document(id).is_some()
	}
}

/// Serializes screens into [***sessionStorage***](https://developer.mozilla.org/en-US/docs/Web/API/Window/sessionStorage)
/// and removes them from the document.
///
/// Restoring parses the stored markup into a new, structurally equivalent node.
/// Markup left in session storage by an earlier page load of the same session is restored as well.
#[derive(Debug)]
pub struct SessionStore {
	storage: web_sys::Storage,
	document: web_sys::Document,
	key_prefix: String,
	written: HashSet<String>,
}

impl SessionStore {
	pub fn new(window: &web_sys::Window, document: web_sys::Document, key_prefix: &str) -> Result<Self, StoreError> {
		let storage = window
			.session_storage()
			.map_err(|error| StoreError::Unavailable(describe(&error)))?
			.ok_or_else(|| StoreError::Unavailable("no sessionStorage on this window".to_owned()))?;
		Ok(Self {
			storage,
			document,
			key_prefix: key_prefix.to_owned(),
			written: HashSet::new(),
		})
	}

	#[must_use]
	pub fn key(&self, id: &str) -> String {
		format!("{}{}", self.key_prefix, id)
	}

	fn parse(&self, key: &str, markup: &str) -> Result<web_sys::HtmlElement, StoreError> {
		let template = self
			.document
			.create_element("template")
			.map_err(|error| StoreError::Dom(describe(&error)))?
			.dyn_into::<web_sys::HtmlTemplateElement>()
			.map_err(|element| StoreError::Dom(format!("<template> created as {:?}", element)))?;
		template.set_inner_html(markup);
		template
			.content()
			.first_element_child()
			.and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
			.ok_or_else(|| StoreError::Unparsable { key: key.to_owned() })
	}
}

impl ScreenStore for SessionStore {
	#[instrument(skip(self, screen), fields(screen = screen.id()))]
	fn dispose(&mut self, screen: &Screen) -> Result<(), StoreError> {
		let key = self.key(screen.id());
		let markup = screen.element().outer_html();
		self.storage.set_item(&key, &markup).map_err(|error| StoreError::Write {
			key: key.clone(),
			message: describe(&error),
		})?;
		screen.element().remove();
		trace!("Serialized {} byte(s) of markup.", markup.len());
		self.written.insert(key);
		Ok(())
	}

	#[instrument(skip(self, mount))]
	fn restore(&mut self, id: &str, mount: &web_sys::Element) -> Result<Option<Screen>, StoreError> {
		let key = self.key(id);
		let markup = match self.storage.get_item(&key).map_err(|error| StoreError::Read {
			key: key.clone(),
			message: describe(&error),
		})? {
			Some(markup) => markup,
			None => return Ok(None),
		};

		let element = self.parse(&key, &markup)?;
		element.set_id(id);
		mount.append_child(&element).map_err(|error| StoreError::Dom(describe(&error)))?;
		let screen = Screen::from_element(element).ok_or(StoreError::Unparsable { key })?;
		screen.show().map_err(StoreError::Dom)?;
		trace!("Deserialized stored markup.");
		Ok(Some(screen))
	}

	fn len(&self) -> usize {
		self.written.len()
	}

	fn contains(&self, id: &str) -> bool {
		matches!(self.storage.get_item(&self.key(id)), Ok(Some(_)))
	}
}
