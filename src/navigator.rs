use crate::{
	binder::{binder_for, ListenerBinder},
	config::NavigatorConfig,
	error::{describe, InstallError, NavigationError},
	registry::ScreenRegistry,
	screen::{is_rendered, NavTarget, Screen},
	store::{store_for, ScreenStore},
};
use tracing::{error, info, instrument, trace, warn};
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
	/// The target was already the visible screen.
	Unchanged,
	/// The target was brought back from the screen store.
	Restored,
	/// The target was cloned from the template.
	Synthesized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
	pub id: String,
	pub origin: Origin,
	/// Whether cell listeners were (re)attached to the target.
	pub rebound: bool,
}

/// Swaps the visible screen according to the configured [`DisposalStrategy`](`crate::DisposalStrategy`).
///
/// Owns the screen store and the listener binder. Both live exactly as long as the navigator does;
/// dropping it unbinds all cell listeners it attached.
#[derive(Debug)]
pub struct Navigator {
	config: NavigatorConfig,
	mount: web_sys::Element,
	registry: ScreenRegistry,
	store: Box<dyn ScreenStore>,
	binder: Box<dyn ListenerBinder>,
}

impl Navigator {
	/// Installs on the global window's document.
	pub fn new(config: NavigatorConfig) -> Result<Self, InstallError> {
		let window = web_sys::window().ok_or(InstallError::NoDocument)?;
		let document = window.document().ok_or(InstallError::NoDocument)?;
		Self::for_document(&window, &document, config)
	}

	/// Picks the first rendered element matching the container selector as the initial screen,
	/// snapshots it as template and binds its cells.
	///
	/// Containers hidden by a stylesheet count as hidden, see [`is_rendered`].
	pub fn for_document(window: &web_sys::Window, document: &web_sys::Document, config: NavigatorConfig) -> Result<Self, InstallError> {
		let store = store_for(&config, window, document)?;
		Self::with_store(document, config, store)
	}

	/// Like [`Navigator::for_document`], but disposes of screens into `store` instead of the strategy's default store.
	#[instrument(skip(document, store))]
	pub fn with_store(document: &web_sys::Document, config: NavigatorConfig, store: Box<dyn ScreenStore>) -> Result<Self, InstallError> {
		let mount: web_sys::Element = document.body().ok_or(InstallError::NoMount)?.into();

		let containers = document.query_selector_all(&config.container_selector).map_err(|error| InstallError::Selector {
			selector: config.container_selector.clone(),
			message: describe(&error),
		})?;
		let initial = (0..containers.length())
			.filter_map(|i| containers.get(i))
			.filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
			.find(is_rendered)
			.ok_or_else(|| InstallError::NoInitialScreen {
				selector: config.container_selector.clone(),
			})?;
		let initial = Screen::from_element(initial).ok_or(InstallError::AnonymousScreen)?;

		let template = initial
			.element()
			.clone_node_with_deep(true)
			.map_err(|error| InstallError::Template(describe(&error)))?
			.dyn_into::<web_sys::HtmlElement>()
			.map_err(|node| InstallError::Template(format!("clone is not an HTML element: {:?}", node)))?;

		let mut binder = binder_for(config.binding(), &config.cell_selector, config.cell_handler.clone());
		binder.attach(&initial);

		info!(screen = initial.id(), strategy = %config.strategy, binding = ?binder.discipline(), "Navigator installed.");
		Ok(Self {
			registry: ScreenRegistry::new(initial, template),
			config,
			mount,
			store,
			binder,
		})
	}

	/// Navigates to the screen a link points at.
	pub fn navigate_to_link(&mut self, link: &web_sys::Element) -> Result<Navigation, NavigationError> {
		let target = NavTarget::from_link(link)?;
		self.navigate(&target)
	}

	/// Disposes of the visible screen, then restores or synthesizes `target` and makes it visible.
	///
	/// # Errors
	///
	/// If the visible screen can't be disposed of, nothing changes.
	/// If the target can't be synthesized, the previous screen is brought back where possible.
	/// A target that fails to restore from the store is logged and synthesized from the template instead.
	#[instrument(skip(self, target), fields(target = %target.id, strategy = %self.config.strategy))]
	pub fn navigate(&mut self, target: &NavTarget) -> Result<Navigation, NavigationError> {
		let strategy = self.config.strategy;

		let previous = match self.registry.visible() {
			Some(current) if current.id() == target.id => {
				trace!("Target is already visible.");
				return Ok(Navigation {
					id: target.id.clone(),
					origin: Origin::Unchanged,
					rebound: false,
				});
			}
			Some(current) => {
				let current = current.clone();
				self.store.dispose(&current).map_err(|source| NavigationError::Dispose {
					id: current.id().to_owned(),
					source,
				})?;
				if strategy.drops_listeners() {
					self.binder.detach(&current);
				}
				self.registry.take_visible();
				Some(current)
			}
			None => {
				warn!("No visible screen to dispose of.");
				None
			}
		};

		let restored = match self.store.restore(&target.id, &self.mount) {
			Ok(restored) => restored,
			Err(error) => {
				error!("Could not restore screen {:?}, synthesizing it instead: {}", target.id, error);
				None
			}
		};

		let (screen, origin) = match restored {
			Some(screen) => (screen, Origin::Restored),
			None => match self.synthesize(target) {
				Ok(screen) => (screen, Origin::Synthesized),
				Err(message) => {
					if let Some(previous) = previous {
						self.roll_back(&previous);
					}
					return Err(NavigationError::Synthesize { id: target.id.clone(), message });
				}
			},
		};

		// Screens found already hidden in the document were never bound.
		let rebound = origin == Origin::Synthesized || strategy.drops_listeners() || !self.binder.is_bound(screen.id());
		if rebound {
			self.binder.attach(&screen);
		}
		self.registry.set_visible(screen);

		info!(?origin, rebound, "Navigated.");
		Ok(Navigation {
			id: target.id.clone(),
			origin,
			rebound,
		})
	}

	fn synthesize(&mut self, target: &NavTarget) -> Result<Screen, String> {
		let screen = Screen::synthesize(self.registry.template(), target, &self.config.label_selector)?;
		self.mount.append_child(screen.element()).map_err(|error| describe(&error))?;
		self.registry.count_synthesized();
		Ok(screen)
	}

	fn roll_back(&mut self, previous: &Screen) {
		match self.store.restore(previous.id(), &self.mount) {
			Ok(Some(screen)) => {
				if self.config.strategy.drops_listeners() || !self.binder.is_bound(screen.id()) {
					self.binder.attach(&screen);
				}
				warn!(screen = screen.id(), "Rolled back to previous screen.");
				self.registry.set_visible(screen);
			}
			Ok(None) => error!("Previous screen {:?} vanished from the store; no screen is visible.", previous.id()),
			Err(error) => error!("Could not roll back to previous screen {:?}; no screen is visible: {}", previous.id(), error),
		}
	}

	#[must_use]
	pub fn visible(&self) -> Option<&Screen> {
		self.registry.visible()
	}

	#[must_use]
	pub fn registry(&self) -> &ScreenRegistry {
		&self.registry
	}

	#[must_use]
	pub fn store(&self) -> &dyn ScreenStore {
		&*self.store
	}

	#[must_use]
	pub fn binder(&self) -> &dyn ListenerBinder {
		&*self.binder
	}

	#[must_use]
	pub fn config(&self) -> &NavigatorConfig {
		&self.config
	}
}
