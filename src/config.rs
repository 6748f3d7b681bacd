use crate::binder::{log_cell_text, CellHandler};
use core::{fmt, str::FromStr};
use std::rc::Rc;

/// How the visible screen is taken out of view when navigating away from it.
///
/// Each variant corresponds to one of the demo pages; the choice is fixed per [`Navigator`](`crate::Navigator`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisposalStrategy {
	/// Detach the container, keep the node in memory keyed by id. Listeners are unbound first.
	DetachAndCache,
	/// `display: none`, unbinding the cell listeners before hiding.
	HideDropListeners,
	/// `display: none`, listeners stay attached to the hidden node.
	HideKeepListeners,
	/// Remove the container, which drops every listener attached to it, and keep the node in memory.
	RemoveAndCache,
	/// Remove the container and persist its markup in session storage.
	RemoveAndSerialize,
}

impl DisposalStrategy {
	pub const ALL: [Self; 5] = [
		Self::DetachAndCache,
		Self::HideDropListeners,
		Self::HideKeepListeners,
		Self::RemoveAndCache,
		Self::RemoveAndSerialize,
	];

	/// Whether disposing of a screen discards its cell listeners, so that reactivating it requires a rebind.
	#[must_use]
	pub fn drops_listeners(self) -> bool {
		!matches!(self, Self::HideKeepListeners)
	}

	/// Whether disposed screens stay in the document (hidden) rather than leaving it.
	#[must_use]
	pub fn keeps_in_document(self) -> bool {
		matches!(self, Self::HideDropListeners | Self::HideKeepListeners)
	}

	#[must_use]
	pub fn default_binding(self) -> BindingDiscipline {
		match self {
			Self::RemoveAndCache => BindingDiscipline::Delegated,
			_ => BindingDiscipline::Direct,
		}
	}

	/// Name of the demo page exercising this strategy.
	#[must_use]
	pub fn demo_name(self) -> &'static str {
		match self {
			Self::DetachAndCache => "detach-dom-drop-listeners",
			Self::HideDropListeners => "hide-dom-drop-listeners",
			Self::HideKeepListeners => "hide-dom-keep-listeners",
			Self::RemoveAndCache => "remove-dom-delegate-cache",
			Self::RemoveAndSerialize => "remove-dom-serialize",
		}
	}

	fn strategy_name(self) -> &'static str {
		match self {
			Self::DetachAndCache => "detach-and-cache",
			Self::HideDropListeners => "hide-and-remove-listeners",
			Self::HideKeepListeners => "hide-and-keep-listeners",
			Self::RemoveAndCache => "remove-and-cache",
			Self::RemoveAndSerialize => "remove-and-serialize",
		}
	}
}

impl fmt::Display for DisposalStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.strategy_name())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown disposal strategy {0:?}")]
pub struct UnknownStrategy(pub String);

impl FromStr for DisposalStrategy {
	type Err = UnknownStrategy;

	/// Accepts both the strategy names (`detach-and-cache`) and the demo page names (`detach-dom-drop-listeners`).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		Self::ALL
			.iter()
			.copied()
			.find(|strategy| strategy.strategy_name().eq_ignore_ascii_case(s) || strategy.demo_name().eq_ignore_ascii_case(s))
			.ok_or_else(|| UnknownStrategy(s.to_owned()))
	}
}

/// Event listener discipline for the cells of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingDiscipline {
	/// One listener per cell, void once the cell leaves the document.
	Direct,
	/// One listener on the screen container, matched against the cell selector on dispatch.
	Delegated,
}

#[derive(Clone)]
pub struct NavigatorConfig {
	pub strategy: DisposalStrategy,
	/// Overrides [`DisposalStrategy::default_binding`].
	pub binding: Option<BindingDiscipline>,
	pub container_selector: String,
	pub cell_selector: String,
	/// Element inside a screen whose text is the screen's display label.
	pub label_selector: String,
	pub link_selector: String,
	/// Prepended to screen ids to form session storage keys.
	pub storage_key_prefix: String,
	pub cell_handler: CellHandler,
}

impl NavigatorConfig {
	#[must_use]
	pub fn new(strategy: DisposalStrategy) -> Self {
		Self {
			strategy,
			binding: None,
			container_selector: ".container".to_owned(),
			cell_selector: "td".to_owned(),
			label_selector: ".name".to_owned(),
			link_selector: ".picker > li > a".to_owned(),
			storage_key_prefix: String::new(),
			cell_handler: Rc::new(log_cell_text),
		}
	}

	#[must_use]
	pub fn with_binding(mut self, binding: BindingDiscipline) -> Self {
		self.binding = Some(binding);
		self
	}

	#[must_use]
	pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
		self.container_selector = selector.into();
		self
	}

	#[must_use]
	pub fn with_cell_selector(mut self, selector: impl Into<String>) -> Self {
		self.cell_selector = selector.into();
		self
	}

	#[must_use]
	pub fn with_label_selector(mut self, selector: impl Into<String>) -> Self {
		self.label_selector = selector.into();
		self
	}

	#[must_use]
	pub fn with_link_selector(mut self, selector: impl Into<String>) -> Self {
		self.link_selector = selector.into();
		self
	}

	#[must_use]
	pub fn with_storage_key_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.storage_key_prefix = prefix.into();
		self
	}

	#[must_use]
	pub fn with_cell_handler(mut self, handler: CellHandler) -> Self {
		self.cell_handler = handler;
		self
	}

	#[must_use]
	pub fn binding(&self) -> BindingDiscipline {
		self.binding.unwrap_or_else(|| self.strategy.default_binding())
	}
}

impl Default for NavigatorConfig {
	fn default() -> Self {
		Self::new(DisposalStrategy::DetachAndCache)
	}
}

impl fmt::Debug for NavigatorConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NavigatorConfig")
			.field("strategy", &self.strategy)
			.field("binding", &self.binding())
			.field("container_selector", &self.container_selector)
			.field("cell_selector", &self.cell_selector)
			.field("label_selector", &self.label_selector)
			.field("link_selector", &self.link_selector)
			.field("storage_key_prefix", &self.storage_key_prefix)
			.finish_non_exhaustive()
	}
}
