use crate::error::{describe, NavigationError};
use tracing::{instrument, trace, warn};
use wasm_bindgen::JsCast;

/// A named, visually exclusive view: a container element with a unique `id`.
///
/// Cloning a [`Screen`] clones the handle, not the DOM node.
#[derive(Debug, Clone)]
pub struct Screen {
	id: String,
	element: web_sys::HtmlElement,
}

impl Screen {
	/// Wraps `element`, reading the screen id from its `id` attribute.
	///
	/// Returns [`None`] for elements without a (non-empty) id.
	#[must_use]
	pub fn from_element(element: web_sys::HtmlElement) -> Option<Self> {
		let id = element.id();
		if id.is_empty() {
			None
		} else {
			Some(Self { id, element })
		}
	}

	#[must_use]
	pub fn id(&self) -> &str {
		&self.id
	}

	#[must_use]
	pub fn element(&self) -> &web_sys::HtmlElement {
		&self.element
	}

	/// Whether both handles refer to the very same DOM node.
	#[must_use]
	pub fn is_same_node(&self, other: &Self) -> bool {
		let other: &web_sys::Node = other.element.as_ref();
		self.element.is_same_node(Some(other))
	}

	/// In the document and not hidden via inline `display: none`.
	#[must_use]
	pub fn is_displayed(&self) -> bool {
		self.element.is_connected() && self.element.style().get_property_value("display").map_or(true, |display| display != "none")
	}

	/// Text of the first element matching `label_selector`, if any.
	#[must_use]
	pub fn label(&self, label_selector: &str) -> Option<String> {
		self.element.query_selector(label_selector).ok().flatten().and_then(|label| label.text_content())
	}

	pub(crate) fn hide(&self) -> Result<(), String> {
		self.element.style().set_property("display", "none").map_err(|error| describe(&error))
	}

	pub(crate) fn show(&self) -> Result<(), String> {
		self.element.style().remove_property("display").map(drop).map_err(|error| describe(&error))
	}

	/// Deep-clones `template` (without any listeners) and relabels the clone as `target`.
	///
	/// The returned screen is not yet part of the document.
	#[instrument(skip(template))]
	pub(crate) fn synthesize(template: &web_sys::HtmlElement, target: &NavTarget, label_selector: &str) -> Result<Self, String> {
		let element = template
			.clone_node_with_deep(true)
			.map_err(|error| describe(&error))?
			.dyn_into::<web_sys::HtmlElement>()
			.map_err(|node| format!("template clone is not an HTML element: {:?}", node))?;
		element.set_id(&target.id);

		match element.query_selector(label_selector) {
			Ok(Some(label)) => label.set_text_content(Some(&target.label)),
			Ok(None) => warn!("Template has no label matching {:?}; screen {:?} stays unlabelled.", label_selector, target.id),
			Err(error) => return Err(describe(&error)),
		}

		let screen = Self { id: target.id.clone(), element };
		screen.show()?;
		trace!("Synthesized screen.");
		Ok(screen)
	}
}

/// Whether `element` takes part in layout, i.e. is in the document and not hidden by `display: none`
/// on itself or an ancestor, whether inline or from a stylesheet.
#[must_use]
pub fn is_rendered(element: &web_sys::HtmlElement) -> bool {
	element.offset_width() > 0 || element.offset_height() > 0 || element.get_client_rects().length() > 0
}

/// Where a navigation link points: the target screen id and the label a newly created screen receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTarget {
	pub id: String,
	pub label: String,
}

impl NavTarget {
	#[must_use]
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self { id: id.into(), label: label.into() }
	}

	/// Reads the target from a link's `href` fragment and its text content.
	pub fn from_link(link: &web_sys::Element) -> Result<Self, NavigationError> {
		let href = link.get_attribute("href").ok_or(NavigationError::MissingTarget)?;
		let id = parse_fragment(&href)?;
		Ok(Self::new(id, link.text_content().unwrap_or_default()))
	}
}

/// Extracts the fragment identifier from `href`, e.g. `settings` from `#settings` or `page.html#settings`.
pub fn parse_fragment(href: &str) -> Result<&str, NavigationError> {
	match href.split_once('#') {
		Some((_, fragment)) if !fragment.is_empty() && !fragment.contains(|c: char| c.is_ascii_whitespace() || c == '#') => Ok(fragment),
		_ => Err(NavigationError::MalformedTarget { href: href.to_owned() }),
	}
}
