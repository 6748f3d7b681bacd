use crate::screen::Screen;
use tracing::trace;

/// Tracks which screen is visible, so that there is never more than one.
///
/// Also keeps the pristine template every new screen is cloned from: a deep copy of the screen that was visible at installation.
#[derive(Debug)]
pub struct ScreenRegistry {
	visible: Option<Screen>,
	template: web_sys::HtmlElement,
	synthesized: usize,
}

impl ScreenRegistry {
	#[must_use]
	pub fn new(initial: Screen, template: web_sys::HtmlElement) -> Self {
		Self {
			visible: Some(initial),
			template,
			synthesized: 0,
		}
	}

	#[must_use]
	pub fn visible(&self) -> Option<&Screen> {
		self.visible.as_ref()
	}

	pub(crate) fn take_visible(&mut self) -> Option<Screen> {
		self.visible.take()
	}

	/// Replaces the visible screen. The previous one must have been taken out of view already.
	pub(crate) fn set_visible(&mut self, screen: Screen) {
		debug_assert!(self.visible.is_none(), "Two screens visible at once");
		trace!(screen = screen.id(), "Screen now visible.");
		self.visible = Some(screen);
	}

	#[must_use]
	pub fn template(&self) -> &web_sys::HtmlElement {
		&self.template
	}

	pub(crate) fn count_synthesized(&mut self) {
		self.synthesized += 1;
	}

	/// How many screens were created from the template so far.
	#[must_use]
	pub fn synthesized(&self) -> usize {
		self.synthesized
	}
}
