#![doc(html_root_url = "https://docs.rs/screen-swap-dom/0.0.1")]
#![warn(clippy::pedantic)]

//! Navigates between "screens" of a single page, comparing five ways of disposing of the screen being left
//! and what each of them does to the click listeners bound to its cells.
//!
//! See [`DisposalStrategy`] for the strategies and [`BindingDiscipline`] for the listener disciplines.

use std::{cell::RefCell, rc::Rc};

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod binder;
pub mod config;
#[cfg(feature = "demo")]
pub mod demo;
pub mod error;
pub mod load;
pub mod navigator;
pub mod picker;
pub mod registry;
pub mod screen;
pub mod store;

pub use crate::{
	binder::{AttachListeners, CellHandler, DetachListeners, ListenerBinder},
	config::{BindingDiscipline, DisposalStrategy, NavigatorConfig},
	error::{InstallError, NavigationError, StoreError},
	navigator::{Navigation, Navigator, Origin},
	picker::Picker,
	screen::{NavTarget, Screen},
};

/// Sets up a [`Navigator`] on the current document and binds the navigation links matching
/// [`NavigatorConfig::link_selector`] to it.
///
/// Everything stays bound for as long as the returned [`Picker`] is kept alive.
pub fn install(config: NavigatorConfig) -> Result<Picker, InstallError> {
	let window = web_sys::window().ok_or(InstallError::NoDocument)?;
	let document = window.document().ok_or(InstallError::NoDocument)?;
	let link_selector = config.link_selector.clone();
	let navigator = Navigator::for_document(&window, &document, config)?;
	Picker::bind(&document, &link_selector, Rc::new(RefCell::new(navigator)))
}
