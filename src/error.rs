use thiserror::Error;
use wasm_bindgen::JsValue;

/// Renders a thrown [***JavaScript***](https://developer.mozilla.org/en-US/docs/Web/JavaScript) value for error messages.
pub(crate) fn describe(js: &JsValue) -> String {
	js.as_string().unwrap_or_else(|| format!("{:?}", js))
}

#[derive(Debug, Error)]
pub enum InstallError {
	#[error("no window or document available")]
	NoDocument,
	#[error("no mount element (document body) available")]
	NoMount,
	#[error("no visible screen matches {selector:?}")]
	NoInitialScreen { selector: String },
	#[error("initial screen has no id")]
	AnonymousScreen,
	#[error("could not copy the initial screen as template: {0}")]
	Template(String),
	#[error("invalid selector {selector:?}: {message}")]
	Selector { selector: String, message: String },
	#[error(transparent)]
	Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum NavigationError {
	#[error("navigation link target {href:?} is not a non-empty fragment")]
	MalformedTarget { href: String },
	#[error("navigation link has no href attribute")]
	MissingTarget,
	#[error("could not dispose of screen {id:?}: {source}")]
	Dispose { id: String, source: StoreError },
	#[error("could not synthesize screen {id:?}: {message}")]
	Synthesize { id: String, message: String },
	#[error("a navigation is already in progress")]
	Busy,
}

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("session storage is unavailable: {0}")]
	Unavailable(String),
	#[error("session storage rejected the markup of {key:?} (quota exceeded?): {message}")]
	Write { key: String, message: String },
	#[error("could not read {key:?} from session storage: {message}")]
	Read { key: String, message: String },
	#[error("stored markup of {key:?} does not describe an element")]
	Unparsable { key: String },
	#[error("DOM operation failed: {0}")]
	Dom(String),
}
