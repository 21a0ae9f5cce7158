//! Reference-field lookup widget
//!
//! A headless modal that searches a remote catalog by code and writes the chosen
//! record back onto a host form's field group (hidden id + visible code + visible name).
//! The widget follows the same State / Msg / update / Command shape as the TUI apps:
//! `LookupWidget::update` is pure and `LookupRuntime` executes the resulting commands
//! on tokio.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod lookup;
pub mod page;
pub mod runtime;
pub mod serializer;
pub mod view;

pub use api::{DelegatedFetcher, HttpSearchClient, SearchClient};
pub use config::LookupConfig;
pub use error::LookupError;
pub use form::{Field, Form, FormBuilder};
pub use lookup::{Command, FetchStrategy, LookupWidget, Msg, ResultItem, ResultRow, SessionContext};
pub use page::{Element, ElementId, ElementKind, Focus, GroupId, Page};
pub use runtime::LookupRuntime;
pub use serializer::{FieldValue, FormRecord, ReferenceValue, serialize_form};
