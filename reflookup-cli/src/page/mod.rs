//! Host page model
//!
//! The DOM-equivalent the lookup widget reads and writes: form controls,
//! field groups, document focus and the background scroll lock. The host owns
//! the page; the widget only touches it inside `update`.

pub mod document;
pub mod element;

pub use document::{Focus, Page};
pub use element::{ATTR_LOOKUP_URL, ATTR_REF_CODE, Element, ElementId, ElementKind, GroupId};
