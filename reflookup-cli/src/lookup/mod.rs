//! The lookup widget
//!
//! - `trigger`: open control -> `SessionContext`
//! - `modal`: open/close lifecycle, focus, scroll lock, the single session slot
//! - `query`: direct (debounced) or delegated fetching, stale-response guard
//! - `selection`: writes a chosen row back onto the field group
//! - `widget`: `LookupWidget::update`, the Msg -> Command state machine

pub mod command;
pub mod list;
pub mod modal;
pub mod msg;
pub mod query;
pub mod results;
pub mod selection;
pub mod session;
pub mod trigger;
pub mod widget;

pub use command::{Command, DelegatedRequest, SearchRequest};
pub use list::ResultList;
pub use modal::{Layer, ModalController, ModalPhase, SearchInput};
pub use msg::Msg;
pub use query::{FetchStrategy, QueryEngine, build_search_url};
pub use results::{ResultItem, ResultRow, parse_result_items, render_rows, row_label};
pub use session::SessionContext;
pub use trigger::resolve_trigger;
pub use widget::LookupWidget;
