use crossterm::event::KeyCode;

use super::results::ResultRow;
use crate::page::ElementId;

/// Inputs to the lookup widget
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    /// An open control was activated
    OpenControlActivated(ElementId),
    /// Key pressed while the search field has focus
    SearchKey(KeyCode),
    /// Search field value replaced as a whole (paste, host-driven input)
    SearchChanged(String),
    /// A debounce timer elapsed
    DebounceElapsed(u64),
    /// Rows for the query tagged `token` are ready
    ResultsLoaded { token: u64, rows: Vec<ResultRow> },
    /// Pointer activation on a result row
    RowClicked(usize),
    /// Key pressed while a result row has focus
    RowKey { index: usize, key: KeyCode },
    /// Close or cancel control activated
    CloseClicked,
    /// Click on the overlay background
    OverlayClicked,
    /// Key pressed anywhere on the page
    KeyPressed(KeyCode),
    /// Viewport height of the result list, reported by the renderer
    SetViewportHeight(usize),
    /// The host form was submitted
    FormSubmitted,
}
