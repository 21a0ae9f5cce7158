//! Selection commit: result row -> field group

use log::info;

use super::query::FetchStrategy;
use super::results::ResultRow;
use super::session::SessionContext;
use crate::page::Page;

/// Rows the delegated mechanism posts back itself are not committed natively
pub fn should_commit(row: &ResultRow, strategy: FetchStrategy) -> bool {
    !(strategy == FetchStrategy::Delegated && row.handled_by_delegate)
}

/// Write a row onto the session's field group. Missing elements are skipped.
pub fn commit(page: &mut Page, session: &SessionContext, row: &ResultRow) {
    if let Some(id) = session.code_input {
        page.set_value(id, row.code.as_str());
    }
    if let Some(id) = session.name_display {
        page.set_value(id, row.name.as_str());
    }
    if let Some(id) = session.hidden_input {
        page.set_value(id, row.hidden_value());
    }
    info!("Committed lookup selection '{}' ({})", row.label, row.hidden_value());
}
