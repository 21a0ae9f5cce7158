use async_trait::async_trait;

use crate::lookup::{DelegatedRequest, ResultRow};

/// An external fetch/render mechanism driving the delegated strategy.
///
/// The widget fires one change trigger per search-field change (plus one
/// synthesized trigger when the modal opens) and the mechanism answers with
/// the rows it rendered. Rows it will commit through its own post-back must
/// come back flagged with `ResultRow::handled_by_delegate`. Failures are the
/// mechanism's to absorb; an empty list renders an empty modal.
#[async_trait]
pub trait DelegatedFetcher: Send + Sync {
    async fn changed(&self, request: &DelegatedRequest) -> Vec<ResultRow>;
}
