//! Remote collaborators of the lookup widget
//!
//! - `SearchClient`: the direct strategy's search endpoint (`GET <url>?code=<query>`)
//! - `DelegatedFetcher`: an external mechanism that fetches and renders rows itself

pub mod client;
pub mod delegated;

pub use client::{HttpSearchClient, SearchClient, fetch_results};
pub use delegated::DelegatedFetcher;
