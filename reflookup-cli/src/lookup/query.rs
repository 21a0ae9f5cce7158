//! Query engine: keystrokes -> rate-limited queries -> rendered rows
//!
//! Two strategies share one contract. Direct debounces keystrokes and fetches
//! `<endpoint>?code=<query>` itself; Delegated forwards every change to an
//! external mechanism that fetches and renders rows on its own. Both tag each
//! issued query with a request token and only the latest token may render.

use log::debug;

use super::command::{Command, DelegatedRequest, SearchRequest};
use super::list::ResultList;
use super::modal::SearchInput;
use super::results::ResultRow;
use super::session::SessionContext;
use crate::config::LookupConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Debounced fetches issued by the widget
    Direct,
    /// Fetch/render cycle driven by an external mechanism
    Delegated,
}

#[derive(Debug, Clone)]
pub struct QueryEngine {
    strategy: FetchStrategy,
    debounce_generation: u64,
    latest_token: u64,
    results: ResultList,
}

impl QueryEngine {
    pub fn new(strategy: FetchStrategy) -> Self {
        Self {
            strategy,
            debounce_generation: 0,
            latest_token: 0,
            results: ResultList::new(),
        }
    }

    pub fn strategy(&self) -> FetchStrategy {
        self.strategy
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub(crate) fn results_mut(&mut self) -> &mut ResultList {
        &mut self.results
    }

    /// Token of the most recently issued query
    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    /// Start of a session: clear rows, abandon anything pending, issue the first query
    pub(crate) fn begin_session(
        &mut self,
        session: &SessionContext,
        search: &SearchInput,
        config: &LookupConfig,
    ) -> Command {
        self.results.clear();
        self.end_session();
        self.issue(session, search, config)
    }

    /// Invalidate pending debounce timers and in-flight responses
    pub(crate) fn end_session(&mut self) {
        self.debounce_generation += 1;
        self.latest_token += 1;
    }

    /// The search value changed
    pub(crate) fn input_changed(
        &mut self,
        session: &SessionContext,
        search: &SearchInput,
        config: &LookupConfig,
    ) -> Command {
        match self.strategy {
            FetchStrategy::Direct => {
                self.debounce_generation += 1;
                Command::ScheduleDebounce {
                    generation: self.debounce_generation,
                    delay: config.debounce,
                }
            }
            FetchStrategy::Delegated => self.issue(session, search, config),
        }
    }

    /// A debounce timer fired; only the latest scheduled one issues a query
    pub(crate) fn debounce_elapsed(
        &mut self,
        generation: u64,
        session: &SessionContext,
        search: &SearchInput,
        config: &LookupConfig,
    ) -> Command {
        if generation != self.debounce_generation {
            debug!(
                "Ignoring superseded debounce timer {} (latest {})",
                generation, self.debounce_generation
            );
            return Command::None;
        }
        self.issue(session, search, config)
    }

    /// Rows arrived for `token`; returns whether they were rendered
    pub(crate) fn results_arrived(&mut self, token: u64, rows: Vec<ResultRow>) -> bool {
        if token != self.latest_token {
            debug!("Discarding stale results for request {} (latest {})", token, self.latest_token);
            return false;
        }
        debug!("Rendering {} result rows for request {}", rows.len(), token);
        self.results.replace(rows);
        true
    }

    fn issue(&mut self, session: &SessionContext, search: &SearchInput, config: &LookupConfig) -> Command {
        self.latest_token += 1;
        let token = self.latest_token;

        match self.strategy {
            FetchStrategy::Direct => {
                let url = build_search_url(&session.url, &search.value, &session.reference_key, config);
                debug!("Issuing lookup query {}: {}", token, url);
                Command::Fetch(SearchRequest { token, url })
            }
            FetchStrategy::Delegated => {
                debug!("Triggering delegated lookup {} for '{}'", token, search.value);
                Command::Delegate(DelegatedRequest {
                    token,
                    url: session.url.clone(),
                    param_name: search.name.clone().unwrap_or_else(|| config.code_param.clone()),
                    value: search.value.clone(),
                    params: search.request_params.clone(),
                })
            }
        }
    }
}

/// `<endpoint>?code=<query>`, joined with `&` when the endpoint already has a query.
///
/// `&ref=<key>` is appended only when `config.direct_reference` is set and the key is non-empty.
pub fn build_search_url(endpoint: &str, query: &str, reference_key: &str, config: &LookupConfig) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    let mut url = format!(
        "{}{}{}={}",
        endpoint,
        separator,
        config.code_param,
        urlencoding::encode(query)
    );
    if config.direct_reference && !reference_key.is_empty() {
        url.push_str(&format!(
            "&{}={}",
            config.reference_param,
            urlencoding::encode(reference_key)
        ));
    }
    url
}
