use std::collections::BTreeMap;
use std::time::Duration;

use crate::serializer::FormRecord;

/// Side effects requested by `LookupWidget::update`, executed by the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    None,
    Batch(Vec<Command>),
    /// Deliver `Msg::DebounceElapsed(generation)` after `delay`
    ScheduleDebounce { generation: u64, delay: Duration },
    /// Direct strategy: GET the url, deliver `Msg::ResultsLoaded`
    Fetch(SearchRequest),
    /// Delegated strategy: fire the mechanism's change trigger, deliver `Msg::ResultsLoaded`
    Delegate(DelegatedRequest),
    /// Hand a serialized form record to the host
    Submit(FormRecord),
}

impl Command {
    pub fn batch(commands: impl IntoIterator<Item = Command>) -> Self {
        let commands: Vec<_> = commands.into_iter().filter(|c| !c.is_none()).collect();
        match commands.len() {
            0 => Command::None,
            1 => commands.into_iter().next().unwrap_or(Command::None),
            _ => Command::Batch(commands),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }
}

/// One direct query against the search endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub token: u64,
    pub url: String,
}

/// One change-triggered cycle of the delegated mechanism
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatedRequest {
    pub token: u64,
    /// Endpoint the mechanism fetches rendered rows from
    pub url: String,
    /// Parameter name the search value is sent under
    pub param_name: String,
    pub value: String,
    /// Request-parameters annotation of the search input (reference key)
    pub params: BTreeMap<String, String>,
}
