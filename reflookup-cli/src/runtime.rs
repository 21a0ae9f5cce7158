//! LookupRuntime - executes widget commands on tokio
//!
//! Owns the widget and the host page. Every async effect (debounce timer,
//! search request, delegated trigger) is spawned and reports back through an
//! unbounded channel as a `Msg`; the host pumps that channel and dispatches.

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc;

use crate::api::{DelegatedFetcher, SearchClient, fetch_results};
use crate::config::LookupConfig;
use crate::lookup::{Command, FetchStrategy, LookupWidget, Msg, render_rows};
use crate::page::Page;
use crate::serializer::FormRecord;

pub struct LookupRuntime {
    widget: LookupWidget,
    page: Page,
    search_client: Option<Arc<dyn SearchClient>>,
    delegate: Option<Arc<dyn DelegatedFetcher>>,
    records: Option<mpsc::UnboundedSender<FormRecord>>,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
}

impl LookupRuntime {
    /// Runtime using the direct strategy against `client`
    pub fn direct(config: LookupConfig, page: Page, client: Arc<dyn SearchClient>) -> Self {
        Self::build(config, page, Some(client), None)
    }

    /// Runtime handing every query to an external mechanism
    pub fn delegated(config: LookupConfig, page: Page, fetcher: Arc<dyn DelegatedFetcher>) -> Self {
        Self::build(config, page, None, Some(fetcher))
    }

    fn build(
        config: LookupConfig,
        page: Page,
        search_client: Option<Arc<dyn SearchClient>>,
        delegate: Option<Arc<dyn DelegatedFetcher>>,
    ) -> Self {
        let strategy = if delegate.is_some() {
            FetchStrategy::Delegated
        } else {
            FetchStrategy::Direct
        };
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            widget: LookupWidget::new(config, strategy),
            page,
            search_client,
            delegate,
            records: None,
            tx,
            rx,
        }
    }

    /// Forward submitted form records to the host
    pub fn with_record_sink(mut self, sink: mpsc::UnboundedSender<FormRecord>) -> Self {
        self.records = Some(sink);
        self
    }

    pub fn widget(&self) -> &LookupWidget {
        &self.widget
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Sender for feeding messages from outside (input event loops)
    pub fn sender(&self) -> mpsc::UnboundedSender<Msg> {
        self.tx.clone()
    }

    /// Run one message through the widget and execute the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        let command = self.widget.update(&mut self.page, msg);
        self.execute(command);
    }

    /// Dispatch every message that is already waiting. Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.dispatch(msg);
            handled += 1;
        }
        handled
    }

    /// Wait for the next message from a spawned effect
    pub async fn next_message(&mut self) -> Option<Msg> {
        self.rx.recv().await
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::None => {}

            Command::Batch(commands) => {
                for command in commands {
                    self.execute(command);
                }
            }

            Command::ScheduleDebounce { generation, delay } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Msg::DebounceElapsed(generation));
                });
            }

            Command::Fetch(request) => {
                let tx = self.tx.clone();
                let Some(client) = self.search_client.clone() else {
                    warn!("No search client configured; request {} renders empty", request.token);
                    let _ = tx.send(Msg::ResultsLoaded { token: request.token, rows: Vec::new() });
                    return;
                };
                tokio::spawn(async move {
                    let items = fetch_results(client.as_ref(), &request.url).await;
                    let _ = tx.send(Msg::ResultsLoaded {
                        token: request.token,
                        rows: render_rows(&items),
                    });
                });
            }

            Command::Delegate(request) => {
                let tx = self.tx.clone();
                let Some(fetcher) = self.delegate.clone() else {
                    warn!("No delegated mechanism configured; request {} renders empty", request.token);
                    let _ = tx.send(Msg::ResultsLoaded { token: request.token, rows: Vec::new() });
                    return;
                };
                tokio::spawn(async move {
                    let rows = fetcher.changed(&request).await;
                    let _ = tx.send(Msg::ResultsLoaded { token: request.token, rows });
                });
            }

            Command::Submit(record) => {
                info!("Form submitted with {} fields", record.len());
                if let Some(sink) = &self.records {
                    if sink.send(record).is_err() {
                        warn!("Form record receiver dropped");
                    }
                }
            }
        }
    }
}
