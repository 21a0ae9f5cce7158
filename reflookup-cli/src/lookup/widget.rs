//! LookupWidget - wires trigger resolution, modal, query engine and selection
//!
//! `update` is the only entry point. It mutates the widget and the host page
//! synchronously and returns the side effects it needs as a `Command`.

use crossterm::event::KeyCode;
use log::debug;

use super::command::Command;
use super::list::ResultList;
use super::modal::{ModalController, SearchInput};
use super::msg::Msg;
use super::query::{FetchStrategy, QueryEngine};
use super::selection;
use super::session::SessionContext;
use super::trigger::resolve_trigger;
use crate::config::LookupConfig;
use crate::page::{ElementId, Page};
use crate::serializer::serialize_form;

#[derive(Debug, Clone)]
pub struct LookupWidget {
    config: LookupConfig,
    modal: ModalController,
    query: QueryEngine,
}

impl LookupWidget {
    /// The fetch strategy is fixed for the widget's lifetime
    pub fn new(config: LookupConfig, strategy: FetchStrategy) -> Self {
        Self {
            config,
            modal: ModalController::new(),
            query: QueryEngine::new(strategy),
        }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn session(&self) -> Option<&SessionContext> {
        self.modal.session()
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn search(&self) -> &SearchInput {
        self.modal.search()
    }

    pub fn results(&self) -> &ResultList {
        self.query.results()
    }

    pub fn strategy(&self) -> FetchStrategy {
        self.query.strategy()
    }

    pub fn update(&mut self, page: &mut Page, msg: Msg) -> Command {
        match msg {
            Msg::OpenControlActivated(control) => self.open(page, control),

            Msg::SearchKey(key) => self.search_key(page, key),

            Msg::SearchChanged(value) => {
                if !self.modal.is_open() {
                    return Command::None;
                }
                if self.modal.search_mut().set_value(value) {
                    self.input_changed()
                } else {
                    Command::None
                }
            }

            Msg::DebounceElapsed(generation) => {
                let Some(session) = self.modal.session() else {
                    return Command::None;
                };
                self.query
                    .debounce_elapsed(generation, session, self.modal.search(), &self.config)
            }

            Msg::ResultsLoaded { token, rows } => {
                if !self.modal.is_open() {
                    debug!("Ignoring results for request {} - modal closed", token);
                    return Command::None;
                }
                self.query.results_arrived(token, rows);
                Command::None
            }

            Msg::RowClicked(index) => self.activate_row(page, index),

            Msg::RowKey { index, key } => match key {
                KeyCode::Enter => self.activate_row(page, index),
                KeyCode::Esc => {
                    self.close(page);
                    Command::None
                }
                _ => Command::None,
            },

            Msg::CloseClicked | Msg::OverlayClicked => {
                self.close(page);
                Command::None
            }

            Msg::KeyPressed(key) => {
                if key == KeyCode::Esc && self.modal.is_open() {
                    self.close(page);
                }
                Command::None
            }

            Msg::SetViewportHeight(height) => {
                self.query.results_mut().set_viewport_height(height);
                Command::None
            }

            Msg::FormSubmitted => Command::Submit(serialize_form(page)),
        }
    }

    fn open(&mut self, page: &mut Page, control: ElementId) -> Command {
        let Some(ctx) = resolve_trigger(page, control) else {
            return Command::None;
        };

        self.modal.open(page, ctx, self.query.strategy(), &self.config);
        let Some(session) = self.modal.session() else {
            return Command::None;
        };
        self.query
            .begin_session(session, self.modal.search(), &self.config)
    }

    fn close(&mut self, page: &mut Page) {
        if self.modal.close(page).is_some() {
            self.query.end_session();
        }
    }

    fn input_changed(&mut self) -> Command {
        let Some(session) = self.modal.session() else {
            return Command::None;
        };
        self.query
            .input_changed(session, self.modal.search(), &self.config)
    }

    fn search_key(&mut self, page: &mut Page, key: KeyCode) -> Command {
        if !self.modal.is_open() {
            return Command::None;
        }

        match key {
            KeyCode::Char(c) => {
                self.modal.search_mut().push_char(c);
                self.input_changed()
            }
            KeyCode::Backspace => {
                if self.modal.search_mut().backspace() {
                    self.input_changed()
                } else {
                    Command::None
                }
            }
            KeyCode::Enter => match self.query.results().selected() {
                Some(index) => self.activate_row(page, index),
                None => Command::None,
            },
            KeyCode::Esc => {
                self.close(page);
                Command::None
            }
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Home
            | KeyCode::End => {
                self.query.results_mut().handle_key(key);
                Command::None
            }
            _ => Command::None,
        }
    }

    fn activate_row(&mut self, page: &mut Page, index: usize) -> Command {
        if !self.modal.is_open() {
            return Command::None;
        }
        let Some(row) = self.query.results().get(index).cloned() else {
            return Command::None;
        };
        if !selection::should_commit(&row, self.query.strategy()) {
            debug!("Row {} is committed by the delegated mechanism", index);
            return Command::None;
        }

        if let Some(session) = self.modal.session() {
            selection::commit(page, session, &row);
        }
        self.close(page);
        Command::None
    }
}
