//! Modal lifecycle: Closed <-> Open, focus, scroll lock and the session slot

use std::collections::BTreeMap;

use log::debug;

use super::query::FetchStrategy;
use super::session::SessionContext;
use crate::config::LookupConfig;
use crate::page::{Focus, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Open,
}

/// Visibility of the overlay or the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub hidden: bool,
    pub aria_hidden: bool,
}

impl Layer {
    const HIDDEN: Layer = Layer { hidden: true, aria_hidden: true };
    const SHOWN: Layer = Layer { hidden: false, aria_hidden: false };
}

/// The modal's search field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub value: String,
    /// Contents are selected; the next edit replaces them
    pub selected_all: bool,
    /// Request parameter name used by the delegated mechanism
    pub name: Option<String>,
    /// Extra request values attached to delegated requests
    pub request_params: BTreeMap<String, String>,
}

impl SearchInput {
    /// Apply an edit key; returns true when the value changed
    pub fn push_char(&mut self, c: char) -> bool {
        if self.selected_all {
            self.value.clear();
            self.selected_all = false;
        }
        self.value.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.selected_all {
            self.selected_all = false;
            if self.value.is_empty() {
                return false;
            }
            self.value.clear();
            return true;
        }
        self.value.pop().is_some()
    }

    /// Replace the whole value; returns true when it changed
    pub fn set_value(&mut self, value: String) -> bool {
        self.selected_all = false;
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }
}

/// Owns the open/closed state and the single active session
#[derive(Debug, Clone)]
pub struct ModalController {
    phase: ModalPhase,
    session: Option<SessionContext>,
    overlay: Layer,
    dialog: Layer,
    search: SearchInput,
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController {
    /// Both layers start hidden whatever the host rendered
    pub fn new() -> Self {
        Self {
            phase: ModalPhase::Closed,
            session: None,
            overlay: Layer::HIDDEN,
            dialog: Layer::HIDDEN,
            search: SearchInput::default(),
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == ModalPhase::Open
    }

    /// The active session; every other component reads it through here
    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    pub fn overlay(&self) -> Layer {
        self.overlay
    }

    pub fn dialog(&self) -> Layer {
        self.dialog
    }

    pub fn search(&self) -> &SearchInput {
        &self.search
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchInput {
        &mut self.search
    }

    /// Closed/Open -> Open. Re-opening replaces the session; there is never a second modal.
    pub(crate) fn open(
        &mut self,
        page: &mut Page,
        ctx: SessionContext,
        strategy: FetchStrategy,
        config: &LookupConfig,
    ) {
        if let Some(previous) = &self.session {
            debug!("Replacing lookup session for {:?} with {:?}", previous.group, ctx.group);
        }

        self.search.value = ctx
            .code_input
            .and_then(|id| page.value(id))
            .unwrap_or_default()
            .to_string();

        if strategy == FetchStrategy::Delegated {
            if self.search.name.is_none() {
                self.search.name = Some(config.code_param.clone());
            }
            if ctx.has_reference_key() {
                self.search
                    .request_params
                    .insert(config.reference_param.clone(), ctx.reference_key.clone());
            } else {
                self.search.request_params.remove(&config.reference_param);
            }
        }

        self.overlay = Layer::SHOWN;
        self.dialog = Layer::SHOWN;
        page.set_scroll_locked(true);
        page.set_focus(Some(Focus::SearchInput));
        self.search.selected_all = true;

        debug!("Lookup modal open for {} (ref '{}')", ctx.url, ctx.reference_key);
        self.session = Some(ctx);
        self.phase = ModalPhase::Open;
    }

    /// Open -> Closed. Returns the discarded session.
    pub(crate) fn close(&mut self, page: &mut Page) -> Option<SessionContext> {
        if self.phase == ModalPhase::Closed {
            return None;
        }

        self.dialog = Layer::HIDDEN;
        self.overlay = Layer::HIDDEN;
        page.set_scroll_locked(false);
        self.search.selected_all = false;

        let session = self.session.take();
        let return_focus = session
            .as_ref()
            .and_then(|ctx| ctx.code_input)
            .filter(|id| page.contains(*id))
            .map(Focus::Element);
        page.set_focus(return_focus);

        self.phase = ModalPhase::Closed;
        debug!("Lookup modal closed");
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;

    fn session(page: &mut Page, code_value: &str, reference_key: &str) -> SessionContext {
        let group = page.add_group();
        let code = page.insert_into(group, Element::text_input("postcode_code").with_value(code_value));
        SessionContext {
            url: "/api/postcodes".to_string(),
            group,
            code_input: Some(code),
            name_display: None,
            hidden_input: None,
            reference_key: reference_key.to_string(),
        }
    }

    #[test]
    fn test_starts_hidden() {
        let modal = ModalController::new();
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert!(modal.overlay().hidden && modal.overlay().aria_hidden);
        assert!(modal.dialog().hidden && modal.dialog().aria_hidden);
        assert!(modal.session().is_none());
    }

    #[test]
    fn test_open_seeds_and_locks() {
        let mut page = Page::new();
        let ctx = session(&mut page, "30", "");
        let mut modal = ModalController::new();

        modal.open(&mut page, ctx.clone(), FetchStrategy::Direct, &LookupConfig::default());

        assert!(modal.is_open());
        assert_eq!(modal.search().value, "30");
        assert!(modal.search().selected_all);
        assert!(!modal.overlay().hidden && !modal.dialog().hidden);
        assert!(page.is_scroll_locked());
        assert_eq!(page.focus(), Some(Focus::SearchInput));
        assert_eq!(modal.session(), Some(&ctx));
        // Direct strategy leaves the annotation alone
        assert!(modal.search().request_params.is_empty());
        assert_eq!(modal.search().name, None);
    }

    #[test]
    fn test_close_restores_page() {
        let mut page = Page::new();
        let ctx = session(&mut page, "", "");
        let code = ctx.code_input.unwrap();
        let mut modal = ModalController::new();
        modal.open(&mut page, ctx.clone(), FetchStrategy::Direct, &LookupConfig::default());

        assert_eq!(modal.close(&mut page), Some(ctx));
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert!(modal.dialog().hidden && modal.overlay().hidden);
        assert!(!page.is_scroll_locked());
        assert_eq!(page.focus(), Some(Focus::Element(code)));
        assert!(modal.session().is_none());
        assert_eq!(modal.close(&mut page), None);
    }

    #[test]
    fn test_close_without_code_input_drops_focus() {
        let mut page = Page::new();
        let ctx = session(&mut page, "", "");
        let mut modal = ModalController::new();
        modal.open(&mut page, ctx.clone(), FetchStrategy::Direct, &LookupConfig::default());
        page.remove(ctx.code_input.unwrap());

        modal.close(&mut page);
        assert_eq!(page.focus(), None);
    }

    #[test]
    fn test_delegated_annotation_follows_session() {
        let mut page = Page::new();
        let config = LookupConfig::default();
        let mut modal = ModalController::new();

        let with_ref = session(&mut page, "", "NL");
        modal.open(&mut page, with_ref, FetchStrategy::Delegated, &config);
        assert_eq!(modal.search().name.as_deref(), Some("code"));
        assert_eq!(modal.search().request_params.get("ref").map(String::as_str), Some("NL"));

        let without_ref = session(&mut page, "", "");
        modal.open(&mut page, without_ref, FetchStrategy::Delegated, &config);
        assert!(modal.search().request_params.get("ref").is_none());
    }

    #[test]
    fn test_search_edits_replace_selection() {
        let mut search = SearchInput {
            value: "3000".to_string(),
            selected_all: true,
            ..Default::default()
        };
        search.push_char('4');
        assert_eq!(search.value, "4");
        search.push_char('1');
        assert_eq!(search.value, "41");
        assert!(search.backspace());
        assert_eq!(search.value, "4");
    }
}
