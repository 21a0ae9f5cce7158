use crate::page::{ElementId, GroupId};

/// The single active lookup session, bound to one field group.
///
/// Element handles may point at elements the host has since removed; every
/// write through them degrades to a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Search endpoint
    pub url: String,
    pub group: GroupId,
    pub code_input: Option<ElementId>,
    pub name_display: Option<ElementId>,
    pub hidden_input: Option<ElementId>,
    /// Trimmed contextual filter; empty when the trigger carries none
    pub reference_key: String,
}

impl SessionContext {
    pub fn has_reference_key(&self) -> bool {
        !self.reference_key.is_empty()
    }
}
