use std::collections::BTreeMap;

/// Attribute carrying the search endpoint on an open control or code input
pub const ATTR_LOOKUP_URL: &str = "lookup-url";
/// Attribute carrying the optional reference key (contextual filter)
pub const ATTR_REF_CODE: &str = "ref-code";

/// Stable handle to an element on a `Page`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

/// Handle to a field group container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Visible single-line input (code inputs and plain text/number/date fields)
    TextInput,
    HiddenInput,
    /// Read-only text showing a reference's display name
    NameDisplay,
    /// Control that opens the lookup modal for its field group
    OpenControl,
    Select,
    TextArea,
}

impl ElementKind {
    /// Whether the element is submitted with the form
    pub fn is_form_control(self) -> bool {
        matches!(
            self,
            ElementKind::TextInput | ElementKind::HiddenInput | ElementKind::Select | ElementKind::TextArea
        )
    }
}

/// One element on the host page
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub name: Option<String>,
    /// Input value, or text content for name displays
    pub value: String,
    pub attributes: BTreeMap<String, String>,
    pub(crate) group: Option<GroupId>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            name: None,
            value: String::new(),
            attributes: BTreeMap::new(),
            group: None,
        }
    }

    pub fn text_input(name: impl Into<String>) -> Self {
        Self::new(ElementKind::TextInput).with_name(name)
    }

    pub fn hidden_input(name: impl Into<String>) -> Self {
        Self::new(ElementKind::HiddenInput).with_name(name)
    }

    pub fn name_display() -> Self {
        Self::new(ElementKind::NameDisplay)
    }

    pub fn open_control(lookup_url: impl Into<String>) -> Self {
        Self::new(ElementKind::OpenControl).with_attr(ATTR_LOOKUP_URL, lookup_url)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Attribute value, treating an empty string as absent
    pub fn non_empty_attr(&self, key: &str) -> Option<&str> {
        self.attr(key).filter(|v| !v.is_empty())
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
