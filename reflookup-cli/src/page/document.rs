use super::element::{Element, ElementId, ElementKind, GroupId};

/// Where keyboard input currently goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// A host element (usually the originating code input)
    Element(ElementId),
    /// The lookup modal's search field
    SearchInput,
}

/// Host page: elements in document order plus document-level state
#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: Vec<Option<Element>>,
    group_count: usize,
    focus: Option<Focus>,
    scroll_locked: bool,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element outside any field group
    pub fn insert(&mut self, element: Element) -> ElementId {
        self.push(element, None)
    }

    /// Create an empty field group container
    pub fn add_group(&mut self) -> GroupId {
        let id = GroupId(self.group_count);
        self.group_count += 1;
        id
    }

    /// Append an element inside a field group
    pub fn insert_into(&mut self, group: GroupId, element: Element) -> ElementId {
        self.push(element, Some(group))
    }

    fn push(&mut self, mut element: Element, group: Option<GroupId>) -> ElementId {
        element.group = group;
        let id = ElementId(self.elements.len());
        self.elements.push(Some(element));
        id
    }

    /// Detach an element from the page. Handles to it stay valid but resolve to nothing.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.elements.get_mut(id.0).and_then(Option::take);
        if removed.is_some() && self.focus == Some(Focus::Element(id)) {
            self.focus = None;
        }
        removed
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Current value (or text) of an element, if it is still on the page
    pub fn value(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|e| e.value.as_str())
    }

    /// Write an element's value. Missing elements are a no-op; returns whether a write happened.
    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.value = value.into();
                true
            }
            None => false,
        }
    }

    /// All live elements in document order
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(idx, e)| e.as_ref().map(|e| (ElementId(idx), e)))
    }

    /// Live elements of one field group in document order
    pub fn group_members(&self, group: GroupId) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements().filter(move |(_, e)| e.group == Some(group))
    }

    /// First element of a group matching the predicate
    pub fn find_in_group<P>(&self, group: GroupId, predicate: P) -> Option<ElementId>
    where
        P: Fn(&Element) -> bool,
    {
        self.group_members(group)
            .find(|(_, e)| predicate(e))
            .map(|(id, _)| id)
    }

    /// First element of a group with the given kind
    pub fn first_of_kind(&self, group: GroupId, kind: ElementKind) -> Option<ElementId> {
        self.find_in_group(group, |e| e.kind == kind)
    }

    /// First element on the page with the given name
    pub fn find_by_name(&self, name: &str) -> Option<ElementId> {
        self.elements()
            .find(|(_, e)| e.name() == Some(name))
            .map(|(id, _)| id)
    }

    /// Open controls on the page, in document order
    pub fn open_controls(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements()
            .filter(|(_, e)| e.kind == ElementKind::OpenControl)
            .map(|(id, _)| id)
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<Focus>) {
        self.focus = focus;
    }

    /// Whether background scrolling is locked by an open modal
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}
