//! Form serializer: host page -> structured record
//!
//! Reference field groups become `{id, code, name}` objects keyed by the hidden
//! input's name; every other named, visible control becomes a flat string.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::page::{ATTR_LOOKUP_URL, ElementKind, GroupId, Page};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceValue {
    pub id: String,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Plain(String),
    Reference(ReferenceValue),
}

/// Field name -> value; later fields with the same name win
pub type FormRecord = BTreeMap<String, FieldValue>;

pub fn serialize_form(page: &Page) -> FormRecord {
    let mut record = FormRecord::new();
    let mut handled: HashSet<String> = HashSet::new();

    let controls: Vec<_> = page
        .elements()
        .filter(|(_, e)| e.kind.is_form_control())
        .collect();

    for (_, hidden) in controls.iter().filter(|(_, e)| e.kind == ElementKind::HiddenInput) {
        let (Some(name), Some(group)) = (hidden.name().filter(|n| !n.is_empty()), hidden.group()) else {
            continue;
        };

        record.insert(
            name.to_string(),
            FieldValue::Reference(ReferenceValue {
                id: hidden.value.clone(),
                code: code_value(page, group, name),
                name: page
                    .first_of_kind(group, ElementKind::NameDisplay)
                    .and_then(|id| page.value(id))
                    .unwrap_or_default()
                    .to_string(),
            }),
        );
        handled.insert(name.to_string());
        handled.insert(format!("{}_code", name));
    }

    for (_, control) in &controls {
        if control.kind == ElementKind::HiddenInput {
            continue;
        }
        let Some(name) = control.name().filter(|n| !n.is_empty()) else {
            continue;
        };
        if handled.contains(name) {
            continue;
        }
        record.insert(name.to_string(), FieldValue::Plain(control.value.clone()));
    }

    record
}

/// Code input of a group: `<name>_code` first, then any input carrying a lookup url
fn code_value(page: &Page, group: GroupId, name: &str) -> String {
    let code_name = format!("{}_code", name);
    page.find_in_group(group, |e| e.kind == ElementKind::TextInput && e.name() == Some(code_name.as_str()))
        .or_else(|| {
            page.find_in_group(group, |e| e.kind == ElementKind::TextInput && e.has_attr(ATTR_LOOKUP_URL))
        })
        .and_then(|id| page.value(id))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;
    use serde_json::json;

    fn postcode_page() -> Page {
        let mut page = Page::new();
        let group = page.add_group();
        page.insert_into(group, Element::open_control("/api/postcodes"));
        page.insert_into(
            group,
            Element::text_input("postcode_code")
                .with_value("3000")
                .with_attr(ATTR_LOOKUP_URL, "/api/postcodes"),
        );
        page.insert_into(group, Element::name_display().with_value("Rotterdam"));
        page.insert_into(group, Element::hidden_input("postcode").with_value("7"));
        page.insert(Element::text_input("notes").with_value("hello"));
        page
    }

    #[test]
    fn test_reference_and_plain_fields() {
        let record = serialize_form(&postcode_page());
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "postcode": { "id": "7", "code": "3000", "name": "Rotterdam" },
                "notes": "hello"
            })
        );
    }

    #[test]
    fn test_code_input_found_by_lookup_url() {
        let mut page = Page::new();
        let group = page.add_group();
        page.insert_into(
            group,
            Element::text_input("city_search")
                .with_value("RTM")
                .with_attr(ATTR_LOOKUP_URL, "/api/cities"),
        );
        page.insert_into(group, Element::hidden_input("city").with_value("12"));

        let record = serialize_form(&page);
        assert_eq!(
            record.get("city"),
            Some(&FieldValue::Reference(ReferenceValue {
                id: "12".to_string(),
                code: "RTM".to_string(),
                name: String::new(),
            }))
        );
        // Not named `<field>_code`, so it is also emitted flat
        assert_eq!(record.get("city_search"), Some(&FieldValue::Plain("RTM".to_string())));
    }

    #[test]
    fn test_loose_hidden_inputs_are_skipped() {
        let mut page = Page::new();
        page.insert(Element::hidden_input("csrf").with_value("token"));
        page.insert(Element::new(ElementKind::TextArea).with_name("remarks").with_value("multi\nline"));
        page.insert(Element::text_input("").with_value("nameless"));
        page.insert(Element::name_display().with_value("not a control"));

        let record = serialize_form(&page);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("remarks"), Some(&FieldValue::Plain("multi\nline".to_string())));
    }

    #[test]
    fn test_nameless_hidden_input_in_group_is_skipped() {
        let mut page = Page::new();
        let group = page.add_group();
        page.insert_into(group, Element::text_input("_code").with_value("3000"));
        page.insert_into(group, Element::name_display().with_value("Rotterdam"));
        page.insert_into(group, Element::hidden_input("").with_value("9"));

        let record = serialize_form(&page);
        assert!(!record.contains_key(""));
        // The group's code input is still a plain named control
        assert_eq!(record.get("_code"), Some(&FieldValue::Plain("3000".to_string())));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_missing_code_and_name_default_to_empty() {
        let mut page = Page::new();
        let group = page.add_group();
        page.insert_into(group, Element::hidden_input("owner").with_value("5"));

        let record = serialize_form(&page);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "owner": { "id": "5", "code": "", "name": "" } })
        );
    }
}
