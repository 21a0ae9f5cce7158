//! Trigger resolution: open control -> session context

use log::debug;

use super::session::SessionContext;
use crate::page::{ATTR_LOOKUP_URL, ATTR_REF_CODE, ElementId, ElementKind, Page};

/// Resolve an activated open control into a session context.
///
/// Returns `None` (and the activation is ignored) when the element is not an
/// open control with a `lookup-url` attribute, sits outside a field group, or
/// no endpoint can be found on either the control or the group's code input.
pub fn resolve_trigger(page: &Page, control_id: ElementId) -> Option<SessionContext> {
    let control = page.get(control_id)?;
    if control.kind != ElementKind::OpenControl || !control.has_attr(ATTR_LOOKUP_URL) {
        return None;
    }

    let Some(group) = control.group() else {
        debug!("Open control {:?} is not inside a field group", control_id);
        return None;
    };

    let code_input = page
        .find_in_group(group, |e| e.kind == ElementKind::TextInput && e.has_attr(ATTR_LOOKUP_URL))
        .or_else(|| page.first_of_kind(group, ElementKind::TextInput));
    let name_display = page.first_of_kind(group, ElementKind::NameDisplay);
    let hidden_input = page.first_of_kind(group, ElementKind::HiddenInput);

    let code_element = code_input.and_then(|id| page.get(id));

    let url = control
        .non_empty_attr(ATTR_LOOKUP_URL)
        .or_else(|| code_element.and_then(|e| e.non_empty_attr(ATTR_LOOKUP_URL)));
    let Some(url) = url else {
        debug!("Open control {:?} has no resolvable lookup url", control_id);
        return None;
    };

    let reference_key = control
        .non_empty_attr(ATTR_REF_CODE)
        .or_else(|| code_element.and_then(|e| e.non_empty_attr(ATTR_REF_CODE)))
        .unwrap_or_default()
        .trim()
        .to_string();

    Some(SessionContext {
        url: url.to_string(),
        group,
        code_input,
        name_display,
        hidden_input,
        reference_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;

    fn reference_group(page: &mut Page, control: Element, code: Element) -> (ElementId, ElementId) {
        let group = page.add_group();
        let control_id = page.insert_into(group, control);
        let code_id = page.insert_into(group, code);
        page.insert_into(group, Element::name_display());
        page.insert_into(group, Element::hidden_input("postcode"));
        (control_id, code_id)
    }

    #[test]
    fn test_resolves_full_group() {
        let mut page = Page::new();
        let (control, code) = reference_group(
            &mut page,
            Element::open_control("/api/postcodes").with_attr(ATTR_REF_CODE, "  NL "),
            Element::text_input("postcode_code").with_attr(ATTR_LOOKUP_URL, "/api/other"),
        );

        let ctx = resolve_trigger(&page, control).unwrap();
        assert_eq!(ctx.url, "/api/postcodes");
        assert_eq!(ctx.code_input, Some(code));
        assert!(ctx.name_display.is_some());
        assert!(ctx.hidden_input.is_some());
        assert_eq!(ctx.reference_key, "NL");
    }

    #[test]
    fn test_falls_back_to_code_input_url_and_ref() {
        let mut page = Page::new();
        let (control, _) = reference_group(
            &mut page,
            Element::open_control(""),
            Element::text_input("postcode_code")
                .with_attr(ATTR_LOOKUP_URL, "/api/postcodes")
                .with_attr(ATTR_REF_CODE, "BE"),
        );

        let ctx = resolve_trigger(&page, control).unwrap();
        assert_eq!(ctx.url, "/api/postcodes");
        assert_eq!(ctx.reference_key, "BE");
    }

    #[test]
    fn test_no_url_is_ignored() {
        let mut page = Page::new();
        let (control, _) = reference_group(
            &mut page,
            Element::open_control(""),
            Element::text_input("postcode_code"),
        );

        assert!(resolve_trigger(&page, control).is_none());
    }

    #[test]
    fn test_control_outside_group_is_ignored() {
        let mut page = Page::new();
        let control = page.insert(Element::open_control("/api/postcodes"));
        assert!(resolve_trigger(&page, control).is_none());
    }

    #[test]
    fn test_non_control_is_ignored() {
        let mut page = Page::new();
        let (_, code) = reference_group(
            &mut page,
            Element::open_control("/api/postcodes"),
            Element::text_input("postcode_code").with_attr(ATTR_LOOKUP_URL, "/api/postcodes"),
        );
        assert!(resolve_trigger(&page, code).is_none());
    }

    #[test]
    fn test_missing_optional_elements_tolerated() {
        let mut page = Page::new();
        let group = page.add_group();
        let control = page.insert_into(group, Element::open_control("/api/postcodes"));

        let ctx = resolve_trigger(&page, control).unwrap();
        assert_eq!(ctx.code_input, None);
        assert_eq!(ctx.name_display, None);
        assert_eq!(ctx.hidden_input, None);
        assert_eq!(ctx.reference_key, "");
    }
}
