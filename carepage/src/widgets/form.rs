//! Form field collection, the way a browser builds `FormData`.

use pagedom::Document;

/// Name/value pairs in document order.
pub type FormFields = Vec<(String, String)>;

fn is_checkable(doc: &Document, id: &str) -> bool {
    matches!(
        doc.attr(id, "type").as_deref(),
        Some("checkbox") | Some("radio")
    )
}

/// Collect every named field under `form_id`.
///
/// Checkboxes and radios contribute only when checked, with their value or
/// `on`. Empty when the form is absent.
pub fn collect_fields(doc: &Document, form_id: &str) -> FormFields {
    doc.query(form_id, |el| el.attrs.contains_key("name"))
        .into_iter()
        .filter_map(|id| {
            let name = doc.attr(&id, "name")?;
            if is_checkable(doc, &id) {
                if !doc.is_checked(&id)? {
                    return None;
                }
                let value = doc
                    .get(&id)
                    .and_then(|el| el.value.clone())
                    .unwrap_or_else(|| "on".to_string());
                return Some((name, value));
            }
            Some((name, doc.value(&id)?))
        })
        .collect()
}

/// Restore every named field under `form_id` to its `default` attribute
/// (empty when none), and uncheck checkables that are not checked by default.
pub fn reset_fields(doc: &mut Document, form_id: &str) {
    for id in doc.query(form_id, |el| el.attrs.contains_key("name")) {
        if is_checkable(doc, &id) {
            let checked = doc.attr(&id, "checked").is_some();
            doc.set_checked(&id, checked);
        } else {
            let default = doc.attr(&id, "default").unwrap_or_default();
            doc.set_value(&id, default);
        }
    }
}
