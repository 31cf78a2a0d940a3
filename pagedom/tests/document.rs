use pagedom::{Display, Document, Element};

fn sample() -> Document {
    Document::new(
        Element::div().id("root").child(
            Element::ul()
                .id("list")
                .child(Element::li("Dupont").id("a").class("item").data("pk", "1"))
                .child(
                    Element::li("")
                        .id("b")
                        .class("item")
                        .child(Element::span("Du"))
                        .child(Element::span("rand")),
                )
                .child(Element::li("Other").id("c")),
        ),
    )
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_get_missing_returns_none() {
    let doc = sample();
    assert!(doc.get("nope").is_none());
    assert_eq!(doc.value("nope"), None);
    assert_eq!(doc.display("nope"), None);
}

#[test]
fn test_query_class_in_document_order() {
    let doc = sample();
    assert_eq!(doc.query_class("list", "item"), vec!["a", "b"]);
    assert!(doc.query_class("missing", "item").is_empty());
}

#[test]
fn test_query_excludes_scope() {
    let doc = sample();
    let ids = doc.query("list", |el| el.tag == "ul");
    assert!(ids.is_empty());
}

#[test]
fn test_children_ids() {
    let doc = sample();
    assert_eq!(doc.children_ids("list"), vec!["a", "b", "c"]);
    assert!(doc.children_ids("a").is_empty());
}

#[test]
fn test_closest_includes_self_and_walks_up() {
    let doc = sample();
    assert_eq!(doc.closest("a", |el| el.tag == "li"), Some("a".to_string()));
    assert_eq!(doc.closest("a", |el| el.tag == "ul"), Some("list".to_string()));
    assert_eq!(doc.closest("a", |el| el.tag == "table"), None);
}

#[test]
fn test_text_content_concatenates_descendants() {
    let doc = sample();
    assert_eq!(doc.text_content("b"), Some("Durand".to_string()));
}

// ============================================================================
// Mutation
// ============================================================================

#[test]
fn test_setters_report_missing_elements() {
    let mut doc = sample();
    assert!(!doc.set_display("nope", Display::None));
    assert!(!doc.set_value("nope", "x"));
    assert!(doc.set_display("list", Display::Block));
    assert_eq!(doc.display("list"), Some(Display::Block));
}

#[test]
fn test_markup_replaces_children() {
    let mut doc = sample();
    assert!(doc.set_markup("list", "<p>loaded</p>"));
    assert!(doc.get("a").is_none());
    assert_eq!(doc.text_content("list"), Some("<p>loaded</p>".to_string()));
}

#[test]
fn test_classes() {
    let mut doc = sample();
    doc.add_class("c", "past-row");
    doc.add_class("c", "past-row");
    assert_eq!(doc.get("c").map(|el| el.classes.len()), Some(1));
    doc.remove_class("c", "past-row");
    assert!(!doc.has_class("c", "past-row"));
}

#[test]
fn test_display_css_round_trip() {
    assert_eq!(Display::from_css("flex"), Display::Flex);
    assert_eq!(Display::from_css(""), Display::Unset);
    assert_eq!(Display::None.as_css(), "none");
}
