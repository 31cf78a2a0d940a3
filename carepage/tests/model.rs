use carepage::PageError;
use carepage::model::note::{DONE_COLOR, PENDING_BADGE_COLOR, PENDING_TEXT_COLOR};
use carepage::model::{
    NoteStatus, ResidentSummary, RowRequest, TimeSlot, collect_stool_sheet, restyle_note,
    slot_select_id,
};
use pagedom::{Document, Element};
use serde_json::json;

fn resident() -> ResidentSummary {
    ResidentSummary {
        nom_resident: "Jeanne Dupont".to_string(),
        oxygen: "Oui".to_string(),
        diabete: "Non".to_string(),
    }
}

#[test]
fn test_row_request_merges_resident() {
    let request = RowRequest::parse(
        r#"{"Date": "2024-06-20", "Rendez-vous": "Dentiste", "oxygen": "?"}"#,
        &resident(),
    )
    .unwrap();

    assert_eq!(request.get("Rendez-vous"), Some(&json!("Dentiste")));
    assert_eq!(request.get("nom_resident"), Some(&json!("Jeanne Dupont")));
    assert_eq!(request.get("oxygen"), Some(&json!("Oui")));
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "Date": "2024-06-20",
            "Rendez-vous": "Dentiste",
            "nom_resident": "Jeanne Dupont",
            "oxygen": "Oui",
            "diabete": "Non",
        })
    );
}

#[test]
fn test_row_request_rejects_invalid_json() {
    let err = RowRequest::parse("{not json", &resident()).unwrap_err();
    assert!(matches!(err, PageError::InvalidRowData(_)));
    assert_eq!(
        err.user_message(),
        "Erreur lors de l'ouverture de la fiche : données invalides."
    );

    assert!(RowRequest::parse("[1, 2]", &resident()).is_err());
}

#[test]
fn test_slot_select_id_replaces_spaces() {
    assert_eq!(slot_select_id("12", TimeSlot::Nuit), "12-nuit-select");
    assert_eq!(
        slot_select_id("a b c", TimeSlot::ApresMidi),
        "a_b_c-apres_midi-select"
    );
}

fn stool_row(nom: &str, pk: &str, values: [&str; 3], comment: Option<&str>) -> Element {
    let mut row = Element::new("tr").child(Element::new("td").text(format!(" {nom} ")));
    for (slot, value) in TimeSlot::ALL.into_iter().zip(values) {
        row = row.child(
            Element::new("td").child(
                Element::new("select")
                    .id(slot_select_id(pk, slot))
                    .value(value),
            ),
        );
    }
    if let Some(comment) = comment {
        row = row.child(
            Element::new("td").child(Element::input(comment).attr("type", "text")),
        );
    }
    row.child(Element::new("td").text(pk))
}

#[test]
fn test_collect_stool_sheet() {
    let doc = Document::new(
        Element::div().id("root").child(
            Element::div().id("sellesPopupContent").child(
                Element::new("table")
                    .child(
                        Element::new("thead")
                            .child(Element::new("tr").child(Element::new("th").text("Nom"))),
                    )
                    .child(
                        Element::new("tbody")
                            .child(stool_row("Dupont", "7", ["", "1", "2"], Some("RAS")))
                            .child(stool_row("Martin", "13", ["3", "", ""], None)),
                    ),
            ),
        ),
    );

    let sheet = collect_stool_sheet(&doc, "sellesPopupContent");
    assert_eq!(sheet.len(), 2);

    let dupont = &sheet["Dupont"];
    assert_eq!(dupont.pk, "7");
    assert_eq!(dupont.slot(TimeSlot::Matin), "1");
    assert_eq!(dupont.apres_midi, "2");
    assert_eq!(dupont.commentaire, "RAS");

    let martin = &sheet["Martin"];
    assert_eq!(martin.nuit, "3");
    assert_eq!(martin.commentaire, "");

    let body = serde_json::to_value(&sheet).unwrap();
    assert_eq!(
        body["Martin"],
        json!({"pk": "13", "nuit": "3", "matin": "", "apres_midi": "", "commentaire": ""})
    );
}

#[test]
fn test_collect_stool_sheet_missing_content() {
    let doc = Document::new(Element::div().id("root"));
    assert!(collect_stool_sheet(&doc, "sellesPopupContent").is_empty());
}

fn note(checked: bool) -> Document {
    Document::new(
        Element::div().id("root").child(
            Element::ul().child(
                Element::li("")
                    .id("note")
                    .child(Element::span("08:00").id("badge"))
                    .child(Element::span("Prise de sang").id("text").class("note-text"))
                    .child(Element::checkbox(checked).id("check").data("id", "99")),
            ),
        ),
    )
}

#[test]
fn test_restyle_checked_note() {
    let mut doc = note(true);
    let status = restyle_note(&mut doc, "check").unwrap();

    assert_eq!(status, NoteStatus { id: "99".to_string(), status: 0 });
    assert_eq!(doc.style("text", "color").as_deref(), Some(DONE_COLOR));
    assert_eq!(doc.style("badge", "background").as_deref(), Some(DONE_COLOR));
}

#[test]
fn test_restyle_unchecked_note() {
    let mut doc = note(false);
    let status = restyle_note(&mut doc, "check").unwrap();

    assert_eq!(status.status, 1);
    assert_eq!(doc.style("text", "color").as_deref(), Some(PENDING_TEXT_COLOR));
    assert_eq!(
        doc.style("badge", "background").as_deref(),
        Some(PENDING_BADGE_COLOR)
    );
    assert_eq!(
        serde_json::to_value(&status).unwrap(),
        json!({"id": "99", "status": 1})
    );
}

#[test]
fn test_restyle_skips_span_that_is_not_a_first_child() {
    let mut doc = Document::new(
        Element::div().id("root").child(
            Element::li("")
                .id("note")
                .child(Element::checkbox(true).id("check").data("id", "7"))
                .child(Element::span("Toilette").id("text").class("note-text"))
                .child(
                    Element::div()
                        .id("hour")
                        .child(Element::span("09:30").id("badge")),
                ),
        ),
    );
    restyle_note(&mut doc, "check").unwrap();

    assert_eq!(doc.style("text", "background"), None);
    assert_eq!(doc.style("badge", "background").as_deref(), Some(DONE_COLOR));
}

#[test]
fn test_restyle_missing_checkbox() {
    let mut doc = note(true);
    assert!(restyle_note(&mut doc, "nope").is_none());
}
