use std::sync::Arc;

use async_trait::async_trait;
use carepage::model::{NoteStatus, RowRequest, StoolSheet};
use carepage::source::{ActionReply, MessageReply};
use carepage::widgets::FormFields;
use carepage::{ContentSource, SourceError, lock_document};
use carepage_cli::{CliError, Command, Harness, PageFile, PageKind, parse_script};
use chrono::NaiveDate;
use pagedom::Display;
use serde_json::Value;

const ADMISSION: &str = include_str!("../demos/admission.json");
const ADMISSION_SCRIPT: &str = include_str!("../demos/admission.script");

struct PdfOnly;

fn offline() -> SourceError {
    SourceError::Transport("offline".into())
}

#[async_trait]
impl ContentSource for PdfOnly {
    async fn impression(&self) -> Result<String, SourceError> {
        Err(offline())
    }
    async fn stool_sheet(&self) -> Result<String, SourceError> {
        Err(offline())
    }
    async fn save_stool_sheet(&self, _: &StoolSheet) -> Result<MessageReply, SourceError> {
        Err(offline())
    }
    async fn row_detail(&self, _: &RowRequest) -> Result<String, SourceError> {
        Err(offline())
    }
    async fn row_detail_alt(&self, _: &RowRequest) -> Result<String, SourceError> {
        Err(offline())
    }
    async fn row_pdf(&self, _: &RowRequest) -> Result<Vec<u8>, SourceError> {
        Ok(b"%PDF".to_vec())
    }
    async fn update_status(&self, _: &NoteStatus) -> Result<Value, SourceError> {
        Err(offline())
    }
    async fn add_resident(&self, _: &FormFields) -> Result<ActionReply, SourceError> {
        Err(offline())
    }
    async fn delete_resident(&self, _: &FormFields) -> Result<ActionReply, SourceError> {
        Err(offline())
    }
    async fn stool_chart(&self, _: &str) -> Result<Value, SourceError> {
        Err(offline())
    }
}

fn any_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
}

fn admission() -> Harness {
    Harness::new(PageFile::from_json(ADMISSION).unwrap(), any_day()).unwrap()
}

#[test]
fn test_page_file_builds_tree() {
    let page = PageFile::from_json(ADMISSION).unwrap();
    assert_eq!(page.kind, PageKind::ResidentFile);
    assert_eq!(page.config.resident.nom_resident, "Jeanne Dupont");

    let root = page.root.into_element();
    assert_eq!(root.id, "root");
    assert_eq!(root.tag, "div");
}

#[test]
fn test_page_file_rejects_garbage() {
    assert!(matches!(
        PageFile::from_json("{\"kind\": \"spaceship\", \"root\": {}}"),
        Err(CliError::PageFile(_))
    ));
}

#[test]
fn test_invalid_today() {
    let mut page = PageFile::from_json(ADMISSION).unwrap();
    page.today = Some("demain".into());
    assert!(matches!(
        Harness::new(page, any_day()),
        Err(CliError::InvalidDate(_))
    ));
}

#[tokio::test]
async fn test_admission_script() {
    let harness = admission();
    let mut outputs = Vec::new();
    for command in parse_script(ADMISSION_SCRIPT).unwrap() {
        if let Some(output) = harness.run(&command).await.unwrap() {
            outputs.push(output);
        }
    }

    assert!(outputs[0].starts_with("popupForm: display=\"flex\""));
    assert!(outputs[1].starts_with("patientList: display=\"block\""));
    assert!(outputs[2].starts_with("item-martin: display=\"none\""));
    assert_eq!(outputs[3], "nomPatientInput: display=\"\" value=\"Durand\" text=\"\"");
    assert_eq!(outputs[4], "nomPatientHidden: display=\"\" value=\"42\" text=\"\"");
    assert!(outputs[5].starts_with("patientList: display=\"block\""));
    assert!(outputs[6].starts_with("patientList: display=\"none\""));
    assert!(outputs[7].starts_with("row-past: display=\"none\""));
    assert!(outputs[8].starts_with("row-past: display=\"\""));

    let doc = lock_document(harness.document());
    assert_eq!(doc.text_content("naissance").as_deref(), Some("09/03/1941"));
    assert!(doc.has_class("row-past", "past-row"));
}

#[tokio::test]
async fn test_show_missing_element() {
    let harness = admission();
    let output = harness.run(&Command::Show("nope".into())).await.unwrap();
    assert_eq!(output.as_deref(), Some("nope: <missing>"));
}

#[tokio::test]
async fn test_async_commands_need_backend() {
    let harness = admission();
    let err = harness.run(&Command::OpenImpression).await.unwrap_err();
    assert!(matches!(err, CliError::NoBackend("open-impression")));
}

#[tokio::test]
async fn test_open_row_with_backend() {
    let harness = admission().with_source(Arc::new(PdfOnly));

    let output = harness
        .run(&Command::OpenRow("row-next-pdf".into()))
        .await
        .unwrap();
    assert_eq!(output.as_deref(), Some("open-row row-next-pdf: Applied"));
    {
        let doc = lock_document(harness.document());
        assert_eq!(doc.display("impressionPopupDF"), Some(Display::Flex));
        assert_eq!(
            doc.attr("pdfIframe", "src").as_deref(),
            Some("data:application/pdf;base64,JVBERg==")
        );
    }

    let err = harness
        .run(&Command::OpenRow("openPopupBtn".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::NotARowButton(_)));
}

#[tokio::test]
async fn test_command_not_available_on_page() {
    let harness = admission().with_source(Arc::new(PdfOnly));
    let err = harness.run(&Command::SubmitStool).await.unwrap_err();
    assert!(matches!(
        err,
        CliError::Unsupported {
            command: "submit-stool",
            kind: "resident_file"
        }
    ));
}

#[tokio::test]
async fn test_plain_page_with_select() {
    let page = PageFile::from_json(
        r#"{
            "selects": [{"input": "in", "list": "list", "item_class": "opt", "hidden": "key"}],
            "root": {"id": "root", "children": [
                {"tag": "input", "id": "in", "value": ""},
                {"tag": "ul", "id": "list", "display": "none", "children": [
                    {"tag": "li", "id": "a", "class": ["opt"], "text": "Alpha", "data": {"pk": "1"}},
                    {"tag": "li", "id": "b", "class": ["opt"], "text": "Beta"}
                ]},
                {"tag": "input", "id": "key", "value": "old"}
            ]}
        }"#,
    )
    .unwrap();
    let harness = Harness::new(page, any_day()).unwrap();
    assert_eq!(harness.selects().len(), 1);

    for command in parse_script("focus in\ntype in be\nclick b\n").unwrap() {
        harness.run(&command).await.unwrap();
    }
    let doc = lock_document(harness.document());
    assert_eq!(doc.display("a"), Some(Display::None));
    assert_eq!(doc.value("in").as_deref(), Some("Beta"));
    assert_eq!(doc.value("key").as_deref(), Some(""));
}
