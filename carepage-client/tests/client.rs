//! Integration tests against a local stub of the care backend.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use carepage::model::{NoteStatus, ResidentSummary, RowRequest, StoolEntry, StoolSheet};
use carepage::{ContentSource, Endpoints, SourceError};
use carepage_client::{CareClient, ClientError};
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    query: Option<String>,
    requested_with: Option<String>,
    content_type: Option<String>,
    body: String,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

fn reply(status: StatusCode, content_type: &str, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .body(Full::new(body.into()))
        .unwrap()
}

async fn handle(req: Request<Incoming>, log: Log) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let requested_with = header("x-requested-with");
    let content_type = header("content-type");
    let body = req
        .into_body()
        .collect()
        .await
        .map(|b| b.to_bytes())
        .unwrap_or_default();
    let body = String::from_utf8_lossy(&body).into_owned();

    log.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query,
        requested_with,
        content_type,
        body: body.clone(),
    });

    let html = "text/html";
    let json = "application/json";
    let response = match (method.as_str(), path.as_str()) {
        ("GET", "/impression") => reply(StatusCode::OK, html, "<h2>Transmissions</h2>"),
        ("GET", "/enregistre_selles") => reply(StatusCode::OK, html, "<table></table>"),
        ("POST", "/enregistre_selles") => reply(
            StatusCode::OK,
            json,
            r#"{"status": "success", "message": "Données enregistrées"}"#,
        ),
        ("POST", "/popup_row") => reply(StatusCode::OK, html, format!("<pre>{body}</pre>")),
        ("POST", "/popup_row_pdf") => reply(StatusCode::OK, "application/pdf", &b"%PDF-1.4"[..]),
        ("POST", "/update_status") => reply(StatusCode::OK, json, r#"{"success": true}"#),
        ("POST", "/add_resident") => {
            reply(StatusCode::OK, json, r#"{"success": false, "error": "doublon"}"#)
        }
        ("GET", "/graphique_selles") => reply(StatusCode::OK, json, r#"{"data": [], "layout": {}}"#),
        ("POST", "/broken") => reply(StatusCode::OK, json, "pas du json"),
        ("GET", "/slow") => {
            tokio::time::sleep(Duration::from_millis(500)).await;
            reply(StatusCode::OK, html, "trop tard")
        }
        _ => reply(StatusCode::INTERNAL_SERVER_ERROR, html, "boom"),
    };
    Ok(response)
}

async fn start_stub() -> (SocketAddr, Log) {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    let server_log = log.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let log = server_log.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req| handle(req, log.clone()));
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    (addr, log)
}

fn client_for(addr: SocketAddr) -> CareClient {
    CareClient::builder()
        .base_url(format!("http://{addr}"))
        .build()
        .unwrap()
}

fn last(log: &Log) -> Recorded {
    log.lock().unwrap().last().cloned().unwrap()
}

#[test]
fn test_builder_rejects_invalid_url() {
    let err = CareClient::builder().base_url("pas une url").build().unwrap_err();
    assert!(matches!(err, ClientError::InvalidUrl(_)));

    let err = CareClient::builder().base_url("ftp://example.org").build().unwrap_err();
    assert!(matches!(err, ClientError::InvalidUrl(_)));
}

#[test]
fn test_retryable_errors() {
    assert!(ClientError::http(503, "").is_retryable());
    assert!(!ClientError::http(404, "").is_retryable());
    assert!(ClientError::Timeout(Duration::from_secs(1)).is_retryable());
    assert!(!ClientError::parse_with_body("bad", "x").is_retryable());
}

#[test]
fn test_conversion_to_source_error() {
    let source: SourceError = ClientError::http(500, "boom").into();
    assert_eq!(
        source,
        SourceError::Http {
            status: 500,
            message: "boom".to_string()
        }
    );

    let source: SourceError = ClientError::parse_with_body("expected value", "x").into();
    assert_eq!(source, SourceError::Decode("expected value".to_string()));

    let source: SourceError = ClientError::Timeout(Duration::from_millis(50)).into();
    assert!(matches!(source, SourceError::Transport(_)));
}

#[tokio::test]
async fn test_requests_carry_requested_with_header() {
    let (addr, log) = start_stub().await;
    let client = client_for(addr);

    let markup = client.impression().await.unwrap();
    assert_eq!(markup, "<h2>Transmissions</h2>");

    let request = last(&log);
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/impression");
    assert_eq!(request.requested_with.as_deref(), Some("XMLHttpRequest"));
}

#[tokio::test]
async fn test_row_detail_posts_json() {
    let (addr, log) = start_stub().await;
    let client = client_for(addr);
    let resident = ResidentSummary {
        nom_resident: "Jeanne Dupont".into(),
        oxygen: "Non".into(),
        diabete: "Oui".into(),
    };
    let row = RowRequest::parse(r#"{"Rendez-vous": "Dentiste"}"#, &resident).unwrap();

    let markup = client.row_detail(&row).await.unwrap();
    assert!(markup.starts_with("<pre>"));

    let request = last(&log);
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["nom_resident"], "Jeanne Dupont");
    assert_eq!(body["Rendez-vous"], "Dentiste");
}

#[tokio::test]
async fn test_row_pdf_returns_bytes() {
    let (addr, _log) = start_stub().await;
    let client = client_for(addr);
    let row = RowRequest::parse("{}", &ResidentSummary::default()).unwrap();

    assert_eq!(client.row_pdf(&row).await.unwrap(), b"%PDF-1.4".to_vec());
}

#[tokio::test]
async fn test_http_error_maps_to_http() {
    let (addr, _log) = start_stub().await;
    let client = client_for(addr);
    let row = RowRequest::parse("{}", &ResidentSummary::default()).unwrap();

    let err = client.row_detail_alt(&row).await.unwrap_err();
    assert_eq!(
        err,
        SourceError::Http {
            status: 500,
            message: "boom".to_string()
        }
    );
}

#[tokio::test]
async fn test_form_submission() {
    let (addr, log) = start_stub().await;
    let client = client_for(addr);
    let fields = vec![
        ("nom".to_string(), "Jeanne Dupont".to_string()),
        ("chambre".to_string(), "12".to_string()),
    ];

    let reply = client.add_resident(&fields).await.unwrap();
    assert!(!reply.success);
    assert_eq!(reply.error.as_deref(), Some("doublon"));

    let request = last(&log);
    assert_eq!(
        request.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.body, "nom=Jeanne+Dupont&chambre=12");
}

#[tokio::test]
async fn test_stool_sheet_round_trip() {
    let (addr, log) = start_stub().await;
    let client = client_for(addr);

    assert_eq!(client.stool_sheet().await.unwrap(), "<table></table>");

    let mut sheet = StoolSheet::new();
    sheet.insert(
        "Jeanne Dupont".to_string(),
        StoolEntry {
            pk: "7".into(),
            matin: "1".into(),
            ..Default::default()
        },
    );
    let reply = client.save_stool_sheet(&sheet).await.unwrap();
    assert_eq!(reply.message, "Données enregistrées");

    let body: Value = serde_json::from_str(&last(&log).body).unwrap();
    assert_eq!(body["Jeanne Dupont"]["matin"], "1");
    assert_eq!(body["Jeanne Dupont"]["apres_midi"], "");
}

#[tokio::test]
async fn test_update_status_and_chart() {
    let (addr, log) = start_stub().await;
    let client = client_for(addr);

    let reply = client
        .update_status(&NoteStatus::from_checked("5", true))
        .await
        .unwrap();
    assert_eq!(reply, json!({"success": true}));
    assert_eq!(last(&log).body, r#"{"id":"5","status":0}"#);

    let figure = client.stool_chart("a b").await.unwrap();
    assert_eq!(figure["layout"], json!({}));
    let request = last(&log);
    assert_eq!(request.path, "/graphique_selles");
    assert_eq!(request.query.as_deref(), Some("pk=a+b"));
}

#[tokio::test]
async fn test_unparseable_reply_is_a_parse_error() {
    let (addr, _log) = start_stub().await;
    let client = CareClient::builder()
        .base_url(format!("http://{addr}"))
        .endpoints(Endpoints {
            update_status: "/broken".to_string(),
            ..Default::default()
        })
        .build()
        .unwrap();

    let err = client
        .post_json::<_, Value>("/broken", &json!({}))
        .await
        .unwrap_err();
    match err {
        ClientError::Parse { body, .. } => assert_eq!(body.as_deref(), Some("pas du json")),
        other => panic!("expected parse error, got {other:?}"),
    }

    let err = client
        .update_status(&NoteStatus::from_checked("1", false))
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)));
}

#[tokio::test]
async fn test_timeout() {
    let (addr, _log) = start_stub().await;
    let client = CareClient::builder()
        .base_url(format!("http://{addr}"))
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = client.get_markup("/slow").await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout(d) if d == Duration::from_millis(50)));
}

#[tokio::test]
async fn test_base_path_prefix_is_kept() {
    let (addr, log) = start_stub().await;
    let client = CareClient::builder()
        .base_url(format!("http://{addr}/app/"))
        .build()
        .unwrap();

    let err = client.impression().await.unwrap_err();
    assert!(matches!(err, SourceError::Http { status: 500, .. }));
    assert_eq!(last(&log).path, "/app/impression");
}
