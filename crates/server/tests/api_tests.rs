use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;

use relay_core::{RenderFormat, RenderedPayload, WebhookBinding};
use relay_provider::{DeliveryError, DynDelivery};
use relay_server::binder::{BindReport, RouteBinder};
use relay_slack::{SlackConfig, SlackWebhookClient};

const BASE_URL: &str = "https://glpi.example.com/front/ticket.form.php?id=";

// -- Recording delivery ---------------------------------------------------

#[derive(Default)]
struct RecordingDelivery {
    sent: Mutex<Vec<(RenderedPayload, String)>>,
    fail_with: Option<DeliveryError>,
}

impl RecordingDelivery {
    fn failing(err: DeliveryError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    fn sent(&self) -> Vec<(RenderedPayload, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DynDelivery for RecordingDelivery {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "recording"
    }

    async fn deliver(
        &self,
        payload: &RenderedPayload,
        destination: &str,
    ) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((payload.clone(), destination.to_owned()));
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

// -- Helpers --------------------------------------------------------------

fn build_app(
    delivery: Arc<dyn DynDelivery>,
    bindings: &[WebhookBinding],
) -> (Router, BindReport) {
    let binder = RouteBinder::new(delivery, BASE_URL);
    relay_server::api::router(&binder, bindings)
}

async fn post(app: &Router, uri: &str, body: impl Into<Body>) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(http::Method::POST)
                .uri(uri)
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get_status(app: &Router, uri: &str) -> StatusCode {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

fn ticket_event() -> String {
    serde_json::json!({
        "event": "new",
        "item": {
            "id": 7,
            "name": "Printer jam",
            "content": "<p>Paper stuck</p>",
            "priority": 4,
            "status": {"name": "New"}
        }
    })
    .to_string()
}

// -- Tests ----------------------------------------------------------------

#[tokio::test]
async fn health_returns_online() {
    let (app, _) = build_app(Arc::new(RecordingDelivery::default()), &[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({"status": "online"}));
}

#[tokio::test]
async fn new_ticket_is_relayed_as_blocks() {
    let delivery = Arc::new(RecordingDelivery::default());
    let bindings = [WebhookBinding::new(
        "support",
        "/support",
        "https://hooks.slack.com/services/T/B/SUPPORT",
    )];
    let (app, _) = build_app(delivery.clone(), &bindings);

    let (status, json) = post(&app, "/support", ticket_event()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"description_text": "Paper stuck"}));

    let sent = delivery.sent();
    assert_eq!(sent.len(), 1);
    let (payload, destination) = &sent[0];
    assert_eq!(destination, "https://hooks.slack.com/services/T/B/SUPPORT");

    let wire = serde_json::to_string(payload).unwrap();
    assert!(wire.contains("New ticket"));
    assert!(wire.contains("#7"));
    assert!(wire.contains("🟠 High"));
    assert!(wire.contains("🟢 New"));
    assert!(wire.contains("Paper stuck"));
}

#[tokio::test]
async fn each_route_delivers_to_its_own_destination() {
    let delivery = Arc::new(RecordingDelivery::default());
    let bindings = [
        WebhookBinding::new("a", "/a", "https://hooks.slack.com/services/A"),
        WebhookBinding::new("b", "/b", "https://hooks.slack.com/services/B"),
    ];
    let (app, _) = build_app(delivery.clone(), &bindings);

    assert_eq!(post(&app, "/b", ticket_event()).await.0, StatusCode::OK);
    assert_eq!(post(&app, "/a", ticket_event()).await.0, StatusCode::OK);
    assert_eq!(post(&app, "/b", ticket_event()).await.0, StatusCode::OK);

    let destinations: Vec<_> = delivery.sent().into_iter().map(|(_, d)| d).collect();
    assert_eq!(
        destinations,
        vec![
            "https://hooks.slack.com/services/B",
            "https://hooks.slack.com/services/A",
            "https://hooks.slack.com/services/B",
        ]
    );
}

#[tokio::test]
async fn invalid_binding_is_skipped_and_others_served() {
    let delivery = Arc::new(RecordingDelivery::default());
    let bindings = [
        WebhookBinding::new("broken", "broken", "https://hooks.slack.com/services/X"),
        WebhookBinding::new("good", "/good", "https://hooks.slack.com/services/G"),
    ];
    let (app, report) = build_app(delivery.clone(), &bindings);

    assert_eq!(report.registered.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "broken");

    assert_eq!(post(&app, "/broken", ticket_event()).await.0, StatusCode::NOT_FOUND);
    assert_eq!(post(&app, "/good", ticket_event()).await.0, StatusCode::OK);
    assert_eq!(delivery.sent().len(), 1);
}

#[tokio::test]
async fn rejected_delivery_returns_generic_error() {
    let delivery = Arc::new(RecordingDelivery::failing(DeliveryError::Rejected {
        status: 503,
    }));
    let bindings = [WebhookBinding::new(
        "support",
        "/support",
        "https://hooks.slack.com/services/T/B/SECRET",
    )];
    let (app, _) = build_app(delivery, &bindings);

    let (status, json) = post(&app, "/support", ticket_event()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({"detail": "Error sending to Slack"}));
    let raw = json.to_string();
    assert!(!raw.contains("503"));
    assert!(!raw.contains("SECRET"));
}

#[tokio::test]
async fn missing_destination_reports_not_configured() {
    let delivery = Arc::new(RecordingDelivery::failing(
        DeliveryError::ConfigurationMissing,
    ));
    let bindings = [WebhookBinding::new(
        "support",
        "/support",
        "https://hooks.slack.com/services/T/B/X",
    )];
    let (app, _) = build_app(delivery, &bindings);

    let (status, json) = post(&app, "/support", ticket_event()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        serde_json::json!({"detail": "Slack webhook not configured."})
    );
}

#[tokio::test]
async fn malformed_json_is_not_delivered() {
    let delivery = Arc::new(RecordingDelivery::default());
    let bindings = [WebhookBinding::new(
        "support",
        "/support",
        "https://hooks.slack.com/services/T/B/X",
    )];
    let (app, _) = build_app(delivery.clone(), &bindings);

    for body in ["not json", "[1, 2]", ""] {
        let (status, json) = post(&app, "/support", body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body {body:?}");
        assert_eq!(json, serde_json::json!({"detail": "Internal server error"}));
    }
    assert!(delivery.sent().is_empty());
}

#[tokio::test]
async fn text_binding_prefixes_ticket_id() {
    let delivery = Arc::new(RecordingDelivery::default());
    let bindings = [WebhookBinding::new(
        "plain",
        "/plain",
        "https://hooks.slack.com/services/T/B/X",
    )
    .with_format(RenderFormat::Text)];
    let (app, _) = build_app(delivery.clone(), &bindings);

    let (status, json) = post(
        &app,
        "/plain",
        "<h1>Ticket #482</h1><p>Printer jam</p>",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({"description_text": "Ticket #482 Printer jam"})
    );
    assert_eq!(
        delivery.sent()[0].0,
        RenderedPayload::text("Ticket ID: 482\nTicket #482 Printer jam")
    );
}

#[tokio::test]
async fn webhook_routes_only_accept_post() {
    let bindings = [WebhookBinding::new(
        "support",
        "/support",
        "https://hooks.slack.com/services/T/B/X",
    )];
    let (app, _) = build_app(Arc::new(RecordingDelivery::default()), &bindings);

    assert_eq!(
        get_status(&app, "/support").await,
        StatusCode::METHOD_NOT_ALLOWED
    );
    assert_eq!(get_status(&app, "/unknown").await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn zero_bindings_still_serve_health() {
    let bindings = [WebhookBinding::new("no_url", "/x", "")];
    let (app, report) = build_app(Arc::new(RecordingDelivery::default()), &bindings);

    assert!(report.registered.is_empty());
    assert_eq!(get_status(&app, "/health").await, StatusCode::OK);
    assert_eq!(post(&app, "/x", "{}").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_utf8_is_decoded_lossily() {
    let delivery = Arc::new(RecordingDelivery::default());
    let bindings = [WebhookBinding::new(
        "plain",
        "/plain",
        "https://hooks.slack.com/services/T/B/X",
    )
    .with_format(RenderFormat::Text)];
    let (app, _) = build_app(delivery.clone(), &bindings);

    let (status, json) = post(&app, "/plain", b"caf\xff ok".to_vec()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["description_text"], "caf\u{FFFD} ok");
}

#[tokio::test]
async fn slack_rejection_through_real_client() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let hook = format!("http://127.0.0.1:{port}/services/T/B/TOKEN");

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let mut read = 0;
        // Read until the JSON body has arrived.
        loop {
            let n = stream.read(&mut buf[read..]).await.unwrap();
            read += n;
            let seen = String::from_utf8_lossy(&buf[..read]);
            if n == 0 || seen.contains("\r\n\r\n") && seen.trim_end().ends_with('}') {
                break;
            }
        }
        let body = "service unavailable";
        let response = format!(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });

    let client = SlackWebhookClient::new(SlackConfig::default().with_timeout_secs(5)).unwrap();
    let bindings = [WebhookBinding::new("support", "/support", hook)];
    let (app, _) = build_app(Arc::new(client), &bindings);

    let (status, json) = post(&app, "/support", ticket_event()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({"detail": "Error sending to Slack"}));
    assert!(!json.to_string().contains("service unavailable"));

    server.await.unwrap();
}
