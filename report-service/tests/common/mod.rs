//! FILENAME: tests/common/mod.rs
//! Fake execution backend and fixtures for report-service integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value as JsonValue};
use report_service::{ExecuteRequest, ReportClient, ServiceConfig};

// ============================================================================
// FAKE BACKEND
// ============================================================================

/// An in-process execution service listening on a random local port.
///
/// Known report ids:
/// - `sales`: the sales fixture
/// - `echo`: one row per request parameter (`name`, `value`)
/// - `error` / `empty`: error and message sentinels
/// - `ragged`: a payload whose row is narrower than its columns
/// - `crash`: HTTP 500
/// - `slow`: the sales fixture after 300ms
pub struct FakeBackend {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/api/execute", post(execute))
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeBackend {
            base_url: format!("http://{}", addr),
            hits,
        }
    }

    pub fn config(&self) -> ServiceConfig {
        let mut config = ServiceConfig::new(&self.base_url);
        config.timeout_secs = 5;
        config
    }

    pub fn client(&self) -> ReportClient {
        ReportClient::new(&self.config()).unwrap()
    }

    /// Number of execution requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn execute(
    State(hits): State<Arc<AtomicUsize>>,
    Json(request): Json<ExecuteRequest>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    match request.report_id.as_str() {
        "sales" => Json(SalesFixture::payload()).into_response(),
        "echo" => {
            let rows: Vec<JsonValue> = request
                .params
                .iter()
                .map(|p| json!([p.name, p.value]))
                .collect();
            Json(json!({"columns": ["name", "value"], "rows": rows})).into_response()
        }
        "error" => Json(json!({"columns": ["Ошибка"], "rows": [["connection refused"]]})).into_response(),
        "empty" => Json(json!({"columns": ["Message"], "rows": []})).into_response(),
        "ragged" => Json(json!({"columns": ["a", "b"], "rows": [[1]]})).into_response(),
        "crash" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_millis(300)).await;
            Json(SalesFixture::payload()).into_response()
        }
        other => (StatusCode::NOT_FOUND, format!("unknown report {}", other)).into_response(),
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub struct SalesFixture;

impl SalesFixture {
    pub fn headers() -> Vec<&'static str> {
        vec!["Region", "Product", "Quarter", "Sales", "Quantity"]
    }

    pub fn data() -> Vec<(&'static str, &'static str, &'static str, f64, f64)> {
        vec![
            ("North", "Widget", "Q1", 10000.0, 100.0),
            ("North", "Widget", "Q2", 12000.0, 120.0),
            ("North", "Gadget", "Q1", 8000.0, 80.0),
            ("North", "Gadget", "Q2", 9000.0, 90.0),
            ("South", "Widget", "Q1", 15000.0, 150.0),
            ("South", "Widget", "Q2", 14000.0, 140.0),
            ("South", "Gadget", "Q1", 11000.0, 110.0),
            ("South", "Gadget", "Q2", 13000.0, 130.0),
            ("East", "Widget", "Q1", 9000.0, 90.0),
            ("East", "Widget", "Q2", 11000.0, 110.0),
            ("East", "Gadget", "Q1", 7000.0, 70.0),
            ("East", "Gadget", "Q2", 8500.0, 85.0),
        ]
    }

    pub fn payload() -> JsonValue {
        let rows: Vec<JsonValue> = Self::data()
            .into_iter()
            .map(|(region, product, quarter, sales, quantity)| {
                json!([region, product, quarter, sales, quantity])
            })
            .collect();
        json!({"columns": Self::headers(), "rows": rows})
    }

    /// Stored report configuration charting Sales by Quarter.
    pub fn report_config() -> &'static str {
        r#"{
            "params": [{"name": "year", "label": "Year", "type": "number", "default": 2024}],
            "columns": [{"field": "Sales", "headerName": "Sales (EUR)"}],
            "chart": {
                "type": "linear",
                "x_axis": {"field": "Quarter"},
                "y_axis": {"field": "Revenue, Units"},
                "body_fields": ["Sales", "Quantity"],
                "y_axis_label": "EUR"
            }
        }"#
    }
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

/// Assert that an optional number matches the expected value.
pub fn assert_value(actual: Option<f64>, expected: f64) {
    match actual {
        Some(n) => assert!(
            (n - expected).abs() < 0.001,
            "expected {} but got {}",
            expected, n
        ),
        None => panic!("expected {} but got no value", expected),
    }
}
