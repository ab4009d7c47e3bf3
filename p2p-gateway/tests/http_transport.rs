//! Integration tests for the live gateway client.
//!
//! Each test starts a stub gateway on an ephemeral local port and drives
//! `GatewayClient` against it over real HTTP.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use p2p_gateway::{GatewayClient, GatewayConfig};
use p2p_types::{CancellationToken, ErrorCode, ErrorKind, TransferGateway, TransferRequest};
use rust_decimal_macros::dec;
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Stub {
    calls: Arc<AtomicUsize>,
}

/// Serves `router` on 127.0.0.1 and returns its base URL.
async fn spawn_gateway(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(base_url: &str) -> GatewayConfig {
    GatewayConfig {
        api_key: Some("test-key".into()),
        timeout: Duration::from_millis(500),
        retry_delay: Duration::from_millis(10),
        ..GatewayConfig::default().with_base_url(base_url)
    }
}

fn request() -> TransferRequest {
    TransferRequest::new("RSSMRA85M01H501Z", "VRDRBT90A41F205X", dec!(150.50))
        .with_description(Some("Rimborso cena".into()))
        .with_reference_id(Some("TXN_001".into()))
}

fn success_body(req: &Value) -> Value {
    json!({
        "status": "success",
        "transaction_id": "TXN_BA_20250610_123456789",
        "timestamp": "2025-06-10T12:00:00Z",
        "amount": req["amount"],
        "currency": req["currency"],
        "sender": {"tax_id": req["sender_tax_id"], "account_iban": "IT60X0542811101000000123456"},
        "recipient": {"tax_id": req["recipient_tax_id"], "account_iban": "IT60X0542811101000000654321"},
        "fees": {"amount": 0.0, "currency": "EUR"},
        "execution_date": "2025-06-10T12:00:00Z",
        "reference_id": req["reference_id"]
    })
}

async fn echo_success(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(req): Json<Value>,
) -> impl IntoResponse {
    stub.calls.fetch_add(1, Ordering::SeqCst);
    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some("test-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
    }
    Json(success_body(&req)).into_response()
}

#[tokio::test]
async fn test_success_over_http() {
    let stub = Stub::default();
    let router = Router::new()
        .route("/v1/payments/p2p-transfer", post(echo_success))
        .with_state(stub.clone());
    let base = spawn_gateway(router).await;

    let client = GatewayClient::from_config(&config(&base)).unwrap();
    let outcome = client.submit(&request(), &CancellationToken::new()).await;

    let receipt = outcome.receipt().expect("success");
    assert_eq!(receipt.transaction_id, "TXN_BA_20250610_123456789");
    assert_eq!(receipt.amount, dec!(150.50));
    assert_eq!(receipt.reference_id.as_deref(), Some("TXN_001"));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_business_error_over_http() {
    let stub = Stub::default();
    let router = Router::new()
        .route(
            "/v1/payments/p2p-transfer",
            post(|State(stub): State<Stub>| async move {
                stub.calls.fetch_add(1, Ordering::SeqCst);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({
                        "status": "error",
                        "error_code": "INSUFFICIENT_FUNDS",
                        "error_message": "Saldo insufficiente",
                        "timestamp": "2025-06-10T12:00:00Z",
                        "reference_id": "TXN_001",
                        "details": {"available_balance": 100.0}
                    })),
                )
            }),
        )
        .with_state(stub.clone());
    let base = spawn_gateway(router).await;

    let client = GatewayClient::from_config(&config(&base)).unwrap();
    let outcome = client.submit(&request(), &CancellationToken::new()).await;

    let failure = outcome.failure().expect("failure");
    assert_eq!(failure.kind, ErrorKind::BusinessLogic);
    assert_eq!(failure.code, ErrorCode::InsufficientFunds);
    assert_eq!(failure.message, "Saldo insufficiente");
    assert_eq!(failure.details.as_ref().unwrap()["available_balance"], 100.0);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let stub = Stub::default();
    let router = Router::new()
        .route(
            "/v1/payments/p2p-transfer",
            post(|State(stub): State<Stub>, Json(req): Json<Value>| async move {
                let n = stub.calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error_code": "SYSTEM_ERROR"})))
                } else {
                    (StatusCode::OK, Json(success_body(&req)))
                }
            }),
        )
        .with_state(stub.clone());
    let base = spawn_gateway(router).await;

    let client = GatewayClient::from_config(&config(&base)).unwrap();
    let outcome = client.submit(&request(), &CancellationToken::new()).await;

    assert!(outcome.is_success());
    assert_eq!(stub.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_slow_gateway_times_out() {
    let router = Router::new().route(
        "/v1/payments/p2p-transfer",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            StatusCode::OK
        }),
    );
    let base = spawn_gateway(router).await;

    let config = GatewayConfig {
        timeout: Duration::from_millis(100),
        enable_retry: false,
        ..config(&base)
    };
    let client = GatewayClient::from_config(&config).unwrap();
    let outcome = client.submit(&request(), &CancellationToken::new()).await;

    let failure = outcome.failure().expect("failure");
    assert_eq!(failure.code, ErrorCode::TimeoutError);
    assert!(failure.transient);
}

#[tokio::test]
async fn test_unreachable_gateway_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = GatewayConfig {
        enable_retry: false,
        ..config(&format!("http://{}", addr))
    };
    let client = GatewayClient::from_config(&config).unwrap();
    let outcome = client.submit(&request(), &CancellationToken::new()).await;

    let failure = outcome.failure().expect("failure");
    assert_eq!(failure.code, ErrorCode::NetworkError);
    assert_eq!(failure.kind, ErrorKind::System);
}
