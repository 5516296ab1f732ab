//! HTTP contract tests for rate and margin endpoints
//!
//! The database pool is lazy and never touched by these routes.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::{dec, rates, FakeProvider};
use perfumeria_backend::{
    config::{DatabaseConfig, RatesConfig, ServerConfig},
    create_app,
    services::RateCache,
    AppState, Config,
};
use serde_json::{json, Value};
use shared::{MarginQuote, RateTable};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        database: DatabaseConfig {
            url: "postgres://localhost/perfumeria_test".to_string(),
            max_connections: 1,
            min_connections: 0,
        },
        rates: RatesConfig {
            exchange_api_key: "test".to_string(),
            exchange_api_base_url: "http://localhost".to_string(),
            dolar_api_base_url: "http://localhost".to_string(),
            ttl_minutes: 30,
        },
    }
}

fn app(exchange: Arc<FakeProvider>, dolar: Arc<FakeProvider>) -> Router {
    let config = test_config();
    let db = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy(&config.database.url)
        .unwrap();
    let ttl = Duration::from_secs(30 * 60);
    create_app(AppState {
        db,
        config: Arc::new(config),
        exchange_rates: Arc::new(RateCache::new(exchange, ttl)),
        dolar_rates: Arc::new(RateCache::new(dolar, ttl)),
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn quote_body(margin: &str, supplies: Value) -> Value {
    json!({
        "inputs": {
            "supplier_id": null,
            "essence_price": "1000",
            "essence_currency": "ARS",
            "lot_grams": "100",
            "essence_grams_per_unit": "100",
            "margin_percent": margin,
            "wholesale_discount_percent": "10",
            "bottle_type": null
        },
        "supplies": supplies,
        "grid": "hundred"
    })
}

fn caja() -> Value {
    json!([{
        "id": null,
        "name": "Caja",
        "lot_price": "2000",
        "lot_quantity": "10",
        "quantity_per_unit": "1",
        "is_general": true,
        "supplier_id": null,
        "category": null
    }])
}

#[tokio::test]
async fn test_rates_endpoint_returns_table() {
    let exchange = Arc::new(FakeProvider::new(rates(&[("ARS", "1050"), ("USD", "1")])));
    let dolar = Arc::new(FakeProvider::new(rates(&[("USD_BLUE", "1200")])));

    let (status, body) = get(app(exchange.clone(), dolar), "/api/v1/rates").await;

    assert_eq!(status, StatusCode::OK);
    let table: RateTable = serde_json::from_value(body).unwrap();
    assert_eq!(table.get("ARS"), Some(&dec("1050")));
    assert_eq!(exchange.calls(), 1);
}

#[tokio::test]
async fn test_rates_endpoint_upstream_failure() {
    let exchange = Arc::new(FakeProvider::failing());
    let dolar = Arc::new(FakeProvider::failing());
    let router = app(exchange, dolar);

    let (status, body) = get(router.clone(), "/api/v1/rates").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "API error" }));

    let (status, body) = get(router, "/api/v1/rates/dolar").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "API error" }));
}

#[tokio::test]
async fn test_rates_are_cached_across_requests() {
    let exchange = Arc::new(FakeProvider::new(rates(&[("ARS", "1050")])));
    let dolar = Arc::new(FakeProvider::new(rates(&[("USD_BLUE", "1200")])));
    let router = app(exchange, dolar.clone());

    get(router.clone(), "/api/v1/rates/dolar").await;
    get(router.clone(), "/api/v1/rates/dolar").await;
    assert_eq!(dolar.calls(), 1);

    get(router, "/api/v1/rates/dolar?refresh=true").await;
    assert_eq!(dolar.calls(), 2);
}

#[tokio::test]
async fn test_rates_status_reports_cache() {
    let exchange = Arc::new(FakeProvider::new(rates(&[("ARS", "1050")])));
    let dolar = Arc::new(FakeProvider::new(rates(&[("USD_BLUE", "1200")])));
    let router = app(exchange, dolar.clone());

    get(router.clone(), "/api/v1/rates").await;
    let (status, body) = get(router, "/api/v1/rates/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["fresh"], json!(true));
    assert_eq!(body[0]["ttl_seconds"], json!(1800));
    assert_eq!(body[1]["fresh"], json!(false));
    assert_eq!(body[1]["rates"], Value::Null);
    // status never fetches
    assert_eq!(dolar.calls(), 0);
}

#[tokio::test]
async fn test_health_reports_rate_freshness() {
    let exchange = Arc::new(FakeProvider::new(rates(&[("ARS", "1050")])));
    let dolar = Arc::new(FakeProvider::new(rates(&[("USD_BLUE", "1200")])));
    let router = app(exchange, dolar.clone());

    get(router.clone(), "/api/v1/rates").await;
    let (status, body) = get(router, "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["environment"], json!("test"));
    assert_eq!(body["rates"][0]["fresh"], json!(true));
    assert_eq!(body["rates"][1]["fresh"], json!(false));
    assert_eq!(body["rates"][1]["age_seconds"], Value::Null);
    let expected = if body["database"] == json!("connected") {
        "healthy"
    } else {
        "degraded"
    };
    assert_eq!(body["status"], json!(expected));
    assert_eq!(dolar.calls(), 0);
}

#[tokio::test]
async fn test_margin_quote() {
    let exchange = Arc::new(FakeProvider::new(rates(&[("ARS", "1000")])));
    let dolar = Arc::new(FakeProvider::new(RateTable::new()));

    let (status, body) = post_json(
        app(exchange, dolar),
        "/api/v1/margin/quote",
        quote_body("40", caja()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let quote: MarginQuote = serde_json::from_value(body).unwrap();
    assert_eq!(quote.suggested_price, dec("2000"));
    assert_eq!(quote.wholesale_price, dec("1800"));
    assert_eq!(quote.suggested_price_usd, Some(dec("2")));
    assert_eq!(quote.display.wholesale_price, "$ 1.800,00");
}

#[tokio::test]
async fn test_margin_quote_without_rates_still_prices_pesos() {
    let exchange = Arc::new(FakeProvider::failing());
    let dolar = Arc::new(FakeProvider::failing());

    let (status, body) = post_json(
        app(exchange, dolar),
        "/api/v1/margin/quote",
        quote_body("40", caja()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let quote: MarginQuote = serde_json::from_value(body).unwrap();
    assert_eq!(quote.rounded_suggested_price, dec("2000"));
    assert!(quote.suggested_price_usd.is_none());
}

#[tokio::test]
async fn test_margin_quote_rejects_full_margin() {
    let exchange = Arc::new(FakeProvider::new(rates(&[("ARS", "1000")])));
    let dolar = Arc::new(FakeProvider::new(RateTable::new()));

    let (status, body) = post_json(
        app(exchange, dolar),
        "/api/v1/margin/quote",
        quote_body("100", caja()),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], json!("INVALID_CALCULATION"));
    assert_eq!(body["error"]["field"], json!("margin_percent"));
}

#[tokio::test]
async fn test_margin_quote_names_broken_supply() {
    let exchange = Arc::new(FakeProvider::new(rates(&[("ARS", "1000")])));
    let dolar = Arc::new(FakeProvider::new(RateTable::new()));
    let supplies = json!([{
        "id": null,
        "name": "Atomizador",
        "lot_price": "500",
        "lot_quantity": "0",
        "quantity_per_unit": "1",
        "is_general": true,
        "supplier_id": null,
        "category": null
    }]);

    let (status, body) = post_json(
        app(exchange, dolar),
        "/api/v1/margin/quote",
        quote_body("40", supplies),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = body["error"]["message_en"].as_str().unwrap();
    assert!(message.contains("Atomizador"));
}

#[tokio::test]
async fn test_margin_quote_out_of_range_amount() {
    let exchange = Arc::new(FakeProvider::new(rates(&[("ARS", "1000")])));
    let dolar = Arc::new(FakeProvider::new(RateTable::new()));
    let mut body = quote_body("40", caja());
    body["inputs"]["essence_currency"] = json!("USD");
    body["inputs"]["essence_price"] = json!("79228162514264337593543950");
    body["exchange_rate"] = json!("1200");

    let (status, body) = post_json(app(exchange, dolar), "/api/v1/margin/quote", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], json!("INVALID_CALCULATION"));
    assert_eq!(body["error"]["field"], json!("essence_price"));
}

#[tokio::test]
async fn test_margin_quote_rejects_empty_bottle_type() {
    let exchange = Arc::new(FakeProvider::new(rates(&[("ARS", "1000")])));
    let dolar = Arc::new(FakeProvider::new(RateTable::new()));
    let mut body = quote_body("40", caja());
    body["inputs"]["bottle_type"] = json!("");

    let (status, body) = post_json(app(exchange, dolar), "/api/v1/margin/quote", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
}
