use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Months, Utc};
use diesel::RunQueryDsl;
use serde_json::{json, Value};
use sipledger_server::{api::app_router, build_state, config::Config};
use sipledger_storage_sqlite::{
    create_pool, get_connection, pricing::MutualFundPriceDB, schema::mutual_fund_prices,
};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    db_path: String,
    _dir: TempDir,
}

async fn build_test_app() -> TestApp {
    let dir = tempdir().unwrap();
    let mut config = Config::from_env().unwrap();
    config.db_path = dir.path().join("test.db").to_string_lossy().to_string();
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        db_path: config.db_path.clone(),
        _dir: dir,
    }
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn insert_price(db_path: &str, symbol: &str, price: &str) {
    let pool = create_pool(db_path).unwrap();
    let mut conn = get_connection(&pool).unwrap();
    diesel::insert_into(mutual_fund_prices::table)
        .values(&MutualFundPriceDB {
            trading_symbol: symbol.to_string(),
            name: "Parag Parikh Flexi Cap Fund".to_string(),
            amc: "PPFAS Mutual Fund".to_string(),
            scheme_type: "Equity".to_string(),
            plan: "Direct".to_string(),
            minimum_purchase_amount: Some("1000".to_string()),
            last_price: price.to_string(),
            last_price_date: Utc::now().date_naive().to_string(),
        })
        .execute(&mut conn)
        .unwrap();
}

/// A SIP whose first run is already in the past, so it is due now.
fn overdue_sip(symbol: &str) -> Value {
    let start = Utc::now().date_naive() - Months::new(2);
    json!({
        "userId": "user-1",
        "tradingSymbol": symbol,
        "schemeName": "Parag Parikh Flexi Cap Fund",
        "amount": "5000",
        "frequency": "monthly",
        "startDate": start.to_string(),
    })
}

#[tokio::test]
async fn healthz_works() {
    let app = build_test_app().await;
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/v1/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn create_then_list_and_fetch_sip() {
    let app = build_test_app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/sips",
        Some(json!({
            "userId": "user-1",
            "tradingSymbol": "INF879O01027",
            "schemeName": "Parag Parikh Flexi Cap Fund",
            "amount": "2500",
            "frequency": "quarterly",
            "startDate": "2024-01-31",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["nextExecutionDate"], "2024-04-30");
    assert_eq!(created["active"], true);

    let (status, listed) = send(&app, Method::GET, "/api/v1/sips?userId=user-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/sips/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["schemeName"], "Parag Parikh Flexi Cap Fund");
}

#[tokio::test]
async fn invalid_and_unknown_requests_map_to_client_errors() {
    let app = build_test_app().await;

    let mut body = overdue_sip("INF879O01027");
    body["amount"] = json!("0");
    let (status, error) = send(&app, Method::POST, "/api/v1/sips", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], 400);

    let (status, error) = send(&app, Method::GET, "/api/v1/sips/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], 404);
}

#[tokio::test]
async fn execute_reports_failure_for_unpriced_scheme() {
    let app = build_test_app().await;
    send(&app, Method::POST, "/api/v1/sips", Some(overdue_sip("INF000NOPRICE"))).await;

    let (status, report) = send(&app, Method::POST, "/api/v1/sips/execute", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["executed"], 0);
    assert_eq!(report["failed"], 1);
    assert_eq!(report["details"][0]["status"], "failed");

    let (_, history) = send(&app, Method::GET, "/api/v1/sips/executions?userId=user-1", None).await;
    assert_eq!(history[0]["status"], "failed");

    let (_, holdings) = send(&app, Method::GET, "/api/v1/holdings?userId=user-1", None).await;
    assert!(holdings.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn execute_buys_units_and_opens_holding() {
    let app = build_test_app().await;
    insert_price(&app.db_path, "INF879O01027", "80");
    let (_, sip) = send(&app, Method::POST, "/api/v1/sips", Some(overdue_sip("INF879O01027"))).await;

    let (status, report) = send(&app, Method::POST, "/api/v1/sips/execute", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["executed"], 1);
    assert_eq!(report["details"][0]["execution"]["units"], "62.5");
    assert_eq!(report["details"][0]["execution"]["nav"], "80");

    let (status, holding) = send(
        &app,
        Method::GET,
        "/api/v1/holdings/item?userId=user-1&tradingSymbol=INF879O01027",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(holding["quantity"], "62.5");
    assert_eq!(holding["amc"], "PPFAS Mutual Fund");

    let (_, rerun) = send(&app, Method::POST, "/api/v1/sips/execute", None).await;
    assert_eq!(rerun["executed"], 0);
    assert_eq!(rerun["failed"], 0);

    let sip_id = sip["id"].as_str().unwrap();
    let (_, history) = send(
        &app,
        Method::GET,
        &format!("/api/v1/sips/executions?userId=user-1&sipId={}", sip_id),
        None,
    )
    .await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["holdingId"], holding["id"]);
}
