//! End-to-end behaviour of the employee routes over the in-memory gateway.
//!
//! These tests drive the real handlers, middleware, and caching service, and
//! read the gateway's call counters to observe when the backend is consulted.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use employee_api::Trace;
use employee_api::domain::{EmployeeCaches, EmployeeService, TRACE_ID_HEADER};
use employee_api::inbound::http::employees;
use employee_api::inbound::http::error::json_error_handler;
use employee_api::inbound::http::state::HttpState;
use employee_api::outbound::in_memory::InMemoryEmployeeGateway;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn gateway() -> Arc<InMemoryEmployeeGateway> {
    Arc::new(InMemoryEmployeeGateway::seeded())
}

async fn app(
    gateway: Arc<InMemoryEmployeeGateway>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let service = Arc::new(EmployeeService::new(gateway, Arc::new(EmployeeCaches::new())));
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(service.clone(), service)))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(Trace)
            .configure(employees::configure),
    )
    .await
}

async fn get_json(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
) -> (StatusCode, Value) {
    let res = test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await;
    let status = res.status();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|employee| employee["name"].as_str().expect("name").to_owned())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn reads_share_one_collection_fetch(gateway: Arc<InMemoryEmployeeGateway>) {
    let app = app(gateway.clone()).await;

    let (status, all) = get_json(&app, "/employees").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&all).len(), 5);

    let (_, matches) = get_json(&app, "/employees/search/ACCOUNT").await;
    let (_, highest) = get_json(&app, "/employees/highestSalary").await;
    let (_, top) = get_json(&app, "/employees/topTenHighestEarningEmployeeNames").await;

    assert!(names(&matches).is_empty(), "search matches names, not titles");
    assert_eq!(highest, json!(433_060));
    assert_eq!(
        top.as_array().expect("array").first(),
        Some(&json!("Cedric Kelly"))
    );
    assert_eq!(gateway.calls().list_all, 1);
}

#[rstest]
#[actix_web::test]
async fn search_is_case_insensitive_substring(gateway: Arc<InMemoryEmployeeGateway>) {
    let app = app(gateway).await;

    let (status, body) = get_json(&app, "/employees/search/%20NiX%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Tiger Nixon".to_owned()]);
}

#[rstest]
#[actix_web::test]
async fn lookup_by_id_refreshes_the_collection(gateway: Arc<InMemoryEmployeeGateway>) {
    let app = app(gateway.clone()).await;
    let (_, all) = get_json(&app, "/employees").await;
    let id = all[0]["id"].as_str().expect("id").to_owned();

    let (status, employee) = get_json(&app, &format!("/employees/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(employee["id"], json!(id));

    get_json(&app, "/employees").await;
    assert_eq!(gateway.calls().fetch_by_id, 1);
    assert_eq!(gateway.calls().list_all, 2);
}

#[rstest]
#[actix_web::test]
async fn created_employee_appears_after_next_invalidation(gateway: Arc<InMemoryEmployeeGateway>) {
    let app = app(gateway.clone()).await;
    let (_, before) = get_json(&app, "/employees").await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(json!({
            "name": "Jill Jenkins",
            "salary": 139_082,
            "age": 48,
            "title": "Financial Advisor"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["email"], json!("jill.jenkins@company.com"));

    let (_, cached) = get_json(&app, "/employees").await;
    assert_eq!(cached, before);
    assert_eq!(gateway.calls().list_all, 1);

    let id = created["id"].as_str().expect("id").to_owned();
    get_json(&app, &format!("/employees/{id}")).await;
    let (_, refreshed) = get_json(&app, "/employees").await;
    assert!(names(&refreshed).contains(&"Jill Jenkins".to_owned()));
}

#[rstest]
#[actix_web::test]
async fn delete_returns_the_name_and_drops_the_employee(gateway: Arc<InMemoryEmployeeGateway>) {
    let app = app(gateway.clone()).await;
    let (_, all) = get_json(&app, "/employees").await;
    let id = all[1]["id"].as_str().expect("id").to_owned();

    let req = test::TestRequest::delete()
        .uri(&format!("/employees/{id}"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let deleted: Value = test::read_body_json(res).await;
    assert_eq!(deleted, json!("Garrett Winters"));

    let (_, after) = get_json(&app, "/employees").await;
    assert_eq!(names(&after).len(), 4);
    assert!(!names(&after).contains(&"Garrett Winters".to_owned()));

    let (status, body) = get_json(&app, &format!("/employees/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("employee_not_found"));
}

#[rstest]
#[actix_web::test]
async fn throttled_backend_surfaces_as_429_with_trace(gateway: Arc<InMemoryEmployeeGateway>) {
    let app = app(gateway.clone()).await;
    gateway.set_throttled(true);

    let res = test::call_service(&app, test::TestRequest::get().uri("/employees").to_request())
        .await;

    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("rate_limited"));
    assert_eq!(body["traceId"], json!(header));

    gateway.set_throttled(false);
    let (status, _) = get_json(&app, "/employees").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gateway.calls().list_all, 2);
}

#[rstest]
#[case::highest_salary("/employees/highestSalary", "no_employees_found")]
#[case::top_ten("/employees/topTenHighestEarningEmployeeNames", "employee_not_found")]
#[actix_web::test]
async fn aggregates_over_no_employees_are_not_found(#[case] uri: &str, #[case] code: &str) {
    let app = app(Arc::new(InMemoryEmployeeGateway::default())).await;

    let (status, body) = get_json(&app, uri).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!(code));
}
