//! The façade talking to a stub employee backend over a real socket.
//!
//! The stub speaks the backend's `{ data, status, error }` envelope with
//! `employee_`-prefixed fields, and can be switched into a throttled mode where
//! every request answers 429.

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, test, web};
use employee_api::Trace;
use employee_api::domain::{EmployeeCaches, EmployeeService};
use employee_api::inbound::http::employees;
use employee_api::inbound::http::state::HttpState;
use employee_api::outbound::employee_api::EmployeeHttpGateway;
use serde_json::{Value, json};
use url::Url;

const KNOWN_ID: &str = "5255f1a5-f9f7-4be5-829a-134bde088d17";
const OTHER_ID: &str = "0c1b2a4e-7b39-4a7d-9d7e-2f7e5d0d9a11";

#[derive(Default)]
struct StubBackend {
    throttled: AtomicBool,
    list_calls: AtomicUsize,
    deleted: AtomicBool,
}

impl StubBackend {
    fn throttle(&self) -> Option<HttpResponse> {
        self.throttled
            .load(Ordering::SeqCst)
            .then(|| HttpResponse::TooManyRequests().body("Too Many Requests"))
    }
}

fn record(id: &str, name: &str, salary: u32) -> Value {
    json!({
        "id": id,
        "employee_name": name,
        "employee_salary": salary,
        "employee_age": 40,
        "employee_title": "Engineer",
        "employee_email": "someone@company.com"
    })
}

async fn list(stub: web::Data<StubBackend>) -> HttpResponse {
    if let Some(res) = stub.throttle() {
        return res;
    }
    stub.list_calls.fetch_add(1, Ordering::SeqCst);
    let mut data = vec![record(OTHER_ID, "Ada Lovelace", 90_000)];
    if !stub.deleted.load(Ordering::SeqCst) {
        data.push(record(KNOWN_ID, "Grace Hopper", 120_000));
    }
    HttpResponse::Ok().json(json!({
        "data": data,
        "status": "Successfully processed request."
    }))
}

async fn fetch(stub: web::Data<StubBackend>, path: web::Path<String>) -> HttpResponse {
    if let Some(res) = stub.throttle() {
        return res;
    }
    if path.as_str() == KNOWN_ID && !stub.deleted.load(Ordering::SeqCst) {
        HttpResponse::Ok().json(json!({
            "data": record(KNOWN_ID, "Grace Hopper", 120_000),
            "status": "Successfully processed request."
        }))
    } else {
        HttpResponse::NotFound().finish()
    }
}

async fn create(stub: web::Data<StubBackend>) -> HttpResponse {
    if let Some(res) = stub.throttle() {
        return res;
    }
    HttpResponse::InternalServerError().json(json!({ "error": "database unavailable" }))
}

async fn delete(stub: web::Data<StubBackend>, body: web::Json<Value>) -> HttpResponse {
    if let Some(res) = stub.throttle() {
        return res;
    }
    let removed = body["name"] == json!("Grace Hopper");
    if removed {
        stub.deleted.store(true, Ordering::SeqCst);
    }
    HttpResponse::Ok().json(json!({
        "data": removed,
        "status": "Successfully processed request."
    }))
}

/// Start the stub on an ephemeral port and return its collection URL.
fn spawn_stub(stub: web::Data<StubBackend>) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    let server = HttpServer::new(move || {
        App::new().app_data(stub.clone()).service(
            web::scope("/api/v1/employee")
                .route("", web::get().to(list))
                .route("", web::post().to(create))
                .route("", web::delete().to(delete))
                .route("/{id}", web::get().to(fetch)),
        )
    })
    .workers(1)
    .listen(listener)
    .expect("listen on stub socket")
    .run();
    actix_rt::spawn(server);
    Url::parse(&format!("http://{addr}/api/v1/employee")).expect("stub url")
}

async fn facade(
    base_url: Url,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let gateway =
        EmployeeHttpGateway::new(base_url, Duration::from_secs(5)).expect("build gateway");
    let service = Arc::new(EmployeeService::new(
        Arc::new(gateway),
        Arc::new(EmployeeCaches::new()),
    ));
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(service.clone(), service)))
            .wrap(Trace)
            .configure(employees::configure),
    )
    .await
}

async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    req: test::TestRequest,
) -> (StatusCode, Value) {
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

#[actix_web::test]
async fn collection_is_decoded_and_cached() {
    let stub = web::Data::new(StubBackend::default());
    let app = facade(spawn_stub(stub.clone())).await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/employees")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[1]["name"], json!("Grace Hopper"));
    assert_eq!(body[1]["salary"], json!(120_000));

    let (_, highest) = send(
        &app,
        test::TestRequest::get().uri("/employees/highestSalary"),
    )
    .await;
    assert_eq!(highest, json!(120_000));
    assert_eq!(stub.list_calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn missing_employee_is_not_found() {
    let stub = web::Data::new(StubBackend::default());
    let app = facade(spawn_stub(stub)).await;

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri(&format!("/employees/{OTHER_ID}")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("employee_not_found"));
    assert_eq!(
        body["message"],
        json!(format!("Employee with id: {OTHER_ID} not found"))
    );
}

#[actix_web::test]
async fn backend_429_maps_to_rate_limited() {
    let stub = web::Data::new(StubBackend::default());
    stub.throttled.store(true, Ordering::SeqCst);
    let app = facade(spawn_stub(stub)).await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/employees")).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], json!("rate_limited"));
}

#[actix_web::test]
async fn backend_error_envelope_becomes_backend_failure() {
    let stub = web::Data::new(StubBackend::default());
    let app = facade(spawn_stub(stub)).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/employees").set_json(json!({
            "name": "Jill Jenkins",
            "salary": 139_082,
            "age": 48,
            "title": "Financial Advisor"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], json!("backend_failure"));
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|message| message.contains("database unavailable")),
        "unexpected message: {body}"
    );
}

#[actix_web::test]
async fn delete_by_id_resolves_the_name_and_refreshes() {
    let stub = web::Data::new(StubBackend::default());
    let app = facade(spawn_stub(stub.clone())).await;
    send(&app, test::TestRequest::get().uri("/employees")).await;

    let (status, body) = send(
        &app,
        test::TestRequest::delete().uri(&format!("/employees/{KNOWN_ID}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Grace Hopper"));

    let (_, after) = send(&app, test::TestRequest::get().uri("/employees")).await;
    assert_eq!(after.as_array().map(Vec::len), Some(1));
    assert_eq!(stub.list_calls.load(Ordering::SeqCst), 2);
}
