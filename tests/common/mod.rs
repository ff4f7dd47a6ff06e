//! In-process stand-in for the clinic backend.
//!
//! Serves a fixed set of 47 patients and a few other resources with the
//! envelope each real endpoint uses, and records the query string of every
//! list request.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

use clinic_client::models::config::ClientConfig;

pub const TOKEN: &str = "test-token";
pub const PATIENT_COUNT: i64 = 47;

#[derive(Default)]
pub struct RequestLog(Mutex<Vec<String>>);

impl RequestLog {
    pub fn queries(&self) -> Vec<String> {
        self.0.lock().map(|q| q.clone()).unwrap_or_default()
    }

    fn record(&self, req: &HttpRequest) {
        if let Ok(mut queries) = self.0.lock() {
            queries.push(req.query_string().to_string());
        }
    }
}

pub struct TestBackend {
    pub base_url: String,
    pub log: web::Data<RequestLog>,
}

impl TestBackend {
    pub fn config(&self) -> ClientConfig {
        self.config_with_token(Some(TOKEN))
    }

    pub fn config_with_token(&self, token: Option<&str>) -> ClientConfig {
        ClientConfig {
            api_base_url: self.base_url.clone(),
            api_token: token.map(str::to_string),
            page_size: 15,
            request_timeout_secs: 5,
        }
    }
}

fn patient(id: i64) -> Value {
    let first_name = if id % 5 == 0 { "Maria" } else { "Patient" };
    json!({
        "id": id,
        "firstName": first_name,
        "lastName": format!("Number {id}"),
        "balance": id as f64 * 1.5,
        "createdAt": "2024-01-05T10:00:00Z"
    })
}

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {TOKEN}"))
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({"error": "Unauthorized"}))
}

fn number(query: &HashMap<String, String>, key: &str, default: i64) -> i64 {
    query
        .get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

async fn list_patients(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    log: web::Data<RequestLog>,
) -> HttpResponse {
    log.record(&req);
    if !authorized(&req) {
        return unauthorized();
    }

    let page = number(&query, "page", 1).max(1);
    let limit = number(&query, "limit", 10).max(1);
    let search = query.get("search").map(|s| s.to_lowercase());

    let matching: Vec<Value> = (1..=PATIENT_COUNT)
        .map(patient)
        .filter(|p| match &search {
            Some(term) => p["firstName"]
                .as_str()
                .is_some_and(|name| name.to_lowercase().contains(term)),
            None => true,
        })
        .collect();
    let total = matching.len();
    let data: Vec<Value> = matching
        .into_iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .collect();

    HttpResponse::Ok().json(json!({
        "state": "success",
        "data": {"data": data, "total": total, "page": page, "limit": limit}
    }))
}

async fn get_patient(req: HttpRequest, path: web::Path<i64>) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    let id = path.into_inner();
    if (1..=PATIENT_COUNT).contains(&id) {
        HttpResponse::Ok().json(json!({"state": "success", "data": patient(id)}))
    } else {
        HttpResponse::NotFound().json(json!({"state": "error", "message": "Patient not found"}))
    }
}

async fn patient_statistics(req: HttpRequest, path: web::Path<i64>) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    let id = path.into_inner();
    HttpResponse::Ok().json(json!({
        "state": "success",
        "data": {"totalAppointments": id, "totalSales": 2, "totalSpent": 80.0}
    }))
}

async fn create_patient(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    let mut record = body.into_inner();
    record["id"] = json!(100);
    record["balance"] = json!(0.0);
    record["createdAt"] = json!("2024-06-01T09:30:00Z");
    HttpResponse::Created().json(json!({"state": "success", "data": record}))
}

async fn list_kardex(req: HttpRequest, log: web::Data<RequestLog>) -> HttpResponse {
    log.record(&req);
    HttpResponse::Ok().json(json!({
        "data": [
            {"id": 1, "productId": 9, "type": "entry", "quantity": 10},
            {"id": 2, "productId": 9, "type": "exit", "quantity": 4}
        ],
        "total": 32,
        "page": 1,
        "limit": 2,
        "totalPages": 16
    }))
}

async fn list_products(req: HttpRequest, log: web::Data<RequestLog>) -> HttpResponse {
    log.record(&req);
    HttpResponse::Ok().json(json!({"state": "error", "message": "Inventory offline"}))
}

/// Starts the backend on a random local port inside the current actix
/// runtime.
pub fn start_backend() -> TestBackend {
    let log = web::Data::new(RequestLog::default());
    let app_log = log.clone();

    let server = HttpServer::new(move || {
        App::new().app_data(app_log.clone()).service(
            web::scope("/api")
                .route("/patients", web::get().to(list_patients))
                .route("/patients", web::post().to(create_patient))
                .route("/patients/{id}", web::get().to(get_patient))
                .route("/patients/{id}/statistics", web::get().to(patient_statistics))
                .route("/kardex", web::get().to(list_kardex))
                .route("/products", web::get().to(list_products)),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind test backend");

    let port = server.addrs()[0].port();
    actix_web::rt::spawn(server.run());

    TestBackend {
        base_url: format!("http://127.0.0.1:{port}/api"),
        log,
    }
}
