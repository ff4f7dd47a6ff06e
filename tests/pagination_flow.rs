#![cfg(feature = "client")]

use clinic_client::domain::patient::Patient;
use clinic_client::models::config::ClientConfig;
use clinic_client::pagination::{LoadStatus, PaginationController, PaginationOptions};
use clinic_client::services::patient::{load_patients, search_patients};

mod common;

fn patient_controller() -> PaginationController<Patient> {
    PaginationController::new(PaginationOptions {
        initial_page_size: Some(15),
        ..PaginationOptions::default()
    })
}

#[actix_web::test]
async fn test_navigate_to_last_page_and_back() {
    let backend = common::start_backend();
    let repo = clinic_client::connect(&backend.config()).unwrap();
    let controller = patient_controller();

    load_patients(&repo, &controller).await;
    assert_eq!(controller.total_pages(), 4);
    assert_eq!(controller.state().status(), LoadStatus::Loaded);

    controller.go_to_last_page();
    load_patients(&repo, &controller).await;
    let state = controller.state();
    assert_eq!(state.current_page, 4);
    assert_eq!(state.data.len(), 2);
    assert_eq!(state.data[0].id.get(), 46);
    assert_eq!(state.page_links(), vec![Some(1), Some(2), Some(3), Some(4)]);

    controller.go_to_page(99);
    assert_eq!(controller.current_page(), 4);
    controller.go_to_previous_page();
    load_patients(&repo, &controller).await;
    assert_eq!(controller.current_page(), 3);

    assert_eq!(
        backend.log.queries(),
        vec![
            "page=1&limit=15".to_string(),
            "page=4&limit=15".to_string(),
            "page=3&limit=15".to_string(),
        ]
    );
}

#[actix_web::test]
async fn test_search_resets_to_first_page() {
    let backend = common::start_backend();
    let repo = clinic_client::connect(&backend.config()).unwrap();
    let controller = patient_controller();

    load_patients(&repo, &controller).await;
    controller.go_to_page(3);
    search_patients(&repo, &controller, "maria").await;

    let state = controller.state();
    assert_eq!(state.current_page, 1);
    assert_eq!(state.total_items, 9);
    assert_eq!(state.total_pages, 1);
    assert_eq!(
        backend.log.queries().last().map(String::as_str),
        Some("page=1&limit=15&search=maria")
    );

    search_patients(&repo, &controller, "").await;
    assert_eq!(controller.state().total_items, 47);
    assert_eq!(
        backend.log.queries().last().map(String::as_str),
        Some("page=1&limit=15")
    );
}

#[actix_web::test]
async fn test_failed_load_clears_previous_page() {
    let backend = common::start_backend();
    let repo = clinic_client::connect(&backend.config()).unwrap();
    let controller = patient_controller();
    load_patients(&repo, &controller).await;
    assert_eq!(controller.state().data.len(), 15);

    let rejected = clinic_client::connect(&backend.config_with_token(None)).unwrap();
    load_patients(&rejected, &controller).await;

    let state = controller.state();
    assert_eq!(state.status(), LoadStatus::Errored);
    assert_eq!(state.error.as_deref(), Some("Unauthorized"));
    assert!(state.data.is_empty());
    assert_eq!(state.total_pages, 0);
    assert!(!state.is_loading);
}

#[actix_web::test]
async fn test_unreachable_backend_reports_connection_error() {
    let config = ClientConfig {
        api_base_url: "http://127.0.0.1:1/api".into(),
        api_token: None,
        page_size: 15,
        request_timeout_secs: 2,
    };
    let repo = clinic_client::connect(&config).unwrap();
    let controller = patient_controller();

    load_patients(&repo, &controller).await;

    let error = controller.error().unwrap();
    assert!(!error.is_empty());
    assert!(!controller.is_loading());
    assert!(controller.state().data.is_empty());
}
