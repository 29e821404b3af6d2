use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use async_trait::async_trait;
use backend_test_support::error_body::assert_error_body_from_service_response;
use wisdom_center::config::app::RuntimeEnv;
use wisdom_center::error::{AppError, UNAUTHENTICATED_MESSAGE};
use wisdom_center::errors::domain::{DomainError, InfraErrorKind};
use wisdom_center::errors::ErrorCode;
use wisdom_center::infra::state::build_state;
use wisdom_center::middleware::request_trace::TRACE_ID_HEADER;
use wisdom_center::state::app_state::AppState;
use wisdom_center::state::security_config::SecurityConfig;
use wisdom_center::store::{
    Collection, DeleteResult, Document, DocumentStore, Filter, InsertOneResult, Update,
    UpdateResult,
};

use crate::common::json_body;
use crate::support::auth::session_for;
use crate::support::state::TEST_SECRET;
use crate::support::{create_test_app, memory_state};

/// Store whose every operation fails with the configured infra error.
#[derive(Debug)]
struct FailingStore(InfraErrorKind);

impl FailingStore {
    fn fail<T>(&self) -> Result<T, DomainError> {
        Err(DomainError::infra(
            self.0.clone(),
            "relation \"documents\" does not exist",
        ))
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find(&self, _: Collection, _: &Filter) -> Result<Vec<Document>, DomainError> {
        self.fail()
    }

    async fn find_one(&self, _: Collection, _: &Filter) -> Result<Option<Document>, DomainError> {
        self.fail()
    }

    async fn insert_one(&self, _: Collection, _: Document) -> Result<InsertOneResult, DomainError> {
        self.fail()
    }

    async fn update_one(
        &self,
        _: Collection,
        _: &Filter,
        _: &Update,
        _: bool,
    ) -> Result<UpdateResult, DomainError> {
        self.fail()
    }

    async fn delete_one(&self, _: Collection, _: &Filter) -> Result<DeleteResult, DomainError> {
        self.fail()
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.fail()
    }
}

async fn failing_state(kind: InfraErrorKind) -> AppState {
    build_state()
        .with_env(RuntimeEnv::Development)
        .with_security(SecurityConfig::new(TEST_SECRET.as_bytes()))
        .with_store_handle(Arc::new(FailingStore(kind)))
        .build()
        .await
        .expect("state should build")
}

async fn unauthenticated() -> Result<HttpResponse, AppError> {
    Err(AppError::unauthenticated())
}

async fn forbidden() -> Result<HttpResponse, AppError> {
    Err(AppError::forbidden())
}

async fn bad_request() -> Result<HttpResponse, AppError> {
    Err(AppError::bad_request(ErrorCode::BadRequest, "Invalid JSON at line 1"))
}

async fn already_borrowed() -> Result<HttpResponse, AppError> {
    Err(AppError::already_borrowed())
}

async fn internal() -> Result<HttpResponse, AppError> {
    Err(AppError::internal("secret detail"))
}

#[actix_web::test]
async fn every_error_variant_follows_the_body_contract() {
    let ts = memory_state().await;
    let app = create_test_app(ts.state)
        .with_routes(|cfg| {
            cfg.route("/e/unauthenticated", web::get().to(unauthenticated))
                .route("/e/forbidden", web::get().to(forbidden))
                .route("/e/bad-request", web::get().to(bad_request))
                .route("/e/already-borrowed", web::get().to(already_borrowed))
                .route("/e/internal", web::get().to(internal));
        })
        .build()
        .await;

    let cases = [
        ("/e/unauthenticated", "UNAUTHORIZED", StatusCode::UNAUTHORIZED, Some(UNAUTHENTICATED_MESSAGE)),
        ("/e/forbidden", "FORBIDDEN", StatusCode::FORBIDDEN, None),
        ("/e/bad-request", "BAD_REQUEST", StatusCode::BAD_REQUEST, Some("Invalid JSON at line 1")),
        ("/e/already-borrowed", "ALREADY_BORROWED", StatusCode::BAD_REQUEST, None),
        ("/e/internal", "INTERNAL", StatusCode::INTERNAL_SERVER_ERROR, Some("internal server error")),
    ];

    for (uri, code, status, message) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_body_from_service_response(resp, code, status, message).await;
    }
}

#[actix_web::test]
async fn store_failures_surface_as_generic_errors() {
    let state = failing_state(InfraErrorKind::Other("DbErr".into())).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/books-category").to_request();
    let resp = test::call_service(&app, req).await;

    let body = assert_error_body_from_service_response(
        resp,
        "STORE_ERROR",
        StatusCode::INTERNAL_SERVER_ERROR,
        Some("store operation failed"),
    )
    .await;
    assert!(!body.message.contains("documents"));
}

#[actix_web::test]
async fn unreachable_store_is_service_unavailable() {
    let state = failing_state(InfraErrorKind::StoreUnavailable).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri("/user/borrowed-book/Dune")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body_from_service_response(
        resp,
        "STORE_UNAVAILABLE",
        StatusCode::SERVICE_UNAVAILABLE,
        None,
    )
    .await;
}

#[actix_web::test]
async fn health_stays_up_when_the_store_is_down() {
    let state = failing_state(InfraErrorKind::StoreUnavailable).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(TRACE_ID_HEADER));
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "error");
    assert!(body["store_error"].is_string());
}

#[actix_web::test]
async fn malformed_query_strings_follow_the_body_contract() {
    let ts = memory_state().await;
    let security = ts.security().clone();
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    for uri in [
        "/books?category=a&category=b",
        "/user/borrowed-book?email=a@x.com&email=a@x.com",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .cookie(session_for("a@x.com", &security))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_error_body_from_service_response(
            resp,
            "BAD_REQUEST",
            StatusCode::BAD_REQUEST,
            Some("Invalid query string"),
        )
        .await;
    }
}
