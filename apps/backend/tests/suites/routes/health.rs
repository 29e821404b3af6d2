use actix_web::http::StatusCode;
use actix_web::test;
use wisdom_center::middleware::request_trace::TRACE_ID_HEADER;
use wisdom_center::routes::health::ROOT_BANNER;

use crate::common::json_body;
use crate::support::{create_test_app, memory_state};

#[actix_web::test]
async fn root_reports_the_banner_as_plain_text() {
    let ts = memory_state().await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(test::read_body(resp).await, ROOT_BANNER.as_bytes());
}

#[actix_web::test]
async fn health_reports_the_store_state() {
    let ts = memory_state().await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(TRACE_ID_HEADER));

    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "ok");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("store_error").is_none());
    assert!(body.get("migrations").is_none());
    assert!(body["time"].as_str().is_some_and(|t| !t.is_empty()));
}

#[actix_web::test]
async fn unknown_paths_are_not_found() {
    let ts = memory_state().await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/shelves").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
