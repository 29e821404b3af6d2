use actix_web::cookie::SameSite;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_body_from_service_response;
use backend_test_support::unique_helpers::unique_email;
use serde_json::json;
use wisdom_center::auth::jwt::verify_token;
use wisdom_center::config::app::RuntimeEnv;

use crate::common::{json_body, token_cookie_of};
use crate::support::auth::session_cookie;
use crate::support::state::memory_state_for;
use crate::support::{create_test_app, memory_state};

#[actix_web::test]
async fn issuing_sets_a_strict_http_only_cookie_in_development() {
    let ts = memory_state().await;
    let security = ts.security().clone();
    let app = create_test_app(ts.state).with_prod_routes().build().await;
    let email = unique_email("reader");

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({"email": email, "name": "Reader"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = token_cookie_of(&resp).expect("token cookie should be set");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    assert_ne!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));

    let claim = verify_token(cookie.value(), &security).expect("cookie should carry a valid token");
    assert_eq!(claim.email, email);
    assert_eq!(claim.extra.get("name"), Some(&json!("Reader")));

    assert_eq!(json_body(resp).await, json!({"success": true}));
}

#[actix_web::test]
async fn production_cookie_is_secure_and_cross_site() {
    let ts = memory_state_for(RuntimeEnv::Production).await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({"email": "a@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let cookie = token_cookie_of(&resp).expect("token cookie should be set");
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::None));
    assert_eq!(cookie.http_only(), Some(true));
}

#[actix_web::test]
async fn issued_session_opens_gated_routes() {
    let ts = memory_state().await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({"email": "a@x.com"}))
        .to_request();
    let cookie = token_cookie_of(&test::call_service(&app, req).await).unwrap();

    let req = test::TestRequest::get()
        .uri("/books")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!([]));
}

#[actix_web::test]
async fn empty_email_is_rejected() {
    let ts = memory_state().await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({"email": "  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(token_cookie_of(&resp).is_none());
    assert_error_body_from_service_response(resp, "INVALID_EMAIL", StatusCode::BAD_REQUEST, None)
        .await;
}

#[actix_web::test]
async fn missing_email_or_malformed_body_is_a_bad_request() {
    let ts = memory_state().await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    for payload in [r#"{"name": "no email"}"#, "{not json", "[]"] {
        let req = test::TestRequest::post()
            .uri("/jwt")
            .insert_header(("content-type", "application/json"))
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_error_body_from_service_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, None)
            .await;
    }
}

#[actix_web::test]
async fn logout_expires_the_cookie() {
    let ts = memory_state().await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::post().uri("/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = token_cookie_of(&resp).expect("logout should reset the token cookie");
    assert_eq!(cookie.value(), "");
    assert_eq!(
        cookie.max_age(),
        Some(actix_web::cookie::time::Duration::ZERO)
    );
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(json_body(resp).await, json!({"success": true}));
}

#[actix_web::test]
async fn gated_route_is_closed_after_logout() {
    let ts = memory_state().await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let login = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({"email": "a@x.com"}))
        .to_request();
    let issued = token_cookie_of(&test::call_service(&app, login).await).unwrap();

    let logout = test::TestRequest::post()
        .uri("/logout")
        .cookie(issued)
        .to_request();
    let cleared = token_cookie_of(&test::call_service(&app, logout).await).unwrap();

    // The browser now holds the cleared value
    let req = test::TestRequest::get()
        .uri("/books")
        .cookie(session_cookie(cleared.value()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body_from_service_response(
        resp,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        Some("unauthorized access"),
    )
    .await;
}
