use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use crate::common::json_body;
use crate::support::factory::seed_category;
use crate::support::{create_test_app, memory_state};

#[actix_web::test]
async fn lists_categories_in_insertion_order_without_a_session() {
    let ts = memory_state().await;
    seed_category(ts.store.as_ref(), "Fiction").await;
    seed_category(ts.store.as_ref(), "Science").await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/books-category").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    let categories: Vec<_> = body
        .as_array()
        .expect("list response should be an array")
        .iter()
        .map(|c| c["category"].clone())
        .collect();
    assert_eq!(categories, vec![json!("Fiction"), json!("Science")]);
}

#[actix_web::test]
async fn empty_collection_lists_nothing() {
    let ts = memory_state().await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/books-category").to_request();
    assert_eq!(json_body(test::call_service(&app, req).await).await, json!([]));
}
