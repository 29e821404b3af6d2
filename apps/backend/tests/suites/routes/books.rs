use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_body_from_service_response;
use backend_test_support::unique_helpers::unique_title;
use serde_json::{json, Value};
use wisdom_center::store::{Collection, DocumentStore, Filter};

use crate::common::json_body;
use crate::support::auth::session_for;
use crate::support::factory::{seed, seed_book};
use crate::support::{create_test_app, memory_state};

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("list response should be an array")
        .iter()
        .map(|b| b["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[actix_web::test]
async fn list_filters_by_category() {
    let ts = memory_state().await;
    let security = ts.security().clone();
    seed_book(ts.store.as_ref(), "b1", "Dune", "Fiction", 5).await;
    seed_book(ts.store.as_ref(), "b2", "Cosmos", "Science", 2).await;
    seed_book(ts.store.as_ref(), "b3", "Emma", "Fiction", 1).await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let all = test::TestRequest::get()
        .uri("/books")
        .cookie(session_for("a@x.com", &security))
        .to_request();
    let body = json_body(test::call_service(&app, all).await).await;
    assert_eq!(names(&body), vec!["Dune", "Cosmos", "Emma"]);

    let fiction = test::TestRequest::get()
        .uri("/books?category=Fiction")
        .cookie(session_for("a@x.com", &security))
        .to_request();
    let body = json_body(test::call_service(&app, fiction).await).await;
    assert_eq!(names(&body), vec!["Dune", "Emma"]);

    let unknown = test::TestRequest::get()
        .uri("/books?category=Poetry")
        .cookie(session_for("a@x.com", &security))
        .to_request();
    assert_eq!(json_body(test::call_service(&app, unknown).await).await, json!([]));
}

#[actix_web::test]
async fn get_by_id_returns_the_document_or_null() {
    let ts = memory_state().await;
    seed_book(ts.store.as_ref(), "b1", "Dune", "Fiction", 5).await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/books/b1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["_id"], "b1");
    assert_eq!(body["quantity"], 5);

    let req = test::TestRequest::get().uri("/books/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, Value::Null);
}

#[actix_web::test]
async fn numeric_ids_are_addressable_by_path() {
    let ts = memory_state().await;
    let store = ts.store.clone();
    seed(
        ts.store.as_ref(),
        Collection::Books,
        json!({"_id": 7, "name": "Dune", "quantity": 2}),
    )
    .await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/books/7").to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["_id"], 7);

    let req = test::TestRequest::patch().uri("/books/7").to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["matchedCount"], 1);

    let stored = store
        .find_one(Collection::Books, &Filter::by_id("7"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["quantity"], 1);
}

#[actix_web::test]
async fn add_book_stores_the_document_verbatim() {
    let ts = memory_state().await;
    let security = ts.security().clone();
    let store = ts.store.clone();
    let app = create_test_app(ts.state).with_prod_routes().build().await;
    let title = unique_title("Dune");

    let req = test::TestRequest::post()
        .uri("/add-book")
        .cookie(session_for("librarian@x.com", &security))
        .set_json(json!({"name": title, "quantity": 5, "tags": ["sf", "classic"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["acknowledged"], true);
    let id = body["insertedId"].as_str().expect("insertedId should be a string").to_string();

    let stored = store
        .find_one(Collection::Books, &Filter::by_id(id))
        .await
        .unwrap()
        .expect("book should be stored");
    assert_eq!(stored["name"], title.as_str());
    assert_eq!(stored["tags"], json!(["sf", "classic"]));
}

#[actix_web::test]
async fn add_book_rejects_non_object_bodies() {
    let ts = memory_state().await;
    let security = ts.security().clone();
    let store = ts.store.clone();
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/add-book")
        .cookie(session_for("librarian@x.com", &security))
        .set_json(json!(["not", "a", "book"]))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty(Collection::Books));
}

#[actix_web::test]
async fn decrement_lowers_the_stored_quantity_each_time() {
    let ts = memory_state().await;
    let store = ts.store.clone();
    seed_book(ts.store.as_ref(), "b1", "Dune", "Fiction", 5).await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    for expected in [4, 3, 2] {
        // The client-sent quantity is ignored
        let req = test::TestRequest::patch()
            .uri("/books/b1")
            .set_json(json!({"quantity": 5}))
            .to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["matchedCount"], 1);
        assert_eq!(body["modifiedCount"], 1);

        let stored = store
            .find_one(Collection::Books, &Filter::by_id("b1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored["quantity"], expected);
    }
}

#[actix_web::test]
async fn decrement_of_unknown_book_matches_nothing() {
    let ts = memory_state().await;
    let store = ts.store.clone();
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::patch().uri("/books/nope").to_request();
    let body = json_body(test::call_service(&app, req).await).await;

    assert_eq!(body["matchedCount"], 0);
    assert_eq!(body["upsertedId"], Value::Null);
    assert!(store.is_empty(Collection::Books));
}

#[actix_web::test]
async fn non_numeric_quantity_cannot_be_decremented() {
    let ts = memory_state().await;
    seed(
        ts.store.as_ref(),
        Collection::Books,
        json!({"_id": "b1", "name": "Dune", "quantity": "plenty"}),
    )
    .await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::patch().uri("/books/b1").to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn set_quantity_addresses_books_by_name() {
    let ts = memory_state().await;
    let store = ts.store.clone();
    seed_book(ts.store.as_ref(), "b1", "The Left Hand of Darkness", "Fiction", 0).await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri("/book/The%20Left%20Hand%20of%20Darkness")
        .set_json(json!({"quantity": 7}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["matchedCount"], 1);
    assert_eq!(body["modifiedCount"], 1);

    let stored = store
        .find_one(Collection::Books, &Filter::by_id("b1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["quantity"], 7);
}

#[actix_web::test]
async fn replace_overwrites_fields_and_upserts() {
    let ts = memory_state().await;
    let security = ts.security().clone();
    let store = ts.store.clone();
    seed_book(ts.store.as_ref(), "b1", "Dune", "Fiction", 5).await;
    let app = create_test_app(ts.state).with_prod_routes().build().await;

    let fields = json!({
        "name": "Dune Messiah",
        "author": "Frank Herbert",
        "quantity": 3,
        "rating": 5,
        "image": "https://img.example/dm.png",
        "description": "Sequel",
        "category": "Fiction",
        "ignored": "not replaceable"
    });

    let req = test::TestRequest::put()
        .uri("/books/b1")
        .cookie(session_for("librarian@x.com", &security))
        .set_json(&fields)
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["matchedCount"], 1);
    assert_eq!(body["upsertedCount"], 0);

    let stored = store
        .find_one(Collection::Books, &Filter::by_id("b1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["name"], "Dune Messiah");
    assert!(stored.get("ignored").is_none());

    let req = test::TestRequest::put()
        .uri("/books/b2")
        .cookie(session_for("librarian@x.com", &security))
        .set_json(&fields)
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["matchedCount"], 0);
    assert_eq!(body["upsertedId"], "b2");
    assert_eq!(body["upsertedCount"], 1);
    assert_eq!(store.len(Collection::Books), 2);
}
