use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::claims::IdentityClaim;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::books;
use crate::state::app_state::AppState;
use crate::store::Document;

#[derive(Debug, Deserialize)]
pub struct BookListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuantityBody {
    #[serde(default)]
    pub quantity: Value,
}

/// Gated: the identity is required but not otherwise consulted.
pub async fn list_books(
    _identity: IdentityClaim,
    query: web::Query<BookListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    // An empty ?category= means no filter
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let books = books::list(app_state.store.as_ref(), category).await?;
    Ok(HttpResponse::Ok().json(books))
}

/// Responds with JSON `null` when no book has that id.
pub async fn get_book(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let book = books::find_by_id(app_state.store.as_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(book))
}

pub async fn add_book(
    _identity: IdentityClaim,
    body: ValidatedJson<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = books::insert(app_state.store.as_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Decrements the stored quantity; any request body is ignored.
pub async fn decrement_quantity(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = books::decrement_quantity(app_state.store.as_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn set_quantity(
    path: web::Path<String>,
    body: ValidatedJson<QuantityBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let QuantityBody { quantity } = body.into_inner();
    let result = books::set_quantity_by_name(app_state.store.as_ref(), &path, quantity).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn replace_book(
    _identity: IdentityClaim,
    path: web::Path<String>,
    body: ValidatedJson<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = books::replace(app_state.store.as_ref(), &path, &body).await?;
    Ok(HttpResponse::Ok().json(result))
}
