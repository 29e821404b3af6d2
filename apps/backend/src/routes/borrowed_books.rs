use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::authorize::require_owner;
use crate::auth::claims::IdentityClaim;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::borrowed_books;
use crate::state::app_state::AppState;
use crate::store::Document;

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub email: Option<String>,
}

/// Only the owner named by `?email=` may list their loans.
pub async fn list_borrowed(
    identity: IdentityClaim,
    query: web::Query<OwnerQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let owner = query.email.as_deref();
    require_owner(&identity, owner)?;

    let records =
        borrowed_books::list_for_owner(app_state.store.as_ref(), &identity.email).await?;
    Ok(HttpResponse::Ok().json(records))
}

pub async fn borrow_book(
    body: ValidatedJson<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = borrowed_books::borrow(app_state.store.as_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn return_book(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = borrowed_books::return_by_name(app_state.store.as_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(result))
}
