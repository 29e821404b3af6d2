use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::repos::categories;
use crate::state::app_state::AppState;

pub async fn list_categories(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = categories::list_all(app_state.store.as_ref()).await?;
    Ok(HttpResponse::Ok().json(categories))
}
