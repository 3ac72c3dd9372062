use crate::{
    abstract_trait::reference::DynReferenceQueryService,
    domain::response::reference::{CategoryResponse, StatusResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::{domain::responses::ApiResponse, errors::HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Reference",
    responses(
        (status = 200, description = "All categories by name", body = ApiResponse<Vec<CategoryResponse>>)
    )
)]
pub async fn get_categories(
    Extension(service): Extension<DynReferenceQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_categories().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/statuses",
    tag = "Reference",
    responses(
        (status = 200, description = "All statuses by name", body = ApiResponse<Vec<StatusResponse>>)
    )
)]
pub async fn get_statuses(
    Extension(service): Extension<DynReferenceQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_statuses().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn reference_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/categories", get(get_categories))
        .route("/api/statuses", get(get_statuses))
        .layer(Extension(app_state.di_container.reference_query.clone()))
}
