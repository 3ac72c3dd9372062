use crate::{
    abstract_trait::sync::DynSyncService, domain::requests::sync::SyncRequest, state::AppState,
    sync::SyncReport,
};
use axum::{
    Json,
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use shared::{domain::responses::ApiResponse, errors::HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/sync",
    tag = "Sync",
    request_body(content = SyncRequest, description = "Optional username override; the body may be empty"),
    responses(
        (status = 200, description = "Sync report", body = ApiResponse<SyncReport>),
        (status = 500, description = "No upstream username available"),
        (status = 502, description = "Upstream rejected the request or sent garbage"),
        (status = 503, description = "Upstream unreachable"),
        (status = 504, description = "Upstream timed out")
    )
)]
pub async fn run_sync(
    Extension(service): Extension<DynSyncService>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        SyncRequest::default()
    } else {
        serde_json::from_slice::<SyncRequest>(&body)
            .map_err(|e| HttpError::BadRequest(format!("Invalid JSON: {e}")))?
    };

    let response = service.run(req.username.as_deref()).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn sync_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/sync", post(run_sync))
        .layer(Extension(app_state.di_container.sync.clone()))
}
