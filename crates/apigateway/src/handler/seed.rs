use crate::{
    abstract_trait::DynSeedService,
    domain::seed::SeedSummary,
    middleware::{admin::admin_middleware, jwt::auth_middleware},
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use shared::{domain::responses::ApiResponse, errors::HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/seed",
    tag = "Seed",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Products and users replaced with sample data", body = ApiResponse<SeedSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin privileges required"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn seed_data(
    Extension(service): Extension<DynSeedService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.seed().await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub fn seed_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/seed", post(seed_data))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.seed.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
