use axum::{
    Json,
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use shared::{config::Claims, errors::ErrorResponse};
use tracing::warn;

/// Must run after `auth_middleware`; a request without claims is refused.
pub async fn admin_middleware(
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match req.extensions().get::<Claims>() {
        Some(claims) if claims.is_admin => Ok(next.run(req).await),
        Some(claims) => {
            warn!("🚫 User {} attempted an admin operation", claims.user_id);
            Err((
                StatusCode::FORBIDDEN,
                Json(ErrorResponse {
                    status: "fail".to_string(),
                    message: "Access denied. Admin privileges required".to_string(),
                }),
            ))
        }
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                status: "fail".to_string(),
                message: "Missing user claims in request context".to_string(),
            }),
        )),
    }
}
