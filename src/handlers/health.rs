use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::{json, Value};
use sqlx::MySqlPool;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "SocialGrdn API (Rust)",
            "version": version,
            "description": "Property-rental marketplace backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "users": "/api/users/*, /api/profile, /api/getProfile, /api/editProfile, /api/getUserRole",
                "listings": "/api/addPropertyListing, /api/updatePropertyListing/:propertyId, /api/getPropertyDetails, /api/getUserProperties, /api/getSearchResults, /api/getPropStatus, /api/updatePropStatus, /api/savePropertyImage",
                "rentals": "/api/GetRentalDetails, /api/getRentalList, /api/registerRentalDetails, /api/editRentalDetails",
                "reports": "/api/getPayouts, /api/getDetailedPayouts, /api/getEarnings[/details], /api/getAllEarningsReport, /api/getAllMonthlyReport, /api/moderatorReport/*",
                "moderation": "/api/getAllUsers, /api/handleUserStatus",
            }
        }
    }))
}

/// GET /health - liveness plus a database ping
pub async fn health(Extension(pool): Extension<MySqlPool>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
