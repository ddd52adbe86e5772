use axum::{extract::Query, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub property_id: Option<i64>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct PropertyStatusRow {
    pub status: String,
    pub property_name: String,
}

/// GET /api/getPropStatus - status and name for one listing
pub async fn get_status(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<PropertyStatusRow>, ApiError> {
    let property_id = query
        .property_id
        .ok_or(ApiError::MissingParam("property_id is required"))?;

    let row = sqlx::query_as::<_, PropertyStatusRow>(
        "SELECT status, property_name FROM property_listing WHERE property_id = ?",
    )
    .bind(property_id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Database error: {}", e);
        ApiError::Internal("An error occurred while fetching property status")
    })?
    .ok_or(ApiError::NotFound("No property found with the given ID"))?;

    Ok(Json(row))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub property_id: Option<i64>,
    pub status: Option<String>,
}

/// POST /api/updatePropStatus - flip a listing's active/inactive flag
/// (soft delete included; the row is never removed)
pub async fn update_status(
    Extension(pool): Extension<MySqlPool>,
    Json(body): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    let (Some(property_id), Some(status)) = (body.property_id, body.status.as_deref()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Property ID and status are required",
            })),
        )
            .into_response();
    };

    let result = sqlx::query("UPDATE property_listing SET status = ? WHERE property_id = ?")
        .bind(status)
        .bind(property_id)
        .execute(&pool)
        .await;

    match result {
        Ok(_) => Json(json!({
            "success": true,
            "message": "Property status updated successfully",
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Database error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Failed to update property status",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
