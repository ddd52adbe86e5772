use axum::{extract::Query, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UserStatusQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UserStatusRequest {
    pub status: Option<String>,
}

/// PATCH /api/handleUserStatus?userID= - block or unblock a user
pub async fn user_status(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<UserStatusQuery>,
    Json(body): Json<UserStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = query
        .user_id
        .ok_or(ApiError::MissingParam("UserID is required"))?;
    let status = body
        .status
        .ok_or(ApiError::MissingParam("Status is required"))?;

    let result = sqlx::query("UPDATE user_profile SET status = ? WHERE user_id = ?")
        .bind(&status)
        .bind(user_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error: {}", e);
            ApiError::Internal("Error updating user status")
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("User not found"));
    }

    let state = if status == "1" { "active" } else { "blocked" };
    Ok(format!("User status updated to {}.", state))
}
