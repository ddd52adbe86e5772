use axum::{extract::Query, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::MySqlPool;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UserRoleQuery {
    pub email: Option<String>,
}

/// GET /api/getUserRole - numeric role for an email
pub async fn user_role(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<UserRoleQuery>,
) -> Result<Json<Value>, ApiError> {
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or(ApiError::MissingParam("Email is required"))?;

    let role: Option<String> = sqlx::query_scalar("SELECT role FROM user_profile WHERE email = ?")
        .bind(&email)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error: {}", e);
            ApiError::Internal("An error occurred while fetching user role")
        })?;

    let role = role.ok_or(ApiError::NotFound("No user found with the given email"))?;

    Ok(Json(json!({ "role": role.trim().parse::<i64>().unwrap_or(0) })))
}
