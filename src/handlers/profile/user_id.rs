use axum::{extract::Query, Extension, Json};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::error::ApiError;
use crate::models::UserProfile;

#[derive(Debug, Deserialize)]
pub struct ByEmailQuery {
    pub email: Option<String>,
}

/// GET /api/profile - full user row looked up by email
pub async fn by_email(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<ByEmailQuery>,
) -> Result<Json<UserProfile>, ApiError> {
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or(ApiError::MissingParam("Email is required"))?;

    let user = sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profile WHERE email = ?")
        .bind(&email)
        .fetch_optional(&pool)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(user))
}
