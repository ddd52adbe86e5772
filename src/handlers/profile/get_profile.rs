use axum::{extract::Query, Extension, Json};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::error::ApiError;
use crate::models::UserProfile;

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
}

/// GET /api/getProfile - full user row looked up by user id
pub async fn get_profile(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<UserProfile>, ApiError> {
    let user_id = query
        .user_id
        .ok_or(ApiError::MissingParam("userID is required"))?;

    let user = sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profile WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(user))
}
