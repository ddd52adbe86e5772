use axum::{extract::Query, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct EditProfileQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EditProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
    pub profession: Option<String>,
}

/// PATCH /api/editProfile?userID= - overwrite the mutable profile fields
pub async fn edit_profile(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<EditProfileQuery>,
    Json(body): Json<EditProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = query
        .user_id
        .ok_or(ApiError::MissingParam("UserID is required"))?;

    let result = sqlx::query(
        "UPDATE user_profile
         SET first_name = ?, last_name = ?, username = ?, address_line1 = ?,
             city = ?, province = ?, postal_code = ?, phone_number = ?, profession = ?
         WHERE user_id = ?",
    )
    .bind(&body.first_name)
    .bind(&body.last_name)
    .bind(&body.username)
    .bind(&body.address_line1)
    .bind(&body.city)
    .bind(&body.province)
    .bind(&body.postal_code)
    .bind(&body.phone_number)
    .bind(&body.profession)
    .bind(user_id)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Database error: {}", e);
        ApiError::Internal("Error updating profile")
    })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("User not found"));
    }

    Ok("Profile updated successfully")
}
