use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub username: Option<String>,
    pub profession: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(rename = "userAddress")]
    pub user_address: Option<String>,
    #[serde(rename = "userCity")]
    pub user_city: Option<String>,
    #[serde(rename = "userProvince")]
    pub user_province: Option<String>,
    #[serde(rename = "userPostalCode")]
    pub user_postal_code: Option<String>,
}

/// POST /api/users/register - create a user profile row
pub async fn register(
    Extension(pool): Extension<MySqlPool>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let required = (
        body.firstname.as_deref().filter(|s| !s.is_empty()),
        body.lastname.as_deref().filter(|s| !s.is_empty()),
        body.username.as_deref().filter(|s| !s.is_empty()),
        body.email.as_deref().filter(|s| !s.is_empty()),
    );
    let (Some(firstname), Some(lastname), Some(username), Some(email)) = required else {
        return Err(ApiError::MissingParam(
            "First name, last name, username, and email are required",
        ));
    };

    sqlx::query(
        "INSERT INTO user_profile (
            email, first_name, last_name, username, profession, phone_number,
            address_line1, city, province, postal_code, role, status
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, '1', '1')",
    )
    .bind(email)
    .bind(firstname)
    .bind(lastname)
    .bind(username)
    .bind(&body.profession)
    .bind(&body.phone_number)
    .bind(&body.user_address)
    .bind(&body.user_city)
    .bind(&body.user_province)
    .bind(&body.user_postal_code)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Error registering user: {}", e);
        ApiError::Internal("Error registering user")
    })?;

    Ok("User registered successfully")
}

#[derive(Debug, Deserialize)]
pub struct CheckUserRequest {
    pub email: Option<String>,
}

/// POST /api/users/check-user - existence probe by email
pub async fn check_user(
    Extension(pool): Extension<MySqlPool>,
    Json(body): Json<CheckUserRequest>,
) -> impl IntoResponse {
    let email = body.email.unwrap_or_default();

    let count: Result<i64, sqlx::Error> =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_profile WHERE email = ?")
            .bind(&email)
            .fetch_one(&pool)
            .await;

    match count {
        Ok(count) => Json(json!({ "exists": count > 0 })).into_response(),
        Err(e) => {
            tracing::error!("Database error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Database error" })),
            )
                .into_response()
        }
    }
}
