use axum::{extract::Query, Extension, Json};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UserPropertiesQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct UserPropertyRow {
    pub property_id: i64,
    pub property_name: String,
    pub address_line1: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub image_url: Option<String>,
}

/// GET /api/getUserProperties - active listings for an owner; empty list
/// when none exist
pub async fn user_properties(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<UserPropertiesQuery>,
) -> Result<Json<Vec<UserPropertyRow>>, ApiError> {
    let user_id = query
        .user_id
        .ok_or(ApiError::MissingParam("userID is required"))?;

    let rows = sqlx::query_as::<_, UserPropertyRow>(
        "SELECT p.property_id, p.property_name,
                l.address_line1, l.city, l.province, l.postal_code,
                ppi.image_url
         FROM property_listing p
         JOIN property_location l ON p.location_id = l.location_id
         LEFT JOIN property_primary_images ppi ON p.property_id = ppi.property_id
         WHERE p.user_id = ? AND p.status = '1'",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Database error: {}", e);
        ApiError::Internal("An error occurred while fetching properties")
    })?;

    Ok(Json(rows))
}
