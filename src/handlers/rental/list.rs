use axum::{extract::Query, Extension, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RentalListQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct RentalListRow {
    pub rental_id: i64,
    pub property_id: i64,
    pub property_name: String,
    pub growth_zone: String,
    pub property_owner: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub address_line1: String,
    pub city: String,
    pub province: String,
    pub image_url: Option<String>,
}

/// GET /api/getRentalList - active reservations for a renter; empty list
/// when none exist
pub async fn list(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<RentalListQuery>,
) -> Result<Json<Vec<RentalListRow>>, ApiError> {
    let user_id = query
        .user_id
        .ok_or(ApiError::MissingParam("userID is required"))?;

    let rows = sqlx::query_as::<_, RentalListRow>(
        "SELECT
            r.rental_id,
            pl.property_id, pl.property_name, pl.growth_zone,
            CONCAT(up.first_name, ' ', up.last_name) AS property_owner,
            r.start_date, r.end_date,
            loc.address_line1, loc.city, loc.province,
            p.image_url
        FROM rental r
        JOIN property_listing pl ON r.property_id = pl.property_id
        JOIN user_profile up ON pl.user_id = up.user_id
        JOIN property_location loc ON pl.location_id = loc.location_id
        LEFT JOIN property_primary_images p ON pl.property_id = p.property_id
        WHERE r.renter_id = ? AND r.status = '1'",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Database error: {}", e);
        ApiError::Internal("An error occurred while fetching reservations")
    })?;

    Ok(Json(rows))
}
