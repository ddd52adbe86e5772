use axum::{extract::Query, Extension, Json};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RentalDetailsQuery {
    #[serde(rename = "rentalID")]
    pub rental_id: Option<i64>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct RentalDetailsRow {
    pub rental_id: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub rent_base_price: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub transaction_fee: Option<Decimal>,
    #[serde(rename = "renter_ID")]
    pub renter_id: i64,
    pub property_id: i64,
    pub property_name: String,
    pub growth_zone: String,
    pub dimensions_length: Decimal,
    pub dimensions_width: Decimal,
    pub dimensions_height: Decimal,
    pub description: Option<String>,
    pub soil_type: String,
    pub amenities: String,
    pub restrictions: String,
    pub property_owner: String,
    pub address_line1: String,
    pub city: String,
    pub province: String,
    pub image_url: Option<String>,
    pub crop_name: Option<String>,
}

/// GET /api/GetRentalDetails - one reservation joined with its listing,
/// owner, and location
pub async fn details(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<RentalDetailsQuery>,
) -> Result<Json<RentalDetailsRow>, ApiError> {
    let rental_id = query
        .rental_id
        .ok_or(ApiError::MissingParam("rentalID is required"))?;

    let row = sqlx::query_as::<_, RentalDetailsRow>(
        "SELECT
            r.rental_id, r.start_date, r.end_date, r.status,
            r.rent_base_price, r.tax_amount, r.transaction_fee, r.renter_id,
            pl.property_id, pl.property_name, pl.growth_zone,
            pl.dimensions_length, pl.dimensions_width, pl.dimensions_height, pl.description,
            pl.soil_type, pl.amenities, pl.restrictions,
            CONCAT(up.first_name, ' ', up.last_name) AS property_owner,
            loc.address_line1, loc.city, loc.province,
            p.image_url,
            pc.crop_name
        FROM rental r
        JOIN property_listing pl ON r.property_id = pl.property_id
        JOIN user_profile up ON pl.user_id = up.user_id
        JOIN property_location loc ON pl.location_id = loc.location_id
        LEFT JOIN property_primary_images p ON pl.property_id = p.property_id
        LEFT JOIN property_crops pc ON pl.property_id = pc.property_id
        WHERE r.rental_id = ?",
    )
    .bind(rental_id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Database error: {}", e);
        ApiError::Internal("An error occurred while fetching reservation")
    })?
    .ok_or(ApiError::NotFound("Reservation not found"))?;

    Ok(Json(row))
}
