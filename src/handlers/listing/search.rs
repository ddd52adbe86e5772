use axum::{Extension, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Serialize, FromRow)]
pub struct SearchResultRow {
    pub property_id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub property_name: String,
    pub address_line1: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub growth_zone: String,
    pub crop: String,
    pub dimensions_length: Decimal,
    pub dimensions_width: Decimal,
    pub dimensions_height: Decimal,
    pub area: Decimal,
    pub soil_type: String,
    pub rent_base_price: Decimal,
    #[serde(rename = "propertyImage")]
    pub property_image: Option<String>,
}

/// GET /api/getSearchResults - every active listing with owner, location,
/// a representative crop, and a representative image
pub async fn search(
    Extension(pool): Extension<MySqlPool>,
) -> Result<Json<Vec<SearchResultRow>>, ApiError> {
    let rows = sqlx::query_as::<_, SearchResultRow>(
        "SELECT
            pl.property_id,
            pl.user_id,
            pl.property_name,
            plo.address_line1,
            plo.city,
            plo.province,
            plo.postal_code,
            plo.longitude,
            plo.latitude,
            up.first_name,
            up.last_name,
            up.username,
            pl.growth_zone,
            MIN(pc.crop_name) AS crop,
            pl.dimensions_length,
            pl.dimensions_width,
            pl.dimensions_height,
            pl.dimensions_length * pl.dimensions_width AS area,
            pl.soil_type,
            pl.rent_base_price,
            MIN(ppi.image_url) AS property_image
        FROM user_profile up
        JOIN property_listing pl ON up.user_id = pl.user_id
        JOIN property_location plo ON pl.location_id = plo.location_id
        JOIN property_crops pc ON pl.property_id = pc.property_id
        LEFT JOIN property_primary_images ppi ON pl.property_id = ppi.property_id
        WHERE pl.status = '1'
        GROUP BY
            pl.property_id,
            pl.user_id,
            pl.property_name,
            plo.address_line1,
            plo.city,
            plo.province,
            plo.postal_code,
            plo.longitude,
            plo.latitude,
            up.first_name,
            up.last_name,
            up.username,
            pl.growth_zone,
            pl.dimensions_length,
            pl.dimensions_width,
            pl.dimensions_height,
            pl.soil_type,
            pl.rent_base_price",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(rows))
}
