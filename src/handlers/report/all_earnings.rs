use axum::{Extension, Json};
use serde::Serialize;
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Serialize, FromRow)]
pub struct PlatformEarningsRow {
    #[serde(rename = "YEAR")]
    pub year: Option<i32>,
    #[serde(rename = "MONTH")]
    pub month: Option<i32>,
    pub total_rent: Option<f64>,
}

/// GET /api/getAllEarningsReport - platform-wide earnings per month
pub async fn all_earnings(
    Extension(pool): Extension<MySqlPool>,
) -> Result<Json<Vec<PlatformEarningsRow>>, ApiError> {
    let rows = sqlx::query_as::<_, PlatformEarningsRow>(
        "SELECT
            YEAR(p.payout_date) AS year,
            MONTH(p.payout_date) AS month,
            CAST(SUM(r.rent_base_price) AS DOUBLE) AS total_rent
        FROM rental r
        JOIN payment p ON r.rental_id = p.rental_id
        JOIN property_listing pl ON r.property_id = pl.property_id
        GROUP BY YEAR(p.payout_date), MONTH(p.payout_date)
        ORDER BY year, month",
    )
    .fetch_all(&pool)
    .await?;

    if rows.is_empty() {
        return Err(ApiError::NotFound("No earnings found"));
    }

    Ok(Json(rows))
}
