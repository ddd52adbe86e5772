use axum::{extract::Query, Extension, Json};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct SummaryRow {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub total_rent: Option<f64>,
}

/// GET /api/moderatorReport/summary - one owner's paid earnings per month,
/// for the moderator view
pub async fn summary(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Vec<SummaryRow>>, ApiError> {
    let user_id = query
        .user_id
        .ok_or(ApiError::MissingParam("userID is required"))?;

    let rows = sqlx::query_as::<_, SummaryRow>(
        "SELECT
            YEAR(p.payout_date) AS year,
            MONTH(p.payout_date) AS month,
            CAST(SUM(r.rent_base_price) AS DOUBLE) AS total_rent
        FROM rental r
        JOIN payment p ON r.rental_id = p.rental_id
        WHERE p.status = 'P'
          AND r.rental_id IN (
            SELECT rental_id
            FROM rental
            WHERE property_id IN (
              SELECT property_id
              FROM property_listing
              WHERE user_id = ?
            )
          )
        GROUP BY YEAR(p.payout_date), MONTH(p.payout_date)
        ORDER BY year, month",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct DetailsQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
    pub year: Option<i32>,
    pub month: Option<i32>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct DetailsRow {
    pub day: i32,
    pub daily_total_rent: Option<f64>,
}

/// GET /api/moderatorReport/details - per-day earnings for one owner and
/// month, for the moderator view; empty list when none
pub async fn details(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<Vec<DetailsRow>>, ApiError> {
    let (Some(user_id), Some(year), Some(month)) = (query.user_id, query.year, query.month) else {
        return Err(ApiError::MissingParam("userID, year, and month are required"));
    };

    let rows = sqlx::query_as::<_, DetailsRow>(
        "SELECT
            DAY(p.payout_date) AS day,
            CAST(SUM(r.rent_base_price) AS DOUBLE) AS daily_total_rent
        FROM rental r
        JOIN payment p ON r.rental_id = p.rental_id
        WHERE p.status = 'P'
          AND r.rental_id IN (
            SELECT rental_id
            FROM rental
            WHERE property_id IN (
              SELECT property_id
              FROM property_listing
              WHERE user_id = ?
            )
          )
          AND YEAR(p.payout_date) = ?
          AND MONTH(p.payout_date) = ?
        GROUP BY DAY(p.payout_date)
        ORDER BY day",
    )
    .bind(user_id)
    .bind(year)
    .bind(month)
    .fetch_all(&pool)
    .await?;

    Ok(Json(rows))
}
