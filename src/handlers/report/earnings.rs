use axum::{extract::Query, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct EarningsQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct MonthlyEarningsRow {
    #[serde(rename = "YEAR")]
    pub year: i32,
    #[serde(rename = "MONTH")]
    pub month: i32,
    pub total_rent: Option<f64>,
}

/// GET /api/getEarnings - paid-out earnings per month for one owner
pub async fn monthly(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<EarningsQuery>,
) -> Result<Json<Value>, ApiError> {
    let user_id = query
        .user_id
        .ok_or(ApiError::MissingParam("userID is required"))?;

    let rows = sqlx::query_as::<_, MonthlyEarningsRow>(
        "SELECT
            YEAR(p.payout_date) AS year,
            MONTH(p.payout_date) AS month,
            CAST(SUM(r.rent_base_price) AS DOUBLE) AS total_rent
        FROM rental r
        JOIN payment p ON r.rental_id = p.rental_id
        WHERE p.status = 'P'
          AND p.payout_date < CURDATE()
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

    if rows.is_empty() {
        return Ok(Json(json!({ "message": "You have no earnings" })));
    }

    Ok(Json(serde_json::to_value(rows).unwrap_or(Value::Null)))
}

#[derive(Debug, Deserialize)]
pub struct EarningsDetailsQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
    pub year: Option<i32>,
    pub month: Option<i32>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct DailyEarningsRow {
    pub day: i32,
    pub daily_total_rent: Option<f64>,
}

/// GET /api/getEarnings/details - per-day earnings inside one month
pub async fn details(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<EarningsDetailsQuery>,
) -> Result<Json<Vec<DailyEarningsRow>>, ApiError> {
    let (Some(user_id), Some(year), Some(month)) = (query.user_id, query.year, query.month) else {
        return Err(ApiError::MissingParam("userID, year, and month are required"));
    };

    let rows = sqlx::query_as::<_, DailyEarningsRow>(
        "SELECT
            DAY(p.payout_date) AS day,
            CAST(SUM(r.rent_base_price) AS DOUBLE) AS daily_total_rent
        FROM rental r
        JOIN payment p ON r.rental_id = p.rental_id
        WHERE p.status = 'P'
          AND p.payout_date < CURDATE()
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

    if rows.is_empty() {
        return Err(ApiError::NotFound(
            "No detailed earnings found for the specified month",
        ));
    }

    Ok(Json(rows))
}
