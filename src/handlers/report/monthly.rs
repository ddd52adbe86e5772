use axum::{extract::Query, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    pub year: Option<i32>,
    pub month: Option<i32>,
}

#[derive(Debug, FromRow)]
struct MonthlyReportRow {
    number_of_bookings: i64,
    total_booking_amount: Option<f64>,
    total_revenue: Option<f64>,
}

/// GET /api/getAllMonthlyReport - booking count, gross amount, and the 3%
/// platform revenue for one month
pub async fn monthly_report(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<MonthlyReportQuery>,
) -> Result<Json<Value>, ApiError> {
    let (Some(year), Some(month)) = (query.year, query.month) else {
        return Err(ApiError::MissingParam("Year and month are required"));
    };

    let row = sqlx::query_as::<_, MonthlyReportRow>(
        "SELECT
            COUNT(r.rental_id) AS number_of_bookings,
            CAST(SUM(r.rent_base_price) AS DOUBLE) AS total_booking_amount,
            CAST(SUM(r.rent_base_price) * 0.03 AS DOUBLE) AS total_revenue
        FROM rental r
        JOIN payment p ON r.rental_id = p.rental_id
        WHERE p.status = 'P'
          AND YEAR(p.payout_date) = ?
          AND MONTH(p.payout_date) = ?",
    )
    .bind(year)
    .bind(month)
    .fetch_optional(&pool)
    .await?
    .ok_or(ApiError::NotFound("No bookings found for the specified month"))?;

    Ok(Json(json!({
        "number_of_bookings": row.number_of_bookings,
        "total_booking_amount": row.total_booking_amount,
        "total_revenue": format!("{:.2}", row.total_revenue.unwrap_or(0.0)),
    })))
}
