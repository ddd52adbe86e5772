use axum::{extract::Query, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PayoutsQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
}

#[derive(Debug, FromRow)]
struct PayoutRow {
    year: i32,
    month: String,
    total_earnings: Option<f64>,
}

/// GET /api/getPayouts - one row per month an owner was paid, amounts
/// formatted as currency only at the response boundary
pub async fn payouts(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<PayoutsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = query
        .user_id
        .ok_or(ApiError::MissingParam("userID is required"))?;

    let rows = sqlx::query_as::<_, PayoutRow>(
        "SELECT
            YEAR(p.payout_date) AS year,
            MONTHNAME(p.payout_date) AS month,
            CAST(SUM(p.rent_base_price) AS DOUBLE) AS total_earnings
        FROM payment p
        JOIN rental r ON p.rental_id = r.rental_id
        JOIN property_listing pl ON r.property_id = pl.property_id
        WHERE pl.user_id = ?
          AND p.payout_date IS NOT NULL
        GROUP BY year, month
        ORDER BY year ASC, MIN(p.payout_date) ASC",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await;

    let rows = match rows {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Database error: {}", e);
            return Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An error occurred while fetching payouts" })),
            )
                .into_response());
        }
    };

    let formatted: Vec<_> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            json!({
                "id": index + 1,
                "year": row.year,
                "month": row.month,
                "amount": format!("${:.2}", row.total_earnings.unwrap_or(0.0)),
            })
        })
        .collect();

    Ok(Json(formatted).into_response())
}
