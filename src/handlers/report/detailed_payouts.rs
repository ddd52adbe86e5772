use axum::{extract::Query, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct DetailedPayoutsQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
}

#[derive(Debug, FromRow)]
pub struct DetailedPayoutRow {
    pub year: i32,
    pub month: String,
    pub day: i32,
    pub amount: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PayoutDay {
    pub day: i32,
    pub amount: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MonthlyPayouts {
    pub year: i32,
    pub month: String,
    pub total: String,
    pub details: Vec<PayoutDay>,
}

/// GET /api/getDetailedPayouts - payouts grouped year then month with a
/// per-day breakdown
pub async fn detailed_payouts(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<DetailedPayoutsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = query
        .user_id
        .ok_or(ApiError::MissingParam("userID is required"))?;

    let rows = sqlx::query_as::<_, DetailedPayoutRow>(
        "SELECT
            YEAR(p.payout_date) AS year,
            MONTHNAME(p.payout_date) AS month,
            DAY(p.payout_date) AS day,
            CAST(p.rent_base_price AS DOUBLE) AS amount
        FROM payment p
        JOIN rental r ON p.rental_id = r.rental_id
        JOIN property_listing pl ON r.property_id = pl.property_id
        WHERE pl.user_id = ?
          AND p.payout_date IS NOT NULL
        ORDER BY year ASC, MONTH(p.payout_date) ASC, day ASC",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await;

    match rows {
        Ok(rows) => Ok(Json(group_payouts(rows)).into_response()),
        Err(e) => {
            tracing::error!("Database error: {}", e);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An error occurred while fetching payouts" })),
            )
                .into_response())
        }
    }
}

/// Fold flat day rows into month groups. Rows arrive sorted year, month,
/// day, so each group is contiguous. Totals accumulate as f64 and are
/// rendered to two decimal places only here, at the output boundary.
pub fn group_payouts(rows: Vec<DetailedPayoutRow>) -> Vec<MonthlyPayouts> {
    struct Group {
        year: i32,
        month: String,
        total: f64,
        details: Vec<(i32, f64)>,
    }

    let mut groups: Vec<Group> = Vec::new();
    for row in rows {
        match groups.last_mut() {
            Some(group) if group.year == row.year && group.month == row.month => {
                group.total += row.amount;
                group.details.push((row.day, row.amount));
            }
            _ => groups.push(Group {
                year: row.year,
                month: row.month,
                total: row.amount,
                details: vec![(row.day, row.amount)],
            }),
        }
    }

    groups
        .into_iter()
        .map(|group| MonthlyPayouts {
            year: group.year,
            month: group.month,
            total: format!("{:.2}", group.total),
            details: group
                .details
                .into_iter()
                .map(|(day, amount)| PayoutDay {
                    day,
                    amount: format!("{:.2}", amount),
                })
                .collect(),
        })
        .collect()
}
