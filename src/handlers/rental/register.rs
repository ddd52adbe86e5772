use axum::{http::StatusCode, response::IntoResponse, response::Response, Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterRentalRequest {
    pub property_id: Option<i64>,
    #[serde(rename = "renter_ID")]
    pub renter_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub rent_base_price: Option<f64>,
    pub tax_amount: Option<f64>,
    pub transaction_fee: Option<f64>,
}

/// POST /api/registerRentalDetails - create a reservation and return the
/// generated rental id
pub async fn register(
    Extension(pool): Extension<MySqlPool>,
    Json(body): Json<RegisterRentalRequest>,
) -> Result<Response, ApiError> {
    let (Some(property_id), Some(renter_id)) = (body.property_id, body.renter_id) else {
        return Err(ApiError::MissingParam("Property id and Renter id are required"));
    };

    let result = sqlx::query(
        "INSERT INTO rental (
            property_id, renter_id, start_date, end_date, status,
            rent_base_price, tax_amount, transaction_fee
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(property_id)
    .bind(renter_id)
    .bind(body.start_date)
    .bind(body.end_date)
    .bind(body.status.as_deref().unwrap_or("1"))
    .bind(body.rent_base_price)
    .bind(body.tax_amount)
    .bind(body.transaction_fee)
    .execute(&pool)
    .await;

    match result {
        Ok(result) => {
            Ok(Json(json!({ "rent_id": result.last_insert_id() })).into_response())
        }
        Err(e) => {
            tracing::error!("Error registering rental information to db: {}", e);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Database error" })),
            )
                .into_response())
        }
    }
}
