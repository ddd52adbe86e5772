use axum::{response::IntoResponse, Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct EditRentalRequest {
    pub rental_id: Option<i64>,
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

/// PATCH /api/editRentalDetails - overwrite a reservation's fields
pub async fn edit(
    Extension(pool): Extension<MySqlPool>,
    Json(body): Json<EditRentalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let rental_id = body
        .rental_id
        .ok_or(ApiError::MissingParam("Rental id is required"))?;

    let result = sqlx::query(
        "UPDATE rental
         SET property_id = ?, renter_id = ?, start_date = ?, end_date = ?, status = ?,
             rent_base_price = ?, tax_amount = ?, transaction_fee = ?
         WHERE rental_id = ?",
    )
    .bind(body.property_id)
    .bind(body.renter_id)
    .bind(body.start_date)
    .bind(body.end_date)
    .bind(&body.status)
    .bind(body.rent_base_price)
    .bind(body.tax_amount)
    .bind(body.transaction_fee)
    .bind(rental_id)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Database error: {}", e);
        ApiError::Internal("Error updating Rental information.")
    })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Rental_id not found."));
    }

    Ok("Rental information is updated.")
}
