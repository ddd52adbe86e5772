use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;

use crate::error::ApiError;
use crate::services::listing::{ListingService, Location, NewListing};

#[derive(Debug, Deserialize)]
pub struct AddListingRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    #[serde(rename = "propertyId")]
    pub property_id: Option<i64>,
    #[serde(rename = "propertyName")]
    pub property_name: String,
    #[serde(rename = "addressLine1")]
    pub address_line1: String,
    pub city: String,
    pub province: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub country: String,
    pub growthzone: String,
    #[serde(default)]
    pub description: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "soilType")]
    pub soil_type: String,
    pub amenities: Option<String>,
    #[serde(rename = "possibleCrops", default)]
    pub possible_crops: Vec<String>,
    pub restrictions: Option<String>,
    pub price: f64,
    #[serde(rename = "primaryImageUrl")]
    pub primary_image_url: String,
    #[serde(rename = "otherImageUrls", default)]
    pub other_image_urls: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// POST /api/addPropertyListing - create the five-table listing record in
/// one transaction
pub async fn create(
    Extension(pool): Extension<MySqlPool>,
    Json(body): Json<AddListingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = body.user_id.ok_or(ApiError::MissingParam("userId is required"))?;
    let property_id = body
        .property_id
        .ok_or(ApiError::MissingParam("propertyId is required"))?;

    let listing = NewListing {
        user_id,
        property_id,
        property_name: body.property_name,
        location: Location {
            address_line1: body.address_line1,
            city: body.city,
            province: body.province,
            postal_code: body.postal_code,
            country: body.country,
            latitude: body.latitude,
            longitude: body.longitude,
        },
        growth_zone: body.growthzone,
        description: body.description,
        dimensions_length: body.length,
        dimensions_width: body.width,
        dimensions_height: body.height,
        soil_type: body.soil_type,
        amenities: body.amenities,
        restrictions: body.restrictions,
        rent_base_price: body.price,
        crops: body.possible_crops,
        primary_image_url: body.primary_image_url,
        other_image_urls: body.other_image_urls,
    };

    let property_id = ListingService::new(pool).create_listing(listing).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Property added successfully", "propertyId": property_id })),
    ))
}
