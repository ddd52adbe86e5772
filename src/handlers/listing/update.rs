use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::MySqlPool;

use crate::error::ApiError;
use crate::services::listing::{ListingPatch, ListingService, Location};

#[derive(Debug, Deserialize)]
pub struct UpdateListingRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    #[serde(rename = "propertyName")]
    pub property_name: String,
    pub location_id: Option<i64>,
    #[serde(rename = "addressLine1")]
    pub address_line1: String,
    pub city: String,
    pub province: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub country: String,
    pub growthzone: String,
    pub description: Option<String>,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "soilType")]
    pub soil_type: String,
    pub amenities: Option<String>,
    #[serde(rename = "possibleCrops")]
    pub possible_crops: Option<Vec<String>>,
    pub restrictions: Option<String>,
    pub price: f64,
    #[serde(rename = "primaryImageUrl")]
    pub primary_image_url: Option<String>,
    #[serde(rename = "otherImageUrls")]
    pub other_image_urls: Option<Vec<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// PATCH /api/updatePropertyListing/:propertyId - rewrite a listing the
/// caller owns; association sets are replaced only when supplied
pub async fn update(
    Extension(pool): Extension<MySqlPool>,
    Path(property_id): Path<i64>,
    Json(body): Json<UpdateListingRequest>,
) -> Result<Json<Value>, ApiError> {
    let user_id = body
        .user_id
        .ok_or_else(|| ApiError::BadRequest("Missing required data".to_string()))?;

    let patch = ListingPatch {
        property_name: body.property_name,
        location_id: body.location_id,
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

    let property_id = ListingService::new(pool)
        .update_listing(property_id, user_id, patch)
        .await?;

    Ok(Json(json!({ "message": "Property updated successfully", "propertyId": property_id })))
}
