use axum::{extract::Query, Extension, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct DetailsQuery {
    pub property_id: Option<i64>,
}

#[derive(Debug, FromRow)]
struct DetailsRow {
    property_id: i64,
    property_name: String,
    description: Option<String>,
    growth_zone: String,
    user_id: i64,
    dimension: String,
    soil_type: String,
    amenities: String,
    restrictions: String,
    rent_base_price: Decimal,
    address_line1: String,
    city: String,
    province: String,
    postal_code: String,
    country: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    crops: Option<String>,
    primary_image_url: Option<String>,
    other_image_urls: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

/// GET /api/getPropertyDetails - single listing with location, crops,
/// images, and owner folded in
pub async fn details(
    Extension(pool): Extension<MySqlPool>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<Value>, ApiError> {
    let property_id = query
        .property_id
        .ok_or(ApiError::MissingParam("property_id is required"))?;

    let row = sqlx::query_as::<_, DetailsRow>(
        "SELECT
            p.property_id, p.property_name, p.description, p.growth_zone, p.user_id,
            CONCAT(p.dimensions_length, ' L x ', p.dimensions_width, ' W x ', p.dimensions_height, ' H') AS dimension,
            p.soil_type, p.amenities, p.restrictions, p.rent_base_price,
            l.address_line1, l.city, l.province, l.postal_code, l.country,
            l.latitude, l.longitude,
            GROUP_CONCAT(DISTINCT c.crop_name) AS crops,
            ppi.image_url AS primary_image_url,
            GROUP_CONCAT(DISTINCT poi.image_url) AS other_image_urls,
            u.first_name, u.last_name
        FROM property_listing p
        JOIN property_location l ON p.location_id = l.location_id
        LEFT JOIN property_crops c ON p.property_id = c.property_id
        LEFT JOIN property_primary_images ppi ON p.property_id = ppi.property_id
        LEFT JOIN property_other_images poi ON p.property_id = poi.property_id
        LEFT JOIN user_profile u ON p.user_id = u.user_id
        WHERE p.property_id = ?
        GROUP BY p.property_id",
    )
    .bind(property_id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Database error: {}", e);
        ApiError::Internal("An error occurred while fetching property details")
    })?
    .ok_or(ApiError::NotFound("Property not found"))?;

    Ok(Json(json!({
        "property_id": row.property_id,
        "property_name": row.property_name,
        "description": row.description,
        "growth_zone": row.growth_zone,
        "userID": row.user_id,
        "dimension": row.dimension,
        "soil_type": row.soil_type,
        "rent_base_price": row.rent_base_price,
        "address_line1": row.address_line1,
        "city": row.city,
        "province": row.province,
        "postal_code": row.postal_code,
        "country": row.country,
        "latitude": row.latitude,
        "longitude": row.longitude,
        "amenities": split_trimmed(Some(row.amenities)),
        "restrictions": split_trimmed(Some(row.restrictions)),
        "crops": split_trimmed(row.crops),
        "primaryImage": row.primary_image_url,
        "otherImages": split_raw(row.other_image_urls),
        "owner": {
            "firstName": row.first_name,
            "lastName": row.last_name,
        },
    })))
}

/// GROUP_CONCAT output to a trimmed list; None and "" both collapse to [].
fn split_trimmed(value: Option<String>) -> Vec<String> {
    match value {
        Some(s) if !s.is_empty() => s.split(',').map(|item| item.trim().to_string()).collect(),
        _ => Vec::new(),
    }
}

/// Image URLs are split verbatim; URLs may legitimately contain spaces.
fn split_raw(value: Option<String>) -> Vec<String> {
    match value {
        Some(s) if !s.is_empty() => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_concat_splits_and_trims() {
        assert_eq!(
            split_trimmed(Some("Carrot, Barley,Kale".to_string())),
            vec!["Carrot", "Barley", "Kale"]
        );
        assert_eq!(split_trimmed(Some(String::new())), Vec::<String>::new());
        assert_eq!(split_trimmed(None), Vec::<String>::new());
    }

    #[test]
    fn image_lists_split_verbatim() {
        assert_eq!(
            split_raw(Some("https://a/1.jpg,https://a/2.jpg".to_string())),
            vec!["https://a/1.jpg", "https://a/2.jpg"]
        );
        assert_eq!(split_raw(None), Vec::<String>::new());
    }
}
