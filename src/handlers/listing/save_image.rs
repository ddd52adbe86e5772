use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;

#[derive(Debug, Deserialize)]
pub struct SaveImageRequest {
    #[serde(rename = "propertyId")]
    pub property_id: Option<i64>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// POST /api/savePropertyImage - append one gallery image row
pub async fn save_image(
    Extension(pool): Extension<MySqlPool>,
    Json(body): Json<SaveImageRequest>,
) -> impl IntoResponse {
    let (Some(property_id), Some(image_url)) = (body.property_id, body.image_url.as_deref()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Property ID and Image URL are required",
            })),
        )
            .into_response();
    };

    let result = sqlx::query("INSERT INTO property_images (property_id, image_path) VALUES (?, ?)")
        .bind(property_id)
        .bind(image_url)
        .execute(&pool)
        .await;

    match result {
        Ok(_) => Json(json!({
            "success": true,
            "message": "Image URL saved successfully",
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Database error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Failed to save image URL",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
