use axum::{Extension, Json};
use serde::Serialize;
use sqlx::{FromRow, MySqlPool};

use crate::error::ApiError;

#[derive(Debug, Serialize, FromRow)]
pub struct ModeratorUserRow {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub username: String,
    pub status: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub profession: Option<String>,
    pub full_address: Option<String>,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub active_properties: String,
    pub location: Option<String>,
    #[serde(rename = "renterOrOwner")]
    pub renter_or_owner: String,
}

/// GET /api/getAllUsers - roster of renters and owners with display
/// columns computed in SQL
pub async fn all_users(
    Extension(pool): Extension<MySqlPool>,
) -> Result<Json<Vec<ModeratorUserRow>>, ApiError> {
    let rows = sqlx::query_as::<_, ModeratorUserRow>(
        "SELECT
            u.user_id,
            u.username,
            u.status,
            u.email,
            u.phone_number,
            u.profession,
            CONCAT(u.address_line1, ' ', u.city, ' ', u.province, ' ', u.postal_code) AS full_address,
            CONCAT(u.first_name, ' ', u.last_name) AS name,
            DATE_FORMAT(u.created_at, '%M %Y') AS created_at,
            CONCAT(COUNT(DISTINCT p.property_id), ' active properties') AS active_properties,
            CONCAT(u.city, ', ', u.province) AS location,
            CASE
                WHEN u.role = '1' AND EXISTS (
                    SELECT 1
                    FROM property_listing pl
                    WHERE pl.user_id = u.user_id
                ) THEN 'Renter & Owner'
                WHEN u.role = '1' THEN 'Renter'
                ELSE 'Unknown'
            END AS renter_or_owner
        FROM user_profile u
        LEFT JOIN property_listing p ON u.user_id = p.user_id AND p.status = '1'
        WHERE u.role IN ('1', '2')
        GROUP BY u.user_id",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(rows))
}
