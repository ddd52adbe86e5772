use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Full user profile row, returned verbatim by the profile lookups.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub profession: Option<String>,
    pub phone_number: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
