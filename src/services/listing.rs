use sqlx::{MySql, MySqlPool, QueryBuilder, Transaction};
use std::time::Duration;
use thiserror::Error;

/// Default values substituted for optional free-text listing fields that
/// arrive absent or empty. Applied once at the service boundary; nothing
/// downstream ever sees an empty string for these columns.
const FIELD_DEFAULTS: &[(&str, &str)] = &[
    ("amenities", "None Listed"),
    ("restrictions", "None Listed"),
];

fn default_for(field: &str) -> &'static str {
    FIELD_DEFAULTS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, value)| *value)
        .unwrap_or("")
}

fn text_or_default(field: &str, value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default_for(field).to_string(),
    }
}

/// Step-named failures from the multi-table listing writer. Any error
/// rolls the whole transaction back; no partial write is ever visible.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Transaction failed")]
    Begin(#[source] sqlx::Error),

    #[error("Failed to insert location")]
    InsertLocation(#[source] sqlx::Error),

    #[error("Failed to insert property listing")]
    InsertListing(#[source] sqlx::Error),

    #[error("A property with id {id} already exists")]
    DuplicateId {
        id: i64,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to insert crops")]
    InsertCrops(#[source] sqlx::Error),

    #[error("Failed to insert primary image")]
    InsertPrimaryImage(#[source] sqlx::Error),

    #[error("Failed to insert other images")]
    InsertOtherImages(#[source] sqlx::Error),

    #[error("Failed to fetch property")]
    FetchListing(#[source] sqlx::Error),

    #[error("Property not found or unauthorized")]
    NotFoundOrUnauthorized,

    #[error("Failed to update property listing")]
    UpdateListing(#[source] sqlx::Error),

    #[error("Failed to update location")]
    UpdateLocation(#[source] sqlx::Error),

    #[error("Failed to update crops")]
    ReplaceCrops(#[source] sqlx::Error),

    #[error("Failed to update primary image")]
    UpdatePrimaryImage(#[source] sqlx::Error),

    #[error("Failed to update other images")]
    ReplaceOtherImages(#[source] sqlx::Error),

    #[error("Failed to commit transaction")]
    Commit(#[source] sqlx::Error),

    #[error("Transaction timed out after {0:?}")]
    Timeout(Duration),
}

impl ListingError {
    /// Driver-level detail for the JSON `error` field, when the step failed
    /// inside the database.
    pub fn detail(&self) -> Option<String> {
        use std::error::Error;
        self.source().map(|e| e.to_string())
    }
}

/// Street address and coordinates for a listing's location row.
#[derive(Debug, Clone)]
pub struct Location {
    pub address_line1: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Full payload for creating a listing. The property id is chosen by the
/// caller, never generated by the store; uniqueness is enforced by the
/// primary key and surfaces as [`ListingError::DuplicateId`].
#[derive(Debug, Clone)]
pub struct NewListing {
    pub user_id: i64,
    pub property_id: i64,
    pub property_name: String,
    pub location: Location,
    pub growth_zone: String,
    pub description: String,
    pub dimensions_length: f64,
    pub dimensions_width: f64,
    pub dimensions_height: f64,
    pub soil_type: String,
    pub amenities: Option<String>,
    pub restrictions: Option<String>,
    pub rent_base_price: f64,
    pub crops: Vec<String>,
    pub primary_image_url: String,
    pub other_image_urls: Vec<String>,
}

/// Update payload. Association sets follow one policy: `None` keeps the
/// stored set untouched, `Some(list)` replaces it wholesale, and
/// `Some(vec![])` clears it. The location id falls back to the stored
/// value when not supplied.
#[derive(Debug, Clone)]
pub struct ListingPatch {
    pub property_name: String,
    pub location_id: Option<i64>,
    pub location: Location,
    pub growth_zone: String,
    pub description: Option<String>,
    pub dimensions_length: f64,
    pub dimensions_width: f64,
    pub dimensions_height: f64,
    pub soil_type: String,
    pub amenities: Option<String>,
    pub restrictions: Option<String>,
    pub rent_base_price: f64,
    pub crops: Option<Vec<String>>,
    pub primary_image_url: Option<String>,
    pub other_image_urls: Option<Vec<String>>,
}

/// Orchestrates the five-table listing write as a single atomic unit.
///
/// Owns an injected pool handle; each operation runs inside one scoped
/// transaction that rolls back on drop unless committed, with a bounded
/// deadline surfaced as [`ListingError::Timeout`].
#[derive(Clone)]
pub struct ListingService {
    pool: MySqlPool,
    transaction_timeout: Duration,
}

impl ListingService {
    pub fn new(pool: MySqlPool) -> Self {
        let secs = crate::config::config().database.transaction_timeout_secs;
        Self::with_timeout(pool, Duration::from_secs(secs))
    }

    pub fn with_timeout(pool: MySqlPool, transaction_timeout: Duration) -> Self {
        Self {
            pool,
            transaction_timeout,
        }
    }

    /// Insert location, listing, crops, primary image, and other images in
    /// strict order inside one transaction. Returns the caller-supplied
    /// property id on commit.
    pub async fn create_listing(&self, listing: NewListing) -> Result<i64, ListingError> {
        let deadline = self.transaction_timeout;
        match tokio::time::timeout(deadline, self.run_create(listing)).await {
            Ok(result) => result,
            // Dropping the in-flight future drops the open transaction,
            // which rolls it back.
            Err(_) => Err(ListingError::Timeout(deadline)),
        }
    }

    async fn run_create(&self, listing: NewListing) -> Result<i64, ListingError> {
        let mut tx = self.pool.begin().await.map_err(ListingError::Begin)?;

        let location_id = insert_location(&mut tx, &listing.location).await?;

        sqlx::query(
            "INSERT INTO property_listing (
                property_id, user_id, property_name, location_id, growth_zone, description,
                dimensions_length, dimensions_width, dimensions_height,
                soil_type, amenities, restrictions, rent_base_price
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(listing.property_id)
        .bind(listing.user_id)
        .bind(&listing.property_name)
        .bind(location_id)
        .bind(&listing.growth_zone)
        .bind(&listing.description)
        .bind(listing.dimensions_length)
        .bind(listing.dimensions_width)
        .bind(listing.dimensions_height)
        .bind(&listing.soil_type)
        .bind(text_or_default("amenities", listing.amenities.as_deref()))
        .bind(text_or_default("restrictions", listing.restrictions.as_deref()))
        .bind(listing.rent_base_price)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => ListingError::DuplicateId {
                id: listing.property_id,
                source: e,
            },
            _ => ListingError::InsertListing(e),
        })?;

        if !listing.crops.is_empty() {
            insert_crops(&mut tx, listing.property_id, &listing.crops)
                .await
                .map_err(ListingError::InsertCrops)?;
        }

        sqlx::query("INSERT INTO property_primary_images (property_id, image_url) VALUES (?, ?)")
            .bind(listing.property_id)
            .bind(&listing.primary_image_url)
            .execute(&mut *tx)
            .await
            .map_err(ListingError::InsertPrimaryImage)?;

        if !listing.other_image_urls.is_empty() {
            insert_other_images(&mut tx, listing.property_id, &listing.other_image_urls)
                .await
                .map_err(ListingError::InsertOtherImages)?;
        }

        tx.commit().await.map_err(ListingError::Commit)?;
        Ok(listing.property_id)
    }

    /// Update a listing the caller owns. A missing listing and a listing
    /// owned by someone else are deliberately indistinguishable.
    pub async fn update_listing(
        &self,
        property_id: i64,
        user_id: i64,
        patch: ListingPatch,
    ) -> Result<i64, ListingError> {
        let deadline = self.transaction_timeout;
        match tokio::time::timeout(deadline, self.run_update(property_id, user_id, patch)).await {
            Ok(result) => result,
            Err(_) => Err(ListingError::Timeout(deadline)),
        }
    }

    async fn run_update(
        &self,
        property_id: i64,
        user_id: i64,
        patch: ListingPatch,
    ) -> Result<i64, ListingError> {
        let mut tx = self.pool.begin().await.map_err(ListingError::Begin)?;

        let current_location_id: Option<i64> = sqlx::query_scalar(
            "SELECT location_id FROM property_listing WHERE property_id = ? AND user_id = ?",
        )
        .bind(property_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(ListingError::FetchListing)?;

        let current_location_id = current_location_id.ok_or(ListingError::NotFoundOrUnauthorized)?;
        let location_id = patch.location_id.unwrap_or(current_location_id);

        sqlx::query(
            "UPDATE property_listing SET
                user_id = ?, property_name = ?, location_id = ?, growth_zone = ?, description = ?,
                dimensions_length = ?, dimensions_width = ?, dimensions_height = ?,
                soil_type = ?, amenities = ?, restrictions = ?, rent_base_price = ?
            WHERE property_id = ?",
        )
        .bind(user_id)
        .bind(&patch.property_name)
        .bind(location_id)
        .bind(&patch.growth_zone)
        .bind(patch.description.as_deref().unwrap_or(""))
        .bind(patch.dimensions_length)
        .bind(patch.dimensions_width)
        .bind(patch.dimensions_height)
        .bind(&patch.soil_type)
        .bind(text_or_default("amenities", patch.amenities.as_deref()))
        .bind(text_or_default("restrictions", patch.restrictions.as_deref()))
        .bind(patch.rent_base_price)
        .bind(property_id)
        .execute(&mut *tx)
        .await
        .map_err(ListingError::UpdateListing)?;

        // Location rows are mutated in place, never re-created.
        sqlx::query(
            "UPDATE property_location SET
                address_line1 = ?, city = ?, province = ?, postal_code = ?, country = ?,
                latitude = ?, longitude = ?
            WHERE location_id = ?",
        )
        .bind(&patch.location.address_line1)
        .bind(&patch.location.city)
        .bind(&patch.location.province)
        .bind(&patch.location.postal_code)
        .bind(&patch.location.country)
        .bind(patch.location.latitude)
        .bind(patch.location.longitude)
        .bind(location_id)
        .execute(&mut *tx)
        .await
        .map_err(ListingError::UpdateLocation)?;

        if let Some(crops) = &patch.crops {
            sqlx::query("DELETE FROM property_crops WHERE property_id = ?")
                .bind(property_id)
                .execute(&mut *tx)
                .await
                .map_err(ListingError::ReplaceCrops)?;

            if !crops.is_empty() {
                insert_crops(&mut tx, property_id, crops)
                    .await
                    .map_err(ListingError::ReplaceCrops)?;
            }
        }

        if let Some(url) = &patch.primary_image_url {
            sqlx::query(
                "UPDATE property_primary_images
                 SET image_url = ?, updated_at = CURRENT_TIMESTAMP
                 WHERE property_id = ?",
            )
            .bind(url)
            .bind(property_id)
            .execute(&mut *tx)
            .await
            .map_err(ListingError::UpdatePrimaryImage)?;
        }

        if let Some(urls) = &patch.other_image_urls {
            sqlx::query("DELETE FROM property_other_images WHERE property_id = ?")
                .bind(property_id)
                .execute(&mut *tx)
                .await
                .map_err(ListingError::ReplaceOtherImages)?;

            if !urls.is_empty() {
                insert_other_images(&mut tx, property_id, urls)
                    .await
                    .map_err(ListingError::ReplaceOtherImages)?;
            }
        }

        tx.commit().await.map_err(ListingError::Commit)?;
        Ok(property_id)
    }
}

async fn insert_location(
    tx: &mut Transaction<'_, MySql>,
    location: &Location,
) -> Result<i64, ListingError> {
    let result = sqlx::query(
        "INSERT INTO property_location (address_line1, city, province, postal_code, country, latitude, longitude)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&location.address_line1)
    .bind(&location.city)
    .bind(&location.province)
    .bind(&location.postal_code)
    .bind(&location.country)
    .bind(location.latitude)
    .bind(location.longitude)
    .execute(&mut **tx)
    .await
    .map_err(ListingError::InsertLocation)?;

    Ok(result.last_insert_id() as i64)
}

async fn insert_crops(
    tx: &mut Transaction<'_, MySql>,
    property_id: i64,
    crops: &[String],
) -> Result<(), sqlx::Error> {
    let mut builder =
        QueryBuilder::<MySql>::new("INSERT INTO property_crops (property_id, crop_name) ");
    builder.push_values(crops, |mut row, crop| {
        row.push_bind(property_id);
        row.push_bind(crop);
    });
    builder.build().execute(&mut **tx).await?;
    Ok(())
}

async fn insert_other_images(
    tx: &mut Transaction<'_, MySql>,
    property_id: i64,
    urls: &[String],
) -> Result<(), sqlx::Error> {
    let mut builder =
        QueryBuilder::<MySql>::new("INSERT INTO property_other_images (property_id, image_url) ");
    builder.push_values(urls, |mut row, url| {
        row.push_bind(property_id);
        row.push_bind(url);
    });
    builder.build().execute(&mut **tx).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_fields_normalize_to_sentinel() {
        assert_eq!(text_or_default("amenities", None), "None Listed");
        assert_eq!(text_or_default("amenities", Some("")), "None Listed");
        assert_eq!(text_or_default("restrictions", None), "None Listed");
        assert_eq!(text_or_default("restrictions", Some("No pets")), "No pets");
        assert_eq!(text_or_default("amenities", Some("Shed, hose")), "Shed, hose");
    }

    #[test]
    fn unknown_fields_have_no_default() {
        assert_eq!(default_for("soil_type"), "");
    }

    #[test]
    fn step_errors_carry_contract_messages() {
        let err = ListingError::InsertLocation(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), "Failed to insert location");

        let err = ListingError::DuplicateId {
            id: 1001,
            source: sqlx::Error::RowNotFound,
        };
        assert_eq!(err.to_string(), "A property with id 1001 already exists");
        assert!(err.detail().is_some());

        let err = ListingError::NotFoundOrUnauthorized;
        assert_eq!(err.to_string(), "Property not found or unauthorized");
        assert!(err.detail().is_none());
    }
}
