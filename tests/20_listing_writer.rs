mod common;

use anyhow::Result;
use socialgrdn_api::services::listing::{
    ListingError, ListingPatch, ListingService, Location, NewListing,
};

fn location(city: &str) -> Location {
    Location {
        address_line1: "123 Test Rd".to_string(),
        city: city.to_string(),
        province: "AB".to_string(),
        postal_code: "T2P 1J9".to_string(),
        country: "Canada".to_string(),
        latitude: Some(51.0447),
        longitude: Some(-114.0719),
    }
}

fn north_plot(property_id: i64, user_id: i64, city: &str) -> NewListing {
    NewListing {
        user_id,
        property_id,
        property_name: "North Plot".to_string(),
        location: location(city),
        growth_zone: "4a".to_string(),
        description: "South-facing plot".to_string(),
        dimensions_length: 10.0,
        dimensions_width: 20.0,
        dimensions_height: 0.0,
        soil_type: "Loam".to_string(),
        amenities: Some("Shed".to_string()),
        restrictions: Some("No pesticides".to_string()),
        rent_base_price: 45.0,
        crops: vec!["Carrot".to_string(), "Barley".to_string()],
        primary_image_url: "url1".to_string(),
        other_image_urls: vec!["url2".to_string(), "url3".to_string()],
    }
}

fn patch(city: &str) -> ListingPatch {
    ListingPatch {
        property_name: "North Plot".to_string(),
        location_id: None,
        location: location(city),
        growth_zone: "4a".to_string(),
        description: Some("South-facing plot".to_string()),
        dimensions_length: 10.0,
        dimensions_width: 20.0,
        dimensions_height: 0.0,
        soil_type: "Loam".to_string(),
        amenities: Some("Shed".to_string()),
        restrictions: Some("No pesticides".to_string()),
        rent_base_price: 45.0,
        crops: None,
        primary_image_url: None,
        other_image_urls: None,
    }
}

const COUNT_CROPS: &str = "SELECT COUNT(*) FROM property_crops WHERE property_id = ?";
const COUNT_PRIMARY: &str = "SELECT COUNT(*) FROM property_primary_images WHERE property_id = ?";
const COUNT_OTHER: &str = "SELECT COUNT(*) FROM property_other_images WHERE property_id = ?";
const COUNT_LISTING: &str = "SELECT COUNT(*) FROM property_listing WHERE property_id = ?";

#[tokio::test]
async fn create_persists_all_five_tables() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let user_id = common::seed_user(&pool).await?;
    let property_id = common::unique_id();
    let service = ListingService::new(pool.clone());

    let created = service
        .create_listing(north_plot(property_id, user_id, "Calgary"))
        .await?;
    assert_eq!(created, property_id);

    assert_eq!(common::count(&pool, COUNT_LISTING, property_id).await?, 1);
    assert_eq!(common::count(&pool, COUNT_CROPS, property_id).await?, 2);
    assert_eq!(common::count(&pool, COUNT_PRIMARY, property_id).await?, 1);
    assert_eq!(common::count(&pool, COUNT_OTHER, property_id).await?, 2);
    Ok(())
}

#[tokio::test]
async fn listing_points_at_the_location_inserted_in_the_same_call() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let user_id = common::seed_user(&pool).await?;
    let property_id = common::unique_id();
    let city = format!("Ordering City {}", property_id);
    let service = ListingService::new(pool.clone());

    service
        .create_listing(north_plot(property_id, user_id, &city))
        .await?;

    let stored_city: String = sqlx::query_scalar(
        "SELECT l.city FROM property_listing p
         JOIN property_location l ON p.location_id = l.location_id
         WHERE p.property_id = ?",
    )
    .bind(property_id)
    .fetch_one(&pool)
    .await?;

    assert_eq!(stored_city, city);
    Ok(())
}

#[tokio::test]
async fn duplicate_id_rolls_back_and_leaves_the_original_untouched() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let user_id = common::seed_user(&pool).await?;
    let property_id = common::unique_id();
    let service = ListingService::new(pool.clone());

    service
        .create_listing(north_plot(property_id, user_id, "Calgary"))
        .await?;

    // Same caller-supplied id again, with a marker city so the rolled-back
    // location insert is detectable.
    let marker_city = format!("Rollback City {}", property_id);
    let err = service
        .create_listing(north_plot(property_id, user_id, &marker_city))
        .await
        .unwrap_err();
    assert!(matches!(err, ListingError::DuplicateId { .. }), "got {err:?}");

    // Original row and associations are exactly as the first create left them
    assert_eq!(common::count(&pool, COUNT_LISTING, property_id).await?, 1);
    assert_eq!(common::count(&pool, COUNT_CROPS, property_id).await?, 2);
    assert_eq!(common::count(&pool, COUNT_PRIMARY, property_id).await?, 1);
    assert_eq!(common::count(&pool, COUNT_OTHER, property_id).await?, 2);

    // The failed attempt's location insert did not survive the rollback
    let orphaned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM property_location WHERE city = ?")
        .bind(&marker_city)
        .fetch_one(&pool)
        .await?;
    assert_eq!(orphaned, 0);
    Ok(())
}

#[tokio::test]
async fn crop_replace_is_idempotent() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let user_id = common::seed_user(&pool).await?;
    let property_id = common::unique_id();
    let service = ListingService::new(pool.clone());

    service
        .create_listing(north_plot(property_id, user_id, "Calgary"))
        .await?;

    let mut update = patch("Calgary");
    update.crops = Some(vec!["Kale".to_string(), "Mint".to_string()]);
    service
        .update_listing(property_id, user_id, update.clone())
        .await?;
    service.update_listing(property_id, user_id, update).await?;

    let crops: Vec<String> =
        sqlx::query_scalar("SELECT crop_name FROM property_crops WHERE property_id = ? ORDER BY crop_name")
            .bind(property_id)
            .fetch_all(&pool)
            .await?;
    assert_eq!(crops, vec!["Kale", "Mint"]);
    Ok(())
}

#[tokio::test]
async fn explicit_empty_crop_list_clears_all_crops() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let user_id = common::seed_user(&pool).await?;
    let property_id = common::unique_id();
    let service = ListingService::new(pool.clone());

    service
        .create_listing(north_plot(property_id, user_id, "Calgary"))
        .await?;

    let mut update = patch("Calgary");
    update.crops = Some(Vec::new());
    service.update_listing(property_id, user_id, update).await?;

    assert_eq!(common::count(&pool, COUNT_CROPS, property_id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn omitted_association_sets_stay_untouched() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let user_id = common::seed_user(&pool).await?;
    let property_id = common::unique_id();
    let service = ListingService::new(pool.clone());

    service
        .create_listing(north_plot(property_id, user_id, "Calgary"))
        .await?;

    // crops, primary image, and other images all omitted
    service
        .update_listing(property_id, user_id, patch("Calgary"))
        .await?;

    assert_eq!(common::count(&pool, COUNT_CROPS, property_id).await?, 2);
    assert_eq!(common::count(&pool, COUNT_OTHER, property_id).await?, 2);

    let primary: String =
        sqlx::query_scalar("SELECT image_url FROM property_primary_images WHERE property_id = ?")
            .bind(property_id)
            .fetch_one(&pool)
            .await?;
    assert_eq!(primary, "url1");
    Ok(())
}

#[tokio::test]
async fn empty_amenities_store_the_sentinel() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let user_id = common::seed_user(&pool).await?;
    let property_id = common::unique_id();
    let service = ListingService::new(pool.clone());

    let mut listing = north_plot(property_id, user_id, "Calgary");
    listing.amenities = Some(String::new());
    listing.restrictions = None;
    service.create_listing(listing).await?;

    let (amenities, restrictions): (String, String) = sqlx::query_as(
        "SELECT amenities, restrictions FROM property_listing WHERE property_id = ?",
    )
    .bind(property_id)
    .fetch_one(&pool)
    .await?;
    assert_eq!(amenities, "None Listed");
    assert_eq!(restrictions, "None Listed");

    // The same policy applies on update
    let mut update = patch("Calgary");
    update.amenities = None;
    service.update_listing(property_id, user_id, update).await?;

    let amenities: String =
        sqlx::query_scalar("SELECT amenities FROM property_listing WHERE property_id = ?")
            .bind(property_id)
            .fetch_one(&pool)
            .await?;
    assert_eq!(amenities, "None Listed");
    Ok(())
}

#[tokio::test]
async fn missing_listing_and_wrong_owner_are_indistinguishable() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let owner = common::seed_user(&pool).await?;
    let stranger = common::seed_user(&pool).await?;
    let property_id = common::unique_id();
    let service = ListingService::new(pool.clone());

    service
        .create_listing(north_plot(property_id, owner, "Calgary"))
        .await?;

    let missing = service
        .update_listing(common::unique_id(), owner, patch("Calgary"))
        .await
        .unwrap_err();
    let wrong_owner = service
        .update_listing(property_id, stranger, patch("Calgary"))
        .await
        .unwrap_err();

    assert!(matches!(missing, ListingError::NotFoundOrUnauthorized));
    assert!(matches!(wrong_owner, ListingError::NotFoundOrUnauthorized));
    assert_eq!(missing.to_string(), wrong_owner.to_string());
    Ok(())
}

#[tokio::test]
async fn update_rewrites_listing_and_location_in_place() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let user_id = common::seed_user(&pool).await?;
    let property_id = common::unique_id();
    let service = ListingService::new(pool.clone());

    service
        .create_listing(north_plot(property_id, user_id, "Calgary"))
        .await?;

    let location_before: i64 =
        sqlx::query_scalar("SELECT location_id FROM property_listing WHERE property_id = ?")
            .bind(property_id)
            .fetch_one(&pool)
            .await?;

    let mut update = patch("Edmonton");
    update.property_name = "Renamed Plot".to_string();
    update.primary_image_url = Some("url9".to_string());
    service.update_listing(property_id, user_id, update).await?;

    let (name, location_after): (String, i64) = sqlx::query_as(
        "SELECT property_name, location_id FROM property_listing WHERE property_id = ?",
    )
    .bind(property_id)
    .fetch_one(&pool)
    .await?;
    assert_eq!(name, "Renamed Plot");
    // The location row is mutated, never re-created
    assert_eq!(location_after, location_before);

    let city: String =
        sqlx::query_scalar("SELECT city FROM property_location WHERE location_id = ?")
            .bind(location_after)
            .fetch_one(&pool)
            .await?;
    assert_eq!(city, "Edmonton");

    let primary: String =
        sqlx::query_scalar("SELECT image_url FROM property_primary_images WHERE property_id = ?")
            .bind(property_id)
            .fetch_one(&pool)
            .await?;
    assert_eq!(primary, "url9");
    Ok(())
}
