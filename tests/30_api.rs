mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn listing_body(property_id: i64, user_id: i64) -> Value {
    json!({
        "userId": user_id,
        "propertyId": property_id,
        "propertyName": "North Plot",
        "addressLine1": "123 Test Rd",
        "city": "Calgary",
        "province": "AB",
        "postalCode": "T2P 1J9",
        "country": "Canada",
        "growthzone": "4a",
        "description": "South-facing plot",
        "length": 10.0,
        "width": 20.0,
        "height": 0.0,
        "soilType": "Loam",
        "amenities": "Shed",
        "possibleCrops": ["Carrot", "Barley"],
        "restrictions": "No pesticides",
        "price": 45.0,
        "primaryImageUrl": "url1",
        "otherImageUrls": ["url2", "url3"],
        "latitude": 51.0447,
        "longitude": -114.0719
    })
}

#[tokio::test]
async fn register_then_look_up_profile() -> Result<()> {
    let Some(_pool) = common::test_pool().await else { return Ok(()) };
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let marker = common::unique_id();
    let email = format!("api_user_{}@example.com", marker);

    let res = client
        .post(format!("{}/api/users/register", server.base_url))
        .json(&json!({
            "email": email,
            "firstname": "Avery",
            "lastname": "Gardener",
            "username": format!("avery_{}", marker),
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "User registered successfully");

    let res = client
        .get(format!("{}/api/profile", server.base_url))
        .query(&[("email", email.as_str())])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let profile = res.json::<Value>().await?;
    assert_eq!(profile["email"], json!(email));
    assert!(profile["userID"].is_i64(), "missing userID: {}", profile);

    let res = client
        .post(format!("{}/api/users/check-user", server.base_url))
        .json(&json!({ "email": email }))
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?, json!({ "exists": true }));

    let res = client
        .get(format!("{}/api/getUserRole", server.base_url))
        .query(&[("email", email.as_str())])
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?, json!({ "role": 1 }));

    Ok(())
}

#[tokio::test]
async fn missing_parameters_answer_400_with_the_field_name() -> Result<()> {
    let Some(_pool) = common::test_pool().await else { return Ok(()) };
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/profile", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "Email is required");

    let res = client
        .get(format!("{}/api/getProfile", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "userID is required");

    Ok(())
}

#[tokio::test]
async fn list_lookups_return_empty_arrays_and_singular_lookups_404() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let user_id = common::seed_user(&pool).await?;

    // Fresh user owns nothing: list contract is 200 with []
    let res = client
        .get(format!("{}/api/getUserProperties", server.base_url))
        .query(&[("userID", user_id.to_string())])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));

    let res = client
        .get(format!("{}/api/getPayouts", server.base_url))
        .query(&[("userID", user_id.to_string())])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));

    // Singular contract is 404
    let res = client
        .get(format!("{}/api/getPropertyDetails", server.base_url))
        .query(&[("property_id", common::unique_id().to_string())])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/api/getPropStatus", server.base_url))
        .query(&[("property_id", common::unique_id().to_string())])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn add_property_listing_creates_and_rejects_duplicates() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let user_id = common::seed_user(&pool).await?;
    let property_id = common::unique_id();

    let res = client
        .post(format!("{}/api/addPropertyListing", server.base_url))
        .json(&listing_body(property_id, user_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["propertyId"], json!(property_id));

    // Same caller-supplied id again
    let res = client
        .post(format!("{}/api/addPropertyListing", server.base_url))
        .json(&listing_body(property_id, user_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The details lookup sees exactly the first create
    let res = client
        .get(format!("{}/api/getPropertyDetails", server.base_url))
        .query(&[("property_id", property_id.to_string())])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let details = res.json::<Value>().await?;
    let mut crops: Vec<&str> = details["crops"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    crops.sort_unstable();
    assert_eq!(crops, vec!["Barley", "Carrot"]);
    assert_eq!(details["primaryImage"], json!("url1"));
    assert_eq!(
        details["otherImages"].as_array().map(Vec::len),
        Some(2),
        "otherImages: {}",
        details["otherImages"]
    );

    Ok(())
}

#[tokio::test]
async fn update_by_non_owner_answers_not_found() -> Result<()> {
    let Some(pool) = common::test_pool().await else { return Ok(()) };
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let owner = common::seed_user(&pool).await?;
    let stranger = common::seed_user(&pool).await?;
    let property_id = common::unique_id();

    let res = client
        .post(format!("{}/api/addPropertyListing", server.base_url))
        .json(&listing_body(property_id, owner))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = listing_body(property_id, stranger);

    let res = client
        .patch(format!("{}/api/updatePropertyListing/{}", server.base_url, property_id))
        .json(&body)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], json!("Property not found or unauthorized"));

    Ok(())
}
