use axum::{http::HeaderValue, routing::get, Extension, Router};
use sqlx::MySqlPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use socialgrdn_api::{config, database, handlers};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, SOCIALGRDN_PORT, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting SocialGrdn API in {:?} mode", config.environment);

    let pool = match database::connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let app = app(pool);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("SocialGrdn API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(pool: MySqlPool) -> Router {
    Router::new()
        // Service meta
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        // Marketplace surface
        .merge(profile_routes())
        .merge(listing_routes())
        .merge(rental_routes())
        .merge(report_routes())
        .merge(moderator_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(pool))
}

fn cors_layer() -> CorsLayer {
    let origin = config::config()
        .server
        .cors_origin
        .as_deref()
        .and_then(|o| o.parse::<HeaderValue>().ok());

    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}

fn profile_routes() -> Router {
    use axum::routing::{patch, post};
    use socialgrdn_api::handlers::profile;

    Router::new()
        .route("/api/users/register", post(profile::register::register))
        .route("/api/users/check-user", post(profile::register::check_user))
        .route("/api/profile", get(profile::user_id::by_email))
        .route("/api/getProfile", get(profile::get_profile::get_profile))
        .route("/api/editProfile", patch(profile::edit_profile::edit_profile))
        .route("/api/getUserRole", get(profile::user_role::user_role))
}

fn listing_routes() -> Router {
    use axum::routing::{patch, post};
    use socialgrdn_api::handlers::listing;

    Router::new()
        .route("/api/addPropertyListing", post(listing::create::create))
        .route("/api/updatePropertyListing/:propertyId", patch(listing::update::update))
        .route("/api/getPropertyDetails", get(listing::details::details))
        .route("/api/getUserProperties", get(listing::user_properties::user_properties))
        .route("/api/getSearchResults", get(listing::search::search))
        .route("/api/getPropStatus", get(listing::status::get_status))
        .route("/api/updatePropStatus", post(listing::status::update_status))
        .route("/api/savePropertyImage", post(listing::save_image::save_image))
}

fn rental_routes() -> Router {
    use axum::routing::{patch, post};
    use socialgrdn_api::handlers::rental;

    Router::new()
        .route("/api/GetRentalDetails", get(rental::details::details))
        .route("/api/getRentalList", get(rental::list::list))
        .route("/api/registerRentalDetails", post(rental::register::register))
        .route("/api/editRentalDetails", patch(rental::edit::edit))
}

fn report_routes() -> Router {
    use socialgrdn_api::handlers::report;

    Router::new()
        .route("/api/getPayouts", get(report::payouts::payouts))
        .route("/api/getDetailedPayouts", get(report::detailed_payouts::detailed_payouts))
        .route("/api/getEarnings", get(report::earnings::monthly))
        .route("/api/getEarnings/details", get(report::earnings::details))
        .route("/api/getAllEarningsReport", get(report::all_earnings::all_earnings))
        .route("/api/getAllMonthlyReport", get(report::monthly::monthly_report))
        .route("/api/moderatorReport/summary", get(report::moderator::summary))
        .route("/api/moderatorReport/details", get(report::moderator::details))
}

fn moderator_routes() -> Router {
    use axum::routing::patch;
    use socialgrdn_api::handlers::moderator;

    Router::new()
        .route("/api/getAllUsers", get(moderator::all_users::all_users))
        .route("/api/handleUserStatus", patch(moderator::user_status::user_status))
}
