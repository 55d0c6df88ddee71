use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use pathmatch::config::Settings;
use pathmatch::core::Matcher;
use pathmatch::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use pathmatch::services::{PostgresClient, RankingCache, TokenService};
use std::io;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging; RUST_LOG wins over LOG_LEVEL when both are set
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting PathMatch matching service...");

    let settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, format!("Configuration error: {}", e))
    })?;

    info!("Configuration loaded successfully");

    let tokens = Arc::new(TokenService::new(
        &settings.auth.jwt_secret,
        settings.auth.access_token_ttl_mins,
        settings.auth.refresh_token_ttl_days,
    ));

    // Initialize ranking cache (optional - rankings are recomputed without it)
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match RankingCache::connect(&settings.cache.redis_url, l1_cache_size, cache_ttl).await {
        Ok(c) => {
            info!("Ranking cache initialized (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);
            Some(Arc::new(c))
        }
        Err(e) => {
            warn!("Failed to connect to Redis ({}), running without cache", e);
            None
        }
    };

    let db_max_conn = settings.database.max_connections.unwrap_or(10);
    let db_min_conn = settings.database.min_connections.unwrap_or(1);

    let postgres = PostgresClient::from_settings(
        &settings.database.url,
        Some(db_max_conn),
        Some(db_min_conn),
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        io::Error::new(io::ErrorKind::ConnectionRefused, format!("PostgreSQL connection error: {}", e))
    })?;

    info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

    let weights = settings.scoring_weights();
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let app_state = AppState {
        postgres: Arc::new(postgres),
        cache,
        tokens,
        matcher,
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let allowed_origins = settings.cors.allowed_origins.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
