use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use laptop_valuation::config::Settings;
use laptop_valuation::core::Valuator;
use laptop_valuation::routes::{self, handle_json_payload_error, AppState};
use laptop_valuation::services::ModelArtifact;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting laptop valuation service...");

    // Load the model once; it is read-only for the life of the process
    let artifact = ModelArtifact::load(&settings.model.artifact_path).map_err(|e| {
        error!("System Error: model artifact could not be loaded: {}", e);
        std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string())
    })?;

    let valuator = Valuator::new(Arc::new(artifact), settings.validation.policy);

    info!("Valuator initialized with {:?} validation", valuator.policy());

    let app_state = AppState {
        valuator: Arc::new(valuator),
        progress: settings.progress,
        display: settings.display.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
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
