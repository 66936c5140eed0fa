use anyhow::Result;
use cms_rs::auth::{extractors::AppState, jwt::JwtService};
use cms_rs::{create_app, models, AppConfig, Database};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cms_rs=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new()?;
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    info!("Starting CMS-RS server on {}", bind_address);

    // A view reading a field its table lacks is a configuration error.
    if let Err(e) = models::verify_field_tables() {
        error!("Localized field tables are inconsistent: {}", e);
        return Err(e.into());
    }

    let database = match Database::new(&config.database.url, config.database.max_connections).await {
        Ok(db) => {
            info!("Database connected successfully");
            db
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e);
        }
    };

    let jwt_service = match JwtService::new(&config.auth) {
        Ok(service) => {
            info!("JWT service initialized successfully");
            service
        }
        Err(e) => {
            error!("Failed to initialize JWT service: {}", e);
            return Err(e);
        }
    };

    let app_state = AppState::new(database, jwt_service, config);
    tokio::fs::create_dir_all(app_state.media.uploads_dir()).await?;
    info!("Serving uploads from {}", app_state.media.uploads_dir().display());

    let app = create_app(app_state).await?;

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
