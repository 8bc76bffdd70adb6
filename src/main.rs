use std::sync::Arc;

use introspens::activity::{ActivityRepository, InMemoryActivityRepository, PostgresActivityRepository};
use introspens::content::{ContentRepository, InMemoryContentRepository, PostgresContentRepository};
use introspens::user::{InMemoryUserRepository, PostgresUserRepository, UserRepository};
use introspens::{build_router, AppConfig, AppState};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Repositories = (
    Arc<dyn UserRepository + Send + Sync>,
    Arc<dyn ActivityRepository + Send + Sync>,
    Arc<dyn ContentRepository + Send + Sync>,
);

async fn repositories(config: &AppConfig) -> Result<Repositories, sqlx::Error> {
    match &config.database_url {
        Some(database_url) => {
            let pool = sqlx::PgPool::connect(database_url).await?;
            info!("Using PostgreSQL repositories");
            let users: Arc<dyn UserRepository + Send + Sync> =
                Arc::new(PostgresUserRepository::new(pool.clone()));
            let activities: Arc<dyn ActivityRepository + Send + Sync> =
                Arc::new(PostgresActivityRepository::new(pool.clone()));
            let content: Arc<dyn ContentRepository + Send + Sync> =
                Arc::new(PostgresContentRepository::new(pool));
            Ok((users, activities, content))
        }
        None => {
            info!("DATABASE_URL not set, using in-memory repositories");
            let users: Arc<dyn UserRepository + Send + Sync> = Arc::new(InMemoryUserRepository::new());
            let activities: Arc<dyn ActivityRepository + Send + Sync> =
                Arc::new(InMemoryActivityRepository::new());
            let content: Arc<dyn ContentRepository + Send + Sync> =
                Arc::new(InMemoryContentRepository::new());
            Ok((users, activities, content))
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "introspens=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Introspens portal server");

    let config = AppConfig::from_env();

    let (user_repository, activity_repository, content_repository) =
        match repositories(&config).await {
            Ok(repositories) => repositories,
            Err(e) => {
                error!(error = %e, "Failed to connect to database");
                std::process::exit(1);
            }
        };

    let bind_addr = config.bind_addr.clone();
    let app_state = AppState::new(
        config,
        user_repository,
        activity_repository,
        content_repository,
    );
    let app = build_router(app_state);

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, bind_addr = %bind_addr, "Failed to bind");
            std::process::exit(1);
        }
    };
    info!("Server running on http://{}", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server stopped with an error");
        std::process::exit(1);
    }
}
