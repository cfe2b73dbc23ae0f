use std::sync::Arc;

use auth::CredentialIssuer;
use sqlx::postgres::PgPoolOptions;
use todo_service::config::Config;
use todo_service::config::StorageBackend;
use todo_service::domain::account::ports::AccountServicePort;
use todo_service::domain::account::service::AccountService;
use todo_service::domain::todo::ports::TodoServicePort;
use todo_service::domain::todo::service::TodoService;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::repositories::InMemoryAccountRepository;
use todo_service::outbound::repositories::InMemoryTodoRepository;
use todo_service::outbound::repositories::PostgresAccountRepository;
use todo_service::outbound::repositories::PostgresTodoRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        cors_origins = ?config.cors.origins,
        access_expiration_minutes = config.jwt.access_expiration_minutes,
        refresh_expiration_days = config.jwt.refresh_expiration_days,
        remember_expiration_days = config.jwt.remember_expiration_days,
        "Configuration loaded"
    );

    let issuer = Arc::new(CredentialIssuer::new(config.jwt.issuer_settings()?)?);

    let (account_service, todo_service): (Arc<dyn AccountServicePort>, Arc<dyn TodoServicePort>) =
        match config.storage.backend {
            StorageBackend::Postgres => {
                let pg_pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .connect(&config.database.url)
                    .await?;
                tracing::info!(
                    max_connections = config.database.max_connections,
                    database = "postgresql",
                    "Database connection pool created"
                );

                sqlx::migrate!("./migrations").run(&pg_pool).await?;
                tracing::info!(database = "postgresql", "Database migrations completed");

                let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
                let todo_repository = Arc::new(PostgresTodoRepository::new(pg_pool));

                let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
                    Arc::clone(&account_repository),
                    account_repository,
                    Arc::clone(&issuer),
                ));
                let todo_service: Arc<dyn TodoServicePort> =
                    Arc::new(TodoService::new(todo_repository));

                (account_service, todo_service)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage, data is lost on exit");

                let account_repository = Arc::new(InMemoryAccountRepository::new());
                let todo_repository = Arc::new(InMemoryTodoRepository::new());

                let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
                    Arc::clone(&account_repository),
                    account_repository,
                    Arc::clone(&issuer),
                ));
                let todo_service: Arc<dyn TodoServicePort> =
                    Arc::new(TodoService::new(todo_repository));

                (account_service, todo_service)
            }
        };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        todo_service,
        issuer,
        &config.cors.origins,
    );

    axum::serve(http_listener, http_application).await?;
    tracing::info!("Server exited");

    Ok(())
}
