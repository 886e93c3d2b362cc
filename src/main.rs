mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::{routes as auth_routes, AuthService, Credentials};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::issues::{routes as issues_routes, IssueService};
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::seed::SeedService;
use crate::modules::storage::{DataStore, FixtureStore, PostgresStore};
use crate::shared::constants::ROOT_MESSAGE;
use axum::{middleware::from_fn, routing::get, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    match std::env::args().nth(1).as_deref() {
        None | Some("serve") => serve(config, worker_threads).await,
        Some("seed") => seed(config).await,
        Some(other) => anyhow::bail!("Unknown command '{}'. Usage: nagar-seva [serve|seed]", other),
    }
}

/// Load the JSON fixtures into the database, replacing its contents
async fn seed(config: Config) -> anyhow::Result<()> {
    let database = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set to seed the database"))?;

    let pool = database::connect_and_migrate(database).await?;
    let source: Arc<dyn DataStore> = Arc::new(FixtureStore::new(&config.fixtures));
    let target: Arc<dyn DataStore> = Arc::new(PostgresStore::new(pool.clone()));

    let summary = SeedService::new(source, target)
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Seeding failed: {}", e))?;
    tracing::info!(
        "Database seeded: {} issues, {} report details ({} duplicates skipped)",
        summary.issues,
        summary.report_details,
        summary.duplicate_details
    );

    pool.close().await;
    Ok(())
}

/// Postgres when `DATABASE_URL` is set, the JSON fixtures otherwise
async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn DataStore>> {
    match &config.database {
        Some(database) => {
            let pool = database::connect_and_migrate(database).await?;
            Ok(Arc::new(PostgresStore::new(pool)))
        }
        None => {
            tracing::info!(
                "DATABASE_URL not set, serving fixtures from {} and {}",
                config.fixtures.issues_path.display(),
                config.fixtures.report_details_path.display()
            );
            Ok(Arc::new(FixtureStore::new(&config.fixtures)))
        }
    }
}

/// Every API route plus `/` and `/health`, without the outer layers
fn api_router(store: Arc<dyn DataStore>, credentials: Credentials) -> Router {
    let issue_service = Arc::new(IssueService::new(Arc::clone(&store)));
    let report_service = Arc::new(ReportService::new(Arc::clone(&store)));
    let dashboard_service = Arc::new(DashboardService::new(Arc::clone(&store)));
    let auth_service = Arc::new(AuthService::new(credentials));

    async fn root() -> &'static str {
        ROOT_MESSAGE
    }

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(issues_routes::routes(issue_service))
        .merge(reports_routes::routes(report_service))
        .merge(dashboard_routes::routes(dashboard_service))
        .merge(auth_routes::routes(auth_service))
}

async fn serve(config: Config, worker_threads: usize) -> anyhow::Result<()> {
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    let store = build_store(&config).await?;
    tracing::info!("Data store initialized ({})", store.backend_name());

    let credentials = Credentials::load(&config.credentials.path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load credentials: {}", e))?;
    tracing::info!(
        "Loaded {} officer accounts from {}",
        credentials.account_count(),
        config.credentials.path.display()
    );

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let app = Router::new()
        .merge(swagger)
        .merge(api_router(store, credentials))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{bundled_fixture_store, data_file};
    use axum_test::TestServer;

    async fn server() -> TestServer {
        let credentials = Credentials::load(&data_file("credentials.json"))
            .await
            .unwrap();
        TestServer::new(api_router(bundled_fixture_store(), credentials)).unwrap()
    }

    #[tokio::test]
    async fn test_root_message() {
        let response = server().await.get("/").await;
        response.assert_status_ok();
        response.assert_text("Backend is running!");
    }

    #[tokio::test]
    async fn test_health() {
        server().await.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_features_share_one_store() {
        let server = server().await;

        server
            .post("/api/reports")
            .json(&serde_json::json!({
                "id": "ISS-1016",
                "description": "Sewage overflowing onto Argora main road"
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let response = server.get("/api/dashboard/summary").await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["with_details"], 11);
    }
}
