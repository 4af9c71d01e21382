/// gram-service Main Entry Point
///
/// Starts the HTTP server with:
/// - PostgreSQL connection pool (migrations run at startup)
/// - JWT token service and permissive bearer-token middleware
/// - GraphQL schema over the service layer
use std::time::Duration;

use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::prelude::*;

use gram_service::config::Config;
use gram_service::middleware::JwtMiddleware;
use gram_service::schema::{build_schema, AppSchema};
use gram_service::security::jwt::{AuthenticatedMember, TokenService};
use gram_service::services::Services;

async fn graphql_handler(
    schema: web::Data<AppSchema>,
    identity: Option<AuthenticatedMember>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(identity) = identity {
        request = request.data(identity);
    }
    schema.execute(request).await.into()
}

/// SDL (Schema Definition Language) endpoint for schema introspection
async fn schema_handler(schema: web::Data<AppSchema>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body(schema.sdl())
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn playground_handler() -> HttpResponse {
    HttpResponse::Ok().content_type("text/html").body(
        r#"
<!DOCTYPE html>
<html>
<head>
    <title>Apollo Sandbox</title>
    <style>
        body {
            margin: 0;
            overflow: hidden;
            font-family: ui-monospace, Menlo, Consolas, "Roboto Mono", "Ubuntu Monospace", monospace;
        }
        sandbox-ui {
            height: 100vh;
            width: 100vw;
            display: block;
        }
    </style>
</head>
<body>
    <script src="https://embeddable-sandbox.cdn.apollographql.com/_latest/embeddable-sandbox.umd.production.min.js"></script>
    <sandbox-ui initial-state='{"document":"{ posts { id content } }","variables":{},"headers":{},"url":"http://localhost:8080/graphql"}'></sandbox-ui>
</body>
</html>
        "#,
    )
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gram_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("🔧 Starting gram-service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "✅ Configuration loaded: env={}, http_port={}",
        config.app.env, config.app.http_port
    );

    // Initialize database pool
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    // Verify database connection
    sqlx::query("SELECT 1")
        .execute(&db_pool)
        .await
        .context("Failed to verify database connection")?;
    info!("✅ Database pool created and verified");

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("✅ Database migrations completed");

    let tokens = TokenService::new(config.jwt.secret.clone(), config.jwt.expiry_seconds);
    let services = Services::new(db_pool, tokens.clone());

    // Build GraphQL schema with the service layer attached
    let schema = build_schema(services);
    info!("✅ GraphQL schema built");

    let bind_addr = format!("{}:{}", config.app.host, config.app.http_port);
    info!("🚀 gram-service listening on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(JwtMiddleware::new(tokens.clone()))
            .app_data(web::Data::new(schema.clone()))
            .route("/graphql", web::post().to(graphql_handler))
            .route("/graphql/schema", web::get().to(schema_handler))
            .route("/playground", web::get().to(playground_handler))
            .route("/health", web::get().to(health_handler))
    })
    .bind(&bind_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    info!("🛑 gram-service shutdown complete");

    Ok(())
}
