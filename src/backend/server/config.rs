/**
 * Server Configuration
 *
 * Loading and validation of server configuration, centered on the
 * optional PostgreSQL connection.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * Services that fail to initialize are set to `None` and the server
 * continues without them: the realtime layer still tracks presence in
 * memory, it just cannot persist messages or profile flags.
 */

use sqlx::PgPool;

/// Database configuration result
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool
///
/// 1. Reads `DATABASE_URL` from environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// Returns `None` if `DATABASE_URL` is not set or the connection
/// fails; the server runs without database features in that case.
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            // Continue anyway - migrations might have already been run
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
