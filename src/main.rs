use clinic_api::config::ApiConfig;
use clinic_db::{create_pool, schema::initialize_database};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.db_max_connections).await?;

    // Make sure the tables and the slot uniqueness constraint exist
    initialize_database(&db_pool).await?;

    // Start API server
    clinic_api::start_server(config, db_pool).await?;

    Ok(())
}
