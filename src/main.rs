use std::env;
use std::error::Error;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use attendance_engine::store::{AttendanceStore, JsonFileRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attendance_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        env::var("ATTENDANCE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let data_dir = env::var("ATTENDANCE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let bind_addr = env::var("ATTENDANCE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

    let config = ConfigLoader::load(&config_dir)?;
    tracing::info!(config_dir = %config_dir, "Configuration loaded");

    let store = AttendanceStore::open(JsonFileRepository::new(&data_dir), config)?;
    tracing::info!(data_dir = %data_dir, "Attendance store opened");

    let app = create_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
