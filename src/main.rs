mod app;
mod chat;
mod clock;
mod config;
mod db;
mod error;
mod extraction;
mod llm;
mod logs;
mod nutrition;
mod settings;
mod state;
mod stats;
#[cfg(test)]
mod testing;

use crate::{clock::LocalClock, config::AppConfig, state::AppState};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "nutrilog=debug,axum=info,tower_http=info,sqlx=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // Read before the runtime starts its worker threads.
    let clock = LocalClock::detect();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(clock))
}

async fn run(clock: LocalClock) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let app_state = AppState::init(config, clock).await?;
    app::serve(app::build_app(app_state)).await
}
