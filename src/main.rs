use std::net::TcpListener;

use ballpark_backend::run;
use ballpark_backend::config::settings::get_config;
use ballpark_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "ballpark-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!(
        "Starting tournament service on {} (teams {}..={})",
        address,
        config.tournament.min_teams,
        config.tournament.max_teams
    );

    run(
        listener,
        config.tournament,
        config.cors.allowed_origins
    )?.await
}
