use std::net::TcpListener;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use ballpark_backend::run;
use ballpark_backend::config::settings::get_config;
use ballpark_backend::models::tournament::{Team, TeamStanding};
use ballpark_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    let configuration = get_config().expect("Failed to read configuration.");

    let server = run(
        listener,
        configuration.tournament,
        configuration.cors.allowed_origins,
    )
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);
    TestApp { address }
}

/// Teams `t1..=tN` named `Team N`
pub fn make_teams(count: usize) -> Vec<Team> {
    (1..=count)
        .map(|i| Team::new(format!("t{}", i), format!("Team {}", i)))
        .collect()
}

/// Standings already ranked in input order
pub fn seeded_standings(count: usize) -> Vec<TeamStanding> {
    (1..=count)
        .map(|i| {
            let mut standing = TeamStanding::new(format!("t{}", i), format!("Team {}", i));
            standing.seed = Some(i as u32);
            standing
        })
        .collect()
}

pub fn teams_json(count: usize) -> Value {
    json!(make_teams(count))
}

pub fn completed_game(home: &str, away: &str, home_score: u32, away_score: u32) -> Value {
    json!({
        "homeTeamId": home,
        "awayTeamId": away,
        "homeScore": home_score,
        "awayScore": away_score,
        "status": "completed"
    })
}
