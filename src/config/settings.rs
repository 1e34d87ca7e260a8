use std::env;
use config::{Config, ConfigError, File};
use dotenv::dotenv;

use crate::tournament::seeding::MAX_SEEDED_TEAMS;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub tournament: TournamentSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    pub log_level: String,
}

#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct CorsSettings {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Bounds applied to incoming requests. The engine itself is unconfigured.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TournamentSettings {
    pub min_teams: usize,
    pub max_teams: usize,
    pub max_score: u32,
    pub max_pool_legs: u32,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            min_teams: 2,
            max_teams: MAX_SEEDED_TEAMS,
            max_score: 99,
            max_pool_legs: 4,
        }
    }
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)).required(false))
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__")
        )
        .build()?;

    let settings = config.try_deserialize::<Settings>()?;

    if settings.tournament.max_teams > MAX_SEEDED_TEAMS {
        tracing::warn!(
            "tournament.max_teams is {} but brackets support at most {} teams",
            settings.tournament.max_teams,
            MAX_SEEDED_TEAMS
        );
    }

    Ok(settings)
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::try_from("LOCAL".to_string()).map(|e| e.as_str()), Ok("local"));
        assert_eq!(
            Environment::try_from("production".to_string()).map(|e| e.as_str()),
            Ok("production")
        );
        assert!(Environment::try_from("staging".to_string()).is_err());
    }

    #[test]
    fn test_tournament_defaults_match_seeding_limit() {
        let settings = TournamentSettings::default();
        assert_eq!(settings.min_teams, 2);
        assert_eq!(settings.max_teams, MAX_SEEDED_TEAMS);
    }
}
