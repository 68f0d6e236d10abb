// Command exports
pub mod best_match;
pub mod restaurants;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::core::Matcher;
use crate::models::RequestError;
use crate::services::{Catalog, CatalogError};

/// Errors that can occur while running a command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Application state shared by all commands
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub matcher: Matcher,
    pub default_radius_km: f64,
    pub max_results: Option<usize>,
    /// Where edits are written back; `None` keeps them in memory
    pub catalog_path: Option<PathBuf>,
}

/// Operations exposed by the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    BestMatch,
    List,
    Summary,
    Create,
    Update,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best-match" | "best_match" => Ok(Command::BestMatch),
            "list" => Ok(Command::List),
            "summary" => Ok(Command::Summary),
            "create" => Ok(Command::Create),
            "update" => Ok(Command::Update),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// Run a command and return its JSON response
///
/// `input` is a query string for searches and listings, and a JSON body for
/// `create` and `update`.
pub fn run(state: &mut AppState, command: Command, input: &str) -> Result<serde_json::Value, CommandError> {
    let value = match command {
        Command::BestMatch => serde_json::to_value(best_match::best_match(state, input)?)?,
        Command::List => serde_json::to_value(restaurants::list_restaurants(state, input)?)?,
        Command::Summary => serde_json::to_value(restaurants::summarize(state))?,
        Command::Create => serde_json::to_value(restaurants::create_restaurant(state, input)?)?,
        Command::Update => serde_json::to_value(restaurants::update_restaurant(state, input)?)?,
    };
    Ok(value)
}
