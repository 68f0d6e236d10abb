use restaurant_matcher::commands::{self, AppState, Command};
use restaurant_matcher::config::{LoggingSettings, Settings};
use restaurant_matcher::core::Matcher;
use restaurant_matcher::models::ErrorResponse;
use restaurant_matcher::services::Catalog;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: restaurant-matcher <best-match|list|summary|create|update> [query-string|json-body]";

/// Initialize logging on stderr so stdout carries only JSON
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if logging.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }
}

fn print_error(error: &str, message: String) {
    let response = ErrorResponse {
        error: error.to_string(),
        message,
    };
    match serde_json::to_string_pretty(&response) {
        Ok(body) => println!("{}", body),
        Err(e) => eprintln!("{}: {}", response.error, e),
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            print_error("configuration", e.to_string());
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&settings.logging);

    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref().map(str::parse::<Command>) {
        Some(Ok(command)) => command,
        Some(Err(e)) => {
            error!("{}", e);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
        None => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };
    let input = args.next().unwrap_or_default();

    let catalog = match Catalog::load(&settings.catalog.path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            print_error("catalog", e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let weights = settings.scoring.weights.to_weights();
    info!("Matcher initialized with weights: {:?}", weights);

    let mut state = AppState {
        catalog: Arc::new(catalog),
        matcher: Matcher::new(weights),
        default_radius_km: settings.search.default_radius_km,
        max_results: settings.search.max_results,
        catalog_path: Some(settings.catalog.path.clone().into()),
    };

    match commands::run(&mut state, command, &input) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(body) => {
                println!("{}", body);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("Command failed: {}", e);
            print_error("command", e.to_string());
            ExitCode::FAILURE
        }
    }
}
