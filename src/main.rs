mod tracking;
mod web;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::tracking::ValidationMode;
use crate::web::config::{Config, ConfigError};

#[derive(Parser)]
#[command(name = "location-tracker")]
#[command(about = "In-memory location collection service for tracker and controller clients")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "LOCATION_TRACKER_CONFIG")]
    config: Option<String>,
    /// Listen port (overrides the configuration file)
    #[arg(long, global = true, env = "PORT")]
    port: Option<u16>,
    /// How submitted locations are screened
    #[arg(long, global = true, env = "VALIDATION_MODE", value_enum)]
    validation: Option<ValidationMode>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service (default)
    Serve,
    /// Print the effective configuration and exit
    CheckConfig,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config),
        Commands::CheckConfig => check_config(&config),
    }
}

fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(validation) = cli.validation {
        config.tracking.validation = validation;
    }
    Ok(config)
}

fn serve(config: Config) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn check_config(config: &Config) -> ExitCode {
    match serde_yaml::to_string(config) {
        Ok(yaml) => {
            print!("{}", yaml);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error rendering configuration: {}", e);
            ExitCode::FAILURE
        }
    }
}
