//! Agriweb main entry point

use agriweb_api::start_server;
use agriweb_config::{Config, ConfigResult};
use clap::Parser;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "agriweb")]
#[command(author = "Agriweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight HTMX front-end for farmer, crop, market and transaction records", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Records API root, overrides `api.base_url`
    #[arg(long)]
    api_url: Option<String>,

    /// Listen port, overrides `server.port`
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

/// Load the config file, apply command-line overrides, then validate
fn load_config(args: &Args) -> ConfigResult<Config> {
    let mut config = Config::load_or_default(args.config.clone())?;
    if let Some(api_url) = &args.api_url {
        config.api.base_url = api_url.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error {}", e.to_details());
            std::process::exit(2);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    if args.config.exists() {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file not found: {}, using defaults", args.config.display());
    }

    let rt = Runtime::new()?;
    rt.block_on(start_server(config))?;

    Ok(())
}
