// src/main.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cliq_hub_client::{ClientConfig, ClientContext};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "cliq-hub", author, version, about = "Command line front end for the cliq template hub")]
struct Cli {
    /// Hub base URL, e.g. https://hub.example.com
    #[arg(long, global = true, env = "CLIQ_HUB_API_URL")]
    api_url: Option<String>,
    /// JSON file holding the persisted session
    #[arg(long, global = true, env = "CLIQ_HUB_STORAGE_PATH")]
    storage: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CLIQ_HUB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "CLIQ_HUB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Print the signed-in user, if any
    Whoami,
    Templates {
        #[command(subcommand)]
        command: TemplatesCommand,
    },
    /// Draft a template from an example command line
    Generate {
        command_example: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        author: String,
        /// Write the YAML here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Resolve a location against the route table
    Route {
        location: String,
        /// Apply the session check for guarded routes
        #[arg(long)]
        guarded: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TemplatesCommand {
    List,
    Show {
        id: String,
    },
    Upload {
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_base_url(url)?;
    }
    if let Some(path) = cli.storage {
        config = config.with_storage_path(path);
    }

    debug!("Using hub at {}", config.api_base_url);
    let context = ClientContext::from_config(config)?;
    commands::run(&context, cli.command).await
}
