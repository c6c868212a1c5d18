pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "winetime")]
#[command(about = "Winetime CLI - manage the catalog database and run the API server")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create every catalog table that does not exist yet")]
    CreateTables,

    #[command(about = "Drop every catalog table and its rows")]
    DropTables,

    #[command(about = "Insert the seed catalog; rows that already exist are kept")]
    Populate,

    #[command(about = "Run the HTTP API server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides WINETIME_API_PORT)")]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let mut config = AppConfig::from_env();

    match cli.command {
        Commands::CreateTables => commands::tables::create_all(&config, output_format).await,
        Commands::DropTables => commands::tables::drop_all(&config, output_format).await,
        Commands::Populate => commands::populate::handle(&config, output_format).await,
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            crate::app::serve(config).await
        }
    }
}
