use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// earlybird - Quote requests for the Earlybird Strategies website
#[derive(Parser)]
#[command(name = "earlybird")]
#[command(about = "Quote form backend and submission client", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Submit a quote request through the form controller
    Submit(cli::submit::SubmitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = earlybird::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    earlybird::observability::init_observability(
        "earlybird",
        env!("CARGO_PKG_VERSION"),
        &config.logging,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Submit(args) => cli::submit::submit(config, args).await,
    }
}
