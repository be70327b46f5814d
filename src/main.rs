mod app;
mod config;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "solana-pay")]
#[command(version, about = "Solana Pay transaction request client")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch, verify and complete the transaction behind a transaction request link
    Fetch {
        /// Transaction request link (https URL of the merchant endpoint)
        #[arg(long)]
        link: String,

        /// Public key of the paying account
        #[arg(long)]
        account: String,

        /// RPC endpoint URL used for the recent blockhash
        #[arg(long)]
        rpc_url: Option<String>,

        /// Commitment level for the recent blockhash (processed, confirmed, finalized)
        #[arg(long)]
        commitment: Option<String>,

        /// HTTP timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Path to config file (optional)
        #[arg(long)]
        config: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Fetch {
            link,
            account,
            rpc_url,
            commitment,
            timeout_secs,
            config: config_path,
            json,
        } => {
            // Load base configuration from file if provided
            let base_config = match &config_path {
                Some(path) => config::Config::from_file(path)?,
                None => config::Config::default(),
            };

            let args = app::FetchArgs {
                link,
                account,
                rpc_url,
                commitment,
                timeout_secs,
                json_output: json,
            };
            let app_cfg = app::AppCfg::resolve(args, base_config)?;

            app::run(app_cfg).await
        }
    }
}
