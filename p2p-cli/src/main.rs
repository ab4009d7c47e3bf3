//! P2P CLI
//!
//! Command-line interface for the P2P transfer API.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use p2p_client::{ClientError, P2pClient};
use p2p_types::TransferRequest;

#[derive(Parser)]
#[command(name = "p2p")]
#[command(author, version, about = "P2P transfer API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the P2P transfer API
    #[arg(long, env = "P2P_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a transfer
    Send(TransferArgs),
    /// Validate a transfer without submitting it
    Validate(TransferArgs),
    /// Show transfer limits
    Limits,
    /// Check API health
    Health,
}

#[derive(Args)]
struct TransferArgs {
    /// Sender's fiscal code
    #[arg(long)]
    sender: String,
    /// Recipient's fiscal code
    #[arg(long)]
    recipient: String,
    /// Amount in EUR (at most two decimals)
    #[arg(long)]
    amount: Decimal,
    #[arg(long, default_value = "EUR")]
    currency: String,
    #[arg(long)]
    description: Option<String>,
    /// Caller-supplied reference id
    #[arg(long)]
    reference: Option<String>,
}

impl TransferArgs {
    fn into_request(self) -> TransferRequest {
        TransferRequest::new(self.sender, self.recipient, self.amount)
            .with_currency(self.currency)
            .with_description(self.description)
            .with_reference_id(self.reference)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = P2pClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => match client.health().await {
            Ok(health) => println!("✓ {} is {} (v{})", health.service, health.status, health.version),
            Err(e) => {
                println!("✗ API is not healthy: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Limits => {
            let limits = client.limits().await?;
            println!("{}", serde_json::to_string_pretty(&limits)?);
        }

        Commands::Validate(args) => {
            let report = client.validate(&args.into_request()).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_valid {
                std::process::exit(1);
            }
        }

        Commands::Send(args) => match client.transfer(&args.into_request()).await {
            Ok(receipt) => println!("{}", serde_json::to_string_pretty(&receipt)?),
            Err(ClientError::Api {
                status,
                code,
                message,
            }) => {
                eprintln!("✗ Transfer failed ({}): {} {}", status, code, message);
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
