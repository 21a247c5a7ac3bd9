use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "blockhub-cli")]
#[command(about = "Query a running BlockHub lookup proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:9000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the service descriptor
    Info,
    /// Look up an address
    Address { address: String },
    /// Look up a transaction
    Tx { txid: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let url = match cli.command {
        Commands::Info => base.join("/")?,
        Commands::Address { address } => {
            Url::parse_with_params(base.join("/api/address")?.as_str(), &[("address", address)])?
        }
        Commands::Tx { txid } => {
            Url::parse_with_params(base.join("/api/tx")?.as_str(), &[("txid", txid)])?
        }
    };

    let res = client.get(url).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let pretty = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or(text);

    if status.is_success() {
        println!("{}", pretty);
        Ok(())
    } else {
        eprintln!("Error: proxy returned status {}", status);
        eprintln!("{}", pretty);
        std::process::exit(1);
    }
}
