use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use client_core::PredictionClient;
use shared::{domain::ProductFields, protocol::PredictionEndpoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Price,
    Fraud,
    Both,
}

/// Submit a product to the pricing / fraud prediction service and print the
/// rendered result lines.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server_url: String,
    #[arg(long, value_enum, default_value_t = Mode::Both)]
    mode: Mode,
    #[arg(long)]
    brand: String,
    #[arg(long)]
    category: String,
    #[arg(long)]
    material: String,
    #[arg(long)]
    rating: String,
    #[arg(long)]
    transactions: String,
}

impl Args {
    fn endpoints(&self) -> Vec<PredictionEndpoint> {
        match self.mode {
            Mode::Price => vec![PredictionEndpoint::Price],
            Mode::Fraud => vec![PredictionEndpoint::Fraud],
            Mode::Both => vec![PredictionEndpoint::Price, PredictionEndpoint::Fraud],
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let fields = ProductFields {
        brand: args.brand.clone(),
        category: args.category.clone(),
        material: args.material.clone(),
        rating: args.rating.clone(),
        transactions: args.transactions.clone(),
        extras: Default::default(),
    };

    let client = PredictionClient::new(&args.server_url)?;
    let mut failed = false;
    for endpoint in args.endpoints() {
        tracing::info!(endpoint = endpoint.path(), "submitting product query");
        match client.submit_fields(endpoint, &fields).await {
            Ok(outcome) => println!("{}", outcome.display_text()),
            Err(err) => {
                eprintln!("Error: {}", err.user_message());
                failed = true;
            }
        }
    }

    if failed {
        return Err(anyhow!("one or more predictions failed"));
    }
    Ok(())
}
