use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use anuncia_agent::draft::draft_ad;
use anuncia_agent::Researcher;
use anuncia_common::{Credentials, ProductInput};
use meli_client::MeliClient;

#[derive(Parser)]
#[command(name = "anuncia", about = "Mercado Livre listing assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run market research for a product and print the aggregate as JSON
    Research {
        #[command(flatten)]
        product: ProductArgs,
    },

    /// Research a product, then draft ad content from the results
    Draft {
        #[command(flatten)]
        product: ProductArgs,
    },

    /// Predict marketplace categories for a product name
    CategorySearch {
        /// Product name to classify
        name: String,

        /// Maximum predictions to print
        #[arg(long, default_value_t = 8)]
        limit: u32,
    },
}

#[derive(Args)]
struct ProductArgs {
    /// Marketplace category ID, e.g. MLB1055
    #[arg(long)]
    category: String,

    /// Product name
    #[arg(long)]
    name: String,

    /// Brand name
    #[arg(long, default_value = "")]
    brand: String,

    /// Model name
    #[arg(long, default_value = "")]
    model: String,

    /// Universal product code
    #[arg(long, default_value = "")]
    ean: String,

    /// Free-form notes woven into the description
    #[arg(long)]
    details: Option<String>,

    /// Competitor listing ID or URL; repeat the flag for several.
    /// Omit to auto-discover competitors in the category.
    #[arg(long = "competitor")]
    competitors: Vec<String>,
}

impl ProductArgs {
    fn into_input(self) -> ProductInput {
        ProductInput {
            category_id: self.category,
            name: self.name,
            brand: self.brand,
            model: self.model,
            ean: self.ean,
            details: self.details,
            competitor_ids: if self.competitors.is_empty() {
                None
            } else {
                Some(self.competitors)
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let credentials = Credentials::from_env().context("Loading Mercado Livre credentials")?;
    let client = MeliClient::new(credentials);

    match cli.command {
        Command::Research { product } => {
            let input = product.into_input();
            let researcher = Researcher::new(&client);
            let research = researcher.run(&input).await?;
            println!("{}", serde_json::to_string_pretty(&research)?);
        }
        Command::Draft { product } => {
            let input = product.into_input();
            let researcher = Researcher::new(&client);
            let research = researcher.run(&input).await?;
            let ad = draft_ad(&input, &research);
            println!("{}", serde_json::to_string_pretty(&ad)?);
        }
        Command::CategorySearch { name, limit } => {
            let predictions = client.predict_category(&name, limit).await?;
            if predictions.is_empty() {
                info!("No category predictions for this name");
            }
            for p in predictions {
                println!(
                    "{}  {}  [{}]",
                    p.category_id,
                    p.category_name.unwrap_or_default(),
                    p.domain_name.or(p.domain_id).unwrap_or_default(),
                );
            }
        }
    }

    Ok(())
}
