mod discover;
mod locate;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use miamlo_core::load_app_config;
use miamlo_discovery::SortKey;

#[derive(Debug, Parser)]
#[command(name = "miamlo")]
#[command(about = "Discover home-cooked dishes, chefs, and promotions nearby")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Acquire the current position and cache it for 24 hours.
    Locate {
        /// Re-acquire even when a fresh cached position exists.
        #[arg(long)]
        force: bool,
    },
    /// Browse dishes around the cached position.
    Plats {
        /// Free-text search over dish names and descriptions.
        #[arg(long)]
        search: Option<String>,
        /// Restrict to one category chip.
        #[arg(long)]
        category: Option<String>,
        /// newest, price_asc, price_desc, rating, or cook_time.
        #[arg(long, default_value = "newest")]
        sort: SortKey,
        /// Maximum preparation time, minutes.
        #[arg(long)]
        max_cook_time: Option<u32>,
        /// Minimum average rating, e.g. 4 or 4.5.
        #[arg(long)]
        min_rating: Option<f32>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Browse chefs around the cached position.
    Chefs {
        /// Matches chef names, categories, and descriptions on the fetched page.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Browse dishes with an active promotion.
    Promos {
        /// Matches dish names, chef names, and descriptions on the fetched page.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List the dish categories available nearby.
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Locate { force } => locate::run(&config, force).await,
        Commands::Plats {
            search,
            category,
            sort,
            max_cook_time,
            min_rating,
            page,
        } => {
            discover::run_plats(&config, search, category, sort, max_cook_time, min_rating, page)
                .await
        }
        Commands::Chefs { search, page } => discover::run_chefs(&config, search, page).await,
        Commands::Promos { search, page } => discover::run_promos(&config, search, page).await,
        Commands::Categories => discover::run_categories(&config).await,
    }
}
