use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokescout_api::PokeApiClient;
use pokescout_core::{
    CacheStore, CatalogSource, Config, DetailLoader, PokeApiProvider, SearchEngine, SearchRequest,
};

#[derive(Parser)]
#[command(name = "pokescout")]
#[command(version, about = "Faceted search over the PokeAPI catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Search the catalog with text and type filters
    Search {
        /// Exact name, numeric id, or fuzzy fragment
        #[arg(default_value = "")]
        query: String,

        /// Elemental type filter; repeat to intersect (-t fire -t flying)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Results per page
        #[arg(long, default_value_t = 24)]
        page_size: usize,
    },
    /// Show one pokemon's full details
    Show {
        /// Name or numeric id
        key: String,
    },
    /// List the elemental types usable as search filters
    Types,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokescout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let client = PokeApiClient::with_base_url(config.catalog.base_url.clone());
    let source: Arc<dyn CatalogSource> = Arc::new(PokeApiProvider::new(client));
    let store = Arc::new(CacheStore::new());
    let engine = SearchEngine::new(Arc::clone(&source), Arc::clone(&store));

    match cli.command {
        Some(Commands::Search {
            query,
            types,
            page,
            page_size,
        }) => {
            tracing::info!("Searching for: '{}' types={:?}", query, types);
            let outcome = engine
                .search(&SearchRequest {
                    query,
                    page,
                    page_size,
                    types,
                })
                .await;

            if let Some(err) = outcome.error {
                anyhow::bail!("search failed: {}", err);
            }

            println!("{} result(s), page {}", outcome.total, page);
            for card in outcome.items {
                println!("#{:>4}  {:<20} [{}]", card.id, card.name, card.types.join(", "));
            }
        }
        Some(Commands::Show { key }) => {
            tracing::info!("Showing: {}", key);
            let loader = DetailLoader::new(Arc::clone(&source), Arc::clone(&store));
            loader.set_key(&key).await;

            let state = loader.state();
            if let Some(err) = state.error {
                anyhow::bail!("{}", err);
            }
            let Some(detail) = state.value else {
                anyhow::bail!("no key given");
            };

            println!("#{} {}", detail.card.id, detail.card.name);
            println!("Types:     {}", detail.card.types.join(", "));
            println!("Height:    {} dm", detail.height);
            println!("Weight:    {} hg", detail.weight);
            println!("Abilities: {}", detail.abilities.join(", "));
            for stat in &detail.stats {
                println!("{:<16} {}", stat.label, stat.value);
            }
            println!("{} move(s) known", detail.moves.len());
        }
        Some(Commands::Types) => {
            for type_name in engine.types().await?.iter() {
                println!("{}", type_name);
            }
        }
        None => {
            println!("No command specified. Try --help");
        }
    }

    Ok(())
}
