//! smartreco: load interaction and product CSVs, then print recommendations
//! for one user.

mod render;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ingestion::{IngestionPipeline, ProductCatalog};
use query::{RecommendationEngine, RecommendationRequest, Strategy};
use smartreco_core::config::AppConfig;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "smartreco")]
#[command(about = "Collaborative, content-based and popularity product recommendations")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to config/default.toml and RUN_MODE overlays)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interaction CSV: user id, product id, ... (overrides config)
    #[arg(long, env = "SMARTRECO__INGESTION__INTERACTIONS_PATH")]
    interactions: Option<PathBuf>,

    /// Product CSV: product id, category, price range, brand, ... (overrides config)
    #[arg(long, env = "SMARTRECO__INGESTION__PRODUCTS_PATH")]
    products: Option<PathBuf>,

    /// Raw user id, without the `user_` prefix
    #[arg(long, short)]
    user: Option<String>,

    /// Strategy to run; every applicable strategy when omitted
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Fail on unknown users instead of serving popularity
    #[arg(long, default_value_t = false)]
    no_fallback: bool,

    /// Print responses as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Collaborative,
    ContentBased,
    Popularity,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Collaborative => Strategy::Collaborative,
            StrategyArg::ContentBased => Strategy::ContentBased,
            StrategyArg::Popularity => Strategy::Popularity,
        }
    }
}

impl Cli {
    fn strategies(&self) -> Vec<Strategy> {
        match (self.strategy, &self.user) {
            (Some(strategy), _) => vec![strategy.into()],
            (None, Some(_)) => Strategy::ALL.to_vec(),
            (None, None) => vec![Strategy::Popularity],
        }
    }

    fn requests(&self, fallback: bool) -> Vec<RecommendationRequest> {
        self.strategies()
            .into_iter()
            .map(|strategy| match (&self.user, strategy.requires_user()) {
                (Some(user), true) => RecommendationRequest::for_user(strategy, user.as_str()),
                (None, true) => RecommendationRequest {
                    strategy,
                    user_id: None,
                    fallback,
                },
                (_, false) => RecommendationRequest::popularity(),
            })
            .map(|request| request.with_fallback(fallback))
            .collect()
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        }),
    };

    if let Some(path) = &cli.interactions {
        config.ingestion.interactions_path = path.clone();
    }
    if let Some(path) = &cli.products {
        config.ingestion.products_path = path.clone();
    }
    if cli.no_fallback {
        config.recommend.fallback_to_popularity = false;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    smartreco_core::init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    info!(
        interactions = %config.ingestion.interactions_path.display(),
        products = %config.ingestion.products_path.display(),
        "loading sources"
    );

    let index = IngestionPipeline::load(&config.ingestion)?;
    let catalog = ProductCatalog::from_path(&config.ingestion.products_path)?;
    let engine = RecommendationEngine::new(index);

    let mut responses = Vec::new();
    for request in cli.requests(config.recommend.fallback_to_popularity) {
        responses.push(engine.execute(&request)?);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&responses)?);
    } else {
        for response in &responses {
            println!("{}", render::render_text(response, &catalog));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_selection() {
        let cli = Cli::try_parse_from(["smartreco", "--user", "1"]).unwrap();
        assert_eq!(cli.strategies(), Strategy::ALL.to_vec());

        let cli = Cli::try_parse_from(["smartreco"]).unwrap();
        assert_eq!(cli.strategies(), vec![Strategy::Popularity]);

        let cli =
            Cli::try_parse_from(["smartreco", "--strategy", "content-based", "-u", "2"]).unwrap();
        assert_eq!(cli.strategies(), vec![Strategy::ContentBased]);
    }

    #[test]
    fn test_popularity_request_drops_user() {
        let cli = Cli::try_parse_from(["smartreco", "--user", "1"]).unwrap();
        let requests = cli.requests(true);

        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].user_id.as_deref(), Some("1"));
        assert_eq!(requests[2].strategy, Strategy::Popularity);
        assert_eq!(requests[2].user_id, None);
        assert!(requests.iter().all(|r| r.fallback));
    }

    #[test]
    fn test_cli_overrides_config_paths() {
        let cli = Cli::try_parse_from([
            "smartreco",
            "--interactions",
            "a.csv",
            "--products",
            "b.csv",
            "--no-fallback",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();

        assert_eq!(config.ingestion.interactions_path, PathBuf::from("a.csv"));
        assert_eq!(config.ingestion.products_path, PathBuf::from("b.csv"));
        assert!(!config.recommend.fallback_to_popularity);
    }
}
