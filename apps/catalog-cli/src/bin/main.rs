use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_core::config::Config;
use catalog_core::types::{Dimension, DimensionDelta, Query};
use catalog_rank::{CatalogEngine, CatalogService};

#[derive(Parser)]
#[command(name = "catalog-cli", about = "Search a product catalog by text, dimensions or SKU")]
struct Cli {
    /// Catalog file (CSV or JSON). Overrides `catalog.path` from config.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print ranked results as a table
    Query(QueryArgs),
    /// Print the formatted JSON response
    Respond(QueryArgs),
    /// List query terms present in the catalog vocabulary
    Terms { text: String },
}

#[derive(Args)]
struct QueryArgs {
    #[arg(default_value = "")]
    text: String,
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    length: Option<f64>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    sku: Option<String>,
    #[arg(long)]
    limit: Option<usize>,
}

impl QueryArgs {
    fn to_query(&self, default_limit: usize) -> Query {
        let mut query = Query::new(self.text.clone()).max_results(self.limit.unwrap_or(default_limit));
        for (dimension, value) in [
            (Dimension::Weight, self.weight),
            (Dimension::Length, self.length),
            (Dimension::Width, self.width),
            (Dimension::Height, self.height),
        ] {
            if let Some(value) = value {
                query = query.target(dimension, value);
            }
        }
        if let Some(sku) = &self.sku {
            query = query.sku(sku.clone());
        }
        query
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.search_settings()?;
    let catalog_path = cli.catalog.unwrap_or(settings.catalog_path);
    info!(catalog = %catalog_path.display(), "loading catalog");

    let service = CatalogService::load(catalog_path)?;
    let engine = service.snapshot();

    match cli.command {
        Command::Query(args) => print_table(&engine, &args.to_query(settings.max_results)),
        Command::Respond(args) => {
            let response = engine.get_response(&args.to_query(settings.max_results));
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Terms { text } => {
            for term in engine.vocabulary_matches(&text) {
                println!("{term}");
            }
        }
    }
    Ok(())
}

fn print_table(engine: &CatalogEngine, query: &Query) {
    let results = engine.search(query);
    println!("Found {} results for: \"{}\"", results.len(), query.text);
    println!(
        "{:<40} {:>10} {:>10} {:>12} {:>12} {:>12}",
        "Name", "Text", "Dim", "Weight", "Width", "Length"
    );
    for r in &results {
        let dim = r.dim_score.map_or_else(|| "-".to_string(), |d| format!("{d:.4}"));
        println!(
            "{:<40} {:>10.4} {:>10} {:>12} {:>12} {:>12}",
            truncate(&r.record.name, 40),
            r.text_score,
            dim,
            cell(r.record.dimensions.weight, r.differences.get(&Dimension::Weight)),
            cell(r.record.dimensions.width, r.differences.get(&Dimension::Width)),
            cell(r.record.dimensions.length, r.differences.get(&Dimension::Length)),
        );
    }
}

/// Catalog value, with the distance from the target when one was requested.
fn cell(value: Option<f64>, delta: Option<&DimensionDelta>) -> String {
    let value = value.map_or_else(|| "-".to_string(), |v| format!("{v}"));
    match delta {
        Some(DimensionDelta::Value(d)) => format!("{value} (±{d:.1})"),
        _ => value,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).chain(std::iter::once('…')).collect()
    }
}
