use analytics::{ReportBuilder, SellerReportEntry};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, CellAlignment, ContentArrangement, Table};
use configuration::{load_config, OutputFormat};
use core_types::SalesBatch;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// How many SKUs the table shows per seller before collapsing the rest.
const TABLE_TOP_PRODUCTS: usize = 3;

/// The main entry point for the sales report application.
fn main() -> Result<()> {
    // A missing .env file is fine; RUST_LOG and overrides may come from the shell.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Analyze(args) => handle_analyze(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Ranks sellers by profit and works out their bonuses.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the seller performance report for a batch of sales data.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// JSON file with `sellers`, `products` and `purchase_records`.
    #[arg(long, short)]
    input: PathBuf,

    /// Configuration file with bonus tiers and report settings.
    #[arg(long, short, default_value = "config.toml")]
    config: PathBuf,

    /// Output format. Falls back to `[output] format` from the configuration.
    #[arg(long, short, value_enum)]
    format: Option<OutputFormat>,

    /// Write the report here instead of standard output.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Loads settings and the batch, builds the report and renders it.
fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let settings = load_config(&args.config)
        .with_context(|| format!("failed to load configuration from {}", args.config.display()))?;

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read sales data from {}", args.input.display()))?;
    let batch = SalesBatch::from_json_str(&raw)
        .with_context(|| format!("{} is not a valid sales batch", args.input.display()))?;

    let report = ReportBuilder::with_settings(&settings)
        .build(&batch)
        .context("failed to build the seller report")?;

    let format = args.format.unwrap_or(settings.output.format);
    let rendered = match format {
        OutputFormat::Table => render_table(&report).to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };

    match args.output {
        Some(path) => {
            fs::write(&path, rendered + "\n")
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!(path = %path.display(), sellers = report.len(), "Report written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Lays the report out as a terminal table, one row per ranked seller.
fn render_table(report: &[SellerReportEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Rank",
            "Seller",
            "Name",
            "Revenue",
            "Profit",
            "Sales",
            "Bonus",
            "Top products",
        ]);

    for (rank, entry) in report.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            entry.seller_id.clone(),
            entry.name.clone(),
            entry.revenue.to_string(),
            entry.profit.to_string(),
            entry.sales_count.to_string(),
            entry.bonus.to_string(),
            summarize_top_products(entry),
        ]);
    }

    for column in [0, 3, 4, 5, 6] {
        if let Some(column) = table.column_mut(column) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}

/// `SKU_001×12, SKU_007×9, SKU_003×4 (+2 more)`
fn summarize_top_products(entry: &SellerReportEntry) -> String {
    if entry.top_products.is_empty() {
        return "-".to_string();
    }

    let shown: Vec<String> = entry
        .top_products
        .iter()
        .take(TABLE_TOP_PRODUCTS)
        .map(|p| format!("{}×{}", p.sku, p.quantity))
        .collect();

    let hidden = entry.top_products.len().saturating_sub(TABLE_TOP_PRODUCTS);
    if hidden > 0 {
        format!("{} (+{} more)", shown.join(", "), hidden)
    } else {
        shown.join(", ")
    }
}
