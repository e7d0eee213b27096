// Entry point and high-level batch flow.
//
// One run reads the housing CSV, cleans and buckets it, draws the weighted
// per-location sample, shuffles it and writes `final_data.csv`. Any failure
// aborts the run with a non-zero exit.
mod error;
mod loader;
mod logging;
mod normalize;
mod output;
mod pipeline;
mod sampler;
mod tiers;
mod types;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use sampler::PipelineConfig;
use std::path::{Path, PathBuf};
use tracing::info;
use types::RunSummary;

#[derive(Parser, Debug)]
#[command(
    name = "housing_sampler",
    about = "Cleans a housing dataset and writes a stratified sample by location"
)]
struct Args {
    /// Input CSV
    #[arg(long, default_value = "housing_data.csv")]
    input: PathBuf,

    /// Where to write the sampled table
    #[arg(long, default_value = "final_data.csv")]
    output: PathBuf,

    /// Seed for every sampling and shuffling step
    #[arg(long, default_value_t = sampler::DEFAULT_SEED)]
    seed: u64,

    /// Total rows in the sample
    #[arg(long, default_value_t = sampler::DEFAULT_TARGET_ROWS)]
    target_rows: usize,

    /// Also write a JSON run summary here
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Rows of the final table to print
    #[arg(long, default_value_t = 5)]
    preview: usize,
}

fn run(args: &Args) -> Result<RunSummary> {
    let config = PipelineConfig {
        seed: args.seed,
        target_rows: args.target_rows,
        ..PipelineConfig::default()
    };

    info!(input = %args.input.display(), "loading dataset");
    let (rows, load_report) = loader::load_rows(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    println!(
        "Processing dataset... ({} rows loaded, {} skipped)",
        util::format_int(load_report.total_rows),
        util::format_int(load_report.skipped_rows)
    );

    let columns = loader::prune_columns(rows);
    let result = pipeline::run(&columns, &config)?;

    println!("Top {} locations:\n", config.top_n);
    output::preview_table_rows(&result.quotas, result.quotas.len());

    write_outputs(&args.output, &result.rows)?;
    println!(
        "Final table: {} rows x 9 columns (saved to {})\n",
        util::format_int(result.rows.len()),
        args.output.display()
    );
    output::preview_table_rows(&result.rows, args.preview);

    let summary = RunSummary {
        input_rows: load_report.total_rows,
        skipped_rows: load_report.skipped_rows,
        missing_bedroom: result.missing_bedroom,
        missing_total_sqft: result.missing_total_sqft,
        seed: config.seed,
        target_rows: config.target_rows,
        output_rows: result.rows.len(),
        locations: result.quotas,
    };
    if let Some(path) = &args.summary {
        output::write_json(path, &summary)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote run summary");
    }
    Ok(summary)
}

fn write_outputs(path: &Path, rows: &[types::HousingRecord]) -> Result<()> {
    output::write_csv(path, rows).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "wrote sampled table");
    Ok(())
}

fn main() -> Result<()> {
    logging::init_logging();
    let args = Args::parse();
    run(&args)?;
    println!("CSV File saved successfully.");
    Ok(())
}
