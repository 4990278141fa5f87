/*!
courtstats Command Line Interface

Provides commands for analyzing a player-season dataset and rendering the
four summary charts.
*/

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use courtstats::reader::{CsvReader, Reader};
use courtstats::render::VegaLiteRenderer;
use courtstats::{pipeline, Dataset, VERSION};

/// Default dataset location, next to the working directory.
const DEFAULT_DATASET: &str = "all_seasons.csv";

#[derive(Parser)]
#[command(name = "courtstats")]
#[command(about = "Exploratory analysis of NBA player-season statistics")]
#[command(version = VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full analysis: preview, result tables, four charts
    Analyze {
        /// Path to the player-season CSV file
        #[arg(default_value = DEFAULT_DATASET)]
        path: PathBuf,

        /// Directory the chart pages are written to
        #[arg(long, default_value = "charts")]
        out_dir: PathBuf,

        /// Print the four Vega-Lite specs to stdout instead of writing pages
        #[arg(long)]
        json: bool,

        /// Show verbose output (row counts, written paths)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Load the dataset and print the first rows
    Preview {
        /// Path to the player-season CSV file
        #[arg(default_value = DEFAULT_DATASET)]
        path: PathBuf,

        /// Number of rows to show
        #[arg(long, default_value = "5")]
        rows: usize,
    },

    /// Load the dataset and check the schema without analyzing
    Validate {
        /// Path to the player-season CSV file
        #[arg(default_value = DEFAULT_DATASET)]
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courtstats=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            out_dir,
            json,
            verbose,
        } => cmd_analyze(path, out_dir, json, verbose),
        Commands::Preview { path, rows } => cmd_preview(path, rows),
        Commands::Validate { path } => cmd_validate(path),
    }
}

fn load_dataset(path: &PathBuf) -> anyhow::Result<Dataset> {
    let df = CsvReader::from_path(path).load()?;
    Ok(Dataset::try_new(df)?)
}

fn cmd_analyze(path: PathBuf, out_dir: PathBuf, json: bool, verbose: bool) -> anyhow::Result<()> {
    if verbose {
        eprintln!("Analyzing: {}", path.display());
    }

    let dataset = load_dataset(&path)?;

    println!("Dataset Preview:");
    println!("{}", dataset.preview(5));

    let analysis = pipeline::analyze(&dataset)?;
    analysis.print_tables();

    if json {
        use courtstats::render::vegalite::{histogram_spec, horizontal_bar_spec, vertical_bar_spec};
        let specs = vec![
            horizontal_bar_spec(&analysis.tallest_chart()),
            vertical_bar_spec(&analysis.scorers_chart()),
            vertical_bar_spec(&analysis.teams_chart()),
            histogram_spec(&analysis.ages_chart()),
        ];
        for spec in specs {
            println!("{}", serde_json::to_string_pretty(&spec)?);
        }
        return Ok(());
    }

    let mut renderer = VegaLiteRenderer::new(&out_dir);
    analysis.render(&mut renderer)?;

    for written in renderer.written() {
        println!("Chart written to: {}", written.display());
    }
    if verbose {
        eprintln!(
            "\nAnalyzed {} row(s); {} chart(s) in {}",
            dataset.len(),
            renderer.written().len(),
            out_dir.display()
        );
    }

    Ok(())
}

fn cmd_preview(path: PathBuf, rows: usize) -> anyhow::Result<()> {
    let dataset = load_dataset(&path)?;
    println!("{}", dataset.preview(rows));
    Ok(())
}

fn cmd_validate(path: PathBuf) -> anyhow::Result<()> {
    let dataset = load_dataset(&path)?;
    println!(
        "OK: {} row(s), required columns present and typed",
        dataset.len()
    );
    Ok(())
}
