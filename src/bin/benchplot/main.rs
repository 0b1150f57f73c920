//! Binary entry point: plot average benchmark runtimes from CSV results.
#![forbid(unsafe_code)]

mod ui;

use std::error::Error;
use std::path::PathBuf;

use benchplot::{
    aggregate_files,
    chart::{render_chart, ChartTarget, RenderOutcome, SystemViewer},
    config::PlotConfig,
    AggregatedResults,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};
use ui::{Theme, Ui};

#[derive(Parser, Debug)]
#[command(
    name = "benchplot",
    version,
    about = "Plot average benchmark runtimes from CSV result files"
)]
struct Cli {
    #[arg(
        value_name = "CSV",
        required = true,
        help = "CSV files with Binary, Benchmark File and Runtime (s) columns"
    )]
    files: Vec<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "Write the chart to PATH instead of opening a viewer"
    )]
    output: Option<PathBuf>,

    #[arg(long, value_name = "FILE", env = "BENCHPLOT_CONFIG", help = "Config file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Print the aggregated runtimes")]
    summary: bool,

    #[arg(
        long,
        value_enum,
        default_value_t = SummaryFormat::Text,
        help = "Output format for --summary"
    )]
    format: SummaryFormat,

    #[arg(long, value_enum, default_value_t = Theme::Auto, help = "Terminal color theme")]
    theme: Theme,

    #[arg(short, long, help = "Print plain messages without icons or colors")]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum SummaryFormat {
    Text,
    Json,
}

fn main() {
    install_tracing_subscriber();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let ui = Ui::new(cli.theme, cli.quiet);
    let config = PlotConfig::load(cli.config.clone())?;
    let style = config.chart_style();

    let results = aggregate_files(&cli.files)?;
    if cli.summary {
        print_summary(&ui, cli.format, &results)?;
    }

    let viewer = SystemViewer::new(config.viewer_command().map(str::to_string));
    let target = match &cli.output {
        Some(path) => ChartTarget::File(path),
        None => ChartTarget::Display(&viewer),
    };
    match render_chart(&results, target, &style)? {
        RenderOutcome::Saved { path, .. } => {
            ui.success(&format!("Chart saved to {}", path.display()));
        }
        RenderOutcome::Displayed => ui.info("Chart opened in viewer"),
    }
    Ok(())
}

fn print_summary(
    ui: &Ui,
    format: SummaryFormat,
    results: &AggregatedResults,
) -> Result<(), Box<dyn Error>> {
    match format {
        SummaryFormat::Json => {
            let json = serde_json::to_string_pretty(results.rows())?;
            println!("{json}");
        }
        SummaryFormat::Text => ui.section(
            "Average runtimes",
            results.rows().iter().map(|row| {
                let mean = row
                    .mean_runtime_secs
                    .map(|secs| format!("{secs:.4}s"))
                    .unwrap_or_else(|| "n/a".to_string());
                (
                    format!("{} / {}", row.binary, row.benchmark),
                    format!("{mean} ({} runs)", row.samples),
                )
            }),
        ),
    }
    Ok(())
}

fn install_tracing_subscriber() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
