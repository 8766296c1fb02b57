use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use engagement_reader::config::DEFAULT_QUALIFYING_LEVELS;
use engagement_reader::utils::logging::{console, create_spinner, finish_and_clear};
use engagement_reader::{
    ClassifierConfig, DepartmentClassifier, OutputConfig, OutputFormat, ReaderConfig,
    read_employees_async, write_results,
};
use log::info;

/// Report departments where enough employees are satisfied and engaged
#[derive(Parser, Debug)]
#[command(name = "engagement-reader")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Employee data: a .csv or .parquet file, or a directory of them
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Where to write the qualifying departments
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,

    /// Percentage a department must strictly exceed
    #[arg(short, long, default_value_t = engagement_reader::config::DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Minimum satisfaction rating of a qualifying employee
    #[arg(long, default_value_t = engagement_reader::config::DEFAULT_MIN_RATING)]
    min_rating: i64,

    /// Engagement levels of a qualifying employee
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_QUALIFYING_LEVELS.map(String::from)
    )]
    levels: Vec<String>,

    /// Output format (csv or json)
    #[arg(short, long, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Rows per record batch when reading
    #[arg(long)]
    batch_size: Option<usize>,

    /// Field delimiter for CSV input
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Print every department with its counts
    #[arg(long)]
    show_all: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn reader_config(&self) -> anyhow::Result<ReaderConfig> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| {
                format!(
                    "delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                )
            })?;

        let mut config = ReaderConfig::default().with_delimiter(delimiter);
        if let Some(batch_size) = self.batch_size {
            config = config.with_batch_size(batch_size);
        }
        Ok(config)
    }

    fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig::default()
            .with_threshold(self.threshold)
            .with_min_rating(self.min_rating)
            .with_qualifying_levels(self.levels.iter().map(|level| level.trim().to_string()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let reader_config = cli.reader_config()?;
    let classifier_config = cli.classifier_config();
    info!("{classifier_config}");

    let classifier =
        DepartmentClassifier::new(classifier_config).context("Invalid classifier configuration")?;

    let start = Instant::now();
    let spinner = create_spinner(Some("Loading employee data"));
    let loaded = read_employees_async(&cli.input, &reader_config).await;
    finish_and_clear(&spinner);
    let batches = loaded
        .with_context(|| format!("Failed to load employee data from {}", cli.input.display()))?;

    let (results, summary) = classifier
        .classify_with_summary(&batches)
        .context("Failed to classify departments")?;

    if cli.show_all {
        console::print_department_stats(&classifier.department_stats(&batches)?);
    }
    console::print_results(&results);
    console::print_summary(&batches, &summary, start.elapsed());

    let output = OutputConfig::new(&cli.output).with_format(cli.format);
    write_results(&results, &output)
        .with_context(|| format!("Failed to write results to {}", output.path.display()))?;

    info!(
        "Wrote {} departments to {} in {:?}",
        results.len(),
        output.path.display(),
        start.elapsed()
    );

    Ok(())
}
