use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, error::ErrorKind};
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::constants::censoring::{DEFAULT_CENSOR_PROBABILITY, DEFAULT_SEED};
use crate::constants::sources::{DATE_FORMAT, DEFAULT_DATA_DIR};
use crate::pipeline::{RunSummary, run};

const DEFAULT_LOG_FILTER: &str = "review_features=info";

#[derive(Debug, Parser)]
#[command(
    name = "review-features",
    version,
    disable_help_subcommand = true,
    about = "Derive per-review feature files for useful-vote prediction",
    long_about = "Read review, user, and business records for the training and test splits, then write one feature row per review.",
    after_help = "Input and output paths default to the standard layout under --data-dir; individual paths can be overridden."
)]
struct ReviewFeaturesCli {
    #[arg(
        long = "data-dir",
        value_name = "PATH",
        default_value = DEFAULT_DATA_DIR,
        help = "Root directory holding the training/ and test/ source trees"
    )]
    data_dir: PathBuf,
    #[arg(
        long,
        default_value_t = DEFAULT_SEED,
        help = "Seed for the per-user vote censoring draw"
    )]
    seed: u64,
    #[arg(
        long = "censor-probability",
        default_value_t = DEFAULT_CENSOR_PROBABILITY,
        help = "Probability that a public user's vote totals are hidden"
    )]
    censor_probability: f64,
    #[arg(
        long,
        value_name = "PATH",
        help = "Category mapping CSV (defaults to <data-dir>/business_clusters.csv)"
    )]
    categories: Option<PathBuf>,
    #[arg(
        long,
        value_name = "PATH",
        help = "CMU-format pronunciation dictionary used for syllable counts"
    )]
    pronunciations: Option<PathBuf>,
    #[arg(
        long = "tag-lexicon",
        value_name = "PATH",
        help = "Optional `word TAG` overrides for the part-of-speech tagger"
    )]
    tag_lexicon: Option<PathBuf>,
    #[arg(long = "training-output", value_name = "PATH", help = "Training feature file")]
    training_output: Option<PathBuf>,
    #[arg(long = "test-output", value_name = "PATH", help = "Test feature file")]
    test_output: Option<PathBuf>,
    #[arg(
        long = "training-reference-date",
        value_name = "YYYY-MM-DD",
        value_parser = parse_date_arg,
        help = "Date training review ages are measured from"
    )]
    training_reference_date: Option<NaiveDate>,
    #[arg(
        long = "test-reference-date",
        value_name = "YYYY-MM-DD",
        value_parser = parse_date_arg,
        help = "Date test review ages are measured from"
    )]
    test_reference_date: Option<NaiveDate>,
}

impl ReviewFeaturesCli {
    fn into_config(self) -> PipelineConfig {
        let mut config = PipelineConfig::in_data_dir(&self.data_dir)
            .with_seed(self.seed)
            .with_censor_probability(self.censor_probability);
        if let Some(path) = self.categories {
            config.categories = path;
        }
        if let Some(path) = self.pronunciations {
            config = config.with_pronunciations(path);
        }
        if let Some(path) = self.tag_lexicon {
            config = config.with_tag_lexicon(path);
        }
        if let Some(path) = self.training_output {
            config.training.output = path;
        }
        if let Some(path) = self.test_output {
            config.test.output = path;
        }
        if let Some(date) = self.training_reference_date {
            config.training.reference_date = date;
        }
        if let Some(date) = self.test_reference_date {
            config.test.reference_date = date;
        }
        config
    }
}

/// Parse `args_iter` (without the program name) into a [`PipelineConfig`].
///
/// Returns `Ok(None)` after printing help or version output.
pub fn parse_config<I>(args_iter: I) -> Result<Option<PipelineConfig>, Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let cli = parse_cli::<ReviewFeaturesCli, _>(
        std::iter::once("review-features".to_string()).chain(args_iter),
    )?;
    Ok(cli.map(ReviewFeaturesCli::into_config))
}

/// Entry point of the `review-features` binary.
pub fn run_review_features<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let Some(config) = parse_config(args_iter)? else {
        return Ok(());
    };
    let summary = run(&config)?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    for split in &summary.splits {
        info!(
            split = %split.split,
            rows = split.rows,
            users = split.users,
            businesses = split.businesses,
            censored = split.censored_users,
            "[review-features] {}",
            split.output.display()
        );
    }
    if summary.estimated_syllables {
        warn!(
            "[review-features] syllable counts were estimated; Flesch-Kincaid and SMOG columns \
             are approximate (pass --pronunciations for dictionary counts)"
        );
    }
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|err| format!("expected YYYY-MM-DD, got '{raw}': {err}"))
}
