#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Per-user and per-business review aggregates.
pub mod aggregate;
/// Command-line entry point shared by the binary.
pub mod cli;
/// Pipeline configuration types.
pub mod config;
/// Centralized constants for readability, features, censoring, and sources.
pub mod constants;
/// Source records, resolved reviews, and profiles.
pub mod data;
/// Per-review feature vectors.
pub mod features;
mod hash;
/// Pronunciation, part-of-speech, and stop-word resources.
pub mod lexicon;
/// Aggregate metrics helpers.
pub mod metrics;
/// Feature file serialization.
pub mod output;
/// End-to-end feature run.
pub mod pipeline;
/// TF-IDF similarity scoring.
pub mod similarity;
/// Review, profile, and category loading.
pub mod source;
/// Training and test split labels.
pub mod splits;
/// Text metrics and readability scores.
pub mod text_metrics;
/// Input/output transports (filesystem today).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;

mod errors;

pub use aggregate::{BusinessAggregate, CensorPolicy, Corpus, CorpusAggregator, UserAggregate};
pub use config::{PipelineConfig, SplitInputs};
pub use data::{BusinessProfile, ReviewRecord, ReviewSource, UserProfile, Votes};
pub use errors::FeatureError;
pub use features::{FEATURE_HEADER, FeatureVector, FeatureVectorBuilder, VotePolicy, VoteRates};
pub use lexicon::Lexicon;
pub use output::{Cell, FeatureWriter};
pub use pipeline::{RunSummary, SplitSummary, run};
pub use similarity::{SimilarityScorer, TermCounts};
pub use source::CategoryMap;
pub use splits::SplitLabel;
pub use text_metrics::{TextMetrics, TextMetricsAnalyzer};
pub use types::{AgeDays, BusinessId, CategoryCode, ReviewId, Stars, UserId};
