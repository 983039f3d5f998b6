//! End-to-end feature run over the training and test splits.

use serde::Serialize;
use std::collections::HashMap;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::aggregate::{CensorPolicy, Corpus, CorpusAggregator};
use crate::config::PipelineConfig;
use crate::data::{BusinessProfile, UserProfile};
use crate::errors::FeatureError;
use crate::features::FeatureVectorBuilder;
use crate::lexicon::Lexicon;
use crate::output::FeatureWriter;
use crate::source::{
    CategoryMap, ReviewIndex, load_business_profiles, load_reviews, load_user_profiles,
};
use crate::splits::SplitLabel;
use crate::text_metrics::TextMetricsAnalyzer;
use crate::transport::fs::write_atomically;
use crate::types::{BusinessId, UserId};

/// Outcome of one split.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SplitSummary {
    /// Split the rows belong to.
    pub split: SplitLabel,
    /// Feature rows written, excluding the header.
    pub rows: usize,
    /// Users with at least one review in the aggregation pool.
    pub users: usize,
    /// Businesses with at least one review in the aggregation pool.
    pub businesses: usize,
    /// Public users whose vote totals were hidden.
    pub censored_users: usize,
    /// Feature file path.
    pub output: PathBuf,
}

/// Outcome of a full run, one entry per split in output order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Per-split outcomes.
    pub splits: Vec<SplitSummary>,
    /// Syllable counts, and so Flesch-Kincaid and SMOG, were estimated
    /// because no pronunciation dictionary was configured.
    pub estimated_syllables: bool,
}

impl RunSummary {
    /// Summary of `split`, if it ran.
    pub fn split(&self, split: SplitLabel) -> Option<&SplitSummary> {
        self.splits.iter().find(|summary| summary.split == split)
    }
}

/// Load every source named by `config` and write both feature files.
///
/// Training rows aggregate over training reviews only; test rows aggregate
/// over training and test reviews together.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, FeatureError> {
    config.validate()?;
    let started = Instant::now();
    let lexicon = Lexicon::load(config.pronunciations.as_deref(), config.tag_lexicon.as_deref())?;
    let categories = CategoryMap::from_path(&config.categories)?;
    info!(
        "[review-features:pipeline] {} category mappings from {}",
        categories.len(),
        config.categories.display()
    );

    let analyzer = TextMetricsAnalyzer::new(&lexicon);
    let training = load_split_reviews(config, SplitLabel::Train, &categories, &analyzer)?;
    let test = load_split_reviews(config, SplitLabel::Test, &categories, &analyzer)?;
    let users = load_user_profiles(&config.user_files())?;
    let businesses = load_business_profiles(&config.business_files(), &categories)?;

    let mut pooled = training.clone();
    pooled.extend(test.iter().map(|(id, review)| (id.clone(), review.clone())));

    let runner = SplitRunner {
        config,
        lexicon: &lexicon,
        users: &users,
        businesses: &businesses,
    };
    let summary = RunSummary {
        splits: vec![
            runner.run(SplitLabel::Train, &training, &training)?,
            runner.run(SplitLabel::Test, &test, &pooled)?,
        ],
        estimated_syllables: lexicon.estimates_syllables(),
    };
    info!(
        "[review-features:pipeline] finished in {:.2}s",
        started.elapsed().as_secs_f64()
    );
    Ok(summary)
}

fn load_split_reviews(
    config: &PipelineConfig,
    split: SplitLabel,
    categories: &CategoryMap,
    analyzer: &TextMetricsAnalyzer<'_>,
) -> Result<ReviewIndex, FeatureError> {
    let inputs = config.split(split);
    load_reviews(&inputs.reviews, inputs.reference_date, categories, analyzer)
}

struct SplitRunner<'a> {
    config: &'a PipelineConfig,
    lexicon: &'a Lexicon,
    users: &'a HashMap<UserId, UserProfile>,
    businesses: &'a HashMap<BusinessId, BusinessProfile>,
}

impl SplitRunner<'_> {
    /// Aggregate `pool`, then write one row per review of `emit`.
    fn run(
        &self,
        split: SplitLabel,
        emit: &ReviewIndex,
        pool: &ReviewIndex,
    ) -> Result<SplitSummary, FeatureError> {
        let censor = CensorPolicy::new(
            self.config.seed,
            split.censor_salt(),
            self.config.censor_probability,
        );
        let corpus = CorpusAggregator::new(self.users, self.businesses, censor)
            .aggregate(pool.values());
        let output = self.config.split(split).output.clone();
        let rows = self.write(&output, emit, &corpus)?;
        info!(
            split = %split,
            rows,
            users = corpus.user_count(),
            censored = corpus.censored_users(),
            "[review-features:pipeline] wrote {}",
            output.display()
        );
        Ok(SplitSummary {
            split,
            rows,
            users: corpus.user_count(),
            businesses: corpus.business_count(),
            censored_users: corpus.censored_users(),
            output,
        })
    }

    fn write(
        &self,
        output: &Path,
        emit: &ReviewIndex,
        corpus: &Corpus,
    ) -> Result<usize, FeatureError> {
        let builder = FeatureVectorBuilder::new(self.lexicon);
        let mut rows = 0;
        write_atomically(output, |file| {
            let mut writer = FeatureWriter::new(BufWriter::new(file), output)?;
            for review in emit.values() {
                writer.write(&builder.build_from_corpus(review, corpus)?)?;
            }
            rows = writer.finish()?;
            Ok(())
        })?;
        Ok(rows)
    }
}
