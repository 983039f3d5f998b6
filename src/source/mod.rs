//! Source loading for reviews, profiles, and the category mapping.
//!
//! Ownership model:
//! - Each review is analyzed exactly once on load and stored as an
//!   `Arc<ReviewRecord>`; aggregates share those handles instead of copying.
//! - Profile maps are merged from every split's files and are read-only after
//!   loading. Censoring happens later, on per-split copies.

use chrono::NaiveDate;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::data::{BusinessProfile, BusinessSource, ReviewRecord, ReviewSource, UserProfile, UserSource};
use crate::errors::FeatureError;
use crate::text_metrics::TextMetricsAnalyzer;
use crate::transport::fs::read_json_lines;
use crate::types::{BusinessId, ReviewId, UserId};

/// Category mapping file parser.
pub mod categories;

pub use categories::CategoryMap;

/// Reviews of one split keyed by id, in first-encountered order.
pub type ReviewIndex = IndexMap<ReviewId, Arc<ReviewRecord>>;

/// Load and analyze every review in `path`.
pub fn load_reviews(
    path: &Path,
    reference_date: NaiveDate,
    categories: &CategoryMap,
    analyzer: &TextMetricsAnalyzer<'_>,
) -> Result<ReviewIndex, FeatureError> {
    let sources: Vec<ReviewSource> = read_json_lines(path)?;
    let total = sources.len();
    let reviews = index_reviews(sources, reference_date, categories, analyzer)?;
    info!(
        "[review-features:source] loaded {} reviews from {} (lines={})",
        reviews.len(),
        path.display(),
        total
    );
    Ok(reviews)
}

/// Resolve review source lines into an ordered index.
///
/// A repeated `review_id` replaces the earlier record but keeps its position.
pub fn index_reviews<I>(
    sources: I,
    reference_date: NaiveDate,
    categories: &CategoryMap,
    analyzer: &TextMetricsAnalyzer<'_>,
) -> Result<ReviewIndex, FeatureError>
where
    I: IntoIterator<Item = ReviewSource>,
{
    let mut reviews = ReviewIndex::new();
    for source in sources {
        let record = ReviewRecord::from_source(source, categories, reference_date, analyzer)?;
        let review_id = record.review_id.clone();
        if let Some(previous) = reviews.insert(review_id, Arc::new(record)) {
            warn!(
                review_id = %previous.review_id,
                "[review-features:source] duplicate review id; keeping the later record"
            );
        }
    }
    Ok(reviews)
}

/// Merge user profiles from `paths`; later files win on duplicate ids.
pub fn load_user_profiles(paths: &[PathBuf]) -> Result<HashMap<UserId, UserProfile>, FeatureError> {
    let mut profiles = HashMap::new();
    for path in paths {
        let sources: Vec<UserSource> = read_json_lines(path)?;
        debug!(path = %path.display(), count = sources.len(), "[review-features:source] user file read");
        for source in &sources {
            profiles.insert(source.user_id.clone(), UserProfile::from(source));
        }
    }
    info!("[review-features:source] {} user profiles", profiles.len());
    Ok(profiles)
}

/// Merge business profiles from `paths`; later files win on duplicate ids.
///
/// Businesses without a category mapping are skipped: no review can
/// reference them without failing category lookup first.
pub fn load_business_profiles(
    paths: &[PathBuf],
    categories: &CategoryMap,
) -> Result<HashMap<BusinessId, BusinessProfile>, FeatureError> {
    let mut profiles = HashMap::new();
    let mut unmapped = 0usize;
    for path in paths {
        let sources: Vec<BusinessSource> = read_json_lines(path)?;
        debug!(path = %path.display(), count = sources.len(), "[review-features:source] business file read");
        for source in &sources {
            match categories.get(&source.business_id) {
                Some(category) => {
                    profiles.insert(
                        source.business_id.clone(),
                        BusinessProfile::from_source(source, category),
                    );
                }
                None => unmapped += 1,
            }
        }
    }
    if unmapped > 0 {
        debug!(unmapped, "[review-features:source] business profiles without a category");
    }
    info!("[review-features:source] {} business profiles", profiles.len());
    Ok(profiles)
}
