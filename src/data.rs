use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::sources::DATE_FORMAT;
use crate::errors::FeatureError;
use crate::similarity::TermCounts;
use crate::source::CategoryMap;
use crate::text_metrics::{AnalyzedText, TextMetrics, TextMetricsAnalyzer};

use crate::types::{AgeDays, BusinessId, CategoryCode, ReviewId, Stars, UserId};

/// Funny/useful/cool vote counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Votes {
    /// "Funny" votes.
    pub funny: u64,
    /// "Useful" votes; the prediction target.
    pub useful: u64,
    /// "Cool" votes.
    pub cool: u64,
}

/// One line of the review source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewSource {
    /// Review identifier.
    pub review_id: ReviewId,
    /// Author.
    pub user_id: UserId,
    /// Reviewed business.
    pub business_id: BusinessId,
    /// Star rating, 1 to 5.
    pub stars: Stars,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Raw review body.
    pub text: String,
    /// Absent in test splits.
    #[serde(default)]
    pub votes: Option<Votes>,
}

/// One line of the user source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserSource {
    /// User identifier.
    pub user_id: UserId,
    /// Mean star rating over all of the user's reviews.
    pub average_stars: Stars,
    /// Reviews the user has written.
    pub review_count: u64,
    /// Vote totals; absent in test splits.
    #[serde(default)]
    pub votes: Option<Votes>,
}

/// One line of the business source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BusinessSource {
    /// Business identifier.
    pub business_id: BusinessId,
    /// False once the business has closed.
    pub open: bool,
    /// Mean star rating.
    pub stars: Stars,
    /// Reviews the business has received.
    pub review_count: u64,
    /// Required; a record without the field is malformed.
    pub categories: Vec<String>,
}

/// A review with its category, age, and text metrics resolved.
///
/// Built once at load time and shared read-only afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewRecord {
    /// Review identifier.
    pub review_id: ReviewId,
    /// Author.
    pub user_id: UserId,
    /// Reviewed business.
    pub business_id: BusinessId,
    /// Category code of the reviewed business.
    pub business_category: CategoryCode,
    /// Star rating, 1 to 5.
    pub stars: Stars,
    /// Days between the review date and the split's reference date.
    pub age_days: AgeDays,
    /// `None` when the source carries no vote data.
    pub votes: Option<Votes>,
    /// Normalized body and its metrics.
    pub text: AnalyzedText,
    /// Term frequencies of the normalized body.
    pub terms: TermCounts,
}

impl ReviewRecord {
    /// Resolve a source line against the category mapping and reference date.
    pub fn from_source(
        source: ReviewSource,
        categories: &CategoryMap,
        reference_date: NaiveDate,
        analyzer: &TextMetricsAnalyzer<'_>,
    ) -> Result<Self, FeatureError> {
        let business_category = categories.get(&source.business_id).ok_or_else(|| {
            FeatureError::MissingCategory {
                review_id: source.review_id.clone(),
                business_id: source.business_id.clone(),
            }
        })?;
        let date = NaiveDate::parse_from_str(&source.date, DATE_FORMAT).map_err(|_| {
            FeatureError::InvalidDate {
                review_id: source.review_id.clone(),
                value: source.date.clone(),
            }
        })?;
        let text = analyzer.analyze(&source.text);
        let terms = TermCounts::from_text(&text.normalized);
        Ok(Self {
            age_days: (reference_date - date).num_days(),
            review_id: source.review_id,
            user_id: source.user_id,
            business_id: source.business_id,
            business_category,
            stars: source.stars,
            votes: source.votes,
            text,
            terms,
        })
    }

    /// Text metrics of the review body.
    pub fn metrics(&self) -> &TextMetrics {
        &self.text.metrics
    }

    /// Normalized review body.
    pub fn normalized_text(&self) -> &str {
        &self.text.normalized
    }
}

/// Public profile of a user.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserProfile {
    /// Mean star rating over all of the user's reviews.
    pub average_stars: Stars,
    /// Reviews the user has written.
    pub review_count: u64,
    /// Profile vote totals; `None` when absent or censored.
    pub votes: Option<Votes>,
}

impl UserProfile {
    /// Drop vote totals to simulate a user without public vote data.
    pub fn censor_votes(&mut self) {
        self.votes = None;
    }
}

impl From<&UserSource> for UserProfile {
    fn from(source: &UserSource) -> Self {
        Self {
            average_stars: source.average_stars,
            review_count: source.review_count,
            votes: source.votes,
        }
    }
}

/// Public profile of a business.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BusinessProfile {
    /// Inverse of the source `open` flag.
    pub closed: bool,
    /// Mean star rating.
    pub stars: Stars,
    /// Reviews the business has received.
    pub review_count: u64,
    /// Category code from the category mapping.
    pub category: CategoryCode,
}

impl BusinessProfile {
    /// Build a profile from a source line and the business's category code.
    pub fn from_source(source: &BusinessSource, category: CategoryCode) -> Self {
        Self {
            closed: !source.open,
            stars: source.stars,
            review_count: source.review_count,
            category,
        }
    }
}
