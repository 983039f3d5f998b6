//! Per-review feature derivation.
//!
//! [`FeatureVectorBuilder`] combines one review with its user's and business's
//! aggregates. Every field that can be undefined is an `Option` and is written
//! as the not-available marker; the branch conditions that produce `None` are
//! part of the output contract and must not drift.

use serde::Serialize;

use crate::aggregate::{BusinessAggregate, Corpus, UserAggregate};
use crate::constants::features::{
    MANY_BUSINESS_REVIEWS, MANY_SAMPLE_REVIEWS, MISSING_TARGET, MODERATE_STARS,
};
use crate::data::ReviewRecord;
use crate::errors::FeatureError;
use crate::lexicon::Lexicon;
use crate::metrics::{RatingStats, ratio};
use crate::output::Cell;
use crate::similarity::{SimilarityScorer, TermCounts};
use crate::text_metrics::{TextMetrics, TextTotals};
use crate::types::{AgeDays, BusinessId, CategoryCode, ReviewId, Stars, UserId};

mod votes;

pub use votes::{VotePolicy, VoteRates, VoteTriple};

/// Output column names in emission order.
pub const FEATURE_HEADER: [&str; 63] = [
    "logUsefulVotes",
    "userId",
    "businessId",
    "userIsPublic",
    "userHasVotes",
    "userHasManySampleReviews",
    "businessHasProfile",
    "businessHasManyReviews",
    "businessHasManySampleReviews",
    "numUserReviews",
    "numUserSampleReviews",
    "numBusinessReviews",
    "numBusinessSampleReviews",
    "numUserSampleReviewsInCategory",
    "reviewIsModerate",
    "reviewStars",
    "userStarsSd",
    "reviewVsUserAvg",
    "reviewVsUserAvgNormalized",
    "businessStarsSd",
    "reviewVsBusinessAvg",
    "reviewVsBusinessAvgNormalized",
    "reviewAge",
    "reviewCharacters",
    "reviewWords",
    "reviewSentences",
    "reviewWordsPerSentence",
    "reviewPunctuationPerSentence",
    "reviewContainsClosed",
    "reviewAdjectivesAndAdverbs",
    "reviewVerbs",
    "reviewNouns",
    "reviewAdjectivesAndAdverbsPerWord",
    "reviewVerbsPerWord",
    "reviewNounsPerWord",
    "reviewARI",
    "reviewFK",
    "reviewSMOG",
    "earliestReview",
    "funnyProfileVotesPerReview",
    "usefulProfileVotesPerReview",
    "coolProfileVotesPerReview",
    "funnyProfileVotesPerReviewPerDay",
    "usefulProfileVotesPerReviewPerDay",
    "coolProfileVotesPerReviewPerDay",
    "funnyVotesPerReview",
    "usefulVotesPerReview",
    "coolVotesPerReview",
    "funnyVotesPerReviewPerDay",
    "usefulVotesPerReviewPerDay",
    "coolVotesPerReviewPerDay",
    "userCharactersPerReview",
    "userARI",
    "userFK",
    "userSMOG",
    "businessClosed",
    "earliestBusinessReview",
    "businessCharactersPerReview",
    "businessARI",
    "businessFK",
    "businessSMOG",
    "similarityToOtherReviews",
    "category",
];

/// Profile and sample availability indicators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// The user has a profile.
    pub user_is_public: bool,
    /// The profile carries uncensored vote totals.
    pub user_has_votes: bool,
    /// At least five voted user samples.
    pub user_has_many_sample_reviews: bool,
    /// The business has a profile.
    pub business_has_profile: bool,
    /// Profile `review_count` of at least five.
    pub business_has_many_reviews: bool,
    /// At least five business samples.
    pub business_has_many_sample_reviews: bool,
}

/// Profile-reported totals and observed sample sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReviewCounts {
    /// Profile `review_count`; `None` without a profile.
    pub num_user_reviews: Option<u64>,
    /// Other voted reviews by the user.
    pub num_user_sample_reviews: usize,
    /// Profile `review_count`; `None` without a profile.
    pub num_business_reviews: Option<u64>,
    /// Other reviews of the business.
    pub num_business_sample_reviews: usize,
    /// User samples whose business shares this review's category.
    pub num_user_sample_reviews_in_category: usize,
}

/// Star-rating comparisons against the user's and business's samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RatingFeatures {
    /// Exactly three stars.
    pub review_is_moderate: bool,
    /// The review's own rating.
    pub review_stars: Stars,
    /// Population standard deviation of user sample stars.
    pub user_stars_sd: Option<f64>,
    /// Stars minus the profile mean, else the sample mean.
    pub review_vs_user_avg: Option<f64>,
    /// `review_vs_user_avg / user_stars_sd` for a positive spread.
    pub review_vs_user_avg_normalized: Option<f64>,
    /// Population standard deviation of business sample stars.
    pub business_stars_sd: Option<f64>,
    /// Stars minus the profile mean, else the sample mean.
    pub review_vs_business_avg: Option<f64>,
    /// `review_vs_business_avg / business_stars_sd` for a positive spread.
    pub review_vs_business_avg_normalized: Option<f64>,
}

impl RatingFeatures {
    fn compute(
        review: &ReviewRecord,
        user: &UserAggregate,
        user_samples: &[&ReviewRecord],
        business: &BusinessAggregate,
        business_samples: &[&ReviewRecord],
    ) -> Self {
        let user_stats = RatingStats::from_stars(&stars_of(user_samples));
        let business_stats = RatingStats::from_stars(&stars_of(business_samples));
        let user_mean = user
            .profile
            .as_ref()
            .map(|profile| profile.average_stars)
            .or(user_stats.mean);
        let business_mean = business
            .profile
            .as_ref()
            .map(|profile| profile.stars)
            .or(business_stats.mean);
        let review_vs_user_avg = user_mean.map(|mean| review.stars - mean);
        let review_vs_business_avg = business_mean.map(|mean| review.stars - mean);
        Self {
            review_is_moderate: review.stars == MODERATE_STARS,
            review_stars: review.stars,
            user_stars_sd: user_stats.std_dev,
            review_vs_user_avg,
            review_vs_user_avg_normalized: user_stats.normalize(review_vs_user_avg),
            business_stars_sd: business_stats.std_dev,
            review_vs_business_avg,
            review_vs_business_avg_normalized: business_stats.normalize(review_vs_business_avg),
        }
    }
}

/// Metrics of the review's own text plus density ratios.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ReviewTextFeatures {
    /// Characters excluding punctuation and spaces.
    pub characters: usize,
    /// Whitespace tokens.
    pub words: usize,
    /// Sentence count.
    pub sentences: usize,
    /// Zero when there are no sentences.
    pub words_per_sentence: f64,
    /// Zero when there are no sentences.
    pub punctuation_per_sentence: f64,
    /// Text mentions `closed`.
    pub contains_closed: bool,
    /// Adjective and adverb tokens.
    pub adjectives_and_adverbs: usize,
    /// Verb tokens.
    pub verbs: usize,
    /// Noun tokens.
    pub nouns: usize,
    /// Zero when there are no words.
    pub adjectives_and_adverbs_per_word: f64,
    /// Zero when there are no words.
    pub verbs_per_word: f64,
    /// Zero when there are no words.
    pub nouns_per_word: f64,
    /// Automated Readability Index of the review.
    pub ari: f64,
    /// Flesch-Kincaid grade of the review.
    pub flesch_kincaid: f64,
    /// SMOG grade of the review.
    pub smog: f64,
}

impl From<&TextMetrics> for ReviewTextFeatures {
    fn from(metrics: &TextMetrics) -> Self {
        let per_sentence = |count: usize| {
            ratio(count as f64, metrics.sentence_count as f64).unwrap_or_default()
        };
        let per_word =
            |count: usize| ratio(count as f64, metrics.word_count as f64).unwrap_or_default();
        Self {
            characters: metrics.character_count,
            words: metrics.word_count,
            sentences: metrics.sentence_count,
            words_per_sentence: per_sentence(metrics.word_count),
            punctuation_per_sentence: per_sentence(metrics.punctuation_count),
            contains_closed: metrics.contains_closed_marker,
            adjectives_and_adverbs: metrics.adjective_adverb_count,
            verbs: metrics.verb_count,
            nouns: metrics.noun_count,
            adjectives_and_adverbs_per_word: per_word(metrics.adjective_adverb_count),
            verbs_per_word: per_word(metrics.verb_count),
            nouns_per_word: per_word(metrics.noun_count),
            ari: metrics.ari,
            flesch_kincaid: metrics.flesch_kincaid,
            smog: metrics.smog,
        }
    }
}

/// Pooled text statistics over a sample set; all zero for an empty set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct AggregateText {
    /// Summed characters over the sample count.
    pub characters_per_review: f64,
    /// Pooled ARI; zero when pooled words or sentences are zero.
    pub ari: f64,
    /// Pooled Flesch-Kincaid grade.
    pub flesch_kincaid: f64,
    /// Pooled SMOG grade.
    pub smog: f64,
}

impl AggregateText {
    /// Pool the text counts of `samples` and score them as one document.
    pub fn from_samples(samples: &[&ReviewRecord]) -> Self {
        let totals: TextTotals = samples.iter().map(|sample| sample.metrics()).collect();
        let Some(characters_per_review) = totals.characters_per_document() else {
            return Self::default();
        };
        let readability = totals.readability().unwrap_or_default();
        Self {
            characters_per_review,
            ari: readability.ari,
            flesch_kincaid: readability.flesch_kincaid,
            smog: readability.smog,
        }
    }
}

/// One output row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Review the row describes.
    pub review_id: ReviewId,
    /// `ln(useful + 1)`, or `-1` when the review has no vote data.
    pub log_useful_votes: f64,
    /// Author.
    pub user_id: UserId,
    /// Reviewed business.
    pub business_id: BusinessId,
    /// Profile and sample indicators.
    pub availability: Availability,
    /// Profile totals and sample sizes.
    pub counts: ReviewCounts,
    /// Star-rating comparisons.
    pub ratings: RatingFeatures,
    /// Days before the split's reference date.
    pub review_age: AgeDays,
    /// Metrics of the review's own text.
    pub text: ReviewTextFeatures,
    /// Minimum age among user samples.
    pub earliest_review: Option<AgeDays>,
    /// Which vote source feeds `votes`.
    pub vote_policy: VotePolicy,
    /// Per-review and per-day vote rates.
    pub votes: VoteRates,
    /// Pooled text of the user samples.
    pub user_text: AggregateText,
    /// The business profile is marked closed.
    pub business_closed: bool,
    /// Minimum age among business samples.
    pub earliest_business_review: Option<AgeDays>,
    /// Pooled text of the business samples.
    pub business_text: AggregateText,
    /// TF-IDF similarity to the business samples.
    pub similarity_to_other_reviews: f64,
    /// Category code of the business.
    pub category: CategoryCode,
}

impl FeatureVector {
    /// Values in [`FEATURE_HEADER`] order.
    pub fn cells(&self) -> Vec<Cell<'_>> {
        let triple = |rate: Option<VoteTriple>| {
            [
                Cell::float(rate.map(|rate| rate.funny)),
                Cell::float(rate.map(|rate| rate.useful)),
                Cell::float(rate.map(|rate| rate.cool)),
            ]
        };
        let aggregate = |text: &AggregateText| {
            [
                Cell::Float(text.characters_per_review),
                Cell::Float(text.ari),
                Cell::Float(text.flesch_kincaid),
                Cell::Float(text.smog),
            ]
        };
        let availability = &self.availability;
        let counts = &self.counts;
        let ratings = &self.ratings;
        let text = &self.text;

        let mut cells = vec![
            Cell::Float(self.log_useful_votes),
            Cell::Id(&self.user_id),
            Cell::Id(&self.business_id),
            Cell::flag(availability.user_is_public),
            Cell::flag(availability.user_has_votes),
            Cell::flag(availability.user_has_many_sample_reviews),
            Cell::flag(availability.business_has_profile),
            Cell::flag(availability.business_has_many_reviews),
            Cell::flag(availability.business_has_many_sample_reviews),
            Cell::int(counts.num_user_reviews.map(saturating_i64)),
            Cell::Int(saturating_i64(counts.num_user_sample_reviews as u64)),
            Cell::int(counts.num_business_reviews.map(saturating_i64)),
            Cell::Int(saturating_i64(counts.num_business_sample_reviews as u64)),
            Cell::Int(saturating_i64(counts.num_user_sample_reviews_in_category as u64)),
            Cell::flag(ratings.review_is_moderate),
            Cell::Float(ratings.review_stars),
            Cell::float(ratings.user_stars_sd),
            Cell::float(ratings.review_vs_user_avg),
            Cell::float(ratings.review_vs_user_avg_normalized),
            Cell::float(ratings.business_stars_sd),
            Cell::float(ratings.review_vs_business_avg),
            Cell::float(ratings.review_vs_business_avg_normalized),
            Cell::Int(self.review_age),
            Cell::Int(saturating_i64(text.characters as u64)),
            Cell::Int(saturating_i64(text.words as u64)),
            Cell::Int(saturating_i64(text.sentences as u64)),
            Cell::Float(text.words_per_sentence),
            Cell::Float(text.punctuation_per_sentence),
            Cell::flag(text.contains_closed),
            Cell::Int(saturating_i64(text.adjectives_and_adverbs as u64)),
            Cell::Int(saturating_i64(text.verbs as u64)),
            Cell::Int(saturating_i64(text.nouns as u64)),
            Cell::Float(text.adjectives_and_adverbs_per_word),
            Cell::Float(text.verbs_per_word),
            Cell::Float(text.nouns_per_word),
            Cell::Float(text.ari),
            Cell::Float(text.flesch_kincaid),
            Cell::Float(text.smog),
            Cell::int(self.earliest_review),
        ];
        cells.extend(triple(self.votes.profile));
        cells.extend(triple(self.votes.profile_per_day));
        cells.extend(triple(self.votes.sample));
        cells.extend(triple(self.votes.sample_per_day));
        cells.extend(aggregate(&self.user_text));
        cells.push(Cell::flag(self.business_closed));
        cells.push(Cell::int(self.earliest_business_review));
        cells.extend(aggregate(&self.business_text));
        cells.push(Cell::Float(self.similarity_to_other_reviews));
        cells.push(Cell::Int(i64::from(self.category)));
        cells
    }
}

/// Builds [`FeatureVector`]s from reviews and their aggregates.
#[derive(Clone, Copy)]
pub struct FeatureVectorBuilder<'a> {
    similarity: SimilarityScorer<'a>,
}

impl<'a> FeatureVectorBuilder<'a> {
    /// Create a builder using the lexicon's stop words for similarity.
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self {
            similarity: SimilarityScorer::new(lexicon.stop_words()),
        }
    }

    /// Look up the review's aggregates in `corpus` and build its features.
    pub fn build_from_corpus(
        &self,
        review: &ReviewRecord,
        corpus: &Corpus,
    ) -> Result<FeatureVector, FeatureError> {
        let missing = || FeatureError::MissingAggregate {
            review_id: review.review_id.clone(),
        };
        let user = corpus.user(&review.user_id).ok_or_else(missing)?;
        let business = corpus.business(&review.business_id).ok_or_else(missing)?;
        Ok(self.build(review, user, business))
    }

    /// Build the feature row for `review`.
    ///
    /// `review` itself is never part of either sample set, even when it is
    /// listed in the aggregates.
    pub fn build(
        &self,
        review: &ReviewRecord,
        user: &UserAggregate,
        business: &BusinessAggregate,
    ) -> FeatureVector {
        let user_samples = user.samples_excluding(review);
        let business_samples = business.samples_excluding(review);

        let availability = Availability {
            user_is_public: user.is_public(),
            user_has_votes: user.has_votes(),
            user_has_many_sample_reviews: user_samples.len() >= MANY_SAMPLE_REVIEWS,
            business_has_profile: business.profile.is_some(),
            business_has_many_reviews: business
                .profile
                .as_ref()
                .is_some_and(|profile| profile.review_count >= MANY_BUSINESS_REVIEWS),
            business_has_many_sample_reviews: business_samples.len() >= MANY_SAMPLE_REVIEWS,
        };
        let counts = ReviewCounts {
            num_user_reviews: user.profile.as_ref().map(|profile| profile.review_count),
            num_user_sample_reviews: user_samples.len(),
            num_business_reviews: business.profile.as_ref().map(|profile| profile.review_count),
            num_business_sample_reviews: business_samples.len(),
            num_user_sample_reviews_in_category: user_samples
                .iter()
                .filter(|sample| sample.business_category == review.business_category)
                .count(),
        };

        let earliest_review = earliest_age(&user_samples);
        let vote_policy = VotePolicy::select(availability.user_has_votes, user_samples.len());
        let votes = VoteRates::compute(
            vote_policy,
            user.profile.as_ref(),
            &user_samples,
            earliest_review,
        );

        let similarity_to_other_reviews = if business_samples.is_empty() {
            0.0
        } else {
            let others: Vec<&TermCounts> =
                business_samples.iter().map(|sample| &sample.terms).collect();
            self.similarity.score(&review.terms, &others)
        };

        FeatureVector {
            review_id: review.review_id.clone(),
            log_useful_votes: review
                .votes
                .map_or(MISSING_TARGET, |votes| (votes.useful as f64 + 1.0).ln()),
            user_id: review.user_id.clone(),
            business_id: review.business_id.clone(),
            availability,
            counts,
            ratings: RatingFeatures::compute(
                review,
                user,
                &user_samples,
                business,
                &business_samples,
            ),
            review_age: review.age_days,
            text: ReviewTextFeatures::from(review.metrics()),
            earliest_review,
            vote_policy,
            votes,
            user_text: AggregateText::from_samples(&user_samples),
            business_closed: business
                .profile
                .as_ref()
                .is_some_and(|profile| profile.closed),
            earliest_business_review: earliest_age(&business_samples),
            business_text: AggregateText::from_samples(&business_samples),
            similarity_to_other_reviews,
            category: review.business_category,
        }
    }
}

fn stars_of(samples: &[&ReviewRecord]) -> Vec<f64> {
    samples.iter().map(|sample| sample.stars).collect()
}

fn earliest_age(samples: &[&ReviewRecord]) -> Option<AgeDays> {
    samples.iter().map(|sample| sample.age_days).min()
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{CensorPolicy, CorpusAggregator};
    use crate::data::{BusinessProfile, UserProfile, Votes};
    use crate::text_metrics::{AnalyzedText, TextMetricsAnalyzer};
    use std::collections::HashMap;
    use std::sync::Arc;

    struct Fixture {
        lexicon: Lexicon,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                lexicon: Lexicon::builtin(),
            }
        }

        fn review(
            &self,
            review_id: &str,
            user_id: &str,
            business_id: &str,
            category: CategoryCode,
            stars: Stars,
            age_days: AgeDays,
            useful: Option<u64>,
            text: &str,
        ) -> Arc<ReviewRecord> {
            let analyzer = TextMetricsAnalyzer::new(&self.lexicon);
            let text = analyzer.analyze(text);
            Arc::new(ReviewRecord {
                review_id: review_id.into(),
                user_id: user_id.into(),
                business_id: business_id.into(),
                business_category: category,
                stars,
                age_days,
                votes: useful.map(|useful| Votes {
                    funny: 0,
                    useful,
                    cool: 1,
                }),
                terms: TermCounts::from_text(&text.normalized),
                text,
            })
        }
    }

    fn with_metrics(review_id: &str, useful: Option<u64>, metrics: TextMetrics) -> Arc<ReviewRecord> {
        Arc::new(ReviewRecord {
            review_id: review_id.into(),
            user_id: "u1".into(),
            business_id: "b1".into(),
            business_category: 1,
            stars: 4.0,
            age_days: 10,
            votes: useful.map(|useful| Votes {
                funny: 0,
                useful,
                cool: 0,
            }),
            text: AnalyzedText {
                normalized: String::new(),
                metrics,
            },
            terms: TermCounts::default(),
        })
    }

    fn corpus(
        reviews: &[Arc<ReviewRecord>],
        users: &HashMap<UserId, UserProfile>,
        businesses: &HashMap<BusinessId, BusinessProfile>,
    ) -> Corpus {
        CorpusAggregator::new(users, businesses, CensorPolicy::disabled()).aggregate(reviews)
    }

    #[test]
    fn header_and_cells_line_up() {
        let fixture = Fixture::new();
        let reviews = vec![fixture.review("r1", "u1", "b1", 2, 4.0, 3, Some(1), "ok.")];
        let corpus = corpus(&reviews, &HashMap::new(), &HashMap::new());
        let features = FeatureVectorBuilder::new(&fixture.lexicon)
            .build_from_corpus(&reviews[0], &corpus)
            .expect("features");
        assert_eq!(features.cells().len(), FEATURE_HEADER.len());
        assert_eq!(FEATURE_HEADER.len(), 63);
    }

    #[test]
    fn lone_review_by_private_user() {
        let fixture = Fixture::new();
        let reviews = vec![fixture.review(
            "r1",
            "u1",
            "b1",
            2,
            4.0,
            7,
            None,
            "Great food! Service was SLOW.  Would go again.",
        )];
        let corpus = corpus(&reviews, &HashMap::new(), &HashMap::new());
        let features = FeatureVectorBuilder::new(&fixture.lexicon)
            .build_from_corpus(&reviews[0], &corpus)
            .expect("features");

        assert_eq!(features.text.sentences, 3);
        assert!(!features.availability.user_is_public);
        assert_eq!(features.counts.num_user_sample_reviews, 0);
        assert_eq!(features.counts.num_user_reviews, None);
        assert_eq!(features.earliest_review, None);
        assert_eq!(features.vote_policy, VotePolicy::Unavailable);
        assert_eq!(features.votes, VoteRates::default());
        assert_eq!(features.log_useful_votes, MISSING_TARGET);
        assert_eq!(features.similarity_to_other_reviews, 0.0);
        assert_eq!(features.user_text, AggregateText::default());
        assert_eq!(features.ratings.review_vs_user_avg, None);
        assert_eq!(features.earliest_business_review, None);

        let cells = features.cells();
        let column = |name: &str| {
            let idx = FEATURE_HEADER
                .iter()
                .position(|header| *header == name)
                .expect("column");
            cells[idx].to_string()
        };
        assert_eq!(column("userIsPublic"), "0");
        assert_eq!(column("earliestReview"), "NA");
        assert_eq!(column("usefulVotesPerReviewPerDay"), "NA");
        assert_eq!(column("logUsefulVotes"), "-1.0");
        assert_eq!(column("category"), "2");
    }

    #[test]
    fn samples_never_include_the_review_itself() {
        let fixture = Fixture::new();
        let reviews = vec![
            fixture.review("r1", "u1", "b1", 1, 5.0, 10, Some(3), "Loved the tacos."),
            fixture.review("r2", "u1", "b2", 1, 3.0, 20, Some(1), "Fine burritos."),
            fixture.review("r3", "u2", "b1", 2, 1.0, 30, Some(0), "Cold tacos."),
            fixture.review("r4", "u3", "b1", 2, 4.0, 40, Some(2), "Great pizza."),
        ];
        let corpus = corpus(&reviews, &HashMap::new(), &HashMap::new());
        let builder = FeatureVectorBuilder::new(&fixture.lexicon);
        for review in &reviews {
            let user = corpus.user(&review.user_id).expect("user");
            let business = corpus.business(&review.business_id).expect("business");
            assert!(user
                .samples_excluding(review)
                .iter()
                .all(|sample| sample.review_id != review.review_id));
            assert!(business
                .samples_excluding(review)
                .iter()
                .all(|sample| sample.review_id != review.review_id));
            let features = builder.build(review, user, business);
            assert_eq!(features.review_id, review.review_id);
        }
        let features = builder.build_from_corpus(&reviews[0], &corpus).expect("features");
        assert_eq!(features.counts.num_user_sample_reviews, 1);
        assert_eq!(features.counts.num_business_sample_reviews, 2);
        assert_eq!(features.counts.num_user_sample_reviews_in_category, 1);
        assert_eq!(features.earliest_review, Some(20));
        assert_eq!(features.earliest_business_review, Some(30));
        assert_eq!(features.vote_policy, VotePolicy::SamplesOnly);
        assert_eq!(features.ratings.review_vs_user_avg, Some(2.0));
        assert_eq!(features.ratings.user_stars_sd, None);
        assert!(features.similarity_to_other_reviews > 0.0);
    }

    #[test]
    fn profile_means_take_precedence_over_samples() {
        let fixture = Fixture::new();
        let reviews = vec![
            fixture.review("r1", "u1", "b1", 1, 4.0, 10, Some(3), "Nice."),
            fixture.review("r2", "u1", "b1", 1, 2.0, 20, Some(1), "Meh."),
            fixture.review("r3", "u1", "b1", 1, 4.0, 30, Some(0), "Good."),
        ];
        let users = HashMap::from([(
            "u1".to_string(),
            UserProfile {
                average_stars: 3.5,
                review_count: 40,
                votes: Some(Votes {
                    funny: 4,
                    useful: 20,
                    cool: 8,
                }),
            },
        )]);
        let businesses = HashMap::from([(
            "b1".to_string(),
            BusinessProfile {
                closed: true,
                stars: 4.5,
                review_count: 15,
                category: 1,
            },
        )]);
        let corpus = corpus(&reviews, &users, &businesses);
        let features = FeatureVectorBuilder::new(&fixture.lexicon)
            .build_from_corpus(&reviews[0], &corpus)
            .expect("features");
        assert!(features.availability.user_has_votes);
        assert!(features.availability.business_has_many_reviews);
        assert!(features.business_closed);
        assert_eq!(features.counts.num_user_reviews, Some(40));
        assert_eq!(features.ratings.review_vs_user_avg, Some(0.5));
        assert_eq!(features.ratings.review_vs_business_avg, Some(-0.5));
        // samples [2.0, 4.0]: population sd 1.0
        assert_eq!(features.ratings.user_stars_sd, Some(1.0));
        assert_eq!(features.ratings.review_vs_user_avg_normalized, Some(0.5));
        assert_eq!(features.vote_policy, VotePolicy::ProfileAndSamples);
        assert_eq!(features.votes.profile.expect("profile").useful, 0.5);
        assert_eq!(features.votes.sample.expect("sample").useful, 0.5);
        assert_eq!(features.votes.sample_per_day.expect("per day").useful, 0.025);
    }

    #[test]
    fn density_ratios_fall_back_to_zero() {
        let empty = ReviewTextFeatures::from(&TextMetrics::default());
        assert_eq!(empty.words_per_sentence, 0.0);
        assert_eq!(empty.nouns_per_word, 0.0);
    }

    #[test]
    fn missing_aggregate_is_reported() {
        let fixture = Fixture::new();
        let review = fixture.review("r1", "u1", "b1", 1, 4.0, 10, None, "Hi.");
        let err = FeatureVectorBuilder::new(&fixture.lexicon)
            .build_from_corpus(&review, &Corpus::default())
            .unwrap_err();
        assert!(matches!(err, FeatureError::MissingAggregate { .. }));
    }

    #[test]
    fn many_sample_flags_switch_on_at_five() {
        let fixture = Fixture::new();
        let builder = FeatureVectorBuilder::new(&fixture.lexicon);
        for (others, many) in [(4, false), (5, true)] {
            let mut reviews = vec![fixture.review("r0", "u1", "b1", 1, 4.0, 5, Some(1), "Tacos.")];
            for idx in 1..=others {
                reviews.push(fixture.review(
                    &format!("r{idx}"),
                    "u1",
                    "b1",
                    1,
                    4.0,
                    10 + idx,
                    Some(1),
                    "More tacos.",
                ));
            }
            let corpus = corpus(&reviews, &HashMap::new(), &HashMap::new());
            let features = builder.build_from_corpus(&reviews[0], &corpus).expect("features");
            assert_eq!(features.counts.num_user_sample_reviews, others as usize);
            assert_eq!(features.counts.num_business_sample_reviews, others as usize);
            assert_eq!(features.availability.user_has_many_sample_reviews, many);
            assert_eq!(features.availability.business_has_many_sample_reviews, many);
        }
    }

    #[test]
    fn unvoted_reviews_count_for_the_business_only() {
        let fixture = Fixture::new();
        let mut reviews = vec![fixture.review("r0", "u1", "b1", 1, 4.0, 5, Some(1), "Tacos.")];
        for idx in 1..=5 {
            let useful = (idx != 5).then_some(1);
            reviews.push(fixture.review(&format!("r{idx}"), "u1", "b1", 1, 4.0, 10, useful, "Tacos."));
        }
        let corpus = corpus(&reviews, &HashMap::new(), &HashMap::new());
        let features = FeatureVectorBuilder::new(&fixture.lexicon)
            .build_from_corpus(&reviews[0], &corpus)
            .expect("features");
        assert_eq!(features.counts.num_user_sample_reviews, 4);
        assert!(!features.availability.user_has_many_sample_reviews);
        assert_eq!(features.counts.num_business_sample_reviews, 5);
        assert!(features.availability.business_has_many_sample_reviews);
    }

    #[test]
    fn business_samples_stand_in_for_a_missing_profile() {
        let fixture = Fixture::new();
        let reviews = vec![
            fixture.review("r1", "u1", "b1", 3, 3.0, 10, Some(2), "Okay, fine; decent! Will return."),
            fixture.review("r2", "u2", "b1", 3, 4.0, 20, Some(0), "Good."),
            fixture.review("r3", "u3", "b1", 3, 5.0, 30, Some(1), "Great."),
        ];
        let corpus = corpus(&reviews, &HashMap::new(), &HashMap::new());
        let builder = FeatureVectorBuilder::new(&fixture.lexicon);
        let features = builder.build_from_corpus(&reviews[0], &corpus).expect("features");

        assert!(features.ratings.review_is_moderate);
        assert!(!features.availability.business_has_profile);
        assert!(!features.availability.business_has_many_reviews);
        assert_eq!(features.counts.num_business_reviews, None);
        // samples [4.0, 5.0]: mean 4.5, population sd 0.5
        assert_eq!(features.ratings.business_stars_sd, Some(0.5));
        assert_eq!(features.ratings.review_vs_business_avg, Some(-1.5));
        assert_eq!(features.ratings.review_vs_business_avg_normalized, Some(-3.0));

        // 4 punctuation characters over 2 sentences
        assert_eq!(features.text.sentences, 2);
        assert_eq!(features.text.punctuation_per_sentence, 2.0);

        let other = builder.build_from_corpus(&reviews[1], &corpus).expect("features");
        assert!(!other.ratings.review_is_moderate);
    }

    #[test]
    fn pooled_readability_scores_summed_counts() {
        let first = TextMetrics {
            character_count: 40,
            word_count: 10,
            sentence_count: 2,
            syllable_count: 14,
            polysyllable_count: 1,
            ..TextMetrics::default()
        };
        let second = TextMetrics {
            character_count: 60,
            word_count: 10,
            sentence_count: 1,
            syllable_count: 11,
            polysyllable_count: 2,
            ..TextMetrics::default()
        };
        let reviews = vec![
            with_metrics("r0", Some(1), TextMetrics::default()),
            with_metrics("r1", Some(1), first),
            with_metrics("r2", Some(1), second),
        ];
        let corpus = corpus(&reviews, &HashMap::new(), &HashMap::new());
        let lexicon = Lexicon::builtin();
        let features = FeatureVectorBuilder::new(&lexicon)
            .build_from_corpus(&reviews[0], &corpus)
            .expect("features");

        // pooled: 100 characters, 20 words, 3 sentences, 25 syllables, 3 polysyllables
        let ari = 4.71 * (100.0 / 20.0) + 0.5 * (20.0 / 3.0) - 21.43;
        let flesch_kincaid = 0.39 * (20.0 / 3.0) + 11.8 * (25.0 / 20.0) - 15.59;
        let smog = 1.0430 * (3.0f64 * (30.0 / 3.0)).sqrt() + 3.1291;
        for pooled in [features.user_text, features.business_text] {
            assert_eq!(pooled.characters_per_review, 50.0);
            assert!((pooled.ari - ari).abs() < 1e-9);
            assert!((pooled.flesch_kincaid - flesch_kincaid).abs() < 1e-9);
            assert!((pooled.smog - smog).abs() < 1e-9);
        }
    }

    #[test]
    fn pooled_readability_needs_words_and_sentences() {
        let no_sentences = with_metrics(
            "r1",
            Some(1),
            TextMetrics {
                character_count: 30,
                word_count: 3,
                ..TextMetrics::default()
            },
        );
        let no_words = with_metrics(
            "r2",
            Some(1),
            TextMetrics {
                character_count: 10,
                sentence_count: 1,
                ..TextMetrics::default()
            },
        );
        let empty = with_metrics(
            "r3",
            Some(1),
            TextMetrics {
                character_count: 10,
                ..TextMetrics::default()
            },
        );

        let pooled = AggregateText::from_samples(&[no_sentences.as_ref()]);
        assert_eq!(pooled.characters_per_review, 30.0);
        assert_eq!((pooled.ari, pooled.flesch_kincaid, pooled.smog), (0.0, 0.0, 0.0));

        let pooled = AggregateText::from_samples(&[no_words.as_ref(), empty.as_ref()]);
        assert_eq!(pooled.characters_per_review, 10.0);
        assert_eq!((pooled.ari, pooled.flesch_kincaid, pooled.smog), (0.0, 0.0, 0.0));

        assert_eq!(AggregateText::from_samples(&[]), AggregateText::default());
    }
}
