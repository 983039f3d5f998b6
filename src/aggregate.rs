//! Per-user and per-business review grouping with profile attachment.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::data::{BusinessProfile, ReviewRecord, UserProfile};
use crate::hash::stable_hash_str;
use crate::types::{BusinessId, UserId};

/// Decides, once per user, whether public vote totals are nulled out.
///
/// Each user's draw comes from its own RNG seeded by `(seed, salt, user_id)`,
/// so the outcome does not depend on the order users are visited.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CensorPolicy {
    seed: u64,
    salt: u64,
    probability: f64,
}

impl CensorPolicy {
    /// Create a policy censoring with `probability` in `[0, 1]`.
    pub fn new(seed: u64, salt: u64, probability: f64) -> Self {
        Self {
            seed,
            salt,
            probability,
        }
    }

    /// A policy that never censors.
    pub fn disabled() -> Self {
        Self::new(0, 0, 0.0)
    }

    /// Uniform draw for `user_id` falls below the censoring probability.
    pub fn censors(&self, user_id: &str) -> bool {
        if self.probability <= 0.0 {
            return false;
        }
        let mut rng = StdRng::seed_from_u64(stable_hash_str(self.seed ^ self.salt, user_id));
        rng.random::<f64>() < self.probability
    }
}

/// A user's optional profile and every loaded review they wrote.
#[derive(Clone, Debug)]
pub struct UserAggregate {
    /// User identifier.
    pub user_id: UserId,
    /// `None` for a private user; votes may be censored.
    pub profile: Option<UserProfile>,
    /// Pool reviews by this user, in load order.
    pub reviews: Vec<Arc<ReviewRecord>>,
}

impl UserAggregate {
    /// Profile present (the user is public).
    pub fn is_public(&self) -> bool {
        self.profile.is_some()
    }

    /// Profile present and carrying vote totals.
    pub fn has_votes(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|profile| profile.votes.is_some())
    }

    /// The user's other reviews that carry vote data.
    pub fn samples_excluding<'a>(&'a self, review: &ReviewRecord) -> Vec<&'a ReviewRecord> {
        self.reviews
            .iter()
            .map(Arc::as_ref)
            .filter(|sample| sample.review_id != review.review_id && sample.votes.is_some())
            .collect()
    }
}

/// A business's optional profile and every loaded review of it.
#[derive(Clone, Debug)]
pub struct BusinessAggregate {
    /// Business identifier.
    pub business_id: BusinessId,
    /// `None` when no mapped profile was loaded.
    pub profile: Option<BusinessProfile>,
    /// Pool reviews of this business, in load order.
    pub reviews: Vec<Arc<ReviewRecord>>,
}

impl BusinessAggregate {
    /// The business's other reviews.
    pub fn samples_excluding<'a>(&'a self, review: &ReviewRecord) -> Vec<&'a ReviewRecord> {
        self.reviews
            .iter()
            .map(Arc::as_ref)
            .filter(|sample| sample.review_id != review.review_id)
            .collect()
    }
}

/// Aggregates for every user and business referenced by one review pool.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    users: HashMap<UserId, UserAggregate>,
    businesses: HashMap<BusinessId, BusinessAggregate>,
    censored_users: usize,
}

impl Corpus {
    /// Aggregate for `user_id`.
    pub fn user(&self, user_id: &str) -> Option<&UserAggregate> {
        self.users.get(user_id)
    }

    /// Aggregate for `business_id`.
    pub fn business(&self, business_id: &str) -> Option<&BusinessAggregate> {
        self.businesses.get(business_id)
    }

    /// Number of users aggregated.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of businesses aggregated.
    pub fn business_count(&self) -> usize {
        self.businesses.len()
    }

    /// Users whose profile vote totals were nulled out.
    pub fn censored_users(&self) -> usize {
        self.censored_users
    }
}

/// Groups reviews by user and business and attaches profiles.
pub struct CorpusAggregator<'a> {
    users: &'a HashMap<UserId, UserProfile>,
    businesses: &'a HashMap<BusinessId, BusinessProfile>,
    censor: CensorPolicy,
}

impl<'a> CorpusAggregator<'a> {
    /// Create an aggregator over merged profile maps.
    pub fn new(
        users: &'a HashMap<UserId, UserProfile>,
        businesses: &'a HashMap<BusinessId, BusinessProfile>,
        censor: CensorPolicy,
    ) -> Self {
        Self {
            users,
            businesses,
            censor,
        }
    }

    /// Build a [`Corpus`] from `reviews`.
    ///
    /// Only users and businesses that appear in `reviews` get an aggregate.
    pub fn aggregate<'r, I>(&self, reviews: I) -> Corpus
    where
        I: IntoIterator<Item = &'r Arc<ReviewRecord>>,
    {
        let mut corpus = Corpus::default();
        for review in reviews {
            corpus
                .users
                .entry(review.user_id.clone())
                .or_insert_with(|| UserAggregate {
                    user_id: review.user_id.clone(),
                    profile: self.users.get(&review.user_id).cloned(),
                    reviews: Vec::new(),
                })
                .reviews
                .push(Arc::clone(review));
            corpus
                .businesses
                .entry(review.business_id.clone())
                .or_insert_with(|| BusinessAggregate {
                    business_id: review.business_id.clone(),
                    profile: self.businesses.get(&review.business_id).cloned(),
                    reviews: Vec::new(),
                })
                .reviews
                .push(Arc::clone(review));
        }

        for user in corpus.users.values_mut() {
            let Some(profile) = user.profile.as_mut() else {
                continue;
            };
            if profile.votes.is_some() && self.censor.censors(&user.user_id) {
                profile.censor_votes();
                corpus.censored_users += 1;
            }
        }
        debug!(
            users = corpus.users.len(),
            businesses = corpus.businesses.len(),
            censored = corpus.censored_users,
            "[review-features:aggregate] corpus built"
        );
        corpus
    }
}
