use serde::Serialize;

use crate::data::{ReviewRecord, UserProfile, Votes};
use crate::metrics::ratio;
use crate::types::AgeDays;

/// Which vote-rate families are available for a user.
///
/// Exactly one branch applies to any `(has_votes, sample_count)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum VotePolicy {
    /// Profile votes and more than one voted sample: every rate is computed.
    ProfileAndSamples,
    /// Profile votes and at most one voted sample: profile rates only.
    ProfileOnly,
    /// No profile votes but at least one voted sample: sample rates only.
    SamplesOnly,
    /// Nothing to compute.
    Unavailable,
}

impl VotePolicy {
    /// Pick the branch for a user.
    pub fn select(has_votes: bool, sample_count: usize) -> Self {
        match (has_votes, sample_count) {
            (true, count) if count > 1 => VotePolicy::ProfileAndSamples,
            (true, _) => VotePolicy::ProfileOnly,
            (false, count) if count > 0 => VotePolicy::SamplesOnly,
            (false, _) => VotePolicy::Unavailable,
        }
    }

    fn uses_profile(self) -> bool {
        matches!(self, VotePolicy::ProfileAndSamples | VotePolicy::ProfileOnly)
    }

    fn uses_samples(self) -> bool {
        matches!(self, VotePolicy::ProfileAndSamples | VotePolicy::SamplesOnly)
    }
}

/// One rate per vote kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct VoteTriple {
    /// Funny votes.
    pub funny: f64,
    /// Useful votes.
    pub useful: f64,
    /// Cool votes.
    pub cool: f64,
}

impl VoteTriple {
    /// Vote totals divided by `denominator`; `None` when it is zero.
    pub fn per(votes: Votes, denominator: f64) -> Option<Self> {
        Some(Self {
            funny: ratio(votes.funny as f64, denominator)?,
            useful: ratio(votes.useful as f64, denominator)?,
            cool: ratio(votes.cool as f64, denominator)?,
        })
    }

    /// Mean votes across `samples`; samples without vote data count as zero.
    pub fn mean_of(samples: &[&ReviewRecord]) -> Option<Self> {
        let totals = samples
            .iter()
            .filter_map(|sample| sample.votes)
            .fold(Votes::default(), |acc, votes| Votes {
                funny: acc.funny + votes.funny,
                useful: acc.useful + votes.useful,
                cool: acc.cool + votes.cool,
            });
        Self::per(totals, samples.len() as f64)
    }

    /// Each rate divided by `days`; `None` when `days` is zero.
    pub fn per_day(self, days: AgeDays) -> Option<Self> {
        let days = days as f64;
        Some(Self {
            funny: ratio(self.funny, days)?,
            useful: ratio(self.useful, days)?,
            cool: ratio(self.cool, days)?,
        })
    }
}

/// Profile and sample vote rates, each independently present or absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct VoteRates {
    /// Profile totals per profile review.
    pub profile: Option<VoteTriple>,
    /// `profile` per day since the earliest sample.
    pub profile_per_day: Option<VoteTriple>,
    /// Mean votes per sample review.
    pub sample: Option<VoteTriple>,
    /// `sample` per day since the earliest sample.
    pub sample_per_day: Option<VoteTriple>,
}

impl VoteRates {
    /// Compute the rates `policy` allows.
    ///
    /// Per-day rates additionally need the earliest sample age and exist
    /// only under [`VotePolicy::ProfileAndSamples`] and [`VotePolicy::SamplesOnly`].
    pub fn compute(
        policy: VotePolicy,
        profile: Option<&UserProfile>,
        samples: &[&ReviewRecord],
        earliest_sample_age: Option<AgeDays>,
    ) -> Self {
        let per_day = |rate: Option<VoteTriple>| rate?.per_day(earliest_sample_age?);
        let mut rates = VoteRates::default();
        if policy.uses_profile() {
            rates.profile = profile.and_then(|profile| {
                VoteTriple::per(profile.votes?, profile.review_count as f64)
            });
        }
        if policy.uses_samples() {
            rates.sample = VoteTriple::mean_of(samples);
            rates.sample_per_day = per_day(rates.sample);
        }
        if policy == VotePolicy::ProfileAndSamples {
            rates.profile_per_day = per_day(rates.profile);
        }
        rates
    }
}
