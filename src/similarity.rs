//! TF-IDF similarity of one review against the other reviews of its business.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

use crate::lexicon::StopWords;
use crate::utils::terms;

/// Whitespace-term frequencies of one normalized document.
///
/// Terms keep first-seen order. Built once per review at load time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TermCounts {
    counts: IndexMap<String, usize>,
}

impl TermCounts {
    /// Count the whitespace terms of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut counts = IndexMap::new();
        for term in terms(text) {
            *counts.entry(term.to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Occurrences of `term`, `None` when absent.
    pub fn get(&self, term: &str) -> Option<usize> {
        self.counts.get(term).copied()
    }

    /// Terms with their counts, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(term, count)| (term.as_str(), *count))
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True for a document without terms.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Scores a target document against a pool of comparison documents.
///
/// The term vocabulary comes from the target only; comparison documents
/// contribute frequencies and document counts for those terms.
#[derive(Clone, Copy)]
pub struct SimilarityScorer<'a> {
    stop_words: &'a StopWords,
}

impl<'a> SimilarityScorer<'a> {
    /// Create a scorer that drops `stop_words` from the vocabulary.
    pub fn new(stop_words: &'a StopWords) -> Self {
        Self { stop_words }
    }

    /// Distinct non-stop-word terms of `target`, most frequent first.
    ///
    /// Ties keep first-seen order.
    pub fn vocabulary<'t>(&self, target: &'t TermCounts) -> Vec<&'t str> {
        let mut ranked: Vec<(&str, usize)> = target
            .iter()
            .filter(|(term, _)| !self.stop_words.contains(term))
            .collect();
        ranked.sort_by(|left, right| right.1.cmp(&left.1));
        ranked.into_iter().map(|(term, _)| term).collect()
    }

    /// Mean per-document TF-IDF of the target vocabulary across `others`.
    ///
    /// Zero when the vocabulary or the comparison pool is empty.
    pub fn score(&self, target: &TermCounts, others: &[&TermCounts]) -> f64 {
        let vocabulary = self.vocabulary(target);
        if vocabulary.is_empty() || others.is_empty() {
            return 0.0;
        }
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for doc in others {
            for term in &vocabulary {
                if doc.get(term).is_some() {
                    *document_frequency.entry(*term).or_default() += 1;
                }
            }
        }

        let total = others.len() as f64;
        let per_document: f64 = others
            .iter()
            .map(|doc| {
                let weights: f64 = vocabulary
                    .iter()
                    .map(|term| match (doc.get(term), document_frequency.get(term)) {
                        (Some(freq), Some(&df)) if df > 0 => {
                            (1.0 + freq as f64).ln() * (total / df as f64).ln()
                        }
                        _ => 0.0,
                    })
                    .sum();
                weights / vocabulary.len() as f64
            })
            .sum();
        per_document / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(target: &str, others: &[&str]) -> f64 {
        let stop_words = StopWords::default();
        let others: Vec<TermCounts> = others.iter().map(|doc| TermCounts::from_text(doc)).collect();
        let refs: Vec<&TermCounts> = others.iter().collect();
        SimilarityScorer::new(&stop_words).score(&TermCounts::from_text(target), &refs)
    }

    #[test]
    fn term_counts_keep_first_seen_order() {
        let counts = TermCounts::from_text("tacos great tacos.  tacos");
        let terms: Vec<(&str, usize)> = counts.iter().collect();
        assert_eq!(terms, vec![("tacos", 2), ("great", 1), ("tacos.", 1)]);
        assert_eq!(counts.get("great"), Some(1));
        assert_eq!(counts.get("salsa"), None);
        assert!(TermCounts::from_text("  ").is_empty());
    }

    #[test]
    fn vocabulary_ranks_by_frequency_then_first_seen() {
        let stop_words = StopWords::default();
        let scorer = SimilarityScorer::new(&stop_words);
        let target = TermCounts::from_text("the tacos were great tacos and salsa great tacos");
        assert_eq!(scorer.vocabulary(&target), vec!["tacos", "great", "salsa"]);
    }

    #[test]
    fn empty_pool_or_vocabulary_scores_zero() {
        assert_eq!(score("great tacos", &[]), 0.0);
        assert_eq!(score("the and of", &["great tacos"]), 0.0);
    }

    #[test]
    fn term_in_every_document_has_zero_weight() {
        assert_eq!(score("tacos", &["tacos here", "more tacos"]), 0.0);
    }

    #[test]
    fn score_averages_over_terms_and_documents() {
        // vocabulary [tacos, salsa]; tacos in doc 1 (freq 2), salsa nowhere.
        let value = score("tacos salsa", &["tacos tacos", "burritos"]);
        let expected = ((1.0f64 + 2.0).ln() * (2.0f64 / 1.0).ln() / 2.0 + 0.0) / 2.0;
        assert!((value - expected).abs() < 1e-12);
    }
}
