//! Structural, linguistic, and readability metrics for one review body.

use serde::Serialize;

use crate::constants::features::CLOSED_MARKER;
use crate::constants::readability::{
    ARI_CHARS_PER_WORD, ARI_OFFSET, ARI_WORDS_PER_SENTENCE, FK_OFFSET, FK_SYLLABLES_PER_WORD,
    FK_WORDS_PER_SENTENCE, POLYSYLLABLE_MIN, SMOG_OFFSET, SMOG_SCALE, SMOG_SENTENCE_BASIS,
};
use crate::lexicon::{CoarseTag, Lexicon};
use crate::utils::{is_terminator, normalize_review_text, punctuation_count, word_tokens};

/// Counts and scores derived from one review body.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TextMetrics {
    /// Normalized length excluding punctuation and spaces.
    pub character_count: usize,
    /// Whitespace-delimited tokens in the normalized text.
    pub word_count: usize,
    /// Terminators plus one for a trailing unterminated sentence.
    pub sentence_count: usize,
    /// Punctuation characters in the raw text.
    pub punctuation_count: usize,
    /// Normalized text contains `closed`.
    pub contains_closed_marker: bool,
    /// Tokens tagged as verbs.
    pub verb_count: usize,
    /// Tokens tagged as nouns.
    pub noun_count: usize,
    /// Tokens tagged as adjectives or adverbs.
    pub adjective_adverb_count: usize,
    /// Tokens with a known, non-zero syllable count.
    pub syllable_count: usize,
    /// Tokens with three or more syllables.
    pub polysyllable_count: usize,
    /// Automated Readability Index; zero without words or sentences.
    pub ari: f64,
    /// Flesch-Kincaid grade; zero without words or sentences.
    pub flesch_kincaid: f64,
    /// SMOG grade; zero without words or sentences.
    pub smog: f64,
}

/// Normalized text together with its metrics.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AnalyzedText {
    /// Output of [`normalize_review_text`].
    pub normalized: String,
    /// Metrics of the normalized text.
    pub metrics: TextMetrics,
}

/// ARI, Flesch-Kincaid, and SMOG grade estimates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Readability {
    /// Automated Readability Index.
    pub ari: f64,
    /// Flesch-Kincaid grade level.
    pub flesch_kincaid: f64,
    /// SMOG grade.
    pub smog: f64,
}

impl Readability {
    /// Closed-form scores from raw counts, or `None` unless words and sentences are positive.
    pub fn from_counts(
        characters: f64,
        words: f64,
        sentences: f64,
        syllables: f64,
        polysyllables: f64,
    ) -> Option<Self> {
        if words <= 0.0 || sentences <= 0.0 {
            return None;
        }
        let words_per_sentence = words / sentences;
        Some(Self {
            ari: ARI_CHARS_PER_WORD * (characters / words)
                + ARI_WORDS_PER_SENTENCE * words_per_sentence
                - ARI_OFFSET,
            flesch_kincaid: FK_WORDS_PER_SENTENCE * words_per_sentence
                + FK_SYLLABLES_PER_WORD * (syllables / words)
                - FK_OFFSET,
            smog: SMOG_SCALE * (polysyllables * (SMOG_SENTENCE_BASIS / sentences)).sqrt()
                + SMOG_OFFSET,
        })
    }
}

/// Running sums of the readability inputs across several documents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextTotals {
    /// Documents added so far.
    pub documents: usize,
    /// Summed character counts.
    pub characters: f64,
    /// Summed word counts.
    pub words: f64,
    /// Summed sentence counts.
    pub sentences: f64,
    /// Summed syllable counts.
    pub syllables: f64,
    /// Summed polysyllable counts.
    pub polysyllables: f64,
}

impl TextTotals {
    /// Add one document's counts.
    pub fn add(&mut self, metrics: &TextMetrics) {
        self.documents += 1;
        self.characters += metrics.character_count as f64;
        self.words += metrics.word_count as f64;
        self.sentences += metrics.sentence_count as f64;
        self.syllables += metrics.syllable_count as f64;
        self.polysyllables += metrics.polysyllable_count as f64;
    }

    /// Mean characters per document, `None` for zero documents.
    pub fn characters_per_document(&self) -> Option<f64> {
        (self.documents > 0).then(|| self.characters / self.documents as f64)
    }

    /// Readability of the pooled counts, treated as one document.
    pub fn readability(&self) -> Option<Readability> {
        Readability::from_counts(
            self.characters,
            self.words,
            self.sentences,
            self.syllables,
            self.polysyllables,
        )
    }
}

impl<'a> FromIterator<&'a TextMetrics> for TextTotals {
    fn from_iter<I: IntoIterator<Item = &'a TextMetrics>>(iter: I) -> Self {
        let mut totals = Self::default();
        for metrics in iter {
            totals.add(metrics);
        }
        totals
    }
}

/// Count sentences in normalized text.
///
/// Every terminator counts once; a final non-terminator character adds one
/// more for the trailing sentence. Empty text has zero sentences.
pub fn sentence_count(normalized: &str) -> usize {
    let compact: Vec<char> = normalized.chars().filter(|ch| *ch != ' ').collect();
    let Some(last) = compact.last() else {
        return 0;
    };
    let terminators = compact.iter().filter(|ch| is_terminator(**ch)).count();
    if is_terminator(*last) {
        terminators
    } else {
        terminators + 1
    }
}

/// Normalized length with punctuation and spaces removed.
pub fn character_count(normalized: &str) -> usize {
    normalized
        .chars()
        .filter(|ch| *ch != ' ' && !ch.is_ascii_punctuation())
        .count()
}

/// Computes [`TextMetrics`] using injected lexical resources.
#[derive(Clone, Copy)]
pub struct TextMetricsAnalyzer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> TextMetricsAnalyzer<'a> {
    /// Create an analyzer borrowing `lexicon`.
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Normalize `raw` and compute every metric.
    pub fn analyze(&self, raw: &str) -> AnalyzedText {
        let normalized = normalize_review_text(raw);
        let mut metrics = TextMetrics {
            character_count: character_count(&normalized),
            word_count: normalized.split_whitespace().count(),
            sentence_count: sentence_count(&normalized),
            punctuation_count: punctuation_count(raw),
            contains_closed_marker: normalized.contains(CLOSED_MARKER),
            ..TextMetrics::default()
        };
        self.count_parts_of_speech(&normalized, &mut metrics);
        if let Some(scores) = Readability::from_counts(
            metrics.character_count as f64,
            metrics.word_count as f64,
            metrics.sentence_count as f64,
            metrics.syllable_count as f64,
            metrics.polysyllable_count as f64,
        ) {
            metrics.ari = scores.ari;
            metrics.flesch_kincaid = scores.flesch_kincaid;
            metrics.smog = scores.smog;
        }
        AnalyzedText {
            normalized,
            metrics,
        }
    }

    fn count_parts_of_speech(&self, normalized: &str, metrics: &mut TextMetrics) {
        let tokens = word_tokens(normalized);
        let tags = self.lexicon.tagger().tag(&tokens);
        let pronunciations = self.lexicon.pronunciations();
        for (token, tag) in tokens.iter().zip(tags) {
            match tag {
                CoarseTag::AdjectiveAdverb => metrics.adjective_adverb_count += 1,
                CoarseTag::Verb => metrics.verb_count += 1,
                CoarseTag::Noun => metrics.noun_count += 1,
                CoarseTag::Pronoun | CoarseTag::Modal | CoarseTag::Other => {}
            }
            if let Some(syllables) = pronunciations.syllables(token) {
                if syllables > 0 {
                    metrics.syllable_count += 1;
                }
                if syllables >= POLYSYLLABLE_MIN {
                    metrics.polysyllable_count += 1;
                }
            }
        }
    }
}
