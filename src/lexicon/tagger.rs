use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::FeatureError;

/// Coarse part-of-speech classes tracked by the text metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoarseTag {
    /// Adjectives and adverbs (including negation particles).
    AdjectiveAdverb,
    /// Main and auxiliary verbs in any inflection.
    Verb,
    /// Common and proper nouns.
    Noun,
    /// Personal, possessive, and wh- pronouns (never counted as nouns).
    Pronoun,
    /// Modal verbs (never counted as verbs).
    Modal,
    /// Everything else: determiners, prepositions, numbers, punctuation.
    Other,
}

impl CoarseTag {
    /// Map a Penn Treebank tag onto the coarse set.
    pub fn from_penn(tag: &str) -> Self {
        match tag {
            "MD" => Self::Modal,
            "PRP" | "PRP$" | "WP" | "WP$" => Self::Pronoun,
            t if t.starts_with("JJ") || t.starts_with("RB") => Self::AdjectiveAdverb,
            t if t.starts_with("VB") => Self::Verb,
            t if t.starts_with("NN") => Self::Noun,
            _ => Self::Other,
        }
    }
}

/// Tags a token sequence; output has one tag per input token.
pub trait PartOfSpeechTagger: Send + Sync {
    /// Tag each token of `tokens` in order.
    fn tag(&self, tokens: &[String]) -> Vec<CoarseTag>;
}

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us",
    "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "who", "whom",
    "whose", "what", "whatever", "whoever", "y'all",
];

const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would", "ca", "wo",
    "'ll", "'d", "ought",
];

const AUXILIARIES: &[&str] = &[
    "be", "is", "am", "are", "was", "were", "been", "being", "'re", "'m", "have", "has", "had",
    "having", "'ve", "do", "does", "did", "done", "doing", "get", "gets", "got", "gotten",
    "getting",
];

const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every", "no",
    "all", "both", "either", "neither", "another", "such", "and", "or", "but", "nor", "yet", "so",
    "if", "because", "while", "although", "though", "unless", "until", "since", "whether", "of",
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "out", "off",
    "over", "under", "around", "near", "without", "within", "than", "like", "as", "per", "via",
    "upon", "onto", "toward", "towards", "across", "along", "behind", "beside", "besides",
    "beyond", "inside", "outside", "there", "which", "where", "when", "why", "how", "oh", "wow",
    "yes", "ok", "okay", "please", "'s", "lol",
];

const ADJECTIVES_ADVERBS: &[&str] = &[
    "not", "n't", "very", "really", "too", "also", "just", "always", "never", "often", "ever",
    "even", "still", "again", "back", "here", "now", "then", "well", "pretty", "quite", "almost",
    "only", "already", "soon", "definitely", "probably", "maybe", "sometimes", "usually", "once",
    "twice", "much", "more", "most", "less", "least", "far", "away", "together", "instead",
    "good", "great", "bad", "nice", "best", "better", "worse", "worst", "delicious", "friendly",
    "fresh", "hot", "cold", "warm", "new", "old", "big", "small", "little", "large", "long",
    "short", "high", "low", "cheap", "expensive", "clean", "dirty", "slow", "fast", "quick",
    "rude", "awesome", "amazing", "excellent", "terrible", "horrible", "awful", "fine", "sweet",
    "spicy", "tasty", "happy", "sure", "free", "full", "open", "few", "many", "several", "other",
    "same", "different", "whole", "first", "last", "next", "own", "main", "top", "favorite",
    "perfect", "huge", "tiny", "hard", "easy", "busy", "empty", "wrong", "right", "real", "overall",
];

const VERB_BASES: &[&str] = &[
    "eat", "love", "like", "order", "come", "try", "go", "make", "take", "say", "know", "think",
    "want", "see", "recommend", "give", "find", "tell", "feel", "leave", "pay", "sit", "bring",
    "buy", "wait", "serve", "taste", "need", "look", "ask", "keep", "let", "seem", "stop",
    "return", "visit", "enjoy", "call", "start", "help", "use", "work", "check", "share",
    "drink", "cook", "book", "park", "walk", "live", "stay", "hate", "expect", "miss",
];

const IRREGULAR_VERBS: &[&str] = &[
    "ate", "eaten", "came", "went", "gone", "took", "taken", "made", "said", "knew", "known",
    "thought", "saw", "seen", "found", "gave", "given", "left", "told", "felt", "paid", "sat",
    "brought", "bought", "kept", "let", "seemed", "drank", "drunk",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];

/// Rule-based tagger: closed-class lists, a seed lexicon, context, and suffixes.
///
/// Overrides loaded from a `word<TAB>PENN_TAG` file take precedence over the
/// built-in lists.
#[derive(Clone, Debug)]
pub struct LexiconTagger {
    words: HashMap<String, CoarseTag>,
    verb_bases: HashSet<String>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        let mut words = HashMap::new();
        let groups: [(&[&str], CoarseTag); 7] = [
            (FUNCTION_WORDS, CoarseTag::Other),
            (ADJECTIVES_ADVERBS, CoarseTag::AdjectiveAdverb),
            (VERB_BASES, CoarseTag::Verb),
            (IRREGULAR_VERBS, CoarseTag::Verb),
            (AUXILIARIES, CoarseTag::Verb),
            (MODALS, CoarseTag::Modal),
            (PRONOUNS, CoarseTag::Pronoun),
        ];
        for (list, tag) in groups {
            for word in list {
                words.insert((*word).to_string(), tag);
            }
        }
        let verb_bases = VERB_BASES.iter().map(|word| (*word).to_string()).collect();
        Self { words, verb_bases }
    }
}

impl LexiconTagger {
    /// Add or replace the tag for one word.
    pub fn with_word(mut self, word: impl Into<String>, tag: CoarseTag) -> Self {
        let word = word.into().to_ascii_lowercase();
        if tag == CoarseTag::Verb {
            self.verb_bases.insert(word.clone());
        }
        self.words.insert(word, tag);
        self
    }

    /// Apply overrides from a `word<whitespace>PENN_TAG` file.
    pub fn with_overrides_from_path(self, path: &Path) -> Result<Self, FeatureError> {
        let file = File::open(path).map_err(|err| FeatureError::Lexicon {
            reason: format!("cannot open {}: {err}", path.display()),
        })?;
        self.with_overrides(BufReader::new(file))
    }

    /// Apply overrides from any buffered reader.
    pub fn with_overrides<R: BufRead>(mut self, reader: R) -> Result<Self, FeatureError> {
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut parts = trimmed.split_whitespace();
            let (Some(word), Some(tag)) = (parts.next(), parts.next()) else {
                return Err(FeatureError::Lexicon {
                    reason: format!("tag lexicon line {} needs a word and a tag", idx + 1),
                });
            };
            self = self.with_word(word, CoarseTag::from_penn(tag));
        }
        Ok(self)
    }

    fn tag_one(&self, token: &str, previous: Option<(&str, CoarseTag)>) -> CoarseTag {
        if !token.chars().any(|ch| ch.is_ascii_alphabetic()) {
            return CoarseTag::Other;
        }
        let after_modal_or_to = match previous {
            Some((_, CoarseTag::Modal)) => true,
            Some(("to", _)) => self.verb_bases.contains(token),
            _ => false,
        };
        if let Some(tag) = self.words.get(token) {
            return match tag {
                CoarseTag::Noun | CoarseTag::AdjectiveAdverb
                    if after_modal_or_to && self.verb_bases.contains(token) =>
                {
                    CoarseTag::Verb
                }
                other => *other,
            };
        }
        if after_modal_or_to {
            return CoarseTag::Verb;
        }
        Self::tag_by_suffix(token)
    }

    fn tag_by_suffix(token: &str) -> CoarseTag {
        let len = token.len();
        if len > 4 && token.ends_with("ly") {
            return CoarseTag::AdjectiveAdverb;
        }
        if len > 4 && token.ends_with("ing") {
            return CoarseTag::Verb;
        }
        if len > 3 && token.ends_with("ed") {
            return CoarseTag::Verb;
        }
        if ADJECTIVE_SUFFIXES
            .iter()
            .any(|suffix| len > suffix.len() + 1 && token.ends_with(suffix))
        {
            return CoarseTag::AdjectiveAdverb;
        }
        CoarseTag::Noun
    }
}

impl PartOfSpeechTagger for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> Vec<CoarseTag> {
        let mut tags = Vec::with_capacity(tokens.len());
        let mut previous: Option<(&str, CoarseTag)> = None;
        for token in tokens {
            let tag = self.tag_one(token, previous);
            tags.push(tag);
            previous = Some((token.as_str(), tag));
        }
        tags
    }
}
