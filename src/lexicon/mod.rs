//! Read-only lexical resources injected into the text analyzers.
//!
//! Ownership model:
//! - `Lexicon` is built once per process and shared by reference.
//! - The tagger and pronunciation dictionary sit behind traits so callers can
//!   swap in corpus-backed implementations (or test doubles) without touching
//!   the analyzers.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::FeatureError;

/// Pronunciation dictionaries and syllable estimation.
pub mod pronunciation;
/// Coarse part-of-speech tagging.
pub mod tagger;

pub use pronunciation::{CmuDictionary, EstimatedSyllables, PronunciationDictionary};
pub use tagger::{CoarseTag, LexiconTagger, PartOfSpeechTagger};

const DEFAULT_STOP_WORDS: [&str; 119] = [
    "a", "able", "about", "across", "after", "all", "almost", "also", "am", "among", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "but", "by", "can", "cannot", "could",
    "dear", "did", "do", "does", "either", "else", "ever", "every", "for", "from", "get", "got",
    "had", "has", "have", "he", "her", "hers", "him", "his", "how", "however", "i", "if", "in",
    "into", "is", "it", "its", "just", "least", "let", "like", "likely", "may", "me", "might",
    "most", "must", "my", "neither", "no", "nor", "not", "of", "off", "often", "on", "only", "or",
    "other", "our", "own", "rather", "said", "say", "says", "she", "should", "since", "so", "some",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "tis", "to",
    "too", "twas", "us", "wants", "was", "we", "were", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "would", "yet", "you", "your",
];

/// Fixed stop-word list excluded from similarity vocabularies.
#[derive(Clone, Debug)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build a stop-word set from arbitrary words (stored lower-cased).
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| word.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// True if `word` is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS)
    }
}

/// Bundle of the tagger, pronunciation dictionary, and stop words.
#[derive(Clone)]
pub struct Lexicon {
    tagger: Arc<dyn PartOfSpeechTagger>,
    pronunciations: Arc<dyn PronunciationDictionary>,
    stop_words: Arc<StopWords>,
}

impl Lexicon {
    /// Assemble a lexicon from explicit resources.
    pub fn new(
        tagger: Arc<dyn PartOfSpeechTagger>,
        pronunciations: Arc<dyn PronunciationDictionary>,
        stop_words: StopWords,
    ) -> Self {
        Self {
            tagger,
            pronunciations,
            stop_words: Arc::new(stop_words),
        }
    }

    /// Built-in tagger, estimated syllables, and the default stop words.
    pub fn builtin() -> Self {
        Self::new(
            Arc::new(LexiconTagger::default()),
            Arc::new(EstimatedSyllables),
            StopWords::default(),
        )
    }

    /// Load the lexicon from optional resource files.
    ///
    /// Without a pronunciation file the vowel-group estimator is used.
    pub fn load(
        pronunciations: Option<&Path>,
        tag_lexicon: Option<&Path>,
    ) -> Result<Self, FeatureError> {
        let tagger = match tag_lexicon {
            Some(path) => {
                let tagger = LexiconTagger::default().with_overrides_from_path(path)?;
                info!(path = %path.display(), "loaded tag lexicon overrides");
                tagger
            }
            None => LexiconTagger::default(),
        };
        let pronunciations: Arc<dyn PronunciationDictionary> = match pronunciations {
            Some(path) => {
                let dictionary = CmuDictionary::from_path(path)?;
                info!(
                    path = %path.display(),
                    entries = dictionary.len(),
                    "loaded pronunciation dictionary"
                );
                Arc::new(dictionary)
            }
            None => {
                warn!("no pronunciation dictionary configured; estimating syllables");
                Arc::new(EstimatedSyllables)
            }
        };
        Ok(Self::new(Arc::new(tagger), pronunciations, StopWords::default()))
    }

    /// Part-of-speech tagger.
    pub fn tagger(&self) -> &dyn PartOfSpeechTagger {
        self.tagger.as_ref()
    }

    /// Pronunciation dictionary.
    pub fn pronunciations(&self) -> &dyn PronunciationDictionary {
        self.pronunciations.as_ref()
    }

    /// Stop words.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// True when syllable counts come from the vowel-group estimator.
    pub fn estimates_syllables(&self) -> bool {
        self.pronunciations.is_estimate()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}
