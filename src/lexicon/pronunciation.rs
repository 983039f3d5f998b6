use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::FeatureError;

/// Syllable lookup for a single lower-cased token.
///
/// `None` means the word is unknown, which is distinct from zero syllables.
pub trait PronunciationDictionary: Send + Sync {
    /// Syllable count for `word`, or `None` when the word is not covered.
    fn syllables(&self, word: &str) -> Option<usize>;

    /// True when counts are heuristic rather than looked up.
    ///
    /// Estimators cover every alphabetic word, so readability scores built on
    /// them differ from dictionary-backed scores.
    fn is_estimate(&self) -> bool {
        false
    }
}

/// Pronunciation dictionary in the CMU text format.
///
/// Each entry line reads `WORD  PH1 PH2 ...`; vowel phonemes carry a stress
/// digit, so the syllable count is the number of phonemes ending in a digit.
/// Alternate pronunciations (`WORD(2)`) are ignored in favor of the first one.
#[derive(Clone, Debug, Default)]
pub struct CmuDictionary {
    entries: HashMap<String, usize>,
}

impl CmuDictionary {
    /// Load a dictionary from a file path.
    pub fn from_path(path: &Path) -> Result<Self, FeatureError> {
        let file = File::open(path).map_err(|err| FeatureError::Lexicon {
            reason: format!("cannot open {}: {err}", path.display()),
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a dictionary from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, FeatureError> {
        let mut entries = HashMap::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(";;;") {
                continue;
            }
            let mut parts = trimmed.split_whitespace();
            let Some(head) = parts.next() else {
                continue;
            };
            let phonemes: Vec<&str> = parts.collect();
            if phonemes.is_empty() {
                return Err(FeatureError::Lexicon {
                    reason: format!("pronunciation line {} has no phonemes", idx + 1),
                });
            }
            let word = head
                .split_once('(')
                .map(|(word, _)| word)
                .unwrap_or(head)
                .to_ascii_lowercase();
            let syllables = phonemes
                .iter()
                .filter(|phoneme| phoneme.ends_with(|ch: char| ch.is_ascii_digit()))
                .count();
            entries.entry(word).or_insert(syllables);
        }
        Ok(Self { entries })
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no words were loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PronunciationDictionary for CmuDictionary {
    fn syllables(&self, word: &str) -> Option<usize> {
        self.entries.get(word).copied()
    }
}

/// Vowel-group syllable estimator for runs without a dictionary file.
///
/// Covers purely alphabetic tokens only; everything else is unknown.
#[derive(Clone, Copy, Debug, Default)]
pub struct EstimatedSyllables;

impl PronunciationDictionary for EstimatedSyllables {
    fn syllables(&self, word: &str) -> Option<usize> {
        if word.is_empty() || !word.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return None;
        }
        let lower = word.to_ascii_lowercase();
        let mut groups = 0;
        let mut in_vowel = false;
        for ch in lower.chars() {
            let vowel = matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
            if vowel && !in_vowel {
                groups += 1;
            }
            in_vowel = vowel;
        }
        // silent trailing e
        if groups > 1 && lower.ends_with('e') && !lower.ends_with("le") {
            groups -= 1;
        }
        Some(groups.max(1))
    }

    fn is_estimate(&self) -> bool {
        true
    }
}
