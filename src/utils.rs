//! Text normalization and tokenization helpers shared by the analyzers.

use once_cell::sync::Lazy;
use regex::Regex;

static PS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)p\. *s\.").unwrap());
static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());
static NEWLINE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());
static DIGIT_DOT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]\.").unwrap());
static PERIOD_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.+").unwrap());
static BANG_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!+").unwrap());
static QUESTION_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?+").unwrap());

const CLITICS: [&str; 6] = ["'s", "'re", "'ll", "'ve", "'d", "'m"];

/// Normalize a raw review body into the canonical form every count is taken from.
///
/// The passes run in a fixed order; changing any of them shifts the numeric
/// features of every record, so they must stay in sync across runs.
pub fn normalize_review_text(raw: &str) -> String {
    let text = raw.replace('"', " ");
    let text = PS_RE.replace_all(&text, "ps");

    let text = SPACE_RUN_RE.replace_all(&text, " ");
    let text = text
        .replace(" \n", "\n")
        .replace(" .", ".")
        .replace(" ,", ",")
        .replace(" !", "!")
        .replace(" ?", "?");

    let text = NEWLINE_RUN_RE.replace_all(&text, "\n");
    let text = text
        .replace(".\n", ". ")
        .replace("!\n", "! ")
        .replace(":\n", ": ")
        .replace("?\n", "? ")
        .replace('\n', ".");

    let text = DIGIT_DOT_RE.replace_all(&text, " ");
    let text = text.replace(['-', '*'], " ");

    let text = PERIOD_RUN_RE.replace_all(&text, ". ");
    let text = BANG_RUN_RE.replace_all(&text, "! ");
    let text = QUESTION_RUN_RE.replace_all(&text, "? ");

    let text = SPACE_RUN_RE.replace_all(&text, " ");
    let ascii: String = text.chars().filter(char::is_ascii).collect();
    ascii.to_ascii_lowercase().trim().to_string()
}

/// True for the sentence terminators `.`, `!`, and `?`.
pub fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Count ASCII punctuation characters in `text`.
pub fn punctuation_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_punctuation).count()
}

/// Whitespace-delimited terms, punctuation left attached.
pub fn terms(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Split normalized text into word tokens for tagging.
///
/// Leading and trailing punctuation become their own tokens and English
/// clitics (`n't`, `'s`, `'re`, `'ll`, `'ve`, `'d`, `'m`) are split off.
pub fn word_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for raw in text.split_whitespace() {
        let mut core = raw;
        while let Some(ch) = core.chars().next().filter(char::is_ascii_punctuation) {
            tokens.push(ch.to_string());
            core = &core[ch.len_utf8()..];
        }
        let mut trailing = Vec::new();
        while let Some(ch) = core.chars().next_back().filter(char::is_ascii_punctuation) {
            trailing.push(ch.to_string());
            core = &core[..core.len() - ch.len_utf8()];
        }
        push_with_clitics(core, &mut tokens);
        tokens.extend(trailing.into_iter().rev());
    }
    tokens
}

fn push_with_clitics(core: &str, tokens: &mut Vec<String>) {
    if core.is_empty() {
        return;
    }
    if core.len() > 3 && core.ends_with("n't") {
        tokens.push(core[..core.len() - 3].to_string());
        tokens.push("n't".to_string());
        return;
    }
    for clitic in CLITICS {
        if core.len() > clitic.len() && core.ends_with(clitic) {
            tokens.push(core[..core.len() - clitic.len()].to_string());
            tokens.push(clitic.to_string());
            return;
        }
    }
    tokens.push(core.to_string());
}
