//! Noun-phrase segmentation.
//!
//! `PhraseSegmenter` is the capability boundary between the screener and
//! whatever linguistic model proposes candidate phrases. The screener only
//! needs byte spans into the text it passed in; it normalizes and filters the
//! spans itself.
//!
//! `RuleBasedSegmenter` is the default backend. It approximates noun chunking
//! without a statistical model:
//! - tokens are runs of alphanumerics and `+ # & - '`
//! - a chunk is a maximal run of content tokens separated only by spaces/tabs
//! - punctuation, line breaks and function words end a chunk
//!
//! Chunks are emitted whole regardless of length; discarding overlong phrases
//! is left to the skill extractor.

use std::ops::Range;

/// A candidate phrase, as a byte range into the segmented text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseSpan {
    pub start: usize,
    pub end: usize,
}

impl PhraseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Produces candidate phrase spans for a text. Implementations hold no
/// per-call state and are shared across requests as `Arc<dyn PhraseSegmenter>`.
pub trait PhraseSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<PhraseSpan>;
}

/// Words that never belong to a skill phrase and always end the current chunk.
const FUNCTION_WORDS: &[&str] = &[
    // determiners
    "a", "an", "the", "this", "that", "these", "those", "my", "our", "your", "his", "her",
    "their", "its", "some", "any", "each", "every", "all", "both", "either", "neither", "no",
    "other", "such", "same",
    // pronouns
    "i", "me", "we", "us", "you", "he", "him", "she", "it", "they", "them", "who", "whom",
    "whose", "which", "what",
    // prepositions
    "in", "on", "at", "by", "for", "from", "to", "of", "with", "within", "without", "into",
    "onto", "over", "under", "about", "across", "after", "before", "during", "through",
    "between", "among", "against", "via", "per", "as", "than", "like", "including",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet", "while", "whereas", "although", "because", "if",
    "when", "where", "also", "etc", "not",
    // auxiliaries
    "is", "am", "are", "was", "were", "be", "been", "being", "has", "have", "had", "do",
    "does", "did", "will", "would", "can", "could", "should", "may", "might", "must", "shall",
    // résumé action verbs and qualifiers
    "developed", "built", "designed", "implemented", "managed", "led", "created", "used",
    "using", "worked", "working", "improved", "maintained", "responsible", "collaborated",
    "delivered", "conducted", "performed", "handled", "utilized", "achieved", "reduced",
    "increased", "assisted", "supported", "skilled", "proficient", "experienced", "familiar",
    "knowledge", "strong", "excellent", "good", "very",
];

#[derive(Debug, Clone, Copy)]
enum Token {
    Word(usize, usize),
    Break,
}

#[derive(Debug, Clone, Default)]
pub struct RuleBasedSegmenter;

impl PhraseSegmenter for RuleBasedSegmenter {
    fn segment(&self, text: &str) -> Vec<PhraseSpan> {
        let mut spans = Vec::new();
        let mut chunk: Vec<(usize, usize)> = Vec::new();

        for token in tokenize(text) {
            match token {
                Token::Word(start, end) if !is_function_word(&text[start..end]) => {
                    chunk.push((start, end));
                }
                _ => flush(&mut chunk, &mut spans),
            }
        }
        flush(&mut chunk, &mut spans);

        spans
    }
}

fn flush(chunk: &mut Vec<(usize, usize)>, spans: &mut Vec<PhraseSpan>) {
    if let (Some(first), Some(last)) = (chunk.first(), chunk.last()) {
        spans.push(PhraseSpan::new(first.0, last.1));
    }
    chunk.clear();
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#' | '&' | '-' | '\'')
}

fn is_function_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    FUNCTION_WORDS.contains(&lower.as_str())
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if is_token_char(c) {
            start.get_or_insert(i);
            continue;
        }
        if let Some(s) = start.take() {
            tokens.push(Token::Word(s, i));
        }
        if c != ' ' && c != '\t' {
            tokens.push(Token::Break);
        }
    }
    if let Some(s) = start {
        tokens.push(Token::Word(s, text.len()));
    }
    tokens
}
