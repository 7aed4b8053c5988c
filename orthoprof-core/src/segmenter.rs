//! Greedy longest-match segmentation of word forms
//!
//! The segmenter walks a form left to right. At every position it tries the
//! longest substring first and takes the first one that is a grapheme of the
//! table, so a longer rule always wins over any shorter rule that would also
//! match. Characters no rule covers never abort a segmentation:
//!
//! - a space becomes the word-boundary token `#`
//! - the sentinels `^` and `$` are consumed silently
//! - anything else becomes an in-band [`Token::Unmatched`]

use crate::rule::{Rule, END_SENTINEL, NULL_SEGMENT, START_SENTINEL};
use crate::stats::UsageStats;
use crate::table::RuleLookup;
use crate::unicode;
use std::fmt;

/// Word-boundary marker emitted for spaces
pub const WORD_BOUNDARY: &str = "#";

/// Shape of the emitted tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentMode {
    /// Transcription segments only
    #[default]
    Plain,
    /// One `{matched}/{emitted}` token per step, for auditing
    Trace,
}

/// How forms are prepared and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentOptions {
    /// NFC-normalize forms before segmenting
    pub normalize: bool,
    /// Wrap forms as `^form$`
    pub boundaries: bool,
    /// Token shape
    pub mode: SegmentMode,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            boundaries: true,
            mode: SegmentMode::Plain,
        }
    }
}

impl SegmentOptions {
    /// Same options with a different token shape
    pub fn with_mode(self, mode: SegmentMode) -> Self {
        Self { mode, ..self }
    }
}

/// One emitted token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A transcription segment, verbatim (`left/right` pairs included)
    Sound(String),
    /// A space in the form
    WordBoundary,
    /// A character no rule covers
    Unmatched(char),
    /// Trace of one step: the consumed text and what it produced
    Trace {
        /// Consumed substring of the form
        source: String,
        /// Emitted transcription (may be empty or `NULL`)
        emitted: String,
    },
}

impl Token {
    /// Canonical sound of a [`Token::Sound`]
    pub fn canonical(&self) -> Option<&str> {
        match self {
            Token::Sound(segment) => Some(crate::rule::canonical_segment(segment)),
            _ => None,
        }
    }

    /// Whether this token marks an unmatched character
    pub fn is_unmatched(&self) -> bool {
        matches!(self, Token::Unmatched(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Sound(segment) => f.write_str(segment),
            Token::WordBoundary => f.write_str(WORD_BOUNDARY),
            Token::Unmatched(ch) => write!(f, "<<{ch}>>"),
            Token::Trace { source, emitted } => write!(f, "{{{source}}}/{{{emitted}}}"),
        }
    }
}

/// Token sequence produced for one form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    tokens: Vec<Token>,
}

impl Segmentation {
    /// Emitted tokens in order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Consume into the token vector
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// No token was emitted
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Characters that no rule matched
    pub fn unmatched(&self) -> impl Iterator<Item = char> + '_ {
        self.tokens.iter().filter_map(|token| match token {
            Token::Unmatched(ch) => Some(*ch),
            _ => None,
        })
    }

    /// Whether any character was left unmatched
    pub fn has_unmatched(&self) -> bool {
        self.tokens.iter().any(Token::is_unmatched)
    }

    /// Tokens rendered as strings
    pub fn rendered(&self) -> Vec<String> {
        self.tokens.iter().map(Token::to_string).collect()
    }
}

impl fmt::Display for Segmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, token) in self.tokens.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Applies a rule lookup to word forms
#[derive(Debug)]
pub struct Segmenter<'r, L: RuleLookup + ?Sized> {
    rules: &'r L,
    options: SegmentOptions,
}

impl<'r, L: RuleLookup + ?Sized> Segmenter<'r, L> {
    /// Segmenter with default options (NFC, boundaries, plain tokens)
    pub fn new(rules: &'r L) -> Self {
        Self::with_options(rules, SegmentOptions::default())
    }

    /// Segmenter with explicit options
    pub fn with_options(rules: &'r L, options: SegmentOptions) -> Self {
        Self { rules, options }
    }

    /// Active options
    pub fn options(&self) -> SegmentOptions {
        self.options
    }

    /// Normalized form, before boundary wrapping
    pub fn normalized(&self, form: &str) -> String {
        if self.options.normalize {
            unicode::normalize(form)
        } else {
            form.to_string()
        }
    }

    /// Form as it is scanned: normalized and wrapped in sentinels
    pub fn prepare(&self, form: &str) -> String {
        let form = self.normalized(form);
        self.wrap(form)
    }

    /// Segment a raw form without recording statistics
    pub fn segment(&self, form: &str) -> Segmentation {
        self.scan(&self.prepare(form), |_| {})
    }

    /// Segment a raw form, recording every matched rule in `usage`
    ///
    /// The normalized, unwrapped form is recorded as the example.
    pub fn segment_counted(
        &self,
        form: &str,
        language: &str,
        usage: &mut UsageStats,
    ) -> Segmentation {
        let normalized = self.normalized(form);
        let prepared = self.wrap(normalized.clone());
        self.scan(&prepared, |rule| {
            usage.record(&rule.grapheme, &normalized, language)
        })
    }

    /// Segment text exactly as given: no normalization, no wrapping
    pub fn segment_verbatim(&self, text: &str) -> Segmentation {
        self.scan(text, |_| {})
    }

    fn wrap(&self, form: String) -> String {
        if self.options.boundaries {
            format!("{START_SENTINEL}{form}{END_SENTINEL}")
        } else {
            form
        }
    }

    fn scan(&self, text: &str, mut on_match: impl FnMut(&Rule)) -> Segmentation {
        // Byte offset of every character boundary, end of text included
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;
        let longest = self.rules.longest_grapheme();

        let mut tokens = Vec::with_capacity(char_count);
        let mut pos = 0;
        while pos < char_count {
            let start = bounds[pos];
            let max_len = (char_count - pos).min(longest);
            let matched = (1..=max_len).rev().find_map(|len| {
                self.rules
                    .lookup(&text[start..bounds[pos + len]])
                    .map(|rule| (rule, len))
            });

            match matched {
                Some((rule, len)) => {
                    self.emit_rule(rule, &text[start..bounds[pos + len]], &mut tokens);
                    on_match(rule);
                    pos += len;
                }
                None => {
                    let ch = text[start..].chars().next().unwrap_or_default();
                    self.emit_fallback(ch, &mut tokens);
                    pos += 1;
                }
            }
        }

        Segmentation { tokens }
    }

    fn emit_rule(&self, rule: &Rule, source: &str, tokens: &mut Vec<Token>) {
        match self.options.mode {
            SegmentMode::Plain => tokens.extend(
                rule.segments()
                    .filter(|segment| *segment != NULL_SEGMENT)
                    .map(|segment| Token::Sound(segment.to_string())),
            ),
            SegmentMode::Trace => tokens.push(Token::Trace {
                source: source.to_string(),
                emitted: rule.transcription.clone(),
            }),
        }
    }

    fn emit_fallback(&self, ch: char, tokens: &mut Vec<Token>) {
        let trace = self.options.mode == SegmentMode::Trace;
        match ch {
            ' ' if trace => tokens.push(Token::Trace {
                source: " ".to_string(),
                emitted: WORD_BOUNDARY.to_string(),
            }),
            ' ' => tokens.push(Token::WordBoundary),
            START_SENTINEL | END_SENTINEL if trace => tokens.push(Token::Trace {
                source: ch.to_string(),
                emitted: String::new(),
            }),
            START_SENTINEL | END_SENTINEL => {}
            _ => tokens.push(Token::Unmatched(ch)),
        }
    }
}
