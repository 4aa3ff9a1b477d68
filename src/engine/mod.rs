//! The title normalization engine.
//!
//! A title goes through these passes, in order:
//!
//! 1. the pre-process fix lists (built-in, then the mode's, then the user's)
//! 2. bracketing of trailing extra title information
//! 3. vinyl record size notation
//! 4. the casing pass
//! 5. the post-process fix lists (built-in, then the mode's, then the user's)

mod casing;
mod classify;
mod context;
mod extra_info;
mod mode;
mod rules;
mod tokens;
mod vinyl;


pub use casing::Casing;
pub use classify::WordClassifier;
pub use context::CasingContext;
pub use mode::Mode;
pub use rules::{Rule, RuleError};

use crate::Options;
use rules::apply_rules;
use tokens::{join, tokenize};

/// A non-fatal fault found while normalizing a title. The title is still
/// produced, possibly imperfectly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A repeating rule kept matching past its pass limit.
    MalformedRule { rule: String },
    /// A closing bracket with no bracket open.
    UnmatchedClosingBracket { bracket: char, position: usize },
    /// A closing bracket that does not pair with the innermost open one.
    MismatchedBracket {
        expected: char,
        found: char,
        position: usize,
    },
    /// Brackets still open at the end of the title, outermost first. They
    /// are closed in the output.
    UnclosedBrackets { open: Vec<char> },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::MalformedRule { rule } => {
                write!(f, "rule '{}' did not settle and was stopped", rule)
            }
            Warning::UnmatchedClosingBracket { bracket, position } => {
                write!(f, "unmatched '{}' at position {}", bracket, position)
            }
            Warning::MismatchedBracket {
                expected,
                found,
                position,
            } => write!(
                f,
                "expected '{}' but found '{}' at position {}",
                expected, found, position
            ),
            Warning::UnclosedBrackets { open } => {
                let open: String = open.iter().collect();
                write!(f, "unclosed bracket(s) '{}' closed at end of title", open)
            }
        }
    }
}

/// Errors that stop a title from being normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The requested mode does not exist.
    InvalidMode(String),
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::InvalidMode(mode) => write!(
                f,
                "unknown mode '{}' (expected one of: english, french, sentence)",
                mode
            ),
        }
    }
}

impl std::error::Error for NormalizeError {}

/// A normalized title and the warnings found along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeResult {
    pub output: String,
    pub warnings: Vec<Warning>,
}

/// Runs every pass over `raw`.
pub fn normalize(raw: &str, options: &Options) -> NormalizeResult {
    let caps = options.mode.caps();
    let builtin = rules::builtin();
    let mode_rules = (caps.rules)();
    let mut warnings = Vec::new();

    let text = raw.trim();
    if text.is_empty() {
        return NormalizeResult {
            output: String::new(),
            warnings,
        };
    }
    log::debug!("normalizing {:?} in {} mode", text, caps.id);

    let text = apply_rules(text, &builtin.pre, &mut warnings);
    let text = apply_rules(&text, &mode_rules.pre, &mut warnings);
    let text = apply_rules(&text, &options.extra_pre_rules, &mut warnings);

    let text = join(&extra_info::bracket_extra_info(tokenize(&text)));
    let text = vinyl::normalize(&text);

    let casing = Casing::new(
        caps,
        WordClassifier::new(options.roman_numerals_uppercase),
        options.keep_uppercase,
    );
    let mut ctx = CasingContext::new();
    let text = casing.case_title(&tokenize(&text), &mut ctx);
    warnings.append(&mut ctx.warnings);

    let text = apply_rules(&text, &builtin.post, &mut warnings);
    let text = apply_rules(&text, &mode_rules.post, &mut warnings);
    let text = apply_rules(&text, &options.extra_post_rules, &mut warnings);

    NormalizeResult {
        output: capitalize_first_word(&text),
        warnings,
    }
}

/// Uppercases the first letter of the title if it begins a word, so rules
/// that rewrite the first word cannot leave it lowercase.
fn capitalize_first_word(text: &str) -> String {
    let mut prev = None;
    for (i, ch) in text.char_indices() {
        if ch.is_alphabetic() {
            let starts_word = prev.is_none_or(|p: char| {
                !(p.is_alphanumeric() || p == '_' || p == '\'' || p == '\u{2019}')
            });
            if !starts_word || ch.is_uppercase() {
                break;
            }
            let mut output = String::with_capacity(text.len());
            output.push_str(&text[..i]);
            output.extend(ch.to_uppercase());
            output.push_str(&text[i + ch.len_utf8()..]);
            return output;
        }
        prev = Some(ch);
    }
    text.to_string()
}
