//! Guesscase guesses the canonical capitalization of music release and track
//! titles, following the MusicBrainz style guidelines.
//!
//! # Example
//!
//! ```
//! use guesscase::{normalize_title, Options};
//!
//! let options = Options::default();
//! let output = normalize_title("my track extended dub remix", &options).unwrap();
//! assert_eq!(output, "My Track (Extended Dub Remix)");
//! ```

pub mod config;
mod engine;

#[cfg(feature = "wasm")]
mod wasm;

pub use engine::{Mode, NormalizeError, NormalizeResult, Rule, RuleError, Warning};

/// Normalization options.
#[derive(Debug, Clone)]
pub struct Options {
    /// Capitalization mode. Default: English.
    pub mode: Mode,
    /// Uppercase roman numerals from I to X. Default: true.
    pub roman_numerals_uppercase: bool,
    /// Keep words typed in all capitals as they are. Default: false.
    pub keep_uppercase: bool,
    /// Rules applied after the built-in pre-process rules.
    pub extra_pre_rules: Vec<Rule>,
    /// Rules applied after the built-in post-process rules.
    pub extra_post_rules: Vec<Rule>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            roman_numerals_uppercase: true,
            keep_uppercase: false,
            extra_pre_rules: Vec::new(),
            extra_post_rules: Vec::new(),
        }
    }
}

/// Normalizes the capitalization and punctuation of a title.
///
/// # Arguments
///
/// * `raw` - The title as typed.
/// * `options` - Normalization options.
///
/// # Returns
///
/// The normalized title. Warnings are discarded; use
/// [`normalize_title_with_warnings`] to see them.
///
/// # Errors
///
/// Returns an error if the title cannot be normalized.
pub fn normalize_title(raw: &str, options: &Options) -> Result<String, NormalizeError> {
    normalize_title_with_warnings(raw, options).map(|result| result.output)
}

/// Normalizes a title and reports what went wrong along the way.
///
/// Faults such as unbalanced brackets never stop normalization; they are
/// returned as [`Warning`]s next to the best-effort output.
pub fn normalize_title_with_warnings(
    raw: &str,
    options: &Options,
) -> Result<NormalizeResult, NormalizeError> {
    Ok(engine::normalize(raw, options))
}

/// Normalizes a title in the mode named by `mode_id`, overriding
/// `options.mode`.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidMode`] if `mode_id` names no mode.
pub fn normalize_title_in_mode(
    raw: &str,
    mode_id: &str,
    options: &Options,
) -> Result<NormalizeResult, NormalizeError> {
    let mode: Mode = mode_id.parse()?;
    if mode == options.mode {
        return normalize_title_with_warnings(raw, options);
    }
    let options = Options {
        mode,
        ..options.clone()
    };
    normalize_title_with_warnings(raw, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty_input() {
        let result = normalize_title("", &Options::default()).unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_normalize_plain_title() {
        let result = normalize_title("hello world", &Options::default()).unwrap();
        assert_eq!(result, "Hello World");
    }

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.mode, Mode::English);
        assert!(options.roman_numerals_uppercase);
        assert!(!options.keep_uppercase);
        assert!(options.extra_pre_rules.is_empty());
        assert!(options.extra_post_rules.is_empty());
    }

    #[test]
    fn test_warnings_returned() {
        let result = normalize_title_with_warnings("song (live", &Options::default()).unwrap();
        assert_eq!(result.output, "Song (Live)");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_normalize_in_mode() {
        let result = normalize_title_in_mode("Hello World", "sentence", &Options::default());
        assert_eq!(result.unwrap().output, "Hello world");
    }

    #[test]
    fn test_normalize_in_unknown_mode() {
        let result = normalize_title_in_mode("Hello World", "klingon", &Options::default());
        assert_eq!(
            result,
            Err(NormalizeError::InvalidMode("klingon".to_string()))
        );
    }
}
