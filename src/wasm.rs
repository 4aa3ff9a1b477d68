//! WebAssembly bindings for Guesscase.
//!
//! This module provides JavaScript-friendly bindings for the editing UI, which
//! normalizes a title field every time it is committed.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::{Mode, NormalizeError, Options, Rule, Warning};

/// JavaScript-friendly options struct.
///
/// All fields are optional and use camelCase naming for JavaScript conventions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsOptions {
    /// Mode: "english", "french", or "sentence" (default: "english").
    pub mode: Option<String>,

    /// Uppercase roman numerals (default: true).
    pub roman_numerals_uppercase: Option<bool>,

    /// Keep words typed in all capitals (default: false).
    pub keep_uppercase: Option<bool>,

    /// Extra rules run after the built-in pre-process rules.
    pub pre_rules: Option<Vec<JsRule>>,

    /// Extra rules run after the built-in post-process rules.
    pub post_rules: Option<Vec<JsRule>>,
}

/// JavaScript-friendly rewrite rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsRule {
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default = "default_case_insensitive")]
    pub case_insensitive: bool,
}

fn default_case_insensitive() -> bool {
    true
}

impl JsRule {
    fn to_rule(&self) -> Result<Rule, JsError> {
        Rule::new(
            &self.name,
            &self.pattern,
            &self.replacement,
            self.repeat,
            self.case_insensitive,
        )
        .map_err(|e| JsError::new(&e.to_string()))
    }
}

impl JsOptions {
    /// Convert JavaScript options to Rust Options.
    fn to_options(&self) -> Result<Options, JsError> {
        let mut opts = Options::default();

        if let Some(ref v) = self.mode {
            opts.mode = v
                .parse()
                .map_err(|e: NormalizeError| JsError::new(&e.to_string()))?;
        }
        if let Some(v) = self.roman_numerals_uppercase {
            opts.roman_numerals_uppercase = v;
        }
        if let Some(v) = self.keep_uppercase {
            opts.keep_uppercase = v;
        }
        if let Some(ref rules) = self.pre_rules {
            opts.extra_pre_rules = rules
                .iter()
                .map(JsRule::to_rule)
                .collect::<Result<_, _>>()?;
        }
        if let Some(ref rules) = self.post_rules {
            opts.extra_post_rules = rules
                .iter()
                .map(JsRule::to_rule)
                .collect::<Result<_, _>>()?;
        }

        Ok(opts)
    }
}

fn parse_options(options: JsValue) -> Result<Options, JsError> {
    let js_opts: JsOptions = if options.is_undefined() || options.is_null() {
        JsOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))?
    };
    js_opts.to_options()
}

/// Normalization result with warnings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsNormalizeResult {
    /// The normalized title.
    pub output: String,
    /// Warnings generated during normalization.
    pub warnings: Vec<JsWarning>,
}

/// A warning generated during normalization.
#[derive(Debug, Serialize)]
pub struct JsWarning {
    /// Character offset of the fault, when it has one.
    pub position: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl From<Warning> for JsWarning {
    fn from(warning: Warning) -> Self {
        let position = match &warning {
            Warning::UnmatchedClosingBracket { position, .. }
            | Warning::MismatchedBracket { position, .. } => Some(*position),
            Warning::MalformedRule { .. } | Warning::UnclosedBrackets { .. } => None,
        };
        Self {
            position,
            message: warning.to_string(),
        }
    }
}

/// Normalize a title.
///
/// # Arguments
///
/// * `raw` - The title as typed
/// * `options` - Optional normalization options as a JavaScript object
///
/// # Returns
///
/// The normalized title.
#[wasm_bindgen(js_name = normalizeTitle)]
pub fn normalize_title(raw: &str, options: JsValue) -> Result<String, JsError> {
    let opts = parse_options(options)?;
    crate::normalize_title(raw, &opts).map_err(|e| JsError::new(&e.to_string()))
}

/// Normalize a title and return both output and warnings.
///
/// # Returns
///
/// An object with `output` (normalized string) and `warnings` (array of
/// warning objects).
#[wasm_bindgen(js_name = normalizeTitleWithWarnings)]
pub fn normalize_title_with_warnings(raw: &str, options: JsValue) -> Result<JsValue, JsError> {
    let opts = parse_options(options)?;
    let result = crate::normalize_title_with_warnings(raw, &opts)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let js_result = JsNormalizeResult {
        output: result.output,
        warnings: result.warnings.into_iter().map(JsWarning::from).collect(),
    };

    serde_wasm_bindgen::to_value(&js_result).map_err(|e| JsError::new(&e.to_string()))
}

/// Describe a mode as HTML, with its guideline link opening in a new window.
#[wasm_bindgen(js_name = describeMode)]
pub fn describe_mode(mode: &str) -> Result<String, JsError> {
    let mode: Mode = mode
        .parse()
        .map_err(|e: NormalizeError| JsError::new(&e.to_string()))?;
    Ok(mode.description_html())
}
