// SPDX-FileCopyrightText: 2025 Hong Minhee <https://hongminhee.org/>
// SPDX-License-Identifier: GPL-3.0-or-later
//! Configuration file support for Guesscase.
//!
//! This module provides functionality for loading and parsing configuration
//! files (`.guesscase.toml`) that choose the mode and add site-specific
//! rewrite rules.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{Mode, Options, Rule, RuleError};

/// The default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".guesscase.toml";

/// Configuration for Guesscase.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Capitalization mode (default: `english`).
    pub mode: Mode,

    /// Uppercase roman numerals from I to X (default: true).
    pub roman_numerals_uppercase: bool,

    /// Keep words typed in all capitals (default: false).
    pub keep_uppercase: bool,

    /// Rules run after the built-in pre-process rules.
    pub pre_rules: Vec<RuleConfig>,

    /// Rules run after the built-in post-process rules.
    pub post_rules: Vec<RuleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::English,
            roman_numerals_uppercase: true,
            keep_uppercase: false,
            pre_rules: Vec::new(),
            post_rules: Vec::new(),
        }
    }
}

/// A rewrite rule as written in the configuration file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleConfig {
    /// Name reported when the rule misbehaves.
    pub name: String,

    /// Regular expression. The text matched by its first and last groups is
    /// kept around the replacement.
    pub pattern: String,

    /// Replacement template; `${n}` refers to group `n`.
    #[serde(default)]
    pub replacement: String,

    /// Apply repeatedly until the pattern stops matching (default: false).
    #[serde(default)]
    pub repeat: bool,

    /// Match without regard to case (default: true).
    #[serde(default = "default_case_insensitive")]
    pub case_insensitive: bool,
}

fn default_case_insensitive() -> bool {
    true
}

impl RuleConfig {
    /// Compile the rule.
    pub fn compile(&self) -> Result<Rule, RuleError> {
        Rule::new(
            &self.name,
            &self.pattern,
            &self.replacement,
            self.repeat,
            self.case_insensitive,
        )
    }
}

impl Config {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Discover and load configuration by searching up the directory tree.
    ///
    /// Starting from `start_dir`, searches for `.guesscase.toml` in each parent
    /// directory until one is found or the filesystem root is reached.
    ///
    /// Returns the path where the config was found and the loaded config,
    /// or `None` if no config file was found.
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                log::debug!("using configuration {}", config_path.display());
                let config = Self::from_file(&config_path)?;
                return Ok(Some((config_path, config)));
            }
            if !current.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Build normalization options, compiling the configured rules.
    pub fn to_options(&self) -> Result<Options, ConfigError> {
        let compile = |rules: &[RuleConfig]| {
            rules
                .iter()
                .map(RuleConfig::compile)
                .collect::<Result<Vec<_>, _>>()
                .map_err(ConfigError::Rule)
        };
        Ok(Options {
            mode: self.mode,
            roman_numerals_uppercase: self.roman_numerals_uppercase,
            keep_uppercase: self.keep_uppercase,
            extra_pre_rules: compile(&self.pre_rules)?,
            extra_post_rules: compile(&self.post_rules)?,
        })
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading the config file.
    Io(PathBuf, std::io::Error),
    /// TOML parse error.
    Parse(PathBuf, toml::de::Error),
    /// A configured rule does not compile.
    Rule(RuleError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, err) => {
                write!(f, "failed to read {}: {}", path.display(), err)
            }
            ConfigError::Parse(path, err) => {
                write!(f, "failed to parse {}: {}", path.display(), err)
            }
            ConfigError::Rule(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, err) => Some(err),
            ConfigError::Parse(_, err) => Some(err),
            ConfigError::Rule(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mode, Mode::English);
        assert!(config.roman_numerals_uppercase);
        assert!(!config.keep_uppercase);
        assert!(config.pre_rules.is_empty());
        assert!(config.post_rules.is_empty());
    }

    #[test]
    fn test_parse_empty_toml() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_mode() {
        let config = Config::from_toml(r#"mode = "french""#).unwrap();
        assert_eq!(config.mode, Mode::French);
    }

    #[test]
    fn test_parse_unknown_mode() {
        assert!(Config::from_toml(r#"mode = "turkish""#).is_err());
    }

    #[test]
    fn test_parse_flags() {
        let config = Config::from_toml(
            r#"
roman_numerals_uppercase = false
keep_uppercase = true
"#,
        )
        .unwrap();
        assert!(!config.roman_numerals_uppercase);
        assert!(config.keep_uppercase);
        assert_eq!(config.mode, Mode::English); // default
    }

    #[test]
    fn test_parse_rules() {
        let config = Config::from_toml(
            r#"
[[pre_rules]]
name = "tix"
pattern = '(\b)tix(\b)'
replacement = "tickets"

[[post_rules]]
name = "shout"
pattern = "(^)hey( )"
replacement = "HEY"
repeat = true
case_insensitive = false
"#,
        )
        .unwrap();
        assert_eq!(
            config.pre_rules,
            vec![RuleConfig {
                name: "tix".to_string(),
                pattern: r"(\b)tix(\b)".to_string(),
                replacement: "tickets".to_string(),
                repeat: false,
                case_insensitive: true,
            }]
        );
        assert!(config.post_rules[0].repeat);
        assert!(!config.post_rules[0].case_insensitive);
    }

    #[test]
    fn test_rule_requires_name_and_pattern() {
        assert!(Config::from_toml("[[pre_rules]]\nname = \"x\"").is_err());
        assert!(Config::from_toml("[[pre_rules]]\npattern = \"x\"").is_err());
    }

    #[test]
    fn test_to_options() {
        let config = Config::from_toml(
            r#"
mode = "sentence"
keep_uppercase = true

[[post_rules]]
name = "tix"
pattern = '(\b)tix(\b)'
replacement = "tickets"
"#,
        )
        .unwrap();
        let options = config.to_options().unwrap();
        assert_eq!(options.mode, Mode::Sentence);
        assert!(options.keep_uppercase);
        assert!(options.extra_pre_rules.is_empty());
        assert_eq!(options.extra_post_rules.len(), 1);
        assert_eq!(options.extra_post_rules[0].name(), "tix");
        assert!(!options.extra_post_rules[0].is_repeat());
    }

    #[test]
    fn test_to_options_invalid_pattern() {
        let config = Config::from_toml(
            r#"
[[pre_rules]]
name = "broken"
pattern = "(unclosed"
"#,
        )
        .unwrap();
        let err = config.to_options().unwrap_err();
        assert!(matches!(err, ConfigError::Rule(RuleError::Pattern { .. })));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "mode = \"sentence\"").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.mode, Mode::Sentence);
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_file(&dir.path().join(CONFIG_FILE_NAME));
        assert!(matches!(result, Err(ConfigError::Io(_, _))));
    }

    #[test]
    fn test_from_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "mode = 42").unwrap();
        let result = Config::from_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_, _))));
    }

    #[test]
    fn test_discover_in_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "mode = \"french\"").unwrap();

        let (path, config) = Config::discover(dir.path()).unwrap().unwrap();
        assert_eq!(path, config_path);
        assert_eq!(config.mode, Mode::French);
    }

    #[test]
    fn test_discover_in_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let sub_dir = dir.path().join("a").join("b");
        std::fs::create_dir_all(&sub_dir).unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "keep_uppercase = true").unwrap();

        let (path, config) = Config::discover(&sub_dir).unwrap().unwrap();
        assert_eq!(path, config_path);
        assert!(config.keep_uppercase);
    }
}
