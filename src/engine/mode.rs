//! Capitalization modes.
//!
//! Each mode is a row in a capability table over the shared engine: whether
//! it uses sentence caps, which extra rules run before and after casing, and
//! a hook that may take over the casing of single words.

use std::str::FromStr;
use std::sync::LazyLock;

use serde::Deserialize;

use super::NormalizeError;
use super::context::CasingContext;
use super::rules::{Rule, RuleDef, RuleError, compile};

/// A built-in capitalization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Title case: almost every word capitalized.
    #[default]
    English,
    /// Sentence case with French punctuation spacing.
    French,
    /// Sentence case: only the first word of a sentence capitalized.
    Sentence,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::English, Mode::French, Mode::Sentence];

    pub fn id(self) -> &'static str {
        self.caps().id
    }

    pub fn caps(self) -> &'static ModeCaps {
        match self {
            Mode::English => &ENGLISH,
            Mode::French => &FRENCH,
            Mode::Sentence => &SENTENCE,
        }
    }

    pub fn is_sentence_caps(self) -> bool {
        self.caps().sentence_caps
    }

    /// The description with its link rendered as an HTML anchor that opens
    /// in a new window.
    pub fn description_html(self) -> String {
        self.caps().description_html()
    }

    /// The description as plain text, keeping only the link text.
    pub fn description_text(self) -> String {
        self.caps().description_text()
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Mode {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NormalizeError::InvalidMode(s.to_string()))
    }
}

/// Rules a mode adds around the shared fix lists.
#[derive(Debug, Default)]
pub struct ModeRules {
    pub pre: Vec<Rule>,
    pub post: Vec<Rule>,
}

impl ModeRules {
    pub fn compile(pre: &[RuleDef], post: &[RuleDef]) -> Result<Self, RuleError> {
        Ok(Self {
            pre: compile(pre)?,
            post: compile(post)?,
        })
    }
}

/// Hook deciding the case of a word before the engine does. Returning `None`
/// leaves the word to the engine.
pub type WordHook = fn(word: &str, ctx: &CasingContext) -> Option<String>;

/// What a mode does differently from the others.
#[derive(Debug)]
pub struct ModeCaps {
    pub id: &'static str,
    /// Description with one `{url|link text}` placeholder.
    pub description: &'static str,
    pub url: &'static str,
    pub sentence_caps: bool,
    pub rules: fn() -> &'static ModeRules,
    pub do_word: WordHook,
}

impl ModeCaps {
    pub fn description_html(&self) -> String {
        render_description(
            self.description,
            |text| html_escape::encode_text(text).into_owned(),
            |text| {
                format!(
                    "<a href=\"{}\" target=\"_blank\">{}</a>",
                    html_escape::encode_double_quoted_attribute(self.url),
                    html_escape::encode_text(text)
                )
            },
        )
    }

    pub fn description_text(&self) -> String {
        render_description(self.description, str::to_string, str::to_string)
    }
}

/// Renders a description template, passing the text around the
/// `{url|...}` placeholder to `plain` and the link text to `link`.
fn render_description(
    template: &str,
    plain: impl Fn(&str) -> String,
    link: impl Fn(&str) -> String,
) -> String {
    let Some(start) = template.find("{url|") else {
        return plain(template);
    };
    let rest = &template[start + "{url|".len()..];
    let Some(end) = rest.find('}') else {
        return plain(template);
    };
    format!(
        "{}{}{}",
        plain(&template[..start]),
        link(&rest[..end]),
        plain(&rest[end + 1..])
    )
}

fn decline(_word: &str, _ctx: &CasingContext) -> Option<String> {
    None
}

static NO_RULES: LazyLock<ModeRules> = LazyLock::new(ModeRules::default);

fn no_rules() -> &'static ModeRules {
    &NO_RULES
}

const fn fix(name: &'static str, pattern: &'static str, replacement: &'static str) -> RuleDef {
    RuleDef {
        name,
        pattern,
        replacement,
        repeat: true,
        case_insensitive: false,
    }
}

/// Typed guillemets.
pub const FRENCH_PRE_RULES: &[RuleDef] = &[
    fix("<< -> «", r"()<<()", "\u{00AB}"),
    fix(">> -> »", r"()>>()", "\u{00BB}"),
];

/// French spacing. Each pattern requires the space to be missing, so a
/// spaced title passes through unchanged.
pub const FRENCH_POST_RULES: &[RuleDef] = &[
    fix(
        "space before ! ? ; :",
        r"([^\s!?;:\u{00AB}])([!?;:]+)",
        " ",
    ),
    fix("space after «", r"(\u{00AB})([^\s])", " "),
    fix("space before »", r"([^\s])(\u{00BB})", " "),
];

static FRENCH_RULES: LazyLock<ModeRules> = LazyLock::new(|| {
    ModeRules::compile(FRENCH_PRE_RULES, FRENCH_POST_RULES)
        .expect("built-in French rules must compile")
});

fn french_rules() -> &'static ModeRules {
    &FRENCH_RULES
}

static ENGLISH: ModeCaps = ModeCaps {
    id: "english",
    description: "This mode capitalises almost all words, with some words (mainly articles \
                  and short prepositions) lowercased. Some words may need to be manually \
                  capitalised to follow the {url|English capitalisation guidelines}.",
    url: "https://musicbrainz.org/doc/Style/Language/English",
    sentence_caps: false,
    rules: no_rules,
    do_word: decline,
};

static FRENCH: ModeCaps = ModeCaps {
    id: "french",
    description: "This mode capitalises titles as sentence mode, but also inserts spaces \
                  before semicolons, colons, exclamation marks and question marks, and inside \
                  guillemets. Some words may need to be manually capitalised to follow the \
                  {url|French capitalisation guidelines}.",
    url: "https://musicbrainz.org/doc/Style/Language/French",
    sentence_caps: true,
    rules: french_rules,
    do_word: decline,
};

static SENTENCE: ModeCaps = ModeCaps {
    id: "sentence",
    description: "This mode capitalises the first word of a sentence, most other words are \
                  lowercased. Some words, often proper nouns, may need to be manually fixed \
                  according to the {url|relevant language guidelines}.",
    url: "https://musicbrainz.org/doc/Style/Language",
    sentence_caps: true,
    rules: no_rules,
    do_word: decline,
};
