//! Named pattern-rewrite rules and the built-in fix lists.
//!
//! A rule replaces a match with its replacement template, re-splicing the
//! text captured by the first and last groups around it so that delimiters
//! matched at the edges (whitespace, brackets, line boundaries) survive.
//! Only the template itself expands `${n}` group references.

use std::sync::LazyLock;

use regex::{Captures, Regex, RegexBuilder};

use super::Warning;

/// A rule as written in a fix list, before its pattern is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDef {
    pub name: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
    /// Replace every match, again and again until nothing matches.
    pub repeat: bool,
    pub case_insensitive: bool,
}

/// A case-insensitive rule that replaces the first match only.
const fn fix(name: &'static str, pattern: &'static str, replacement: &'static str) -> RuleDef {
    RuleDef {
        name,
        pattern,
        replacement,
        repeat: false,
        case_insensitive: true,
    }
}

impl RuleDef {
    pub const fn repeat(self) -> Self {
        Self {
            repeat: true,
            ..self
        }
    }

    pub const fn case_sensitive(self) -> Self {
        Self {
            case_insensitive: false,
            ..self
        }
    }
}

/// Error building a rule.
#[derive(Debug, Clone)]
pub enum RuleError {
    /// The rule has no name to report faults by.
    EmptyName,
    /// The rule's pattern does not compile.
    Pattern { name: String, source: regex::Error },
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleError::EmptyName => write!(f, "rule name must not be empty"),
            RuleError::Pattern { name, source } => {
                write!(f, "invalid pattern in rule '{}': {}", name, source)
            }
        }
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuleError::EmptyName => None,
            RuleError::Pattern { source, .. } => Some(source),
        }
    }
}

/// A repeating rule may grow the text to this many times its input length.
pub const MAX_GROWTH: usize = 4;

/// Inputs shorter than this many bytes are bounded as if they were this long.
const MIN_GROWTH_BASE: usize = 64;

/// A compiled rewrite rule.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    regex: Regex,
    replacement: String,
    repeat: bool,
}

impl Rule {
    /// Compiles a rule.
    pub fn new(
        name: &str,
        pattern: &str,
        replacement: &str,
        repeat: bool,
        case_insensitive: bool,
    ) -> Result<Self, RuleError> {
        if name.trim().is_empty() {
            return Err(RuleError::EmptyName);
        }
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|source| RuleError::Pattern {
                name: name.to_string(),
                source,
            })?;
        Ok(Self {
            name: name.to_string(),
            regex,
            replacement: replacement.to_string(),
            repeat,
        })
    }

    pub fn from_def(def: &RuleDef) -> Result<Self, RuleError> {
        Self::new(
            def.name,
            def.pattern,
            def.replacement,
            def.repeat,
            def.case_insensitive,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    /// Applies the rule to `text`.
    ///
    /// A repeating rule runs until its pattern no longer matches or a pass
    /// leaves the text unchanged. It runs at most once per input character
    /// plus one, and stops before the text grows past [`MAX_GROWTH`] times
    /// its input length. Hitting either bound records a
    /// [`Warning::MalformedRule`] and returns the text as rewritten so far.
    pub fn apply(&self, text: &str, warnings: &mut Vec<Warning>) -> String {
        if !self.repeat {
            let output = self
                .regex
                .replacen(text, 1, |caps: &Captures| self.splice(caps))
                .into_owned();
            if output != text {
                log::debug!("rule {:?} fired", self.name);
            }
            return output;
        }

        let limit = text.chars().count() + 1;
        let max_len = text.len().max(MIN_GROWTH_BASE) * MAX_GROWTH;
        let mut current = text.to_string();
        let mut passes = 0;
        while self.regex.is_match(&current) {
            if passes == limit {
                log::warn!("rule {:?} still matches after {} passes", self.name, passes);
                self.report_malformed(warnings);
                break;
            }
            let next = self
                .regex
                .replace_all(&current, |caps: &Captures| self.splice(caps))
                .into_owned();
            if next == current {
                break;
            }
            if next.len() > max_len {
                log::warn!(
                    "rule {:?} grew the text to {} bytes after {} passes",
                    self.name,
                    next.len(),
                    passes + 1
                );
                self.report_malformed(warnings);
                break;
            }
            current = next;
            passes += 1;
        }
        if passes > 0 {
            log::debug!("rule {:?} fired {} time(s)", self.name, passes);
        }
        current
    }

    fn report_malformed(&self, warnings: &mut Vec<Warning>) {
        warnings.push(Warning::MalformedRule {
            rule: self.name.clone(),
        });
    }

    fn splice(&self, caps: &Captures) -> String {
        let groups = caps.len() - 1;
        let group_text = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        let mut output = String::new();
        if groups >= 1 {
            output.push_str(group_text(1));
        }
        caps.expand(&self.replacement, &mut output);
        if groups >= 2 {
            output.push_str(group_text(groups));
        }
        output
    }
}

/// Compiles a fix list.
pub fn compile(defs: &[RuleDef]) -> Result<Vec<Rule>, RuleError> {
    defs.iter().map(Rule::from_def).collect()
}

/// Applies each rule in order.
pub fn apply_rules(text: &str, rules: &[Rule], warnings: &mut Vec<Warning>) -> String {
    rules
        .iter()
        .fold(text.to_string(), |current, rule| rule.apply(&current, warnings))
}

/// Misspellings and abbreviations fixed before the title is split into words.
pub const PREPROCESS_FIXLIST: &[RuleDef] = &[
    // trim spaces from brackets
    fix(
        "spaces after opening brackets",
        r"(^|\s)([(\{\[])\s+($|\b)",
        "${2}",
    ),
    fix(
        "spaces before closing brackets",
        r"(\b|^)\s+([)\}\]])($|\b)",
        "${2}",
    ),
    // remix variants
    fix("re-mix -> remix", r"(\b|^)re-mix(\b)", "remix"),
    fix("re-mix -> remix", r"(\b|^)re-mix(\b)", "remix"),
    fix("remx -> remix", r"(\b|^)remx(\b)", "remix"),
    fix("re-mixes -> remixes", r"(\b|^)re-mixes(\b)", "remixes"),
    fix("re-make -> remake", r"(\b|^)re-make(\b)", "remake"),
    fix("re-makes -> remakes", r"(\b|^)re-makes(\b)", "remakes"),
    fix("re-edit variants", r"(\b|^)re-?edit(\b)", "re_edit"),
    fix("RMX -> remix", r"(\b|^)RMX(\b)", "remix"),
    // extra title information
    fix("alt.take -> alternate take", r"(\b|^)alt\.? take(\b)", "alternate take"),
    fix("instr. -> instrumental", r"(\b|^)instr\.?(\s|\)|$)", "instrumental"),
    fix("altern. -> alternate", r"(\b|^)altern\.?(\s|\)|$)", "alternate"),
    fix("orig. -> original", r"(\b|^)orig\.?(\s|\)|$)", "original"),
    fix("ver(s). -> version", r"(\b|^)vers?\.(\s|\)|$)", "version"),
    fix("Extendet -> extended", r"(\b|^)Extendet(\b)", "extended"),
    fix("extd. -> extended", r"(\b|^)extd?\.?(\s|\)|$)", "extended"),
    // featuring variants
    fix("/w -> ft.", r"(\s)/w(\s)", "ft."),
    fix("f. -> ft.", r"(\s)f\.(\s)", "ft."),
    fix("f/ -> ft.", r"(\s)f/(\s)", "ft."),
    fix("featuring - -> feat", r"(\s)featuring -(\s)", "feat"),
    fix("w/o -> without", r"(\b|^)w/o(\b)", "without"),
    // vinyl
    fix("12'' -> 12\"", r"(\s|^|\()(\d+)''(\s|$)", "${2}\""),
    fix("12in -> 12\"", r"(\s|^|\()(\d+)in(ch)?(\s|$)", "${2}\""),
    // Multi-word terms are joined with underscores so they survive the
    // casing pass as one word; the post-process list splits them again.
    fix("a cappella", r"(\b|^)a\s?c+ap+el+a(\b)", "a_cappella"),
    fix("OC ReMix", r"(\b|^)oc\sremix(\b)", "oc_remix"),
    fix("aka -> a.k.a.", r"(\b|^)aka(\b)", "a_k_a_").repeat(),
    fix("a/k/a -> a.k.a.", r"(\b|^)a/k/a(\b)", "a_k_a_").repeat(),
    fix("a.k.a.", r"(\b|^)a\.k\.a\.(\s)", "a_k_a_").repeat(),
    // part and volume abbreviations
    fix("standalone Pt. -> Part", r"(^|\s)Pt\.?(\s|$)", "Part"),
    fix("standalone Pts. -> Parts", r"(^|\s)Pts\.(\s|$)", "Parts"),
    fix("standalone Vol. -> Volume", r"(^|\s)Vol\.(\s|$)", "Volume"),
    fix(
        "Pt -> Part",
        r"((,|\s|:|!)+)\s*(Part|Pt)[.\s#]*((\d|[ivx]|[\-,&\s])+)(\s|:|$)",
        "Part ${4}",
    ),
    fix(
        "Pts -> Parts",
        r"((,|\s|:|!)+)\s*(Parts|Pts)[.\s#]*((\d|[ivx]|[\-&,\s])+)(\s|:|$)",
        "Parts ${4}",
    ),
    fix(
        "Vol -> Volume",
        r"((,|\s|:|!)+)\s*(Volume|Vol)[.\s#]*((\d|[ivx]|[\-&,\s])+)(\s|:|$)",
        "Volume ${4}",
    ),
    fix(
        "(Pt) -> Part",
        r"((,|\s|:|!)+)([(\[])\s*(Part|Pt)[.\s#]*((\d|[ivx]|[\-,&\s])+)([)\]])(\s|:|$)",
        "Part ${5}",
    ),
    fix(
        "(Pts) -> Parts",
        r"((,|\s|:|!)+)([(\[])\s*(Parts|Pts)[.\s#]*((\d|[ivx]|[\-&,\s])+)([)\]])(\s|:|$)",
        "Parts ${5}",
    ),
    fix(
        "(Vol) -> Volume",
        r"((,|\s|:|!)+)([(\[])\s*(Volume|Vol)[.\s#]*((\d|[ivx]|[\-&,\s])+)([)\]])(\s|:|$)",
        "Volume ${5}",
    ),
    fix(": Part -> , part", r"(\b|^): Part(\b)", ", part"),
    fix(": Parts -> , parts", r"(\b|^): Parts(\b)", ", parts"),
];

/// Minor fixes applied to the cased title.
pub const POSTPROCESS_FIXLIST: &[RuleDef] = &[
    fix("a_cappella lowercase", r"(\b|^)a_cappella(\b)", "a cappella")
        .case_sensitive()
        .repeat(),
    fix("a_cappella capitalized", r"(\b|^)A_cappella(\b)", "A Cappella")
        .case_sensitive()
        .repeat(),
    fix("oc_remix", r"(\b|^)oc_remix(\b)", "OC ReMix").repeat(),
    fix("re_edit capitalized", r"(\b|^)Re_edit(\b)", "Re-edit")
        .case_sensitive()
        .repeat(),
    fix("re_edit lowercase", r"(\b|^)re_edit(\b)", "re-edit")
        .case_sensitive()
        .repeat(),
    fix("a.k.a. lowercase", r"(\b|^)a_k_a_(\b|$)", "a.k.a.").repeat(),
    // "fe" is a lowercase word, but "Santa Fe" is common in song titles.
    fix("Santa Fe", r"(\b|^)Santa fe(\b|$)", "Santa Fe")
        .case_sensitive()
        .repeat(),
    fix("whitespace in R&B", r"(\b|^)R\s*&\s*B(\b)", "R&B"),
    fix("[live] -> (Live)", r"(^|\s)\[live\](\s|$)", "(Live)"),
    fix("Djs -> DJs", r"(\b|^)Djs(\b)", "DJs"),
    fix("Rock 'n' Roll", r"(\s|^)Rock '?n'? Roll(\s|$)", "Rock 'n' Roll"),
];

/// The built-in fix lists, compiled on first use.
#[derive(Debug)]
pub struct RuleBook {
    pub pre: Vec<Rule>,
    pub post: Vec<Rule>,
}

impl RuleBook {
    pub fn compile(pre: &[RuleDef], post: &[RuleDef]) -> Result<Self, RuleError> {
        Ok(Self {
            pre: compile(pre)?,
            post: compile(post)?,
        })
    }
}

static BUILTIN: LazyLock<RuleBook> = LazyLock::new(|| {
    RuleBook::compile(PREPROCESS_FIXLIST, POSTPROCESS_FIXLIST)
        .expect("built-in fix lists must compile")
});

/// Returns the built-in pre- and post-process fix lists.
pub fn builtin() -> &'static RuleBook {
    &BUILTIN
}
