//! Word classification tables.
//!
//! All lookups are case-insensitive on the raw token.

/// Words which are always written lowercase (articles, short prepositions,
/// and conjunctions).
pub const LOWERCASE_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "da", "de", "di", "fe", "fi", "for", "in", "ina",
    "inna", "n", "nor", "o", "of", "on", "or", "tha", "the", "to",
];

/// Words which are always written uppercase (acronyms).
pub const UPPERCASE_WORDS: &[&str] = &[
    "dj", "mc", "tv", "mtv", "ep", "lp", "ymca", "nyc", "ny", "ussr", "usa", "r&b", "bbc", "fm",
    "bc", "ac", "dc", "uk", "bpm", "ok", "nba", "rza", "gza", "odb", "dmx", "2xlc",
];

/// Roman numerals from one to ten.
pub const ROMAN_NUMERALS: &[&str] = &["i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x"];

/// Words describing a version of a recording. A trailing run of these is
/// extra title information and belongs in parentheses.
pub const BRACKET_WORDS: &[&str] = &[
    "a_cappella", "acoustic", "album", "alternate", "bonus", "cd", "clean", "club", "clubmix",
    "dance", "demo", "dirty", "disk", "distorted", "dub", "edit", "excerpt", "excerpts",
    "extended", "instrumental", "interlude", "intro", "karaoke", "live", "long", "main", "maxi",
    "megamix", "mix", "mono", "orchestral", "original", "outro", "outtake", "outtakes",
    "quadraphonic", "radio", "re_edit", "reedit", "reinterpreted", "remake", "remakes", "remix",
    "remixes", "reprise", "rework", "short", "single", "skit", "stereo", "studio", "unplugged",
    "version", "vocal",
];

/// Bracket words that commonly end a real title when they stand alone,
/// e.g. "Down-N-Dirty" or "Dance, Dance, Dance".
pub const SINGLE_WORD_EXCEPTIONS: &[&str] = &[
    "acoustic", "album", "alternate", "bonus", "clean", "club", "dance", "dirty", "distorted",
    "extended", "instrumental", "live", "long", "main", "megamix", "original", "radio", "short",
    "single", "vocal",
];

/// Endings written after an apostrophe inside a word ("don't", "80's").
pub const CONTRACTION_SUFFIXES: &[&str] = &["d", "ll", "m", "re", "s", "t", "ve"];

fn contains_ignore_case(table: &[&str], word: &str) -> bool {
    table.iter().any(|entry| entry.eq_ignore_ascii_case(word))
}

/// Answers case questions about single words under the current options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordClassifier {
    /// Uppercase words that look like roman numerals.
    pub roman_numerals_uppercase: bool,
}

impl WordClassifier {
    pub fn new(roman_numerals_uppercase: bool) -> Self {
        Self {
            roman_numerals_uppercase,
        }
    }

    pub fn is_lowercase(&self, word: &str) -> bool {
        contains_ignore_case(LOWERCASE_WORDS, word)
    }

    pub fn is_uppercase(&self, word: &str) -> bool {
        contains_ignore_case(UPPERCASE_WORDS, word)
            || (self.roman_numerals_uppercase && is_roman_numeral(word))
    }
}

pub fn is_roman_numeral(word: &str) -> bool {
    contains_ignore_case(ROMAN_NUMERALS, word)
}

pub fn is_bracket_word(word: &str) -> bool {
    contains_ignore_case(BRACKET_WORDS, word)
}

pub fn is_single_word_exception(word: &str) -> bool {
    contains_ignore_case(SINGLE_WORD_EXCEPTIONS, word)
}

pub fn is_contraction_suffix(word: &str) -> bool {
    contains_ignore_case(CONTRACTION_SUFFIXES, word)
}

/// Returns true for the record sizes written with a quote mark (7", 10", 12").
pub fn is_vinyl_size(word: &str) -> bool {
    matches!(word, "7" | "10" | "12")
}
