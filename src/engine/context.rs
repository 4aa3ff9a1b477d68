//! Per-call casing state.

use super::Warning;

/// Returns the bracket that pairs with `ch`, if `ch` is a bracket.
pub fn corresponding_bracket(ch: char) -> Option<char> {
    match ch {
        '(' => Some(')'),
        ')' => Some('('),
        '[' => Some(']'),
        ']' => Some('['),
        '{' => Some('}'),
        '}' => Some('{'),
        '<' => Some('>'),
        '>' => Some('<'),
        _ => None,
    }
}

pub fn is_opening_bracket(ch: char) -> bool {
    matches!(ch, '(' | '[' | '{' | '<')
}

pub fn is_closing_bracket(ch: char) -> bool {
    matches!(ch, ')' | ']' | '}' | '>')
}

/// State of one casing pass. Created fresh for every title and dropped when
/// the title is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasingContext {
    /// Capitalize the next word whatever its classification. Starts set
    /// because the first word is always capitalized.
    pub force_caps_next: bool,
    /// Whitespace was seen since the last emitted token.
    pub space_next_word: bool,
    /// Opening brackets not yet closed, innermost last.
    pub open_brackets: Vec<char>,
    /// Inside a dotted acronym such as "R.E.M.".
    pub acronym_active: bool,
    /// The separator of the first digit group seen ("1,000" or "1.000").
    /// Never cleared within a title: mixed numeric grammars are not supported.
    pub number_split_char: Option<char>,
    /// The previous token was a number, so a separator may follow.
    pub number_split_expect: bool,
    /// The next word follows an in-word apostrophe ("don't", "80's").
    pub apostrophe: bool,
    /// A "part" marker was seen; a roman numeral may follow.
    pub part: bool,
    /// A "volume" marker was seen; a roman numeral may follow.
    pub volume: bool,
    /// Inside a featured-artist list.
    pub feat: bool,
    /// Non-fatal faults found so far.
    pub warnings: Vec<Warning>,
}

impl Default for CasingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CasingContext {
    pub fn new() -> Self {
        Self {
            force_caps_next: true,
            space_next_word: false,
            open_brackets: Vec::new(),
            acronym_active: false,
            number_split_char: None,
            number_split_expect: false,
            apostrophe: false,
            part: false,
            volume: false,
            feat: false,
            warnings: Vec::new(),
        }
    }

    pub fn is_inside_brackets(&self) -> bool {
        !self.open_brackets.is_empty()
    }

    pub fn push_bracket(&mut self, bracket: char) {
        self.open_brackets.push(bracket);
    }

    /// Returns the closing bracket expected next, if any bracket is open.
    pub fn current_close_bracket(&self) -> Option<char> {
        self.open_brackets
            .last()
            .and_then(|&open| corresponding_bracket(open))
    }

    /// Closes the innermost bracket with `found`.
    ///
    /// Returns false, recording a warning, if nothing is open or `found` does
    /// not match the innermost opening bracket. The stack is left untouched
    /// in that case.
    pub fn pop_bracket(&mut self, found: char, position: usize) -> bool {
        match self.current_close_bracket() {
            None => {
                self.warn(Warning::UnmatchedClosingBracket {
                    bracket: found,
                    position,
                });
                false
            }
            Some(expected) if expected != found => {
                self.warn(Warning::MismatchedBracket {
                    expected,
                    found,
                    position,
                });
                false
            }
            Some(_) => {
                self.open_brackets.pop();
                true
            }
        }
    }

    pub fn reset_series_number_flags(&mut self) {
        self.part = false;
        self.volume = false;
        self.feat = false;
    }

    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}
