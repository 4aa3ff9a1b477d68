// SPDX-FileCopyrightText: 2025 Guesscase contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! The casing pass.
//!
//! Walks the tokens of a title once, left to right, deciding the case of
//! every word from the word tables and the running [`CasingContext`], and
//! laying out spaces around punctuation:
//!
//! - no space after an opening bracket or «
//! - no space before a closing bracket, », or `, . : ; ! ?`
//! - a space before an opening bracket glued to a word
//! - single spaces everywhere else whitespace was typed

use super::Warning;
use super::classify::{WordClassifier, is_contraction_suffix, is_roman_numeral};
use super::context::{CasingContext, corresponding_bracket, is_closing_bracket, is_opening_bracket};
use super::mode::ModeCaps;
use super::tokens::Token;

const LEFT_GUILLEMET: char = '\u{00AB}';
const RIGHT_GUILLEMET: char = '\u{00BB}';

fn is_apostrophe(ch: char) -> bool {
    ch == '\'' || ch == '\u{2019}'
}

/// Decides the case of words for one mode.
#[derive(Debug, Clone, Copy)]
pub struct Casing<'a> {
    pub caps: &'a ModeCaps,
    pub classifier: WordClassifier,
    /// Leave words typed in all capitals alone.
    pub keep_uppercase: bool,
}

impl<'a> Casing<'a> {
    pub fn new(caps: &'a ModeCaps, classifier: WordClassifier, keep_uppercase: bool) -> Self {
        Self {
            caps,
            classifier,
            keep_uppercase,
        }
    }

    /// Cases `tokens` and joins them into the output title.
    ///
    /// Brackets still open at the end are reported and closed.
    pub fn case_title(&self, tokens: &[Token], ctx: &mut CasingContext) -> String {
        let mut out = String::new();
        let mut position = 0;

        for (i, token) in tokens.iter().enumerate() {
            match token {
                Token::Space => {
                    ctx.acronym_active = false;
                    ctx.number_split_expect = false;
                    ctx.apostrophe = false;
                    if !out.is_empty() && !out.ends_with(is_opening) {
                        ctx.space_next_word = true;
                    }
                    position += 1;
                }
                Token::Punct(ch) => {
                    self.punct(*ch, tokens, i, position, ctx, &mut out);
                    position += 1;
                }
                Token::Word(word) => {
                    if ctx.space_next_word {
                        out.push(' ');
                        ctx.space_next_word = false;
                    }
                    let cased = self.case_word(word, tokens, i, out.is_empty(), ctx);
                    out.push_str(&cased);
                    position += word.chars().count();
                }
            }
        }

        if ctx.is_inside_brackets() {
            let open = ctx.open_brackets.clone();
            ctx.warn(Warning::UnclosedBrackets { open: open.clone() });
            for bracket in open.into_iter().rev() {
                if let Some(close) = corresponding_bracket(bracket) {
                    out.push(close);
                }
            }
            ctx.open_brackets.clear();
        }

        out
    }

    fn punct(
        &self,
        ch: char,
        tokens: &[Token],
        i: usize,
        position: usize,
        ctx: &mut CasingContext,
        out: &mut String,
    ) {
        let number_separator = self.is_number_separator(ch, tokens, i, ctx);
        if !number_separator {
            ctx.number_split_expect = false;
        }
        let glued_apostrophe = is_apostrophe(ch)
            && i > 0
            && tokens[i - 1].word().is_some()
            && tokens.get(i + 1).and_then(Token::word).is_some();
        ctx.apostrophe = glued_apostrophe;
        if ch != '.' {
            ctx.acronym_active = false;
        }

        if is_opening_bracket(ch) || ch == LEFT_GUILLEMET {
            if ctx.space_next_word
                || out.ends_with(|c: char| c.is_alphanumeric() || is_closing_bracket(c))
            {
                out.push(' ');
            }
            out.push(ch);
            if ch != LEFT_GUILLEMET {
                ctx.push_bracket(ch);
            }
            ctx.space_next_word = false;
            ctx.force_caps_next = true;
            return;
        }

        if is_closing_bracket(ch) {
            ctx.space_next_word = false;
            out.push(ch);
            if ctx.pop_bracket(ch, position) && !ctx.is_inside_brackets() {
                ctx.reset_series_number_flags();
            }
            return;
        }

        match ch {
            ',' | '.' | ':' | ';' | '!' | '?' | RIGHT_GUILLEMET => {
                ctx.space_next_word = false;
                out.push(ch);
                let ends_sentence = match ch {
                    '.' => {
                        !(number_separator
                            || ctx.acronym_active
                            || self.is_decimal_point(tokens, i)
                            || follows_featuring(tokens, i))
                    }
                    ':' | '!' | '?' => true,
                    _ => false,
                };
                if ends_sentence {
                    ctx.force_caps_next = true;
                    ctx.feat = false;
                }
            }
            _ => {
                if ctx.space_next_word {
                    out.push(' ');
                    ctx.space_next_word = false;
                }
                out.push(ch);
                if ch == '-' && !self.caps.sentence_caps {
                    ctx.force_caps_next = true;
                }
                // "artist - title": the featured list ends at a spaced dash
                if ch == '-'
                    && i > 0
                    && tokens[i - 1].is_space()
                    && tokens.get(i + 1).is_some_and(Token::is_space)
                {
                    ctx.feat = false;
                }
            }
        }
    }

    /// Checks whether `ch` groups the digits of a number ("1,000"). The
    /// first separator seen this way sticks for the rest of the title.
    fn is_number_separator(
        &self,
        ch: char,
        tokens: &[Token],
        i: usize,
        ctx: &mut CasingContext,
    ) -> bool {
        if !matches!(ch, ',' | '.') || !ctx.number_split_expect {
            return false;
        }
        let next_is_group = tokens
            .get(i + 1)
            .is_some_and(|t| t.is_digits() && t.word().is_some_and(|w| w.len() == 3));
        if !next_is_group {
            return false;
        }
        match ctx.number_split_char {
            None => {
                ctx.number_split_char = Some(ch);
                true
            }
            Some(split) => split == ch,
        }
    }

    fn is_decimal_point(&self, tokens: &[Token], i: usize) -> bool {
        i > 0 && tokens[i - 1].is_digits() && tokens.get(i + 1).is_some_and(Token::is_digits)
    }

    fn case_word(
        &self,
        word: &str,
        tokens: &[Token],
        i: usize,
        at_start: bool,
        ctx: &mut CasingContext,
    ) -> String {
        if let Some(custom) = (self.caps.do_word)(word, ctx) {
            ctx.force_caps_next = false;
            ctx.apostrophe = false;
            return custom;
        }

        if tokens[i].is_digits() {
            ctx.number_split_expect = true;
            ctx.apostrophe = false;
            ctx.acronym_active = false;
            ctx.part = false;
            ctx.volume = false;
            return word.to_string();
        }
        ctx.number_split_expect = false;

        let force = std::mem::take(&mut ctx.force_caps_next);
        let after_apostrophe = std::mem::take(&mut ctx.apostrophe);

        if after_apostrophe && is_contraction_suffix(word) {
            return word.to_lowercase();
        }

        if self.is_acronym_letter(word, tokens, i, ctx) {
            ctx.acronym_active = true;
            return word.to_uppercase();
        }
        ctx.acronym_active = false;

        let series_number = (ctx.part || ctx.volume) && is_roman_numeral(word);
        let lower = word.to_lowercase();
        ctx.part = matches!(lower.as_str(), "part" | "parts");
        ctx.volume = matches!(lower.as_str(), "volume" | "vol");
        if series_number {
            return word.to_uppercase();
        }

        if lower == "feat" || lower == "ft" {
            ctx.feat = true;
            let feat = if at_start { "Feat" } else { "feat" };
            return if tokens.get(i + 1).is_some_and(|t| t.is_punct('.')) {
                feat.to_string()
            } else {
                format!("{feat}.")
            };
        }

        if self.keep_uppercase && is_all_caps(word) {
            return word.to_string();
        }
        if self.classifier.is_uppercase(word) {
            return word.to_uppercase();
        }
        // the pronoun "I"
        if lower == "i" {
            return "I".to_string();
        }
        if force {
            return capitalize_first(word);
        }
        if self.caps.sentence_caps {
            // featured artist names keep their capital
            if ctx.feat {
                return capitalize_first(word);
            }
            return lower;
        }
        if self.classifier.is_lowercase(word) {
            return lower;
        }
        capitalize_first(word)
    }

    /// A single letter between periods, as in "R.E.M." or "a.b.".
    fn is_acronym_letter(
        &self,
        word: &str,
        tokens: &[Token],
        i: usize,
        ctx: &CasingContext,
    ) -> bool {
        if !is_single_letter(word) {
            return false;
        }
        if ctx.acronym_active && i > 0 && tokens[i - 1].is_punct('.') {
            return true;
        }
        tokens.get(i + 1).is_some_and(|t| t.is_punct('.'))
            && tokens
                .get(i + 2)
                .and_then(Token::word)
                .is_some_and(is_single_letter)
    }
}

fn is_opening(ch: char) -> bool {
    is_opening_bracket(ch) || ch == LEFT_GUILLEMET
}

fn is_single_letter(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

fn is_all_caps(word: &str) -> bool {
    let mut letters = word.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && word.chars().count() > 1 && letters.all(char::is_uppercase)
}

/// Returns true if the token before `i` is a "feat"/"ft" abbreviation.
fn follows_featuring(tokens: &[Token], i: usize) -> bool {
    i > 0
        && tokens[i - 1]
            .word()
            .is_some_and(|w| w.eq_ignore_ascii_case("feat") || w.eq_ignore_ascii_case("ft"))
}

/// Capitalize the first letter of a word and lowercase the rest.
fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut result = first.to_uppercase().to_string();
            result.push_str(&chars.as_str().to_lowercase());
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mode::{Mode, ModeRules};
    use crate::engine::tokens::tokenize;

    fn case_with(mode: Mode, roman: bool, text: &str) -> (String, CasingContext) {
        let casing = Casing::new(mode.caps(), WordClassifier::new(roman), false);
        let mut ctx = CasingContext::new();
        let output = casing.case_title(&tokenize(text), &mut ctx);
        (output, ctx)
    }

    fn case(mode: Mode, text: &str) -> String {
        case_with(mode, true, text).0
    }

    #[test]
    fn test_english_title_case() {
        assert_eq!(
            case(Mode::English, "the lord of the rings"),
            "The Lord of the Rings"
        );
    }

    #[test]
    fn test_sentence_case() {
        assert_eq!(
            case(Mode::Sentence, "The Lord Of The Rings"),
            "The lord of the rings"
        );
    }

    #[test]
    fn test_uppercase_words() {
        assert_eq!(case(Mode::English, "dj shadow on mtv"), "DJ Shadow on MTV");
        assert_eq!(case(Mode::Sentence, "live on bbc radio"), "Live on BBC radio");
    }

    #[test]
    fn test_first_word_capitalized_even_if_lowercase_word() {
        assert_eq!(case(Mode::English, "a day in the life"), "A Day in the Life");
    }

    #[test]
    fn test_roman_numerals_option() {
        assert_eq!(case_with(Mode::English, true, "rocky iv").0, "Rocky IV");
        assert_eq!(case_with(Mode::English, false, "rocky iv").0, "Rocky Iv");
    }

    #[test]
    fn test_series_number_roman_numeral() {
        assert_eq!(case_with(Mode::English, false, "suite part iv").0, "Suite Part IV");
    }

    #[test]
    fn test_capitals_after_opening_bracket() {
        assert_eq!(
            case(Mode::Sentence, "song (live version)"),
            "Song (Live version)"
        );
    }

    #[test]
    fn test_capitals_after_sentence_end() {
        assert_eq!(case(Mode::Sentence, "stop! in the name"), "Stop! In the name");
        assert_eq!(case(Mode::Sentence, "intro: the end"), "Intro: The end");
    }

    #[test]
    fn test_hyphen_capitalizes_in_title_case_only() {
        assert_eq!(case(Mode::English, "down-n-dirty"), "Down-N-Dirty");
        assert_eq!(case(Mode::Sentence, "hip-hop hooray"), "Hip-hop hooray");
    }

    #[test]
    fn test_contractions() {
        assert_eq!(case(Mode::English, "don't stop"), "Don't Stop");
        assert_eq!(case(Mode::English, "greatest 80's hits"), "Greatest 80's Hits");
        assert_eq!(case(Mode::English, "i'm here"), "I'm Here");
    }

    #[test]
    fn test_quote_not_contraction() {
        assert_eq!(case(Mode::English, "rock 'n' roll"), "Rock 'n' Roll");
    }

    #[test]
    fn test_acronym() {
        assert_eq!(case(Mode::Sentence, "songs by r.e.m. today"), "Songs by R.E.M. today");
    }

    #[test]
    fn test_featuring() {
        assert_eq!(case(Mode::English, "song ft artist"), "Song feat. Artist");
        assert_eq!(case(Mode::English, "song feat. artist"), "Song feat. Artist");
        assert_eq!(
            case(Mode::Sentence, "song (feat. john smith)"),
            "Song (feat. John Smith)"
        );
    }

    #[test]
    fn test_featuring_ends_with_sentence_or_spaced_dash() {
        assert_eq!(
            case(Mode::Sentence, "song feat. artist - the end of time"),
            "Song feat. Artist - the end of time"
        );
        assert_eq!(
            case(Mode::Sentence, "song ft artist. the end"),
            "Song feat. Artist. The end"
        );
    }

    #[test]
    fn test_spacing_around_punctuation() {
        assert_eq!(
            case(Mode::English, "hello , world ( live ) !"),
            "Hello, World (Live)!"
        );
        assert_eq!(case(Mode::English, "track(remix)"), "Track (Remix)");
    }

    #[test]
    fn test_keep_uppercase() {
        let casing = Casing::new(Mode::Sentence.caps(), WordClassifier::new(true), true);
        let mut ctx = CasingContext::new();
        let output = casing.case_title(&tokenize("ABBA GOLD hits"), &mut ctx);
        assert_eq!(output, "ABBA GOLD hits");
    }

    #[test]
    fn test_unclosed_bracket_is_closed() {
        let (output, ctx) = case_with(Mode::English, true, "song (live [remix");
        assert_eq!(output, "Song (Live [Remix])");
        assert_eq!(
            ctx.warnings,
            vec![Warning::UnclosedBrackets {
                open: vec!['(', '[']
            }]
        );
        assert!(ctx.open_brackets.is_empty());
    }

    #[test]
    fn test_stray_closing_bracket_kept_as_text() {
        let (output, ctx) = case_with(Mode::English, true, "song) live");
        assert_eq!(output, "Song) Live");
        assert_eq!(
            ctx.warnings,
            vec![Warning::UnmatchedClosingBracket {
                bracket: ')',
                position: 4
            }]
        );
    }

    #[test]
    fn test_number_split_char_sticks() {
        let (output, ctx) = case_with(Mode::Sentence, true, "top 1,000 hits and 2.000 more");
        assert_eq!(output, "Top 1,000 hits and 2.000 more");
        assert_eq!(ctx.number_split_char, Some(','));
    }

    #[test]
    fn test_number_separator_does_not_end_sentence() {
        let (output, ctx) = case_with(Mode::Sentence, true, "top 1.000 hits");
        assert_eq!(output, "Top 1.000 hits");
        assert_eq!(ctx.number_split_char, Some('.'));
    }

    #[test]
    fn test_sentence_stop_after_mismatched_separator() {
        let (output, ctx) = case_with(Mode::Sentence, true, "from 1,000 to 2.000. then more");
        assert_eq!(output, "From 1,000 to 2.000. Then more");
        assert_eq!(ctx.number_split_char, Some(','));
    }

    #[test]
    fn test_mode_hook_claims_words() {
        fn shout(word: &str, _ctx: &CasingContext) -> Option<String> {
            word.eq_ignore_ascii_case("hey").then(|| "HEY!".to_string())
        }
        fn no_rules() -> &'static ModeRules {
            static RULES: std::sync::LazyLock<ModeRules> =
                std::sync::LazyLock::new(ModeRules::default);
            &RULES
        }
        let caps = ModeCaps {
            id: "shout",
            description: "",
            url: "",
            sentence_caps: false,
            rules: no_rules,
            do_word: shout,
        };
        let casing = Casing::new(&caps, WordClassifier::new(true), false);
        let mut ctx = CasingContext::new();
        let output = casing.case_title(&tokenize("hey there"), &mut ctx);
        assert_eq!(output, "HEY! There");
    }
}
