//! Splitting titles into words, punctuation, and whitespace.

/// Characters that always form a token of their own.
const PUNCTUATION: &[char] = &[
    '!', '\u{00BF}', '\u{00A1}', '"', '%', '&', '\'', '\u{00B4}', '`', '\u{2018}', '\u{2019}',
    '\u{2039}', '\u{203A}', '\u{201C}', '\u{201D}', '\u{201E}', '\u{00AB}', '\u{00BB}', '(', ')',
    '[', ']', '{', '}', '*', '+', ',', '-', '.', '/', ':', ';', '<', '=', '>', '?', '#',
];

/// A piece of a title as seen by the casing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of characters that are neither whitespace nor punctuation.
    Word(String),
    /// A single punctuation character.
    Punct(char),
    /// A run of whitespace, collapsed to a single space.
    Space,
}

impl Token {
    /// Returns the word text, if this is a word.
    pub fn word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            _ => None,
        }
    }

    pub fn is_space(&self) -> bool {
        matches!(self, Token::Space)
    }

    pub fn is_punct(&self, ch: char) -> bool {
        matches!(self, Token::Punct(c) if *c == ch)
    }

    /// Returns true if this is a word made only of ASCII digits.
    pub fn is_digits(&self) -> bool {
        self.word()
            .is_some_and(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_digit()))
    }
}

/// Returns true if the character is split off as a punctuation token.
pub fn is_punctuation(ch: char) -> bool {
    PUNCTUATION.contains(&ch)
}

/// Splits a title into tokens.
///
/// Leading and trailing whitespace is dropped and inner runs of whitespace
/// become a single [`Token::Space`].
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            flush_word(&mut tokens, &mut word);
            if !matches!(tokens.last(), Some(Token::Space)) {
                tokens.push(Token::Space);
            }
        } else if is_punctuation(ch) {
            flush_word(&mut tokens, &mut word);
            tokens.push(Token::Punct(ch));
        } else {
            word.push(ch);
        }
    }
    flush_word(&mut tokens, &mut word);

    tokens
}

fn flush_word(tokens: &mut Vec<Token>, word: &mut String) {
    if !word.is_empty() {
        tokens.push(Token::Word(std::mem::take(word)));
    }
}

/// Joins tokens back into text without any case or spacing changes.
pub fn join(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Word(w) => out.push_str(w),
            Token::Punct(c) => out.push(*c),
            Token::Space => out.push(' '),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(w: &str) -> Token {
        Token::Word(w.to_string())
    }

    #[test]
    fn test_tokenize_words_and_spaces() {
        assert_eq!(
            tokenize("  hello   world "),
            vec![word("hello"), Token::Space, word("world")]
        );
    }

    #[test]
    fn test_tokenize_punctuation() {
        assert_eq!(
            tokenize("Down-N-Dirty"),
            vec![
                word("Down"),
                Token::Punct('-'),
                word("N"),
                Token::Punct('-'),
                word("Dirty")
            ]
        );
    }

    #[test]
    fn test_tokenize_keeps_underscores_in_words() {
        assert_eq!(tokenize("a_cappella"), vec![word("a_cappella")]);
    }

    #[test]
    fn test_tokenize_apostrophe() {
        assert_eq!(
            tokenize("80's"),
            vec![word("80"), Token::Punct('\''), word("s")]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_join_round_trips_normalized_whitespace() {
        assert_eq!(join(&tokenize(" My  Track (12\" mix) ")), "My Track (12\" mix)");
    }

    #[test]
    fn test_is_digits() {
        assert!(word("1000").is_digits());
        assert!(!word("4th").is_digits());
        assert!(!Token::Space.is_digits());
    }
}
