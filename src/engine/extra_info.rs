//! Parenthesizing trailing extra title information.
//!
//! Scans from the end of the title for words that describe a version of the
//! recording and wraps them in parentheses:
//!
//! - `My Track Extended Dub remix` becomes `My Track (Extended Dub remix)`
//! - `My Track 12" remix` becomes `My Track (12" remix)`

use super::classify::{is_bracket_word, is_single_word_exception, is_vinyl_size};
use super::tokens::Token;

fn is_quote_mark(token: &Token) -> bool {
    token.is_punct('"') || token.is_punct('\'')
}

/// Returns true if the token at `i` may be part of a trailing extra
/// information run.
fn continues_run(tokens: &[Token], i: usize) -> bool {
    let token = &tokens[i];
    match token {
        Token::Space => true,
        // the quote of 7" or 12"
        Token::Punct(_) if is_quote_mark(token) => {
            i > 0 && tokens[i - 1].word().is_some_and(is_vinyl_size)
        }
        Token::Word(w) => {
            is_bracket_word(w)
                || (is_vinyl_size(w) && tokens.get(i + 1).is_some_and(is_quote_mark))
        }
        Token::Punct(_) => false,
    }
}

/// Wraps a trailing run of extra title information in parentheses.
///
/// A run consisting of a single word listed in
/// [`SINGLE_WORD_EXCEPTIONS`](super::classify::SINGLE_WORD_EXCEPTIONS) is left
/// alone, as is a title made up of nothing but extra information. An opening
/// parenthesis or hyphen right before the run is replaced by the new opening
/// parenthesis.
pub fn bracket_extra_info(tokens: Vec<Token>) -> Vec<Token> {
    let Some(last) = tokens.len().checked_sub(1) else {
        return tokens;
    };

    // index of the first token of the run
    let mut start = tokens.len();
    while start > 0 && continues_run(&tokens, start - 1) {
        start -= 1;
    }
    if start > last {
        return tokens;
    }
    while start < last && tokens[start].is_space() {
        start += 1;
    }

    if start == last && tokens[last].word().is_some_and(is_single_word_exception) {
        return tokens;
    }
    if start == 0 {
        return tokens;
    }

    let mut head = tokens[..start].to_vec();
    while head.last().is_some_and(Token::is_space) {
        head.pop();
    }
    if head
        .last()
        .is_some_and(|t| t.is_punct('(') || t.is_punct('-'))
    {
        head.pop();
        while head.last().is_some_and(Token::is_space) {
            head.pop();
        }
    }
    if head.is_empty() {
        return tokens;
    }

    log::debug!("bracketing {} trailing token(s)", tokens.len() - start);
    let mut output = head;
    output.push(Token::Space);
    output.push(Token::Punct('('));
    output.extend(tokens[start..].iter().cloned());
    output.push(Token::Punct(')'));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tokens::{join, tokenize};

    fn bracket(text: &str) -> String {
        join(&bracket_extra_info(tokenize(text)))
    }

    #[test]
    fn test_trailing_run_is_bracketed() {
        assert_eq!(
            bracket("My Track Extended Dub Remix"),
            "My Track (Extended Dub Remix)"
        );
    }

    #[test]
    fn test_vinyl_size_joins_run() {
        assert_eq!(bracket("My Track 12\" remix"), "My Track (12\" remix)");
        assert_eq!(bracket("Mike Koglin 12' mix"), "Mike Koglin (12' mix)");
    }

    #[test]
    fn test_single_exception_word_left_alone() {
        assert_eq!(bracket("Down-N-Dirty"), "Down-N-Dirty");
        assert_eq!(bracket("Dance, Dance, Dance"), "Dance, Dance, Dance");
    }

    #[test]
    fn test_single_ordinary_word_bracketed() {
        assert_eq!(bracket("Disco Remix"), "Disco (Remix)");
    }

    #[test]
    fn test_already_bracketed() {
        assert_eq!(bracket("Disco (Remix)"), "Disco (Remix)");
    }

    #[test]
    fn test_dangling_open_paren_replaced() {
        assert_eq!(bracket("Track (Extended Mix"), "Track (Extended Mix)");
    }

    #[test]
    fn test_hyphen_replaced() {
        assert_eq!(bracket("Track - Extended Mix"), "Track (Extended Mix)");
    }

    #[test]
    fn test_whole_title_is_extra_info() {
        assert_eq!(bracket("Extended Remix"), "Extended Remix");
        assert_eq!(bracket("Remix"), "Remix");
    }

    #[test]
    fn test_no_run() {
        assert_eq!(bracket("Le Freak"), "Le Freak");
        assert_eq!(bracket(""), "");
    }
}
