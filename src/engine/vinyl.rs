//! Record size notation.
//!
//! `7in`, `10inch`, `12'`, `12''` and `12"` all become `12"`, and a quote mark
//! glued to the following word gets a space after it. Only sizes that start a
//! word (after whitespace or an opening parenthesis) are touched, and a size
//! followed by a bare `s` is left alone so "80's"-style decades never match.

use std::sync::OnceLock;

use regex::Regex;

/// Normalizes vinyl record sizes in `text`.
///
/// # Examples
///
/// Original: `Fine Day (Mike Koglin 12' mix)` becomes `Fine Day (Mike Koglin 12" mix)`.
/// Original: `Where Love Lives (12"Classic mix)` becomes `Where Love Lives (12" Classic mix)`.
pub fn normalize(text: &str) -> String {
    static SIZE: OnceLock<Regex> = OnceLock::new();
    static GLUED: OnceLock<Regex> = OnceLock::new();

    let size = SIZE
        .get_or_init(|| Regex::new(r#"(?i)(\s+|\()(7|10|12)(?:inch\b|in\b|''|'|")"#).unwrap());
    let glued = GLUED.get_or_init(|| Regex::new(r#"((?:\s+|\()(?:7|10|12)")([^),\s])"#).unwrap());

    let mut sized = String::with_capacity(text.len());
    let mut last = 0;
    for caps in size.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        // 80's, 12's: a decade or plural, not a record size
        if text[whole.end()..].starts_with(['s', 'S']) {
            continue;
        }
        sized.push_str(&text[last..whole.start()]);
        sized.push_str(&caps[1]);
        sized.push_str(&caps[2]);
        sized.push('"');
        last = whole.end();
    }
    sized.push_str(&text[last..]);

    glued.replace_all(&sized, "${1} ${2}").into_owned()
}
