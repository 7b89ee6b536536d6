//! Inline emphasis
//!
//!     Descriptions and notes may use markdown-style `*emphasis*` and `**strong**` markup,
//!     which is turned into `\emph{..}` and `\textbf{..}`. This is not a nested-markup
//!     parser: it runs a fixed number of leftmost, non-overlapping, shortest-match passes,
//!     each resolving the innermost spans that contain no further delimiters. Mismatched or
//!     deeply nested input therefore resolves the way those passes happen to pair the
//!     delimiters, e.g. `**foobar*` becomes `*\emph{foobar}`.
//!
//!     Processing order:
//!
//!     1. Whitespace-delimited `*` and `**` are escaped so they never open or close a span.
//!     2. Two passes of: strong spans, then emphasis spans.
//!     3. Escaped `\*` and `\_` are unescaped.
//!
//!     Span contents are copied through untouched, so the input is expected to be escaped
//!     for the target markup already.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

const PASSES: usize = 2;

static LONE_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\*\s").unwrap());
static LONE_DOUBLE_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\*\*\s").unwrap());
static ESCAPED_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\([*_])").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Strong,
    Emphasis,
}

impl SpanKind {
    fn delimiter_len(self) -> usize {
        match self {
            SpanKind::Strong => 2,
            SpanKind::Emphasis => 1,
        }
    }

    fn command(self) -> &'static str {
        match self {
            SpanKind::Strong => "\\textbf",
            SpanKind::Emphasis => "\\emph",
        }
    }

    /// Whether a span may end on `ch`, just before the closing delimiter.
    fn is_valid_last(self, ch: char) -> bool {
        if ch.is_whitespace() || ch == '\\' {
            return false;
        }
        match self {
            SpanKind::Strong => true,
            SpanKind::Emphasis => ch != '*',
        }
    }
}

/// Resolve emphasis markup in `text`. Never fails: unmatched delimiters stay literal.
pub fn format(text: &str) -> String {
    let text = LONE_STAR.replace_all(text, NoExpand(" \\* "));
    let mut text = LONE_DOUBLE_STAR
        .replace_all(&text, NoExpand(" \\*\\* "))
        .into_owned();

    for _ in 0..PASSES {
        text = resolve_spans(&text, SpanKind::Strong);
        text = resolve_spans(&text, SpanKind::Emphasis);
    }

    ESCAPED_MARK.replace_all(&text, "${1}").into_owned()
}

/// Replace every span of `kind`, scanning left to right without overlaps.
fn resolve_spans(text: &str, kind: SpanKind) -> String {
    let chars: Vec<char> = text.chars().collect();
    let delimiter_len = kind.delimiter_len();
    let mut out = String::with_capacity(text.len());

    let mut i = 0;
    while i < chars.len() {
        match match_span(&chars, i, kind) {
            Some(content_end) => {
                out.push_str(kind.command());
                out.push('{');
                out.extend(&chars[i + delimiter_len..content_end]);
                out.push('}');
                i = content_end + delimiter_len;
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }
    out
}

/// Try to match a span opening at `start`; returns the end of its content.
///
/// The content is the shortest run of units (an escape pair, or any character other
/// than a backslash or `*`) followed by a valid last character and the closing delimiter.
fn match_span(chars: &[char], start: usize, kind: SpanKind) -> Option<usize> {
    let delimiter_len = kind.delimiter_len();
    if !is_delimiter(chars, start, delimiter_len) {
        return None;
    }

    let mut pos = start + delimiter_len;
    if chars.get(pos)?.is_whitespace() {
        return None;
    }

    loop {
        let ch = *chars.get(pos)?;
        if kind.is_valid_last(ch) && is_delimiter(chars, pos + 1, delimiter_len) {
            return Some(pos + 1);
        }
        match ch {
            '\\' => match chars.get(pos + 1) {
                Some(&next) if next != '\n' => pos += 2,
                _ => return None,
            },
            '*' => return None,
            _ => pos += 1,
        }
    }
}

fn is_delimiter(chars: &[char], pos: usize, len: usize) -> bool {
    chars
        .get(pos..pos + len)
        .is_some_and(|run| run.iter().all(|&ch| ch == '*'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*foo*", "\\emph{foo}")]
    #[case("**foo**", "\\textbf{foo}")]
    #[case("foo**bar**baz", "foo\\textbf{bar}baz")]
    #[case("foo*bar*baz", "foo\\emph{bar}baz")]
    #[case("*foobar", "*foobar")]
    #[case("**foobar", "**foobar")]
    #[case("**foobar*", "*\\emph{foobar}")]
    #[case("*foobar**", "\\emph{foobar}*")]
    #[case("***foobar***", "\\emph{\\textbf{foobar}}")]
    #[case("**foo \\* bar \\* baz**", "\\textbf{foo * bar * baz}")]
    #[case("**foo * bar * baz**", "\\textbf{foo * bar * baz}")]
    #[case("***strong** in emph*", "\\emph{\\textbf{strong} in emph}")]
    #[case("***emph* in strong**", "\\textbf{\\emph{emph} in strong}")]
    #[case("**foo *bar* baz**", "\\textbf{foo \\emph{bar} baz}")]
    #[case("*foo **bar** baz*", "\\emph{foo \\textbf{bar} baz}")]
    #[case("*in emph **strong***", "\\emph{in emph \\textbf{strong}}")]
    #[case("**in strong *emph***", "\\textbf{in strong \\emph{emph}}")]
    #[case("*bar *baz**", "\\emph{bar \\emph{baz}}")]
    #[case("**bar* baz*", "\\emph{\\emph{bar} baz}")]
    #[case("**foo**bar**baz**", "\\textbf{foo}bar\\textbf{baz}")]
    #[case("*foo**bar***", "\\emph{foo\\textbf{bar}}")]
    #[case("*bar***", "\\emph{bar}**")]
    #[case("***foo*", "**\\emph{foo}")]
    #[case("***bar**", "*\\textbf{bar}")]
    #[case("**bar***", "\\textbf{bar}*")]
    #[case("***foo *bar*", "***foo \\emph{bar}")]
    fn test_format(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(format("Foo St."), "Foo St.");
        assert_eq!(format(""), "");
    }

    #[test]
    fn test_lone_stars_stay_literal() {
        assert_eq!(format("2 * 3 * 4"), "2 * 3 * 4");
        assert_eq!(format("a ** b"), "a ** b");
    }

    #[test]
    fn test_span_must_not_start_or_end_with_space() {
        assert_eq!(format("* foo*"), "* foo*");
        assert_eq!(format("*foo *"), "*foo *");
    }

    #[test]
    fn test_escape_pairs_inside_span() {
        assert_eq!(format("*a\\&b*"), "\\emph{a\\&b}");
        assert_eq!(format("*\\_x*"), "\\emph{_x}");
    }

    #[test]
    fn test_span_does_not_cross_newline_escape() {
        assert_eq!(format("*a\\\nb*"), "*a\\\nb*");
        assert_eq!(format("*a\nb*"), "\\emph{a\nb}");
    }
}
