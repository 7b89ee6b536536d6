//! Description cleanup
//!
//!     The route service repeats the turn direction inside the description ("Turn right
//!     onto Foo St." instead of "Foo St."). The instruction and modifier already carry the
//!     direction, so the redundant wording is stripped to keep the "On" column narrow.
//!
//!     Rules run in a fixed order, each one a single substitution pass over the whole
//!     string, so later rules see the output of earlier ones.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, NoExpand(self.replacement))
            .into_owned()
    }
}

static RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        // Custom instruction tag, e.g. "[L/QR] "
        RewriteRule::new(r"^\s*\[[^\]]+\]\s*", ""),
        RewriteRule::new(r"(?i)^At the traffic circle,", "@ Circle,"),
        RewriteRule::new(r"(?i)^(Slight|Turn|Bear|Keep) (left|right) (toward|onto|on) ", ""),
        RewriteRule::new(r"(?i)^(Slight|Turn|Bear|Keep) (left|right) to stay on", "TRO"),
        RewriteRule::new(r"(?i)to stay on", "TRO"),
        RewriteRule::new(r"(?i)to remain on", "TRO"),
        RewriteRule::new(r"(?i)^(Slight|Turn|Bear|Keep) (left|right) ", ""),
        RewriteRule::new(r"(?i)^(Left|Right) onto ", ""),
        RewriteRule::new(r"(?i)^Continue onto ", ""),
        RewriteRule::new(r"(?i)^Continue straight (onto|on) ", ""),
    ]
});

/// Strip redundant direction wording (and any custom instruction tag) from a description.
pub fn clean(raw: &str) -> String {
    RULES
        .iter()
        .fold(raw.to_string(), |text, rule| rule.apply(&text))
}
