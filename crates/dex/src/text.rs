//! Display helpers for the API's game text.

use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(^|[.!?]\s+)([a-z])").unwrap());

/// Flavor text is copied from the games with their hard line breaks (`\n`)
/// and page breaks (form feed). Both become plain spaces, then runs of
/// whitespace are collapsed.
pub fn clean_flavor_text(raw: &str) -> String {
    // Both line and page breaks count as whitespace.
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase `text`, then capitalize its first letter and the first letter
/// after every `.`, `!` or `?` that is followed by whitespace.
pub fn sentence_case(text: &str) -> String {
    let lower = text.to_lowercase();
    SENTENCE_START
        .replace_all(&lower, |caps: &regex::Captures<'_>| format!("{}{}", &caps[1], caps[2].to_uppercase()))
        .into_owned()
}
