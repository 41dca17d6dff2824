use once_cell::sync::Lazy;
use regex::Regex;

use crate::configs::terms::metric;

static PROTOCOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-zA-Z][a-zA-Z0-9+.\-]*)://").unwrap());

/// Splits an optional `protocol://` prefix off `s`.
pub fn split_protocol(s: &str) -> (Option<&str>, &str) {
    if let Some(captures) = PROTOCOL.captures(s) {
        if let (Some(protocol), Some(whole)) = (captures.get(1), captures.get(0)) {
            return (Some(protocol.as_str()), &s[whole.end()..])
        }
    }
    (None, s)
}

/// Returns `Some(true)` when `s` carries the expected protocol, `Some(false)`
/// when it carries none, and `None` when it belongs to another protocol.
pub fn protocol_commits<'t>(s: &'t str, expected: &str) -> Option<(bool, &'t str)> {
    match split_protocol(s) {
        (Some(protocol), rest) if protocol.eq_ignore_ascii_case(expected) => Some((true, rest)),
        (Some(_), _) => None,
        (None, rest) => Some((false, rest))
    }
}

/// Splits on commas that are not enclosed in parentheses, returning each piece
/// with the byte offset it starts at.
pub fn split_top_level(s: &str) -> Vec<(usize, &str)> {
    let mut result = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                result.push((start, &s[start..i]));
                start = i + 1;
            },
            _ => {}
        }
    }
    result.push((start, &s[start..]));
    return result
}

pub fn is_protocol(name: &str) -> bool {
    name == metric::JBOSSCLI || name == metric::JMX
}
