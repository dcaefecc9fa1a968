//! Canonical forms for legacy paths.
//!
//! Three views of the same raw fragment are used throughout the crate:
//!
//! - [`normalize_key`] - decoded, lowercased lookup key (`/Old/Page/?x=1` → `/old/page`)
//! - [`normalize_target`] - decoded, case-preserved redirect destination
//! - [`strip_query_and_trailing_slash`] - the raw path with only the query,
//!   fragment and trailing slashes removed
//!
//! Every function here is total and idempotent. Each one applies a single
//! normalization pass until the value stops changing, so inputs that are
//! encoded twice (`%252F`) or that expose new whitespace after slash stripping
//! (`/a /`) settle on the same form a second call would produce.

use percent_encoding::percent_decode_str;

/// Upper bound on normalization passes.
///
/// Real inputs settle after two or three passes; the bound only exists to keep
/// the loop finite for pathological input.
const MAX_PASSES: usize = 16;

/// Normalizes a raw path into a redirect table lookup key.
///
/// # Rules
///
/// 1. Percent-decode; a malformed escape (`%zz`, a trailing `%`) or a
///    non-UTF-8 result leaves the whole input undecoded
/// 2. Drop everything from the first `?` or `#`
/// 3. Trim surrounding whitespace
/// 4. Ensure a leading `/`
/// 5. Strip trailing `/`
/// 6. Lowercase
///
/// Input that is empty after stripping yields `""`, so the root path `/` has
/// no key.
///
/// # Examples
///
/// ```
/// use legacy_redirects::domain::normalize::normalize_key;
///
/// assert_eq!(normalize_key("/A"), "/a");
/// assert_eq!(normalize_key("a/?x=1"), "/a");
/// assert_eq!(normalize_key("/Caf%C3%A9#top"), "/café");
/// assert_eq!(normalize_key("/"), "");
/// ```
pub fn normalize_key(raw: &str) -> String {
    settle(raw, |s| canonical_pass(s, true, true))
}

/// Normalizes a raw destination into a redirect target.
///
/// Same pipeline as [`normalize_key`] without lowercasing. The result is only
/// usable as a `Location` when [`is_usable_target`] holds.
pub fn normalize_target(raw: &str) -> String {
    settle(raw, |s| canonical_pass(s, true, false))
}

/// Returns the case-preserved path portion of `raw` without decoding it.
///
/// Drops the query and fragment, trims, ensures a leading `/` and strips
/// trailing slashes.
pub fn strip_query_and_trailing_slash(raw: &str) -> String {
    settle(raw, |s| canonical_pass(s, false, false))
}

/// Whether a normalized target can be written into a `Location` header.
pub fn is_usable_target(target: &str) -> bool {
    target.starts_with('/')
}

fn settle(raw: &str, pass: impl Fn(&str) -> String) -> String {
    let mut current = pass(raw);
    for _ in 0..MAX_PASSES {
        let next = pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn canonical_pass(raw: &str, decode: bool, lowercase: bool) -> String {
    let decoded = if decode {
        percent_decode_or_raw(raw)
    } else {
        raw.to_string()
    };

    let path = match decoded.find(['?', '#']) {
        Some(idx) => &decoded[..idx],
        None => decoded.as_str(),
    };

    let path = path.trim();
    if path.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(path.len() + 1);
    if !path.starts_with('/') {
        out.push('/');
    }
    out.push_str(path);

    let trimmed_len = out.trim_end_matches('/').len();
    out.truncate(trimmed_len);

    if lowercase { out.to_lowercase() } else { out }
}

fn percent_decode_or_raw(raw: &str) -> String {
    if !escapes_are_well_formed(raw) {
        return raw.to_string();
    }

    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// Whether every `%` in `raw` starts a `%XX` hex escape.
fn escapes_are_well_formed(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'%')
        .all(|(i, _)| is_hex_escape(bytes, i))
}

/// Whether `bytes[at]` is a `%` followed by two hex digits.
pub(crate) fn is_hex_escape(bytes: &[u8], at: usize) -> bool {
    bytes.get(at) == Some(&b'%')
        && bytes.get(at + 1).is_some_and(u8::is_ascii_hexdigit)
        && bytes.get(at + 2).is_some_and(u8::is_ascii_hexdigit)
}
