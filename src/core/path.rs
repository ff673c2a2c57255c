//! Slash-delimited route paths.
//!
//! Each navigator strips its own leading segment before handing the rest
//! down, so the same two functions work at every depth:
//!
//! ```text
//! "tabs/settings/profile"  →  ("tabs", Some("settings/profile"))
//! "settings/profile"       →  ("settings", Some("profile"))
//! "profile"                →  ("profile", None)
//! ```

pub const SEPARATOR: char = '/';

/// Splits on the first `/`. An empty remainder counts as none.
pub fn split(path: &str) -> (&str, Option<&str>) {
    match path.split_once(SEPARATOR) {
        Some((head, rest)) if !rest.is_empty() => (head, Some(rest)),
        Some((head, _)) => (head, None),
        None => (path, None),
    }
}

/// Namespaces `key` under `parent`. The root has an empty id.
pub fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}{SEPARATOR}{key}")
    }
}

/// Returns the local key if `id` is a direct child of `parent`.
pub fn child_key<'a>(parent: &str, id: &'a str) -> Option<&'a str> {
    let rest = if parent.is_empty() {
        id
    } else {
        id.strip_prefix(parent)?.strip_prefix(SEPARATOR)?
    };
    if rest.is_empty() || rest.contains(SEPARATOR) {
        None
    } else {
        Some(rest)
    }
}

/// True if `id` is `ancestor` itself or lives anywhere below it.
pub fn is_within(ancestor: &str, id: &str) -> bool {
    id == ancestor
        || id
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
}
