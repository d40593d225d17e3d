//! Parser diagnostics with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tokenizer and tree builder to report parse errors and
//! constructs the core does not implement.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a diagnostic condition (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Parser", "unexpected-null-character at 1:4");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[wicket {component}] ⚠ {message}").yellow());
    }
}

/// Returns true if `warn_once` has already printed this exact message.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call before parsing a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test, since the set is process-wide and tests run in parallel.
    #[test]
    fn test_warn_once_records_until_cleared() {
        warn_once("Test", "recorded once");
        warn_once("Test", "recorded once");
        assert!(was_warned("Test", "recorded once"));
        assert!(!was_warned("Test", "never printed"));
        assert!(!was_warned("Other", "recorded once"));

        clear_warnings();
        assert!(!was_warned("Test", "recorded once"));

        warn_once("Test", "recorded once");
        assert!(was_warned("Test", "recorded once"));
    }
}
