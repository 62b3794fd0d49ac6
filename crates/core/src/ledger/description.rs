//! Description fallback resolution for journal entries.

/// Resolves a journal entry description from optional caller-supplied text.
///
/// Caller text wins whenever it is present, including an explicitly empty
/// string; only an absent description falls back to the operation-specific
/// template.
pub fn resolve_description<F>(supplied: Option<&str>, fallback: F) -> String
where
    F: FnOnce() -> String,
{
    match supplied {
        Some(text) => text.to_string(),
        None => fallback(),
    }
}
