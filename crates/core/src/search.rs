//! Case-insensitive substring matching used by the free-text list filters.

/// Whether any of `fields` contains `query`, ignoring case.
///
/// A blank query matches everything.
pub fn matches_any<'a, I>(fields: I, query: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}
