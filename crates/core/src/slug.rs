//! URL slug derivation for painting titles.
//!
//! This is the local fallback only. The repository prefers the store-backed
//! unique-slug probe, which guarantees uniqueness against existing rows;
//! `slugify` on its own does not.

/// Derive a URL-safe slug from a title.
///
/// Lowercases, strips everything outside `[a-z0-9]` and whitespace,
/// collapses whitespace runs to single hyphens, and trims leading/trailing
/// hyphens. Pure and idempotent: `slugify(slugify(x)) == slugify(x)`.
///
/// # Examples
///
/// ```
/// use atelier_core::slug::slugify;
///
/// assert_eq!(slugify("Sunset, Over the Bay!"), "sunset-over-the-bay");
/// assert_eq!(slugify("  Blue   Mountains  "), "blue-mountains");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
        // Any other character is dropped without breaking the current word.
    }

    slug
}
