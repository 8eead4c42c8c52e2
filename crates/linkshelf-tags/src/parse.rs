//! Tag list parsing.

use crate::tag::normalize_tag;

/// Parse a comma-separated tag string into normalized tags.
///
/// - Splits on commas
/// - Trims and lowercases each entry
/// - Drops empty entries
/// - Keeps the original order (duplicates included)
///
/// # Examples
/// ```
/// use linkshelf_tags::parse_tag_list;
/// assert_eq!(parse_tag_list(" Rust, blog ,,"), vec!["rust", "blog"]);
/// assert!(parse_tag_list("").is_empty());
/// ```
pub fn parse_tag_list(input: &str) -> Vec<String> {
    input.split(',').filter_map(normalize_tag).collect()
}

/// Normalize tags that arrived as separate strings (e.g. a JSON array).
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|t| normalize_tag(t.as_ref()))
        .collect()
}

/// Join tags into the comma-separated wire form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

/// Join tags for an editable text field (`"rust, blog"`).
pub fn format_tag_input(tags: &[String]) -> String {
    tags.join(", ")
}

/// Append a preset tag to a free-text tag field.
///
/// Mirrors picking a tag from a preset list: the tag is added after a
/// `", "` separator unless the field is blank.
pub fn append_tag_input(current: &str, tag: &str) -> String {
    let current = current.trim();
    let tag = tag.trim();
    if tag.is_empty() {
        return current.to_string();
    }
    if current.is_empty() {
        tag.to_string()
    } else {
        format!("{}, {}", current, tag)
    }
}
