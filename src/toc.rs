//! GitHub-flavored markdown anchor/slug generation.

/// Generate a table-of-contents link to a heading.
pub fn render_toc_link(label: &str, heading: &str) -> String {
    format!("[{}](#{})", label, github_slug(heading))
}

/// Generate a TOC list item.
pub fn render_toc_item(label: &str, heading: &str) -> String {
    format!("- {}", render_toc_link(label, heading))
}

/// GitHub heading anchor slug.
///
/// - lowercase
/// - drop everything that isn't alphanumeric, space, underscore or hyphen
/// - replace spaces with hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}
