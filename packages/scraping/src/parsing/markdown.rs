//! Small markdown scanning helpers used by the extraction engine.

use regex::Regex;

/// First top-level heading (`# ...`), without the marker.
pub fn first_heading(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

/// First non-empty paragraph: contiguous plain-text lines joined with a
/// space, skipping headings, lists, quotes, images, tables, and code
/// fences.
pub fn first_paragraph(markdown: &str) -> Option<String> {
    let mut collected: Vec<&str> = Vec::new();

    for line in markdown.lines() {
        let trimmed = line.trim();

        if is_plain_text(trimmed) {
            collected.push(trimmed);
        } else if !collected.is_empty() {
            break;
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join(" "))
    }
}

fn is_plain_text(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    if line.starts_with(['#', '>', '|', '!'])
        || line.starts_with("- ")
        || line.starts_with("* ")
        || line.starts_with("```")
    {
        return false;
    }
    // Numbered list item
    let mut chars = line.chars();
    let digits: String = chars.by_ref().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() && line[digits.len()..].starts_with(['.', ')']) {
        return false;
    }
    true
}

/// Markdown image URLs in document order, de-duplicated.
pub fn image_urls(markdown: &str) -> Vec<String> {
    let image = Regex::new(r#"!\[[^\]]*\]\(([^)\s]+)(?:\s+"[^"]*")?\)"#).unwrap();

    let mut seen = Vec::new();
    for caps in image.captures_iter(markdown) {
        if let Some(url) = caps.get(1) {
            let url = url.as_str().to_string();
            if !seen.contains(&url) {
                seen.push(url);
            }
        }
    }
    seen
}
