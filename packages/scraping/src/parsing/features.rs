//! Bullet-list extraction from markdown.

use regex::Regex;

/// Upper bound on collected items, to keep cost bounded on pages with
/// very long lists.
const MAX_FEATURES: usize = 20;

/// Collect the first contiguous bullet list in the markdown.
///
/// Items may use `-`, `*`, or numbered markers; any preceding heading is
/// irrelevant. Each item's text is kept verbatim (trimmed), preserving
/// order and case. The list ends at the first blank line, heading, or
/// non-list line. No list present yields an empty vec, not an error.
pub fn extract_features(markdown: &str) -> Vec<String> {
    let numbered = Regex::new(r"^\d+[.)]\s+").unwrap();

    let mut items = Vec::new();
    let mut in_list = false;

    for line in markdown.lines() {
        let trimmed = line.trim();

        if let Some(text) = item_text(trimmed, &numbered) {
            in_list = true;
            if !text.is_empty() {
                items.push(text.to_string());
            }
            if items.len() >= MAX_FEATURES {
                break;
            }
        } else if in_list {
            break;
        }
    }

    items
}

fn item_text<'a>(line: &'a str, numbered: &Regex) -> Option<&'a str> {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some(rest.trim());
    }
    if let Some(marker) = numbered.find(line) {
        return Some(line[marker.end()..].trim());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_list_after_heading() {
        let markdown = "# Features\n- A\n- B\n- C";
        assert_eq!(extract_features(markdown), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_star_and_numbered_lists() {
        assert_eq!(
            extract_features("* Fast\n* Small"),
            vec!["Fast", "Small"]
        );
        assert_eq!(
            extract_features("1. First\n2) Second\n3. Third"),
            vec!["First", "Second", "Third"]
        );
    }

    #[test]
    fn test_list_ends_at_blank_line() {
        let markdown = "- A\n- B\n\n- C";
        assert_eq!(extract_features(markdown), vec!["A", "B"]);
    }

    #[test]
    fn test_list_ends_at_heading() {
        let markdown = "Intro text\n\n- A\n- B\n## Pricing\n- Not a feature";
        assert_eq!(extract_features(markdown), vec!["A", "B"]);
    }

    #[test]
    fn test_case_and_order_preserved() {
        let markdown = "- Zebra striping\n- API access\n- offline MODE";
        assert_eq!(
            extract_features(markdown),
            vec!["Zebra striping", "API access", "offline MODE"]
        );
    }

    #[test]
    fn test_item_cap() {
        let markdown: String = (0..50).map(|i| format!("- Item {i}\n")).collect();
        assert_eq!(extract_features(&markdown).len(), MAX_FEATURES);
    }

    #[test]
    fn test_no_list_yields_empty() {
        assert!(extract_features("Just a paragraph of prose.").is_empty());
        assert!(extract_features("").is_empty());
    }
}
