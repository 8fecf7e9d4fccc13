use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

/// Trim and collapse every run of whitespace (including `&nbsp;`) to one space.
pub fn clean_text(input: &str) -> String {
    input
        .split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// All text under an element, cleaned.
pub fn element_text(element: ElementRef) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// Visible text of a raw markup fragment: tags dropped, common entities
/// decoded, whitespace cleaned.
pub fn visible_text(markup: &str) -> String {
    let stripped = TAG.replace_all(markup, " ");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&quot;", "\"");
    clean_text(&decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Smith,\n   Jane \t"), "Smith, Jane");
        assert_eq!(clean_text("Lee\u{a0}Chen"), "Lee Chen");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn test_element_text_joins_children() {
        let html = Html::parse_fragment("<table><tr><td><a>Smith,</a><br>Jane</td></tr></table>");
        let sel = Selector::parse("td").expect("valid selector");
        let td = html.select(&sel).next().unwrap();
        assert_eq!(element_text(td), "Smith, Jane");
    }

    #[test]
    fn test_visible_text() {
        assert_eq!(
            visible_text("<td>Tom &amp; Jerry</td>\n<td><b>Co-Captain</b></td>"),
            "Tom & Jerry Co-Captain"
        );
        assert_eq!(visible_text("<span\nclass=\"x\">O&#39;Neil</span>"), "O'Neil");
    }
}
