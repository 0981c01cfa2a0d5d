//! Text cleanup for extracted values
//!
//! Every string that lands in the site summary goes through
//! [`normalize_whitespace`]. Text nodes are concatenated as they appear, so
//! inline markup (`<strong>`, `<em>`) leaves the surrounding punctuation
//! alone; `<br>` and block elements count as a word break.

use scraper::{ElementRef, Node};

/// Elements whose start separates the text before them from the text inside
const WORD_BREAKS: &[&str] = &[
    "br", "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "dt", "dd", "tr",
    "td", "th",
];

/// Collapse every whitespace run to a single space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element with embedded markup removed
pub fn element_text(element: &ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(el) if WORD_BREAKS.contains(&el.name()) => raw.push(' '),
            _ => {}
        }
    }
    normalize_whitespace(&raw)
}

/// Attribute value of an element, or `None` when the attribute is absent
pub fn element_attr(element: &ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        let sel = Selector::parse(css).unwrap();
        doc.select(&sel).next().unwrap()
    }

    #[test]
    fn test_normalize_mixed_whitespace() {
        assert_eq!(normalize_whitespace("  Hola   \n Mundo "), "Hola Mundo");
    }

    #[test]
    fn test_normalize_tabs_and_newlines() {
        assert_eq!(normalize_whitespace("a\t\tb\n\n\nc"), "a b c");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_whitespace("   \n\t "), "");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_normalize_non_breaking_space() {
        assert_eq!(normalize_whitespace("Hola\u{00A0}\u{00A0}Mundo"), "Hola Mundo");
    }

    #[test]
    fn test_element_text_strips_markup() {
        let doc = Html::parse_fragment("<p>  Desarrollo <strong>web</strong>\n a medida </p>");
        let p = first(&doc, "p");
        assert_eq!(element_text(&p), "Desarrollo web a medida");
    }

    #[test]
    fn test_element_text_breaks_at_br_and_blocks() {
        let doc = Html::parse_fragment("<h3>Apps<br>móviles</h3>");
        let h3 = first(&doc, "h3");
        assert_eq!(element_text(&h3), "Apps móviles");

        let doc = Html::parse_fragment("<li><div>01</div><div>Descubrir</div></li>");
        let li = first(&doc, "li");
        assert_eq!(element_text(&li), "01 Descubrir");
    }

    #[test]
    fn test_element_text_keeps_punctuation_after_inline_tags() {
        let doc = Html::parse_fragment("<p>Hacemos <strong>web</strong>, apps e <em>IA</em>.</p>");
        let p = first(&doc, "p");
        assert_eq!(element_text(&p), "Hacemos web, apps e IA.");
    }

    #[test]
    fn test_element_text_does_not_split_words_at_inline_tags() {
        let doc = Html::parse_fragment("<span>SUN<b>TRAM</b></span>");
        let span = first(&doc, "span");
        assert_eq!(element_text(&span), "SUNTRAM");
    }

    #[test]
    fn test_element_text_decodes_entities() {
        let doc = Html::parse_fragment("<p>Diseño &amp; desarrollo</p>");
        let p = first(&doc, "p");
        assert_eq!(element_text(&p), "Diseño & desarrollo");
    }

    #[test]
    fn test_element_attr() {
        let doc = Html::parse_fragment(r#"<a href="mailto:hola@suntram.digital">Email</a>"#);
        let a = first(&doc, "a");
        assert_eq!(
            element_attr(&a, "href").as_deref(),
            Some("mailto:hola@suntram.digital")
        );
        assert_eq!(element_attr(&a, "title"), None);
    }
}
