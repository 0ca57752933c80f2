//! Field extraction from concept pages.
//!
//! Selectors follow the site's rendered markup: the title block is
//! `.page-title h1`, the description is the paragraph following the title
//! block, relation entries pair an `h2 > a` link with the `.rel-desc`
//! block after the heading, and the tab navigation lives under `#tabs-bar`.

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::{Document, Relation};

/// Concept title from the page header, or empty when absent.
pub fn concept_title(document: &Document) -> String {
    let html = document.parse();
    let selector = Selector::parse(".page-title h1").expect("invalid selector");

    html.select(&selector).next().map(first_text).unwrap_or_default()
}

/// Concept description from the paragraph after the page header, with
/// footnote markers stripped. Empty when absent.
pub fn concept_description(document: &Document) -> String {
    let html = document.parse();
    let selector = Selector::parse(".page-title + p").expect("invalid selector");

    let text = html.select(&selector).next().map(first_text).unwrap_or_default();
    strip_footnote_markers(&text)
}

/// Relation entries in page order: each `h2 > a` link paired with the
/// description block following its heading. Hrefs are rewritten from the
/// site's relative forms (`./X` and `./i/X`) to absolute URLs under `base`.
pub fn relations(document: &Document, base: &str) -> Vec<Relation> {
    let html = document.parse();
    let link_selector = Selector::parse("h2 > a").expect("invalid selector");
    let desc_selector = Selector::parse("h2 + .rel-desc").expect("invalid selector");

    let links = html.select(&link_selector);
    let descriptions = html.select(&desc_selector);

    links
        .zip(descriptions)
        .map(|(link, description)| Relation {
            title: first_text(link),
            href: rewrite_relation_href(link.value().attr("href").unwrap_or(""), base),
            description: first_text(description),
        })
        .collect()
}

/// Hrefs of the tab-navigation links, in page order. The first tab is the
/// concept's own page, the second its incoming-relations page.
pub fn tab_hrefs(document: &Document) -> Vec<String> {
    let html = document.parse();
    let selector = Selector::parse("#tabs-bar a").expect("invalid selector");

    html.select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

/// First text node of an element, as rendered.
fn first_text(element: ElementRef<'_>) -> String {
    element.text().next().unwrap_or_default().to_string()
}

/// Rewrite the site's relative link forms to absolute URLs: `./X` and
/// `./i/X` both become `<base>X`. Anything else passes through unchanged.
fn rewrite_relation_href(href: &str, base: &str) -> String {
    let relative = Regex::new(r"^\./(i/)?(.+)$").expect("invalid regex");

    match relative.captures(href) {
        Some(captures) => format!("{}{}", base, &captures[2]),
        None => href.to_string(),
    }
}

/// Drop the first spaced footnote marker (`" [n]"`), then the first bare
/// one (`"[n]"`), mirroring how the site annotates descriptions.
fn strip_footnote_markers(text: &str) -> String {
    let spaced = Regex::new(r" \[[0-9]*\]").expect("invalid regex");
    let bare = Regex::new(r"\[[0-9]*\]").expect("invalid regex");

    let stripped = spaced.replace(text, "");
    bare.replace(&stripped, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://en.unionpedia.org/";

    fn document(html: &str) -> Document {
        Document::new(html.to_string())
    }

    #[test]
    fn test_concept_title() {
        let doc = document(
            r#"
            <html><body>
                <div class="page-title"><h1>Berlin</h1></div>
            </body></html>
        "#,
        );

        assert_eq!(concept_title(&doc), "Berlin");
    }

    #[test]
    fn test_concept_title_missing() {
        let doc = document("<html><body><p>empty</p></body></html>");
        assert_eq!(concept_title(&doc), "");
    }

    #[test]
    fn test_concept_description_strips_footnotes() {
        let doc = document(
            r#"
            <html><body>
                <div class="page-title"><h1>Berlin</h1></div>
                <p>Berlin is the capital of Germany. [1]</p>
            </body></html>
        "#,
        );

        assert_eq!(concept_description(&doc), "Berlin is the capital of Germany.");
    }

    #[test]
    fn test_concept_description_strips_bare_footnote() {
        let doc = document(
            r#"
            <html><body>
                <div class="page-title"><h1>Berlin</h1></div>
                <p>Capital[2] of Germany.</p>
            </body></html>
        "#,
        );

        assert_eq!(concept_description(&doc), "Capital of Germany.");
    }

    #[test]
    fn test_concept_description_missing() {
        let doc = document(r#"<div class="page-title"><h1>Berlin</h1></div>"#);
        assert_eq!(concept_description(&doc), "");
    }

    #[test]
    fn test_relations_in_page_order() {
        let doc = document(
            r#"
            <html><body>
                <h2><a href="./Alpha">Alpha</a></h2>
                <div class="rel-desc">First relation.</div>
                <h2><a href="./i/Beta">Beta</a></h2>
                <div class="rel-desc">Second relation.</div>
            </body></html>
        "#,
        );

        let relations = relations(&doc, BASE);

        assert_eq!(relations.len(), 2);
        assert_eq!(relations[0].title, "Alpha");
        assert_eq!(relations[0].href, "https://en.unionpedia.org/Alpha");
        assert_eq!(relations[0].description, "First relation.");
        assert_eq!(relations[1].title, "Beta");
        assert_eq!(relations[1].href, "https://en.unionpedia.org/Beta");
        assert_eq!(relations[1].description, "Second relation.");
    }

    #[test]
    fn test_relations_empty_page() {
        let doc = document("<html><body><p>no relations</p></body></html>");
        assert!(relations(&doc, BASE).is_empty());
    }

    #[test]
    fn test_tab_hrefs() {
        let doc = document(
            r#"
            <html><body>
                <ul id="tabs-bar">
                    <li><a href="./Berlin">Outgoing</a></li>
                    <li><a href="./i/Berlin">Incoming</a></li>
                </ul>
            </body></html>
        "#,
        );

        assert_eq!(tab_hrefs(&doc), vec!["./Berlin".to_string(), "./i/Berlin".to_string()]);
    }

    #[test]
    fn test_tab_hrefs_missing() {
        let doc = document("<html><body></body></html>");
        assert!(tab_hrefs(&doc).is_empty());
    }

    #[test]
    fn test_rewrite_relation_href_forms() {
        assert_eq!(rewrite_relation_href("./Alpha", BASE), "https://en.unionpedia.org/Alpha");
        assert_eq!(rewrite_relation_href("./i/Alpha", BASE), "https://en.unionpedia.org/Alpha");
        assert_eq!(rewrite_relation_href("https://elsewhere.org/x", BASE), "https://elsewhere.org/x");
    }

    #[test]
    fn test_strip_footnote_markers_once_each() {
        assert_eq!(strip_footnote_markers("a [1] b"), "a b");
        assert_eq!(strip_footnote_markers("a [1] b [2]"), "a b ");
        assert_eq!(strip_footnote_markers("plain text"), "plain text");
    }
}
