//! Document traversal helpers over `scraper`.
//!
//! The wiki's markup is loosely structured, so the extractors lean on
//! document-order walks ("the next table after this heading", "the
//! nearest preceding row") rather than rigid selector paths. Each
//! helper returns an `Option` so a missing element degrades to a
//! missing field at the call site.

use scraper::{ElementRef, Html, Selector};

/// Parse a static CSS selector. Panics only on programmer error.
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// First element after `after` in document order matching `pred`.
///
/// Descendants of `after` are included, matching the source wiki
/// layout where a heading never contains the table it introduces.
pub fn find_next<'a>(
    doc: &'a Html,
    after: ElementRef<'a>,
    pred: impl Fn(ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    let mut seen = false;
    for node in doc.root_element().descendants() {
        if node.id() == after.id() {
            seen = true;
            continue;
        }
        if !seen {
            continue;
        }
        if let Some(el) = ElementRef::wrap(node) {
            if pred(el) {
                return Some(el);
            }
        }
    }
    None
}

/// Nearest element before `before` in document order matching `pred`.
pub fn find_previous<'a>(
    doc: &'a Html,
    before: ElementRef<'a>,
    pred: impl Fn(ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    let mut last = None;
    for node in doc.root_element().descendants() {
        if node.id() == before.id() {
            return last;
        }
        if let Some(el) = ElementRef::wrap(node) {
            if pred(el) {
                last = Some(el);
            }
        }
    }
    None
}

/// Next sibling that is an element, regardless of tag.
pub fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Next sibling element with the given tag name, skipping others.
pub fn next_sibling_named<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == name)
}

/// Nearest ancestor element with the given tag name.
pub fn ancestor_named<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == name)
}

/// The element `levels` parent steps above `el`.
pub fn nth_ancestor(el: ElementRef<'_>, levels: usize) -> Option<ElementRef<'_>> {
    let mut current = el;
    for _ in 0..levels {
        current = ElementRef::wrap(current.parent()?)?;
    }
    Some(current)
}

/// Direct child elements with the given tag name (non-recursive).
pub fn child_elements_named<'a>(el: ElementRef<'a>, name: &str) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == name)
        .collect()
}

/// Whether the element carries the given class.
pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Whether the element is inline-hidden (`style="display: none"`).
pub fn is_style_hidden(el: ElementRef<'_>) -> bool {
    matches!(el.attr("style"), Some(s) if s.trim() == "display: none")
}

/// All text under the element, concatenated as-is.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// All text under the element, trimmed.
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// All text under the element, skipping entire subtrees of the named
/// tags (used to drop `<sup>` reference markers from prose).
pub fn text_without(el: ElementRef<'_>, excluded: &[&str]) -> String {
    let mut out = String::new();
    collect_text(el, excluded, &mut out);
    out
}

fn collect_text(el: ElementRef<'_>, excluded: &[&str], out: &mut String) {
    for child in el.children() {
        if let Some(e) = ElementRef::wrap(child) {
            if excluded.contains(&e.value().name()) {
                continue;
            }
            collect_text(e, excluded, out);
        } else if let Some(t) = child.value().as_text() {
            out.push_str(t);
        }
    }
}

/// Text of the element's first child node, trimmed.
///
/// Mirrors "the content before any nested markup": a leading text node
/// gives that text; a leading element gives its full text.
pub fn first_child_text(el: ElementRef<'_>) -> Option<String> {
    let first = el.children().next()?;
    if let Some(t) = first.value().as_text() {
        Some(t.trim().to_string())
    } else {
        ElementRef::wrap(first).map(|e| trimmed_text(e))
    }
}

/// First `<span>` whose `id` is one of `ids` (section anchors come in
/// simplified and traditional spellings).
pub fn span_with_id<'a>(doc: &'a Html, ids: &[&str]) -> Option<ElementRef<'a>> {
    let sel = selector("span[id]");
    doc.select(&sel)
        .find(|el| el.attr("id").is_some_and(|id| ids.contains(&id)))
}

/// The heading element containing a section anchor span.
pub fn section_heading<'a>(doc: &'a Html, ids: &[&str]) -> Option<ElementRef<'a>> {
    span_with_id(doc, ids).and_then(|span| span.parent().and_then(ElementRef::wrap))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_next_walks_document_order() {
        let doc = Html::parse_document(
            "<h2><span id=\"进化\">进化</span></h2><p>x</p><table class=\"a-c\"><tr><td>1</td></tr></table>",
        );
        let heading = section_heading(&doc, &["进化"]).unwrap();
        let table = find_next(&doc, heading, |e| e.value().name() == "table").unwrap();
        assert!(has_class(table, "a-c"));
    }

    #[test]
    fn find_previous_returns_nearest_match() {
        let doc = Html::parse_document(
            "<table><tr id=\"a\"><td>1</td></tr><tr id=\"b\"><td><small>未进化</small></td></tr>\
             <tr id=\"c\"><td class=\"textblack\"><a>name</a></td></tr></table>",
        );
        let sel = selector("tr#c");
        let row = doc.select(&sel).next().unwrap();
        let prev = find_previous(&doc, row, |e| e.value().name() == "tr").unwrap();
        assert_eq!(prev.attr("id"), Some("b"));
    }

    #[test]
    fn text_without_skips_sup_subtrees() {
        let doc = Html::parse_document("<p>前半<sup>[1]</sup>后半</p>");
        let sel = selector("p");
        let p = doc.select(&sel).next().unwrap();
        assert_eq!(text_without(p, &["sup"]), "前半后半");
    }

    #[test]
    fn first_child_text_takes_leading_text_node() {
        let doc = Html::parse_document("<table><tr><td>3<span>（5120步）</span></td></tr></table>");
        let sel = selector("td");
        let td = doc.select(&sel).next().unwrap();
        assert_eq!(first_child_text(td).as_deref(), Some("3"));
    }

    #[test]
    fn child_elements_named_is_non_recursive() {
        let doc = Html::parse_document(
            "<table id=\"outer\"><tr><td><table><tr><td>inner</td></tr></table></td></tr></table>",
        );
        let sel = selector("table#outer > tbody");
        let tbody = doc.select(&sel).next().unwrap();
        // Only the outer row, not the nested table's row.
        assert_eq!(child_elements_named(tbody, "tr").len(), 1);
    }
}
