//! Overview prose extraction.

use scraper::Html;

use crate::dom;

const SECTION_IDS: &[&str] = &["概述", "基本介绍"];

/// The overview prose that opens the article: consecutive paragraphs
/// after the section heading, concatenated. Reference markers (`<sup>`)
/// are dropped. Collection stops at the first non-paragraph sibling.
pub fn profile(doc: &Html) -> String {
    let Some(heading) = dom::section_heading(doc, SECTION_IDS) else {
        return String::new();
    };
    let mut text = String::new();
    let mut current = dom::next_sibling_named(heading, "p");
    while let Some(p) = current {
        if p.value().name() != "p" {
            break;
        }
        text.push_str(&dom::text_without(p, &["sup"]));
        current = dom::next_element_sibling(p);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_paragraphs_until_non_paragraph() {
        let doc = Html::parse_document(
            "<h2><span id=\"概述\">概述</span></h2>\
             <p>第一段<sup>[1]</sup>。</p>\
             <p>第二段。</p>\
             <h2>下一节</h2>\
             <p>不收录。</p>",
        );
        assert_eq!(profile(&doc), "第一段。第二段。");
    }

    #[test]
    fn alternate_anchor_is_recognized() {
        let doc = Html::parse_document(
            "<h2><span id=\"基本介绍\">基本介绍</span></h2><p>介绍。</p>",
        );
        assert_eq!(profile(&doc), "介绍。");
    }

    #[test]
    fn missing_section_yields_empty() {
        let doc = Html::parse_document("<p>无概述。</p>");
        assert_eq!(profile(&doc), "");
    }
}
