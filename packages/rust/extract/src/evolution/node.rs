//! Creature-cell field extraction.
//!
//! Each field is an independent probe returning `Option`, composed into
//! [`NodeFields`] — partial-failure semantics are explicit and testable
//! per field. A cell missing its expected nested structure yields empty
//! fields; the caller decides whether that means "skip this node".

use scraper::{ElementRef, Html};

use crate::dom;

/// The identity fields recoverable from one creature cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeFields {
    pub name: Option<String>,
    pub stage: Option<String>,
    pub form_name: Option<String>,
    pub image: Option<String>,
}

/// Extract a creature node's identity from a table cell.
pub fn extract_node(doc: &Html, cell: ElementRef<'_>) -> NodeFields {
    NodeFields {
        name: display_name(cell),
        stage: stage_label(doc, cell),
        form_name: form_qualifier(cell),
        image: image_file(cell),
    }
}

/// The primary name link inside the cell's nested card table.
fn name_anchor(cell: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let holder = cell
        .select(&dom::selector("table tbody tr .textblack"))
        .next()?;
    holder.select(&dom::selector("a")).next()
}

fn display_name(cell: ElementRef<'_>) -> Option<String> {
    name_anchor(cell).map(dom::text_of)
}

/// Alternate-form qualifier link: regional form, or form change (the
/// latter wins when a cell carries both).
fn form_qualifier(cell: ElementRef<'_>) -> Option<String> {
    let regional = cell
        .select(&dom::selector(r#"a[title="地区形态"]"#))
        .next()
        .map(dom::text_of);
    let change = cell
        .select(&dom::selector(r#"a[title="形态变化"]"#))
        .next()
        .map(dom::text_of);
    change.or(regional)
}

/// Artwork file name: the `File:` suffix of the cell's image link.
fn image_file(cell: ElementRef<'_>) -> Option<String> {
    let card = cell.select(&dom::selector("table tbody")).next()?;
    let link = card.select(&dom::selector("a.image")).next()?;
    let href = link.attr("href")?;
    href.split_once("File:").map(|(_, file)| file.to_string())
}

/// Stage marker: the `<small>` in the nearest row preceding the name row.
fn stage_label(doc: &Html, cell: ElementRef<'_>) -> Option<String> {
    let anchor = name_anchor(cell)?;
    let name_row = dom::nth_ancestor(anchor, 2)?;
    let stage_row = dom::find_previous(doc, name_row, |e| e.value().name() == "tr")?;
    let small = stage_row.select(&dom::selector("small")).next()?;
    Some(dom::text_of(small))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_cell(doc: &Html) -> ElementRef<'_> {
        doc.select(&dom::selector("td.node")).next().unwrap()
    }

    fn node_cell_doc(extra_links: &str) -> Html {
        Html::parse_document(&format!(
            "<table><tr><td class=\"node\"><table>\
             <tr><td><a class=\"image\" href=\"/wiki/File:025Pikachu_Dream.png\"><img></a>{extra_links}</td></tr>\
             <tr><td><small>未进化</small></td></tr>\
             <tr><td class=\"textblack\"><a href=\"/wiki/皮卡丘\">皮卡丘</a></td></tr>\
             </table></td></tr></table>",
        ))
    }

    #[test]
    fn extracts_all_fields_from_a_complete_cell() {
        let doc = node_cell_doc("");
        let fields = extract_node(&doc, first_cell(&doc));
        assert_eq!(fields.name.as_deref(), Some("皮卡丘"));
        assert_eq!(fields.stage.as_deref(), Some("未进化"));
        assert_eq!(fields.image.as_deref(), Some("025Pikachu_Dream.png"));
        assert_eq!(fields.form_name, None);
    }

    #[test]
    fn regional_form_link_becomes_qualifier() {
        let doc = node_cell_doc(r#"<a title="地区形态">阿罗拉的样子</a>"#);
        let fields = extract_node(&doc, first_cell(&doc));
        assert_eq!(fields.form_name.as_deref(), Some("阿罗拉的样子"));
    }

    #[test]
    fn form_change_link_wins_over_regional() {
        let doc = node_cell_doc(
            r#"<a title="地区形态">阿罗拉的样子</a><a title="形态变化">换装</a>"#,
        );
        let fields = extract_node(&doc, first_cell(&doc));
        assert_eq!(fields.form_name.as_deref(), Some("换装"));
    }

    #[test]
    fn missing_structure_yields_empty_fields() {
        let doc = Html::parse_document("<table><tr><td class=\"node\">条件文本</td></tr></table>");
        let fields = extract_node(&doc, first_cell(&doc));
        assert_eq!(fields, NodeFields::default());
    }

    #[test]
    fn stage_comes_from_nearest_preceding_row() {
        // Two stacked cards: each name row must resolve to its own stage.
        let doc = Html::parse_document(
            "<table>\
             <tr><td class=\"node\"><table>\
             <tr><td><small>未进化</small></td></tr>\
             <tr><td class=\"textblack\"><a>皮丘</a></td></tr>\
             </table></td>\
             <td class=\"node\"><table>\
             <tr><td><small>1阶进化</small></td></tr>\
             <tr><td class=\"textblack\"><a>皮卡丘</a></td></tr>\
             </table></td></tr></table>",
        );
        let cells: Vec<_> = doc.select(&dom::selector("td.node")).collect();
        assert_eq!(
            extract_node(&doc, cells[0]).stage.as_deref(),
            Some("未进化")
        );
        assert_eq!(
            extract_node(&doc, cells[1]).stage.as_deref(),
            Some("1阶进化")
        );
    }
}
