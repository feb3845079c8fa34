//! Move list and detail-page extraction.

use scraper::{ElementRef, Html};

use wikidex_shared::{MoveDetail, MoveEntry};

use crate::dom;

/// Title of the move list page.
pub const MOVE_LIST_PAGE: &str = "招式列表";

/// Parse the move list page: one `hvlist` table per generation. Data
/// rows are the ones tagged with a `data-type` attribute.
pub fn move_list(doc: &Html) -> Vec<MoveEntry> {
    let mut entries = Vec::new();

    for table in doc.select(&dom::selector("table.hvlist")) {
        let generation = dom::find_previous(doc, table, |e| e.value().name() == "h2")
            .map(dom::trimmed_text)
            .unwrap_or_default();

        for row in table.select(&dom::selector("tr[data-type]")) {
            let cells: Vec<_> = row.select(&dom::selector("td")).collect();
            if cells.len() < 10 {
                continue;
            }
            let Some(type_name) = link_text(cells[4]) else {
                continue;
            };
            let Some(category) = link_text(cells[5]) else {
                continue;
            };
            entries.push(MoveEntry {
                index: dom::trimmed_text(cells[0]),
                generation: generation.clone(),
                name: dom::trimmed_text(cells[1]),
                name_jp: dom::trimmed_text(cells[2]),
                name_en: dom::trimmed_text(cells[3]),
                // The type column sometimes renders traditional glyphs.
                type_name: type_name.replace('惡', "恶").replace("格鬥", "格斗"),
                category,
                power: dom::trimmed_text(cells[6]),
                accuracy: dom::trimmed_text(cells[7]),
                pp: dom::trimmed_text(cells[8]),
                text: dom::trimmed_text(cells[9]),
            });
        }
    }
    entries
}

fn link_text(cell: ElementRef<'_>) -> Option<String> {
    cell.select(&dom::selector("a"))
        .next()
        .map(dom::trimmed_text)
}

/// Extract a move's detail page on top of its list entry.
pub fn move_detail(doc: &Html, entry: MoveEntry) -> MoveDetail {
    MoveDetail {
        entry,
        effect: effect_text(doc),
        range: range_text(doc),
    }
}

/// Effect prose: consecutive paragraphs after the 招式附加效果 heading,
/// reference markers dropped.
fn effect_text(doc: &Html) -> String {
    let Some(heading) = dom::section_heading(doc, &["招式附加效果"]) else {
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

/// Target range: two rows below the 范围 label row in the info panel.
fn range_text(doc: &Html) -> String {
    let Some(label) = doc
        .select(&dom::selector(r#"a[title="范围"]"#))
        .next()
    else {
        return String::new();
    };
    let Some(label_row) = dom::ancestor_named(label, "tr") else {
        return String::new();
    };
    dom::next_sibling_named(label_row, "tr")
        .and_then(|row| dom::next_sibling_named(row, "tr"))
        .map(dom::trimmed_text)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_rows_need_a_data_type_attribute() {
        let doc = Html::parse_document(
            "<h2>第一世代</h2>\
             <table class=\"hvlist\">\
             <tr><th>表头行</th></tr>\
             <tr data-type=\"電\">\
             <td>086</td><td>打雷</td><td>かみなり</td><td>Thunder</td>\
             <td><a>電</a></td><td><a>特殊</a></td>\
             <td>110</td><td>70</td><td>10</td><td>有几率让对手麻痹。</td>\
             </tr>\
             </table>",
        );
        let entries = move_list(&doc);
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.index, "086");
        assert_eq!(entry.generation, "第一世代");
        assert_eq!(entry.name, "打雷");
        assert_eq!(entry.category, "特殊");
        assert_eq!(entry.pp, "10");
    }

    #[test]
    fn traditional_type_glyphs_are_normalized() {
        let doc = Html::parse_document(
            "<h2>第一世代</h2>\
             <table class=\"hvlist\">\
             <tr data-type=\"格鬥\">\
             <td>068</td><td>双倍奉还</td><td>カウンター</td><td>Counter</td>\
             <td><a>格鬥</a></td><td><a>物理</a></td>\
             <td>—</td><td>100</td><td>20</td><td>反击。</td>\
             </tr>\
             </table>",
        );
        let entries = move_list(&doc);
        assert_eq!(entries[0].type_name, "格斗");
    }

    fn entry() -> MoveEntry {
        MoveEntry {
            index: "086".into(),
            generation: "第一世代".into(),
            name: "打雷".into(),
            name_jp: "かみなり".into(),
            name_en: "Thunder".into(),
            type_name: "电".into(),
            category: "特殊".into(),
            power: "110".into(),
            accuracy: "70".into(),
            pp: "10".into(),
            text: "有几率让对手麻痹。".into(),
        }
    }

    #[test]
    fn detail_reads_effect_and_range() {
        let doc = Html::parse_document(
            "<h2><span id=\"招式附加效果\">招式附加效果</span></h2>\
             <p>有30%的几率<sup>[1]</sup>让对手陷入麻痹状态。</p>\
             <table><tbody>\
             <tr><td><a title=\"范围\">范围</a></td></tr>\
             <tr><td>图示</td></tr>\
             <tr><td>除自己以外场上一只可以攻击到的宝可梦</td></tr>\
             </tbody></table>",
        );
        let detail = move_detail(&doc, entry());
        assert_eq!(detail.effect, "有30%的几率让对手陷入麻痹状态。");
        assert_eq!(detail.range, "除自己以外场上一只可以攻击到的宝可梦");
    }

    #[test]
    fn detail_without_sections_keeps_entry_fields() {
        let doc = Html::parse_document("<p>x</p>");
        let detail = move_detail(&doc, entry());
        assert_eq!(detail.effect, "");
        assert_eq!(detail.range, "");
        assert_eq!(detail.entry.name, "打雷");
    }
}
