//! Ability list and detail-page extraction.

use scraper::{ElementRef, Html};

use wikidex_shared::{AbilityBearer, AbilityDetail, AbilityEntry};

use crate::dom;

/// Title of the ability list page.
pub const ABILITY_LIST_PAGE: &str = "特性列表";

/// Empty-type template leftover in the second type column.
const EMPTY_TYPE_CELL: &str = "[[（属性）|]]";

/// Detail pages are disambiguated from same-named moves by a suffix.
pub fn detail_page_title(name: &str) -> String {
    format!("{name}（特性）")
}

/// Parse the ability list page: one `eplist` table per generation, the
/// generation read from the heading above each table.
pub fn ability_list(doc: &Html) -> Vec<AbilityEntry> {
    let mut entries = Vec::new();

    for table in doc.select(&dom::selector("table.eplist")) {
        let generation = dom::find_previous(doc, table, |e| e.value().name() == "h2")
            .map(|h| dom::trimmed_text(h).replace("引入特性", ""))
            .unwrap_or_default();

        for row in table.select(&dom::selector("tr")).skip(1) {
            let cells: Vec<_> = row.select(&dom::selector("td")).collect();
            if cells.len() < 7 {
                continue;
            }
            let Some(name) = cells[1]
                .select(&dom::selector("a"))
                .next()
                .map(dom::trimmed_text)
            else {
                continue;
            };
            entries.push(AbilityEntry {
                index: dom::trimmed_text(cells[0]).replace('*', ""),
                generation: generation.clone(),
                name,
                name_jp: dom::trimmed_text(cells[2]),
                name_en: dom::trimmed_text(cells[3]),
                text: dom::trimmed_text(cells[4]),
                common_count: count_cell(cells[5]),
                hidden_count: count_cell(cells[6]),
            });
        }
    }
    entries
}

fn count_cell(cell: ElementRef<'_>) -> u32 {
    dom::trimmed_text(cell).parse().unwrap_or(0)
}

/// Extract an ability's detail page on top of its list entry.
pub fn ability_detail(doc: &Html, entry: AbilityEntry) -> AbilityDetail {
    AbilityDetail {
        entry,
        effect: effect_text(doc),
        info: info_items(doc),
        pokemon: bearer_rows(doc),
    }
}

/// Effect prose: consecutive paragraphs after the 特性效果 heading.
fn effect_text(doc: &Html) -> String {
    let Some(heading) = dom::section_heading(doc, &["特性效果"]) else {
        return String::new();
    };
    let mut text = String::new();
    let mut current = dom::next_sibling_named(heading, "p");
    while let Some(p) = current {
        if p.value().name() != "p" {
            break;
        }
        text.push_str(&dom::text_of(p));
        current = dom::next_element_sibling(p);
    }
    text
}

/// Bullet list in the info panel (first `a-r` table).
fn info_items(doc: &Html) -> Vec<String> {
    let Some(table) = doc.select(&dom::selector("table.a-r")).next() else {
        return Vec::new();
    };
    let Some(list) = table.select(&dom::selector("ul")).next() else {
        return Vec::new();
    };
    list.select(&dom::selector("li"))
        .map(dom::trimmed_text)
        .collect()
}

/// The 具有该特性的宝可梦 table: one `bgwhite` row per species, ability
/// columns as `th` cells (first, optional second, hidden last).
fn bearer_rows(doc: &Html) -> Vec<AbilityBearer> {
    let Some(heading) = dom::section_heading(doc, &["具有该特性的宝可梦"]) else {
        return Vec::new();
    };
    let Some(table) = dom::next_sibling_named(heading, "table") else {
        return Vec::new();
    };

    let mut bearers = Vec::new();
    for row in table.select(&dom::selector("tr.bgwhite")).skip(1) {
        let cells: Vec<_> = row.select(&dom::selector("td")).collect();
        let headers: Vec<_> = row.select(&dom::selector("th")).collect();
        if cells.len() < 5 || headers.len() < 2 {
            continue;
        }

        let name = cells[2]
            .select(&dom::selector("a"))
            .map(|a| dom::trimmed_text(a))
            .collect::<Vec<_>>()
            .join("-");
        let mut types = vec![dom::trimmed_text(cells[3])];
        let second_type = dom::trimmed_text(cells[4]);
        if second_type != EMPTY_TYPE_CELL {
            types.push(second_type);
        }

        bearers.push(AbilityBearer {
            index: dom::trimmed_text(cells[0]),
            name,
            types,
            first: dom::trimmed_text(headers[0]),
            second: if headers.len() > 2 {
                Some(dom::trimmed_text(headers[1]))
            } else {
                None
            },
            hidden: headers.last().map(|h| dom::trimmed_text(*h)).unwrap_or_default(),
        });
    }
    bearers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_rows_carry_their_generation_heading() {
        let doc = Html::parse_document(
            "<h2>第三世代引入特性</h2>\
             <table class=\"eplist\">\
             <tr><th>#</th><th>特性</th></tr>\
             <tr><td>001</td><td><a>恶臭</a></td><td>あくしゅう</td><td>Stench</td>\
             <td>通过释放臭臭的气味……</td><td>5</td><td>6</td></tr>\
             </table>\
             <h2>第四世代引入特性</h2>\
             <table class=\"eplist\">\
             <tr><th>#</th><th>特性</th></tr>\
             <tr><td>082*</td><td><a>贪吃鬼</a></td><td>くいしんぼう</td><td>Gluttony</td>\
             <td>原本ＨＰ变得很少时……</td><td>22</td><td></td></tr>\
             </table>",
        );
        let entries = ability_list(&doc);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].generation, "第三世代");
        assert_eq!(entries[0].name, "恶臭");
        assert_eq!(entries[0].common_count, 5);
        assert_eq!(entries[0].hidden_count, 6);
        assert_eq!(entries[1].index, "082");
        assert_eq!(entries[1].generation, "第四世代");
        assert_eq!(entries[1].hidden_count, 0);
    }

    #[test]
    fn detail_page_title_is_disambiguated() {
        assert_eq!(detail_page_title("贪吃鬼"), "贪吃鬼（特性）");
    }

    fn entry() -> AbilityEntry {
        AbilityEntry {
            index: "082".into(),
            generation: "第四世代".into(),
            name: "贪吃鬼".into(),
            name_jp: "くいしんぼう".into(),
            name_en: "Gluttony".into(),
            text: "提前吃树果。".into(),
            common_count: 22,
            hidden_count: 11,
        }
    }

    #[test]
    fn detail_collects_effect_info_and_bearers() {
        let doc = Html::parse_document(
            "<table class=\"a-r\"><tr><td><ul>\
             <li>第四世代引入。</li><li>隐藏特性常见。</li>\
             </ul></td></tr></table>\
             <h2><span id=\"特性效果\">特性效果</span></h2>\
             <p>ＨＰ降到一半时</p><p>就会吃掉树果。</p>\
             <h2><span id=\"具有该特性的宝可梦\">具有该特性的宝可梦</span></h2>\
             <table>\
             <tr class=\"bgwhite\"><th>表头</th></tr>\
             <tr class=\"bgwhite\">\
             <td>0025</td><td>img</td><td><a>皮卡丘</a></td>\
             <td>电</td><td>[[（属性）|]]</td>\
             <th>静电</th><th>避雷针</th>\
             </tr>\
             <tr class=\"bgwhite\">\
             <td>0441</td><td>img</td><td><a>聒噪鸟</a></td>\
             <td>一般</td><td>飞行</td>\
             <th>胆量</th><th>机灵</th><th>贪吃鬼</th>\
             </tr>\
             </table>",
        );
        let detail = ability_detail(&doc, entry());
        assert_eq!(detail.effect, "ＨＰ降到一半时就会吃掉树果。");
        assert_eq!(detail.info.len(), 2);
        assert_eq!(detail.pokemon.len(), 2);

        let first = &detail.pokemon[0];
        assert_eq!(first.name, "皮卡丘");
        assert_eq!(first.types, vec!["电"]);
        assert_eq!(first.first, "静电");
        assert_eq!(first.second, None);
        assert_eq!(first.hidden, "避雷针");

        let second = &detail.pokemon[1];
        assert_eq!(second.types, vec!["一般", "飞行"]);
        assert_eq!(second.second.as_deref(), Some("机灵"));
        assert_eq!(second.hidden, "贪吃鬼");
    }

    #[test]
    fn detail_without_sections_keeps_entry_fields() {
        let doc = Html::parse_document("<p>x</p>");
        let detail = ability_detail(&doc, entry());
        assert_eq!(detail.effect, "");
        assert!(detail.info.is_empty());
        assert!(detail.pokemon.is_empty());
        assert_eq!(detail.entry.name, "贪吃鬼");
    }
}
