//! Chain assembly from the flattened, alternating cell sequence.

use scraper::{ElementRef, Html};

use wikidex_shared::{EvolutionChain, EvolutionNode, STAGE_BABY, STAGE_UNEVOLVED};

use crate::dom;
use crate::evolution::condition;
use crate::evolution::node::{NodeFields, extract_node};

/// Artifact heading cell with no data ("if evolving, then…").
pub const CONDITION_PLACEHOLDER: &str = "进化时，如果……";

/// Flatten branch rows into the ordered cell list the assembler walks:
/// direct-child `<td>`s only, hidden cells and the placeholder heading
/// excluded. The result strictly alternates node / condition cells.
pub fn flatten_cells<'a>(rows: &[ElementRef<'a>]) -> Vec<ElementRef<'a>> {
    let mut cells = Vec::new();
    for row in rows {
        for td in dom::child_elements_named(*row, "td") {
            if dom::has_class(td, "hide") {
                continue;
            }
            if dom::trimmed_text(td) == CONDITION_PLACEHOLDER {
                continue;
            }
            cells.push(td);
        }
    }
    cells
}

/// Assemble one branch's stage-linked node list.
///
/// Cell 0 is the chain root; every even cell i≥2 is a node whose
/// condition sits at i−1. The "from" candidate is re-extracted from the
/// cell at i−2 rather than read from built state, so condition arrows
/// that cross stages cannot drift the ancestry.
pub fn assemble_chain(doc: &Html, rows: &[ElementRef<'_>]) -> EvolutionChain {
    let cells = flatten_cells(rows);
    let mut nodes: EvolutionChain = Vec::new();

    for (index, cell) in cells.iter().enumerate() {
        if index == 0 {
            let fields = extract_node(doc, *cell);
            nodes.push(EvolutionNode {
                name: fields.name,
                stage: fields.stage,
                text: None,
                image: fields.image,
                back_text: None,
                from: None,
                form_name: fields.form_name,
            });
        } else if index % 2 == 0 {
            let condition = condition::extract_condition(cells[index - 1]);
            let fields = extract_node(doc, *cell);
            let from_fields = extract_node(doc, cells[index - 2]);
            let from = resolve_ancestor(&from_fields, &fields, nodes.last());

            nodes.push(EvolutionNode {
                name: fields.name,
                stage: fields.stage,
                text: Some(condition.text),
                image: fields.image,
                back_text: Some(condition.back_text),
                from,
                form_name: fields.form_name,
            });
        }
        // Odd indices are condition cells, consumed above.
    }

    nodes
}

/// Ancestor tie-break:
/// - differing stages → the from-candidate is the ancestor;
/// - equal stages off the root labels → same-stage siblings (alternate
///   forms) share the upstream parent, so propagate the previously
///   assembled node's own ancestor;
/// - equal stages at a root label → no ancestor.
fn resolve_ancestor(
    from: &NodeFields,
    current: &NodeFields,
    previous: Option<&EvolutionNode>,
) -> Option<String> {
    if from.stage != current.stage {
        return from.name.clone();
    }
    let at_root_label = matches!(
        current.stage.as_deref(),
        Some(STAGE_UNEVOLVED) | Some(STAGE_BABY)
    );
    if at_root_label {
        None
    } else {
        previous.and_then(|node| node.from.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One creature card cell, laid out the way the wiki nests them.
    fn node_cell(stage: &str, name: &str, image: &str) -> String {
        format!(
            "<td><table>\
             <tr><td><a class=\"image\" href=\"/wiki/File:{image}\"><img></a></td></tr>\
             <tr><td><small>{stage}</small></td></tr>\
             <tr><td class=\"textblack\"><a>{name}</a></td></tr>\
             </table></td>"
        )
    }

    fn condition_cell(text: &str) -> String {
        format!("<td>{text}</td>")
    }

    fn chain_rows(doc: &Html) -> Vec<ElementRef<'_>> {
        let table = doc.select(&dom::selector("table.evo")).next().unwrap();
        let tbody = table.select(&dom::selector("tbody")).next().unwrap();
        dom::child_elements_named(tbody, "tr")
    }

    #[test]
    fn linear_three_stage_chain() {
        let html = format!(
            "<table class=\"evo\"><tr>{}{}{}{}{}</tr></table>",
            node_cell("未进化", "皮丘", "172Pichu.png"),
            condition_cell("亲密度高时提升等级"),
            node_cell("1阶进化", "皮卡丘", "025Pikachu.png"),
            condition_cell("使用雷之石"),
            node_cell("2阶进化", "雷丘", "026Raichu.png"),
        );
        let doc = Html::parse_document(&html);
        let chain = assemble_chain(&doc, &chain_rows(&doc));

        assert_eq!(chain.len(), 3);

        let root = &chain[0];
        assert_eq!(root.name.as_deref(), Some("皮丘"));
        assert_eq!(root.from, None);
        assert_eq!(root.text, None);
        assert_eq!(root.back_text, None);

        assert_eq!(chain[1].name.as_deref(), Some("皮卡丘"));
        assert_eq!(chain[1].text.as_deref(), Some("亲密度高时提升等级"));
        assert_eq!(chain[1].from.as_deref(), Some("皮丘"));

        assert_eq!(chain[2].name.as_deref(), Some("雷丘"));
        assert_eq!(chain[2].from.as_deref(), Some("皮卡丘"));
        assert_eq!(chain[2].image.as_deref(), Some("026Raichu.png"));
    }

    #[test]
    fn same_stage_siblings_share_the_upstream_parent() {
        // Two alternate stage-1 forms: the second must inherit the first
        // sibling's ancestor, never point at the sibling itself.
        let html = format!(
            "<table class=\"evo\"><tr>{}{}{}{}{}</tr></table>",
            node_cell("未进化", "六尾", "037Vulpix.png"),
            condition_cell("使用火之石"),
            node_cell("1阶进化", "九尾", "038Ninetales.png"),
            condition_cell("使用冰之石"),
            node_cell("1阶进化", "九尾-阿罗拉", "038Ninetales-Alola.png"),
        );
        let doc = Html::parse_document(&html);
        let chain = assemble_chain(&doc, &chain_rows(&doc));

        assert_eq!(chain[1].from.as_deref(), Some("六尾"));
        assert_eq!(chain[2].from.as_deref(), Some("六尾"));
    }

    #[test]
    fn same_stage_at_root_label_keeps_null_ancestor() {
        let html = format!(
            "<table class=\"evo\"><tr>{}{}{}</tr></table>",
            node_cell("未进化", "形态甲", "a.png"),
            condition_cell("白天"),
            node_cell("未进化", "形态乙", "b.png"),
        );
        let doc = Html::parse_document(&html);
        let chain = assemble_chain(&doc, &chain_rows(&doc));
        assert_eq!(chain[1].from, None);
    }

    #[test]
    fn condition_with_back_arrow_fills_back_text() {
        let html = format!(
            "<table class=\"evo\"><tr>{}{}{}</tr></table>",
            node_cell("未进化", "好运蛋", "440Happiny.png"),
            condition_cell("携带圆石白天提升等级→←生蛋"),
            node_cell("1阶进化", "吉利蛋", "113Chansey.png"),
        );
        let doc = Html::parse_document(&html);
        let chain = assemble_chain(&doc, &chain_rows(&doc));
        assert_eq!(chain[1].text.as_deref(), Some("携带圆石白天提升等级"));
        assert_eq!(chain[1].back_text.as_deref(), Some("生蛋"));
    }

    #[test]
    fn hidden_and_placeholder_cells_are_excluded() {
        let html = format!(
            "<table class=\"evo\"><tr>\
             <td class=\"hide\">ignored</td>\
             <td>进化时，如果……</td>\
             {}{}{}</tr></table>",
            node_cell("未进化", "小拳石", "074Geodude.png"),
            condition_cell("通讯交换"),
            node_cell("1阶进化", "隆隆石", "075Graveler.png"),
        );
        let doc = Html::parse_document(&html);
        let cells = flatten_cells(&chain_rows(&doc));
        assert_eq!(cells.len(), 3);

        let chain = assemble_chain(&doc, &chain_rows(&doc));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].name.as_deref(), Some("小拳石"));
    }

    #[test]
    fn cells_spread_across_rows_flatten_in_order() {
        let html = format!(
            "<table class=\"evo\">\
             <tr>{}{}</tr>\
             <tr>{}</tr>\
             </table>",
            node_cell("未进化", "甲", "a.png"),
            condition_cell("等级20以上"),
            node_cell("1阶进化", "乙", "b.png"),
        );
        let doc = Html::parse_document(&html);
        let chain = assemble_chain(&doc, &chain_rows(&doc));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[1].text.as_deref(), Some("等级20以上"));
        assert_eq!(chain[1].from.as_deref(), Some("甲"));
    }
}
