//! Move-table extraction (level-up and machine moves).

use scraper::{ElementRef, Html};
use tracing::debug;

use wikidex_shared::{FormMoves, MoveRow, Moves};

use crate::dom;

const METHOD_LEVEL: &str = "提升等级";
const METHOD_MACHINE: &str = "招式学习器";

/// Extract both move tables. A missing section leaves its half empty.
pub fn moves(doc: &Html) -> Moves {
    Moves {
        learned: section_moves(doc, "可学会的招式", true),
        machine: section_moves(doc, "能使用的招式学习器", false),
    }
}

/// One move section: either a single table (form 一般), or a `fulltable`
/// switcher naming forms in `toggle-p` spans followed by one `at-c`
/// table per form.
fn section_moves(doc: &Html, section_id: &str, level_up: bool) -> Vec<FormMoves> {
    let Some(heading) = dom::section_heading(doc, &[section_id]) else {
        debug!(section_id, "move section missing");
        return Vec::new();
    };
    let Some(first) = dom::find_next(doc, heading, |e| e.value().name() == "table") else {
        return Vec::new();
    };

    let mut tables = Vec::new();
    let mut form_names = Vec::new();
    if dom::has_class(first, "fulltable") {
        for span in first.select(&dom::selector("span.toggle-p")) {
            form_names.push(dom::trimmed_text(span));
        }
        let mut current = first;
        for _ in 0..form_names.len() {
            let Some(next) = dom::find_next(doc, current, |e| {
                e.value().name() == "table" && dom::has_class(e, "at-c")
            }) else {
                break;
            };
            tables.push(next);
            current = next;
        }
    } else {
        tables.push(first);
        form_names.push("一般".to_string());
    }

    tables
        .into_iter()
        .zip(form_names)
        .map(|(table, form)| FormMoves {
            form,
            data: table
                .select(&dom::selector("tr.at-c"))
                .filter_map(|row| move_row(row, level_up))
                .collect(),
        })
        .collect()
}

/// One table row. Hidden cells (class `hide` or inline display:none)
/// do not count toward the column positions.
fn move_row(row: ElementRef<'_>, level_up: bool) -> Option<MoveRow> {
    let cells: Vec<_> = row
        .select(&dom::selector("td"))
        .filter(|td| !dom::has_class(*td, "hide") && !dom::is_style_hidden(*td))
        .collect();

    let (name_cell, offsets) = if level_up {
        (cells.get(1)?, [2usize, 3, 4, 5, 6])
    } else {
        (cells.get(2)?, [3usize, 4, 5, 6, 7])
    };
    let name = name_cell
        .select(&dom::selector("a"))
        .next()
        .map(dom::trimmed_text)?;
    let flavor_text = name_cell
        .select(&dom::selector("span.explain"))
        .next()
        .and_then(|s| s.attr("title").map(str::to_string));

    let cell_text = |i: usize| cells.get(i).map(|c| dom::trimmed_text(*c));
    let link_text = |i: usize| {
        cells
            .get(i)
            .and_then(|c| c.select(&dom::selector("a")).next())
            .map(dom::trimmed_text)
    };

    Some(MoveRow {
        level_learned_at: if level_up { cell_text(0) } else { None },
        machine_used: if level_up { None } else { link_text(1) },
        method: if level_up { METHOD_LEVEL } else { METHOD_MACHINE }.to_string(),
        name,
        flavor_text,
        type_name: link_text(offsets[0])?,
        category: cell_text(offsets[1])?,
        power: cell_text(offsets[2])?,
        accuracy: cell_text(offsets[3])?,
        pp: cell_text(offsets[4])?,
    })
}
