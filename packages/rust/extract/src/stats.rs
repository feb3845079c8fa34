//! Base-stat table extraction.

use scraper::{ElementRef, Html};

use wikidex_shared::{FormStats, StatBlock};

use crate::dom;

/// Extract base stats, one [`FormStats`] per form.
///
/// A multi-form page puts a switcher table (`at-c`) first, naming the
/// forms in `toggle-pbase` spans; the per-form stat tables follow it in
/// document order. A single-form page has the stat table directly and
/// the form is labelled 一般.
pub fn stats(doc: &Html) -> Vec<FormStats> {
    let Some(heading) = dom::section_heading(doc, &["种族值"]) else {
        return Vec::new();
    };
    let Some(first) = dom::find_next(doc, heading, |e| e.value().name() == "table") else {
        return Vec::new();
    };

    let mut tables = Vec::new();
    let mut form_names = Vec::new();
    if dom::has_class(first, "at-c") {
        for span in first.select(&dom::selector("span.toggle-pbase")) {
            form_names.push(dom::trimmed_text(span));
        }
        let mut current = first;
        for _ in 0..form_names.len() {
            let Some(next) = dom::find_next(doc, current, |e| e.value().name() == "table") else {
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
        .filter_map(|(table, form)| {
            stat_block(table).map(|data| FormStats { form, data })
        })
        .collect()
}

fn stat_block(table: ElementRef<'_>) -> Option<StatBlock> {
    Some(StatBlock {
        hp: stat_value(table, "bgl-HP")?,
        attack: stat_value(table, "bgl-攻击")?,
        defense: stat_value(table, "bgl-防御")?,
        sp_attack: stat_value(table, "bgl-特攻")?,
        sp_defense: stat_value(table, "bgl-特防")?,
        speed: stat_value(table, "bgl-速度")?,
    })
}

fn stat_value(table: ElementRef<'_>, row_class: &str) -> Option<String> {
    let sel = dom::selector(&format!(r#"tr.{row_class} span[style="float:right"]"#));
    table.select(&sel).next().map(dom::text_of)
}
