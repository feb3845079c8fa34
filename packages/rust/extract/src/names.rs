//! Localized name table extraction.

use scraper::{ElementRef, Html};

use wikidex_shared::LocalizedNames;

use crate::dom;

/// Extract the species' names in every language the page lists.
///
/// The name table (`wiki-nametable`) holds one `varname1` row per
/// language, marked by a language label somewhere in the row. Japanese
/// and Korean are carried in `lang`-tagged spans instead.
pub fn localized_names(doc: &Html, species: &str) -> LocalizedNames {
    let mut names = LocalizedNames {
        zh_hans: species.to_string(),
        zh_hant: None,
        en: None,
        fr: None,
        es: None,
        de: None,
        it: None,
        ja: None,
        ko: None,
    };

    let Some(table) = doc.select(&dom::selector("table.wiki-nametable")).next() else {
        return names;
    };

    for row in table.select(&dom::selector("tr.varname1")) {
        // The traditional-Chinese row keeps only the leading content,
        // before the romanization markup that follows it in-cell.
        if row_has_marker(row, "任天堂") {
            if let Some(value) = leading_cell_text(row) {
                names.zh_hant.get_or_insert(value);
            }
        }
        let Some(value) = full_cell_text(row) else {
            continue;
        };
        if row_has_marker(row, "英文") {
            names.en.get_or_insert(value);
        } else if row_has_marker(row, "法文") {
            names.fr.get_or_insert(value);
        } else if row_has_marker(row, "西班牙文") {
            names.es.get_or_insert(value);
        } else if row_has_marker(row, "德文") {
            names.de.get_or_insert(value);
        } else if row_has_marker(row, "意大利文") {
            names.it.get_or_insert(value);
        }
    }

    names.ja = lang_span(table, "ja");
    names.ko = lang_span(table, "ko");
    names
}

fn row_has_marker(row: ElementRef<'_>, marker: &str) -> bool {
    row.text().any(|t| t.contains(marker))
}

fn name_cell(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    dom::child_elements_named(row, "td").get(2).copied()
}

fn leading_cell_text(row: ElementRef<'_>) -> Option<String> {
    name_cell(row)
        .and_then(dom::first_child_text)
        .filter(|s| !s.is_empty())
}

fn full_cell_text(row: ElementRef<'_>) -> Option<String> {
    name_cell(row)
        .map(dom::trimmed_text)
        .filter(|s| !s.is_empty())
}

fn lang_span(table: ElementRef<'_>, lang: &str) -> Option<String> {
    let sel = dom::selector(&format!(r#"span[lang="{lang}"]"#));
    table
        .select(&sel)
        .next()
        .map(dom::trimmed_text)
        .filter(|s| !s.is_empty())
}
