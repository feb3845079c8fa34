//! National-index species list extraction.

use scraper::Html;

use wikidex_shared::SpeciesEntry;

use crate::dom;

/// Title of the simplified national-index list page.
pub const SPECIES_LIST_PAGE: &str = "宝可梦列表（按全国图鉴编号）/简单版";

/// Species whose official simplified-Chinese names were revised after
/// the list page was authored; its rows still carry the old names, but
/// the species pages live under the new ones.
const RENAMED_SPECIES: [(&str, &str); 3] = [
    ("偷儿狐", "狡小狐"),
    ("狐大盗", "猾大狐"),
    ("流氓熊猫", "霸道熊猫"),
];

/// The current name for a species, applying any pending rename.
pub fn current_name(name: String) -> String {
    RENAMED_SPECIES
        .iter()
        .find(|(old, _)| *old == name)
        .map_or(name, |(_, new)| (*new).to_string())
}

/// Parse the list page into one entry per species. Only rows with the
/// four data cells count; heading and spacer rows have fewer.
pub fn species_list(doc: &Html) -> Vec<SpeciesEntry> {
    let Some(table) = doc.select(&dom::selector("table.eplist")).next() else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for row in table.select(&dom::selector("tr")) {
        let cells: Vec<_> = row.select(&dom::selector("td")).collect();
        if cells.len() != 4 {
            continue;
        }
        let index = dom::trimmed_text(cells[0]).replace('#', "");
        let Some(name) = cells[1]
            .select(&dom::selector("a"))
            .next()
            .map(dom::trimmed_text)
        else {
            continue;
        };
        let Some(name_en) = cells[3]
            .select(&dom::selector("a"))
            .next()
            .map(dom::trimmed_text)
        else {
            continue;
        };
        entries.push(SpeciesEntry {
            index,
            name: current_name(name),
            name_en,
        });
    }
    entries
}
