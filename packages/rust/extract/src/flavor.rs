//! Pokédex flavor-text extraction, grouped by generation and version.

use scraper::{ElementRef, Html};

use wikidex_shared::{Generation, Version};

use crate::dom;

const SECTION_IDS: &[&str] = &["图鉴介绍", "圖鑑介绍", "圖鑑介紹"];

/// Extract the per-version dex descriptions, one [`Generation`] per
/// generation header in the flavor table.
pub fn flavor_texts(doc: &Html) -> Vec<Generation> {
    let Some(heading) = dom::section_heading(doc, SECTION_IDS) else {
        return Vec::new();
    };
    let Some(table) = dom::next_element_sibling(heading) else {
        return Vec::new();
    };

    let mut generations = Vec::new();
    for header in table.select(&dom::selector("th.roundytop-5")) {
        let name = dom::trimmed_text(header);
        let versions = generation_versions(header);
        if !versions.is_empty() {
            generations.push(Generation { name, versions });
        }
    }
    generations
}

/// The version rows for one generation header: the row after the
/// header row holds nested tables whose rows pair a version-link cell
/// with a text cell.
fn generation_versions(header: ElementRef<'_>) -> Vec<Version> {
    let Some(header_row) = dom::ancestor_named(header, "tr") else {
        return Vec::new();
    };
    let Some(body_row) = dom::next_sibling_named(header_row, "tr") else {
        return Vec::new();
    };

    let mut versions: Vec<Version> = Vec::new();
    for inner in body_row.select(&dom::selector("table")) {
        for row in dom::child_elements_named(
            dom::child_elements_named(inner, "tbody")
                .first()
                .copied()
                .unwrap_or(inner),
            "tr",
        ) {
            let cells = dom::child_elements_named(row, "td");
            let (Some(version_cell), Some(text_cell)) = (cells.first(), cells.get(1)) else {
                continue;
            };
            let text = version_text(*text_cell);
            // Template leftovers mean the game has no entry yet.
            if text.is_empty() || text.contains("{{{") || text.contains("}}}") {
                continue;
            }
            for anchor in version_cell.select(&dom::selector("a")) {
                let name = dom::trimmed_text(anchor);
                if name.is_empty() || versions.iter().any(|v| v.name == name) {
                    continue;
                }
                versions.push(Version {
                    name,
                    group: anchor.attr("title").map(str::to_string),
                    text: text.clone(),
                });
            }
        }
    }
    versions
}

/// Assemble a text cell's content: `<small>` asides end their line,
/// loose text joins in, and other elements contribute only when they
/// wrap a single text node. Spaces are presentation artifacts and are
/// removed.
fn version_text(cell: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in cell.children() {
        if let Some(el) = ElementRef::wrap(child) {
            if el.value().name() == "small" {
                out.push_str(dom::trimmed_text(el).as_str());
                out.push('\n');
            } else if let Some(text) = single_text_child(el) {
                out.push_str(text.trim());
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text.trim());
        }
    }
    out.trim().replace(' ', "")
}

fn single_text_child(el: ElementRef<'_>) -> Option<&str> {
    let mut children = el.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    only.value().as_text().map(|t| &**t)
}
