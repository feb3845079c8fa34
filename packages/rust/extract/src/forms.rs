//! Per-form info-panel extraction.
//!
//! A species page carries one info panel per form (base, regional,
//! Mega, Gigantamax), each a `table.roundy.a-r.at-c`. Panels are paired
//! positionally with the names from the form switcher table; panels
//! past the name list are decorative duplicates and are ignored.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use wikidex_shared::{AbilitySlot, CatchRate, Experience, FormInfo, GenderRate};

use crate::dom;
use crate::{ImageAsset, ImageKind};

/// Form display names from the form switcher, in panel order. Pages
/// without a switcher have a single unnamed form.
pub fn form_names(doc: &Html) -> Vec<String> {
    let Some(table) = doc.select(&dom::selector("table#multi-pm-form-table")).next() else {
        return vec![String::new()];
    };
    table
        .select(&dom::selector("tr.md-hide:not(.hide)"))
        .filter_map(|row| {
            row.select(&dom::selector("th"))
                .next()
                .map(dom::trimmed_text)
        })
        .collect()
}

/// Extract every form's info panel, plus the official artwork assets
/// referenced by the panels.
pub fn form_infos(
    doc: &Html,
    names: &[String],
    species: &str,
    species_index: &str,
) -> (Vec<FormInfo>, Vec<ImageAsset>) {
    let mut infos = Vec::new();
    let mut assets = Vec::new();

    let panel_selector = dom::selector("table.roundy.a-r.at-c");
    let panels = doc.select(&panel_selector);
    for (position, panel) in panels.enumerate() {
        let Some(base) = names.get(position) else {
            break;
        };
        let name = qualified_name(base, species);
        let index = if position == 0 {
            species_index.to_string()
        } else {
            format!("{species_index}.{position}")
        };
        let image = format!("{index}-{name}.png");

        let mut info = FormInfo {
            is_mega: name.contains("超级"),
            is_gmax: !name.contains("超级") && name.contains("极巨化"),
            name,
            index,
            image: image.clone(),
            types: Vec::new(),
            genus: None,
            ability: Vec::new(),
            experience: None,
            height: None,
            weight: None,
            gender_rate: None,
            shape: None,
            color: None,
            catch_rate: None,
            egg_groups: Vec::new(),
        };

        for cell in panel.select(&dom::selector(".fulltable")) {
            fill_from_cell(doc, cell, &mut info);
        }
        fill_panel_fields(doc, panel, &mut info);

        if let Some(url) = official_artwork_url(panel) {
            assets.push(ImageAsset {
                kind: ImageKind::Official,
                file_name: image,
                url,
            });
        }
        infos.push(info);
    }

    (infos, assets)
}

fn qualified_name(base: &str, species: &str) -> String {
    if base.is_empty() {
        species.to_string()
    } else if base.contains(species) {
        base.to_string()
    } else {
        format!("{species}-{base}")
    }
}

/// Fields keyed by the labelled links inside each `fulltable` cell.
fn fill_from_cell(doc: &Html, cell: ElementRef<'_>, info: &mut FormInfo) {
    if has_titled_link(cell, "属性") {
        info.types = cell
            .select(&dom::selector("span.type-box-9-text"))
            .map(dom::trimmed_text)
            .collect();
    }

    if has_titled_link(cell, "分类") {
        info.genus = cell
            .select(&dom::selector("td > a"))
            .next()
            .map(dom::trimmed_text);
    }

    if let Some(link) = titled_link(cell, "特性") {
        info.ability = abilities_after(doc, link);
    }

    if has_titled_link(cell, "经验值") {
        if let Some(table) = cell.select(&dom::selector("td > table")).next() {
            info.experience = experience_from(table);
        }
    }

    let text: String = dom::text_of(cell);
    if text.contains("身高") {
        info.height = cell
            .select(&dom::selector("td.roundy"))
            .next()
            .map(dom::trimmed_text);
    }
    if text.contains("体重") {
        info.weight = cell
            .select(&dom::selector("td.roundy"))
            .next()
            .map(dom::trimmed_text);
    }
}

fn titled_link<'a>(scope: ElementRef<'a>, title: &str) -> Option<ElementRef<'a>> {
    let sel = dom::selector(&format!(r#"a[title="{title}"]"#));
    scope.select(&sel).next()
}

fn has_titled_link(scope: ElementRef<'_>, title: &str) -> bool {
    titled_link(scope, title).is_some()
}

/// Ability slots: the table after the 特性 label holds regular
/// abilities in its first cell and hidden abilities in its second.
fn abilities_after(doc: &Html, link: ElementRef<'_>) -> Vec<AbilitySlot> {
    let Some(label_holder) = link.parent().and_then(ElementRef::wrap) else {
        return Vec::new();
    };
    let Some(table) = dom::find_next(doc, label_holder, |e| e.value().name() == "table") else {
        return Vec::new();
    };
    let cells: Vec<_> = table.select(&dom::selector("td")).collect();

    let mut slots = Vec::new();
    if let Some(regular) = cells.first() {
        for a in regular.select(&dom::selector("a")) {
            slots.push(AbilitySlot {
                name: dom::trimmed_text(a),
                is_hidden: false,
            });
        }
    }
    if let Some(hidden) = cells.get(1) {
        for a in hidden.select(&dom::selector("a")) {
            slots.push(AbilitySlot {
                name: dom::trimmed_text(a),
                is_hidden: true,
            });
        }
    }
    slots
}

fn experience_from(table: ElementRef<'_>) -> Option<Experience> {
    let number = table
        .select(&dom::selector("td"))
        .next()
        .and_then(dom::first_child_text)?;
    let speed = table
        .select(&dom::selector("small"))
        .next()
        .map(|s| dom::trimmed_text(s).replace('（', "").replace('）', ""))
        .unwrap_or_default();
    Some(Experience { number, speed })
}

/// Panel-level fields keyed off labelled links anywhere in the panel.
fn fill_panel_fields(doc: &Html, panel: ElementRef<'_>, info: &mut FormInfo) {
    if let Some(link) = titled_link(panel, "宝可梦列表（按性别比例分类）") {
        info.gender_rate = gender_rate_after(doc, link);
    }
    if let Some(link) = titled_link(panel, "宝可梦列表（按体形分类）") {
        info.shape = table_after(doc, link)
            .and_then(|t| t.select(&dom::selector("a")).next())
            .and_then(|a| a.attr("title").map(str::to_string));
    }
    if let Some(link) = titled_link(panel, "宝可梦列表（按颜色分类）") {
        info.color = table_after(doc, link)
            .and_then(|t| t.select(&dom::selector("span")).next())
            .map(dom::trimmed_text);
    }
    if let Some(link) = titled_link(panel, "捕获率") {
        info.catch_rate = table_after(doc, link)
            .and_then(|t| t.select(&dom::selector("td")).next())
            .and_then(catch_rate_from);
    }
    if let Some(link) = titled_link(panel, "宝可梦培育") {
        if let Some(first_cell) = table_after(doc, link)
            .and_then(|t| t.select(&dom::selector("td")).next())
        {
            info.egg_groups = first_cell
                .select(&dom::selector("a"))
                .map(|a| dom::trimmed_text(a).replace('群', ""))
                .collect();
        }
    }
}

fn table_after<'a>(doc: &'a Html, link: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let holder = link.parent().and_then(ElementRef::wrap)?;
    dom::find_next(doc, holder, |e| e.value().name() == "table")
}

static PERCENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.?\d*%").unwrap());

fn gender_rate_after(doc: &Html, link: ElementRef<'_>) -> Option<GenderRate> {
    let table = table_after(doc, link)?;
    let male = percent_in(table, "color:#00F;");
    let female = percent_in(table, "color:#FF6060;");
    match (male, female) {
        (None, None) => None,
        (male, female) => Some(GenderRate { male, female }),
    }
}

fn percent_in(table: ElementRef<'_>, style: &str) -> Option<String> {
    let sel = dom::selector(&format!(r#"span[style="{style}"]"#));
    let span = table.select(&sel).next()?;
    let text = dom::trimmed_text(span);
    PERCENT.find(&text).map(|m| m.as_str().to_string())
}

fn catch_rate_from(cell: ElementRef<'_>) -> Option<CatchRate> {
    let number = dom::first_child_text(cell)?;
    let rate = cell
        .select(&dom::selector("span"))
        .next()
        .map(dom::trimmed_text);
    Some(CatchRate { number, rate })
}

fn official_artwork_url(panel: ElementRef<'_>) -> Option<String> {
    let holder = panel
        .select(&dom::selector(".roundy.bgwhite.fulltable"))
        .next()?;
    let img = holder.select(&dom::selector("img")).next()?;
    img.attr("data-url").map(str::to_string)
}
