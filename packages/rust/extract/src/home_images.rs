//! Pokémon HOME render extraction.
//!
//! The 形象 section carries a gallery table of HOME renders: one cell
//! per form, shiny variants marked by a star icon and merged into the
//! matching normal entry by name.

use scraper::{ElementRef, Html};

use wikidex_shared::HomeImage;

use crate::dom;
use crate::{ImageAsset, ImageKind};

/// Extract the HOME gallery, returning the merged entries plus the
/// image assets to download.
pub fn home_images(doc: &Html, species: &str, index: &str) -> (Vec<HomeImage>, Vec<ImageAsset>) {
    let mut items: Vec<HomeImage> = Vec::new();
    let mut assets = Vec::new();

    let Some(table) = gallery_table(doc) else {
        return (items, assets);
    };

    for cell in table.select(&dom::selector("td")) {
        let Some(url) = cell
            .select(&dom::selector("img"))
            .find_map(|img| img.attr("data-url").map(str::to_string))
        else {
            continue;
        };

        let is_shiny = cell
            .select(&dom::selector(r#"img[alt="ShinyHOMEStar.png"]"#))
            .next()
            .is_some();
        // Sweet decorations on Alcremie forms are only told apart by
        // the icon's alt text.
        let extra = cell
            .select(&dom::selector("img"))
            .filter_map(|img| img.attr("alt"))
            .filter(|alt| alt.contains("糖饰"))
            .last()
            .map(|alt| format!("-{alt}"))
            .unwrap_or_default();

        let form_name = dom::trimmed_text(cell).replace('?', "？");
        let item_name = if form_name.is_empty() {
            species.to_string()
        } else {
            format!("{species}-{form_name}{extra}")
        };
        let stem = if form_name.is_empty() {
            format!("{index}-{species}{extra}")
        } else {
            format!("{index}-{species}-{form_name}{extra}")
        };

        if is_shiny {
            let file = format!("{stem}-shiny.png");
            if let Some(existing) = items.iter_mut().find(|i| i.name == item_name) {
                existing.shiny = Some(file.clone());
            } else {
                items.push(HomeImage {
                    name: item_name,
                    image: None,
                    shiny: Some(file.clone()),
                });
            }
            assets.push(ImageAsset {
                kind: ImageKind::Home,
                file_name: file,
                url,
            });
        } else {
            let file = format!("{stem}.png");
            items.push(HomeImage {
                name: item_name,
                image: Some(file.clone()),
                shiny: None,
            });
            assets.push(ImageAsset {
                kind: ImageKind::Home,
                file_name: file,
                url,
            });
        }
    }

    (items, assets)
}

/// The gallery: inside the div after the 形象 heading, three levels up
/// from the HOME link.
fn gallery_table(doc: &Html) -> Option<ElementRef<'_>> {
    let heading = dom::section_heading(doc, &["形象"])?;
    let div = dom::next_sibling_named(heading, "div")?;
    let link = div
        .select(&dom::selector(r#"a[title="Pokémon HOME"]"#))
        .next()?;
    dom::nth_ancestor(link, 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(cells: &str) -> String {
        format!(
            "<h2><span id=\"形象\">形象</span></h2>\
             <div><table><tbody>\
             <tr><th><a title=\"Pokémon HOME\">HOME</a></th></tr>\
             <tr>{cells}</tr>\
             </tbody></table></div>"
        )
    }

    #[test]
    fn normal_and_shiny_cells_merge_by_name() {
        let html = gallery(
            "<td><img data-url=\"//media.example/n.png\"></td>\
             <td><img alt=\"ShinyHOMEStar.png\" data-url=\"//media.example/s.png\"></td>",
        );
        let doc = Html::parse_document(&html);
        let (items, assets) = home_images(&doc, "皮卡丘", "0025");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "皮卡丘");
        assert_eq!(items[0].image.as_deref(), Some("0025-皮卡丘.png"));
        assert_eq!(items[0].shiny.as_deref(), Some("0025-皮卡丘-shiny.png"));

        assert_eq!(assets.len(), 2);
        assert!(assets.iter().all(|a| a.kind == ImageKind::Home));
        assert_eq!(assets[0].url, "//media.example/n.png");
        assert_eq!(assets[1].file_name, "0025-皮卡丘-shiny.png");
    }

    #[test]
    fn form_label_text_joins_the_name() {
        let html = gallery(
            "<td><img data-url=\"//media.example/f.png\">阿罗拉的样子</td>",
        );
        let doc = Html::parse_document(&html);
        let (items, _) = home_images(&doc, "六尾", "0037");
        assert_eq!(items[0].name, "六尾-阿罗拉的样子");
        assert_eq!(
            items[0].image.as_deref(),
            Some("0037-六尾-阿罗拉的样子.png")
        );
    }

    #[test]
    fn cells_without_an_image_are_skipped() {
        let html = gallery("<td>备注</td>");
        let doc = Html::parse_document(&html);
        let (items, assets) = home_images(&doc, "某", "0001");
        assert!(items.is_empty());
        assert!(assets.is_empty());
    }

    #[test]
    fn missing_section_yields_nothing() {
        let doc = Html::parse_document("<p>x</p>");
        let (items, assets) = home_images(&doc, "某", "0001");
        assert!(items.is_empty());
        assert!(assets.is_empty());
    }
}
