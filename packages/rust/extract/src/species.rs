//! Whole-page species extraction.

use scraper::Html;
use tracing::debug;

use wikidex_shared::PokemonRecord;

use crate::{ImageAsset, evolution, flavor, forms, home_images, moves, names, profile, stats};

/// Everything extracted from one species page: the record to persist
/// plus the images referenced by it.
#[derive(Debug, Clone)]
pub struct SpeciesExtract {
    pub record: PokemonRecord,
    pub images: Vec<ImageAsset>,
}

/// Extract a species page into its full record.
///
/// Species with hand-authored evolution data use it instead of the
/// page's table; everything else is read from the document.
pub fn species_record(
    doc: &Html,
    name: &str,
    index: &str,
    name_en: Option<&str>,
) -> SpeciesExtract {
    let form_names = forms::form_names(doc);
    let (form_infos, mut images) = forms::form_infos(doc, &form_names, name, index);
    let (home, home_assets) = home_images::home_images(doc, name, index);
    images.extend(home_assets);

    let evolution_chains = match evolution::override_for(name) {
        Some(chains) => {
            debug!(species = name, "using hand-authored evolution chains");
            chains.clone()
        }
        None => evolution::chains(doc, name),
    };

    let record = PokemonRecord {
        name: name.to_string(),
        index: index.to_string(),
        name_en: name_en.map(str::to_string),
        profile: profile::profile(doc),
        forms: form_infos,
        stats: stats::stats(doc),
        flavor_texts: flavor::flavor_texts(doc),
        evolution_chains,
        names: names::localized_names(doc, name),
        moves: moves::moves(doc),
        home_images: home,
    };

    SpeciesExtract { record, images }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikidex_shared::{STAGE_NO_EVOLUTION, STAGE_UNEVOLVED};

    fn card(stage: &str, name: &str, image: &str) -> String {
        format!(
            "<td><table>\
             <tr><td><a class=\"image\" href=\"/wiki/File:{image}\"><img></a></td></tr>\
             <tr><td><small>{stage}</small></td></tr>\
             <tr><td class=\"textblack\"><a>{name}</a></td></tr>\
             </table></td>"
        )
    }

    fn species_page() -> Html {
        Html::parse_document(&format!(
            "<h2><span id=\"概述\">概述</span></h2>\
             <p>皮卡丘是电属性宝可梦。</p>\
             <h2><span id=\"进化\">进化</span></h2>\
             <table><tr>{}<td>亲密度高时提升等级</td>{}</tr></table>\
             <h2><span id=\"种族值\">种族值</span></h2>\
             <table>\
             <tr class=\"bgl-HP\"><td><span style=\"float:right\">35</span></td></tr>\
             <tr class=\"bgl-攻击\"><td><span style=\"float:right\">55</span></td></tr>\
             <tr class=\"bgl-防御\"><td><span style=\"float:right\">40</span></td></tr>\
             <tr class=\"bgl-特攻\"><td><span style=\"float:right\">50</span></td></tr>\
             <tr class=\"bgl-特防\"><td><span style=\"float:right\">50</span></td></tr>\
             <tr class=\"bgl-速度\"><td><span style=\"float:right\">90</span></td></tr>\
             </table>\
             <table class=\"wiki-nametable\">\
             <tr class=\"varname1\"><td>英文</td><td></td><td>Pikachu</td></tr>\
             </table>",
            card(STAGE_UNEVOLVED, "皮丘", "172Pichu.png"),
            card("1阶进化", "皮卡丘", "025Pikachu.png"),
        ))
    }

    #[test]
    fn composes_every_section_into_one_record() {
        let doc = species_page();
        let extract = species_record(&doc, "皮卡丘", "0025", Some("Pikachu"));
        let record = &extract.record;

        assert_eq!(record.name, "皮卡丘");
        assert_eq!(record.index, "0025");
        assert_eq!(record.name_en.as_deref(), Some("Pikachu"));
        assert_eq!(record.profile, "皮卡丘是电属性宝可梦。");

        assert_eq!(record.evolution_chains.len(), 1);
        let chain = &record.evolution_chains[0];
        assert_eq!(chain[0].name.as_deref(), Some("皮丘"));
        assert_eq!(chain[1].name.as_deref(), Some("皮卡丘"));
        assert_eq!(chain[1].from.as_deref(), Some("皮丘"));

        assert_eq!(record.stats.len(), 1);
        assert_eq!(record.stats[0].data.hp, "35");
        assert_eq!(record.names.en.as_deref(), Some("Pikachu"));

        // No switcher on the page: a single unnamed form, no panels.
        assert!(record.forms.is_empty());
        assert!(record.home_images.is_empty());
        assert!(extract.images.is_empty());
    }

    #[test]
    fn overridden_species_skip_the_page_table() {
        // The page carries a table, but the hand-authored data wins.
        let doc = species_page();
        let extract = species_record(&doc, "伊布", "0133", Some("Eevee"));
        let chains = &extract.record.evolution_chains;
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0][0].name.as_deref(), Some("伊布"));
        assert!(chains[0].len() > 3);
    }

    #[test]
    fn bare_page_still_yields_a_record() {
        let doc = Html::parse_document("<p>stub</p>");
        let extract = species_record(&doc, "谜拟丘", "9999", None);
        let record = &extract.record;
        assert_eq!(record.profile, "");
        assert!(record.stats.is_empty());
        assert_eq!(record.evolution_chains.len(), 1);
        assert_eq!(
            record.evolution_chains[0][0].stage.as_deref(),
            Some(STAGE_NO_EVOLUTION)
        );
        let json = serde_json::to_string(record).unwrap();
        assert!(json.contains("\"不进化\""));
    }
}
