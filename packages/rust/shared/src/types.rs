//! Domain types for the scraped wiki records.
//!
//! Field names and ordering mirror the persisted JSON schema exactly;
//! every record is written once after extraction and never mutated.
//! Optional fields that the scraper only fills when the page has the
//! matching section are marked `skip_serializing_if` so absent data
//! stays absent in the output files.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Evolution chains
// ---------------------------------------------------------------------------

/// Stage marker on a chain root that has not evolved yet.
pub const STAGE_UNEVOLVED: &str = "未进化";
/// Stage marker on a baby-stage chain root.
pub const STAGE_BABY: &str = "幼年";
/// Synthetic stage used when a page has no evolution section at all.
pub const STAGE_NO_EVOLUTION: &str = "不进化";

/// One creature in an evolution chain.
///
/// All fields are optional: extraction is best-effort and a cell with
/// missing substructure yields a node with empty fields rather than
/// aborting the chain. `from` names the ancestor node within the same
/// chain; roots carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub name: Option<String>,
    /// Stage marker text (`未进化`, `幼年`, `1阶进化`, `2阶进化`, `不进化`).
    pub stage: Option<String>,
    /// Forward evolution condition text (empty string when the cell is blank).
    pub text: Option<String>,
    /// Artwork file name, taken from the cell's `File:` image link.
    pub image: Option<String>,
    /// Reverse/back-transition condition (e.g. "生蛋" revert cases).
    pub back_text: Option<String>,
    /// Ancestor node name within the same chain; `None` for roots.
    pub from: Option<String>,
    /// Alternate-form qualifier (regional form or form change).
    pub form_name: Option<String>,
}

impl EvolutionNode {
    /// A node with every field empty.
    pub fn empty() -> Self {
        Self {
            name: None,
            stage: None,
            text: None,
            image: None,
            back_text: None,
            from: None,
            form_name: None,
        }
    }
}

/// One branch of a species' evolutionary line, in assembly order.
pub type EvolutionChain = Vec<EvolutionNode>;

/// All branches for one species (more than one when the page encodes
/// alternate regional/time-of-day variants in a single table).
pub type ChainSet = Vec<EvolutionChain>;

// ---------------------------------------------------------------------------
// Species record
// ---------------------------------------------------------------------------

/// The full per-species record, persisted as `pokemon/{index}-{name}.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    /// Simplified-Chinese display name (also the wiki page title).
    pub name: String,
    /// National pokédex index, zero-padded as printed on the list page.
    pub index: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    pub profile: String,
    pub forms: Vec<FormInfo>,
    pub stats: Vec<FormStats>,
    pub flavor_texts: Vec<Generation>,
    pub evolution_chains: ChainSet,
    pub names: LocalizedNames,
    pub moves: Moves,
    pub home_images: Vec<HomeImage>,
}

/// Localized names from the name table at the bottom of a species page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedNames {
    pub zh_hans: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zh_hant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub de: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub it: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ja: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ko: Option<String>,
}

/// Per-form info panel data (one panel per alternate form on the page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInfo {
    pub name: String,
    /// `{species index}` for the base form, `{species index}.{n}` for others.
    pub index: String,
    pub is_mega: bool,
    pub is_gmax: bool,
    /// Official artwork file name under `images/official/`.
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ability: Vec<AbilitySlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Experience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_rate: Option<GenderRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catch_rate: Option<CatchRate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub egg_groups: Vec<String>,
}

/// One ability slot; hidden abilities come from the second column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub name: String,
    pub is_hidden: bool,
}

/// Base experience yield and growth speed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub number: String,
    pub speed: String,
}

/// Gender ratio percentages as printed (e.g. `"87.5%"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderRate {
    pub male: Option<String>,
    pub female: Option<String>,
}

/// Catch rate number plus the derived percentage, when shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchRate {
    pub number: String,
    pub rate: Option<String>,
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Base stat table for one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStats {
    pub form: String,
    pub data: StatBlock,
}

/// The six base stat values, kept as the page's display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: String,
    pub attack: String,
    pub defense: String,
    pub sp_attack: String,
    pub sp_defense: String,
    pub speed: String,
}

// ---------------------------------------------------------------------------
// Flavor texts
// ---------------------------------------------------------------------------

/// Pokédex flavor texts for one generation heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub name: String,
    pub versions: Vec<Version>,
}

/// One game version's flavor text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub name: String,
    /// Version group, taken from the link's `title` attribute.
    pub group: Option<String>,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

/// Learnable moves, split by acquisition method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moves {
    pub learned: Vec<FormMoves>,
    pub machine: Vec<FormMoves>,
}

/// Move table for one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormMoves {
    pub form: String,
    pub data: Vec<MoveRow>,
}

/// One row of a species' move table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRow {
    /// Level requirement for level-up moves, `None` for machine moves.
    pub level_learned_at: Option<String>,
    /// TM/TR identifier for machine moves, `None` for level-up moves.
    pub machine_used: Option<String>,
    /// Acquisition method label (`提升等级` or `招式学习器`).
    pub method: String,
    pub name: String,
    /// Hover text describing the move effect.
    pub flavor_text: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    pub category: String,
    pub power: String,
    pub accuracy: String,
    pub pp: String,
}

// ---------------------------------------------------------------------------
// HOME artwork
// ---------------------------------------------------------------------------

/// Pokémon HOME render for one form, normal and shiny merged per item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeImage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shiny: Option<String>,
}

// ---------------------------------------------------------------------------
// List pages
// ---------------------------------------------------------------------------

/// One row of the national-index species list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub index: String,
    pub name: String,
    pub name_en: String,
}

/// One row of the ability list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityEntry {
    pub index: String,
    /// Generation heading the list table sits under.
    pub generation: String,
    pub name: String,
    pub name_jp: String,
    pub name_en: String,
    pub text: String,
    pub common_count: u32,
    pub hidden_count: u32,
}

/// Full ability record: the list row plus detail-page fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDetail {
    #[serde(flatten)]
    pub entry: AbilityEntry,
    pub effect: String,
    pub info: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pokemon: Vec<AbilityBearer>,
}

/// One species that can have a given ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBearer {
    pub index: String,
    pub name: String,
    pub types: Vec<String>,
    /// First regular ability column.
    pub first: String,
    /// Second regular ability column, when the table has one.
    pub second: Option<String>,
    /// Hidden ability column.
    pub hidden: String,
}

/// One row of the move list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub index: String,
    pub generation: String,
    pub name: String,
    pub name_jp: String,
    pub name_en: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub category: String,
    pub power: String,
    pub accuracy: String,
    pub pp: String,
    pub text: String,
}

/// Full move record: the list row plus detail-page fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDetail {
    #[serde(flatten)]
    pub entry: MoveEntry,
    pub effect: String,
    pub range: String,
}
