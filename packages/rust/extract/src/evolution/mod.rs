//! Evolution-chain reconstruction.
//!
//! The wiki encodes a species' evolution family as a presentational
//! table under the 进化 section: creature cards and condition cells laid
//! out positionally, with branching families drawn as mirrored halves.
//! This module recovers the logical chains from that layout in four
//! steps: locate the table, segment its rows into branches, flatten each
//! branch into an alternating node/condition cell sequence, and link the
//! nodes by stage.
//!
//! Species whose layout defeats the positional heuristics are served
//! from a hand-authored override table instead; the driver consults it
//! before ever touching the document.

mod assemble;
mod condition;
mod fixed;
mod node;
mod segment;

pub use assemble::{CONDITION_PLACEHOLDER, assemble_chain, flatten_cells};
pub use condition::{Condition, extract_condition, parse_condition};
pub use fixed::{override_for, overridden_species};
pub use node::{NodeFields, extract_node};
pub use segment::{MirroredHalves, SplitStrategy, root_count, segment_rows};

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use wikidex_shared::{ChainSet, EvolutionNode, STAGE_NO_EVOLUTION};

use crate::dom;

const SECTION_IDS: &[&str] = &["进化", "進化"];

/// Extract the species' evolution chains from its page.
///
/// A page with no evolution section, or with a section but no usable
/// table, yields the single-node "does not evolve" chain set.
pub fn chains(doc: &Html, species: &str) -> ChainSet {
    chains_with_strategy(doc, species, &MirroredHalves)
}

/// [`chains`] with an explicit branch-split strategy.
pub fn chains_with_strategy(doc: &Html, species: &str, strategy: &dyn SplitStrategy) -> ChainSet {
    let Some(heading) = dom::section_heading(doc, SECTION_IDS) else {
        debug!(species, "no evolution section; species does not evolve");
        return no_evolution(species);
    };
    let Some(table) = evolution_table(doc, heading) else {
        warn!(species, "evolution section without a table");
        return no_evolution(species);
    };

    let rows = branch_rows(table);
    if rows.is_empty() {
        warn!(species, "evolution table has no rows");
        return no_evolution(species);
    }

    segment_rows(table, rows, strategy)
        .into_iter()
        .map(|branch| assemble_chain(doc, &branch))
        .collect()
}

/// The single-chain set for a species that does not evolve.
pub fn no_evolution(species: &str) -> ChainSet {
    vec![vec![EvolutionNode {
        name: Some(species.to_string()),
        stage: Some(STAGE_NO_EVOLUTION.to_string()),
        ..EvolutionNode::empty()
    }]]
}

/// The chain table: the next table after the section heading. Some
/// pages put a full-width navigation table (`fulltable`) first; the
/// chain table is then the one after it.
fn evolution_table<'a>(doc: &'a Html, heading: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let first = dom::find_next(doc, heading, |e| e.value().name() == "table")?;
    if dom::has_class(first, "fulltable") {
        dom::find_next(doc, first, |e| e.value().name() == "table")
    } else {
        Some(first)
    }
}

/// The table's top-level rows, hidden rows excluded.
fn branch_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let Some(tbody) = table
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "tbody")
    else {
        return Vec::new();
    };
    dom::child_elements_named(tbody, "tr")
        .into_iter()
        .filter(|row| !dom::has_class(*row, "hide"))
        .collect()
}
