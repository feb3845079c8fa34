//! Hand-authored chain overrides.
//!
//! A handful of species have table layouts that defeat the positional
//! heuristics (more than two branches, non-standard stage labels). For
//! those, a pre-authored ChainSet is used verbatim instead of running
//! the assembler. The table is consulted by the per-species driver,
//! never inside the assembler itself.

use std::collections::HashMap;
use std::sync::LazyLock;

use wikidex_shared::ChainSet;

static OVERRIDES: LazyLock<HashMap<String, ChainSet>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("fixed_chains.json"))
        .expect("embedded fixed_chains.json is well-formed")
});

/// Pre-authored chains for a species, when its page layout is known to
/// defeat the automated extraction.
pub fn override_for(species: &str) -> Option<&'static ChainSet> {
    OVERRIDES.get(species)
}

/// Names of all species covered by the override table.
pub fn overridden_species() -> impl Iterator<Item = &'static str> {
    OVERRIDES.keys().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eevee_override_has_one_branch_rooted_at_eevee() {
        let chains = override_for("伊布").unwrap();
        assert_eq!(chains.len(), 1);
        let root = &chains[0][0];
        assert_eq!(root.name.as_deref(), Some("伊布"));
        assert_eq!(root.from, None);
        // Every evolved form points straight back at the root.
        for node in &chains[0][1..] {
            assert_eq!(node.from.as_deref(), Some("伊布"));
        }
    }

    #[test]
    fn tauros_override_covers_four_branches() {
        // One single-node chain per regional breed — more roots than
        // the positional split can express.
        let chains = override_for("肯泰罗").unwrap();
        assert_eq!(chains.len(), 4);
        for chain in chains {
            assert_eq!(chain.len(), 1);
            assert_eq!(chain[0].from, None);
        }
    }

    #[test]
    fn unknown_species_has_no_override() {
        assert!(override_for("皮卡丘").is_none());
        assert!(overridden_species().count() >= 10);
    }
}
