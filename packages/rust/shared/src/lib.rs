//! Shared types, error model, and configuration for wikidex.
//!
//! This crate is the foundation depended on by all other wikidex crates.
//! It provides:
//! - [`WikidexError`] — the unified error type
//! - The persisted record types ([`PokemonRecord`], [`EvolutionNode`], …)
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, OutputConfig, WikiConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{Result, WikidexError};
pub use types::{
    AbilityBearer, AbilityDetail, AbilityEntry, AbilitySlot, CatchRate, ChainSet, EvolutionChain,
    EvolutionNode, Experience, FormInfo, FormMoves, FormStats, GenderRate, Generation, HomeImage,
    LocalizedNames, MoveDetail, MoveEntry, MoveRow, Moves, PokemonRecord, SpeciesEntry, StatBlock,
    Version, STAGE_BABY, STAGE_NO_EVOLUTION, STAGE_UNEVOLVED,
};
