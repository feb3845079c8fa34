//! Extraction core: pure, synchronous parsing of fetched wiki pages.
//!
//! Every function in this crate operates on an already-fetched
//! [`scraper::Html`] document and is deterministic over it — no I/O, no
//! suspension points, no shared mutable state. Extraction is
//! best-effort throughout: missing substructure yields empty/absent
//! fields, never an abort (the exception being the evolution section,
//! whose absence is itself a meaningful terminal state).

pub mod abilities;
pub mod dom;
pub mod evolution;
pub mod flavor;
pub mod forms;
pub mod home_images;
pub mod movedex;
pub mod moves;
pub mod names;
pub mod profile;
pub mod roster;
pub mod species;
pub mod stats;

pub use species::{SpeciesExtract, species_record};

/// Which image directory an asset belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Official artwork from the info panel.
    Official,
    /// Pokémon HOME render.
    Home,
}

/// An image discovered during extraction, for the driver to download.
///
/// URLs are kept exactly as the page carries them (usually
/// protocol-relative `//media…`); the fetcher resolves the scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub kind: ImageKind,
    pub file_name: String,
    pub url: String,
}

/// Parse a fetched page into a document for the extractors.
pub fn parse_document(html: &str) -> scraper::Html {
    scraper::Html::parse_document(html)
}
