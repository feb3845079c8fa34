//! Table segmentation: recovering parallel branches from one row list.
//!
//! A page that encodes alternate forms (regional, gender, time-of-day)
//! lays the branches out as parallel row groups in a single table. The
//! only signal is positional, so segmentation is a named, swappable
//! strategy rather than inline conditionals — pages needing a different
//! split can supply their own [`SplitStrategy`] without touching the
//! assembler.

use scraper::ElementRef;
use tracing::warn;

use wikidex_shared::{STAGE_BABY, STAGE_UNEVOLVED};

use crate::dom;

/// A way of splitting an evolution table's top-level rows into
/// independent branch segments.
pub trait SplitStrategy {
    /// Split the ordered row list into branch segments.
    fn split<'a>(&self, rows: Vec<ElementRef<'a>>) -> Vec<Vec<ElementRef<'a>>>;

    /// Strategy name for tracing.
    fn name(&self) -> &str;
}

/// The wiki's two-branch layout: branches are two contiguous halves of
/// the row list. Even row counts split at the midpoint; odd counts
/// treat the exact-middle row as a visual separator and discard it.
///
/// This positional heuristic is preserved exactly for output
/// compatibility. It supports 1 or 2 branches only; tables with more
/// are handled through the fixed-data override table.
pub struct MirroredHalves;

impl SplitStrategy for MirroredHalves {
    fn split<'a>(&self, rows: Vec<ElementRef<'a>>) -> Vec<Vec<ElementRef<'a>>> {
        let length = rows.len();
        let middle = length / 2;
        if length % 2 == 0 {
            vec![rows[..middle].to_vec(), rows[middle..].to_vec()]
        } else {
            vec![rows[..middle].to_vec(), rows[middle + 1..].to_vec()]
        }
    }

    fn name(&self) -> &str {
        "mirrored-halves"
    }
}

/// Count chain-root stage markers (`未进化` / `幼年`) across the
/// table's `<small>` elements. More than one root means the table
/// encodes multiple branches.
pub fn root_count(table: ElementRef<'_>) -> usize {
    let sel = dom::selector("small");
    table
        .select(&sel)
        .filter(|el| {
            let text = dom::text_of(*el);
            text == STAGE_UNEVOLVED || text == STAGE_BABY
        })
        .count()
}

/// Segment the row list: a single-root table passes through whole; a
/// multi-root table goes through the strategy. Root counts above two
/// are outside what any current strategy supports and are flagged.
pub fn segment_rows<'a>(
    table: ElementRef<'a>,
    rows: Vec<ElementRef<'a>>,
    strategy: &dyn SplitStrategy,
) -> Vec<Vec<ElementRef<'a>>> {
    let roots = root_count(table);
    if roots > 2 {
        warn!(
            roots,
            strategy = strategy.name(),
            "table has more than two chain roots; split is unsupported — use a fixed-data override"
        );
    }
    if roots > 1 {
        strategy.split(rows)
    } else {
        vec![rows]
    }
}
