#![forbid(unsafe_code)]

//! Special rules applied at finalization.

use tracing::debug;

use crate::cell::Cell;
use crate::engine::GridLayoutEngine;

/// A finalization step that may adjust cells after every component has
/// registered. Rules must be idempotent.
pub trait LayoutRule {
    fn name(&self) -> &'static str;

    fn apply(&self, engine: &mut GridLayoutEngine);
}

/// Reserve trailing space for cells that end up in the rightmost column.
///
/// For every enabled cell with a rightmost-margin policy that has no enabled
/// column to its right, enable [`Cell::RightMargin`] and grow its width to
/// `max(current, policy - padding)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RightmostMarginRule;

impl LayoutRule for RightmostMarginRule {
    fn name(&self) -> &'static str {
        "rightmost_margin"
    }

    fn apply(&self, engine: &mut GridLayoutEngine) {
        let claims: Vec<_> = engine
            .enabled_cells()
            .filter(|&cell| cell != Cell::RightMargin && engine.is_rightmost(cell))
            .filter_map(|cell| {
                engine
                    .preferred_dimensions(cell)
                    .conditional
                    .map(|policy| (cell, policy))
            })
            .collect();

        for (cell, policy) in claims {
            let mut dims = engine.preferred_dimensions(Cell::RightMargin);
            dims.width = dims.width.max(policy.rightmost_margin - engine.padding());
            engine.enable(Cell::RightMargin);
            engine.set_preferred_dimensions(Cell::RightMargin, dims);
            debug!(cell = %cell, margin = dims.width, "reserved right margin");
        }
    }
}
