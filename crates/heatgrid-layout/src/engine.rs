#![forbid(unsafe_code)]

//! Named-cell grid layout engine.
//!
//! Layout runs in two phases:
//!
//! 1. **Registration**: components enable their cells, one of them claims the
//!    fill cell, and each reports its preferred [`Dimensions`].
//! 2. **Finalization**: [`GridLayoutEngine::all_components_registered`] runs
//!    the [`LayoutRule`] list once and logs any degenerate result.
//!
//! Bounds queries are a pure function of the current cell state and can be
//! issued in either phase. Mutating a cell after finalization drops the
//! engine back into registration.
//!
//! A row (column) is enabled when any of its cells is. Its size is the max
//! over its enabled cells of their preferred height (width), except that the
//! fill cell contributes the canvas remainder:
//!
//! ```text
//! fill = canvas - Σ(size + padding over every other enabled group) - 2·outer_padding
//! ```

use std::collections::BTreeMap;
use std::fmt;

use heatgrid_core::{Axis, Bounds, Size};
use tracing::{debug, trace, warn};

use crate::cell::{Cell, ColumnGroup, RowGroup};
use crate::error::LayoutError;
use crate::rules::{LayoutRule, RightmostMarginRule};

/// Tolerance for the overflow check.
const OVERFLOW_EPSILON: f64 = 1e-9;

/// Policy applied only if the cell ends up in the rightmost enabled column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConditionalPolicy {
    /// Trailing space to reserve after the cell, including padding.
    pub rightmost_margin: f64,
}

/// Preferred size of a cell. Zero on an axis means "accept the allocation".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub conditional: Option<ConditionalPolicy>,
}

impl Dimensions {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            conditional: None,
        }
    }

    /// Reserve `margin` px after this cell if it ends up rightmost.
    #[must_use]
    pub const fn rightmost_margin(mut self, margin: f64) -> Self {
        self.conditional = Some(ConditionalPolicy {
            rightmost_margin: margin,
        });
        self
    }
}

/// Resolved placement of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBounds {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl CellBounds {
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.left, self.top, self.width, self.height)
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Registration,
    Finalized,
}

/// Non-fatal layout report.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutDiagnostic {
    /// An enabled cell resolved to a zero or negative size.
    Degenerate { cell: Cell, width: f64, height: f64 },
    /// Fixed groups plus padding exceed the canvas on `axis`.
    Overflow {
        axis: Axis,
        required: f64,
        available: f64,
    },
}

impl fmt::Display for LayoutDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degenerate { cell, width, height } => {
                write!(f, "cell {cell} is degenerate ({width}x{height})")
            }
            Self::Overflow {
                axis,
                required,
                available,
            } => write!(f, "{axis} layout needs {required}px but only {available}px exist"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct CellState {
    enabled: bool,
    dims: Dimensions,
}

/// Registry of named cells and resolver of their bounds.
pub struct GridLayoutEngine {
    canvas: Size,
    padding: f64,
    outer_padding: f64,
    cells: BTreeMap<Cell, CellState>,
    fill: Option<Cell>,
    rules: Vec<Box<dyn LayoutRule>>,
    phase: Phase,
}

impl GridLayoutEngine {
    /// Engine for `canvas` with `padding` between groups and `outer_padding`
    /// around the grid. The rightmost-margin rule is installed.
    pub fn new(canvas: Size, padding: f64, outer_padding: f64) -> Self {
        Self {
            canvas,
            padding,
            outer_padding,
            cells: BTreeMap::new(),
            fill: None,
            rules: vec![Box::new(RightmostMarginRule)],
            phase: Phase::Registration,
        }
    }

    #[inline]
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    #[inline]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    #[inline]
    pub fn outer_padding(&self) -> f64 {
        self.outer_padding
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Append a rule; rules run in insertion order.
    pub fn add_rule(&mut self, rule: impl LayoutRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Start over for a new canvas: all cells disabled, no fill cell.
    pub fn reset(&mut self, canvas: Size) {
        self.canvas = canvas;
        self.cells.clear();
        self.fill = None;
        self.phase = Phase::Registration;
        debug!(width = canvas.width, height = canvas.height, "layout reset");
    }

    // --- Registration ---

    pub fn enable(&mut self, cell: Cell) {
        self.touch();
        self.cells.entry(cell).or_default().enabled = true;
    }

    pub fn disable(&mut self, cell: Cell) {
        self.touch();
        if let Some(state) = self.cells.get_mut(&cell) {
            state.enabled = false;
        }
    }

    #[must_use]
    pub fn is_enabled(&self, cell: Cell) -> bool {
        self.cells.get(&cell).is_some_and(|s| s.enabled)
    }

    /// Enabled cells in grid order.
    pub fn enabled_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .filter(|(_, s)| s.enabled)
            .map(|(&cell, _)| cell)
    }

    /// Mark `cell` as the one that absorbs the remaining space.
    ///
    /// Setting the same cell again is a no-op; a different cell fails.
    pub fn set_fill_cell(&mut self, cell: Cell) -> Result<(), LayoutError> {
        match self.fill {
            Some(current) if current == cell => Ok(()),
            Some(current) => Err(LayoutError::Configuration(format!(
                "fill cell is already {current}, cannot also fill {cell}"
            ))),
            None => {
                self.touch();
                self.fill = Some(cell);
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn fill_cell(&self) -> Option<Cell> {
        self.fill
    }

    pub fn set_preferred_dimensions(&mut self, cell: Cell, dims: Dimensions) {
        self.touch();
        self.cells.entry(cell).or_default().dims = dims;
    }

    #[must_use]
    pub fn preferred_dimensions(&self, cell: Cell) -> Dimensions {
        self.cells.get(&cell).map(|s| s.dims).unwrap_or_default()
    }

    fn touch(&mut self) {
        if self.phase == Phase::Finalized {
            debug!("layout mutated after finalization, back to registration");
            self.phase = Phase::Registration;
        }
    }

    // --- Finalization ---

    /// Run every layout rule once, then report degenerate results.
    pub fn all_components_registered(&mut self) {
        let rules = std::mem::take(&mut self.rules);
        for rule in &rules {
            debug!(rule = rule.name(), "applying layout rule");
            rule.apply(self);
        }
        self.rules = rules;
        self.phase = Phase::Finalized;

        let diagnostics = self.diagnostics();
        for diagnostic in &diagnostics {
            warn!(%diagnostic, "degenerate layout");
        }
        debug!(
            cells = self.enabled_cells().count(),
            fill = ?self.fill,
            diagnostics = diagnostics.len(),
            "layout finalized"
        );
    }

    // --- Queries ---

    /// Resolved heights of enabled rows, top to bottom.
    pub fn row_sizes(&self) -> Vec<(RowGroup, f64)> {
        self.resolve(Cell::row, |d| d.height, self.canvas.height)
    }

    /// Resolved widths of enabled columns, left to right.
    pub fn column_sizes(&self) -> Vec<(ColumnGroup, f64)> {
        self.resolve(Cell::column, |d| d.width, self.canvas.width)
    }

    /// Bounds of an enabled cell.
    pub fn cell_bounds(&self, cell: Cell) -> Result<CellBounds, LayoutError> {
        if !self.is_enabled(cell) {
            return Err(LayoutError::NotEnabled(cell));
        }
        let (left, width) = self.place(&self.column_sizes(), cell.column());
        let (top, height) = self.place(&self.row_sizes(), cell.row());
        trace!(cell = %cell, top, left, width, height, "cell bounds");
        Ok(CellBounds {
            top,
            left,
            width,
            height,
            canvas_width: self.canvas.width,
            canvas_height: self.canvas.height,
        })
    }

    /// Horizontal distance from the right edge of `cell` to the canvas edge.
    pub fn space_to_the_right_of(&self, cell: Cell) -> Result<f64, LayoutError> {
        let b = self.cell_bounds(cell)?;
        Ok(self.canvas.width - (b.left + b.width))
    }

    /// True when no enabled column lies right of `cell`'s column.
    ///
    /// The right margin column itself is ignored so that enabling it never
    /// changes the answer.
    #[must_use]
    pub fn is_rightmost(&self, cell: Cell) -> bool {
        let column = cell.column();
        !self.enabled_cells().any(|other| {
            let c = other.column();
            c > column && c != ColumnGroup::RightMargin
        })
    }

    /// Current degenerate cells and axis overflows.
    pub fn diagnostics(&self) -> Vec<LayoutDiagnostic> {
        let mut out = Vec::new();
        let fill = self.enabled_fill();
        self.check_overflow(
            Axis::Horizontal,
            &self.column_sizes(),
            fill.map(Cell::column),
            &mut out,
        );
        self.check_overflow(Axis::Vertical, &self.row_sizes(), fill.map(Cell::row), &mut out);
        for cell in self.enabled_cells() {
            if let Ok(b) = self.cell_bounds(cell)
                && b.is_degenerate()
            {
                out.push(LayoutDiagnostic::Degenerate {
                    cell,
                    width: b.width,
                    height: b.height,
                });
            }
        }
        out
    }

    fn enabled_fill(&self) -> Option<Cell> {
        self.fill.filter(|&cell| self.is_enabled(cell))
    }

    fn resolve<G: Ord + Copy>(
        &self,
        group_of: fn(Cell) -> G,
        extent: fn(&Dimensions) -> f64,
        canvas: f64,
    ) -> Vec<(G, f64)> {
        let fill = self.enabled_fill();
        let mut preferred: BTreeMap<G, Option<f64>> = BTreeMap::new();
        for (&cell, state) in self.cells.iter().filter(|(_, s)| s.enabled) {
            let slot = preferred.entry(group_of(cell)).or_insert(None);
            if Some(cell) != fill {
                let size = extent(&state.dims);
                *slot = Some(slot.map_or(size, |s: f64| s.max(size)));
            }
        }

        let fill_group = fill.map(group_of);
        let fill_size = fill_group.map(|group| {
            let others: f64 = preferred
                .iter()
                .filter(|(g, _)| **g != group)
                .map(|(_, size)| size.unwrap_or(0.0) + self.padding)
                .sum();
            canvas - others - 2.0 * self.outer_padding
        });

        preferred
            .into_iter()
            .map(|(group, size)| {
                let resolved = match fill_size {
                    Some(fill_size) if fill_group == Some(group) => {
                        size.map_or(fill_size, |s| s.max(fill_size))
                    }
                    _ => size.unwrap_or(0.0),
                };
                (group, resolved)
            })
            .collect()
    }

    fn place<G: Ord + Copy>(&self, sizes: &[(G, f64)], group: G) -> (f64, f64) {
        let mut offset = self.outer_padding;
        for &(g, size) in sizes {
            if g == group {
                return (offset, size);
            }
            offset += size + self.padding;
        }
        (offset, 0.0)
    }

    fn check_overflow<G: Ord + Copy>(
        &self,
        axis: Axis,
        sizes: &[(G, f64)],
        fill_group: Option<G>,
        out: &mut Vec<LayoutDiagnostic>,
    ) {
        if sizes.is_empty() {
            return;
        }
        let fixed: f64 = sizes
            .iter()
            .filter(|(g, _)| Some(*g) != fill_group)
            .map(|(_, size)| size)
            .sum();
        let gaps = self.padding * (sizes.len() - 1) as f64;
        let required = fixed + gaps + 2.0 * self.outer_padding;
        let available = axis.of(self.canvas);
        if required > available + OVERFLOW_EPSILON {
            out.push(LayoutDiagnostic::Overflow {
                axis,
                required,
                available,
            });
        }
    }
}

impl fmt::Debug for GridLayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("GridLayoutEngine")
            .field("canvas", &self.canvas)
            .field("padding", &self.padding)
            .field("outer_padding", &self.outer_padding)
            .field("phase", &self.phase)
            .field("fill", &self.fill)
            .field("enabled", &self.enabled_cells().collect::<Vec<_>>())
            .field("rules", &rules)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn engine(width: f64, height: f64) -> GridLayoutEngine {
        GridLayoutEngine::new(Size::new(width, height), 5.0, 10.0)
    }

    fn with(engine: &mut GridLayoutEngine, cell: Cell, width: f64, height: f64) {
        engine.enable(cell);
        engine.set_preferred_dimensions(cell, Dimensions::new(width, height));
    }

    #[test]
    fn second_distinct_fill_cell_fails() {
        let mut e = engine(100.0, 100.0);
        e.set_fill_cell(Cell::Colormap).unwrap();
        e.set_fill_cell(Cell::Colormap).unwrap();
        let err = e.set_fill_cell(Cell::Title).unwrap_err();
        assert!(matches!(err, LayoutError::Configuration(_)));
        assert_eq!(e.fill_cell(), Some(Cell::Colormap));
    }

    #[test]
    fn fill_column_absorbs_the_rest() {
        let mut e = engine(1000.0, 400.0);
        with(&mut e, Cell::LeftYAxis, 100.0, 0.0);
        with(&mut e, Cell::LeftDendrogram, 200.0, 0.0);
        e.enable(Cell::Colormap);
        e.set_fill_cell(Cell::Colormap).unwrap();
        e.all_components_registered();

        let b = e.cell_bounds(Cell::Colormap).unwrap();
        assert!((b.width - (1000.0 - 100.0 - 200.0 - 2.0 * 5.0 - 2.0 * 10.0)).abs() < EPS);
        assert!((b.left - (10.0 + 100.0 + 5.0 + 200.0 + 5.0)).abs() < EPS);
        assert!((b.height - (400.0 - 20.0)).abs() < EPS);
        assert_eq!((b.canvas_width, b.canvas_height), (1000.0, 400.0));
    }

    #[test]
    fn group_size_is_max_of_members() {
        let mut e = engine(500.0, 500.0);
        with(&mut e, Cell::TopXAxis, 0.0, 30.0);
        with(&mut e, Cell::LeftColumnHeader(0), 0.0, 45.0);
        with(&mut e, Cell::LeftColumn(0), 25.0, 0.0);
        let header = e.cell_bounds(Cell::LeftColumnHeader(0)).unwrap();
        let axis = e.cell_bounds(Cell::TopXAxis).unwrap();
        assert_eq!(header.height, 45.0);
        assert_eq!(axis.height, 45.0);
        assert_eq!(axis.top, header.top);
        assert_eq!(header.width, 25.0);
    }

    #[test]
    fn rows_stack_in_declaration_order() {
        let mut e = engine(300.0, 600.0);
        with(&mut e, Cell::Footer, 0.0, 10.0);
        with(&mut e, Cell::Title, 0.0, 20.0);
        with(&mut e, Cell::BottomXAxis, 0.0, 40.0);
        e.enable(Cell::Colormap);
        e.set_fill_cell(Cell::Colormap).unwrap();
        e.all_components_registered();

        let title = e.cell_bounds(Cell::Title).unwrap();
        let map = e.cell_bounds(Cell::Colormap).unwrap();
        let axis = e.cell_bounds(Cell::BottomXAxis).unwrap();
        let footer = e.cell_bounds(Cell::Footer).unwrap();
        assert_eq!(title.top, 10.0);
        assert_eq!(map.top, 10.0 + 20.0 + 5.0);
        assert!((axis.top - (map.top + map.height + 5.0)).abs() < EPS);
        assert!((footer.top + footer.height - (600.0 - 10.0)).abs() < EPS);
    }

    #[test]
    fn disabled_cell_query_fails_in_both_phases() {
        let mut e = engine(100.0, 100.0);
        with(&mut e, Cell::Title, 0.0, 10.0);
        e.disable(Cell::Title);
        for cell in Cell::all(2) {
            assert_eq!(e.cell_bounds(cell), Err(LayoutError::NotEnabled(cell)));
        }
        e.all_components_registered();
        for cell in Cell::all(2) {
            assert_eq!(e.cell_bounds(cell), Err(LayoutError::NotEnabled(cell)));
        }
    }

    #[test]
    fn mutation_after_finalization_reopens_registration() {
        let mut e = engine(100.0, 100.0);
        e.all_components_registered();
        assert_eq!(e.phase(), Phase::Finalized);
        e.enable(Cell::Title);
        assert_eq!(e.phase(), Phase::Registration);
    }

    #[test]
    fn bounds_are_stable_between_queries() {
        let mut e = engine(640.0, 480.0);
        with(&mut e, Cell::LeftYAxis, 44.0, 0.0);
        with(&mut e, Cell::ColorLegend, 60.0, 120.0);
        e.enable(Cell::Colormap);
        e.set_fill_cell(Cell::Colormap).unwrap();
        e.all_components_registered();
        let first: Vec<_> = e.enabled_cells().map(|c| e.cell_bounds(c)).collect();
        let second: Vec<_> = e.enabled_cells().map(|c| e.cell_bounds(c)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn rightmost_margin_rule_is_idempotent() {
        let mut e = engine(400.0, 400.0);
        e.enable(Cell::BottomXAxis);
        e.set_preferred_dimensions(
            Cell::BottomXAxis,
            Dimensions::new(0.0, 50.0).rightmost_margin(35.0),
        );
        e.enable(Cell::Colormap);
        e.set_fill_cell(Cell::Colormap).unwrap();

        e.all_components_registered();
        let first = e.cell_bounds(Cell::RightMargin).unwrap().width;
        e.all_components_registered();
        let second = e.cell_bounds(Cell::RightMargin).unwrap().width;
        assert_eq!(first, 30.0);
        assert_eq!(first, second);
    }

    #[test]
    fn margin_policy_ignored_when_not_rightmost() {
        let mut e = engine(400.0, 400.0);
        e.enable(Cell::BottomXAxis);
        e.set_preferred_dimensions(
            Cell::BottomXAxis,
            Dimensions::new(0.0, 50.0).rightmost_margin(35.0),
        );
        with(&mut e, Cell::ColorLegend, 40.0, 100.0);
        e.all_components_registered();
        assert!(!e.is_enabled(Cell::RightMargin));
        assert!(!e.is_rightmost(Cell::BottomXAxis));
        assert!(e.is_rightmost(Cell::ColorLegend));
    }

    #[test]
    fn space_to_the_right() {
        let mut e = engine(300.0, 100.0);
        with(&mut e, Cell::LeftYAxis, 50.0, 50.0);
        let space = e.space_to_the_right_of(Cell::LeftYAxis).unwrap();
        assert_eq!(space, 300.0 - 10.0 - 50.0);
        assert!(e.space_to_the_right_of(Cell::Footer).is_err());
    }

    #[test]
    fn negative_fill_is_reported_not_clamped() {
        let mut e = engine(100.0, 100.0);
        with(&mut e, Cell::LeftYAxis, 90.0, 0.0);
        e.enable(Cell::Colormap);
        e.set_fill_cell(Cell::Colormap).unwrap();
        e.all_components_registered();

        let b = e.cell_bounds(Cell::Colormap).unwrap();
        assert!(b.width < 0.0);
        let diags = e.diagnostics();
        assert!(diags.iter().any(|d| matches!(
            d,
            LayoutDiagnostic::Degenerate { cell: Cell::Colormap, .. }
        )));
        assert!(diags.iter().any(|d| matches!(
            d,
            LayoutDiagnostic::Overflow { axis: Axis::Horizontal, .. }
        )));
    }

    #[test]
    fn disabled_fill_cell_does_not_fill() {
        let mut e = engine(200.0, 200.0);
        e.set_fill_cell(Cell::Colormap).unwrap();
        with(&mut e, Cell::Title, 80.0, 20.0);
        assert_eq!(e.column_sizes(), vec![(ColumnGroup::Main, 80.0)]);
    }

    #[test]
    fn reset_clears_cells_and_fill() {
        let mut e = engine(200.0, 200.0);
        with(&mut e, Cell::Title, 80.0, 20.0);
        e.set_fill_cell(Cell::Colormap).unwrap();
        e.all_components_registered();
        e.reset(Size::new(300.0, 300.0));
        assert_eq!(e.phase(), Phase::Registration);
        assert_eq!(e.fill_cell(), None);
        assert_eq!(e.enabled_cells().count(), 0);
        assert_eq!(e.canvas(), Size::new(300.0, 300.0));
    }
}
