#![forbid(unsafe_code)]

//! Named layout regions and their grid placement.
//!
//! Every [`Cell`] sits in exactly one [`RowGroup`] and one [`ColumnGroup`].
//! Groups are laid out in declaration order (top to bottom, left to right),
//! so the enums below double as the grid's membership tables:
//!
//! ```text
//!              LeftYAxisTitle LeftYAxis LeftDendrogram LeftColumn(i) Main          RightYAxis RightYAxisTitle ColorLegend RightMargin
//! Title                                                              Title
//! Subtitle                                                           Subtitle
//! TopDendrogram                                                      TopDendrogram
//! TopXAxisTitle                                                      TopXAxisTitle
//! TopXAxis                                             Header(i)     TopXAxis
//! Main         LeftYAxisTitle LeftYAxis LeftDendrogram LeftColumn(i) Colormap      RightYAxis RightYAxisTitle ColorLegend RightMargin
//! BottomXAxis                                                        BottomXAxis
//! BottomXAxisTitle                                                   BottomXAxisTitle
//! Footer                                                             Footer
//! ```

use std::fmt;

/// A named leaf region of the heatmap layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cell {
    Title,
    Subtitle,
    TopDendrogram,
    TopXAxisTitle,
    TopXAxis,
    /// Header label above the `i`th left side column.
    LeftColumnHeader(usize),
    LeftYAxisTitle,
    LeftYAxis,
    LeftDendrogram,
    /// The `i`th auxiliary label column left of the colormap.
    LeftColumn(usize),
    Colormap,
    RightYAxis,
    RightYAxisTitle,
    ColorLegend,
    /// Trailing margin absorbing labels that bleed past the last column.
    RightMargin,
    BottomXAxis,
    BottomXAxisTitle,
    Footer,
}

/// Horizontal band of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowGroup {
    Title,
    Subtitle,
    TopDendrogram,
    TopXAxisTitle,
    TopXAxis,
    Main,
    BottomXAxis,
    BottomXAxisTitle,
    Footer,
}

/// Vertical band of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnGroup {
    LeftYAxisTitle,
    LeftYAxis,
    LeftDendrogram,
    LeftColumn(usize),
    Main,
    RightYAxis,
    RightYAxisTitle,
    ColorLegend,
    RightMargin,
}

impl Cell {
    /// Cells that exist regardless of side-column count.
    pub const FIXED: [Cell; 16] = [
        Cell::Title,
        Cell::Subtitle,
        Cell::TopDendrogram,
        Cell::TopXAxisTitle,
        Cell::TopXAxis,
        Cell::LeftYAxisTitle,
        Cell::LeftYAxis,
        Cell::LeftDendrogram,
        Cell::Colormap,
        Cell::RightYAxis,
        Cell::RightYAxisTitle,
        Cell::ColorLegend,
        Cell::RightMargin,
        Cell::BottomXAxis,
        Cell::BottomXAxisTitle,
        Cell::Footer,
    ];

    /// Every cell for a layout with `left_columns` side columns.
    pub fn all(left_columns: usize) -> impl Iterator<Item = Cell> {
        Self::FIXED.into_iter().chain(
            (0..left_columns).flat_map(|i| [Cell::LeftColumnHeader(i), Cell::LeftColumn(i)]),
        )
    }

    #[must_use]
    pub const fn row(self) -> RowGroup {
        match self {
            Cell::Title => RowGroup::Title,
            Cell::Subtitle => RowGroup::Subtitle,
            Cell::TopDendrogram => RowGroup::TopDendrogram,
            Cell::TopXAxisTitle => RowGroup::TopXAxisTitle,
            Cell::TopXAxis | Cell::LeftColumnHeader(_) => RowGroup::TopXAxis,
            Cell::LeftYAxisTitle
            | Cell::LeftYAxis
            | Cell::LeftDendrogram
            | Cell::LeftColumn(_)
            | Cell::Colormap
            | Cell::RightYAxis
            | Cell::RightYAxisTitle
            | Cell::ColorLegend
            | Cell::RightMargin => RowGroup::Main,
            Cell::BottomXAxis => RowGroup::BottomXAxis,
            Cell::BottomXAxisTitle => RowGroup::BottomXAxisTitle,
            Cell::Footer => RowGroup::Footer,
        }
    }

    #[must_use]
    pub const fn column(self) -> ColumnGroup {
        match self {
            Cell::LeftYAxisTitle => ColumnGroup::LeftYAxisTitle,
            Cell::LeftYAxis => ColumnGroup::LeftYAxis,
            Cell::LeftDendrogram => ColumnGroup::LeftDendrogram,
            Cell::LeftColumn(i) | Cell::LeftColumnHeader(i) => ColumnGroup::LeftColumn(i),
            Cell::Title
            | Cell::Subtitle
            | Cell::TopDendrogram
            | Cell::TopXAxisTitle
            | Cell::TopXAxis
            | Cell::Colormap
            | Cell::BottomXAxis
            | Cell::BottomXAxisTitle
            | Cell::Footer => ColumnGroup::Main,
            Cell::RightYAxis => ColumnGroup::RightYAxis,
            Cell::RightYAxisTitle => ColumnGroup::RightYAxisTitle,
            Cell::ColorLegend => ColumnGroup::ColorLegend,
            Cell::RightMargin => ColumnGroup::RightMargin,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cell::LeftColumnHeader(i) => return write!(f, "left_column_header[{i}]"),
            Cell::LeftColumn(i) => return write!(f, "left_column[{i}]"),
            Cell::Title => "title",
            Cell::Subtitle => "subtitle",
            Cell::TopDendrogram => "top_dendrogram",
            Cell::TopXAxisTitle => "top_xaxis_title",
            Cell::TopXAxis => "top_xaxis",
            Cell::LeftYAxisTitle => "left_yaxis_title",
            Cell::LeftYAxis => "left_yaxis",
            Cell::LeftDendrogram => "left_dendrogram",
            Cell::Colormap => "colormap",
            Cell::RightYAxis => "right_yaxis",
            Cell::RightYAxisTitle => "right_yaxis_title",
            Cell::ColorLegend => "color_legend",
            Cell::RightMargin => "right_margin",
            Cell::BottomXAxis => "bottom_xaxis",
            Cell::BottomXAxisTitle => "bottom_xaxis_title",
            Cell::Footer => "footer",
        };
        f.write_str(name)
    }
}
