#![forbid(unsafe_code)]

//! Render entry point.
//!
//! [`Heatmap`] holds the immutable options and data. Every call to
//! [`Heatmap::render`] builds a fresh layout engine and interaction
//! controller, so a resize is simply another render from the same value.
//!
//! Render order:
//!
//! 1. build components from the options
//! 2. register: enable each cell and record its preferred size
//! 3. claim the colormap as fill cell and finalize
//! 4. draw each component into its bounds
//! 5. subscribe each component to the controller

use std::rc::Rc;

use heatgrid_core::{HeatmapOptions, Point, Size, XAxisLocation, YAxisLocation};
use heatgrid_layout::{Cell, CellBounds, GridLayoutEngine};
use heatgrid_runtime::{
    BrushExtent, Datapoint, Highlight, InteractionController, ZoomTransform, gesture,
};
use heatgrid_text::{LabelMeasurer, MeasureBackend};
use tracing::{debug, debug_span};

use crate::canvas::Canvas;
use crate::component::{Component, LayoutContext, SharedView};
use crate::components::{
    AxisLabels, AxisTitle, ColorLegend, ColorScale, Colormap, Dendrogram, SideColumnHeader,
    SideColumnLabels, TextBlock, colormap,
};
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// A configured, not yet rendered heatmap.
#[derive(Debug, Clone)]
pub struct Heatmap {
    options: HeatmapOptions,
    matrix: Rc<Matrix>,
}

impl Heatmap {
    /// Validate `options` against themselves and against `matrix`.
    pub fn new(options: HeatmapOptions, matrix: Matrix) -> Result<Self> {
        options.validate()?;
        let rows = matrix.shape().rows;
        for (i, column) in options.left_columns.iter().enumerate() {
            if column.values.len() != rows {
                return Err(Error::Matrix(format!(
                    "left column {i} ({:?}) has {} values for {rows} rows",
                    column.header,
                    column.values.len()
                )));
            }
        }
        Ok(Self {
            options,
            matrix: Rc::new(matrix),
        })
    }

    pub fn options(&self) -> &HeatmapOptions {
        &self.options
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Components for the regions the options ask for, colormap last.
    pub fn components(&self) -> Vec<Box<dyn Component>> {
        let o = &self.options;
        let shape = self.matrix.shape();
        let mut out: Vec<Box<dyn Component>> = Vec::new();

        let text_blocks = [
            (Cell::Title, &o.title, &o.title_font),
            (Cell::Subtitle, &o.subtitle, &o.subtitle_font),
            (Cell::Footer, &o.footer, &o.footer_font),
        ];
        for (cell, text, font) in text_blocks {
            if let Some(text) = text {
                out.push(Box::new(TextBlock::new(cell, text.clone(), font.clone())));
            }
        }

        if o.col_dendrogram {
            out.push(Box::new(Dendrogram::new(Cell::TopDendrogram, o.dendrogram_size, shape)));
        }
        if o.row_dendrogram {
            out.push(Box::new(Dendrogram::new(Cell::LeftDendrogram, o.dendrogram_size, shape)));
        }

        if !o.xaxis_hidden {
            let (labels, title) = match o.xaxis_location {
                XAxisLocation::Top => (Cell::TopXAxis, Cell::TopXAxisTitle),
                XAxisLocation::Bottom => (Cell::BottomXAxis, Cell::BottomXAxisTitle),
            };
            out.push(Box::new(AxisLabels::columns(
                labels,
                self.matrix.col_labels().to_vec(),
                o.axis_font.clone(),
                o.xaxis_angle,
                o.axis_label_padding,
                shape,
            )));
            if let Some(text) = &o.xaxis_title {
                out.push(Box::new(AxisTitle::new(title, text.clone(), o.axis_title_font.clone())));
            }
        }

        if !o.yaxis_hidden {
            let (labels, title) = match o.yaxis_location {
                YAxisLocation::Left => (Cell::LeftYAxis, Cell::LeftYAxisTitle),
                YAxisLocation::Right => (Cell::RightYAxis, Cell::RightYAxisTitle),
            };
            out.push(Box::new(AxisLabels::rows(
                labels,
                self.matrix.row_labels().to_vec(),
                o.axis_font.clone(),
                o.axis_label_padding,
                shape,
            )));
            if let Some(text) = &o.yaxis_title {
                out.push(Box::new(AxisTitle::new(title, text.clone(), o.axis_title_font.clone())));
            }
        }

        for (i, column) in o.left_columns.iter().enumerate() {
            out.push(Box::new(SideColumnLabels::new(
                i,
                column.values.clone(),
                o.side_column_font.clone(),
                o.axis_label_padding,
                shape,
            )));
            out.push(Box::new(SideColumnHeader::new(
                i,
                column.header.clone(),
                o.side_column_font.clone(),
                o.axis_label_padding,
            )));
        }

        let scale = self.color_scale();
        if o.legend_colors.is_some() {
            out.push(Box::new(ColorLegend::new(
                scale.clone(),
                o.legend_font.clone(),
                o.legend_left_space,
                o.legend_bar_width,
                o.legend_label_padding,
            )));
        }

        out.push(Box::new(Colormap::new(
            Rc::clone(&self.matrix),
            scale,
            o.show_grid.unwrap_or(0.0),
        )));
        out
    }

    fn color_scale(&self) -> ColorScale {
        let (min, max) = self.matrix.value_range().unwrap_or((0.0, 0.0));
        ColorScale::new(self.options.legend_colors.clone().unwrap_or_default(), min, max)
    }

    /// Lay out and draw onto a `canvas`-sized surface.
    pub fn render(
        &self,
        canvas: Size,
        backend: impl MeasureBackend + 'static,
        sink: &mut dyn Canvas,
    ) -> Result<RenderedHeatmap> {
        self.render_with(canvas, LabelMeasurer::new(backend), sink)
    }

    /// Like [`render`](Self::render) but with an existing measurer, keeping
    /// its cache warm.
    pub fn render_with(
        &self,
        canvas: Size,
        mut measurer: LabelMeasurer,
        sink: &mut dyn Canvas,
    ) -> Result<RenderedHeatmap> {
        let mut engine =
            GridLayoutEngine::new(canvas, self.options.padding, self.options.outer_padding);
        let mut components = self.components();

        let mut ctx = LayoutContext {
            options: &self.options,
            canvas,
            measurer: &mut measurer,
        };
        for component in &mut components {
            let cell = component.cell();
            let dims = component.preferred_dimensions(&mut ctx)?;
            engine.enable(cell);
            engine.set_preferred_dimensions(cell, dims);
        }
        engine.set_fill_cell(Cell::Colormap)?;
        engine.all_components_registered();

        let mut controller = InteractionController::new(self.matrix.shape());
        let mut placed = Vec::with_capacity(components.len());
        for mut component in components {
            let bounds = engine.cell_bounds(component.cell())?;
            draw_component(component.as_mut(), bounds, sink);
            component.subscribe(&mut controller);
            placed.push((component, bounds));
        }

        debug!(
            width = canvas.width,
            height = canvas.height,
            components = placed.len(),
            cache_hit_rate = measurer.cache_stats().hit_rate(),
            "heatmap rendered"
        );
        Ok(RenderedHeatmap {
            engine,
            controller,
            components: placed,
            measurer,
            matrix: Rc::clone(&self.matrix),
        })
    }

    /// Render again for a new canvas size, reusing the previous measurer.
    pub fn resize(
        &self,
        previous: RenderedHeatmap,
        canvas: Size,
        sink: &mut dyn Canvas,
    ) -> Result<RenderedHeatmap> {
        self.render_with(canvas, previous.into_measurer(), sink)
    }
}

fn draw_component(component: &mut dyn Component, bounds: CellBounds, sink: &mut dyn Canvas) {
    let _span = debug_span!(
        "component_draw",
        cell = %component.cell(),
        x = bounds.left,
        y = bounds.top,
        w = bounds.width,
        h = bounds.height
    )
    .entered();
    component.draw(bounds, sink);
}

/// A laid-out heatmap with live interaction state.
pub struct RenderedHeatmap {
    engine: GridLayoutEngine,
    controller: InteractionController,
    components: Vec<(Box<dyn Component>, CellBounds)>,
    measurer: LabelMeasurer,
    matrix: Rc<Matrix>,
}

impl RenderedHeatmap {
    pub fn engine(&self) -> &GridLayoutEngine {
        &self.engine
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut InteractionController {
        &mut self.controller
    }

    pub fn cell_bounds(&self, cell: Cell) -> Result<CellBounds> {
        Ok(self.engine.cell_bounds(cell)?)
    }

    /// View state of the component drawing `cell`.
    pub fn view(&self, cell: Cell) -> Option<SharedView> {
        self.components
            .iter()
            .find(|(c, _)| c.cell() == cell)
            .and_then(|(c, _)| c.view())
    }

    pub fn click_row_label(&mut self, row: usize) -> Highlight {
        gesture::toggle_row_highlight(&mut self.controller, row)
    }

    pub fn click_col_label(&mut self, col: usize) -> Highlight {
        gesture::toggle_col_highlight(&mut self.controller, col)
    }

    pub fn click_cell(&mut self, row: usize, col: usize) -> Highlight {
        gesture::toggle_cell_highlight(&mut self.controller, row, col)
    }

    /// Pointer moved to `point` in canvas coordinates.
    pub fn hover(&mut self, point: Point) -> Result<Option<Datapoint>> {
        let bounds = self.engine.cell_bounds(Cell::Colormap)?;
        let zoom = self.controller.transform();
        let hit = colormap::hit_test(&self.matrix, &zoom, &bounds, point);
        self.controller.set_hovered_datapoint(hit);
        Ok(hit)
    }

    /// End of a brush drag over the colormap, in data-cell coordinates.
    pub fn brush(&mut self, brush: Option<BrushExtent>) -> Result<ZoomTransform> {
        let bounds = self.engine.cell_bounds(Cell::Colormap)?;
        Ok(gesture::brush_end(
            &mut self.controller,
            brush,
            bounds.width,
            bounds.height,
        ))
    }

    pub fn click_empty_canvas(&mut self) {
        gesture::click_empty_canvas(&mut self.controller);
    }

    /// Draw every component again with its current view state.
    pub fn redraw(&mut self, sink: &mut dyn Canvas) {
        for (component, bounds) in &mut self.components {
            draw_component(component.as_mut(), *bounds, sink);
        }
    }

    pub fn into_measurer(self) -> LabelMeasurer {
        self.measurer
    }
}

impl std::fmt::Debug for RenderedHeatmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<Cell> = self.components.iter().map(|(c, _)| c.cell()).collect();
        f.debug_struct("RenderedHeatmap")
            .field("engine", &self.engine)
            .field("controller", &self.controller)
            .field("cells", &cells)
            .field("measurer", &self.measurer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use heatgrid_core::SideColumn;
    use heatgrid_text::MonospaceBackend;

    use super::*;
    use crate::canvas::RecordingCanvas;

    fn matrix() -> Matrix {
        Matrix::new(2, 2, vec![0.0, 1.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn invalid_options_are_rejected_in_full() {
        let options = HeatmapOptions {
            padding: -1.0,
            text_max_lines: 0,
            ..HeatmapOptions::default()
        };
        match Heatmap::new(options, matrix()) {
            Err(Error::Config(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected config errors, got {other:?}"),
        }
    }

    #[test]
    fn side_column_length_must_match_rows() {
        let options = HeatmapOptions {
            left_columns: vec![SideColumn::new("g", ["a"])],
            ..HeatmapOptions::default()
        };
        assert!(matches!(Heatmap::new(options, matrix()), Err(Error::Matrix(_))));
    }

    #[test]
    fn components_follow_options() {
        let options = HeatmapOptions {
            title: Some("t".into()),
            xaxis_hidden: true,
            yaxis_location: YAxisLocation::Left,
            yaxis_title: Some("rows".into()),
            left_columns: vec![SideColumn::new("g", ["a", "b"])],
            ..HeatmapOptions::default()
        };
        let heatmap = Heatmap::new(options, matrix()).unwrap();
        let cells: Vec<Cell> = heatmap.components().iter().map(|c| c.cell()).collect();
        assert_eq!(
            cells,
            vec![
                Cell::Title,
                Cell::LeftYAxis,
                Cell::LeftYAxisTitle,
                Cell::LeftColumn(0),
                Cell::LeftColumnHeader(0),
                Cell::Colormap,
            ]
        );
    }

    #[test]
    fn render_draws_every_region() {
        let options = HeatmapOptions {
            legend_colors: Some(vec!["#fff".into(), "#000".into()]),
            ..HeatmapOptions::default()
        };
        let heatmap = Heatmap::new(options, matrix()).unwrap();
        let mut canvas = RecordingCanvas::new();
        let rendered = heatmap
            .render(Size::new(400.0, 300.0), MonospaceBackend::default(), &mut canvas)
            .unwrap();
        assert!(rendered.engine().diagnostics().is_empty());
        // Four cells plus two legend bands.
        assert_eq!(canvas.rects().count(), 6);
        assert!(canvas.texts().any(|t| t == "1"));
        assert!(rendered.view(Cell::Colormap).is_some());
        assert!(rendered.view(Cell::ColorLegend).is_none());
    }
}
