//! Module for rendering profiler graphs with plotters backends.

use std::path::PathBuf;

use crate::errors::{Error, Result};
use crate::graph::{Color, ProfilerGraph};
use crate::surface::{Font, Point, Rect, Surface};

use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::RGBAColor;

/// Margin around the graph in the generated images.
const MARGIN: u32 = 10;
/// Font family of the labels.
const FONT_FAMILY: &str = "monospace";

impl From<Color> for RGBAColor {
    fn from(color: Color) -> Self {
        RGBAColor(color.r, color.g, color.b, color.a as f64 / 255.0)
    }
}

/// [`Surface`] drawing onto a plotters drawing area, in backend pixels.
pub struct PlotterSurface<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
}

impl<'a, DB: DrawingBackend> PlotterSurface<'a, DB> {
    /// Wraps `area`.
    pub fn new(area: &'a DrawingArea<DB, Shift>) -> Self {
        Self { area }
    }
}

impl<DB: DrawingBackend> Surface for PlotterSurface<'_, DB> {
    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<()> {
        let style = ShapeStyle::from(RGBAColor::from(color));
        self.area
            .draw(&PathElement::new(vec![from, to], style))
            .map_err(|e| Error::Plotters(e.to_string()))
    }
}

/// [`Font`] drawing text with a plotters font; each line is `size` pixels high.
#[derive(Debug, Clone)]
pub struct PlotterFont {
    family: String,
    size: u32,
}

impl PlotterFont {
    /// Creates a font of the given family and pixel size.
    pub fn new(family: impl ToString, size: u32) -> Self {
        Self {
            family: family.to_string(),
            size,
        }
    }
}

impl<DB: DrawingBackend> Font<PlotterSurface<'_, DB>> for PlotterFont {
    fn draw_text(&self, surface: &mut PlotterSurface<'_, DB>, text: &str, rect: Rect, color: Color) -> Result<()> {
        let style = (self.family.as_str(), self.size).into_font().color(&RGBAColor::from(color));

        for (i, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let position = (rect.left, rect.top + i as i32 * self.size as i32);
            surface
                .area
                .draw(&Text::new(line, position, style.clone()))
                .map_err(|e| Error::Plotters(e.to_string()))?;
        }

        Ok(())
    }
}

/// Output formats for the generated images with output filename.
#[derive(Debug, Clone)]
pub enum DrawOutput {
    /// Save to the output SVG file.
    Svg(PathBuf),
    /// Save to the output PNG file.
    Png(PathBuf),
}

impl Default for DrawOutput {
    fn default() -> Self {
        Self::Svg(PathBuf::from("profiler_graph.svg"))
    }
}

/// Configuration options for image generation.
#[derive(Debug, Clone)]
pub struct DrawOptions {
    /// Output format and path.
    output: DrawOutput,
    /// Canvas color behind the graph.
    background: Color,
    /// Label font family.
    font_family: String,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            output: DrawOutput::default(),
            background: Color::rgb(0, 0, 0),
            font_family: FONT_FAMILY.to_owned(),
        }
    }
}

impl DrawOptions {
    /// Sets the output format and path.
    pub fn draw_output(mut self, output: DrawOutput) -> Self {
        self.output = output;
        self
    }

    /// Sets the background color.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Sets the label font family.
    pub fn font_family(mut self, family: impl ToString) -> Self {
        self.font_family = family.to_string();
        self
    }
}

/// Renders a [`ProfilerGraph`] to an image.
pub struct Draw<'g> {
    /// Reference to the graph.
    graph: &'g ProfilerGraph,
    /// Drawing options.
    options: DrawOptions,
}

impl<'g> From<&'g ProfilerGraph> for Draw<'g> {
    fn from(graph: &'g ProfilerGraph) -> Self {
        Self {
            graph,
            options: DrawOptions::default(),
        }
    }
}

impl Draw<'_> {
    /// Sets the drawing options.
    pub fn with_options(mut self, options: DrawOptions) -> Self {
        self.options = options;
        self
    }

    /// Image size in pixels: the graph extent plus margins.
    pub fn size(&self) -> (u32, u32) {
        let (width, height) = self.graph.extent();
        (width.max(0) as u32 + 2 * MARGIN, height.max(0) as u32 + 2 * MARGIN)
    }

    /// Generates and saves the image based on the configured options.
    pub fn plot(&self) -> Result<()> {
        let size = self.size();
        match &self.options.output {
            DrawOutput::Svg(path) => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw_graph(&root)
            }
            DrawOutput::Png(path) => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw_graph(&root)
            }
        }
    }

    /// Renders the image as an SVG document.
    pub fn to_svg_string(&self) -> Result<String> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, self.size()).into_drawing_area();
            self.draw_graph(&root)?;
        }
        Ok(buffer)
    }

    /// Fills the background and draws every row, the first one at the bottom.
    fn draw_graph<DB: DrawingBackend>(&self, drawing_area: &DrawingArea<DB, Shift>) -> Result<()> {
        drawing_area
            .fill(&RGBAColor::from(self.options.background))
            .map_err(|e| Error::Plotters(e.to_string()))?;

        let (_, height) = self.graph.extent();
        let font = PlotterFont::new(&self.options.font_family, self.graph.layout().text_height.max(1) as u32);
        let mut surface = PlotterSurface::new(drawing_area);
        self.graph
            .draw(MARGIN as i32, MARGIN as i32 + height, &mut surface, &font)?;

        drawing_area.present().map_err(|e| Error::Plotters(e.to_string()))
    }
}
