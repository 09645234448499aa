#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Vertical distance between two stacked graph rows, in pixels.
pub const DEFAULT_ROW_HEIGHT: i32 = 50;
/// Height of a graph plot area, in pixels.
pub const DEFAULT_GRAPH_HEIGHT: i32 = 50;
/// Height of one text line of the labels, in pixels.
pub const DEFAULT_TEXT_HEIGHT: i32 = 15;
/// Gap between the right edge of the plot area and the labels.
pub const DEFAULT_LABEL_GAP: i32 = 15;
/// Width of the label column.
pub const DEFAULT_LABEL_WIDTH: i32 = 185;
/// Colors assigned to the first rows, in order.
pub const DEFAULT_PALETTE: [Color; 5] = [
    Color::rgb(255, 100, 100),
    Color::rgb(90, 225, 90),
    Color::rgb(100, 100, 255),
    Color::rgb(255, 150, 50),
    Color::rgb(220, 220, 100),
];
/// Color of the rows past the end of the palette.
pub const DEFAULT_FALLBACK_COLOR: Color = Color::rgb(200, 200, 200);

/// RGBA color, 8 bits per channel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Geometry and palette of the graph overlay.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct GraphLayout {
    /// Vertical distance between two stacked rows.
    pub row_height: i32,
    /// Plot area height.
    pub graph_height: i32,
    /// Label line height.
    pub text_height: i32,
    /// Gap between the plot area and the labels.
    pub label_gap: i32,
    /// Label column width.
    pub label_width: i32,
    /// Colors of the first rows.
    pub palette: Vec<Color>,
    /// Color of the rows past the end of the palette.
    pub fallback_color: Color,
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            graph_height: DEFAULT_GRAPH_HEIGHT,
            text_height: DEFAULT_TEXT_HEIGHT,
            label_gap: DEFAULT_LABEL_GAP,
            label_width: DEFAULT_LABEL_WIDTH,
            palette: DEFAULT_PALETTE.to_vec(),
            fallback_color: DEFAULT_FALLBACK_COLOR,
        }
    }
}

impl GraphLayout {
    /// Sets the distance between stacked rows.
    pub fn row_height(mut self, height: i32) -> Self {
        self.row_height = height;
        self
    }

    /// Sets the plot area height.
    pub fn graph_height(mut self, height: i32) -> Self {
        self.graph_height = height;
        self
    }

    /// Sets the label line height.
    pub fn text_height(mut self, height: i32) -> Self {
        self.text_height = height;
        self
    }

    /// Sets the gap between the plot area and the labels.
    pub fn label_gap(mut self, gap: i32) -> Self {
        self.label_gap = gap;
        self
    }

    /// Sets the label column width.
    pub fn label_width(mut self, width: i32) -> Self {
        self.label_width = width;
        self
    }

    /// Replaces the palette.
    pub fn palette(mut self, palette: impl IntoIterator<Item = Color>) -> Self {
        self.palette = palette.into_iter().collect();
        self
    }

    /// Sets the color used once the palette is exhausted.
    pub fn fallback_color(mut self, color: Color) -> Self {
        self.fallback_color = color;
        self
    }

    /// Checks that the layout can draw at least one colored row.
    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(Error::EmptyPalette);
        }
        Ok(())
    }

    /// Returns the color of the row at `index`.
    ///
    /// Indices in `[0, palette.len())` use the palette, everything else the
    /// fallback color.
    pub fn color_for(&self, index: usize) -> Color {
        if index < self.palette.len() {
            self.palette[index]
        } else {
            self.fallback_color
        }
    }

    #[cfg(feature = "serde")]
    /// Reads a layout from a JSON file. Missing fields keep their default.
    pub fn from_json_file(filepath: impl AsRef<std::path::Path>) -> Result<Self> {
        use std::{fs::File, io::BufReader};

        let file = File::open(filepath)?;
        let reader = BufReader::new(file);
        let layout: Self = serde_json::from_reader(reader).map_err(Error::from)?;
        layout.validate()?;
        Ok(layout)
    }
}

#[cfg(test)]
#[test]
fn palette_boundary() {
    let layout = GraphLayout::default();
    assert_eq!(layout.color_for(0), DEFAULT_PALETTE[0]);
    assert_eq!(layout.color_for(4), DEFAULT_PALETTE[4]);
    assert_eq!(layout.color_for(5), DEFAULT_FALLBACK_COLOR);
    assert_eq!(layout.color_for(42), DEFAULT_FALLBACK_COLOR);
}

#[cfg(test)]
#[test]
fn custom_palette() {
    let red = Color::rgb(255, 0, 0);
    let gray = Color::rgba(10, 10, 10, 128);
    let layout = GraphLayout::default().palette([red]).fallback_color(gray);
    assert_eq!(layout.color_for(0), red);
    assert_eq!(layout.color_for(1), gray);
    assert!(layout.validate().is_ok());
}

#[cfg(test)]
#[test]
fn empty_palette_is_rejected() {
    let layout = GraphLayout::default().palette(Vec::new());
    assert!(matches!(layout.validate(), Err(Error::EmptyPalette)));
    // rows still get the fallback color
    assert_eq!(layout.color_for(0), DEFAULT_FALLBACK_COLOR);
}

#[cfg(test)]
#[test]
fn builder_geometry() {
    let layout = GraphLayout::default()
        .row_height(60)
        .graph_height(40)
        .text_height(12)
        .label_gap(5)
        .label_width(100);
    assert_eq!(layout.row_height, 60);
    assert_eq!(layout.graph_height, 40);
    assert_eq!(layout.text_height, 12);
    assert_eq!(layout.label_gap, 5);
    assert_eq!(layout.label_width, 100);
}

#[cfg(all(test, feature = "serde"))]
#[test]
fn layout_from_json() {
    let path = std::env::temp_dir().join(format!("profgraph-layout-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "row_height": 80, "palette": [{ "r": 1, "g": 2, "b": 3, "a": 255 }] }"#).unwrap();

    let layout = GraphLayout::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(layout.row_height, 80);
    assert_eq!(layout.graph_height, DEFAULT_GRAPH_HEIGHT);
    assert_eq!(layout.color_for(0), Color::rgb(1, 2, 3));
    assert_eq!(layout.color_for(1), DEFAULT_FALLBACK_COLOR);
}
