//! Drawing collaborators used by [`ProfilerGraph::draw`](crate::graph::ProfilerGraph::draw).
//!
//! The graph never owns a renderer. It emits two kinds of primitives through
//! these traits:
//! - line segments between integer screen points ([`Surface`]);
//! - text strings laid out inside a rectangle ([`Font`]).
//!
//! [`RecordingSurface`] keeps every primitive in memory, which is what tests
//! and headless hosts use.

use crate::errors::Result;
use crate::graph::Color;

/// Screen point in pixels, y growing downwards.
pub type Point = (i32, i32);

/// Axis-aligned screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl From<(i32, i32, i32, i32)> for Rect {
    fn from((left, top, right, bottom): (i32, i32, i32, i32)) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl Rect {
    /// Width of the rectangle.
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height of the rectangle.
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// A 2D target able to draw line segments.
pub trait Surface {
    /// Draws a one pixel wide segment from `from` to `to`.
    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<()>;
}

/// A text service drawing pre-formatted strings onto a surface `S`.
///
/// `text` may contain `\n` line breaks; the first line starts at `rect.top`.
pub trait Font<S: ?Sized> {
    /// Draws `text` inside `rect`.
    fn draw_text(&self, surface: &mut S, text: &str, rect: Rect, color: Color) -> Result<()>;
}

/// A primitive emitted onto a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// A line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        color: Color,
    },
    /// A text block.
    Text {
        /// Drawn text.
        text: String,
        /// Layout rectangle.
        rect: Rect,
        /// Text color.
        color: Color,
    },
}

/// In-memory surface that records what was drawn.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    primitives: Vec<Primitive>,
}

impl RecordingSurface {
    /// Creates an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over all recorded primitives, in drawing order.
    pub fn primitives(&self) -> std::slice::Iter<'_, Primitive> {
        self.primitives.iter()
    }

    /// Returns the recorded line segments.
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, Color)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line { from, to, color } => Some((*from, *to, *color)),
            _ => None,
        })
    }

    /// Returns the recorded texts.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Rect, Color)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, rect, color } => Some((text.as_str(), *rect, *color)),
            _ => None,
        })
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.primitives.clear();
    }
}

impl Surface for RecordingSurface {
    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<()> {
        self.primitives.push(Primitive::Line { from, to, color });
        Ok(())
    }
}

/// Font for [`RecordingSurface`]: records the text block as given.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordingFont;

impl Font<RecordingSurface> for RecordingFont {
    fn draw_text(&self, surface: &mut RecordingSurface, text: &str, rect: Rect, color: Color) -> Result<()> {
        surface.primitives.push(Primitive::Text {
            text: text.to_owned(),
            rect,
            color,
        });
        Ok(())
    }
}

#[cfg(test)]
#[test]
fn records_in_order() {
    let mut surface = RecordingSurface::new();
    let color = Color::rgb(1, 2, 3);
    surface.draw_line((0, 0), (0, 10), color).unwrap();
    RecordingFont
        .draw_text(&mut surface, "fps", (10, 0, 50, 15).into(), color)
        .unwrap();

    assert_eq!(surface.primitives().count(), 2);
    assert_eq!(surface.lines().collect::<Vec<_>>(), vec![((0, 0), (0, 10), color)]);
    let (text, rect, _) = surface.texts().next().unwrap();
    assert_eq!(text, "fps");
    assert_eq!(rect.width(), 40);
    assert_eq!(rect.height(), 15);

    surface.clear();
    assert_eq!(surface.primitives().count(), 0);
}
