//! # profgraph: rolling profiler graphs for debug overlays
//!
//! **profgraph** keeps the recent history of named performance counters (frame time,
//! subsystem costs, draw calls...) and renders it as stacked line graphs with min/max
//! labels, the way an in-game profiler overlay does.
//!
//! ## Core Components
//! | Component   | Description                                                                                     |
//! |-------------|-------------------------------------------------------------------------------------------------|
//! | **`ProfilerGraph`** | Per-metric bounded history with running min/max, and its renderer.                    |
//! | **`MetricSeries`**  | One metric's history; missing ticks are `None`.                                       |
//! | **`GraphLayout`**   | Row geometry and palette.                                                             |
//! | **`Surface` / `Font`** | What the host renderer provides: line segments and text in a rectangle.            |
//! | **`Profiler`**      | Collects named measurements and the per-frame graph values.                           |
//! | **`Draw`**          | Renders a graph to SVG/PNG with [`plotters`](https://crates.io/crates/plotters).      |
//!
//! ## Rendering rules
//! - Rows are stacked upwards in name order, one pixel column per history slot.
//! - The first five rows take the palette colors, the next ones are gray.
//! - Series whose range does not start at zero are drawn as connected segments,
//!   the others as bars from the baseline.
//! - A metric that stops being sampled scrolls out and is dropped once its
//!   whole history is empty.
//!
//! ## Getting Started
//! ```rust
//! use profgraph_rs::prelude::*;
//!
//! let mut graph = ProfilerGraph::new(100).unwrap();
//!
//! let mut values = GraphValues::new();
//! values.insert("fps".to_owned(), 60.0);
//! graph.put(&values);
//!
//! let mut surface = RecordingSurface::new();
//! graph.draw(10, 300, &mut surface, &RecordingFont).unwrap();
//! assert_eq!(surface.texts().count(), 2);
//! ```
//!
//! ## Features
//! | Feature    | Description                                                        |
//! |------------|--------------------------------------------------------------------|
//! | `draws`    | plotters surface and image output *(default)*.                     |
//! | `profiler` | `Profiler` and `ScopeTimer` sample producers *(default)*.          |
//! | `serde`    | Serialize layouts and load them from JSON files.                   |
//!
//! ## License
//! MIT
#![warn(missing_docs)]

/// Metric histories and their rendering.
pub mod graph;

/// Error types for the library.
pub mod errors;

/// Drawing collaborators: surfaces and fonts.
pub mod surface;

/// Utility functions and helpers.
mod utils;

/// Named measurements and scope timers.
#[cfg(feature = "profiler")]
pub mod profiler;

/// Draw graphs with plotters backends: png, svg.
#[cfg(feature = "draws")]
pub mod draws;

/// Re-exports of commonly used types and traits for convenience.
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::graph::*;
    pub use crate::surface::*;

    #[cfg(feature = "profiler")]
    pub use crate::profiler::*;

    #[cfg(feature = "draws")]
    pub use crate::draws::*;
}
