//! Rolling multi-series profiler graph.
//!
//! This module provides:
//! - `ProfilerGraph`: the per-metric history store and its renderer.
//! - `MetricSeries`: one metric's bounded history with running min/max.
//! - `GraphLayout`: row geometry and palette.

mod layout;
mod series;

#[cfg(test)]
mod scenarios;

use std::collections::{BTreeMap, btree_map::Iter};

use tracing::{debug, trace, warn};

use crate::{
    errors::{Error, Result},
    surface::{Font, Surface},
};

pub use layout::*;
pub use series::*;

/// Samples of one tick, keyed by metric name.
pub type GraphValues = BTreeMap<String, f32>;

/// Stacked line graphs of the recent history of named metrics.
///
/// Call [`put`](Self::put) once per tick with the samples of that tick, and
/// [`draw`](Self::draw) whenever the overlay is rendered. Rows are stacked
/// upwards in name order.
#[derive(Debug, Clone)]
pub struct ProfilerGraph {
    series: BTreeMap<String, MetricSeries>,
    max_history: usize,
    layout: GraphLayout,
}

impl ProfilerGraph {
    /// Creates a graph keeping `max_history` samples per metric, with the
    /// default layout.
    ///
    /// ### Returns
    /// The new graph or [`Error::ZeroCapacity`].
    pub fn new(max_history: usize) -> Result<Self> {
        Self::with_layout(max_history, GraphLayout::default())
    }

    /// Creates a graph keeping `max_history` samples per metric.
    ///
    /// ### Arguments
    /// * `max_history` - History capacity, also the plot width in pixels.
    /// * `layout` - Row geometry and palette.
    ///
    /// ### Returns
    /// The new graph, or an error if the capacity is zero or the palette empty.
    pub fn with_layout(max_history: usize, layout: GraphLayout) -> Result<Self> {
        if max_history == 0 {
            return Err(Error::ZeroCapacity);
        }
        layout.validate()?;

        Ok(Self {
            series: BTreeMap::new(),
            max_history,
            layout,
        })
    }

    /// Returns the history capacity.
    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Returns the layout.
    pub fn layout(&self) -> &GraphLayout {
        &self.layout
    }

    /// Returns an iterator over the tracked series, in drawing order.
    pub fn series(&self) -> Iter<'_, String, MetricSeries> {
        self.series.iter()
    }

    /// Returns the series tracked under `name`.
    pub fn get(&self, name: &str) -> Option<&MetricSeries> {
        self.series.get(name)
    }

    /// Returns the number of tracked series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if no metric is tracked.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Checks that `value` can be plotted.
    pub fn check_sample(name: &str, value: f32) -> Result<f32> {
        if !value.is_finite() {
            return Err(Error::NonFiniteSample {
                name: name.to_owned(),
                value,
            });
        }
        Ok(value)
    }

    /// Records the samples of one tick.
    ///
    /// Tracked metrics missing from `values` get a missing slot and are
    /// dropped once their whole history is missing. Unknown metrics start a
    /// new series. Non-finite samples are logged and handled as missing.
    pub fn put(&mut self, values: &GraphValues) {
        let values = values
            .iter()
            .filter_map(|(name, &value)| match Self::check_sample(name, value) {
                Ok(value) => Some((name.as_str(), value)),
                Err(e) => {
                    warn!(metric = %name, "sample ignored: {e}");
                    None
                }
            })
            .collect::<BTreeMap<_, _>>();

        let capacity = self.max_history;
        self.series.retain(|name, series| {
            let alive = series.push(values.get(name.as_str()).copied(), capacity);
            if !alive {
                debug!(metric = %name, "series removed, no sample left in history");
            }
            alive
        });

        for (name, value) in values {
            if !self.series.contains_key(name) {
                debug!(metric = %name, value, "series created");
                self.series.insert(name.to_owned(), MetricSeries::new(value, capacity));
            }
        }
    }

    /// Size `(width, height)` covered by a [`draw`](Self::draw) call: plot
    /// area plus label column, times the number of rows.
    pub fn extent(&self) -> (i32, i32) {
        let width = self.max_history as i32 + self.layout.label_gap + self.layout.label_width;
        let rows = self.series.len().max(1) as i32;
        let height = (rows - 1) * self.layout.row_height + self.layout.graph_height.max(self.layout.text_height);
        (width, height)
    }

    /// Renders every series as one row, the first one with its bottom-left
    /// corner at `(x_left, y_bottom)`, the next ones stacked above.
    ///
    /// ### Arguments
    /// * `x_left` - Left edge of the plot areas.
    /// * `y_bottom` - Baseline of the first row.
    /// * `surface` - Target of the line segments.
    /// * `font` - Text service drawing the labels onto `surface`.
    pub fn draw<S, F>(&self, x_left: i32, y_bottom: i32, surface: &mut S, font: &F) -> Result<()>
    where
        S: Surface + ?Sized,
        F: Font<S> + ?Sized,
    {
        trace!(series = self.series.len(), x_left, y_bottom, "drawing profiler graph");

        let layout = &self.layout;
        let graph_height = layout.graph_height;
        let text_height = layout.text_height;
        let text_x = x_left + self.max_history as i32 + layout.label_gap;
        let text_x2 = text_x + layout.label_width;

        for (index, (name, series)) in self.series.iter().enumerate() {
            let color = layout.color_for(index);
            let y = y_bottom - index as i32 * layout.row_height;

            let name_rect = (
                text_x,
                y - graph_height / 2 - text_height / 2,
                text_x2,
                y - graph_height / 2 + text_height / 2,
            );
            font.draw_text(surface, name, name_rect.into(), color)?;

            let bounds_rect = (text_x, y - graph_height, text_x2, y - graph_height + text_height);
            font.draw_text(surface, &series.bounds_label(), bounds_rect.into(), color)?;

            self.draw_series(series, x_left, y, color, surface)?;
        }

        Ok(())
    }

    /// Draws the plot area of one row, one pixel column per history slot.
    fn draw_series<S>(&self, series: &MetricSeries, x_left: i32, y: i32, color: Color, surface: &mut S) -> Result<()>
    where
        S: Surface + ?Sized,
    {
        let relative = series.is_relative();
        let height = self.layout.graph_height as f32;
        let mut last_offset = None;

        for (x, value) in (x_left..).zip(series.history()) {
            // a zero sample in a flat zero range has nothing to show
            let offset = value.and_then(|value| {
                let scaled = series.scale(value);
                (scaled != 1.0 || value != 0.0).then(|| (scaled * height) as i32)
            });

            let Some(offset) = offset else {
                last_offset = None;
                continue;
            };

            if relative {
                if let Some(last) = last_offset {
                    surface.draw_line((x - 1, y - last), (x, y - offset), color)?;
                }
                last_offset = Some(offset);
            } else {
                surface.draw_line((x, y), (x, y - offset), color)?;
            }
        }

        Ok(())
    }
}
