//! Named counters feeding the profiler graph.
//!
//! Two independent cycles are collected:
//! - graph values, taken once per frame with [`Profiler::graph_pop`] and handed
//!   to [`ProfilerGraph::put`](crate::graph::ProfilerGraph::put);
//! - entries (sums, averages, maxima) printed as text with
//!   [`Profiler::print`] and reset with [`Profiler::clear`].

use std::{
    collections::BTreeMap,
    fmt,
    ops::{Deref, DerefMut},
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::{
    errors::{Error, Result},
    graph::GraphValues,
    utils::{format_g, paging},
};

/// Column where the dot leader of [`Profiler::print`] ends.
const PRINT_COLUMN: usize = 44;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Sum,
    Average,
    Max,
}

impl RecordKind {
    fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Average => "average",
            Self::Max => "max",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    kind: RecordKind,
    value: f32,
    // records since the last clear
    count: u32,
}

impl Entry {
    fn value(&self) -> f32 {
        match self.kind {
            RecordKind::Average if self.count > 0 => self.value / self.count as f32,
            _ => self.value,
        }
    }

    fn avg_count(&self) -> u32 {
        match self.kind {
            RecordKind::Average if self.count > 0 => self.count,
            _ => 1,
        }
    }
}

/// Collector of named measurements.
#[derive(Debug, Clone)]
pub struct Profiler {
    entries: BTreeMap<String, Entry>,
    graph_values: GraphValues,
    started_at: DateTime<Utc>,
    clock: Instant,
}

impl Default for Profiler {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            graph_values: GraphValues::new(),
            started_at: Utc::now(),
            clock: Instant::now(),
        }
    }
}

impl Profiler {
    /// Creates an empty profiler, its clock starting now.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the entry `name`; the entry reports the sum.
    pub fn add(&mut self, name: &str, value: f32) -> Result<()> {
        self.record(name, value, RecordKind::Sum)
    }

    /// Adds `value` to the entry `name` and counts the record; the entry
    /// reports the average.
    pub fn avg(&mut self, name: &str, value: f32) -> Result<()> {
        self.record(name, value, RecordKind::Average)
    }

    /// Keeps the largest `value` recorded under `name`.
    pub fn max(&mut self, name: &str, value: f32) -> Result<()> {
        self.record(name, value, RecordKind::Max)
    }

    fn record(&mut self, name: &str, value: f32, kind: RecordKind) -> Result<()> {
        let entry = self.entries.entry(name.to_owned()).or_insert(Entry {
            kind,
            value: 0.0,
            count: 0,
        });

        if entry.kind != kind {
            return Err(Error::RecordKindMismatch {
                name: name.to_owned(),
                existing: entry.kind.name(),
                requested: kind.name(),
            });
        }

        match kind {
            RecordKind::Sum | RecordKind::Average => entry.value += value,
            RecordKind::Max if entry.count == 0 || value > entry.value => entry.value = value,
            RecordKind::Max => {}
        }
        entry.count += 1;
        Ok(())
    }

    /// Resets every entry and restarts the clock. Entries stay listed.
    pub fn clear(&mut self) {
        for entry in self.entries.values_mut() {
            entry.value = 0.0;
            entry.count = 0;
        }
        self.started_at = Utc::now();
        self.clock = Instant::now();
    }

    /// Returns the reported value of `name`, `0` if unknown.
    pub fn value(&self, name: &str) -> f32 {
        self.entries.get(name).map(Entry::value).unwrap_or(0.0)
    }

    /// Returns the number of averaged records of `name`, `1` for entries
    /// that are not averages.
    pub fn avg_count(&self, name: &str) -> u32 {
        self.entries.get(name).map(Entry::avg_count).unwrap_or(1)
    }

    /// Returns the milliseconds since creation or the last [`clear`](Self::clear).
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    /// Returns the wall-clock time of creation or of the last [`clear`](Self::clear).
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Forgets the entry `name`.
    pub fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// Sets the graph value of this frame.
    pub fn graph_set(&mut self, id: &str, value: f32) {
        self.graph_values.insert(id.to_owned(), value);
    }

    /// Adds to the graph value of this frame.
    pub fn graph_add(&mut self, id: &str, value: f32) {
        *self.graph_values.entry(id.to_owned()).or_insert(0.0) += value;
    }

    /// Takes the graph values collected since the last call.
    pub fn graph_pop(&mut self) -> GraphValues {
        std::mem::take(&mut self.graph_values)
    }

    /// Returns the reported values of the entries on `page` (1-based) out of
    /// `pagecount` pages.
    pub fn page(&self, page: u32, pagecount: u32) -> Result<GraphValues> {
        if page < 1 || page > pagecount {
            return Err(Error::InvalidPage { page, pagecount });
        }

        let (min, max) = paging(self.entries.len(), page, pagecount);
        Ok(self
            .entries
            .iter()
            .skip(min)
            .take(max - min)
            .map(|(name, entry)| (name.clone(), entry.value()))
            .collect())
    }

    /// Writes the entries on `page` as an aligned table.
    ///
    /// ### Returns
    /// The number of written lines.
    pub fn print<W: fmt::Write>(&self, out: &mut W, page: u32, pagecount: u32) -> Result<usize> {
        let values = self.page(page, pagecount)?;

        for (name, &value) in &values {
            write!(out, "  {name} ")?;
            if value == 0.0 {
                writeln!(out)?;
                continue;
            }

            let space = PRINT_COLUMN.saturating_sub(name.len());
            let leader = (0..space)
                .map(|j| if j % 2 == 1 && j + 1 < space { '.' } else { ' ' })
                .collect::<String>();
            writeln!(out, "{leader}{:>4}x {:>3}", self.avg_count(name), format_g(value, 6))?;
        }

        Ok(values.len())
    }

    /// Starts timing a scope; the measure is recorded when the guard drops.
    pub fn timer(&mut self, name: &str, kind: TimerKind, precision: Precision) -> ScopeTimer<'_> {
        ScopeTimer {
            profiler: self,
            name: name.to_owned(),
            kind,
            precision,
            started: Instant::now(),
        }
    }
}

impl fmt::Display for Profiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Profiler (since {}, {} ms) ===",
            self.started_at.format("%H:%M:%S"),
            self.elapsed_ms()
        )?;
        self.print(f, 1, 1).map(|_| ()).map_err(|_| fmt::Error)
    }
}

/// How a [`ScopeTimer`] records its measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerKind {
    /// Summed entry ([`Profiler::add`]).
    #[default]
    Add,
    /// Averaged entry ([`Profiler::avg`]).
    Avg,
    /// Graph value of the frame ([`Profiler::graph_add`]).
    GraphAdd,
    /// Largest measure ([`Profiler::max`]).
    Max,
}

/// Unit of a [`ScopeTimer`] measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Milliseconds.
    #[default]
    Milli,
    /// Microseconds.
    Micro,
    /// Nanoseconds.
    Nano,
}

impl Precision {
    /// Converts `duration` to this unit.
    pub fn measure(self, duration: Duration) -> f32 {
        let seconds = duration.as_secs_f64();
        let value = match self {
            Self::Milli => seconds * 1e3,
            Self::Micro => seconds * 1e6,
            Self::Nano => seconds * 1e9,
        };
        value as f32
    }
}

/// Guard measuring the time until it is dropped.
///
/// The guard dereferences to its [`Profiler`], so nested scopes can be timed
/// through it.
#[derive(Debug)]
pub struct ScopeTimer<'p> {
    profiler: &'p mut Profiler,
    name: String,
    kind: TimerKind,
    precision: Precision,
    started: Instant,
}

impl Deref for ScopeTimer<'_> {
    type Target = Profiler;

    fn deref(&self) -> &Self::Target {
        self.profiler
    }
}

impl DerefMut for ScopeTimer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.profiler
    }
}

impl Drop for ScopeTimer<'_> {
    fn drop(&mut self) {
        let measure = self.precision.measure(self.started.elapsed());
        let name = self.name.as_str();
        let result = match self.kind {
            TimerKind::Add => self.profiler.add(name, measure),
            TimerKind::Avg => self.profiler.avg(name, measure),
            TimerKind::Max => self.profiler.max(name, measure),
            TimerKind::GraphAdd => {
                self.profiler.graph_add(name, measure);
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!(entry = %name, "scope measure dropped: {e}");
        }
    }
}


#[cfg(test)]
mod pages {
    use super::*;

    fn profiler(names: &[&str]) -> Profiler {
        let mut profiler = Profiler::new();
        for (i, name) in names.iter().enumerate() {
            profiler.add(name, i as f32 + 1.0).unwrap();
        }
        profiler
    }

    #[test]
    fn split() {
        let profiler = profiler(&["a", "b", "c", "d", "e"]);
        let first = profiler.page(1, 2).unwrap();
        let second = profiler.page(2, 2).unwrap();
        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(second.keys().collect::<Vec<_>>(), vec!["d", "e"]);
    }

    #[test]
    fn invalid_page() {
        let profiler = profiler(&["a"]);
        assert!(matches!(profiler.page(0, 1), Err(Error::InvalidPage { page: 0, pagecount: 1 })));
        assert!(matches!(profiler.page(3, 2), Err(Error::InvalidPage { .. })));
        assert!(Profiler::new().page(1, 1).unwrap().is_empty());
    }

    #[test]
    fn print_table() {
        let mut profiler = Profiler::new();
        profiler.add("frame", 12.5).unwrap();
        profiler.avg("idle", 0.0).unwrap();

        let mut out = String::new();
        assert_eq!(profiler.print(&mut out, 1, 1).unwrap(), 2);

        let lines = out.lines().collect::<Vec<_>>();
        assert!(lines[0].starts_with("  frame  . . ."));
        assert!(lines[0].ends_with(".    1x 12.5"));
        assert_eq!(lines[0].len(), 2 + 5 + 1 + 39 + 10);
        assert_eq!(lines[1], "  idle ");
    }

    #[test]
    fn print_value_column() {
        let mut profiler = Profiler::new();
        profiler.add("a", 12.5).unwrap();
        profiler.add("b", 7.0).unwrap();
        profiler.add("c", -3.25).unwrap();

        let mut out = String::new();
        profiler.print(&mut out, 1, 1).unwrap();

        let lines = out.lines().collect::<Vec<_>>();
        assert!(lines[0].ends_with(" .    1x 12.5"));
        assert!(lines[1].ends_with(" .    1x   7"));
        assert!(lines[2].ends_with(" .    1x -3.25"));
    }

    #[test]
    fn display_report() {
        let mut profiler = Profiler::new();
        profiler.avg("frame", 4.0).unwrap();
        profiler.avg("frame", 2.0).unwrap();

        let report = profiler.to_string();
        let (header, table) = report.split_once('\n').unwrap();
        assert!(header.starts_with("=== Profiler (since "));
        assert!(header.ends_with(" ms) ==="));

        let mut expected = String::new();
        profiler.print(&mut expected, 1, 1).unwrap();
        assert_eq!(table, expected);
        assert!(table.ends_with("   2x   3\n"));
    }
}
