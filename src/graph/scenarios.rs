use rand::{Rng, SeedableRng, rngs::StdRng};

use super::*;
use crate::surface::{RecordingFont, RecordingSurface, Rect};

fn values(samples: &[(&str, f32)]) -> GraphValues {
    samples.iter().map(|(name, value)| (name.to_string(), *value)).collect()
}

fn render(graph: &ProfilerGraph, x_left: i32, y_bottom: i32) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    graph.draw(x_left, y_bottom, &mut surface, &RecordingFont).unwrap();
    surface
}

#[test]
fn zero_capacity_is_rejected() {
    assert!(matches!(ProfilerGraph::new(0), Err(Error::ZeroCapacity)));
    let layout = GraphLayout::default().palette(Vec::new());
    assert!(matches!(ProfilerGraph::with_layout(10, layout), Err(Error::EmptyPalette)));
}

#[test]
fn fps_lifecycle() {
    let capacity = 16;
    let mut graph = ProfilerGraph::new(capacity).unwrap();

    graph.put(&values(&[("fps", 60.0)]));
    let fps = graph.get("fps").unwrap();
    assert_eq!(fps.len(), capacity);
    assert_eq!(fps.last(), Some(60.0));
    assert_eq!((fps.min(), fps.max()), (60.0, 60.0));

    for _ in 0..capacity - 1 {
        graph.put(&GraphValues::new());
        assert!(graph.get("fps").is_some());
    }
    graph.put(&GraphValues::new());
    assert!(graph.get("fps").is_none());
    assert!(graph.is_empty());

    graph.put(&values(&[("fps", 30.0)]));
    let fps = graph.get("fps").unwrap();
    assert_eq!(fps.len(), capacity);
    assert_eq!(fps.last(), Some(30.0));
    assert_eq!((fps.min(), fps.max()), (30.0, 30.0));
    assert_eq!(fps.history().flatten().count(), 1);
}

#[test]
fn empty_put_on_empty_graph() {
    let mut graph = ProfilerGraph::new(4).unwrap();
    graph.put(&GraphValues::new());
    assert!(graph.is_empty());
    assert_eq!(render(&graph, 0, 100).primitives().count(), 0);
}

#[test]
fn capacity_and_bounds_hold_under_random_ticks() {
    let capacity = 12;
    let names = ["cpu", "gpu", "net", "physics"];
    let mut rng = StdRng::seed_from_u64(42);
    let mut graph = ProfilerGraph::new(capacity).unwrap();

    for _ in 0..500 {
        let mut tick = GraphValues::new();
        for name in names {
            if rng.random_bool(0.6) {
                tick.insert(name.to_string(), rng.random_range(-50..50) as f32);
            }
        }
        graph.put(&tick);

        for (name, series) in graph.series() {
            assert!(series.len() <= capacity, "{name} overflows");
            let present = series.history().flatten().copied().collect::<Vec<_>>();
            assert!(!present.is_empty(), "{name} should have been removed");
            let min = present.iter().copied().fold(f32::INFINITY, f32::min);
            let max = present.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            assert_eq!(series.min(), min, "{name} min");
            assert_eq!(series.max(), max, "{name} max");
        }
    }
}

#[test]
fn non_finite_samples_count_as_missing() {
    let mut graph = ProfilerGraph::new(4).unwrap();
    graph.put(&values(&[("nan", f32::NAN), ("fps", 60.0)]));
    assert!(graph.get("nan").is_none());

    graph.put(&values(&[("fps", f32::INFINITY)]));
    let fps = graph.get("fps").unwrap();
    assert_eq!(fps.last(), None);
    assert_eq!(fps.max(), 60.0);

    assert!(matches!(
        ProfilerGraph::check_sample("fps", f32::NEG_INFINITY),
        Err(Error::NonFiniteSample { .. })
    ));
    assert_eq!(ProfilerGraph::check_sample("fps", 1.5).unwrap(), 1.5);
}

#[test]
fn absolute_bars() {
    let mut graph = ProfilerGraph::new(4).unwrap();
    for v in [0.0, 10.0, 5.0] {
        graph.put(&values(&[("load", v)]));
    }
    assert_eq!(graph.get("load").unwrap().scale(5.0), 0.5);

    // history: [-, 0, 10, 5]
    let surface = render(&graph, 0, 100);
    let lines = surface.lines().map(|(from, to, _)| (from, to)).collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![((1, 100), (1, 100)), ((2, 100), (2, 50)), ((3, 100), (3, 75))]
    );
}

#[test]
fn relative_segments() {
    let mut graph = ProfilerGraph::new(4).unwrap();
    for v in [10.0, 20.0, 15.0] {
        graph.put(&values(&[("frame", v)]));
    }

    // history: [-, 10, 20, 15]
    let surface = render(&graph, 0, 100);
    let lines = surface.lines().map(|(from, to, _)| (from, to)).collect::<Vec<_>>();
    assert_eq!(lines, vec![((1, 100), (2, 50)), ((2, 50), (3, 75))]);
}

#[test]
fn missing_slot_breaks_segments() {
    let mut graph = ProfilerGraph::new(4).unwrap();
    graph.put(&values(&[("frame", 10.0)]));
    graph.put(&GraphValues::new());
    graph.put(&values(&[("frame", 20.0)]));
    graph.put(&values(&[("frame", 15.0)]));

    // history: [10, -, 20, 15]
    let surface = render(&graph, 0, 100);
    let lines = surface.lines().map(|(from, to, _)| (from, to)).collect::<Vec<_>>();
    assert_eq!(lines, vec![((2, 50), (3, 75))]);
}

#[test]
fn zero_sample_breaks_relative_segments() {
    let mut graph = ProfilerGraph::new(5).unwrap();
    for v in [-5.0, -4.0, 0.0, -2.0, -1.0] {
        graph.put(&values(&[("delta", v)]));
    }
    let delta = graph.get("delta").unwrap();
    assert_eq!((delta.min(), delta.max()), (-5.0, 0.0));
    assert!(delta.is_relative());

    // history: [-5, -4, 0, -2, -1], the 0 sample sits at the top and is skipped
    let surface = render(&graph, 0, 100);
    let lines = surface.lines().map(|(from, to, _)| (from, to)).collect::<Vec<_>>();
    assert_eq!(lines, vec![((0, 100), (1, 90)), ((3, 70), (4, 60))]);
}

#[test]
fn flat_zero_series_draws_nothing() {
    let mut graph = ProfilerGraph::new(4).unwrap();
    for _ in 0..3 {
        graph.put(&values(&[("idle", 0.0)]));
    }

    let surface = render(&graph, 0, 100);
    assert_eq!(surface.lines().count(), 0);
    assert_eq!(surface.texts().count(), 2);
}

#[test]
fn flat_nonzero_series_draws_full_bars() {
    let mut graph = ProfilerGraph::new(3).unwrap();
    graph.put(&values(&[("fps", 60.0)]));
    graph.put(&values(&[("fps", 60.0)]));

    let surface = render(&graph, 10, 100);
    let lines = surface.lines().map(|(from, to, _)| (from, to)).collect::<Vec<_>>();
    assert_eq!(lines, vec![((11, 100), (11, 50)), ((12, 100), (12, 50))]);
}

#[test]
fn labels_layout() {
    let capacity = 100;
    let mut graph = ProfilerGraph::new(capacity).unwrap();
    graph.put(&values(&[("fps", 60.0)]));

    let surface = render(&graph, 10, 300);
    let texts = surface.texts().collect::<Vec<_>>();
    assert_eq!(texts.len(), 2);

    let (name, rect, color) = texts[0];
    assert_eq!(name, "fps");
    assert_eq!(rect, Rect::from((125, 268, 310, 282)));
    assert_eq!(color, DEFAULT_PALETTE[0]);

    let (bounds, rect, _) = texts[1];
    assert_eq!(bounds, "60\n\n60");
    assert_eq!(rect, Rect::from((125, 250, 310, 265)));
}

#[test]
fn rows_stack_upwards_and_run_out_of_colors() {
    let mut graph = ProfilerGraph::new(2).unwrap();
    let names = ["a", "b", "c", "d", "e", "f"];
    graph.put(&names.iter().map(|n| (n.to_string(), 1.0)).collect::<GraphValues>());

    let surface = render(&graph, 0, 400);
    let names_drawn = surface
        .texts()
        .step_by(2)
        .map(|(text, rect, color)| (text.to_owned(), rect.bottom, color))
        .collect::<Vec<_>>();

    assert_eq!(names_drawn.len(), 6);
    for (i, (text, bottom, color)) in names_drawn.iter().enumerate() {
        assert_eq!(text, names[i]);
        assert_eq!(*bottom, 400 - i as i32 * DEFAULT_ROW_HEIGHT - 25 + 7);
        if i < DEFAULT_PALETTE.len() {
            assert_eq!(*color, DEFAULT_PALETTE[i]);
        } else {
            assert_eq!(*color, DEFAULT_FALLBACK_COLOR);
        }
    }

    // one full-height bar per row, row color
    let bars = surface.lines().collect::<Vec<_>>();
    assert_eq!(bars.len(), 6);
    assert_eq!(bars[5], ((1, 150), (1, 100), DEFAULT_FALLBACK_COLOR));
}

#[test]
fn injected_geometry() {
    let layout = GraphLayout::default()
        .graph_height(20)
        .row_height(30)
        .palette([Color::rgb(1, 1, 1)]);
    let mut graph = ProfilerGraph::with_layout(3, layout).unwrap();
    graph.put(&values(&[("a", 0.0), ("b", 4.0)]));
    graph.put(&values(&[("a", 2.0), ("b", 2.0)]));

    let surface = render(&graph, 0, 100);
    let lines = surface.lines().collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            ((1, 100), (1, 100), Color::rgb(1, 1, 1)),
            ((2, 100), (2, 80), Color::rgb(1, 1, 1)),
            ((1, 50), (2, 70), DEFAULT_FALLBACK_COLOR),
        ]
    );
    assert_eq!(graph.extent(), (3 + DEFAULT_LABEL_GAP + DEFAULT_LABEL_WIDTH, 50));
}
