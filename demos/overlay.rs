//! # Frame profiler overlay
//!
//! Simulates a few hundred frames of a game loop, times its stages with the
//! profiler and renders the resulting graph overlay to `overlay.svg`.
//!
//! Run with: `RUST_LOG=debug cargo run --example overlay`

use std::{error::Error, thread, time::Duration};

use profgraph_rs::prelude::*;
use rand::Rng;
use tracing_subscriber::EnvFilter;

const FRAMES: usize = 300;
const HISTORY: usize = 200;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut rng = rand::rng();
    let mut profiler = Profiler::new();
    let mut graph = ProfilerGraph::new(HISTORY)?;

    for frame in 0..FRAMES {
        {
            let mut timer = profiler.timer("frame", TimerKind::GraphAdd, Precision::Milli);
            {
                let _physics = timer.timer("physics", TimerKind::GraphAdd, Precision::Milli);
                thread::sleep(Duration::from_micros(rng.random_range(200..800)));
            }
            {
                let _render = timer.timer("render", TimerKind::Avg, Precision::Micro);
                thread::sleep(Duration::from_micros(rng.random_range(100..400)));
            }
        }

        // streaming only happens during the first half
        if frame < FRAMES / 2 {
            profiler.graph_set("chunks loaded", rng.random_range(0..8) as f32);
        }
        profiler.graph_set("draw calls", rng.random_range(900..1100) as f32);

        graph.put(&profiler.graph_pop());
    }

    print!("{profiler}");
    for (name, series) in graph.series() {
        println!("{name}: min {:.3} max {:.3}", series.min(), series.max());
    }

    Draw::from(&graph)
        .with_options(DrawOptions::default().draw_output(DrawOutput::Svg("overlay.svg".into())))
        .plot()?;
    println!("graph written to overlay.svg");

    Ok(())
}
