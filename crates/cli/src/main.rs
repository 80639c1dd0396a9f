use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use planar_gen::prelude::*;
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Demo generator of random planar geometry")]
struct Cmd {
    /// Seeds the draw oracle; same seed replays the same geometry.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// A single random point in a bounding box.
    Point {
        #[arg(long, default_value_t = 100.0)]
        width: f64,
        #[arg(long, default_value_t = 100.0)]
        height: f64,
    },
    /// A simple (possibly concave) contour.
    Contour {
        #[arg(long, default_value_t = 5)]
        min_size: usize,
        #[arg(long)]
        max_size: Option<usize>,
        #[arg(long, default_value_t = 100.0)]
        width: f64,
        #[arg(long, default_value_t = 100.0)]
        height: f64,
    },
    /// A strictly convex contour.
    ConvexContour {
        #[arg(long, default_value_t = 5)]
        min_size: usize,
        #[arg(long)]
        max_size: Option<usize>,
        #[arg(long, default_value_t = 100.0)]
        width: f64,
        #[arg(long, default_value_t = 100.0)]
        height: f64,
    },
    /// A polygon with holes.
    Polygon {
        #[arg(long, default_value_t = 6)]
        border_size: usize,
        /// Comma-separated hole sizes, e.g. "4,4".
        #[arg(long, default_value = "4")]
        holes: String,
        #[arg(long, default_value_t = 100.0)]
        width: f64,
        #[arg(long, default_value_t = 100.0)]
        height: f64,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let mut oracle = StdRngOracle::seed_from_u64(cmd.seed);

    let output = match cmd.action {
        Action::Point { width, height } => {
            let point = gen_point(&mut oracle, (0.0, width), (0.0, height))?;
            tracing::info!(?point, "generated point");
            json!({ "point": [point.x, point.y] })
        }
        Action::Contour { min_size, max_size, width, height } => {
            let (contour, warning) =
                gen_contour(&mut oracle, (0.0, width), (0.0, height), min_size, max_size)?;
            log_warning(&warning);
            tracing::info!(vertices = contour.len(), "generated contour");
            json!({ "contour": vertices_json(&contour) })
        }
        Action::ConvexContour { min_size, max_size, width, height } => {
            let (contour, warning) =
                gen_convex_contour(&mut oracle, (0.0, width), (0.0, height), min_size, max_size)?;
            log_warning(&warning);
            tracing::info!(vertices = contour.len(), "generated convex contour");
            json!({ "convex_contour": vertices_json(&contour) })
        }
        Action::Polygon { border_size, holes, width, height } => {
            let hole_sizes = parse_hole_sizes(&holes)?;
            let polygon = gen_polygon(&mut oracle, (0.0, width), (0.0, height), border_size, &hole_sizes)?;
            tracing::info!(
                border_vertices = polygon.border.len(),
                hole_count = polygon.holes.len(),
                "generated polygon"
            );
            json!({
                "border": vertices_json(&polygon.border),
                "holes": polygon.holes.iter().map(vertices_json).collect::<Vec<_>>(),
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn vertices_json(contour: &Contour) -> serde_json::Value {
    json!(contour
        .vertices
        .iter()
        .map(|p| vec![p.x, p.y])
        .collect::<Vec<_>>())
}

fn log_warning(warning: &Option<SizeWarning>) {
    if let Some(w) = warning {
        tracing::warn!(message = %w.message, "size clamped");
    }
}

fn parse_hole_sizes(raw: &str) -> Result<Vec<usize>> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().parse::<usize>().with_context(|| format!("invalid hole size {s:?}")))
        .collect()
}
