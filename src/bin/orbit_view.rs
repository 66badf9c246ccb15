//! Orbit View Tool
//!
//! Shows the interactive model from the terminal: a table of body positions,
//! an ASCII animation, or an SVG frame. In diagram mode it prints the
//! embedded GeoGebra reference instead.
//!
//! Usage:
//!   cargo run --bin orbit_view -- --time 0 --time 2.5
//!   cargo run --bin orbit_view -- --ascii --frames 200 --hover Venus
//!   cargo run --bin orbit_view -- --svg frame.svg --time 4 --stars 150
//!   cargo run --bin orbit_view -- --mode diagram

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use clap::{ArgAction, Parser};
use cosmoslearn::backdrop::BackdropConfig;
use cosmoslearn::constants::RAD2DEG;
use cosmoslearn::orbit::{elapsed_from_secs, OrbitEvent, OrbitRenderer};
use cosmoslearn::render::{render_ascii, write_svg};
use cosmoslearn::view::{ViewMode, DIAGRAM_TITLE, DIAGRAM_URL};
use cosmoslearn::SOLAR_SYSTEM;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Orbit View Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Renders the inner solar system orbit animation",
    long_about = None
)]
struct Args {
    /// Model to show: "simulation" or "diagram"
    #[arg(short, long, default_value = "simulation")]
    mode: ViewMode,

    /// Elapsed animation time(s) in seconds
    #[arg(short, long = "time", default_value = "0")]
    times: Vec<f64>,

    /// Body to highlight
    #[arg(long)]
    hover: Option<String>,

    /// Animate in the terminal
    #[arg(short, long, action = ArgAction::SetTrue)]
    ascii: bool,

    /// Number of frames to animate
    #[arg(long, default_value_t = 120)]
    frames: usize,

    /// Frames per second of the animation
    #[arg(long, default_value_t = 20.0)]
    fps: f64,

    /// Terminal columns (defaults to the terminal width)
    #[arg(long)]
    cols: Option<usize>,

    /// Terminal rows (defaults to the terminal height)
    #[arg(long)]
    rows: Option<usize>,

    /// Write the frame at the first --time to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Number of background stars in the SVG
    #[arg(long, default_value_t = 120)]
    stars: usize,

    /// Seed of the background stars
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn print_diagram() {
    print_section_header(DIAGRAM_TITLE);
    println!("{}", DIAGRAM_URL);
    println!("{}", ViewMode::Diagram.caption());
}

fn print_positions(renderer: &OrbitRenderer, times: &[f64]) -> Result<()> {
    print_section_header("Body Positions");
    println!(
        "{:<10} {:>8} {:>10} {:>10} {:>10} {:>10}",
        "Body", "t (s)", "phase (°)", "x", "y", "period (s)"
    );

    for &t in times {
        let frame = renderer.frame(elapsed_from_secs(t)?);
        for (body, rendered) in renderer.catalog().iter().zip(&frame.bodies) {
            println!(
                "{:<10} {:>8.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                rendered.label,
                frame.elapsed_s,
                rendered.phase * RAD2DEG,
                rendered.position.x,
                rendered.position.y,
                body.period()
            );
        }
    }

    if let Some(hint) = renderer.hint() {
        println!("\n{}", hint);
    }
    Ok(())
}

fn animate(renderer: &OrbitRenderer, args: &Args) -> Result<()> {
    let (term_cols, term_rows) = term_size::dimensions().unwrap_or((80, 24));
    let cols = args.cols.unwrap_or(term_cols);
    // Leave room for the hint line
    let rows = args.rows.unwrap_or(term_rows.saturating_sub(2));
    let tick = elapsed_from_secs(1.0 / args.fps.max(1.0))?;

    let start = Instant::now();
    let mut stdout = io::stdout().lock();
    for _ in 0..args.frames {
        let picture = render_ascii(&renderer.frame(start.elapsed()), cols, rows);
        // Clear screen and home the cursor
        write!(stdout, "\x1b[2J\x1b[H{}", picture)?;
        stdout.flush()?;
        thread::sleep(tick);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("{} view: {}", args.mode, args.mode.caption());
    if args.mode == ViewMode::Diagram {
        print_diagram();
        return Ok(());
    }

    let mut renderer = OrbitRenderer::new(&SOLAR_SYSTEM);
    renderer.subscribe(|event: &OrbitEvent| log::info!("{:?}", event));

    if let Some(name) = &args.hover {
        let body = SOLAR_SYSTEM.require(name)?;
        renderer.set_hovered(Some(&body.name));
    }

    if let Some(path) = &args.svg {
        let elapsed = elapsed_from_secs(args.times.first().copied().unwrap_or(0.0))?;
        let backdrop = BackdropConfig::new()
            .with_count(args.stars)
            .with_seed(args.seed)
            .generate();
        write_svg(path, &renderer.frame(elapsed), Some(&backdrop))?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    if args.ascii {
        return animate(&renderer, &args);
    }

    print_positions(&renderer, &args.times)
}
