//! CLI tool for circlegrid - packs circles and outputs geometry JSON
//!
//! Usage:
//!   circlegrid_cli [count] [-w W] [-h H]          # Geometry JSON to stdout
//!   circlegrid_cli 25 --svg grid.svg              # Also write an SVG drawing
//!   circlegrid_cli --state state.json             # Reuse the last count
//!
//! Colors: --fill, --stroke, --background (hex, rgb() or basic names).
//! Logging: set RUST_LOG=debug for packing details.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use circlegrid::config::{parse_float_prefix, SurfaceConfig, MAX_COUNT};
use circlegrid::render::{parse_color, RenderParams, Renderer, SvgRenderer};
use circlegrid::store::{parse_count, CountStore, FileStore, MemoryStore};
use circlegrid::viewer::AppState;
use serde::Serialize;

const USAGE: &str = "Usage: circlegrid_cli [count] [-w width] [-h height] [--svg out.svg] \
                     [--state state.json] [--fill color] [--stroke color] [--background color]";

#[derive(Default)]
struct Options {
    count: Option<u32>,
    width: Option<f64>,
    height: Option<f64>,
    svg_path: Option<String>,
    state_path: Option<String>,
    fill: Option<String>,
    stroke: Option<String>,
    background: Option<String>,
}

#[derive(Serialize)]
struct Output<'a> {
    geometry: &'a circlegrid::GridGeometry,
    labels: circlegrid::labels::Labels,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{flag} needs a value"))
        };
        match arg.as_str() {
            "-w" | "--width" => {
                let v = value(arg)?;
                options.width =
                    Some(parse_float_prefix(&v).ok_or_else(|| format!("invalid width: {v}"))?);
            }
            "-h" | "--height" => {
                let v = value(arg)?;
                options.height =
                    Some(parse_float_prefix(&v).ok_or_else(|| format!("invalid height: {v}"))?);
            }
            "--svg" => options.svg_path = Some(value(arg)?),
            "--state" => options.state_path = Some(value(arg)?),
            "--fill" => options.fill = Some(value(arg)?),
            "--stroke" => options.stroke = Some(value(arg)?),
            "--background" => options.background = Some(value(arg)?),
            "--help" => return Err(USAGE.to_string()),
            other if options.count.is_none() && !other.starts_with('-') => {
                let count = parse_count(other)
                    .ok_or_else(|| format!("invalid count: {other} (expected 0..={MAX_COUNT})"))?;
                options.count = Some(count);
            }
            other => return Err(format!("unexpected argument: {other}\n{USAGE}")),
        }
    }

    Ok(options)
}

fn color_option(value: Option<&String>, what: &str) -> Option<String> {
    let value = value?;
    match parse_color(value) {
        Some(color) => Some(color),
        None => {
            eprintln!("Error: invalid {what} color: {value}");
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut store: Box<dyn CountStore> = match &options.state_path {
        Some(path) => Box::new(FileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };

    // Startup reads the stored count; an explicit count is applied afterwards
    // so that it gets persisted.
    let surface = SurfaceConfig::from_params(options.width, options.height, None);
    let mut state = match AppState::startup(surface, store.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(count) = options.count {
        if let Err(e) = state.set_count(count, store.as_mut()) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    if let Some(fill) = color_option(options.fill.as_ref(), "fill") {
        state.style.circle_fill = fill;
    }
    if let Some(stroke) = color_option(options.stroke.as_ref(), "stroke") {
        state.style.square_stroke = stroke;
    }
    state.style.background = color_option(options.background.as_ref(), "background");

    // Serialize to JSON
    let output = Output {
        geometry: &state.geometry,
        labels: state.labels(),
    };
    let json = match serde_json::to_string_pretty(&output) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };
    io::stdout().write_all(json.as_bytes()).unwrap();
    println!();

    if let Some(path) = &options.svg_path {
        let (width, height) = state.surface.pixel_size();
        let mut renderer = Renderer::Svg(SvgRenderer::new(width, height));
        let params = RenderParams {
            geometry: &state.geometry,
            style: &state.style,
        };
        if let Err(e) = renderer.init().and_then(|()| renderer.render(&params)) {
            eprintln!("Error rendering SVG: {}", e);
            std::process::exit(1);
        }
        let svg = renderer.svg_document().unwrap_or_default();
        if let Err(e) = fs::write(path, svg) {
            eprintln!("Error writing {}: {}", path, e);
            std::process::exit(1);
        }
        eprintln!("Written: {}", path);
    }
}
