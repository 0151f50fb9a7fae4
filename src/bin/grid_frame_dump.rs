//! CLI tool for canvasgrid - renders one frame headlessly and dumps the draw calls
//!
//! Usage:
//!   grid_frame_dump <data.json>                                  # 800x600 at the top
//!   grid_frame_dump <data.json> --scroll-top 760 --height 400    # any scroll position
//!
//! `data.json` holds `{ "columns": [...], "rows": [...], "columnWidths": {...} }`
//! and may carry a `config` object with the same fields as the JS constructor.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::{self, Write};

use canvasgrid::{
    ColumnDef, DrawCommand, FixedViewport, FrameStats, GridConfig, GridRenderer, RecordRow,
    RecordingSurface, RenderOptions, ViewportState,
};
use serde::{Deserialize, Serialize};

const USAGE: &str = "Usage: grid_frame_dump <data.json> [--width W] [--height H] \
                     [--scroll-top N] [--scroll-left N] [--dpr D] [--skip-header]";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridData {
    #[serde(default)]
    config: GridConfig,
    columns: Vec<ColumnDef>,
    rows: Vec<RecordRow>,
    #[serde(default)]
    column_widths: HashMap<String, f64>,
}

#[derive(Serialize)]
struct FrameDump {
    stats: FrameStats,
    commands: Vec<DrawCommand>,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn parse_number(flag: &str, value: Option<&String>) -> f64 {
    match value.map(|v| v.parse::<f64>()) {
        Some(Ok(n)) => n,
        _ => fail(&format!("{flag} expects a number\n{USAGE}")),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        fail(USAGE);
    }

    let input_path = &args[1];
    let mut viewport = ViewportState::default();
    let mut options = RenderOptions::default();

    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--width" => viewport.width = parse_number(flag, rest.next()),
            "--height" => viewport.height = parse_number(flag, rest.next()),
            "--scroll-top" => viewport.scroll_top = parse_number(flag, rest.next()),
            "--scroll-left" => viewport.scroll_left = parse_number(flag, rest.next()),
            "--dpr" => viewport.dpr = parse_number(flag, rest.next()),
            "--skip-header" => options.skip_header = true,
            other => fail(&format!("Unknown argument: {other}\n{USAGE}")),
        }
    }

    // Read input file
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => fail(&format!("Error reading {input_path}: {e}")),
    };

    let data: GridData = match serde_json::from_str(&text) {
        Ok(d) => d,
        Err(e) => fail(&format!("Error parsing {input_path}: {e}")),
    };

    let mut grid: GridRenderer<RecordingSurface, FixedViewport> = GridRenderer::new(
        data.config,
        RecordingSurface::new(1, 1),
        FixedViewport::new(viewport),
    );
    grid.update_data(data.columns, data.rows, data.column_widths);
    if let Err(e) = grid.validate() {
        eprintln!("Warning: {e}");
    }

    grid.resize();
    let stats = grid.render(options);
    let dump = FrameDump {
        stats,
        commands: grid.surface_mut().take_commands(),
    };

    let json = match serde_json::to_string_pretty(&dump) {
        Ok(j) => j,
        Err(e) => fail(&format!("Error serializing JSON: {e}")),
    };
    io::stdout().write_all(json.as_bytes()).unwrap();
    println!();
}
