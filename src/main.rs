use canvas::camera::Point;
use canvas::config::{ConfigError, SnapSettings};
use canvas::doc::PlacedObject;
use canvas::fit::{AnchorX, AnchorY, FitAnchor, FitRect, ObjectFit, fit_image};
use canvas::grid::{GridError, snap_grid};
use canvas::handle::Corner;
use canvas::paste::{PasteDirection, PasteMode, SelectionShim, compute_paste_position};
use canvas::snap::{Transformable, correct_scaling};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gridboard", about = "Grid snapping calculator for canvas objects")]
struct Cli {
    /// Grid cell size in canvas units.
    #[arg(long, global = true, env = "GRIDBOARD_GRANULARITY")]
    granularity: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Snap a single coordinate to the grid.
    Snap {
        #[arg(allow_negative_numbers = true)]
        coord: f64,
    },
    /// Correct an object's scale after dragging one of its handles.
    Scale(ScaleArgs),
    /// Place a duplicate next to an object or selection.
    Paste(PasteArgs),
    /// Lay out an image inside a frame.
    Fit(FitArgs),
}

#[derive(Args, Debug)]
struct ScaleArgs {
    #[arg(long)]
    corner: Corner,
    #[arg(long, allow_negative_numbers = true)]
    left: f64,
    #[arg(long, allow_negative_numbers = true)]
    top: f64,
    #[arg(long)]
    width: f64,
    #[arg(long)]
    height: f64,
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    scale_x: f64,
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    scale_y: f64,
    #[arg(long, default_value_t = 0.0)]
    stroke: f64,
}

#[derive(Args, Debug)]
struct PasteArgs {
    /// Defaults to `GRIDBOARD_PASTE_DIRECTION`, then `right`.
    #[arg(long)]
    direction: Option<PasteDirection>,
    #[arg(long, allow_negative_numbers = true)]
    top: f64,
    #[arg(long, allow_negative_numbers = true)]
    left: f64,
    #[arg(long)]
    width: f64,
    #[arg(long)]
    height: f64,
    #[arg(long, default_value_t = 1.0)]
    scale_x: f64,
    #[arg(long, default_value_t = 1.0)]
    scale_y: f64,
    /// Treat the box as a multi-object selection.
    #[arg(long)]
    selection: bool,
    /// Member position relative to the selection center.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    obj_top: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    obj_left: f64,
}

#[derive(Args, Debug)]
struct FitArgs {
    #[arg(long, value_enum, default_value_t = FitMode::Contain)]
    fit: FitMode,
    /// Frame size as `WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_size)]
    container: (f64, f64),
    /// Natural image size as `WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_size)]
    image: (f64, f64),
    #[arg(long, value_enum, default_value_t = HorizontalAnchor::Center)]
    anchor_x: HorizontalAnchor,
    #[arg(long, value_enum, default_value_t = VerticalAnchor::Center)]
    anchor_y: VerticalAnchor,
    /// Shift after anchoring as `DXxDY`.
    #[arg(long, value_parser = parse_size, allow_hyphen_values = true, default_value = "0x0")]
    offset: (f64, f64),
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FitMode {
    Contain,
    Cover,
}

impl From<FitMode> for ObjectFit {
    fn from(mode: FitMode) -> Self {
        match mode {
            FitMode::Contain => Self::Contain,
            FitMode::Cover => Self::Cover,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

impl From<HorizontalAnchor> for AnchorX {
    fn from(anchor: HorizontalAnchor) -> Self {
        match anchor {
            HorizontalAnchor::Left => Self::Left,
            HorizontalAnchor::Center => Self::Center,
            HorizontalAnchor::Right => Self::Right,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

impl From<VerticalAnchor> for AnchorY {
    fn from(anchor: VerticalAnchor) -> Self {
        match anchor {
            VerticalAnchor::Top => Self::Top,
            VerticalAnchor::Center => Self::Center,
            VerticalAnchor::Bottom => Self::Bottom,
        }
    }
}

#[derive(Serialize, Debug)]
struct SnapOutput {
    coord: f64,
    snapped: f64,
}

#[derive(Serialize, Debug)]
struct ScaleOutput {
    left: f64,
    top: f64,
    scale_x: f64,
    scale_y: f64,
    scaled_width: f64,
    scaled_height: f64,
    changed: bool,
}

#[derive(Serialize, Debug)]
struct PasteOutput {
    direction: PasteDirection,
    left: f64,
    top: f64,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = resolve_settings(SnapSettings::from_env()?, cli.granularity)?;
    tracing::debug!(?settings, "settings resolved");

    let json = run(cli.command, &settings)?;
    print_json(&json)
}

fn resolve_settings(base: SnapSettings, granularity: Option<f64>) -> Result<SnapSettings, CliError> {
    let settings = match granularity {
        Some(g) => base.with_granularity(g),
        None => base,
    };
    settings.validate()?;
    Ok(settings)
}

fn run(command: Command, settings: &SnapSettings) -> Result<Value, CliError> {
    let g = settings.grid()?.granularity();
    let value = match command {
        Command::Snap { coord } => serde_json::to_value(SnapOutput { coord, snapped: snap_grid(coord, g) })?,
        Command::Scale(args) => serde_json::to_value(run_scale(&args, settings))?,
        Command::Paste(args) => serde_json::to_value(run_paste(&args, settings))?,
        Command::Fit(args) => serde_json::to_value(run_fit(&args))?,
    };
    Ok(value)
}

fn run_scale(args: &ScaleArgs, settings: &SnapSettings) -> ScaleOutput {
    let mut obj = PlacedObject::rect(args.left, args.top, args.width, args.height);
    obj.scale_x = args.scale_x;
    obj.scale_y = args.scale_y;
    obj.stroke_width = args.stroke;

    let changed = correct_scaling(&mut obj, args.corner, settings);
    ScaleOutput {
        left: obj.left,
        top: obj.top,
        scale_x: obj.scale_x,
        scale_y: obj.scale_y,
        scaled_width: obj.scaled_width(),
        scaled_height: obj.scaled_height(),
        changed,
    }
}

fn run_paste(args: &PasteArgs, settings: &SnapSettings) -> PasteOutput {
    let direction = args.direction.unwrap_or(settings.paste_direction);
    let shim = SelectionShim {
        top: args.top,
        left: args.left,
        width: args.width,
        height: args.height,
        scale_x: args.scale_x,
        scale_y: args.scale_y,
    };
    let mode = if args.selection { PasteMode::Selection } else { PasteMode::Single };
    let origin = Point::new(args.obj_left, args.obj_top);
    let placed = compute_paste_position(direction, &shim, origin, settings.granularity, mode);
    PasteOutput { direction, left: placed.x, top: placed.y }
}

fn run_fit(args: &FitArgs) -> FitRect {
    let (frame_w, frame_h) = args.container;
    let (natural_w, natural_h) = args.image;
    let anchor = FitAnchor { x: args.anchor_x.into(), y: args.anchor_y.into() };
    let (dx, dy) = args.offset;
    fit_image(frame_w, frame_h, natural_w, natural_h, args.fit.into(), anchor, Point::new(dx, dy))
}

fn parse_size(raw: &str) -> Result<(f64, f64), String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{raw}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid size `{part}` in `{raw}`: {e}"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
