// src/main.rs
use clap::Parser;
use nannou::prelude::*;
use std::error::Error;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, error, info, warn};

use hrmvis::{
    config::Config,
    render::{
        DrawingSurface, ImageSurface, RecordingSurface, RenderParams, Speed, StrokeRenderer,
    },
    services::{encode_path, encode_text, Paths, ProgramFile},
    views::CanvasSurface,
};

#[derive(Parser, Debug)]
#[command(
    name = "hrmvis",
    version,
    about = "Replays the drawings stored in program comments and labels"
)]
struct Args {
    #[arg(
        long,
        value_parser = clap::value_parser!(u8).range(0..=10),
        help = "Drawing speed 1-10, or 0 for no added delay. Defaults to the config value."
    )]
    speed: Option<u8>,

    #[arg(long, help = "Config file to use instead of config.toml")]
    config: Option<PathBuf>,

    #[arg(
        long,
        help = "Write each drawing as a PNG into this directory instead of opening a window"
    )]
    png: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with = "png",
        help = "Print the drawing commands of each drawing instead of opening a window"
    )]
    dump: bool,

    #[arg(long, help = "Print the comment encoding of this text and exit")]
    encode_text: Option<String>,

    #[arg(long, help = "Enable debug logging")]
    debug: bool,

    #[arg(
        required_unless_present = "encode_text",
        help = "Program file or exported program"
    )]
    program: Option<PathBuf>,
}

struct Settings {
    config: Config,
    speed: Speed,
    params: RenderParams,
}

impl Settings {
    fn from_args(args: &Args) -> Result<Self, Box<dyn Error>> {
        let config = match &args.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load().unwrap_or_else(|e| {
                warn!("No config loaded ({}), using defaults", e);
                Config::default()
            }),
        };
        let speed = match args.speed {
            Some(value) => Speed::new(value)?,
            None => config.default_speed()?,
        };
        let params = RenderParams::from(&config.style);
        Ok(Self {
            config,
            speed,
            params,
        })
    }

    fn renderer<S: DrawingSurface>(&self, surface: S) -> StrokeRenderer<S> {
        StrokeRenderer::new(surface, self.speed).with_dot_size(self.params.dot_size)
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.debug);

    if let Some(text) = &args.encode_text {
        match encode_text(text).and_then(|path| encode_path(&path)) {
            Ok(encoded) => println!("{}", encoded),
            Err(e) => fail(e),
        }
        return;
    }

    if args.png.is_some() || args.dump {
        if let Err(e) = run_headless(&args) {
            fail(e);
        }
        return;
    }

    nannou::app(model).update(update).run();
}

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_max_level(level)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }
}

fn fail(message: impl Display) -> ! {
    error!("{}", message);
    process::exit(1);
}

fn program_path(args: &Args) -> Result<&Path, Box<dyn Error>> {
    args.program
        .as_deref()
        .ok_or_else(|| "no program file given".into())
}

// ******************************* Headless modes *******************************

fn run_headless(args: &Args) -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_args(args)?;
    let program_path = program_path(args)?;
    let file = ProgramFile::load(program_path)
        .map_err(|e| format!("{}: {}", program_path.display(), e))?;

    let drawn = match &args.png {
        Some(dir) => write_images(&file, program_path, dir, &settings)?,
        None => dump_commands(&file, &settings)?,
    };
    if drawn == 0 {
        warn!("No drawings found in {}", program_path.display());
    }
    Ok(())
}

fn write_images(
    file: &ProgramFile,
    program_path: &Path,
    dir: &Path,
    settings: &Settings,
) -> Result<usize, Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    let stem = program_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("program");

    let output = &settings.config.output;
    let surface = ImageSurface::new(
        output.image_width,
        output.image_height,
        settings.params.clone(),
    );
    let mut renderer = settings.renderer(surface);

    let mut drawn = 0;
    for unit in file.units() {
        let path = unit
            .decode()
            .map_err(|e| format!("{}: {}", unit.kind, e))?;
        if path.is_empty() {
            debug!("Skipping empty {}", unit.kind);
            continue;
        }

        renderer.render(&path);
        let out = dir.join(format!("{}-{}.png", stem, unit.kind));
        renderer.surface().save(&out)?;
        info!("Wrote {} ({} points)", out.display(), path.len());
        renderer.clear();
        drawn += 1;
    }
    renderer.close();
    Ok(drawn)
}

fn dump_commands(file: &ProgramFile, settings: &Settings) -> Result<usize, Box<dyn Error>> {
    let mut renderer = settings.renderer(RecordingSurface::new());

    let mut drawn = 0;
    for unit in file.units() {
        let path = unit
            .decode()
            .map_err(|e| format!("{}: {}", unit.kind, e))?;
        println!(
            "# {} ({} points, {} strokes)",
            unit.kind,
            path.len(),
            path.strokes().len()
        );

        renderer.render(&path);
        renderer.clear();
        for command in renderer.surface_mut().take_commands() {
            println!("{}", command);
        }
        if !path.is_empty() {
            drawn += 1;
        }
    }
    renderer.close();
    Ok(drawn)
}

// ******************************* Viewer *******************************

struct Model {
    renderer: StrokeRenderer<CanvasSurface>,
    paths: Paths<String>,
}

fn model(app: &App) -> Model {
    let args = Args::parse();
    let settings = Settings::from_args(&args).unwrap_or_else(|e| fail(e));
    let program_path = program_path(&args).unwrap_or_else(|e| fail(e));
    let file = ProgramFile::load(program_path)
        .unwrap_or_else(|e| fail(format!("{}: {}", program_path.display(), e)));

    app.new_window()
        .title(format!("hrmvis - {}", program_path.display()))
        .size(settings.config.window.width, settings.config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .expect("Failed to create window");

    let renderer = settings.renderer(CanvasSurface::new(settings.params.clone()));
    let mut model = Model {
        renderer,
        paths: file.into_paths(),
    };
    show_next(app, &mut model);
    model
}

/// Clears the canvas and renders the next drawing that has any points.
/// Quits once the file is exhausted; a decode error aborts the file.
fn show_next(app: &App, model: &mut Model) {
    model.renderer.clear();

    while let Some(path) = model.paths.next() {
        let path = path.unwrap_or_else(|e| fail(e));
        if path.is_empty() {
            debug!("Skipping empty drawing");
            continue;
        }

        model.renderer.render(&path);
        if let Some(kind) = model.paths.current_kind() {
            info!(
                "Showing {} ({} points), press Enter to continue",
                kind,
                path.len()
            );
        }
        return;
    }

    info!("No more drawings");
    model.renderer.surface_mut().close();
    app.quit();
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        // finish the current drawing, or move on once it is complete
        Key::Return | Key::Space => {
            let canvas = model.renderer.surface_mut();
            if !canvas.is_complete() {
                canvas.reveal_all();
            } else {
                show_next(app, model);
            }
        }
        Key::Q | Key::Escape => {
            model.renderer.surface_mut().close();
            app.quit();
        }
        _ => (),
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    model.renderer.surface_mut().advance(update.since_last);
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let canvas = model.renderer.surface();

    draw.background().color(canvas.background());
    canvas.draw(&draw, app.window_rect());

    draw.to_frame(app, &frame).unwrap();
}
