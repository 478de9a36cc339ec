// What you SEE:
// • The seed image appears, then starts growing branching black/white pattern.
// • Hold Left Mouse: paint into the canvas with the cursor color.
// • Space pauses/resumes; while paused, 1–9 step that many ticks (0 = ten).
// • B cursor color, C clear to white, R random black points, T stamp text,
//   X text colors, F font, S save PNG. [ ] pattern scale, - = brush size,
//   Up/Down canvas resolution. ESC quits.

use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

use reaction_diffusion::draw::{Drawer, DISPLAY_SIZE};
use reaction_diffusion::input::InputQueue;
use reaction_diffusion::params::{ParamOverrides, Resolution};
use reaction_diffusion::seed::SeedImage;
use reaction_diffusion::settings::{self, Settings};
use reaction_diffusion::status::{LogStatus, Status};
use reaction_diffusion::text::TextRasterizer;
use reaction_diffusion::{export, Effect, Simulation};

#[derive(Debug, Parser)]
#[command(name = "reaction-diffusion", about = "Blur + unsharp feedback pattern generator")]
struct Cli {
    /// Image the canvas starts from
    #[arg(long, value_name = "FILE", default_value = "assets/NoiseMono_2.png")]
    seed: PathBuf,

    /// Canvas resolution (100-600, step 100); stored for next launch
    #[arg(short, long, value_name = "PX")]
    resolution: Option<u32>,

    // Filter, brush, random point and text starting values.
    #[command(flatten)]
    params: ParamOverrides,

    /// Where exported PNGs go
    #[arg(long, value_name = "DIR", default_value = ".")]
    export_dir: PathBuf,

    /// Settings file (defaults to the platform data dir)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Fixed seed for random points
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("reaction_diffusion={level}").parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

fn persist(path: Option<&PathBuf>, resolution: Resolution) {
    let Some(path) = path else { return };
    if let Err(e) = settings::save(path, &Settings { resolution: resolution.px() }) {
        warn!(error = %e, "could not store resolution");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    /* --- Resolution: CLI override, else what we stored last time --- */
    let settings_path = cli.settings.clone().or_else(settings::default_path);
    let stored = settings_path.as_deref().map(settings::load).unwrap_or_default();
    let resolution = match cli.resolution {
        Some(px) => {
            let r = Resolution::or_default(px);
            persist(settings_path.as_ref(), r);
            r
        }
        None => stored.resolution(),
    };

    /* --- Startup-fatal resources: seed image, then the window --- */
    let seed = SeedImage::open(&cli.seed)
        .with_context(|| format!("loading seed image {}", cli.seed.display()))?;
    let mut drawer = Drawer::new(DISPLAY_SIZE).context("opening window")?;

    let rng = match cli.rng_seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let mut sim = Simulation::new(seed, resolution, cli.params.clone(), TextRasterizer::system(), rng);
    info!(resolution = resolution.px(), "simulation started");

    let (tx, rx) = mpsc::channel::<Status>();
    sim.add_observer(Box::new(LogStatus));
    sim.add_observer(Box::new(tx));
    drawer.show_status(&sim.status());

    let mut queue = InputQueue::default();

    /* ------------------------------ Main loop ------------------------------ */
    'running: while drawer.is_open() && !drawer.esc_down() {
        /* 1) Inputs -> queue -> commands */
        drawer.poll(sim.frame().width, sim.frame().height, &mut queue);
        for effect in sim.process(&mut queue) {
            match effect {
                Effect::Quit => break 'running,
                Effect::ExportFrame => {
                    if let Err(e) = export::export_frame(sim.frame(), &cli.export_dir) {
                        warn!(error = %e, "export failed");
                    }
                }
                Effect::ResolutionChanged(r) => persist(settings_path.as_ref(), r),
            }
        }

        /* 2) One feedback tick (pipeline only while Running) + overlay */
        sim.tick();

        /* 3) Status changes -> title bar */
        for status in rx.try_iter() {
            drawer.show_status(&status);
        }

        /* 4) Present */
        drawer.present(sim.frame())?;
    }

    Ok(())
}
