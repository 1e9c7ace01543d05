mod command;
mod loader;
mod render;
mod session;
mod stats;

use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{ArgAction, Parser};
use gol_config::{load_config, Config, OutputFormat};
use gol_transport::{create_sender, create_serializer};
use log::{error, info, warn};

use crate::session::Session;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "gol.toml";

#[derive(Parser, Debug)]
#[command(
    name = "gol",
    author,
    version,
    about = "Conway's game of life on a torus",
    long_about = None
)]
struct Args {
    /// Universe file to load
    input: Option<PathBuf>,

    /// Run this many generations offline, write the result and exit
    #[arg(short, long)]
    iterations: Option<u64>,

    /// Where offline runs write the result (standard output when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a TOML or JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for picking a default universe
    #[arg(long)]
    seed: Option<u64>,

    /// Output format for offline runs
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Do not render generations to the terminal
    #[arg(long)]
    no_display: bool,

    /// Pause between rendered generations, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn is_offline(&self) -> bool {
        self.iterations.is_some() || self.output.is_some()
    }

    /// Command line values take precedence over the config file.
    fn apply_to(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.universe.input = Some(input.clone());
        }
        if let Some(seed) = self.seed {
            config.universe.seed = Some(seed);
            config.universe.default_pattern = None;
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.no_display {
            config.display.enabled = false;
        }
        if let Some(delay) = self.delay_ms {
            config.display.frame_delay_ms = delay;
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn resolve_config(args: &Args) -> Config {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(DEFAULT_CONFIG)).filter(|path| path.is_file()),
    };
    let mut config = match path {
        Some(path) => match load_config(&path) {
            Ok(config) => {
                info!("Using configuration from {}", path.display());
                config
            }
            Err(e) => {
                error!("Failed to load config {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };
    args.apply_to(&mut config);
    config
}

fn install_interrupt_handler() -> Arc<AtomicBool> {
    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupt);
    // The first Ctrl+C stops a running tick; a second one before it is
    // observed ends the process.
    let installed = ctrlc::set_handler(move || {
        if flag.swap(true, Ordering::SeqCst) {
            process::exit(130);
        }
    });
    if let Err(e) = installed {
        warn!("Could not install Ctrl+C handler: {}", e);
    }
    interrupt
}

fn run_offline(mut session: Session, iterations: u64, config: &Config) {
    let output_path: Option<&Path> = config.output.path.as_deref();
    let mut out = io::stdout();
    if let Err(e) = session.run_generations(iterations, &mut out) {
        warn!("Failed to render generations: {}", e);
    }
    session.timer().report();

    let serializer = create_serializer(config.output.format);
    let mut sender = create_sender(output_path);
    match session.dump(serializer.as_ref(), sender.as_mut()) {
        Ok(()) => {
            if output_path.is_some() {
                println!("Saved in {}", sender.destination());
            }
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = resolve_config(&args);
    if args.is_offline() && config.output.path.is_none() {
        // Frames would interleave with the result on standard output.
        config.display.enabled = false;
    }

    let mut rng = loader::seeded_rng(config.universe.seed);
    let engine = loader::load_engine(&config.universe, &mut rng);
    let session = Session::new(engine, config.display.clone(), install_interrupt_handler());

    if args.is_offline() {
        run_offline(session, args.iterations.unwrap_or(0), &config);
        return;
    }

    let mut session = session;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(e) = session.run_interactive(stdin.lock(), &mut stdout) {
        error!("Terminal I/O failed: {}", e);
        process::exit(1);
    }
    session.timer().report();
}
