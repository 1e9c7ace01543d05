//! Chooses the starting universe: the input file, then a file from the
//! defaults directory, then a built-in pattern.

use std::path::Path;

use gol_config::UniverseSettings;
use gol_core::{presets, DefaultSelector, Fallback, SimulationEngine};
use gol_transport::{pick_default_universe, read_universe_file, DefaultUniverse};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FALLBACK_NOTICE: &str = "One of the default universes will be loaded";

pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn try_text(text: &str, origin: &Path) -> Option<SimulationEngine> {
    match SimulationEngine::from_text(text) {
        Ok((engine, recoveries)) => {
            for recovery in recoveries {
                warn!("{}: {}", origin.display(), recovery);
            }
            Some(engine)
        }
        Err(e) => {
            warn!("{}: {}. {}", origin.display(), e, FALLBACK_NOTICE);
            None
        }
    }
}

fn default_selector<R: Rng>(settings: &UniverseSettings, rng: &mut R) -> DefaultSelector {
    match &settings.default_pattern {
        Some(name) => DefaultSelector::Named(name.clone()),
        None => DefaultSelector::Index(rng.gen_range(0..presets::count())),
    }
}

fn pick_from_dir<R: Rng>(dir: &Path, rng: &mut R) -> Option<DefaultUniverse> {
    match pick_default_universe(dir, rng) {
        Ok(Some(picked)) => Some(picked),
        Ok(None) => {
            warn!("No universes found in {}", dir.display());
            None
        }
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

/// Always yields an engine; every failure along the way is logged at warn
/// level before trying the next source.
pub fn load_engine<R: Rng>(settings: &UniverseSettings, rng: &mut R) -> SimulationEngine {
    if let Some(input) = &settings.input {
        match read_universe_file(input) {
            Ok(text) => {
                if let Some(engine) = try_text(&text, input) {
                    info!("Loaded universe {:?} from {}", engine.name(), input.display());
                    return engine;
                }
            }
            Err(e) => warn!("{}. {}", e, FALLBACK_NOTICE),
        }
    } else {
        warn!("There's no input file. {}", FALLBACK_NOTICE);
    }

    let picked = match &settings.default_universes_dir {
        Some(dir) => pick_from_dir(dir, rng),
        None => None,
    };
    let selector = default_selector(settings, rng);
    let outcome =
        SimulationEngine::load_or_default(picked.as_ref().map(|p| p.text.as_str()), &selector);

    match (&picked, &outcome.fallback) {
        (Some(picked), None) => {
            for recovery in &outcome.recoveries {
                warn!("{}: {}", picked.path.display(), recovery);
            }
            info!("Loaded default universe {}", picked.path.display());
        }
        (Some(picked), Some(Fallback::Rejected(e))) => warn!(
            "{}: {}. Using built-in universe {:?}",
            picked.path.display(),
            e,
            outcome.engine.name()
        ),
        _ => info!("Using built-in universe {:?}", outcome.engine.name()),
    }
    outcome.engine
}
