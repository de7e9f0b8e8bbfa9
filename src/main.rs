//! Wrist Flap - native headless runner
//!
//! Plays attract-mode runs on the autopilot with the real store and logs the
//! results. `RUST_LOG` controls verbosity.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use wrist_flap::consts::SIM_DT;
use wrist_flap::persistence::{JsonFileStore, MemoryStore, ScoreStore};
use wrist_flap::platform::LogPresenter;
use wrist_flap::sim::GamePhase;
use wrist_flap::{Error, Game, Settings, Tuning};

/// Optional tuning JSON
const TUNING_ENV: &str = "WRIST_FLAP_TUNING";
/// Optional best score file
const SAVE_ENV: &str = "WRIST_FLAP_SAVE";
/// Optional settings JSON
const SETTINGS_ENV: &str = "WRIST_FLAP_SETTINGS";

/// Runs to play before exiting
const DEMO_RUNS: u32 = 3;
/// Simulated seconds allowed per run
const RUN_TIME_LIMIT: f32 = 120.0;

fn open_store() -> Box<dyn ScoreStore> {
    if let Some(path) = env::var_os(SAVE_ENV) {
        return Box::new(JsonFileStore::new(PathBuf::from(path)));
    }
    match JsonFileStore::in_config_dir() {
        Ok(store) => {
            log::info!("Best score file: {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::warn!("No persistent store ({}), best score kept in memory", e);
            Box::new(MemoryStore::default())
        }
    }
}

fn run() -> Result<(), Error> {
    let tuning = match env::var_os(TUNING_ENV) {
        Some(path) => Tuning::load(PathBuf::from(path))?,
        None => Tuning::default(),
    };
    let settings = env::var_os(SETTINGS_ENV)
        .map(|path| Settings::load(PathBuf::from(path)))
        .unwrap_or_default();

    let mut presenter = LogPresenter::new(settings);
    let mut game = Game::new(tuning, open_store());
    game.set_autopilot(true);

    let max_frames = (RUN_TIME_LIMIT / SIM_DT) as u32;
    for run in 1..=DEMO_RUNS {
        let mut started = false;
        let mut frames = 0;
        while frames < max_frames {
            game.update(SIM_DT);
            frames += 1;

            let phase = game.state().phase;
            started |= phase == GamePhase::Playing;
            game.present(&mut presenter);

            if started && phase == GamePhase::Failed {
                break;
            }
        }

        let hud = game.hud();
        log::info!(
            "Run {}: score {} (best {}) after {:.1}s",
            run,
            hud.score,
            hud.best_score,
            frames as f32 * SIM_DT
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Wrist Flap (native) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
