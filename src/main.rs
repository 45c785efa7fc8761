//! Tile Platformer entry point
//!
//! Runs the game headless. Keys arrive as commands on stdin (`left`, `right`,
//! `jump`, `stop`, `quit`), from a key script, or from the demo autopilot.
//! Audio cues and the HUD go to the log.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tile_platformer::audio::{AudioManager, LogSink};
use tile_platformer::input::{Autopilot, InputScript, InputSource, LiveInput};
use tile_platformer::platform::{FrameClock, spawn_line_reader};
use tile_platformer::sim::{GamePhase, GameState, TickOutcome, tick};
use tile_platformer::ui::{Hud, grid_ascii};
use tile_platformer::{DirLevelStore, Error, Settings, Tuning};

/// Autopilot run length when `--ticks` is not given: one minute of play
const DEFAULT_TICK_LIMIT: u64 = 60 * 60;

#[derive(Parser)]
#[command(name = "tile-platformer")]
#[command(about = "Tile platformer, played headless from the terminal")]
struct Cli {
    /// Settings file (defaults to platformer_settings.json)
    settings: Option<PathBuf>,
    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,
    /// Run ticks back to back instead of at the frame rate
    #[arg(long)]
    unpaced: bool,
    /// Let the game steer (demo mode)
    #[arg(long, conflicts_with = "script")]
    autopilot: bool,
    /// Key script: one `TICKS [left] [right] [jump]` step per line
    #[arg(long)]
    script: Option<PathBuf>,
}

impl Cli {
    fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME))
    }

    /// Demo runs stop on their own; player-driven ones run until quit
    fn tick_limit(&self) -> Option<u64> {
        self.ticks.or(self.autopilot.then_some(DEFAULT_TICK_LIMIT))
    }

    fn input_source(&self) -> Result<Box<dyn InputSource>, Error> {
        if self.autopilot {
            return Ok(Box::new(Autopilot));
        }
        if let Some(path) = &self.script {
            return Ok(Box::new(InputScript::load(path)?));
        }
        log::info!("Commands: left, right, jump, stop, quit");
        let lines = spawn_line_reader(io::BufReader::new(io::stdin()));
        Ok(Box::new(LiveInput::new(lines)))
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let settings = Settings::load(cli.settings_path())?;
    let tuning = match &settings.tuning_file {
        Some(path) => Tuning::load_or_default(path)?,
        None => Tuning::default(),
    };
    let store = DirLevelStore::new(&settings.levels_dir);
    log::info!("Levels from {}", store.root().display());

    let mut state = GameState::load_at(&store, settings.start_level, tuning, settings.seed)?;
    let mut audio = AudioManager::from_settings(LogSink, &settings);
    let mut clock = FrameClock::new(settings.frame_rate);
    let mut source = cli.input_source()?;
    let limit = cli.tick_limit();
    log::debug!("Level {}:\n{}", state.level_id, grid_ascii(&state.grid));
    audio.start_music();

    let mut ticks = 0;
    while limit.is_none_or(|limit| ticks < limit) {
        let Some(input) = source.poll() else {
            log::info!("Quit");
            break;
        };
        let outcome = tick(&mut state, &input);
        audio.play_events(&state.events);
        ticks += 1;

        match outcome {
            TickOutcome::Continue => {}
            TickOutcome::Failed => state.reset_level(),
            TickOutcome::Completed => {
                if state.advance_level(&store)? == GamePhase::AllLevelsCompleted {
                    break;
                }
                let hud = Hud::from_state(&state);
                log::info!("{} | {} | background {}", hud.level, hud.score, hud.background);
            }
            TickOutcome::AllLevelsCompleted => break,
        }

        if !cli.unpaced {
            clock.wait();
        }
    }

    let hud = Hud::from_state(&state);
    log::info!(
        "Stopped after {} ticks on {} with {} ({} late frames)",
        ticks,
        hud.level,
        hud.score,
        clock.late_frames
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Tile Platformer (native) starting...");

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
