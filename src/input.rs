//! Per-tick input sources for the game binary
//!
//! A source yields one `TickInput` snapshot per tick, or `None` once the
//! player quits. Three sources exist: the demo autopilot, a key-state script
//! and live commands arriving as text lines.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::mpsc::{Receiver, TryRecvError};

use thiserror::Error;

use crate::sim::TickInput;

/// Errors raised while reading an input script
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input script line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Something that produces the input for each tick
pub trait InputSource {
    /// Input for the next tick; `None` ends the session
    fn poll(&mut self) -> Option<TickInput>;
}

/// Demo mode: the simulation steers the actor
#[derive(Debug, Default)]
pub struct Autopilot;

impl InputSource for Autopilot {
    fn poll(&mut self) -> Option<TickInput> {
        Some(TickInput {
            autopilot: true,
            ..Default::default()
        })
    }
}

/// One live command from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Hold left (releases right)
    Left,
    /// Hold right (releases left)
    Right,
    /// Press jump for a single tick
    Jump,
    /// Release both directions
    Stop,
    Quit,
}

impl FromStr for KeyCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "a" => Ok(Self::Left),
            "right" | "d" => Ok(Self::Right),
            "jump" | "w" | "space" => Ok(Self::Jump),
            "stop" | "s" => Ok(Self::Stop),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Keys held between live commands
///
/// Direction keys stay held until changed; jump is a one-tick press so the
/// actor sees a fresh press edge for every `jump` command.
#[derive(Debug)]
pub struct LiveInput {
    held: TickInput,
    lines: Receiver<String>,
    quit: bool,
}

impl LiveInput {
    pub fn new(lines: Receiver<String>) -> Self {
        Self {
            held: TickInput::default(),
            lines,
            quit: false,
        }
    }

    pub fn apply(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Left => {
                self.held.left = true;
                self.held.right = false;
            }
            KeyCommand::Right => {
                self.held.right = true;
                self.held.left = false;
            }
            KeyCommand::Jump => self.held.jump = true,
            KeyCommand::Stop => {
                self.held.left = false;
                self.held.right = false;
            }
            KeyCommand::Quit => self.quit = true,
        }
    }

    fn drain(&mut self) {
        loop {
            match self.lines.try_recv() {
                Ok(line) => {
                    for word in line.split_whitespace() {
                        match word.parse() {
                            Ok(command) => self.apply(command),
                            Err(msg) => log::warn!("{msg}"),
                        }
                    }
                }
                Err(TryRecvError::Empty) => break,
                // Input closed: nothing more will ever arrive
                Err(TryRecvError::Disconnected) => {
                    self.quit = true;
                    break;
                }
            }
        }
    }
}

impl InputSource for LiveInput {
    fn poll(&mut self) -> Option<TickInput> {
        self.drain();
        if self.quit {
            return None;
        }
        let input = self.held.clone();
        self.held.jump = false;
        Some(input)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Hold { ticks: u32, input: TickInput },
    Quit,
}

/// Scripted key states
///
/// One step per line: `TICKS [left] [right] [jump]` holds those keys for
/// `TICKS` ticks, `quit` ends the session. Blank lines and `#` comments are
/// skipped. The session also ends when the script runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputScript {
    steps: VecDeque<Step>,
}

impl FromStr for InputScript {
    type Err = InputError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut steps = VecDeque::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let err = |message: String| InputError::Parse {
                line: index + 1,
                message,
            };

            let mut words = line.split_whitespace();
            let first = words.next().unwrap_or_default();
            if first == "quit" {
                steps.push_back(Step::Quit);
                continue;
            }
            let ticks = first
                .parse()
                .map_err(|_| err(format!("expected a tick count, found {first:?}")))?;

            let mut input = TickInput::default();
            for key in words {
                match key {
                    "left" => input.left = true,
                    "right" => input.right = true,
                    "jump" => input.jump = true,
                    other => return Err(err(format!("unknown key {other:?}"))),
                }
            }
            steps.push_back(Step::Hold { ticks, input });
        }
        Ok(Self { steps })
    }
}

impl InputScript {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let script = text.parse()?;
        log::info!("Loaded input script from {}", path.display());
        Ok(script)
    }
}

impl InputSource for InputScript {
    fn poll(&mut self) -> Option<TickInput> {
        loop {
            match self.steps.front_mut()? {
                Step::Quit => return None,
                Step::Hold { ticks: 0, .. } => {
                    self.steps.pop_front();
                }
                Step::Hold { ticks, input } => {
                    *ticks -= 1;
                    return Some(input.clone());
                }
            }
        }
    }
}
