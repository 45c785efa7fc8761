//! Level editor entry point
//!
//! Line-oriented frontend over the editor state. Commands:
//!
//! ```text
//! click ROW COL     cycle a cell forward (press + release)
//! rclick ROW COL    cycle a cell backward
//! press X Y         primary press at a pixel position, held until `release`
//! release
//! up | down         change the target level id
//! save | load
//! print             show the grid
//! quit
//! ```
//!
//! Usage: `level-editor [SETTINGS_FILE]`

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::IVec2;
use tile_platformer::consts::TILE_SIZE;
use tile_platformer::editor::{EditorOutcome, PointerButton};
use tile_platformer::ui::grid_ascii;
use tile_platformer::{DirLevelStore, Editor, EditorAction, Error, Settings};

#[derive(Parser)]
#[command(name = "level-editor")]
#[command(about = "Edit platformer levels with line commands on stdin")]
struct Cli {
    /// Settings file (defaults to platformer_settings.json)
    settings: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Actions applied in order
    Actions(Vec<EditorAction>),
    Print,
    Quit,
}

/// Pixel at the middle of a cell
fn cell_center(row: i32, col: i32) -> IVec2 {
    IVec2::new(col * TILE_SIZE + TILE_SIZE / 2, row * TILE_SIZE + TILE_SIZE / 2)
}

fn parse_pair(words: &[&str]) -> Option<(i32, i32)> {
    match words {
        [a, b] => Some((a.parse().ok()?, b.parse().ok()?)),
        _ => None,
    }
}

fn parse(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, rest)) = words.split_first() else {
        return Ok(Command::Actions(Vec::new()));
    };

    let click = |button: PointerButton| -> Result<Command, String> {
        let (row, col) = parse_pair(rest).ok_or(format!("usage: {name} ROW COL"))?;
        Ok(Command::Actions(vec![
            EditorAction::Press {
                pos: cell_center(row, col),
                button,
            },
            EditorAction::Release,
        ]))
    };
    let single = |action| -> Result<Command, String> { Ok(Command::Actions(vec![action])) };

    match name {
        "click" => click(PointerButton::Primary),
        "rclick" => click(PointerButton::Secondary),
        "press" => {
            let (x, y) = parse_pair(rest).ok_or("usage: press X Y")?;
            single(EditorAction::Press {
                pos: IVec2::new(x, y),
                button: PointerButton::Primary,
            })
        }
        "release" => single(EditorAction::Release),
        "up" => single(EditorAction::LevelUp),
        "down" => single(EditorAction::LevelDown),
        "save" => single(EditorAction::Save),
        "load" => single(EditorAction::Load),
        "print" => Ok(Command::Print),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {other}")),
    }
}

fn describe(outcome: EditorOutcome) -> Option<String> {
    match outcome {
        EditorOutcome::Unchanged => None,
        EditorOutcome::Edited { row, col, code } => Some(format!("({row}, {col}) = {code:?}")),
        EditorOutcome::LevelSelected(id) => Some(format!("level {id}")),
        EditorOutcome::Saved(id) => Some(format!("saved level {id}")),
        EditorOutcome::Loaded(id) => Some(format!("loaded level {id}")),
    }
}

/// Status line plus the grid, as printed by `print`
fn view(editor: &Editor) -> String {
    let dirty = if editor.dirty { " *" } else { "" };
    format!("Level {}{}\n{}", editor.level_id, dirty, grid_ascii(&editor.grid))
}

fn run(cli: &Cli) -> Result<(), Error> {
    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));
    let settings = Settings::load(&settings_path)?;
    let mut store = DirLevelStore::new(&settings.levels_dir);
    let mut editor = Editor::new();
    log::info!("Editing levels in {}", store.root().display());

    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        match parse(&line) {
            Ok(Command::Actions(actions)) => {
                for action in actions {
                    // A bad level file is reported, not fatal
                    match editor.apply(action, &mut store) {
                        Ok(outcome) => {
                            if let Some(msg) = describe(outcome) {
                                println!("{msg}");
                            }
                        }
                        Err(err) => log::error!("{err}"),
                    }
                }
            }
            Ok(Command::Print) => print!("{}", view(&editor)),
            Ok(Command::Quit) => break,
            Err(msg) => eprintln!("{msg}"),
        }
    }

    if editor.dirty {
        log::warn!("Unsaved changes to level {} discarded", editor.level_id);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_is_press_then_release() {
        let cmd = parse("click 3 4").unwrap();
        assert_eq!(
            cmd,
            Command::Actions(vec![
                EditorAction::Press {
                    pos: IVec2::new(4 * 32 + 16, 3 * 32 + 16),
                    button: PointerButton::Primary,
                },
                EditorAction::Release,
            ])
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("up").unwrap(), Command::Actions(vec![EditorAction::LevelUp]));
        assert_eq!(parse("  save ").unwrap(), Command::Actions(vec![EditorAction::Save]));
        assert_eq!(parse("print").unwrap(), Command::Print);
        assert_eq!(parse("quit").unwrap(), Command::Quit);
        assert_eq!(parse("").unwrap(), Command::Actions(Vec::new()));
    }

    #[test]
    fn test_settings_path_is_optional() {
        assert!(Cli::try_parse_from(["level-editor"]).unwrap().settings.is_none());
        let cli = Cli::try_parse_from(["level-editor", "alt.json"]).unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("alt.json")));
        assert!(Cli::try_parse_from(["level-editor", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_view_marks_unsaved_edits() {
        let mut editor = Editor::new();
        let clean = view(&editor);
        assert!(clean.starts_with(&format!("Level {}\n", editor.level_id)));
        assert!(clean.ends_with(&grid_ascii(&editor.grid)));

        editor.dirty = true;
        assert!(view(&editor).starts_with(&format!("Level {} *\n", editor.level_id)));
    }

    #[test]
    fn test_bad_input_rejected() {
        assert!(parse("click 3").is_err());
        assert!(parse("rclick a b").is_err());
        assert!(parse("paint 1 1").is_err());
    }
}
