//! `lens show` and `lens browse`.
//!
//! `show` renders a single frame for a hash. `browse` keeps the session
//! open and reads navigation commands line by line, the way a user would
//! click through the page:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `lens <name>` | click a lens |
//! | `open <id>` | click a standard |
//! | `close` | dismiss the detail panel |
//! | `back` / `forward` | browser navigation |
//! | `goto <hash>` | open a deep link |
//! | `where` | print the current hash |
//! | `quit` | end the session |

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::config::Config;
use crate::ingest::open_view;
use crate::render::{JsonRenderer, Renderer, TextRenderer};
use crate::view::StandardView;

/// One parsed browse command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lens(String),
    Open(u32),
    Close,
    Back,
    Forward,
    Goto(String),
    Where,
    Help,
    Quit,
}

const HELP: &str = "commands: lens <name> | open <id> | close | back | forward | goto <hash> | where | quit";

/// Parse one input line. `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((v, r)) => (v, r.trim()),
        None => (line, ""),
    };
    let cmd = match (verb, rest) {
        ("lens", name) if !name.is_empty() => Command::Lens(name.to_string()),
        ("open", id) => Command::Open(
            id.parse()
                .map_err(|_| format!("invalid standard id: '{}'", id))?,
        ),
        ("close", "") => Command::Close,
        ("back", "") => Command::Back,
        ("forward", "") => Command::Forward,
        ("goto", hash) => Command::Goto(hash.to_string()),
        ("where", "") => Command::Where,
        ("help" | "?", "") => Command::Help,
        ("quit" | "exit", "") => Command::Quit,
        _ => return Err(format!("unrecognized command: '{}'", line)),
    };
    Ok(Some(cmd))
}

/// Apply one command. Returns `false` when the session should end.
pub fn apply_command<R: Renderer, W: Write>(
    view: &mut StandardView<R>,
    cmd: Command,
    status: &mut W,
) -> Result<bool> {
    match cmd {
        Command::Lens(name) => {
            if !view.on_lens(&name)? {
                writeln!(status, "no lens named '{}'", name)?;
            }
        }
        Command::Open(id) => {
            if !view.on_show_detail(id)? {
                writeln!(status, "no standard with id {}", id)?;
            }
        }
        Command::Close => {
            if view.is_detail_open() {
                view.on_hide_detail()?;
            } else {
                writeln!(status, "no detail open")?;
            }
        }
        Command::Back => match view.history_mut().back() {
            Some(event) => view.pop_history(event)?,
            None => writeln!(status, "nothing to go back to")?,
        },
        Command::Forward => match view.history_mut().forward() {
            Some(event) => view.pop_history(event)?,
            None => writeln!(status, "nothing to go forward to")?,
        },
        Command::Goto(hash) => {
            view.history_mut().navigate(hash);
            view.load_hash()?;
        }
        Command::Where => {
            let hash = view.history().location_hash();
            writeln!(status, "{}", if hash.is_empty() { "#" } else { hash.as_str() })?;
        }
        Command::Help => writeln!(status, "{}", HELP)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Read commands from `input` until it ends or `quit`.
pub fn run_session<R: Renderer, I: BufRead, W: Write>(
    view: &mut StandardView<R>,
    input: I,
    status: &mut W,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(cmd)) => {
                if !apply_command(view, cmd, status)? {
                    break;
                }
            }
            Err(msg) => writeln!(status, "{}\n{}", msg, HELP)?,
        }
    }
    Ok(())
}

fn stdout_renderer(config: &Config, json: bool) -> Box<dyn Renderer> {
    if json {
        Box::new(JsonRenderer::new(std::io::stdout()))
    } else {
        Box::new(TextRenderer::new(
            std::io::stdout(),
            config.catalog.title_field.clone(),
        ))
    }
}

/// `lens show`: render the frame for `hash` once.
pub async fn run_show(config: &Config, hash: &str, json: bool) -> Result<()> {
    open_view(config, hash, stdout_renderer(config, json)).await?;
    Ok(())
}

/// `lens browse`: interactive session on stdin.
pub async fn run_browse(config: &Config, hash: &str, json: bool) -> Result<()> {
    let mut view = open_view(config, hash, stdout_renderer(config, json)).await?;
    let stdin = std::io::stdin();
    let mut stderr = std::io::stderr();
    run_session(&mut view, stdin.lock(), &mut stderr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use competency_lens_core::models::{FieldNames, Row};
    use competency_lens_core::navigation::SessionHistory;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(
            parse_command("lens People Skills"),
            Ok(Some(Command::Lens("People Skills".to_string())))
        );
        assert_eq!(parse_command("open 12"), Ok(Some(Command::Open(12))));
        assert_eq!(parse_command("back"), Ok(Some(Command::Back)));
        assert_eq!(
            parse_command("goto #/tech/"),
            Ok(Some(Command::Goto("#/tech/".to_string())))
        );
        assert_eq!(parse_command("goto"), Ok(Some(Command::Goto(String::new()))));
        assert_eq!(parse_command("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("open x").is_err());
        assert!(parse_command("lens").is_err());
        assert!(parse_command("back twice").is_err());
        assert!(parse_command("dance").is_err());
    }

    fn view() -> StandardView<JsonRenderer<Vec<u8>>> {
        let rows: Vec<Row> = [("Tech", "1"), ("Tech", "2"), ("Ops", "3")]
            .iter()
            .map(|(lens, mastery)| {
                let mut row = Row::new();
                row.insert("Active (y/n)".to_string(), "y".to_string());
                row.insert("Lens".to_string(), lens.to_string());
                row.insert("Mastery".to_string(), mastery.to_string());
                row
            })
            .collect();
        let mut v = StandardView::new(
            "all",
            FieldNames::default(),
            Box::new(SessionHistory::new("")),
            JsonRenderer::new(Vec::new()),
        );
        v.on_parse_complete(rows).unwrap();
        v
    }

    #[test]
    fn test_session_walks_history() {
        let mut v = view();
        let script = "lens Tech\nopen 2\nwhere\nback\nwhere\nback\nforward\nforward\nwhere\nquit\nlens Ops\n";
        let mut status = Vec::new();
        run_session(&mut v, script.as_bytes(), &mut status).unwrap();

        let status = String::from_utf8(status).unwrap();
        let wheres: Vec<&str> = status.lines().collect();
        assert_eq!(wheres, vec!["#/tech/2/", "#/tech/", "#/tech/2/"]);

        let loc = v.app().locator().unwrap();
        assert_eq!(loc.lens, "tech");
        assert_eq!(loc.standard, Some(2));
    }

    #[test]
    fn test_session_goto_and_close() {
        let mut v = view();
        let mut status = Vec::new();
        run_session(&mut v, "goto #/ops/3/\nclose\nclose\n".as_bytes(), &mut status).unwrap();

        assert!(!v.is_detail_open());
        assert_eq!(v.history().location_hash(), "#/ops/");
        assert!(String::from_utf8(status).unwrap().contains("no detail open"));
    }

    #[test]
    fn test_session_reports_unknown_targets() {
        let mut v = view();
        let mut status = Vec::new();
        run_session(&mut v, "lens Nope\nopen 9\nforward\n".as_bytes(), &mut status).unwrap();
        let status = String::from_utf8(status).unwrap();
        assert!(status.contains("no lens named 'Nope'"));
        assert!(status.contains("no standard with id 9"));
        assert!(status.contains("nothing to go forward to"));
    }
}
