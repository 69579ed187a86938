use crate::events::AppEvent;
use crate::picker::PointerId;
use async_channel::Sender;
use clockface::geometry::Point;
use std::str::FromStr;
use strum::EnumString;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Verb {
    Down,
    Move,
    Up,
    Leave,
    Step,
    Value,
    Print,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error(transparent)]
    InvalidPointer(#[from] crate::picker::pointer::ParsePointerIdError),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

fn parse_number(arg: Option<&str>, verb: &'static str) -> Result<f64, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(verb))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

fn parse_point<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    verb: &'static str,
) -> Result<Point, CommandError> {
    let x = parse_number(args.next(), verb)?;
    let y = parse_number(args.next(), verb)?;
    Ok(Point::new(x, y))
}

/// Parses one line of the host protocol. Blank lines yield `None`.
///
/// ```text
/// down <x> <y> [pointN]
/// move <x> <y>
/// up | leave
/// step <hours>
/// value <json array of {startTime, endTime, color?}>
/// print
/// quit
/// ```
pub fn parse_command(line: &str) -> Result<Option<AppEvent>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let verb = Verb::from_str(head).map_err(|_| CommandError::Unknown(head.to_string()))?;
    let mut args = rest.split_whitespace();

    let event = match verb {
        Verb::Down => {
            let position = parse_point(&mut args, "down")?;
            let target = args.next().map(PointerId::from_str).transpose()?;
            AppEvent::DragStart { position, target }
        }
        Verb::Move => AppEvent::DragMove(parse_point(&mut args, "move")?),
        // leaving the surface ends the drag like a release
        Verb::Up | Verb::Leave => AppEvent::DragEnd,
        Verb::Step => AppEvent::SetStep(parse_number(args.next(), "step")?),
        Verb::Value => AppEvent::SetValue(
            serde_json::from_str(rest).map_err(|e| CommandError::InvalidValue(e.to_string()))?,
        ),
        Verb::Print => AppEvent::Print,
        Verb::Quit => AppEvent::Quit,
    };

    Ok(Some(event))
}

pub async fn run_input(tx: Sender<AppEvent>) {
    let reader = BufReader::new(tokio::io::stdin());
    let mut lines = reader.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_command(&line) {
                Ok(Some(event)) => {
                    if tx.send(event).await.is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => log::error!("{}", e),
            },
            Ok(None) => break,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        }
    }

    let _ = tx.send(AppEvent::Quit).await;
}
