//! Parser for scenario scripts.

use std::time::Duration;

use super::ast::{Command, Script, Step};
use crate::circuit::{ComponentId, ComponentKind, Position};
use crate::error::{Result, SimError};

/// Line-oriented parser for scenario scripts.
pub struct Parser<'a> {
    input: &'a str,
}

impl<'a> Parser<'a> {
    /// Create a new parser over the given script text.
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Parse the whole script.
    pub fn parse(&self) -> Result<Script> {
        let mut script = Script::new();

        for (idx, raw) in self.input.lines().enumerate() {
            let line = idx + 1;
            let text = strip_comment(raw).trim();
            if text.is_empty() {
                continue;
            }

            let words: Vec<&str> = text.split_whitespace().collect();
            let command = parse_command(line, &words)?;
            script.commands.push(Step { command, line });
        }

        Ok(script)
    }
}

/// `#` starts a comment at the beginning of a line, `;` anywhere.
/// A `#` later in the line is an id prefix (`press #2`).
fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_command(line: usize, words: &[&str]) -> Result<Command> {
    let (name, args) = match words.split_first() {
        Some((name, args)) => (name.to_lowercase(), args),
        None => return Err(SimError::parse(line, "empty command")),
    };

    let command = match name.as_str() {
        "place" | "add" => {
            let kind = match args.first() {
                Some(word) => ComponentKind::from_str(word).ok_or_else(|| {
                    SimError::parse(line, format!("unknown component kind '{word}'"))
                })?,
                None => return Err(SimError::parse(line, "place requires a component kind")),
            };
            let position = match args.len() {
                1 => Position::default(),
                3 => parse_position(line, &args[1..])?,
                _ => return Err(SimError::parse(line, "usage: place <kind> [x y]")),
            };
            Command::Place { kind, position }
        }
        "remove" | "delete" => {
            expect_args(line, &name, args, 1)?;
            Command::Remove(parse_id(line, args[0])?)
        }
        "pin" => {
            expect_args(line, &name, args, 2)?;
            let pin = args[1]
                .parse::<u8>()
                .map_err(|_| SimError::parse(line, format!("invalid pin number '{}'", args[1])))?;
            Command::Pin {
                id: parse_id(line, args[0])?,
                pin,
            }
        }
        "press" => {
            expect_args(line, &name, args, 1)?;
            Command::Press(parse_id(line, args[0])?)
        }
        "release" => {
            expect_args(line, &name, args, 1)?;
            Command::Release(parse_id(line, args[0])?)
        }
        "move" => {
            expect_args(line, &name, args, 3)?;
            Command::Move {
                id: parse_id(line, args[0])?,
                position: parse_position(line, &args[1..])?,
            }
        }
        "wait" => {
            expect_args(line, &name, args, 1)?;
            Command::Wait(parse_duration(line, args[0])?)
        }
        "clear" | "start" | "stop" | "tick" | "status" | "code" => {
            expect_args(line, &name, args, 0)?;
            match name.as_str() {
                "clear" => Command::Clear,
                "start" => Command::Start,
                "stop" => Command::Stop,
                "tick" => Command::Tick,
                "status" => Command::Status,
                _ => Command::Code,
            }
        }
        other => return Err(SimError::parse(line, format!("unknown command '{other}'"))),
    };

    Ok(command)
}

fn expect_args(line: usize, name: &str, args: &[&str], count: usize) -> Result<()> {
    if args.len() == count {
        Ok(())
    } else {
        Err(SimError::parse(
            line,
            format!("'{name}' takes {count} argument(s), got {}", args.len()),
        ))
    }
}

fn parse_id(line: usize, word: &str) -> Result<ComponentId> {
    word.trim_start_matches('#')
        .parse::<usize>()
        .map(ComponentId)
        .map_err(|_| SimError::parse(line, format!("invalid component id '{word}'")))
}

fn parse_position(line: usize, words: &[&str]) -> Result<Position> {
    let coord = |word: &str| {
        word.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SimError::parse(line, format!("invalid coordinate '{word}'")))
    };
    Ok(Position::new(coord(words[0])?, coord(words[1])?))
}

/// Parse `120ms`, `2s`, or a bare number of milliseconds.
fn parse_duration(line: usize, word: &str) -> Result<Duration> {
    let invalid = || SimError::parse(line, format!("invalid duration '{word}'"));
    let lower = word.to_lowercase();

    if let Some(ms) = lower.strip_suffix("ms") {
        ms.parse::<u64>().map(Duration::from_millis).map_err(|_| invalid())
    } else if let Some(secs) = lower.strip_suffix('s') {
        secs.parse::<f64>()
            .ok()
            .and_then(|s| Duration::try_from_secs_f64(s).ok())
            .ok_or_else(invalid)
    } else {
        lower.parse::<u64>().map(Duration::from_millis).map_err(|_| invalid())
    }
}
