//! Line-oriented scripts of content-model operations.
//!
//! One operation per line; blank lines and lines starting with `#` are
//! skipped.
//!
//! ```text
//! set PATH JSON [root|closest|isolated]
//! attr NAME JSON
//! get PATH
//! attr? NAME
//! has PATH
//! push
//! pop
//! view
//! json
//! flat KEY...
//! ```

use std::io::Write;

use scoped_model::{ContentModel, Locality, Value};
use thiserror::Error;

/// A single parsed operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set {
        path: String,
        value: serde_json::Value,
        locality: Option<Locality>,
    },
    Attr {
        name: String,
        value: serde_json::Value,
    },
    Get {
        path: String,
    },
    GetAttr {
        name: String,
    },
    Has {
        path: String,
    },
    Push,
    Pop,
    View,
    Json,
    Flat {
        keys: Vec<String>,
    },
}

/// An operation together with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub command: Command,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("line {line}: {source}")]
    Model {
        line: usize,
        #[source]
        source: scoped_model::Error,
    },

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Parses a whole script.
pub fn parse(text: &str) -> Result<Vec<Line>, ScriptError> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let number = index + 1;
        let command = parse_line(trimmed).map_err(|reason| ScriptError::Parse { line: number, reason })?;
        lines.push(Line { number, command });
    }
    Ok(lines)
}

fn parse_line(line: &str) -> Result<Command, String> {
    let (op, rest) = match line.split_once(char::is_whitespace) {
        Some((op, rest)) => (op, rest.trim()),
        None => (line, ""),
    };

    match op {
        "set" => {
            let (path, rest) = split_argument(rest, "set needs a path")?;
            let (value, locality) = parse_value_and_locality(rest)?;
            Ok(Command::Set {
                path,
                value,
                locality,
            })
        }
        "attr" => {
            let (name, rest) = split_argument(rest, "attr needs a name")?;
            Ok(Command::Attr {
                name,
                value: parse_json(rest)?,
            })
        }
        "get" => Ok(Command::Get {
            path: single_argument(rest, "get needs a path")?,
        }),
        "attr?" => Ok(Command::GetAttr {
            name: single_argument(rest, "attr? needs a name")?,
        }),
        "has" => Ok(Command::Has {
            path: single_argument(rest, "has needs a path")?,
        }),
        "push" => no_arguments(rest, Command::Push),
        "pop" => no_arguments(rest, Command::Pop),
        "view" => no_arguments(rest, Command::View),
        "json" => no_arguments(rest, Command::Json),
        "flat" => Ok(Command::Flat {
            keys: rest.split_whitespace().map(str::to_string).collect(),
        }),
        other => Err(format!("unknown operation '{other}'")),
    }
}

fn split_argument<'a>(rest: &'a str, missing: &str) -> Result<(String, &'a str), String> {
    match rest.split_once(char::is_whitespace) {
        Some((arg, rest)) => Ok((arg.to_string(), rest.trim())),
        None if rest.is_empty() => Err(missing.to_string()),
        None => Err(format!("missing value after '{rest}'")),
    }
}

fn single_argument(rest: &str, missing: &str) -> Result<String, String> {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [] => Err(missing.to_string()),
        [arg] => Ok(arg.to_string()),
        [_, extra, ..] => Err(format!("unexpected argument '{extra}'")),
    }
}

fn no_arguments(rest: &str, command: Command) -> Result<Command, String> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(format!("unexpected argument '{rest}'"))
    }
}

fn parse_json(text: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(text).map_err(|err| format!("invalid JSON value: {err}"))
}

/// A trailing locality word is only taken as such if what precedes it is
/// still a complete JSON value.
fn parse_value_and_locality(rest: &str) -> Result<(serde_json::Value, Option<Locality>), String> {
    if let Some((value, word)) = rest.rsplit_once(char::is_whitespace) {
        if let Ok(locality) = word.parse::<Locality>() {
            if let Ok(value) = serde_json::from_str(value.trim()) {
                return Ok((value, Some(locality)));
            }
        }
    }
    Ok((parse_json(rest)?, None))
}

/// Runs `lines` against `model`, writing one result line per reading
/// operation to `out`.
pub fn execute<W: Write>(model: &ContentModel, lines: &[Line], out: &mut W) -> Result<(), ScriptError> {
    for line in lines {
        let model_err = |source| ScriptError::Model {
            line: line.number,
            source,
        };
        tracing::debug!(line = line.number, command = ?line.command, "Executing");

        match &line.command {
            Command::Set {
                path,
                value,
                locality,
            } => {
                let value = Value::from(value.clone());
                match locality {
                    Some(locality) => model.set_with(path, value, *locality),
                    None => model.set(path, value),
                }
                .map_err(model_err)?;
            }
            Command::Attr { name, value } => {
                model
                    .set_attribute(name, Value::from(value.clone()))
                    .map_err(model_err)?;
            }
            Command::Get { path } => {
                let value = model.try_get(path).map_err(model_err)?;
                write_optional(out, value)?;
            }
            Command::GetAttr { name } => write_optional(out, model.get_attribute(name))?,
            Command::Has { path } => writeln!(out, "{}", model.has(path))?,
            Command::Push => {
                model.extend_scope().map_err(model_err)?;
            }
            Command::Pop => {
                if !model.retract_scope() {
                    tracing::warn!(line = line.number, "pop at the root scope ignored");
                }
            }
            Command::View => {
                let view = model.to_json_value();
                if model.config().pretty_json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
                } else {
                    writeln!(out, "{view}")?;
                }
            }
            Command::Json => writeln!(out, "{}", model.to_json_text().map_err(model_err)?)?,
            Command::Flat { keys } => {
                let flat = model.to_flat_view(keys);
                writeln!(out, "{}", serde_json::to_string(&flat)?)?;
            }
        }
    }
    Ok(())
}

fn write_optional<W: Write>(out: &mut W, value: Option<Value>) -> Result<(), ScriptError> {
    match value {
        Some(value) => writeln!(out, "{}", serde_json::to_string(&value)?)?,
        None => writeln!(out, "undefined")?,
    }
    Ok(())
}
