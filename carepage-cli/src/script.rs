//! Line-based interaction scripts.
//!
//! ```text
//! # admission form
//! focus nomPatientInput
//! type nomPatientInput du
//! click item-durand
//! wait 200
//! show patientList
//! ```

use std::time::Duration;

use crate::error::ScriptError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Focus(String),
    Blur,
    Type { id: String, text: String },
    Click(String),
    Change { id: String, value: String },
    Check { id: String, checked: bool },
    Wait(Duration),
    Show(String),
    OpenImpression,
    OpenRow(String),
    SubmitStool,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Focus(_) => "focus",
            Command::Blur => "blur",
            Command::Type { .. } => "type",
            Command::Click(_) => "click",
            Command::Change { .. } => "change",
            Command::Check { .. } => "check",
            Command::Wait(_) => "wait",
            Command::Show(_) => "show",
            Command::OpenImpression => "open-impression",
            Command::OpenRow(_) => "open-row",
            Command::SubmitStool => "submit-stool",
        }
    }
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
///
/// `line` is 1-based and only used in errors.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Command>, ScriptError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let (command, rest) = match text.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (text, ""),
    };

    let missing = |expected: &'static str| ScriptError::MissingArgument {
        line,
        command: command.to_string(),
        expected,
    };
    let id = |rest: &str| -> Result<String, ScriptError> {
        rest.split_whitespace()
            .next()
            .map(str::to_string)
            .ok_or_else(|| missing("an element id"))
    };
    // `<id> <rest of line>`; the remainder may be empty.
    let id_and_text = |rest: &str| -> Result<(String, String), ScriptError> {
        let id = id(rest)?;
        let remainder = rest[id.len()..].trim_start().to_string();
        Ok((id, remainder))
    };

    let parsed = match command {
        "focus" => Command::Focus(id(rest)?),
        "blur" => Command::Blur,
        "type" => {
            let (id, text) = id_and_text(rest)?;
            Command::Type { id, text }
        }
        "click" => Command::Click(id(rest)?),
        "change" => {
            let (id, value) = id_and_text(rest)?;
            Command::Change { id, value }
        }
        "check" => {
            let (id, value) = id_and_text(rest)?;
            let checked = match value.as_str() {
                "true" => true,
                "false" => false,
                "" => return Err(missing("an element id and true|false")),
                other => {
                    return Err(ScriptError::InvalidArgument {
                        line,
                        value: other.to_string(),
                        expected: "true|false",
                    });
                }
            };
            Command::Check { id, checked }
        }
        "wait" => {
            if rest.is_empty() {
                return Err(missing("a duration in milliseconds"));
            }
            let ms = rest.parse::<u64>().map_err(|_| ScriptError::InvalidArgument {
                line,
                value: rest.to_string(),
                expected: "milliseconds",
            })?;
            Command::Wait(Duration::from_millis(ms))
        }
        "show" => Command::Show(id(rest)?),
        "open-impression" => Command::OpenImpression,
        "open-row" => Command::OpenRow(id(rest)?),
        "submit-stool" => Command::SubmitStool,
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    Ok(Some(parsed))
}

/// Parse a whole script, stopping at the first bad line.
pub fn parse_script(script: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, text) in script.lines().enumerate() {
        if let Some(command) = parse_line(idx + 1, text)? {
            commands.push(command);
        }
    }
    Ok(commands)
}
