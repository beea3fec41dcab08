//! User-level commands and their one-line text form
//!
//! ```text
//! edit <id> <text>
//! delete <id>
//! child <parent> [text] [as <id>]
//! root [text] [as <id>]
//! move <id> <target|none>
//! ```
//!
//! Text is either a double-quoted string or the remaining words joined by a
//! single space. Inside quotes `\"` and `\\` stand for a literal quote and
//! backslash; unquoted words may not contain `"`. A bare `none` as move target
//! means the root level; a quoted `"none"` is an ordinary id.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use thiserror::Error;

use crate::domain::NodeId;

/// A request from the outline's user. Unlike [`crate::domain::Operation`],
/// creation commands may leave the id (and text) to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit {
        id: NodeId,
        text: String,
    },
    Delete {
        id: NodeId,
    },
    Child {
        parent: NodeId,
        text: Option<String>,
        id: Option<NodeId>,
    },
    Root {
        text: Option<String>,
        id: Option<NodeId>,
    },
    Move {
        id: NodeId,
        target: Option<NodeId>,
    },
}

/// Error parsing a command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CommandParseError {
    pub message: String,
}

impl CommandParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Quoted(String),
}

impl Token {
    fn text(&self) -> &str {
        match self {
            Token::Word(s) | Token::Quoted(s) => s,
        }
    }

    fn is_word(&self, word: &str) -> bool {
        matches!(self, Token::Word(w) if w == word)
    }
}

/// A quoted string must end at whitespace or end of line; anything else falls
/// through to the word alternative and is rejected there for its quote.
/// The pattern is a literal, so building it cannot fail at runtime.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)*)"(?:\s|$)|(\S+)"#).expect("static token pattern")
});

fn unescape(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

fn tokenize(line: &str) -> Result<Vec<Token>, CommandParseError> {
    TOKEN
        .captures_iter(line)
        .filter_map(|caps| {
            caps.get(1)
                .map(|m| Ok(Token::Quoted(unescape(m.as_str()))))
                .or_else(|| {
                    caps.get(2).map(|m| {
                        let word = m.as_str();
                        if word.contains('"') {
                            Err(CommandParseError::new(format!(
                                "unbalanced quote in `{word}`"
                            )))
                        } else {
                            Ok(Token::Word(word.to_string()))
                        }
                    })
                })
        })
        .collect()
}

fn join_text(tokens: &[Token]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.iter().map(Token::text).join(" "))
    }
}

/// Split an optional trailing `as <id>` off creation arguments.
fn split_explicit_id(tokens: &[Token]) -> (&[Token], Option<NodeId>) {
    match tokens {
        [rest @ .., as_kw, id] if as_kw.is_word("as") => (rest, Some(NodeId::from(id.text()))),
        _ => (tokens, None),
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(line)?;
        let (verb, args) = match tokens.split_first() {
            Some((Token::Word(verb), args)) => (verb.to_lowercase(), args),
            Some((Token::Quoted(_), _)) => {
                return Err(CommandParseError::new("command verb must not be quoted"))
            }
            None => return Err(CommandParseError::new("empty command")),
        };

        match verb.as_str() {
            "edit" => match args {
                [id, text @ ..] if !text.is_empty() => Ok(Command::Edit {
                    id: NodeId::from(id.text()),
                    text: join_text(text).unwrap_or_default(),
                }),
                _ => Err(CommandParseError::new("usage: edit <id> <text>")),
            },
            "delete" => match args {
                [id] => Ok(Command::Delete {
                    id: NodeId::from(id.text()),
                }),
                _ => Err(CommandParseError::new("usage: delete <id>")),
            },
            "child" => match args {
                [parent, rest @ ..] => {
                    let (text, id) = split_explicit_id(rest);
                    Ok(Command::Child {
                        parent: NodeId::from(parent.text()),
                        text: join_text(text),
                        id,
                    })
                }
                [] => Err(CommandParseError::new(
                    "usage: child <parent> [text] [as <id>]",
                )),
            },
            "root" => {
                let (text, id) = split_explicit_id(args);
                Ok(Command::Root {
                    text: join_text(text),
                    id,
                })
            }
            "move" => match args {
                [id, target] => Ok(Command::Move {
                    id: NodeId::from(id.text()),
                    target: if target.is_word("none") {
                        None
                    } else {
                        Some(NodeId::from(target.text()))
                    },
                }),
                _ => Err(CommandParseError::new("usage: move <id> <target|none>")),
            },
            other => Err(CommandParseError::new(format!("unknown command: {other}"))),
        }
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Ids print bare unless that would read back as something else.
fn id_token(id: &NodeId) -> String {
    let s = id.as_str();
    let bare = !s.is_empty()
        && !s.contains(|c: char| c.is_whitespace() || c == '"')
        && s != "none"
        && s != "as";
    if bare {
        s.to_string()
    } else {
        quote(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Edit { id, text } => write!(f, "edit {} {}", id_token(id), quote(text)),
            Command::Delete { id } => write!(f, "delete {}", id_token(id)),
            Command::Child { parent, text, id } => {
                write!(f, "child {}", id_token(parent))?;
                if let Some(text) = text {
                    write!(f, " {}", quote(text))?;
                }
                if let Some(id) = id {
                    write!(f, " as {}", id_token(id))?;
                }
                Ok(())
            }
            Command::Root { text, id } => {
                write!(f, "root")?;
                if let Some(text) = text {
                    write!(f, " {}", quote(text))?;
                }
                if let Some(id) = id {
                    write!(f, " as {}", id_token(id))?;
                }
                Ok(())
            }
            Command::Move { id, target } => match target {
                Some(target) => write!(f, "move {} {}", id_token(id), id_token(target)),
                None => write!(f, "move {} none", id_token(id)),
            },
        }
    }
}
