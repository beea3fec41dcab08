//! Outline session: the single writer of the current snapshot
//!
//! The engine is stateless; this is where "the current outline" lives. Every
//! command is resolved into an engine operation, applied to the current
//! snapshot, and the result replaces it.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, Command};
use crate::config::Settings;
use crate::domain::{DomainError, Forest, NewNode, NodeId, Operation};
use crate::infrastructure::traits::IdGenerator;

/// How many generated ids may collide with live ones before giving up.
const MAX_ID_ATTEMPTS: usize = 16;

/// What a command did to the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A node was created under this id.
    Created(NodeId),
    /// The snapshot is unchanged, for this reason.
    Unchanged(DomainError),
}

impl Outcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Outcome::Unchanged(_))
    }
}

#[derive(Debug)]
pub struct OutlineSession {
    current: Forest,
    ids: Arc<dyn IdGenerator>,
    default_child_text: String,
    default_root_text: String,
    strict: bool,
}

impl OutlineSession {
    pub fn new(initial: Forest, ids: Arc<dyn IdGenerator>, settings: &Settings) -> Self {
        Self {
            current: initial,
            ids,
            default_child_text: settings.default_child_text.clone(),
            default_root_text: settings.default_root_text.clone(),
            strict: settings.strict,
        }
    }

    pub fn snapshot(&self) -> &Forest {
        &self.current
    }

    pub fn into_snapshot(self) -> Forest {
        self.current
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// In strict mode a command that leaves the outline unchanged is an error.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Draw an id from the generator that is not live in the outline.
    fn fresh_id(&self) -> ApplicationResult<NodeId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !self.current.contains(&id) {
                return Ok(id);
            }
            debug!(%id, "generated id already in use, retrying");
        }
        Err(ApplicationError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Turn a user command into an engine operation, filling in ids and
    /// default text.
    pub fn resolve(&self, command: &Command) -> ApplicationResult<Operation> {
        Ok(match command {
            Command::Edit { id, text } => Operation::Edit {
                id: id.clone(),
                text: text.clone(),
            },
            Command::Delete { id } => Operation::Delete { id: id.clone() },
            Command::Child { parent, text, id } => Operation::CreateChild {
                parent: parent.clone(),
                node: NewNode::new(
                    self.id_or_fresh(id)?,
                    text.clone()
                        .unwrap_or_else(|| self.default_child_text.clone()),
                ),
            },
            Command::Root { text, id } => Operation::AddRoot {
                node: NewNode::new(
                    self.id_or_fresh(id)?,
                    text.clone()
                        .unwrap_or_else(|| self.default_root_text.clone()),
                ),
            },
            Command::Move { id, target } => Operation::Move {
                id: id.clone(),
                target: target.clone(),
            },
        })
    }

    fn id_or_fresh(&self, id: &Option<NodeId>) -> ApplicationResult<NodeId> {
        match id {
            Some(id) => Ok(id.clone()),
            None => self.fresh_id(),
        }
    }

    #[instrument(level = "debug", skip(self, command), fields(command = %command))]
    pub fn apply(&mut self, command: &Command) -> ApplicationResult<Outcome> {
        let operation = self.resolve(command)?;
        match operation.try_apply(&self.current) {
            Ok(next) => {
                self.current = next;
                let outcome = match operation {
                    Operation::CreateChild { node, .. } | Operation::AddRoot { node } => {
                        Outcome::Created(node.id)
                    }
                    _ => Outcome::Applied,
                };
                info!(%command, "applied");
                Ok(outcome)
            }
            Err(reason) if self.strict => Err(ApplicationError::Rejected {
                command: command.to_string(),
                source: reason,
            }),
            Err(reason) => {
                warn!(%command, %reason, "no effect");
                Ok(Outcome::Unchanged(reason))
            }
        }
    }

    /// Create a child of `parent` with a generated id.
    pub fn new_child(&mut self, parent: &NodeId, text: Option<&str>) -> ApplicationResult<Outcome> {
        self.apply(&Command::Child {
            parent: parent.clone(),
            text: text.map(str::to_string),
            id: None,
        })
    }

    /// Append a root with a generated id.
    pub fn new_root(&mut self, text: Option<&str>) -> ApplicationResult<Outcome> {
        self.apply(&Command::Root {
            text: text.map(str::to_string),
            id: None,
        })
    }
}
