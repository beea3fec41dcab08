//! Command script service
//!
//! Loads a text file of commands (one per line) and replays it through an
//! outline session, the same fold an interactive front end performs one
//! gesture at a time.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error_ext::{self, IoResultExt};
use crate::application::{ApplicationError, ApplicationResult, Command, OutlineSession, Outcome};
use crate::domain::invariants;
use crate::infrastructure::traits::FileSystem;

/// A parsed script line, remembering where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the script
    pub line: usize,
    pub command: Command,
}

/// Result of one replayed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub line: usize,
    pub command: Command,
    pub outcome: Outcome,
}

/// Result of a whole replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
}

impl ReplayReport {
    pub fn changed(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.changed()).count()
    }

    pub fn unchanged(&self) -> usize {
        self.steps.len() - self.changed()
    }
}

/// Service for loading and replaying command scripts.
pub struct ScriptService {
    fs: Arc<dyn FileSystem>,
}

impl ScriptService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a script file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Vec<ScriptLine>> {
        if !self.fs.exists(path) {
            return Err(error_ext::not_found(path));
        }
        if !self.fs.is_file(path) {
            return Err(error_ext::not_a_file(path));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read script", path)?;
        Self::parse(&content)
    }

    /// Parse script text. Blank lines and `#` comments are skipped.
    pub fn parse(content: &str) -> ApplicationResult<Vec<ScriptLine>> {
        let mut lines = Vec::new();
        for (i, raw) in content.lines().enumerate() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let command = trimmed
                .parse::<Command>()
                .map_err(|source| ApplicationError::Parse { line: i + 1, source })?;
            lines.push(ScriptLine {
                line: i + 1,
                command,
            });
        }
        debug!("parsed {} commands", lines.len());
        Ok(lines)
    }

    /// Apply every line in order. With `check`, the invariants are verified
    /// after each step and the first violation aborts the replay.
    #[instrument(level = "debug", skip(self, session, script), fields(lines = script.len()))]
    pub fn replay(
        &self,
        session: &mut OutlineSession,
        script: &[ScriptLine],
        check: bool,
    ) -> ApplicationResult<ReplayReport> {
        let mut report = ReplayReport::default();
        for step in script {
            let outcome = session.apply(&step.command).map_err(|e| match e {
                ApplicationError::Rejected { command, source } => ApplicationError::Rejected {
                    command: format!("line {}: {}", step.line, command),
                    source,
                },
                other => other,
            })?;
            if check {
                invariants::check(session.snapshot()).map_err(|source| {
                    ApplicationError::InvariantBroken {
                        line: step.line,
                        source,
                    }
                })?;
            }
            report.steps.push(StepReport {
                line: step.line,
                command: step.command.clone(),
                outcome,
            });
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeId;

    #[test]
    fn given_script_with_comments_when_parsing_then_keeps_line_numbers() {
        let script = "# setup\n\nroot Top as t\n  child t \"Sub\" as s\n";
        let lines = ScriptService::parse(script).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line, 3);
        assert_eq!(lines[1].line, 4);
        assert_eq!(
            lines[1].command,
            Command::Child {
                parent: NodeId::from("t"),
                text: Some("Sub".into()),
                id: Some(NodeId::from("s")),
            }
        );
    }

    #[test]
    fn given_bad_line_when_parsing_then_error_names_line() {
        let err = ScriptService::parse("root\nwiggle x\n").unwrap_err();
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("unknown command: wiggle"));
        match err {
            ApplicationError::Parse { line, source } => {
                assert_eq!(line, 2);
                assert!(source.message.contains("unknown command"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn given_report_when_counting_then_splits_changed_and_unchanged() {
        let report = ReplayReport {
            steps: vec![
                StepReport {
                    line: 1,
                    command: Command::Delete { id: "a".into() },
                    outcome: Outcome::Applied,
                },
                StepReport {
                    line: 2,
                    command: Command::Delete { id: "a".into() },
                    outcome: Outcome::Unchanged(crate::domain::DomainError::NotFound("a".into())),
                },
            ],
        };
        assert_eq!(report.changed(), 1);
        assert_eq!(report.unchanged(), 1);
    }
}
