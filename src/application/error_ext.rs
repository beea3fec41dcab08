//! Error conversion helpers for script input

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach the file being worked on to an `io::Result`.
pub trait IoResultExt<T> {
    /// ```ignore
    /// fs.read_to_string(&script)
    ///     .with_path_context("read script", &script)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| unreadable(action, path, e))
    }
}

fn unreadable(action: &str, path: &Path, source: io::Error) -> ApplicationError {
    ApplicationError::OperationFailed {
        context: format!("{}: {}", action, path.display()),
        source: Box::new(source),
    }
}

/// Input path that does not exist.
pub fn not_found(path: &Path) -> ApplicationError {
    unreadable(
        "script not found",
        path,
        io::Error::new(io::ErrorKind::NotFound, "file does not exist"),
    )
}

/// Input path that exists but is not a regular file.
pub fn not_a_file(path: &Path) -> ApplicationError {
    unreadable(
        "not a file",
        path,
        io::Error::new(io::ErrorKind::InvalidInput, "expected a regular file"),
    )
}
