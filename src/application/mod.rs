//! Application layer: session state and use cases
//!
//! This layer holds the current outline snapshot, turns user commands into
//! engine operations, and depends on I/O boundary traits.

pub mod command;
pub mod error;
pub mod error_ext;
pub mod services;
pub mod session;

pub use command::{Command, CommandParseError};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use session::{OutlineSession, Outcome};
