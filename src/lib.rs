//! Editable outline trees.
//!
//! The [`domain`] layer holds immutable forest snapshots and the pure mutation
//! engine (`edit`, `delete`, `create_child`, `add_root`, `move_node`). The
//! [`application`] layer keeps the current snapshot in an [`OutlineSession`]
//! and replays command scripts; [`cli`] exposes both as the `menutree` binary.
//!
//! [`OutlineSession`]: application::OutlineSession

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
