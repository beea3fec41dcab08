//! I/O boundary traits for testability
//!
//! These traits abstract everything nondeterministic the outline needs from
//! the outside world: reading script files and minting node ids. Services are
//! tested with deterministic implementations.

use std::fmt;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::NodeId;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Source of fresh node identifiers.
///
/// Called once per created node. Implementations only promise freshness among
/// their own outputs; the session additionally skips ids already live in the
/// outline.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    fn next_id(&self) -> NodeId;
}

/// Which generator a session gets by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdStyle {
    /// Hyphenated UUID v4
    Uuid,
    /// Nine lowercase base36 characters
    #[default]
    Short,
    /// `node-1`, `node-2`, ...
    Sequential,
}

impl IdStyle {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdStyle::Uuid => Box::new(UuidIdGenerator),
            IdStyle::Short => Box::new(ShortIdGenerator),
            IdStyle::Sequential => Box::new(SequentialIdGenerator::new("node")),
        }
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> NodeId {
        NodeId::new(Uuid::new_v4().to_string())
    }
}

/// Short random ids, e.g. `k3x9q0a1z`.
#[derive(Debug, Default)]
pub struct ShortIdGenerator;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SHORT_ID_LEN: usize = 9;

impl IdGenerator for ShortIdGenerator {
    fn next_id(&self) -> NodeId {
        let mut n = Uuid::new_v4().as_u128();
        let mut id = String::with_capacity(SHORT_ID_LEN);
        for _ in 0..SHORT_ID_LEN {
            id.push(BASE36[(n % 36) as usize] as char);
            n /= 36;
        }
        NodeId::new(id)
    }
}

/// Deterministic `<prefix>-<n>` ids starting at 1.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> NodeId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        NodeId::new(format!("{}-{}", self.prefix, n))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn given_sequential_generator_when_called_then_counts_up() {
        let ids = SequentialIdGenerator::new("n");
        assert_eq!(ids.next_id(), NodeId::from("n-1"));
        assert_eq!(ids.next_id(), NodeId::from("n-2"));
    }

    #[test]
    fn given_short_generator_when_called_then_nine_base36_chars() {
        let id = ShortIdGenerator.next_id();
        assert_eq!(id.as_str().len(), 9);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn given_random_generators_when_called_repeatedly_then_no_repeats() {
        for style in [IdStyle::Uuid, IdStyle::Short] {
            let generator = style.generator();
            let ids: HashSet<NodeId> = (0..500).map(|_| generator.next_id()).collect();
            assert_eq!(ids.len(), 500);
        }
    }
}
