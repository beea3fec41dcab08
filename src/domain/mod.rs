//! Domain layer: outline entities and the tree mutation engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod engine;
pub mod entities;
pub mod error;
pub mod forest;
pub mod invariants;
pub mod sample;
pub mod tree_traits;

pub use arena::{ArenaNode, ForestArena};
pub use engine::{
    add_root, apply_all, create_child, delete, edit, move_node, try_add_root, try_create_child,
    try_delete, try_edit, try_move, EngineResult, Operation,
};
pub use entities::*;
pub use error::DomainError;
pub use forest::Forest;
pub use sample::sample_outline;
pub use tree_traits::{render_forest, TreeNodeConvert};
