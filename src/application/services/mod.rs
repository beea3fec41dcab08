//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, IdGenerator)
//! but are themselves concrete structs, not traits.

mod script;

pub use script::{ReplayReport, ScriptLine, ScriptService, StepReport};
