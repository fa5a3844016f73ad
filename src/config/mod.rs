//! Configuration for a guarded entity.
//!
//! A [`SingletonConfig`] names the entity, where its lock file lives, and
//! how lock holders are corroborated. It can be built in code or loaded
//! from YAML with forward-compatible parsing (unknown fields are ignored).

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::SingletonConfig;
pub use types::{ProbeFailurePolicy, ProbeKind};
