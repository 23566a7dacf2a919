//! Domain model for board projects.
//!
//! # Responsibility
//! - Define the canonical project record rendered by every view.
//! - Keep status partitioning a closed enum so no third state can exist.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Projects are only created and mutated by `ProjectStore`.

pub mod project;
