//! Reactive project state.
//!
//! # Responsibility
//! - Own the canonical, insertion-ordered project collection.
//! - Notify subscribed renderers synchronously after every mutation.
//!
//! # Invariants
//! - The store is the only writer of the project collection.
//! - Listeners run in registration order before a mutation call returns.

pub mod store;
