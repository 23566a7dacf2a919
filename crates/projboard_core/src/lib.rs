//! Core logic for the project board.
//! Owns project state, field validation, templated components and the
//! drag-and-drop status transitions between list views.

pub mod app;
pub mod component;
pub mod config;
pub mod dom;
pub mod logging;
pub mod model;
pub mod state;
pub mod validation;

pub use app::{standard_document, ProjectBoard};
pub use component::project_input::{
    InputField, InputRejection, ProjectDraft, ProjectInput, INVALID_INPUT_MESSAGE,
};
pub use component::project_item::ProjectItem;
pub use component::project_list::{ProjectList, DROPPABLE_CLASS};
pub use component::{Component, ComponentError, DragTarget, Draggable, MountHost, MountSpec, TemplateMount};
pub use config::{BoardConfig, ConfigError, PageLayout};
pub use dom::{
    DataTransfer, DomEvent, DropEffect, EventType, HostDocument, MemoryDocument, NodeHandle,
    NodeSpec, Selector, DRAG_FORMAT,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{Project, ProjectId, ProjectStatus};
pub use state::store::{Listener, ProjectStore};
pub use validation::{validate, violations, ConstraintDescriptor, ConstraintViolation, FieldValue};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
