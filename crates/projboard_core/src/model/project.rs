//! Project domain model.
//!
//! # Responsibility
//! - Define the work item shared by the input form, store and list views.
//! - Provide the status partition enum used for drag-and-drop transitions.
//!
//! # Invariants
//! - `id` is generated once at creation and never reassigned.
//! - Only `status` changes after creation, and only through the store.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for one project.
///
/// Also the drag payload carried between item and list views.
pub type ProjectId = Uuid;

/// Status partition of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work in progress; rendered by the active list.
    Active,
    /// Work done; rendered by the finished list.
    Finished,
}

/// String form of `ProjectStatus::Active`.
pub const PROJECT_STATUS_ACTIVE: &str = "active";
/// String form of `ProjectStatus::Finished`.
pub const PROJECT_STATUS_FINISHED: &str = "finished";

impl ProjectStatus {
    /// Stable lowercase name used for element ids and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => PROJECT_STATUS_ACTIVE,
            Self::Finished => PROJECT_STATUS_FINISHED,
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ProjectStatusParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            PROJECT_STATUS_ACTIVE => Ok(Self::Active),
            PROJECT_STATUS_FINISHED => Ok(Self::Finished),
            other => Err(ProjectStatusParseError(other.to_string())),
        }
    }
}

/// Raised when a string names no known status partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStatusParseError(pub String);

impl Display for ProjectStatusParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown project status `{}`; expected active|finished",
            self.0
        )
    }
}

impl Error for ProjectStatusParseError {}

/// One user-created work item.
///
/// Fields are read-only outside the crate; the store owns every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    id: ProjectId,
    title: String,
    description: String,
    people: u32,
    status: ProjectStatus,
}

impl Project {
    /// Creates an active project with a freshly generated id.
    pub(crate) fn new(title: impl Into<String>, description: impl Into<String>, people: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            people,
            status: ProjectStatus::Active,
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn people(&self) -> u32 {
        self.people
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Human-readable assignee count, e.g. `1 person` or `3 people`.
    pub fn persons(&self) -> String {
        if self.people == 1 {
            "1 person".to_string()
        } else {
            format!("{} people", self.people)
        }
    }

    pub(crate) fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }
}
