//! Project state store with listener notification.
//!
//! # Responsibility
//! - Create projects and apply status transitions.
//! - Fan out snapshots of the full collection to registered listeners.
//!
//! # Invariants
//! - New projects are appended with `ProjectStatus::Active`.
//! - `move_project` notifies only when a status actually changes.
//! - Listeners are never deduplicated or removed.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use log::{debug, info};
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Callback invoked with the full collection after each mutation.
pub type Listener = Rc<dyn Fn(&[Project])>;

/// Single owner of the project collection for one page lifetime.
///
/// Construct once during wiring and share as `Rc<ProjectStore>`; all methods
/// take `&self` so components can hold the store without exclusive access.
#[derive(Default)]
pub struct ProjectStore {
    projects: RefCell<Vec<Project>>,
    listeners: RefCell<Vec<Listener>>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener; registering the same closure twice calls it twice.
    pub fn add_listener(&self, listener: impl Fn(&[Project]) + 'static) {
        let mut listeners = self.listeners.borrow_mut();
        listeners.push(Rc::new(listener));
        debug!(
            "event=listener_add module=state status=ok listeners={}",
            listeners.len()
        );
    }

    /// Appends a new active project and notifies listeners.
    ///
    /// Input is not validated here; callers validate before invoking.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> ProjectId {
        let project = Project::new(title, description, people);
        let id = project.id();
        self.projects.borrow_mut().push(project);
        info!("event=project_add module=state status=ok project_id={id} people={people}");
        self.notify();
        id
    }

    /// Moves a project into `new_status`.
    ///
    /// Returns whether anything changed. Unknown ids and unchanged statuses are
    /// silent no-ops and do not notify.
    pub fn move_project(&self, id: ProjectId, new_status: ProjectStatus) -> bool {
        let changed = {
            let mut projects = self.projects.borrow_mut();
            match projects.iter_mut().find(|project| project.id() == id) {
                Some(project) if project.status() != new_status => {
                    project.set_status(new_status);
                    true
                }
                Some(_) => {
                    debug!(
                        "event=project_move module=state status=skip reason=unchanged project_id={id}"
                    );
                    false
                }
                None => {
                    debug!(
                        "event=project_move module=state status=skip reason=not_found project_id={id}"
                    );
                    false
                }
            }
        };

        if changed {
            info!(
                "event=project_move module=state status=ok project_id={id} to={new_status}"
            );
            self.notify();
        }
        changed
    }

    /// Returns a snapshot of all projects in insertion order.
    pub fn projects(&self) -> Vec<Project> {
        self.projects.borrow().clone()
    }

    pub fn project(&self, id: ProjectId) -> Option<Project> {
        self.projects
            .borrow()
            .iter()
            .find(|project| project.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn notify(&self) {
        // Both borrows end before any listener runs, so listeners may read
        // the store or register more listeners.
        let snapshot = self.projects.borrow().clone();
        let listeners = self.listeners.borrow().clone();
        for listener in &listeners {
            listener(&snapshot);
        }
    }
}

impl Debug for ProjectStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("projects", &self.projects.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectStore;
    use crate::model::project::ProjectStatus;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use uuid::Uuid;

    #[test]
    fn add_project_appends_active_project_and_notifies_once() {
        let store = ProjectStore::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        store.add_listener(move |projects| {
            seen.borrow_mut()
                .push(projects.iter().map(|p| p.id()).collect::<Vec<_>>());
        });

        let first = store.add_project("First", "Desc1", 1);
        let second = store.add_project("T", "Desc1", 3);

        assert_eq!(store.len(), 2);
        assert_eq!(store.project(second).unwrap().status(), ProjectStatus::Active);
        assert_eq!(*calls.borrow(), vec![vec![first], vec![first, second]]);
    }

    #[test]
    fn move_project_with_current_status_does_not_notify() {
        let store = ProjectStore::new();
        let id = store.add_project("T", "Desc1", 3);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        store.add_listener(move |_| counter.set(counter.get() + 1));

        assert!(!store.move_project(id, ProjectStatus::Active));
        assert_eq!(calls.get(), 0);

        assert!(store.move_project(id, ProjectStatus::Finished));
        assert_eq!(calls.get(), 1);
        assert_eq!(store.project(id).unwrap().status(), ProjectStatus::Finished);
    }

    #[test]
    fn move_project_with_unknown_id_is_noop() {
        let store = ProjectStore::new();
        store.add_project("T", "Desc1", 3);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        store.add_listener(move |_| counter.set(counter.get() + 1));

        assert!(!store.move_project(Uuid::new_v4(), ProjectStatus::Finished));
        assert_eq!(calls.get(), 0);
        assert!(store
            .projects()
            .iter()
            .all(|p| p.status() == ProjectStatus::Active));
    }

    #[test]
    fn listener_may_register_another_listener_during_notification() {
        let store = Rc::new(ProjectStore::new());
        let inner_store = Rc::clone(&store);
        store.add_listener(move |_| inner_store.add_listener(|_| {}));

        store.add_project("T", "Desc1", 3);
        assert_eq!(store.listener_count(), 2);
    }
}
