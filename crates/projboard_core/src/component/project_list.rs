//! Status-partitioned project list and drop target.
//!
//! # Responsibility
//! - Project one status partition of the store into a list of items.
//! - Translate drops of project items into store status transitions.
//!
//! # Invariants
//! - The list never writes project state except via `ProjectStore::move_project`.
//! - Every store notification fully re-renders the partition in store order.

use crate::component::project_item::ProjectItem;
use crate::component::{bind_handler, Component, ComponentError, DragTarget, MountHost, MountSpec, TemplateMount};
use crate::config::PageLayout;
use crate::dom::{DomEvent, EventType, HostDocument, NodeHandle, DRAG_FORMAT};
use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::state::store::ProjectStore;
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::rc::Rc;

const COMPONENT: &str = "ProjectList";
/// Class applied to the list container while a project hovers over it.
pub const DROPPABLE_CLASS: &str = "droppable";

/// List view for one status partition.
pub struct ProjectList {
    inner: Rc<ListInner>,
}

struct ListInner {
    mount: TemplateMount,
    store: Rc<ProjectStore>,
    status: ProjectStatus,
    list: NodeHandle,
    heading: NodeHandle,
    item_template_id: String,
    assigned: RefCell<Vec<Project>>,
    items: RefCell<Vec<ProjectItem>>,
}

impl ProjectList {
    /// Appends the list to the layout's list host and subscribes to `store`.
    pub fn new(
        document: Rc<dyn HostDocument>,
        store: Rc<ProjectStore>,
        layout: &PageLayout,
        status: ProjectStatus,
    ) -> Result<Self, ComponentError> {
        // Items are built on every notification, where errors can only be
        // logged; check their template up front instead.
        if document.element_by_id(&layout.item_template_id).is_none() {
            return Err(ComponentError::TemplateNotFound(
                layout.item_template_id.clone(),
            ));
        }

        let mount = TemplateMount::attach(
            document,
            &MountSpec {
                template_id: &layout.list_template_id,
                host: MountHost::Id(&layout.list_host_id),
                insert_at_start: false,
                new_element_id: Some(format!("{status}-projects")),
            },
        )?;
        let list = mount.select(COMPONENT, "ul")?;
        let heading = mount.select(COMPONENT, "h2")?;

        let view = Self {
            inner: Rc::new(ListInner {
                mount,
                store,
                status,
                list,
                heading,
                item_template_id: layout.item_template_id.clone(),
                assigned: RefCell::new(Vec::new()),
                items: RefCell::new(Vec::new()),
            }),
        };
        view.configure();
        view.render_content();
        Ok(view)
    }

    pub fn status(&self) -> ProjectStatus {
        self.inner.status
    }

    /// List container the items are rendered into.
    pub fn list_element(&self) -> NodeHandle {
        self.inner.list
    }

    /// Projects rendered by the latest notification.
    pub fn assigned_projects(&self) -> Vec<Project> {
        self.inner.assigned.borrow().clone()
    }

    /// Root element of the rendered item for `id`, if this list shows it.
    pub fn item_element(&self, id: ProjectId) -> Option<NodeHandle> {
        self.inner
            .items
            .borrow()
            .iter()
            .find(|item| item.project().id() == id)
            .map(Component::element)
    }

    fn configure(&self) {
        let document = self.inner.mount.document();
        let element = self.inner.mount.element();
        document.add_event_listener(
            element,
            EventType::DragOver,
            bind_handler(&self.inner, ListInner::drag_over_handler),
        );
        document.add_event_listener(
            element,
            EventType::Drop,
            bind_handler(&self.inner, ListInner::drop_handler),
        );
        document.add_event_listener(
            element,
            EventType::DragLeave,
            bind_handler(&self.inner, ListInner::drag_leave_handler),
        );

        let view = Rc::downgrade(&self.inner);
        self.inner.store.add_listener(move |projects| {
            if let Some(view) = view.upgrade() {
                view.assign(projects);
            }
        });
    }
}

impl Component for ProjectList {
    fn mount(&self) -> &TemplateMount {
        &self.inner.mount
    }

    fn render_content(&self) {
        let inner = &self.inner;
        let document = inner.mount.document();
        document.set_attribute(inner.list, "id", &inner.list_id());
        document.set_text_content(
            inner.heading,
            &format!("{} PROJECTS", inner.status.as_str().to_uppercase()),
        );
    }
}

impl ListInner {
    fn list_id(&self) -> String {
        format!("{}-projects-list", self.status)
    }

    fn assign(&self, projects: &[Project]) {
        let relevant: Vec<Project> = projects
            .iter()
            .filter(|project| project.status() == self.status)
            .cloned()
            .collect();
        *self.assigned.borrow_mut() = relevant;
        self.render_projects();
    }

    fn render_projects(&self) {
        let document = self.mount.document();
        // Items go into this view's own container; its id is not unique when
        // several boards share a page.
        document.clear_children(self.list);

        let assigned = self.assigned.borrow().clone();
        let mut items = Vec::with_capacity(assigned.len());
        for project in assigned {
            let id = project.id();
            match ProjectItem::new(
                Rc::clone(document),
                self.list,
                &self.item_template_id,
                project,
            ) {
                Ok(item) => items.push(item),
                Err(err) => error!(
                    "event=item_render module=component status=error project_id={id} error={err}"
                ),
            }
        }
        debug!(
            "event=list_render module=component status=ok list={} items={}",
            self.status,
            items.len()
        );
        *self.items.borrow_mut() = items;
    }
}

impl DragTarget for ListInner {
    fn drag_over_handler(&self, event: &mut DomEvent) {
        let carries_project = event
            .data_transfer
            .as_ref()
            .is_some_and(|transfer| transfer.types().first() == Some(&DRAG_FORMAT));
        if carries_project {
            event.prevent_default();
            self.mount.document().add_class(self.list, DROPPABLE_CLASS);
        }
    }

    fn drop_handler(&self, event: &mut DomEvent) {
        event.prevent_default();
        let payload = event
            .data_transfer
            .as_ref()
            .and_then(|transfer| transfer.get_data(DRAG_FORMAT))
            .map(str::to_string);

        match payload.as_deref().map(str::trim).map(ProjectId::parse_str) {
            Some(Ok(id)) => {
                info!(
                    "event=drop module=component status=ok project_id={id} list={}",
                    self.status
                );
                self.store.move_project(id, self.status);
            }
            Some(Err(err)) => {
                warn!("event=drop module=component status=skip reason=bad_payload error={err}");
            }
            None => {
                warn!("event=drop module=component status=skip reason=no_payload");
            }
        }

        self.mount.document().remove_class(self.list, DROPPABLE_CLASS);
    }

    fn drag_leave_handler(&self, _event: &mut DomEvent) {
        self.mount.document().remove_class(self.list, DROPPABLE_CLASS);
    }
}
