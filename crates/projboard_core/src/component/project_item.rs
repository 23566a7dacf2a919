//! Draggable single-project view.

use crate::component::{bind_handler, Component, ComponentError, Draggable, MountHost, MountSpec, TemplateMount};
use crate::dom::{DomEvent, DropEffect, EventType, HostDocument, NodeHandle, DRAG_FORMAT};
use crate::model::project::Project;
use log::debug;
use std::rc::Rc;

const COMPONENT: &str = "ProjectItem";

/// Renders one project as a draggable list entry.
pub struct ProjectItem {
    inner: Rc<ItemInner>,
}

struct ItemInner {
    mount: TemplateMount,
    project: Project,
    title: NodeHandle,
    people: NodeHandle,
    description: NodeHandle,
}

impl ProjectItem {
    /// Appends an item for `project` to `host`.
    pub fn new(
        document: Rc<dyn HostDocument>,
        host: NodeHandle,
        template_id: &str,
        project: Project,
    ) -> Result<Self, ComponentError> {
        let mount = TemplateMount::attach(
            document,
            &MountSpec {
                template_id,
                host: MountHost::Node(host),
                insert_at_start: false,
                new_element_id: Some(project.id().to_string()),
            },
        )?;
        let title = mount.select(COMPONENT, "h2")?;
        let people = mount.select(COMPONENT, "h3")?;
        let description = mount.select(COMPONENT, "p")?;

        let item = Self {
            inner: Rc::new(ItemInner {
                mount,
                project,
                title,
                people,
                description,
            }),
        };
        item.configure();
        item.render_content();
        Ok(item)
    }

    pub fn project(&self) -> &Project {
        &self.inner.project
    }

    fn configure(&self) {
        let document = self.inner.mount.document();
        let element = self.inner.mount.element();
        document.add_event_listener(
            element,
            EventType::DragStart,
            bind_handler(&self.inner, ItemInner::drag_start_handler),
        );
        document.add_event_listener(
            element,
            EventType::DragEnd,
            bind_handler(&self.inner, ItemInner::drag_end_handler),
        );
    }
}

impl Component for ProjectItem {
    fn mount(&self) -> &TemplateMount {
        &self.inner.mount
    }

    fn render_content(&self) {
        let inner = &self.inner;
        let document = inner.mount.document();
        document.set_attribute(inner.mount.element(), "draggable", "true");
        document.set_text_content(inner.title, inner.project.title());
        document.set_text_content(
            inner.people,
            &format!("{} assigned", inner.project.persons()),
        );
        document.set_text_content(inner.description, inner.project.description());
    }
}

impl Draggable for ItemInner {
    fn drag_start_handler(&self, event: &mut DomEvent) {
        let id = self.project.id();
        match event.data_transfer.as_mut() {
            Some(transfer) => {
                transfer.set_data(DRAG_FORMAT, id.to_string());
                transfer.effect_allowed = Some(DropEffect::Move);
                debug!("event=drag_start module=component status=ok project_id={id}");
            }
            None => {
                debug!("event=drag_start module=component status=skip reason=no_transfer project_id={id}");
            }
        }
    }

    fn drag_end_handler(&self, _event: &mut DomEvent) {
        debug!(
            "event=drag_end module=component status=ok project_id={}",
            self.project.id()
        );
    }
}
