//! Board wiring.
//!
//! # Responsibility
//! - Create the one store instance and hand it to every component.
//! - Build the default page markup for the in-process host.

use crate::component::project_input::ProjectInput;
use crate::component::project_list::ProjectList;
use crate::component::ComponentError;
use crate::config::PageLayout;
use crate::dom::{HostDocument, MemoryDocument, NodeSpec};
use crate::model::project::ProjectStatus;
use crate::state::store::ProjectStore;
use log::info;
use std::rc::Rc;

/// Mounted board: input form plus one list per status partition.
pub struct ProjectBoard {
    store: Rc<ProjectStore>,
    input: ProjectInput,
    active: ProjectList,
    finished: ProjectList,
}

impl ProjectBoard {
    /// Mounts the form and both lists into `document`.
    ///
    /// Fails on the first missing template or mount point.
    pub fn mount(
        document: Rc<dyn HostDocument>,
        layout: &PageLayout,
    ) -> Result<Self, ComponentError> {
        let store = Rc::new(ProjectStore::new());
        let input = ProjectInput::new(Rc::clone(&document), Rc::clone(&store), layout)?;
        let active = ProjectList::new(
            Rc::clone(&document),
            Rc::clone(&store),
            layout,
            ProjectStatus::Active,
        )?;
        let finished = ProjectList::new(document, Rc::clone(&store), layout, ProjectStatus::Finished)?;

        info!(
            "event=board_mount module=app status=ok listeners={}",
            store.listener_count()
        );

        Ok(Self {
            store,
            input,
            active,
            finished,
        })
    }

    pub fn store(&self) -> &Rc<ProjectStore> {
        &self.store
    }

    pub fn input(&self) -> &ProjectInput {
        &self.input
    }

    pub fn list(&self, status: ProjectStatus) -> &ProjectList {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }
}

/// Builds a page with the board's templates and mount points.
///
/// One mount point is created when form and lists share a host id.
pub fn standard_document(layout: &PageLayout) -> Rc<MemoryDocument> {
    let document = Rc::new(MemoryDocument::new());

    document.add_template(&layout.input_template_id, vec![input_form_markup()]);
    document.add_template(
        &layout.list_template_id,
        vec![NodeSpec::element("section")
            .class("projects")
            .child(NodeSpec::element("header").child(NodeSpec::element("h2")))
            .child(NodeSpec::element("ul"))],
    );
    document.add_template(
        &layout.item_template_id,
        vec![NodeSpec::element("li")
            .child(NodeSpec::element("h2"))
            .child(NodeSpec::element("h3"))
            .child(NodeSpec::element("p"))],
    );

    document.append_to_body(&NodeSpec::element("div").id(&layout.input_host_id));
    if layout.list_host_id != layout.input_host_id {
        document.append_to_body(&NodeSpec::element("div").id(&layout.list_host_id));
    }
    document
}

fn input_form_markup() -> NodeSpec {
    let control = |label: &str, field: NodeSpec| {
        NodeSpec::element("div")
            .class("form-control")
            .child(NodeSpec::element("label").child(NodeSpec::text(label)))
            .child(field)
    };

    NodeSpec::element("form")
        .child(control(
            "Title",
            NodeSpec::element("input").attr("type", "text").id("title"),
        ))
        .child(control(
            "Description",
            NodeSpec::element("textarea").id("description").attr("rows", "3"),
        ))
        .child(control(
            "People",
            NodeSpec::element("input")
                .attr("type", "number")
                .id("people")
                .attr("step", "1")
                .attr("min", "0")
                .attr("max", "10"),
        ))
        .child(
            NodeSpec::element("button")
                .attr("type", "submit")
                .child(NodeSpec::text("ADD PROJECT")),
        )
}
