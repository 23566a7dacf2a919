//! Templated UI components.
//!
//! # Responsibility
//! - Instantiate a component root from a page template and attach it to a host.
//! - Define the render hook and the drag-and-drop roles components implement.
//!
//! # Invariants
//! - Missing templates, hosts or required sub-elements abort construction.
//! - `render_content` runs exactly once, at the end of construction.
//! - Registered event handlers hold weak references to their component, so a
//!   dropped component stops reacting instead of being kept alive by the page.

pub mod project_input;
pub mod project_item;
pub mod project_list;

use crate::dom::{DomEvent, EventHandler, HostDocument, InsertPosition, NodeHandle, Selector};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Page structure problems found while building a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// No element carries the template id.
    TemplateNotFound(String),
    /// The id resolves to an element that is not a template.
    NotATemplate(String),
    /// The template content has no element child.
    EmptyTemplate(String),
    /// No element carries the host id.
    HostNotFound(String),
    /// A sub-element the component binds to is absent from its root.
    MissingElement {
        component: &'static str,
        selector: String,
    },
}

impl Display for ComponentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TemplateNotFound(id) => write!(f, "template not found: #{id}"),
            Self::NotATemplate(id) => write!(f, "element is not a template: #{id}"),
            Self::EmptyTemplate(id) => write!(f, "template has no element content: #{id}"),
            Self::HostNotFound(id) => write!(f, "host element not found: #{id}"),
            Self::MissingElement {
                component,
                selector,
            } => write!(f, "{component} is missing required element `{selector}`"),
        }
    }
}

impl Error for ComponentError {}

/// Element a component is inserted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountHost<'a> {
    /// First connected element with this id.
    Id(&'a str),
    /// A node the caller already holds, such as a parent view's list.
    Node(NodeHandle),
}

impl MountHost<'_> {
    fn resolve(&self, document: &dyn HostDocument) -> Result<NodeHandle, ComponentError> {
        match self {
            Self::Id(id) => document
                .element_by_id(id)
                .ok_or_else(|| ComponentError::HostNotFound((*id).to_string())),
            Self::Node(node) => Ok(*node),
        }
    }
}

impl Display for MountHost<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Node(node) => write!(f, "node:{}", node.index),
        }
    }
}

/// Where a component comes from and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec<'a> {
    pub template_id: &'a str,
    pub host: MountHost<'a>,
    /// `true` inserts as the host's first child, `false` appends.
    pub insert_at_start: bool,
    /// Id assigned to the produced root element.
    pub new_element_id: Option<String>,
}

/// Shared templated-instantiation helper held by every component.
pub struct TemplateMount {
    document: Rc<dyn HostDocument>,
    template: NodeHandle,
    host: NodeHandle,
    element: NodeHandle,
}

impl TemplateMount {
    /// Clones the template's first element and inserts it into the host.
    pub fn attach(
        document: Rc<dyn HostDocument>,
        spec: &MountSpec<'_>,
    ) -> Result<Self, ComponentError> {
        let template = document
            .element_by_id(spec.template_id)
            .ok_or_else(|| ComponentError::TemplateNotFound(spec.template_id.to_string()))?;
        let host = spec.host.resolve(document.as_ref())?;
        let content = document
            .template_content(template)
            .ok_or_else(|| ComponentError::NotATemplate(spec.template_id.to_string()))?;
        let mut element = None;
        for node in content {
            if element.is_none() && document.is_element(node) {
                element = Some(node);
            } else {
                document.remove(node);
            }
        }
        let element =
            element.ok_or_else(|| ComponentError::EmptyTemplate(spec.template_id.to_string()))?;

        if let Some(id) = &spec.new_element_id {
            document.set_attribute(element, "id", id);
        }
        document.insert(
            host,
            element,
            InsertPosition::from_insert_at_start(spec.insert_at_start),
        );

        debug!(
            "event=component_mount module=component status=ok template={} host={} at_start={}",
            spec.template_id, spec.host, spec.insert_at_start
        );

        Ok(Self {
            document,
            template,
            host,
            element,
        })
    }

    pub fn document(&self) -> &Rc<dyn HostDocument> {
        &self.document
    }

    pub fn template(&self) -> NodeHandle {
        self.template
    }

    pub fn host(&self) -> NodeHandle {
        self.host
    }

    /// Root element produced from the template.
    pub fn element(&self) -> NodeHandle {
        self.element
    }

    /// Finds a required sub-element of the root.
    pub fn select(
        &self,
        component: &'static str,
        selector: &str,
    ) -> Result<NodeHandle, ComponentError> {
        let parsed = Selector::parse(selector);
        self.document
            .query_selector(self.element, &parsed)
            .ok_or_else(|| ComponentError::MissingElement {
                component,
                selector: parsed.to_string(),
            })
    }
}

/// A UI component built from a `TemplateMount`.
pub trait Component {
    fn mount(&self) -> &TemplateMount;

    /// Populates the root's inner structure.
    fn render_content(&self);

    fn element(&self) -> NodeHandle {
        self.mount().element()
    }
}

/// Drag source role.
pub trait Draggable {
    fn drag_start_handler(&self, event: &mut DomEvent);
    fn drag_end_handler(&self, event: &mut DomEvent);
}

/// Drop target role.
pub trait DragTarget {
    fn drag_over_handler(&self, event: &mut DomEvent);
    fn drop_handler(&self, event: &mut DomEvent);
    fn drag_leave_handler(&self, event: &mut DomEvent);
}

/// Binds `handler` to `owner` once, for registration as an event listener.
///
/// The returned handler resolves against this exact owner no matter how the
/// host invokes it, and does nothing once the owner has been dropped.
pub(crate) fn bind_handler<T: 'static>(owner: &Rc<T>, handler: fn(&T, &mut DomEvent)) -> EventHandler {
    let owner = Rc::downgrade(owner);
    Rc::new(move |event: &mut DomEvent| {
        if let Some(owner) = owner.upgrade() {
            handler(&owner, event);
        }
    })
}
