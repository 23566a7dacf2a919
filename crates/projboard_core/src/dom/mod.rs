//! Host document capability consumed by components.
//!
//! # Responsibility
//! - Describe the DOM operations the board needs as one object-safe trait.
//! - Define the event and drag-transfer shapes shared by hosts and views.
//!
//! # Invariants
//! - Components never touch a document except through `HostDocument`.
//! - Handles are opaque; only the issuing host can interpret them.
//!
//! # See also
//! - `memory::MemoryDocument` for the in-process host.

pub mod markup;
pub mod memory;

pub use markup::NodeSpec;
pub use memory::MemoryDocument;

use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Drag-data format carrying a project id.
pub const DRAG_FORMAT: &str = "text/plain";

/// Opaque node reference issued by a `HostDocument`.
///
/// The generation tells a released slot apart from the node that later
/// reuses it, so a stale handle resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

/// Where `HostDocument::insert` places a node inside its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// First child of the host.
    AfterBegin,
    /// Last child of the host.
    BeforeEnd,
}

impl InsertPosition {
    pub fn from_insert_at_start(insert_at_start: bool) -> Self {
        if insert_at_start {
            Self::AfterBegin
        } else {
            Self::BeforeEnd
        }
    }
}

/// Minimal selector grammar: `#id` or a bare tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Tag(String),
}

impl Selector {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.strip_prefix('#') {
            Some(id) => Self::Id(id.to_string()),
            None => Self::Tag(trimmed.to_ascii_lowercase()),
        }
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

/// User-input events the board reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Submit,
    DragStart,
    DragEnd,
    DragOver,
    DragLeave,
    Drop,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::DragStart => "dragstart",
            Self::DragEnd => "dragend",
            Self::DragOver => "dragover",
            Self::DragLeave => "dragleave",
            Self::Drop => "drop",
        }
    }
}

/// Drag operation permitted by the drag source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    None,
    Copy,
    Link,
    Move,
}

/// Drag-data channel attached to drag events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    /// `None` until a drag source sets it.
    pub effect_allowed: Option<DropEffect>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `format`, replacing any previous value in place.
    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        let data = data.into();
        match self.entries.iter_mut().find(|(key, _)| key == format) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((format.to_string(), data)),
        }
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == format)
            .map(|(_, data)| data.as_str())
    }

    /// Formats in the order they were first set.
    pub fn types(&self) -> Vec<&str> {
        self.entries.iter().map(|(key, _)| key.as_str()).collect()
    }
}

/// One dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub event_type: EventType,
    pub data_transfer: Option<DataTransfer>,
    default_prevented: bool,
}

impl DomEvent {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            data_transfer: None,
            default_prevented: false,
        }
    }

    /// Creates a drag event carrying `data_transfer`.
    pub fn drag(event_type: EventType, data_transfer: DataTransfer) -> Self {
        Self {
            event_type,
            data_transfer: Some(data_transfer),
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Listener registered on a node.
pub type EventHandler = Rc<dyn Fn(&mut DomEvent)>;

/// DOM operations the board consumes from its host page.
pub trait HostDocument {
    /// Finds a connected element by id, in document order.
    fn element_by_id(&self, id: &str) -> Option<NodeHandle>;
    /// Deep-clones a template's content as detached top-level nodes.
    ///
    /// Returns `None` when `template` is not a template element.
    fn template_content(&self, template: NodeHandle) -> Option<Vec<NodeHandle>>;
    fn is_element(&self, node: NodeHandle) -> bool;
    /// First descendant of `root` matching `selector`, in document order.
    fn query_selector(&self, root: NodeHandle, selector: &Selector) -> Option<NodeHandle>;
    fn attribute(&self, node: NodeHandle, name: &str) -> Option<String>;
    fn set_attribute(&self, node: NodeHandle, name: &str, value: &str);
    fn text_content(&self, node: NodeHandle) -> String;
    fn set_text_content(&self, node: NodeHandle, text: &str);
    fn input_value(&self, node: NodeHandle) -> String;
    fn set_input_value(&self, node: NodeHandle, value: &str);
    /// Moves `node` into `host` at `position`.
    fn insert(&self, host: NodeHandle, node: NodeHandle, position: InsertPosition);
    /// Removes every child of `node`. Handles into the removed subtrees
    /// become invalid.
    fn clear_children(&self, node: NodeHandle);
    /// Detaches `node` and releases its subtree.
    fn remove(&self, node: NodeHandle);
    fn add_class(&self, node: NodeHandle, class: &str);
    fn remove_class(&self, node: NodeHandle, class: &str);
    fn has_class(&self, node: NodeHandle, class: &str) -> bool;
    fn add_event_listener(&self, node: NodeHandle, event_type: EventType, handler: EventHandler);
    /// Blocking user notification.
    fn alert(&self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::{DataTransfer, InsertPosition, Selector, DRAG_FORMAT};

    #[test]
    fn selector_parses_ids_and_tags() {
        assert_eq!(Selector::parse("#title"), Selector::Id("title".to_string()));
        assert_eq!(Selector::parse(" UL "), Selector::Tag("ul".to_string()));
        assert_eq!(Selector::from("h2").to_string(), "h2");
    }

    #[test]
    fn data_transfer_replaces_existing_format() {
        let mut transfer = DataTransfer::new();
        transfer.set_data(DRAG_FORMAT, "a");
        transfer.set_data("text/uri-list", "b");
        transfer.set_data(DRAG_FORMAT, "c");

        assert_eq!(transfer.types(), vec![DRAG_FORMAT, "text/uri-list"]);
        assert_eq!(transfer.get_data(DRAG_FORMAT), Some("c"));
        assert_eq!(transfer.get_data("application/json"), None);
    }

    #[test]
    fn insert_position_follows_flag() {
        assert_eq!(
            InsertPosition::from_insert_at_start(true),
            InsertPosition::AfterBegin
        );
        assert_eq!(
            InsertPosition::from_insert_at_start(false),
            InsertPosition::BeforeEnd
        );
    }
}
