//! In-process host document.
//!
//! # Responsibility
//! - Provide an arena-backed node tree that implements `HostDocument`.
//! - Dispatch events with bubbling so views can be driven without a browser.
//!
//! # Invariants
//! - Template content is never connected to the document tree.
//! - No `RefCell` borrow is held while an event handler runs.
//! - Removed subtrees return their slots to the arena; re-rendering a view
//!   does not grow the document.
//! - Stale or foreign handles resolve to nothing instead of panicking.

use super::markup::NodeSpec;
use super::{DomEvent, EventHandler, EventType, HostDocument, InsertPosition, NodeHandle, Selector};
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

const ROOT_TAG: &str = "body";
const TEMPLATE_TAG: &str = "template";
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Element(String),
    Text(String),
}

struct NodeData {
    kind: NodeKind,
    attributes: Vec<(String, String)>,
    value: String,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
    template_content: Option<Vec<NodeHandle>>,
    listeners: Vec<(EventType, EventHandler)>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
            template_content: None,
            listeners: Vec::new(),
        }
    }

    fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn classes(&self) -> Vec<String> {
        self.attribute("class")
            .map(|value| value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.tag().is_some() && self.attribute("id") == Some(id.as_str()),
            Selector::Tag(tag) => self.tag() == Some(tag.as_str()),
        }
    }
}

struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

/// Node storage with slot reuse.
#[derive(Default)]
struct Arena {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl Arena {
    fn get(&self, node: NodeHandle) -> Option<&NodeData> {
        self.slots
            .get(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.data.as_ref())
    }

    fn get_mut(&mut self, node: NodeHandle) -> Option<&mut NodeData> {
        self.slots
            .get_mut(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.data.as_mut())
    }

    fn alloc(&mut self, data: NodeData) -> NodeHandle {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.data = Some(data);
                NodeHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    data: Some(data),
                });
                NodeHandle {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Frees `root` and everything below it, template content included.
    fn release(&mut self, root: NodeHandle) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(node.index)
                .filter(|slot| slot.generation == node.generation)
            else {
                continue;
            };
            let Some(data) = slot.data.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(node.index);
            stack.extend(data.children);
            stack.extend(data.template_content.into_iter().flatten());
        }
    }

    /// Makes `child` the last child of `parent`.
    fn adopt(&mut self, parent: NodeHandle, child: NodeHandle) {
        if self.get(parent).is_none() {
            return;
        }
        if let Some(data) = self.get_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.get_mut(parent) {
            data.children.push(child);
        }
    }

    fn detach(&mut self, node: NodeHandle) {
        let parent = self.get_mut(node).and_then(|data| data.parent.take());
        if let Some(parent) = parent.and_then(|parent| self.get_mut(parent)) {
            parent.children.retain(|child| *child != node);
        }
    }

    fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

/// Arena-backed `HostDocument` with a `<body>` root.
pub struct MemoryDocument {
    nodes: RefCell<Arena>,
    body: NodeHandle,
    alerts: RefCell<Vec<String>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        let mut nodes = Arena::default();
        let body = nodes.alloc(NodeData::new(NodeKind::Element(ROOT_TAG.to_string())));
        Self {
            nodes: RefCell::new(nodes),
            body,
            alerts: RefCell::new(Vec::new()),
        }
    }

    pub fn body(&self) -> NodeHandle {
        self.body
    }

    /// Builds a detached subtree from `spec`.
    ///
    /// Children of a `template` element become its content fragment.
    pub fn build(&self, spec: &NodeSpec) -> NodeHandle {
        build_into(&mut self.nodes.borrow_mut(), spec)
    }

    /// Builds `spec` and appends it as the last child of `<body>`.
    pub fn append_to_body(&self, spec: &NodeSpec) -> NodeHandle {
        let node = self.build(spec);
        self.insert(self.body, node, InsertPosition::BeforeEnd);
        node
    }

    /// Appends `<template id=..>` holding `content` to `<body>`.
    pub fn add_template(&self, id: &str, content: Vec<NodeSpec>) -> NodeHandle {
        let spec = content
            .into_iter()
            .fold(NodeSpec::element(TEMPLATE_TAG).id(id), NodeSpec::child);
        self.append_to_body(&spec)
    }

    /// Dispatches `event` at `target`, bubbling through its ancestors.
    ///
    /// Handlers are snapshotted before the first one runs, so DOM changes made
    /// by a handler do not alter who receives this event.
    pub fn dispatch(&self, target: NodeHandle, event: &mut DomEvent) {
        let handlers: Vec<EventHandler> = {
            let nodes = self.nodes.borrow();
            let mut handlers = Vec::new();
            let mut current = Some(target);
            while let Some(node) = current {
                let Some(data) = nodes.get(node) else {
                    break;
                };
                handlers.extend(
                    data.listeners
                        .iter()
                        .filter(|(event_type, _)| *event_type == event.event_type)
                        .map(|(_, handler)| Rc::clone(handler)),
                );
                current = data.parent;
            }
            handlers
        };

        for handler in handlers {
            handler(event);
        }
    }

    /// Messages passed to `alert`, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    /// Live nodes, detached ones and template content included.
    pub fn node_count(&self) -> usize {
        self.nodes.borrow().live()
    }

    pub fn children(&self, node: NodeHandle) -> Vec<NodeHandle> {
        self.read(node, |data| data.children.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.read(node, |data| data.parent).flatten()
    }

    pub fn tag_name(&self, node: NodeHandle) -> Option<String> {
        self.read(node, |data| data.tag().map(str::to_string))
            .flatten()
    }

    /// Whether `node` is reachable from `<body>`.
    pub fn is_connected(&self, node: NodeHandle) -> bool {
        let nodes = self.nodes.borrow();
        if nodes.get(node).is_none() {
            return false;
        }
        let mut current = Some(node);
        while let Some(handle) = current {
            if handle == self.body {
                return true;
            }
            current = nodes.get(handle).and_then(|data| data.parent);
        }
        false
    }

    /// Serializes `node` and its subtree as HTML.
    pub fn outer_html(&self, node: NodeHandle) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        write_html(&nodes, node, &mut out);
        out
    }

    fn read<R>(&self, node: NodeHandle, f: impl FnOnce(&NodeData) -> R) -> Option<R> {
        self.nodes.borrow().get(node).map(f)
    }

    fn write<R>(&self, node: NodeHandle, f: impl FnOnce(&mut NodeData) -> R) -> Option<R> {
        self.nodes.borrow_mut().get_mut(node).map(f)
    }
}

impl HostDocument for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<NodeHandle> {
        let selector = Selector::Id(id.to_string());
        let nodes = self.nodes.borrow();
        if nodes.get(self.body)?.matches(&selector) {
            return Some(self.body);
        }
        find_descendant(&nodes, self.body, &selector)
    }

    fn template_content(&self, template: NodeHandle) -> Option<Vec<NodeHandle>> {
        let content = self.read(template, |data| data.template_content.clone())??;
        let mut nodes = self.nodes.borrow_mut();
        Some(
            content
                .into_iter()
                .filter_map(|node| clone_into(&mut nodes, node))
                .collect(),
        )
    }

    fn is_element(&self, node: NodeHandle) -> bool {
        self.read(node, |data| data.tag().is_some())
            .unwrap_or(false)
    }

    fn query_selector(&self, root: NodeHandle, selector: &Selector) -> Option<NodeHandle> {
        let nodes = self.nodes.borrow();
        nodes.get(root)?;
        find_descendant(&nodes, root, selector)
    }

    fn attribute(&self, node: NodeHandle, name: &str) -> Option<String> {
        self.read(node, |data| data.attribute(name).map(str::to_string))
            .flatten()
    }

    fn set_attribute(&self, node: NodeHandle, name: &str, value: &str) {
        self.write(node, |data| data.set_attribute(name, value));
    }

    fn text_content(&self, node: NodeHandle) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        collect_text(&nodes, node, &mut out);
        out
    }

    fn set_text_content(&self, node: NodeHandle, text: &str) {
        self.clear_children(node);
        if text.is_empty() {
            return;
        }
        let mut nodes = self.nodes.borrow_mut();
        if nodes.get(node).is_none() {
            return;
        }
        let text_node = nodes.alloc(NodeData::new(NodeKind::Text(text.to_string())));
        nodes.adopt(node, text_node);
    }

    fn input_value(&self, node: NodeHandle) -> String {
        self.read(node, |data| data.value.clone())
            .unwrap_or_default()
    }

    fn set_input_value(&self, node: NodeHandle, value: &str) {
        self.write(node, |data| data.value = value.to_string());
    }

    fn insert(&self, host: NodeHandle, node: NodeHandle, position: InsertPosition) {
        let mut nodes = self.nodes.borrow_mut();
        if nodes.get(host).is_none() || nodes.get(node).is_none() || host == node {
            return;
        }
        nodes.detach(node);
        if let Some(data) = nodes.get_mut(node) {
            data.parent = Some(host);
        }
        if let Some(data) = nodes.get_mut(host) {
            match position {
                InsertPosition::AfterBegin => data.children.insert(0, node),
                InsertPosition::BeforeEnd => data.children.push(node),
            }
        }
    }

    fn clear_children(&self, node: NodeHandle) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(data) = nodes.get_mut(node) else {
            return;
        };
        let children = std::mem::take(&mut data.children);
        for child in children {
            nodes.release(child);
        }
    }

    fn remove(&self, node: NodeHandle) {
        if node == self.body {
            return;
        }
        let mut nodes = self.nodes.borrow_mut();
        nodes.detach(node);
        nodes.release(node);
    }

    fn add_class(&self, node: NodeHandle, class: &str) {
        self.write(node, |data| {
            let mut classes = data.classes();
            if !classes.iter().any(|existing| existing == class) {
                classes.push(class.to_string());
                data.set_attribute("class", &classes.join(" "));
            }
        });
    }

    fn remove_class(&self, node: NodeHandle, class: &str) {
        self.write(node, |data| {
            let mut classes = data.classes();
            let before = classes.len();
            classes.retain(|existing| existing != class);
            if classes.len() != before {
                data.set_attribute("class", &classes.join(" "));
            }
        });
    }

    fn has_class(&self, node: NodeHandle, class: &str) -> bool {
        self.read(node, |data| data.classes().iter().any(|existing| existing == class))
            .unwrap_or(false)
    }

    fn add_event_listener(&self, node: NodeHandle, event_type: EventType, handler: EventHandler) {
        self.write(node, |data| data.listeners.push((event_type, handler)));
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

impl Debug for MemoryDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("nodes", &self.nodes.borrow().live())
            .field("alerts", &self.alerts.borrow().len())
            .finish()
    }
}

fn build_into(nodes: &mut Arena, spec: &NodeSpec) -> NodeHandle {
    match spec {
        NodeSpec::Text(text) => nodes.alloc(NodeData::new(NodeKind::Text(text.clone()))),
        NodeSpec::Element {
            tag,
            attributes,
            children,
        } => {
            let mut data = NodeData::new(NodeKind::Element(tag.clone()));
            data.attributes = attributes.clone();
            let handle = nodes.alloc(data);
            let built: Vec<NodeHandle> = children
                .iter()
                .map(|child| build_into(nodes, child))
                .collect();
            if tag == TEMPLATE_TAG {
                if let Some(data) = nodes.get_mut(handle) {
                    data.template_content = Some(built);
                }
            } else {
                for child in built {
                    nodes.adopt(handle, child);
                }
            }
            handle
        }
    }
}

/// Deep clone without listeners, like `importNode(node, true)`.
fn clone_into(nodes: &mut Arena, source: NodeHandle) -> Option<NodeHandle> {
    let (kind, attributes, value, children, template_content) = {
        let data = nodes.get(source)?;
        (
            data.kind.clone(),
            data.attributes.clone(),
            data.value.clone(),
            data.children.clone(),
            data.template_content.clone(),
        )
    };

    let mut data = NodeData::new(kind);
    data.attributes = attributes;
    data.value = value;
    let handle = nodes.alloc(data);

    for child in children {
        if let Some(cloned) = clone_into(nodes, child) {
            nodes.adopt(handle, cloned);
        }
    }
    if let Some(content) = template_content {
        let cloned = content
            .into_iter()
            .filter_map(|node| clone_into(nodes, node))
            .collect();
        if let Some(data) = nodes.get_mut(handle) {
            data.template_content = Some(cloned);
        }
    }
    Some(handle)
}

/// Pre-order search over descendants of `root`, excluding `root` itself.
fn find_descendant(nodes: &Arena, root: NodeHandle, selector: &Selector) -> Option<NodeHandle> {
    let mut stack: Vec<NodeHandle> = nodes.get(root)?.children.iter().rev().copied().collect();
    while let Some(node) = stack.pop() {
        let Some(data) = nodes.get(node) else {
            continue;
        };
        if data.matches(selector) {
            return Some(node);
        }
        stack.extend(data.children.iter().rev().copied());
    }
    None
}

fn collect_text(nodes: &Arena, node: NodeHandle, out: &mut String) {
    let Some(data) = nodes.get(node) else {
        return;
    };
    match &data.kind {
        NodeKind::Text(text) => out.push_str(text),
        NodeKind::Element(_) => {
            for child in &data.children {
                collect_text(nodes, *child, out);
            }
        }
    }
}

fn write_html(nodes: &Arena, node: NodeHandle, out: &mut String) {
    let Some(data) = nodes.get(node) else {
        return;
    };
    match &data.kind {
        NodeKind::Text(text) => out.push_str(&escape_html(text)),
        NodeKind::Element(tag) => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in &data.attributes {
                out.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
            }
            out.push('>');
            if VOID_TAGS.contains(&tag.as_str()) {
                return;
            }
            let content = data.template_content.iter().flatten();
            for child in data.children.iter().chain(content) {
                write_html(nodes, *child, out);
            }
            out.push_str(&format!("</{tag}>"));
        }
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::MemoryDocument;
    use crate::dom::{
        DataTransfer, DomEvent, EventType, HostDocument, InsertPosition, NodeSpec, Selector,
        DRAG_FORMAT,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    fn list_template(doc: &MemoryDocument) -> crate::dom::NodeHandle {
        doc.add_template(
            "project-list",
            vec![NodeSpec::element("section")
                .class("projects")
                .child(NodeSpec::element("header").child(NodeSpec::element("h2")))
                .child(NodeSpec::element("ul"))],
        )
    }

    #[test]
    fn template_content_is_not_connected() {
        let doc = MemoryDocument::new();
        let template = list_template(&doc);

        assert_eq!(doc.element_by_id("project-list"), Some(template));
        assert!(doc.children(template).is_empty());
        assert!(doc
            .query_selector(doc.body(), &Selector::parse("section"))
            .is_none());
    }

    #[test]
    fn template_content_clones_are_fresh_and_detached() {
        let doc = MemoryDocument::new();
        let template = list_template(&doc);

        let first = doc.template_content(template).expect("template content");
        let second = doc.template_content(template).expect("template content");
        assert_eq!(first.len(), 1);
        assert_ne!(first[0], second[0]);
        assert!(!doc.is_connected(first[0]));
        assert_eq!(doc.tag_name(first[0]).as_deref(), Some("section"));
        assert!(doc.query_selector(first[0], &Selector::parse("ul")).is_some());
    }

    #[test]
    fn template_content_is_none_for_plain_elements() {
        let doc = MemoryDocument::new();
        let app = doc.append_to_body(&NodeSpec::element("div").id("app"));
        assert!(doc.template_content(app).is_none());
    }

    #[test]
    fn insert_respects_position_and_moves_existing_nodes() {
        let doc = MemoryDocument::new();
        let app = doc.append_to_body(&NodeSpec::element("div").id("app"));
        let a = doc.build(&NodeSpec::element("p").id("a"));
        let b = doc.build(&NodeSpec::element("p").id("b"));

        doc.insert(app, a, InsertPosition::BeforeEnd);
        doc.insert(app, b, InsertPosition::AfterBegin);
        assert_eq!(doc.children(app), vec![b, a]);

        doc.insert(app, b, InsertPosition::BeforeEnd);
        assert_eq!(doc.children(app), vec![a, b]);
        assert_eq!(doc.element_by_id("b"), Some(b));
    }

    #[test]
    fn text_and_classes_update_in_place() {
        let doc = MemoryDocument::new();
        let heading = doc.append_to_body(&NodeSpec::element("h2").class("title"));

        doc.set_text_content(heading, "ACTIVE PROJECTS");
        doc.add_class(heading, "droppable");
        doc.add_class(heading, "droppable");
        assert_eq!(doc.text_content(heading), "ACTIVE PROJECTS");
        assert_eq!(doc.attribute(heading, "class").as_deref(), Some("title droppable"));

        doc.remove_class(heading, "droppable");
        assert!(!doc.has_class(heading, "droppable"));
        assert_eq!(
            doc.outer_html(heading),
            "<h2 class=\"title\">ACTIVE PROJECTS</h2>"
        );
    }

    #[test]
    fn dispatch_bubbles_from_target_to_ancestors() {
        let doc = MemoryDocument::new();
        let section = doc.append_to_body(
            &NodeSpec::element("section").child(NodeSpec::element("ul").child(NodeSpec::element("li"))),
        );
        let item = doc
            .query_selector(section, &Selector::parse("li"))
            .expect("li present");
        let order = Rc::new(RefCell::new(Vec::new()));

        let seen = Rc::clone(&order);
        doc.add_event_listener(
            section,
            EventType::Drop,
            Rc::new(move |event: &mut DomEvent| {
                seen.borrow_mut().push("section");
                event.prevent_default();
            }),
        );
        let seen = Rc::clone(&order);
        doc.add_event_listener(
            item,
            EventType::Drop,
            Rc::new(move |_: &mut DomEvent| seen.borrow_mut().push("li")),
        );
        let seen = Rc::clone(&order);
        doc.add_event_listener(
            item,
            EventType::DragOver,
            Rc::new(move |_: &mut DomEvent| seen.borrow_mut().push("ignored")),
        );

        let mut transfer = DataTransfer::new();
        transfer.set_data(DRAG_FORMAT, "id");
        let mut event = DomEvent::drag(EventType::Drop, transfer);
        doc.dispatch(item, &mut event);

        assert_eq!(*order.borrow(), vec!["li", "section"]);
        assert!(event.is_default_prevented());
    }

    #[test]
    fn handler_may_mutate_document_during_dispatch() {
        let doc = Rc::new(MemoryDocument::new());
        let list = doc.append_to_body(&NodeSpec::element("ul").child(NodeSpec::element("li")));
        let weak = Rc::downgrade(&doc);
        doc.add_event_listener(
            list,
            EventType::Drop,
            Rc::new(move |_: &mut DomEvent| {
                if let Some(doc) = weak.upgrade() {
                    doc.clear_children(list);
                }
            }),
        );

        doc.dispatch(list, &mut DomEvent::new(EventType::Drop));
        assert!(doc.children(list).is_empty());
    }

    #[test]
    fn cleared_subtrees_return_their_slots() {
        let doc = MemoryDocument::new();
        let template = list_template(&doc);
        let host = doc.append_to_body(&NodeSpec::element("ul"));

        let render = || {
            doc.clear_children(host);
            for node in doc.template_content(template).expect("template content") {
                doc.insert(host, node, InsertPosition::BeforeEnd);
            }
        };
        render();
        let settled = doc.node_count();
        for _ in 0..50 {
            render();
        }

        assert_eq!(doc.node_count(), settled);
        assert_eq!(doc.children(host).len(), 1);
    }

    #[test]
    fn stale_handles_do_not_alias_reused_slots() {
        let doc = MemoryDocument::new();
        let host = doc.append_to_body(&NodeSpec::element("ul"));
        let old = doc.build(&NodeSpec::element("li").id("old"));
        doc.insert(host, old, InsertPosition::BeforeEnd);

        doc.clear_children(host);
        let fresh = doc.build(&NodeSpec::element("li").id("fresh"));

        assert_ne!(old, fresh);
        assert!(doc.tag_name(old).is_none());
        assert!(doc.attribute(old, "id").is_none());
        assert_eq!(doc.attribute(fresh, "id").as_deref(), Some("fresh"));
        doc.set_attribute(old, "id", "ghost");
        assert!(doc.element_by_id("ghost").is_none());
    }

    #[test]
    fn remove_detaches_and_releases_subtree() {
        let doc = MemoryDocument::new();
        let before = doc.node_count();
        let list = doc.append_to_body(
            &NodeSpec::element("ul").child(NodeSpec::element("li").child(NodeSpec::text("x"))),
        );
        assert_eq!(doc.node_count(), before + 3);

        doc.remove(list);
        assert_eq!(doc.node_count(), before);
        assert!(doc.children(doc.body()).is_empty());

        doc.remove(doc.body());
        assert!(doc.is_connected(doc.body()));
    }
}
