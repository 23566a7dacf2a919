//! Declarative markup used to seed a `MemoryDocument`.

/// Element or text node description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSpec {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<NodeSpec>,
    },
    Text(String),
}

impl NodeSpec {
    pub fn element(tag: &str) -> Self {
        Self::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Sets an attribute; no-op on text nodes.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        if let Self::Element { attributes, .. } = &mut self {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some(entry) => entry.1 = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Appends one class to the `class` attribute.
    pub fn class(self, class: &str) -> Self {
        let merged = match self.attribute("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.attr("class", &merged)
    }

    /// Appends a child; no-op on text nodes.
    pub fn child(mut self, child: NodeSpec) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            Self::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NodeSpec;

    #[test]
    fn class_merges_into_single_attribute() {
        let spec = NodeSpec::element("SECTION").class("projects").class("wide");
        assert_eq!(spec.attribute("class"), Some("projects wide"));
        match spec {
            NodeSpec::Element { tag, .. } => assert_eq!(tag, "section"),
            NodeSpec::Text(_) => panic!("expected element"),
        }
    }

    #[test]
    fn text_nodes_ignore_attributes_and_children() {
        let spec = NodeSpec::text("hi").id("x").child(NodeSpec::element("p"));
        assert_eq!(spec, NodeSpec::text("hi"));
    }
}
