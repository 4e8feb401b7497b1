use serde::{Deserialize, Serialize};

/// Structured markup template of a block type.
///
/// Templates are trees with named insertion points instead of markup
/// strings: substitution targets a `Slot` or `Repeat` node directly, so a
/// property can never partially match or corrupt surrounding markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateNode {
    /// A markup element with static classes and attributes.
    Element {
        tag: String,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        classes: Vec<String>,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attributes: Vec<(String, String)>,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<TemplateNode>,
    },

    /// Static text content.
    Text { content: String },

    /// Text insertion point bound to a property key. Renders the property
    /// value if set, the fallback otherwise.
    Slot {
        property: String,

        #[serde(default, skip_serializing_if = "String::is_empty")]
        fallback: String,
    },

    /// Repeated sub-item: the item is rendered N times, where N is the
    /// numeric value of the bound property.
    Repeat {
        property: String,
        item: Box<TemplateNode>,
    },

    /// One-based index of the enclosing `Repeat` iteration.
    Index,
}

impl TemplateNode {
    pub fn element(tag: &str) -> Self {
        TemplateNode::Element {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        if let TemplateNode::Element { classes, .. } = &mut self {
            classes.push(class.to_string());
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        if let TemplateNode::Element { attributes, .. } = &mut self {
            attributes.push((name.to_string(), value.to_string()));
        }
        self
    }

    pub fn child(mut self, node: TemplateNode) -> Self {
        if let TemplateNode::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn text(content: &str) -> Self {
        TemplateNode::Text {
            content: content.to_string(),
        }
    }

    pub fn slot(property: &str, fallback: &str) -> Self {
        TemplateNode::Slot {
            property: property.to_string(),
            fallback: fallback.to_string(),
        }
    }

    pub fn repeat(property: &str, item: TemplateNode) -> Self {
        TemplateNode::Repeat {
            property: property.to_string(),
            item: Box::new(item),
        }
    }

    /// Collect every property key referenced by a `Slot` or `Repeat` node.
    pub fn bound_properties(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_bound(&mut out);
        out
    }

    fn collect_bound(&self, out: &mut Vec<String>) {
        match self {
            TemplateNode::Element { children, .. } => {
                for child in children {
                    child.collect_bound(out);
                }
            }
            TemplateNode::Slot { property, .. } => {
                if !out.contains(property) {
                    out.push(property.clone());
                }
            }
            TemplateNode::Repeat { property, item } => {
                if !out.contains(property) {
                    out.push(property.clone());
                }
                item.collect_bound(out);
            }
            TemplateNode::Text { .. } | TemplateNode::Index => {}
        }
    }
}
