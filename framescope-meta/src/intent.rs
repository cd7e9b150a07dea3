//! Declarative intent trees written by frame authors.

use std::fmt;

use crate::decoder::PROPERTY_BUTTON;
use crate::tags::{render_meta, MetaTag};

/// A meta tag waiting to be emitted.
///
/// Button leaves are provisional: they carry the bare `fc:frame:button`
/// property and their display text in `children` until the encoder numbers
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaDescriptor {
    pub property: String,
    pub content: Option<String>,
    /// Visible children; becomes `content` once a button is numbered
    pub children: Option<String>,
}

impl MetaDescriptor {
    pub fn new(property: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            content: Some(content.into()),
            children: None,
        }
    }

    /// True for a button leaf that has not been numbered yet.
    pub fn is_provisional_button(&self) -> bool {
        self.property == PROPERTY_BUTTON
    }

    pub fn to_html(&self) -> String {
        render_meta(&self.property, self.content.as_deref().unwrap_or(""))
    }

    pub fn to_meta_tag(&self) -> MetaTag {
        match &self.content {
            Some(content) => MetaTag::new(self.property.clone(), content.clone()),
            None => MetaTag::without_content(self.property.clone()),
        }
    }
}

/// Zero-argument computation producing an intent node.
pub type DeferredIntent = Box<dyn Fn() -> IntentNode + Send + Sync>;

/// A node of an intent tree.
pub enum IntentNode {
    Tag(MetaDescriptor),
    Deferred(DeferredIntent),
    /// Sibling subtrees, emitted in order
    Group(Vec<IntentNode>),
}

impl fmt::Debug for IntentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentNode::Tag(descriptor) => f.debug_tuple("Tag").field(descriptor).finish(),
            IntentNode::Deferred(_) => f.write_str("Deferred(..)"),
            IntentNode::Group(children) => f.debug_tuple("Group").field(children).finish(),
        }
    }
}

impl From<MetaDescriptor> for IntentNode {
    fn from(descriptor: MetaDescriptor) -> Self {
        IntentNode::Tag(descriptor)
    }
}

/// The intents a frame handler returns: one bare node or a sequence.
#[derive(Debug)]
pub enum Intents {
    Single(IntentNode),
    Sequence(Vec<IntentNode>),
}

impl Intents {
    pub fn into_nodes(self) -> Vec<IntentNode> {
        match self {
            Intents::Single(node) => vec![node],
            Intents::Sequence(nodes) => nodes,
        }
    }
}

impl From<IntentNode> for Intents {
    fn from(node: IntentNode) -> Self {
        Intents::Single(node)
    }
}

impl From<Vec<IntentNode>> for Intents {
    fn from(nodes: Vec<IntentNode>) -> Self {
        Intents::Sequence(nodes)
    }
}

/// A button leaf showing `text`.
pub fn button(text: impl Into<String>) -> IntentNode {
    IntentNode::Tag(MetaDescriptor {
        property: PROPERTY_BUTTON.to_string(),
        content: None,
        children: Some(text.into()),
    })
}

/// A plain meta tag leaf.
pub fn meta(property: impl Into<String>, content: impl Into<String>) -> IntentNode {
    IntentNode::Tag(MetaDescriptor::new(property, content))
}

/// Groups `children` into one subtree.
pub fn group(children: Vec<IntentNode>) -> IntentNode {
    IntentNode::Group(children)
}

/// A node computed when the encoder reaches it.
pub fn deferred<F>(f: F) -> IntentNode
where
    F: Fn() -> IntentNode + Send + Sync + 'static,
{
    IntentNode::Deferred(Box::new(f))
}
