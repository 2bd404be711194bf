//! Pure slide rendering into a small view tree.

use deckview_common::Slide;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Slide,
    Heading,
    Subtitle,
    BulletList,
    Bullet,
    Example,
    Message,
}

/// A node of rendered output, independent of any live surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    pub kind: NodeKind,
    pub text: Option<String>,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn container(kind: NodeKind, children: Vec<ViewNode>) -> Self {
        Self {
            kind,
            text: None,
            children,
        }
    }

    pub fn leaf(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Message, text)
    }

    /// Concatenated text of this node and its descendants, depth first.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// First descendant (or self) of the given kind.
    pub fn find(&self, kind: NodeKind) -> Option<&ViewNode> {
        if self.kind == kind {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(kind))
    }
}

/// Heading (always present), then subtitle, bullets and example when non-empty.
pub fn render_slide(slide: &Slide) -> ViewNode {
    let mut children = vec![ViewNode::leaf(
        NodeKind::Heading,
        slide.title().unwrap_or_default(),
    )];

    if let Some(subtitle) = slide.subtitle() {
        children.push(ViewNode::leaf(NodeKind::Subtitle, subtitle));
    }

    if !slide.bullets.is_empty() {
        let items = slide
            .bullets
            .iter()
            .map(|b| ViewNode::leaf(NodeKind::Bullet, b.as_str()))
            .collect();
        children.push(ViewNode::container(NodeKind::BulletList, items));
    }

    if let Some(example) = slide.example() {
        children.push(ViewNode::leaf(NodeKind::Example, example));
    }

    ViewNode::container(NodeKind::Slide, children)
}
