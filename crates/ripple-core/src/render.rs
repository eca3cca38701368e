use crate::error::{Error, Result};
use crate::widget::WidgetRef;
use crate::{Rect, Vec2};

/// A positioned widget with its children, as produced by a layout pass and
/// walked by the dispatchers.
#[derive(Clone, Default)]
pub struct RenderNode {
    pub widget: Option<WidgetRef>,
    pub bounds: Rect,
    pub children: Vec<RenderNode>,
}

impl std::fmt::Debug for RenderNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderNode")
            .field("widget", &self.widget.is_some())
            .field("bounds", &self.bounds)
            .field("children", &self.children)
            .finish()
    }
}

impl RenderNode {
    pub fn new(widget: WidgetRef, bounds: Rect) -> Self {
        Self {
            widget: Some(widget),
            bounds,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: RenderNode) -> Self {
        self.children.push(child);
        self
    }

    /// Clears the widget back-reference and children, keeping the node's
    /// storage for reuse.
    pub fn clear(&mut self) {
        self.widget = None;
        self.bounds = Rect::ZERO;
        self.children.clear();
    }
}

/// Finds the top-most widget under `pos`.
///
/// Children are visited back to front before their parent, so the last
/// child wins. A node whose widget is hidden or disabled prunes its whole
/// subtree, and so does a node whose bounds do not contain `pos`. Every
/// node must carry a widget.
pub fn hit_test(node: &RenderNode, pos: Vec2) -> Result<Option<WidgetRef>> {
    let Some(widget) = &node.widget else {
        return Err(Error::InvalidArgument);
    };

    if widget.borrow().flags().blocks_hit() {
        return Ok(None);
    }

    node.bounds.validate()?;
    if !node.bounds.contains(pos) {
        return Ok(None);
    }

    for child in node.children.iter().rev() {
        if let Some(hit) = hit_test(child, pos)? {
            return Ok(Some(hit));
        }
    }

    Ok(Some(widget.clone()))
}
