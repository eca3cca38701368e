//! # Layout model
//!
//! A small flexbox solver over an owned tree of [`LayoutNode`]s. Each node
//! has a [`LayoutStyle`] and, for leaves, an optional measure callback.
//!
//! [`compute`] runs two passes:
//!
//! - **Measure** (bottom-up). Every node is measured exactly once against a
//!   pair of [`MeasureSpec`]s. Containers hand `AtMost(inner)` to their
//!   children when their own size is bounded, `Unspecified` otherwise, then
//!   pack children into lines along the main axis.
//! - **Layout** (top-down). Each node receives its final rect; containers
//!   rebuild the same lines from the measured sizes and distribute free
//!   space along the main axis (`align_main`) and within each line on the
//!   cross axis (`align_cross`).
//!
//! Style vocabulary comes from `taffy`, restricted to what the solver
//! supports:
//!
//! | field         | accepted variants                                            |
//! |---------------|--------------------------------------------------------------|
//! | `direction`   | `Row`, `Column`                                              |
//! | `wrap`        | `NoWrap`, `Wrap`                                             |
//! | `align_main`  | `Start`, `Center`, `End`, `SpaceBetween`, `SpaceAround`, `SpaceEvenly` |
//! | `align_cross` | `Start`, `Center`, `End`, `Stretch`                          |
//!
//! Anything else is [`Error::InvalidArgument`].
//!
//! Under [`TextDirection::Rtl`] `padding.left` binds to the right edge and
//! `padding.right` to the left one, rows pack from the right edge inward and
//! columns stack their lines from the right.
//!
//! ```rust
//! use ripple_core::*;
//!
//! let mut root = LayoutNode::new(LayoutStyle::row().padding(PaddingValues::all(4.0)))?
//!     .with_child(LayoutNode::fixed(10.0, 10.0))
//!     .with_child(LayoutNode::fixed(20.0, 5.0));
//!
//! compute(&mut root, TextDirection::Ltr, MeasureSpec::Unspecified, MeasureSpec::Unspecified)?;
//! assert_eq!(root.measured(), Size::new(38.0, 18.0));
//! assert_eq!(root.children()[1].layout(), Rect::new(14.0, 4.0, 20.0, 5.0));
//! # Ok::<(), ripple_core::Error>(())
//! ```

use smallvec::SmallVec;
use taffy::{AlignItems, FlexDirection, FlexWrap, JustifyContent};

use crate::error::{Error, Result};
use crate::widget::WidgetRef;
use crate::{PaddingValues, Rect, Size};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Constraint handed down during measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MeasureSpec {
    #[default]
    Unspecified,
    Exactly(f32),
    AtMost(f32),
}

impl MeasureSpec {
    pub fn validate(self) -> Result<()> {
        match self {
            MeasureSpec::Unspecified => Ok(()),
            MeasureSpec::Exactly(s) | MeasureSpec::AtMost(s) => {
                if s >= 0.0 && s.is_finite() {
                    Ok(())
                } else {
                    Err(Error::Range)
                }
            }
        }
    }

    /// Resolves a desired size against this constraint.
    pub fn apply(self, size: f32) -> f32 {
        match self {
            MeasureSpec::Unspecified => size,
            MeasureSpec::Exactly(s) => s,
            MeasureSpec::AtMost(s) => size.min(s),
        }
    }

    /// Upper bound, if any.
    pub fn bound(self) -> Option<f32> {
        match self {
            MeasureSpec::Unspecified => None,
            MeasureSpec::Exactly(s) | MeasureSpec::AtMost(s) => Some(s),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutStyle {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub align_main: JustifyContent,
    pub align_cross: AlignItems,
    pub padding: PaddingValues,
    /// `None` sizes to content.
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            direction: FlexDirection::Row,
            wrap: FlexWrap::NoWrap,
            align_main: JustifyContent::Start,
            align_cross: AlignItems::Start,
            padding: PaddingValues::default(),
            width: None,
            height: None,
        }
    }
}

impl LayoutStyle {
    pub fn row() -> Self {
        Self::default()
    }

    pub fn column() -> Self {
        Self {
            direction: FlexDirection::Column,
            ..Self::default()
        }
    }

    pub fn wrap(mut self) -> Self {
        self.wrap = FlexWrap::Wrap;
        self
    }

    pub fn align_main(mut self, j: JustifyContent) -> Self {
        self.align_main = j;
        self
    }

    pub fn align_cross(mut self, a: AlignItems) -> Self {
        self.align_cross = a;
        self
    }

    pub fn padding(mut self, p: PaddingValues) -> Self {
        self.padding = p;
        self
    }

    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }

    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }

    pub fn size(self, w: f32, h: f32) -> Self {
        self.width(w).height(h)
    }

    pub fn validate(&self) -> Result<()> {
        if !matches!(self.direction, FlexDirection::Row | FlexDirection::Column) {
            return Err(Error::InvalidArgument);
        }
        if !matches!(self.wrap, FlexWrap::NoWrap | FlexWrap::Wrap) {
            return Err(Error::InvalidArgument);
        }
        if !matches!(
            self.align_main,
            JustifyContent::Start
                | JustifyContent::Center
                | JustifyContent::End
                | JustifyContent::SpaceBetween
                | JustifyContent::SpaceAround
                | JustifyContent::SpaceEvenly
        ) {
            return Err(Error::InvalidArgument);
        }
        if !matches!(
            self.align_cross,
            AlignItems::Start | AlignItems::Center | AlignItems::End | AlignItems::Stretch
        ) {
            return Err(Error::InvalidArgument);
        }

        self.padding.validate()?;
        for size in [self.width, self.height].into_iter().flatten() {
            if !(size >= 0.0 && size.is_finite()) {
                return Err(Error::Range);
            }
        }
        Ok(())
    }
}

pub type MeasureFn = Box<dyn FnMut(MeasureSpec, MeasureSpec) -> Result<Size>>;

/// A node in the layout tree. Children are owned; a leaf may carry a measure
/// callback that only sees its own constraints.
#[derive(Default)]
pub struct LayoutNode {
    style: LayoutStyle,
    children: Vec<LayoutNode>,
    measure: Option<MeasureFn>,
    measured: Size,
    layout: Rect,
}

impl std::fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutNode")
            .field("style", &self.style)
            .field("measured", &self.measured)
            .field("layout", &self.layout)
            .field("has_measure", &self.measure.is_some())
            .field("children", &self.children)
            .finish()
    }
}

impl LayoutNode {
    pub fn new(style: LayoutStyle) -> Result<Self> {
        style.validate()?;
        Ok(Self {
            style,
            ..Default::default()
        })
    }

    /// Leaf with an explicit size and no callback.
    pub fn fixed(width: f32, height: f32) -> Self {
        Self {
            style: LayoutStyle::default().size(width, height),
            ..Default::default()
        }
    }

    /// Leaf measured by `widget`.
    pub fn for_widget(widget: WidgetRef) -> Self {
        let mut node = Self::default();
        node.set_measure(move |w, h| widget.borrow_mut().measure(w, h));
        node
    }

    pub fn style(&self) -> &LayoutStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: LayoutStyle) -> Result<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }

    pub fn set_children(&mut self, children: Vec<LayoutNode>) {
        self.children = children;
    }

    pub fn push_child(&mut self, child: LayoutNode) {
        self.children.push(child);
    }

    pub fn with_child(mut self, child: LayoutNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_measure(
        &mut self,
        f: impl FnMut(MeasureSpec, MeasureSpec) -> Result<Size> + 'static,
    ) {
        self.measure = Some(Box::new(f));
    }

    pub fn with_measure(
        mut self,
        f: impl FnMut(MeasureSpec, MeasureSpec) -> Result<Size> + 'static,
    ) -> Self {
        self.set_measure(f);
        self
    }

    pub fn clear_measure(&mut self) {
        self.measure = None;
    }

    /// Size from the last measure pass.
    pub fn measured(&self) -> Size {
        self.measured
    }

    /// Rect from the last layout pass, in root coordinates.
    pub fn layout(&self) -> Rect {
        self.layout
    }
}

/// Measures `root` against the given constraints, then positions the whole
/// tree starting at the origin.
///
/// On error the tree's `measured`/`layout` values are unspecified.
pub fn compute(
    root: &mut LayoutNode,
    direction: TextDirection,
    width: MeasureSpec,
    height: MeasureSpec,
) -> Result<()> {
    measure_node(root, direction, width, height)?;
    let size = root.measured;
    layout_node(root, direction, Rect::new(0.0, 0.0, size.width, size.height))?;
    log::trace!(
        "layout: root {}x{} ({:?})",
        size.width,
        size.height,
        direction
    );
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn of(direction: FlexDirection) -> Axis {
        match direction {
            FlexDirection::Column | FlexDirection::ColumnReverse => Axis::Vertical,
            _ => Axis::Horizontal,
        }
    }

    fn main(self, s: Size) -> f32 {
        match self {
            Axis::Horizontal => s.width,
            Axis::Vertical => s.height,
        }
    }

    fn cross(self, s: Size) -> f32 {
        match self {
            Axis::Horizontal => s.height,
            Axis::Vertical => s.width,
        }
    }

    fn pack(self, main: f32, cross: f32) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }
}

/// Padding with `left`/`right` resolved to physical edges.
fn resolve_padding(p: PaddingValues, direction: TextDirection) -> PaddingValues {
    match direction {
        TextDirection::Ltr => p,
        TextDirection::Rtl => PaddingValues {
            left: p.right,
            right: p.left,
            ..p
        },
    }
}

/// The tighter of an explicit style size and a bounded spec.
fn resolve_available(style_size: Option<f32>, spec: MeasureSpec) -> Option<f32> {
    match (style_size, spec.bound()) {
        (Some(s), Some(b)) => Some(s.min(b)),
        (Some(s), None) => Some(s),
        (None, b) => b,
    }
}

#[derive(Clone, Copy, Debug)]
struct Line {
    start: usize,
    end: usize,
    main: f32,
    cross: f32,
}

impl Line {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Splits measured children into lines. A child that would overflow `limit`
/// starts a new line unless the current line is still empty.
fn break_lines(children: &[LayoutNode], axis: Axis, limit: Option<f32>) -> SmallVec<[Line; 4]> {
    let mut lines = SmallVec::new();
    let mut line = Line {
        start: 0,
        end: 0,
        main: 0.0,
        cross: 0.0,
    };

    for (i, child) in children.iter().enumerate() {
        let child_main = axis.main(child.measured);
        let child_cross = axis.cross(child.measured);

        if let Some(limit) = limit {
            if line.len() > 0 && line.main + child_main > limit {
                lines.push(line);
                line = Line {
                    start: i,
                    end: i,
                    main: 0.0,
                    cross: 0.0,
                };
            }
        }

        line.main += child_main;
        line.cross = line.cross.max(child_cross);
        line.end = i + 1;
    }

    if line.len() > 0 {
        lines.push(line);
    }
    lines
}

fn measure_node(
    node: &mut LayoutNode,
    direction: TextDirection,
    width: MeasureSpec,
    height: MeasureSpec,
) -> Result<()> {
    width.validate()?;
    height.validate()?;
    node.style.validate()?;

    node.measured = if node.children.is_empty() {
        measure_leaf(node, width, height)?
    } else {
        measure_container(node, direction, width, height)?
    };
    Ok(())
}

fn measure_leaf(node: &mut LayoutNode, width: MeasureSpec, height: MeasureSpec) -> Result<Size> {
    let forced_w = node.style.width;
    let forced_h = node.style.height;

    let mut size = match node.measure.as_mut() {
        Some(measure) => measure(
            forced_w.map_or(width, MeasureSpec::Exactly),
            forced_h.map_or(height, MeasureSpec::Exactly),
        )?,
        None => Size::new(forced_w.unwrap_or(0.0), forced_h.unwrap_or(0.0)),
    };

    if !(size.width >= 0.0 && size.height >= 0.0) {
        return Err(Error::Range);
    }

    if let Some(w) = forced_w {
        size.width = w;
    }
    if let Some(h) = forced_h {
        size.height = h;
    }

    Ok(Size::new(width.apply(size.width), height.apply(size.height)))
}

fn measure_container(
    node: &mut LayoutNode,
    direction: TextDirection,
    width: MeasureSpec,
    height: MeasureSpec,
) -> Result<Size> {
    let style = node.style;
    let axis = Axis::of(style.direction);
    let padding = resolve_padding(style.padding, direction);

    let inner_w = resolve_available(style.width, width).map(|a| (a - padding.horizontal()).max(0.0));
    let inner_h = resolve_available(style.height, height).map(|a| (a - padding.vertical()).max(0.0));

    let child_w = inner_w.map_or(MeasureSpec::Unspecified, MeasureSpec::AtMost);
    let child_h = inner_h.map_or(MeasureSpec::Unspecified, MeasureSpec::AtMost);

    for child in node.children.iter_mut() {
        measure_node(child, direction, child_w, child_h)?;
    }

    let inner_main = match axis {
        Axis::Horizontal => inner_w,
        Axis::Vertical => inner_h,
    };
    let limit = if style.wrap == FlexWrap::Wrap {
        inner_main
    } else {
        None
    };

    let lines = break_lines(&node.children, axis, limit);
    let content_main = lines.iter().fold(0.0f32, |m, l| m.max(l.main));
    let content_cross: f32 = lines.iter().map(|l| l.cross).sum();

    let content = axis.pack(content_main, content_cross);
    let total_w = style.width.unwrap_or(content.width + padding.horizontal());
    let total_h = style.height.unwrap_or(content.height + padding.vertical());

    Ok(Size::new(width.apply(total_w), height.apply(total_h)))
}

/// Leading offset and inter-child gap for `remaining` free space.
fn distribute(align: JustifyContent, remaining: f32, count: usize) -> (f32, f32) {
    let n = count as f32;
    match align {
        JustifyContent::Center => (remaining * 0.5, 0.0),
        JustifyContent::End => (remaining, 0.0),
        JustifyContent::SpaceBetween if count > 1 => (0.0, remaining / (n - 1.0)),
        JustifyContent::SpaceAround if count > 0 => {
            let gap = remaining / n;
            (gap * 0.5, gap)
        }
        JustifyContent::SpaceEvenly if count > 0 => {
            let gap = remaining / (n + 1.0);
            (gap, gap)
        }
        _ => (0.0, 0.0),
    }
}

fn layout_node(node: &mut LayoutNode, direction: TextDirection, rect: Rect) -> Result<()> {
    node.layout = rect;
    if node.children.is_empty() {
        return Ok(());
    }

    let style = node.style;
    let axis = Axis::of(style.direction);
    let padding = resolve_padding(style.padding, direction);
    let rtl = direction == TextDirection::Rtl;

    let inner = Size::new(
        (rect.w - padding.horizontal()).max(0.0),
        (rect.h - padding.vertical()).max(0.0),
    );
    let inner_main = axis.main(inner);
    let inner_cross = axis.cross(inner);
    let wrap = style.wrap == FlexWrap::Wrap;

    let lines = break_lines(&node.children, axis, wrap.then_some(inner_main));

    let mut cursor_cross = 0.0;
    for line in lines {
        let mut line_cross = line.cross;
        if !wrap && inner_cross > line_cross {
            line_cross = inner_cross;
        }

        let remaining = (inner_main - line.main).max(0.0);
        let (offset, gap) = distribute(style.align_main, remaining, line.len());

        let mut cursor_main = offset;
        for child in &mut node.children[line.start..line.end] {
            let child_main = axis.main(child.measured);
            let mut child_cross = axis.cross(child.measured);

            let cross_offset = match style.align_cross {
                AlignItems::Center => (line_cross - child_cross) * 0.5,
                AlignItems::End => line_cross - child_cross,
                AlignItems::Stretch => {
                    child_cross = line_cross;
                    0.0
                }
                _ => 0.0,
            };

            let child_rect = match axis {
                Axis::Horizontal => {
                    let x = if rtl {
                        rect.right() - padding.right - cursor_main - child_main
                    } else {
                        rect.x + padding.left + cursor_main
                    };
                    let y = rect.y + padding.top + cursor_cross + cross_offset;
                    Rect::new(x, y, child_main, child_cross)
                }
                Axis::Vertical => {
                    let x = if rtl {
                        rect.right() - padding.right - cursor_cross - cross_offset - child_cross
                    } else {
                        rect.x + padding.left + cursor_cross + cross_offset
                    };
                    let y = rect.y + padding.top + cursor_main;
                    Rect::new(x, y, child_cross, child_main)
                }
            };

            layout_node(child, direction, child_rect)?;
            cursor_main += child_main + gap;
        }

        cursor_cross += line_cross;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(w: f32, h: f32) -> LayoutNode {
        LayoutNode::fixed(w, h)
    }

    fn dump(node: &LayoutNode) -> String {
        let mut out = String::new();
        fn walk(node: &LayoutNode, depth: usize, out: &mut String) {
            let r = node.layout();
            out.push_str(&format!(
                "{}{} {} {} {}\n",
                "  ".repeat(depth),
                r.x,
                r.y,
                r.w,
                r.h
            ));
            for c in node.children() {
                walk(c, depth + 1, out);
            }
        }
        walk(node, 0, &mut out);
        out.trim_end().to_string()
    }

    #[test]
    fn test_resolve_available() {
        assert_eq!(resolve_available(None, MeasureSpec::Unspecified), None);
        assert_eq!(resolve_available(Some(40.0), MeasureSpec::Unspecified), Some(40.0));
        assert_eq!(resolve_available(None, MeasureSpec::AtMost(30.0)), Some(30.0));
        assert_eq!(resolve_available(Some(40.0), MeasureSpec::Exactly(30.0)), Some(30.0));
        assert_eq!(resolve_available(Some(20.0), MeasureSpec::AtMost(30.0)), Some(20.0));
    }

    #[test]
    fn test_apply_spec() {
        assert_eq!(MeasureSpec::Unspecified.apply(12.0), 12.0);
        assert_eq!(MeasureSpec::Exactly(5.0).apply(12.0), 5.0);
        assert_eq!(MeasureSpec::AtMost(5.0).apply(12.0), 5.0);
        assert_eq!(MeasureSpec::AtMost(50.0).apply(12.0), 12.0);
    }

    #[test]
    fn test_rtl_swaps_padding() {
        let p = PaddingValues {
            left: 1.0,
            right: 2.0,
            top: 3.0,
            bottom: 4.0,
        };
        let r = resolve_padding(p, TextDirection::Rtl);
        assert_eq!((r.left, r.right, r.top, r.bottom), (2.0, 1.0, 3.0, 4.0));
        assert_eq!(resolve_padding(p, TextDirection::Ltr), p);
    }

    #[test]
    fn test_leaf_callback_sees_forced_size() {
        let seen = std::rc::Rc::new(std::cell::Cell::new(MeasureSpec::Unspecified));
        let seen2 = seen.clone();
        let mut node = LayoutNode::new(LayoutStyle::row().width(30.0))
            .unwrap()
            .with_measure(move |w, _h| {
                seen2.set(w);
                Ok(Size::new(100.0, 8.0))
            });

        compute(
            &mut node,
            TextDirection::Ltr,
            MeasureSpec::AtMost(50.0),
            MeasureSpec::Unspecified,
        )
        .unwrap();

        assert_eq!(seen.get(), MeasureSpec::Exactly(30.0));
        assert_eq!(node.measured(), Size::new(30.0, 8.0));
    }

    #[test]
    fn test_leaf_callback_negative_size_is_range() {
        let mut node = LayoutNode::default().with_measure(|_, _| Ok(Size::new(-1.0, 4.0)));
        let err = compute(
            &mut node,
            TextDirection::Ltr,
            MeasureSpec::Unspecified,
            MeasureSpec::Unspecified,
        );
        assert_eq!(err, Err(Error::Range));
    }

    #[test]
    fn test_leaf_callback_error_propagates() {
        let mut root = LayoutNode::default()
            .with_child(leaf(10.0, 10.0))
            .with_child(LayoutNode::default().with_measure(|_, _| Err(Error::Busy)));
        let err = compute(
            &mut root,
            TextDirection::Ltr,
            MeasureSpec::Unspecified,
            MeasureSpec::Unspecified,
        );
        assert_eq!(err, Err(Error::Busy));
    }

    #[test]
    fn test_invalid_style_variants() {
        let style = LayoutStyle {
            direction: FlexDirection::RowReverse,
            ..Default::default()
        };
        assert_eq!(LayoutNode::new(style).err(), Some(Error::InvalidArgument));

        let style = LayoutStyle {
            wrap: FlexWrap::WrapReverse,
            ..Default::default()
        };
        assert_eq!(style.validate(), Err(Error::InvalidArgument));

        let style = LayoutStyle::row().align_main(JustifyContent::Stretch);
        assert_eq!(style.validate(), Err(Error::InvalidArgument));

        let style = LayoutStyle::row().align_cross(AlignItems::Baseline);
        assert_eq!(style.validate(), Err(Error::InvalidArgument));

        let style = LayoutStyle::row().padding(PaddingValues {
            left: -1.0,
            ..Default::default()
        });
        assert_eq!(style.validate(), Err(Error::Range));

        assert_eq!(LayoutStyle::row().width(-2.0).validate(), Err(Error::Range));
        assert_eq!(LayoutStyle::row().height(f32::NAN).validate(), Err(Error::Range));
    }

    #[test]
    fn test_bad_spec_is_range() {
        let mut node = leaf(1.0, 1.0);
        let err = compute(
            &mut node,
            TextDirection::Ltr,
            MeasureSpec::AtMost(-1.0),
            MeasureSpec::Unspecified,
        );
        assert_eq!(err, Err(Error::Range));
    }

    #[test]
    fn test_row_measure_and_layout() {
        let mut root = LayoutNode::new(LayoutStyle::row().padding(PaddingValues::all(2.0)))
            .unwrap()
            .with_child(leaf(10.0, 6.0))
            .with_child(leaf(20.0, 4.0));

        compute(
            &mut root,
            TextDirection::Ltr,
            MeasureSpec::Unspecified,
            MeasureSpec::Unspecified,
        )
        .unwrap();

        assert_eq!(root.measured(), Size::new(34.0, 10.0));
        insta::assert_snapshot!(dump(&root), @r"
        0 0 34 10
          2 2 10 6
          12 2 20 4
        ");
    }

    #[test]
    fn test_column_centered_cross() {
        let mut root = LayoutNode::new(
            LayoutStyle::column()
                .width(40.0)
                .align_cross(AlignItems::Center)
                .align_main(JustifyContent::End),
        )
        .unwrap()
        .with_child(leaf(10.0, 10.0))
        .with_child(leaf(20.0, 10.0));

        compute(
            &mut root,
            TextDirection::Ltr,
            MeasureSpec::Unspecified,
            MeasureSpec::Exactly(50.0),
        )
        .unwrap();

        insta::assert_snapshot!(dump(&root), @r"
        0 0 40 50
          15 30 10 10
          10 40 20 10
        ");
    }

    #[test]
    fn test_stretch_fills_container_cross() {
        let mut root = LayoutNode::new(LayoutStyle::row().align_cross(AlignItems::Stretch))
            .unwrap()
            .with_child(leaf(10.0, 5.0))
            .with_child(leaf(10.0, 8.0));

        compute(
            &mut root,
            TextDirection::Ltr,
            MeasureSpec::Exactly(100.0),
            MeasureSpec::Exactly(30.0),
        )
        .unwrap();

        for child in root.children() {
            assert_eq!(child.layout().h, 30.0);
        }
    }

    #[test]
    fn test_wrap_breaks_lines() {
        let mut root = LayoutNode::new(LayoutStyle::row().wrap())
            .unwrap()
            .with_child(leaf(30.0, 10.0))
            .with_child(leaf(30.0, 12.0))
            .with_child(leaf(30.0, 5.0));

        compute(
            &mut root,
            TextDirection::Ltr,
            MeasureSpec::AtMost(70.0),
            MeasureSpec::Unspecified,
        )
        .unwrap();

        assert_eq!(root.measured(), Size::new(60.0, 17.0));
        insta::assert_snapshot!(dump(&root), @r"
        0 0 60 17
          0 0 30 10
          30 0 30 12
          0 12 30 5
        ");
    }

    #[test]
    fn test_wrap_oversized_first_child_stays_on_line() {
        let mut root = LayoutNode::new(LayoutStyle::row().wrap())
            .unwrap()
            .with_child(leaf(80.0, 10.0))
            .with_child(leaf(10.0, 10.0));

        compute(
            &mut root,
            TextDirection::Ltr,
            MeasureSpec::Exactly(50.0),
            MeasureSpec::Unspecified,
        )
        .unwrap();

        assert_eq!(root.children()[0].layout(), Rect::new(0.0, 0.0, 50.0, 10.0));
        assert_eq!(root.children()[1].layout(), Rect::new(0.0, 10.0, 10.0, 10.0));
    }

    #[test]
    fn test_unbounded_wrap_keeps_single_line() {
        let mut root = LayoutNode::new(LayoutStyle::row().wrap())
            .unwrap()
            .with_child(leaf(300.0, 10.0))
            .with_child(leaf(300.0, 10.0));

        compute(
            &mut root,
            TextDirection::Ltr,
            MeasureSpec::Unspecified,
            MeasureSpec::Unspecified,
        )
        .unwrap();

        assert_eq!(root.measured(), Size::new(600.0, 10.0));
    }

    #[test]
    fn test_column_rtl_mirrors_cross() {
        let mut root = LayoutNode::new(LayoutStyle::column().padding(PaddingValues {
            left: 4.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
        }))
        .unwrap()
        .with_child(leaf(10.0, 10.0));

        compute(
            &mut root,
            TextDirection::Rtl,
            MeasureSpec::Exactly(50.0),
            MeasureSpec::Unspecified,
        )
        .unwrap();

        assert_eq!(root.children()[0].layout(), Rect::new(36.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_nested_layout_offsets() {
        let inner = LayoutNode::new(LayoutStyle::column().padding(PaddingValues::all(1.0)))
            .unwrap()
            .with_child(leaf(4.0, 4.0));
        let mut root = LayoutNode::new(LayoutStyle::row().padding(PaddingValues::all(10.0)))
            .unwrap()
            .with_child(leaf(5.0, 5.0))
            .with_child(inner);

        compute(
            &mut root,
            TextDirection::Ltr,
            MeasureSpec::Unspecified,
            MeasureSpec::Unspecified,
        )
        .unwrap();

        insta::assert_snapshot!(dump(&root), @r"
        0 0 31 26
          10 10 5 5
          15 10 6 6
            16 11 4 4
        ");
    }
}
