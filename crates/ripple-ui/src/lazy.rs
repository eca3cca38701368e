//! # Virtualized lists and grids
//!
//! [`ListView`] and [`GridView`] only materialize the items that intersect
//! the viewport (plus `overscan` items, or lines, on each side). Items are
//! bound into a fixed pool of [`Slot`]s that is reused on every
//! [`update`](ListView::update):
//!
//! 1. the scroll offset is clamped to `[0, content_extent - viewport]`,
//! 2. the visible index range is computed from the offset,
//! 3. slot `i` is handed to the bind callback for item `first + i`, and its
//!    node bounds are set from the item's position,
//! 4. slots past the visible count are released.
//!
//! The pool never shrinks and never grows on its own: if more slots are
//! needed than were reserved, `update` fails with [`Error::Range`] and the
//! caller is expected to [`reserve`](ListView::reserve) first
//! (see [`required_slots`](ListView::required_slots)).
//!
//! Slot storage is accounted against an [`Allocator`]; pass a
//! [`BudgetAllocator`] to cap it.
//!
//! ```rust
//! use ripple_core::*;
//! use ripple_ui::lazy::*;
//!
//! struct Row;
//! impl Widget for Row {
//!     fn flags(&self) -> WidgetFlags { WidgetFlags::empty() }
//! }
//!
//! let mut list = ListView::new(ListStyle::default(), None, 1_000, 0).unwrap();
//! list.layout(Rect::new(0.0, 0.0, 320.0, 480.0)).unwrap();
//! list.set_bind(|slot: &mut Slot, _index| {
//!     if slot.node.widget.is_none() {
//!         slot.node.widget = Some(widget_ref(Row));
//!     }
//!     Ok(())
//! });
//!
//! let needed = list.required_slots().unwrap();
//! list.reserve(needed).unwrap();
//! list.update().unwrap();
//! assert_eq!(list.visible().len(), needed);
//! ```

use std::ops::RangeInclusive;

use ripple_core::*;

/// Keeps an item whose trailing edge exactly touches the viewport edge from
/// counting as visible.
const EDGE_EPSILON: f32 = 1e-4;

pub const DEFAULT_ITEM_EXTENT: f32 = 48.0;
pub const DEFAULT_OVERSCAN: usize = 1;
pub const DEFAULT_GRID_SPAN: usize = 2;
pub const DEFAULT_GRID_ITEM: f32 = 64.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

fn non_negative(v: f32) -> Result<()> {
    if v >= 0.0 { Ok(()) } else { Err(Error::Range) }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListStyle {
    pub orientation: Orientation,
    pub padding: PaddingValues,
    pub spacing: f32,
    /// Size of every item along the scroll axis.
    pub item_extent: f32,
    pub background: Color,
    pub overscan: usize,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            padding: PaddingValues::default(),
            spacing: 0.0,
            item_extent: DEFAULT_ITEM_EXTENT,
            background: Color::TRANSPARENT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl ListStyle {
    pub fn validate(&self) -> Result<()> {
        non_negative(self.spacing)?;
        non_negative(self.item_extent)?;
        self.padding.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridStyle {
    pub scroll_axis: Orientation,
    /// Items per line across the scroll axis.
    pub span: usize,
    pub padding: PaddingValues,
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub item_width: f32,
    pub item_height: f32,
    pub background: Color,
    /// Extra lines, not items.
    pub overscan: usize,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            scroll_axis: Orientation::Vertical,
            span: DEFAULT_GRID_SPAN,
            padding: PaddingValues::default(),
            spacing_x: 0.0,
            spacing_y: 0.0,
            item_width: DEFAULT_GRID_ITEM,
            item_height: DEFAULT_GRID_ITEM,
            background: Color::TRANSPARENT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl GridStyle {
    pub fn validate(&self) -> Result<()> {
        if self.span == 0 {
            return Err(Error::Range);
        }
        non_negative(self.spacing_x)?;
        non_negative(self.spacing_y)?;
        non_negative(self.item_width)?;
        non_negative(self.item_height)?;
        self.padding.validate()
    }
}

/// One recycled binding: which item it currently shows and the node the
/// bind callback fills in.
#[derive(Clone, Debug, Default)]
pub struct Slot {
    pub index: Option<usize>,
    pub node: RenderNode,
}

/// Populates `slot.node.widget` for `index`.
pub type BindFn = Box<dyn FnMut(&mut Slot, usize) -> Result<()>>;

/// Scroll-axis measurements shared by lists and grids. A "line" is one
/// item for a list and one row (or column) of `span` items for a grid.
#[derive(Clone, Copy, Debug)]
struct Track {
    lines: usize,
    item: f32,
    spacing: f32,
    pad_start: f32,
    pad_end: f32,
    viewport: f32,
}

impl Track {
    fn content_extent(&self) -> Result<f32> {
        non_negative(self.item)?;
        non_negative(self.spacing)?;
        non_negative(self.pad_start)?;
        non_negative(self.pad_end)?;

        if self.lines == 0 {
            return Ok(self.pad_start + self.pad_end);
        }
        if self.item <= 0.0 {
            return Err(Error::Range);
        }

        let extent = self.pad_start
            + self.pad_end
            + self.item * self.lines as f32
            + self.spacing * (self.lines - 1) as f32;
        if extent >= 0.0 && extent.is_finite() {
            Ok(extent)
        } else {
            Err(Error::Range)
        }
    }

    fn clamp(&self, offset: f32) -> Result<f32> {
        let extent = self.content_extent()?;
        if self.viewport < 0.0 {
            return Err(Error::Range);
        }
        let max = (extent - self.viewport).max(0.0);
        Ok(offset.clamp(0.0, max))
    }

    /// Lines intersecting `[scroll, scroll + viewport)`, widened by
    /// `overscan` and clipped to the line count.
    fn visible_lines(&self, scroll: f32, overscan: usize) -> Result<Option<RangeInclusive<usize>>> {
        if self.lines == 0 || self.viewport <= 0.0 {
            return Ok(None);
        }
        if self.item <= 0.0 || self.spacing < 0.0 || self.pad_start < 0.0 {
            return Err(Error::Range);
        }

        let stride = self.item + self.spacing;
        if !(stride > 0.0) {
            return Err(Error::Range);
        }
        if scroll + self.viewport <= self.pad_start {
            return Ok(None);
        }

        let start = scroll - self.pad_start;
        let first = if start <= 0.0 {
            0
        } else {
            (start / stride) as usize
        };

        let end = scroll + self.viewport - self.pad_start;
        if end <= 0.0 {
            return Ok(None);
        }
        let end = (end - EDGE_EPSILON).max(0.0);
        let last = ((end / stride) as usize).min(self.lines - 1);

        if first >= self.lines || last < first {
            return Ok(None);
        }

        let first = first.saturating_sub(overscan);
        let last = last.saturating_add(overscan).min(self.lines - 1);
        Ok(Some(first..=last))
    }
}

/// Grow-only pool of slots with allocator accounting.
struct SlotPool {
    slots: Vec<Slot>,
    visible: usize,
    range: Option<RangeInclusive<usize>>,
    allocator: AllocatorRef,
    reserved_bytes: usize,
    bind: Option<BindFn>,
}

impl SlotPool {
    fn new(allocator: Option<AllocatorRef>) -> Self {
        Self {
            slots: Vec::new(),
            visible: 0,
            range: None,
            allocator: allocator.unwrap_or_else(system_allocator),
            reserved_bytes: 0,
            bind: None,
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn reset_visible(&mut self) {
        self.visible = 0;
        self.range = None;
    }

    fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity > self.slots.len() {
            let bytes = bytes_for::<Slot>(capacity)?;
            let extra = bytes.saturating_sub(self.reserved_bytes);
            self.allocator.reserve(extra)?;

            if self
                .slots
                .try_reserve_exact(capacity - self.slots.len())
                .is_err()
            {
                self.allocator.release(extra);
                return Err(Error::OutOfMemory);
            }
            self.slots.resize_with(capacity, Slot::default);
            self.reserved_bytes = bytes;
            log::debug!("lazy: slot pool grown to {capacity}");
        }
        self.reset_visible();
        Ok(())
    }

    /// Binds `range` into the front of the pool. Slots bound before a
    /// failure stay bound, and `self.range` shrinks to cover only them.
    fn update(
        &mut self,
        range: Option<RangeInclusive<usize>>,
        bounds_of: impl Fn(usize) -> Result<Rect>,
    ) -> Result<()> {
        self.reset_visible();
        let Some(range) = range else {
            return Ok(());
        };

        let count = range.end() - range.start() + 1;
        if self.slots.is_empty() {
            return Err(Error::State);
        }
        if self.slots.len() < count {
            log::warn!(
                "lazy: {count} slots needed, {} reserved",
                self.slots.len()
            );
            return Err(Error::Range);
        }
        let bind = self.bind.as_mut().ok_or(Error::State)?;

        let first = *range.start();
        self.range = Some(range.clone());
        for (slot, index) in self.slots.iter_mut().zip(range) {
            slot.index = Some(index);
            let bound = bind(&mut *slot, index).and_then(|()| {
                if slot.node.widget.is_none() {
                    return Err(Error::State);
                }
                slot.node.bounds = bounds_of(index)?;
                Ok(())
            });
            if let Err(e) = bound {
                self.range = self.visible.checked_sub(1).map(|last| first..=first + last);
                return Err(e);
            }
            self.visible += 1;
        }

        for slot in &mut self.slots[count..] {
            slot.index = None;
            slot.node.clear();
        }
        Ok(())
    }

    fn visible(&self) -> &[Slot] {
        &self.slots[..self.visible]
    }

    fn release(&mut self) {
        self.allocator.release(self.reserved_bytes);
        self.reserved_bytes = 0;
        self.slots = Vec::new();
        self.bind = None;
        self.reset_visible();
    }
}

impl Drop for SlotPool {
    fn drop(&mut self) {
        self.allocator.release(self.reserved_bytes);
    }
}

fn measure_content(content: Size, width: MeasureSpec, height: MeasureSpec) -> Result<Size> {
    if content.width < 0.0 || content.height < 0.0 {
        return Err(Error::Range);
    }
    Ok(Size::new(width.apply(content.width), height.apply(content.height)))
}

fn paint_background(cx: &mut PaintContext<'_>, bounds: Rect, color: Color) -> Result<()> {
    bounds.validate()?;
    if color.is_transparent() {
        return Ok(());
    }
    cx.gfx.draw_rect(bounds, color, 0.0)
}

fn disabled_semantics(flags: WidgetFlags) -> Semantics {
    let mut s = Semantics::new(Role::None);
    if flags.contains(WidgetFlags::DISABLED) {
        s.flags |= SemanticFlags::DISABLED;
    }
    s
}

fn scroll_delta(event: &InputEvent, axis: Orientation) -> Option<f32> {
    let InputKind::PointerScroll(p) = &event.kind else {
        return None;
    };
    let delta = match axis {
        Orientation::Vertical => p.scroll.y,
        Orientation::Horizontal => p.scroll.x,
    };
    (delta != 0.0).then_some(delta)
}

/// A single-axis virtualized list of equally sized items.
pub struct ListView {
    style: ListStyle,
    bounds: Rect,
    scroll_offset: f32,
    content_extent: f32,
    item_count: usize,
    flags: WidgetFlags,
    pool: SlotPool,
}

impl ListView {
    /// `allocator` defaults to [`SystemAllocator`]. A non-zero
    /// `slot_capacity` reserves up front.
    pub fn new(
        style: ListStyle,
        allocator: Option<AllocatorRef>,
        item_count: usize,
        slot_capacity: usize,
    ) -> Result<Self> {
        style.validate()?;
        let mut view = Self {
            style,
            bounds: Rect::ZERO,
            scroll_offset: 0.0,
            content_extent: 0.0,
            item_count,
            flags: WidgetFlags::empty(),
            pool: SlotPool::new(allocator),
        };
        if slot_capacity > 0 {
            view.reserve(slot_capacity)?;
        }
        Ok(view)
    }

    pub fn set_bind(&mut self, bind: impl FnMut(&mut Slot, usize) -> Result<()> + 'static) {
        self.pool.bind = Some(Box::new(bind));
    }

    pub fn clear_bind(&mut self) {
        self.pool.bind = None;
    }

    pub fn style(&self) -> &ListStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ListStyle) -> Result<()> {
        style.validate()?;
        self.style = style;
        self.update_metrics()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn set_item_count(&mut self, item_count: usize) -> Result<()> {
        self.item_count = item_count;
        self.update_metrics()
    }

    pub fn set_flags(&mut self, flags: WidgetFlags) {
        self.flags = flags;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn scroll(&self) -> f32 {
        self.scroll_offset
    }

    /// Negative offsets clamp to zero, large ones to the end of the content.
    pub fn set_scroll(&mut self, offset: f32) -> Result<()> {
        if offset.is_nan() {
            return Err(Error::Range);
        }
        self.scroll_offset = offset.max(0.0);
        self.update_metrics()
    }

    fn track(&self) -> Track {
        let p = &self.style.padding;
        let (pad_start, pad_end, viewport) = match self.style.orientation {
            Orientation::Vertical => (p.top, p.bottom, self.bounds.h),
            Orientation::Horizontal => (p.left, p.right, self.bounds.w),
        };
        Track {
            lines: self.item_count,
            item: self.style.item_extent,
            spacing: self.style.spacing,
            pad_start,
            pad_end,
            viewport,
        }
    }

    fn update_metrics(&mut self) -> Result<()> {
        let track = self.track();
        self.content_extent = track.content_extent()?;
        self.scroll_offset = track.clamp(self.scroll_offset)?;
        Ok(())
    }

    pub fn content_extent(&self) -> Result<f32> {
        self.track().content_extent()
    }

    /// Visible item range at the current (clamped) scroll offset.
    pub fn visible_range(&self) -> Result<Option<RangeInclusive<usize>>> {
        self.style.validate()?;
        let track = self.track();
        let scroll = track.clamp(self.scroll_offset)?;
        track.visible_lines(scroll, self.style.overscan)
    }

    /// Slots `update` would need right now.
    pub fn required_slots(&self) -> Result<usize> {
        Ok(self
            .visible_range()?
            .map_or(0, |r| r.end() - r.start() + 1))
    }

    pub fn slot_capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Grows the slot pool to at least `capacity` and forgets the current
    /// visible set.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        self.pool.reserve(capacity)
    }

    /// Rebinds the visible items into the slot pool.
    pub fn update(&mut self) -> Result<()> {
        self.style.validate()?;
        self.bounds.validate()?;
        self.update_metrics()?;

        let range = self.track().visible_lines(self.scroll_offset, self.style.overscan)?;
        let (style, bounds, scroll, count) =
            (self.style, self.bounds, self.scroll_offset, self.item_count);
        self.pool
            .update(range, |i| list_item_bounds(&style, bounds, scroll, count, i))
    }

    /// Slots bound by the last `update`, in item order.
    pub fn visible(&self) -> &[Slot] {
        self.pool.visible()
    }

    /// Item range bound by the last `update`. After a failed update this
    /// covers only the slots that were bound before the failure.
    pub fn bound_range(&self) -> Option<RangeInclusive<usize>> {
        self.pool.range.clone()
    }

    pub fn item_bounds(&self, index: usize) -> Result<Rect> {
        list_item_bounds(
            &self.style,
            self.bounds,
            self.scroll_offset,
            self.item_count,
            index,
        )
    }

    /// Releases the slot pool and resets the view to empty.
    pub fn destroy(&mut self) {
        self.pool.release();
        self.item_count = 0;
        self.scroll_offset = 0.0;
        self.content_extent = 0.0;
    }
}

fn list_item_bounds(
    style: &ListStyle,
    bounds: Rect,
    scroll: f32,
    count: usize,
    index: usize,
) -> Result<Rect> {
    if index >= count {
        return Err(Error::NotFound);
    }
    let stride = style.item_extent + style.spacing;
    if !(stride > 0.0) {
        return Err(Error::Range);
    }

    let p = &style.padding;
    let along = index as f32 * stride - scroll;
    let r = match style.orientation {
        Orientation::Vertical => Rect::new(
            bounds.x + p.left,
            bounds.y + p.top + along,
            bounds.w - p.horizontal(),
            style.item_extent,
        ),
        Orientation::Horizontal => Rect::new(
            bounds.x + p.left + along,
            bounds.y + p.top,
            style.item_extent,
            bounds.h - p.vertical(),
        ),
    };
    r.validate()?;
    Ok(r)
}

impl Widget for ListView {
    fn flags(&self) -> WidgetFlags {
        self.flags
    }

    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Result<Size> {
        width.validate()?;
        height.validate()?;
        self.style.validate()?;
        self.update_metrics()?;

        let p = self.style.padding;
        let content = match self.style.orientation {
            Orientation::Vertical => Size::new(p.horizontal(), self.content_extent),
            Orientation::Horizontal => Size::new(self.content_extent, p.vertical()),
        };
        measure_content(content, width, height)
    }

    fn layout(&mut self, bounds: Rect) -> Result<()> {
        bounds.validate()?;
        self.bounds = bounds;
        self.update_metrics()
    }

    fn paint(&mut self, cx: &mut PaintContext<'_>) -> Result<()> {
        self.style.validate()?;
        paint_background(cx, self.bounds, self.style.background)
    }

    fn event(&mut self, event: &InputEvent) -> Result<bool> {
        if self.flags.contains(WidgetFlags::DISABLED) {
            return Ok(false);
        }
        let Some(delta) = scroll_delta(event, self.style.orientation) else {
            return Ok(false);
        };
        self.set_scroll(self.scroll_offset + delta)?;
        Ok(true)
    }

    fn semantics(&self) -> Semantics {
        disabled_semantics(self.flags)
    }

    fn destroy(&mut self) -> Result<()> {
        ListView::destroy(self);
        Ok(())
    }
}

/// A virtualized grid: `span` equally sized items per line, lines stacked
/// along `scroll_axis`.
pub struct GridView {
    style: GridStyle,
    bounds: Rect,
    scroll_offset: f32,
    content_extent: f32,
    item_count: usize,
    flags: WidgetFlags,
    pool: SlotPool,
}

impl GridView {
    pub fn new(
        style: GridStyle,
        allocator: Option<AllocatorRef>,
        item_count: usize,
        slot_capacity: usize,
    ) -> Result<Self> {
        style.validate()?;
        let mut view = Self {
            style,
            bounds: Rect::ZERO,
            scroll_offset: 0.0,
            content_extent: 0.0,
            item_count,
            flags: WidgetFlags::empty(),
            pool: SlotPool::new(allocator),
        };
        if slot_capacity > 0 {
            view.reserve(slot_capacity)?;
        }
        Ok(view)
    }

    pub fn set_bind(&mut self, bind: impl FnMut(&mut Slot, usize) -> Result<()> + 'static) {
        self.pool.bind = Some(Box::new(bind));
    }

    pub fn clear_bind(&mut self) {
        self.pool.bind = None;
    }

    pub fn style(&self) -> &GridStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: GridStyle) -> Result<()> {
        style.validate()?;
        self.style = style;
        self.update_metrics()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn set_item_count(&mut self, item_count: usize) -> Result<()> {
        self.item_count = item_count;
        self.update_metrics()
    }

    pub fn set_flags(&mut self, flags: WidgetFlags) {
        self.flags = flags;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn scroll(&self) -> f32 {
        self.scroll_offset
    }

    pub fn set_scroll(&mut self, offset: f32) -> Result<()> {
        if offset.is_nan() {
            return Err(Error::Range);
        }
        self.scroll_offset = offset.max(0.0);
        self.update_metrics()
    }

    pub fn line_count(&self) -> usize {
        match self.style.span {
            0 => 0,
            span => self.item_count.div_ceil(span),
        }
    }

    fn track(&self) -> Result<Track> {
        if self.style.span == 0 {
            return Err(Error::Range);
        }
        let s = &self.style;
        let p = &s.padding;
        let (item, spacing, pad_start, pad_end, viewport) = match s.scroll_axis {
            Orientation::Vertical => (s.item_height, s.spacing_y, p.top, p.bottom, self.bounds.h),
            Orientation::Horizontal => (s.item_width, s.spacing_x, p.left, p.right, self.bounds.w),
        };
        Ok(Track {
            lines: self.line_count(),
            item,
            spacing,
            pad_start,
            pad_end,
            viewport,
        })
    }

    fn update_metrics(&mut self) -> Result<()> {
        let track = self.track()?;
        self.content_extent = track.content_extent()?;
        self.scroll_offset = track.clamp(self.scroll_offset)?;
        Ok(())
    }

    pub fn content_extent(&self) -> Result<f32> {
        self.track()?.content_extent()
    }

    fn items_in(&self, lines: Option<RangeInclusive<usize>>) -> Result<Option<RangeInclusive<usize>>> {
        let Some(lines) = lines else {
            return Ok(None);
        };
        let span = self.style.span;
        let first = lines.start().checked_mul(span).ok_or(Error::Overflow)?;
        let last = lines
            .end()
            .checked_add(1)
            .and_then(|n| n.checked_mul(span))
            .ok_or(Error::Overflow)?
            - 1;
        let last = last.min(self.item_count.saturating_sub(1));
        if self.item_count == 0 || last < first {
            return Ok(None);
        }
        Ok(Some(first..=last))
    }

    /// Visible item range; whole lines are always included.
    pub fn visible_range(&self) -> Result<Option<RangeInclusive<usize>>> {
        self.style.validate()?;
        let track = self.track()?;
        let scroll = track.clamp(self.scroll_offset)?;
        self.items_in(track.visible_lines(scroll, self.style.overscan)?)
    }

    pub fn required_slots(&self) -> Result<usize> {
        Ok(self
            .visible_range()?
            .map_or(0, |r| r.end() - r.start() + 1))
    }

    pub fn slot_capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        self.pool.reserve(capacity)
    }

    pub fn update(&mut self) -> Result<()> {
        self.style.validate()?;
        self.bounds.validate()?;
        self.update_metrics()?;

        let lines = self
            .track()?
            .visible_lines(self.scroll_offset, self.style.overscan)?;
        let range = self.items_in(lines)?;
        let (style, bounds, scroll, count) =
            (self.style, self.bounds, self.scroll_offset, self.item_count);
        self.pool
            .update(range, |i| grid_item_bounds(&style, bounds, scroll, count, i))
    }

    pub fn visible(&self) -> &[Slot] {
        self.pool.visible()
    }

    pub fn bound_range(&self) -> Option<RangeInclusive<usize>> {
        self.pool.range.clone()
    }

    pub fn item_bounds(&self, index: usize) -> Result<Rect> {
        grid_item_bounds(
            &self.style,
            self.bounds,
            self.scroll_offset,
            self.item_count,
            index,
        )
    }

    pub fn destroy(&mut self) {
        self.pool.release();
        self.item_count = 0;
        self.scroll_offset = 0.0;
        self.content_extent = 0.0;
    }
}

fn grid_item_bounds(
    style: &GridStyle,
    bounds: Rect,
    scroll: f32,
    count: usize,
    index: usize,
) -> Result<Rect> {
    if index >= count {
        return Err(Error::NotFound);
    }
    if style.span == 0 {
        return Err(Error::Range);
    }
    if !(style.item_width > 0.0 && style.item_height > 0.0) {
        return Err(Error::Range);
    }

    let (row, col) = match style.scroll_axis {
        Orientation::Vertical => (index / style.span, index % style.span),
        Orientation::Horizontal => (index % style.span, index / style.span),
    };
    let mut x = bounds.x + style.padding.left + col as f32 * (style.item_width + style.spacing_x);
    let mut y = bounds.y + style.padding.top + row as f32 * (style.item_height + style.spacing_y);
    match style.scroll_axis {
        Orientation::Vertical => y -= scroll,
        Orientation::Horizontal => x -= scroll,
    }
    Ok(Rect::new(x, y, style.item_width, style.item_height))
}

impl Widget for GridView {
    fn flags(&self) -> WidgetFlags {
        self.flags
    }

    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Result<Size> {
        width.validate()?;
        height.validate()?;
        self.style.validate()?;
        self.update_metrics()?;

        let s = &self.style;
        let gaps = (s.span - 1) as f32;
        let content = match s.scroll_axis {
            Orientation::Vertical => Size::new(
                s.padding.horizontal() + s.item_width * s.span as f32 + s.spacing_x * gaps,
                self.content_extent,
            ),
            Orientation::Horizontal => Size::new(
                self.content_extent,
                s.padding.vertical() + s.item_height * s.span as f32 + s.spacing_y * gaps,
            ),
        };
        measure_content(content, width, height)
    }

    fn layout(&mut self, bounds: Rect) -> Result<()> {
        bounds.validate()?;
        self.bounds = bounds;
        self.update_metrics()
    }

    fn paint(&mut self, cx: &mut PaintContext<'_>) -> Result<()> {
        self.style.validate()?;
        paint_background(cx, self.bounds, self.style.background)
    }

    fn event(&mut self, event: &InputEvent) -> Result<bool> {
        if self.flags.contains(WidgetFlags::DISABLED) {
            return Ok(false);
        }
        let Some(delta) = scroll_delta(event, self.style.scroll_axis) else {
            return Ok(false);
        };
        self.set_scroll(self.scroll_offset + delta)?;
        Ok(true)
    }

    fn semantics(&self) -> Semantics {
        disabled_semantics(self.flags)
    }

    fn destroy(&mut self) -> Result<()> {
        GridView::destroy(self);
        Ok(())
    }
}
