//! # Nested scrolling
//!
//! A scroll gesture that starts inside a scrollable child is offered to the
//! child's ancestors twice:
//!
//! - [`ScrollChain::pre_scroll`] lets parents take part of the delta before
//!   the child scrolls (collapsing toolbars, pull-to-refresh).
//! - [`ScrollChain::post_scroll`] hands whatever the child left over back up
//!   the chain, closest parent first.
//!
//! Every parent reports what it consumed. A consumed component must have the
//! same sign as what was still remaining and must not exceed it; anything
//! else is [`Error::Range`]. So for every walk:
//!
//! ```text
//! sum(consumed per parent) + remaining == delta
//! ```
//!
//! [`ScrollState`] is the stock parent: a clamped offset over a content and
//! viewport size. It also works standalone through
//! [`scroll_immediate`](ScrollState::scroll_immediate).

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use ripple_core::*;

/// Something that can absorb scroll on behalf of a descendant.
///
/// Both hooks default to consuming nothing.
pub trait ScrollParent {
    fn pre_scroll(&mut self, _delta: ScrollDelta) -> Result<ScrollDelta> {
        Ok(ScrollDelta::ZERO)
    }

    fn post_scroll(
        &mut self,
        _remaining: ScrollDelta,
        _child_consumed: ScrollDelta,
    ) -> Result<ScrollDelta> {
        Ok(ScrollDelta::ZERO)
    }
}

pub type ScrollParentRef = Rc<RefCell<dyn ScrollParent>>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOutcome {
    pub consumed: ScrollDelta,
    pub remaining: ScrollDelta,
}

fn validate_component(consumed: f32, available: f32) -> Result<()> {
    let ok = if available > 0.0 {
        (0.0..=available).contains(&consumed)
    } else if available < 0.0 {
        (available..=0.0).contains(&consumed)
    } else {
        consumed == 0.0
    };
    if ok { Ok(()) } else { Err(Error::Range) }
}

/// Checks that `consumed` fits inside `available` on both axes.
pub fn validate_consumed(consumed: ScrollDelta, available: ScrollDelta) -> Result<()> {
    validate_component(consumed.x, available.x)?;
    validate_component(consumed.y, available.y)
}

/// Ancestors of a scrolling child, closest first.
#[derive(Clone, Default)]
pub struct ScrollChain {
    parents: SmallVec<[ScrollParentRef; 4]>,
}

impl ScrollChain {
    pub fn new(parents: impl IntoIterator<Item = ScrollParentRef>) -> Self {
        Self {
            parents: parents.into_iter().collect(),
        }
    }

    pub fn push(&mut self, parent: ScrollParentRef) {
        self.parents.push(parent);
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn pre_scroll(&self, delta: ScrollDelta) -> Result<ScrollOutcome> {
        self.walk(delta, |p, remaining| p.pre_scroll(remaining))
    }

    pub fn post_scroll(
        &self,
        remaining: ScrollDelta,
        child_consumed: ScrollDelta,
    ) -> Result<ScrollOutcome> {
        self.walk(remaining, |p, remaining| {
            p.post_scroll(remaining, child_consumed)
        })
    }

    fn walk(
        &self,
        delta: ScrollDelta,
        mut offer: impl FnMut(&mut dyn ScrollParent, ScrollDelta) -> Result<ScrollDelta>,
    ) -> Result<ScrollOutcome> {
        let mut out = ScrollOutcome {
            consumed: ScrollDelta::ZERO,
            remaining: delta,
        };
        if delta.is_zero() || self.parents.is_empty() {
            return Ok(out);
        }

        for parent in &self.parents {
            let consumed = offer(&mut *parent.borrow_mut(), out.remaining)?;
            validate_consumed(consumed, out.remaining)?;
            out.remaining -= consumed;
            out.consumed += consumed;
        }

        log::trace!(
            "scroll chain: consumed {:?}, remaining {:?}",
            out.consumed,
            out.remaining
        );
        Ok(out)
    }
}

/// Takes as much of `wanted` as fits between `offset` and `[0, max]`.
fn consume_axis(offset: &mut f32, wanted: f32, max: f32) -> f32 {
    if wanted == 0.0 || !wanted.is_finite() {
        return 0.0;
    }
    let target = (*offset + wanted).clamp(0.0, max);
    let mut consumed = target - *offset;
    // keep rounding from overshooting what was asked for
    consumed = if wanted >= 0.0 {
        consumed.clamp(0.0, wanted)
    } else {
        consumed.clamp(wanted, 0.0)
    };
    *offset = (*offset + consumed).clamp(0.0, max);
    consumed
}

/// A clamped 2-D scroll position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollState {
    offset: Vec2,
    viewport: Size,
    content: Size,
    /// Consume in `pre_scroll` too, before the child gets a chance.
    pub nested_prescroll: bool,
}

impl ScrollState {
    pub fn new(viewport: Size, content: Size) -> Self {
        Self {
            viewport: Size::new(viewport.width.max(0.0), viewport.height.max(0.0)),
            content: Size::new(content.width.max(0.0), content.height.max(0.0)),
            ..Default::default()
        }
    }

    pub fn with_nested_prescroll(mut self, on: bool) -> Self {
        self.nested_prescroll = on;
        self
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = Size::new(viewport.width.max(0.0), viewport.height.max(0.0));
        self.clamp_offset();
    }

    pub fn set_content(&mut self, content: Size) {
        self.content = Size::new(content.width.max(0.0), content.height.max(0.0));
        self.clamp_offset();
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.clamp_offset();
    }

    pub fn max_offset(&self) -> Vec2 {
        Vec2::new(
            (self.content.width - self.viewport.width).max(0.0),
            (self.content.height - self.viewport.height).max(0.0),
        )
    }

    fn clamp_offset(&mut self) {
        let max = self.max_offset();
        self.offset.x = self.offset.x.clamp(0.0, max.x);
        self.offset.y = self.offset.y.clamp(0.0, max.y);
    }

    /// Scrolls by `delta`, clamped to bounds; returns the leftover.
    pub fn scroll_immediate(&mut self, delta: ScrollDelta) -> ScrollDelta {
        delta - self.consume(delta)
    }

    fn consume(&mut self, delta: ScrollDelta) -> ScrollDelta {
        let max = self.max_offset();
        Vec2::new(
            consume_axis(&mut self.offset.x, delta.x, max.x),
            consume_axis(&mut self.offset.y, delta.y, max.y),
        )
    }
}

impl ScrollParent for ScrollState {
    fn pre_scroll(&mut self, delta: ScrollDelta) -> Result<ScrollDelta> {
        if !self.nested_prescroll {
            return Ok(ScrollDelta::ZERO);
        }
        Ok(self.consume(delta))
    }

    fn post_scroll(
        &mut self,
        remaining: ScrollDelta,
        _child_consumed: ScrollDelta,
    ) -> Result<ScrollDelta> {
        Ok(self.consume(remaining))
    }
}
