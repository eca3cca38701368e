use std::cell::RefCell;
use std::rc::{Rc, Weak};

use bitflags::bitflags;

use crate::error::{Error, Result};
use crate::input::InputEvent;
use crate::layout::MeasureSpec;
use crate::render_api::PaintContext;
use crate::semantics::{Role, Semantics};
use crate::{Rect, Size};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WidgetFlags: u32 {
        const FOCUSABLE = 0x01;
        const DISABLED = 0x02;
        const HIDDEN = 0x04;
    }
}

impl WidgetFlags {
    /// Can take keyboard focus right now.
    pub fn accepts_focus(self) -> bool {
        self.contains(WidgetFlags::FOCUSABLE)
            && !self.intersects(WidgetFlags::HIDDEN | WidgetFlags::DISABLED)
    }

    /// Hidden and disabled widgets are skipped by hit testing along with
    /// their whole subtree.
    pub fn blocks_hit(self) -> bool {
        self.intersects(WidgetFlags::HIDDEN | WidgetFlags::DISABLED)
    }
}

/// Capability contract every widget implements.
///
/// Only `flags` is mandatory. An absent `event` handler reports "not
/// handled"; an absent `measure` is [`Error::Unsupported`].
pub trait Widget {
    fn flags(&self) -> WidgetFlags;

    fn measure(&mut self, _width: MeasureSpec, _height: MeasureSpec) -> Result<Size> {
        Err(Error::Unsupported)
    }

    fn layout(&mut self, _bounds: Rect) -> Result<()> {
        Ok(())
    }

    fn paint(&mut self, _cx: &mut PaintContext<'_>) -> Result<()> {
        Ok(())
    }

    fn event(&mut self, _event: &InputEvent) -> Result<bool> {
        Ok(false)
    }

    fn semantics(&self) -> Semantics {
        Semantics::new(Role::None)
    }

    /// Releases owned resources. The widget is unusable afterwards.
    fn destroy(&mut self) -> Result<()> {
        Ok(())
    }
}

pub type WidgetRef = Rc<RefCell<dyn Widget>>;
pub type WeakWidget = Weak<RefCell<dyn Widget>>;

pub fn widget_ref<W: Widget + 'static>(w: W) -> WidgetRef {
    Rc::new(RefCell::new(w))
}

pub fn same_widget(a: &WidgetRef, b: &WidgetRef) -> bool {
    Rc::ptr_eq(a, b)
}

/// Resolves a back-reference, treating a dropped widget as absent.
pub fn upgrade(w: &Option<WeakWidget>) -> Option<WidgetRef> {
    w.as_ref().and_then(Weak::upgrade)
}

/// Delivers `event` to `widget`, returning whether it was handled.
pub fn deliver(widget: &WidgetRef, event: &InputEvent) -> Result<bool> {
    widget.borrow_mut().event(event)
}
