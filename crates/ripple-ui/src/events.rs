//! # Event routing and keyboard focus
//!
//! [`EventDispatcher`] sends raw input to widgets:
//!
//! - Pointer events go to the top-most widget under the pointer (see
//!   [`ripple_core::hit_test`]). A `PointerDown` also moves keyboard focus to
//!   that widget when it accepts focus, and clears it otherwise.
//! - Key and text events go to the focused widget, if any, and make focus
//!   visible (the "keyboard mode" focus ring).
//! - Window events go straight to the root widget. `WindowBlur` drops focus.

use ripple_core::*;

#[derive(Clone, Default)]
pub struct Dispatch {
    /// Widget the event was delivered to.
    pub target: Option<WidgetRef>,
    pub handled: bool,
}

impl std::fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatch")
            .field("target", &self.target.is_some())
            .field("handled", &self.handled)
            .finish()
    }
}

pub struct EventDispatcher {
    initialized: bool,
    focused: Option<WeakWidget>,
    focus_visible: bool,
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDispatcher {
    /// A ready dispatcher with nothing focused.
    pub fn new() -> Self {
        Self {
            initialized: true,
            focused: None,
            focus_visible: false,
        }
    }

    /// Re-arms a dispatcher after [`shutdown`](Self::shutdown).
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Err(Error::State);
        }
        *self = Self::new();
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.initialized = false;
        self.focused = None;
        self.focus_visible = false;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::State)
        }
    }

    /// The focused widget, if it is still alive.
    pub fn focus(&self) -> Result<Option<WidgetRef>> {
        self.ensure_ready()?;
        Ok(upgrade(&self.focused))
    }

    pub fn set_focus(&mut self, widget: &WidgetRef) -> Result<()> {
        self.ensure_ready()?;
        if !widget.borrow().flags().accepts_focus() {
            return Err(Error::InvalidArgument);
        }
        self.focused = Some(std::rc::Rc::downgrade(widget));
        log::debug!("focus: set explicitly");
        Ok(())
    }

    pub fn clear_focus(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.drop_focus();
        Ok(())
    }

    pub fn focus_visible(&self) -> Result<bool> {
        self.ensure_ready()?;
        Ok(self.focus_visible)
    }

    pub fn set_focus_visible(&mut self, visible: bool) -> Result<()> {
        self.ensure_ready()?;
        self.focus_visible = visible;
        Ok(())
    }

    fn drop_focus(&mut self) {
        if self.focused.take().is_some() {
            log::debug!("focus: cleared");
        }
        self.focus_visible = false;
    }

    pub fn dispatch(&mut self, root: &RenderNode, event: &InputEvent) -> Result<Dispatch> {
        self.ensure_ready()?;

        if let Some(p) = event.kind.pointer() {
            self.dispatch_pointer(root, p, event)
        } else if event.kind.is_keyboard() {
            self.dispatch_keyboard(event)
        } else if event.kind.is_window() {
            self.dispatch_window(root, event)
        } else {
            Err(Error::InvalidArgument)
        }
    }

    fn dispatch_pointer(
        &mut self,
        root: &RenderNode,
        p: &PointerData,
        event: &InputEvent,
    ) -> Result<Dispatch> {
        let is_down = matches!(event.kind, InputKind::PointerDown(_));
        let Some(target) = hit_test(root, p.position)? else {
            if is_down {
                self.drop_focus();
            }
            return Ok(Dispatch::default());
        };

        let handled = deliver(&target, event)?;

        if is_down {
            if target.borrow().flags().accepts_focus() {
                self.focused = Some(std::rc::Rc::downgrade(&target));
                log::debug!("focus: moved by pointer");
            } else {
                self.focused = None;
            }
            self.focus_visible = false;
        }

        Ok(Dispatch {
            target: Some(target),
            handled,
        })
    }

    fn dispatch_keyboard(&mut self, event: &InputEvent) -> Result<Dispatch> {
        let Some(target) = upgrade(&self.focused) else {
            return Ok(Dispatch::default());
        };
        let handled = deliver(&target, event)?;
        self.focus_visible = true;
        Ok(Dispatch {
            target: Some(target),
            handled,
        })
    }

    fn dispatch_window(&mut self, root: &RenderNode, event: &InputEvent) -> Result<Dispatch> {
        let result = match &root.widget {
            Some(w) => deliver(w, event),
            None => Err(Error::InvalidArgument),
        };
        if matches!(event.kind, InputKind::WindowBlur) {
            self.drop_focus();
        }
        let handled = result?;
        Ok(Dispatch {
            target: root.widget.clone(),
            handled,
        })
    }
}
