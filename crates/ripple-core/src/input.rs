use crate::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// Opaque handle of the window an event originated from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool, // Cmd on Mac, Win key on Windows
    pub caps_lock: bool,
    pub num_lock: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerData {
    pub id: PointerId,
    pub position: Vec2,
    /// Bitmask of pressed buttons.
    pub buttons: u32,
    /// Wheel delta for `PointerScroll`.
    pub scroll: Vec2,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    F(u8), // F1-F12
    /// Anything without a logical mapping, by platform code.
    Native(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub is_repeat: bool,
}

/// IME composition update. Offsets are byte offsets into `text`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextEdit {
    pub text: String,
    pub cursor: usize,
    pub selection_len: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Tap,
    DoubleTap,
    LongPress,
    DragStart,
    DragUpdate,
    DragEnd,
    Fling,
}

/// Payload of a synthesized gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureEvent {
    pub pointer: PointerId,
    /// Current pointer position.
    pub position: Vec2,
    /// Where the pointer went down.
    pub start: Vec2,
    /// Motion since the previous sample.
    pub delta: Vec2,
    /// Motion since the pointer went down.
    pub total: Vec2,
    /// Pixels per second.
    pub velocity: Vec2,
    pub tap_count: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    /// Placeholder produced by backends with nothing to report.
    None,
    PointerDown(PointerData),
    PointerUp(PointerData),
    PointerMove(PointerData),
    PointerScroll(PointerData),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    Text(String),
    TextEdit(TextEdit),
    WindowResize { width: i32, height: i32 },
    WindowClose,
    WindowFocus,
    WindowBlur,
    Gesture(GestureKind, GestureEvent),
}

impl InputKind {
    pub fn pointer(&self) -> Option<&PointerData> {
        match self {
            InputKind::PointerDown(p)
            | InputKind::PointerUp(p)
            | InputKind::PointerMove(p)
            | InputKind::PointerScroll(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_keyboard(&self) -> bool {
        matches!(
            self,
            InputKind::KeyDown(_) | InputKind::KeyUp(_) | InputKind::Text(_) | InputKind::TextEdit(_)
        )
    }

    pub fn is_window(&self) -> bool {
        matches!(
            self,
            InputKind::WindowResize { .. }
                | InputKind::WindowClose
                | InputKind::WindowFocus
                | InputKind::WindowBlur
        )
    }

    pub fn gesture(&self) -> Option<(GestureKind, &GestureEvent)> {
        match self {
            InputKind::Gesture(kind, g) => Some((*kind, g)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub modifiers: Modifiers,
    /// Caller-supplied monotonic timestamp.
    pub time_ms: u32,
    pub window: WindowId,
}

impl InputEvent {
    pub fn new(kind: InputKind, time_ms: u32) -> Self {
        Self {
            kind,
            modifiers: Modifiers::default(),
            time_ms,
            window: WindowId::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_window(mut self, window: WindowId) -> Self {
        self.window = window;
        self
    }

    fn pointer_data(id: i32, x: f32, y: f32) -> PointerData {
        PointerData {
            id: PointerId(id),
            position: Vec2::new(x, y),
            buttons: 1,
            scroll: Vec2::ZERO,
        }
    }

    pub fn pointer_down(id: i32, x: f32, y: f32, time_ms: u32) -> Self {
        Self::new(InputKind::PointerDown(Self::pointer_data(id, x, y)), time_ms)
    }

    pub fn pointer_move(id: i32, x: f32, y: f32, time_ms: u32) -> Self {
        Self::new(InputKind::PointerMove(Self::pointer_data(id, x, y)), time_ms)
    }

    pub fn pointer_up(id: i32, x: f32, y: f32, time_ms: u32) -> Self {
        let mut data = Self::pointer_data(id, x, y);
        data.buttons = 0;
        Self::new(InputKind::PointerUp(data), time_ms)
    }

    pub fn pointer_scroll(x: f32, y: f32, scroll: Vec2, time_ms: u32) -> Self {
        let mut data = Self::pointer_data(0, x, y);
        data.buttons = 0;
        data.scroll = scroll;
        Self::new(InputKind::PointerScroll(data), time_ms)
    }

    /// Gesture event derived from `source`, keeping its timestamp, window
    /// and modifiers.
    pub fn gesture_from(source: &InputEvent, kind: GestureKind, gesture: GestureEvent) -> Self {
        Self {
            kind: InputKind::Gesture(kind, gesture),
            modifiers: source.modifiers,
            time_ms: source.time_ms,
            window: source.window,
        }
    }
}
