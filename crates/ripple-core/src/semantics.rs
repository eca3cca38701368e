use bitflags::bitflags;

/// High‑level semantic role of a widget, similar to ARIA roles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    None,
    Button,
    Text,
    Image,
    Slider,
    Checkbox,
    Switch,
    RadioButton,
    TextField,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SemanticFlags: u32 {
        const DISABLED = 0x01;
        const SELECTED = 0x02;
        const FOCUSABLE = 0x04;
        const FOCUSED = 0x08;
    }
}

/// Flat accessibility description of a single widget.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Semantics {
    /// Primary role of this node (what kind of thing it is).
    pub role: Role,
    pub flags: SemanticFlags,
    /// Human‑readable label for screen readers.
    pub label: Option<String>,
    pub hint: Option<String>,
    pub value: Option<String>,
}

impl Semantics {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Default::default()
        }
    }

    pub fn with_flags(mut self, flags: SemanticFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn is_enabled(&self) -> bool {
        !self.flags.contains(SemanticFlags::DISABLED)
    }
}
