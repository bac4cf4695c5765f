use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u8),
}

/// Raw event delivered by the input subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    KeyPress { key: String },
    MouseClick {
        x: i32,
        y: i32,
        button: MouseButton,
        pressed: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ActionKind {
    KeyPress { key: String },
    MouseClick { x: i32, y: i32, button: MouseButton },
}

impl ActionKind {
    /// Mouse releases are not actions; only presses are kept.
    pub fn from_event(event: InputEvent) -> Option<Self> {
        match event {
            InputEvent::KeyPress { key } => Some(ActionKind::KeyPress { key }),
            InputEvent::MouseClick {
                x,
                y,
                button,
                pressed: true,
            } => Some(ActionKind::MouseClick { x, y, button }),
            InputEvent::MouseClick { pressed: false, .. } => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::KeyPress { .. } => "keyboard",
            ActionKind::MouseClick { .. } => "mouse",
        }
    }
}

/// One recorded input event, tagged with the foreground window at the time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserAction {
    pub timestamp: DateTime<Utc>,
    pub kind: ActionKind,
    /// Empty when the lookup failed.
    pub window_title: String,
    /// Empty when the lookup failed.
    pub process_name: String,
}
