#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! The console widgets are pointer driven: the event set is the pointer,
//! viewport resizes, focus changes, and the runtime tick that drives
//! time-based state such as delayed dismissal.
//!
//! # Design Notes
//!
//! - Pointer coordinates are 0-indexed viewport cells
//! - Keyboard input is not consumed by these widgets and is dropped when
//!   mapping from crossterm

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A pointer event.
    Mouse(MouseEvent),

    /// Viewport was resized.
    Resize {
        /// New viewport width in cells.
        width: u16,
        /// New viewport height in cells.
        height: u16,
    },

    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),

    /// A tick event from the host loop.
    ///
    /// Hosts send ticks at a steady interval; widgets with pending timers
    /// poll them when a tick arrives.
    Tick,
}

impl Event {
    /// Convert a Crossterm event into an mlui [`Event`].
    ///
    /// Returns `None` for events the widgets do not consume.
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Mouse(mouse) => Some(Event::Mouse(map_mouse_event(mouse))),
            cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            cte::Event::FocusGained => Some(Event::Focus(true)),
            cte::Event::FocusLost => Some(Event::Focus(false)),
            cte::Event::Key(_) | cte::Event::Paste(_) => None,
        }
    }
}

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of pointer event.
    pub kind: MouseEventKind,

    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// Whether this is a primary-button press.
    #[must_use]
    pub const fn is_primary_click(&self) -> bool {
        matches!(self.kind, MouseEventKind::Down(MouseButton::Left))
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Button pressed down.
    Down(MouseButton),

    /// Button released.
    Up(MouseButton),

    /// Pointer dragged while button held.
    Drag(MouseButton),

    /// Pointer moved (no button pressed).
    Moved,

    /// Wheel scrolled up.
    ScrollUp,

    /// Wheel scrolled down.
    ScrollDown,

    /// Wheel scrolled left (horizontal scroll).
    ScrollLeft,

    /// Wheel scrolled right (horizontal scroll).
    ScrollRight,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,

    /// Secondary button.
    Right,

    /// Middle button (wheel click).
    Middle,
}

#[cfg(not(target_arch = "wasm32"))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_event(event: cte::MouseEvent) -> MouseEvent {
    let kind = match event.kind {
        cte::MouseEventKind::Down(button) => MouseEventKind::Down(map_mouse_button(button)),
        cte::MouseEventKind::Up(button) => MouseEventKind::Up(map_mouse_button(button)),
        cte::MouseEventKind::Drag(button) => MouseEventKind::Drag(map_mouse_button(button)),
        cte::MouseEventKind::Moved => MouseEventKind::Moved,
        cte::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        cte::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        cte::MouseEventKind::ScrollLeft => MouseEventKind::ScrollLeft,
        cte::MouseEventKind::ScrollRight => MouseEventKind::ScrollRight,
    };

    MouseEvent::new(kind, event.column, event.row).with_modifiers(map_modifiers(event.modifiers))
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_button(button: cte::MouseButton) -> MouseButton {
    match button {
        cte::MouseButton::Left => MouseButton::Left,
        cte::MouseButton::Right => MouseButton::Right,
        cte::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crossterm::event as ct_event;

    #[test]
    fn mouse_event_position() {
        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 10, 20);
        assert_eq!(event.position(), (10, 20));
        assert!(event.is_primary_click());
    }

    #[test]
    fn right_click_is_not_primary() {
        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Right), 0, 0);
        assert!(!event.is_primary_click());
    }

    #[test]
    fn mouse_event_with_modifiers() {
        let event = MouseEvent::new(MouseEventKind::Moved, 0, 0).with_modifiers(Modifiers::ALT);
        assert_eq!(event.modifiers, Modifiers::ALT);
    }

    #[test]
    fn map_crossterm_mouse_down() {
        let ct = ct_event::MouseEvent {
            kind: ct_event::MouseEventKind::Down(ct_event::MouseButton::Left),
            column: 7,
            row: 3,
            modifiers: ct_event::KeyModifiers::CONTROL,
        };
        let mapped = Event::from_crossterm(ct_event::Event::Mouse(ct)).unwrap();
        let Event::Mouse(mouse) = mapped else {
            panic!("expected a pointer event, got {mapped:?}");
        };
        assert!(mouse.is_primary_click());
        assert_eq!(mouse.kind, MouseEventKind::Down(MouseButton::Left));
        assert_eq!(mouse.position(), (7, 3));
        assert_eq!(mouse.modifiers, Modifiers::CTRL);
    }

    #[test]
    fn map_crossterm_moved() {
        let ct = ct_event::MouseEvent {
            kind: ct_event::MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: ct_event::KeyModifiers::NONE,
        };
        let mapped = Event::from_crossterm(ct_event::Event::Mouse(ct)).unwrap();
        assert!(matches!(
            mapped,
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Moved,
                ..
            })
        ));
    }

    #[test]
    fn map_crossterm_resize_and_focus() {
        assert_eq!(
            Event::from_crossterm(ct_event::Event::Resize(120, 40)),
            Some(Event::Resize {
                width: 120,
                height: 40
            })
        );
        assert_eq!(
            Event::from_crossterm(ct_event::Event::FocusLost),
            Some(Event::Focus(false))
        );
    }

    #[test]
    fn keyboard_events_are_dropped() {
        let key = ct_event::KeyEvent::new(ct_event::KeyCode::Enter, ct_event::KeyModifiers::NONE);
        assert_eq!(Event::from_crossterm(ct_event::Event::Key(key)), None);
    }
}
