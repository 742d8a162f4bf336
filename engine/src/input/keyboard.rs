//! Keyboard Input Module
//!
//! Generic key codes, decoupled from any windowing system. The host
//! translates its own key events into these before handing them to
//! [`KeyBindings`](super::KeyBindings).

/// Generic key codes, independent of the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Q,
    E,
    Space,
    ShiftLeft,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Combat and camera
    F,
    Z,
    X,
    PageUp,
    PageDown,

    // Time rate
    Equal,
    Minus,

    // Control keys
    R,
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}
