//! Keyboard input buffer
//!
//! Event handlers (possibly on another thread) record press/release; the game
//! reads a last-value-wins `InputSnapshot` once per tick. State is packed into
//! one byte so writers and the reader never block each other.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::sim::InputSnapshot;

/// Logical actions the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    RotateLeft,
    RotateRight,
    Accelerate,
    Fire,
    Pause,
}

impl Action {
    /// Default key binding (DOM `KeyboardEvent.code` names)
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "KeyA" => Some(Action::RotateLeft),
            "KeyD" => Some(Action::RotateRight),
            "KeyW" => Some(Action::Accelerate),
            "Space" => Some(Action::Fire),
            "Escape" => Some(Action::Pause),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Action::RotateLeft => 0x01,
            Action::RotateRight => 0x02,
            Action::Accelerate => 0x04,
            Action::Fire => 0x08,
            Action::Pause => 0x10,
        }
    }
}

fn snapshot_from_bits(bits: u8) -> InputSnapshot {
    let held = |action: Action| (bits & action.bit()) != 0;
    InputSnapshot {
        rotate_left: held(Action::RotateLeft),
        rotate_right: held(Action::RotateRight),
        accelerate: held(Action::Accelerate),
        fire: held(Action::Fire),
        pause: held(Action::Pause),
    }
}

/// Shared held-key state
#[derive(Debug, Default)]
pub struct InputBuffer {
    held: AtomicU8,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, action: Action) {
        self.held.fetch_or(action.bit(), Ordering::AcqRel);
    }

    pub fn release(&self, action: Action) {
        self.held.fetch_and(!action.bit(), Ordering::AcqRel);
    }

    /// Apply a raw key event. Unbound codes are ignored; returns whether the
    /// code was bound (so the caller can suppress its default handling).
    pub fn handle_key(&self, code: &str, pressed: bool) -> bool {
        let Some(action) = Action::from_key_code(code) else {
            return false;
        };
        if pressed {
            self.press(action);
        } else {
            self.release(action);
        }
        true
    }

    /// Current state of every action
    pub fn snapshot(&self) -> InputSnapshot {
        snapshot_from_bits(self.held.load(Ordering::Acquire))
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&self) {
        self.held.store(0, Ordering::Release);
    }
}
