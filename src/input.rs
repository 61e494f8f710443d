//! Keyboard input state
//!
//! Event handlers record into this between frames; the loop samples it once
//! at the start of each tick. Movement is level-triggered (held keys). Shoot
//! and pause are edge-triggered: one bullet or one toggle per press, with
//! auto-repeat ignored.

use crate::sim::{Heading, TickInput};

/// Logical game key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Shoot,
    Pause,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "Down" | "s" | "S" => Some(Key::Down),
            "ArrowLeft" | "Left" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "Right" | "d" | "D" => Some(Key::Right),
            " " | "Spacebar" => Some(Key::Shoot),
            "Escape" | "Esc" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Shared input state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    heading: Heading,
    shoot_held: bool,
    pause_held: bool,
    pending_shots: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. `Pause` is not queued here; it acts immediately
    /// through the game flow since no tick runs while paused. See
    /// [`InputState::press_pause`].
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Up => self.heading.up = true,
            Key::Down => self.heading.down = true,
            Key::Left => self.heading.left = true,
            Key::Right => self.heading.right = true,
            Key::Shoot => {
                if !self.shoot_held {
                    self.shoot_held = true;
                    self.pending_shots += 1;
                }
            }
            Key::Pause => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.heading.up = false,
            Key::Down => self.heading.down = false,
            Key::Left => self.heading.left = false,
            Key::Right => self.heading.right = false,
            Key::Shoot => self.shoot_held = false,
            Key::Pause => self.pause_held = false,
        }
    }

    /// Register a pause key press. `false` for auto-repeat while held.
    pub fn press_pause(&mut self) -> bool {
        !std::mem::replace(&mut self.pause_held, true)
    }

    /// Release everything (window lost focus, key-ups will never arrive)
    pub fn release_all(&mut self) {
        self.heading = Heading::default();
        self.shoot_held = false;
        self.pause_held = false;
    }

    /// Drop queued shots without touching held keys
    pub fn discard_pending(&mut self) {
        self.pending_shots = 0;
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Take the input for one tick, consuming queued shots
    pub fn sample(&mut self) -> TickInput {
        TickInput {
            heading: self.heading,
            shots: std::mem::take(&mut self.pending_shots),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom_key("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom_key("d"), Some(Key::Right));
        assert_eq!(Key::from_dom_key(" "), Some(Key::Shoot));
        assert_eq!(Key::from_dom_key("Escape"), Some(Key::Pause));
        assert_eq!(Key::from_dom_key("Enter"), None);
    }

    #[test]
    fn test_held_keys_persist_across_samples() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Up);
        assert_eq!(input.sample().heading.axes(), glam::Vec2::new(-1.0, -1.0));
        assert_eq!(input.sample().heading.axes(), glam::Vec2::new(-1.0, -1.0));
        input.key_up(Key::Left);
        assert_eq!(input.sample().heading.axes(), glam::Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_shot_is_edge_triggered() {
        let mut input = InputState::new();
        input.key_down(Key::Shoot);
        // Auto-repeat while held
        input.key_down(Key::Shoot);
        input.key_down(Key::Shoot);
        assert_eq!(input.sample().shots, 1);
        assert_eq!(input.sample().shots, 0);

        input.key_up(Key::Shoot);
        input.key_down(Key::Shoot);
        input.key_up(Key::Shoot);
        input.key_down(Key::Shoot);
        assert_eq!(input.sample().shots, 2);
    }

    #[test]
    fn test_release_all_clears_held_keys() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.key_down(Key::Shoot);
        input.release_all();
        assert_eq!(input.heading(), Heading::default());
        // A press queued before focus loss still fires
        assert_eq!(input.sample().shots, 1);
        // Shoot counts as released, so the next press fires again
        input.key_down(Key::Shoot);
        assert_eq!(input.sample().shots, 1);
    }

    #[test]
    fn test_discard_pending_keeps_heading() {
        let mut input = InputState::new();
        input.key_down(Key::Down);
        input.key_down(Key::Shoot);
        input.discard_pending();
        let tick = input.sample();
        assert_eq!(tick.shots, 0);
        assert!(tick.heading.down);
    }

    #[test]
    fn test_pause_press_is_edge_triggered() {
        let mut input = InputState::new();
        assert!(input.press_pause());
        assert!(!input.press_pause());
        input.key_up(Key::Pause);
        assert!(input.press_pause());
        // Focus loss swallows the key-up
        input.release_all();
        assert!(input.press_pause());
    }
}
