//! Input handling for the background window.
//!
//! [`Input`] turns raw winit events into two things the runner cares about:
//! keys pressed this frame (for the theme/pause/reset/quit shortcuts) and a
//! queue of [`PointerEvent`]s in pixel space. Mouse and touch both feed the
//! same queue; only the first touch is tracked.
//!
//! ```ignore
//! for event in input.drain_pointer_events() {
//!     match event {
//!         PointerEvent::Down(pos) => field.pointer_down(pos),
//!         PointerEvent::Move(pos) => field.pointer_move(pos),
//!         PointerEvent::Up => field.pointer_up(),
//!         PointerEvent::Leave => field.pointer_leave(),
//!     }
//! }
//! ```

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Keys the runner reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    T,
    R,
    Space,
    Escape,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyT => KeyCode::T,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Pointer activity, in physical pixels from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Left button pressed or touch started.
    Down(Vec2),
    /// Cursor or touch moved.
    Move(Vec2),
    /// Left button released, touch ended or cancelled.
    Up,
    /// Cursor left the window.
    Leave,
}

/// Keyboard and pointer state for one window.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,

    cursor: Vec2,
    button_down: bool,
    touch: Option<u64>,
    pointer_events: Vec<PointerEvent>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Take the pointer events queued since the last call.
    pub fn drain_pointer_events(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.pointer_events)
    }

    /// Called at the start of each frame to clear per-frame state.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.on_key(KeyCode::from(code), event.state);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.on_button(*state),
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => self.on_cursor_left(),
            WindowEvent::Touch(Touch {
                id,
                phase,
                location,
                ..
            }) => {
                self.on_touch(*id, *phase, Vec2::new(location.x as f32, location.y as f32));
            }
            _ => {}
        }
    }

    fn on_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // No repeat while held
                if self.keys_held.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    fn on_button(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed if !self.button_down => {
                self.button_down = true;
                self.pointer_events.push(PointerEvent::Down(self.cursor));
            }
            ElementState::Released if self.button_down => {
                self.button_down = false;
                self.pointer_events.push(PointerEvent::Up);
            }
            _ => {}
        }
    }

    fn on_cursor(&mut self, position: Vec2) {
        self.cursor = position;
        self.pointer_events.push(PointerEvent::Move(position));
    }

    fn on_cursor_left(&mut self) {
        self.button_down = false;
        self.pointer_events.push(PointerEvent::Leave);
    }

    fn on_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        match phase {
            TouchPhase::Started if self.touch.is_none() => {
                self.touch = Some(id);
                self.cursor = position;
                self.pointer_events.push(PointerEvent::Down(position));
            }
            TouchPhase::Moved if self.touch == Some(id) => {
                self.cursor = position;
                self.pointer_events.push(PointerEvent::Move(position));
            }
            TouchPhase::Ended | TouchPhase::Cancelled if self.touch == Some(id) => {
                self.touch = None;
                self.pointer_events.push(PointerEvent::Up);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pressed_once_per_hold() {
        let mut input = Input::new();
        input.on_key(KeyCode::T, ElementState::Pressed);
        assert!(input.key_pressed(KeyCode::T));

        // Key repeat while held does not re-fire
        input.begin_frame();
        input.on_key(KeyCode::T, ElementState::Pressed);
        assert!(!input.key_pressed(KeyCode::T));
        assert!(input.key_held(KeyCode::T));

        input.on_key(KeyCode::T, ElementState::Released);
        input.begin_frame();
        input.on_key(KeyCode::T, ElementState::Pressed);
        assert!(input.key_pressed(KeyCode::T));
    }

    #[test]
    fn test_unbound_keys_map_to_other() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyT), KeyCode::T);
        assert_eq!(KeyCode::from(WinitKeyCode::Escape), KeyCode::Escape);
        assert!(matches!(KeyCode::from(WinitKeyCode::KeyP), KeyCode::Other(_)));
    }

    #[test]
    fn test_mouse_press_uses_last_cursor() {
        let mut input = Input::new();
        input.on_cursor(Vec2::new(12.0, 34.0));
        input.on_button(ElementState::Pressed);
        input.on_button(ElementState::Released);

        assert_eq!(
            input.drain_pointer_events(),
            vec![
                PointerEvent::Move(Vec2::new(12.0, 34.0)),
                PointerEvent::Down(Vec2::new(12.0, 34.0)),
                PointerEvent::Up,
            ]
        );
        assert!(input.drain_pointer_events().is_empty());
    }

    #[test]
    fn test_second_touch_ignored() {
        let mut input = Input::new();
        input.on_touch(1, TouchPhase::Started, Vec2::new(5.0, 5.0));
        input.on_touch(2, TouchPhase::Started, Vec2::new(9.0, 9.0));
        input.on_touch(2, TouchPhase::Moved, Vec2::new(10.0, 10.0));
        input.on_touch(1, TouchPhase::Moved, Vec2::new(6.0, 6.0));
        input.on_touch(2, TouchPhase::Ended, Vec2::new(10.0, 10.0));
        input.on_touch(1, TouchPhase::Cancelled, Vec2::new(6.0, 6.0));

        assert_eq!(
            input.drain_pointer_events(),
            vec![
                PointerEvent::Down(Vec2::new(5.0, 5.0)),
                PointerEvent::Move(Vec2::new(6.0, 6.0)),
                PointerEvent::Up,
            ]
        );
    }

    #[test]
    fn test_leave_releases_button() {
        let mut input = Input::new();
        input.on_button(ElementState::Pressed);
        input.on_cursor_left();
        // Release outside the window does not produce a second Up
        input.on_button(ElementState::Released);

        assert_eq!(
            input.drain_pointer_events(),
            vec![PointerEvent::Down(Vec2::ZERO), PointerEvent::Leave]
        );
    }
}
