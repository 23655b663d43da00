//! Pointer/touch bookkeeping for spawning points under the cursor.
//!
//! [`PointerTracker`] only decides *when* something should happen; the field
//! owns the points and applies the result.

use glam::Vec2;

/// State of the (single) pointer driving interaction.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    held_at: Option<Vec2>,
    carry: f32,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down at `position`.
    pub fn press(&mut self, position: Vec2) {
        self.held_at = Some(position);
        self.carry = 0.0;
    }

    /// Pointer moved. Ignored while the pointer is up.
    pub fn move_to(&mut self, position: Vec2) {
        if let Some(held) = self.held_at.as_mut() {
            *held = position;
        }
    }

    /// Pointer went up or left the surface.
    pub fn release(&mut self) {
        self.held_at = None;
        self.carry = 0.0;
    }

    /// Whether the pointer is currently held down.
    pub fn is_down(&self) -> bool {
        self.held_at.is_some()
    }

    /// Pointer position while held down.
    pub fn position(&self) -> Option<Vec2> {
        self.held_at
    }

    /// Spawns owed after `dt` seconds at `rate` points per second, at most `limit`.
    ///
    /// Fractions carry over between calls so low rates still spawn steadily.
    /// Anything owed beyond `limit` is dropped.
    pub fn due(&mut self, dt: f32, rate: f32, limit: u32) -> u32 {
        if self.held_at.is_none() || !(dt > 0.0) || !(rate > 0.0) {
            return 0;
        }
        let owed = self.carry + dt * rate;
        if !owed.is_finite() {
            self.carry = 0.0;
            return limit;
        }
        let whole = owed.floor();
        if whole >= limit as f32 {
            self.carry = 0.0;
            return limit;
        }
        self.carry = owed - whole;
        whole as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_while_up() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.due(10.0, 5.0, 100), 0);
        tracker.move_to(Vec2::ONE);
        assert_eq!(tracker.position(), None);
    }

    #[test]
    fn test_rate_accumulates() {
        let mut tracker = PointerTracker::new();
        tracker.press(Vec2::new(5.0, 5.0));

        // 4 per second at 60 fps: one spawn every 15 frames
        let total: u32 = (0..60).map(|_| tracker.due(1.0 / 60.0, 4.0, 100)).sum();
        assert!((3..=4).contains(&total), "spawned {}", total);
    }

    #[test]
    fn test_release_resets_carry() {
        let mut tracker = PointerTracker::new();
        tracker.press(Vec2::ZERO);
        assert_eq!(tracker.due(0.2, 4.0, 100), 0);
        tracker.release();
        tracker.press(Vec2::ZERO);
        assert_eq!(tracker.due(0.2, 4.0, 100), 0);
        assert_eq!(tracker.due(0.05, 4.0, 100), 1);
    }

    #[test]
    fn test_due_is_limited() {
        let mut tracker = PointerTracker::new();
        tracker.press(Vec2::ZERO);
        assert_eq!(tracker.due(250_000.0, 4.0, 40), 40);
        assert_eq!(tracker.due(f32::MAX, 4.0, 40), 40);

        // Carry is still usable afterwards
        assert_eq!(tracker.due(0.2, 4.0, 40), 0);
        assert_eq!(tracker.due(0.05, 4.0, 40), 1);
    }

    #[test]
    fn test_move_updates_held_position() {
        let mut tracker = PointerTracker::new();
        tracker.press(Vec2::ZERO);
        tracker.move_to(Vec2::new(3.0, 4.0));
        assert_eq!(tracker.position(), Some(Vec2::new(3.0, 4.0)));
        assert!(tracker.is_down());
    }
}
