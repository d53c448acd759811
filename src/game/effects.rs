//! Timed Feedback Effects
//!
//! Camera shake and text flashing, expressed as plain timers advanced once
//! per tick. Restarting a timer that is still running replaces it.

use macroquad::prelude::{vec2, Vec2};

/// How long and hard the camera shakes on a failed transaction.
pub const SHAKE_DURATION: f32 = 0.5;
pub const SHAKE_MAGNITUDE: f32 = 0.05;

/// Flash settings for the cost text (insufficient funds) and the owned
/// quantity text (inventory limit).
pub const COST_FLASH_COUNT: u32 = 3;
pub const COST_FLASH_INTERVAL: f32 = 0.2;
pub const QUANTITY_FLASH_COUNT: u32 = 4;
pub const QUANTITY_FLASH_INTERVAL: f32 = 0.25;

/// Random camera offset for a fixed duration, then rests at zero.
#[derive(Debug, Clone, Default)]
pub struct ScreenShake {
    remaining: f32,
    magnitude: f32,
    offset: Vec2,
}

impl ScreenShake {
    pub fn start(&mut self, duration: f32, magnitude: f32) {
        self.remaining = duration;
        self.magnitude = magnitude;
    }

    pub fn update(&mut self, dt: f32) {
        if self.remaining <= 0.0 {
            return;
        }
        self.remaining -= dt;
        if self.remaining > 0.0 {
            self.offset = vec2(
                macroquad::rand::gen_range(-self.magnitude, self.magnitude),
                macroquad::rand::gen_range(-self.magnitude, self.magnitude),
            );
        } else {
            self.offset = Vec2::ZERO;
        }
    }

    pub fn active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Current world-space camera offset; zero when idle.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

/// Blinks a piece of text: `count` hide/show cycles, then rests visible.
#[derive(Debug, Clone, Default)]
pub struct TextFlash {
    half_periods: u32,
    interval: f32,
    timer: f32,
}

impl TextFlash {
    pub fn start(&mut self, count: u32, interval: f32) {
        self.half_periods = count * 2;
        self.interval = interval;
        self.timer = interval;
    }

    pub fn update(&mut self, dt: f32) {
        if self.half_periods == 0 {
            return;
        }
        self.timer -= dt;
        while self.timer <= 0.0 && self.half_periods > 0 {
            self.half_periods -= 1;
            self.timer += self.interval;
        }
    }

    pub fn active(&self) -> bool {
        self.half_periods > 0
    }

    /// False during the "hide" half of each cycle.
    pub fn visible(&self) -> bool {
        // Cycles start hidden, so the even-numbered remaining half-periods
        // are the hidden ones.
        !(self.half_periods > 0 && self.half_periods % 2 == 0)
    }
}

/// Counts down a fixed number of ticks; used to defer showing a menu by one
/// scheduling tick.
#[derive(Debug, Clone)]
pub struct TickDelay {
    remaining: u32,
}

impl TickDelay {
    pub fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn done(&self) -> bool {
        self.remaining == 0
    }
}

/// All feedback effects owned by the game, advanced once per tick.
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub shake: ScreenShake,
}

impl Effects {
    pub fn update(&mut self, dt: f32) {
        self.shake.update(dt);
    }

    /// Fire the standard transaction-failure shake.
    pub fn shake_camera(&mut self) {
        self.shake.start(SHAKE_DURATION, SHAKE_MAGNITUDE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shake_runs_for_duration_then_rests() {
        let mut shake = ScreenShake::default();
        assert!(!shake.active());
        shake.start(0.5, 0.05);
        assert!(shake.active());

        shake.update(0.3);
        assert!(shake.active());

        shake.update(0.3);
        assert!(!shake.active());
        assert_eq!(shake.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_shake_offset_bounded_by_magnitude() {
        let mut shake = ScreenShake::default();
        shake.start(1.0, 0.05);
        shake.update(0.1);
        let off = shake.offset();
        assert!(off.x.abs() <= 0.05 && off.y.abs() <= 0.05);
    }

    #[test]
    fn test_flash_toggles_then_rests_visible() {
        let mut flash = TextFlash::default();
        assert!(flash.visible());

        flash.start(3, 0.2);
        assert!(flash.active());
        assert!(!flash.visible(), "flash starts on a hidden half-period");

        let mut seen = Vec::new();
        for _ in 0..6 {
            flash.update(0.2);
            seen.push(flash.visible());
        }
        assert_eq!(seen, vec![true, false, true, false, true, true]);
        assert!(!flash.active());
    }

    #[test]
    fn test_flash_handles_large_delta() {
        let mut flash = TextFlash::default();
        flash.start(4, 0.25);
        // One huge tick swallows the whole sequence
        flash.update(10.0);
        assert!(!flash.active());
        assert!(flash.visible());
    }

    #[test]
    fn test_tick_delay() {
        let mut delay = TickDelay::new(1);
        assert!(!delay.done());
        delay.tick();
        assert!(delay.done());
        delay.tick();
        assert!(delay.done());
    }
}
