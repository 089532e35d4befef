//! The shooter/launcher at the bottom of the playfield.
//!
//! The player aims by moving the pointer and fires the loaded bubble
//! upward. The shooter always has a loaded bubble ready and a queued
//! bubble shown as a preview of what follows.

use bevy::prelude::*;
use rand::Rng;
use serde::Serialize;

use super::{
    bubble::BubbleColor,
    hex::{BUBBLE_RADIUS, CANVAS_WIDTH},
};

/// The Y position of the shooter (bottom of play area).
pub const SHOOTER_Y: f32 = 550.0;

/// Where every projectile starts: horizontally centred at the shooter.
pub const SHOOTER_ORIGIN: Vec2 = Vec2::new(CANVAS_WIDTH / 2.0, SHOOTER_Y);

/// Length of the barrel drawn from the origin along the aim.
pub const BARREL_LENGTH: f32 = BUBBLE_RADIUS * 2.0;

/// Aim plus the two upcoming colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShooterState {
    /// Radians from straight up, positive to the right.
    angle: f32,
    /// The bubble fired next.
    pub loaded: Option<BubbleColor>,
    /// The bubble after that.
    pub queued: BubbleColor,
}

impl ShooterState {
    pub fn new(loaded: BubbleColor, queued: BubbleColor) -> Self {
        Self {
            angle: 0.0,
            loaded: Some(loaded),
            queued,
        }
    }

    /// A shooter with two random colors, aiming straight up.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(BubbleColor::random(rng), BubbleColor::random(rng))
    }

    /// Current aim in radians.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Set the aim, clamped to `[-max_angle, max_angle]`.
    ///
    /// Non-finite input is ignored.
    pub fn set_angle(&mut self, angle: f32, max_angle: f32) {
        if !angle.is_finite() {
            return;
        }
        self.angle = angle.clamp(-max_angle, max_angle);
    }

    /// Map a pointer's x position on the playfield to an aim angle.
    ///
    /// The offset from the playfield centre scales linearly onto
    /// `[-max_angle, max_angle]`: the left edge aims fully left, the right
    /// edge fully right.
    pub fn angle_from_pointer_x(x: f32, width: f32, max_angle: f32) -> f32 {
        let half = width / 2.0;
        if half <= 0.0 {
            return 0.0;
        }
        ((x - half) / half * max_angle).clamp(-max_angle, max_angle)
    }

    /// Unit vector along the current aim (y down).
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.angle.sin(), -self.angle.cos())
    }

    /// Cycle colors after a shot: queued moves up, a fresh color is queued.
    pub fn rotate(&mut self, rng: &mut impl Rng) {
        self.loaded = Some(self.queued);
        self.queued = BubbleColor::random(rng);
        info!("Reloaded with {:?}, next is {:?}", self.loaded, self.queued);
    }
}
