//! Aim preview - the dotted guide ray drawn while the shooter is idle.
//!
//! The ray starts at the shooter and bounces off the side walls until its
//! length runs out. Walls sit one radius in from the playfield edges, the
//! line a bubble centre can reach.

use bevy::prelude::*;

use super::hex::{BUBBLE_RADIUS, CANVAS_WIDTH};

/// Upper bound on bounces, so a degenerate ray can never loop forever.
const MAX_BOUNCES: usize = 32;

/// Left wall for bubble centres.
const LEFT_LIMIT: f32 = BUBBLE_RADIUS;

/// Right wall for bubble centres.
const RIGHT_LIMIT: f32 = CANVAS_WIDTH - BUBBLE_RADIUS;

/// One straight piece of the preview ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl PreviewSegment {
    /// Unit direction of travel along this segment.
    pub fn direction(&self) -> Vec2 {
        (self.end - self.start).normalize_or_zero()
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Trace the preview ray from `origin` along `angle` for `max_length`
/// pixels, reflecting off the side walls.
///
/// A vertical ray never tests the walls. A non-positive or non-finite
/// length yields an empty path.
pub fn preview_path(origin: Vec2, angle: f32, max_length: f32) -> Vec<PreviewSegment> {
    let mut segments = Vec::new();
    if !(max_length.is_finite() && max_length > 0.0 && angle.is_finite()) {
        return segments;
    }

    let mut current = origin;
    let mut dir = Vec2::new(angle.sin(), -angle.cos());
    let mut remaining = max_length;

    while remaining > 0.0 && segments.len() <= MAX_BOUNCES {
        let next = current + dir * remaining;

        let wall_x = if dir.x == 0.0 {
            None
        } else if next.x < LEFT_LIMIT {
            Some(LEFT_LIMIT)
        } else if next.x > RIGHT_LIMIT {
            Some(RIGHT_LIMIT)
        } else {
            None
        };

        let Some(wall_x) = wall_x else {
            segments.push(PreviewSegment {
                start: current,
                end: next,
            });
            break;
        };

        // Already past the wall (origin outside the field): just turn around
        let t = ((wall_x - current.x) / dir.x).max(0.0);
        let bounce = Vec2::new(wall_x, current.y + dir.y * t);
        if t > 0.0 {
            segments.push(PreviewSegment {
                start: current,
                end: bounce,
            });
        }
        current = bounce;
        dir.x = -dir.x;
        remaining -= t;
    }

    segments
}
